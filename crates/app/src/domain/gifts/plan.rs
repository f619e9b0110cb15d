//! Decide the mutation that brings a cart to its target gift state.

use crate::domain::{
    carts::models::{Cart, LineItem},
    gifts::{models::GiftPolicy, predicate::is_gift, threshold::should_have_gift},
};

/// What a reconciliation has to write, if anything.
#[derive(Debug, Clone, PartialEq)]
pub enum GiftPlan {
    /// The cart is already in its target state.
    Keep {
        /// Whether the cart holds a gift.
        has_gift: bool,
    },

    /// Append one gift line item to the existing sequence.
    Add,

    /// Write back `retained`, which drops every gift-like item.
    Remove {
        /// Line items left after dropping the gifts, in their original order.
        retained: Vec<LineItem>,
        /// Number of gift-like items dropped.
        removed: usize,
    },
}

impl GiftPlan {
    /// Build the plan for `cart` observed at `cart_value` minor units.
    ///
    /// Removal drops every item matching the predicate, not only the first, so
    /// duplicates left by earlier races or manual edits collapse in one write.
    pub fn for_cart(cart: &Cart, cart_value: u64, policy: &GiftPolicy) -> Self {
        let gifts = cart
            .line_items
            .iter()
            .filter(|item| is_gift(item, policy))
            .count();

        let target = should_have_gift(cart_value, policy.threshold);

        match (gifts > 0, target) {
            (false, true) => Self::Add,
            (true, false) => Self::Remove {
                retained: cart
                    .line_items
                    .iter()
                    .filter(|item| !is_gift(item, policy))
                    .cloned()
                    .collect(),
                removed: gifts,
            },
            (has_gift, _) => Self::Keep { has_gift },
        }
    }
}
