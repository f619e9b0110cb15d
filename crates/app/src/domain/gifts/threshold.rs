//! Target-state calculation.

/// Whether a cart worth `cart_value` minor units should hold the gift.
pub const fn should_have_gift(cart_value: u64, threshold: u64) -> bool {
    cart_value >= threshold
}
