//! Shopify Admin REST client.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{HeaderMap, LINK},
};
use serde::de::DeserializeOwned;
use url::Url;

use crate::shopify::{
    ShopifyError,
    payloads::{
        DraftOrderEnvelope, DraftOrderPage, DraftOrderPayload, DraftOrderUpdate,
        DraftOrdersEnvelope, LineItemPayload, LineItemsUpdate, NewWebhook, NewWebhookRequest,
        ProductEnvelope, ProductPayload, WebhookEnvelope, WebhookPayload,
    },
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";
const PAGE_LIMIT: &str = "250";

/// Configuration for connecting to a Shopify store.
#[derive(Clone)]
pub struct ShopifyConfig {
    /// Store domain, e.g. `"example.myshopify.com"`.
    pub store: String,

    /// Admin API access token.
    pub access_token: String,

    /// Admin API version, e.g. `"2023-10"`.
    pub api_version: String,

    /// Replaces `https://{store}` as the request origin when set.
    pub base_url: Option<String>,
}

impl ShopifyConfig {
    fn admin_base(&self) -> String {
        let origin = self
            .base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.store));

        format!(
            "{}/admin/api/{}",
            origin.trim_end_matches('/'),
            self.api_version
        )
    }
}

impl Debug for ShopifyConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("ShopifyConfig")
            .field("store", &self.store)
            .field("access_token", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// HTTP client for the Shopify Admin API.
///
/// Every call is attempted once; retrying is left to the caller.
#[derive(Debug, Clone)]
pub struct ShopifyClient {
    config: ShopifyConfig,
    base: String,
    http: Client,
}

impl ShopifyClient {
    /// Create a new client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ShopifyConfig) -> Result<Self, ShopifyError> {
        let http = Client::builder()
            .user_agent(concat!("freebie/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base: config.admin_base(),
            config,
            http,
        })
    }

    /// Fetch a draft order by id. Returns `Ok(None)` when Shopify answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other non-2xx response.
    pub async fn get_draft_order(
        &self,
        draft_order: u64,
    ) -> Result<Option<DraftOrderPayload>, ShopifyError> {
        let url = format!("{}/draft_orders/{draft_order}.json", self.base);

        let envelope: Option<DraftOrderEnvelope> = self
            .fetch_optional(self.http.get(&url), "get draft order")
            .await?;

        Ok(envelope.map(|envelope| envelope.draft_order))
    }

    /// Fetch one page of open draft orders.
    ///
    /// Pass the `next_page_info` cursor of the previous page to continue the
    /// listing; `None` starts from the beginning.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn list_draft_orders(
        &self,
        page_info: Option<&str>,
    ) -> Result<DraftOrderPage, ShopifyError> {
        let url = format!("{}/draft_orders.json", self.base);

        // Shopify rejects filter parameters alongside a page cursor.
        let request = match page_info {
            Some(cursor) => self
                .http
                .get(&url)
                .query(&[("limit", PAGE_LIMIT), ("page_info", cursor)]),
            None => self
                .http
                .get(&url)
                .query(&[("limit", PAGE_LIMIT), ("status", "open")]),
        };

        let response = self.send(request, "list draft orders").await?;
        let next_page_info = next_page_info(response.headers());
        let envelope: DraftOrdersEnvelope = response.json().await?;

        Ok(DraftOrderPage {
            draft_orders: envelope.draft_orders,
            next_page_info,
        })
    }

    /// Fetch a product by id. Returns `Ok(None)` when Shopify answers 404.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or any other non-2xx response.
    pub async fn get_product(&self, product: u64) -> Result<Option<ProductPayload>, ShopifyError> {
        let url = format!("{}/products/{product}.json", self.base);

        let envelope: Option<ProductEnvelope> = self
            .fetch_optional(self.http.get(&url), "get product")
            .await?;

        Ok(envelope.map(|envelope| envelope.product))
    }

    /// Replace the whole line item collection of a draft order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn update_draft_order_line_items(
        &self,
        draft_order: u64,
        line_items: &[LineItemPayload],
    ) -> Result<(), ShopifyError> {
        let url = format!("{}/draft_orders/{draft_order}.json", self.base);

        let body = DraftOrderUpdate {
            draft_order: LineItemsUpdate { line_items },
        };

        self.send(self.http.put(&url).json(&body), "update draft order")
            .await?;

        Ok(())
    }

    /// Subscribe `address` to JSON notifications for `topic`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx response.
    pub async fn create_webhook(
        &self,
        topic: &str,
        address: &str,
    ) -> Result<WebhookPayload, ShopifyError> {
        let url = format!("{}/webhooks.json", self.base);

        let body = NewWebhookRequest {
            webhook: NewWebhook {
                topic,
                address,
                format: "json",
            },
        };

        let response = self
            .send(self.http.post(&url).json(&body), "create webhook")
            .await?;

        let envelope: WebhookEnvelope = response.json().await?;

        Ok(envelope.webhook)
    }

    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<Option<T>, ShopifyError> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = ensure_success(response, operation).await?;

        Ok(Some(response.json().await?))
    }

    async fn send(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<Response, ShopifyError> {
        let response = request
            .header(ACCESS_TOKEN_HEADER, &self.config.access_token)
            .send()
            .await?;

        ensure_success(response, operation).await
    }
}

async fn ensure_success(
    response: Response,
    operation: &'static str,
) -> Result<Response, ShopifyError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();

    Err(ShopifyError::UnexpectedResponse {
        operation,
        status: status.as_u16(),
        body,
    })
}

/// Extract the `page_info` cursor from a `Link: <...>; rel="next"` header.
fn next_page_info(headers: &HeaderMap) -> Option<String> {
    let link = headers.get(LINK)?.to_str().ok()?;

    link.split(',').find_map(|entry| {
        let (target, params) = entry.split_once(';')?;

        let is_next = params
            .split(';')
            .any(|param| param.trim().eq_ignore_ascii_case(r#"rel="next""#));

        if !is_next {
            return None;
        }

        let target = target.trim().trim_start_matches('<').trim_end_matches('>');

        Url::parse(target)
            .ok()?
            .query_pairs()
            .find(|(key, _)| key == "page_info")
            .map(|(_, value)| value.into_owned())
    })
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;
    use serde_json::json;
    use testresult::TestResult;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, header, method, path, query_param, query_param_is_missing},
    };

    use super::*;

    fn client_for(server: &MockServer) -> Result<ShopifyClient, ShopifyError> {
        ShopifyClient::new(ShopifyConfig {
            store: "example.myshopify.com".to_string(),
            access_token: "shpat_test".to_string(),
            api_version: "2023-10".to_string(),
            base_url: Some(server.uri()),
        })
    }

    #[test]
    fn admin_base_defaults_to_store_domain() {
        let config = ShopifyConfig {
            store: "example.myshopify.com".to_string(),
            access_token: String::new(),
            api_version: "2024-10".to_string(),
            base_url: None,
        };

        assert_eq!(
            config.admin_base(),
            "https://example.myshopify.com/admin/api/2024-10"
        );
    }

    #[test]
    fn debug_output_redacts_access_token() {
        let config = ShopifyConfig {
            store: "example.myshopify.com".to_string(),
            access_token: "shpat_secret".to_string(),
            api_version: "2023-10".to_string(),
            base_url: None,
        };

        assert!(!format!("{config:?}").contains("shpat_secret"));
    }

    #[test]
    fn next_page_info_reads_next_relation_only() {
        let mut headers = HeaderMap::new();

        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://example.myshopify.com/admin/api/2023-10/draft_orders.json?limit=250&page_info=prev123>; rel=\"previous\", \
                 <https://example.myshopify.com/admin/api/2023-10/draft_orders.json?limit=250&page_info=next456>; rel=\"next\"",
            ),
        );

        assert_eq!(next_page_info(&headers), Some("next456".to_string()));
    }

    #[test]
    fn next_page_info_is_none_on_last_page() {
        let mut headers = HeaderMap::new();

        headers.insert(
            LINK,
            HeaderValue::from_static(
                "<https://example.myshopify.com/admin/api/2023-10/draft_orders.json?page_info=prev123>; rel=\"previous\"",
            ),
        );

        assert_eq!(next_page_info(&headers), None);
        assert_eq!(next_page_info(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn get_draft_order_sends_access_token() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/draft_orders/42.json"))
            .and(header("X-Shopify-Access-Token", "shpat_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "draft_order": {
                    "id": 42,
                    "line_items": [{ "title": "Basic T-shirt", "quantity": 1, "price": "1000.00" }],
                    "subtotal_price": "1000.00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let order = client_for(&server)?.get_draft_order(42).await?;

        assert_eq!(order.as_ref().map(|order| order.id), Some(42));
        assert_eq!(order.as_ref().map(|order| order.line_items.len()), Some(1));
        assert_eq!(
            order.and_then(|order| order.subtotal_price).as_deref(),
            Some("1000.00")
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_draft_order_maps_404_to_none() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/draft_orders/7.json"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "errors": "Not Found" })))
            .mount(&server)
            .await;

        let order = client_for(&server)?.get_draft_order(7).await?;

        assert!(order.is_none(), "expected missing draft order");

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_surface_status_and_body() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/products/9.json"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let result = client_for(&server)?.get_product(9).await;

        assert!(
            matches!(
                &result,
                Err(ShopifyError::UnexpectedResponse { status: 503, body, .. }) if body == "maintenance"
            ),
            "expected 503 passthrough, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_draft_orders_follows_cursor_parameters() -> TestResult {
        let server = MockServer::start().await;
        let next = format!(
            "<{}/admin/api/2023-10/draft_orders.json?limit=250&page_info=abc>; rel=\"next\"",
            server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/draft_orders.json"))
            .and(query_param("status", "open"))
            .and(query_param_is_missing("page_info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", next.as_str())
                    .set_body_json(json!({ "draft_orders": [{ "id": 1, "cart_token": "t-1" }] })),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/draft_orders.json"))
            .and(query_param("page_info", "abc"))
            .and(query_param_is_missing("status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "draft_orders": [{ "id": 2, "cart_token": "t-2" }] })),
            )
            .mount(&server)
            .await;

        let client = client_for(&server)?;

        let first = client.list_draft_orders(None).await?;

        assert_eq!(first.next_page_info.as_deref(), Some("abc"));

        let second = client.list_draft_orders(Some("abc")).await?;

        assert_eq!(second.draft_orders.len(), 1);
        assert!(second.next_page_info.is_none(), "expected last page");

        Ok(())
    }

    #[tokio::test]
    async fn update_sends_whole_line_item_collection() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/admin/api/2023-10/draft_orders/42.json"))
            .and(body_json(json!({
                "draft_order": {
                    "line_items": [
                        { "title": "Basic T-shirt", "quantity": 1, "price": "1000.00" },
                        { "title": "Free Gift", "variant_id": 77, "quantity": 1, "price": "0.00" }
                    ]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "draft_order": { "id": 42 } })))
            .expect(1)
            .mount(&server)
            .await;

        let line_items: Vec<LineItemPayload> = serde_json::from_value(json!([
            { "title": "Basic T-shirt", "quantity": 1, "price": "1000.00" },
            { "title": "Free Gift", "variant_id": 77, "quantity": 1, "price": "0.00" }
        ]))?;

        client_for(&server)?
            .update_draft_order_line_items(42, &line_items)
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn create_webhook_posts_json_subscription() -> TestResult {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/admin/api/2023-10/webhooks.json"))
            .and(body_json(json!({
                "webhook": {
                    "topic": "carts/update",
                    "address": "https://gifts.example.com/webhook-handler",
                    "format": "json"
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "webhook": {
                    "id": 901,
                    "topic": "carts/update",
                    "address": "https://gifts.example.com/webhook-handler"
                }
            })))
            .mount(&server)
            .await;

        let webhook = client_for(&server)?
            .create_webhook("carts/update", "https://gifts.example.com/webhook-handler")
            .await?;

        assert_eq!(webhook.id, 901);

        Ok(())
    }
}
