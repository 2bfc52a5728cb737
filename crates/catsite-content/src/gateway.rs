/// HTTP client for the content gateway.
///
/// Collection fetches are fail-open: any transport, status or JSON failure is
/// logged and reported as [`Fetched::Unavailable`], which reads as an empty
/// collection. There are no retries and no caching; every call is one GET.
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::GatewayConfig;
use crate::error::{GatewayError, LatestPostsError};
use crate::model::{CollectionRecord, ContentKind, ImageRecord};

/// Outcome of a fail-open collection fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Records(Vec<T>),
    /// The fetch failed; the reason has already been logged.
    Unavailable(String),
}

impl<T> Fetched<T> {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetched::Unavailable(_))
    }

    pub fn records(&self) -> &[T] {
        match self {
            Fetched::Records(records) => records,
            Fetched::Unavailable(_) => &[],
        }
    }

    pub fn into_records(self) -> Vec<T> {
        match self {
            Fetched::Records(records) => records,
            Fetched::Unavailable(_) => Vec::new(),
        }
    }
}

#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayConfig,
    http: reqwest::Client,
}

impl GatewayClient {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("catsite-content/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// All records of one content type, in gateway order.
    pub async fn fetch_records(&self, kind: ContentKind) -> Fetched<CollectionRecord> {
        self.fetch_collection(&self.config.collection_url(kind.collection()))
            .await
    }

    pub async fn fetch_images(&self) -> Fetched<ImageRecord> {
        self.fetch_collection(&self.config.images_url()).await
    }

    /// GET `url` and parse a JSON array, degrading every failure to `Unavailable`.
    pub async fn fetch_collection<T: DeserializeOwned>(&self, url: &str) -> Fetched<T> {
        match self.get_json::<Vec<T>>(url).await {
            Ok(records) => {
                debug!(url, count = records.len(), "collection fetched");
                Fetched::Records(records)
            }
            Err(e) => {
                warn!(url, error = %e, "collection fetch failed, treating as empty");
                Fetched::Unavailable(e.to_string())
            }
        }
    }

    /// Posts in a WordPress category, newest first.
    ///
    /// Unlike the collection routes, an empty category is reported by the
    /// gateway as a 404 with code `empty_category` and surfaced as an error.
    pub async fn latest_posts(&self, category_id: u64) -> Result<Vec<Value>, LatestPostsError> {
        let url = self.config.latest_posts_url(category_id);
        match self.get_json::<Vec<Value>>(&url).await {
            Ok(posts) => Ok(posts),
            Err(GatewayError::Status {
                status,
                code: Some(code),
                message,
                ..
            }) if status == StatusCode::NOT_FOUND && code == "empty_category" => {
                Err(LatestPostsError::EmptyCategory {
                    message: message.unwrap_or_default(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, GatewayError> {
        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let error = read_error_body(resp, self.config.max_error_body_bytes).await;
            return Err(GatewayError::Status {
                status,
                code: error.code,
                message: error.message,
                body: error.excerpt,
            });
        }
        let bytes = resp.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Error body WordPress sends for a `WP_Error`.
#[derive(Debug, Deserialize)]
struct WpErrorBody {
    code: String,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    /// At most `max_error_body_bytes` of the raw body, for logs.
    excerpt: String,
}

/// The `WP_Error` code is parsed from the whole body; only the logged excerpt is capped.
async fn read_error_body(resp: reqwest::Response, max_bytes: usize) -> ErrorBody {
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "failed to read gateway error body");
            return ErrorBody {
                excerpt: "<failed to read error body>".to_string(),
                ..ErrorBody::default()
            };
        }
    };
    let wp_error = serde_json::from_slice::<WpErrorBody>(&bytes).ok();
    let excerpt = String::from_utf8_lossy(&bytes[..bytes.len().min(max_bytes)]).into_owned();
    ErrorBody {
        code: wp_error.as_ref().map(|e| e.code.clone()),
        message: wp_error.and_then(|e| e.message),
        excerpt,
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> GatewayClient {
        GatewayClient::new(GatewayConfig::new(server.url("/wp-json"))).unwrap()
    }

    #[tokio::test]
    async fn fetch_records_requests_fixed_page_size() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/wp-json/wp/v2/catfood")
                .query_param("per_page", "100");
            then.status(200)
                .json_body(json!([{"id": 5, "date": "2025-10-01", "acf": {"food_name": "Zebra Mix"}}]));
        });

        let fetched = client_for(&server).fetch_records(ContentKind::CatFood).await;
        mock.assert();
        assert_eq!(fetched.records().len(), 1);
        assert_eq!(fetched.records()[0].id_key(), "5");
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/cattoy");
            then.status(500).body("boom");
        });

        let fetched = client_for(&server).fetch_records(ContentKind::CatToys).await;
        assert!(fetched.is_unavailable());
        assert!(fetched.into_records().is_empty());
    }

    #[tokio::test]
    async fn non_json_body_degrades_to_empty() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/wp/v2/catid");
            then.status(200).body("<html>maintenance</html>");
        });

        let fetched = client_for(&server).fetch_records(ContentKind::Cats).await;
        assert!(fetched.is_unavailable());
        assert!(fetched.records().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_degrades_to_empty() {
        // Nothing listens on port 9 of localhost.
        let client =
            GatewayClient::new(GatewayConfig::new("http://127.0.0.1:9/wp-json")).unwrap();
        let fetched = client.fetch_records(ContentKind::Cats).await;
        assert!(fetched.is_unavailable());
        assert!(fetched.into_records().is_empty());
    }

    #[tokio::test]
    async fn latest_posts_returns_posts() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/latest-posts/4");
            then.status(200).json_body(json!([{"ID": 31, "post_title": "Window seat"}]));
        });

        let posts = client_for(&server).latest_posts(4).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["post_title"], "Window seat");
    }

    #[tokio::test]
    async fn empty_category_is_an_explicit_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/latest-posts/9");
            then.status(404).json_body(json!({
                "code": "empty_category",
                "message": "No posts to display",
                "data": {"status": 404}
            }));
        });

        let result = client_for(&server).latest_posts(9).await;
        assert!(
            matches!(&result, Err(LatestPostsError::EmptyCategory { message }) if message == "No posts to display"),
            "expected EmptyCategory, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn empty_category_survives_a_small_error_body_cap() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/latest-posts/9");
            then.status(404).json_body(json!({
                "code": "empty_category",
                "message": "No posts to display",
                "data": {"status": 404}
            }));
        });
        let mut config = GatewayConfig::new(server.url("/wp-json"));
        config.max_error_body_bytes = 8;
        let client = GatewayClient::new(config).unwrap();

        let result = client.latest_posts(9).await;
        assert!(
            matches!(&result, Err(LatestPostsError::EmptyCategory { message }) if message == "No posts to display"),
            "expected EmptyCategory, found: {result:?}"
        );
    }

    #[tokio::test]
    async fn error_body_excerpt_is_capped() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/latest-posts/3");
            then.status(500).body("x".repeat(64));
        });
        let mut config = GatewayConfig::new(server.url("/wp-json"));
        config.max_error_body_bytes = 16;
        let client = GatewayClient::new(config).unwrap();

        match client.latest_posts(3).await {
            Err(LatestPostsError::Gateway(GatewayError::Status { body, code, .. })) => {
                assert_eq!(body.len(), 16);
                assert_eq!(code, None);
            }
            other => panic!("expected Gateway status error, found: {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_not_found_is_a_gateway_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.path("/wp-json/twentytwentyfive-child/v1/latest-posts/9");
            then.status(404).json_body(json!({"code": "rest_no_route", "message": "No route"}));
        });

        let result = client_for(&server).latest_posts(9).await;
        assert!(
            matches!(result, Err(LatestPostsError::Gateway(GatewayError::Status { .. }))),
            "expected Gateway status error, found: {result:?}"
        );
    }
}
