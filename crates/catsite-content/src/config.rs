use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_REST_NAMESPACE: &str = "wp/v2";
pub const DEFAULT_CHILD_NAMESPACE: &str = "twentytwentyfive-child/v1";
/// WordPress caps `per_page` at 100.
pub const MAX_PER_PAGE: u32 = 100;

/// Where the content gateway lives and how to talk to it.
///
/// Every URL the adapter requests is derived from `api_base` and the two
/// namespaces, so tests can point the whole adapter at a mock server.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// The `wp-json` root, e.g. "https://example.org/wp-json". No trailing slash.
    pub api_base: String,
    /// Namespace of the core collection routes (`catid`, `catfood`, `cattoy`).
    pub rest_namespace: String,
    /// Namespace of the child theme's custom routes (`cat-images`, `latest-posts`).
    pub child_namespace: String,
    /// Page size sent as `per_page`, 1..=100.
    pub per_page: u32,
    pub timeout: Duration,
    pub max_error_body_bytes: usize,
    /// Revalidation interval reported with page props, in seconds.
    pub revalidate_secs: u64,
}

impl GatewayConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base: String = api_base.into();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            rest_namespace: DEFAULT_REST_NAMESPACE.to_string(),
            child_namespace: DEFAULT_CHILD_NAMESPACE.to_string(),
            per_page: MAX_PER_PAGE,
            timeout: Duration::from_secs(30),
            max_error_body_bytes: 8 * 1024,
            revalidate_secs: 60,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `CATSITE_API_BASE`: the gateway's `wp-json` root URL
    ///
    /// Optional:
    /// - `CATSITE_REST_NAMESPACE` (default: "wp/v2")
    /// - `CATSITE_CHILD_NAMESPACE` (default: "twentytwentyfive-child/v1")
    /// - `CATSITE_PER_PAGE` (default: 100, max: 100)
    /// - `CATSITE_TIMEOUT_SECS` (default: 30)
    /// - `CATSITE_MAX_ERROR_BODY_BYTES` (default: 8192)
    /// - `CATSITE_REVALIDATE_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("CATSITE_API_BASE")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("CATSITE_API_BASE"))?;
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "CATSITE_API_BASE",
                message: format!("expected an http(s) URL, got {api_base:?}"),
            });
        }

        let mut config = Self::new(api_base.trim());

        if let Some(ns) = lookup("CATSITE_REST_NAMESPACE") {
            config.rest_namespace = ns.trim_matches('/').to_string();
        }
        if let Some(ns) = lookup("CATSITE_CHILD_NAMESPACE") {
            config.child_namespace = ns.trim_matches('/').to_string();
        }

        config.per_page = parse_var(&lookup, "CATSITE_PER_PAGE", config.per_page)?;
        if config.per_page == 0 || config.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid {
                name: "CATSITE_PER_PAGE",
                message: format!("must be between 1 and {MAX_PER_PAGE}, got {}", config.per_page),
            });
        }

        let timeout_secs = parse_var(&lookup, "CATSITE_TIMEOUT_SECS", config.timeout.as_secs())?;
        config.timeout = Duration::from_secs(timeout_secs);
        config.max_error_body_bytes = parse_var(
            &lookup,
            "CATSITE_MAX_ERROR_BODY_BYTES",
            config.max_error_body_bytes,
        )?;
        config.revalidate_secs =
            parse_var(&lookup, "CATSITE_REVALIDATE_SECS", config.revalidate_secs)?;

        Ok(config)
    }

    /// URL of a core collection route, e.g. `{base}/wp/v2/catfood?per_page=100`.
    pub fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/{}/{}?per_page={}",
            self.api_base, self.rest_namespace, collection, self.per_page
        )
    }

    pub fn images_url(&self) -> String {
        format!("{}/{}/cat-images", self.api_base, self.child_namespace)
    }

    pub fn latest_posts_url(&self, category_id: u64) -> String {
        format!(
            "{}/{}/latest-posts/{}",
            self.api_base, self.child_namespace, category_id
        )
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            message: format!("{raw:?}: {e}"),
        }),
    }
}
