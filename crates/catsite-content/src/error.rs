/// Error types for the content gateway client.
///
/// Collection fetches never surface these to page builders: they are caught at the
/// fetch boundary and turned into an empty collection (see [`crate::gateway::Fetched`]).
/// Only configuration loading and the category endpoint return them to callers.
use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid response JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// `code` and `message` come from a `WP_Error` body when there is one;
    /// `body` is a capped excerpt of the raw response.
    #[error("gateway returned error: status={status} body={body}")]
    Status {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
        body: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Failures of the category endpoint, the one place where "no data" is an error.
#[derive(Debug, thiserror::Error)]
pub enum LatestPostsError {
    #[error("no posts in category: {message}")]
    EmptyCategory { message: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
