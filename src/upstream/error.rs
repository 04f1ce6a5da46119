use thiserror::Error;

/// Failures at the identity provider boundary. Every token and flag call
/// returns one of these instead of panicking or bubbling a raw client error.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Configuration(Vec<&'static str>),

    #[error("Token request failed: {0}")]
    Auth(String),

    #[error("no token in response")]
    MissingToken,

    #[error("{0}")]
    Api(String),

    #[error("Malformed feature flag '{code}': {reason}")]
    MalformedFlag { code: String, reason: String },

    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Errors caused by local settings rather than by the identity provider.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            UpstreamError::Configuration(_) | UpstreamError::InvalidUrl(_)
        )
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}
