//! Client side of the identity provider: client-credentials token exchange
//! and the environment / organization feature flag endpoints.

mod error;
mod flags;
mod token;

pub use error::UpstreamError;
pub use flags::{fetch_flags, FlagScope};
pub use token::fetch_token;

use reqwest::Url;

use crate::config::UpstreamConfig;

/// Credentials borrowed from an [`UpstreamConfig`] once all of them are known
/// to be present.
#[derive(Debug, Clone, Copy)]
struct Credentials<'a> {
    issuer_url: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
}

impl<'a> Credentials<'a> {
    fn from_config(config: &'a UpstreamConfig) -> Result<Self, UpstreamError> {
        match (
            config.issuer_url.as_deref(),
            config.client_id.as_deref(),
            config.client_secret.as_deref(),
        ) {
            (Some(issuer_url), Some(client_id), Some(client_secret))
                if config.missing().is_empty() =>
            {
                Ok(Credentials {
                    issuer_url: issuer_url.trim_end_matches('/'),
                    client_id,
                    client_secret,
                })
            }
            _ => Err(UpstreamError::Configuration(config.missing())),
        }
    }

    fn audience(&self) -> String {
        format!("{}/api", self.issuer_url)
    }

    /// Append path segments to the issuer URL. Each segment is percent-encoded
    /// on its own, so an organization id can never add path components.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, UpstreamError> {
        let mut url =
            Url::parse(self.issuer_url).map_err(|e| UpstreamError::InvalidUrl(e.to_string()))?;

        url.path_segments_mut()
            .map_err(|_| UpstreamError::InvalidUrl(format!("{} cannot be a base", self.issuer_url)))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }
}

/// Best-effort error message from an upstream JSON body: `error` as a string
/// or as an object carrying `message`, then a top level `message`.
fn upstream_message(body: &serde_json::Value) -> Option<String> {
    let from_error = match body.get("error") {
        Some(serde_json::Value::String(message)) => Some(message.clone()),
        Some(serde_json::Value::Object(error)) => error
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from),
        _ => None,
    };

    from_error
        .or_else(|| body.get("message").and_then(|m| m.as_str()).map(String::from))
        .filter(|m| !m.is_empty())
}
