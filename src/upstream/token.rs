use serde::Deserialize;
use tracing::{debug, warn};

use super::{upstream_message, Credentials, UpstreamError};
use crate::config::UpstreamConfig;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// Exchange the M2M client credentials for a bearer token.
///
/// One POST to `{issuer}/oauth2/token`, no retry. Missing credentials fail
/// before any request is made.
pub async fn fetch_token(
    client: &reqwest::Client,
    config: &UpstreamConfig,
) -> Result<String, UpstreamError> {
    let credentials = Credentials::from_config(config)?;
    let url = credentials.endpoint(&["oauth2", "token"])?;
    let audience = credentials.audience();

    let form = [
        ("client_id", credentials.client_id),
        ("client_secret", credentials.client_secret),
        ("grant_type", "client_credentials"),
        ("audience", audience.as_str()),
    ];

    debug!(%url, "requesting M2M token");

    let response = client
        .post(url)
        .timeout(config.timeout)
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        // OAuth errors carry `error_description` next to the `error` code
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| {
                json.get("error_description")
                    .and_then(|d| d.as_str())
                    .filter(|d| !d.is_empty())
                    .map(String::from)
                    .or_else(|| upstream_message(&json))
            })
            .unwrap_or_else(|| format!("HTTP {status}"));

        warn!(%status, "token request rejected");
        return Err(UpstreamError::Auth(message));
    }

    let token = serde_json::from_str::<TokenResponse>(&body)
        .map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

    token
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(UpstreamError::MissingToken)
}
