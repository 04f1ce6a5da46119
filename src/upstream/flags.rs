use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::{fetch_token, upstream_message, Credentials, UpstreamError};
use crate::config::UpstreamConfig;
use crate::overrides::{FlagMap, FlagValue};

/// Which flag set to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagScope<'a> {
    Environment,
    Organization(&'a str),
}

impl FlagScope<'_> {
    fn path_segments(&self) -> Vec<&str> {
        match *self {
            FlagScope::Environment => vec!["api", "v1", "environment", "feature_flags"],
            FlagScope::Organization(org_id) => {
                vec!["api", "v1", "organizations", org_id, "feature_flags"]
            }
        }
    }
}

impl fmt::Display for FlagScope<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagScope::Environment => f.write_str("Environment flags"),
            FlagScope::Organization(_) => f.write_str("Organization flags"),
        }
    }
}

#[derive(Deserialize)]
struct FeatureFlagsResponse {
    #[serde(default)]
    feature_flags: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct FeatureFlagEntry {
    value: FlagValue,
}

/// Fetch one scope's flags as a flat code -> value map.
///
/// Acquires its own bearer token first. A body without `feature_flags` is an
/// empty map.
pub async fn fetch_flags(
    client: &reqwest::Client,
    config: &UpstreamConfig,
    scope: FlagScope<'_>,
) -> Result<FlagMap, UpstreamError> {
    let credentials = Credentials::from_config(config)?;
    let token = fetch_token(client, config).await?;
    let url = credentials.endpoint(&scope.path_segments())?;

    debug!(%url, "fetching {scope}");

    let response = client
        .get(url)
        .bearer_auth(&token)
        .timeout(config.timeout)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    let json = serde_json::from_str::<serde_json::Value>(&body);

    if !status.is_success() {
        warn!(%status, "{scope} request rejected");
        let message = json
            .ok()
            .and_then(|json| upstream_message(&json))
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(UpstreamError::Api(message));
    }

    let json = json.map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;
    let parsed = FeatureFlagsResponse::deserialize(&json)
        .map_err(|e| UpstreamError::InvalidBody(e.to_string()))?;

    if parsed.error.as_ref().is_some_and(is_truthy) {
        let message = upstream_message(&json).unwrap_or_else(|| format!("HTTP {status}"));
        return Err(UpstreamError::Api(message));
    }

    parsed
        .feature_flags
        .unwrap_or_default()
        .into_iter()
        .map(|(code, entry)| match serde_json::from_value::<FeatureFlagEntry>(entry) {
            Ok(entry) => Ok((code, entry.value)),
            Err(e) => Err(UpstreamError::MalformedFlag {
                code,
                reason: e.to_string(),
            }),
        })
        .collect()
}

/// `null`, `false`, `0` and `""` do not signal an error.
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}
