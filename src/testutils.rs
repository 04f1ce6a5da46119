use axum::response::Response;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::config::UpstreamConfig;

pub const TOKEN: &str = "test-token";

pub fn test_config(issuer_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        issuer_url: Some(issuer_url.to_string()),
        client_id: Some("test-client".to_string()),
        client_secret: Some("test-secret".to_string()),
        timeout: Duration::from_secs(5),
    }
}

/// Answer every token request on `server` with [`TOKEN`].
pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": TOKEN,
            "token_type": "bearer",
            "expires_in": 86399
        })))
        .mount(server)
        .await;
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
