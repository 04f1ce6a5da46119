use std::sync::Arc;

use crate::config::UpstreamConfig;

#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub upstream: Arc<UpstreamConfig>,
}

impl AppState {
    pub fn new(upstream: UpstreamConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            upstream: Arc::new(upstream),
        }
    }
}
