use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub upstream: UpstreamConfig,
}

/// Identity provider settings. The credentials stay optional here so the
/// server can start without them; every flag request then fails until the
/// environment is fixed.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub issuer_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenv().is_ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = match non_empty_var("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                expected: "a valid u16 number",
                value: raw,
            })?,
            None => 3000,
        };

        let timeout_secs = match non_empty_var("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "UPSTREAM_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: raw,
                    })
                }
            },
            None => 5,
        };

        let upstream = UpstreamConfig {
            issuer_url: non_empty_var("ISSUER_URL"),
            client_id: non_empty_var("M2M_CLIENT_ID"),
            client_secret: non_empty_var("M2M_CLIENT_SECRET"),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            host,
            port,
            upstream,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl UpstreamConfig {
    /// Names of the required variables that are missing or blank.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("ISSUER_URL", &self.issuer_url),
            ("M2M_CLIENT_ID", &self.client_id),
            ("M2M_CLIENT_SECRET", &self.client_secret),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
