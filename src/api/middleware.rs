//! Bearer-token authentication for the message endpoint.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::config::Config;

#[derive(Clone, Debug, Default)]
pub struct SecurityConfig {
    /// Required bearer token. `None` disables authentication.
    pub api_key: Option<String>,
}

impl SecurityConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.api_key.clone(),
        }
    }

    /// Create a config with no authentication (for local development/testing).
    pub fn disabled() -> Self {
        Self { api_key: None }
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self {
            api_key: Some(key.into()),
        }
    }
}

/// Authentication middleware that checks for valid API key.
pub async fn auth_middleware(
    State(config): State<SecurityConfig>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let expected_key = match &config.api_key {
        Some(key) => key,
        None => return Ok(next.run(request).await),
    };

    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok());

    match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == expected_key => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid API key provided");
            Err(StatusCode::UNAUTHORIZED)
        }
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_config_disabled_has_no_auth() {
        assert!(SecurityConfig::disabled().api_key.is_none());
    }

    #[test]
    fn security_config_follows_app_config() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        assert_eq!(
            SecurityConfig::from_config(&config).api_key,
            Some("test-key".to_string())
        );
    }
}
