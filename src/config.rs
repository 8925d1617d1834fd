use crate::constants::{DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TINIFY_ENDPOINT, TINIFY_SHRINK_PATH};
use crate::error::{CompressionError, Result};
use std::time::Duration;

/// Settings for talking to the TinyPNG service, resolved once at startup.
#[derive(Clone)]
pub struct TinifyConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for TinifyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TinifyConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TinifyConfig {
    pub fn new(
        api_key: Option<String>,
        endpoint: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(CompressionError::MissingApiKey)?;

        let endpoint = endpoint.unwrap_or_else(|| DEFAULT_TINIFY_ENDPOINT.to_string());
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(CompressionError::InvalidEndpoint(endpoint));
        }

        let timeout = Duration::from_secs(
            timeout_secs
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        Ok(Self {
            api_key,
            endpoint,
            timeout,
        })
    }

    pub fn shrink_url(&self) -> String {
        format!("{}{}", self.endpoint, TINIFY_SHRINK_PATH)
    }

    /// Endpoints on this machine bypass any configured HTTP proxy.
    pub fn is_loopback(&self) -> bool {
        let host = self
            .endpoint
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(&self.endpoint);
        let host = host.split(['/', '?']).next().unwrap_or(host);
        let host = match host.rsplit_once(':') {
            Some((name, port)) if !port.contains(']') => name,
            _ => host,
        };
        matches!(host, "localhost" | "127.0.0.1" | "[::1]")
    }

    /// Turn a `Location` value into an absolute URL. The service normally
    /// answers with an absolute one; relative values hang off the endpoint.
    pub fn resolve_location(&self, location: &str) -> String {
        if location.starts_with('/') {
            format!("{}{}", self.endpoint, location)
        } else {
            location.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = TinifyConfig::new(Some("secret".to_string()), None, None).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.endpoint, "https://api.tinify.com");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.shrink_url(), "https://api.tinify.com/shrink");
    }

    #[test]
    fn test_config_missing_key() {
        let result = TinifyConfig::new(None, None, None);
        assert!(matches!(result, Err(CompressionError::MissingApiKey)));

        let result = TinifyConfig::new(Some("   ".to_string()), None, None);
        assert!(matches!(result, Err(CompressionError::MissingApiKey)));
    }

    #[test]
    fn test_config_custom_endpoint_trailing_slash() {
        let config = TinifyConfig::new(
            Some("secret".to_string()),
            Some("http://127.0.0.1:8080/".to_string()),
            Some(5),
        )
        .unwrap();
        assert_eq!(config.shrink_url(), "http://127.0.0.1:8080/shrink");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_config_invalid_endpoint() {
        let result = TinifyConfig::new(
            Some("secret".to_string()),
            Some("api.tinify.com".to_string()),
            None,
        );
        assert!(matches!(result, Err(CompressionError::InvalidEndpoint(_))));
    }

    #[test]
    fn test_config_zero_timeout_falls_back_to_default() {
        let config = TinifyConfig::new(Some("secret".to_string()), None, Some(0)).unwrap();
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_resolve_location() {
        let config = TinifyConfig::new(Some("secret".to_string()), None, None).unwrap();
        assert_eq!(
            config.resolve_location("/output/abc"),
            "https://api.tinify.com/output/abc"
        );
        assert_eq!(
            config.resolve_location("https://api.tinify.com/output/abc"),
            "https://api.tinify.com/output/abc"
        );
    }

    #[test]
    fn test_is_loopback() {
        let local = |endpoint: &str| {
            TinifyConfig::new(Some("k".to_string()), Some(endpoint.to_string()), None)
                .unwrap()
                .is_loopback()
        };
        assert!(local("http://127.0.0.1:8080"));
        assert!(local("http://localhost"));
        assert!(local("http://[::1]:9000/"));
        assert!(!local("https://api.tinify.com"));
        assert!(!local("http://localhost.example.com"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = TinifyConfig::new(Some("secret".to_string()), None, None).unwrap();
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
