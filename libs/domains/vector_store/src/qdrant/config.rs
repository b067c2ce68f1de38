use core_config::{ConfigError, FromEnv, env_optional, env_or_default, env_parse_or};

/// Qdrant connection configuration
#[derive(Debug, Clone)]
pub struct QdrantConfig {
    /// `http` or `https`
    pub scheme: String,
    /// `host:port` of the gRPC endpoint
    pub host: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl QdrantConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn url(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }
}

impl FromEnv for QdrantConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let scheme = env_or_default("QDRANT_SCHEME", "http").to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(ConfigError::ParseError {
                key: "QDRANT_SCHEME".to_string(),
                details: format!("expected http or https, got '{}'", scheme),
            });
        }

        Ok(Self {
            scheme,
            host: env_or_default("QDRANT_HOST", "localhost:6334"),
            api_key: env_optional("QDRANT_API_KEY"),
            timeout_secs: env_parse_or("QDRANT_TIMEOUT_SECS", 30)?,
        })
    }
}

impl Default for QdrantConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost:6334".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_env_defaults() {
        temp_env::with_vars_unset(
            [
                "QDRANT_SCHEME",
                "QDRANT_HOST",
                "QDRANT_API_KEY",
                "QDRANT_TIMEOUT_SECS",
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url(), "http://localhost:6334");
                assert_eq!(config.api_key, None);
                assert_eq!(config.timeout_secs, 30);
            },
        );
    }

    #[test]
    fn test_from_env_overrides() {
        temp_env::with_vars(
            [
                ("QDRANT_SCHEME", Some("HTTPS")),
                ("QDRANT_HOST", Some("qdrant.internal:6334")),
                ("QDRANT_API_KEY", Some("secret")),
                ("QDRANT_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = QdrantConfig::from_env().unwrap();
                assert_eq!(config.url(), "https://qdrant.internal:6334");
                assert_eq!(config.api_key.as_deref(), Some("secret"));
                assert_eq!(config.timeout_secs, 5);
            },
        );
    }

    #[test]
    fn test_empty_api_key_is_unset() {
        temp_env::with_var("QDRANT_API_KEY", Some(""), || {
            assert_eq!(QdrantConfig::from_env().unwrap().api_key, None);
        });
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        temp_env::with_var("QDRANT_SCHEME", Some("ftp"), || {
            assert!(QdrantConfig::from_env().is_err());
        });
        temp_env::with_vars(
            [("QDRANT_SCHEME", None), ("QDRANT_TIMEOUT_SECS", Some("soon"))],
            || assert!(QdrantConfig::from_env().is_err()),
        );
    }
}
