use core_config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Qdrant error: {0}")]
    Qdrant(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type VectorStoreResult<T> = Result<T, VectorStoreError>;

impl VectorStoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        VectorStoreError::Validation(msg.into())
    }
}

impl From<qdrant_client::QdrantError> for VectorStoreError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        VectorStoreError::Qdrant(err.to_string())
    }
}

impl From<reqwest::Error> for VectorStoreError {
    fn from(err: reqwest::Error) -> Self {
        VectorStoreError::Embedding(err.to_string())
    }
}

impl From<serde_json::Error> for VectorStoreError {
    fn from(err: serde_json::Error) -> Self {
        VectorStoreError::Internal(format!("JSON error: {}", err))
    }
}

impl From<ConfigError> for VectorStoreError {
    fn from(err: ConfigError) -> Self {
        VectorStoreError::Config(err.to_string())
    }
}

impl From<VectorStoreError> for tonic::Status {
    fn from(err: VectorStoreError) -> Self {
        match err {
            VectorStoreError::Validation(msg) => tonic::Status::invalid_argument(msg),
            VectorStoreError::Qdrant(msg) => {
                tonic::Status::internal(format!("Qdrant error: {}", msg))
            }
            VectorStoreError::Embedding(msg) => {
                tonic::Status::internal(format!("Embedding error: {}", msg))
            }
            VectorStoreError::Config(msg) => {
                tonic::Status::failed_precondition(format!("Config error: {}", msg))
            }
            VectorStoreError::Internal(msg) => tonic::Status::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tonic::Code;

    #[test]
    fn test_status_codes() {
        let cases = [
            (VectorStoreError::validation("k must be positive"), Code::InvalidArgument),
            (VectorStoreError::Qdrant("unreachable".into()), Code::Internal),
            (VectorStoreError::Embedding("rate limited".into()), Code::Internal),
            (VectorStoreError::Config("OPENAI_API_KEY".into()), Code::FailedPrecondition),
            (VectorStoreError::Internal("boom".into()), Code::Internal),
        ];

        for (err, code) in cases {
            assert_eq!(tonic::Status::from(err).code(), code);
        }
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let status = tonic::Status::from(VectorStoreError::validation("index_name is required"));
        assert_eq!(status.message(), "index_name is required");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: VectorStoreError = ConfigError::MissingEnvVar("OPENAI_API_KEY".into()).into();
        assert!(matches!(err, VectorStoreError::Config(msg) if msg.contains("OPENAI_API_KEY")));
    }
}
