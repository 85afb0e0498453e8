use std::error::Error as StdError;
use thiserror::Error;

/// Result type alias for Alertmanager client operations
pub type Result<T> = std::result::Result<T, AlertmanagerError>;

/// Errors produced while building receiver configuration
///
/// These are the only two failure modes of configuration building. Missing
/// credentials, missing ports and unrecognized discovery prefixes are resolved
/// by defaults and never surface here.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document is malformed or contains unknown fields
    #[error("Failed to parse alerting configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The address is not a valid URL
    ///
    /// The address itself is not echoed since it may carry credentials.
    #[error("Invalid Alertmanager address: {0}")]
    Address(#[from] url::ParseError),
}

/// Errors that can occur when pushing alerts to Alertmanager
#[derive(Debug, Error)]
pub enum AlertmanagerError {
    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// An endpoint URL could not be built from the configuration
    #[error("Invalid Alertmanager endpoint: {0}")]
    Endpoint(#[source] url::ParseError),

    /// The configuration yields no endpoint the client can reach directly
    #[error("No Alertmanager endpoints configured")]
    NoEndpoints,

    /// Alertmanager API returned an error response
    #[error("Alertmanager API error: HTTP {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from Alertmanager
        message: String,
    },
}

impl AlertmanagerError {
    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Server errors (5xx status codes)
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(source) => {
                if let Some(reqwest_err) = StdError::source(source) {
                    if let Some(err) = reqwest_err.downcast_ref::<reqwest::Error>() {
                        return err.is_connect() || err.is_timeout();
                    }
                }
                false
            }
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_retryable_5xx() {
        for status in [500, 502, 503] {
            let error = AlertmanagerError::Api {
                status,
                message: "server error".to_string(),
            };
            assert!(error.is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn test_api_error_not_retryable_4xx() {
        for status in [400, 401, 404] {
            let error = AlertmanagerError::Api {
                status,
                message: "client error".to_string(),
            };
            assert!(!error.is_retryable(), "{status} should not be retryable");
        }
    }

    #[test]
    fn test_configuration_errors_not_retryable() {
        assert!(!AlertmanagerError::NoEndpoints.is_retryable());
        assert!(!AlertmanagerError::Endpoint(url::ParseError::EmptyHost).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let error = AlertmanagerError::Api {
            status: 500,
            message: "Internal server error".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Alertmanager API error: HTTP 500 - Internal server error"
        );
    }

    #[test]
    fn test_config_error_from_url() {
        let err: ConfigError = url::Url::parse("://bad").unwrap_err().into();
        assert!(matches!(err, ConfigError::Address(_)));
        assert!(err.to_string().starts_with("Invalid Alertmanager address"));
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<u32>("[").unwrap_err();
        let err = ConfigError::from(yaml_err);
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
