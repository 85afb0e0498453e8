use serde::{Deserialize, Serialize};
use url::Url;

/// HTTP basic authentication credentials
///
/// Both fields are empty strings when no credentials are configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when neither a username nor a password is set
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

/// Transport settings handed to the HTTP client talking to Alertmanager
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpClientConfig {
    /// Credentials sent with every request
    #[serde(skip_serializing_if = "BasicAuth::is_empty")]
    pub basic_auth: BasicAuth,

    /// Bearer token sent when no basic auth is configured
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bearer_token: String,

    /// Proxy for all requests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<Url>,

    /// TLS settings, kept as written for the transport that applies them
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_config: Option<serde_yaml::Value>,
}
