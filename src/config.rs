use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::endpoints::{EndpointsConfig, FileSdConfig};
use crate::errors::ConfigError;
use crate::http::HttpClientConfig;

/// Request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ordered list of Alertmanager clusters to send alerts to
///
/// Order is preserved from the source document; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertingConfig {
    /// Alertmanager clusters in dispatch order
    #[serde(default, deserialize_with = "null_as_default")]
    pub alertmanagers: Vec<AlertmanagerConfig>,
}

/// Deserialize a missing-or-null value as `T::default()`
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl AlertingConfig {
    /// Parse an alerting configuration document
    ///
    /// See [`load_alerting_config`].
    pub fn load(document: &[u8]) -> Result<Self, ConfigError> {
        load_alerting_config(document)
    }
}

/// Client settings for one cluster of Alertmanager endpoints
///
/// In YAML the endpoint fields (`scheme`, `path_prefix`, `static_configs`,
/// `file_sd_configs`) sit inline next to `http_config` and `timeout`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertmanagerConfig {
    /// Transport settings for requests to these endpoints
    pub http_config: HttpClientConfig,

    /// Where the Alertmanager instances are found
    #[serde(flatten)]
    pub endpoints: EndpointsConfig,

    /// Per-request timeout
    #[serde(with = "crate::duration")]
    pub timeout: Duration,
}

impl Default for AlertmanagerConfig {
    fn default() -> Self {
        Self {
            http_config: HttpClientConfig::default(),
            endpoints: EndpointsConfig::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fields of one `alertmanagers` entry as written in the document
///
/// Every field is optional so absent keys can be told apart from present ones
/// when overlaying onto the defaults.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlertmanagerConfigOverlay {
    http_config: Option<HttpClientConfig>,
    scheme: Option<String>,
    path_prefix: Option<String>,
    static_configs: Option<Vec<String>>,
    file_sd_configs: Option<Vec<FileSdConfig>>,
    #[serde(default, deserialize_with = "crate::duration::option::deserialize")]
    timeout: Option<Duration>,
}

impl AlertmanagerConfig {
    /// Replace the fields present in `overlay`, keeping the rest
    fn overlay(mut self, overlay: AlertmanagerConfigOverlay) -> Self {
        if let Some(http_config) = overlay.http_config {
            self.http_config = http_config;
        }
        if let Some(scheme) = overlay.scheme {
            self.endpoints.scheme = scheme;
        }
        if let Some(path_prefix) = overlay.path_prefix {
            self.endpoints.path_prefix = path_prefix;
        }
        if let Some(static_addresses) = overlay.static_configs {
            self.endpoints.static_addresses = static_addresses;
        }
        if let Some(file_sd_configs) = overlay.file_sd_configs {
            self.endpoints.file_sd_configs = file_sd_configs;
        }
        if let Some(timeout) = overlay.timeout {
            self.timeout = timeout;
        }
        self
    }
}

impl<'de> Deserialize<'de> for AlertmanagerConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let overlay = AlertmanagerConfigOverlay::deserialize(deserializer)?;
        Ok(Self::default().overlay(overlay))
    }
}

/// Load a list of Alertmanager client configurations from a YAML document
///
/// Entries live under the top-level `alertmanagers` key. Each entry starts
/// from [`AlertmanagerConfig::default`] and only the keys written in the
/// document replace default values. Unknown keys anywhere in the document are
/// rejected. An empty document yields an empty configuration.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] if the document is not valid YAML or does
/// not match the expected structure.
pub fn load_alerting_config(document: &[u8]) -> Result<AlertingConfig, ConfigError> {
    if document.iter().all(u8::is_ascii_whitespace) {
        debug!("Empty alerting configuration document");
        return Ok(AlertingConfig::default());
    }

    let config: AlertingConfig = serde_yaml::from_slice(document)?;
    debug!(
        alertmanagers = config.alertmanagers.len(),
        "Loaded alerting configuration"
    );
    Ok(config)
}
