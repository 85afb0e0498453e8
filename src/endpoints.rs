use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::discovery::DiscoveryKind;

/// Default interval between re-reads of file-based discovery sources
pub const DEFAULT_FILE_SD_REFRESH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// File-based discovery source listing Alertmanager addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSdConfig {
    /// Paths or glob patterns of the files to read
    #[serde(deserialize_with = "crate::config::null_as_default")]
    pub files: Vec<String>,

    /// How often the files are re-read
    #[serde(default = "default_refresh_interval", with = "crate::duration")]
    pub refresh_interval: Duration,
}

fn default_refresh_interval() -> Duration {
    DEFAULT_FILE_SD_REFRESH_INTERVAL
}

/// Where a set of Alertmanager instances can be reached
///
/// `scheme` is always a plain transport scheme (`http`, `https`). Discovery
/// prefixes, when present, are carried by the entries of `static_addresses`
/// (e.g. `dns+alertmanager:9093`) and must be expanded by a resolver before
/// those entries can be dialed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointsConfig {
    /// Transport scheme, `http` unless configured
    pub scheme: String,
    /// Path under which the Alertmanager API is served
    pub path_prefix: String,
    /// `host:port` addresses, optionally discovery-annotated
    #[serde(rename = "static_configs")]
    pub static_addresses: Vec<String>,
    /// File-based discovery sources
    pub file_sd_configs: Vec<FileSdConfig>,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            path_prefix: String::new(),
            static_addresses: Vec::new(),
            file_sd_configs: Vec::new(),
        }
    }
}

impl EndpointsConfig {
    /// Static addresses that still need a discovery lookup
    pub fn discovery_addresses(&self) -> impl Iterator<Item = (DiscoveryKind, &str)> + '_ {
        self.static_addresses
            .iter()
            .filter_map(|address| DiscoveryKind::split_address(address))
    }

    /// Base URLs of every static address usable without discovery, in order
    pub fn static_urls(&self) -> Result<Vec<Url>, url::ParseError> {
        self.static_addresses
            .iter()
            .filter(|address| DiscoveryKind::split_address(address).is_none())
            .map(|address| self.url_for(address))
            .collect()
    }

    /// Base URL of a concrete `host[:port]` under this scheme and path prefix
    pub fn url_for(&self, address: &str) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&format!("{}://{}", self.scheme, address))?;
        if url.host_str().map_or(true, str::is_empty) {
            return Err(url::ParseError::EmptyHost);
        }
        let prefix = self.path_prefix.trim_matches('/');
        if prefix.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&format!("/{prefix}/"));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(scheme: &str, path_prefix: &str, addresses: &[&str]) -> EndpointsConfig {
        EndpointsConfig {
            scheme: scheme.to_string(),
            path_prefix: path_prefix.to_string(),
            static_addresses: addresses.iter().map(|a| a.to_string()).collect(),
            file_sd_configs: Vec::new(),
        }
    }

    #[test]
    fn test_static_urls_skip_discovery_addresses() {
        let cfg = endpoints(
            "http",
            "",
            &["am-1:9093", "dns+am.internal:9093", "am-2:9093"],
        );

        let urls = cfg.static_urls().unwrap();
        let urls: Vec<&str> = urls.iter().map(Url::as_str).collect();
        assert_eq!(urls, vec!["http://am-1:9093/", "http://am-2:9093/"]);
    }

    #[test]
    fn test_discovery_addresses() {
        let cfg = endpoints("http", "", &["am-1:9093", "dnssrv+_am._tcp.internal"]);

        let found: Vec<_> = cfg.discovery_addresses().collect();
        assert_eq!(found, vec![(DiscoveryKind::Srv, "_am._tcp.internal")]);
    }

    #[test]
    fn test_url_for_path_prefix() {
        let cfg = endpoints("https", "/alertmanager", &[]);
        assert_eq!(
            cfg.url_for("am:9095").unwrap().as_str(),
            "https://am:9095/alertmanager/"
        );

        let cfg = endpoints("https", "am/", &[]);
        assert_eq!(cfg.url_for("am").unwrap().as_str(), "https://am/am/");
    }

    #[test]
    fn test_url_for_empty_address() {
        let cfg = endpoints("http", "", &[]);
        assert!(cfg.url_for("").is_err());
    }

    #[test]
    fn test_file_sd_config_defaults() {
        let cfg: FileSdConfig = serde_yaml::from_str("files: [targets/*.yml]").unwrap();
        assert_eq!(cfg.files, vec!["targets/*.yml".to_string()]);
        assert_eq!(cfg.refresh_interval, DEFAULT_FILE_SD_REFRESH_INTERVAL);
    }

    #[test]
    fn test_file_sd_config_null_files() {
        let cfg: FileSdConfig = serde_yaml::from_str("files: ~").unwrap();
        assert!(cfg.files.is_empty());
    }

    #[test]
    fn test_file_sd_config_strict() {
        let yaml = "files: [a.yml]\nrefresh: 1m";
        assert!(serde_yaml::from_str::<FileSdConfig>(yaml).is_err());
    }
}
