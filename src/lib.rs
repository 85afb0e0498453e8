//! # Alert Manager Config
//!
//! Typed client configuration for [Prometheus Alertmanager](https://prometheus.io/docs/alerting/latest/alertmanager/)
//! receivers, built either from a YAML document or from a single address.
//!
//! ## Features
//!
//! - Strict YAML loading: every entry starts from defaults, only written keys override them
//! - Address normalization with DNS discovery prefixes (`dns+`, `dnssrv+`, `dnssrvnoa+`)
//! - Basic auth credentials taken from URL user-info
//! - A small push client built from the resulting configuration
//!
//! ## Example
//!
//! ```rust
//! use alert_manager_config::{build_from_address, load_alerting_config};
//! use std::time::Duration;
//!
//! let yaml = br#"
//! alertmanagers:
//!   - static_configs: ["alertmanager:9093"]
//!     timeout: 30s
//! "#;
//! let alerting = load_alerting_config(yaml).unwrap();
//! assert_eq!(alerting.alertmanagers[0].endpoints.scheme, "http");
//! assert_eq!(alerting.alertmanagers[0].timeout, Duration::from_secs(30));
//!
//! let address = "dnssrv+https://admin:pw@_web._tcp.am.svc";
//! let am = build_from_address(address, Duration::from_secs(10)).unwrap();
//! assert_eq!(am.endpoints.scheme, "https");
//! assert_eq!(am.endpoints.static_addresses, vec!["dnssrv+_web._tcp.am.svc"]);
//! assert_eq!(am.http_config.basic_auth.username, "admin");
//! ```

mod address;
mod client;
mod config;
mod discovery;
mod duration;
mod endpoints;
mod errors;
mod http;

pub use address::{build_from_address, DEFAULT_ALERTMANAGER_PORT};
pub use client::AlertmanagerClient;
pub use config::{load_alerting_config, AlertingConfig, AlertmanagerConfig, DEFAULT_TIMEOUT};
pub use discovery::DiscoveryKind;
pub use endpoints::{EndpointsConfig, FileSdConfig, DEFAULT_FILE_SD_REFRESH_INTERVAL};
pub use errors::{AlertmanagerError, ConfigError, Result};
pub use http::{BasicAuth, HttpClientConfig};
