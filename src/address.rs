//! Building a client configuration from a single Alertmanager address.
//!
//! Accepted form:
//!
//! ```text
//! [<discovery>+]<scheme>://[<user>[:<password>]@]<host>[:<port>][/<path>]
//! ```
//!
//! where `<discovery>` is one of `dns`, `dnssrv` or `dnssrvnoa`.

use std::borrow::Cow;
use std::time::Duration;

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use crate::config::AlertmanagerConfig;
use crate::discovery::DiscoveryKind;
use crate::endpoints::EndpointsConfig;
use crate::errors::ConfigError;
use crate::http::{BasicAuth, HttpClientConfig};

/// Port appended to `dns+` hosts that do not specify one
pub const DEFAULT_ALERTMANAGER_PORT: u16 = 9093;

impl AlertmanagerConfig {
    /// Build a configuration from an address such as `dns+https://am:9093/prefix`
    ///
    /// See [`build_from_address`].
    pub fn from_address(address: &str, timeout: Duration) -> Result<Self, ConfigError> {
        build_from_address(address, timeout)
    }
}

/// Build an Alertmanager client configuration from a single address
///
/// A leading discovery prefix (`dns+`, `dnssrv+`, `dnssrvnoa+`) is moved from
/// the scheme onto the static address so the resolver can expand it later.
/// `dns+` hosts without a port get [`DEFAULT_ALERTMANAGER_PORT`]; SRV lookups
/// carry their own port and are left alone. Schemes with any other prefix are
/// kept verbatim.
///
/// User-info becomes basic auth credentials. A missing or undecodable password
/// is treated as empty.
///
/// # Errors
///
/// Returns [`ConfigError::Address`] if `address` is not a URL with a host.
///
/// # Example
///
/// ```rust
/// use alert_manager_config::build_from_address;
/// use std::time::Duration;
///
/// let cfg = build_from_address("dns+http://example.com/api", Duration::from_secs(5)).unwrap();
/// assert_eq!(cfg.endpoints.scheme, "http");
/// assert_eq!(cfg.endpoints.static_addresses, vec!["dns+example.com:9093"]);
/// assert_eq!(cfg.endpoints.path_prefix, "/api");
/// ```
pub fn build_from_address(
    address: &str,
    timeout: Duration,
) -> Result<AlertmanagerConfig, ConfigError> {
    let parsed = Url::parse(address)?;

    let host = match parsed.host_str() {
        Some(host) if !host.is_empty() => host,
        _ => return Err(ConfigError::Address(url::ParseError::EmptyHost)),
    };
    let port = parsed
        .port()
        .or_else(|| explicit_port(address).and(parsed.port_or_known_default()));
    let host = match port {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    let (scheme, static_address) = match DiscoveryKind::strip_scheme(parsed.scheme()) {
        Some((kind, scheme)) => {
            let mut static_address = format!("{}{}", kind.prefix(), host);
            if kind.adds_default_port() && port.is_none() {
                static_address.push_str(&format!(":{DEFAULT_ALERTMANAGER_PORT}"));
            }
            (scheme.to_string(), static_address)
        }
        None => (parsed.scheme().to_string(), host),
    };

    debug!(
        scheme = %scheme,
        address = %static_address,
        "Built Alertmanager config from address"
    );

    Ok(AlertmanagerConfig {
        http_config: HttpClientConfig {
            basic_auth: basic_auth(&parsed),
            ..Default::default()
        },
        endpoints: EndpointsConfig {
            scheme,
            path_prefix: path_prefix(&parsed),
            static_addresses: vec![static_address],
            file_sd_configs: Vec::new(),
        },
        timeout,
    })
}

fn basic_auth(url: &Url) -> BasicAuth {
    let username = url.username();
    let password = url.password();
    if username.is_empty() && password.is_none() {
        return BasicAuth::default();
    }

    BasicAuth {
        username: percent_decode(username).unwrap_or_else(|| username.to_string()),
        password: password.and_then(percent_decode).unwrap_or_default(),
    }
}

fn path_prefix(url: &Url) -> String {
    match url.path() {
        "/" => String::new(),
        path => percent_decode(path).unwrap_or_else(|| path.to_string()),
    }
}

/// Port digits written in the authority of `address`
///
/// `Url::port` hides a port equal to the scheme default, so the input text is
/// checked instead.
fn explicit_port(address: &str) -> Option<&str> {
    let (_, rest) = address.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);
    let (_, port) = host_port.rsplit_once(':')?;
    (!port.is_empty() && port.bytes().all(|b| b.is_ascii_digit())).then_some(port)
}

/// Decode `%XX` escapes; `None` on a broken escape or non-UTF-8 result
fn percent_decode(input: &str) -> Option<String> {
    // percent_decode_str passes broken escapes through unchanged
    let well_formed = input.split('%').skip(1).all(|escape| {
        escape.len() >= 2 && escape.as_bytes()[..2].iter().all(u8::is_ascii_hexdigit)
    });
    if !well_formed {
        return None;
    }
    percent_decode_str(input)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}
