//! Service-discovery prefixes carried in Alertmanager addresses.
//!
//! An address such as `dns+http://alertmanager:9093` asks for the host to be
//! resolved through DNS before use. The prefix selects the query type; the
//! resolver itself lives outside this crate.

use std::fmt::{Display, Formatter};

/// DNS query strategy selected by an address prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryKind {
    /// A/AAAA record lookup (`dns+`)
    A,
    /// SRV lookup followed by A/AAAA resolution of the targets (`dnssrv+`)
    Srv,
    /// SRV lookup without resolving the targets (`dnssrvnoa+`)
    SrvNoA,
}

impl DiscoveryKind {
    /// All kinds in matching precedence order
    pub const ALL: [DiscoveryKind; 3] = [Self::A, Self::Srv, Self::SrvNoA];

    /// Prefix including the trailing `+`
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::A => "dns+",
            Self::Srv => "dnssrv+",
            Self::SrvNoA => "dnssrvnoa+",
        }
    }

    /// Whether a host without an explicit port gets the default Alertmanager port
    ///
    /// SRV records already carry the port.
    pub fn adds_default_port(&self) -> bool {
        matches!(self, Self::A)
    }

    /// Strip the first matching discovery prefix from a URL scheme
    ///
    /// Matching is case-insensitive. Returns the kind and the remaining
    /// transport scheme, e.g. `"dns+https"` gives `(A, "https")`.
    pub fn strip_scheme(scheme: &str) -> Option<(Self, &str)> {
        Self::split_prefixed(scheme)
    }

    /// Recognize a discovery-annotated static address such as `dns+am:9093`
    pub fn split_address(address: &str) -> Option<(Self, &str)> {
        Self::split_prefixed(address)
    }

    fn split_prefixed(value: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|kind| {
            let prefix = kind.prefix();
            let head = value.get(..prefix.len())?;
            head.eq_ignore_ascii_case(prefix)
                .then(|| (kind, &value[prefix.len()..]))
        })
    }
}

impl Display for DiscoveryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix().trim_end_matches('+'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_scheme() {
        assert_eq!(
            DiscoveryKind::strip_scheme("dns+http"),
            Some((DiscoveryKind::A, "http"))
        );
        assert_eq!(
            DiscoveryKind::strip_scheme("dnssrv+https"),
            Some((DiscoveryKind::Srv, "https"))
        );
        assert_eq!(
            DiscoveryKind::strip_scheme("dnssrvnoa+http"),
            Some((DiscoveryKind::SrvNoA, "http"))
        );
    }

    #[test]
    fn test_strip_scheme_case_insensitive() {
        assert_eq!(
            DiscoveryKind::strip_scheme("DNSSRV+http"),
            Some((DiscoveryKind::Srv, "http"))
        );
    }

    #[test]
    fn test_strip_scheme_no_match() {
        assert_eq!(DiscoveryKind::strip_scheme("http"), None);
        assert_eq!(DiscoveryKind::strip_scheme("dns"), None);
        assert_eq!(DiscoveryKind::strip_scheme("consul+http"), None);
        assert_eq!(DiscoveryKind::strip_scheme(""), None);
    }

    #[test]
    fn test_split_address() {
        assert_eq!(
            DiscoveryKind::split_address("dns+am.internal:9093"),
            Some((DiscoveryKind::A, "am.internal:9093"))
        );
        assert_eq!(
            DiscoveryKind::split_address("dnssrvnoa+_am._tcp.internal"),
            Some((DiscoveryKind::SrvNoA, "_am._tcp.internal"))
        );
        assert_eq!(DiscoveryKind::split_address("am.internal:9093"), None);
    }

    #[test]
    fn test_only_srv_kinds_skip_default_port() {
        assert!(DiscoveryKind::A.adds_default_port());
        assert!(!DiscoveryKind::Srv.adds_default_port());
        assert!(!DiscoveryKind::SrvNoA.adds_default_port());
    }

    #[test]
    fn test_display() {
        assert_eq!(DiscoveryKind::A.to_string(), "dns");
        assert_eq!(DiscoveryKind::Srv.to_string(), "dnssrv");
        assert_eq!(DiscoveryKind::SrvNoA.to_string(), "dnssrvnoa");
    }
}
