//! Duration serialization using humantime format (`"10s"`, `"5m"`).

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}

/// Same encoding for optional fields; a null value stays `None`.
pub mod option {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Wrapper {
        #[serde(with = "super")]
        timeout: Duration,
    }

    #[derive(Debug, Deserialize)]
    struct OptionalWrapper {
        #[serde(default, deserialize_with = "super::option::deserialize")]
        timeout: Option<Duration>,
    }

    #[test]
    fn test_parse_human_durations() {
        let w: Wrapper = serde_yaml::from_str("timeout: 10s").unwrap();
        assert_eq!(w.timeout, Duration::from_secs(10));

        let w: Wrapper = serde_yaml::from_str("timeout: 1m").unwrap();
        assert_eq!(w.timeout, Duration::from_secs(60));

        let w: Wrapper = serde_yaml::from_str("timeout: 500ms").unwrap();
        assert_eq!(w.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_serialize_compact() {
        let w = Wrapper {
            timeout: Duration::from_secs(300),
        };
        assert_eq!(serde_yaml::to_string(&w).unwrap().trim(), "timeout: 5m");
    }

    #[test]
    fn test_invalid_duration_rejected() {
        assert!(serde_yaml::from_str::<Wrapper>("timeout: soon").is_err());
        assert!(serde_yaml::from_str::<Wrapper>("timeout: 10").is_err());
    }

    #[test]
    fn test_optional_duration() {
        let w: OptionalWrapper = serde_yaml::from_str("timeout: 2s").unwrap();
        assert_eq!(w.timeout, Some(Duration::from_secs(2)));

        let w: OptionalWrapper = serde_yaml::from_str("timeout: ~").unwrap();
        assert_eq!(w.timeout, None);

        let w: OptionalWrapper = serde_yaml::from_str("{}").unwrap();
        assert_eq!(w.timeout, None);
    }
}
