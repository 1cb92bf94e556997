//! Host capability descriptors used by the pre-flight requirement probe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `major.minor` requirement-set version, ordered numerically.
///
/// Serialized as a string (`"1.3"`), matching how hosts advertise their
/// requirement sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u16,
    pub minor: u16,
}

impl ApiVersion {
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for ApiVersion {
    type Err = InvalidApiVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .split_once('.')
            .ok_or_else(|| InvalidApiVersion(s.to_string()))?;
        let major = major
            .parse()
            .map_err(|_| InvalidApiVersion(s.to_string()))?;
        let minor = minor
            .parse()
            .map_err(|_| InvalidApiVersion(s.to_string()))?;
        Ok(Self { major, minor })
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a version string is not `major.minor`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidApiVersion(pub String);

impl fmt::Display for InvalidApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid API version (expected major.minor): {}", self.0)
    }
}

impl std::error::Error for InvalidApiVersion {}

/// One requirement set the host supports, at its highest version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSet {
    pub name: String,
    pub version: ApiVersion,
}

/// What a host advertises about itself. Learned by the transport when it
/// connects; consulting it never costs a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDescriptor {
    /// Host application name, for example `"Word"`.
    pub application: String,
    pub api_sets: Vec<ApiSet>,
}

impl HostDescriptor {
    /// Whether the host supports `name` at `version` or newer.
    pub fn is_set_supported(&self, name: &str, version: ApiVersion) -> bool {
        self.api_sets
            .iter()
            .any(|set| set.name == name && set.version >= version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_numerically_not_lexically() {
        let v1_3: ApiVersion = "1.3".parse().unwrap();
        let v1_10: ApiVersion = "1.10".parse().unwrap();
        assert!(v1_10 > v1_3);
        assert_eq!(v1_10.to_string(), "1.10");
    }

    #[test]
    fn version_rejects_malformed_strings() {
        assert!("1".parse::<ApiVersion>().is_err());
        assert!("one.three".parse::<ApiVersion>().is_err());
        assert!("1.3.5".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn version_serializes_as_string() {
        let set = ApiSet {
            name: "WordApi".to_string(),
            version: ApiVersion::new(1, 3),
        };
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(value["version"], "1.3");
        let back: ApiSet = serde_json::from_value(value).unwrap();
        assert_eq!(back, set);
    }

    #[test]
    fn support_requires_matching_set_at_or_above_version() {
        let descriptor = HostDescriptor {
            application: "Word".to_string(),
            api_sets: vec![ApiSet {
                name: "WordApi".to_string(),
                version: ApiVersion::new(1, 3),
            }],
        };

        assert!(descriptor.is_set_supported("WordApi", ApiVersion::new(1, 1)));
        assert!(descriptor.is_set_supported("WordApi", ApiVersion::new(1, 3)));
        assert!(!descriptor.is_set_supported("WordApi", ApiVersion::new(1, 4)));
        assert!(!descriptor.is_set_supported("ExcelApi", ApiVersion::new(1, 1)));
    }
}
