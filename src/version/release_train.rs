//! Release-train versions such as `Lovelace-SR3` or `Hoxton.SR1`

use regex::Regex;
use std::sync::LazyLock;

// Train name followed by a milestone, release candidate, release or service release
static RELEASE_TRAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][a-z]+)[-.](RELEASE|SR[0-9]+|M[0-9]+|RC[0-9]+)$").unwrap()
});

/// A release train name together with its qualifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTrain {
    pub name: String,
    pub qualifier: String,
}

impl ReleaseTrain {
    pub fn parse(version: &str) -> Option<Self> {
        let caps = RELEASE_TRAIN_RE.captures(version)?;
        Some(Self {
            name: caps.get(1)?.as_str().to_string(),
            qualifier: caps.get(2)?.as_str().to_string(),
        })
    }

    /// Text the comparison key is built from; the separator is normalized so
    /// `Hoxton.SR1` and `Hoxton-SR1` order identically
    pub fn comparison_text(&self) -> String {
        format!("{}-{}", self.name, self.qualifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_service_release() {
        let train = ReleaseTrain::parse("Lovelace-SR3").unwrap();
        assert_eq!(train.name, "Lovelace");
        assert_eq!(train.qualifier, "SR3");
    }

    #[test]
    fn test_parse_release() {
        let train = ReleaseTrain::parse("Kay-RELEASE").unwrap();
        assert_eq!(train.qualifier, "RELEASE");
    }

    #[test]
    fn test_parse_dot_separator() {
        let train = ReleaseTrain::parse("Hoxton.SR1").unwrap();
        assert_eq!(train.name, "Hoxton");
        assert_eq!(train.comparison_text(), "Hoxton-SR1");
    }

    #[test]
    fn test_parse_rejects_non_trains() {
        assert!(ReleaseTrain::parse("5.1.4.RELEASE").is_none());
        assert!(ReleaseTrain::parse("kay-SR1").is_none());
        assert!(ReleaseTrain::parse("Kay-SR").is_none());
        assert!(ReleaseTrain::parse("Kay").is_none());
    }
}
