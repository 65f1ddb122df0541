//! Dependency version model
//!
//! This module provides:
//! - Parsing of arbitrary version strings into a [`DependencyVersion`]
//! - A total order over every parsed version
//! - Upgrade predicates that are aware of how each version was parsed
//! - Maven-style version ranges used to prohibit versions
//!
//! Parsing never fails. Each string is tried against a chain of formats and
//! falls back to an unstructured version that is ordered purely by its
//! comparison key.

mod artifact;
mod comparable;
mod range;
mod release_train;

pub use artifact::ArtifactVersion;
pub use comparable::ComparableVersion;
pub use range::VersionRange;
pub use release_train::ReleaseTrain;

use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// Numeric components separated by dots, e.g. 1.4.01
static NUMERIC_COMPONENTS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+){1,2}$").unwrap());

// Patch and qualifier fused together, e.g. 4.0.0M4
static COMBINED_PATCH_QUALIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+\.[0-9]+\.[0-9]+)([A-Za-z][A-Za-z0-9]*)$").unwrap()
});

/// How a version string was interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionKind {
    /// `<Name>-<Qualifier>`, e.g. `Kay-SR5`
    ReleaseTrain(ReleaseTrain),
    /// `major.minor.patch` with an optional qualifier
    Standard(ArtifactVersion),
    /// Four dot-separated components, the last one numeric
    NumericQualifier(ArtifactVersion),
    /// Numeric components where at least one has a leading zero
    LeadingZeroes(ArtifactVersion),
    /// Patch and qualifier without a separator
    CombinedPatchAndQualifier(ArtifactVersion),
    /// Anything else
    Unstructured,
}

impl VersionKind {
    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            VersionKind::ReleaseTrain(_) => "release-train",
            VersionKind::Standard(_) => "standard",
            VersionKind::NumericQualifier(_) => "numeric-qualifier",
            VersionKind::LeadingZeroes(_) => "leading-zeroes",
            VersionKind::CombinedPatchAndQualifier(_) => "combined-patch-and-qualifier",
            VersionKind::Unstructured => "unstructured",
        }
    }
}

/// Predicates deciding whether one version is an acceptable upgrade of another
pub trait VersionPredicates {
    /// Strictly newer than `other`
    fn is_newer_than(&self, other: &Self) -> bool;

    /// Newer than `other` without leaving its major version
    fn is_same_major_and_newer_than(&self, other: &Self) -> bool;

    /// Newer than `other` without leaving its major and minor version
    fn is_same_minor_and_newer_than(&self, other: &Self) -> bool;
}

/// An immutable, parsed dependency version
#[derive(Debug, Clone)]
pub struct DependencyVersion {
    text: String,
    kind: VersionKind,
    key: ComparableVersion,
}

impl DependencyVersion {
    /// Parse a version string; always succeeds
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (kind, key_text) = Self::classify(text);
        Self {
            text: text.to_string(),
            kind,
            key: ComparableVersion::parse(&key_text),
        }
    }

    fn classify(text: &str) -> (VersionKind, String) {
        if let Some(train) = ReleaseTrain::parse(text) {
            let key_text = train.comparison_text();
            return (VersionKind::ReleaseTrain(train), key_text);
        }
        if let Some(artifact) = ArtifactVersion::parse(text) {
            let key_text = artifact.comparison_text().unwrap_or_else(|| text.to_string());
            return (VersionKind::Standard(artifact), key_text);
        }
        if let Some(artifact) = parse_numeric_qualifier(text) {
            return (VersionKind::NumericQualifier(artifact), text.to_string());
        }
        if let Some(artifact) = parse_leading_zeroes(text) {
            return (VersionKind::LeadingZeroes(artifact), text.to_string());
        }
        if let Some((artifact, key_text)) = parse_combined_patch_and_qualifier(text) {
            return (VersionKind::CombinedPatchAndQualifier(artifact), key_text);
        }
        (VersionKind::Unstructured, text.to_string())
    }

    /// The version exactly as it was written
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> &VersionKind {
        &self.kind
    }

    pub fn is_release_train(&self) -> bool {
        matches!(self.kind, VersionKind::ReleaseTrain(_))
    }

    /// Major/minor/patch components, when the version has them
    pub fn artifact(&self) -> Option<&ArtifactVersion> {
        match &self.kind {
            VersionKind::Standard(artifact)
            | VersionKind::NumericQualifier(artifact)
            | VersionKind::LeadingZeroes(artifact)
            | VersionKind::CombinedPatchAndQualifier(artifact) => Some(artifact),
            VersionKind::ReleaseTrain(_) | VersionKind::Unstructured => None,
        }
    }

    /// Structural comparison of two versions that both carry components.
    /// Returns `None` when `self` or `other` cannot be decomposed.
    fn components_match(
        &self,
        other: &Self,
        matches: impl Fn(&ArtifactVersion, &ArtifactVersion) -> bool,
    ) -> Option<bool> {
        Some(matches(self.artifact()?, other.artifact()?))
    }
}

impl VersionPredicates for DependencyVersion {
    fn is_newer_than(&self, other: &Self) -> bool {
        if self.is_release_train() != other.is_release_train() {
            return false;
        }
        self > other
    }

    fn is_same_major_and_newer_than(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (VersionKind::Unstructured, _) => self.is_newer_than(other),
            // The train name plays the role of the major version
            (VersionKind::ReleaseTrain(_), VersionKind::ReleaseTrain(_)) => {
                self.is_newer_than(other)
            }
            (VersionKind::ReleaseTrain(_), _) | (_, VersionKind::ReleaseTrain(_)) => false,
            _ => self
                .components_match(other, |a, b| a.major == b.major)
                .map_or(true, |same| same && self.is_newer_than(other)),
        }
    }

    fn is_same_minor_and_newer_than(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (VersionKind::Unstructured, _) => self.is_newer_than(other),
            (VersionKind::ReleaseTrain(mine), VersionKind::ReleaseTrain(theirs)) => {
                mine.name == theirs.name && self.is_newer_than(other)
            }
            (VersionKind::ReleaseTrain(_), _) | (_, VersionKind::ReleaseTrain(_)) => false,
            _ => self
                .components_match(other, |a, b| a.major == b.major && a.minor == b.minor)
                .map_or(true, |same| same && self.is_newer_than(other)),
        }
    }
}

impl Ord for DependencyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl PartialOrd for DependencyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DependencyVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DependencyVersion {}

impl fmt::Display for DependencyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

impl From<&str> for DependencyVersion {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

fn parse_numeric_qualifier(text: &str) -> Option<ArtifactVersion> {
    let components: Vec<&str> = text.split('.').collect();
    if components.len() != 4 || !artifact::is_digits(components[3]) {
        return None;
    }
    ArtifactVersion::parse(&components[..3].join("."))
}

fn parse_leading_zeroes(text: &str) -> Option<ArtifactVersion> {
    if !NUMERIC_COMPONENTS_RE.is_match(text) {
        return None;
    }
    let components: Vec<&str> = text.split('.').collect();
    if !components.iter().any(|c| c.len() > 1 && c.starts_with('0')) {
        return None;
    }
    let stripped: Vec<&str> = components
        .iter()
        .map(|c| {
            let trimmed = c.trim_start_matches('0');
            if trimmed.is_empty() {
                "0"
            } else {
                trimmed
            }
        })
        .collect();
    ArtifactVersion::parse(&stripped.join("."))
}

fn parse_combined_patch_and_qualifier(text: &str) -> Option<(ArtifactVersion, String)> {
    let caps = COMBINED_PATCH_QUALIFIER_RE.captures(text)?;
    let numbers = caps.get(1)?.as_str();
    let qualifier = caps.get(2)?.as_str();
    let artifact = ArtifactVersion::parse(&format!("{}.{}", numbers, qualifier))?;
    let key_text = artifact.comparison_text()?;
    Some((artifact, key_text))
}
