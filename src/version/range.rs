//! Maven-style version ranges
//!
//! Supported forms:
//! - `[1.0,2.0)`, `(1.0,2.0]`: bounded, with inclusive `[`/`]` or exclusive `(`/`)` ends
//! - `(,1.0]`, `[1.5,)`: open on one side
//! - `[1.2.3]`, `1.2.3`: exactly one version
//! - `(,1.0],[1.2,)`: a union of ranges

use super::DependencyVersion;
use crate::error::ConfigError;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone)]
struct Bound {
    version: DependencyVersion,
    inclusive: bool,
}

#[derive(Debug, Clone)]
struct Restriction {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl Restriction {
    fn exact(version: DependencyVersion) -> Self {
        Self {
            lower: Some(Bound {
                version: version.clone(),
                inclusive: true,
            }),
            upper: Some(Bound {
                version,
                inclusive: true,
            }),
        }
    }

    fn contains(&self, version: &DependencyVersion) -> bool {
        if let Some(lower) = &self.lower {
            match version.cmp(&lower.version) {
                Ordering::Less => return false,
                Ordering::Equal if !lower.inclusive => return false,
                _ => {}
            }
        }
        if let Some(upper) = &self.upper {
            match version.cmp(&upper.version) {
                Ordering::Greater => return false,
                Ordering::Equal if !upper.inclusive => return false,
                _ => {}
            }
        }
        true
    }
}

/// A set of version intervals
#[derive(Debug, Clone)]
pub struct VersionRange {
    spec: String,
    restrictions: Vec<Restriction>,
}

impl VersionRange {
    /// Parse a range expression
    pub fn parse(spec: &str) -> Result<Self, ConfigError> {
        let spec = spec.trim();
        let invalid = |message: &str| ConfigError::InvalidVersionRange {
            value: spec.to_string(),
            message: message.to_string(),
        };

        if spec.is_empty() {
            return Err(invalid("empty range"));
        }

        if !spec.starts_with(['[', '(']) {
            if spec.contains([',', '[', ']', '(', ')']) {
                return Err(invalid("unbalanced brackets"));
            }
            return Ok(Self {
                spec: spec.to_string(),
                restrictions: vec![Restriction::exact(DependencyVersion::parse(spec))],
            });
        }

        let mut restrictions: Vec<Restriction> = Vec::new();
        let mut remaining = spec;
        while !remaining.is_empty() {
            if !remaining.starts_with(['[', '(']) {
                return Err(invalid("expected '[' or '(' to start a range"));
            }
            let end = match (remaining.find(')'), remaining.find(']')) {
                (Some(paren), Some(bracket)) => paren.min(bracket),
                (Some(index), None) | (None, Some(index)) => index,
                (None, None) => return Err(invalid("unbounded range")),
            };

            let restriction = parse_restriction(&remaining[..=end]).map_err(|m| invalid(&m))?;
            if let Some(previous) = restrictions.last() {
                // An open end on either side of the seam always overlaps
                let ordered = match (previous.upper.as_ref(), restriction.lower.as_ref()) {
                    (Some(upper), Some(lower)) => lower.version >= upper.version,
                    _ => false,
                };
                if !ordered {
                    return Err(invalid("ranges overlap"));
                }
            }
            restrictions.push(restriction);

            remaining = remaining[end + 1..].trim_start();
            if let Some(rest) = remaining.strip_prefix(',') {
                remaining = rest.trim_start();
                if remaining.is_empty() {
                    return Err(invalid("trailing ','"));
                }
            } else if !remaining.is_empty() {
                return Err(invalid("ranges must be separated by ','"));
            }
        }

        Ok(Self {
            spec: spec.to_string(),
            restrictions,
        })
    }

    /// Returns true if `version` lies within any interval of this range
    pub fn contains(&self, version: &DependencyVersion) -> bool {
        self.restrictions.iter().any(|r| r.contains(version))
    }
}

fn parse_restriction(spec: &str) -> Result<Restriction, String> {
    let lower_inclusive = spec.starts_with('[');
    let upper_inclusive = spec.ends_with(']');
    let inner = spec[1..spec.len() - 1].trim();

    let Some((lower, upper)) = inner.split_once(',') else {
        if !lower_inclusive || !upper_inclusive {
            return Err("a single version must be surrounded by '[' and ']'".to_string());
        }
        if inner.is_empty() {
            return Err("empty version".to_string());
        }
        return Ok(Restriction::exact(DependencyVersion::parse(inner)));
    };

    let (lower, upper) = (lower.trim(), upper.trim());
    if upper.contains(',') {
        return Err("a range has at most two bounds".to_string());
    }
    let lower = (!lower.is_empty()).then(|| Bound {
        version: DependencyVersion::parse(lower),
        inclusive: lower_inclusive,
    });
    let upper = (!upper.is_empty()).then(|| Bound {
        version: DependencyVersion::parse(upper),
        inclusive: upper_inclusive,
    });

    if let (Some(lower), Some(upper)) = (&lower, &upper) {
        match lower.version.cmp(&upper.version) {
            Ordering::Greater => {
                return Err("lower bound is greater than upper bound".to_string());
            }
            Ordering::Equal if !(lower.inclusive && upper.inclusive) => {
                return Err("range cannot have identical exclusive boundaries".to_string());
            }
            _ => {}
        }
    }

    Ok(Restriction { lower, upper })
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec)
    }
}
