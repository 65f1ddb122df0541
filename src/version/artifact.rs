//! Maven-style `major.minor.incremental[-build|-qualifier]` decomposition

/// A version broken into Maven artifact-version components
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactVersion {
    pub major: u32,
    pub minor: u32,
    pub incremental: u32,
    pub build_number: u32,
    pub qualifier: Option<String>,
}

impl ArtifactVersion {
    /// Decompose `version`, returning `None` when it has no numeric structure
    /// (the whole string would end up as the qualifier)
    pub fn parse(version: &str) -> Option<Self> {
        let (main, suffix) = match version.split_once('-') {
            Some((main, suffix)) => (main, Some(suffix)),
            None => (version, None),
        };

        let mut build_number = None;
        let mut qualifier = None;
        if let Some(suffix) = suffix {
            if suffix.len() == 1 || !suffix.starts_with('0') {
                build_number = parse_int(suffix);
            }
            if build_number.is_none() {
                qualifier = Some(suffix.to_string());
            }
        }

        if !main.contains('.') && !main.starts_with('0') {
            let major = parse_int(main)?;
            return Some(Self {
                major,
                minor: 0,
                incremental: 0,
                build_number: build_number.unwrap_or(0),
                qualifier,
            });
        }

        if main.starts_with('.') || main.ends_with('.') || main.contains("..") {
            return None;
        }

        let mut tokens = main.split('.');
        let major = tokens.next().and_then(next_integer)?;
        let minor = match tokens.next() {
            Some(token) => next_integer(token)?,
            None => 0,
        };
        let incremental = match tokens.next() {
            Some(token) => next_integer(token)?,
            None => 0,
        };
        if let Some(token) = tokens.next() {
            // A numeric fourth component is not a qualifier, and anything
            // after it means the version is not artifact-shaped at all.
            if is_digits(token) || tokens.next().is_some() {
                return None;
            }
            qualifier = Some(token.to_string());
        }

        Some(Self {
            major,
            minor,
            incremental,
            build_number: build_number.unwrap_or(0),
            qualifier,
        })
    }

    /// `major.minor.incremental-qualifier`, so `1.0.0.RC1` and `1.0.0-RC1`
    /// share a comparison key. `None` without a qualifier.
    pub fn comparison_text(&self) -> Option<String> {
        let qualifier = self.qualifier.as_ref()?;
        Some(format!(
            "{}.{}.{}-{}",
            self.major, self.minor, self.incremental, qualifier
        ))
    }
}

/// A numeric component; leading zeroes are rejected
fn next_integer(token: &str) -> Option<u32> {
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    parse_int(token)
}

fn parse_int(value: &str) -> Option<u32> {
    if !is_digits(value) {
        return None;
    }
    value.parse::<u32>().ok().filter(|v| *v <= i32::MAX as u32)
}

pub(crate) fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
