//! Version properties declared by a BOM
//!
//! Version expressions are either literals or `${name}` references to a
//! property, whose value may itself be another reference. The walk keeps
//! track of every property it visits so a chain that loops back is reported
//! instead of followed forever.

use super::model::BomVersion;
use crate::error::BomError;
use crate::version::DependencyVersion;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Property name to raw value lookup
#[derive(Debug, Clone, Default)]
pub struct BomVersions {
    properties: HashMap<String, String>,
}

impl BomVersions {
    pub fn new(properties: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            properties: properties.into_iter().collect(),
        }
    }

    /// Resolve a version expression to the property that holds its literal value
    ///
    /// Returns `Ok(None)` for expressions that do not end in a concrete
    /// property value: literals, references to undefined properties and
    /// values that still contain a placeholder.
    pub fn resolve(&self, expression: &str) -> Result<Option<BomVersion>, BomError> {
        let mut value = expression.trim();
        let mut property: Option<&str> = None;
        let mut visited: Vec<String> = Vec::new();

        while let Some(name) = placeholder(value) {
            if visited.iter().any(|v| v == name) {
                return Err(BomError::property_cycle(name, &visited));
            }
            visited.push(name.to_string());
            match self.properties.get(name) {
                Some(next) => {
                    property = Some(name);
                    value = next.trim();
                }
                None => {
                    warn!(property = name, expression, "Skipping undefined version property");
                    return Ok(None);
                }
            }
        }

        let Some(property) = property else {
            debug!(expression, "Version is not controlled by a property");
            return Ok(None);
        };
        if value.is_empty() || value.contains("${") {
            debug!(property, value, "Version property has no concrete value");
            return Ok(None);
        }

        Ok(Some(BomVersion::new(
            property,
            DependencyVersion::parse(value),
        )))
    }
}

/// Name inside a `${...}` reference spanning the whole value
fn placeholder(value: &str) -> Option<&str> {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .map(str::trim)
}
