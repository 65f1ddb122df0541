//! Projects and modules managed by a BOM

use crate::version::DependencyVersion;
use std::fmt;

/// A concrete dependency identified by group and artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Module {
    /// Group identifier, e.g. `io.netty`
    pub group_id: String,
    /// Artifact identifier, e.g. `netty-codec`
    pub artifact_id: String,
}

impl Module {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Human readable project name derived from a version property
///
/// `spring-framework.version` becomes `Spring Framework`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn from_property(property: &str) -> Self {
        let base = property.strip_suffix(".version").unwrap_or(property);
        let name = base
            .split('-')
            .map(|token| {
                let mut chars = token.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ");
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A version property and the concrete version it resolves to
#[derive(Debug, Clone)]
pub struct BomVersion {
    /// Name of the property holding the literal value
    pub property: String,
    /// Parsed literal value
    pub version: DependencyVersion,
}

impl BomVersion {
    pub fn new(property: impl Into<String>, version: DependencyVersion) -> Self {
        Self {
            property: property.into(),
            version,
        }
    }
}

impl fmt::Display for BomVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.property, self.version)
    }
}

/// Modules sharing one version property
#[derive(Debug, Clone)]
pub struct Project {
    name: ProjectName,
    version: BomVersion,
    modules: Vec<Module>,
}

impl Project {
    /// Creates a project with its first module
    pub fn new(name: ProjectName, version: BomVersion, module: Module) -> Self {
        Self {
            name,
            version,
            modules: vec![module],
        }
    }

    pub(crate) fn add_module(&mut self, module: Module) {
        if !self.modules.contains(&module) {
            self.modules.push(module);
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn version(&self) -> &BomVersion {
        &self.version
    }

    /// Modules in document order; never empty
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_from_property() {
        assert_eq!(
            ProjectName::from_property("spring-framework.version").as_str(),
            "Spring Framework"
        );
        assert_eq!(ProjectName::from_property("netty.version").as_str(), "Netty");
        assert_eq!(
            ProjectName::from_property("commons-lang3.version").as_str(),
            "Commons Lang3"
        );
    }

    #[test]
    fn test_project_name_without_version_suffix() {
        assert_eq!(
            ProjectName::from_property("reactor-bom").as_str(),
            "Reactor Bom"
        );
        assert_eq!(
            ProjectName::from_property("jetty.version.x").as_str(),
            "Jetty.version.x"
        );
    }

    #[test]
    fn test_project_names_collapse() {
        assert_eq!(
            ProjectName::from_property("jackson-bom.version"),
            ProjectName::from_property("Jackson-Bom.version")
        );
    }

    #[test]
    fn test_module_display() {
        let module = Module::new("io.netty", "netty-codec");
        assert_eq!(module.to_string(), "io.netty:netty-codec");
    }

    #[test]
    fn test_project_modules_are_deduplicated() {
        let version = BomVersion::new("netty.version", DependencyVersion::parse("4.1.0"));
        let mut project = Project::new(
            ProjectName::from_property("netty.version"),
            version,
            Module::new("io.netty", "netty-codec"),
        );
        project.add_module(Module::new("io.netty", "netty-handler"));
        project.add_module(Module::new("io.netty", "netty-codec"));
        assert_eq!(project.modules().len(), 2);
        assert_eq!(project.version().to_string(), "netty.version:4.1.0");
    }
}
