//! BOM loading and project extraction
//!
//! This module provides:
//! - Reading a pom.xml into a [`BomDocument`]
//! - Resolving version property chains with cycle detection
//! - Grouping managed modules into projects keyed by their version property
//! - Writing selected upgrades back to the file

mod model;
mod pom;
mod versions;
mod writer;

pub use model::{BomVersion, Module, Project, ProjectName};
pub use pom::parse_pom;
pub use versions::BomVersions;
pub use writer::{read_bom, update_property, write_bom, BomWriter, WriteResult};

use crate::error::BomError;
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a managed entry was declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Dependency,
    Plugin,
}

/// A managed dependency or plugin declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedEntry {
    pub kind: EntryKind,
    pub group_id: String,
    pub artifact_id: String,
    /// Literal version or `${property}` reference
    pub version: Option<String>,
}

/// The parts of a BOM that project extraction needs
#[derive(Debug, Clone, Default)]
pub struct BomDocument {
    /// The BOM's own group id
    pub group_id: Option<String>,
    /// Property name/value pairs in document order
    pub properties: Vec<(String, String)>,
    /// Managed dependencies and plugins in document order
    pub entries: Vec<ManagedEntry>,
}

/// A loaded BOM and the projects it manages
#[derive(Debug)]
pub struct Bom {
    path: PathBuf,
    projects: IndexMap<ProjectName, Project>,
}

impl Bom {
    /// Read and interpret the pom at `path`
    pub fn load(path: &Path) -> Result<Self, BomError> {
        let content = read_bom(path)?;
        let document = parse_pom(&content, path)?;
        Self::from_document(path, &document)
    }

    pub fn from_document(path: &Path, document: &BomDocument) -> Result<Self, BomError> {
        Ok(Self {
            path: path.to_path_buf(),
            projects: extract_projects(document)?,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Projects in the order their first module appears
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn project(&self, name: &str) -> Option<&Project> {
        self.projects
            .iter()
            .find(|(key, _)| key.as_str() == name)
            .map(|(_, project)| project)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

/// Group the document's managed entries into projects
///
/// Entries from the BOM's own group, entries without a version property and
/// entries whose property does not resolve to a concrete value are skipped.
/// A property chain that loops fails the whole extraction.
pub fn extract_projects(
    document: &BomDocument,
) -> Result<IndexMap<ProjectName, Project>, BomError> {
    let versions = BomVersions::new(document.properties.iter().cloned());
    let mut projects: IndexMap<ProjectName, Project> = IndexMap::new();

    for entry in &document.entries {
        if document.group_id.as_deref() == Some(entry.group_id.as_str()) {
            continue;
        }
        let Some(expression) = entry.version.as_deref() else {
            debug!(group_id = %entry.group_id, artifact_id = %entry.artifact_id, "No version declared");
            continue;
        };
        let Some(version) = versions.resolve(expression)? else {
            continue;
        };

        let module = Module::new(&entry.group_id, &entry.artifact_id);
        match projects.entry(ProjectName::from_property(&version.property)) {
            Entry::Occupied(mut occupied) => occupied.get_mut().add_module(module),
            Entry::Vacant(vacant) => {
                let name = vacant.key().clone();
                vacant.insert(Project::new(name, version, module));
            }
        }
    }

    Ok(projects)
}
