//! Writing selected upgrades back to the BOM
//!
//! This module provides:
//! - BomWriter for rewriting version properties of a pom
//! - Dry-run mode support (no actual file modifications)
//! - Format preservation: only the property values change

use crate::error::BomError;
use crate::upgrade::Upgrade;
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writer that applies upgrades to a BOM file
pub struct BomWriter {
    /// Whether to run in dry-run mode (no file modifications)
    dry_run: bool,
}

/// Result of applying upgrades to a BOM file
#[derive(Debug)]
pub struct WriteResult {
    /// Path to the BOM file
    pub path: PathBuf,
    /// Number of upgrades applied to the content
    pub upgrades_applied: usize,
    /// Whether the file was actually modified
    pub file_modified: bool,
}

impl BomWriter {
    pub fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Rewrite the governing property of every upgrade in `path`
    ///
    /// All upgrades are applied in memory first; a property that cannot be
    /// found aborts before anything is written.
    pub fn apply_upgrades(
        &self,
        path: &Path,
        upgrades: &[Upgrade],
    ) -> Result<WriteResult, BomError> {
        let mut content = read_bom(path)?;
        for upgrade in upgrades {
            let property = &upgrade.project().version().property;
            content = update_property(&content, property, upgrade.version().as_str())
                .ok_or_else(|| BomError::property_not_found(property.as_str(), path))?;
            info!(
                project = %upgrade.project().name(),
                property = property.as_str(),
                version = %upgrade.version(),
                "Applied upgrade"
            );
        }

        let file_modified = !upgrades.is_empty() && !self.dry_run;
        if file_modified {
            write_bom(path, &content)?;
        }

        Ok(WriteResult {
            path: path.to_path_buf(),
            upgrades_applied: upgrades.len(),
            file_modified,
        })
    }
}

/// Replace the value of every `<property>` element in `content`
///
/// Returns `None` when the property does not occur.
pub fn update_property(content: &str, property: &str, value: &str) -> Option<String> {
    let escaped = regex::escape(property);
    let pattern = Regex::new(&format!(r"<{0}>[^<]*</{0}>", escaped)).ok()?;
    if !pattern.is_match(content) {
        return None;
    }
    let replacement = format!("<{0}>{1}</{0}>", property, value);
    Some(pattern.replace_all(content, NoExpand(&replacement)).into_owned())
}

/// Read a BOM file
pub fn read_bom(path: &Path) -> Result<String, BomError> {
    if !path.exists() {
        return Err(BomError::not_found(path));
    }
    fs::read_to_string(path).map_err(|e| BomError::read_error(path, e))
}

/// Write content to a BOM file
pub fn write_bom(path: &Path, content: &str) -> Result<(), BomError> {
    fs::write(path, content).map_err(|e| BomError::write_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::{BomVersion, Module, Project, ProjectName};
    use crate::version::DependencyVersion;
    use tempfile::TempDir;

    const POM: &str = r#"<project>
    <properties>
        <netty.version>4.1.42.Final</netty.version>
        <reactor-bom.version>Dysprosium-SR1</reactor-bom.version>
    </properties>
</project>
"#;

    fn upgrade(property: &str, current: &str, target: &str) -> Upgrade {
        let project = Project::new(
            ProjectName::from_property(property),
            BomVersion::new(property, DependencyVersion::parse(current)),
            Module::new("io.example", "example"),
        );
        Upgrade::new(project, DependencyVersion::parse(target))
    }

    fn write_pom(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("pom.xml");
        fs::write(&path, POM).unwrap();
        path
    }

    #[test]
    fn test_update_property() {
        let updated = update_property(POM, "netty.version", "4.1.43.Final").unwrap();
        assert!(updated.contains("<netty.version>4.1.43.Final</netty.version>"));
        assert!(updated.contains("<reactor-bom.version>Dysprosium-SR1</reactor-bom.version>"));
    }

    #[test]
    fn test_update_property_escapes_name() {
        // The dot must not match an arbitrary character
        assert!(update_property(POM, "netty-version", "1.0").is_none());
    }

    #[test]
    fn test_update_property_keeps_dollar_signs_literal() {
        let updated = update_property(POM, "netty.version", "$1").unwrap();
        assert!(updated.contains("<netty.version>$1</netty.version>"));
    }

    #[test]
    fn test_update_missing_property() {
        assert!(update_property(POM, "jetty.version", "9.4.0").is_none());
    }

    #[test]
    fn test_apply_upgrades_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = write_pom(&dir);
        let writer = BomWriter::new(false);
        let result = writer
            .apply_upgrades(
                &path,
                &[
                    upgrade("netty.version", "4.1.42.Final", "4.1.43.Final"),
                    upgrade("reactor-bom.version", "Dysprosium-SR1", "Dysprosium-SR2"),
                ],
            )
            .unwrap();

        assert_eq!(result.upgrades_applied, 2);
        assert!(result.file_modified);
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("<netty.version>4.1.43.Final</netty.version>"));
        assert!(content.contains("<reactor-bom.version>Dysprosium-SR2</reactor-bom.version>"));
    }

    #[test]
    fn test_apply_upgrades_dry_run() {
        let dir = TempDir::new().unwrap();
        let path = write_pom(&dir);
        let writer = BomWriter::new(true);
        assert!(writer.is_dry_run());
        let result = writer
            .apply_upgrades(&path, &[upgrade("netty.version", "4.1.42.Final", "4.1.43.Final")])
            .unwrap();

        assert_eq!(result.upgrades_applied, 1);
        assert!(!result.file_modified);
        assert_eq!(fs::read_to_string(&path).unwrap(), POM);
    }

    #[test]
    fn test_apply_upgrades_missing_property_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write_pom(&dir);
        let err = BomWriter::new(false)
            .apply_upgrades(
                &path,
                &[
                    upgrade("netty.version", "4.1.42.Final", "4.1.43.Final"),
                    upgrade("jetty.version", "9.4.0", "9.4.1"),
                ],
            )
            .unwrap_err();

        assert!(matches!(err, BomError::PropertyNotFound { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), POM);
    }

    #[test]
    fn test_read_bom_not_found() {
        let err = read_bom(Path::new("/nonexistent/pom.xml")).unwrap_err();
        assert!(matches!(err, BomError::NotFound { .. }));
    }
}
