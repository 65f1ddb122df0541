//! Artifact listings for BOM maintenance
//!
//! This module provides:
//! - `artifacts`: the artifacts of a group at one version, as `<dependency>` entries
//! - `artifacts-delta`: the artifacts removed from and added to a group between two versions

use crate::cli::{ArtifactsArgs, ArtifactsDeltaArgs};
use crate::error::{AppError, IoError};
use crate::registry::{HttpClient, MavenRepositoryArtifactsFinder};
use std::collections::BTreeSet;
use std::io::Write;

/// The `<version>` value of generated entries: `${property}` when a property is given
pub fn version_reference(version: &str, property: Option<&str>) -> String {
    match property.map(str::trim).filter(|p| !p.is_empty()) {
        Some(property) => format!("${{{}}}", property),
        None => version.to_string(),
    }
}

/// Write one dependency management entry per artifact
pub fn write_dependencies<'a>(
    writer: &mut dyn Write,
    group: &str,
    artifacts: impl IntoIterator<Item = &'a String>,
    version: &str,
) -> std::io::Result<()> {
    for artifact in artifacts {
        writeln!(writer, "<dependency>")?;
        writeln!(writer, "\t<groupId>{}</groupId>", group)?;
        writeln!(writer, "\t<artifactId>{}</artifactId>", artifact)?;
        writeln!(writer, "\t<version>{}</version>", version)?;
        writeln!(writer, "</dependency>")?;
    }
    Ok(())
}

/// Artifacts that differ between two versions of a group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactsDelta {
    /// Published at the old version only
    pub removed: BTreeSet<String>,
    /// Published at the new version only
    pub added: BTreeSet<String>,
}

impl ArtifactsDelta {
    pub fn between(old: &BTreeSet<String>, new: &BTreeSet<String>) -> Self {
        Self {
            removed: old.difference(new).cloned().collect(),
            added: new.difference(old).cloned().collect(),
        }
    }

    /// Removed artifact ids, then the added ones as dependency entries
    pub fn write(&self, writer: &mut dyn Write, group: &str, version: &str) -> std::io::Result<()> {
        writeln!(writer, "Removed:")?;
        writeln!(writer)?;
        if self.removed.is_empty() {
            writeln!(writer, "None")?;
        }
        for artifact in &self.removed {
            writeln!(writer, "{}", artifact)?;
        }
        writeln!(writer)?;

        writeln!(writer, "Added:")?;
        writeln!(writer)?;
        if self.added.is_empty() {
            writeln!(writer, "None")?;
        }
        write_dependencies(writer, group, &self.added, version)
    }
}

/// Run `bomr artifacts`
pub async fn list(
    args: &ArtifactsArgs,
    client: HttpClient,
    writer: &mut dyn Write,
) -> Result<(), AppError> {
    let finder = MavenRepositoryArtifactsFinder::new(client, &args.repository);
    let artifacts = finder.find(&args.group, &args.version).await?;

    let version = version_reference(&args.version, args.version_property.as_deref());
    write_dependencies(writer, &args.group, &artifacts, &version).map_err(IoError::write_failed)?;
    Ok(())
}

/// Run `bomr artifacts-delta`
pub async fn delta(
    args: &ArtifactsDeltaArgs,
    client: HttpClient,
    writer: &mut dyn Write,
) -> Result<(), AppError> {
    let finder = MavenRepositoryArtifactsFinder::new(client, &args.repository);
    let (old, new) = futures::try_join!(
        finder.find(&args.group, &args.old_version),
        finder.find(&args.group, &args.new_version)
    )?;

    let version = version_reference(&args.new_version, args.version_property.as_deref());
    ArtifactsDelta::between(&old, &new)
        .write(writer, &args.group, &version)
        .map_err(IoError::write_failed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CliArgs, Command};
    use clap::Parser;
    use mockito::{Server, ServerGuard};
    use std::time::Duration;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn client() -> HttpClient {
        HttpClient::new()
            .unwrap()
            .with_max_retries(0)
            .with_base_delay(Duration::from_millis(1))
    }

    fn listing(entries: &[&str]) -> String {
        entries
            .iter()
            .map(|e| format!("<a href=\"{0}/\">{0}/</a>\n", e))
            .collect()
    }

    /// A group where `widget-legacy` was dropped and `widget-kotlin` added in 2.0.0
    async fn widget_repository() -> ServerGuard {
        let mut server = Server::new_async().await;
        let listings = [
            ("/com/acme/", listing(&["widget", "widget-legacy", "widget-kotlin"])),
            ("/com/acme/widget/", listing(&["1.0.0", "2.0.0"])),
            ("/com/acme/widget-legacy/", listing(&["1.0.0"])),
            ("/com/acme/widget-kotlin/", listing(&["2.0.0"])),
        ];
        for (path, body) in listings {
            server
                .mock("GET", path)
                .with_status(200)
                .with_body(body)
                .create_async()
                .await;
        }
        for path in [
            "/com/acme/widget/1.0.0/widget-1.0.0.jar",
            "/com/acme/widget/2.0.0/widget-2.0.0.jar",
            "/com/acme/widget-legacy/1.0.0/widget-legacy-1.0.0.jar",
            "/com/acme/widget-kotlin/2.0.0/widget-kotlin-2.0.0.jar",
        ] {
            server
                .mock("HEAD", path)
                .with_status(200)
                .create_async()
                .await;
        }
        server
    }

    fn parse(argv: &[&str]) -> Command {
        CliArgs::parse_from(argv).command
    }

    #[test]
    fn test_version_reference() {
        assert_eq!(version_reference("2.3.0", None), "2.3.0");
        assert_eq!(version_reference("2.3.0", Some("quartz.version")), "${quartz.version}");
        assert_eq!(version_reference("2.3.0", Some(" ")), "2.3.0");
    }

    #[test]
    fn test_write_dependencies() {
        let mut output = Vec::new();
        write_dependencies(&mut output, "org.quartz-scheduler", &set(&["quartz"]), "2.3.0")
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<dependency>\n\t<groupId>org.quartz-scheduler</groupId>\n\t<artifactId>quartz</artifactId>\n\t<version>2.3.0</version>\n</dependency>\n"
        );
    }

    #[test]
    fn test_delta_between() {
        let delta = ArtifactsDelta::between(&set(&["a", "b", "c"]), &set(&["b", "c", "d"]));
        assert_eq!(delta.removed, set(&["a"]));
        assert_eq!(delta.added, set(&["d"]));
    }

    #[test]
    fn test_delta_write_without_changes() {
        let mut output = Vec::new();
        ArtifactsDelta::default()
            .write(&mut output, "com.acme", "2.0.0")
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Removed:\n\nNone\n\nAdded:\n\nNone\n"
        );
    }

    #[tokio::test]
    async fn test_list_with_version_property() {
        let server = widget_repository().await;
        let Command::Artifacts(args) = parse(&[
            "bomr",
            "artifacts",
            "com.acme",
            "2.0.0",
            "--version-property",
            "acme.version",
            "--repository",
            server.url().as_str(),
        ]) else {
            panic!("expected artifacts command");
        };

        let mut output = Vec::new();
        list(&args, client(), &mut output).await.unwrap();
        let output = String::from_utf8(output).unwrap();

        assert!(output.contains("<artifactId>widget</artifactId>"));
        assert!(output.contains("<artifactId>widget-kotlin</artifactId>"));
        assert!(!output.contains("widget-legacy"));
        assert_eq!(output.matches("<version>${acme.version}</version>").count(), 2);
    }

    #[tokio::test]
    async fn test_delta_between_versions() {
        let server = widget_repository().await;
        let Command::ArtifactsDelta(args) = parse(&[
            "bomr",
            "artifacts-delta",
            "com.acme",
            "1.0.0",
            "2.0.0",
            "--repository",
            server.url().as_str(),
        ]) else {
            panic!("expected artifacts-delta command");
        };

        let mut output = Vec::new();
        delta(&args, client(), &mut output).await.unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Removed:\n\nwidget-legacy\n\nAdded:\n\n<dependency>\n\t<groupId>com.acme</groupId>\n\t<artifactId>widget-kotlin</artifactId>\n\t<version>2.0.0</version>\n</dependency>\n"
        );
    }
}
