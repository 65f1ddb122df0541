//! Output formatting for upgrade reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::orchestrator::UpgradeReport;
use crate::upgrade::Upgrade;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary line only
    Quiet,
    #[default]
    Normal,
    /// Also lists the property and modules of every upgrade
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub verbosity: Verbosity,
    pub dry_run: bool,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            dry_run: false,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool, dry_run: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            dry_run,
            color: true,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write a whole report
    fn format(&self, report: &UpgradeReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write a single upgrade
    fn format_upgrade(&self, upgrade: &Upgrade, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(
            config.verbosity,
            config.dry_run,
            config.color,
        )),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::bom::{BomVersion, Module, Project, ProjectName};
    use crate::orchestrator::UpgradeReport;
    use crate::upgrade::Upgrade;
    use crate::version::DependencyVersion;
    use std::path::PathBuf;

    pub fn upgrade(property: &str, from: &str, to: &str, modules: &[(&str, &str)]) -> Upgrade {
        let mut project = Project::new(
            ProjectName::from_property(property),
            BomVersion::new(property, DependencyVersion::parse(from)),
            Module::new(modules[0].0, modules[0].1),
        );
        for (group_id, artifact_id) in &modules[1..] {
            project.add_module(Module::new(*group_id, *artifact_id));
        }
        Upgrade::new(project, DependencyVersion::parse(to))
    }

    pub fn report(dry_run: bool) -> UpgradeReport {
        UpgradeReport {
            bom: PathBuf::from("bom/pom.xml"),
            dry_run,
            projects: 3,
            upgrades: vec![
                upgrade(
                    "spring-framework.version",
                    "5.1.4.RELEASE",
                    "5.1.5.RELEASE",
                    &[
                        ("org.springframework", "spring-core"),
                        ("org.springframework", "spring-aop"),
                    ],
                ),
                upgrade(
                    "netty.version",
                    "4.1.42.Final",
                    "4.1.43.Final",
                    &[("io.netty", "netty-codec")],
                ),
            ],
            committed: false,
        }
    }
}
