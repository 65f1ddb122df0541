//! CLI argument parsing module for bomr

use crate::registry::MAVEN_CENTRAL_URL;
use crate::upgrade::{parse_pair, UpgradePolicy};
use crate::version::VersionRange;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Parse an upgrade policy name
fn parse_policy(s: &str) -> Result<UpgradePolicy, String> {
    s.parse::<UpgradePolicy>().map_err(|e| e.to_string())
}

/// Parse a `Project Name=RANGE` prohibition
fn parse_prohibition(s: &str) -> Result<(String, VersionRange), String> {
    parse_pair(s).map_err(|e| e.to_string())
}

/// Interactive upgrade assistant for Maven bills of materials
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bomr",
    version,
    about = "Interactive upgrade assistant for Maven bills of materials"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Offer newer versions for each project managed by a BOM
    Upgrade(UpgradeArgs),

    /// List the artifacts in a group with a matching version
    Artifacts(ArtifactsArgs),

    /// List the artifacts added to and removed from a group across two versions
    ArtifactsDelta(ArtifactsDeltaArgs),
}

#[derive(Args, Debug, Clone)]
pub struct UpgradeArgs {
    /// Path to the BOM's pom.xml
    pub pom: PathBuf,

    // Upgrade options
    /// Which newer versions to offer: any, same-major-version, same-minor-version
    #[arg(long, value_parser = parse_policy)]
    pub policy: Option<UpgradePolicy>,

    /// Never offer versions in RANGE for a project (can be specified multiple times)
    #[arg(long, value_name = "PROJECT=RANGE", action = ArgAction::Append, value_parser = parse_prohibition)]
    pub prohibit: Vec<(String, VersionRange)>,

    /// Maven repository to search (can be specified multiple times)
    #[arg(long, value_name = "URL", action = ArgAction::Append)]
    pub repository: Vec<String>,

    /// Configuration file (default: ~/.bomr.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // General options
    /// Dry run mode - show the selected upgrades without changing the BOM
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Commit each applied upgrade with git
    #[arg(long)]
    pub commit: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl UpgradeArgs {
    /// Whether a progress bar should be drawn
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.json
    }
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactsArgs {
    /// Group id, e.g. org.quartz-scheduler
    pub group: String,

    /// Version the artifacts must be published at
    pub version: String,

    /// Version property to use in the generated dependency management
    #[arg(long, value_name = "PROPERTY")]
    pub version_property: Option<String>,

    /// Maven repository to query
    #[arg(long, value_name = "URL", default_value = MAVEN_CENTRAL_URL)]
    pub repository: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactsDeltaArgs {
    /// Group id, e.g. org.quartz-scheduler
    pub group: String,

    /// Version to compare from
    pub old_version: String,

    /// Version to compare to
    pub new_version: String,

    /// Version property to use for the added artifacts
    #[arg(long, value_name = "PROPERTY")]
    pub version_property: Option<String>,

    /// Maven repository to query
    #[arg(long, value_name = "URL", default_value = MAVEN_CENTRAL_URL)]
    pub repository: String,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,
}
