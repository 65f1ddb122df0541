//! Upgrade orchestrator for coordinating the entire upgrade workflow
//!
//! This module provides:
//! - Workflow coordination: configure → load → prefetch → prompt → write → commit
//! - Merging of command line options over the configuration file
//! - Dry-run mode support
//! - One git commit per applied upgrade when requested

use crate::bom::{Bom, BomWriter};
use crate::cli::UpgradeArgs;
use crate::config::Config;
use crate::error::{AppError, ConfigError};
use crate::progress::Progress;
use crate::registry::{HttpClient, MavenMetadataVersionResolver};
use crate::upgrade::{ProhibitedVersions, Prompt, Upgrade, UpgradePolicy, UpgradeResolver};
use crate::vcs::GitCommitter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Settings after merging the configuration file and the command line
#[derive(Debug, Clone)]
pub struct UpgradeSettings {
    pub policy: UpgradePolicy,
    pub repositories: Vec<String>,
    pub prohibited: ProhibitedVersions,
}

impl UpgradeSettings {
    /// Command line values win; prohibitions from both sources apply
    pub fn resolve(config: &Config, args: &UpgradeArgs) -> Result<Self, ConfigError> {
        if args.commit && args.dry_run {
            return Err(ConfigError::ConflictingOptions {
                message: "--commit cannot be combined with --dry-run".to_string(),
            });
        }

        let policy = match args.policy {
            Some(policy) => policy,
            None => config.policy()?.unwrap_or_default(),
        };

        let repositories = if args.repository.is_empty() {
            config.repositories()
        } else {
            args.repository.clone()
        };

        let mut prohibited = config.prohibited_versions()?;
        for (project, range) in &args.prohibit {
            prohibited.add(project.as_str(), range.clone());
        }

        Ok(Self {
            policy,
            repositories,
            prohibited,
        })
    }
}

/// Outcome of one upgrade session
#[derive(Debug)]
pub struct UpgradeReport {
    pub bom: PathBuf,
    pub dry_run: bool,
    /// Number of projects found in the BOM
    pub projects: usize,
    /// Selected upgrades in BOM order
    pub upgrades: Vec<Upgrade>,
    /// Whether the upgrades were committed
    pub committed: bool,
}

/// Orchestrator for coordinating the upgrade workflow
pub struct Orchestrator {
    args: UpgradeArgs,
    client: HttpClient,
}

impl Orchestrator {
    pub fn new(args: UpgradeArgs) -> Result<Self, AppError> {
        Ok(Self::with_client(args, HttpClient::new()?))
    }

    /// Create an orchestrator with a custom HTTP client (for testing)
    pub fn with_client(args: UpgradeArgs, client: HttpClient) -> Self {
        Self { args, client }
    }

    /// Run the upgrade workflow
    pub async fn run(
        &self,
        prompt: &mut dyn Prompt,
        git: &dyn GitCommitter,
    ) -> Result<UpgradeReport, AppError> {
        let config = Config::load(self.args.config.as_deref())?;
        let settings = UpgradeSettings::resolve(&config, &self.args)?;
        debug!(
            policy = %settings.policy,
            repositories = ?settings.repositories,
            "Resolved settings"
        );

        let mut progress = Progress::new(self.args.show_progress());

        progress.spinner("Loading BOM...");
        let bom = Bom::load(&self.args.pom);
        progress.finish_and_clear();
        let bom = bom?;
        debug!(projects = bom.len(), path = %bom.path().display(), "Loaded BOM");

        let resolver = MavenMetadataVersionResolver::new(self.client.clone(), settings.repositories);
        let engine = UpgradeResolver::new(Arc::new(resolver), settings.policy, settings.prohibited);

        progress.start(0, "Resolving versions");
        let candidates = engine.prefetch(bom.projects(), &progress).await;
        progress.finish_and_clear();

        let upgrades = engine.select(&candidates, prompt)?;
        let committed = self.apply(&bom, &upgrades, git)?;

        Ok(UpgradeReport {
            bom: bom.path().to_path_buf(),
            dry_run: self.args.dry_run,
            projects: bom.len(),
            upgrades,
            committed,
        })
    }

    /// Write the selected upgrades, committing each one when asked to
    fn apply(
        &self,
        bom: &Bom,
        upgrades: &[Upgrade],
        git: &dyn GitCommitter,
    ) -> Result<bool, AppError> {
        if upgrades.is_empty() {
            return Ok(false);
        }

        let writer = BomWriter::new(self.args.dry_run);
        if !self.args.commit {
            writer.apply_upgrades(bom.path(), upgrades)?;
            return Ok(false);
        }

        for upgrade in upgrades {
            writer.apply_upgrades(bom.path(), std::slice::from_ref(upgrade))?;
            let message = upgrade.commit_message();
            git.commit(bom.path(), &message)?;
            info!(message = message.as_str(), "Committed upgrade");
        }
        Ok(true)
    }
}
