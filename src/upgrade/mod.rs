//! Upgrade resolution
//!
//! This module provides:
//! - Upgrade policies and prohibited version ranges
//! - Concurrent prefetching of every module's available versions
//! - Candidate collection: policy filter, union across modules, missing
//!   module annotation and prohibition filter
//! - Interactive selection of one upgrade per project
//!
//! Version lookups for all projects run up front; prompts then follow one
//! project at a time in BOM order.

mod policy;
mod prohibited;
mod prompt;

pub use policy::UpgradePolicy;
pub use prohibited::{parse_pair, ProhibitedVersions};
pub use prompt::{ConsolePrompt, Prompt};

use crate::bom::{Module, Project};
use crate::error::ResolveError;
use crate::progress::Progress;
use crate::registry::VersionResolver;
use crate::version::DependencyVersion;
use futures::future::join_all;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default concurrency limit for version lookups
pub const DEFAULT_CONCURRENCY: usize = 10;

/// A project together with the version it should move to
#[derive(Debug, Clone)]
pub struct Upgrade {
    project: Project,
    version: DependencyVersion,
}

impl Upgrade {
    pub fn new(project: Project, version: DependencyVersion) -> Self {
        Self { project, version }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    /// The selected version
    pub fn version(&self) -> &DependencyVersion {
        &self.version
    }

    /// Commit message for this upgrade
    pub fn commit_message(&self) -> String {
        format!("Upgrade to {} {}", self.project.name(), self.version)
    }
}

/// One version offered for a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub version: DependencyVersion,
    /// Modules of the project that do not offer this version
    pub missing_modules: Vec<Module>,
}

/// Ranked candidates of one project
#[derive(Debug, Clone)]
pub struct ProjectCandidates {
    pub project: Project,
    /// Ascending by version
    pub candidates: Vec<Candidate>,
}

/// Compute the upgrade candidates of `project`
///
/// `available` maps each module to the versions its resolver reported;
/// modules without an entry count as offering nothing.
pub fn collect_candidates(
    project: &Project,
    available: &HashMap<Module, BTreeSet<DependencyVersion>>,
    policy: UpgradePolicy,
    prohibited: &ProhibitedVersions,
) -> Vec<Candidate> {
    let current = &project.version().version;
    let empty = BTreeSet::new();

    let per_module: Vec<(&Module, BTreeSet<&DependencyVersion>)> = project
        .modules()
        .iter()
        .map(|module| {
            let versions = available
                .get(module)
                .unwrap_or(&empty)
                .iter()
                .filter(|v| policy.test(v, current))
                .collect();
            (module, versions)
        })
        .collect();

    let union: BTreeSet<&DependencyVersion> = per_module
        .iter()
        .flat_map(|(_, versions)| versions.iter().copied())
        .collect();

    union
        .into_iter()
        .filter(|version| prohibited.is_permitted(project.name().as_str(), version))
        .map(|version| Candidate {
            version: version.clone(),
            missing_modules: per_module
                .iter()
                .filter(|(_, versions)| !versions.contains(version))
                .map(|(module, _)| (*module).clone())
                .collect(),
        })
        .collect()
}

/// Interpret the operator's reply for `candidates`
///
/// An empty reply skips the project; anything else must be a 1-based index
/// into the candidate list.
pub fn parse_selection(
    candidates: &ProjectCandidates,
    input: &str,
) -> Result<Option<Upgrade>, ResolveError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let project = candidates.project.name().to_string();
    let invalid = || ResolveError::InvalidSelection {
        project: project.clone(),
        input: input.to_string(),
    };
    // Digits only; `usize::from_str` would also take a leading '+'
    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let selection: usize = input.parse().map_err(|_| invalid())?;
    let count = candidates.candidates.len();
    if selection == 0 || selection > count {
        return Err(ResolveError::SelectionOutOfRange {
            project,
            selection,
            count,
        });
    }

    Ok(Some(Upgrade::new(
        candidates.project.clone(),
        candidates.candidates[selection - 1].version.clone(),
    )))
}

/// Finds upgrades for the projects of a BOM
pub struct UpgradeResolver {
    resolver: Arc<dyn VersionResolver>,
    policy: UpgradePolicy,
    prohibited: ProhibitedVersions,
    semaphore: Arc<Semaphore>,
}

impl UpgradeResolver {
    pub fn new(
        resolver: Arc<dyn VersionResolver>,
        policy: UpgradePolicy,
        prohibited: ProhibitedVersions,
    ) -> Self {
        Self {
            resolver,
            policy,
            prohibited,
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    /// Limit the number of version lookups in flight
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(concurrency.max(1)));
        self
    }

    /// Look up every module once and compute each project's candidates
    ///
    /// Projects without candidates are left out.
    pub async fn prefetch<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a Project>,
        progress: &Progress,
    ) -> Vec<ProjectCandidates> {
        let projects: Vec<&Project> = projects.into_iter().collect();

        let mut seen = HashSet::new();
        let modules: Vec<&Module> = projects
            .iter()
            .flat_map(|p| p.modules())
            .filter(|m| seen.insert(*m))
            .collect();

        progress.set_length(modules.len() as u64);
        let lookups = modules.iter().map(|module| async move {
            let versions = match self.semaphore.acquire().await {
                Ok(_permit) => self.resolver.resolve_versions(module).await,
                Err(_) => BTreeSet::new(),
            };
            debug!(%module, count = versions.len(), "Fetched versions");
            progress.inc();
            ((*module).clone(), versions)
        });
        let available: HashMap<Module, BTreeSet<DependencyVersion>> =
            join_all(lookups).await.into_iter().collect();

        projects
            .into_iter()
            .filter_map(|project| {
                let candidates =
                    collect_candidates(project, &available, self.policy, &self.prohibited);
                if candidates.is_empty() {
                    debug!(
                        project = %project.name(),
                        kind = project.version().version.kind().name(),
                        "No upgrade candidates"
                    );
                    return None;
                }
                Some(ProjectCandidates {
                    project: project.clone(),
                    candidates,
                })
            })
            .collect()
    }

    /// Ask the operator to pick an upgrade for each project, in order
    pub fn select(
        &self,
        candidates: &[ProjectCandidates],
        prompt: &mut dyn Prompt,
    ) -> Result<Vec<Upgrade>, ResolveError> {
        let mut upgrades = Vec::new();
        for project_candidates in candidates {
            prompt.show(project_candidates)?;
            let input = prompt.read_selection()?;
            match parse_selection(project_candidates, &input)? {
                Some(upgrade) => upgrades.push(upgrade),
                None => debug!(project = %project_candidates.project.name(), "Skipped"),
            }
        }
        Ok(upgrades)
    }

    /// Prefetch candidates and then prompt for each project
    pub async fn resolve<'a>(
        &self,
        projects: impl IntoIterator<Item = &'a Project>,
        prompt: &mut dyn Prompt,
    ) -> Result<Vec<Upgrade>, ResolveError> {
        let candidates = self.prefetch(projects, &Progress::disabled()).await;
        self.select(&candidates, prompt)
    }
}
