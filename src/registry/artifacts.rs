//! Artifact discovery from Maven repository directory listings
//!
//! A group's artifacts are the subdirectories of
//! `{repository}/{groupId with '.' replaced by '/'}/`. An artifact counts as
//! published at a version when its listing has a `{version}/` entry and the
//! repository holds `{artifactId}-{version}.jar` there.

use crate::error::RegistryError;
use crate::registry::HttpClient;
use futures::future::join_all;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::LazyLock;
use tokio::sync::Semaphore;
use tracing::debug;

/// Default number of artifact directories inspected at once
const DEFAULT_CONCURRENCY: usize = 10;

// Directory entries of an HTML index, e.g. <a href="quartz/" title="quartz/">quartz/</a>
static DIRECTORY_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+href="([^"]*?/)"[^>]*>[^<]*/\s*</a>"#).unwrap());

/// Finds the artifacts of a group published at a given version
pub struct MavenRepositoryArtifactsFinder {
    client: HttpClient,
    repository: String,
    semaphore: Arc<Semaphore>,
}

impl MavenRepositoryArtifactsFinder {
    pub fn new(client: HttpClient, repository: &str) -> Self {
        Self {
            client,
            repository: repository.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(DEFAULT_CONCURRENCY)),
        }
    }

    fn group_url(&self, group: &str) -> String {
        format!("{}/{}/", self.repository, group.replace('.', "/"))
    }

    /// Artifact ids in `group` that publish a jar for `version`, sorted
    pub async fn find(&self, group: &str, version: &str) -> Result<BTreeSet<String>, RegistryError> {
        let group_url = self.group_url(group);
        let artifacts = self.list(&group_url, group).await?;
        debug!(group, count = artifacts.len(), "Listed group");

        let checks = artifacts.iter().map(|artifact| {
            let group_url = &group_url;
            async move {
                let _permit = self.semaphore.acquire().await.ok();
                self.publishes_jar(group_url, group, artifact, version).await
            }
        });

        let mut found = BTreeSet::new();
        for (artifact, result) in artifacts.iter().zip(join_all(checks).await) {
            if result? {
                found.insert(artifact.clone());
            }
        }
        Ok(found)
    }

    async fn publishes_jar(
        &self,
        group_url: &str,
        group: &str,
        artifact: &str,
        version: &str,
    ) -> Result<bool, RegistryError> {
        let package = format!("{}:{}", group, artifact);
        let artifact_url = format!("{}{}/", group_url, artifact);
        let versions = self.list(&artifact_url, &package).await?;
        if !versions.iter().any(|v| v == version) {
            return Ok(false);
        }

        let jar_url = format!("{}{}/{}-{}.jar", artifact_url, version, artifact, version);
        let exists = self.client.exists(&jar_url, &package, &self.repository).await?;
        debug!(artifact = package.as_str(), version, exists, "Checked jar");
        Ok(exists)
    }

    async fn list(&self, url: &str, package: &str) -> Result<Vec<String>, RegistryError> {
        let body = self.client.get_text(url, package, &self.repository).await?;
        Ok(parse_directory_listing(&body))
    }
}

/// Names of the subdirectories linked from an HTML directory index
pub fn parse_directory_listing(html: &str) -> Vec<String> {
    DIRECTORY_LINK_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .filter_map(|href| {
            let name = href.as_str().trim_end_matches('/').rsplit('/').next()?;
            (!name.is_empty() && name != "..").then(|| name.to_string())
        })
        .collect()
}
