//! Maven repository metadata resolver
//!
//! Reads the versions of a module from `maven-metadata.xml` in one or more
//! Maven repositories:
//! `{repository}/{groupId with '.' replaced by '/'}/{artifactId}/maven-metadata.xml`

use crate::bom::Module;
use crate::error::RegistryError;
use crate::registry::{HttpClient, VersionResolver};
use crate::version::DependencyVersion;
use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Maven Central repository URL
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

static VERSIONS_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<versions>(.*?)</versions>").unwrap());

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version>\s*([^<]*?)\s*</version>").unwrap());

/// Resolves module versions from repository metadata
pub struct MavenMetadataVersionResolver {
    client: HttpClient,
    repositories: Vec<String>,
}

impl MavenMetadataVersionResolver {
    pub fn new(client: HttpClient, repositories: Vec<String>) -> Self {
        let repositories = repositories
            .into_iter()
            .map(|r| r.trim_end_matches('/').to_string())
            .collect();
        Self {
            client,
            repositories,
        }
    }

    /// Build the metadata URL of `module` in `repository`
    fn build_url(repository: &str, module: &Module) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            repository,
            module.group_id.replace('.', "/"),
            module.artifact_id
        )
    }

    /// Fetch the version strings listed for `module` in one repository
    pub async fn fetch_versions(
        &self,
        repository: &str,
        module: &Module,
    ) -> Result<Vec<String>, RegistryError> {
        let url = Self::build_url(repository, module);
        let metadata = self
            .client
            .get_text(&url, &module.to_string(), repository)
            .await?;
        Ok(parse_metadata_versions(&metadata))
    }
}

#[async_trait]
impl VersionResolver for MavenMetadataVersionResolver {
    async fn resolve_versions(&self, module: &Module) -> BTreeSet<DependencyVersion> {
        let results = join_all(
            self.repositories
                .iter()
                .map(|repository| self.fetch_versions(repository, module)),
        )
        .await;

        let mut versions = BTreeSet::new();
        for (repository, result) in self.repositories.iter().zip(results) {
            match result {
                Ok(found) => {
                    debug!(
                        %module,
                        repository = repository.as_str(),
                        count = found.len(),
                        "Resolved versions"
                    );
                    versions.extend(found.iter().map(|v| DependencyVersion::parse(v)));
                }
                Err(e) if e.is_not_found() => {
                    debug!(%module, repository = repository.as_str(), "Module not in repository");
                }
                Err(e) => warn!(
                    %module,
                    repository = repository.as_str(),
                    error = %e,
                    "Failed to resolve versions"
                ),
            }
        }
        versions
    }
}

/// Versions listed under `<versioning><versions>`
pub fn parse_metadata_versions(metadata: &str) -> Vec<String> {
    let Some(block) = VERSIONS_BLOCK_RE.captures(metadata).and_then(|c| c.get(1)) else {
        return Vec::new();
    };
    VERSION_RE
        .captures_iter(block.as_str())
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
