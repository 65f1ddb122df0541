//! Version resolvers
//!
//! This module provides:
//! - HTTP client shared foundation with retry logic
//! - The `VersionResolver` seam used by the upgrade engine
//! - A resolver backed by Maven repository metadata
//! - Artifact discovery from repository directory listings

mod artifacts;
mod client;
mod maven_metadata;

pub use artifacts::{parse_directory_listing, MavenRepositoryArtifactsFinder};
pub use client::HttpClient;
pub use maven_metadata::{parse_metadata_versions, MavenMetadataVersionResolver, MAVEN_CENTRAL_URL};

use crate::bom::Module;
use crate::version::DependencyVersion;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// Source of the versions available for a module
///
/// Failures are the resolver's concern: a module whose versions cannot be
/// determined yields an empty set.
#[async_trait]
pub trait VersionResolver: Send + Sync {
    /// All known versions of `module`, ordered
    async fn resolve_versions(&self, module: &Module) -> BTreeSet<DependencyVersion>;
}
