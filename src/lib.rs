//! bomr - Interactive upgrade assistant for Maven bills of materials
//!
//! This library provides the core functionality for upgrading the projects
//! managed by a BOM:
//! - Version parsing, ordering and upgrade policies
//! - BOM reading and project extraction
//! - Version lookup in Maven repositories
//! - Interactive selection and application of upgrades
//! - Artifact listings of a group across versions

pub mod artifacts;
pub mod bom;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod upgrade;
pub mod vcs;
pub mod version;
