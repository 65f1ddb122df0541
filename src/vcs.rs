//! Committing applied upgrades with git
//!
//! This module provides:
//! - The `GitCommitter` seam used after an upgrade is written
//! - `SystemGit`, which shells out to the `git` executable

use crate::error::IoError;
use std::path::Path;
use std::process::{Command, Output};
use tracing::debug;

/// Records a modified BOM in version control
pub trait GitCommitter {
    /// Stage `path` and commit it with `message`
    fn commit(&self, path: &Path, message: &str) -> Result<(), IoError>;
}

/// Committer running `git` in the directory of the BOM
#[derive(Debug, Default)]
pub struct SystemGit;

impl SystemGit {
    pub fn new() -> Self {
        Self
    }

    fn run(&self, args: &[&str], working_dir: &Path) -> Result<Output, IoError> {
        let command = format!("git {}", args.join(" "));
        debug!(command = command.as_str(), dir = %working_dir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(working_dir)
            .output()
            .map_err(|e| IoError::command_failed(&command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(IoError::command_failed(&command, stderr.trim()));
        }
        Ok(output)
    }
}

impl GitCommitter for SystemGit {
    fn commit(&self, path: &Path, message: &str) -> Result<(), IoError> {
        let working_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        self.run(&["add", &file], working_dir)?;
        self.run(&["commit", "-m", message], working_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingGit {
        commits: RefCell<Vec<(String, String)>>,
    }

    impl GitCommitter for RecordingGit {
        fn commit(&self, path: &Path, message: &str) -> Result<(), IoError> {
            self.commits
                .borrow_mut()
                .push((path.display().to_string(), message.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_committer_seam() {
        let git = RecordingGit::default();
        let committer: &dyn GitCommitter = &git;
        committer
            .commit(Path::new("bom/pom.xml"), "Upgrade to Netty 4.1.43.Final")
            .unwrap();

        assert_eq!(
            git.commits.borrow().as_slice(),
            [(
                "bom/pom.xml".to_string(),
                "Upgrade to Netty 4.1.43.Final".to_string()
            )]
        );
    }

    #[test]
    fn test_commit_outside_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        let pom = temp_dir.path().join("pom.xml");
        fs::write(&pom, "<project/>").unwrap();

        let result = SystemGit::new().commit(&pom, "Upgrade to Example 1.1.0");

        assert!(matches!(result, Err(IoError::CommandFailed { .. })));
    }
}
