//! Runs the `git` binary as a subprocess

use crate::error::{Error, Result};
use crate::git::GitRunner;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, error};

/// Runs git in a fixed working directory
#[derive(Debug, Clone)]
pub struct SystemGit {
    workdir: PathBuf,
}

impl SystemGit {
    /// Run git commands inside `workdir`
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Working directory commands run in
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitRunner for SystemGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        debug!(%command, workdir = %self.workdir().display(), "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(self.workdir())
            .output()?;

        if !output.status.success() {
            // Keep stdout too: merge conflicts are reported there
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            let captured = captured.trim().to_string();
            error!(%command, output = %captured, status = ?output.status.code(), "git command failed");
            return Err(Error::Git {
                command,
                output: captured,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }
}
