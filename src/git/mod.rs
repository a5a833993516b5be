//! Git operations used by a merge run
//!
//! All commands go through a [`GitRunner`], so the merge flow can be driven
//! against a real repository ([`SystemGit`]) or a scripted fake in tests.

mod command;

pub use command::SystemGit;

use crate::error::Result;
use crate::types::ExistingMerge;

/// Length of the abbreviated hashes reported to the operator
pub const SHORT_HASH_LEN: usize = 8;

/// Executes a git command and returns its stdout
pub trait GitRunner: Send + Sync {
    /// Run `git <args>`; a nonzero exit is an [`Error::Git`](crate::error::Error::Git)
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// Typed wrapper over a [`GitRunner`]
#[derive(Clone, Copy)]
pub struct Git<'a> {
    runner: &'a dyn GitRunner,
}

impl<'a> Git<'a> {
    /// Wrap a runner
    pub fn new(runner: &'a dyn GitRunner) -> Self {
        Self { runner }
    }

    /// Abbreviated hash of `rev`
    pub fn short_rev(&self, rev: &str) -> Result<String> {
        let full = self.runner.run(&["rev-parse", rev])?;
        Ok(full.trim().chars().take(SHORT_HASH_LEN).collect())
    }

    /// `git fetch <remote> <src>:<dst>`
    pub fn fetch(&self, remote: &str, src: &str, dst: &str) -> Result<()> {
        let refspec = format!("{src}:{dst}");
        self.runner.run(&["fetch", remote, &refspec])?;
        Ok(())
    }

    /// `git checkout <rev>`
    pub fn checkout(&self, rev: &str) -> Result<()> {
        self.runner.run(&["checkout", rev])?;
        Ok(())
    }

    /// Drop a half-finished merge from the index and working tree
    pub fn reset_merge(&self) -> Result<()> {
        self.runner.run(&["reset", "--merge"])?;
        Ok(())
    }

    /// Squash-merge `branch` into the index of the current branch
    pub fn merge_squash(&self, branch: &str) -> Result<()> {
        self.runner.run(&["merge", branch, "--squash"])?;
        Ok(())
    }

    /// `Name <email>` of every commit in `HEAD..branch`, newest first
    pub fn log_authors(&self, branch: &str) -> Result<Vec<String>> {
        self.log_range(branch, "--pretty=format:%an <%ae>")
    }

    /// `<hash> [<author>] <subject>` of every commit in `HEAD..branch`
    pub fn log_commits(&self, branch: &str) -> Result<Vec<String>> {
        self.log_range(branch, "--pretty=format:%h [%an] %s")
    }

    fn log_range(&self, branch: &str, format: &str) -> Result<Vec<String>> {
        let range = format!("HEAD..{branch}");
        let output = self.runner.run(&["log", &range, format])?;
        Ok(output
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Commit the index with `author` and one `-m` per paragraph, skipping hooks
    pub fn commit(&self, author: &str, paragraphs: &[String]) -> Result<()> {
        let author_flag = format!("--author={author}");
        let mut args: Vec<&str> = vec!["commit", "--no-verify", &author_flag];
        for paragraph in paragraphs {
            args.push("-m");
            args.push(paragraph);
        }
        self.runner.run(&args)?;
        Ok(())
    }

    /// `git push <remote> <src>:<dst>`
    pub fn push(&self, remote: &str, src: &str, dst: &str) -> Result<()> {
        let refspec = format!("{src}:{dst}");
        self.runner.run(&["push", remote, &refspec])?;
        Ok(())
    }

    /// `git config --get <key>`
    pub fn config_get(&self, key: &str) -> Result<String> {
        Ok(self.runner.run(&["config", "--get", key])?.trim().to_string())
    }

    /// Names of all local branches
    pub fn local_branches(&self) -> Result<Vec<String>> {
        let output = self
            .runner
            .run(&["branch", "--format=%(refname:short)"])?;
        Ok(output
            .lines()
            .map(|line| line.trim().trim_start_matches("* "))
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect())
    }

    /// Force-delete a local branch
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        self.runner.run(&["branch", "-D", name])?;
        Ok(())
    }

    /// Find the first-parent merge commit that mentions PR `pr_number`
    pub fn find_merge_commit(&self, pr_number: u64) -> Result<Option<ExistingMerge>> {
        let grep = format!("--grep=pull request #{pr_number}");
        let output = self.runner.run(&[
            "log",
            "--merges",
            "--first-parent",
            &grep,
            "--oneline",
        ])?;

        let Some(first) = output.lines().map(str::trim).find(|l| !l.is_empty()) else {
            return Ok(None);
        };

        let (hash, message) = first.split_once(' ').unwrap_or((first, ""));
        Ok(Some(ExistingMerge {
            hash: hash.to_string(),
            message: message.to_string(),
        }))
    }
}
