//! Throwaway git repositories for end-to-end tests
//!
//! Lays out an `upstream.git` bare repository that stands in for both the
//! GitHub mirror and the push target, and an `arrow` clone with the two
//! remotes pointing at it.

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A bare upstream plus a working clone
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Create upstream with one commit on `master`
    pub fn new() -> Self {
        let repo = Self {
            dir: TempDir::new().expect("create temp dir"),
        };

        let upstream = repo.upstream();
        git(repo.dir.path(), &["init", "--bare", "upstream.git"]);
        git(&upstream, &["symbolic-ref", "HEAD", "refs/heads/master"]);

        let seed = repo.seed();
        git(repo.dir.path(), &["init", "seed"]);
        git(&seed, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        set_identity(&seed, "Maintainer", "maintainer@example.com");
        std::fs::write(seed.join("README.md"), "arrow\n").expect("write README");
        git(&seed, &["add", "README.md"]);
        git(&seed, &["commit", "-m", "Initial commit"]);
        git(&seed, &["remote", "add", "origin", &path_str(&upstream)]);
        git(&seed, &["push", "origin", "master"]);

        repo
    }

    /// Publish a PR head under `refs/pull/<n>/head`
    ///
    /// `commits` are (author name, author email, file name) triples, each
    /// adding one file on top of `master`.
    pub fn publish_pr(&self, number: u64, commits: &[(&str, &str, &str)]) {
        let seed = self.seed();
        git(&seed, &["checkout", "-b", &format!("pr-{number}"), "master"]);
        for (name, email, file) in commits {
            std::fs::write(seed.join(file), format!("{file}\n")).expect("write file");
            git(&seed, &["add", file]);
            git(
                &seed,
                &[
                    "-c",
                    &format!("user.name={name}"),
                    "-c",
                    &format!("user.email={email}"),
                    "commit",
                    "-m",
                    &format!("Add {file}"),
                ],
            );
        }
        git(
            &seed,
            &[
                "push",
                "origin",
                &format!("pr-{number}:refs/pull/{number}/head"),
            ],
        );
        git(&seed, &["checkout", "master"]);
    }

    /// Clone upstream as `arrow` with `apache-github` and `apache` remotes
    pub fn clone_workspace(&self) -> PathBuf {
        let upstream = path_str(&self.upstream());
        git(self.dir.path(), &["clone", &upstream, "arrow"]);
        let work = self.workspace();
        set_identity(&work, "Committer", "committer@example.com");
        git(&work, &["remote", "add", "apache-github", &upstream]);
        git(&work, &["remote", "add", "apache", &upstream]);
        work
    }

    /// Path of the working clone
    pub fn workspace(&self) -> PathBuf {
        self.dir.path().join("arrow")
    }

    /// Path of the bare upstream
    pub fn upstream(&self) -> PathBuf {
        self.dir.path().join("upstream.git")
    }

    /// Root of the temp dir
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    fn seed(&self) -> PathBuf {
        self.dir.path().join("seed")
    }
}

impl Default for TempGitRepo {
    fn default() -> Self {
        Self::new()
    }
}

/// Run git in `dir`, panicking with its stderr on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("spawn git");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn set_identity(dir: &Path, name: &str, email: &str) {
    git(dir, &["config", "user.name", name]);
    git(dir, &["config", "user.email", email]);
    git(dir, &["config", "commit.gpgsign", "false"]);
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
