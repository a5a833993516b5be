//! In-memory git runner
//!
//! Tracks local branches created by `fetch` and removed by `branch -D`, so
//! tests can check that a run leaves no temporary branches behind.

use squash_merge::error::{Error, Result};
use squash_merge::git::GitRunner;
use std::sync::Mutex;

/// Full hash `rev-parse` answers with unless scripted otherwise
pub const ORIGINAL_HEAD: &str = "0123456789abcdef0123456789abcdef01234567";

/// Scripted git runner with call recording and failure injection
pub struct FakeGit {
    calls: Mutex<Vec<Vec<String>>>,
    branches: Mutex<Vec<String>>,
    /// (command prefix, stdout)
    outputs: Mutex<Vec<(String, String)>>,
    /// Command prefixes that fail
    failures: Mutex<Vec<String>>,
}

impl FakeGit {
    /// A clone with only `master`
    pub fn new() -> Self {
        Self::with_branches(&["master"])
    }

    /// A clone with the given local branches
    pub fn with_branches(branches: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            branches: Mutex::new(branches.iter().map(ToString::to_string).collect()),
            outputs: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Answer commands starting with `prefix` with `stdout`
    pub fn set_output(&self, prefix: &str, stdout: &str) {
        self.outputs
            .lock()
            .unwrap()
            .push((prefix.to_string(), stdout.to_string()));
    }

    /// Fail commands starting with `prefix`
    pub fn fail_on(&self, prefix: &str) {
        self.failures.lock().unwrap().push(prefix.to_string());
    }

    /// Stop failing commands starting with `prefix`
    pub fn clear_failure(&self, prefix: &str) {
        self.failures.lock().unwrap().retain(|p| p != prefix);
    }

    /// Script the author and commit logs of a PR branch
    pub fn set_pr_log(&self, pr_branch: &str, authors: &[&str], commits: &[&str]) {
        self.set_output(
            &format!("log HEAD..{pr_branch} --pretty=format:%an <%ae>"),
            &authors.join("\n"),
        );
        self.set_output(
            &format!("log HEAD..{pr_branch} --pretty=format:%h [%an] %s"),
            &commits.join("\n"),
        );
    }

    /// Every call, as argument vectors
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Every call, as space-joined command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    /// Whether any call started with `prefix`
    pub fn ran(&self, prefix: &str) -> bool {
        self.command_lines().iter().any(|c| c.starts_with(prefix))
    }

    /// Current local branches
    pub fn branches(&self) -> Vec<String> {
        self.branches.lock().unwrap().clone()
    }

    /// Arguments of the `commit` call, if any
    pub fn commit_args(&self) -> Option<Vec<String>> {
        self.calls().into_iter().find(|c| c.first().is_some_and(|a| a == "commit"))
    }

    fn scripted_output(&self, line: &str) -> Option<String> {
        self.outputs
            .lock()
            .unwrap()
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, out)| out.clone())
    }
}

impl Default for FakeGit {
    fn default() -> Self {
        Self::new()
    }
}

impl GitRunner for FakeGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        let line = args.join(" ");
        self.calls
            .lock()
            .unwrap()
            .push(args.iter().map(ToString::to_string).collect());

        if self
            .failures
            .lock()
            .unwrap()
            .iter()
            .any(|p| line.starts_with(p.as_str()))
        {
            return Err(Error::Git {
                command: line,
                output: "scripted failure".to_string(),
            });
        }

        match args {
            ["fetch", _, refspec] => {
                if let Some((_, dst)) = refspec.split_once(':') {
                    let mut branches = self.branches.lock().unwrap();
                    if !branches.iter().any(|b| b == dst) {
                        branches.push(dst.to_string());
                    }
                }
                Ok(String::new())
            }
            ["branch", "-D", name] => {
                let mut branches = self.branches.lock().unwrap();
                let before = branches.len();
                branches.retain(|b| b != name);
                if branches.len() == before {
                    return Err(Error::Git {
                        command: line,
                        output: format!("error: branch '{name}' not found."),
                    });
                }
                Ok(String::new())
            }
            ["branch", format] if format.starts_with("--format") => {
                Ok(self.branches.lock().unwrap().join("\n"))
            }
            ["rev-parse", _] => {
                Ok(self
                    .scripted_output(&line)
                    .unwrap_or_else(|| ORIGINAL_HEAD.to_string()))
            }
            _ => Ok(self.scripted_output(&line).unwrap_or_default()),
        }
    }
}
