//! Squash commit message assembly
//!
//! Pure functions: no git or network access happens here.

use std::collections::BTreeMap;
use std::fmt;

/// Distinct authors, most commits first; ties in alphabetical order
pub fn rank_authors(commit_authors: &[String]) -> Vec<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for author in commit_authors {
        *counts.entry(author.as_str()).or_default() += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    // Stable sort keeps the BTreeMap's alphabetical order among equal counts
    ranked.sort_by(|(_, a), (_, b)| b.cmp(a));
    ranked
        .into_iter()
        .map(|(author, _)| author.to_string())
        .collect()
}

/// Message of the squashed commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// PR title, used as the subject line
    pub title: String,
    /// PR body
    pub body: Option<String>,
    /// Ranked authors, see [`rank_authors`]
    pub authors: Vec<String>,
    /// `Name <email>` of the committer who resolved conflicts, if any
    pub conflict_resolver: Option<String>,
    /// PR number
    pub pr_number: u64,
    /// `<user>/<branch>` the PR came from
    pub repo_desc: String,
    /// One `<hash> [<author>] <subject>` line per squashed commit
    pub commits: Vec<String>,
}

impl CommitMessage {
    /// Author the squashed commit is attributed to
    pub fn primary_author(&self) -> Option<&str> {
        self.authors.first().map(String::as_str)
    }

    /// Trailer GitHub needs to close the PR when the commit reaches the mirror
    pub fn closes_line(&self) -> String {
        format!(
            "Closes #{} from {} and squashes the following commits:",
            self.pr_number, self.repo_desc
        )
    }

    /// Message paragraphs, one per `git commit -m`
    pub fn paragraphs(&self) -> Vec<String> {
        let mut paragraphs = vec![self.title.clone()];

        if let Some(body) = &self.body
            && !body.trim().is_empty()
        {
            paragraphs.push(body.clone());
        }

        paragraphs.push(
            self.authors
                .iter()
                .map(|a| format!("Author: {a}"))
                .collect::<Vec<_>>()
                .join("\n"),
        );

        if let Some(committer) = &self.conflict_resolver {
            paragraphs.push(format!(
                "This patch had conflicts when merged, resolved by\nCommitter: {committer}"
            ));
        }

        paragraphs.push(self.closes_line());

        if !self.commits.is_empty() {
            paragraphs.push(self.commits.join("\n"));
        }

        paragraphs
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.paragraphs().join("\n\n"))
    }
}
