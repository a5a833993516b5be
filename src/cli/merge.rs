//! Merge command - squash-merge one PR and resolve its issue

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{Stylize, check, hyperlink};
use anstream::println;
use squash_merge::config::Overrides;
use squash_merge::error::Result;
use squash_merge::session::{MergeSession, SessionServices};
use squash_merge::types::MergeOutcome;
use std::path::Path;

/// Options for the merge command
#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// PR to merge; prompted for when `None`
    pub pr_number: Option<u64>,
    /// Override for the GitHub mirror remote
    pub pr_remote: Option<String>,
    /// Override for the push remote
    pub push_remote: Option<String>,
    /// Override for the project name
    pub project: Option<String>,
    /// Leave the JIRA issue alone
    pub skip_issue: bool,
}

/// Run the merge command
#[allow(clippy::future_not_send)]
pub async fn run_merge(path: &Path, options: MergeOptions) -> Result<()> {
    let overrides = Overrides {
        pr_remote: options.pr_remote,
        push_remote: options.push_remote,
        project: options.project,
    };
    let ctx = CommandContext::new(path, overrides, options.skip_issue)?;

    println!(
        "{}",
        format!(
            "Project {} ({} -> {})",
            ctx.config.project, ctx.config.pr_remote, ctx.config.push_remote
        )
        .muted()
    );

    let progress = CliProgress;
    let session = MergeSession::new(
        &ctx.config,
        SessionServices {
            platform: ctx.platform.as_ref(),
            tracker: ctx.tracker.as_deref(),
            git: &ctx.git,
            prompter: &ctx.prompter,
            progress: &progress,
        },
    );

    let outcome = session.run(options.pr_number).await?;

    println!();
    match outcome {
        MergeOutcome::Merged { pr_number, hash } => {
            let url = format!("{}/{pr_number}", ctx.config.github_pull_base());
            println!(
                "{} Merged {} as {}",
                check(),
                hyperlink(&format!("#{pr_number}"), &url).accent(),
                hash.emphasis()
            );
        }
        MergeOutcome::AlreadyMerged(existing) => {
            println!(
                "{} Already merged as {}; nothing pushed",
                check(),
                existing.hash.emphasis()
            );
        }
    }

    Ok(())
}
