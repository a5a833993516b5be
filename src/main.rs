//! squash-merge CLI

mod cli;

use clap::Parser;
use cli::merge::{MergeOptions, run_merge};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Squash-merge a GitHub pull request into the upstream repository and
/// resolve its JIRA issue
#[derive(Parser, Debug)]
#[command(name = "squash-merge", version, long_about = None)]
struct Cli {
    /// Pull request number (prompted for when omitted)
    pr: Option<u64>,

    /// Path to the local clone
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Remote pointing to the GitHub mirror (overrides PR_REMOTE_NAME)
    #[arg(long)]
    pr_remote: Option<String>,

    /// Remote to push the squashed commit to (overrides PUSH_REMOTE_NAME)
    #[arg(long)]
    push_remote: Option<String>,

    /// GitHub repository name; the JIRA project key is its upper-case form
    #[arg(long)]
    project: Option<String>,

    /// Do not look up or resolve the JIRA issue
    #[arg(long)]
    skip_issue: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = MergeOptions {
        pr_number: cli.pr,
        pr_remote: cli.pr_remote,
        push_remote: cli.push_remote,
        project: cli.project,
        skip_issue: cli.skip_issue,
    };

    match run_merge(&cli.path, options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::style::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
