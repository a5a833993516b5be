//! CLI command implementations

pub mod context;
pub mod merge;
pub mod style;

use anstream::println;
use async_trait::async_trait;
use squash_merge::progress::ProgressCallback;
use style::Stylize;

/// Progress output for interactive runs
pub struct CliProgress;

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_message(&self, message: &str) {
        // Summary blocks start with a "=== ... ===" header line
        if let Some((header, rest)) = message.split_once('\n')
            && header.starts_with("===")
        {
            println!();
            println!("{}", header.emphasis());
            println!("{rest}");
            return;
        }
        println!("{message}");
    }

    async fn on_warning(&self, message: &str) {
        println!("{}", format!("⚠️  {message}").warn());
    }
}
