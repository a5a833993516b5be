//! Local squash merge of a pull request
//!
//! 1. Message - assemble the squashed commit message (pure, testable)
//! 2. Execute - fetch, squash, commit and push (effectful)
//! 3. Cleanup - restore HEAD and drop temporary branches (effectful)

mod cleanup;
mod execute;
mod message;

pub use cleanup::BranchCleanup;
pub use execute::{MergeExecutor, MergeTarget, SquashResult};
pub use message::{CommitMessage, rank_authors};
