//! Progress reporting for merge runs

use async_trait::async_trait;

/// Receives human-readable status updates while a run progresses
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// A status line or pre-formatted block for the operator
    async fn on_message(&self, message: &str);

    /// A recoverable problem the operator should know about
    async fn on_warning(&self, message: &str) {
        self.on_message(message).await;
    }
}

/// Progress sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_message(&self, _message: &str) {}
}
