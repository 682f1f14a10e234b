use std::sync::Arc;

use tokio::sync::watch;

use crate::engine::OperationExecutor;

/// The caller-side context operations are started from and awaited in.
///
/// Clones share cancellation: canceling one cancels every clone.
#[derive(Clone)]
pub struct WorkflowContext {
    executor: Arc<dyn OperationExecutor>,
    canceled: Arc<watch::Sender<bool>>,
}

impl WorkflowContext {
    pub fn new(executor: Arc<dyn OperationExecutor>) -> Self {
        let (canceled, _) = watch::channel(false);
        Self {
            executor,
            canceled: Arc::new(canceled),
        }
    }

    pub fn executor(&self) -> &dyn OperationExecutor {
        self.executor.as_ref()
    }

    /// Makes every pending and future await on this context fail with `CallError::Canceled`.
    /// Operations already started keep running.
    pub fn cancel(&self) {
        self.canceled.send_replace(true);
    }

    pub fn is_canceled(&self) -> bool {
        *self.canceled.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn canceled(&self) {
        let mut rx = self.canceled.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel.
        let _ = rx.wait_for(|canceled| *canceled).await;
    }
}

impl std::fmt::Debug for WorkflowContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowContext")
            .field("canceled", &self.is_canceled())
            .finish_non_exhaustive()
    }
}
