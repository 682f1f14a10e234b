use tokio::sync::oneshot;
use uuid::Uuid;

use crate::context::WorkflowContext;
use crate::error::CallError;
use crate::operation::Payload;

pub type OperationResult = Result<Option<Payload>, CallError>;

enum State {
    Running(oneshot::Receiver<OperationResult>),
    Resolved(OperationResult),
}

/// Handle to a started operation.
///
/// Awaiting it suspends the caller until the operation resolves or the context is canceled.
/// Once resolved the result is kept, and later awaits return a clone of it.
pub struct PendingOperation {
    id: Uuid,
    operation: String,
    state: State,
}

impl PendingOperation {
    pub fn new(id: Uuid, operation: impl Into<String>, rx: oneshot::Receiver<OperationResult>) -> Self {
        Self {
            id,
            operation: operation.into(),
            state: State::Running(rx),
        }
    }

    /// A handle that is already resolved, used for failures detected before starting.
    pub fn ready(id: Uuid, operation: impl Into<String>, result: OperationResult) -> Self {
        Self {
            id,
            operation: operation.into(),
            state: State::Resolved(result),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    pub async fn get(&mut self, ctx: &WorkflowContext) -> OperationResult {
        let rx = match &mut self.state {
            State::Resolved(result) => return result.clone(),
            State::Running(rx) => rx,
        };
        let result = tokio::select! {
            biased;
            received = rx => received.unwrap_or_else(|_| {
                Err(CallError::Abandoned {
                    operation: self.operation.clone(),
                })
            }),
            _ = ctx.canceled() => {
                tracing::debug!(operation = %self.operation, id = %self.id, "await canceled");
                return Err(CallError::Canceled);
            }
        };
        self.state = State::Resolved(result.clone());
        result
    }
}

impl std::fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingOperation")
            .field("id", &self.id)
            .field("operation", &self.operation)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
