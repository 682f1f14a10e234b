use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::context::WorkflowContext;
use crate::engine::OperationOptions;
use crate::error::CallError;
use crate::operation::Payload;
use crate::pending::PendingOperation;

/// Caller-side client bound to one service on one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NexusClient {
    endpoint: String,
    service: String,
}

impl NexusClient {
    pub fn new(endpoint: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            service: service.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Starts `operation` and returns without waiting for it.
    pub fn execute_operation<I: Serialize>(
        &self,
        ctx: &WorkflowContext,
        operation: &str,
        input: I,
        options: OperationOptions,
    ) -> NexusOperationFuture {
        let pending = match serde_json::to_value(input) {
            Ok(value) => {
                let payload = (!value.is_null()).then_some(value);
                ctx.executor()
                    .execute_operation(&self.endpoint, &self.service, operation, payload, options)
            }
            Err(e) => PendingOperation::ready(Uuid::new_v4(), operation, Err(CallError::Encode(e.to_string()))),
        };
        NexusOperationFuture { pending }
    }
}

/// A started operation whose result can be read as a concrete type.
#[derive(Debug)]
pub struct NexusOperationFuture {
    pending: PendingOperation,
}

impl NexusOperationFuture {
    pub fn id(&self) -> Uuid {
        self.pending.id()
    }

    pub fn is_resolved(&self) -> bool {
        self.pending.is_resolved()
    }

    pub async fn get_payload(&mut self, ctx: &WorkflowContext) -> Result<Option<Payload>, CallError> {
        self.pending.get(ctx).await
    }

    /// Waits for the operation and decodes its output.
    pub async fn get<T: DeserializeOwned>(&mut self, ctx: &WorkflowContext) -> Result<T, CallError> {
        let payload = self.pending.get(ctx).await?;
        serde_json::from_value(payload.unwrap_or(Payload::Null)).map_err(|e| CallError::Decode(e.to_string()))
    }

    /// Waits for the operation and reports only whether it succeeded.
    pub async fn wait(&mut self, ctx: &WorkflowContext) -> Result<(), CallError> {
        self.pending.get(ctx).await.map(|_| ())
    }
}
