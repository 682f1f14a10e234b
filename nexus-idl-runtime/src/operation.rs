use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::HandlerError;

/// Untyped operation input or output as it travels between caller and handler.
pub type Payload = serde_json::Value;

/// Stands in for the input or output of an operation that has none. Encodes as `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoValue;

/// What a handler knows about the request it is serving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationContext {
    pub service: String,
    pub operation: String,
    pub request_id: Uuid,
}

/// A registered operation. `start` receives `None` when the caller sent no input and
/// returns `None` when there is no output.
#[async_trait]
pub trait Operation: Send + Sync {
    fn name(&self) -> &str;

    async fn start(
        &self,
        ctx: OperationContext,
        input: Option<Payload>,
    ) -> Result<Option<Payload>, HandlerError>;
}

/// Names an operation and pins its input and output types.
pub struct OperationRef<I, O> {
    name: &'static str,
    _types: PhantomData<fn(I) -> O>,
}

impl<I, O> OperationRef<I, O> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _types: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<I, O> Clone for OperationRef<I, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, O> Copy for OperationRef<I, O> {}

impl<I, O> std::fmt::Debug for OperationRef<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OperationRef").field(&self.name).finish()
    }
}

impl<I, O> OperationRef<I, O>
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
{
    /// Wraps a typed async function as an [`Operation`] registered under this name.
    pub fn handler<F, Fut>(&self, f: F) -> Box<dyn Operation>
    where
        F: Fn(OperationContext, I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
    {
        Box::new(TypedOperation {
            name: self.name,
            f,
            _types: PhantomData,
        })
    }
}

struct TypedOperation<I, O, F> {
    name: &'static str,
    f: F,
    _types: PhantomData<fn(I) -> O>,
}

#[async_trait]
impl<I, O, F, Fut> Operation for TypedOperation<I, O, F>
where
    I: DeserializeOwned + Send + 'static,
    O: Serialize + Send + 'static,
    F: Fn(OperationContext, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<O, HandlerError>> + Send + 'static,
{
    fn name(&self) -> &str {
        self.name
    }

    async fn start(
        &self,
        ctx: OperationContext,
        input: Option<Payload>,
    ) -> Result<Option<Payload>, HandlerError> {
        let input = serde_json::from_value::<I>(input.unwrap_or(Payload::Null))
            .map_err(|e| HandlerError::BadRequest(e.to_string()))?;
        let output = (self.f)(ctx, input).await?;
        let value = serde_json::to_value(output)
            .map_err(|e| HandlerError::failed(format!("failed to encode output: {e}")))?;
        Ok((!value.is_null()).then_some(value))
    }
}
