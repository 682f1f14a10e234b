use std::time::Duration;

/// Failure reported by an operation handler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// Returned by default handler methods for operations the service does not implement.
    #[error("operation `{operation}` is not implemented")]
    Unimplemented { operation: String },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("operation failed: {0}")]
    Failed(String),
}

impl HandlerError {
    pub fn unimplemented(operation: impl Into<String>) -> Self {
        Self::Unimplemented {
            operation: operation.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }

    pub fn is_unimplemented(&self) -> bool {
        matches!(self, Self::Unimplemented { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("service name must not be empty")]
    EmptyServiceName,
    #[error("operation name must not be empty (service `{service}`)")]
    EmptyOperationName { service: String },
    #[error("operation `{operation}` is already registered on service `{service}`")]
    DuplicateOperation { service: String, operation: String },
    #[error("service `{service}` is already registered on endpoint `{endpoint}`")]
    DuplicateService { endpoint: String, service: String },
}

/// Failure observed by a caller awaiting an operation.
///
/// Errors are propagated as-is; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    #[error("endpoint `{0}` not found")]
    EndpointNotFound(String),
    #[error("service `{service}` not found on endpoint `{endpoint}`")]
    ServiceNotFound { endpoint: String, service: String },
    #[error("operation `{operation}` not found on service `{service}`")]
    OperationNotFound { service: String, operation: String },
    #[error(transparent)]
    Handler(#[from] HandlerError),
    #[error("failed to encode input: {0}")]
    Encode(String),
    #[error("failed to decode output: {0}")]
    Decode(String),
    #[error("operation `{operation}` timed out after {after:?}")]
    Timeout { operation: String, after: Duration },
    #[error("operation was canceled")]
    Canceled,
    #[error("no tokio runtime available to start operation `{operation}`")]
    NoRuntime { operation: String },
    #[error("operation `{operation}` terminated without a result")]
    Abandoned { operation: String },
}

impl CallError {
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            Self::Handler(e) => Some(e),
            _ => None,
        }
    }
}
