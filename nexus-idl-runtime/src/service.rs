use std::sync::Arc;

use crate::error::RegistrationError;
use crate::operation::Operation;

/// A named set of operations, in registration order.
pub struct Service {
    name: String,
    operations: Vec<Arc<dyn Operation>>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Adds an operation. Names must be non-empty and unique within the service.
    pub fn register(&mut self, operation: Box<dyn Operation>) -> Result<(), RegistrationError> {
        let name = operation.name();
        if name.is_empty() {
            return Err(RegistrationError::EmptyOperationName {
                service: self.name.clone(),
            });
        }
        if self.operation(name).is_some() {
            return Err(RegistrationError::DuplicateOperation {
                service: self.name.clone(),
                operation: name.to_string(),
            });
        }
        tracing::debug!(service = %self.name, operation = %name, "registered operation");
        self.operations.push(Arc::from(operation));
        Ok(())
    }

    pub fn operation(&self, name: &str) -> Option<&Arc<dyn Operation>> {
        self.operations.iter().find(|op| op.name() == name)
    }

    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|op| op.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name)
            .field("operations", &self.operation_names())
            .finish()
    }
}
