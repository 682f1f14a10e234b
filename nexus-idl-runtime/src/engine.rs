use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::{CallError, RegistrationError};
use crate::operation::{Operation, OperationContext, Payload};
use crate::pending::PendingOperation;
use crate::service::Service;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationOptions {
    /// Upper bound on how long the operation may run before the caller sees a timeout.
    pub schedule_to_close_timeout: Option<Duration>,
}

impl OperationOptions {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            schedule_to_close_timeout: Some(timeout),
        }
    }
}

/// Starts operations on behalf of callers.
///
/// `execute_operation` must not block: it starts the operation and hands back a handle.
pub trait OperationExecutor: Send + Sync {
    fn execute_operation(
        &self,
        endpoint: &str,
        service: &str,
        operation: &str,
        input: Option<Payload>,
        options: OperationOptions,
    ) -> PendingOperation;
}

type Endpoints = HashMap<String, HashMap<String, Arc<Service>>>;

/// Hosts services per endpoint and runs each operation on its own tokio task.
#[derive(Default)]
pub struct InMemoryEngine {
    endpoints: RwLock<Endpoints>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `service` reachable on `endpoint`. Fails without side effects if the endpoint
    /// already hosts a service with the same name.
    pub fn register_service(&self, endpoint: &str, service: Service) -> Result<(), RegistrationError> {
        if service.name().is_empty() {
            return Err(RegistrationError::EmptyServiceName);
        }
        let mut endpoints = self.endpoints.write().unwrap_or_else(|p| p.into_inner());
        let services = endpoints.entry(endpoint.to_string()).or_default();
        if services.contains_key(service.name()) {
            return Err(RegistrationError::DuplicateService {
                endpoint: endpoint.to_string(),
                service: service.name().to_string(),
            });
        }
        tracing::info!(
            endpoint,
            service = %service.name(),
            operations = service.len(),
            "service registered"
        );
        services.insert(service.name().to_string(), Arc::new(service));
        Ok(())
    }

    pub fn service_names(&self, endpoint: &str) -> Vec<String> {
        let endpoints = self.endpoints.read().unwrap_or_else(|p| p.into_inner());
        let mut names = endpoints
            .get(endpoint)
            .map(|services| services.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        names.sort();
        names
    }

    fn lookup(&self, endpoint: &str, service: &str, operation: &str) -> Result<Arc<dyn Operation>, CallError> {
        let endpoints = self.endpoints.read().unwrap_or_else(|p| p.into_inner());
        let services = endpoints
            .get(endpoint)
            .ok_or_else(|| CallError::EndpointNotFound(endpoint.to_string()))?;
        let svc = services.get(service).ok_or_else(|| CallError::ServiceNotFound {
            endpoint: endpoint.to_string(),
            service: service.to_string(),
        })?;
        svc.operation(operation)
            .cloned()
            .ok_or_else(|| CallError::OperationNotFound {
                service: service.to_string(),
                operation: operation.to_string(),
            })
    }
}

impl OperationExecutor for InMemoryEngine {
    fn execute_operation(
        &self,
        endpoint: &str,
        service: &str,
        operation: &str,
        input: Option<Payload>,
        options: OperationOptions,
    ) -> PendingOperation {
        let id = Uuid::new_v4();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return PendingOperation::ready(
                id,
                operation,
                Err(CallError::NoRuntime {
                    operation: operation.to_string(),
                }),
            );
        };
        let op = match self.lookup(endpoint, service, operation) {
            Ok(op) => op,
            Err(e) => {
                tracing::warn!(endpoint, service, operation, error = %e, "operation not started");
                return PendingOperation::ready(id, operation, Err(e));
            }
        };

        let ctx = OperationContext {
            service: service.to_string(),
            operation: operation.to_string(),
            request_id: id,
        };
        let name = operation.to_string();
        let (tx, rx) = oneshot::channel();
        runtime.spawn(async move {
            let started = op.start(ctx, input);
            let result = match options.schedule_to_close_timeout {
                Some(after) => match tokio::time::timeout(after, started).await {
                    Ok(result) => result.map_err(CallError::from),
                    Err(_) => Err(CallError::Timeout {
                        operation: name.clone(),
                        after,
                    }),
                },
                None => started.await.map_err(CallError::from),
            };
            if let Err(e) = &result {
                tracing::debug!(operation = %name, %id, error = %e, "operation failed");
            }
            // The caller may have dropped the handle; the result is simply discarded then.
            let _ = tx.send(result);
        });
        tracing::debug!(endpoint, service, operation, %id, "operation started");
        PendingOperation::new(id, operation, rx)
    }
}
