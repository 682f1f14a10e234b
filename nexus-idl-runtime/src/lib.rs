#![forbid(unsafe_code)]

//! Runtime contract for Rust bindings generated by `nexus-idl`.
//!
//! Generated code depends on [`OperationRef`], [`Service`], [`NexusClient`] and the error types
//! here. [`InMemoryEngine`] hosts services in-process so bindings can be exercised without a
//! server.

pub mod client;
pub mod context;
pub mod engine;
pub mod error;
pub mod operation;
pub mod pending;
pub mod service;

pub use async_trait::async_trait;

pub use crate::client::{NexusClient, NexusOperationFuture};
pub use crate::context::WorkflowContext;
pub use crate::engine::{InMemoryEngine, OperationExecutor, OperationOptions};
pub use crate::error::{CallError, HandlerError, RegistrationError};
pub use crate::operation::{NoValue, Operation, OperationContext, OperationRef, Payload};
pub use crate::pending::{OperationResult, PendingOperation};
pub use crate::service::Service;
