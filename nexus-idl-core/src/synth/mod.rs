//! Turns a resolved [`Schema`] into target-agnostic bindings.
//!
//! Every artifact family (constants, descriptors, handler capability, client surface,
//! registration) is a view over the same [`OperationBinding`] records; see [`artifacts`].

pub mod artifacts;
mod ident;

pub use artifacts::{
    ClientCall, ClientSurface, ConstantKind, HandlerCapability, HandlerMethod, NameConstant,
    OperationDescriptor, Registration, RegistrationStep,
};
pub use ident::Ident;
pub(crate) use ident::capitalize;

use crate::model::{Message, MessageRef, Operation, Schema, Service};
use crate::shape::OperationShape;

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaBindings {
    pub services: Vec<ServiceBindings>,
    /// Every declared message, ordered by name.
    pub messages: Vec<MessageBinding>,
    pub java_package: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageBinding {
    pub ident: Ident,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceBindings {
    pub ident: Ident,
    pub wire_name: String,
    pub description: Option<String>,
    pub operations: Vec<OperationBinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OperationBinding {
    pub ident: Ident,
    pub wire_name: String,
    pub description: Option<String>,
    pub shape: OperationShape,
    pub input: TypeSlot,
    pub output: TypeSlot,
}

/// The payload type occupying an operation's input or output position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSlot {
    Message(MessageRef),
    /// The sentinel "no value" marker for an absent input or output.
    NoValue,
}

impl TypeSlot {
    fn from_ref(r: Option<&MessageRef>) -> Self {
        match r {
            Some(r) => Self::Message(r.clone()),
            None => Self::NoValue,
        }
    }

    pub fn message_name(&self) -> Option<&str> {
        match self {
            Self::Message(r) => Some(r.name()),
            Self::NoValue => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Message(_))
    }
}

pub fn synthesize(schema: &Schema) -> SchemaBindings {
    let services = schema.services().iter().map(synthesize_service).collect();
    finish(schema, services)
}

/// Same result as [`synthesize`], with services synthesized on separate threads.
///
/// Services never reference each other, so there is no shared state to coordinate.
pub fn synthesize_parallel(schema: &Schema) -> SchemaBindings {
    let services = std::thread::scope(|scope| {
        let handles = schema
            .services()
            .iter()
            .map(|svc| scope.spawn(move || synthesize_service(svc)))
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });
    finish(schema, services)
}

fn finish(schema: &Schema, services: Vec<ServiceBindings>) -> SchemaBindings {
    let messages = schema
        .messages()
        .map(|m| MessageBinding {
            ident: Ident::new(&m.name),
            message: m.clone(),
        })
        .collect();
    SchemaBindings {
        services,
        messages,
        java_package: schema.java_package().map(str::to_string),
    }
}

pub fn synthesize_service(svc: &Service) -> ServiceBindings {
    let operations = svc.operations().iter().map(synthesize_operation).collect::<Vec<_>>();
    tracing::debug!(
        service = %svc.wire_name,
        operations = operations.len(),
        "synthesized service bindings"
    );
    ServiceBindings {
        ident: Ident::new(&svc.identifier),
        wire_name: svc.wire_name.clone(),
        description: svc.description.clone(),
        operations,
    }
}

fn synthesize_operation(op: &Operation) -> OperationBinding {
    OperationBinding {
        ident: Ident::new(&op.identifier),
        wire_name: op.wire_name.clone(),
        description: op.description.clone(),
        shape: op.shape(),
        input: TypeSlot::from_ref(op.input.as_ref()),
        output: TypeSlot::from_ref(op.output.as_ref()),
    }
}

impl SchemaBindings {
    pub fn message(&self, name: &str) -> Option<&MessageBinding> {
        self.messages.iter().find(|m| m.message.name == name)
    }
}
