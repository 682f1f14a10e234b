//! The five artifact families, derived on demand from a [`ServiceBindings`].
//!
//! None of these views store a shape or a type pairing of their own: each borrows the
//! [`OperationBinding`] it was built from, so handler methods, descriptors and client calls
//! cannot disagree about an operation's input and output types.

use crate::shape::OperationShape;
use crate::synth::{Ident, OperationBinding, ServiceBindings, TypeSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantKind {
    Service,
    Operation,
}

/// A wire identifier exposed as a named constant. `value` is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConstant {
    pub kind: ConstantKind,
    pub ident: Ident,
    pub value: String,
    pub doc: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct OperationDescriptor<'a> {
    pub operation: &'a OperationBinding,
    pub service: &'a ServiceBindings,
}

impl<'a> OperationDescriptor<'a> {
    pub fn ident(&self) -> Ident {
        self.service.operation_descriptor_ident(self.operation)
    }

    pub fn name_constant(&self) -> Ident {
        self.service.operation_constant_ident(self.operation)
    }

    pub fn input(&self) -> &'a TypeSlot {
        &self.operation.input
    }

    pub fn output(&self) -> &'a TypeSlot {
        &self.operation.output
    }
}

#[derive(Debug, Clone)]
pub struct HandlerCapability<'a> {
    pub ident: Ident,
    /// The adapter whose every method reports "not implemented".
    pub unimplemented_ident: Ident,
    pub methods: Vec<HandlerMethod<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct HandlerMethod<'a> {
    pub operation: &'a OperationBinding,
    pub descriptor: OperationDescriptor<'a>,
}

impl HandlerMethod<'_> {
    pub fn ident(&self) -> &Ident {
        &self.operation.ident
    }

    pub fn shape(&self) -> OperationShape {
        self.operation.shape
    }
}

#[derive(Debug, Clone)]
pub struct ClientSurface<'a> {
    pub ident: Ident,
    pub calls: Vec<ClientCall<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ClientCall<'a> {
    pub operation: &'a OperationBinding,
    pub descriptor: OperationDescriptor<'a>,
    service: &'a ServiceBindings,
}

impl ClientCall<'_> {
    /// The awaiting entry point; shares the operation's identifier.
    pub fn sync_ident(&self) -> &Ident {
        &self.operation.ident
    }

    pub fn async_ident(&self) -> Ident {
        self.operation.ident.suffixed("Async")
    }

    pub fn future_ident(&self) -> Ident {
        Ident::concat(&[&self.service.ident, &self.operation.ident]).suffixed("Future")
    }

    pub fn takes_input(&self) -> bool {
        self.operation.shape.has_input()
    }

    /// False for no-output shapes, whose typed accessor only signals completion.
    pub fn returns_payload(&self) -> bool {
        self.operation.shape.has_output()
    }
}

#[derive(Debug, Clone)]
pub struct Registration<'a> {
    pub ident: Ident,
    pub service_constant: Ident,
    /// In declaration order; the first failing step aborts construction.
    pub steps: Vec<RegistrationStep<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct RegistrationStep<'a> {
    pub handler_method: HandlerMethod<'a>,
}

impl<'a> RegistrationStep<'a> {
    pub fn operation(&self) -> &'a OperationBinding {
        self.handler_method.operation
    }

    pub fn descriptor(&self) -> OperationDescriptor<'a> {
        self.handler_method.descriptor
    }
}

impl ServiceBindings {
    pub fn service_constant_ident(&self) -> Ident {
        self.ident.suffixed("ServiceName")
    }

    pub fn operation_constant_ident(&self, op: &OperationBinding) -> Ident {
        Ident::concat(&[&self.ident, &op.ident]).suffixed("OperationName")
    }

    pub fn operation_descriptor_ident(&self, op: &OperationBinding) -> Ident {
        Ident::concat(&[&self.ident, &op.ident]).suffixed("Operation")
    }

    pub fn service_constant(&self) -> NameConstant {
        NameConstant {
            kind: ConstantKind::Service,
            ident: self.service_constant_ident(),
            value: self.wire_name.clone(),
            doc: self.description.clone(),
        }
    }

    /// The service constant followed by one constant per operation, in declaration order.
    pub fn name_constants(&self) -> Vec<NameConstant> {
        std::iter::once(self.service_constant())
            .chain(self.operations.iter().map(|op| NameConstant {
                kind: ConstantKind::Operation,
                ident: self.operation_constant_ident(op),
                value: op.wire_name.clone(),
                doc: op.description.clone(),
            }))
            .collect()
    }

    pub fn descriptors(&self) -> Vec<OperationDescriptor<'_>> {
        self.operations
            .iter()
            .map(|operation| OperationDescriptor {
                operation,
                service: self,
            })
            .collect()
    }

    pub fn handler(&self) -> HandlerCapability<'_> {
        let ident = self.ident.suffixed("Handler");
        HandlerCapability {
            unimplemented_ident: ident.prefixed("Unimplemented"),
            ident,
            methods: self
                .descriptors()
                .into_iter()
                .map(|descriptor| HandlerMethod {
                    operation: descriptor.operation,
                    descriptor,
                })
                .collect(),
        }
    }

    pub fn client(&self) -> ClientSurface<'_> {
        ClientSurface {
            ident: self.ident.suffixed("WorkflowClient"),
            calls: self
                .descriptors()
                .into_iter()
                .map(|descriptor| ClientCall {
                    operation: descriptor.operation,
                    descriptor,
                    service: self,
                })
                .collect(),
        }
    }

    pub fn registration(&self) -> Registration<'_> {
        Registration {
            ident: self.ident.prefixed("New"),
            service_constant: self.service_constant_ident(),
            steps: self
                .handler()
                .methods
                .into_iter()
                .map(|handler_method| RegistrationStep { handler_method })
                .collect(),
        }
    }
}
