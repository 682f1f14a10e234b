// Code generated by nexus-idl. DO NOT EDIT.

use nexus_idl_runtime as nexus;

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Address {
    /// City name.
    pub city: String,
    /// Street lines.
    pub lines: Vec<String>,
    /// The person living at this address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident: Option<Box<GetPersonResponse>>,
}

/// Request to retrieve a person by their user ID.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetPersonRequest {
    /// The unique identifier of the user.
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// A simple person schema
///
/// Response containing person details.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GetPersonResponse {
    /// The person's postal address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Box<Address>>,
    /// The person's age
    pub age: i64,
    /// The person's email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// The person's identifier
    pub id: String,
    /// The person's name
    pub name: String,
    /// Labels attached to the person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoInputRequest {
    /// The message to send.
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NoInputResponse {
    /// The message to send.
    pub message: String,
}

/// Service for managing users.
pub const USER_SERVICE_SERVICE_NAME: &str = "directory.UserService";

/// Retrieves a user by their ID.
pub const USER_SERVICE_GET_USER_OPERATION_NAME: &str = "Get User";

/// Retrieves a user by their ID.
pub const USER_SERVICE_GET_USER_OPERATION: nexus::OperationRef<GetPersonRequest, GetPersonResponse> =
    nexus::OperationRef::new(USER_SERVICE_GET_USER_OPERATION_NAME);

/// Handler for the directory.UserService service. Methods left unimplemented fail with `HandlerError::Unimplemented`.
#[nexus::async_trait]
pub trait UserServiceHandler: Send + Sync {
    /// Retrieves a user by their ID.
    async fn get_user(&self, ctx: &nexus::OperationContext, input: GetPersonRequest) -> Result<GetPersonResponse, nexus::HandlerError> {
        let _ = (ctx, input);
        Err(nexus::HandlerError::unimplemented(USER_SERVICE_GET_USER_OPERATION_NAME))
    }
}

/// Answers every directory.UserService operation with `HandlerError::Unimplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedUserServiceHandler;

impl UserServiceHandler for UnimplementedUserServiceHandler {}

/// Creates the directory.UserService service with every operation bound to `handler`.
pub fn new_user_service<H: UserServiceHandler + 'static>(handler: H) -> Result<nexus::Service, nexus::RegistrationError> {
    register_user_service(nexus::Service::new(USER_SERVICE_SERVICE_NAME), handler)
}

/// Registers every operation on `service` in declaration order. The first failure is returned and `service` is dropped.
pub fn register_user_service<H: UserServiceHandler + 'static>(mut service: nexus::Service, handler: H) -> Result<nexus::Service, nexus::RegistrationError> {
    let handler = std::sync::Arc::new(handler);
    service.register({
        let handler = std::sync::Arc::clone(&handler);
        USER_SERVICE_GET_USER_OPERATION.handler(move |ctx, input| {
            let handler = std::sync::Arc::clone(&handler);
            async move { handler.get_user(&ctx, input).await }
        })
    })?;
    Ok(service)
}

/// In-workflow client for the directory.UserService service.
#[derive(Debug, Clone)]
pub struct UserServiceWorkflowClient {
    client: nexus::NexusClient,
}

impl UserServiceWorkflowClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: nexus::NexusClient::new(endpoint, USER_SERVICE_SERVICE_NAME) }
    }

    /// Starts the Get User operation and returns without waiting for it.
    pub fn get_user_async(&self, ctx: &nexus::WorkflowContext, input: GetPersonRequest, options: nexus::OperationOptions) -> UserServiceGetUserFuture {
        UserServiceGetUserFuture(self.client.execute_operation(ctx, USER_SERVICE_GET_USER_OPERATION.name(), input, options))
    }

    /// Runs the Get User operation and waits for its result.
    pub async fn get_user(&self, ctx: &nexus::WorkflowContext, input: GetPersonRequest, options: nexus::OperationOptions) -> Result<GetPersonResponse, nexus::CallError> {
        let mut future = self.get_user_async(ctx, input, options);
        future.get_typed(ctx).await
    }
}

/// Pending result of the Get User operation.
#[derive(Debug)]
pub struct UserServiceGetUserFuture(pub nexus::NexusOperationFuture);

impl UserServiceGetUserFuture {
    /// Waits for the operation and returns its output.
    pub async fn get_typed(&mut self, ctx: &nexus::WorkflowContext) -> Result<GetPersonResponse, nexus::CallError> {
        self.0.get(ctx).await
    }
}

/// Sample service for testing one-way operations.
pub const ONE_WAY_SERVICE_SERVICE_NAME: &str = "OneWayService";

pub const ONE_WAY_SERVICE_NO_INPUT_OPERATION_NAME: &str = "noInput";

pub const ONE_WAY_SERVICE_NO_OUTPUT_OPERATION_NAME: &str = "noOutput";

/// Checks that the service is reachable.
pub const ONE_WAY_SERVICE_PING_OPERATION_NAME: &str = "ping";

pub const ONE_WAY_SERVICE_NO_INPUT_OPERATION: nexus::OperationRef<nexus::NoValue, NoInputResponse> =
    nexus::OperationRef::new(ONE_WAY_SERVICE_NO_INPUT_OPERATION_NAME);

pub const ONE_WAY_SERVICE_NO_OUTPUT_OPERATION: nexus::OperationRef<NoInputRequest, nexus::NoValue> =
    nexus::OperationRef::new(ONE_WAY_SERVICE_NO_OUTPUT_OPERATION_NAME);

/// Checks that the service is reachable.
pub const ONE_WAY_SERVICE_PING_OPERATION: nexus::OperationRef<nexus::NoValue, nexus::NoValue> =
    nexus::OperationRef::new(ONE_WAY_SERVICE_PING_OPERATION_NAME);

/// Handler for the OneWayService service. Methods left unimplemented fail with `HandlerError::Unimplemented`.
#[nexus::async_trait]
pub trait OneWayServiceHandler: Send + Sync {
    async fn no_input(&self, ctx: &nexus::OperationContext) -> Result<NoInputResponse, nexus::HandlerError> {
        let _ = ctx;
        Err(nexus::HandlerError::unimplemented(ONE_WAY_SERVICE_NO_INPUT_OPERATION_NAME))
    }

    async fn no_output(&self, ctx: &nexus::OperationContext, input: NoInputRequest) -> Result<(), nexus::HandlerError> {
        let _ = (ctx, input);
        Err(nexus::HandlerError::unimplemented(ONE_WAY_SERVICE_NO_OUTPUT_OPERATION_NAME))
    }

    /// Checks that the service is reachable.
    async fn ping(&self, ctx: &nexus::OperationContext) -> Result<(), nexus::HandlerError> {
        let _ = ctx;
        Err(nexus::HandlerError::unimplemented(ONE_WAY_SERVICE_PING_OPERATION_NAME))
    }
}

/// Answers every OneWayService operation with `HandlerError::Unimplemented`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedOneWayServiceHandler;

impl OneWayServiceHandler for UnimplementedOneWayServiceHandler {}

/// Creates the OneWayService service with every operation bound to `handler`.
pub fn new_one_way_service<H: OneWayServiceHandler + 'static>(handler: H) -> Result<nexus::Service, nexus::RegistrationError> {
    register_one_way_service(nexus::Service::new(ONE_WAY_SERVICE_SERVICE_NAME), handler)
}

/// Registers every operation on `service` in declaration order. The first failure is returned and `service` is dropped.
pub fn register_one_way_service<H: OneWayServiceHandler + 'static>(mut service: nexus::Service, handler: H) -> Result<nexus::Service, nexus::RegistrationError> {
    let handler = std::sync::Arc::new(handler);
    service.register({
        let handler = std::sync::Arc::clone(&handler);
        ONE_WAY_SERVICE_NO_INPUT_OPERATION.handler(move |ctx, _| {
            let handler = std::sync::Arc::clone(&handler);
            async move { handler.no_input(&ctx).await }
        })
    })?;
    service.register({
        let handler = std::sync::Arc::clone(&handler);
        ONE_WAY_SERVICE_NO_OUTPUT_OPERATION.handler(move |ctx, input| {
            let handler = std::sync::Arc::clone(&handler);
            async move { handler.no_output(&ctx, input).await.map(|()| nexus::NoValue) }
        })
    })?;
    service.register({
        let handler = std::sync::Arc::clone(&handler);
        ONE_WAY_SERVICE_PING_OPERATION.handler(move |ctx, _| {
            let handler = std::sync::Arc::clone(&handler);
            async move { handler.ping(&ctx).await.map(|()| nexus::NoValue) }
        })
    })?;
    Ok(service)
}

/// In-workflow client for the OneWayService service.
#[derive(Debug, Clone)]
pub struct OneWayServiceWorkflowClient {
    client: nexus::NexusClient,
}

impl OneWayServiceWorkflowClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { client: nexus::NexusClient::new(endpoint, ONE_WAY_SERVICE_SERVICE_NAME) }
    }

    /// Starts the noInput operation and returns without waiting for it.
    pub fn no_input_async(&self, ctx: &nexus::WorkflowContext, options: nexus::OperationOptions) -> OneWayServiceNoInputFuture {
        OneWayServiceNoInputFuture(self.client.execute_operation(ctx, ONE_WAY_SERVICE_NO_INPUT_OPERATION.name(), nexus::NoValue, options))
    }

    /// Runs the noInput operation and waits for its result.
    pub async fn no_input(&self, ctx: &nexus::WorkflowContext, options: nexus::OperationOptions) -> Result<NoInputResponse, nexus::CallError> {
        let mut future = self.no_input_async(ctx, options);
        future.get_typed(ctx).await
    }

    /// Starts the noOutput operation and returns without waiting for it.
    pub fn no_output_async(&self, ctx: &nexus::WorkflowContext, input: NoInputRequest, options: nexus::OperationOptions) -> OneWayServiceNoOutputFuture {
        OneWayServiceNoOutputFuture(self.client.execute_operation(ctx, ONE_WAY_SERVICE_NO_OUTPUT_OPERATION.name(), input, options))
    }

    /// Runs the noOutput operation and waits for its result.
    pub async fn no_output(&self, ctx: &nexus::WorkflowContext, input: NoInputRequest, options: nexus::OperationOptions) -> Result<(), nexus::CallError> {
        let mut future = self.no_output_async(ctx, input, options);
        future.get_typed(ctx).await
    }

    /// Starts the ping operation and returns without waiting for it.
    pub fn ping_async(&self, ctx: &nexus::WorkflowContext, options: nexus::OperationOptions) -> OneWayServicePingFuture {
        OneWayServicePingFuture(self.client.execute_operation(ctx, ONE_WAY_SERVICE_PING_OPERATION.name(), nexus::NoValue, options))
    }

    /// Runs the ping operation and waits for its result.
    pub async fn ping(&self, ctx: &nexus::WorkflowContext, options: nexus::OperationOptions) -> Result<(), nexus::CallError> {
        let mut future = self.ping_async(ctx, options);
        future.get_typed(ctx).await
    }
}

/// Pending result of the noInput operation.
#[derive(Debug)]
pub struct OneWayServiceNoInputFuture(pub nexus::NexusOperationFuture);

impl OneWayServiceNoInputFuture {
    /// Waits for the operation and returns its output.
    pub async fn get_typed(&mut self, ctx: &nexus::WorkflowContext) -> Result<NoInputResponse, nexus::CallError> {
        self.0.get(ctx).await
    }
}

/// Pending result of the noOutput operation.
#[derive(Debug)]
pub struct OneWayServiceNoOutputFuture(pub nexus::NexusOperationFuture);

impl OneWayServiceNoOutputFuture {
    /// Waits for the operation and reports whether it succeeded.
    pub async fn get_typed(&mut self, ctx: &nexus::WorkflowContext) -> Result<(), nexus::CallError> {
        self.0.wait(ctx).await
    }
}

/// Pending result of the ping operation.
#[derive(Debug)]
pub struct OneWayServicePingFuture(pub nexus::NexusOperationFuture);

impl OneWayServicePingFuture {
    /// Waits for the operation and reports whether it succeeded.
    pub async fn get_typed(&mut self, ctx: &nexus::WorkflowContext) -> Result<(), nexus::CallError> {
        self.0.wait(ctx).await
    }
}
