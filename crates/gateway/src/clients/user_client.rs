//! gRPC client for user-service.

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{CreateUser, UpdateUser, UserResponse};
use proto::user::{
    user_service_client::UserServiceClient as ProtoUserServiceClient, CreateUserRequest,
    DeleteUserRequest, GetUserRequest, UpdateUserRequest, UserAuthRequest,
};

#[cfg(test)]
use mockall::automock;

/// User operations the HTTP handlers depend on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Check credentials; returns the service's success message.
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<String>;

    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse>;

    async fn get_user(&self, id: &str) -> AppResult<UserResponse>;

    async fn update_user(&self, request: UpdateUser) -> AppResult<UserResponse>;

    /// Delete a user; returns the service's success message.
    async fn delete_user(&self, id: &str) -> AppResult<String>;
}

/// gRPC client wrapper for user-service.
pub struct UserClient {
    client: ProtoUserServiceClient<Channel>,
}

impl UserClient {
    /// Connect to user-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to user-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect()
            .await?;
        Ok(Self {
            client: ProtoUserServiceClient::new(channel),
        })
    }
}

#[async_trait]
impl UserApi for UserClient {
    async fn authenticate(&self, username: &str, password: &str) -> AppResult<String> {
        let request = tonic::Request::new(UserAuthRequest {
            username: username.to_string(),
            password: password.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.authenticate(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().message)
    }

    async fn create_user(&self, request: CreateUser) -> AppResult<UserResponse> {
        let request = tonic::Request::new(CreateUserRequest {
            name: request.name,
            password: request.password,
            age: request.age,
            additional_information: request.additional_information,
            parents: request.parents,
        });

        let mut client = self.client.clone();
        let response = client.create_user(request).await.map_err(AppError::from)?;
        Ok(proto_to_user(response.into_inner()))
    }

    async fn get_user(&self, id: &str) -> AppResult<UserResponse> {
        let request = tonic::Request::new(GetUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.get_user(request).await.map_err(AppError::from)?;
        Ok(proto_to_user(response.into_inner()))
    }

    async fn update_user(&self, request: UpdateUser) -> AppResult<UserResponse> {
        let request = tonic::Request::new(UpdateUserRequest {
            id: request.id,
            name: request.name,
            age: request.age,
            additional_information: request.additional_information,
            parents: request.parents,
        });

        let mut client = self.client.clone();
        let response = client.update_user(request).await.map_err(AppError::from)?;
        Ok(proto_to_user(response.into_inner()))
    }

    async fn delete_user(&self, id: &str) -> AppResult<String> {
        let request = tonic::Request::new(DeleteUserRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete_user(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().message)
    }
}

/// Convert proto UserResponse to the HTTP response shape.
fn proto_to_user(proto: proto::user::UserResponse) -> UserResponse {
    UserResponse {
        id: proto.id,
        name: proto.name,
        age: proto.age,
        additional_information: proto.additional_information,
        parents: proto.parents,
    }
}
