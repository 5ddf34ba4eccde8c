//! gRPC implementation for UserService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::UserService;
use domain::{CreateUser, UpdateUser, User};
use proto::user::{
    user_service_server::UserService as UserServiceProto, CreateUserRequest, DeleteUserRequest,
    DeleteUserResponse, GetUserRequest, UpdateUserRequest, UserAuthRequest, UserAuthResponse,
    UserResponse,
};

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl UserServiceProto for UserGrpcService {
    async fn authenticate(
        &self,
        request: Request<UserAuthRequest>,
    ) -> Result<Response<UserAuthResponse>, Status> {
        let req = request.into_inner();

        let message = self
            .service
            .authenticate(&req.username, &req.password)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(UserAuthResponse { message }))
    }

    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();
        let create = CreateUser {
            name: req.name,
            password: req.password,
            age: req.age,
            additional_information: req.additional_information,
            parents: req.parents,
        };

        let user = self
            .service
            .create_user(create)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(user_to_proto(user)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();

        let user = self.service.get_user(&req.id).await.map_err(Status::from)?;
        Ok(Response::new(user_to_proto(user)))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let req = request.into_inner();
        let update = UpdateUser {
            id: req.id,
            name: req.name,
            age: req.age,
            additional_information: req.additional_information,
            parents: req.parents,
        };

        let user = self
            .service
            .update_user(update)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(user_to_proto(user)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let req = request.into_inner();

        let message = self
            .service
            .delete_user(&req.id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(DeleteUserResponse { message }))
    }
}

/// Convert domain User to proto UserResponse (no password hash).
fn user_to_proto(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name,
        age: user.age.to_string(),
        additional_information: user.additional_information,
        parents: user.parents,
    }
}
