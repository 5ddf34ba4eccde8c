//! End-to-end gRPC tests over a real socket, backed by the in-memory collection.

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::{server::TcpIncoming, Channel, Server};
use tonic::Code;

use proto::user::{
    CreateUserRequest, DeleteUserRequest, GetUserRequest, UpdateUserRequest, UserAuthRequest,
};
use proto::{UserServiceClient, UserServiceServer};
use user_service_lib::grpc::UserGrpcService;
use user_service_lib::repository::testing::InMemoryUserCollection;
use user_service_lib::repository::DocumentUserStore;
use user_service_lib::service::UserManager;

async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let incoming = TcpIncoming::from_listener(listener, true, None).unwrap();

    let store = Arc::new(DocumentUserStore::new(Arc::new(InMemoryUserCollection::new())));
    let service = UserGrpcService::new(Arc::new(UserManager::new(store)));

    tokio::spawn(
        Server::builder()
            .add_service(UserServiceServer::new(service))
            .serve_with_incoming(incoming),
    );
    addr
}

async fn client() -> UserServiceClient<Channel> {
    let addr = spawn_server().await;
    UserServiceClient::connect(format!("http://{}", addr))
        .await
        .unwrap()
}

fn alice() -> CreateUserRequest {
    CreateUserRequest {
        name: "alice".to_string(),
        password: "secret".to_string(),
        age: "30".to_string(),
        additional_information: String::new(),
        parents: vec!["Bob".to_string(), "Carol".to_string()],
    }
}

#[tokio::test]
async fn test_user_lifecycle() {
    let mut client = client().await;

    let created = client.create_user(alice()).await.unwrap().into_inner();
    assert!(created.id.starts_with("USR"));
    assert_eq!(created.id.len(), 35);
    assert_eq!(created.age, "30");

    let fetched = client
        .get_user(GetUserRequest {
            id: created.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(fetched, created);

    let auth = client
        .authenticate(UserAuthRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(auth.message, "User authenticated!");

    let updated = client
        .update_user(UpdateUserRequest {
            id: created.id.clone(),
            name: "alice".to_string(),
            age: "31".to_string(),
            additional_information: "moved".to_string(),
            parents: vec!["Dave".to_string()],
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(updated.age, "31");
    assert_eq!(updated.parents, vec!["Dave"]);

    let deleted = client
        .delete_user(DeleteUserRequest {
            id: created.id.clone(),
        })
        .await
        .unwrap()
        .into_inner();
    assert_eq!(deleted.message, "user deleted successfully");

    let status = client
        .get_user(GetUserRequest { id: created.id })
        .await
        .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
}

#[tokio::test]
async fn test_wrong_password_is_unauthenticated() {
    let mut client = client().await;
    client.create_user(alice()).await.unwrap();

    let status = client
        .authenticate(UserAuthRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(status.code(), Code::Unauthenticated);
    assert_eq!(status.message(), "wrong password");
}

#[tokio::test]
async fn test_validation_errors_are_invalid_argument() {
    let mut client = client().await;

    let missing_name = client
        .create_user(CreateUserRequest {
            name: String::new(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert_eq!(missing_name.code(), Code::InvalidArgument);
    assert_eq!(missing_name.message(), "missing name");

    let bad_age = client
        .create_user(CreateUserRequest {
            age: "thirty".to_string(),
            ..alice()
        })
        .await
        .unwrap_err();
    assert_eq!(bad_age.code(), Code::InvalidArgument);

    let missing_id = client
        .delete_user(DeleteUserRequest { id: String::new() })
        .await
        .unwrap_err();
    assert_eq!(missing_id.message(), "missing id");
}
