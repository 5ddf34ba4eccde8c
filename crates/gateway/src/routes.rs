//! Route configuration.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{health_routes, user_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(user_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use mockall::predicate::*;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use common::AppError;
    use domain::{CreateUser, UpdateUser, UserResponse};

    use super::*;
    use crate::clients::MockUserApi;
    use crate::config::GatewayConfig;

    fn app(mock: MockUserApi) -> Router {
        create_router(AppState::new(Arc::new(mock), GatewayConfig::default()))
    }

    fn alice() -> UserResponse {
        UserResponse {
            id: "USR1".to_string(),
            name: "alice".to_string(),
            age: "30".to_string(),
            additional_information: String::new(),
            parents: vec!["Bob".to_string()],
        }
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(MockUserApi::new())
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_authenticate() {
        let mut mock = MockUserApi::new();
        mock.expect_authenticate()
            .with(eq("alice"), eq("secret"))
            .times(1)
            .returning(|_, _| Ok("User authenticated!".to_string()));

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user/auth",
                json!({"name": "alice", "password": "secret"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "User authenticated!");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let mut mock = MockUserApi::new();
        mock.expect_authenticate()
            .returning(|_, _| Err(AppError::WrongPassword));

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user/auth",
                json!({"name": "alice", "password": "nope"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "WRONG_PASSWORD");
        assert_eq!(body["error"]["message"], "wrong password");
    }

    #[tokio::test]
    async fn test_create_user_returns_created() {
        let mut mock = MockUserApi::new();
        mock.expect_create_user()
            .withf(|req: &CreateUser| {
                req.name == "alice" && req.password == "secret" && req.age == "30" && req.parents == vec!["Bob".to_string()]
            })
            .times(1)
            .returning(|_| Ok(alice()));

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user",
                json!({"name": "alice", "password": "secret", "age": "30", "parents": ["Bob"]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["id"], "USR1");
        assert_eq!(body["age"], "30");
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_create_user_duplicate_name_is_bad_request() {
        let mut mock = MockUserApi::new();
        mock.expect_create_user()
            .returning(|_| Err(AppError::duplicate_key("name")));

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user",
                json!({"name": "alice", "password": "secret", "age": "30"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "user name already exists"
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let mut mock = MockUserApi::new();
        mock.expect_create_user().never();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/user")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app(mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_get_user() {
        let mut mock = MockUserApi::new();
        mock.expect_get_user()
            .with(eq("USR1"))
            .times(1)
            .returning(|_| Ok(alice()));

        let response = app(mock)
            .oneshot(empty_request(Method::GET, "/user/USR1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["parents"], json!(["Bob"]));
    }

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let mut mock = MockUserApi::new();
        mock.expect_get_user().returning(|_| Err(AppError::NotFound));

        let response = app(mock)
            .oneshot(empty_request(Method::GET, "/user/USR404"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["message"], "user not found");
    }

    #[tokio::test]
    async fn test_update_user_takes_id_from_path() {
        let mut mock = MockUserApi::new();
        mock.expect_update_user()
            .withf(|req: &UpdateUser| req.id == "USR1" && req.parents == vec!["C".to_string()])
            .times(1)
            .returning(|_| {
                Ok(UserResponse {
                    parents: vec!["C".to_string()],
                    ..alice()
                })
            });

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user/USR1",
                json!({"id": "ignored", "name": "alice", "age": "30", "parents": ["C"]}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["parents"], json!(["C"]));
    }

    #[tokio::test]
    async fn test_update_with_bad_age_is_bad_request() {
        let mut mock = MockUserApi::new();
        mock.expect_update_user()
            .returning(|_| Err(AppError::bad_request("invalid age: invalid digit found in string")));

        let response = app(mock)
            .oneshot(json_request(
                Method::POST,
                "/user/USR1",
                json!({"name": "alice", "age": "thirty"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_user() {
        let mut mock = MockUserApi::new();
        mock.expect_delete_user()
            .with(eq("USR1"))
            .times(1)
            .returning(|_| Ok("user deleted successfully".to_string()));

        let response = app(mock)
            .oneshot(empty_request(Method::DELETE, "/user/USR1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["message"],
            "user deleted successfully"
        );
    }

    #[tokio::test]
    async fn test_unavailable_service_is_503() {
        let mut mock = MockUserApi::new();
        mock.expect_get_user()
            .returning(|_| Err(AppError::service_unavailable("user-service")));

        let response = app(mock)
            .oneshot(empty_request(Method::GET, "/user/USR1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
