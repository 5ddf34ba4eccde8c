//! gRPC clients for calling microservices.

mod user_client;

pub use user_client::{UserApi, UserClient};

#[cfg(test)]
pub use user_client::MockUserApi;
