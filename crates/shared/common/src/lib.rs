//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - The user-facing error taxonomy, convertible to HTTP and gRPC
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
