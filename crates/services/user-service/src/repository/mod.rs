//! Repository layer for data access.
//!
//! One [`UserStore`] contract with a relational ([`SqlUserStore`]) and a
//! document ([`DocumentUserStore`]) implementation.

pub mod classify;
pub mod collection;
mod document_store;
pub mod entities;
mod sql_store;
#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
mod user_store;


pub use collection::{UserCollection, UserDocument, USERS_COLLECTION};
pub use document_store::DocumentUserStore;
pub use sql_store::SqlUserStore;
pub use user_store::UserStore;

#[cfg(any(test, feature = "test-utils"))]
pub use user_store::MockUserStore;
