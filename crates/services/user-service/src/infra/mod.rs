//! Infrastructure layer - database connections.

mod db;
mod mongo;

pub use db::Database;
pub use mongo::DocumentDatabase;
