//! SeaORM entities for the relational user store.

pub mod parent;
pub mod user;
