//! Driver error classification.
//!
//! Every driver failure is converted into an [`AppError`] here, so nothing
//! above the store sees `DbErr` or `mongodb::error::Error`.

use mongodb::error::{ErrorKind, WriteFailure};
use sea_orm::{DbErr, SqlErr};

use common::AppError;

/// Unique keys of the relational schema, by the name each driver reports.
static UNIQUE_KEYS: &[(&str, &str)] = &[
    ("users.users_UN", "name"),
    ("users_UN", "name"),
    ("users_name_key", "name"),
    ("users.name", "name"),
];

/// Unique indexes of the users collection.
static UNIQUE_INDEXES: &[(&str, &str)] = &[("name_1", "name")];

/// Server codes reported for a duplicate key on insert or update.
const DUPLICATE_KEY_CODES: [i32; 2] = [11000, 11001];

/// Classify a relational driver error.
pub fn classify_db_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            match violated_key(&message).and_then(|key| lookup(UNIQUE_KEYS, key)) {
                Some(field) => AppError::duplicate_key(field),
                None => AppError::internal(format!("unique violation: {}", message)),
            }
        }
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => AppError::bad_request(message),
        _ => match err {
            DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => AppError::NotFound,
            other => AppError::internal(other.to_string()),
        },
    }
}

/// Classify a document driver error.
pub fn classify_document_error(err: mongodb::error::Error) -> AppError {
    let duplicate = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) if DUPLICATE_KEY_CODES.contains(&e.code) => {
            Some(e.message.clone())
        }
        ErrorKind::Command(e) if DUPLICATE_KEY_CODES.contains(&e.code) => Some(e.message.clone()),
        _ => None,
    };

    if let Some(message) = duplicate {
        return match duplicate_index(&message).and_then(|index| lookup(UNIQUE_INDEXES, index)) {
            Some(field) => AppError::duplicate_key(field),
            None => AppError::internal(format!("duplicate key: {}", message)),
        };
    }

    match err.kind.as_ref() {
        ErrorKind::BsonSerialization(_) | ErrorKind::InvalidArgument { .. } => {
            AppError::bad_request(err.to_string())
        }
        _ => AppError::internal(err.to_string()),
    }
}

/// Name of the violated key in a unique-violation message.
///
/// Understands the MySQL, Postgres and SQLite message formats.
fn violated_key(message: &str) -> Option<&str> {
    if let Some((_, rest)) = message.split_once("for key '") {
        return rest.split('\'').next();
    }
    if let Some((_, rest)) = message.split_once("unique constraint \"") {
        return rest.split('"').next();
    }
    if let Some((_, rest)) = message.split_once("UNIQUE constraint failed: ") {
        return rest.split([',', ' ']).next();
    }
    None
}

/// Name of the index in an `E11000 ... index: <name> dup key` message.
fn duplicate_index(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next()
}

fn lookup(table: &[(&str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, field)| *field)
}
