//! Domain-level constants.
//!
//! These constants define business rules and credential parameters.

// =============================================================================
// Identifiers
// =============================================================================

/// Prefix of every user identifier
pub const USER_ID_PREFIX: &str = "USR";

/// Bytes of entropy behind every generated identifier
pub const ID_RANDOM_BYTES: usize = 16;

/// Reads attempted against the OS random source before giving up
pub const RANDOM_READ_ATTEMPTS: usize = 3;

// =============================================================================
// Password hashing (Argon2id)
// =============================================================================

/// Memory cost in KiB (19 MiB)
pub const ARGON2_MEMORY_KIB: u32 = 19 * 1024;

/// Number of passes over memory
pub const ARGON2_ITERATIONS: u32 = 2;

/// Degree of parallelism
pub const ARGON2_PARALLELISM: u32 = 1;

// =============================================================================
// Service messages
// =============================================================================

/// Returned by a successful authentication
pub const USER_AUTHENTICATED_MESSAGE: &str = "User authenticated!";

/// Returned by a successful deletion
pub const USER_DELETED_MESSAGE: &str = "user deleted successfully";
