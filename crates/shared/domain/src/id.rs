//! Opaque identifier generation.

use rand::{rngs::OsRng, RngCore};

use crate::constants::{ID_RANDOM_BYTES, RANDOM_READ_ATTEMPTS};
use crate::error::{DomainError, DomainResult};

/// Generate `<prefix><32 hex chars>` from the OS CSPRNG.
pub fn generate_id(prefix: &str) -> DomainResult<String> {
    generate_id_with(&mut OsRng, prefix)
}

/// Generate an identifier from the given random source.
///
/// A failing read is retried up to [`RANDOM_READ_ATTEMPTS`] times in total;
/// the last error is surfaced as [`DomainError::RandomSource`].
pub fn generate_id_with<R: RngCore + ?Sized>(rng: &mut R, prefix: &str) -> DomainResult<String> {
    let mut buffer = [0u8; ID_RANDOM_BYTES];
    let mut last_error = None;

    for _ in 0..RANDOM_READ_ATTEMPTS {
        match rng.try_fill_bytes(&mut buffer) {
            Ok(()) => return Ok(format!("{}{}", prefix, hex::encode(buffer))),
            Err(e) => last_error = Some(e),
        }
    }

    Err(DomainError::RandomSource(
        last_error.map(|e| e.to_string()).unwrap_or_default(),
    ))
}
