//! At-rest protection for stored access tokens.
//!
//! The storage layer only ever sees sealed values. Implementations must be
//! able to `open` anything they `seal`.

use crate::errors::Result;

pub trait CredentialSealer: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<String>;

    fn open(&self, sealed: &str) -> Result<String>;
}

/// Stores tokens as-is. Used when no secret key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextSealer;

impl CredentialSealer for PlaintextSealer {
    fn seal(&self, plaintext: &str) -> Result<String> {
        Ok(plaintext.to_string())
    }

    fn open(&self, sealed: &str) -> Result<String> {
        Ok(sealed.to_string())
    }
}
