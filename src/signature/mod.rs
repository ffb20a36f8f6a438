//! Signature generation backend integration.
//!
//! Signatures are opaque feature encodings computed by an external backend
//! from a scan file path. The backend call is potentially long-running and
//! may legitimately produce no result; "no result" is a sentinel
//! ([`Option::None`]), not an error. The orchestrators in
//! [`crate::pipeline`] translate the sentinel into `FAIL_TO_GEN_SIGNATURE`.

pub mod client;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use client::{HttpSignatureClient, SignatureClient};
pub use error::SignatureError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockSignatureClient;

use serde::{Deserialize, Serialize};

/// Signature bytes paired with the resolution they were computed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureAndResolution {
    /// Opaque, non-empty feature encoding.
    pub signature: Vec<u8>,
    /// Numeric scan resolution metadata.
    pub resolution: f64,
}
