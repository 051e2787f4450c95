//! Tramite Cryptography Library
//!
//! Cryptographic primitives used by the document signer: the RSA-SHA256
//! signature scheme, PEM armor handling and base64 helpers.

pub mod base64;
pub mod error;
pub mod pem;
pub mod rsa;

// Re-export commonly used types for convenience
pub use error::{Error, Result};
pub use self::pem::{armor, dearmor, looks_like_pem, PemBlock};
pub use self::rsa::{public_key_from_spki_der, verify_with_spki_der, Rsa, SIGNATURE_ALGORITHM};
