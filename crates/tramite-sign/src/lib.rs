//! Client-side document signing
//!
//! Turns a JSON document plus the signer's certificate and private key
//! files into a [`SignaturePayload`]. The private key never leaves the
//! process; only the signature and the certificate are handed back.
//!
//! ```no_run
//! use tramite_key::KeyMaterial;
//! use tramite_sign::{sign_document, SigningRequest};
//!
//! let request = SigningRequest {
//!     certificate: Some(KeyMaterial::from_path("firma.cer").unwrap()),
//!     private_key: Some(KeyMaterial::from_path("firma.key").unwrap()),
//!     password: Some("secret".to_string()),
//!     document: serde_json::json!({ "entity_id": "ent_42" }),
//! };
//! let payload = sign_document(&request).unwrap();
//! println!("{}", payload.to_json().unwrap());
//! ```

pub mod canonical;
pub mod error;
pub mod payload;
pub mod signer;

pub use canonical::{canonicalize, signing_input, DEFAULT_SIGNATURE_PURPOSE};
pub use error::{Locale, Material, Result, SignError};
pub use payload::SignaturePayload;
pub use signer::{sign_document, verify_payload, Signer, SigningRequest};

#[cfg(test)]
pub(crate) mod fixture;
