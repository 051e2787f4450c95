//! # Tramite
//!
//! Field type detection and client-side document signing for citizen
//! service requests.
//!
//! ## Crates
//!
//! - `tramite_field` - semantic display type of untyped field values
//! - `tramite_sign` - RSA-SHA256 signing of canonical JSON documents
//! - `tramite_key` - private key and certificate loading
//! - `tramite_crypto` - RSA, PEM and base64 primitives

pub use tramite_crypto;
pub use tramite_field;
pub use tramite_key;
pub use tramite_sign;

pub use tramite_field::{detect_field_type, detect_fields, DetectedField, FieldType};
pub use tramite_sign::{sign_document, verify_payload, SignError, SignaturePayload, SigningRequest};
