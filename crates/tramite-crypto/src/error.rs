use thiserror::Error;

/// Error type for the crypto module
#[derive(Error, Debug)]
pub enum Error {
    #[error("PKCS8 error: {0}")]
    Pkcs8Error(#[from] pkcs8::Error),

    #[error("PKCS1 error: {0}")]
    Pkcs1Error(#[from] rsa::pkcs1::Error),

    #[error("SPKI error: {0}")]
    SpkiError(#[from] pkcs8::spki::Error),

    #[error("DER error: {0}")]
    DerError(#[from] pkcs8::der::Error),

    #[error("PEM error: {0}")]
    PemError(#[from] ::pem::PemError),

    #[error("RSA error: {0}")]
    RsaError(#[from] rsa::Error),

    #[error("Base64 decode error: {0}")]
    Base64Error(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
