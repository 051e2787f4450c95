use thiserror::Error;

/// Error type for key and certificate loading
///
/// The variants keep the three user-correctable failures apart: a format
/// this crate cannot handle, a password that does not open the key, and
/// bytes that are not a key structure at all.
#[derive(Error, Debug)]
pub enum Error {
    /// Encoding or scheme that is recognized but not supported
    #[error("Unsupported key format: {0}")]
    UnsupportedFormat(String),

    /// Decryption failed or produced something that is not a key
    #[error("Incorrect password for encrypted private key")]
    WrongPassword,

    /// Encrypted key given without a password
    #[error("A password is required to open this private key")]
    PasswordRequired,

    /// ASN.1/DER structure could not be parsed
    #[error("Malformed key structure: {0}")]
    Malformed(String),

    /// Certificate could not be parsed
    #[error("Certificate parse error: {0}")]
    CertificateError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Crypto error: {0}")]
    CryptoError(#[from] tramite_crypto::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
