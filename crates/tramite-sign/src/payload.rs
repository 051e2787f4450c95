use serde::{Deserialize, Serialize};
use tramite_key::CertificateInfo;

use crate::error::{Result, SignError};

/// Result of a signing action, handed to the caller for submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignaturePayload {
    /// Base64 RSA-SHA256 signature over the canonical document
    pub digital_signature: String,
    /// Signer certificate as PEM
    pub digital_signature_certificate: String,
    /// Always "RSA-SHA256"
    pub algorithm: String,
    /// Signing time, RFC 3339 with milliseconds
    pub timestamp: String,
    pub certificate_info: CertificateInfo,
}

impl SignaturePayload {
    /// Decoded signature bytes
    pub fn signature_bytes(&self) -> Result<Vec<u8>> {
        tramite_crypto::base64::decode(&self.digital_signature)
            .map_err(|e| SignError::MalformedStructure(format!("signature is not base64: {e}")))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| SignError::Crypto(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SignError::MalformedStructure(format!("invalid signature payload: {e}")))
    }
}
