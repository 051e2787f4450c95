use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use tramite_crypto::SIGNATURE_ALGORITHM;
use tramite_key::{load_certificate, load_private_key, KeyMaterial};

use crate::{
    canonical::{canonicalize, signing_input, DEFAULT_SIGNATURE_PURPOSE},
    error::{Material, Result, SignError},
    payload::SignaturePayload,
};

/// Everything the user supplies for one signing action
#[derive(Debug, Clone, Default)]
pub struct SigningRequest {
    pub certificate: Option<KeyMaterial>,
    pub private_key: Option<KeyMaterial>,
    /// Only needed for encrypted key files
    pub password: Option<String>,
    pub document: Value,
}

/// Stateless signer; holds only the purpose tag mixed into signed documents
#[derive(Debug, Clone)]
pub struct Signer {
    purpose: String,
}

impl Default for Signer {
    fn default() -> Self {
        Self {
            purpose: DEFAULT_SIGNATURE_PURPOSE.to_string(),
        }
    }
}

impl Signer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_purpose(purpose: impl Into<String>) -> Self {
        Self {
            purpose: purpose.into(),
        }
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Sign `request.document` with the current time.
    pub fn sign(&self, request: &SigningRequest) -> Result<SignaturePayload> {
        self.sign_at(request, Utc::now())
    }

    /// Sign `request.document` as of `signed_at`.
    pub fn sign_at(
        &self,
        request: &SigningRequest,
        signed_at: DateTime<Utc>,
    ) -> Result<SignaturePayload> {
        let certificate = present(request.certificate.as_ref(), Material::Certificate)?;
        let private_key = present(request.private_key.as_ref(), Material::PrivateKey)?;

        debug!(key_file = %private_key.file_name, "loading private key");
        let key = load_private_key(private_key, request.password.as_deref())?;

        debug!(cert_file = %certificate.file_name, "loading certificate");
        let cert = load_certificate(certificate)?;
        if key.to_spki_der()? != cert.spki_der {
            warn!(
                cert_file = %certificate.file_name,
                "certificate public key does not match the private key"
            );
        }

        let timestamp = signed_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let canonical = canonicalize(&signing_input(&request.document, &timestamp, &self.purpose));
        debug!(bytes = canonical.len(), bits = key.size_bits(), "signing canonical document");

        let signature = key.sign(canonical.as_bytes())?;

        Ok(SignaturePayload {
            digital_signature: tramite_crypto::base64::encode(&signature),
            digital_signature_certificate: cert.pem,
            algorithm: key.algorithm().to_string(),
            timestamp,
            certificate_info: cert.info,
        })
    }

    /// Check `payload` against `document` using the certificate it carries.
    pub fn verify(&self, document: &Value, payload: &SignaturePayload) -> Result<bool> {
        if payload.algorithm != SIGNATURE_ALGORITHM {
            return Err(SignError::UnsupportedFormat(format!(
                "signature algorithm {} is not supported",
                payload.algorithm
            )));
        }

        let cert_material = KeyMaterial::new(
            payload.certificate_info.file_name.clone(),
            payload.digital_signature_certificate.as_bytes().to_vec(),
        );
        let cert = load_certificate(&cert_material)?;
        let signature = payload.signature_bytes()?;

        let canonical = canonicalize(&signing_input(document, &payload.timestamp, &self.purpose));
        Ok(tramite_crypto::verify_with_spki_der(
            &cert.spki_der,
            canonical.as_bytes(),
            &signature,
        )?)
    }
}

/// Sign with the default purpose tag and the current time.
pub fn sign_document(request: &SigningRequest) -> Result<SignaturePayload> {
    Signer::default().sign(request)
}

/// Verify with the default purpose tag.
pub fn verify_payload(document: &Value, payload: &SignaturePayload) -> Result<bool> {
    Signer::default().verify(document, payload)
}

fn present(material: Option<&KeyMaterial>, which: Material) -> Result<&KeyMaterial> {
    material
        .filter(|m| !m.is_empty())
        .ok_or(SignError::MissingMaterial(which))
}
