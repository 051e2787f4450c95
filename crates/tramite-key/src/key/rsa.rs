use const_oid::db::rfc5912::RSA_ENCRYPTION;
use pkcs8::PrivateKeyInfo;
use tramite_crypto::{Rsa, SIGNATURE_ALGORITHM};

use crate::error::{Error, Result};

// ============================================================================
// Core Key Structure
// ============================================================================

/// RSA signing key recovered from user key material
///
/// Signatures are RSASSA-PKCS1-v1_5 over SHA-256.
///
/// # Examples
///
/// ```no_run
/// use tramite_key::{load_private_key, KeyMaterial};
///
/// let material = KeyMaterial::from_path("firma.key").unwrap();
/// let key = load_private_key(&material, Some("password")).unwrap();
/// let signature = key.sign(b"Hello, World!").unwrap();
/// ```
pub struct RsaKey {
    inner: Rsa,
}

impl std::fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaKey")
            .field("size_bits", &self.size_bits())
            .finish_non_exhaustive()
    }
}

impl From<Rsa> for RsaKey {
    fn from(inner: Rsa) -> Self {
        Self { inner }
    }
}

impl RsaKey {
    /// Import from PKCS8 DER, rejecting non-RSA algorithms
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let info = PrivateKeyInfo::try_from(der)
            .map_err(|e| Error::Malformed(format!("Failed to parse PKCS#8: {e}")))?;

        let oid = info.algorithm.oid;
        if oid != RSA_ENCRYPTION {
            return Err(Error::UnsupportedFormat(format!(
                "key algorithm {oid} is not RSA"
            )));
        }

        let inner = Rsa::from_pkcs8_der(der)
            .map_err(|e| Error::Malformed(format!("RSA PKCS8 DER import failed: {e}")))?;
        Ok(Self { inner })
    }

    /// Get RSA key size in bits
    pub fn size_bits(&self) -> usize {
        self.inner.size()
    }

    /// Name of the signature algorithm, "RSA-SHA256"
    pub fn algorithm(&self) -> &'static str {
        SIGNATURE_ALGORITHM
    }

    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        Ok(self.inner.sign(message)?)
    }

    /// Public key as SPKI DER
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        Ok(self.inner.to_spki_der()?)
    }

    pub fn fingerprint_hex(&self) -> Result<String> {
        Ok(self.inner.spki_sha256_fingerprint_hex()?)
    }
}

#[cfg(test)]
mod tests {
    use const_oid::db::rfc8410::ID_ED_25519;
    use der::{asn1::OctetString, Encode};
    use pkcs8::spki::AlgorithmIdentifierRef;

    use super::*;
    use crate::key::tests::test_rsa;

    #[test]
    fn test_import_and_sign() {
        let key = RsaKey::from_pkcs8_der(&test_rsa().to_pkcs8_der().unwrap()).unwrap();
        assert_eq!(key.size_bits(), 1024);
        assert_eq!(key.algorithm(), "RSA-SHA256");

        let signature = key.sign(b"Hello, RSA World!").unwrap();
        assert_eq!(signature.len(), 128);

        let spki = key.to_spki_der().unwrap();
        assert!(tramite_crypto::verify_with_spki_der(&spki, b"Hello, RSA World!", &signature).unwrap());
    }

    #[test]
    fn test_non_rsa_key_is_unsupported() {
        let seed = OctetString::new(vec![1u8; 32]).unwrap().to_der().unwrap();
        let info = PrivateKeyInfo::new(
            AlgorithmIdentifierRef {
                oid: ID_ED_25519,
                parameters: None,
            },
            &seed,
        );
        let der = info.to_der().unwrap();

        assert!(matches!(
            RsaKey::from_pkcs8_der(&der),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_fingerprint_matches_crypto_layer() {
        let key = RsaKey::from(Rsa::from_pkcs8_der(&test_rsa().to_pkcs8_der().unwrap()).unwrap());
        assert_eq!(
            key.fingerprint_hex().unwrap(),
            test_rsa().spki_sha256_fingerprint_hex().unwrap()
        );
    }
}
