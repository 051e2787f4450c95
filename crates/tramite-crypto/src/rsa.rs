use pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey},
    traits::PublicKeyParts,
    Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey,
};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Name of the signature scheme produced by [`Rsa::sign`].
pub const SIGNATURE_ALGORITHM: &str = "RSA-SHA256";

pub struct Rsa {
    pub inner: RsaPrivateKey,
}

impl From<RsaPrivateKey> for Rsa {
    fn from(value: RsaPrivateKey) -> Self {
        Self { inner: value }
    }
}

impl Rsa {
    /// Generate a new RSA key pair with specified bit length
    pub fn generate(bits: usize) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, bits)
            .map_err(|e| Error::Other(format!("Failed to generate RSA key: {}", e)))?;
        Ok(private_key.into())
    }

    /// Import from PKCS8 DER format
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_der(der)?;
        Ok(private_key.into())
    }

    /// Import from PKCS1 `RSAPrivateKey` DER format
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_der(der)?;
        Ok(private_key.into())
    }
}

impl Rsa {
    /// Export private key to PKCS8 DER format
    pub fn to_pkcs8_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_pkcs8_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export private key to PKCS1 DER format
    pub fn to_pkcs1_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_pkcs1_der()?;
        Ok(der.as_bytes().to_vec())
    }

    /// Export public key to SPKI DER format
    pub fn to_spki_der(&self) -> Result<Vec<u8>> {
        let der = self.inner.to_public_key().to_public_key_der()?;
        Ok(der.as_bytes().to_vec())
    }
}

impl Rsa {
    /// Get the public key for this keypair
    pub fn public_key(&self) -> RsaPublicKey {
        self.inner.to_public_key()
    }

    /// Get key size in bits
    pub fn size(&self) -> usize {
        self.inner.size() * 8
    }

    /// Sign data using PKCS#1 v1.5 with SHA-256
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let mut rng = rand::thread_rng();
        let hashed = Sha256::digest(message);
        let signature = self
            .inner
            .sign_with_rng(&mut rng, Pkcs1v15Sign::new::<Sha256>(), &hashed)
            .map_err(|e| Error::Other(format!("RSA signing failed: {}", e)))?;
        Ok(signature)
    }

    /// SPKI SHA-256 fingerprint as lowercase hex
    pub fn spki_sha256_fingerprint_hex(&self) -> Result<String> {
        let spki = self.to_spki_der()?;
        Ok(hex::encode(Sha256::digest(&spki)))
    }
}

/// Verify RSA signature with standard SPKI DER interface
pub fn verify_with_spki_der(spki_der: &[u8], message: &[u8], signature: &[u8]) -> Result<bool> {
    let public_key = public_key_from_spki_der(spki_der)?;

    let hashed = Sha256::digest(message);
    Ok(public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        .is_ok())
}

/// Import public key from SPKI DER format
pub fn public_key_from_spki_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).map_err(Into::into)
}
