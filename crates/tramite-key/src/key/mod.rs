//! Private key material: format detection and import
//!
//! Key files arrive in one of a handful of shapes. Each one is classified
//! into an explicit `(KeyEncoding, KeySyntax)` pair first, and only then
//! turned into a PKCS#8 `PrivateKeyInfo`, so every combination can be
//! exercised on its own.

mod decrypt;
mod pbe;
mod rsa;

use der::Decode;
use pkcs8::PrivateKeyInfo;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::rsa::RsaKey;
use crate::{
    error::{Error, Result},
    material::KeyMaterial,
};

/// Outer encoding of a key or certificate file
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    Pem,
    Der,
}

/// Whether the key must be decrypted before use
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyProtection {
    Plain,
    Encrypted,
}

/// ASN.1 structure carried inside the file
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySyntax {
    /// PKCS#8 `PrivateKeyInfo`
    Pkcs8,
    /// PKCS#1 `RSAPrivateKey`
    Pkcs1,
    /// PKCS#8 `EncryptedPrivateKeyInfo`
    EncryptedPkcs8,
    /// `RSA PRIVATE KEY` PEM with a `Proc-Type: 4,ENCRYPTED` header
    LegacyEncryptedPem,
}

impl KeySyntax {
    pub fn protection(self) -> KeyProtection {
        match self {
            KeySyntax::Pkcs8 | KeySyntax::Pkcs1 => KeyProtection::Plain,
            KeySyntax::EncryptedPkcs8 | KeySyntax::LegacyEncryptedPem => KeyProtection::Encrypted,
        }
    }
}

/// Classification of a key file
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct KeyKind {
    pub encoding: KeyEncoding,
    pub protection: KeyProtection,
    pub syntax: KeySyntax,
}

impl KeyKind {
    fn new(encoding: KeyEncoding, syntax: KeySyntax) -> Self {
        Self {
            encoding,
            protection: syntax.protection(),
            syntax,
        }
    }
}

struct DecodedKey {
    kind: KeyKind,
    der: Vec<u8>,
}

/// Report how a key file is encoded and protected without decrypting it.
pub fn inspect_key_material(material: &KeyMaterial) -> Result<KeyKind> {
    decode(material).map(|decoded| decoded.kind)
}

/// Load an RSA signing key from user supplied key material.
///
/// Plain PKCS#8 and PKCS#1 keys are accepted in PEM or DER. Encrypted
/// PKCS#8 is accepted only as DER and needs `password`. Encrypted PEM of
/// either flavor is rejected as unsupported.
pub fn load_private_key(material: &KeyMaterial, password: Option<&str>) -> Result<RsaKey> {
    let decoded = decode(material)?;
    let kind = decoded.kind;
    debug!(
        file = %material.file_name,
        encoding = ?kind.encoding,
        protection = ?kind.protection,
        syntax = ?kind.syntax,
        "classified private key material"
    );

    let pkcs8_der = match (kind.encoding, kind.syntax) {
        (_, KeySyntax::Pkcs8) => decoded.der,
        (_, KeySyntax::Pkcs1) => decrypt::pkcs1_to_pkcs8(&decoded.der)?,
        (KeyEncoding::Pem, KeySyntax::EncryptedPkcs8) | (_, KeySyntax::LegacyEncryptedPem) => {
            return Err(Error::UnsupportedFormat(
                "encrypted PEM private keys are not supported, use the DER key file".to_string(),
            ));
        }
        (KeyEncoding::Der, KeySyntax::EncryptedPkcs8) => {
            let password = password
                .filter(|p| !p.is_empty())
                .ok_or(Error::PasswordRequired)?;
            decrypt::decrypt_pkcs8(&decoded.der, password)?
        }
    };

    RsaKey::from_pkcs8_der(&pkcs8_der)
}

fn decode(material: &KeyMaterial) -> Result<DecodedKey> {
    if material.is_empty() {
        return Err(Error::Malformed("key file is empty".to_string()));
    }

    if material.is_pem() {
        decode_pem(&material.bytes)
    } else {
        let syntax = classify_der(&material.bytes)?;
        Ok(DecodedKey {
            kind: KeyKind::new(KeyEncoding::Der, syntax),
            der: material.bytes.clone(),
        })
    }
}

fn decode_pem(bytes: &[u8]) -> Result<DecodedKey> {
    let block = tramite_crypto::dearmor(bytes)
        .map_err(|e| Error::Malformed(format!("invalid PEM armor: {e}")))?;

    let syntax = match block.label.as_str() {
        "PRIVATE KEY" => KeySyntax::Pkcs8,
        "RSA PRIVATE KEY" if block.legacy_encrypted => KeySyntax::LegacyEncryptedPem,
        "RSA PRIVATE KEY" => KeySyntax::Pkcs1,
        "ENCRYPTED PRIVATE KEY" => KeySyntax::EncryptedPkcs8,
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "PEM block \"{other}\" is not a private key"
            )));
        }
    };

    Ok(DecodedKey {
        kind: KeyKind::new(KeyEncoding::Pem, syntax),
        der: block.contents,
    })
}

fn classify_der(der: &[u8]) -> Result<KeySyntax> {
    if PrivateKeyInfo::try_from(der).is_ok() {
        return Ok(KeySyntax::Pkcs8);
    }
    if decrypt::is_encrypted_pkcs8(der) {
        return Ok(KeySyntax::EncryptedPkcs8);
    }
    if ::rsa::pkcs1::RsaPrivateKey::from_der(der).is_ok() {
        return Ok(KeySyntax::Pkcs1);
    }
    Err(Error::Malformed(
        "not a PKCS#8, encrypted PKCS#8 or PKCS#1 private key".to_string(),
    ))
}
