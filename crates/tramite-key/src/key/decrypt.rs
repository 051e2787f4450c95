//! Encrypted PKCS#8 handling
//!
//! Tax-authority issued `.key` files are DER `EncryptedPrivateKeyInfo`
//! structures protected with PBES2 (PBKDF2 + DES-EDE3-CBC or AES-CBC), or
//! with the older PKCS#12 SHA-1/3DES scheme, which goes through [`super::pbe`].
//! Decryption failures are sorted into wrong password, unsupported scheme
//! and malformed structure.

use der::{asn1::OctetString, Decode, Sequence};
use pkcs8::{pkcs5, spki::AlgorithmIdentifierOwned, EncryptedPrivateKeyInfo, PrivateKeyInfo};
use tracing::debug;
use tramite_crypto::Rsa;

use super::pbe::{self, PbeScheme};
use crate::error::{Error, Result};

/// Shape of `EncryptedPrivateKeyInfo` without interpreting the scheme, used
/// to recognize encrypted keys whose scheme the `pkcs5` crate cannot parse.
#[derive(Clone, Debug, Sequence)]
struct OpaqueEncryptedKey {
    encryption_algorithm: AlgorithmIdentifierOwned,
    encrypted_data: OctetString,
}

pub(super) fn is_encrypted_pkcs8(der: &[u8]) -> bool {
    EncryptedPrivateKeyInfo::try_from(der).is_ok() || OpaqueEncryptedKey::from_der(der).is_ok()
}

/// Decrypt a DER `EncryptedPrivateKeyInfo` and return PKCS#8 DER bytes.
pub(super) fn decrypt_pkcs8(der: &[u8], password: &str) -> Result<Vec<u8>> {
    let info = match EncryptedPrivateKeyInfo::try_from(der) {
        Ok(info) => info,
        Err(e) => {
            let opaque = OpaqueEncryptedKey::from_der(der)
                .map_err(|_| Error::Malformed(format!("invalid encrypted PKCS#8 structure: {e}")))?;
            return decrypt_pkcs12_pbe(&opaque, password);
        }
    };

    let plaintext = info.decrypt(password).map_err(classify_decrypt_error)?;
    rewrap_decrypted(plaintext.as_bytes())
}

// Schemes pkcs5 cannot read: PKCS#12 PBE is decrypted locally, the rest
// (RC2, RC4, vendor OIDs) is unsupported.
fn decrypt_pkcs12_pbe(opaque: &OpaqueEncryptedKey, password: &str) -> Result<Vec<u8>> {
    let oid = opaque.encryption_algorithm.oid;
    let scheme = PbeScheme::from_oid(oid).ok_or_else(|| {
        Error::UnsupportedFormat(format!("key encryption scheme {oid} is not supported"))
    })?;

    debug!(?scheme, "decrypting with PKCS#12 password based encryption");
    let plaintext = pbe::decrypt(
        scheme,
        &opaque.encryption_algorithm,
        opaque.encrypted_data.as_bytes(),
        password,
    )?;
    rewrap_decrypted(&plaintext)
}

/// Convert a PKCS#1 `RSAPrivateKey` into PKCS#8 DER.
pub(super) fn pkcs1_to_pkcs8(der: &[u8]) -> Result<Vec<u8>> {
    let rsa = Rsa::from_pkcs1_der(der)
        .map_err(|e| Error::Malformed(format!("invalid PKCS#1 private key: {e}")))?;
    Ok(rsa.to_pkcs8_der()?)
}

// Decryption yields PKCS#8 for conforming files; some issuers wrap a bare
// PKCS#1 key instead. Anything else means the password produced garbage.
fn rewrap_decrypted(plaintext: &[u8]) -> Result<Vec<u8>> {
    if PrivateKeyInfo::try_from(plaintext).is_ok() {
        return Ok(plaintext.to_vec());
    }
    if ::rsa::pkcs1::RsaPrivateKey::from_der(plaintext).is_ok() {
        debug!("decrypted payload is PKCS#1, re-wrapping as PKCS#8");
        return pkcs1_to_pkcs8(plaintext);
    }
    Err(Error::WrongPassword)
}

fn classify_decrypt_error(err: pkcs8::Error) -> Error {
    match err {
        pkcs8::Error::EncryptedPrivateKey(pkcs5::Error::DecryptFailed) => Error::WrongPassword,
        pkcs8::Error::EncryptedPrivateKey(pkcs5::Error::UnsupportedAlgorithm { oid }) => {
            Error::UnsupportedFormat(format!("key encryption algorithm {oid} is not supported"))
        }
        pkcs8::Error::EncryptedPrivateKey(other) => Error::UnsupportedFormat(other.to_string()),
        // Padding happened to check out but the plaintext is not DER.
        pkcs8::Error::Asn1(_) => Error::WrongPassword,
        other => Error::Malformed(other.to_string()),
    }
}
