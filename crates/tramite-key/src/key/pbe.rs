//! PKCS#12 password based encryption
//!
//! Some issuers protect the DER key with `pbeWithSHAAnd3-KeyTripleDES-CBC`
//! (or the two-key variant) instead of PBES2. The `pkcs5` crate only reads
//! PBES1/PBES2, so these schemes are decrypted here: SHA-1 key derivation
//! per RFC 7292 appendix B, then DES-EDE-CBC with PKCS#7 padding.

use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, KeyIvInit};
use der::{
    asn1::{ObjectIdentifier, OctetString},
    Decode, Encode, Sequence,
};
use des::{TdesEde2, TdesEde3};
use pkcs8::spki::AlgorithmIdentifierOwned;
use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

pub(super) const PBE_SHA1_3DES: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.12.1.3");
pub(super) const PBE_SHA1_2DES: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.113549.1.12.1.4");

const DES_BLOCK: usize = 8;
const SHA1_OUTPUT: usize = 20;
const SHA1_BLOCK: usize = 64;

const KEY_MATERIAL: u8 = 1;
const IV_MATERIAL: u8 = 2;

/// `pkcs-12PbeParams`
#[derive(Clone, Debug, Sequence)]
pub(super) struct PbeParameters {
    pub salt: OctetString,
    pub iterations: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PbeScheme {
    Sha1TripleDes3Key,
    Sha1TripleDes2Key,
}

impl PbeScheme {
    pub fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        if oid == PBE_SHA1_3DES {
            Some(PbeScheme::Sha1TripleDes3Key)
        } else if oid == PBE_SHA1_2DES {
            Some(PbeScheme::Sha1TripleDes2Key)
        } else {
            None
        }
    }

    fn key_len(self) -> usize {
        match self {
            PbeScheme::Sha1TripleDes3Key => 24,
            PbeScheme::Sha1TripleDes2Key => 16,
        }
    }
}

/// Decrypt `ciphertext`, returning the padded-off plaintext.
///
/// A padding failure means the password is wrong.
pub(super) fn decrypt(
    scheme: PbeScheme,
    algorithm: &AlgorithmIdentifierOwned,
    ciphertext: &[u8],
    password: &str,
) -> Result<Vec<u8>> {
    let params = read_parameters(algorithm)?;
    if ciphertext.is_empty() || ciphertext.len() % DES_BLOCK != 0 {
        return Err(Error::Malformed(format!(
            "encrypted key length {} is not a multiple of the DES block size",
            ciphertext.len()
        )));
    }

    let password = bmp_password(password);
    let salt = params.salt.as_bytes();
    let key = derive(&password, salt, KEY_MATERIAL, params.iterations, scheme.key_len());
    let iv = derive(&password, salt, IV_MATERIAL, params.iterations, DES_BLOCK);

    let mut buf = ciphertext.to_vec();
    let plaintext = match scheme {
        PbeScheme::Sha1TripleDes3Key => cbc::Decryptor::<TdesEde3>::new_from_slices(&key, &iv)
            .map_err(|e| Error::Malformed(e.to_string()))?
            .decrypt_padded_mut::<Pkcs7>(&mut buf)
            .map(<[u8]>::to_vec),
        PbeScheme::Sha1TripleDes2Key => cbc::Decryptor::<TdesEde2>::new_from_slices(&key, &iv)
            .map_err(|e| Error::Malformed(e.to_string()))?
            .decrypt_padded_mut::<Pkcs7>(&mut buf)
            .map(<[u8]>::to_vec),
    };
    plaintext.map_err(|_| Error::WrongPassword)
}

fn read_parameters(algorithm: &AlgorithmIdentifierOwned) -> Result<PbeParameters> {
    let any = algorithm
        .parameters
        .as_ref()
        .ok_or_else(|| Error::Malformed("PKCS#12 PBE parameters are missing".to_string()))?;
    let der = any
        .to_der()
        .map_err(|e| Error::Malformed(format!("invalid PKCS#12 PBE parameters: {e}")))?;
    let params = PbeParameters::from_der(&der)
        .map_err(|e| Error::Malformed(format!("invalid PKCS#12 PBE parameters: {e}")))?;
    if params.iterations == 0 {
        return Err(Error::Malformed("PKCS#12 PBE iteration count is zero".to_string()));
    }
    Ok(params)
}

/// UTF-16BE with a terminating NUL, as `BMPString` passwords are fed to the KDF.
fn bmp_password(password: &str) -> Vec<u8> {
    password
        .encode_utf16()
        .chain(std::iter::once(0))
        .flat_map(u16::to_be_bytes)
        .collect()
}

fn fill_blocks(input: &[u8]) -> Vec<u8> {
    if input.is_empty() {
        return Vec::new();
    }
    let len = SHA1_BLOCK * input.len().div_ceil(SHA1_BLOCK);
    input.iter().cycle().take(len).copied().collect()
}

/// RFC 7292 appendix B.2 with SHA-1.
pub(super) fn derive(password: &[u8], salt: &[u8], id: u8, rounds: u32, len: usize) -> Vec<u8> {
    let diversifier = [id; SHA1_BLOCK];
    let mut input = fill_blocks(salt);
    input.extend(fill_blocks(password));

    let mut out = Vec::with_capacity(len);
    loop {
        let mut digest = Sha1::new()
            .chain_update(diversifier)
            .chain_update(&input)
            .finalize();
        for _ in 1..rounds {
            digest = Sha1::digest(digest);
        }

        let take = (len - out.len()).min(SHA1_OUTPUT);
        out.extend_from_slice(&digest[.. take]);
        if out.len() >= len {
            return out;
        }

        // I_j = (I_j + B + 1) mod 2^512 for every 64-byte block of I
        let b: Vec<u8> = digest.iter().cycle().take(SHA1_BLOCK).copied().collect();
        for block in input.chunks_mut(SHA1_BLOCK) {
            let mut carry = 1u16;
            for (byte, add) in block.iter_mut().rev().zip(b.iter().rev()) {
                let sum = u16::from(*byte) + u16::from(*add) + carry;
                *byte = sum as u8;
                carry = sum >> 8;
            }
        }
    }
}
