use chrono::{DateTime, SecondsFormat, Utc};
use const_oid::db::rfc5912::RSA_ENCRYPTION;
use der::{Decode, Encode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use x509_cert::{time::Time, Certificate};

use crate::{
    error::{Error, Result},
    key::KeyEncoding,
    material::KeyMaterial,
};

const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Summary of the signer certificate, stored next to the signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateInfo {
    /// Name of the uploaded certificate file
    pub file_name: String,
    /// Subject distinguished name (RFC 4514)
    pub subject: String,
    /// Issuer distinguished name (RFC 4514)
    pub issuer: String,
    /// Serial number, hex
    pub serial_number: String,
    /// Start of validity, RFC 3339
    pub not_before: String,
    /// End of validity, RFC 3339
    pub not_after: String,
    /// "RSA" or the dotted OID of any other key algorithm
    pub public_key_algorithm: String,
    /// Encoding of the uploaded file
    pub encoding: KeyEncoding,
}

/// Certificate ready to be attached to a signature
#[derive(Debug, Clone)]
pub struct LoadedCertificate {
    /// PEM text; the original text when the upload was already PEM
    pub pem: String,
    /// Subject public key as SPKI DER
    pub spki_der: Vec<u8>,
    pub info: CertificateInfo,
}

/// Load a PEM or DER X.509 certificate.
///
/// DER uploads are re-armored into PEM, PEM uploads pass through
/// unchanged.
pub fn load_certificate(material: &KeyMaterial) -> Result<LoadedCertificate> {
    if material.is_empty() {
        return Err(Error::CertificateError("certificate file is empty".to_string()));
    }

    let (der, pem, encoding) = if material.is_pem() {
        let block = tramite_crypto::dearmor(&material.bytes)
            .map_err(|e| Error::CertificateError(format!("invalid PEM armor: {e}")))?;
        if block.label != CERTIFICATE_LABEL {
            return Err(Error::UnsupportedFormat(format!(
                "PEM block \"{}\" is not a certificate",
                block.label
            )));
        }
        let pem = String::from_utf8_lossy(&material.bytes).into_owned();
        (block.contents, pem, KeyEncoding::Pem)
    } else {
        let pem = tramite_crypto::armor(CERTIFICATE_LABEL, &material.bytes);
        (material.bytes.clone(), pem, KeyEncoding::Der)
    };

    let cert = Certificate::from_der(&der)
        .map_err(|e| Error::CertificateError(format!("Failed to parse DER: {e}")))?;
    let tbs = &cert.tbs_certificate;

    let spki_der = tbs
        .subject_public_key_info
        .to_der()
        .map_err(|e| Error::CertificateError(format!("Failed to encode SPKI: {e}")))?;

    let algorithm_oid = tbs.subject_public_key_info.algorithm.oid;
    let public_key_algorithm = if algorithm_oid == RSA_ENCRYPTION {
        "RSA".to_string()
    } else {
        algorithm_oid.to_string()
    };

    let info = CertificateInfo {
        file_name: material.file_name.clone(),
        subject: tbs.subject.to_string(),
        issuer: tbs.issuer.to_string(),
        serial_number: hex::encode(tbs.serial_number.as_bytes()),
        not_before: format_time(&tbs.validity.not_before)?,
        not_after: format_time(&tbs.validity.not_after)?,
        public_key_algorithm,
        encoding,
    };
    debug!(
        file = %info.file_name,
        subject = %info.subject,
        encoding = ?encoding,
        "loaded certificate"
    );

    Ok(LoadedCertificate {
        pem,
        spki_der,
        info,
    })
}

fn format_time(time: &Time) -> Result<String> {
    let secs = time.to_unix_duration().as_secs();
    let datetime = i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| Error::CertificateError(format!("validity time out of range: {time:?}")))?;
    Ok(datetime.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_signed() -> rcgen::CertifiedKey {
        rcgen::generate_simple_self_signed(vec!["tramite.example".to_string()]).unwrap()
    }

    #[test]
    fn test_pem_certificate_passes_through() {
        let certified = self_signed();
        let pem = certified.cert.pem();
        let material = KeyMaterial::new("cert.pem", pem.clone().into_bytes());

        let loaded = load_certificate(&material).unwrap();
        assert_eq!(loaded.pem, pem);
        assert_eq!(
            tramite_crypto::dearmor(loaded.pem.as_bytes()).unwrap().contents,
            certified.cert.der().to_vec()
        );
        assert_eq!(loaded.info.encoding, KeyEncoding::Pem);
        assert_eq!(loaded.info.file_name, "cert.pem");
        assert!(loaded.info.subject.contains("rcgen self signed cert"));
        assert!(!loaded.info.serial_number.is_empty());
        assert!(loaded.info.not_before.ends_with('Z'));
        assert!(loaded.info.not_before < loaded.info.not_after);
    }

    #[test]
    fn test_der_certificate_is_rearmored() {
        let certified = self_signed();
        let der = certified.cert.der().to_vec();
        let material = KeyMaterial::new("cert.cer", der.clone());

        let loaded = load_certificate(&material).unwrap();
        assert_eq!(loaded.info.encoding, KeyEncoding::Der);
        assert!(loaded.pem.starts_with("-----BEGIN CERTIFICATE-----\n"));
        assert!(loaded.pem.trim_end().ends_with("-----END CERTIFICATE-----"));
        for line in loaded.pem.lines() {
            assert!(line.len() <= 64);
        }

        let block = tramite_crypto::dearmor(loaded.pem.as_bytes()).unwrap();
        assert_eq!(block.contents, der);
    }

    #[test]
    fn test_spki_matches_certificate_key() {
        let certified = self_signed();
        let material = KeyMaterial::new("cert.pem", certified.cert.pem().into_bytes());
        let loaded = load_certificate(&material).unwrap();
        assert_eq!(loaded.spki_der, certified.key_pair.public_key_der());
        assert_ne!(loaded.info.public_key_algorithm, "RSA");
    }

    #[test]
    fn test_rejects_non_certificates() {
        let garbage = KeyMaterial::new("cert.cer", vec![0x30, 0x03, 0x02, 0x01, 0x01]);
        assert!(matches!(
            load_certificate(&garbage),
            Err(Error::CertificateError(_))
        ));

        let key_pem = tramite_crypto::armor("PRIVATE KEY", &[0x30, 0x00]);
        let wrong_label = KeyMaterial::new("key.pem", key_pem.into_bytes());
        assert!(matches!(
            load_certificate(&wrong_label),
            Err(Error::UnsupportedFormat(_))
        ));

        assert!(load_certificate(&KeyMaterial::new("empty", Vec::new())).is_err());
    }
}
