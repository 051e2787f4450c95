use std::sync::OnceLock;

use pkcs8::{pkcs5::pbes2, PrivateKeyInfo};
use rcgen::{CertificateParams, DnType, KeyPair, PKCS_RSA_SHA256};
use tramite_crypto::{armor, Rsa};
use tramite_key::KeyMaterial;

pub(crate) const PASSWORD: &str = "12345678a";

/// RSA-2048 key with a matching self-signed certificate
pub(crate) struct Fixture {
    pub rsa: Rsa,
    pub cert_pem: String,
    pub cert_der: Vec<u8>,
}

pub(crate) fn fixture() -> &'static Fixture {
    static FIXTURE: OnceLock<Fixture> = OnceLock::new();
    FIXTURE.get_or_init(|| {
        let rsa = Rsa::generate(2048).unwrap();
        let key_pem = armor("PRIVATE KEY", &rsa.to_pkcs8_der().unwrap());
        let key_pair = KeyPair::from_pkcs8_pem_and_sign_algo(&key_pem, &PKCS_RSA_SHA256).unwrap();

        let mut params = CertificateParams::new(vec!["firma.tramite.example".to_string()]).unwrap();
        params
            .distinguished_name
            .push(DnType::CommonName, "MARIA LOPEZ GARCIA");
        let cert = params.self_signed(&key_pair).unwrap();

        Fixture {
            rsa,
            cert_pem: cert.pem(),
            cert_der: cert.der().to_vec(),
        }
    })
}

impl Fixture {
    pub fn key_pem(&self) -> KeyMaterial {
        let pem = armor("PRIVATE KEY", &self.rsa.to_pkcs8_der().unwrap());
        KeyMaterial::new("llave.pem", pem.into_bytes())
    }

    pub fn key_encrypted_der(&self) -> KeyMaterial {
        let pkcs8 = self.rsa.to_pkcs8_der().unwrap();
        let info = PrivateKeyInfo::try_from(pkcs8.as_slice()).unwrap();
        let salt = [3u8; 16];
        let iv = [5u8; 16];
        let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(2048, &salt, &iv).unwrap();
        let der = info
            .encrypt_with_params(params, PASSWORD)
            .unwrap()
            .as_bytes()
            .to_vec();
        KeyMaterial::new("llave.key", der)
    }

    pub fn cert_pem_material(&self) -> KeyMaterial {
        KeyMaterial::new("certificado.pem", self.cert_pem.clone().into_bytes())
    }

    pub fn cert_der_material(&self) -> KeyMaterial {
        KeyMaterial::new("certificado.cer", self.cert_der.clone())
    }
}
