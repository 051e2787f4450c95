use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input the user has to provide before signing
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Certificate,
    PrivateKey,
    Password,
}

/// Language of user-facing messages
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Signing failure
///
/// Every variant is recoverable by re-selecting files or re-entering the
/// password. `Display` carries technical detail for logs;
/// [`SignError::user_message`] is what the user should see.
#[derive(Error, Debug)]
pub enum SignError {
    #[error("Missing required input: {0:?}")]
    MissingMaterial(Material),

    #[error("Unsupported key format: {0}")]
    UnsupportedFormat(String),

    #[error("Incorrect password for encrypted private key")]
    WrongPassword,

    #[error("Malformed key or certificate structure: {0}")]
    MalformedStructure(String),

    #[error("Crypto failure: {0}")]
    Crypto(String),
}

impl SignError {
    /// Localized message for the person signing
    pub fn user_message(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                SignError::MissingMaterial(Material::Certificate) => {
                    "Select your certificate file before signing."
                }
                SignError::MissingMaterial(Material::PrivateKey) => {
                    "Select your private key file before signing."
                }
                SignError::MissingMaterial(Material::Password) => {
                    "Enter the password of your private key before signing."
                }
                SignError::UnsupportedFormat(_) => {
                    "This key file format is not supported. Use the DER .key file issued with \
                     your certificate or an unencrypted PEM key."
                }
                SignError::WrongPassword => "The private key password is incorrect.",
                SignError::MalformedStructure(_) => {
                    "The key or certificate file is damaged or is not a valid key file."
                }
                SignError::Crypto(_) => "The signature could not be created. Please try again.",
            },
            Locale::Es => match self {
                SignError::MissingMaterial(Material::Certificate) => {
                    "Seleccione su archivo de certificado antes de firmar."
                }
                SignError::MissingMaterial(Material::PrivateKey) => {
                    "Seleccione su archivo de clave privada antes de firmar."
                }
                SignError::MissingMaterial(Material::Password) => {
                    "Ingrese la contraseña de su clave privada antes de firmar."
                }
                SignError::UnsupportedFormat(_) => {
                    "El formato del archivo de clave no es compatible. Use el archivo .key en \
                     DER emitido con su certificado o una clave PEM sin cifrar."
                }
                SignError::WrongPassword => "La contraseña de la clave privada es incorrecta.",
                SignError::MalformedStructure(_) => {
                    "El archivo de clave o certificado está dañado o no es un archivo válido."
                }
                SignError::Crypto(_) => "No se pudo generar la firma. Intente de nuevo.",
            },
        }
    }
}

impl From<tramite_key::Error> for SignError {
    fn from(err: tramite_key::Error) -> Self {
        use tramite_key::Error as KeyError;

        match err {
            KeyError::UnsupportedFormat(detail) => SignError::UnsupportedFormat(detail),
            KeyError::WrongPassword => SignError::WrongPassword,
            KeyError::PasswordRequired => SignError::MissingMaterial(Material::Password),
            KeyError::Malformed(detail) | KeyError::CertificateError(detail) => {
                SignError::MalformedStructure(detail)
            }
            KeyError::IoError(e) => SignError::Crypto(e.to_string()),
            KeyError::CryptoError(e) => SignError::Crypto(e.to_string()),
        }
    }
}

impl From<tramite_crypto::Error> for SignError {
    fn from(err: tramite_crypto::Error) -> Self {
        SignError::Crypto(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SignError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_errors() -> Vec<SignError> {
        vec![
            SignError::MissingMaterial(Material::Certificate),
            SignError::MissingMaterial(Material::PrivateKey),
            SignError::MissingMaterial(Material::Password),
            SignError::UnsupportedFormat("x".into()),
            SignError::WrongPassword,
            SignError::MalformedStructure("x".into()),
            SignError::Crypto("x".into()),
        ]
    }

    #[test]
    fn test_messages_are_distinct_per_locale() {
        for locale in [Locale::En, Locale::Es] {
            let messages: Vec<&str> = all_errors().iter().map(|e| e.user_message(locale)).collect();
            for (i, a) in messages.iter().enumerate() {
                for b in &messages[i + 1 ..] {
                    assert_ne!(a, b, "{locale:?}");
                }
            }
        }
    }

    #[test]
    fn test_locales_differ() {
        for err in all_errors() {
            assert_ne!(err.user_message(Locale::En), err.user_message(Locale::Es));
        }
    }

    #[test]
    fn test_key_error_mapping() {
        assert!(matches!(
            SignError::from(tramite_key::Error::PasswordRequired),
            SignError::MissingMaterial(Material::Password)
        ));
        assert!(matches!(
            SignError::from(tramite_key::Error::WrongPassword),
            SignError::WrongPassword
        ));
        assert!(matches!(
            SignError::from(tramite_key::Error::CertificateError("bad".into())),
            SignError::MalformedStructure(_)
        ));
        assert!(matches!(
            SignError::from(tramite_key::Error::UnsupportedFormat("pem".into())),
            SignError::UnsupportedFormat(_)
        ));
    }

    #[test]
    fn test_locale_parsing() {
        assert_eq!("ES".parse::<Locale>().unwrap(), Locale::Es);
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert!("fr".parse::<Locale>().is_err());
    }
}
