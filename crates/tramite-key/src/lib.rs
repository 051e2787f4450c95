pub mod certificate;
pub mod error;
pub mod key;
pub mod material;

pub use certificate::{load_certificate, CertificateInfo, LoadedCertificate};
pub use error::{Error, Result};
pub use key::{
    inspect_key_material, load_private_key, KeyEncoding, KeyKind, KeyProtection, KeySyntax,
    RsaKey,
};
pub use material::KeyMaterial;
