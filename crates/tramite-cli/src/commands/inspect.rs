use std::path::Path;

use colored::Colorize;
use tramite_key::{
    inspect_key_material, load_private_key, KeyEncoding, KeyKind, KeyMaterial, KeyProtection,
    KeySyntax,
};

use super::ensure_exists;
use crate::error::CliResult;

pub fn handle(key: &Path) -> CliResult<KeyKind> {
    ensure_exists(key)?;
    let material = KeyMaterial::from_path(key)?;
    let kind = inspect_key_material(&material)?;

    println!("{}", format!("Key file: {}", material.file_name).cyan().bold());
    println!("  Encoding:   {}", encoding_label(kind.encoding));
    println!("  Syntax:     {}", syntax_label(kind.syntax));

    match kind.protection {
        KeyProtection::Plain => {
            println!("  Protection: {}", "none".yellow());
            let rsa = load_private_key(&material, None)?;
            println!("  Algorithm:  {} ({} bits)", rsa.algorithm(), rsa.size_bits());
            println!("  SPKI SHA-256: {}", rsa.fingerprint_hex()?);
        }
        KeyProtection::Encrypted => {
            println!("  Protection: {}", "password".green());
            if kind.encoding == KeyEncoding::Pem {
                println!(
                    "{}",
                    "⚠ Encrypted PEM keys cannot be used for signing; use the DER .key file."
                        .yellow()
                );
            }
        }
    }

    Ok(kind)
}

fn encoding_label(encoding: KeyEncoding) -> &'static str {
    match encoding {
        KeyEncoding::Pem => "PEM",
        KeyEncoding::Der => "DER",
    }
}

fn syntax_label(syntax: KeySyntax) -> &'static str {
    match syntax {
        KeySyntax::Pkcs8 => "PKCS#8 PrivateKeyInfo",
        KeySyntax::Pkcs1 => "PKCS#1 RSAPrivateKey",
        KeySyntax::EncryptedPkcs8 => "PKCS#8 EncryptedPrivateKeyInfo",
        KeySyntax::LegacyEncryptedPem => "PEM with Proc-Type encryption header",
    }
}
