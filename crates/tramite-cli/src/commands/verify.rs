use std::{fs, path::Path};

use colored::Colorize;
use tramite_sign::{SignaturePayload, Signer};

use super::{ensure_exists, read_json};
use crate::{error::CliResult, settings::Settings};

pub fn handle(document: &Path, signature: &Path, settings: &Settings) -> CliResult<bool> {
    println!("{}", format!("Verifying {}", document.display()).cyan());

    let value = read_json(document)?;
    ensure_exists(signature)?;
    let payload = SignaturePayload::from_json(&fs::read_to_string(signature)?)?;

    let signer = Signer::with_purpose(settings.signer.purpose.clone());
    let is_valid = signer.verify(&value, &payload)?;

    if is_valid {
        println!("{} {}", "✓".green(), "Signature is valid".green().bold());
        println!();
        println!("{}", "Signature details:".cyan());
        println!("  Signed at: {}", payload.timestamp);
        println!("  Signer:    {}", payload.certificate_info.subject);
        println!("  Issuer:    {}", payload.certificate_info.issuer);
        println!("  Serial:    {}", payload.certificate_info.serial_number);
    } else {
        println!("{} {}", "✗".red(), "Signature does not match".red().bold());
    }

    Ok(is_valid)
}
