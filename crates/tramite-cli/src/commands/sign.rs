use std::{
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use tramite_key::KeyMaterial;
use tramite_sign::{Locale, SignaturePayload, Signer, SigningRequest};

use super::{ensure_exists, read_json};
use crate::{error::CliResult, settings::Settings};

#[derive(Debug, Clone)]
pub struct SignArgs {
    pub cert: PathBuf,
    pub key: PathBuf,
    pub password: Option<String>,
    pub document: PathBuf,
    pub output: Option<PathBuf>,
    pub lang: Locale,
}

pub fn handle(args: &SignArgs, settings: &Settings) -> CliResult<PathBuf> {
    println!("{}", format!("Signing {}", args.document.display()).cyan());

    let request = SigningRequest {
        certificate: Some(read_material(&args.cert)?),
        private_key: Some(read_material(&args.key)?),
        password: args.password.clone(),
        document: read_json(&args.document)?,
    };

    let signer = Signer::with_purpose(settings.signer.purpose.clone());
    let payload = match signer.sign(&request) {
        Ok(payload) => payload,
        Err(err) => {
            eprintln!("{} {}", "✗".red(), err.user_message(args.lang).red().bold());
            return Err(err.into());
        }
    };

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output(&args.document));
    fs::write(&output, render(&payload, settings.output.pretty)?)?;

    println!("{} Signature saved to {}", "✓".green(), output.display());
    println!();
    println!("{}", "Signature info:".cyan());
    println!("  Algorithm: {}", payload.algorithm);
    println!("  Timestamp: {}", payload.timestamp);
    println!("  Signer:    {}", payload.certificate_info.subject);

    Ok(output)
}

fn read_material(path: &Path) -> CliResult<KeyMaterial> {
    ensure_exists(path)?;
    Ok(KeyMaterial::from_path(path)?)
}

fn render(payload: &SignaturePayload, pretty: bool) -> CliResult<String> {
    if pretty {
        Ok(payload.to_json()?)
    } else {
        Ok(serde_json::to_string(payload)?)
    }
}

/// `solicitud.json` becomes `solicitud.sig.json` next to it.
fn default_output(document: &Path) -> PathBuf {
    let stem = document
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    document.with_file_name(format!("{stem}.sig.json"))
}
