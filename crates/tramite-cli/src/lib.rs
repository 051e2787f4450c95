//! Tramite command line tool

pub mod commands;
pub mod error;
pub mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use settings::Settings;
use tramite_sign::Locale;

#[derive(Parser, Debug)]
#[command(name = "tramite")]
#[command(about = "Field type detection and document signing for citizen service requests")]
#[command(version)]
pub struct Cli {
    /// TOML settings file (defaults to ./tramite.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify the fields of a JSON entity
    Detect {
        /// JSON file with the entity payload
        #[arg(short, long)]
        input: PathBuf,

        /// Only classify this field
        #[arg(short, long)]
        field: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Sign a JSON document with a certificate and private key
    Sign {
        /// Certificate file (PEM or DER)
        #[arg(short, long)]
        cert: PathBuf,

        /// Private key file (PEM, DER or encrypted DER)
        #[arg(short, long)]
        key: PathBuf,

        /// Password of an encrypted private key
        #[arg(short, long)]
        password: Option<String>,

        /// JSON document to sign
        #[arg(short, long)]
        document: PathBuf,

        /// Signature output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Language of error messages (en or es)
        #[arg(long)]
        lang: Option<Locale>,
    },

    /// Verify a signature payload against a document
    Verify {
        /// JSON document that was signed
        #[arg(short, long)]
        document: PathBuf,

        /// Signature payload file
        #[arg(short, long)]
        signature: PathBuf,
    },

    /// Show how a key file is encoded and protected
    Inspect {
        /// Private key file
        #[arg(short, long)]
        key: PathBuf,
    },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Detect { input, field, json } => {
            commands::detect::handle(&input, field.as_deref(), json)?;
        }
        Commands::Sign {
            cert,
            key,
            password,
            document,
            output,
            lang,
        } => {
            let args = commands::sign::SignArgs {
                cert,
                key,
                password,
                document,
                output,
                lang: lang.unwrap_or(settings.signer.lang),
            };
            commands::sign::handle(&args, &settings)?;
        }
        Commands::Verify {
            document,
            signature,
        } => {
            if !commands::verify::handle(&document, &signature, &settings)? {
                return Err(CliError::InvalidSignature);
            }
        }
        Commands::Inspect { key } => {
            commands::inspect::handle(&key)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sign() {
        let cli = Cli::try_parse_from([
            "tramite",
            "--config",
            "custom.toml",
            "sign",
            "--cert",
            "cert.cer",
            "--key",
            "llave.key",
            "--password",
            "secret",
            "--document",
            "doc.json",
            "--lang",
            "es",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Sign { password, lang, output, .. } => {
                assert_eq!(password.as_deref(), Some("secret"));
                assert_eq!(lang, Some(Locale::Es));
                assert_eq!(output, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_lang() {
        let parsed = Cli::try_parse_from([
            "tramite", "sign", "-c", "a", "-k", "b", "-d", "c", "--lang", "fr",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_detect() {
        let cli = Cli::try_parse_from(["tramite", "detect", "-i", "entity.json", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Detect { json: true, field: None, .. }
        ));
    }
}
