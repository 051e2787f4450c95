//! Optional TOML settings for the CLI
//!
//! ```toml
//! [signer]
//! purpose = "document_signature"
//! lang = "es"
//!
//! [output]
//! pretty = true
//! ```

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;
use tramite_sign::{Locale, DEFAULT_SIGNATURE_PURPOSE};

use crate::error::CliResult;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tramite.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub signer: SignerSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SignerSettings {
    /// Tag mixed into every signed document
    pub purpose: String,
    pub lang: Locale,
}

impl Default for SignerSettings {
    fn default() -> Self {
        Self {
            purpose: DEFAULT_SIGNATURE_PURPOSE.to_string(),
            lang: Locale::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Settings {
    /// Load settings from `path`, or from [`DEFAULT_CONFIG_FILE`].
    ///
    /// A missing file yields defaults; a file that exists but does not parse
    /// is an error.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)?;
        let settings = toml::from_str(&raw)?;
        debug!(path = %path.display(), "loaded config");
        Ok(settings)
    }
}
