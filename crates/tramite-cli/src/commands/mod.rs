pub mod detect;
pub mod inspect;
pub mod sign;
pub mod verify;

use std::{fs, path::Path};

use serde_json::Value;

use crate::error::{CliError, CliResult};

pub(crate) fn ensure_exists(path: &Path) -> CliResult<()> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

pub(crate) fn read_json(path: &Path) -> CliResult<Value> {
    ensure_exists(path)?;
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
