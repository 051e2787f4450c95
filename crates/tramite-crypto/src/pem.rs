//! PEM armor helpers
//!
//! Sniffing, decoding and encoding of the base64 text wrapper around DER
//! key and certificate material.

use pem::{encode_config, parse, EncodeConfig, LineEnding, Pem};

use crate::error::Result;

/// Marker that starts every PEM block.
pub const PEM_BEGIN_MARKER: &str = "-----BEGIN";

/// Column at which PEM bodies are wrapped.
pub const PEM_LINE_WIDTH: usize = 64;

/// A decoded PEM block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PemBlock {
    /// Label between the BEGIN/END markers, e.g. "PRIVATE KEY"
    pub label: String,
    /// Raw DER bytes of the body
    pub contents: Vec<u8>,
    /// Whether the block carries a legacy `Proc-Type: 4,ENCRYPTED` header
    pub legacy_encrypted: bool,
}

/// Check whether file bytes look like PEM text.
///
/// The bytes are decoded lossily as UTF-8 and searched for the
/// `-----BEGIN` marker; anything else is treated as binary DER.
pub fn looks_like_pem(bytes: &[u8]) -> bool {
    String::from_utf8_lossy(bytes).contains(PEM_BEGIN_MARKER)
}

/// Decode the first PEM block found in `bytes`.
pub fn dearmor(bytes: &[u8]) -> Result<PemBlock> {
    let pem = parse(bytes)?;
    let legacy_encrypted = pem
        .headers()
        .get("Proc-Type")
        .map(|value| value.contains("ENCRYPTED"))
        .unwrap_or(false);

    Ok(PemBlock {
        label: pem.tag().to_string(),
        contents: pem.contents().to_vec(),
        legacy_encrypted,
    })
}

/// Wrap DER bytes in PEM armor with the given label.
///
/// The body is wrapped at 64 columns and lines end with `\n`.
pub fn armor(label: &str, der: &[u8]) -> String {
    let pem = Pem::new(label, der);
    let config = EncodeConfig::new()
        .set_line_ending(LineEnding::LF)
        .set_line_wrap(PEM_LINE_WIDTH);
    encode_config(&pem, config)
}
