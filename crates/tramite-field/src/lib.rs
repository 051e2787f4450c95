//! Field type detection
//!
//! Entity payloads coming from the workflow backend are untyped JSON. This
//! crate decides, per field, which renderer a caller should use: a link, a
//! date, an embedded PDF, a formatted JSON block and so on.
//!
//! ```
//! use serde_json::json;
//! use tramite_field::{detect_field_type, FieldType};
//!
//! let detected = detect_field_type(&json!("https://x.com/doc.pdf"), None);
//! assert_eq!(detected.field_type, FieldType::Pdf);
//! assert_eq!(detected.metadata.is_file, Some(true));
//! ```

pub mod detect;
pub mod rules;
pub mod types;

pub use detect::{detect_field_type, detect_fields};
pub use rules::string_rule_names;
pub use types::{DetectedField, FieldMetadata, FieldType};
