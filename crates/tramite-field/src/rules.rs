//! Ordered string classification rules.
//!
//! Evaluated top to bottom; the first rule whose predicate holds decides the
//! type. Reordering entries changes results (a `.pdf` link must hit the URL
//! rule before anything that would call it a document reference).

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::types::{FieldMetadata, FieldType};

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?|ftp)://[^\s/$.?#][^\s]*$").expect("invalid url regex")
});

static DOCUMENT_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(doc_|document_|file_)").expect("invalid document id regex")
});

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

// At least two separate runs of 3+ digits, so ISO dates never qualify.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\+?\(?[0-9]{1,4}\)?[-\s.]?(?:\(?[0-9]{1,4}\)?[-\s.]?)?[0-9]{3,4}[-\s.]?[0-9]{3,6}$",
    )
    .expect("invalid phone regex")
});

static HEX_DIGEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-fA-F0-9]{64,}$").expect("invalid hex regex"));

static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}(:\d{2}(\.\d+)?)?(Z|[+-]\d{2}:?\d{2})?$")
        .expect("invalid datetime regex")
});

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("invalid date regex"));

static CURRENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[$€£¥₹]\s?-?(\d{1,3}(,\d{3})+|\d+)(\.\d{1,2})?$").expect("invalid currency regex")
});

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\d+\s+([\w.,'-]+\s+)*(street|st|avenue|ave|road|rd|boulevard|blvd|lane|ln|drive|dr|court|ct|way|place|pl|calle|avenida|av)\b",
    )
    .expect("invalid address regex")
});

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
];

/// A trimmed, non-empty string value plus the lower-cased field name.
pub(crate) struct StringContext<'a> {
    pub text: &'a str,
    pub name: &'a str,
}

impl StringContext<'_> {
    fn name_has(&self, needle: &str) -> bool {
        self.name.contains(needle)
    }
}

pub(crate) struct Classification {
    pub field_type: FieldType,
    pub metadata: FieldMetadata,
}

impl Classification {
    fn scored(field_type: FieldType, confidence: f64) -> Self {
        Self {
            field_type,
            metadata: FieldMetadata::with_confidence(confidence),
        }
    }
}

pub(crate) struct StringRule {
    pub name: &'static str,
    pub matches: fn(&StringContext<'_>) -> bool,
    pub classify: fn(&StringContext<'_>) -> Classification,
}

pub(crate) static STRING_RULES: &[StringRule] = &[
    StringRule {
        name: "url",
        matches: is_url,
        classify: classify_url,
    },
    StringRule {
        name: "document_reference",
        matches: is_document_reference,
        classify: |_| Classification::scored(FieldType::DocumentReference, 0.8),
    },
    StringRule {
        name: "email",
        matches: |ctx| EMAIL_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Email, 0.95),
    },
    StringRule {
        name: "phone",
        matches: |ctx| PHONE_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Phone, 0.85),
    },
    StringRule {
        name: "signature",
        matches: is_signature,
        classify: |_| Classification::scored(FieldType::Signature, 0.9),
    },
    StringRule {
        name: "datetime",
        matches: |ctx| DATETIME_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Datetime, 0.95),
    },
    StringRule {
        name: "date",
        matches: |ctx| DATE_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Date, 0.95),
    },
    StringRule {
        name: "currency",
        matches: |ctx| CURRENCY_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Currency, 0.85),
    },
    StringRule {
        name: "address",
        matches: |ctx| ctx.name_has("address") || ADDRESS_PATTERN.is_match(ctx.text),
        classify: |_| Classification::scored(FieldType::Address, 0.7),
    },
    StringRule {
        name: "qr_data",
        matches: |ctx| ctx.name_has("qr") || ctx.name_has("barcode"),
        classify: |_| Classification::scored(FieldType::QrData, 0.8),
    },
    StringRule {
        name: "json",
        matches: is_structured_json,
        classify: |_| Classification::scored(FieldType::Json, 0.9),
    },
];

/// Names of the string rules in evaluation order.
pub fn string_rule_names() -> Vec<&'static str> {
    STRING_RULES.iter().map(|rule| rule.name).collect()
}

fn is_url(ctx: &StringContext<'_>) -> bool {
    URL_PATTERN.is_match(ctx.text)
}

fn is_document_reference(ctx: &StringContext<'_>) -> bool {
    ctx.name_has("document") || ctx.name_has("file") || DOCUMENT_ID_PATTERN.is_match(ctx.text)
}

fn is_signature(ctx: &StringContext<'_>) -> bool {
    ctx.name_has("signature") || ctx.name_has("hash") || HEX_DIGEST_PATTERN.is_match(ctx.text)
}

fn is_structured_json(ctx: &StringContext<'_>) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(ctx.text),
        Ok(serde_json::Value::Object(_) | serde_json::Value::Array(_))
    )
}

fn classify_url(ctx: &StringContext<'_>) -> Classification {
    let Some(extension) = path_extension(ctx.text) else {
        return Classification::scored(FieldType::Url, 0.95);
    };

    let file = |field_type: FieldType, mime_type: &str| Classification {
        field_type,
        metadata: FieldMetadata {
            is_file: Some(true),
            file_extension: Some(extension.clone()),
            mime_type: Some(mime_type.to_string()),
            confidence: None,
        },
    };

    if let Some((_, mime)) = IMAGE_EXTENSIONS.iter().find(|(ext, _)| *ext == extension) {
        return file(FieldType::Image, *mime);
    }
    match extension.as_str() {
        "pdf" => file(FieldType::Pdf, "application/pdf"),
        "json" => file(FieldType::Json, "application/json"),
        _ => Classification::scored(FieldType::Url, 0.95),
    }
}

/// Lower-cased extension of the last path segment, ignoring query and fragment.
fn path_extension(text: &str) -> Option<String> {
    let url = Url::parse(text).ok()?;
    let segment = url.path_segments()?.next_back()?;
    let (stem, extension) = segment.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(text: &'a str, name: &'a str) -> StringContext<'a> {
        StringContext { text, name }
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            string_rule_names(),
            vec![
                "url",
                "document_reference",
                "email",
                "phone",
                "signature",
                "datetime",
                "date",
                "currency",
                "address",
                "qr_data",
                "json",
            ]
        );
    }

    #[test]
    fn test_path_extension() {
        assert_eq!(path_extension("https://x.com/a/Scan.PNG").as_deref(), Some("png"));
        assert_eq!(path_extension("https://x.com/doc.pdf?v=2#page=1").as_deref(), Some("pdf"));
        assert_eq!(path_extension("https://x.com/docs/"), None);
        assert_eq!(path_extension("https://x.com/.hidden"), None);
        assert_eq!(path_extension("https://x.com"), None);
    }

    #[test]
    fn test_phone_pattern() {
        for phone in ["+52 55 1234 5678", "(555) 123-4567", "555.123.4567", "+15551234567"] {
            assert!(PHONE_PATTERN.is_match(phone), "{phone}");
        }
        for other in ["2024-03-15", "123", "12-34", "call me"] {
            assert!(!PHONE_PATTERN.is_match(other), "{other}");
        }
    }

    #[test]
    fn test_datetime_pattern() {
        for value in [
            "2024-03-15T10:30",
            "2024-03-15T10:30:00Z",
            "2024-03-15 10:30:00.123+02:00",
            "2024-03-15T10:30:00-0600",
        ] {
            assert!(DATETIME_PATTERN.is_match(value), "{value}");
        }
        assert!(!DATETIME_PATTERN.is_match("2024-03-15"));
    }

    #[test]
    fn test_currency_pattern() {
        for value in ["$1,234.56", "€ 99", "£0.5", "$-12.00", "¥1000"] {
            assert!(CURRENCY_PATTERN.is_match(value), "{value}");
        }
        for value in ["1,234.56", "$", "$1,23"] {
            assert!(!CURRENCY_PATTERN.is_match(value), "{value}");
        }
    }

    #[test]
    fn test_address_pattern() {
        assert!(ADDRESS_PATTERN.is_match("123 Main Street"));
        assert!(ADDRESS_PATTERN.is_match("45 Calle Hidalgo"));
        assert!(ADDRESS_PATTERN.is_match("9 Elm St, Springfield"));
        assert!(!ADDRESS_PATTERN.is_match("Main Street"));
    }

    #[test]
    fn test_name_hints() {
        assert!(is_signature(&ctx("abc", "document_hash")));
        assert!(is_document_reference(&ctx("x-1", "supporting_file")));
        assert!(is_document_reference(&ctx("DOC_991", "")));
        assert!(!is_document_reference(&ctx("x-1", "owner")));
    }
}
