use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Semantic display type of a field value
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    Date,
    Datetime,
    Url,
    Email,
    Phone,
    Address,
    Currency,
    /// Signature or hash digest
    Signature,
    QrData,
    DocumentReference,
    Json,
    Image,
    Pdf,
    /// Never produced by detection; catches type tags this crate does not know
    #[serde(other)]
    Unknown,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Url => "url",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Address => "address",
            FieldType::Currency => "currency",
            FieldType::Signature => "signature",
            FieldType::QrData => "qr_data",
            FieldType::DocumentReference => "document_reference",
            FieldType::Json => "json",
            FieldType::Image => "image",
            FieldType::Pdf => "pdf",
            FieldType::Unknown => "unknown",
        }
    }

    /// Types that always point at a downloadable file.
    ///
    /// Judged on the type alone. A [`FieldType::Json`] value can be an inline
    /// document or a link to a `.json` file, so per-value file status lives
    /// in [`FieldMetadata::is_file`].
    pub fn is_file(&self) -> bool {
        matches!(self, FieldType::Image | FieldType::Pdf)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra facts gathered while classifying
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl FieldMetadata {
    pub fn with_confidence(confidence: f64) -> Self {
        Self {
            confidence: Some(confidence),
            ..Default::default()
        }
    }
}

/// Classification result; built fresh per call and never mutated
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: Value,
    pub metadata: FieldMetadata,
}

impl DetectedField {
    /// Whether this value links to a file, by type or by its URL extension.
    pub fn is_file(&self) -> bool {
        self.field_type.is_file() || self.metadata.is_file == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_serialized_shape() {
        let detected = DetectedField {
            field_type: FieldType::Pdf,
            value: json!("https://x.com/doc.pdf"),
            metadata: FieldMetadata {
                is_file: Some(true),
                file_extension: Some("pdf".into()),
                mime_type: Some("application/pdf".into()),
                confidence: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&detected).unwrap(),
            json!({
                "type": "pdf",
                "value": "https://x.com/doc.pdf",
                "metadata": { "isFile": true, "fileExtension": "pdf", "mimeType": "application/pdf" }
            })
        );
    }

    #[test]
    fn test_unknown_tag_deserializes() {
        let parsed: FieldType = serde_json::from_str("\"hologram\"").unwrap();
        assert_eq!(parsed, FieldType::Unknown);
        let parsed: FieldType = serde_json::from_str("\"document_reference\"").unwrap();
        assert_eq!(parsed, FieldType::DocumentReference);
    }

    #[test]
    fn test_as_str_matches_serde() {
        for field_type in [FieldType::QrData, FieldType::Datetime, FieldType::Signature] {
            assert_eq!(
                serde_json::to_value(field_type).unwrap(),
                json!(field_type.as_str())
            );
        }
        assert!(FieldType::Image.is_file());
        assert!(!FieldType::Url.is_file());
    }

    #[test]
    fn test_json_file_status_is_per_value() {
        assert!(!FieldType::Json.is_file());

        let inline = DetectedField {
            field_type: FieldType::Json,
            value: json!({ "a": 1 }),
            metadata: FieldMetadata::with_confidence(1.0),
        };
        let linked = DetectedField {
            field_type: FieldType::Json,
            value: json!("https://x.com/data.json"),
            metadata: FieldMetadata {
                is_file: Some(true),
                file_extension: Some("json".into()),
                mime_type: Some("application/json".into()),
                confidence: None,
            },
        };
        assert!(!inline.is_file());
        assert!(linked.is_file());
    }
}
