use serde_json::{Map, Value};
use tracing::trace;

use crate::{
    rules::{StringContext, STRING_RULES},
    types::{DetectedField, FieldMetadata, FieldType},
};

/// Classify a single backend value, optionally hinted by its field name.
///
/// Total: every input yields a result, falling back to [`FieldType::Text`].
pub fn detect_field_type(value: &Value, field_name: Option<&str>) -> DetectedField {
    match value {
        Value::Null => plain(FieldType::Text, Value::String(String::new())),
        Value::Bool(_) => plain(FieldType::Boolean, value.clone()),
        Value::Number(_) => plain(FieldType::Number, value.clone()),
        Value::Object(_) | Value::Array(_) => DetectedField {
            field_type: FieldType::Json,
            value: value.clone(),
            metadata: FieldMetadata::with_confidence(1.0),
        },
        Value::String(text) => detect_string(text, field_name, value),
    }
}

/// Classify every field of an entity payload.
///
/// Results follow the payload's key insertion order, which is the order the
/// backend sent them in.
pub fn detect_fields(fields: &Map<String, Value>) -> Vec<(String, DetectedField)> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), detect_field_type(value, Some(name))))
        .collect()
}

fn detect_string(text: &str, field_name: Option<&str>, original: &Value) -> DetectedField {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return plain(FieldType::Text, original.clone());
    }

    let name = field_name.unwrap_or_default().to_lowercase();
    let ctx = StringContext {
        text: trimmed,
        name: &name,
    };

    for rule in STRING_RULES {
        if (rule.matches)(&ctx) {
            trace!(rule = rule.name, field = field_name, "field classified");
            let classification = (rule.classify)(&ctx);
            return DetectedField {
                field_type: classification.field_type,
                value: original.clone(),
                metadata: classification.metadata,
            };
        }
    }

    plain(FieldType::Text, original.clone())
}

fn plain(field_type: FieldType, value: Value) -> DetectedField {
    DetectedField {
        field_type,
        value,
        metadata: FieldMetadata::default(),
    }
}
