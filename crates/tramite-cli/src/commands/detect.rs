use std::path::Path;

use colored::Colorize;
use serde_json::{json, Value};
use tramite_field::{detect_field_type, detect_fields, DetectedField};

use super::read_json;
use crate::error::{CliError, CliResult};

pub fn handle(input: &Path, field: Option<&str>, as_json: bool) -> CliResult<()> {
    let entity = read_json(input)?;
    let detected = classify(&entity, field)?;

    if as_json {
        let rows: Vec<Value> = detected
            .iter()
            .map(|(name, field)| json!({ "field": name, "detected": field }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", format!("Fields in {}", input.display()).cyan().bold());
    for (name, field) in &detected {
        print_row(name, field);
    }
    Ok(())
}

/// Classify an entity payload, or one named field of it.
///
/// Non-object payloads are classified as a single unnamed value.
pub fn classify(entity: &Value, field: Option<&str>) -> CliResult<Vec<(String, DetectedField)>> {
    match (entity, field) {
        (Value::Object(map), Some(name)) => {
            let value = map
                .get(name)
                .ok_or_else(|| CliError::InvalidInput(format!("no field named {name}")))?;
            Ok(vec![(name.to_string(), detect_field_type(value, Some(name)))])
        }
        (Value::Object(map), None) => Ok(detect_fields(map)),
        (value, name) => Ok(vec![(
            name.unwrap_or("value").to_string(),
            detect_field_type(value, name),
        )]),
    }
}

fn print_row(name: &str, field: &DetectedField) {
    let mut line = format!("  {:<28} {}", name, field.field_type.as_str().green());
    if let Some(confidence) = field.metadata.confidence {
        line.push_str(&format!("  ({confidence:.2})"));
    }
    if let Some(mime) = &field.metadata.mime_type {
        line.push_str(&format!("  {}", mime.yellow()));
    }
    if field.is_file() {
        line.push_str(&format!("  {}", "file".dimmed()));
    }
    println!("{line}");
}
