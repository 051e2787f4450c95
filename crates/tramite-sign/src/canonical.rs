//! Canonical JSON
//!
//! The signed bytes are the UTF-8 encoding of a compact JSON serialization
//! whose object keys are sorted at every depth. Two documents that differ
//! only in key insertion order canonicalize to the same string. Numbers are
//! written the way ECMAScript `Number.prototype.toString` writes them, so a
//! browser running `JSON.stringify` over the same document signs the same
//! bytes.

use serde_json::{Map, Number, Value};

/// Purpose tag added to every signed document
pub const DEFAULT_SIGNATURE_PURPOSE: &str = "document_signature";

/// Key under which the signing time is added
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Key under which the purpose tag is added
pub const PURPOSE_KEY: &str = "signature_purpose";

/// Key wrapping a document that is not a JSON object
pub const DOCUMENT_KEY: &str = "document";

/// Build the value that actually gets signed.
///
/// Object documents receive `timestamp` and `signature_purpose` fields,
/// overwriting any existing ones. Any other JSON value is wrapped as
/// `{ "document": <value>, ... }`.
pub fn signing_input(document: &Value, timestamp: &str, purpose: &str) -> Value {
    let mut object = match document {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert(DOCUMENT_KEY.to_string(), other.clone());
            map
        }
    };
    object.insert(TIMESTAMP_KEY.to_string(), Value::String(timestamp.to_string()));
    object.insert(PURPOSE_KEY.to_string(), Value::String(purpose.to_string()));
    Value::Object(object)
}

/// Serialize `value` as compact JSON with lexicographically sorted keys.
pub fn canonicalize(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(item, out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        Value::Number(number) => write_number(number, out),
        scalar => out.push_str(&scalar.to_string()),
    }
}

// Integers a double represents exactly keep their decimal form.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn write_number(number: &Number, out: &mut String) {
    let exact = match (number.as_i64(), number.as_u64()) {
        (Some(i), _) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
        (None, Some(u)) => u <= MAX_SAFE_INTEGER,
        (None, None) => false,
    };
    if exact {
        out.push_str(&number.to_string());
        return;
    }
    match number.as_f64() {
        Some(value) => out.push_str(&format_double(value)),
        None => out.push_str(&number.to_string()),
    }
}

/// Shortest round-trip rendering of `value`, laid out per ECMA-262
/// `Number::toString`: plain decimal for exponents in `-7 < e < 21`,
/// `d.ddde±x` otherwise.
fn format_double(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest digits that round-trip, e.g. `1.005e2`.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        out.push_str(int);
        out.push('.');
        out.push_str(frac);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        let (lead, rest) = digits.split_at(1);
        out.push_str(lead);
        if !rest.is_empty() {
            out.push('.');
            out.push_str(rest);
        }
        let e = n - 1;
        out.push('e');
        out.push(if e < 0 { '-' } else { '+' });
        out.push_str(&e.abs().to_string());
    }
    out
}
