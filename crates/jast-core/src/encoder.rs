//! JSON encoder: [`Value`] → compact JSON text.
//!
//! Output is always compact (no whitespace) and deterministic. Object entries
//! are written in insertion order, duplicates included. Two things cannot be
//! written and are reported instead of being coerced to `null`:
//!
//! - `Value::Nothing`, which by definition holds no value
//! - a `Value::Double` that is NaN or infinite
//!
//! # Example
//! ```
//! use jast_core::{encode, Field, Value};
//! let value = Value::object([
//!     Field::new("n", 1),
//!     Field::new("x", Value::array([Value::Double(1.0), Value::Null])),
//! ]);
//! assert_eq!(encode(&value).unwrap(), r#"{"n":1,"x":[1.0,null]}"#);
//! ```

use crate::error::{JastError, Result, Unencodable};
use crate::types::Value;

/// Encode a value tree as compact JSON.
pub fn encode(value: &Value) -> Result<String> {
    let mut out = String::new();
    encode_into(value, &mut out)?;
    Ok(out)
}

/// Append the compact JSON for `value` to `out`.
///
/// On error `out` may already hold a partial prefix of the document.
pub fn encode_into(value: &Value, out: &mut String) -> Result<()> {
    match value {
        Value::Nothing => return Err(JastError::UnencodableValue(Unencodable::Nothing)),
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(n) => out.push_str(&n.to_string()),
        Value::Double(n) => encode_double(*n, out)?,
        Value::String(s) => encode_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_into(item, out)?;
            }
            out.push(']');
        }
        Value::Object(fields) => {
            out.push('{');
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(&field.name, out);
                out.push(':');
                encode_into(&field.value, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Write a finite double as the shortest numeral that reads back to the same
/// `f64`. The numeral always has a decimal point or an exponent (`1.0`,
/// `1e+300`), so decoding it yields a `Double` again rather than an `Int`.
fn encode_double(n: f64, out: &mut String) -> Result<()> {
    let number = serde_json::Number::from_f64(n)
        .ok_or(JastError::UnencodableValue(Unencodable::NonFinite(n)))?;
    out.push_str(&number.to_string());
    Ok(())
}

/// Emit a quoted string. Quote, backslash and control characters are escaped;
/// every other scalar value is written as-is.
fn encode_string(s: &str, out: &mut String) {
    out.reserve(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c < '\u{0020}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
