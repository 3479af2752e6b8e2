//! Permissive conversions applied to a few receipt fields
//!
//! Clients send `font-size` and `underline` either with their native json type or spelled as a string. These functions turn the loose value into the strict type the [Instruction](crate::Instruction) carries, or give back the reason it could not be done.

use serde_json::Value;

/// Reads a font size.
///
/// Accepts an integer, a float (truncated toward zero) or a string holding an integer.
///
/// ```rust
/// use escpos_receipt::coerce::font_size;
/// use serde_json::json;
///
/// assert_eq!(Ok(3), font_size(&json!(3)));
/// assert_eq!(Ok(3), font_size(&json!("3")));
/// assert_eq!(Ok(2), font_size(&json!(2.9)));
/// assert!(font_size(&json!("3px")).is_err());
/// ```
pub fn font_size(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                Ok(n)
            } else if let Some(f) = number.as_f64() {
                if f.trunc() >= i64::MIN as f64 && f.trunc() <= i64::MAX as f64 {
                    Ok(f.trunc() as i64)
                } else {
                    Err(format!("{} is out of range", number))
                }
            } else {
                Err(format!("{} is out of range", number))
            }
        },
        Value::String(s) => s.parse::<i64>().map_err(|_| format!("{:?} is not an integer", s)),
        other => Err(format!("expected a number or a string, found {}", type_name(other)))
    }
}

/// Reads an underline flag.
///
/// Accepts a boolean, or a string, where only the exact `"true"` means true. Any other string, `"True"` and `"yes"` included, is false.
///
/// ```rust
/// use escpos_receipt::coerce::underline;
/// use serde_json::json;
///
/// assert_eq!(Ok(true), underline(&json!("true")));
/// assert_eq!(Ok(false), underline(&json!("banana")));
/// assert!(underline(&json!(1)).is_err());
/// ```
pub fn underline(value: &Value) -> Result<bool, String> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => Ok(s == "true"),
        other => Err(format!("expected a boolean or a string, found {}", type_name(other)))
    }
}

/// Reads a strict json integer.
pub fn integer(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(number) => number.as_i64().ok_or_else(|| format!("{} is not an integer", number)),
        other => Err(format!("expected an integer, found {}", type_name(other)))
    }
}

/// Reads a json string.
pub fn string(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| format!("expected a string, found {}", type_name(value)))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object"
    }
}
