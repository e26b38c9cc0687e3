//! Lenient readers for externally sourced fields.
//!
//! Game feeds mix numbers, numeric strings, decorated strings (`"24*"`, `"+3"`)
//! and empty strings for the same field.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric value of a JSON cell; `None` for null, empty or non-numeric input.
pub fn number(value: &Value) -> Option<f64> {
	match value {
		Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
		Value::String(s) => number_from_str(s),
		_ => None,
	}
}

/// Strips everything but digits, `.` and `-` before parsing.
pub fn number_from_str(s: &str) -> Option<f64> {
	let digits: String = s.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
	if digits.is_empty() {
		return None;
	}
	digits.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Text of a JSON cell; numbers are rendered, null and blank become `None`.
pub fn text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

pub fn deserialize_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(number))
}

pub fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value.as_ref().and_then(text))
}

/// A down is kept only when it is 1 through 4.
pub fn deserialize_down<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(value
		.as_ref()
		.and_then(text)
		.and_then(|s| s.parse::<u8>().ok())
		.filter(|d| (1..=4).contains(d)))
}
