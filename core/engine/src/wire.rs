//! FILENAME: core/engine/src/wire.rs
//! PURPOSE: Serde adapters for loosely typed record-source columns.
//! CONTEXT: Identifiers arrive as numbers or strings, and numeric columns
//! (prices, ratings) sometimes arrive as decimal strings. Both are
//! normalized here so the typed structs stay strict everywhere else.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn id_from_value<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(E::custom(format!("expected an identifier, found {}", other))),
    }
}

fn number_from_value<E: serde::de::Error>(value: Value) -> Result<Option<f64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(E::custom(format!("expected a finite number, found '{}'", s))),
        },
        other => Err(E::custom(format!("expected a number, found {}", other))),
    }
}

/// Required identifier.
pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(value)?.ok_or_else(|| serde::de::Error::custom("missing identifier"))
}

/// Optional identifier (foreign keys).
pub fn opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    id_from_value(Value::deserialize(deserializer)?)
}

/// Optional number, accepting numeric strings.
pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_from_value(Value::deserialize(deserializer)?)
}
