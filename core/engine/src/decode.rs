//! FILENAME: core/engine/src/decode.rs
//! PURPOSE: The validation boundary between the record source and the pipeline.
//! CONTEXT: Records are decoded once into their typed struct. A record that
//! does not fit its schema stops the report before any filtering happens.

use crate::error::EngineError;
use crate::record::{Record, RecordField};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes raw record-source values into typed records of one kind.
pub fn decode_records<R>(raw: &[Value]) -> Result<Vec<R>, EngineError>
where
    R: Record + DeserializeOwned,
{
    raw.iter()
        .enumerate()
        .map(|(index, value)| {
            R::deserialize(value).map_err(|e| EngineError::MalformedRecord {
                kind: <R::Field as RecordField>::KIND,
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Decodes a JSON array document.
pub fn decode_json<R>(json: &str) -> Result<Vec<R>, EngineError>
where
    R: Record + DeserializeOwned,
{
    let raw: Vec<Value> =
        serde_json::from_str(json).map_err(|e| EngineError::MalformedRecord {
            kind: <R::Field as RecordField>::KIND,
            index: 0,
            reason: format!("record source is not a JSON array: {}", e),
        })?;
    let records = decode_records(&raw)?;
    log::debug!(
        "decoded {} {} records",
        records.len(),
        <R::Field as RecordField>::KIND
    );
    Ok(records)
}
