//! # ObjectId Codec
//!
//! Lossless, validated conversion between an `ObjectId` and its two physical
//! encodings. All functions are pure and hold no state.
//!
//! ## Accepted Inputs
//!
//! | Input | Rule |
//! |-------|------|
//! | `Value::ObjectId` | returned unchanged |
//! | `Value::Blob` | exactly 12 bytes |
//! | `Value::Text` | exactly 24 hex digits, any case |
//! | anything else | rejected |
//!
//! ## Round Trip
//!
//! For every `id`:
//!
//! ```text
//! parse_binary(&to_binary(id)) == id
//! parse_hex(&to_hex_string(id)) == id
//! ```
//!
//! ## Error Handling
//!
//! Every rejection is an `InvalidObjectId` carrying the printable form of the
//! rejected input and the reason:
//!
//! ```text
//! invalid ObjectId "4f1d": expected 24 hex characters, got 4
//! ```

use crate::config::{BINARY_OBJECTID_LENGTH, HEX_OBJECTID_LENGTH};
use crate::error::InvalidObjectId;
use crate::types::{ObjectId, Value};

/// Parses any supported representation into an `ObjectId`.
pub fn parse(value: &Value) -> Result<ObjectId, InvalidObjectId> {
    match value {
        Value::ObjectId(id) => Ok(*id),
        Value::Blob(bytes) => parse_binary(bytes),
        Value::Text(s) => parse_hex(s),
        other => Err(InvalidObjectId::new(
            other,
            format!("unsupported {} value", other.type_name()),
        )),
    }
}

pub fn parse_binary(bytes: &[u8]) -> Result<ObjectId, InvalidObjectId> {
    let raw: [u8; BINARY_OBJECTID_LENGTH] = bytes.try_into().map_err(|_| {
        InvalidObjectId::new(
            &Value::Blob(bytes.to_vec()),
            format!(
                "expected {} bytes, got {}",
                BINARY_OBJECTID_LENGTH,
                bytes.len()
            ),
        )
    })?;

    Ok(ObjectId::from_bytes(raw))
}

pub fn parse_hex(s: &str) -> Result<ObjectId, InvalidObjectId> {
    let char_count = s.chars().count();
    if char_count != HEX_OBJECTID_LENGTH {
        return Err(InvalidObjectId::new(
            &Value::Text(s.to_string()),
            format!(
                "expected {} hex characters, got {}",
                HEX_OBJECTID_LENGTH, char_count
            ),
        ));
    }

    let mut raw = [0u8; BINARY_OBJECTID_LENGTH];
    hex::decode_to_slice(s, &mut raw).map_err(|e| {
        InvalidObjectId::new(&Value::Text(s.to_string()), format!("not hexadecimal: {}", e))
    })?;

    Ok(ObjectId::from_bytes(raw))
}

pub fn to_binary(id: ObjectId) -> [u8; BINARY_OBJECTID_LENGTH] {
    id.bytes()
}

pub fn to_hex_string(id: ObjectId) -> String {
    hex::encode(id.as_bytes())
}
