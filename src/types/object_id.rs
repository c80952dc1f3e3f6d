//! # Canonical ObjectId
//!
//! `ObjectId` is the single in-memory form of an identifier. Two ObjectIds
//! are equal exactly when their 12 raw bytes are equal, no matter which
//! physical encoding they were decoded from.
//!
//! ## Layout
//!
//! ```text
//! ┌───────────────┬───────────────────────────────┐
//! │ seconds (BE)  │ machine / process / counter   │
//! │   4 bytes     │          8 bytes              │
//! └───────────────┴───────────────────────────────┘
//! ```
//!
//! Only the timestamp prefix is interpreted; the remaining bytes are opaque.

use crate::config::{BINARY_OBJECTID_LENGTH, OBJECTID_TIMESTAMP_LENGTH};
use crate::encoding::objectid;
use crate::error::InvalidObjectId;
use crate::types::Value;
use std::fmt;
use std::str::FromStr;

/// A 12-byte identifier. Immutable once constructed.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; BINARY_OBJECTID_LENGTH]);

impl ObjectId {
    pub const fn from_bytes(bytes: [u8; BINARY_OBJECTID_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; BINARY_OBJECTID_LENGTH] {
        self.0
    }

    pub fn as_bytes(&self) -> &[u8; BINARY_OBJECTID_LENGTH] {
        &self.0
    }

    /// Lowercase 24-character hex form.
    pub fn to_hex(&self) -> String {
        objectid::to_hex_string(*self)
    }

    /// Seconds since the Unix epoch stored in the leading four bytes.
    pub fn timestamp_secs(&self) -> u32 {
        let mut prefix = [0u8; OBJECTID_TIMESTAMP_LENGTH];
        prefix.copy_from_slice(&self.0[..OBJECTID_TIMESTAMP_LENGTH]);
        u32::from_be_bytes(prefix)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        objectid::parse_hex(s)
    }
}

impl TryFrom<&[u8]> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        objectid::parse_binary(bytes)
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        objectid::parse_hex(s)
    }
}

impl TryFrom<&Value> for ObjectId {
    type Error = InvalidObjectId;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        objectid::parse(value)
    }
}

impl From<[u8; BINARY_OBJECTID_LENGTH]> for ObjectId {
    fn from(bytes: [u8; BINARY_OBJECTID_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "4f1d2c3b4a5968778695a4b3";

    #[test]
    fn display_is_lowercase_hex() {
        let id: ObjectId = "4F1D2C3B4A5968778695A4B3".parse().unwrap();
        assert_eq!(id.to_string(), HEX);
        assert_eq!(format!("{:?}", id), format!("ObjectId({})", HEX));
    }

    #[test]
    fn timestamp_reads_big_endian_prefix() {
        let id = ObjectId::from_bytes([0x4f, 0x1d, 0x2c, 0x3b, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(id.timestamp_secs(), 0x4f1d2c3b);
    }

    #[test]
    fn ordering_follows_raw_bytes() {
        let low = ObjectId::from_bytes([0; 12]);
        let mut high_bytes = [0u8; 12];
        high_bytes[0] = 1;
        let high = ObjectId::from_bytes(high_bytes);
        assert!(low < high);
    }

    #[test]
    fn try_from_slice_requires_twelve_bytes() {
        assert!(ObjectId::try_from(&[0u8; 11][..]).is_err());
        assert!(ObjectId::try_from(&[0u8; 12][..]).is_ok());
    }

    #[test]
    fn try_from_value_accepts_every_encoding() {
        let id: ObjectId = HEX.parse().unwrap();
        assert_eq!(ObjectId::try_from(&Value::Text(HEX.into())).unwrap(), id);
        assert_eq!(ObjectId::try_from(&Value::Blob(id.bytes().to_vec())).unwrap(), id);
        assert_eq!(ObjectId::try_from(&Value::ObjectId(id)).unwrap(), id);

        let err = ObjectId::try_from(&Value::Int(7)).unwrap_err();
        assert_eq!(err.value, "7");
    }
}
