//! # Storage Kinds
//!
//! An ObjectId column stores its value in exactly one of two physical
//! encodings:
//!
//! | Kind | Schema type | Encoded as | Required length |
//! |------|-------------|------------|-----------------|
//! | `Binary` | binary | `Value::Blob` | 12 bytes |
//! | `HexString` | string | `Value::Text` (lowercase) | 24 chars |
//!
//! The required length is a total function of the kind, so registration
//! never needs to look a length up by type name.

use super::{ObjectId, Value};
use crate::config::{BINARY_OBJECTID_LENGTH, HEX_OBJECTID_LENGTH};
use crate::encoding::objectid;
use std::fmt;

/// Physical encoding of an ObjectId column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Binary,
    HexString,
}

impl StorageKind {
    /// Minimum declared length a column of this kind must allow.
    pub const fn required_length(&self) -> usize {
        match self {
            StorageKind::Binary => BINARY_OBJECTID_LENGTH,
            StorageKind::HexString => HEX_OBJECTID_LENGTH,
        }
    }

    /// Maps a schema-reported type to a storage kind; `Other` has none.
    pub fn from_declared(declared: &DeclaredType) -> Option<Self> {
        match declared {
            DeclaredType::Binary => Some(StorageKind::Binary),
            DeclaredType::String => Some(StorageKind::HexString),
            DeclaredType::Other(_) => None,
        }
    }

    /// Encodes an ObjectId the way a column of this kind stores it.
    pub fn encode(&self, id: ObjectId) -> Value {
        match self {
            StorageKind::Binary => Value::Blob(objectid::to_binary(id).to_vec()),
            StorageKind::HexString => Value::Text(objectid::to_hex_string(id)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StorageKind::Binary => "binary",
            StorageKind::HexString => "string",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column type as reported by the host schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    String,
    Binary,
    Other(String),
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::String => f.write_str("string"),
            DeclaredType::Binary => f.write_str("binary"),
            DeclaredType::Other(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_lengths() {
        assert_eq!(StorageKind::Binary.required_length(), 12);
        assert_eq!(StorageKind::HexString.required_length(), 24);
    }

    #[test]
    fn declared_type_mapping() {
        assert_eq!(
            StorageKind::from_declared(&DeclaredType::Binary),
            Some(StorageKind::Binary)
        );
        assert_eq!(
            StorageKind::from_declared(&DeclaredType::String),
            Some(StorageKind::HexString)
        );
        assert_eq!(
            StorageKind::from_declared(&DeclaredType::Other("integer".into())),
            None
        );
    }

    #[test]
    fn encode_per_kind() {
        let id = ObjectId::from_bytes([0xab; 12]);
        assert_eq!(StorageKind::Binary.encode(id), Value::Blob(vec![0xab; 12]));
        assert_eq!(
            StorageKind::HexString.encode(id),
            Value::Text("ab".repeat(12))
        );
    }
}
