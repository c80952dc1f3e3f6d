//! # Type System for ObjectId Columns
//!
//! This module provides the value types that flow between application code,
//! the codec, and the host's raw record fields.
//!
//! ## Module Structure
//!
//! - `object_id`: Canonical 12-byte `ObjectId`
//! - `storage_kind`: `StorageKind` (physical encoding) and `DeclaredType`
//!   (what the schema reports for a column)
//! - `value`: Dynamic `Value` exchanged with the host
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ObjectId` | Canonical identifier, compared by raw bytes |
//! | `StorageKind` | Binary (12 bytes) or HexString (24 chars) |
//! | `DeclaredType` | Schema-reported column type |
//! | `Value` | Raw field value, write argument, or query operand |
//!
//! ## Usage
//!
//! ```ignore
//! use oidcolumns::types::{ObjectId, StorageKind, Value};
//!
//! let id: ObjectId = "4f1d2c3b4a5968778695a4b3".parse()?;
//! let stored = StorageKind::Binary.encode(id);
//! assert_eq!(stored, Value::Blob(id.bytes().to_vec()));
//! ```

mod object_id;
mod storage_kind;
mod value;

pub use object_id::ObjectId;
pub use storage_kind::{DeclaredType, StorageKind};
pub use value::Value;
