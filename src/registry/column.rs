//! # Column Descriptors
//!
//! A `ColumnDescriptor` is created once, when a column passes registration,
//! and never changes afterwards. It carries everything needed to coerce
//! values for that column, so installed getters and mutators hold a clone of
//! it rather than a reference to the registry.
//!
//! ## Read Path
//!
//! ```text
//! raw field ──┬─ absent / NULL ──────────────────> None
//!             ├─ not text or bytes ──────────────> UnreadableStoredValue
//!             ├─ empty ──────────────────────────> None
//!             └─ truncate to required length ──> codec ─┬─> Some(id)
//!                                                       └─> CorruptStoredIdentifier
//! ```
//!
//! Truncation tolerates trailing padding some storage engines append to
//! fixed-width columns. Text is cut by characters, bytes by bytes.
//!
//! ## Write Path
//!
//! Falsy values clear the field without touching the codec. Everything else
//! is parsed and re-encoded in the column's storage kind.
//!
//! ## Query Translation
//!
//! Falsy operands pass through, lists are translated element by element in
//! order, text/bytes/ObjectIds are re-encoded, and any other operand is
//! rejected.

use crate::encoding::objectid;
use crate::error::{QueryError, ReadError, WriteError};
use crate::host::{ObjectIdSource, Record};
use crate::types::{ObjectId, StorageKind, Value};
use std::sync::Arc;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    record_type: Arc<str>,
    name: String,
    kind: StorageKind,
    declared_limit: Option<u32>,
}

impl ColumnDescriptor {
    pub(crate) fn new(
        record_type: Arc<str>,
        name: impl Into<String>,
        kind: StorageKind,
        declared_limit: Option<u32>,
    ) -> Self {
        Self {
            record_type,
            name: name.into(),
            kind,
            declared_limit,
        }
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Normalized column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> StorageKind {
        self.kind
    }

    pub fn declared_limit(&self) -> Option<u32> {
        self.declared_limit
    }

    pub(crate) fn same_definition(&self, other: &ColumnDescriptor) -> bool {
        self.kind == other.kind && self.declared_limit == other.declared_limit
    }

    pub fn encode(&self, id: ObjectId) -> Value {
        self.kind.encode(id)
    }

    pub fn read(&self, record: &dyn Record) -> Result<Option<ObjectId>, ReadError> {
        let raw = match record.get_raw_field(&self.name) {
            None | Some(Value::Null) => return Ok(None),
            Some(raw) => raw,
        };

        let required = self.kind.required_length();
        // printable form of the stored value, kept only when it gets truncated
        let mut untruncated = None;
        let stored = match raw {
            Value::Text(s) if s.is_empty() => return Ok(None),
            Value::Blob(b) if b.is_empty() => return Ok(None),
            Value::Text(mut s) => {
                let cut = s.char_indices().nth(required).map(|(i, _)| i);
                if let Some(cut) = cut {
                    untruncated = Some(Value::Text(s.clone()).to_string());
                    debug!(
                        record_type = %self.record_type,
                        column = %self.name,
                        stored_chars = s.chars().count(),
                        "truncating padded objectid text"
                    );
                    s.truncate(cut);
                }
                Value::Text(s)
            }
            Value::Blob(mut b) => {
                if b.len() > required {
                    untruncated = Some(Value::Blob(b.clone()).to_string());
                    debug!(
                        record_type = %self.record_type,
                        column = %self.name,
                        stored_bytes = b.len(),
                        "truncating padded objectid bytes"
                    );
                    b.truncate(required);
                }
                Value::Blob(b)
            }
            other => {
                return Err(ReadError::UnreadableStoredValue {
                    record_type: self.record_type.to_string(),
                    column: self.name.clone(),
                    value: other.to_string(),
                })
            }
        };

        objectid::parse(&stored)
            .map(Some)
            .map_err(|source| ReadError::CorruptStoredIdentifier {
                record_type: self.record_type.to_string(),
                column: self.name.clone(),
                value: untruncated.unwrap_or_else(|| stored.to_string()),
                source,
            })
    }

    pub fn write(&self, record: &mut dyn Record, value: Value) -> Result<(), WriteError> {
        if value.is_falsy() {
            trace!(record_type = %self.record_type, column = %self.name, "clearing objectid");
            record.set_raw_field(&self.name, None);
            return Ok(());
        }

        let id = objectid::parse(&value).map_err(|source| WriteError::InvalidIdentifierFormat {
            record_type: self.record_type.to_string(),
            column: self.name.clone(),
            value: value.to_string(),
            source,
        })?;

        trace!(record_type = %self.record_type, column = %self.name, %id, "storing objectid");
        record.set_raw_field(&self.name, Some(self.kind.encode(id)));
        Ok(())
    }

    pub fn translate(&self, value: Value) -> Result<Value, QueryError> {
        if value.is_falsy() {
            return Ok(value);
        }

        match value {
            Value::List(items) => items
                .into_iter()
                .map(|item| self.translate(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Value::Text(_) | Value::Blob(_) | Value::ObjectId(_) => objectid::parse(&value)
                .map(|id| self.kind.encode(id))
                .map_err(|source| QueryError::InvalidIdentifierFormat {
                    record_type: self.record_type.to_string(),
                    column: self.name.clone(),
                    value: value.to_string(),
                    source,
                }),
            other => Err(QueryError::InvalidQueryOperand {
                record_type: self.record_type.to_string(),
                column: self.name.clone(),
                operand: other.to_string(),
            }),
        }
    }

    /// Fills the field from `source` when it holds no ObjectId yet.
    pub(crate) fn assign_if_absent(
        &self,
        record: &mut dyn Record,
        source: &dyn ObjectIdSource,
    ) -> Result<(), WriteError> {
        let present = match record.get_raw_field(&self.name) {
            None => false,
            Some(Value::Text(s)) => !s.is_empty(),
            Some(Value::Blob(b)) => !b.is_empty(),
            Some(v) => !v.is_falsy(),
        };
        if present {
            return Ok(());
        }

        let id = source.next_object_id();
        debug!(record_type = %self.record_type, column = %self.name, %id, "assigning primary key");
        self.write(record, Value::ObjectId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryRecord;

    const HEX: &str = "4f1d2c3b4a5968778695a4b3";

    fn sample() -> ObjectId {
        HEX.parse().unwrap()
    }

    fn binary_column() -> ColumnDescriptor {
        ColumnDescriptor::new("Widget".into(), "parent_oid", StorageKind::Binary, Some(12))
    }

    fn hex_column() -> ColumnDescriptor {
        ColumnDescriptor::new("Widget".into(), "owner_oid", StorageKind::HexString, None)
    }

    #[test]
    fn read_absent_and_null_yield_none() {
        let column = binary_column();
        assert_eq!(column.read(&MemoryRecord::new()).unwrap(), None);

        let record = MemoryRecord::new().with_field("parent_oid", Value::Null);
        assert_eq!(column.read(&record).unwrap(), None);
    }

    #[test]
    fn read_empty_values_yield_none() {
        let record = MemoryRecord::new().with_field("owner_oid", Value::Text(String::new()));
        assert_eq!(hex_column().read(&record).unwrap(), None);

        let record = MemoryRecord::new().with_field("parent_oid", Value::Blob(vec![]));
        assert_eq!(binary_column().read(&record).unwrap(), None);
    }

    #[test]
    fn read_truncates_padded_bytes() {
        let mut padded = sample().bytes().to_vec();
        padded.extend_from_slice(&[0, 0]);
        let record = MemoryRecord::new().with_field("parent_oid", Value::Blob(padded));
        assert_eq!(binary_column().read(&record).unwrap(), Some(sample()));
    }

    #[test]
    fn read_truncates_padded_text() {
        let record =
            MemoryRecord::new().with_field("owner_oid", Value::Text(format!("{}   ", HEX)));
        assert_eq!(hex_column().read(&record).unwrap(), Some(sample()));
    }

    #[test]
    fn read_rejects_non_sequence_values() {
        let record = MemoryRecord::new().with_field("parent_oid", Value::Int(7));
        let err = binary_column().read(&record).unwrap_err();
        assert!(matches!(
            err,
            ReadError::UnreadableStoredValue { ref value, .. } if value == "7"
        ));
    }

    #[test]
    fn read_rejects_short_bytes_as_corrupt() {
        let record = MemoryRecord::new().with_field("parent_oid", Value::Blob(vec![1, 2, 3]));
        let err = binary_column().read(&record).unwrap_err();
        assert!(matches!(err, ReadError::CorruptStoredIdentifier { .. }));
    }

    #[test]
    fn corrupt_padded_text_reports_full_stored_value() {
        let stored = format!("{}CORRUPT-TAIL", "z".repeat(24));
        let record = MemoryRecord::new().with_field("owner_oid", Value::Text(stored.clone()));
        let err = hex_column().read(&record).unwrap_err();
        match err {
            ReadError::CorruptStoredIdentifier { value, .. } => {
                assert_eq!(value, format!("{:?}", stored));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn write_encodes_per_kind() {
        let mut record = MemoryRecord::new();
        binary_column().write(&mut record, HEX.into()).unwrap();
        assert_eq!(
            record.raw("parent_oid"),
            Some(&Value::Blob(sample().bytes().to_vec()))
        );

        hex_column()
            .write(&mut record, Value::Blob(sample().bytes().to_vec()))
            .unwrap();
        assert_eq!(record.raw("owner_oid"), Some(&Value::Text(HEX.to_string())));
    }

    #[test]
    fn write_falsy_clears_field() {
        let mut record = MemoryRecord::new().with_field("owner_oid", Value::Text(HEX.into()));
        hex_column().write(&mut record, Value::Bool(false)).unwrap();
        assert!(record.raw("owner_oid").is_none());
    }

    #[test]
    fn write_rejects_bad_value() {
        let mut record = MemoryRecord::new();
        let err = hex_column().write(&mut record, "nope".into()).unwrap_err();
        match err {
            WriteError::InvalidIdentifierFormat { column, value, .. } => {
                assert_eq!(column, "owner_oid");
                assert_eq!(value, "\"nope\"");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(record.raw("owner_oid").is_none());
    }

    #[test]
    fn translate_nested_lists() {
        let column = hex_column();
        let translated = column
            .translate(Value::List(vec![
                Value::List(vec![Value::ObjectId(sample())]),
                Value::Null,
            ]))
            .unwrap();
        assert_eq!(
            translated,
            Value::List(vec![
                Value::List(vec![Value::Text(HEX.into())]),
                Value::Null
            ])
        );
    }

    #[test]
    fn translate_rejects_numbers() {
        let err = hex_column().translate(Value::Float(1.5)).unwrap_err();
        assert!(matches!(
            err,
            QueryError::InvalidQueryOperand { ref operand, .. } if operand == "1.5"
        ));
    }

    #[test]
    fn assign_if_absent_keeps_existing_value() {
        let column = binary_column();
        let source = || ObjectId::from_bytes([9; 12]);

        let mut fresh = MemoryRecord::new();
        column.assign_if_absent(&mut fresh, &source).unwrap();
        assert_eq!(column.read(&fresh).unwrap(), Some(ObjectId::from_bytes([9; 12])));

        let mut existing = MemoryRecord::new();
        column.write(&mut existing, sample().into()).unwrap();
        column.assign_if_absent(&mut existing, &source).unwrap();
        assert_eq!(column.read(&existing).unwrap(), Some(sample()));
    }
}
