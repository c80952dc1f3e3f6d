//! # Error Types
//!
//! Every failure in this crate is local and synchronous. Errors are returned
//! to the immediate caller and never retried: each one points at a
//! programming mistake or a data-integrity problem, not a transient fault.
//!
//! | Enum | Raised by |
//! |------|-----------|
//! | `InvalidObjectId` | the codec |
//! | `RegistrationError` | `register`, `register_primary_key` |
//! | `ReadError` | `read` and installed getters |
//! | `WriteError` | `write`, installed mutators, the before-create hook |
//! | `QueryError` | `translate` and the primary-key lookup method |
//!
//! Variants carry the record type, the column, and the printable form of the
//! offending value. All of them convert into `eyre::Report` for hosts that
//! work with `eyre::Result`.

use crate::types::{StorageKind, Value};
use thiserror::Error;

/// Rejected input to the codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ObjectId {value}: {reason}")]
pub struct InvalidObjectId {
    pub value: String,
    pub reason: String,
}

impl InvalidObjectId {
    pub(crate) fn new(value: &Value, reason: impl Into<String>) -> Self {
        Self {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{record_type}: no column named '{column}' in the schema")]
    UnknownColumn { record_type: String, column: String },

    #[error("{record_type}.{column}: declared type '{declared}' cannot store an ObjectId (expected string or binary)")]
    UnsupportedStorageKind {
        record_type: String,
        column: String,
        declared: String,
    },

    #[error("{record_type}.{column}: {kind} column limit {limit} is shorter than the required {required}")]
    ColumnTooShort {
        record_type: String,
        column: String,
        kind: StorageKind,
        limit: u32,
        required: usize,
    },

    #[error("{record_type}: no primary key is configured and none was given")]
    MissingPrimaryKey { record_type: String },

    #[error("{record_type}: primary key {primary_key} is not a single column")]
    UnsupportedPrimaryKeyShape {
        record_type: String,
        primary_key: String,
    },

    #[error("{record_type}.{column}: already registered with a different storage kind or limit")]
    ConflictingDefinition { record_type: String, column: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("{record_type}.{column} is not a registered ObjectId column")]
    UnregisteredColumn { record_type: String, column: String },

    #[error("{record_type}.{column}: stored value {value} is neither text nor bytes")]
    UnreadableStoredValue {
        record_type: String,
        column: String,
        value: String,
    },

    #[error("{record_type}.{column}: stored value {value} is not a valid ObjectId")]
    CorruptStoredIdentifier {
        record_type: String,
        column: String,
        value: String,
        #[source]
        source: InvalidObjectId,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    #[error("{record_type}.{column} is not a registered ObjectId column")]
    UnregisteredColumn { record_type: String, column: String },

    #[error("{record_type}.{column}: cannot assign {value}")]
    InvalidIdentifierFormat {
        record_type: String,
        column: String,
        value: String,
        #[source]
        source: InvalidObjectId,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("{record_type}.{column}: query value {value} is not a valid ObjectId")]
    InvalidIdentifierFormat {
        record_type: String,
        column: String,
        value: String,
        #[source]
        source: InvalidObjectId,
    },

    #[error("{record_type}.{column}: cannot compare against {operand}")]
    InvalidQueryOperand {
        record_type: String,
        column: String,
        operand: String,
    },
}
