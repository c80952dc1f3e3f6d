//! # oidcolumns - ObjectId Columns for Relational Records
//!
//! oidcolumns lets a relational record type store a 12-byte ObjectId in
//! either of two physical column encodings while application code only ever
//! handles a single canonical [`ObjectId`]:
//!
//! - **Binary**: 12 raw bytes
//! - **Hex string**: 24 lowercase hexadecimal characters
//!
//! ## Quick Start
//!
//! ```ignore
//! use oidcolumns::{ColumnRegistry, RegistryConfig, Value};
//!
//! let mut registry = ColumnRegistry::for_record_type(&widgets, RegistryConfig::default());
//! registry.register(&mut widgets, None)?;              // every *_oid column
//! registry.register_primary_key(&mut widgets, None, source)?;
//!
//! registry.write(&mut record, "parent_oid", "4F1D2C3B4A5968778695A4B3")?;
//! let parent = registry.read(&record, "parent_oid")?;  // Some(ObjectId)
//!
//! let operand = registry.translate("parent_oid", Value::List(ids))?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     Catalog (one registry / type)    │
//! ├─────────────────────────────────────┤
//! │  Column Registry │ Primary-Key Wiring│
//! ├─────────────────────────────────────┤
//! │      ObjectId Codec (encoding)       │
//! ├─────────────────────────────────────┤
//! │  Host boundary: RecordType / Record  │
//! └─────────────────────────────────────┘
//! ```
//!
//! The codec is pure. The registry is built once per record type during
//! setup and only read afterwards. The host owns the schema and id generation
//! along with method binding, all reached through the traits in [`host`].
//!
//! ## Module Overview
//!
//! - [`config`]: Encoded lengths, suffix marker, `RegistryConfig`
//! - [`types`]: `ObjectId`, `StorageKind`, `DeclaredType`, `Value`
//! - [`encoding`]: ObjectId codec
//! - [`schema`]: Column metadata reported by the host
//! - [`host`]: Host traits and an in-memory reference host
//! - [`registry`]: Column registry, primary-key wiring, catalog
//! - [`error`]: Typed failures

pub mod config;
pub mod encoding;
pub mod error;
pub mod host;
pub mod registry;
pub mod schema;
pub mod types;

pub use config::RegistryConfig;
pub use error::{InvalidObjectId, QueryError, ReadError, RegistrationError, WriteError};
pub use host::{ObjectIdSource, Record, RecordType};
pub use registry::{ColumnDescriptor, ColumnRegistry, ObjectIdCatalog, SharedCatalog};
pub use schema::{PrimaryKey, SchemaColumn, TableSchema};
pub use types::{DeclaredType, ObjectId, StorageKind, Value};
