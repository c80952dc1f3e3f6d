//! # ObjectId Column Registry
//!
//! One `ColumnRegistry` exists per record type. It decides which columns
//! hold ObjectIds, validates them against the host schema, wires accessors
//! onto the host, and mediates every read, write, and query operand for
//! those columns.
//!
//! ## Lifecycle
//!
//! ```text
//! setup (single writer)                 runtime (many readers)
//! ┌──────────────────────────┐          ┌──────────────────────────┐
//! │ register(None)           │          │ read / write             │
//! │ register(Some(&[..]))    │  ─────>  │ translate                │
//! │ register_primary_key(..) │          │ installed callables      │
//! └──────────────────────────┘          └──────────────────────────┘
//! ```
//!
//! The registry only grows during setup, and a column is never removed or
//! redefined. There is no internal locking: a host that registers from
//! several threads must serialize those calls itself, for example through
//! [`SharedCatalog`].
//!
//! ## Registration Rules
//!
//! | Check | Failure |
//! |-------|---------|
//! | column exists in schema | `UnknownColumn` |
//! | declared type is string or binary | `UnsupportedStorageKind` |
//! | declared limit absent or >= required length | `ColumnTooShort` |
//! | not already registered differently | `ConflictingDefinition` |
//!
//! All requested columns are validated before any is inserted, so a failed
//! call leaves the registry and the host untouched.
//!
//! ## Auto-Detection
//!
//! `register(None)` picks every schema column whose name ends with the
//! configured suffix (`_oid` by default, case-insensitive) and drops the
//! primary key from that set. A primary key that holds ObjectIds goes
//! through [`ColumnRegistry::register_primary_key`] instead.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let mut registry = ColumnRegistry::new("Widget", RegistryConfig::default());
//! registry.register(&mut widgets, None)?;
//! registry.register_primary_key(&mut widgets, None, Arc::new(new_object_id))?;
//!
//! let id = registry.read(&record, "parent_oid")?;
//! let operand = registry.translate("parent_oid", Value::List(ids))?;
//! ```

mod catalog;
mod column;
mod primary_key;

pub use catalog::{ObjectIdCatalog, SharedCatalog};
pub use column::ColumnDescriptor;

use crate::config::RegistryConfig;
use crate::error::{QueryError, ReadError, RegistrationError, WriteError};
use crate::host::{Getter, Mutator, Record, RecordType};
use crate::schema::{normalize_name, PrimaryKey, SchemaColumn};
use crate::types::{ObjectId, StorageKind, Value};
use hashbrown::HashMap;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ColumnRegistry {
    record_type: Arc<str>,
    config: RegistryConfig,
    columns: HashMap<String, ColumnDescriptor>,
    primary_key: Option<String>,
}

impl ColumnRegistry {
    pub fn new(record_type: impl Into<String>, config: RegistryConfig) -> Self {
        let record_type: String = record_type.into();
        Self {
            record_type: record_type.into(),
            config,
            columns: HashMap::new(),
            primary_key: None,
        }
    }

    pub fn for_record_type(host: &dyn RecordType, config: RegistryConfig) -> Self {
        Self::new(host.name(), config)
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Normalized name of the registered ObjectId primary key, if any.
    pub fn primary_key(&self) -> Option<&str> {
        self.primary_key.as_deref()
    }

    pub fn is_registered(&self, column: &str) -> bool {
        self.descriptor(column).is_some()
    }

    /// Looks a column up by name. Once a primary key is registered under
    /// another name, the conventional primary-key name resolves to it, the
    /// same way the host aliases its accessors.
    pub fn descriptor(&self, column: &str) -> Option<&ColumnDescriptor> {
        let name = normalize_name(column);
        if let Some(descriptor) = self.columns.get(&name) {
            return Some(descriptor);
        }
        match self.primary_key.as_deref() {
            Some(primary_key) if name == self.config.conventional_primary_key() => {
                self.columns.get(primary_key)
            }
            _ => None,
        }
    }

    /// Registered column names, sorted.
    pub fn columns(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Registers the named columns, or auto-detects them when `columns` is None.
    pub fn register(
        &mut self,
        host: &mut dyn RecordType,
        columns: Option<&[&str]>,
    ) -> Result<(), RegistrationError> {
        if !host.table_exists() {
            debug!(record_type = %self.record_type, "no backing table, skipping objectid columns");
            return Ok(());
        }

        let schema = host.schema_columns();
        let requested: SmallVec<[String; 4]> = match columns {
            Some(names) => names.iter().map(|n| normalize_name(n)).collect(),
            None => {
                let detected = self.auto_detect(&schema, host.primary_key().as_ref());
                if detected.is_empty() {
                    warn!(
                        record_type = %self.record_type,
                        suffix = self.config.suffix(),
                        "no objectid columns detected"
                    );
                }
                detected
            }
        };

        let descriptors = requested
            .iter()
            .map(|name| self.describe(&schema, name))
            .collect::<Result<SmallVec<[ColumnDescriptor; 4]>, _>>()?;

        for descriptor in descriptors {
            self.insert(host, descriptor);
        }
        Ok(())
    }

    pub fn read(
        &self,
        record: &dyn Record,
        column: &str,
    ) -> Result<Option<ObjectId>, ReadError> {
        self.descriptor(column)
            .ok_or_else(|| ReadError::UnregisteredColumn {
                record_type: self.record_type.to_string(),
                column: column.to_string(),
            })?
            .read(record)
    }

    pub fn write(
        &self,
        record: &mut dyn Record,
        column: &str,
        value: impl Into<Value>,
    ) -> Result<(), WriteError> {
        self.descriptor(column)
            .ok_or_else(|| WriteError::UnregisteredColumn {
                record_type: self.record_type.to_string(),
                column: column.to_string(),
            })?
            .write(record, value.into())
    }

    /// Translates a query operand; columns that are not registered pass through.
    pub fn translate(&self, column: &str, value: Value) -> Result<Value, QueryError> {
        match self.descriptor(column) {
            Some(descriptor) => descriptor.translate(value),
            None => Ok(value),
        }
    }

    /// Translates a set of `(column, operand)` constraints, keeping their order.
    pub fn translate_constraints<I, S>(
        &self,
        constraints: I,
    ) -> Result<Vec<(String, Value)>, QueryError>
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        constraints
            .into_iter()
            .map(|(column, value)| {
                let column = column.into();
                let value = self.translate(&column, value)?;
                Ok((column, value))
            })
            .collect()
    }

    fn auto_detect(
        &self,
        schema: &[SchemaColumn],
        primary_key: Option<&PrimaryKey>,
    ) -> SmallVec<[String; 4]> {
        schema
            .iter()
            .map(|c| normalize_name(c.name()))
            .filter(|name| self.config.matches_suffix(name))
            .filter(|name| !primary_key.is_some_and(|pk| pk.contains(name)))
            .collect()
    }

    fn describe(
        &self,
        schema: &[SchemaColumn],
        name: &str,
    ) -> Result<ColumnDescriptor, RegistrationError> {
        let column = schema
            .iter()
            .find(|c| !name.is_empty() && c.matches(name))
            .ok_or_else(|| RegistrationError::UnknownColumn {
                record_type: self.record_type.to_string(),
                column: name.to_string(),
            })?;

        let kind = StorageKind::from_declared(column.declared_type()).ok_or_else(|| {
            RegistrationError::UnsupportedStorageKind {
                record_type: self.record_type.to_string(),
                column: name.to_string(),
                declared: column.declared_type().to_string(),
            }
        })?;

        if let Some(limit) = column.max_length() {
            if (limit as usize) < kind.required_length() {
                return Err(RegistrationError::ColumnTooShort {
                    record_type: self.record_type.to_string(),
                    column: name.to_string(),
                    kind,
                    limit,
                    required: kind.required_length(),
                });
            }
        }

        let descriptor =
            ColumnDescriptor::new(self.record_type.clone(), name, kind, column.max_length());

        if let Some(existing) = self.columns.get(name) {
            if !existing.same_definition(&descriptor) {
                return Err(RegistrationError::ConflictingDefinition {
                    record_type: self.record_type.to_string(),
                    column: name.to_string(),
                });
            }
        }

        Ok(descriptor)
    }

    fn insert(&mut self, host: &mut dyn RecordType, descriptor: ColumnDescriptor) {
        if self.columns.contains_key(descriptor.name()) {
            return;
        }

        install_accessors(host, descriptor.name(), &descriptor);
        debug!(
            record_type = %self.record_type,
            column = descriptor.name(),
            kind = %descriptor.kind(),
            "registered objectid column"
        );
        self.columns
            .insert(descriptor.name().to_string(), descriptor);
    }
}

/// Installs a getter and mutator for `descriptor` under `name`.
fn install_accessors(host: &mut dyn RecordType, name: &str, descriptor: &ColumnDescriptor) {
    let reader = descriptor.clone();
    let getter: Getter = Arc::new(move |record: &dyn Record| reader.read(record));
    host.install_accessor(name, getter);

    let writer = descriptor.clone();
    let mutator: Mutator =
        Arc::new(move |record: &mut dyn Record, value: Value| writer.write(record, value));
    host.install_mutator(name, mutator);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::{MemoryRecord, MemoryRecordType};
    use crate::schema::TableSchema;
    use crate::types::DeclaredType;

    const HEX_A: &str = "4f1d2c3b4a5968778695a4b3";
    const HEX_B: &str = "0102030405060708090a0b0c";

    fn widgets() -> MemoryRecordType {
        MemoryRecordType::new(
            TableSchema::new(
                "Widget",
                vec![
                    SchemaColumn::binary("id", Some(12)),
                    SchemaColumn::binary("parent_oid", Some(12)),
                    SchemaColumn::string("Owner_OID", None),
                    SchemaColumn::string("name", Some(255)),
                    SchemaColumn::string("short_oid", Some(20)),
                    SchemaColumn::new("count_oid", DeclaredType::Other("integer".into())),
                ],
            )
            .with_primary_key(PrimaryKey::column("id")),
        )
    }

    fn registry() -> ColumnRegistry {
        ColumnRegistry::new("Widget", RegistryConfig::default())
    }

    #[test]
    fn register_explicit_columns() {
        let mut host = widgets();
        let mut registry = registry();
        registry
            .register(&mut host, Some(&["parent_oid", " owner_oid "]))
            .unwrap();

        assert_eq!(registry.columns(), vec!["owner_oid", "parent_oid"]);
        assert_eq!(
            registry.descriptor("PARENT_OID").unwrap().kind(),
            StorageKind::Binary
        );
        assert_eq!(
            registry.descriptor("owner_oid").unwrap().kind(),
            StorageKind::HexString
        );
        assert!(host.has_accessor("parent_oid"));
        assert!(host.has_mutator("owner_oid"));
    }

    #[test]
    fn register_unknown_column_fails() {
        let mut host = widgets();
        let err = registry()
            .register(&mut host, Some(&["missing_oid"]))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::UnknownColumn { ref column, .. } if column == "missing_oid"
        ));
    }

    #[test]
    fn register_unsupported_type_fails() {
        let mut host = widgets();
        let err = registry()
            .register(&mut host, Some(&["count_oid"]))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::UnsupportedStorageKind { ref declared, .. } if declared == "integer"
        ));
    }

    #[test]
    fn register_short_column_fails() {
        let mut host = widgets();
        let err = registry()
            .register(&mut host, Some(&["short_oid"]))
            .unwrap_err();
        assert_eq!(
            err,
            RegistrationError::ColumnTooShort {
                record_type: "Widget".into(),
                column: "short_oid".into(),
                kind: StorageKind::HexString,
                limit: 20,
                required: 24,
            }
        );
    }

    #[test]
    fn failed_batch_registers_nothing() {
        let mut host = widgets();
        let mut registry = registry();
        assert!(registry
            .register(&mut host, Some(&["parent_oid", "short_oid"]))
            .is_err());
        assert!(registry.is_empty());
        assert!(!host.has_accessor("parent_oid"));
    }

    #[test]
    fn auto_detect_reports_first_invalid_column() {
        // short_oid and count_oid match the suffix but cannot hold ObjectIds
        let mut host = widgets();
        assert!(registry().register(&mut host, None).is_err());
    }

    #[test]
    fn auto_detect_excludes_primary_key() {
        let mut host = MemoryRecordType::new(
            TableSchema::new(
                "Node",
                vec![
                    SchemaColumn::binary("node_oid", Some(12)),
                    SchemaColumn::binary("parent_oid", Some(12)),
                    SchemaColumn::string("name", None),
                ],
            )
            .with_primary_key(PrimaryKey::column("node_oid")),
        );
        let mut registry = ColumnRegistry::new("Node", RegistryConfig::default());
        registry.register(&mut host, None).unwrap();
        assert_eq!(registry.columns(), vec!["parent_oid"]);
    }

    #[test]
    fn register_is_idempotent() {
        let mut host = widgets();
        let mut registry = registry();
        registry.register(&mut host, Some(&["parent_oid"])).unwrap();
        registry
            .register(&mut host, Some(&["parent_oid", "PARENT_OID"]))
            .unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn reregister_with_different_limit_conflicts() {
        let mut host = widgets();
        let mut registry = registry();
        registry.register(&mut host, Some(&["parent_oid"])).unwrap();

        let mut widened = MemoryRecordType::new(TableSchema::new(
            "Widget",
            vec![SchemaColumn::binary("parent_oid", Some(16))],
        ));
        let err = registry
            .register(&mut widened, Some(&["parent_oid"]))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistrationError::ConflictingDefinition { ref column, .. } if column == "parent_oid"
        ));
        assert_eq!(
            registry.descriptor("parent_oid").unwrap().declared_limit(),
            Some(12)
        );
        assert!(!widened.has_accessor("parent_oid"));
    }

    #[test]
    fn register_without_table_is_noop() {
        let mut host = MemoryRecordType::without_table("Ghost");
        let mut registry = ColumnRegistry::new("Ghost", RegistryConfig::default());
        registry.register(&mut host, Some(&["anything"])).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn read_write_unregistered_column_fails() {
        let registry = registry();
        let mut record = MemoryRecord::new();
        assert!(matches!(
            registry.read(&record, "parent_oid"),
            Err(ReadError::UnregisteredColumn { .. })
        ));
        assert!(matches!(
            registry.write(&mut record, "parent_oid", HEX_A),
            Err(WriteError::UnregisteredColumn { .. })
        ));
    }

    #[test]
    fn translate_passes_through_unregistered_columns() {
        let registry = registry();
        assert_eq!(
            registry.translate("name", "Alice".into()).unwrap(),
            Value::Text("Alice".into())
        );
    }

    #[test]
    fn translate_constraints_keeps_order() {
        let mut host = widgets();
        let mut registry = registry();
        registry
            .register(&mut host, Some(&["parent_oid", "owner_oid"]))
            .unwrap();

        let a: ObjectId = HEX_A.parse().unwrap();
        let b: ObjectId = HEX_B.parse().unwrap();
        let translated = registry
            .translate_constraints(vec![
                ("name", Value::from("Alice")),
                ("owner_oid", Value::Blob(b.bytes().to_vec())),
                ("parent_oid", Value::from(HEX_A.to_uppercase())),
            ])
            .unwrap();

        assert_eq!(
            translated,
            vec![
                ("name".to_string(), Value::from("Alice")),
                ("owner_oid".to_string(), Value::Text(HEX_B.into())),
                ("parent_oid".to_string(), Value::Blob(a.bytes().to_vec())),
            ]
        );
    }
}
