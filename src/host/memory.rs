//! # In-Memory Host
//!
//! A HashMap-backed implementation of [`RecordType`] and [`Record`]. Installed
//! callables are kept by name and invoked through `get`, `set`,
//! `call_class_method`, and `create`, which is how a real ORM would dispatch
//! them.
//!
//! ```ignore
//! let mut widgets = MemoryRecordType::new(schema);
//! registry.register(&mut widgets, None)?;
//!
//! let mut record = MemoryRecord::new();
//! widgets.set(&mut record, "parent_oid", "4f1d2c3b4a5968778695a4b3".into())?;
//! let id = widgets.get(&record, "parent_oid")?;
//! ```

use super::{BeforeCreateHook, ClassMethod, Getter, Mutator, Record, RecordType};
use crate::schema::{normalize_name, PrimaryKey, SchemaColumn, TableSchema};
use crate::types::{ObjectId, Value};
use eyre::{eyre, Result, WrapErr};
use std::collections::HashMap;
use std::fmt;

pub struct MemoryRecordType {
    schema: TableSchema,
    table_exists: bool,
    accessors: HashMap<String, Getter>,
    mutators: HashMap<String, Mutator>,
    class_methods: HashMap<String, ClassMethod>,
    before_create: Vec<BeforeCreateHook>,
}

impl MemoryRecordType {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            table_exists: true,
            accessors: HashMap::new(),
            mutators: HashMap::new(),
            class_methods: HashMap::new(),
            before_create: Vec::new(),
        }
    }

    /// A record type whose table has not been created.
    pub fn without_table(name: impl Into<String>) -> Self {
        let mut record_type = Self::new(TableSchema::new(name, Vec::new()));
        record_type.table_exists = false;
        record_type
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn has_accessor(&self, name: &str) -> bool {
        self.accessors.contains_key(name)
    }

    pub fn has_mutator(&self, name: &str) -> bool {
        self.mutators.contains_key(name)
    }

    pub fn has_class_method(&self, name: &str) -> bool {
        self.class_methods.contains_key(name)
    }

    pub fn before_create_hook_count(&self) -> usize {
        self.before_create.len()
    }

    pub fn get(&self, record: &dyn Record, name: &str) -> Result<Option<ObjectId>> {
        let getter = self
            .accessors
            .get(name)
            .ok_or_else(|| eyre!("{} has no accessor '{}'", self.schema.name(), name))?;
        Ok(getter(record)?)
    }

    pub fn set(&self, record: &mut dyn Record, name: &str, value: Value) -> Result<()> {
        let mutator = self
            .mutators
            .get(name)
            .ok_or_else(|| eyre!("{} has no mutator '{}'", self.schema.name(), name))?;
        Ok(mutator(record, value)?)
    }

    pub fn call_class_method(&self, name: &str, args: Value) -> Result<Value> {
        let method = self
            .class_methods
            .get(name)
            .ok_or_else(|| eyre!("{} has no class method '{}'", self.schema.name(), name))?;
        Ok(method(args)?)
    }

    /// Runs every before-create hook in installation order.
    pub fn create(&self, record: &mut dyn Record) -> Result<()> {
        for hook in &self.before_create {
            hook(&mut *record).wrap_err_with(|| {
                format!("before-create hook failed on {}", self.schema.name())
            })?;
        }
        Ok(())
    }
}

impl fmt::Debug for MemoryRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut accessors: Vec<_> = self.accessors.keys().collect();
        accessors.sort();
        let mut class_methods: Vec<_> = self.class_methods.keys().collect();
        class_methods.sort();

        f.debug_struct("MemoryRecordType")
            .field("schema", &self.schema)
            .field("table_exists", &self.table_exists)
            .field("accessors", &accessors)
            .field("class_methods", &class_methods)
            .field("before_create", &self.before_create.len())
            .finish()
    }
}

impl RecordType for MemoryRecordType {
    fn name(&self) -> &str {
        self.schema.name()
    }

    fn table_exists(&self) -> bool {
        self.table_exists
    }

    fn schema_columns(&self) -> Vec<SchemaColumn> {
        self.schema.columns().to_vec()
    }

    fn primary_key(&self) -> Option<PrimaryKey> {
        self.schema.primary_key().cloned()
    }

    fn set_primary_key_name(&mut self, name: &str) {
        self.schema
            .set_primary_key(Some(PrimaryKey::column(normalize_name(name))));
    }

    fn install_accessor(&mut self, name: &str, getter: Getter) {
        self.accessors.insert(name.to_string(), getter);
    }

    fn install_mutator(&mut self, name: &str, mutator: Mutator) {
        self.mutators.insert(name.to_string(), mutator);
    }

    fn install_class_method(&mut self, name: &str, method: ClassMethod) {
        self.class_methods.insert(name.to_string(), method);
    }

    fn install_before_create_hook(&mut self, hook: BeforeCreateHook) {
        self.before_create.push(hook);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRecord {
    fields: HashMap<String, Value>,
}

impl MemoryRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

impl Record for MemoryRecord {
    fn get_raw_field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }

    fn set_raw_field(&mut self, name: &str, value: Option<Value>) {
        match value {
            Some(v) => {
                self.fields.insert(name.to_string(), v);
            }
            None => {
                self.fields.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_set_none_clears_field() {
        let mut record = MemoryRecord::new().with_field("a", Value::Int(1));
        assert_eq!(record.get_raw_field("a"), Some(Value::Int(1)));
        record.set_raw_field("a", None);
        assert!(record.get_raw_field("a").is_none());
    }

    #[test]
    fn missing_accessor_is_an_error() {
        let record_type = MemoryRecordType::new(TableSchema::new("widgets", vec![]));
        let err = record_type.get(&MemoryRecord::new(), "parent_oid").unwrap_err();
        assert!(err.to_string().contains("no accessor 'parent_oid'"));
    }

    #[test]
    fn rename_primary_key_normalizes() {
        let mut record_type = MemoryRecordType::new(TableSchema::new("widgets", vec![]));
        record_type.set_primary_key_name(" Widget_OID ");
        assert_eq!(record_type.primary_key(), Some(PrimaryKey::column("widget_oid")));
    }

    #[test]
    fn without_table_reports_missing_table() {
        let record_type = MemoryRecordType::without_table("ghosts");
        assert!(!record_type.table_exists());
        assert_eq!(record_type.name(), "ghosts");
    }
}
