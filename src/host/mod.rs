//! # Host Boundary
//!
//! The registry does not bind methods into record types itself and never
//! talks to a database. Everything it needs from the surrounding ORM layer is
//! expressed by the traits in this module:
//!
//! | Trait | Capability |
//! |-------|------------|
//! | [`RecordType`] | schema metadata, primary-key naming, method installation |
//! | [`Record`] | raw field get/set on one record |
//! | [`ObjectIdSource`] | fresh ObjectIds for the before-create hook |
//!
//! ## Installed Callables
//!
//! Registration hands the host small closures to bind under a name. Each
//! closure captures only the immutable `ColumnDescriptor` it wraps, so it stays
//! valid for the life of the process and needs no access to the registry.
//!
//! ```text
//! register("parent_oid")
//!     │
//!     ├─> install_accessor("parent_oid", Getter)
//!     └─> install_mutator("parent_oid", Mutator)
//!
//! register_primary_key("widget_oid")
//!     │
//!     ├─> accessor + mutator for "widget_oid"
//!     ├─> accessor + mutator alias "id"         (non-conventional name only)
//!     ├─> install_class_method("find", ClassMethod)
//!     └─> install_before_create_hook(BeforeCreateHook)
//! ```
//!
//! How a host binds these (dynamic dispatch tables, generated code, a
//! scripting bridge) is its own concern.
//!
//! ## Reference Host
//!
//! [`memory`] provides a HashMap-backed record type and record that drive the
//! installed callables directly. It is what the test suite runs against.

pub mod memory;

use crate::error::{QueryError, ReadError, WriteError};
use crate::schema::{PrimaryKey, SchemaColumn};
use crate::types::{ObjectId, Value};
use std::sync::Arc;

/// Reads a registered column as an `ObjectId`.
pub type Getter = Arc<dyn Fn(&dyn Record) -> Result<Option<ObjectId>, ReadError> + Send + Sync>;

/// Coerces and stores a value into a registered column.
pub type Mutator = Arc<dyn Fn(&mut dyn Record, Value) -> Result<(), WriteError> + Send + Sync>;

/// Translates lookup arguments before the host's default lookup runs.
pub type ClassMethod = Arc<dyn Fn(Value) -> Result<Value, QueryError> + Send + Sync>;

/// Runs on a record before it is first persisted.
pub type BeforeCreateHook = Arc<dyn Fn(&mut dyn Record) -> Result<(), WriteError> + Send + Sync>;

/// Raw field access on a single record.
pub trait Record {
    /// Returns the stored value, or None when the field is absent.
    fn get_raw_field(&self, name: &str) -> Option<Value>;

    /// Stores a value; None clears the field.
    fn set_raw_field(&mut self, name: &str, value: Option<Value>);
}

/// A record type as seen by the registry.
pub trait RecordType {
    fn name(&self) -> &str;

    /// Registration on a record type without a backing table is a no-op.
    fn table_exists(&self) -> bool;

    fn schema_columns(&self) -> Vec<SchemaColumn>;

    fn primary_key(&self) -> Option<PrimaryKey>;

    fn set_primary_key_name(&mut self, name: &str);

    fn install_accessor(&mut self, name: &str, getter: Getter);

    fn install_mutator(&mut self, name: &str, mutator: Mutator);

    fn install_class_method(&mut self, name: &str, method: ClassMethod);

    fn install_before_create_hook(&mut self, hook: BeforeCreateHook);
}

/// Supplies new ObjectIds. Generation itself lives outside this crate.
pub trait ObjectIdSource: Send + Sync {
    fn next_object_id(&self) -> ObjectId;
}

impl<F> ObjectIdSource for F
where
    F: Fn() -> ObjectId + Send + Sync,
{
    fn next_object_id(&self) -> ObjectId {
        self()
    }
}
