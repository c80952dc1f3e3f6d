//! # Catalog Module
//!
//! The catalog holds one `ColumnRegistry` per record type, keyed by the
//! record type's name, and gives hosts a single entry point that reports
//! failures as `eyre` errors with the record type attached.

use super::ColumnRegistry;
use crate::config::RegistryConfig;
use crate::host::{ObjectIdSource, RecordType};
use crate::types::Value;
use eyre::{Result, WrapErr};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Catalog shared across threads. Setup takes the write lock once per
/// registration; request handling only reads.
pub type SharedCatalog = Arc<RwLock<ObjectIdCatalog>>;

#[derive(Debug, Default)]
pub struct ObjectIdCatalog {
    registries: HashMap<String, ColumnRegistry>,
    config: RegistryConfig,
}

impl ObjectIdCatalog {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            registries: HashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn registry(&self, record_type: &str) -> Option<&ColumnRegistry> {
        self.registries.get(record_type)
    }

    pub fn registry_mut_or_insert(&mut self, record_type: &str) -> &mut ColumnRegistry {
        self.registries
            .entry(record_type.to_string())
            .or_insert_with(|| ColumnRegistry::new(record_type, self.config.clone()))
    }

    pub fn register(&mut self, host: &mut dyn RecordType, columns: Option<&[&str]>) -> Result<()> {
        let record_type = host.name().to_string();
        self.registry_mut_or_insert(&record_type)
            .register(host, columns)
            .wrap_err_with(|| format!("failed to register objectid columns on {}", record_type))
    }

    pub fn register_primary_key(
        &mut self,
        host: &mut dyn RecordType,
        name: Option<&str>,
        source: Arc<dyn ObjectIdSource>,
    ) -> Result<()> {
        let record_type = host.name().to_string();
        self.registry_mut_or_insert(&record_type)
            .register_primary_key(host, name, source)
            .wrap_err_with(|| format!("failed to register objectid primary key on {}", record_type))
    }

    /// Translates a query operand. Record types without a registry have no
    /// ObjectId columns, so their operands pass through.
    pub fn translate(&self, record_type: &str, column: &str, value: Value) -> Result<Value> {
        match self.registries.get(record_type) {
            Some(registry) => registry
                .translate(column, value)
                .wrap_err_with(|| format!("failed to build query on {}", record_type)),
            None => Ok(value),
        }
    }

    /// Registered record type names, sorted.
    pub fn record_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn into_shared(self) -> SharedCatalog {
        Arc::new(RwLock::new(self))
    }
}
