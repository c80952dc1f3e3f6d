//! # ObjectId Primary Keys
//!
//! `register_primary_key` resolves which column is the primary key, registers
//! it through the same validation as any other column, then wires the
//! primary-key extras onto the host:
//!
//! - accessor/mutator aliases under the conventional name (`id`) when the key
//!   is named differently
//! - a lookup class method (`find`) that translates its argument, or a list
//!   of arguments, into the column's storage encoding
//! - a before-create hook that assigns a fresh ObjectId when the key is empty
//!
//! ## Name Resolution
//!
//! | Requested | Host key | Result |
//! |-----------|----------|--------|
//! | `Some(n)` | `n` | `n` |
//! | `Some(n)` | other or none | `n`, host renamed to `n` |
//! | `None` | single column `c` | `c` |
//! | `None` | composite | `UnsupportedPrimaryKeyShape` |
//! | `None` | none | `MissingPrimaryKey` |
//!
//! The rename is applied only after the column has passed validation.

use super::{install_accessors, ColumnRegistry};
use crate::error::RegistrationError;
use crate::host::{BeforeCreateHook, ClassMethod, ObjectIdSource, Record, RecordType};
use crate::schema::{normalize_name, PrimaryKey};
use crate::types::Value;
use std::sync::Arc;
use tracing::debug;

impl ColumnRegistry {
    pub fn register_primary_key(
        &mut self,
        host: &mut dyn RecordType,
        name: Option<&str>,
        source: Arc<dyn ObjectIdSource>,
    ) -> Result<(), RegistrationError> {
        if !host.table_exists() {
            debug!(record_type = %self.record_type, "no backing table, skipping objectid primary key");
            return Ok(());
        }

        let current = host.primary_key();
        let effective = self.resolve_primary_key(name, current.as_ref())?;

        match self.primary_key.as_deref() {
            Some(existing) if existing == effective => return Ok(()),
            Some(_) => {
                return Err(RegistrationError::ConflictingDefinition {
                    record_type: self.record_type.to_string(),
                    column: effective,
                })
            }
            None => {}
        }

        let schema = host.schema_columns();
        let descriptor = self.describe(&schema, &effective)?;

        let already_named = current
            .as_ref()
            .and_then(PrimaryKey::as_column)
            .is_some_and(|c| normalize_name(c) == effective);
        if !already_named {
            debug!(record_type = %self.record_type, primary_key = %effective, "renaming primary key");
            host.set_primary_key_name(&effective);
        }

        self.insert(host, descriptor.clone());

        let conventional = self.config.conventional_primary_key();
        if effective != conventional {
            install_accessors(host, conventional, &descriptor);
        }

        let lookup = descriptor.clone();
        let method: ClassMethod = Arc::new(move |args: Value| lookup.translate(args));
        host.install_class_method(self.config.lookup_method(), method);

        let assign = descriptor;
        let hook: BeforeCreateHook = Arc::new(move |record: &mut dyn Record| {
            assign.assign_if_absent(record, source.as_ref())
        });
        host.install_before_create_hook(hook);

        debug!(record_type = %self.record_type, primary_key = %effective, "registered objectid primary key");
        self.primary_key = Some(effective);
        Ok(())
    }

    fn resolve_primary_key(
        &self,
        requested: Option<&str>,
        current: Option<&PrimaryKey>,
    ) -> Result<String, RegistrationError> {
        let (name, shown) = match (requested, current) {
            (Some(name), _) => (normalize_name(name), format!("{:?}", name)),
            (None, Some(PrimaryKey::Column(column))) => {
                (normalize_name(column), format!("{:?}", column))
            }
            (None, Some(composite)) => {
                return Err(RegistrationError::UnsupportedPrimaryKeyShape {
                    record_type: self.record_type.to_string(),
                    primary_key: composite.describe(),
                })
            }
            (None, None) => {
                return Err(RegistrationError::MissingPrimaryKey {
                    record_type: self.record_type.to_string(),
                })
            }
        };

        if name.is_empty() {
            return Err(RegistrationError::UnsupportedPrimaryKeyShape {
                record_type: self.record_type.to_string(),
                primary_key: shown,
            });
        }
        Ok(name)
    }
}
