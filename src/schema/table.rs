//! # Table Schema Types
//!
//! `SchemaColumn` is one entry of the host's column metadata; `TableSchema`
//! bundles the columns of a record type with its primary key. Both are plain
//! data, Clone and cheap to hand across the host boundary.

use super::normalize_name;
use crate::types::DeclaredType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaColumn {
    name: String,
    declared_type: DeclaredType,
    max_length: Option<u32>,
}

impl SchemaColumn {
    pub fn new(name: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            name: name.into(),
            declared_type,
            max_length: None,
        }
    }

    /// String column. Pass None for unlimited length.
    pub fn string(name: impl Into<String>, max_length: Option<u32>) -> Self {
        Self {
            name: name.into(),
            declared_type: DeclaredType::String,
            max_length,
        }
    }

    /// Binary column. Pass None for unlimited length.
    pub fn binary(name: impl Into<String>, max_length: Option<u32>) -> Self {
        Self {
            name: name.into(),
            declared_type: DeclaredType::Binary,
            max_length,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &DeclaredType {
        &self.declared_type
    }

    pub fn max_length(&self) -> Option<u32> {
        self.max_length
    }

    pub fn matches(&self, normalized: &str) -> bool {
        normalize_name(&self.name) == normalized
    }
}

/// Primary key as configured on the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimaryKey {
    Column(String),
    Composite(Vec<String>),
}

impl PrimaryKey {
    pub fn column(name: impl Into<String>) -> Self {
        PrimaryKey::Column(name.into())
    }

    pub fn composite(columns: Vec<impl Into<String>>) -> Self {
        PrimaryKey::Composite(columns.into_iter().map(Into::into).collect())
    }

    pub fn as_column(&self) -> Option<&str> {
        match self {
            PrimaryKey::Column(c) => Some(c),
            PrimaryKey::Composite(_) => None,
        }
    }

    /// True if `normalized` is (part of) this key.
    pub fn contains(&self, normalized: &str) -> bool {
        match self {
            PrimaryKey::Column(c) => normalize_name(c) == normalized,
            PrimaryKey::Composite(cols) => cols.iter().any(|c| normalize_name(c) == normalized),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            PrimaryKey::Column(c) => c.clone(),
            PrimaryKey::Composite(cols) => format!("({})", cols.join(", ")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    name: String,
    columns: Vec<SchemaColumn>,
    primary_key: Option<PrimaryKey>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>, columns: Vec<SchemaColumn>) -> Self {
        Self {
            name: name.into(),
            columns,
            primary_key: None,
        }
    }

    pub fn with_primary_key(mut self, primary_key: PrimaryKey) -> Self {
        self.primary_key = Some(primary_key);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[SchemaColumn] {
        &self.columns
    }

    pub fn primary_key(&self) -> Option<&PrimaryKey> {
        self.primary_key.as_ref()
    }

    pub fn set_primary_key(&mut self, primary_key: Option<PrimaryKey>) {
        self.primary_key = primary_key;
    }
}
