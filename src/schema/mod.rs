//! # Schema Metadata
//!
//! This module describes the schema information a host reports for a record
//! type. The registry only reads it; introspecting a live database is the
//! host's job.
//!
//! ## What the Registry Needs
//!
//! For each column: its name, declared type, and declared length limit. For
//! the record type: its primary key, which may be a single column or a
//! composite.
//!
//! ```text
//! TableSchema "widgets"
//! ├── id          binary(12)   PRIMARY KEY
//! ├── parent_oid  binary(12)
//! ├── owner_oid   string(24)
//! └── name        string(255)
//! ```
//!
//! ## Name Normalization
//!
//! Column names are trimmed and lower-cased once, by [`normalize_name`], and
//! every lookup afterwards is an exact match on the normalized form.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let schema = TableSchema::new("widgets", vec![
//!     SchemaColumn::binary("id", Some(12)),
//!     SchemaColumn::binary("parent_oid", Some(12)),
//!     SchemaColumn::string("name", Some(255)),
//! ])
//! .with_primary_key(PrimaryKey::column("id"));
//! ```

pub mod table;

pub use table::{PrimaryKey, SchemaColumn, TableSchema};

/// Canonical form of a column name: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_name("  Parent_OID "), "parent_oid");
        assert_eq!(normalize_name("id"), "id");
    }
}
