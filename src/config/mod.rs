//! # Configuration Module
//!
//! This module centralizes the constants and the per-registry settings used
//! when declaring ObjectId columns. Lengths that depend on each other are
//! co-located and tied together with compile-time assertions.
//!
//! ## Module Organization
//!
//! - [`constants`]: Encoded lengths and naming defaults
//! - [`RegistryConfig`]: Suffix marker and primary-key naming for one registry
//!
//! ## Usage
//!
//! ```ignore
//! use oidcolumns::config::RegistryConfig;
//!
//! let config = RegistryConfig::builder()
//!     .suffix("_ref")
//!     .conventional_primary_key("id")
//!     .build()?;
//! ```

pub mod constants;
pub use constants::*;

use eyre::{ensure, Result};

/// Naming settings for one column registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    suffix: String,
    conventional_primary_key: String,
    lookup_method: String,
}

impl RegistryConfig {
    pub fn builder() -> RegistryConfigBuilder {
        RegistryConfigBuilder::default()
    }

    /// Lower-cased suffix that marks a column for auto-detection.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Accessor name the host uses for primary keys by convention.
    pub fn conventional_primary_key(&self) -> &str {
        &self.conventional_primary_key
    }

    /// Class method that looks records up by primary key.
    pub fn lookup_method(&self) -> &str {
        &self.lookup_method
    }

    pub(crate) fn matches_suffix(&self, column_name: &str) -> bool {
        column_name.to_ascii_lowercase().ends_with(&self.suffix)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_OBJECTID_SUFFIX.to_string(),
            conventional_primary_key: DEFAULT_PRIMARY_KEY_NAME.to_string(),
            lookup_method: PRIMARY_KEY_LOOKUP_METHOD.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RegistryConfigBuilder {
    suffix: Option<String>,
    conventional_primary_key: Option<String>,
    lookup_method: Option<String>,
}

impl RegistryConfigBuilder {
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn conventional_primary_key(mut self, name: impl Into<String>) -> Self {
        self.conventional_primary_key = Some(name.into());
        self
    }

    pub fn lookup_method(mut self, name: impl Into<String>) -> Self {
        self.lookup_method = Some(name.into());
        self
    }

    pub fn build(self) -> Result<RegistryConfig> {
        let defaults = RegistryConfig::default();

        let suffix = self
            .suffix
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or(defaults.suffix);
        ensure!(!suffix.is_empty(), "objectid column suffix cannot be empty");

        let conventional_primary_key = self
            .conventional_primary_key
            .map(|s| s.trim().to_ascii_lowercase())
            .unwrap_or(defaults.conventional_primary_key);
        ensure!(
            !conventional_primary_key.is_empty(),
            "conventional primary key name cannot be empty"
        );

        let lookup_method = self
            .lookup_method
            .map(|s| s.trim().to_string())
            .unwrap_or(defaults.lookup_method);
        ensure!(
            !lookup_method.is_empty(),
            "primary key lookup method name cannot be empty"
        );

        Ok(RegistryConfig {
            suffix,
            conventional_primary_key,
            lookup_method,
        })
    }
}
