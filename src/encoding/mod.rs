//! # Encoding Module
//!
//! This module provides the ObjectId codec:
//!
//! - **Binary encoding**: 12 raw bytes, used by binary columns
//! - **Hex encoding**: 24 lowercase hex characters, used by string columns
//!
//! Parsing accepts either encoding (hex case-insensitively) as well as an
//! already-decoded `ObjectId`.

pub mod objectid;

pub use objectid::{parse, parse_binary, parse_hex, to_binary, to_hex_string};
