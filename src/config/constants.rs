//! # Configuration Constants
//!
//! Encoded lengths and naming defaults. The two physical encodings of an
//! ObjectId are tied together:
//!
//! ```text
//! BINARY_OBJECTID_LENGTH (12 bytes)
//!       │
//!       └─> HEX_OBJECTID_LENGTH (24 chars, two hex digits per byte)
//! ```
//!
//! Both lengths double as the minimum declared column length accepted at
//! registration time.

/// Raw byte length of an ObjectId.
pub const BINARY_OBJECTID_LENGTH: usize = 12;

/// Character length of the hex-string encoding.
pub const HEX_OBJECTID_LENGTH: usize = BINARY_OBJECTID_LENGTH * 2;

/// Number of leading bytes holding the big-endian seconds timestamp.
pub const OBJECTID_TIMESTAMP_LENGTH: usize = 4;

/// Column-name suffix that marks a column for auto-detection.
pub const DEFAULT_OBJECTID_SUFFIX: &str = "_oid";

/// Primary-key accessor name hosts use by convention.
pub const DEFAULT_PRIMARY_KEY_NAME: &str = "id";

/// Class method name used for lookup by primary key.
pub const PRIMARY_KEY_LOOKUP_METHOD: &str = "find";

const _: () = assert!(HEX_OBJECTID_LENGTH == 2 * BINARY_OBJECTID_LENGTH);
const _: () = assert!(OBJECTID_TIMESTAMP_LENGTH < BINARY_OBJECTID_LENGTH);
