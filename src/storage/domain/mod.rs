//! Value types for blob addressing.

mod path;

pub use path::{BlobPath, BlobPathError, is_valid_segment};
