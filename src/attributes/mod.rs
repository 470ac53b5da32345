//! File attributes
//!
//! The catalog of attribute names a query may reference, and the per-entry
//! bag that answers them from filesystem metadata.

mod catalog;
mod file_attributes;

pub use catalog::{canonical_name, AttributeCatalog};
pub use file_attributes::{format_size, join_path, FileAttributes};
