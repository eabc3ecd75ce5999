//! Durable persistence for the course document
//!
//! Two string-keyed entries, one per collection, written after every
//! mutation and read back on startup.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{EntryStore, ITEMS_KEY, MODULES_KEY};
