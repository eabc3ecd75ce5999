//! Curricle Core Library
//!
//! This crate provides the core functionality for Curricle, a
//! local-first course outline builder: ordered modules holding link and
//! file items, reordered through drag-gesture reconciliation and
//! persisted to a small key/value store.
//!
//! # Architecture
//!
//! The in-memory [`CourseDocument`] is the source of truth; the
//! [`CourseStore`] rewrites two durable entries (one per collection)
//! after every mutation. Everything interactive — forms, confirmation
//! dialogs, notifications, pointer input — lives outside this crate and
//! talks to it through the store commands.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = CourseStore::open()?;
//!
//! // Build an outline
//! let module = store.create_module("Algebra");
//! store.add_item(Item::link(Some(module), "Khan Academy", "https://khanacademy.org"));
//!
//! // Search it
//! let visible = store.search("khan");
//! ```
//!
//! # Modules
//!
//! - `store`: document plus persistence (main entry point)
//! - `document`: the ordered collections and their mutation commands
//! - `models`: data structures for modules and items
//! - `drag`: drag-gesture reconciliation
//! - `filter`: free-text search filtering
//! - `outline`: outline-sidebar highlight tracking
//! - `transfer`: JSON import/export
//! - `storage`: durable key/value entries
//! - `config`: application configuration

pub mod config;
pub mod document;
pub mod drag;
pub mod entity_id;
pub mod filter;
pub mod models;
pub mod outline;
pub mod storage;
pub mod store;
pub mod transfer;

pub use config::Config;
pub use document::{CourseDocument, ModuleRemoval};
pub use drag::{DragController, DragKind, DragOutcome, DragRef};
pub use entity_id::EntityId;
pub use filter::{filter_course, Filtered};
pub use models::{
    normalize_url, validate_module_name, validate_title, FileMeta, Item, ItemKind, Module,
    ValidationError,
};
pub use outline::{OutlineTracker, ScrollRequest};
pub use storage::{EntryStore, StorageError};
pub use store::CourseStore;
pub use transfer::{CourseData, TransferError};
