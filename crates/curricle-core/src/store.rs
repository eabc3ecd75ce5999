//! Unified document store
//!
//! `CourseStore` owns the in-memory [`CourseDocument`] and rewrites
//! both durable entries after every mutating command, so a restart
//! reconstructs the same outline.
//!
//! Persistence is a convenience, not a transaction log: a read that
//! fails (missing entry, unreadable file, corrupt JSON) falls back to
//! the empty collection, and a write that fails is logged and
//! swallowed. Mutations never fail because storage did.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = CourseStore::open()?;
//!
//! let module = store.create_module("Algebra");
//! store.add_item(Item::link(Some(module), "Khan Academy", "https://khanacademy.org"));
//!
//! let visible = store.search("khan");
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::config::Config;
use crate::document::{CourseDocument, ModuleRemoval};
use crate::drag::{DragController, DragOutcome};
use crate::entity_id::EntityId;
use crate::filter::{filter_course, Filtered};
use crate::models::{FileMeta, Item, ItemKind, Module};
use crate::storage::{EntryStore, ITEMS_KEY, MODULES_KEY};
use crate::transfer::{self, TransferError};

/// Document plus persistence
pub struct CourseStore {
    doc: CourseDocument,
    entries: EntryStore,
}

impl CourseStore {
    /// Open the store with configuration from the default location
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    ///
    /// Both entries are read once here; anything unreadable becomes the
    /// empty collection.
    pub fn open_with_config(config: Config) -> Result<Self> {
        let entries = EntryStore::new(config);
        let modules: Vec<Module> = load_entry(&entries, MODULES_KEY);
        let items: Vec<Item> = load_entry(&entries, ITEMS_KEY);

        Ok(Self {
            doc: CourseDocument::from_parts(modules, items),
            entries,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.entries.config()
    }

    /// The in-memory document
    pub fn document(&self) -> &CourseDocument {
        &self.doc
    }

    /// Mutable access to the document for display-state changes
    ///
    /// Expanded/collapsed flags are session state and never persisted,
    /// so no save is needed after touching them. Collection mutations
    /// should go through the store commands instead.
    pub fn document_mut(&mut self) -> &mut CourseDocument {
        &mut self.doc
    }

    /// All modules, in display order
    pub fn modules(&self) -> &[Module] {
        self.doc.modules()
    }

    /// All items, in display order
    pub fn items(&self) -> &[Item] {
        self.doc.items()
    }

    // ==================== Module commands ====================

    /// Create a module and append it to the sequence
    pub fn create_module(&mut self, name: impl Into<String>) -> EntityId {
        let id = self.doc.add_module(Module::new(name));
        self.persist();
        id
    }

    /// Rename a module; false when the id is unknown
    pub fn rename_module(&mut self, id: &EntityId, name: impl Into<String>) -> bool {
        let changed = self.doc.rename_module(id, name);
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete a module and every item it owns
    pub fn delete_module(&mut self, id: &EntityId) -> Option<ModuleRemoval> {
        let removal = self.doc.delete_module(id)?;
        for item in &removal.items {
            self.remove_cached_file(item);
        }
        self.persist();
        Some(removal)
    }

    /// Relocate a module to another module's position
    pub fn reorder_modules(&mut self, source: &EntityId, dest: &EntityId) -> bool {
        let changed = self.doc.reorder_modules(source, dest);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Item commands ====================

    /// Append an item
    pub fn add_item(&mut self, item: Item) -> EntityId {
        let id = self.doc.add_item(item);
        self.persist();
        id
    }

    /// Attach a local file as a new file item
    ///
    /// Copies the file into the managed files directory and stores that
    /// path as the item's transient handle. Without an explicit title,
    /// the file stem is used, matching how uploads are titled.
    pub fn attach_file(
        &mut self,
        source: &Path,
        title: Option<String>,
        module_id: Option<EntityId>,
    ) -> Result<EntityId> {
        let metadata = fs::metadata(source)
            .with_context(|| format!("Cannot read file: {}", source.display()))?;
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .context("Path has no file name")?;
        let file_type = source
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase());
        let title = title.unwrap_or_else(|| {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| file_name.clone())
        });

        let mut item = Item::file(
            module_id,
            title,
            FileMeta {
                file_name: file_name.clone(),
                file_size: metadata.len(),
                file_type,
                file_url: None,
            },
        );

        let files_dir = self.config().files_dir();
        fs::create_dir_all(&files_dir)
            .with_context(|| format!("Failed to create files directory: {:?}", files_dir))?;
        let cached = files_dir.join(format!("{}-{}", item.id, file_name));
        fs::copy(source, &cached)
            .with_context(|| format!("Failed to copy file into {:?}", cached))?;
        item.file_url = Some(cached.display().to_string());

        let id = self.doc.add_item(item);
        self.persist();
        Ok(id)
    }

    /// Replace an item's fields in place; false when the id is unknown
    pub fn update_item(&mut self, updated: &Item) -> bool {
        let changed = self.doc.update_item(updated);
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete a single item
    pub fn delete_item(&mut self, id: &EntityId) -> Option<Item> {
        let removed = self.doc.delete_item(id)?;
        self.remove_cached_file(&removed);
        self.persist();
        Some(removed)
    }

    /// Move an item to a new group and/or position
    ///
    /// See [`CourseDocument::move_item`] for the splice-vs-append
    /// semantics.
    pub fn move_item(
        &mut self,
        item_id: &EntityId,
        dest_module: Option<&EntityId>,
        dest_item: Option<&EntityId>,
    ) -> bool {
        let changed = self.doc.move_item(item_id, dest_module, dest_item);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Gestures, search, transfer ====================

    /// Reconcile a drop gesture and persist whatever it changed
    pub fn reconcile_drop(
        &mut self,
        controller: &mut DragController,
        over: Option<&str>,
    ) -> DragOutcome {
        let outcome = controller.drop_on(&mut self.doc, over);
        if outcome.changed() {
            self.persist();
        }
        outcome
    }

    /// Filter the document by a free-text query
    pub fn search(&self, query: &str) -> Filtered {
        filter_course(query, self.doc.modules(), self.doc.items())
    }

    /// Serialize the document for export
    pub fn export_json(&self) -> Result<String, TransferError> {
        transfer::export_json(self.doc.modules(), self.doc.items())
    }

    /// Replace the document with an imported course file
    ///
    /// Nothing changes unless the whole file decodes.
    pub fn import_json(&mut self, raw: &str) -> Result<(), TransferError> {
        let data = transfer::import_json(raw)?;
        self.doc.replace_all(data.modules, data.items);
        self.persist();
        Ok(())
    }

    /// Reset the document to empty
    ///
    /// Confirmation is the caller's responsibility.
    pub fn clear_all(&mut self) {
        for item in self.doc.items().to_vec() {
            self.remove_cached_file(&item);
        }
        self.doc.clear();
        self.persist();
    }

    // ==================== Persistence ====================

    /// Rewrite both durable entries from the in-memory document
    ///
    /// Failures degrade to in-memory-only operation with a warning.
    fn persist(&self) {
        self.persist_entry(MODULES_KEY, &self.doc.modules());
        self.persist_entry(ITEMS_KEY, &self.doc.items());
    }

    fn persist_entry<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(error) => {
                warn!(key, %error, "failed to serialize entry; change not saved");
                return;
            }
        };
        if let Err(error) = self.entries.write(key, &json) {
            warn!(key, %error, "failed to persist entry; continuing in memory");
        }
    }

    /// Best-effort removal of a file item's cached copy
    fn remove_cached_file(&self, item: &Item) {
        if item.kind != ItemKind::File {
            return;
        }
        let Some(path) = &item.file_url else {
            return;
        };
        if let Err(error) = fs::remove_file(path) {
            warn!(%path, %error, "failed to remove cached file copy");
        }
    }
}

/// Read one entry, falling back to the empty value on any failure
fn load_entry<T: DeserializeOwned + Default>(entries: &EntryStore, key: &str) -> T {
    match entries.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "stored entry is corrupt; starting empty");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(error) => {
            warn!(key, %error, "failed to read stored entry; starting empty");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            export_dir: None,
        }
    }

    fn open(temp_dir: &TempDir) -> CourseStore {
        CourseStore::open_with_config(test_config(temp_dir)).unwrap()
    }

    #[test]
    fn test_open_creates_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = open(&temp_dir);
        assert!(store.document().is_empty());
    }

    #[test]
    fn test_mutations_persist_across_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let (module_id, item_id) = {
            let mut store = open(&temp_dir);
            let module_id = store.create_module("Algebra");
            let item_id = store.add_item(Item::link(
                Some(module_id.clone()),
                "Khan Academy",
                "https://khanacademy.org",
            ));
            (module_id, item_id)
        };

        let store = open(&temp_dir);
        assert_eq!(store.modules().len(), 1);
        assert_eq!(store.modules()[0].id, module_id);
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].id, item_id);
        assert_eq!(store.items()[0].title, "Khan Academy");
    }

    #[test]
    fn test_order_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let ids = {
            let mut store = open(&temp_dir);
            let a = store.create_module("A");
            let b = store.create_module("B");
            let c = store.create_module("C");
            // Move A to C's position.
            assert!(store.reorder_modules(&a, &c));
            vec![b, c, a]
        };

        let store = open(&temp_dir);
        let order: Vec<_> = store.modules().iter().map(|m| m.id.clone()).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_corrupt_entry_falls_back_to_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let entries = EntryStore::new(config.clone());
        entries.write(MODULES_KEY, "{{{ not json").unwrap();
        entries.write(ITEMS_KEY, "[]").unwrap();

        let store = CourseStore::open_with_config(config).unwrap();
        assert!(store.modules().is_empty());
    }

    #[test]
    fn test_delete_module_cascades_and_persists() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = open(&temp_dir);
            let module_id = store.create_module("Algebra");
            store.add_item(Item::link(
                Some(module_id.clone()),
                "Khan Academy",
                "https://khanacademy.org",
            ));
            store.add_item(Item::link(None, "Wikipedia", "https://wikipedia.org"));

            let removal = store.delete_module(&module_id).unwrap();
            assert_eq!(removal.items.len(), 1);
        }

        let store = open(&temp_dir);
        assert!(store.modules().is_empty());
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].title, "Wikipedia");
    }

    #[test]
    fn test_attach_file_copies_into_files_dir() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("syllabus.pdf");
        fs::write(&source, b"fake pdf bytes").unwrap();

        let mut store = open(&temp_dir);
        let id = store.attach_file(&source, None, None).unwrap();

        let item = store.document().item(&id).unwrap();
        assert_eq!(item.kind, ItemKind::File);
        // Title defaults to the file stem.
        assert_eq!(item.title, "syllabus");
        assert_eq!(item.file_name.as_deref(), Some("syllabus.pdf"));
        assert_eq!(item.file_size, Some(14));
        assert_eq!(item.file_type.as_deref(), Some("pdf"));

        let cached = item.file_url.clone().unwrap();
        assert!(Path::new(&cached).exists());
        assert!(cached.starts_with(store.config().files_dir().to_str().unwrap()));
    }

    #[test]
    fn test_delete_item_removes_cached_copy() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("notes.txt");
        fs::write(&source, b"notes").unwrap();

        let mut store = open(&temp_dir);
        let id = store.attach_file(&source, Some("Notes".to_string()), None).unwrap();
        let cached = store.document().item(&id).unwrap().file_url.clone().unwrap();
        assert!(Path::new(&cached).exists());

        store.delete_item(&id).unwrap();
        assert!(!Path::new(&cached).exists());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_attach_missing_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        let result = store.attach_file(Path::new("/nonexistent/file.pdf"), None, None);
        assert!(result.is_err());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        let module_id = store.create_module("Algebra");
        store.add_item(Item::link(
            Some(module_id),
            "Khan Academy",
            "https://khanacademy.org",
        ));
        let exported = store.export_json().unwrap();

        let other_dir = TempDir::new().unwrap();
        let mut other = open(&other_dir);
        other.import_json(&exported).unwrap();

        assert_eq!(other.modules(), store.modules());
        assert_eq!(other.items(), store.items());
    }

    #[test]
    fn test_failed_import_leaves_document_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);
        store.create_module("Algebra");

        assert!(store.import_json(r#"{"modules": []}"#).is_err());
        assert!(store.import_json("garbage").is_err());
        assert_eq!(store.modules().len(), 1);
    }

    #[test]
    fn test_clear_all_persists_empty() {
        let temp_dir = TempDir::new().unwrap();

        {
            let mut store = open(&temp_dir);
            let module_id = store.create_module("Algebra");
            store.add_item(Item::link(Some(module_id), "a", "https://a.example"));
            store.clear_all();
            assert!(store.document().is_empty());
        }

        let store = open(&temp_dir);
        assert!(store.document().is_empty());
    }

    #[test]
    fn test_search_uses_filter_semantics() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = open(&temp_dir);

        let module_id = store.create_module("Algebra");
        store.add_item(Item::link(
            Some(module_id),
            "Homework",
            "https://hw.example",
        ));
        store.add_item(Item::link(None, "Khan Academy", "https://khanacademy.org"));

        let hit = store.search("alg");
        assert_eq!(hit.modules.len(), 1);
        // The module's item rides along; the standalone item does not.
        assert_eq!(hit.items.len(), 1);
        assert_eq!(hit.items[0].title, "Homework");
    }

    #[test]
    fn test_reconcile_drop_persists() {
        let temp_dir = TempDir::new().unwrap();

        let (first, second) = {
            let mut store = open(&temp_dir);
            let first = store.create_module("First");
            let second = store.create_module("Second");

            let mut controller = DragController::new();
            controller.start(&format!("module-{}", first));
            let outcome =
                store.reconcile_drop(&mut controller, Some(&format!("module-{}", second)));
            assert!(outcome.changed());
            (first, second)
        };

        let store = open(&temp_dir);
        let order: Vec<_> = store.modules().iter().map(|m| m.id.clone()).collect();
        assert_eq!(order, vec![second, first]);
    }

    #[test]
    fn test_update_item_persists() {
        let temp_dir = TempDir::new().unwrap();

        let id = {
            let mut store = open(&temp_dir);
            let id = store.add_item(Item::link(None, "Old title", "https://a.example"));
            let mut updated = store.document().item(&id).unwrap().clone();
            updated.title = "New title".to_string();
            assert!(store.update_item(&updated));
            id
        };

        let store = open(&temp_dir);
        assert_eq!(store.document().item(&id).unwrap().title, "New title");
    }
}
