//! The course document
//!
//! `CourseDocument` owns the two ordered collections (modules and
//! items) and every mutation command the builder supports. Reordering
//! and cross-group moves rebuild the affected list in one step, so a
//! renderer iterating the collections never observes a half-moved
//! state.
//!
//! Lookup misses are not errors here: commands return `bool` or
//! `Option` and leave the document untouched when an id is unknown.
//! Per-module expanded/collapsed display state also lives here; it is
//! session state and is not persisted.

use std::collections::HashSet;

use crate::entity_id::EntityId;
use crate::models::{Item, Module};

/// What `delete_module` removed: the module and its cascaded items
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRemoval {
    pub module: Module,
    pub items: Vec<Item>,
}

/// In-memory course outline: ordered modules, ordered items
#[derive(Debug, Clone, Default)]
pub struct CourseDocument {
    modules: Vec<Module>,
    items: Vec<Item>,
    /// Modules the user has collapsed; everything else renders expanded
    collapsed: HashSet<EntityId>,
}

impl CourseDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from loaded collections
    pub fn from_parts(modules: Vec<Module>, items: Vec<Item>) -> Self {
        Self {
            modules,
            items,
            collapsed: HashSet::new(),
        }
    }

    /// All modules, in display order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// All items, in display order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Whether the document holds no modules and no items
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.items.is_empty()
    }

    /// Look up a module by id
    pub fn module(&self, id: &EntityId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == *id)
    }

    /// Look up an item by id
    pub fn item(&self, id: &EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.id == *id)
    }

    /// Items belonging to one group, in order
    ///
    /// `None` selects the standalone group.
    pub fn group_items(&self, module_id: Option<&EntityId>) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.module_id.as_ref() == module_id)
            .collect()
    }

    // ==================== Module commands ====================

    /// Append a module; it starts expanded
    pub fn add_module(&mut self, module: Module) -> EntityId {
        let id = module.id.clone();
        self.collapsed.remove(&id);
        self.modules.push(module);
        id
    }

    /// Rename a module in place, preserving id and position
    ///
    /// Returns false (and changes nothing) when the id is unknown.
    pub fn rename_module(&mut self, id: &EntityId, name: impl Into<String>) -> bool {
        match self.modules.iter_mut().find(|m| m.id == *id) {
            Some(module) => {
                module.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a module and every item it owns
    pub fn delete_module(&mut self, id: &EntityId) -> Option<ModuleRemoval> {
        let pos = self.modules.iter().position(|m| m.id == *id)?;
        let module = self.modules.remove(pos);
        self.collapsed.remove(id);

        let (owned, kept): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|i| i.module_id.as_ref() == Some(id));
        self.items = kept;

        Some(ModuleRemoval {
            module,
            items: owned,
        })
    }

    /// Relocate `source` to the position `dest` currently occupies
    ///
    /// Array-move semantics: the source module is removed, then inserted
    /// at the target's pre-removal index, shifting the modules between
    /// them. A missing id or `source == dest` is a no-op.
    pub fn reorder_modules(&mut self, source: &EntityId, dest: &EntityId) -> bool {
        if source == dest {
            return false;
        }
        let Some(from) = self.modules.iter().position(|m| m.id == *source) else {
            return false;
        };
        let Some(to) = self.modules.iter().position(|m| m.id == *dest) else {
            return false;
        };
        let module = self.modules.remove(from);
        self.modules.insert(to, module);
        true
    }

    // ==================== Item commands ====================

    /// Append an item
    pub fn add_item(&mut self, item: Item) -> EntityId {
        let id = item.id.clone();
        self.items.push(item);
        id
    }

    /// Replace an item's fields in place, preserving position
    ///
    /// The replacement is matched by `updated.id`; returns false when no
    /// item has that id.
    pub fn update_item(&mut self, updated: &Item) -> bool {
        match self.items.iter_mut().find(|i| i.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                true
            }
            None => false,
        }
    }

    /// Remove a single item; no cascade
    pub fn delete_item(&mut self, id: &EntityId) -> Option<Item> {
        let pos = self.items.iter().position(|i| i.id == *id)?;
        Some(self.items.remove(pos))
    }

    /// Move an item to a new group and/or position
    ///
    /// With `dest_item` set, the item joins that item's group (which may
    /// be the standalone group) spliced immediately before it, and
    /// `dest_module` is ignored. Without `dest_item`, the item is
    /// re-parented to `dest_module` and goes to the end of that group.
    /// Unknown ids, self-moves, and already-there assignments change
    /// nothing and return false.
    pub fn move_item(
        &mut self,
        item_id: &EntityId,
        dest_module: Option<&EntityId>,
        dest_item: Option<&EntityId>,
    ) -> bool {
        match dest_item {
            Some(dest) => self.move_item_before(item_id, dest),
            None => self.assign_item_group(item_id, dest_module),
        }
    }

    /// Splice an item into the destination item's group, just before it
    fn move_item_before(&mut self, item_id: &EntityId, dest_id: &EntityId) -> bool {
        if item_id == dest_id {
            return false;
        }
        let Some(active) = self.item(item_id).cloned() else {
            return false;
        };
        let Some(dest) = self.item(dest_id) else {
            return false;
        };
        let target_group = dest.module_id.clone();

        // Rebuild the whole list: everything outside the target group
        // first, then the target group with the moved item spliced in.
        let mut target: Vec<Item> = Vec::new();
        let mut others: Vec<Item> = Vec::new();
        for item in std::mem::take(&mut self.items) {
            if item.id == *item_id {
                continue;
            }
            if item.module_id == target_group {
                target.push(item);
            } else {
                others.push(item);
            }
        }

        let mut moved = active;
        moved.module_id = target_group;
        let dest_pos = target
            .iter()
            .position(|i| i.id == *dest_id)
            .unwrap_or(target.len());
        target.insert(dest_pos, moved);

        others.extend(target);
        self.items = others;
        true
    }

    /// Re-parent an item, appending it to the destination group
    fn assign_item_group(&mut self, item_id: &EntityId, module_id: Option<&EntityId>) -> bool {
        if let Some(mid) = module_id {
            if self.module(mid).is_none() {
                return false;
            }
        }
        let Some(pos) = self.items.iter().position(|i| i.id == *item_id) else {
            return false;
        };
        if self.items[pos].module_id.as_ref() == module_id {
            return false;
        }
        let mut item = self.items.remove(pos);
        item.module_id = module_id.cloned();
        self.items.push(item);
        true
    }

    // ==================== Whole-document commands ====================

    /// Reset both collections to empty
    pub fn clear(&mut self) {
        self.modules.clear();
        self.items.clear();
        self.collapsed.clear();
    }

    /// Replace both collections wholesale (import path)
    pub fn replace_all(&mut self, modules: Vec<Module>, items: Vec<Item>) {
        self.modules = modules;
        self.items = items;
        self.collapsed.clear();
    }

    // ==================== Display state ====================

    /// Whether a module renders expanded; unknown and fresh modules do
    pub fn is_expanded(&self, id: &EntityId) -> bool {
        !self.collapsed.contains(id)
    }

    /// Set one module's expanded flag
    pub fn set_expanded(&mut self, id: &EntityId, expanded: bool) {
        if expanded {
            self.collapsed.remove(id);
        } else {
            self.collapsed.insert(id.clone());
        }
    }

    /// Expand every module
    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }

    /// Collapse every module
    pub fn collapse_all(&mut self) {
        self.collapsed = self.modules.iter().map(|m| m.id.clone()).collect();
    }
}
