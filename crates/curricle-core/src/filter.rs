//! Search filtering
//!
//! Derives the visible subset of modules and items from a free-text
//! query. A module is visible when its own name matches or when any of
//! its items match, and a visible module keeps all of its items, so a
//! hit anywhere in a module surfaces the whole module. Standalone items
//! are visible only on their own merits.

use std::collections::HashSet;

use crate::entity_id::EntityId;
use crate::models::{Item, Module};

/// The visible subset produced by [`filter_course`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filtered {
    pub modules: Vec<Module>,
    pub items: Vec<Item>,
}

/// Filter modules and items by a free-text query
///
/// Pure function of its inputs; an empty (or all-whitespace) query
/// passes both collections through unchanged. Matching is
/// case-insensitive containment over module names and item titles,
/// URLs, and file names.
pub fn filter_course(query: &str, modules: &[Module], items: &[Item]) -> Filtered {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Filtered {
            modules: modules.to_vec(),
            items: items.to_vec(),
        };
    }

    let mut visible: HashSet<&EntityId> = modules
        .iter()
        .filter(|m| m.name.to_lowercase().contains(&query))
        .map(|m| &m.id)
        .collect();
    visible.extend(
        items
            .iter()
            .filter(|i| i.matches_query(&query))
            .filter_map(|i| i.module_id.as_ref()),
    );

    let filtered_modules = modules
        .iter()
        .filter(|m| visible.contains(&m.id))
        .cloned()
        .collect();

    let filtered_items = items
        .iter()
        .filter(|item| match &item.module_id {
            // Standalone items stand or fall on their own.
            None => item.matches_query(&query),
            // Module-owned items ride along with a visible module.
            Some(module_id) => visible.contains(module_id),
        })
        .cloned()
        .collect();

    Filtered {
        modules: filtered_modules,
        items: filtered_items,
    }
}
