//! Command handlers

pub mod config;
pub mod course;
pub mod file;
pub mod item;
pub mod link;
pub mod module;
pub mod search;
pub mod status;
pub mod transfer;

use anyhow::{bail, Result};

use curricle_core::{CourseStore, EntityId};

/// Resolve a module ID (supports full ID or unique prefix)
pub fn resolve_module_id(store: &CourseStore, raw: &str) -> Result<EntityId> {
    let exact = EntityId::from(raw);
    if store.document().module(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<_> = store
        .modules()
        .iter()
        .filter(|m| m.id.as_str().starts_with(raw))
        .collect();

    match matches.len() {
        0 => bail!("No module found matching: {}", raw),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple modules match '{}':", raw);
            for module in &matches {
                eprintln!("  {} - {}", module.id, module.name);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

/// Resolve an item ID (supports full ID or unique prefix)
pub fn resolve_item_id(store: &CourseStore, raw: &str) -> Result<EntityId> {
    let exact = EntityId::from(raw);
    if store.document().item(&exact).is_some() {
        return Ok(exact);
    }

    let matches: Vec<_> = store
        .items()
        .iter()
        .filter(|i| i.id.as_str().starts_with(raw))
        .collect();

    match matches.len() {
        0 => bail!("No item found matching: {}", raw),
        1 => Ok(matches[0].id.clone()),
        _ => {
            eprintln!("Multiple items match '{}':", raw);
            for item in &matches {
                eprintln!("  {} - {}", item.id, item.title);
            }
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curricle_core::{Config, Item};
    use tempfile::TempDir;

    fn store_with_module(temp_dir: &TempDir) -> (CourseStore, EntityId) {
        let mut store = CourseStore::open_with_config(Config {
            data_dir: temp_dir.path().to_path_buf(),
            export_dir: None,
        })
        .unwrap();
        let id = store.create_module("Algebra");
        (store, id)
    }

    #[test]
    fn test_resolve_module_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let (store, id) = store_with_module(&temp_dir);

        let prefix = &id.as_str()[..6];
        assert_eq!(resolve_module_id(&store, prefix).unwrap(), id);
        assert_eq!(resolve_module_id(&store, id.as_str()).unwrap(), id);
    }

    #[test]
    fn test_resolve_module_no_match() {
        let temp_dir = TempDir::new().unwrap();
        let (store, _) = store_with_module(&temp_dir);
        assert!(resolve_module_id(&store, "zzz").is_err());
    }

    #[test]
    fn test_resolve_item_by_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let (mut store, _) = store_with_module(&temp_dir);
        let id = store.add_item(Item::link(None, "Khan", "https://khanacademy.org"));

        let prefix = &id.as_str()[..6];
        assert_eq!(resolve_item_id(&store, prefix).unwrap(), id);
    }
}
