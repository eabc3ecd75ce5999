//! Item command handlers

use anyhow::{bail, Result};

use curricle_core::{CourseStore, ItemKind};

use crate::commands::{resolve_item_id, resolve_module_id};
use crate::output::Output;
use crate::prompt::confirm;

/// List items, optionally scoped to one group
pub fn list(
    store: &CourseStore,
    module: Option<String>,
    standalone: bool,
    output: &Output,
) -> Result<()> {
    let items = if standalone {
        store.document().group_items(None)
    } else if let Some(raw) = module {
        let id = resolve_module_id(store, &raw)?;
        store.document().group_items(Some(&id))
    } else {
        store.items().iter().collect()
    };

    output.print_items(&items);
    Ok(())
}

/// Delete an item
pub fn delete(store: &mut CourseStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let title = store
        .document()
        .item(&id)
        .map(|i| i.title.clone())
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    if output.should_prompt() && !confirm(&format!("Delete \"{}\"?", title))? {
        println!("Cancelled.");
        return Ok(());
    }

    store.delete_item(&id);
    output.success("Resource deleted");
    Ok(())
}

/// Move an item into a module, out to standalone, or before another item
pub fn move_item(
    store: &mut CourseStore,
    id: &str,
    module: Option<String>,
    standalone: bool,
    before: Option<String>,
    output: &Output,
) -> Result<()> {
    let id = resolve_item_id(store, id)?;

    let moved = if let Some(raw) = before {
        let dest = resolve_item_id(store, &raw)?;
        store.move_item(&id, None, Some(&dest))
    } else if let Some(raw) = module {
        let dest = resolve_module_id(store, &raw)?;
        store.move_item(&id, Some(&dest), None)
    } else if standalone {
        store.move_item(&id, None, None)
    } else {
        bail!("Pick a destination: --module, --standalone, or --before.");
    };

    if moved {
        output.success("Resource moved");
    } else {
        output.info("Nothing to move.");
    }
    Ok(())
}

/// Open a link in the browser, or a file with the default application
pub fn open(store: &CourseStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_item_id(store, id)?;
    let item = store
        .document()
        .item(&id)
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    let target = match item.kind {
        ItemKind::Link => item
            .url
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Link {} has no URL", id))?,
        ItemKind::File => {
            let path = item
                .file_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("File {} has no local copy to open", id))?;
            if !std::path::Path::new(&path).exists() {
                bail!("Cached copy is gone: {}", path);
            }
            path
        }
    };

    open::that(&target)?;
    output.success(&format!("Opened {}", target));
    Ok(())
}
