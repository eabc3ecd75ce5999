//! Link command handlers

use anyhow::{bail, Result};

use curricle_core::{normalize_url, validate_title, CourseStore, Item, ItemKind};

use crate::commands::{resolve_item_id, resolve_module_id};
use crate::output::Output;

/// Add a link
pub fn add(
    store: &mut CourseStore,
    url: &str,
    title: Option<String>,
    module: Option<String>,
    output: &Output,
) -> Result<()> {
    let url = normalize_url(url)?;
    let title = match title {
        Some(title) => validate_title(&title)?,
        None => url.clone(),
    };
    let module_id = module
        .map(|raw| resolve_module_id(store, &raw))
        .transpose()?;

    let id = store.add_item(Item::link(module_id, title, url));
    output.success(&format!("Link added: {}", id));
    if let Some(item) = store.document().item(&id) {
        output.print_item(item);
    }
    Ok(())
}

/// Edit a link's title or URL
pub fn edit(
    store: &mut CourseStore,
    id: &str,
    title: Option<String>,
    url: Option<String>,
    output: &Output,
) -> Result<()> {
    if title.is_none() && url.is_none() {
        bail!("Nothing to change. Pass --title and/or --url.");
    }

    let id = resolve_item_id(store, id)?;
    let mut item = store
        .document()
        .item(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    if item.kind != ItemKind::Link {
        bail!("Item {} is not a link. Use `file rename` for files.", id);
    }

    if let Some(title) = title {
        item.title = validate_title(&title)?;
    }
    if let Some(url) = url {
        item.url = Some(normalize_url(&url)?);
    }

    store.update_item(&item);
    output.success("Link updated");
    output.print_item(&item);
    Ok(())
}
