//! File command handlers

use std::path::Path;

use anyhow::{bail, Result};

use curricle_core::{validate_title, CourseStore, ItemKind};

use crate::commands::{resolve_item_id, resolve_module_id};
use crate::output::Output;

/// Attach a local file as a resource
pub fn add(
    store: &mut CourseStore,
    path: &Path,
    title: Option<String>,
    module: Option<String>,
    output: &Output,
) -> Result<()> {
    let title = title.map(|t| validate_title(&t)).transpose()?;
    let module_id = module
        .map(|raw| resolve_module_id(store, &raw))
        .transpose()?;

    let id = store.attach_file(path, title, module_id)?;
    output.success(&format!("File uploaded: {}", id));
    if let Some(item) = store.document().item(&id) {
        output.print_item(item);
    }
    Ok(())
}

/// Rename a file resource
pub fn rename(store: &mut CourseStore, id: &str, title: &str, output: &Output) -> Result<()> {
    let title = validate_title(title)?;
    let id = resolve_item_id(store, id)?;
    let mut item = store
        .document()
        .item(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Item not found: {}", id))?;

    if item.kind != ItemKind::File {
        bail!("Item {} is not a file. Use `link edit` for links.", id);
    }

    item.title = title;
    store.update_item(&item);
    output.success("File renamed");
    Ok(())
}
