//! Module command handlers

use anyhow::Result;

use curricle_core::{validate_module_name, CourseStore};

use crate::commands::resolve_module_id;
use crate::output::Output;
use crate::prompt::confirm;

/// Create a new module
pub fn create(store: &mut CourseStore, name: &str, output: &Output) -> Result<()> {
    let name = validate_module_name(name)?;
    let id = store.create_module(name.clone());
    output.success(&format!("Module \"{}\" created: {}", name, id));
    Ok(())
}

/// List all modules
pub fn list(store: &CourseStore, output: &Output) -> Result<()> {
    output.print_modules(store.modules(), store.document());
    Ok(())
}

/// Rename a module
pub fn rename(store: &mut CourseStore, id: &str, name: &str, output: &Output) -> Result<()> {
    let name = validate_module_name(name)?;
    let id = resolve_module_id(store, id)?;

    store.rename_module(&id, name.clone());
    output.success(&format!("Module \"{}\" updated", name));
    Ok(())
}

/// Delete a module and everything it owns
pub fn delete(store: &mut CourseStore, id: &str, output: &Output) -> Result<()> {
    let id = resolve_module_id(store, id)?;
    let module = store
        .document()
        .module(&id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Module not found: {}", id))?;
    let item_count = store.document().group_items(Some(&id)).len();

    if output.should_prompt() {
        let message = if item_count > 0 {
            format!(
                "Delete \"{}\" and its {} item{}?",
                module.name,
                item_count,
                if item_count > 1 { "s" } else { "" }
            )
        } else {
            format!("Delete \"{}\"?", module.name)
        };
        if !confirm(&message)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removal = store.delete_module(&id);
    let removed = removal.map(|r| r.items.len()).unwrap_or(0);
    output.success(&format!(
        "Module \"{}\" deleted ({} item(s) removed with it)",
        module.name, removed
    ));
    Ok(())
}

/// Move a module to another module's position
pub fn reorder(store: &mut CourseStore, source: &str, dest: &str, output: &Output) -> Result<()> {
    let source = resolve_module_id(store, source)?;
    let dest = resolve_module_id(store, dest)?;

    if store.reorder_modules(&source, &dest) {
        output.success("Module reordered");
    } else {
        output.info("Nothing to move.");
    }
    Ok(())
}
