//! Whole-course command handlers: outline listing and clear-all

use anyhow::Result;

use curricle_core::CourseStore;

use crate::output::Output;
use crate::prompt::confirm;

/// Print the whole outline
pub fn list(store: &CourseStore, output: &Output) -> Result<()> {
    output.print_outline(store.document());
    Ok(())
}

/// Delete all modules and resources
pub fn clear(store: &mut CourseStore, output: &Output) -> Result<()> {
    if store.document().is_empty() {
        output.info("Nothing to clear.");
        return Ok(());
    }

    if output.should_prompt()
        && !confirm("Delete all modules and resources? This cannot be undone.")?
    {
        println!("Cancelled.");
        return Ok(());
    }

    store.clear_all();
    output.success("All data cleared");
    Ok(())
}
