//! Search command handler

use anyhow::Result;

use curricle_core::CourseStore;

use crate::output::Output;

/// Filter the outline by a free-text query
pub fn run(store: &CourseStore, query: &str, output: &Output) -> Result<()> {
    let filtered = store.search(query);
    output.print_search(&filtered, query);
    Ok(())
}
