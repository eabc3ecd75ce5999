//! Export and import command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use curricle_core::{transfer, CourseStore};

use crate::output::Output;
use crate::prompt::confirm;

/// Export the course to a JSON file
pub fn export(store: &CourseStore, path: Option<PathBuf>, output: &Output) -> Result<()> {
    let json = store
        .export_json()
        .context("Failed to serialize the course")?;

    let path = path.unwrap_or_else(|| {
        let name = transfer::export_file_name(Utc::now());
        match &store.config().export_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    });

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create export directory: {:?}", parent))?;
        }
    }
    fs::write(&path, json).with_context(|| format!("Failed to write export to {:?}", path))?;

    output.success(&format!("Course exported to {}", path.display()));
    Ok(())
}

/// Import a course file, replacing the current course
pub fn import(store: &mut CourseStore, path: &PathBuf, output: &Output) -> Result<()> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("Failed to read course file: {:?}", path))?;

    if !store.document().is_empty()
        && output.should_prompt()
        && !confirm("Importing replaces the current course. Continue?")?
    {
        println!("Cancelled.");
        return Ok(());
    }

    // A bad file must leave the existing course untouched; report it
    // as a notification rather than a crash.
    match store.import_json(&raw) {
        Ok(()) => {
            output.success(&format!(
                "Course imported: {} module(s), {} item(s)",
                store.modules().len(),
                store.items().len()
            ));
        }
        Err(error) => {
            output.error(&format!("Import failed: {}", error));
        }
    }
    Ok(())
}
