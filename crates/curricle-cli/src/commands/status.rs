//! Status command handler

use anyhow::Result;

use curricle_core::{Config, CourseStore};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(store: &CourseStore, output: &Output) -> Result<()> {
    let module_count = store.modules().len();
    let item_count = store.items().len();
    let standalone_count = store.document().group_items(None).len();
    let config = store.config();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "counts": {
                        "modules": module_count,
                        "items": item_count,
                        "standalone_items": standalone_count
                    },
                    "data_dir": config.data_dir,
                    "config_file": Config::config_file_path()
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{} {}", module_count, item_count);
        }
        OutputFormat::Human => {
            println!("Curricle Status");
            println!("===============");
            println!();
            println!("Contents:");
            println!("  Modules: {}", module_count);
            println!(
                "  Items:   {} ({} standalone)",
                item_count, standalone_count
            );
            println!();
            println!("Storage:");
            println!("  Location:    {}", config.data_dir.display());
            println!("  Config file: {}", Config::config_file_path().display());
        }
    }

    Ok(())
}
