//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! The `success`/`info`/`error` trio is the notification surface:
//! commands report what happened through it instead of printing ad hoc.

use curricle_core::{CourseDocument, Filtered, Item, ItemKind, Module};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print the whole outline: standalone items first, then modules
    pub fn print_outline(&self, doc: &CourseDocument) {
        match self.format {
            OutputFormat::Human => {
                if doc.is_empty() {
                    println!("Nothing here yet. Add a module or a resource to get started.");
                    return;
                }

                let standalone = doc.group_items(None);
                for item in &standalone {
                    println!("{}", item_line(item));
                }
                if !standalone.is_empty() {
                    println!();
                }

                for module in doc.modules() {
                    let items = doc.group_items(Some(&module.id));
                    println!(
                        "{} | {} ({} item{})",
                        short_id(module.id.as_str()),
                        module.name,
                        items.len(),
                        if items.len() == 1 { "" } else { "s" }
                    );
                    for item in items {
                        println!("    {}", item_line(item));
                    }
                }

                println!(
                    "\n{} module(s), {} item(s)",
                    doc.modules().len(),
                    doc.items().len()
                );
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "modules": doc.modules(),
                    "items": doc.items(),
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for module in doc.modules() {
                    println!("{}", module.id);
                }
                for item in doc.items() {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a list of modules
    pub fn print_modules(&self, modules: &[Module], doc: &CourseDocument) {
        match self.format {
            OutputFormat::Human => {
                if modules.is_empty() {
                    println!("No modules found.");
                    return;
                }
                for module in modules {
                    let count = doc.group_items(Some(&module.id)).len();
                    println!(
                        "{} | {} | {} item(s)",
                        short_id(module.id.as_str()),
                        truncate(&module.name, 40),
                        count
                    );
                }
                println!("\n{} module(s)", modules.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(modules).unwrap());
            }
            OutputFormat::Quiet => {
                for module in modules {
                    println!("{}", module.id);
                }
            }
        }
    }

    /// Print a list of items
    pub fn print_items(&self, items: &[&Item]) {
        match self.format {
            OutputFormat::Human => {
                if items.is_empty() {
                    println!("No items found.");
                    return;
                }
                for item in items {
                    println!("{}", item_line(item));
                }
                println!("\n{} item(s)", items.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(items).unwrap());
            }
            OutputFormat::Quiet => {
                for item in items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a single item in detail
    pub fn print_item(&self, item: &Item) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", item.id);
                println!("Kind:   {}", kind_label(item.kind));
                println!("Title:  {}", item.title);
                match &item.module_id {
                    Some(id) => println!("Module: {}", id),
                    None => println!("Module: (standalone)"),
                }
                if let Some(url) = &item.url {
                    println!("URL:    {}", url);
                }
                if let Some(name) = &item.file_name {
                    println!("File:   {}", name);
                }
                if let Some(size) = item.file_size {
                    println!("Size:   {} KB", size / 1024);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(item).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", item.id);
            }
        }
    }

    /// Print search results
    pub fn print_search(&self, filtered: &Filtered, query: &str) {
        match self.format {
            OutputFormat::Human => {
                if filtered.modules.is_empty() && filtered.items.is_empty() {
                    println!("No results found for \"{}\"", query);
                    return;
                }

                let standalone: Vec<_> =
                    filtered.items.iter().filter(|i| i.is_standalone()).collect();
                for item in &standalone {
                    println!("{}", item_line(item));
                }
                if !standalone.is_empty() && !filtered.modules.is_empty() {
                    println!();
                }

                for module in &filtered.modules {
                    println!("{} | {}", short_id(module.id.as_str()), module.name);
                    for item in filtered
                        .items
                        .iter()
                        .filter(|i| i.module_id.as_ref() == Some(&module.id))
                    {
                        println!("    {}", item_line(item));
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "modules": filtered.modules,
                    "items": filtered.items,
                });
                println!("{}", serde_json::to_string_pretty(&json).unwrap());
            }
            OutputFormat::Quiet => {
                for module in &filtered.modules {
                    println!("{}", module.id);
                }
                for item in &filtered.items {
                    println!("{}", item.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", message),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"status": "info", "message": message}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an error message without aborting
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("✗ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "error", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// One-line rendering of an item
fn item_line(item: &Item) -> String {
    let detail = match item.kind {
        ItemKind::Link => item.url.clone().unwrap_or_default(),
        ItemKind::File => item.file_name.clone().unwrap_or_default(),
    };
    format!(
        "{} | {} | {} | {}",
        short_id(item.id.as_str()),
        kind_label(item.kind),
        truncate(&item.title, 35),
        truncate(&detail, 45)
    )
}

fn kind_label(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Link => "link",
        ItemKind::File => "file",
    }
}

/// Leading id characters, safe for short imported ids
fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len - 3])
    }
}
