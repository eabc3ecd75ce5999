//! Curricle CLI
//!
//! Command-line interface for Curricle - local-first course outline
//! building with modules, links, and files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use curricle_core::CourseStore;

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "curricle")]
#[command(about = "Curricle - local-first course outline builder")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the whole outline (default when no command is given)
    #[command(alias = "ls")]
    List,
    /// Manage modules
    Module {
        #[command(subcommand)]
        command: ModuleCommands,
    },
    /// Manage link resources
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Manage file resources
    File {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Manage items of either kind
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Search modules and items
    Search {
        /// Search query
        query: String,
    },
    /// Export the course to a JSON file
    Export {
        /// Destination path (defaults to a timestamped file)
        path: Option<PathBuf>,
    },
    /// Import a course from a JSON file, replacing the current one
    Import {
        /// Course file to import
        path: PathBuf,
    },
    /// Delete all modules and resources
    Clear,
    /// Show status (counts, storage location)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum ModuleCommands {
    /// Create a new module
    #[command(alias = "add")]
    Create {
        /// Module name
        name: String,
    },
    /// List all modules
    #[command(alias = "ls")]
    List,
    /// Rename a module
    Rename {
        /// Module ID (full or prefix)
        id: String,
        /// New name
        name: String,
    },
    /// Delete a module and all its resources
    #[command(alias = "rm")]
    Delete {
        /// Module ID (full or prefix)
        id: String,
    },
    /// Move a module to another module's position
    #[command(alias = "mv")]
    Move {
        /// Module to move (full ID or prefix)
        source: String,
        /// Module whose position it takes
        dest: String,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Add a link
    #[command(alias = "create")]
    Add {
        /// URL to save (scheme optional, https assumed)
        url: String,
        /// Display title (defaults to the URL)
        #[arg(short, long)]
        title: Option<String>,
        /// Module to add the link to (standalone if omitted)
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Edit a link's title or URL
    Edit {
        /// Item ID (full or prefix)
        id: String,
        /// New display title
        #[arg(short, long)]
        title: Option<String>,
        /// New URL
        #[arg(short, long)]
        url: Option<String>,
    },
}

#[derive(Subcommand)]
enum FileCommands {
    /// Attach a local file
    #[command(alias = "create")]
    Add {
        /// File to attach
        path: PathBuf,
        /// Display title (defaults to the file stem)
        #[arg(short, long)]
        title: Option<String>,
        /// Module to add the file to (standalone if omitted)
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Rename a file resource
    Rename {
        /// Item ID (full or prefix)
        id: String,
        /// New display title
        title: String,
    },
}

#[derive(Subcommand)]
enum ItemCommands {
    /// List items
    #[command(alias = "ls")]
    List {
        /// Only items in this module
        #[arg(short, long, conflicts_with = "standalone")]
        module: Option<String>,
        /// Only standalone items
        #[arg(long)]
        standalone: bool,
    },
    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item ID (full or prefix)
        id: String,
    },
    /// Move an item between modules or before another item
    #[command(alias = "mv")]
    #[command(group(clap::ArgGroup::new("dest").required(true).multiple(false)))]
    Move {
        /// Item ID (full or prefix)
        id: String,
        /// Move into this module (appended at the end)
        #[arg(short, long, group = "dest")]
        module: Option<String>,
        /// Make the item standalone
        #[arg(long, group = "dest")]
        standalone: bool,
        /// Splice the item immediately before this item
        #[arg(short, long, group = "dest")]
        before: Option<String>,
    },
    /// Open a link in the browser or a file with the default app
    Open {
        /// Item ID (full or prefix)
        id: String,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, export_dir)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work without opening the store.
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), &output);
    }

    let mut store = CourseStore::open()?;
    tracing::debug!(data_dir = ?store.config().data_dir, "store opened");

    match cli.command.unwrap_or(Commands::List) {
        Commands::List => commands::course::list(&store, &output),
        Commands::Module { command } => handle_module_command(command, &mut store, &output),
        Commands::Link { command } => handle_link_command(command, &mut store, &output),
        Commands::File { command } => handle_file_command(command, &mut store, &output),
        Commands::Item { command } => handle_item_command(command, &mut store, &output),
        Commands::Search { query } => commands::search::run(&store, &query, &output),
        Commands::Export { path } => commands::transfer::export(&store, path, &output),
        Commands::Import { path } => commands::transfer::import(&mut store, &path, &output),
        Commands::Clear => commands::course::clear(&mut store, &output),
        Commands::Status => commands::status::show(&store, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_module_command(
    command: ModuleCommands,
    store: &mut CourseStore,
    output: &Output,
) -> Result<()> {
    match command {
        ModuleCommands::Create { name } => commands::module::create(store, &name, output),
        ModuleCommands::List => commands::module::list(store, output),
        ModuleCommands::Rename { id, name } => commands::module::rename(store, &id, &name, output),
        ModuleCommands::Delete { id } => commands::module::delete(store, &id, output),
        ModuleCommands::Move { source, dest } => {
            commands::module::reorder(store, &source, &dest, output)
        }
    }
}

fn handle_link_command(
    command: LinkCommands,
    store: &mut CourseStore,
    output: &Output,
) -> Result<()> {
    match command {
        LinkCommands::Add { url, title, module } => {
            commands::link::add(store, &url, title, module, output)
        }
        LinkCommands::Edit { id, title, url } => {
            commands::link::edit(store, &id, title, url, output)
        }
    }
}

fn handle_file_command(
    command: FileCommands,
    store: &mut CourseStore,
    output: &Output,
) -> Result<()> {
    match command {
        FileCommands::Add {
            path,
            title,
            module,
        } => commands::file::add(store, &path, title, module, output),
        FileCommands::Rename { id, title } => commands::file::rename(store, &id, &title, output),
    }
}

fn handle_item_command(
    command: ItemCommands,
    store: &mut CourseStore,
    output: &Output,
) -> Result<()> {
    match command {
        ItemCommands::List { module, standalone } => {
            commands::item::list(store, module, standalone, output)
        }
        ItemCommands::Delete { id } => commands::item::delete(store, &id, output),
        ItemCommands::Move {
            id,
            module,
            standalone,
            before,
        } => commands::item::move_item(store, &id, module, standalone, before, output),
        ItemCommands::Open { id } => commands::item::open(store, &id, output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
