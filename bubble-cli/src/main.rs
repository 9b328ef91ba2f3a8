//! Bubble CLI - Command-line interface for the Bubble.io Data API.
//!
//! Fetch, filter, create, modify, and delete records of a Bubble app's
//! data types from the terminal. Useful for scripting, data inspection,
//! and debugging an app's Data API from outside the Bubble editor.

mod commands;

use clap::{Parser, Subcommand};
use tracing::debug;

use bubble_core::config::AppConfig;
use bubble_core::error::BubbleResult;
use bubble_core::logging;
use bubble_core::platform::Platform;

/// Bubble - command-line client for the Bubble.io Data API.
#[derive(Parser)]
#[command(
    name = "bubble",
    version,
    about = "Bubble.io Data API command-line client",
    long_about = "A command-line client for the Bubble.io REST Data API.\n\
                   Reads and writes the records of a Bubble app's data types,\n\
                   against either the live database or version-test."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Bubble app domain (overrides config).
    #[arg(long, global = true)]
    domain: Option<String>,

    /// Data API bearer token (overrides config).
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Target the version-test environment instead of live.
    #[arg(long, global = true)]
    dev: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch records of a data type, draining all result pages.
    Get {
        /// Data type name (e.g. "task").
        object: String,
        /// Filter predicate, `field=value` or `field!=value`. Repeatable.
        #[arg(short = 'w', long = "filter")]
        filters: Vec<String>,
        /// Field to sort by server-side.
        #[arg(long)]
        sort_by: Option<String>,
        /// Sort descending instead of ascending.
        #[arg(long, requires = "sort_by")]
        desc: bool,
        /// Show at most this many records.
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Create a record from a JSON body.
    Create {
        /// Data type name.
        object: String,
        /// JSON body for the new record.
        #[arg(short, long)]
        data: String,
    },
    /// Modify records from a JSON body (PATCH).
    Update {
        /// Data type name.
        object: String,
        /// JSON body with the fields to change.
        #[arg(short, long)]
        data: String,
    },
    /// Replace records from a JSON body (PUT).
    Replace {
        /// Data type name.
        object: String,
        /// JSON body replacing the record contents.
        #[arg(short, long)]
        data: String,
    },
    /// Delete records of a data type.
    Delete {
        /// Data type name.
        object: String,
    },
    /// View and write configuration.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> BubbleResult<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let log_dir = Platform::data_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("."))
        .join("logs");
    let _guard = logging::init_logging(log_level, &log_dir, false)?;

    // Load configuration, then apply command-line overrides
    let mut config = if let Some(path) = cli.config.as_deref() {
        AppConfig::load_from_file(std::path::Path::new(path))?
    } else {
        AppConfig::load_default()?
    };
    if let Some(domain) = cli.domain {
        config.api.domain = domain;
    }
    if let Some(api_key) = cli.api_key {
        config.api.api_key = api_key;
    }
    if cli.dev {
        config.api.is_dev = true;
    }

    debug!("bubble CLI v{}", bubble_core::constants::APP_VERSION);

    // Dispatch to command handlers
    match cli.command {
        Commands::Get {
            object,
            filters,
            sort_by,
            desc,
            limit,
        } => commands::data::get(&config, &object, &filters, sort_by, desc, limit, cli.format).await,
        Commands::Create { object, data } => {
            commands::data::create(&config, &object, &data, cli.format).await
        }
        Commands::Update { object, data } => {
            commands::data::update(&config, &object, &data, cli.format).await
        }
        Commands::Replace { object, data } => {
            commands::data::replace(&config, &object, &data, cli.format).await
        }
        Commands::Delete { object } => commands::data::delete(&config, &object, cli.format).await,
        Commands::Config { action } => commands::config::run(&config, action, cli.format),
    }
}
