//! File metadata CLI for Annex.

mod browse;

use annex_core::{AppConfig, RecordFields};
use annex_metadata::RecordStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "annex")]
#[command(about = "Attach project metadata to files")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "ANNEX_CONFIG", default_value = "annex.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a directory's entries
    Browse {
        /// Directory to list (default: current directory)
        dir: Option<PathBuf>,
    },
    /// Show recorded metadata for a file
    Show {
        /// File path the metadata is keyed by
        path: String,
    },
    /// Save metadata for a file, replacing all fields
    ///
    /// Every save persists the full field set: flags left out are stored
    /// as blank, they are not merged with the previous values.
    Set {
        /// File path the metadata is keyed by
        path: String,
        /// Project number
        #[arg(long)]
        project_number: Option<String>,
        /// Department
        #[arg(long)]
        department: Option<String>,
        /// Revision
        #[arg(long)]
        revision: Option<String>,
        /// Document type
        #[arg(long = "type")]
        kind: Option<String>,
        /// Area
        #[arg(long)]
        area: Option<String>,
        /// Progress
        #[arg(long)]
        progress: Option<String>,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all recorded paths
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Browse { dir } => handle_browse_command(dir).await,
        Commands::Show { path } => {
            let store = open_store(&config).await?;
            let result = handle_show_command(store.as_ref(), &path).await;
            store.close().await;
            result
        }
        Commands::Set {
            path,
            project_number,
            department,
            revision,
            kind,
            area,
            progress,
            notes,
        } => {
            let fields = RecordFields {
                project_number,
                department,
                revision,
                kind,
                area,
                progress,
                notes,
            };
            let store = open_store(&config).await?;
            let result = handle_set_command(store.as_ref(), &path, &fields).await;
            store.close().await;
            result
        }
        Commands::List => {
            let store = open_store(&config).await?;
            let result = handle_list_command(store.as_ref()).await;
            store.close().await;
            result
        }
    }
}

/// Load configuration from the optional config file merged with
/// `ANNEX_`-prefixed environment variables. Every field has a default, so
/// running with neither is fine.
fn load_config(path: &str) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if std::path::Path::new(path).exists() {
        tracing::debug!(config_path = %path, "Loading configuration from file");
        figment = figment.merge(Toml::file(path));
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("ANNEX_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

async fn open_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    annex_metadata::from_config(&config.metadata)
        .await
        .context("failed to initialize metadata store")
}

async fn handle_browse_command(dir: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to resolve current directory")?,
    };

    let entries = browse::list_directory(&dir).await?;

    println!("{}", dir.display());
    println!("{:<40} {}", "Name", "Type");
    println!("{}", "-".repeat(48));
    for entry in entries {
        println!("{:<40} {}", entry.name, entry.kind.as_str());
    }
    Ok(())
}

async fn handle_show_command(store: &dyn RecordStore, path: &str) -> Result<()> {
    // A lookup failure exits nonzero; "no record yet" is a normal outcome
    // and prints as one.
    let found = store
        .lookup(path)
        .await
        .with_context(|| format!("failed to look up metadata for {path}"))?;

    match found {
        Some(fields) => {
            println!("Metadata for: {path}");
            for (label, value) in fields.entries() {
                println!("{label}: {}", value.unwrap_or(""));
            }
        }
        None => println!("No metadata recorded for: {path}"),
    }
    Ok(())
}

async fn handle_set_command(
    store: &dyn RecordStore,
    path: &str,
    fields: &RecordFields,
) -> Result<()> {
    store
        .upsert(path, fields)
        .await
        .with_context(|| format!("failed to save metadata for {path}"))?;

    println!("Saved metadata for: {path}");
    Ok(())
}

async fn handle_list_command(store: &dyn RecordStore) -> Result<()> {
    let records = store
        .list_records()
        .await
        .context("failed to list records")?;

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    println!("{:<60} {}", "Path", "Updated");
    println!("{}", "-".repeat(90));
    for record in records {
        println!("{:<60} {}", record.file_path, record.updated_at);
    }
    Ok(())
}
