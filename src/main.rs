//! tagmend CLI: AI-assisted cleanup of mail tags.
//!
//! Usage:
//!   tagmend inventory [--mailbox path]
//!   tagmend similar [--deep] [--settings path] [--mailbox path]
//!   tagmend pairs --report similar.json [--select 0,2]
//!   tagmend merge --pairs pairs.json [--mailbox path]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use tagmend::commands;
use tagmend::models::{AnalysisReport, CommandResponse};
use tagmend::storage::load_settings;
use tagmend::{AppResult, MailboxSnapshot, Settings, DEFAULT_MERGE_CHUNK_SIZE};
use tagmend_core::TagPair;

#[derive(Parser)]
#[command(
    name = "tagmend",
    version,
    about = "Find duplicate mail tags with an AI model and merge them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to the JSON settings file
    #[arg(long, global = true, default_value = "settings.json")]
    settings: PathBuf,
    /// Path to the JSON mailbox snapshot
    #[arg(long, global = true, default_value = "mailbox.json")]
    mailbox: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tags with usage counts
    Inventory,
    /// List unused tags
    Cleanup,
    /// Find groups of similar tags
    Similar {
        /// Analyze all tags in a single request
        #[arg(long)]
        deep: bool,
    },
    /// Suggest better tag names
    Rename,
    /// Sort tags into categories
    Categorize,
    /// Check that the configured provider answers
    TestConnection,
    /// Build merge pairs from a saved similarity or rename report
    Pairs {
        /// Report file written by `similar` or `rename`
        #[arg(long)]
        report: PathBuf,
        /// Comma-separated indices of the groups/suggestions to keep
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<usize>>,
    },
    /// Apply merge pairs to the mailbox snapshot and save it
    Merge {
        /// File with a JSON array of {sourceName, targetName}
        #[arg(long)]
        pairs: PathBuf,
        /// Pairs per progress report
        #[arg(long, default_value_t = DEFAULT_MERGE_CHUNK_SIZE)]
        chunk_size: usize,
    },
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Print the response envelope; returns whether the command succeeded.
fn emit<T: Serialize>(result: AppResult<T>) -> anyhow::Result<bool> {
    let response: CommandResponse<T> = result.into();
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(response.success)
}

/// Read a file written by an earlier command, with or without its response
/// envelope.
fn read_payload<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;

    let payload = match value {
        serde_json::Value::Object(mut envelope) if envelope.contains_key("success") => {
            envelope.remove("data").unwrap_or_default()
        }
        other => other,
    };
    serde_json::from_value(payload)
        .with_context(|| format!("unexpected content in {}", path.display()))
}

fn read_settings(path: &Path) -> anyhow::Result<Settings> {
    load_settings(path).with_context(|| format!("loading settings from {}", path.display()))
}

fn open_mailbox(path: &Path) -> anyhow::Result<MailboxSnapshot> {
    MailboxSnapshot::load(path).with_context(|| format!("loading mailbox {}", path.display()))
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Inventory => {
            let store = open_mailbox(&cli.mailbox)?;
            emit(commands::get_inventory(&store).await)
        }
        Commands::Cleanup => {
            let store = open_mailbox(&cli.mailbox)?;
            emit(commands::get_cleanup_candidates(&store).await)
        }
        Commands::Similar { deep } => {
            let settings = read_settings(&cli.settings)?;
            let store = open_mailbox(&cli.mailbox)?;
            emit(commands::find_similar_tags(&settings, &store, deep).await)
        }
        Commands::Rename => {
            let settings = read_settings(&cli.settings)?;
            let store = open_mailbox(&cli.mailbox)?;
            emit(commands::suggest_tag_names(&settings, &store).await)
        }
        Commands::Categorize => {
            let settings = read_settings(&cli.settings)?;
            let store = open_mailbox(&cli.mailbox)?;
            emit(commands::categorize_tags(&settings, &store).await)
        }
        Commands::TestConnection => {
            let settings = read_settings(&cli.settings)?;
            emit(commands::test_connection(&settings).await)
        }
        Commands::Pairs { report, select } => {
            let report: AnalysisReport = read_payload(&report)?;
            emit(commands::build_merge_pairs(&report, select.as_deref()))
        }
        Commands::Merge { pairs, chunk_size } => {
            let pairs: Vec<TagPair> = read_payload(&pairs)?;
            let store = open_mailbox(&cli.mailbox)?;
            let result = commands::merge_tags(&store, &pairs, chunk_size).await;
            if result.is_ok() {
                store
                    .save(&cli.mailbox)
                    .await
                    .with_context(|| format!("saving mailbox {}", cli.mailbox.display()))?;
            }
            emit(result)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    if run(cli).await? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
