//! Journal CLI entry point.
//!
//! # Responsibility
//! - Act as the presentation layer around `journal_core`: load config,
//!   initialize logging, run the access gate, and drive the store.
//!
//! # Invariants
//! - The access grant is issued here, after the password check, and only
//!   then handed to store operations.
//! - List output shows previews; `show` prints full content unmodified.

mod config;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::Config;
use journal_core::db::open_db;
use journal_core::{format_preview, AccessGrant, EntryStore, SqliteEntryRepository};
use log::info;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "journal", version, about = "Single-user personal journal")]
struct Cli {
    /// Path to an alternative config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Access password; prompted on stdin when omitted.
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new entry. Content is read from stdin unless --content is given.
    Add {
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Print one entry in full.
    Show { id: i64 },
    /// Replace an entry's title and content wholesale.
    Edit {
        id: i64,
        title: String,
        #[arg(long)]
        content: Option<String>,
    },
    /// Permanently delete an entry.
    Delete { id: i64 },
    /// List entries, newest first, with previews.
    List {
        /// Substring filter applied to title and content.
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    /// Print the total number of entries.
    Count,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Logging is diagnostics only; the journal keeps working without it.
    if let Err(err) =
        journal_core::init_logging(&config.log_level, &config.log_dir.to_string_lossy())
    {
        eprintln!("warning: logging disabled: {err}");
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        journal_core::core_version()
    );

    let grant = authorize(&cli, &config)?;

    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create data directory {}", parent.display())
        })?;
    }
    let conn = open_db(&config.database_path)?;
    let repo = SqliteEntryRepository::try_new(&conn)?;
    let store = EntryStore::new(repo);

    match cli.command {
        Command::Add { title, content } => {
            let content = resolve_content(content)?;
            let entry = store.create_entry(&grant, &title, &content)?;
            println!("Created entry #{} \"{}\"", entry.id, entry.title);
        }
        Command::Show { id } => match store.get_entry(&grant, id)? {
            Some(entry) => {
                println!("#{} {}", entry.id, entry.title);
                println!(
                    "created {}  updated {}",
                    format_timestamp(entry.created_at),
                    format_timestamp(entry.updated_at)
                );
                println!();
                println!("{}", entry.content);
            }
            None => bail!("entry {id} not found"),
        },
        Command::Edit { id, title, content } => {
            let content = resolve_content(content)?;
            let entry = store.update_entry(&grant, id, &title, &content)?;
            println!("Updated entry #{}", entry.id);
        }
        Command::Delete { id } => {
            store.delete_entry(&grant, id)?;
            println!("Deleted entry #{id}");
        }
        Command::List {
            search,
            page,
            page_size,
        } => {
            let result = store.list_entries(&grant, search, page, page_size)?;
            for entry in &result.items {
                println!(
                    "#{:<5} {}  {}",
                    entry.id,
                    format_timestamp(entry.created_at),
                    entry.title
                );
                let preview = format_preview(&entry.content);
                if !preview.is_empty() {
                    println!("       {preview}");
                }
            }
            let total_pages = result
                .total_matching
                .div_ceil(u64::from(page_size.max(1)))
                .max(1);
            println!(
                "{} matching entries (page {} of {total_pages})",
                result.total_matching,
                page.max(1)
            );
        }
        Command::Count => println!("{}", store.count_entries(&grant)?),
    }

    Ok(())
}

/// Access gate: verifies the password and only then issues the grant the
/// store operations require.
fn authorize(cli: &Cli, config: &Config) -> Result<AccessGrant> {
    let supplied = match &cli.password {
        Some(value) => value.clone(),
        None => prompt_password()?,
    };

    if supplied != config.access_password {
        bail!("invalid access password");
    }

    Ok(AccessGrant::issue())
}

fn prompt_password() -> Result<String> {
    eprint!("Access password: ");
    io::stderr().flush().ok();

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read access password")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn resolve_content(content: Option<String>) -> Result<String> {
    match content {
        Some(value) => Ok(value),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read entry content from stdin")?;
            Ok(buffer)
        }
    }
}

fn format_timestamp(epoch_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_ms)
        .map(|moment| moment.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| epoch_ms.to_string())
}
