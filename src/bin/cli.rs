//! SlateKV CLI
//!
//! Command-line interface for a SlateKV log file and its short links.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde_json::json;
use slatekv::links::Shortener;
use slatekv::log::LogRecovery;
use slatekv::{Config, Entry, Result, Store, SyncStrategy, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// SlateKV CLI
#[derive(Parser, Debug)]
#[command(name = "slatekv")]
#[command(about = "Log-structured key-value store and link shortener")]
#[command(version)]
struct Args {
    /// Log file
    #[arg(short, long, env = "DB_PATH", default_value = "urls.db")]
    db: PathBuf,

    /// Directory for per-slug redirect pages
    #[arg(long, env = "REDIRECTION_PATH", default_value = "redirection")]
    redirect_dir: PathBuf,

    /// Public prefix for short links
    #[arg(long, env = "BASE_URL")]
    base_url: Option<String>,

    /// fsync the log after every write
    #[arg(long)]
    sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get the entry for a key
    Get {
        key: String,

        /// Show the key even if it was deleted
        #[arg(long)]
        deleted: bool,
    },

    /// Store a value (JSON, or taken as a plain string if it is not JSON)
    Put {
        key: String,
        value: String,

        /// Fail if the key already holds a value
        #[arg(long)]
        no_replace: bool,
    },

    /// Delete a key
    Del { key: String },

    /// List all entries
    List {
        /// Include deleted keys
        #[arg(long)]
        deleted: bool,
    },

    /// Compact the log
    Vacuum,

    /// Check that the log can be replayed
    Verify,

    /// Create a short link
    Shorten {
        url: String,

        /// Slug to use instead of a random one
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove a short link
    Unshorten { slug: String },

    /// Print the destination of a short link
    Resolve { slug: String },

    /// List all short links
    Links,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,slatekv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut builder = Config::builder()
        .log_path(&args.db)
        .redirect_dir(&args.redirect_dir)
        .sync_strategy(if args.sync {
            SyncStrategy::EveryWrite
        } else {
            SyncStrategy::OsBuffered
        });
    if let Some(base) = &args.base_url {
        builder = builder.base_url(base);
    }
    let config = builder.build();

    match args.command {
        Commands::Get { key, deleted } => {
            let store = Store::open(config)?;
            match store.get(&key, deleted) {
                Some(entry) => print_json(&entry_json(&key, entry)),
                None => println!("(nil)"),
            }
        }
        Commands::Put {
            key,
            value,
            no_replace,
        } => {
            let value = match serde_json::from_str::<Value>(&value) {
                Ok(parsed) => parsed,
                Err(_) => Value::String(value),
            };
            let mut store = Store::open(config)?;
            let stored = store.put(&key, Some(value), !no_replace)?;
            store.close()?;
            print_json(&json!(stored));
        }
        Commands::Del { key } => {
            let mut store = Store::open(config)?;
            store.del(&key)?;
            store.close()?;
            println!("OK");
        }
        Commands::List { deleted } => {
            let store = Store::open(config)?;
            let mut entries = store.list(deleted);
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let rows: Vec<Value> = entries
                .iter()
                .map(|(key, entry)| entry_json(key, entry))
                .collect();
            print_json(&Value::Array(rows));
        }
        Commands::Vacuum => {
            let mut store = Store::open(config)?;
            let report = store.vacuum()?;
            store.close()?;
            println!(
                "{} records kept, {} tombstones purged, {} -> {} bytes",
                report.records_written,
                report.tombstones_purged,
                report.bytes_before,
                report.bytes_after
            );
        }
        Commands::Verify => {
            let result = LogRecovery::verify(&config.log_path)?;
            println!(
                "{} records, {} live keys, {} tombstones, {} superseded",
                result.records_replayed,
                result.live_keys,
                result.tombstones,
                result.superseded()
            );
        }
        Commands::Shorten { url, slug } => {
            let mut shortener = Shortener::open(config)?;
            let link = shortener.shorten(&url, slug.as_deref())?;
            shortener.into_store().close()?;
            print_json(&json!(link));
        }
        Commands::Unshorten { slug } => {
            let mut shortener = Shortener::open(config)?;
            shortener.remove(&slug)?;
            shortener.into_store().close()?;
            println!("OK");
        }
        Commands::Resolve { slug } => {
            let shortener = Shortener::open(config)?;
            match shortener.resolve(&slug) {
                Some(url) => println!("{}", url),
                None => println!("(nil)"),
            }
        }
        Commands::Links => {
            let shortener = Shortener::open(config)?;
            print_json(&json!(shortener.links()));
        }
    }

    Ok(())
}

fn entry_json(key: &str, entry: &Entry) -> Value {
    json!({
        "key": key,
        "updatedAt": entry.updated_at,
        "value": entry.value,
    })
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => tracing::error!("could not render output: {}", e),
    }
}
