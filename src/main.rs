use anyhow::Result;
use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

use tabsql::config;
use tabsql::store::MemoryStore;
use tabsql::translate::Translator;

/// Run SQL-shaped statements against an in-memory table store
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Statement to execute, e.g. "SELECT * FROM users WHERE id = $1"
    statement: String,

    /// Positional parameters as JSON values; $1 is the first
    #[arg(short = 'p', long = "param")]
    params: Vec<String>,

    /// Seed the store from a JSON file of { "table": [ {...}, ... ] }
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Seed the store from a saved dataset by name
    #[arg(long)]
    dataset: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let store = if let Some(path) = &cli.seed {
        MemoryStore::load_from_file(path)?
    } else if let Some(name) = &cli.dataset {
        let saved = config::load_saved_datasets().unwrap_or_default();
        match saved.iter().find(|d| d.name.eq_ignore_ascii_case(name)) {
            Some(dataset) => MemoryStore::load_from_file(&dataset.path)?,
            None => {
                eprintln!("Error: no saved dataset named {:?}", name);
                eprintln!("Saved datasets:");
                for d in saved {
                    eprintln!("  - {}", d.name);
                }
                std::process::exit(1);
            }
        }
    } else {
        MemoryStore::new()
    };

    // Parameters parse as JSON; bare words fall back to strings so
    // `-p 7 -p alice` does what it looks like.
    let params: Vec<Value> = cli
        .params
        .iter()
        .map(|p| serde_json::from_str(p).unwrap_or_else(|_| Value::String(p.clone())))
        .collect();

    let translator = Translator::new(store);
    let result = translator.execute(&cli.statement, &params).await?;

    println!("{}", serde_json::to_string_pretty(&result.rows)?);
    Ok(())
}
