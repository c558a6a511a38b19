//! Load a channel map file and print one lookup (or the map stats) as JSON.
//!
//! Run with: `cargo run -p chanmap --features cli --bin chanmap_lookup -- map.txt --channel 12`

use chanmap::{core::DEFAULT_REVERSE_KEY_COLUMN, prelude::*};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chanmap_lookup", about = "Look up rows in a channel map file", version)]
struct Args {
    /// Map file to load
    file: PathBuf,

    /// Reverse-key (logical channel) to look up
    #[arg(long, conflicts_with = "keys")]
    channel: Option<i64>,

    /// Key column value, repeatable (e.g. --key crate=1 --key slot=2)
    #[arg(long = "key", value_parser = parse_element)]
    keys: Vec<(String, Value)>,

    /// Print map statistics instead of a record
    #[arg(long)]
    stats: bool,

    /// Fail the load on a repeated key instead of keeping the last row
    #[arg(long)]
    reject_duplicates: bool,

    /// Int column that feeds the reverse index
    #[arg(long, default_value = DEFAULT_REVERSE_KEY_COLUMN)]
    reverse_key_column: String,
}

// Values are typed by shape: integer, then float, then text.
fn parse_element(arg: &str) -> Result<(String, Value), String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{arg}'"))?;

    let value = raw
        .parse::<i64>()
        .map(Value::Int)
        .or_else(|_| raw.parse::<f64>().map(Value::Float))
        .unwrap_or_else(|_| Value::Text(raw.to_string()));

    Ok((name.to_string(), value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let policy = if args.reject_duplicates {
        DuplicateKeyPolicy::Reject
    } else {
        DuplicateKeyPolicy::LastWriteWins
    };
    let config = ToolConfig {
        file_name: args.file,
        load: LoadConfig::default()
            .with_duplicate_keys(policy)
            .with_reverse_key_column(args.reverse_key_column),
    };
    let map = config.build()?;

    let output = if args.stats {
        serde_json::to_string_pretty(&map.stats())?
    } else if let Some(channel) = args.channel {
        serde_json::to_string_pretty(&map.lookup_by_channel(channel))?
    } else {
        let elements: DetectorElements = args.keys.into_iter().collect();
        let record = map.lookup_by_detector_elements(&elements).map_err(Error::from)?;
        serde_json::to_string_pretty(&record)?
    };

    println!("{output}");

    Ok(())
}
