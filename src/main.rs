//! Entry point for the RuAggregate application.
//! Handles CLI parsing, value loading, and dispatches to the named aggregator.

use anyhow::{Context, Result};
use clap::Parser;
use ru_aggregate::{parse_values, read_values, AggregatorRegistry, Number, ParallelConfig};
use serde_json::{json, Value as JsonValue};
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::Args;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();
    init_logging(&args);
    debug!("Arguments: {:?}", args);

    ParallelConfig::new(args.threads).setup_global_pool()?;

    let registry = AggregatorRegistry::with_builtins()?;

    if args.list {
        print_list(&registry, args.json);
        return Ok(());
    }

    let values = load_values(&args)?;

    if let Some(name) = &args.aggregate {
        let result = registry.aggregate(name, values.as_deref())?;
        if args.json {
            println!("{}", json!({ "aggregator": name, "result": JsonValue::from(result) }));
        } else {
            println!("{name}: {result}");
        }
    } else if args.summary {
        print_summary(&registry, values.as_deref(), args.json);
    }

    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: a tracing subscriber was already installed");
    }
}

/// Gathers values from `--values` and `--file`. `None` when neither was given.
fn load_values(args: &Args) -> Result<Option<Vec<Number>>> {
    if args.values.is_none() && args.file.is_none() {
        return Ok(None);
    }

    let mut values = Vec::new();
    if let Some(inline) = &args.values {
        values.extend(parse_values(inline).context("Invalid --values")?);
    }
    if let Some(path) = &args.file {
        values.extend(
            read_values(path).with_context(|| format!("Failed to read values from {}", path.display()))?,
        );
    }

    debug!(count = values.len(), "loaded values");
    Ok(Some(values))
}

fn print_list(registry: &AggregatorRegistry, as_json: bool) {
    if as_json {
        let entries: Vec<JsonValue> = registry
            .iter()
            .map(|agg| json!({ "name": agg.name(), "description": agg.description() }))
            .collect();
        println!("{}", JsonValue::Array(entries));
        return;
    }

    println!("Registered aggregators:");
    for agg in registry.iter() {
        println!("   {:<10} {}", agg.name(), agg.description());
    }
}

fn print_summary(registry: &AggregatorRegistry, values: Option<&[Number]>, as_json: bool) {
    let summary = registry.summarize(values);

    if as_json {
        let object: serde_json::Map<String, JsonValue> = summary
            .into_iter()
            .map(|(name, result)| {
                let value = match result {
                    Ok(number) => JsonValue::from(number),
                    Err(e) => json!({ "error": e.to_string() }),
                };
                (name, value)
            })
            .collect();
        println!("{}", JsonValue::Object(object));
        return;
    }

    for (name, result) in summary {
        match result {
            Ok(number) => println!("   {name:<10} {number}"),
            Err(e) => println!("   {name:<10} error: {e}"),
        }
    }
}
