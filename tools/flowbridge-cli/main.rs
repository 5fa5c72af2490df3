use clap::{Parser, Subcommand};
use flowbridge::catalog;
use flowbridge::prelude::*;
use itertools::Itertools;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

/// Converts automation workflow exports into visual-editor graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Extra node type mappings (JSON array) merged over the built-in table
    #[arg(short, long, global = true)]
    mappings: Option<String>,

    /// Log conversion details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a workflow export into a graph
    Convert {
        /// Path to the workflow export JSON file
        input: String,
        /// Where to write the graph JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Drop nodes without an exact mapping instead of guessing from their type name
        #[arg(long)]
        no_fuzzy: bool,
        /// Fail if two nodes share a name
        #[arg(long)]
        strict_names: bool,
        /// Take a link's origin slot from its bundle position instead of slot 0
        #[arg(long)]
        bundle_slots: bool,
    },
    /// Show how much of a workflow can be converted
    Stats {
        /// Path to the workflow export JSON file
        input: String,
    },
    /// List structural problems of a workflow export
    Validate {
        /// Path to the workflow export JSON file
        input: String,
    },
    /// List the source node types with an exact mapping
    Types,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let registry = load_registry(cli.mappings.as_deref());

    match cli.command {
        Command::Convert {
            input,
            output,
            no_fuzzy,
            strict_names,
            bundle_slots,
        } => {
            let mut builder = WorkflowConverter::builder()
                .with_registry(registry)
                .with_fuzzy_fallback(!no_fuzzy);
            if strict_names {
                builder = builder.with_duplicate_names(DuplicateNamePolicy::Reject);
            }
            if bundle_slots {
                builder = builder.with_origin_slots(OriginSlots::BundleIndex);
            }
            run_convert(&builder.build(), &input, output.as_deref());
        }
        Command::Stats { input } => run_stats(&registry, &input),
        Command::Validate { input } => run_validate(&input),
        Command::Types => {
            for source_type in registry.list_supported_types() {
                let mapping = registry.lookup(source_type).map(|m| m.target_type.as_str());
                println!("{:<45} -> {}", source_type, mapping.unwrap_or("?"));
            }
            println!(
                "\n{} types in categories: {}",
                registry.len(),
                registry.categories().iter().join(", ")
            );
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_registry(path: Option<&str>) -> Arc<MappingRegistry> {
    let Some(path) = path else {
        return MappingRegistry::shared();
    };
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read mappings '{}': {}", path, e)));
    let mut registry = MappingRegistry::builtin();
    let count = registry
        .extend_from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid mappings '{}': {}", path, e)));
    tracing::info!(count, path, "loaded extra mappings");
    Arc::new(registry)
}

fn read_workflow(path: &str) -> Value {
    let text = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn run_convert(converter: &WorkflowConverter, input: &str, output: Option<&str>) {
    let raw = read_workflow(input);
    let start = Instant::now();
    let imported_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();

    let graph = converter
        .convert_at(&raw, &imported_at)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    let elapsed = start.elapsed();

    let json = serde_json::to_string_pretty(&graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
    match output {
        Some(path) => {
            fs::write(path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path, e))
            });
            let stats = conversion_stats(&raw, converter.registry());
            eprintln!(
                "Converted {} of {} nodes ({} links) in {:?} -> '{}' (confidence {:.2})",
                graph.nodes.len(),
                stats.total_nodes,
                graph.links.len(),
                elapsed,
                path,
                stats.conversion_confidence
            );
        }
        None => println!("{}", json),
    }
}

fn run_stats(registry: &MappingRegistry, input: &str) {
    let raw = read_workflow(input);
    let Some(entry) = catalog::inspect(&raw, registry) else {
        exit_with_error(&format!("'{}' is not a workflow export", input));
    };
    let stats = &entry.stats;

    println!("Workflow:            {}", entry.name.as_deref().unwrap_or("(unnamed)"));
    println!("Total nodes:         {}", stats.total_nodes);
    println!("Supported:           {}", stats.supported_nodes);
    println!("Partially supported: {}", stats.partially_supported_nodes);
    println!("Unsupported:         {}", stats.unsupported_nodes);
    println!("Confidence:          {:.2}", stats.conversion_confidence);
    println!("Badge:               {}", if entry.supported { "supported" } else { "-" });
    if !stats.partially_supported_types.is_empty() {
        println!("Guessed types:       {}", stats.partially_supported_types.iter().join(", "));
    }
    if !stats.unsupported_types.is_empty() {
        println!("Unsupported types:   {}", stats.unsupported_types.iter().join(", "));
    }
}

fn run_validate(input: &str) {
    let raw = read_workflow(input);
    let problems = validate(&raw);
    if problems.is_empty() {
        println!("'{}' is structurally valid", input);
        return;
    }
    for problem in &problems {
        println!("  - {}", problem);
    }
    exit_with_error(&format!("{} problem(s) found in '{}'", problems.len(), input));
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
