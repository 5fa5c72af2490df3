use clap::Parser;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use rand::{Rng, rng};
use serde_json::{Map, Value, json};
use std::fs;

/// A CLI tool to generate random workflow exports for exercising the converter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_workflow.json")]
    output: String,

    /// Number of nodes to generate
    #[arg(short, long, default_value_t = 25)]
    nodes: usize,

    /// Share of nodes whose type only a fuzzy match can resolve (0.0 - 1.0)
    #[arg(long, default_value_t = 0.1)]
    fuzzy_ratio: f64,

    /// Share of nodes with a type nothing can resolve (0.0 - 1.0)
    #[arg(long, default_value_t = 0.1)]
    unknown_ratio: f64,
}

const EXACT_TYPES: &[&str] = &[
    "n8n-nodes-base.httpRequest",
    "n8n-nodes-base.code",
    "n8n-nodes-base.set",
    "n8n-nodes-base.if",
    "n8n-nodes-base.merge",
    "n8n-nodes-base.slack",
    "n8n-nodes-base.postgres",
    "n8n-nodes-base.emailSend",
    "n8n-nodes-base.openAi",
];

const FUZZY_TYPES: &[&str] = &[
    "community.customHttpCaller",
    "community.sendEmailV2",
    "community.javascriptSandbox",
    "community.mongoQuery",
    "community.chatModel",
];

const UNKNOWN_TYPES: &[&str] = &["community.frobnicator", "acme.blackBox", "vendor.quantum"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rng();

    for (flag, ratio) in [("--fuzzy-ratio", cli.fuzzy_ratio), ("--unknown-ratio", cli.unknown_ratio)] {
        if !(0.0..=1.0).contains(&ratio) {
            eprintln!("Error: {} must be between 0 and 1, got {}", flag, ratio);
            std::process::exit(1);
        }
    }
    if cli.fuzzy_ratio + cli.unknown_ratio > 1.0 {
        eprintln!("Error: --fuzzy-ratio and --unknown-ratio together cannot exceed 1");
        std::process::exit(1);
    }

    println!("Generating a workflow with {} nodes...", cli.nodes);

    let mut nodes = vec![json!({
        "id": "node-0",
        "name": "Webhook",
        "type": "n8n-nodes-base.webhook",
        "position": [0, 0],
        "parameters": { "path": "incoming", "httpMethod": "POST" }
    })];
    for index in 1..cli.nodes {
        nodes.push(generate_node(&mut rng, index, cli.fuzzy_ratio, cli.unknown_ratio));
    }

    let connections = generate_connections(&mut rng, &nodes);
    let workflow = json!({
        "name": format!("Generated workflow ({} nodes)", nodes.len()),
        "nodes": nodes,
        "connections": connections,
    });

    fs::write(&cli.output, serde_json::to_string_pretty(&workflow)?)?;
    println!("Successfully generated and saved workflow to '{}'", cli.output);
    Ok(())
}

fn generate_node(rng: &mut ThreadRng, index: usize, fuzzy_ratio: f64, unknown_ratio: f64) -> Value {
    let roll: f64 = rng.random();
    let pool = if roll < unknown_ratio {
        UNKNOWN_TYPES
    } else if roll < unknown_ratio + fuzzy_ratio {
        FUZZY_TYPES
    } else {
        EXACT_TYPES
    };
    let node_type = pool.choose(rng).copied().unwrap_or(EXACT_TYPES[0]);

    json!({
        "id": format!("node-{}", index),
        "name": format!("Step {}", index),
        "type": node_type,
        "position": [index as i64 * 220, rng.random_range(-300..300)],
        "parameters": generate_parameters(rng, index),
    })
}

fn generate_parameters(rng: &mut ThreadRng, index: usize) -> Value {
    let mut params = Map::new();
    params.insert("url".to_string(), json!(format!("https://api.example.com/items/{}", index)));
    params.insert("text".to_string(), json!("{{ $json.message }}"));
    if rng.random_bool(0.3) {
        params.insert("authentication".to_string(), json!("={{ $env.api_token }}"));
    }
    if rng.random_bool(0.5) {
        params.insert("options".to_string(), json!({ "timeout": rng.random_range(1000..30000) }));
    }
    Value::Object(params)
}

/// Chains every node to a random earlier one, occasionally on a second output.
fn generate_connections(rng: &mut ThreadRng, nodes: &[Value]) -> Value {
    let names: Vec<&str> = nodes
        .iter()
        .filter_map(|n| n.get("name").and_then(Value::as_str))
        .collect();

    let mut bundles: Map<String, Value> = Map::new();
    for (index, target) in names.iter().enumerate().skip(1) {
        let origin = names[rng.random_range(0..index)];
        let output = usize::from(rng.random_bool(0.2));

        let groups = bundles
            .entry(origin.to_string())
            .or_insert_with(|| json!({ "main": [] }));
        let Some(main) = groups.get_mut("main").and_then(Value::as_array_mut) else {
            continue;
        };
        while main.len() <= output {
            main.push(json!([]));
        }
        if let Some(bundle) = main[output].as_array_mut() {
            bundle.push(json!({ "node": target, "type": "main", "index": 0 }));
        }
    }
    Value::Object(bundles)
}
