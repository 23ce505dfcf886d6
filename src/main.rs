//! ECS Router command-line front end.
//!
//! # Architecture Overview
//!
//! ```text
//!   ecs-router.toml ──▶ config ──┐
//!                                ▼
//!   routing-data.txt ──▶ rules::loader ──▶ TrieTable / LinearTable
//!                                                  │
//!   ECS subnets (argv) ───────────────────────────▶ route() ──▶ pop + scope
//! ```
//!
//! Commands:
//! - `route`   look up one or more subnets
//! - `check`   load the rule file and report problems
//! - `compare` cross-check the trie against the linear-scan oracle

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use ipnet::IpNet;
use serde::Serialize;

use ecs_router::config::{load_config, Engine, RouterConfig};
use ecs_router::observability::{logging, metrics};
use ecs_router::routing::{LinearTable, RouteMatch, RoutingTable, TrieTable};
use ecs_router::rules::load_table;

#[derive(Parser)]
#[command(name = "ecs-router", version)]
#[command(about = "Resolve ECS client subnets to PoPs by longest-prefix match", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rule file (overrides the configuration).
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Lookup engine (overrides the configuration).
    #[arg(short, long, value_enum)]
    engine: Option<Engine>,

    /// Log level (overrides the configuration; RUST_LOG wins over both).
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Route ECS subnets to PoPs
    Route {
        #[arg(required = true)]
        subnets: Vec<IpNet>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the rule file and report the outcome
    Check {
        /// List the installed rules (trie engine only)
        #[arg(long)]
        list: bool,
    },
    /// Compare trie lookups with the linear-scan oracle
    Compare {
        #[arg(required = true)]
        subnets: Vec<IpNet>,
    },
}

#[derive(Serialize)]
struct RouteOutput {
    query: String,
    pop: u16,
    scope: i16,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(rules) = cli.rules {
        config.rules.path = rules;
    }
    if let Some(engine) = cli.engine {
        config.rules.engine = engine;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init(&config.observability.log_level, config.observability.log_format)?;

    tracing::debug!(
        rules = %config.rules.path.display(),
        engine = ?config.rules.engine,
        "Configuration loaded"
    );

    let path = config.rules.path.as_path();
    match cli.command {
        Commands::Route { subnets, json } => match config.rules.engine {
            Engine::Trie => route::<TrieTable>(path, &subnets, json),
            Engine::Linear => route::<LinearTable>(path, &subnets, json),
        },
        Commands::Check { list } => match config.rules.engine {
            Engine::Trie => {
                let table: TrieTable = load_table(path)?;
                println!("{}: {} rules, {} trie nodes", path.display(), table.len(), table.node_count());
                if list {
                    for (net, pop) in table.rules() {
                        println!("{net} {pop}");
                    }
                }
                Ok(())
            }
            Engine::Linear => {
                let table: LinearTable = load_table(path)?;
                println!("{}: {} rules", path.display(), table.len());
                Ok(())
            }
        },
        Commands::Compare { subnets } => compare(path, &subnets),
    }
}

fn route<T: RoutingTable + Default>(path: &Path, subnets: &[IpNet], json: bool) -> Result<(), Box<dyn Error>> {
    let table: T = load_table(path)?;

    let results: Vec<(IpNet, RouteMatch)> = subnets
        .iter()
        .map(|subnet| {
            let result = table.route(subnet);
            metrics::record_lookup(&result);
            (*subnet, result)
        })
        .collect();

    if json {
        let output: Vec<RouteOutput> = results
            .iter()
            .map(|(query, result)| RouteOutput {
                query: query.to_string(),
                pop: result.pop.into(),
                scope: result.scope,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for (query, result) in &results {
            println!("{query} {result}");
        }
    }
    Ok(())
}

fn compare(path: &Path, subnets: &[IpNet]) -> Result<(), Box<dyn Error>> {
    let trie: TrieTable = load_table(path)?;
    let linear: LinearTable = load_table(path)?;

    let mut mismatches = 0usize;
    for subnet in subnets {
        let (got, want) = (trie.route(subnet), linear.route(subnet));
        if got == want {
            println!("{subnet} {got}");
        } else {
            mismatches += 1;
            tracing::error!(query = %subnet, trie = %got, linear = %want, "Engines disagree");
            println!("{subnet} MISMATCH trie: {got} linear: {want}");
        }
    }

    if mismatches > 0 {
        return Err(format!("{mismatches} of {} queries differ between engines", subnets.len()).into());
    }
    Ok(())
}
