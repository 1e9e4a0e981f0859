//! Command-line interface for mock-backend
//!
//! # Usage Examples
//!
//! ```bash
//! # List queryable tables
//! mock-backend tables
//!
//! # One week of activity, oldest first
//! mock-backend query daily_activity \
//!   --filter date=gte.2024-03-04 \
//!   --filter date=lt.2024-03-11 \
//!   --order date.asc
//!
//! # Top post on one platform
//! mock-backend query social_posts \
//!   --filter platform=eq.tiktok \
//!   --order reach.desc --single
//!
//! # Canned RPC
//! mock-backend rpc log_event --params '{"event":"page_view"}'
//! ```
//!
//! The base seed and latency come from `--config <file.yaml>`, then
//! `--seed` / `MOCK_SEED` and `--latency` / `MOCK_LATENCY` ("50ms-150ms").

use anyhow::Context;
use clap::{Parser, Subcommand};
use mock_backend::config::duration::parse_range;
use mock_backend::{MockClient, MockConfig};
use mock_query::{OrderOptions, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mock-backend")]
#[command(about = "Query the mock relational-data service from the command line")]
#[command(long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base seed for generated data
    #[arg(long, global = true, env = "MOCK_SEED")]
    seed: Option<u64>,

    /// Simulated latency range, e.g. "50ms-150ms", or a single value ("0" disables it)
    #[arg(long, global = true, env = "MOCK_LATENCY")]
    latency: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables that can be queried
    Tables,

    /// Run a query and print the response envelope as JSON
    Query {
        /// Table name
        table: String,

        /// Schema name (recorded only; all schemas share one set of tables)
        #[arg(long)]
        schema: Option<String>,

        /// Requested columns
        #[arg(long, default_value = "*")]
        select: String,

        /// Filter in query-string form, e.g. "date=gte.2024-03-04" (repeatable)
        #[arg(long = "filter", value_name = "FILTER")]
        filters: Vec<String>,

        /// Sort key, e.g. "date.asc" or "reach.desc"
        #[arg(long)]
        order: Option<String>,

        /// Maximum number of rows
        #[arg(long)]
        limit: Option<usize>,

        /// Return the first row only
        #[arg(long)]
        single: bool,
    },

    /// Call a canned remote procedure
    Rpc {
        /// Procedure name
        name: String,

        /// Parameters as a JSON object
        #[arg(long, default_value = "{}")]
        params: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let client = MockClient::new(config).context("Failed to build table registry")?;

    match cli.command {
        Commands::Tables => {
            for table in client.table_names() {
                println!("{table}");
            }
        }
        Commands::Query {
            table,
            schema,
            select,
            filters,
            order,
            limit,
            single,
        } => {
            let mut query = match &schema {
                Some(schema) => client.schema(schema).from(&table),
                None => client.from(&table),
            };
            query = query.select(&select).filter_strs(&filters);

            if let Some(order) = order {
                let order = SortOrder::parse(&order);
                query = query.order(
                    &order.field,
                    OrderOptions {
                        ascending: order.ascending,
                    },
                );
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            if single {
                query = query.single();
            }

            tracing::info!("Querying {}", table);
            let response = query.await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Rpc { name, params } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .with_context(|| format!("Invalid JSON for --params: {params}"))?;
            tracing::info!("Calling {}", name);
            let response = client.rpc(&name, params).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<MockConfig> {
    let mut config = match &cli.config {
        Some(path) => MockConfig::from_file(path)?,
        None => MockConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(latency) = &cli.latency {
        let (min, max) = parse_range(latency)
            .with_context(|| format!("Invalid --latency value: {latency}"))?;
        config = config.with_latency(min, max);
    }
    Ok(config)
}
