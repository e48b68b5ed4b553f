use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nzpost_client::api::AddressType;
use nzpost_client::config::loader::load_config;
use nzpost_client::config::{Credentials, FileConfig, LoggingConfig};
use nzpost_client::utils::constants::{DEFAULT_MAX, DEFAULT_ORDER_ROADS_FIRST};
use nzpost_client::utils::logging::init_logging;
use nzpost_client::{MemoryCache, NzPostClient};
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, env = "NZPOST_CLIENT_ID")]
    client_id: String,
    #[arg(long, env = "NZPOST_SECRET", hide_env_values = true)]
    secret: String,
    /// Optional YAML file with `client` and `logging` sections
    #[arg(short, long, env = "CONFIG")]
    config: Option<String>,
    /// trace, debug, info, warn or error
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<Level>,
    /// Log every request and response body
    #[arg(long)]
    debug: bool,
    /// Keep token and responses in an in-process cache
    #[arg(long)]
    cache: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search by address lines (up to five)
    Find {
        #[arg(required = true)]
        lines: Vec<String>,
        #[arg(long = "type", value_enum, default_value_t = AddressType::All)]
        address_type: AddressType,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
    },
    /// Details of a delivery point
    Details {
        dpid: String,
        #[arg(long = "type", value_enum, default_value_t = AddressType::All)]
        address_type: AddressType,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
    },
    Suggest {
        query: String,
        #[arg(long = "type", value_enum, default_value_t = AddressType::All)]
        address_type: AddressType,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
    },
    SuggestPartial {
        query: String,
        #[arg(long, default_value = DEFAULT_ORDER_ROADS_FIRST)]
        order_roads_first: String,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
    },
    PartialDetails {
        unique_id: String,
        #[arg(long, default_value_t = DEFAULT_MAX)]
        max: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load config and logging
    // -------------------------------

    let file_config = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    init_logging(&LoggingConfig::effective(file_config.logging.as_ref(), args.log_level));

    let mut settings = file_config.client;
    settings.debug |= args.debug;

    // -------------------------------
    // 2. Authenticate
    // -------------------------------

    let cache = args
        .cache
        .then(|| Arc::new(MemoryCache::new()) as Arc<dyn nzpost_client::CacheStore>);
    let client = NzPostClient::with_settings(Credentials::new(args.client_id, args.secret), settings, cache)
        .await
        .context("cannot authenticate with NZ Post")?;
    info!("authenticated");

    // -------------------------------
    // 3. Run the operation
    // -------------------------------

    let result = match &args.command {
        Command::Find { lines, address_type, max } => {
            let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
            client.find(&lines, address_type.as_str(), *max).await
        }
        Command::Details { dpid, address_type, max } => client.details(dpid, address_type.as_str(), *max).await,
        Command::Suggest { query, address_type, max } => client.suggest(query, address_type.as_str(), *max).await,
        Command::SuggestPartial { query, order_roads_first, max } => {
            client.suggest_partial(query, order_roads_first, *max).await
        }
        Command::PartialDetails { unique_id, max } => client.partial_details(unique_id, *max).await,
    }
    .context("address lookup failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
