//! Command line client for the Renegade Testnet.
//!
//! # Commands
//!
//! ```text
//! renegade-chain info                      chain descriptor as JSON
//! renegade-chain status                    chain id, block number, gas price, health
//! renegade-chain balance <address>         native balance of an account
//! renegade-chain lookup-wallet <share>     darkpool wallet updates for a blinder share
//! renegade-chain lookup-wallet --sk-root <root>
//!                                          same, deriving the share from a key root
//! renegade-chain watch                     stream new block numbers until Ctrl-C
//! ```
//!
//! Every command reads an optional TOML config (`--config`); without one the
//! built-in Renegade Testnet definition and transport defaults are used.

use std::net::SocketAddr;
use std::path::PathBuf;

use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};
use serde_json::json;

use renegade_chain::client::PublicClient;
use renegade_chain::config::{loader, ChainClientConfig};
use renegade_chain::darkpool::{self, DarkpoolClient};
use renegade_chain::lifecycle::{signals, Shutdown};
use renegade_chain::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "renegade-chain")]
#[command(about = "Query the Renegade Testnet over JSON-RPC", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the JSON-RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the chain descriptor
    Info,
    /// Check node connectivity and chain state
    Status,
    /// Show the native balance of an address
    Balance { address: Address },
    /// Check whether a wallet exists in the darkpool
    LookupWallet {
        /// Public blinder share (decimal or 0x-prefixed hex)
        #[arg(required_unless_present = "sk_root", conflicts_with = "sk_root")]
        blinder_share: Option<U256>,

        /// Secret key root to derive the public blinder share from
        #[arg(long)]
        sk_root: Option<U256>,
    },
    /// Follow new blocks until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => loader::load_config(path)?,
        None => loader::default_config()?,
    };
    if let Some(url) = cli.rpc_url {
        config.transport.url = Some(url);
    }

    logging::init_logging(&config.observability.log_level, config.observability.log_format)?;
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    tracing::info!(
        chain_id = config.chain.id,
        chain = %config.chain.name,
        "renegade-chain v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    match cli.command {
        Commands::Info => print_json(&serde_json::to_value(&config.chain)?)?,
        Commands::Status => status(&config).await?,
        Commands::Balance { address } => {
            let client = PublicClient::new(config.chain.clone(), &config.transport, &config.client)?;
            let balance = client.get_balance(address).await?;
            print_json(&json!({
                "address": address,
                "balance": balance.to_string(),
                "formatted": client.chain().format_native(balance),
                "explorer": client.chain().explorer_address_url(address),
            }))?;
        }
        Commands::LookupWallet {
            blinder_share,
            sk_root,
        } => {
            let blinder_share = sk_root
                .map(darkpool::blinder_share_from_sk_root)
                .or(blinder_share)
                .ok_or("a blinder share or --sk-root is required")?;
            let client = PublicClient::new(config.chain.clone(), &config.transport, &config.client)?;
            let darkpool = DarkpoolClient::new(client, &config.darkpool)?;
            let updates = darkpool.wallet_updates(blinder_share).await?;
            let updates: Vec<_> = updates
                .iter()
                .map(|u| {
                    json!({
                        "block_number": u.block_number,
                        "tx_hash": u.tx_hash,
                        "explorer": u.tx_hash.and_then(|h| config.chain.explorer_tx_url(h)),
                    })
                })
                .collect();
            print_json(&json!({
                "darkpool": darkpool.address(),
                "blinder_share": blinder_share.to_string(),
                "found": !updates.is_empty(),
                "updates": updates,
            }))?;
        }
        Commands::Watch => watch(&config).await?,
    }

    Ok(())
}

async fn status(config: &ChainClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client =
        PublicClient::connect(config.chain.clone(), &config.transport, &config.client).await?;
    let chain_id = client.get_chain_id().await?;
    let block_number = client.get_block_number().await?;
    let gas_price = client.get_gas_price().await?;
    let answered_by = client.check_health().await;

    print_json(&json!({
        "chain": client.chain().name,
        "expected_chain_id": client.chain().id,
        "chain_id": chain_id.0,
        "chain_id_matches": chain_id.0 == client.chain().id,
        "block_number": block_number,
        "gas_price_wei": gas_price.to_string(),
        "rpc_url": client.endpoints().first().map(|u| u.to_string()),
        "explorer": client.chain().explorer_block_url(block_number),
        "healthy": answered_by.is_some(),
        "answered_by": answered_by.map(|u| u.to_string()),
    }))
}

async fn watch(config: &ChainClientConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = PublicClient::new(config.chain.clone(), &config.transport, &config.client)?;
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    let chain = client.chain().clone();
    let watcher = client.watch_block_number(rx, |block| {
        println!(
            "{}\t{}",
            block,
            chain.explorer_block_url(block).unwrap_or_default()
        );
    });

    tokio::select! {
        _ = watcher => {}
        res = signals::shutdown_on_signal(&shutdown) => res?,
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
