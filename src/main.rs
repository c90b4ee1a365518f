//! `blockchain-manager` command-line client.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (TOML) ──▶ ManagerRegistry ──▶ dyn BlockchainManager
//!                                        │                  │
//!                                        │                  ├─ EvmManager ──▶ AlloyNodeClient ──▶ node
//!                                        │                  └─ UnsupportedManager
//!                                        └─ LocalSigner (key from env)
//! ```
//!
//! Each invocation starts the one manager it needs, runs a single operation,
//! prints JSON to stdout and stops the manager.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::{Bytes, U256};
use clap::{Args, Parser, Subcommand};
use serde_json::json;

use blockchain_manager::blockchain::{
    BlockchainManager, BlockchainResult, ManagerRegistry, TransactionSigner,
};
use blockchain_manager::config::{load_config, ManagerConfig};
use blockchain_manager::evm::LocalSigner;
use blockchain_manager::lifecycle::Context;
use blockchain_manager::observability::init_logging;
use blockchain_manager::types::{
    Address, ChainPayload, EvmFields, FeeModel, Network, Token, Transaction, TransactionType,
};

#[derive(Parser)]
#[command(name = "blockchain-manager")]
#[command(about = "Query and transact on configured blockchain networks", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "blockchain-manager.toml")]
    config: PathBuf,

    /// Network to operate on.
    #[arg(short, long)]
    network: Network,

    /// Overall deadline for the command, in seconds.
    #[arg(short, long, default_value_t = 60)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Native or ERC-20 balance of an address
    Balance {
        address: String,
        /// ERC-20 contract; omit for the native balance.
        #[arg(long)]
        token: Option<String>,
    },
    /// Read-only contract call at latest state
    Call {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Hex call data.
        #[arg(long, default_value = "0x")]
        data: Bytes,
        #[arg(long, default_value = "0")]
        value: U256,
    },
    /// Details of a transaction by hash
    Tx { hash: String },
    /// Sign with the configured key and submit
    Send(SendArgs),
}

#[derive(Args)]
struct SendArgs {
    #[arg(long)]
    to: String,
    /// Amount in the chain's smallest unit.
    #[arg(long)]
    amount: U256,
    #[arg(long)]
    nonce: u64,
    #[arg(long, default_value_t = 21_000)]
    gas_limit: u64,
    #[arg(long)]
    chain_id: u64,
    /// Legacy gas price in wei.
    #[arg(long, conflicts_with_all = ["max_fee", "priority_fee"])]
    gas_price: Option<u128>,
    /// EIP-1559 max fee per gas in wei.
    #[arg(long, requires = "priority_fee")]
    max_fee: Option<u128>,
    /// EIP-1559 max priority fee per gas in wei.
    #[arg(long, requires = "max_fee")]
    priority_fee: Option<u128>,
    #[arg(long, default_value = "0x")]
    data: Bytes,
}

fn load_signer(config: &ManagerConfig) -> Option<LocalSigner> {
    match LocalSigner::from_env(&config.signer.private_key_env) {
        Ok(signer) => Some(signer),
        Err(e) => {
            tracing::debug!(error = %e, "No transaction signer available");
            None
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(&config.observability)?;

    let chain = config
        .chain(cli.network)
        .filter(|c| c.enabled)
        .ok_or_else(|| format!("network {} is not configured", cli.network))?;
    let connect_timeout = Duration::from_secs(chain.connect_timeout_secs);

    let signer = load_signer(&config);
    let signer_address = signer.as_ref().map(LocalSigner::address);
    let registry = ManagerRegistry::from_config(
        &config,
        signer.map(|s| Arc::new(s) as Arc<dyn TransactionSigner>),
    );
    let manager = registry
        .get(cli.network)
        .ok_or_else(|| format!("no manager for {}", cli.network))?;

    let ctx = Context::background().with_timeout(Duration::from_secs(cli.timeout));
    let canceller = ctx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            canceller.cancel();
        }
    });

    manager.start(&ctx.with_timeout(connect_timeout)).await?;
    let outcome = run(&manager, &ctx, cli.network, cli.command, signer_address).await;
    let output = settle(outcome, manager.stop(&ctx).await)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// The command's own result wins; a failed stop is only logged.
fn settle<T, E>(outcome: Result<T, E>, stopped: BlockchainResult<()>) -> Result<T, E> {
    if let Err(e) = stopped {
        tracing::warn!(error = %e, "Failed to stop manager");
    }
    outcome
}

async fn run(
    manager: &Arc<dyn BlockchainManager>,
    ctx: &Context,
    network: Network,
    command: Commands,
    signer_address: Option<alloy::primitives::Address>,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let output = match command {
        Commands::Balance { address, token } => {
            let owner = Address::parse(&address, network)?;
            let token = match token {
                Some(contract) => {
                    Token::contract(Address::parse(&contract, network)?, "", "", 0)
                }
                None => Token::native(network.as_str(), "", 18),
            };
            let balance = manager.get_balance(ctx, &owner, &token).await?;
            json!({
                "network": network,
                "address": owner,
                "token": token.kind,
                "balance": balance.to_string(),
            })
        }
        Commands::Call {
            from,
            to,
            data,
            value,
        } => {
            let tx = Transaction::new(
                Address::parse(&from, network)?,
                Address::parse(&to, network)?,
                value,
                TransactionType::ContractCall,
            );
            let tx = tx.with_payload(ChainPayload::Evm(EvmFields {
                nonce: 0,
                gas_limit: 0,
                chain_id: 0,
                fee: FeeModel::Legacy { gas_price: 0 },
                data,
            }));
            let result = manager.read_call(ctx, &tx).await?;
            json!({ "network": network, "result": result })
        }
        Commands::Tx { hash } => {
            let details = manager.get_transaction_details(ctx, &hash).await?;
            serde_json::to_value(details)?
        }
        Commands::Send(args) => {
            let sender = signer_address.ok_or("no signing key configured")?;
            let fee = match (args.gas_price, args.max_fee, args.priority_fee) {
                (Some(gas_price), _, _) => FeeModel::Legacy { gas_price },
                (None, Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) => {
                    FeeModel::DynamicFee {
                        max_fee_per_gas,
                        max_priority_fee_per_gas,
                    }
                }
                _ => return Err("either --gas-price or --max-fee/--priority-fee is required".into()),
            };
            let tx = Transaction::evm(
                Address::from_evm(sender, network)?,
                Address::parse(&args.to, network)?,
                args.amount,
                TransactionType::Transfer,
                EvmFields {
                    nonce: args.nonce,
                    gas_limit: args.gas_limit,
                    chain_id: args.chain_id,
                    fee,
                    data: args.data,
                },
            );
            let hash = manager.send_transaction(ctx, tx).await?;
            json!({ "network": network, "tx_hash": hash })
        }
    };
    Ok(output)
}
