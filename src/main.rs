//! Operator CLI for the ledger client.
//!
//! # Architecture Overview
//!
//! ```text
//!   CLI args ──▶ config (TOML + overrides) ──▶ LibraClient::connect
//!                                                   │
//!           ┌───────────────────────────────────────┤
//!           ▼                                       ▼
//!   account / events / txns                     mint (faucet)
//!           │                                       │
//!           ▼                                       ▼
//!   UpdateToLatestLedger ──▶ verification ──▶ JSON on stdout
//! ```
//!
//! Errors are reported on stderr as `<context>: [<kind>] <message>`.

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use libra_client::config::{load_config, ClientConfig};
use libra_client::ledger::Address;
use libra_client::observability::logging::init_logging;
use libra_client::transport::HttpTransport;
use libra_client::{ClientError, ClientResult, LibraClient};

#[derive(Parser)]
#[command(name = "libra-client")]
#[command(about = "Query and fund accounts on a permissioned ledger", long_about = None)]
struct Cli {
    /// Client configuration file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Trusted validator set file; overrides the configuration.
    #[arg(long)]
    validator_set: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum EventStream {
    Sent,
    Received,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the latest verified ledger info
    LedgerInfo,
    /// Show an account's decoded resource
    Account { address: Address },
    /// Show an account's balance
    Balance { address: Address },
    /// Show an account's sequence number
    Sequence { address: Address },
    /// Look a transaction up by sender and sequence number
    TxnBySeq {
        address: Address,
        sequence_number: u64,
        #[arg(long)]
        fetch_events: bool,
    },
    /// List committed transactions from a version
    Txns {
        start_version: u64,
        #[arg(long, default_value_t = 1)]
        limit: u64,
    },
    /// List payment events for an account
    Events {
        address: Address,
        #[arg(value_enum)]
        stream: EventStream,
        /// Starting event sequence number (default: oldest, or newest with --descending)
        #[arg(long)]
        start: Option<u64>,
        #[arg(long)]
        descending: bool,
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Mint coins through the network's faucet
    Mint {
        address: Address,
        amount: u64,
        /// Wait until the mint transaction is stored
        #[arg(long)]
        blocking: bool,
    },
}

impl Commands {
    fn context(&self) -> &'static str {
        match self {
            Commands::LedgerInfo => "Failed to get ledger info",
            Commands::Account { .. } => "Failed to get account state",
            Commands::Balance { .. } => "Failed to get balance",
            Commands::Sequence { .. } => "Failed to get sequence number",
            Commands::TxnBySeq { .. } => "Failed to get transaction",
            Commands::Txns { .. } => "Failed to get transactions",
            Commands::Events { .. } => "Failed to get events",
            Commands::Mint { .. } => "Failed to mint coins",
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => ClientConfig::default(),
    };
    if let Some(path) = cli.validator_set {
        config.network.validator_set_path = Some(path);
    }

    init_logging(&config.observability);
    tracing::debug!(network = %config.network.name, "Configuration loaded");

    let client = match LibraClient::connect(&config) {
        Ok(client) => client,
        Err(e) => {
            report_error("Failed to initialize client", &e);
            return ExitCode::FAILURE;
        }
    };

    let context = cli.command.context();
    match run(&client, cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(context, &e);
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &LibraClient<HttpTransport>, command: Commands) -> ClientResult<()> {
    match command {
        Commands::LedgerInfo => print_json(&client.get_latest_ledger_info().await?)?,
        Commands::Account { address } => print_json(&client.get_account_resource(address).await?)?,
        Commands::Balance { address } => println!("{}", client.get_balance(address).await?),
        Commands::Sequence { address } => {
            println!("{}", client.get_sequence_number(address).await?)
        }
        Commands::TxnBySeq {
            address,
            sequence_number,
            fetch_events,
        } => {
            let (txn, _) = client
                .get_account_transaction_with_proof(address, sequence_number, fetch_events)
                .await?;
            print_json(&txn)?
        }
        Commands::Txns {
            start_version,
            limit,
        } => print_json(&client.get_transactions(start_version, limit).await?)?,
        Commands::Events {
            address,
            stream,
            start,
            descending,
            limit,
        } => {
            let ascending = !descending;
            let start = start.unwrap_or(if ascending { 0 } else { u64::MAX });
            let events = match stream {
                EventStream::Sent => client.get_events_sent(address, start, ascending, limit).await?,
                EventStream::Received => {
                    client
                        .get_events_received(address, start, ascending, limit)
                        .await?
                }
            };
            print_json(&events)?
        }
        Commands::Mint {
            address,
            amount,
            blocking,
        } => {
            let sequence_number = client
                .mint_coins_with_faucet_service(address, amount, blocking)
                .await?;
            if blocking {
                println!("Finished minting (association sequence number {})", sequence_number);
            } else {
                println!("Mint request submitted (association sequence number {})", sequence_number);
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> ClientResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::from)?;
    println!("{}", text);
    Ok(())
}

/// The single place error kinds become user-facing messages.
fn report_error(context: &str, err: &ClientError) {
    eprintln!("{}: [{}] {}", context, err.kind(), err);
}
