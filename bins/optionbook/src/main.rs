//! Optionbook CLI Binary
//!
//! This is the main entry point for the Optionbook application. It provides
//! commands for initializing and validating configuration and for running
//! the read pipeline against the built-in demo chain.

use anyhow::{Context, Result};
use catalog::{OptionCatalog, OptionSeries, Pair};
use chain::{AccountReads, InMemoryChain, OrderFeeQuote, RawOptionCreated};
use cli::{Cli, Commands};
use common::{pow10, Address, Side, TokenInfo, B256, U256};
use config::{load_config, save_config, validate_config, AppConfig, LoggingConfig};
use observability::{init_logging_with_level, LogFormat};
use orders::{fee_string, market_cost_string, quote_market_order, CounterOrder, MarketQuote};
use positions::{Position, PositionAggregator};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Snapshot {
            config,
            account,
            json,
        } => snapshot_command(config, account, json).await,
        Commands::Validate { config } => validate_command(config).await,
        Commands::Init { output } => init_command(output).await,
    }
}

fn init_logging_from(logging: &LoggingConfig) -> Result<()> {
    let format = LogFormat::parse(&logging.format).unwrap_or_default();
    init_logging_with_level("optionbook", format, &logging.level)
}

async fn init_command<P: AsRef<Path>>(output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    init_logging_from(&LoggingConfig::default())?;
    info!(?output_path, "Initializing new configuration file");

    let config = AppConfig::generate_default();

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
    }

    save_config(&config, output_path)?;

    println!("[ok] Configuration file created successfully!");
    println!();
    println!("Location: {:?}", output_path);
    println!();
    println!("Next steps:");
    println!("  1. Set chain.rpc_url and chain.factory_address for your deployment");
    println!(
        "  2. Run 'optionbook validate --config {:?}' to check configuration",
        output_path
    );
    println!(
        "  3. Run 'optionbook snapshot --config {:?}' to exercise the pipeline",
        output_path
    );

    Ok(())
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[error] Failed to load configuration: {:#}", e);
            anyhow::bail!(e);
        }
    };
    init_logging_from(&config.logging)?;
    info!(path = ?config_path.as_ref(), "Validating configuration");

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] {}", warning);
        }
        println!();
    }

    if !report.errors.is_empty() {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        println!();
        anyhow::bail!("Configuration validation failed");
    }

    println!("[ok] Configuration is valid!");
    println!();
    println!("RPC endpoint: {}", config.chain.rpc_url);
    println!("Factory: {}", config.chain.factory_address);
    println!("Scan from block: {}", config.chain.genesis_block);

    Ok(())
}

/// The full snapshot the demo pipeline produces for one account.
#[derive(Serialize)]
struct Snapshot {
    pairs: Vec<Pair>,
    options: Vec<OptionSeries>,
    written: Vec<Position>,
    exercisable: Vec<Position>,
    market_quote: MarketQuote,
}

async fn snapshot_command<P: AsRef<Path>>(config_path: P, account: Address, json: bool) -> Result<()> {
    let config = load_config(&config_path)?;
    init_logging_from(&config.logging)?;

    let report = validate_config(&config);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    if !report.is_valid() {
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot run snapshot due to configuration errors");
    }

    info!(%account, "Running pipeline snapshot against the demo chain");

    let chain = demo_chain(account);
    let catalog = Arc::new(OptionCatalog::from_config(chain.clone(), &config.chain));
    let aggregator = PositionAggregator::new(chain.clone(), catalog.clone());

    let pairs = catalog.list_pairs().await?;
    let mut options = Vec::new();
    let mut written = Vec::new();
    let mut exercisable = Vec::new();
    for pair in &pairs {
        options.extend(catalog.list_options(pair, None, false).await?);
        written.extend(aggregator.written_positions(pair, account).await?);
        exercisable.extend(aggregator.exercisable_positions(pair, account).await?);
    }

    // A small demo book against the first pair's quote asset.
    let quote_token = pairs
        .first()
        .map(|p| p.strike_info.clone())
        .unwrap_or_else(|| TokenInfo::new(Address::ZERO, "USDC", 6, 2));
    let book = demo_book(quote_token.address);
    let market_quote = quote_market_order(U256::from(8u8) * pow10(18), &book, Side::Buy, 18)?;

    let snapshot = Snapshot {
        pairs,
        options,
        written,
        exercisable,
        market_quote,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("\n=== Optionbook Snapshot ===\n");
    println!("Pairs ({}):", snapshot.pairs.len());
    for pair in &snapshot.pairs {
        println!("  {}", pair);
    }
    println!();
    println!("Options ({}):", snapshot.options.len());
    for series in &snapshot.options {
        println!("  {}", series);
    }
    println!();
    println!("Written positions ({}):", snapshot.written.len());
    for position in &snapshot.written {
        println!(
            "  {}  collateral={}  minted={}",
            position.series, position.current_collateral, position.current_collateralized_tokens
        );
    }
    println!();
    println!("Exercisable positions ({}):", snapshot.exercisable.len());
    for position in &snapshot.exercisable {
        println!(
            "  {}  open={}  balance={}",
            position.series, position.open_position, position.balance
        );
    }
    println!();
    println!(
        "Market buy of 8 base tokens: cost {}  fee {}",
        market_cost_string(&snapshot.market_quote, &quote_token),
        fee_string(
            snapshot.market_quote.taker_fee,
            snapshot
                .market_quote
                .taker_fee_asset
                .map(|_| &quote_token)
        ),
    );

    Ok(())
}

const WETH: Address = Address::repeat_byte(0x01);
const USDC: Address = Address::repeat_byte(0x03);
const OPT_PUT_LIVE: Address = Address::repeat_byte(0x10);
const OPT_CALL_LIVE: Address = Address::repeat_byte(0x11);
const OPT_CALL_EXPIRED: Address = Address::repeat_byte(0x12);

const LIVE_EXPIRY: u64 = 4_102_444_800; // 2100-01-01
const PAST_EXPIRY: u64 = 1_577_836_800; // 2020-01-01

/// Seed the in-memory chain with a small but representative fixture: one
/// WETH/USDC pair with a live put, a live call, and an expired call, plus
/// positions for the demo account.
fn demo_chain(account: Address) -> Arc<InMemoryChain> {
    let chain = Arc::new(InMemoryChain::new());
    chain.add_token(TokenInfo::new(WETH, "WETH", 18, 4));
    chain.add_token(TokenInfo::new(USDC, "USDC", 6, 2));

    let seed = |option: Address, expiry: u64, is_call: bool, sym: &str| {
        chain.add_token(TokenInfo::new(option, sym, 18, 4));
        chain.add_option(
            RawOptionCreated {
                option,
                underlying: WETH,
                strike_asset: USDC,
                expiry,
                is_call,
            },
            U256::from(30u8),
        );
    };
    seed(OPT_PUT_LIVE, LIVE_EXPIRY, false, "WETHP-2100");
    seed(OPT_CALL_LIVE, LIVE_EXPIRY, true, "WETHC-2100");
    seed(OPT_CALL_EXPIRED, PAST_EXPIRY, true, "WETHC-2020");

    // The demo account wrote the put and holds bought calls.
    chain.set_account_reads(
        OPT_PUT_LIVE,
        account,
        AccountReads {
            current_collateral: U256::from(5_000u64) * pow10(6),
            assignable_collateral: U256::from(5_000u64) * pow10(6),
            current_collateralized_tokens: U256::from(2u8) * pow10(18),
            ..Default::default()
        },
    );
    chain.set_account_reads(
        OPT_CALL_LIVE,
        account,
        AccountReads {
            balance: U256::from(3u8) * pow10(18),
            ..Default::default()
        },
    );

    chain.set_fee_quote(OrderFeeQuote {
        taker_fee: U256::from(500_000u64),
        taker_fee_asset: Some(USDC),
        ..Default::default()
    });

    chain
}

/// Two resting asks, enough liquidity for the demo market buy.
fn demo_book(fee_asset: Address) -> Vec<CounterOrder> {
    vec![
        CounterOrder {
            order_id: B256::repeat_byte(0x01),
            price: U256::from(100u8) * pow10(6),
            available: U256::from(5u8) * pow10(18),
            taker_fee: U256::from(250_000u64),
            taker_fee_asset: Some(fee_asset),
        },
        CounterOrder {
            order_id: B256::repeat_byte(0x02),
            price: U256::from(105u8) * pow10(6),
            available: U256::from(5u8) * pow10(18),
            taker_fee: U256::from(250_000u64),
            taker_fee_asset: Some(fee_asset),
        },
    ]
}
