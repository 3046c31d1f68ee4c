//! stockpay - pay for a stock position in stablecoins.
//!
//! Each subcommand connects the wallet first, then runs its steps in order.
//! Outcome messages go to stdout; a failed step prints one error line to
//! stderr and exits with status 1.

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use stockpay_app::{render, AppConfig, Orchestrator};
use stockpay_core::PaymentResult;
use tracing::{info, info_span, Instrument};

/// Stock-priced stablecoin payments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via STOCKPAY_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the stablecoin cost of QUANTITY shares of TICKER
    Quote { ticker: String, quantity: String },
    /// Quote, then pay for QUANTITY shares of TICKER
    Pay { ticker: String, quantity: String },
    /// Show the connected account, its native balance and the gas price
    Wallet,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    stockpay_telemetry::init_logging()?;
    info!("Starting stockpay v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(args.config)?;
    let mut orchestrator = stockpay_app::build_orchestrator(&config)?;
    let native_symbol = config.chain.native_currency.symbol.clone();

    let outcome = run(&mut orchestrator, args.command, &native_symbol).await;
    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            info!(kind = err.kind(), state = %orchestrator.state(), "Operation failed");
            eprintln!("{}", render::failure(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run(
    orchestrator: &mut Orchestrator,
    command: Command,
    native_symbol: &str,
) -> PaymentResult<()> {
    let symbol = orchestrator.executor().symbol().to_string();

    let report = orchestrator
        .connect()
        .instrument(info_span!("connect"))
        .await?;
    for line in render::connected(&report) {
        println!("{line}");
    }

    match command {
        Command::Quote { ticker, quantity } => {
            let quote = orchestrator
                .quote(&ticker, &quantity)
                .instrument(info_span!("quote", %ticker, %quantity))
                .await?;
            println!("{}", render::cost(&quote, &symbol));
        }
        Command::Pay { ticker, quantity } => {
            let quote = orchestrator
                .quote(&ticker, &quantity)
                .instrument(info_span!("quote", %ticker, %quantity))
                .await?;
            println!("{}", render::cost(&quote, &symbol));

            let receipt = orchestrator.pay().instrument(info_span!("pay")).await?;
            println!("{}", render::payment_submitted(&receipt, &symbol));
        }
        Command::Wallet => {
            let (balance, gas_price) = tokio::try_join!(
                orchestrator.native_balance(),
                orchestrator.gas_price(),
            )?;
            println!("{}", render::balance(&balance, native_symbol));
            println!("Gas price: {gas_price} wei");
        }
    }
    Ok(())
}
