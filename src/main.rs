//! ISC Native-Token Deployer
//!
//! One-shot deployment tool: deploys the NativeTokenController on the origin
//! chain, registers the token as a wrapped ERC20 on the target chain, mints
//! the full supply and performs a local plus a cross-chain transfer.
//!
//! The workflow is not idempotent. Re-running after a partial failure
//! deploys a fresh controller instead of resuming.

use clap::Parser;
use tracing::info;

use isc_token_deployer::{Config, Deployer};

#[derive(Parser)]
#[command(name = "isc-token-deployer")]
#[command(about = "Deploy an ISC native token and its wrapped ERC20 across chains", long_about = None)]
struct Cli {
    /// Path to the .env file with token and network settings
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Override the cross-chain settling timeout, in seconds
    #[arg(long)]
    settle_timeout_secs: Option<u64>,
}

fn main() -> eyre::Result<()> {
    // Install color-eyre for better error reporting
    color_eyre::install()?;

    // Run the async main
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async_main())
}

async fn async_main() -> eyre::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let mut config = Config::load_from_file(&cli.env_file)?;
    if let Some(secs) = cli.settle_timeout_secs {
        config.sync.settle_timeout_ms = secs.saturating_mul(1000);
    }

    info!(
        token = %config.token.name,
        symbol = %config.token.symbol,
        origin_chain_id = config.origin.chain_id,
        target_chain_id = config.target.chain_id,
        "Configuration loaded"
    );

    let deployer = Deployer::new(config)?;
    let summary = deployer.run().await?;

    println!("{summary}");
    Ok(())
}

/// Initialize tracing/logging with structured output
fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,isc_token_deployer=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}
