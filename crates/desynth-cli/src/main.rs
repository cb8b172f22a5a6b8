mod chain;
mod cmd;
mod confirm;
mod output;

use clap::{Parser, Subcommand};
use cmd::remove::RemoveOpts;
use cmd::verify::VerifyOpts;

#[derive(Parser)]
#[command(
    name = "desynth",
    about = "Decommission synths from a deployed protocol instance",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove synths: issuer removal, aggregator deregistration, status resumption
    Remove(RemoveOpts),

    /// Read-only consistency check of deployment vs. on-chain registry
    Verify(VerifyOpts),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Remove(opts) => cmd::remove::run(opts, cli.json).await,
        Commands::Verify(opts) => cmd::verify::run(opts, cli.json).await,
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
