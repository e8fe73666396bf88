//! caption-server - HTTP API for photo caption generation

use clap::Parser;
use instacaption::Config;
use instacaption::server;
use instacaption::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "caption-server", version, about = "HTTP API for photo caption generation")]
struct Args {
    /// Configuration file (defaults to config/caption.yaml when present)
    #[arg(short, long, env = "CAPTION_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match Config::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging);

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the multi-line bind hints readable
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
