use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::RosterConfigBuilder;

mod app;
mod config;
mod roster;
mod storage;

const VERSION_STRING: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the TOML config file.
    #[arg(short, long, default_value = "roster.toml")]
    config: PathBuf,

    /// Address to listen on, overrides ROSTER_ADDRESS and the config file.
    #[arg(long)]
    address: Option<IpAddr>,

    /// Port to listen on, overrides ROSTER_PORT and the config file.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    info!("{VERSION_STRING}");

    let args = Args::parse();
    let mut overrides = RosterConfigBuilder::default();
    if let Some(address) = args.address {
        overrides.address(address);
    }
    if let Some(port) = args.port {
        overrides.port(port);
    }

    let config = match config::read_config(&args.config, overrides).await {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match roster::roster(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
