//! Check Prices - MTG card price & availability API server
//!
//! Loads the store configuration once at startup and serves the batch
//! price-check API.

use check_prices::{PriceChecker, StoresConfig};
use clap::Parser;
use std::sync::Arc;

/// MTG card price checker API server
#[derive(Parser, Debug)]
#[command(name = "check_prices")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the store configuration file
    #[arg(short, long, default_value = "config.json")]
    config: String,

    /// Host interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for the API server
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match StoresConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration from '{}': {}", args.config, e);
            std::process::exit(1);
        }
    };

    let checker = match PriceChecker::new(config) {
        Ok(checker) => Arc::new(checker),
        Err(e) => {
            log::error!("Failed to initialize price checker: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Configured {} store(s)", checker.store_count());

    if let Err(e) = check_prices::web::serve(checker, &args.host, args.port).await {
        log::error!("API server error: {}", e);
        std::process::exit(1);
    }
}
