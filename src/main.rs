use std::process;

use css_intel::config::IntelConfig;
use css_intel::logging;
use css_intel::server::start_language_server;
use log::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match IntelConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // Use eprintln since logger isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = logging::init_logger(config.log_level_filter()) {
        eprintln!("Failed to initialize logger: {}", e);
        process::exit(1);
    }

    info!("CSS Intel starting");
    info!("Command line arguments: {:?}", std::env::args().collect::<Vec<_>>());

    if let Err(e) = start_language_server(config).await {
        error!("Language server error: {:?}", e);
        process::exit(1);
    }

    info!("CSS Intel shutting down");
}
