use tracing::{error, info, warn};

use socialfeed::config::LoggingConfig;
use socialfeed::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let (config, load_error) = match Config::load_with_env("config.toml") {
        Ok(config) => (config, None),
        Err(e) => {
            let mut config = Config::default();
            config.apply_env_overrides();
            (config, Some(e))
        }
    };

    if let Err(e) = socialfeed::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        let console_only = LoggingConfig {
            file: None,
            ..config.logging.clone()
        };
        let _ = socialfeed::logging::init(&console_only);
    }

    if let Some(e) = load_error {
        warn!("Failed to load config.toml ({}); using default configuration", e);
    }

    info!("socialfeed starting");

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path, config.database.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("API configured on {}", server.addr());

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
