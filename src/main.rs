pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod tracker;

use config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Before logging, so a RUST_LOG set in .env takes effect.
    config::load_dotenv()?;
    logging::init();

    let config = Config::from_env()?;
    tracing::info!("Starting exercise tracker...");

    api::server::start_server(config).await
}
