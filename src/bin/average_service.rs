//! Average Service
//!
//! Keeps a window of the last unique numbers fetched from the number
//! generators and reports their average on `GET /numbers/{p|f|e|r}`.
//!
//! Usage:
//!   cargo run --release --bin average_service
//!
//! Environment variables:
//!   HOST / PORT - bind address (default: 0.0.0.0:9876)
//!   TOKEN - bearer token for the number generators
//!   NUMBERS_API_URL - generator base URL
//!   FETCH_TIMEOUT_MS - per-fetch time budget (default: 500)
//!   WINDOW_SIZE - window capacity (default: 10)

use dotenv::dotenv;
use log::{error, info};
use numflow::average::{server, AverageConfig, AverageService, HttpNumberSource};
use numflow::http;
use numflow::upstream::UpstreamClient;
use numflow::window::NumberWindow;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    info!("🚀 Average Service");

    let config = match AverageConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("📊 Configuration:");
    info!("   ├─ Bind: {}", config.bind_addr);
    info!("   ├─ Numbers API: {}", config.numbers_api_url);
    info!("   ├─ Token: {}", if config.token.is_some() { "set" } else { "not set" });
    info!("   ├─ Fetch timeout: {}ms", config.fetch_timeout.as_millis());
    info!("   └─ Window size: {}", config.window_size);

    let client = UpstreamClient::new(config.token.clone(), config.fetch_timeout)?;
    let source = HttpNumberSource::new(config.numbers_api_url.clone(), client);
    let service = Arc::new(AverageService::new(
        NumberWindow::new(config.window_size),
        Arc::new(source),
    ));

    let listener = http::bind(config.bind_addr).await?;
    info!("✅ Listening on http://{}", config.bind_addr);
    info!("🔄 Press CTRL+C to shutdown gracefully");

    tokio::select! {
        () = server::run(listener, service) => {
            error!("❌ Server stopped unexpectedly");
        }
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("⚠️  Received CTRL+C, shutting down..."),
                Err(e) => error!("❌ Failed to listen for CTRL+C: {}", e),
            }
        }
    }

    info!("✅ Average Service stopped");
    Ok(())
}
