//! Social Analytics Service
//!
//! Serves top users and popular/latest posts computed from a social media
//! API, behind a static bearer token.
//!
//! Usage:
//!   cargo run --release --bin social_service
//!
//! Environment variables:
//!   HOST / PORT - bind address (default: 0.0.0.0:3000)
//!   BEARER_TOKEN - token clients must send; forwarded upstream (required)
//!   API_URL - social media API base URL (required)
//!   FETCH_TIMEOUT_MS - per-call time budget (default: 5000)

use dotenv::dotenv;
use log::{error, info};
use numflow::http;
use numflow::social::{server, BearerAuth, HttpSocialApi, SocialConfig, SocialService};
use numflow::upstream::UpstreamClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    info!("🚀 Social Analytics Service");

    let config = match SocialConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("📊 Configuration:");
    info!("   ├─ Bind: {}", config.bind_addr);
    info!("   ├─ API: {}", config.api_url);
    info!("   └─ Fetch timeout: {}ms", config.fetch_timeout.as_millis());

    let client = UpstreamClient::new(Some(config.bearer_token.clone()), config.fetch_timeout)?;
    let service = Arc::new(SocialService {
        api: Arc::new(HttpSocialApi::new(config.api_url.clone(), client)),
        auth: BearerAuth::new(&config.bearer_token),
    });

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

    info!("✅ Social Analytics Service stopped");
    Ok(())
}
