//! Intake Relay - form-submission intake endpoint for work-management boards.

use intake_relay::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up a local .env if present (board API key, overrides)
    dotenvy::dotenv().ok();

    // Load configuration
    let config = ServerConfig::load()?;

    // Start server
    intake_relay::start_server(config).await?;

    Ok(())
}
