use anyhow::Context;
use hr_server::{Config, Server, ServerState, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. .env and logging
    setup_environment();

    tracing::info!("HR server starting...");

    // 2. Configuration
    let config = Config::from_env().context("failed to load configuration")?;

    // 3. State (users, permission snapshot, JWT)
    let state = ServerState::initialize(&config).context("failed to initialize server state")?;

    // 4. Serve
    Server::new(config, state)
        .run()
        .await
        .inspect_err(|e| tracing::error!("Server error: {}", e))
        .context("server stopped with an error")
}
