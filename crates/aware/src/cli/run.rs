//! Bot lifecycle.

use aware::{
    AntinukeHandler, AwareBot, AwareConfig, AwareResult, DetectionOrchestrator, GuildLogger,
    PlatformError, SqliteExemptionStore, SqlitePolicyStore, discord_capabilities,
};
use std::sync::Arc;
use tracing::info;

/// Opens storage, builds the pipeline and runs the gateway until shutdown.
pub async fn run_bot(config: &AwareConfig, token: &str) -> AwareResult<()> {
    let conn = aware::open(&config.database.url)?;
    info!(database = %config.database.url, "Storage ready");

    let policies = Arc::new(SqlitePolicyStore::from_arc(conn.clone()));
    let exemptions = Arc::new(SqliteExemptionStore::from_arc(conn));

    let capabilities =
        discord_capabilities(token, &config.notifications.username, policies, exemptions)
            .map_err(PlatformError::from)?;
    let guild_logger = GuildLogger::from_config(Arc::clone(&capabilities.transport), &config.logging);
    let orchestrator = Arc::new(DetectionOrchestrator::new(capabilities, config));

    let sweeper = orchestrator
        .accountant()
        .spawn_sweeper(config.rate_limit.sweep_interval());

    let mut handler = AntinukeHandler::new(Arc::clone(&orchestrator));
    match guild_logger {
        Some(logger) => {
            info!(enabled = logger.is_enabled(), "Guild join/leave log configured");
            handler = handler.with_guild_logger(Arc::new(logger));
        }
        None => info!("No guild log webhook configured"),
    }

    let mut bot = AwareBot::with_handler(token, handler)
        .await
        .map_err(PlatformError::from)?;
    let result = bot.start().await.map_err(PlatformError::from);

    sweeper.abort();
    info!(metrics = ?orchestrator.metrics().snapshot(), "Gateway closed");
    result?;
    Ok(())
}
