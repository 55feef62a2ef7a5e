use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use symcheck::api::{self, ApiContext};
use symcheck::config::{self, Config};
use symcheck::db;
use symcheck::inference::HttpInferenceClient;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Cannot create data directory {}: {e}", parent.display()))?;
    }

    // Run migrations up front so schema problems surface at startup.
    let conn = db::open_database(&config.db_path).map_err(|e| e.to_string())?;
    drop(conn);
    tracing::info!(db = %config.db_path.display(), "Database ready");

    let inference = HttpInferenceClient::new(
        &config.inference.base_url,
        &config.inference.app_id,
        &config.inference.app_key,
        config.inference.timeout_secs,
    );

    let bind_addr = config.bind_addr;
    let ctx = ApiContext::new(Arc::new(config), Arc::new(inference))
        .map_err(|e| e.to_string())?;
    tracing::info!(conditions = ctx.conditions.len(), "Reference table loaded");

    let mut server = api::start_server(ctx, bind_addr).await?;
    tracing::info!(addr = %server.local_addr, "Listening");

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Cannot listen for shutdown signal: {e}"))?;
    tracing::info!("Shutdown requested");
    server.shutdown();

    Ok(())
}
