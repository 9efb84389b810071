use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use clinica::api::{api_router, ApiContext};
use clinica::{config, db};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!(version = config::APP_VERSION, "starting {}", config::APP_NAME);

    if let Err(e) = run().await {
        tracing::error!("fatal: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = config::database_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let conn = db::open_database(&db_path)?;
    tracing::info!(path = %db_path.display(), "database ready");

    let addr = config::bind_addr();
    let app = api_router(ApiContext::new(conn));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
