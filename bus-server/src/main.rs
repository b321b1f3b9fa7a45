use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bus_server::config::ServerConfig;
use bus_server::db::Database;
use bus_server::web::{AppState, create_router};

const DEFAULT_LOG_FILTER: &str = "bus_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; real environment variables still apply
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    match serve().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let db = Database::open(&config.db).await?;
    let app = create_router(AppState::new(db), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "bus dashboard listening on http://{}", config.bind_addr);
    info!("  GET  /            - Dashboard page");
    info!("  POST /dashboard   - Re-run filters (JSON or HTML fragment)");
    info!("  GET  /health      - Health check");

    axum::serve(listener, app).await?;
    Ok(())
}
