use navmenu::{
    api::{AppState, build_router},
    config::{self, server::ServerConfig},
    core,
    errors::Result,
};
use dotenvy::dotenv;
use std::path::Path;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received, stopping server.");
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();

    let server_config = ServerConfig::from_env()
        .inspect_err(|e| error!("Invalid server configuration: {}", e))?;

    // 3. Connect and create the schema
    let database_url = config::database::get_database_url();
    let db = config::database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|()| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 4. Seed initial menus when a seed file is present
    let seed_path = config::seed::get_seed_path();
    if Path::new(&seed_path).exists() {
        let seed_config = config::seed::load_seed_config(&seed_path)?;
        core::seed::seed_initial_menus(&db, &seed_config)
            .await
            .inspect(|created| info!("Seeded {} menus from {}", created, seed_path))
            .inspect_err(|e| error!("Failed to seed initial menus: {}", e))?;
    } else {
        info!("No seed file at {}, skipping seed data", seed_path);
    }

    // 5. Serve
    let addr = server_config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", addr, e))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, build_router(AppState::new(db)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
