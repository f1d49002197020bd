use anyhow::Result;
use tracing::info;

use contribution_tracker::config::AppConfig;
use contribution_tracker::logging::init_tracing;
use contribution_tracker::storage::DbConnection;
use contribution_tracker::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging)?;

    info!("Setting up database at {}", config.database.url);
    let db = DbConnection::init(&config.database).await?;

    let app_state = initialize_backend(db);
    let app = create_router(app_state, &config.server)?;

    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
