//! Server binary: loads settings, opens the store, creates tables, seeds, and serves the API.

use axum::{extract::Request, ServiceExt};
use starwars_api::{app, apply_migrations, connect, seed_if_empty, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("starwars_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let store = connect(&settings).await?;
    apply_migrations(&store).await?;
    seed_if_empty(&store).await?;

    let state = AppState::new(store, settings.current_user_id);
    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        current_user_id = settings.current_user_id,
        "listening"
    );
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app(state))).await?;
    Ok(())
}
