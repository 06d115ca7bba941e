//! # Cardinal Theme Server
//!
//! Binary that serves the theme REST API: config, structured logging,
//! database bootstrap, seed theme, HTTP listener.

use std::net::SocketAddr;

use cardinal_api::{build_router, AppState};
use cardinal_common::models::Theme;
use cardinal_db::{repository::themes, Database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = cardinal_common::config::init()?;

    // Initialize tracing (structured logging)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cardinal=debug,tower_http=debug".into()),
        )
        .with_target(true)
        .init();

    tracing::info!("Starting Cardinal theme service v{}", env!("CARGO_PKG_VERSION"));

    // Connect and bootstrap the database
    let db = Database::connect(config).await?;
    db.init_schema().await?;
    seed_system_theme(&db).await?;

    let router = build_router(AppState { db });
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    tracing::info!("REST API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Insert the built-in default theme as a public system theme (no owner)
/// so a fresh marketplace is never empty. The seed uses the nil UUID, so
/// re-running on an existing database is a no-op.
async fn seed_system_theme(db: &Database) -> anyhow::Result<()> {
    let seed = Theme::built_in_default();
    if themes::find_by_id(&db.pool, seed.id).await?.is_none() {
        themes::upsert(&db.pool, &seed).await?;
        tracing::info!("Seeded system theme '{}'", seed.name);
    }
    Ok(())
}
