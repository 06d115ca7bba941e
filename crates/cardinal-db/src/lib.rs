//! # cardinal-db
//!
//! Database layer for Cardinal. Runs on the sqlx `Any` driver so one
//! codebase serves both deployments:
//! - **PostgreSQL** — production
//! - **SQLite** — lite mode and tests (in-memory)
//!
//! Theme token maps (colors, fonts, spacing, shadows, preview) are stored
//! as JSON text columns and decoded through the helpers in [`row`].

pub mod repository;
pub mod row;

use std::sync::Once;

use anyhow::Result;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

static INSTALL_DRIVERS: Once = Once::new();

/// Schema bootstrap — idempotent, run at startup.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS themes (
        id         TEXT PRIMARY KEY,
        owner_id   TEXT,
        name       TEXT NOT NULL,
        is_public  INTEGER NOT NULL DEFAULT 0,
        colors     TEXT NOT NULL,
        fonts      TEXT NOT NULL,
        radii      TEXT NOT NULL,
        spacing    TEXT NOT NULL,
        shadows    TEXT NOT NULL,
        preview    TEXT NOT NULL,
        tags       TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_themes_owner ON themes (owner_id)",
    "CREATE INDEX IF NOT EXISTS idx_themes_public ON themes (is_public)",
];

/// Shared database state passed through Axum extractors.
#[derive(Clone)]
pub struct Database {
    pub pool: AnyPool,
}

impl Database {
    /// Connect using the application configuration.
    pub async fn connect(config: &cardinal_common::config::AppConfig) -> Result<Self> {
        tracing::info!("Connecting to database...");
        let db = Self::connect_with(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await?;
        tracing::info!("Connected to database");
        Ok(db)
    }

    /// Connect to an explicit URL. Tests use `sqlite::memory:` with a
    /// single connection (each in-memory connection is its own database).
    pub async fn connect_with(url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect(url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the schema if it does not exist.
    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Schema ready");
        Ok(())
    }

    /// Health check — verify the database is reachable.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
