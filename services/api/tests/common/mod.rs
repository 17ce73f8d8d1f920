//! Shared setup for the integration tests: an in-memory SQLite store and the
//! router wired onto it.

#![allow(dead_code)]

use api_lib::adapters::{LocalCatalog, SqliteStore};
use api_lib::config::Config;
use api_lib::web::{router, AppState};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::Path;
use std::sync::Arc;

/// A migrated store on a private in-memory database.
///
/// Every in-memory connection is its own database, so the pool holds exactly one.
pub async fn memory_store() -> anyhow::Result<Arc<SqliteStore>> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let store = SqliteStore::new(pool);
    store.run_migrations().await?;
    Ok(Arc::new(store))
}

pub fn test_config() -> anyhow::Result<Config> {
    Ok(Config::from_lookup(|name| {
        (name == "DATABASE_URL").then(|| "sqlite::memory:".to_string())
    })?)
}

/// The router over the bundled catalog, without any remote provider.
pub async fn test_app() -> anyhow::Result<Router> {
    let store = memory_store().await?;
    let catalog_path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/recipes.json");
    let catalog = Arc::new(LocalCatalog::load(&catalog_path).await?);
    let state = AppState::new(&test_config()?, store, catalog, vec![]);
    Ok(router(Arc::new(state)))
}
