//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{LocalCatalog, SpoonacularProvider, SqliteStore},
    config::{Config, ConfigError},
    error::ApiError,
    web::{router, ApiDoc, AppState},
};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderName, HeaderValue, Method,
};
use axum::Router;
use meal_planner_core::ports::RecipeProvider;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = Arc::new(SqliteStore::new(db_pool));
    info!("Running database migrations...");
    store.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Initialize Recipe Providers ---
    let catalog = Arc::new(
        LocalCatalog::load(&config.catalog_path)
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))?,
    );

    let mut remote: Vec<Arc<dyn RecipeProvider>> = Vec::new();
    match &config.spoonacular_api_key {
        Some(api_key) => {
            remote.push(Arc::new(SpoonacularProvider::new(
                &config.spoonacular_base_url,
                api_key,
                config.remote_timeout,
            )?));
            info!("Spoonacular recipe provider enabled.");
        }
        None => warn!("SPOONACULAR_API_KEY not set; api- recipes resolve from the local catalog only."),
    }

    // --- 4. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(&config, store, catalog, remote));

    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ConfigError::InvalidValue("CORS_ORIGIN".to_string(), e.to_string())
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT, HeaderName::from_static("x-user-id")]);

    // --- 5. Create the Web Router ---
    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
