pub mod middleware;
pub mod protocol;
pub mod recipes;
pub mod rest;
pub mod state;
pub mod templates;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

pub use middleware::resolve_owner;
pub use rest::ApiDoc;
pub use state::AppState;

/// Builds the REST router. Every route runs behind owner resolution.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/plans/adopt-local", post(rest::adopt_local_handler))
        .route(
            "/plans/{week}",
            get(rest::get_plan_handler).delete(rest::delete_plan_handler),
        )
        .route(
            "/plans/{week}/meals",
            post(rest::add_meal_handler).delete(rest::remove_meal_handler),
        )
        .route("/plans/{week}/move", post(rest::move_meal_handler))
        .route("/plans/{week}/clear", post(rest::clear_plan_handler))
        .route("/plans/{week}/shopping-list", get(rest::shopping_list_handler))
        .route("/plans/{week}/nutrition", get(rest::nutrition_handler))
        .route(
            "/plans/{week}/apply-template/{id}",
            post(templates::apply_template_handler),
        )
        .route(
            "/templates",
            get(templates::list_templates_handler).post(templates::save_template_handler),
        )
        .route("/templates/{id}", delete(templates::delete_template_handler))
        .route("/recipes", get(recipes::search_recipes_handler))
        .route("/recipes/{id}", get(recipes::get_recipe_handler))
        .route("/favorites", get(recipes::list_favorites_handler))
        .route("/favorites/{id}", post(recipes::toggle_favorite_handler))
        .layer(axum_middleware::from_fn(resolve_owner))
        .with_state(app_state)
}
