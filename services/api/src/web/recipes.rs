//! services/api/src/web/recipes.rs
//!
//! Handlers for recipe lookup and favorites.

use crate::web::protocol::{FavoriteToggleResponse, RecipeResponse, RecipeSearchQuery};
use crate::web::rest::planner_error;
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use meal_planner_core::{OwnerKey, RecipeId};
use std::sync::Arc;

/// Search and filter the local recipe catalog. Without parameters every catalog
/// recipe is returned.
#[utoipa::path(
    get,
    path = "/recipes",
    params(RecipeSearchQuery),
    responses(
        (status = 200, description = "Matching recipes", body = [RecipeResponse]),
        (status = 400, description = "Unknown difficulty or sort order")
    )
)]
pub async fn search_recipes_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<RecipeSearchQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let filter = query.to_filter().map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let sort = query.to_sort().map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let mut found = app_state.catalog.filter(&filter);
    sort.apply(&mut found);
    Ok(Json(
        found
            .iter()
            .map(|recipe| RecipeResponse::from(recipe.as_ref()))
            .collect::<Vec<_>>(),
    ))
}

/// Resolve any recipe id, local or `api-` prefixed.
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    responses(
        (status = 200, description = "The recipe", body = RecipeResponse),
        (status = 404, description = "No provider could resolve the id")
    ),
    params(("id" = String, Path, description = "Recipe id"))
)]
pub async fn get_recipe_handler(
    State(app_state): State<Arc<AppState>>,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let recipe_id = RecipeId::from(recipe_id);
    match app_state.recipes.get_recipe_by_id(&recipe_id).await {
        Some(recipe) => Ok(Json(RecipeResponse::from(recipe.as_ref()))),
        None => Err((
            StatusCode::NOT_FOUND,
            format!("Recipe {} not found", recipe_id),
        )),
    }
}

/// The owner's favorite recipes, in the order they were added.
#[utoipa::path(
    get,
    path = "/favorites",
    responses((status = 200, description = "Favorite recipes", body = [RecipeResponse]))
)]
pub async fn list_favorites_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let recipes = app_state
        .favorites
        .favorite_recipes(&owner)
        .await
        .map_err(planner_error)?;
    Ok(Json(
        recipes
            .iter()
            .map(|recipe| RecipeResponse::from(recipe.as_ref()))
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    post,
    path = "/favorites/{id}",
    responses((status = 200, description = "The new favorite state", body = FavoriteToggleResponse)),
    params(("id" = String, Path, description = "Recipe id"))
)]
pub async fn toggle_favorite_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(recipe_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let recipe_id = RecipeId::from(recipe_id);
    let favorite = app_state
        .favorites
        .toggle(&owner, &recipe_id)
        .await
        .map_err(planner_error)?;
    Ok(Json(FavoriteToggleResponse {
        recipe_id: recipe_id.to_string(),
        favorite,
    }))
}
