//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the meal plan endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    AdoptResponse, DayMeals, FavoriteToggleResponse, IngredientPayload, MealRequest, MoveMealRequest,
    NutritionPayload, NutritionResponse, PlanResponse, RecipeResponse, SaveTemplateRequest,
    ShoppingListItem, ShoppingListResponse, TemplateResponse, WeekMealsPayload,
};
use crate::web::state::AppState;
use crate::web::{recipes, templates};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use meal_planner_core::{OwnerKey, PlannerError, RecipeId, Slot, WeekKey};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        get_plan_handler,
        delete_plan_handler,
        add_meal_handler,
        remove_meal_handler,
        move_meal_handler,
        clear_plan_handler,
        shopping_list_handler,
        nutrition_handler,
        adopt_local_handler,
        templates::list_templates_handler,
        templates::save_template_handler,
        templates::apply_template_handler,
        templates::delete_template_handler,
        recipes::search_recipes_handler,
        recipes::get_recipe_handler,
        recipes::list_favorites_handler,
        recipes::toggle_favorite_handler,
    ),
    components(
        schemas(
            MealRequest, MoveMealRequest, SaveTemplateRequest, PlanResponse, WeekMealsPayload,
            DayMeals, ShoppingListResponse, ShoppingListItem, NutritionResponse, AdoptResponse,
            TemplateResponse, RecipeResponse, IngredientPayload, NutritionPayload,
            FavoriteToggleResponse
        )
    ),
    tags(
        (name = "Meal Planner API", description = "Weekly meal plans, shopping lists, templates and favorites.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Error Mapping
//=========================================================================================

/// Maps a core error onto the status and message returned to the client.
pub(crate) fn planner_error(e: PlannerError) -> (StatusCode, String) {
    match e {
        PlannerError::InvalidSlot(_) | PlannerError::InvalidWeekKey(_) | PlannerError::InvalidTemplate(_) => {
            (StatusCode::BAD_REQUEST, e.to_string())
        }
        PlannerError::TemplateNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        PlannerError::AggregationFailed(_) => {
            error!("Shopping list aggregation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read the meal plan, please retry".to_string(),
            )
        }
        PlannerError::Store(_) => {
            error!("Store operation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
    }
}

pub(crate) fn parse_week(raw: &str) -> Result<WeekKey, (StatusCode, String)> {
    raw.parse::<WeekKey>().map_err(planner_error)
}

fn parse_slot(day: &str, meal: &str) -> Result<Slot, (StatusCode, String)> {
    Slot::parse(day, meal).map_err(planner_error)
}

fn parse_recipe_id(raw: &str) -> Result<RecipeId, (StatusCode, String)> {
    match raw.trim() {
        "" => Err((StatusCode::BAD_REQUEST, "recipe_id must not be empty".to_string())),
        id => Ok(RecipeId::from(id)),
    }
}

//=========================================================================================
// Meal Plan Handlers
//=========================================================================================

/// Read a week's plan. Weeks never written come back empty.
#[utoipa::path(
    get,
    path = "/plans/{week}",
    responses(
        (status = 200, description = "The week's plan", body = PlanResponse),
        (status = 400, description = "Invalid week key or x-user-id header")
    ),
    params(
        ("week" = String, Path, description = "ISO week key, e.g. 2023-W42"),
        ("x-user-id" = Option<String>, Header, description = "The user's UUID; omit for the local plan.")
    )
)]
pub async fn get_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let plan = app_state.editor.load(&owner, &week).await.map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

#[utoipa::path(
    delete,
    path = "/plans/{week}",
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 400, description = "Invalid week key")
    ),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn delete_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    app_state.editor.delete_plan(&owner, &week).await.map_err(planner_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a recipe to a slot. Adding a recipe the slot already holds changes nothing.
#[utoipa::path(
    post,
    path = "/plans/{week}/meals",
    request_body = MealRequest,
    responses(
        (status = 200, description = "The updated plan", body = PlanResponse),
        (status = 400, description = "Invalid week key, day or meal")
    ),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn add_meal_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
    Json(request): Json<MealRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let slot = parse_slot(&request.day, &request.meal)?;
    let recipe_id = parse_recipe_id(&request.recipe_id)?;
    let plan = app_state
        .editor
        .add_meal(&owner, &week, slot, recipe_id)
        .await
        .map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

/// Remove a recipe from a slot. Removing an absent recipe is not an error.
#[utoipa::path(
    delete,
    path = "/plans/{week}/meals",
    request_body = MealRequest,
    responses(
        (status = 200, description = "The updated plan", body = PlanResponse),
        (status = 400, description = "Invalid week key, day or meal")
    ),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn remove_meal_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
    Json(request): Json<MealRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let slot = parse_slot(&request.day, &request.meal)?;
    let recipe_id = parse_recipe_id(&request.recipe_id)?;
    let plan = app_state
        .editor
        .remove_meal(&owner, &week, slot, &recipe_id)
        .await
        .map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

#[utoipa::path(
    post,
    path = "/plans/{week}/move",
    request_body = MoveMealRequest,
    responses(
        (status = 200, description = "The updated plan", body = PlanResponse),
        (status = 400, description = "Invalid week key, day or meal")
    ),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn move_meal_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
    Json(request): Json<MoveMealRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let from = parse_slot(&request.from_day, &request.from_meal)?;
    let to = parse_slot(&request.to_day, &request.to_meal)?;
    let recipe_id = parse_recipe_id(&request.recipe_id)?;
    let plan = app_state
        .editor
        .move_meal(&owner, &week, &recipe_id, from, to)
        .await
        .map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

#[utoipa::path(
    post,
    path = "/plans/{week}/clear",
    responses((status = 200, description = "The emptied plan", body = PlanResponse)),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn clear_plan_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let plan = app_state.editor.clear_plan(&owner, &week).await.map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

/// Build the week's shopping list. Recipes that cannot be resolved are skipped and
/// listed under `unresolved`.
#[utoipa::path(
    get,
    path = "/plans/{week}/shopping-list",
    responses(
        (status = 200, description = "Aggregated shopping list", body = ShoppingListResponse),
        (status = 500, description = "The plan could not be read; safe to retry")
    ),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn shopping_list_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let list = app_state.shopping.generate(&owner, &week).await.map_err(planner_error)?;
    Ok(Json(ShoppingListResponse::new(week.to_string(), &list)))
}

/// Daily nutrition averages: the week's totals divided by seven.
#[utoipa::path(
    get,
    path = "/plans/{week}/nutrition",
    responses((status = 200, description = "Daily averages", body = NutritionResponse)),
    params(("week" = String, Path, description = "ISO week key"))
)]
pub async fn nutrition_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(week): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let summary = app_state
        .shopping
        .nutrition_summary(&owner, &week)
        .await
        .map_err(planner_error)?;
    Ok(Json(NutritionResponse::new(week.to_string(), &summary)))
}

/// Move every locally held week and favorite over to the signed-in user.
#[utoipa::path(
    post,
    path = "/plans/adopt-local",
    responses(
        (status = 200, description = "Weeks and favorites adopted", body = AdoptResponse),
        (status = 400, description = "No x-user-id header")
    ),
    params(("x-user-id" = String, Header, description = "The user's UUID."))
)]
pub async fn adopt_local_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let OwnerKey::User(user_id) = owner else {
        return Err((
            StatusCode::BAD_REQUEST,
            "x-user-id header is required".to_string(),
        ));
    };
    let weeks = app_state
        .editor
        .adopt_local_plans(user_id)
        .await
        .map_err(planner_error)?;
    let favorites = app_state
        .favorites
        .adopt_local(user_id)
        .await
        .map_err(planner_error)?;
    info!(
        user_id = %user_id,
        weeks = weeks.len(),
        favorites = favorites.len(),
        "Local plans and favorites adopted via API"
    );
    Ok(Json(AdoptResponse {
        adopted_weeks: weeks.iter().map(|w| w.to_string()).collect(),
        adopted_favorites: favorites.iter().map(|id| id.to_string()).collect(),
    }))
}
