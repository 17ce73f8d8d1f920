//! services/api/src/web/templates.rs
//!
//! Handlers for saving, listing, applying and deleting meal plan templates.

use crate::web::protocol::{PlanResponse, SaveTemplateRequest, TemplateListQuery, TemplateResponse};
use crate::web::rest::{parse_week, planner_error};
use crate::web::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use meal_planner_core::{OwnerKey, TemplateFilter};
use std::sync::Arc;

fn parse_filter(kind: Option<&str>) -> Result<TemplateFilter, (StatusCode, String)> {
    match kind.map(|k| k.trim().to_lowercase()).as_deref() {
        None | Some("") | Some("all") => Ok(TemplateFilter::All),
        Some("user") => Ok(TemplateFilter::User),
        Some("default") => Ok(TemplateFilter::Default),
        Some(other) => Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown template kind '{}'", other),
        )),
    }
}

/// List the owner's templates (newest first) followed by the built-in ones.
#[utoipa::path(
    get,
    path = "/templates",
    params(TemplateListQuery),
    responses(
        (status = 200, description = "Templates", body = [TemplateResponse]),
        (status = 400, description = "Unknown kind filter")
    )
)]
pub async fn list_templates_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Query(query): Query<TemplateListQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let filter = parse_filter(query.kind.as_deref())?;
    let templates = app_state
        .templates
        .list(&owner, filter)
        .await
        .map_err(planner_error)?;
    Ok(Json(
        templates.iter().map(TemplateResponse::from).collect::<Vec<_>>(),
    ))
}

/// Save a week's current meals as a new template.
#[utoipa::path(
    post,
    path = "/templates",
    request_body = SaveTemplateRequest,
    responses(
        (status = 201, description = "Template saved", body = TemplateResponse),
        (status = 400, description = "Blank name or invalid week key")
    )
)]
pub async fn save_template_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Json(request): Json<SaveTemplateRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&request.week)?;
    let template = app_state
        .templates
        .save_from_week(&owner, &week, &request.name, &request.description, request.categories)
        .await
        .map_err(planner_error)?;
    Ok((StatusCode::CREATED, Json(TemplateResponse::from(&template))))
}

/// Replace a week's plan with a template's meals.
#[utoipa::path(
    post,
    path = "/plans/{week}/apply-template/{id}",
    responses(
        (status = 200, description = "The replaced plan", body = PlanResponse),
        (status = 404, description = "Unknown template")
    ),
    params(
        ("week" = String, Path, description = "ISO week key"),
        ("id" = String, Path, description = "Template id")
    )
)]
pub async fn apply_template_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path((week, template_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let week = parse_week(&week)?;
    let plan = app_state
        .templates
        .apply(&owner, &week, &template_id)
        .await
        .map_err(planner_error)?;
    Ok(Json(PlanResponse::from(&plan)))
}

#[utoipa::path(
    delete,
    path = "/templates/{id}",
    responses(
        (status = 204, description = "Template deleted"),
        (status = 400, description = "Built-in templates cannot be deleted"),
        (status = 404, description = "Unknown template")
    ),
    params(("id" = String, Path, description = "Template id"))
)]
pub async fn delete_template_handler(
    State(app_state): State<Arc<AppState>>,
    Extension(owner): Extension<OwnerKey>,
    Path(template_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    app_state
        .templates
        .delete(&owner, &template_id)
        .await
        .map_err(planner_error)?;
    Ok(StatusCode::NO_CONTENT)
}
