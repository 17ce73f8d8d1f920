//! crates/meal_planner_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the planner's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific storage backends or recipe providers.

use crate::domain::{OwnerKey, Recipe, RecipeId, Template, WeekKey, WeeklyPlan};
use async_trait::async_trait;
use std::sync::Arc;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Recipe Ports
//=========================================================================================

/// Resolves a recipe id to its full record, whichever origin holds it.
///
/// Resolution is fail-soft: every failure (unknown id, network error, rate limit)
/// comes back as `None` and callers skip the item.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn get_recipe_by_id(&self, id: &RecipeId) -> Option<Arc<Recipe>>;
}

/// One recipe resolution strategy (local catalog, remote API, ...).
#[async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Whether this provider should be asked for the given id at all.
    fn handles(&self, id: &RecipeId) -> bool;

    /// Fetches the recipe, answering `PortError::NotFound` for a miss.
    async fn fetch_recipe(&self, id: &RecipeId) -> PortResult<Recipe>;

    /// Whether a resolver should keep this provider's answers in its cache.
    /// Providers that already serve from memory answer `false`.
    fn cacheable(&self) -> bool {
        true
    }
}

//=========================================================================================
// Storage Ports
//=========================================================================================

#[async_trait]
pub trait MealPlanStore: Send + Sync {
    /// Reads a week's plan, returning an empty plan when none was ever written.
    async fn get_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<WeeklyPlan>;

    /// Persists the whole plan as one unit, replacing any previous version.
    async fn set_plan(&self, plan: &WeeklyPlan) -> PortResult<()>;

    async fn delete_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<()>;

    /// Weeks the owner has a stored plan for.
    async fn list_weeks(&self, owner: &OwnerKey) -> PortResult<Vec<WeekKey>>;
}

#[async_trait]
pub trait TemplateStore: Send + Sync {
    async fn save_template(&self, owner: &OwnerKey, template: &Template) -> PortResult<()>;

    /// The owner's saved templates, newest first.
    async fn list_templates(&self, owner: &OwnerKey) -> PortResult<Vec<Template>>;

    async fn get_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<Template>;

    async fn delete_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<()>;
}

#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Favorite recipe ids in the order they were added.
    async fn list_favorites(&self, owner: &OwnerKey) -> PortResult<Vec<RecipeId>>;

    async fn add_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()>;

    async fn remove_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()>;
}
