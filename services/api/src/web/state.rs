//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::LocalCatalog;
use crate::config::Config;
use meal_planner_core::ports::{FavoritesStore, MealPlanStore, RecipeProvider, RecipeSource, TemplateStore};
use meal_planner_core::{
    FavoritesService, MealPlanEditor, RecipeResolver, ShoppingListAggregator, TemplateManager,
};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<LocalCatalog>,
    pub recipes: Arc<dyn RecipeSource>,
    pub editor: MealPlanEditor,
    pub shopping: ShoppingListAggregator,
    pub templates: TemplateManager,
    pub favorites: FavoritesService,
}

impl AppState {
    /// Wires the core services onto one storage backend.
    ///
    /// Recipe ids are resolved by `remote` providers first (in order), then by the
    /// local catalog. Only remote answers are cached, within the configured bounds.
    pub fn new<S>(
        config: &Config,
        store: Arc<S>,
        catalog: Arc<LocalCatalog>,
        remote: Vec<Arc<dyn RecipeProvider>>,
    ) -> Self
    where
        S: MealPlanStore + TemplateStore + FavoritesStore + 'static,
    {
        let mut providers = remote;
        providers.push(catalog.clone());
        let recipes: Arc<dyn RecipeSource> = Arc::new(RecipeResolver::with_cache(
            providers,
            config.recipe_cache_capacity,
            config.recipe_cache_ttl,
        ));

        let plans: Arc<dyn MealPlanStore> = store.clone();
        let editor = MealPlanEditor::new(plans.clone());

        Self {
            catalog,
            shopping: ShoppingListAggregator::new(plans, recipes.clone()),
            templates: TemplateManager::new(store.clone(), editor.clone()),
            favorites: FavoritesService::new(store, recipes.clone()),
            editor,
            recipes,
        }
    }
}
