//! crates/meal_planner_core/src/shopping.rs
//!
//! Builds a week's shopping list (and nutrition summary) from its meal plan.
//!
//! All recipe lookups for a plan run concurrently; the fold over their results always
//! walks the 21 canonical slots in order (monday..sunday, breakfast..dinner), so the
//! output never depends on which lookup finished first.

use crate::domain::{
    OwnerKey, Recipe, RecipeId, ShoppingList, ShoppingListEntry, WeekKey, WeekMeals, WeeklyPlan,
};
use crate::error::{PlannerError, PlannerResult};
use crate::nutrition::{summarize_week, NutritionSummary};
use crate::ports::{MealPlanStore, RecipeSource};
use crate::resolver::resolve_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct ShoppingListAggregator {
    store: Arc<dyn MealPlanStore>,
    recipes: Arc<dyn RecipeSource>,
}

impl ShoppingListAggregator {
    pub fn new(store: Arc<dyn MealPlanStore>, recipes: Arc<dyn RecipeSource>) -> Self {
        Self { store, recipes }
    }

    /// Reads the week's plan and aggregates it. Only a failed plan read fails the call.
    pub async fn generate(&self, owner: &OwnerKey, week: &WeekKey) -> PlannerResult<ShoppingList> {
        let plan = self.read_plan(owner, week).await?;
        let list = self.aggregate(&plan).await;
        info!(
            owner = %owner,
            week = %week,
            entries = list.entries.len(),
            unresolved = list.unresolved.len(),
            "Shopping list generated"
        );
        Ok(list)
    }

    pub async fn aggregate(&self, plan: &WeeklyPlan) -> ShoppingList {
        let resolved = resolve_all(self.recipes.as_ref(), plan.meals.recipe_ids()).await;
        build_shopping_list(&plan.meals, &resolved)
    }

    /// Daily averages of the week's nutrition, see [`summarize_week`].
    pub async fn nutrition_summary(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
    ) -> PlannerResult<NutritionSummary> {
        let plan = self.read_plan(owner, week).await?;
        let resolved = resolve_all(self.recipes.as_ref(), plan.meals.recipe_ids()).await;
        Ok(summarize_week(&plan.meals, &resolved))
    }

    async fn read_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PlannerResult<WeeklyPlan> {
        self.store
            .get_plan(owner, week)
            .await
            .map_err(PlannerError::AggregationFailed)
    }
}

/// Folds resolved recipes into a shopping list, in canonical slot order.
///
/// Ids missing from `resolved` are skipped and reported in `unresolved`; ingredients
/// with a blank name are dropped.
pub fn build_shopping_list(
    meals: &WeekMeals,
    resolved: &HashMap<RecipeId, Arc<Recipe>>,
) -> ShoppingList {
    let mut entries: Vec<ShoppingListEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unresolved: Vec<RecipeId> = Vec::new();

    for (slot, recipe_ids) in meals.iter() {
        for recipe_id in recipe_ids {
            let Some(recipe) = resolved.get(recipe_id) else {
                debug!(recipe_id = %recipe_id, slot = %slot, "Skipping unresolved recipe");
                if !unresolved.contains(recipe_id) {
                    unresolved.push(recipe_id.clone());
                }
                continue;
            };

            let source = format!("{} ({})", recipe.title, slot);
            for ingredient in &recipe.ingredients {
                let key = ingredient.aggregation_key();
                if key.is_empty() {
                    continue;
                }
                match positions.get(&key) {
                    Some(&position) => {
                        let entry = &mut entries[position];
                        entry.amount.absorb(ingredient.amount.clone());
                        entry.add_source(source.clone());
                    }
                    None => {
                        positions.insert(key, entries.len());
                        entries.push(ShoppingListEntry::new(ingredient, source.clone()));
                    }
                }
            }
        }
    }

    entries.sort_by(|a, b| a.key.cmp(&b.key));
    ShoppingList {
        entries,
        unresolved,
    }
}
