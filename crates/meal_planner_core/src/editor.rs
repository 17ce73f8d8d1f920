//! crates/meal_planner_core/src/editor.rs
//!
//! Applies add/remove/move/clear operations to a week's plan.
//!
//! Every operation is a full-document read-modify-write: the plan is loaded, mutated
//! in memory, and persisted as one unit. Concurrent edits of the same week are
//! last-write-wins.

use crate::domain::{OwnerKey, RecipeId, Slot, WeekKey, WeekMeals, WeeklyPlan};
use crate::error::PlannerResult;
use crate::ports::MealPlanStore;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct MealPlanEditor {
    store: Arc<dyn MealPlanStore>,
}

impl MealPlanEditor {
    pub fn new(store: Arc<dyn MealPlanStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self, owner: &OwnerKey, week: &WeekKey) -> PlannerResult<WeeklyPlan> {
        Ok(self.store.get_plan(owner, week).await?)
    }

    /// Adds a recipe to a slot. Adding a recipe the slot already holds is a no-op.
    pub async fn add_meal(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
        slot: Slot,
        recipe_id: RecipeId,
    ) -> PlannerResult<WeeklyPlan> {
        self.mutate(owner, week, |meals| meals.add(slot, recipe_id))
            .await
    }

    /// Removes a recipe from a slot. Removing an absent recipe is a no-op.
    pub async fn remove_meal(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
        slot: Slot,
        recipe_id: &RecipeId,
    ) -> PlannerResult<WeeklyPlan> {
        self.mutate(owner, week, |meals| meals.remove(slot, recipe_id))
            .await
    }

    pub async fn move_meal(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
        recipe_id: &RecipeId,
        from: Slot,
        to: Slot,
    ) -> PlannerResult<WeeklyPlan> {
        self.mutate(owner, week, |meals| meals.move_recipe(recipe_id, from, to))
            .await
    }

    pub async fn clear_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PlannerResult<WeeklyPlan> {
        self.mutate(owner, week, WeekMeals::clear).await
    }

    /// Replaces the week's meals wholesale, e.g. when a template is applied.
    pub async fn replace_meals(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
        meals: WeekMeals,
    ) -> PlannerResult<WeeklyPlan> {
        let plan = WeeklyPlan {
            owner: *owner,
            week: *week,
            meals,
        };
        self.store.set_plan(&plan).await?;
        info!(owner = %owner, week = %week, "Meal plan replaced");
        Ok(plan)
    }

    pub async fn delete_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PlannerResult<()> {
        self.store.delete_plan(owner, week).await?;
        info!(owner = %owner, week = %week, "Meal plan deleted");
        Ok(())
    }

    /// Moves every locally held week into the user's account.
    ///
    /// Each local week is merged slot-wise into the user's plan for the same week
    /// (the user's entries keep their position) and the local copy is removed.
    pub async fn adopt_local_plans(&self, user_id: Uuid) -> PlannerResult<Vec<WeekKey>> {
        let local = OwnerKey::Local;
        let user = OwnerKey::User(user_id);
        let mut adopted = Vec::new();

        for week in self.store.list_weeks(&local).await? {
            let local_plan = self.store.get_plan(&local, &week).await?;
            let mut user_plan = self.store.get_plan(&user, &week).await?;
            if user_plan.meals.merge(&local_plan.meals) {
                self.store.set_plan(&user_plan).await?;
            }
            self.store.delete_plan(&local, &week).await?;
            adopted.push(week);
        }

        info!(user_id = %user_id, weeks = adopted.len(), "Adopted local meal plans");
        Ok(adopted)
    }

    async fn mutate<F>(&self, owner: &OwnerKey, week: &WeekKey, apply: F) -> PlannerResult<WeeklyPlan>
    where
        F: FnOnce(&mut WeekMeals) -> bool,
    {
        let mut plan = self.store.get_plan(owner, week).await?;
        if apply(&mut plan.meals) {
            self.store.set_plan(&plan).await?;
            debug!(owner = %owner, week = %week, "Meal plan updated");
        } else {
            debug!(owner = %owner, week = %week, "Meal plan unchanged, nothing persisted");
        }
        Ok(plan)
    }
}
