//! crates/meal_planner_core/src/favorites.rs

use crate::domain::{OwnerKey, Recipe, RecipeId};
use crate::error::PlannerResult;
use crate::ports::{FavoritesStore, RecipeSource};
use crate::resolver::resolve_all;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone)]
pub struct FavoritesService {
    store: Arc<dyn FavoritesStore>,
    recipes: Arc<dyn RecipeSource>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn FavoritesStore>, recipes: Arc<dyn RecipeSource>) -> Self {
        Self { store, recipes }
    }

    /// Flips the favorite flag. Returns `true` when the recipe is now a favorite.
    pub async fn toggle(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PlannerResult<bool> {
        let now_favorite = if self.is_favorite(owner, recipe_id).await? {
            self.store.remove_favorite(owner, recipe_id).await?;
            false
        } else {
            self.store.add_favorite(owner, recipe_id).await?;
            true
        };
        debug!(owner = %owner, recipe_id = %recipe_id, now_favorite, "Favorite toggled");
        Ok(now_favorite)
    }

    pub async fn list(&self, owner: &OwnerKey) -> PlannerResult<Vec<RecipeId>> {
        Ok(self.store.list_favorites(owner).await?)
    }

    pub async fn is_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PlannerResult<bool> {
        Ok(self.list(owner).await?.contains(recipe_id))
    }

    /// Moves the local owner's favorites into the user's list once they sign in.
    ///
    /// Favorites the user already has keep their position; the rest are appended in
    /// local order. The local list is emptied. Returns the ids newly added for the user.
    pub async fn adopt_local(&self, user_id: Uuid) -> PlannerResult<Vec<RecipeId>> {
        let user = OwnerKey::User(user_id);
        let existing = self.list(&user).await?;
        let mut adopted = Vec::new();

        for recipe_id in self.list(&OwnerKey::Local).await? {
            if !existing.contains(&recipe_id) {
                self.store.add_favorite(&user, &recipe_id).await?;
                adopted.push(recipe_id.clone());
            }
            self.store.remove_favorite(&OwnerKey::Local, &recipe_id).await?;
        }

        info!(user_id = %user_id, favorites = adopted.len(), "Adopted local favorites");
        Ok(adopted)
    }

    /// Full records of the owner's favorites, in the order they were added.
    /// Favorites that no longer resolve are left out.
    pub async fn favorite_recipes(&self, owner: &OwnerKey) -> PlannerResult<Vec<Arc<Recipe>>> {
        let ids = self.list(owner).await?;
        let mut resolved = resolve_all(self.recipes.as_ref(), ids.iter()).await;
        Ok(ids.iter().filter_map(|id| resolved.remove(id)).collect())
    }
}
