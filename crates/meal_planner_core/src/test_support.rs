//! In-memory port implementations shared by the unit tests.

use crate::domain::{
    Amount, Ingredient, NutritionInfo, OwnerKey, Recipe, RecipeId, Template, WeekKey, WeekMeals,
    WeeklyPlan,
};
use crate::ports::{
    FavoritesStore, MealPlanStore, PortError, PortResult, RecipeProvider, TemplateStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn recipe(id: &str, title: &str, ingredients: &[(&str, &str)]) -> Recipe {
    Recipe {
        id: RecipeId::from(id),
        title: title.to_string(),
        image: None,
        prep_time_minutes: 10,
        cook_time_minutes: 20,
        servings: 2,
        difficulty: Default::default(),
        tags: Default::default(),
        meal_types: Default::default(),
        cuisine: "other".to_string(),
        dietary_restrictions: Default::default(),
        ingredients: ingredients
            .iter()
            .map(|(name, amount)| Ingredient::new(*name, Amount::parse(amount)))
            .collect(),
        instructions: vec![],
        nutrition: NutritionInfo::default(),
        source_url: None,
    }
}

pub fn chain(providers: &[Arc<StaticProvider>]) -> Vec<Arc<dyn RecipeProvider>> {
    providers
        .iter()
        .map(|p| p.clone() as Arc<dyn RecipeProvider>)
        .collect()
}

pub struct StaticProvider {
    name: &'static str,
    recipes: HashMap<RecipeId, Recipe>,
    remote_only: bool,
    failing: bool,
    in_memory: bool,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(name: &'static str, recipes: Vec<Recipe>) -> Self {
        Self {
            name,
            recipes: recipes.into_iter().map(|r| (r.id.clone(), r)).collect(),
            remote_only: false,
            failing: false,
            in_memory: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that serves from memory and opts out of resolver caching.
    pub fn in_memory(name: &'static str, recipes: Vec<Recipe>) -> Self {
        Self {
            in_memory: true,
            ..Self::new(name, recipes)
        }
    }

    /// A provider whose every lookup errors out, like an unreachable remote API.
    pub fn failing(name: &'static str, remote_only: bool) -> Self {
        Self {
            remote_only,
            failing: true,
            ..Self::new(name, vec![])
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecipeProvider for StaticProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn handles(&self, id: &RecipeId) -> bool {
        !self.remote_only || id.is_remote()
    }

    async fn fetch_recipe(&self, id: &RecipeId) -> PortResult<Recipe> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(PortError::Unexpected("rate limited".to_string()));
        }
        self.recipes
            .get(id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(id.to_string()))
    }

    fn cacheable(&self) -> bool {
        !self.in_memory
    }
}

#[derive(Default)]
pub struct MemoryPlanStore {
    plans: Mutex<HashMap<(String, WeekKey), WeekMeals>>,
    writes: AtomicUsize,
    broken: bool,
}

impl MemoryPlanStore {
    /// A store whose every call fails, like an unreachable backend.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> PortResult<()> {
        if self.broken {
            Err(PortError::Unexpected("store offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl MealPlanStore for MemoryPlanStore {
    async fn get_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<WeeklyPlan> {
        self.check()?;
        let plans = self.plans.lock().unwrap();
        let meals = plans
            .get(&(owner.storage_key(), *week))
            .cloned()
            .unwrap_or_default();
        Ok(WeeklyPlan {
            owner: *owner,
            week: *week,
            meals,
        })
    }

    async fn set_plan(&self, plan: &WeeklyPlan) -> PortResult<()> {
        self.check()?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.plans
            .lock()
            .unwrap()
            .insert((plan.owner.storage_key(), plan.week), plan.meals.clone());
        Ok(())
    }

    async fn delete_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<()> {
        self.check()?;
        self.plans.lock().unwrap().remove(&(owner.storage_key(), *week));
        Ok(())
    }

    async fn list_weeks(&self, owner: &OwnerKey) -> PortResult<Vec<WeekKey>> {
        self.check()?;
        let key = owner.storage_key();
        let mut weeks: Vec<WeekKey> = self
            .plans
            .lock()
            .unwrap()
            .keys()
            .filter(|(o, _)| *o == key)
            .map(|(_, w)| *w)
            .collect();
        weeks.sort();
        Ok(weeks)
    }
}

#[derive(Default)]
pub struct MemoryTemplateStore {
    templates: Mutex<Vec<(String, Template)>>,
}

#[async_trait]
impl TemplateStore for MemoryTemplateStore {
    async fn save_template(&self, owner: &OwnerKey, template: &Template) -> PortResult<()> {
        self.templates
            .lock()
            .unwrap()
            .push((owner.storage_key(), template.clone()));
        Ok(())
    }

    async fn list_templates(&self, owner: &OwnerKey) -> PortResult<Vec<Template>> {
        let key = owner.storage_key();
        let mut found: Vec<Template> = self
            .templates
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == key)
            .map(|(_, t)| t.clone())
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn get_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<Template> {
        let key = owner.storage_key();
        self.templates
            .lock()
            .unwrap()
            .iter()
            .find(|(o, t)| *o == key && t.id == template_id)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| PortError::NotFound(template_id.to_string()))
    }

    async fn delete_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<()> {
        let key = owner.storage_key();
        self.templates
            .lock()
            .unwrap()
            .retain(|(o, t)| !(*o == key && t.id == template_id));
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryFavoritesStore {
    favorites: Mutex<Vec<(String, RecipeId)>>,
}

#[async_trait]
impl FavoritesStore for MemoryFavoritesStore {
    async fn list_favorites(&self, owner: &OwnerKey) -> PortResult<Vec<RecipeId>> {
        let key = owner.storage_key();
        Ok(self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|(o, _)| *o == key)
            .map(|(_, id)| id.clone())
            .collect())
    }

    async fn add_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()> {
        let entry = (owner.storage_key(), recipe_id.clone());
        let mut favorites = self.favorites.lock().unwrap();
        if !favorites.contains(&entry) {
            favorites.push(entry);
        }
        Ok(())
    }

    async fn remove_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()> {
        let key = owner.storage_key();
        self.favorites
            .lock()
            .unwrap()
            .retain(|(o, id)| !(*o == key && id == recipe_id));
        Ok(())
    }
}
