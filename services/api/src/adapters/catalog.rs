//! services/api/src/adapters/catalog.rs
//!
//! The bundled recipe catalog, loaded once from a JSON file and served from memory.

use async_trait::async_trait;
use meal_planner_core::domain::{
    Amount, Difficulty, Ingredient, NutritionInfo, Recipe, RecipeFilter, RecipeId,
};
use meal_planner_core::ports::{PortError, PortResult, RecipeProvider};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

//=========================================================================================
// Catalog File Records
//=========================================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogRecipe {
    id: String,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    prep_time: u32,
    #[serde(default)]
    cook_time: u32,
    #[serde(default)]
    difficulty: String,
    #[serde(default = "default_servings")]
    servings: u32,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    meal_type: Vec<String>,
    #[serde(default)]
    cuisine: String,
    #[serde(default)]
    dietary_restrictions: Vec<String>,
    #[serde(default)]
    ingredients: Vec<CatalogIngredient>,
    #[serde(default)]
    instructions: Vec<String>,
    #[serde(default)]
    nutrition_info: CatalogNutrition,
    #[serde(default)]
    source_url: Option<String>,
}

fn default_servings() -> u32 {
    4
}

#[derive(Deserialize)]
struct CatalogIngredient {
    name: String,
    amount: CatalogAmount,
}

/// Amounts appear either as display strings or as `{amount, unit}` pairs.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogAmount {
    Structured {
        amount: f64,
        #[serde(default)]
        unit: String,
    },
    Number(f64),
    Text(String),
}

impl CatalogAmount {
    fn to_domain(self) -> Amount {
        match self {
            CatalogAmount::Structured { amount, unit } => Amount::measured(amount, unit),
            CatalogAmount::Number(value) => Amount::measured(value, ""),
            CatalogAmount::Text(text) => Amount::parse(&text),
        }
    }
}

/// Gram figures are labels such as `"9g"`, occasionally plain numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum GramLabel {
    Number(f64),
    Text(String),
}

impl Default for GramLabel {
    fn default() -> Self {
        GramLabel::Number(0.0)
    }
}

impl GramLabel {
    fn grams(&self) -> f64 {
        match self {
            GramLabel::Number(value) => *value,
            GramLabel::Text(label) => NutritionInfo::grams_from_label(label),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CatalogNutrition {
    calories: f64,
    protein: GramLabel,
    carbs: GramLabel,
    fat: GramLabel,
}

impl CatalogRecipe {
    fn to_domain(self) -> Recipe {
        Recipe {
            id: RecipeId::new(self.id),
            title: self.title,
            image: self.image,
            prep_time_minutes: self.prep_time,
            cook_time_minutes: self.cook_time,
            servings: self.servings.max(1),
            difficulty: Difficulty::from_label(&self.difficulty).unwrap_or_default(),
            tags: self.tags.into_iter().collect(),
            meal_types: self.meal_type.into_iter().map(|m| m.to_lowercase()).collect(),
            cuisine: match self.cuisine.trim() {
                "" => "other".to_string(),
                cuisine => cuisine.to_lowercase(),
            },
            dietary_restrictions: self.dietary_restrictions.into_iter().collect(),
            ingredients: self
                .ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, i.amount.to_domain()))
                .collect(),
            instructions: self.instructions,
            nutrition: NutritionInfo {
                calories: self.nutrition_info.calories,
                protein_grams: self.nutrition_info.protein.grams(),
                carbs_grams: self.nutrition_info.carbs.grams(),
                fat_grams: self.nutrition_info.fat.grams(),
            },
            source_url: self.source_url,
        }
    }
}

/// Errors raised while loading the catalog file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read recipe catalog {0}: {1}")]
    Read(String, #[source] std::io::Error),
    #[error("Failed to parse recipe catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

//=========================================================================================
// The Catalog Adapter
//=========================================================================================

pub struct LocalCatalog {
    recipes: Vec<Arc<Recipe>>,
    by_id: HashMap<RecipeId, usize>,
}

impl LocalCatalog {
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let mut by_id = HashMap::new();
        let mut kept: Vec<Arc<Recipe>> = Vec::with_capacity(recipes.len());
        for recipe in recipes {
            if by_id.contains_key(&recipe.id) {
                warn!(recipe_id = %recipe.id, "Duplicate recipe id in catalog, keeping the first");
                continue;
            }
            by_id.insert(recipe.id.clone(), kept.len());
            kept.push(Arc::new(recipe));
        }
        Self { recipes: kept, by_id }
    }

    /// Parses a catalog in the bundled JSON format.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecipe> = serde_json::from_str(raw)?;
        Ok(Self::from_recipes(records.into_iter().map(CatalogRecipe::to_domain).collect()))
    }

    pub async fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::Read(path.display().to_string(), e))?;
        let catalog = Self::from_json(&raw)?;
        info!(path = %path.display(), recipes = catalog.len(), "Recipe catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: &RecipeId) -> Option<Arc<Recipe>> {
        self.by_id.get(id).map(|&i| self.recipes[i].clone())
    }

    /// Recipes whose title, tags, cuisine or ingredient names contain the query,
    /// case-insensitively. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<Arc<Recipe>> {
        self.filter(&RecipeFilter::text(query))
    }

    /// Recipes meeting every criterion of `filter`, in catalog order.
    pub fn filter(&self, filter: &RecipeFilter) -> Vec<Arc<Recipe>> {
        self.recipes
            .iter()
            .filter(|recipe| filter.matches(recipe))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecipeProvider for LocalCatalog {
    fn name(&self) -> &'static str {
        "local-catalog"
    }

    fn handles(&self, _id: &RecipeId) -> bool {
        true
    }

    async fn fetch_recipe(&self, id: &RecipeId) -> PortResult<Recipe> {
        self.get(id)
            .map(|recipe| recipe.as_ref().clone())
            .ok_or_else(|| PortError::NotFound(format!("Recipe {} not in catalog", id)))
    }

    fn cacheable(&self) -> bool {
        false
    }
}
