//! services/api/src/adapters/spoonacular.rs
//!
//! Remote recipe lookups against the Spoonacular API, for `api-` namespaced ids.

use async_trait::async_trait;
use meal_planner_core::domain::{Amount, Difficulty, Ingredient, NutritionInfo, Recipe, RecipeId};
use meal_planner_core::ports::{PortError, PortResult, RecipeProvider};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// Response Records
//=========================================================================================

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpoonacularRecipe {
    id: u64,
    title: String,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    ready_in_minutes: Option<u32>,
    #[serde(default)]
    servings: Option<u32>,
    #[serde(default)]
    vegetarian: bool,
    #[serde(default)]
    vegan: bool,
    #[serde(default)]
    gluten_free: bool,
    #[serde(default)]
    dairy_free: bool,
    #[serde(default)]
    dish_types: Vec<String>,
    #[serde(default)]
    cuisines: Vec<String>,
    #[serde(default)]
    extended_ingredients: Vec<SpoonacularIngredient>,
    #[serde(default)]
    analyzed_instructions: Vec<InstructionSet>,
    #[serde(default)]
    nutrition: Option<Nutrition>,
    #[serde(default)]
    source_url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct SpoonacularIngredient {
    name: String,
    #[serde(default)]
    amount: f64,
    #[serde(default)]
    unit: String,
}

#[derive(Deserialize, Debug)]
struct InstructionSet {
    #[serde(default)]
    steps: Vec<InstructionStep>,
}

#[derive(Deserialize, Debug)]
struct InstructionStep {
    step: String,
}

#[derive(Deserialize, Debug)]
struct Nutrition {
    #[serde(default)]
    nutrients: Vec<Nutrient>,
}

#[derive(Deserialize, Debug)]
struct Nutrient {
    name: String,
    amount: f64,
}

fn difficulty_for(total_minutes: u32) -> Difficulty {
    if total_minutes < 30 {
        Difficulty::Easy
    } else if total_minutes > 60 {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

fn meal_types_for(dish_types: &[String]) -> BTreeSet<String> {
    let has = |name: &str| dish_types.iter().any(|d| d == name);
    let mut meal_types = BTreeSet::new();
    for meal in ["breakfast", "lunch", "snack", "dessert"] {
        if has(meal) {
            meal_types.insert(meal.to_string());
        }
    }
    if has("main course") || has("dinner") {
        meal_types.insert("dinner".to_string());
    }
    meal_types
}

impl SpoonacularRecipe {
    pub(crate) fn to_domain(self) -> Recipe {
        let total = self.ready_in_minutes.unwrap_or(0);

        let mut dietary_restrictions = BTreeSet::new();
        for (flag, label) in [
            (self.vegetarian, "vegetarian"),
            (self.vegan, "vegan"),
            (self.gluten_free, "gluten-free"),
            (self.dairy_free, "dairy-free"),
        ] {
            if flag {
                dietary_restrictions.insert(label.to_string());
            }
        }

        let mut nutrition = NutritionInfo::default();
        for nutrient in self.nutrition.map(|n| n.nutrients).unwrap_or_default() {
            match nutrient.name.as_str() {
                "Calories" => nutrition.calories = nutrient.amount,
                "Protein" => nutrition.protein_grams = nutrient.amount.round(),
                "Carbohydrates" => nutrition.carbs_grams = nutrient.amount.round(),
                "Fat" => nutrition.fat_grams = nutrient.amount.round(),
                _ => {}
            }
        }

        Recipe {
            id: RecipeId::remote(self.id),
            title: self.title,
            image: self.image,
            prep_time_minutes: (f64::from(total) / 3.0).round() as u32,
            cook_time_minutes: (f64::from(total) * 2.0 / 3.0).round() as u32,
            servings: self.servings.filter(|s| *s > 0).unwrap_or(4),
            difficulty: difficulty_for(total),
            meal_types: meal_types_for(&self.dish_types),
            cuisine: self
                .cuisines
                .first()
                .map(|c| c.to_lowercase())
                .unwrap_or_else(|| "other".to_string()),
            tags: self.dish_types.into_iter().chain(self.cuisines).collect(),
            dietary_restrictions,
            ingredients: self
                .extended_ingredients
                .into_iter()
                .map(|i| Ingredient::new(i.name, Amount::measured(i.amount, i.unit)))
                .collect(),
            instructions: self
                .analyzed_instructions
                .into_iter()
                .next()
                .map(|set| set.steps.into_iter().map(|s| s.step).collect())
                .unwrap_or_default(),
            nutrition,
            source_url: self.source_url,
        }
    }
}

//=========================================================================================
// The Remote Adapter
//=========================================================================================

pub struct SpoonacularProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SpoonacularProvider {
    /// The client-level timeout turns a stalled request into a failed lookup.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl RecipeProvider for SpoonacularProvider {
    fn name(&self) -> &'static str {
        "spoonacular"
    }

    fn handles(&self, id: &RecipeId) -> bool {
        id.is_remote()
    }

    async fn fetch_recipe(&self, id: &RecipeId) -> PortResult<Recipe> {
        let remote_id = id
            .remote_part()
            .and_then(|part| part.parse::<u64>().ok())
            .ok_or_else(|| PortError::NotFound(format!("{} is not a remote recipe id", id)))?;

        let url = format!("{}/recipes/{}/information", self.base_url, remote_id);
        debug!(recipe_id = %id, "Fetching recipe from Spoonacular");
        let response = self
            .client
            .get(&url)
            .query(&[("includeNutrition", "true"), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| PortError::Unexpected(format!("Spoonacular request failed: {}", e)))?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => {
                return Err(PortError::NotFound(format!("Recipe {} not found remotely", id)))
            }
            StatusCode::UNAUTHORIZED => return Err(PortError::Unauthorized),
            status => {
                return Err(PortError::Unexpected(format!(
                    "Spoonacular answered {} for {}",
                    status, id
                )))
            }
        }

        let recipe: SpoonacularRecipe = response
            .json()
            .await
            .map_err(|e| PortError::Unexpected(format!("Malformed Spoonacular response: {}", e)))?;
        Ok(recipe.to_domain())
    }
}
