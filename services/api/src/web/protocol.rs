//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the REST API.

use chrono::{DateTime, Utc};
use meal_planner_core::domain::{
    AggregatedAmount, Day, Difficulty, MealSlot, Recipe, RecipeFilter, RecipeSort, ShoppingList,
    ShoppingListEntry, Slot, Template, WeekMeals, WeeklyPlan,
};
use meal_planner_core::NutritionSummary;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================

/// Adds or removes one recipe in one slot.
#[derive(Deserialize, Debug, ToSchema)]
pub struct MealRequest {
    pub day: String,
    pub meal: String,
    pub recipe_id: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct MoveMealRequest {
    pub recipe_id: String,
    pub from_day: String,
    pub from_meal: String,
    pub to_day: String,
    pub to_meal: String,
}

/// Snapshots a week into a new template.
#[derive(Deserialize, Debug, ToSchema)]
pub struct SaveTemplateRequest {
    pub week: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Deserialize, Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TemplateListQuery {
    /// `user`, `default` or `all` (the default).
    pub kind: Option<String>,
}

/// List parameters take comma-separated values, e.g. `diet=vegan,gluten-free`.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecipeSearchQuery {
    /// Matched against titles, tags, cuisine and ingredient names.
    pub q: Option<String>,
    /// Dietary restrictions, all of which must be met.
    pub diet: Option<String>,
    /// Cuisines, any of which qualifies.
    pub cuisine: Option<String>,
    /// Meal types, any of which qualifies.
    pub meal: Option<String>,
    /// `easy`, `medium` or `hard`, any of which qualifies.
    pub difficulty: Option<String>,
    /// Upper bound on prep plus cook time, in minutes.
    pub max_time: Option<u32>,
    /// `time`, `difficulty`, or `popular`/`newest` for catalog order.
    pub sort: Option<String>,
}

fn split_list(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

impl RecipeSearchQuery {
    /// Builds the catalog filter, rejecting unknown difficulty labels.
    pub fn to_filter(&self) -> Result<RecipeFilter, String> {
        let difficulties = split_list(&self.difficulty)
            .iter()
            .map(|label| {
                Difficulty::from_label(label).ok_or_else(|| format!("Unknown difficulty '{}'", label))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RecipeFilter {
            text: self.q.clone().unwrap_or_default(),
            dietary_restrictions: split_list(&self.diet),
            cuisines: split_list(&self.cuisine),
            meal_types: split_list(&self.meal),
            difficulties,
            max_total_minutes: self.max_time,
        })
    }

    pub fn to_sort(&self) -> Result<RecipeSort, String> {
        let label = self.sort.as_deref().unwrap_or_default();
        RecipeSort::from_label(label).ok_or_else(|| format!("Unknown sort order '{}'", label))
    }
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

/// The recipes of one day, per meal.
#[derive(Serialize, Debug, Default, ToSchema)]
pub struct DayMeals {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
}

/// A week's slots, days in canonical order.
#[derive(Serialize, Debug, Default, ToSchema)]
pub struct WeekMealsPayload {
    pub monday: DayMeals,
    pub tuesday: DayMeals,
    pub wednesday: DayMeals,
    pub thursday: DayMeals,
    pub friday: DayMeals,
    pub saturday: DayMeals,
    pub sunday: DayMeals,
}

impl From<&WeekMeals> for WeekMealsPayload {
    fn from(meals: &WeekMeals) -> Self {
        let mut payload = WeekMealsPayload::default();
        for (Slot { day, meal }, recipe_ids) in meals.iter() {
            let day_meals = match day {
                Day::Monday => &mut payload.monday,
                Day::Tuesday => &mut payload.tuesday,
                Day::Wednesday => &mut payload.wednesday,
                Day::Thursday => &mut payload.thursday,
                Day::Friday => &mut payload.friday,
                Day::Saturday => &mut payload.saturday,
                Day::Sunday => &mut payload.sunday,
            };
            let ids = recipe_ids.iter().map(|id| id.to_string()).collect();
            match meal {
                MealSlot::Breakfast => day_meals.breakfast = ids,
                MealSlot::Lunch => day_meals.lunch = ids,
                MealSlot::Dinner => day_meals.dinner = ids,
            }
        }
        payload
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PlanResponse {
    pub owner: String,
    pub week: String,
    pub meals: WeekMealsPayload,
}

impl From<&WeeklyPlan> for PlanResponse {
    fn from(plan: &WeeklyPlan) -> Self {
        Self {
            owner: plan.owner.to_string(),
            week: plan.week.to_string(),
            meals: WeekMealsPayload::from(&plan.meals),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ShoppingListItem {
    pub name: String,
    /// Display form of the total, e.g. `"3 cup"` or `"2 cup, 100 g"`.
    pub amount: String,
    /// Every distinct amount; a single element when the contributions could be summed.
    pub amounts: Vec<String>,
    /// Whether all contributions were summed into one amount.
    pub summed: bool,
    pub sources: Vec<String>,
}

impl From<&ShoppingListEntry> for ShoppingListItem {
    fn from(entry: &ShoppingListEntry) -> Self {
        Self {
            name: entry.name.clone(),
            amount: entry.amount.to_string(),
            amounts: entry.amount.display_values(),
            summed: matches!(entry.amount, AggregatedAmount::Single(_)),
            sources: entry.sources.clone(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ShoppingListResponse {
    pub week: String,
    pub items: Vec<ShoppingListItem>,
    /// Recipe ids that could not be resolved and were left out.
    pub unresolved: Vec<String>,
}

impl ShoppingListResponse {
    pub fn new(week: String, list: &ShoppingList) -> Self {
        Self {
            week,
            items: list.entries.iter().map(ShoppingListItem::from).collect(),
            unresolved: list.unresolved.iter().map(|id| id.to_string()).collect(),
        }
    }
}

/// Average daily intake for the week.
#[derive(Serialize, Debug, ToSchema)]
pub struct NutritionResponse {
    pub week: String,
    pub calories: i64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

impl NutritionResponse {
    pub fn new(week: String, summary: &NutritionSummary) -> Self {
        Self {
            week,
            calories: summary.calories,
            protein: format!("{}g", summary.protein_grams),
            carbs: format!("{}g", summary.carbs_grams),
            fat: format!("{}g", summary.fat_grams),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct AdoptResponse {
    pub adopted_weeks: Vec<String>,
    /// Local favorites newly added to the user's list.
    pub adopted_favorites: Vec<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TemplateResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    /// `user` or `default`.
    pub kind: String,
    pub created_at: DateTime<Utc>,
    pub meals: WeekMealsPayload,
}

impl From<&Template> for TemplateResponse {
    fn from(template: &Template) -> Self {
        Self {
            id: template.id.clone(),
            name: template.name.clone(),
            description: template.description.clone(),
            categories: template.categories.clone(),
            kind: template.kind.as_str().to_string(),
            created_at: template.created_at,
            meals: WeekMealsPayload::from(&template.meals),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct IngredientPayload {
    pub name: String,
    pub amount: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct NutritionPayload {
    pub calories: f64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct RecipeResponse {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    pub prep_time: u32,
    pub cook_time: u32,
    pub servings: u32,
    pub difficulty: String,
    pub tags: Vec<String>,
    pub meal_type: Vec<String>,
    pub cuisine: String,
    pub dietary_restrictions: Vec<String>,
    pub ingredients: Vec<IngredientPayload>,
    pub instructions: Vec<String>,
    pub nutrition_info: NutritionPayload,
    pub source_url: Option<String>,
}

impl From<&Recipe> for RecipeResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.title.clone(),
            image: recipe.image.clone(),
            prep_time: recipe.prep_time_minutes,
            cook_time: recipe.cook_time_minutes,
            servings: recipe.servings,
            difficulty: recipe.difficulty.as_str().to_string(),
            tags: recipe.tags.iter().cloned().collect(),
            meal_type: recipe.meal_types.iter().cloned().collect(),
            cuisine: recipe.cuisine.clone(),
            dietary_restrictions: recipe.dietary_restrictions.iter().cloned().collect(),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|i| IngredientPayload {
                    name: i.name.clone(),
                    amount: i.amount.to_string(),
                })
                .collect(),
            instructions: recipe.instructions.clone(),
            nutrition_info: NutritionPayload {
                calories: recipe.nutrition.calories,
                protein: format!("{}g", recipe.nutrition.protein_grams.round()),
                carbs: format!("{}g", recipe.nutrition.carbs_grams.round()),
                fat: format!("{}g", recipe.nutrition.fat_grams.round()),
            },
            source_url: recipe.source_url.clone(),
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct FavoriteToggleResponse {
    pub recipe_id: String,
    pub favorite: bool,
}
