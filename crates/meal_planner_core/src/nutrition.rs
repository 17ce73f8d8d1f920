//! crates/meal_planner_core/src/nutrition.rs

use crate::domain::{Recipe, RecipeId, WeekMeals};
use std::collections::HashMap;
use std::sync::Arc;

const DAYS_PER_WEEK: f64 = 7.0;

/// Average daily intake for one week, rounded to whole units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NutritionSummary {
    pub calories: i64,
    pub protein_grams: i64,
    pub carbs_grams: i64,
    pub fat_grams: i64,
}

/// Sums the nutrition of every assignment in the week and divides by seven,
/// however many slots were filled. A recipe counts once per slot it occupies;
/// unresolved recipes contribute nothing.
pub fn summarize_week(meals: &WeekMeals, resolved: &HashMap<RecipeId, Arc<Recipe>>) -> NutritionSummary {
    let (mut calories, mut protein, mut carbs, mut fat) = (0.0, 0.0, 0.0, 0.0);

    for recipe in meals
        .iter()
        .flat_map(|(_, recipe_ids)| recipe_ids.iter())
        .filter_map(|id| resolved.get(id))
    {
        calories += recipe.nutrition.calories;
        protein += recipe.nutrition.protein_grams;
        carbs += recipe.nutrition.carbs_grams;
        fat += recipe.nutrition.fat_grams;
    }

    let daily = |total: f64| (total / DAYS_PER_WEEK).round() as i64;
    NutritionSummary {
        calories: daily(calories),
        protein_grams: daily(protein),
        carbs_grams: daily(carbs),
        fat_grams: daily(fat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, MealSlot, NutritionInfo, Slot};
    use crate::test_support::recipe;

    fn with_nutrition(id: &str, calories: f64, protein: f64) -> Arc<Recipe> {
        let mut r = recipe(id, id, &[]);
        r.nutrition = NutritionInfo {
            calories,
            protein_grams: protein,
            ..Default::default()
        };
        Arc::new(r)
    }

    #[test]
    fn one_meal_is_averaged_over_the_whole_week() {
        let mut meals = WeekMeals::new();
        meals.add(Slot::new(Day::Monday, MealSlot::Dinner), "recipe-001".into());
        let resolved = HashMap::from([(RecipeId::from("recipe-001"), with_nutrition("recipe-001", 350.0, 9.0))]);

        let summary = summarize_week(&meals, &resolved);

        assert_eq!(summary.calories, 50);
        assert_eq!(summary.protein_grams, 1);
        assert_eq!(summary.fat_grams, 0);
    }

    #[test]
    fn recipes_count_once_per_slot_and_missing_ones_count_zero() {
        let mut meals = WeekMeals::new();
        meals.add(Slot::new(Day::Monday, MealSlot::Lunch), "soup".into());
        meals.add(Slot::new(Day::Friday, MealSlot::Lunch), "soup".into());
        meals.add(Slot::new(Day::Friday, MealSlot::Dinner), "missing".into());
        let resolved = HashMap::from([(RecipeId::from("soup"), with_nutrition("soup", 700.0, 35.0))]);

        let summary = summarize_week(&meals, &resolved);

        assert_eq!(summary.calories, 200);
        assert_eq!(summary.protein_grams, 10);
    }

    #[test]
    fn empty_week_is_all_zero() {
        assert_eq!(summarize_week(&WeekMeals::new(), &HashMap::new()), NutritionSummary::default());
    }
}
