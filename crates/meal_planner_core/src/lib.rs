pub mod domain;
pub mod editor;
pub mod error;
pub mod favorites;
pub mod nutrition;
pub mod ports;
pub mod resolver;
pub mod shopping;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use domain::{
    AggregatedAmount, Amount, Day, Difficulty, Ingredient, MealSlot, NutritionInfo, OwnerKey,
    Quantity, Recipe, RecipeFilter, RecipeId, RecipeSort, ShoppingList, ShoppingListEntry, Slot,
    Template, TemplateFilter, TemplateKind, WeekKey, WeekMeals, WeeklyPlan,
};
pub use editor::MealPlanEditor;
pub use error::{PlannerError, PlannerResult};
pub use favorites::FavoritesService;
pub use nutrition::NutritionSummary;
pub use ports::{
    FavoritesStore, MealPlanStore, PortError, PortResult, RecipeProvider, RecipeSource,
    TemplateStore,
};
pub use resolver::RecipeResolver;
pub use shopping::ShoppingListAggregator;
pub use templates::TemplateManager;
