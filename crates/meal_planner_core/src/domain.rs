//! crates/meal_planner_core/src/domain.rs
//!
//! Defines the pure, core data structures for the meal planner.
//! These structs are independent of any database or serialization format.

use crate::error::PlannerError;
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use regex::Regex;
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use uuid::Uuid;

//=========================================================================================
// Recipes
//=========================================================================================

/// Namespace prefix carried by every recipe id that originates from the remote API.
pub const REMOTE_ID_PREFIX: &str = "api-";

/// Globally unique recipe identifier. Remote ids are namespaced with [`REMOTE_ID_PREFIX`]
/// so they can never collide with local catalog ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the namespaced id of a recipe held by the remote API.
    pub fn remote(provider_id: impl fmt::Display) -> Self {
        Self(format!("{REMOTE_ID_PREFIX}{provider_id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_remote(&self) -> bool {
        self.0.starts_with(REMOTE_ID_PREFIX)
    }

    /// The provider-side id of a remote recipe, without the namespace prefix.
    pub fn remote_part(&self) -> Option<&str> {
        self.0.strip_prefix(REMOTE_ID_PREFIX)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Per-recipe nutrition figures. Macronutrients are held in grams.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutritionInfo {
    pub calories: f64,
    pub protein_grams: f64,
    pub carbs_grams: f64,
    pub fat_grams: f64,
}

impl NutritionInfo {
    /// Reads a gram label such as `"9g"` the way a leading-integer parse would;
    /// anything without leading digits counts as zero.
    pub fn grams_from_label(label: &str) -> f64 {
        let digits: String = label
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<f64>().unwrap_or(0.0)
    }
}

/// A full recipe record. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
    pub image: Option<String>,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub servings: u32,
    pub difficulty: Difficulty,
    pub tags: BTreeSet<String>,
    pub meal_types: BTreeSet<String>,
    /// Lower-cased canonical form.
    pub cuisine: String,
    pub dietary_restrictions: BTreeSet<String>,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
    pub nutrition: NutritionInfo,
    pub source_url: Option<String>,
}

impl Recipe {
    pub fn total_time_minutes(&self) -> u32 {
        self.prep_time_minutes + self.cook_time_minutes
    }

    /// Whether the lower-cased `needle` occurs in the title, a tag, the cuisine or an
    /// ingredient name.
    pub fn mentions(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
            || self.cuisine.contains(needle)
            || self.ingredients.iter().any(|i| i.aggregation_key().contains(needle))
    }
}

//=========================================================================================
// Browsing
//=========================================================================================

/// Criteria for narrowing a recipe listing. Empty criteria do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeFilter {
    /// Free text, see [`Recipe::mentions`].
    pub text: String,
    /// All of these must be met.
    pub dietary_restrictions: Vec<String>,
    /// Any of these qualifies.
    pub cuisines: Vec<String>,
    /// Any of these qualifies.
    pub meal_types: Vec<String>,
    pub difficulties: Vec<Difficulty>,
    /// Upper bound on prep plus cook time.
    pub max_total_minutes: Option<u32>,
}

impl RecipeFilter {
    pub fn text(query: &str) -> Self {
        Self {
            text: query.to_string(),
            ..Self::default()
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let needle = self.text.trim().to_lowercase();
        if !needle.is_empty() && !recipe.mentions(&needle) {
            return false;
        }
        if !self.cuisines.is_empty()
            && !self.cuisines.iter().any(|c| c.trim().eq_ignore_ascii_case(&recipe.cuisine))
        {
            return false;
        }
        let serves_meal = |wanted: &String| {
            recipe.meal_types.iter().any(|m| m.eq_ignore_ascii_case(wanted.trim()))
        };
        if !self.meal_types.is_empty() && !self.meal_types.iter().any(serves_meal) {
            return false;
        }
        let all_diets = self.dietary_restrictions.iter().all(|wanted| {
            recipe
                .dietary_restrictions
                .iter()
                .any(|d| d.eq_ignore_ascii_case(wanted.trim()))
        });
        if !all_diets {
            return false;
        }
        if !self.difficulties.is_empty() && !self.difficulties.contains(&recipe.difficulty) {
            return false;
        }
        self.max_total_minutes
            .map_or(true, |max| recipe.total_time_minutes() <= max)
    }
}

/// Ordering for recipe listings. Sorting is stable, so ties keep catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecipeSort {
    #[default]
    Catalog,
    Time,
    Difficulty,
}

impl RecipeSort {
    /// `time` and `difficulty` reorder; `popular` and `newest` keep catalog order.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "" | "popular" | "newest" => Some(RecipeSort::Catalog),
            "time" => Some(RecipeSort::Time),
            "difficulty" => Some(RecipeSort::Difficulty),
            _ => None,
        }
    }

    pub fn apply<R: Borrow<Recipe>>(self, recipes: &mut [R]) {
        match self {
            RecipeSort::Catalog => {}
            RecipeSort::Time => recipes.sort_by_key(|r| Borrow::<Recipe>::borrow(r).total_time_minutes()),
            RecipeSort::Difficulty => recipes.sort_by_key(|r| Borrow::<Recipe>::borrow(r).difficulty),
        }
    }
}

//=========================================================================================
// Ingredients and amounts
//=========================================================================================

/// Normalizes an ingredient name into its aggregation key.
pub fn aggregation_key(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub amount: Amount,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: Amount) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }

    pub fn aggregation_key(&self) -> String {
        aggregation_key(&self.name)
    }
}

/// A numeric quantity with a free-form unit. The unit may be empty ("2 eggs" parses
/// with the unit "eggs", a bare "2" with no unit).
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
}

impl Quantity {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into().trim().to_string(),
        }
    }

    /// Units match when equal after trimming and lower-casing. No conversion is attempted.
    pub fn same_unit(&self, other: &Quantity) -> bool {
        self.unit.to_lowercase() == other.unit.to_lowercase()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = format_value(self.value);
        if self.unit.is_empty() {
            f.write_str(&value)
        } else {
            write!(f, "{} {}", value, self.unit)
        }
    }
}

fn format_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        return format!("{}", value.round() as i64);
    }
    let fixed = format!("{:.2}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// The canonical ingredient amount: either a structured quantity or an opaque display
/// string that could not be read as one (e.g. "to taste").
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    Measured(Quantity),
    Text(String),
}

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?:(?P<whole>\d+)\s+(?P<mnum>\d+)/(?P<mden>\d+)|(?P<num>\d+)/(?P<den>\d+)|(?P<dec>\d+(?:\.\d+)?|\.\d+))(?:\s*(?P<unit>\p{L}.*?))?\s*$",
        )
        .expect("amount pattern is a valid regex")
    })
}

impl Amount {
    pub fn measured(value: f64, unit: impl Into<String>) -> Self {
        Amount::Measured(Quantity::new(value, unit))
    }

    /// Reads a display string such as `"8 oz"`, `"1/4 cup"` or `"1 1/2 tsp"` into a
    /// structured amount, keeping anything else as text.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        let Some(caps) = amount_pattern().captures(text) else {
            return Amount::Text(text.to_string());
        };

        let number = |name: &str| caps.name(name).and_then(|m| m.as_str().parse::<f64>().ok());
        let value = if let (Some(whole), Some(num), Some(den)) =
            (number("whole"), number("mnum"), number("mden"))
        {
            (den != 0.0).then(|| whole + num / den)
        } else if let (Some(num), Some(den)) = (number("num"), number("den")) {
            (den != 0.0).then(|| num / den)
        } else {
            number("dec")
        };

        match value {
            Some(value) => {
                let unit = caps.name("unit").map(|m| m.as_str()).unwrap_or_default();
                Amount::measured(value, unit)
            }
            None => Amount::Text(text.to_string()),
        }
    }

    pub fn quantity(&self) -> Option<&Quantity> {
        match self {
            Amount::Measured(quantity) => Some(quantity),
            Amount::Text(_) => None,
        }
    }

    /// Sums two measured amounts that share a unit.
    pub fn combine(&self, other: &Amount) -> Option<Amount> {
        match (self, other) {
            (Amount::Measured(a), Amount::Measured(b)) if a.same_unit(b) => {
                Some(Amount::Measured(Quantity::new(a.value + b.value, a.unit.clone())))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Measured(quantity) => quantity.fmt(f),
            Amount::Text(text) => f.write_str(text),
        }
    }
}

/// The amount carried by a shopping list entry.
///
/// `Single` holds one amount, summed when every contribution was measured in the same
/// unit. `Distinct` is the degraded form used once contributions cannot be summed
/// (different units, or free text); measured parts with matching units are still summed.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedAmount {
    Single(Amount),
    Distinct(Vec<Amount>),
}

impl AggregatedAmount {
    pub fn new(first: Amount) -> Self {
        AggregatedAmount::Single(first)
    }

    pub fn absorb(&mut self, next: Amount) {
        match self {
            AggregatedAmount::Single(current) => {
                if let Some(sum) = current.combine(&next) {
                    *current = sum;
                    return;
                }
                if *current == next {
                    return;
                }
                let first = current.clone();
                *self = AggregatedAmount::Distinct(vec![first, next]);
            }
            AggregatedAmount::Distinct(parts) => {
                for part in parts.iter_mut() {
                    if let Some(sum) = part.combine(&next) {
                        *part = sum;
                        return;
                    }
                }
                if !parts.contains(&next) {
                    parts.push(next);
                }
            }
        }
    }

    pub fn as_single(&self) -> Option<&Amount> {
        match self {
            AggregatedAmount::Single(amount) => Some(amount),
            AggregatedAmount::Distinct(_) => None,
        }
    }

    /// Display strings of every part, in the order they were first seen.
    pub fn display_values(&self) -> Vec<String> {
        match self {
            AggregatedAmount::Single(amount) => vec![amount.to_string()],
            AggregatedAmount::Distinct(parts) => parts.iter().map(Amount::to_string).collect(),
        }
    }
}

impl fmt::Display for AggregatedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_values().join(", "))
    }
}

//=========================================================================================
// Calendar keys
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Tuesday => "tuesday",
            Day::Wednesday => "wednesday",
            Day::Thursday => "thursday",
            Day::Friday => "friday",
            Day::Saturday => "saturday",
            Day::Sunday => "sunday",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Day {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| day.as_str() == wanted)
            .ok_or_else(|| PlannerError::InvalidSlot(format!("unknown day '{}'", s)))
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for MealSlot {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        MealSlot::ALL
            .into_iter()
            .find(|meal| meal.as_str() == wanted)
            .ok_or_else(|| PlannerError::InvalidSlot(format!("unknown meal slot '{}'", s)))
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the 21 canonical (day, meal slot) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub day: Day,
    pub meal: MealSlot,
}

impl Slot {
    pub fn new(day: Day, meal: MealSlot) -> Self {
        Self { day, meal }
    }

    pub fn parse(day: &str, meal: &str) -> Result<Self, PlannerError> {
        Ok(Self::new(day.parse()?, meal.parse()?))
    }

    /// Every canonical slot, monday..sunday, breakfast..dinner.
    pub fn all() -> impl Iterator<Item = Slot> {
        Day::ALL
            .into_iter()
            .flat_map(|day| MealSlot::ALL.into_iter().map(move |meal| Slot::new(day, meal)))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.meal)
    }
}

/// ISO week identifier in the `YYYY-Www` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WeekKey {
    year: i32,
    week: u32,
}

impl WeekKey {
    pub fn new(year: i32, week: u32) -> Result<Self, PlannerError> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .map(|_| Self { year, week })
            .ok_or_else(|| PlannerError::InvalidWeekKey(format!("{:04}-W{:02}", year, week)))
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }
}

fn week_key_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<year>\d{4})-W(?P<week>\d{2})$").expect("week key pattern is a valid regex")
    })
}

impl FromStr for WeekKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidWeekKey(s.to_string());
        let caps = week_key_pattern().captures(s.trim()).ok_or_else(invalid)?;
        let year = caps["year"].parse::<i32>().map_err(|_| invalid())?;
        let week = caps["week"].parse::<u32>().map_err(|_| invalid())?;
        WeekKey::new(year, week).map_err(|_| invalid())
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

/// Who a plan belongs to: the anonymous browser-local owner or an authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerKey {
    Local,
    User(Uuid),
}

impl OwnerKey {
    pub const LOCAL_KEY: &'static str = "local";

    pub fn storage_key(&self) -> String {
        match self {
            OwnerKey::Local => Self::LOCAL_KEY.to_string(),
            OwnerKey::User(user_id) => user_id.to_string(),
        }
    }
}

impl fmt::Display for OwnerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

//=========================================================================================
// Meal plans
//=========================================================================================

/// The 7 × 3 grid of recipe-id lists. Only canonical slots are representable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WeekMeals {
    slots: [[Vec<RecipeId>; 3]; 7],
}

impl WeekMeals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recipes(&self, slot: Slot) -> &[RecipeId] {
        &self.slots[slot.day.index()][slot.meal.index()]
    }

    fn recipes_mut(&mut self, slot: Slot) -> &mut Vec<RecipeId> {
        &mut self.slots[slot.day.index()][slot.meal.index()]
    }

    pub fn contains(&self, slot: Slot, recipe_id: &RecipeId) -> bool {
        self.recipes(slot).contains(recipe_id)
    }

    /// Appends the recipe unless the slot already holds it. Returns whether anything changed.
    pub fn add(&mut self, slot: Slot, recipe_id: RecipeId) -> bool {
        let recipes = self.recipes_mut(slot);
        if recipes.contains(&recipe_id) {
            return false;
        }
        recipes.push(recipe_id);
        true
    }

    /// Removes the recipe if present. Returns whether anything changed.
    pub fn remove(&mut self, slot: Slot, recipe_id: &RecipeId) -> bool {
        let recipes = self.recipes_mut(slot);
        let before = recipes.len();
        recipes.retain(|id| id != recipe_id);
        recipes.len() != before
    }

    /// Remove from one slot, then add to another, as a single in-memory mutation.
    /// A recipe missing from `from` is still added to `to`.
    pub fn move_recipe(&mut self, recipe_id: &RecipeId, from: Slot, to: Slot) -> bool {
        let removed = self.remove(from, recipe_id);
        let added = self.add(to, recipe_id.clone());
        removed || added
    }

    pub fn clear(&mut self) -> bool {
        let changed = !self.is_empty();
        self.slots = Default::default();
        changed
    }

    /// Slot-wise union: entries already present keep their position, new ones are appended.
    pub fn merge(&mut self, other: &WeekMeals) -> bool {
        let mut changed = false;
        for (slot, recipes) in other.iter() {
            for recipe_id in recipes {
                changed |= self.add(slot, recipe_id.clone());
            }
        }
        changed
    }

    /// Every slot with its recipes, in canonical day → meal order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &[RecipeId])> + '_ {
        Slot::all().map(move |slot| (slot, self.recipes(slot)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, recipes)| recipes.is_empty())
    }

    /// Number of (slot, recipe) assignments, counting a recipe once per slot.
    pub fn assignment_count(&self) -> usize {
        self.iter().map(|(_, recipes)| recipes.len()).sum()
    }

    /// Distinct recipe ids referenced anywhere in the week.
    pub fn recipe_ids(&self) -> BTreeSet<&RecipeId> {
        self.iter().flat_map(|(_, recipes)| recipes.iter()).collect()
    }
}

/// A week's plan for one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub owner: OwnerKey,
    pub week: WeekKey,
    pub meals: WeekMeals,
}

impl WeeklyPlan {
    pub fn empty(owner: OwnerKey, week: WeekKey) -> Self {
        Self {
            owner,
            week,
            meals: WeekMeals::new(),
        }
    }
}

//=========================================================================================
// Shopping lists
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingListEntry {
    /// Casing of the first occurrence.
    pub name: String,
    pub key: String,
    pub amount: AggregatedAmount,
    /// `"<recipe title> (<day> <meal>)"` descriptors, in canonical slot order.
    pub sources: Vec<String>,
}

impl ShoppingListEntry {
    pub fn new(ingredient: &Ingredient, source: String) -> Self {
        Self {
            name: ingredient.name.trim().to_string(),
            key: ingredient.aggregation_key(),
            amount: AggregatedAmount::new(ingredient.amount.clone()),
            sources: vec![source],
        }
    }

    pub fn add_source(&mut self, source: String) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShoppingList {
    /// Sorted alphabetically, case-insensitively.
    pub entries: Vec<ShoppingListEntry>,
    /// Recipe ids that could not be resolved and were skipped.
    pub unresolved: Vec<RecipeId>,
}

impl ShoppingList {
    pub fn entry(&self, name: &str) -> Option<&ShoppingListEntry> {
        let key = aggregation_key(name);
        self.entries.iter().find(|entry| entry.key == key)
    }
}

//=========================================================================================
// Templates
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    User,
    Default,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::User => "user",
            TemplateKind::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFilter {
    #[default]
    All,
    User,
    Default,
}

impl TemplateFilter {
    pub fn accepts(&self, kind: TemplateKind) -> bool {
        match self {
            TemplateFilter::All => true,
            TemplateFilter::User => kind == TemplateKind::User,
            TemplateFilter::Default => kind == TemplateKind::Default,
        }
    }
}

/// A reusable snapshot of a week's meals.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub categories: Vec<String>,
    pub kind: TemplateKind,
    pub created_at: DateTime<Utc>,
    pub meals: WeekMeals,
}
