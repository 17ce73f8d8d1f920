//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of the
//! `MealPlanStore`, `TemplateStore` and `FavoritesStore` ports from the `core` crate.
//! It handles all interactions with the SQLite database using `sqlx`.
//!
//! Plans and template snapshots are stored as JSON documents keyed by day and meal:
//! `{"monday": {"breakfast": ["recipe-001"], ...}, ...}`. Older documents hold a single
//! nullable id per slot; those are read as zero- or one-element lists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meal_planner_core::domain::{OwnerKey, RecipeId, Slot, Template, TemplateKind, WeekKey, WeekMeals, WeeklyPlan};
use meal_planner_core::ports::{FavoritesStore, MealPlanStore, PortError, PortResult, TemplateStore};
use serde::Deserialize;
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeMap;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the storage ports.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a new `SqliteStore`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// Plan Documents
//=========================================================================================

/// A slot as found in a stored document: the current list form, or the legacy
/// single nullable id.
#[derive(Deserialize)]
#[serde(untagged)]
enum SlotValue {
    List(Vec<String>),
    Single(Option<String>),
}

impl SlotValue {
    fn into_ids(self) -> Vec<String> {
        match self {
            SlotValue::List(ids) => ids,
            SlotValue::Single(id) => id.into_iter().collect(),
        }
    }
}

type PlanDocument = BTreeMap<String, BTreeMap<String, Vec<String>>>;
type StoredPlanDocument = BTreeMap<String, BTreeMap<String, SlotValue>>;

pub(crate) fn encode_meals(meals: &WeekMeals) -> PortResult<String> {
    let mut document = PlanDocument::new();
    for (slot, recipe_ids) in meals.iter() {
        document
            .entry(slot.day.to_string())
            .or_default()
            .insert(
                slot.meal.to_string(),
                recipe_ids.iter().map(|id| id.as_str().to_string()).collect(),
            );
    }
    serde_json::to_string(&document).map_err(|e| PortError::Unexpected(e.to_string()))
}

/// Reads a stored document. Keys outside the canonical slots are dropped.
pub(crate) fn decode_meals(raw: &str) -> PortResult<WeekMeals> {
    let document: StoredPlanDocument = serde_json::from_str(raw)
        .map_err(|e| PortError::Unexpected(format!("Malformed plan document: {}", e)))?;

    let mut meals = WeekMeals::new();
    for (day, slots) in document {
        for (meal, value) in slots {
            let slot = match Slot::parse(&day, &meal) {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Dropping non-canonical slot from stored plan: {}", e);
                    continue;
                }
            };
            for id in value.into_ids() {
                if !id.trim().is_empty() {
                    meals.add(slot, RecipeId::new(id));
                }
            }
        }
    }
    Ok(meals)
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct PlanRecord {
    meals: String,
}

#[derive(FromRow)]
struct WeekRecord {
    week_key: String,
}

#[derive(FromRow)]
struct TemplateRecord {
    id: String,
    name: String,
    description: String,
    categories: String,
    meals: String,
    created_at: DateTime<Utc>,
}
impl TemplateRecord {
    fn to_domain(self) -> PortResult<Template> {
        let categories: Vec<String> = serde_json::from_str(&self.categories)
            .map_err(|e| PortError::Unexpected(format!("Malformed template categories: {}", e)))?;
        Ok(Template {
            id: self.id,
            name: self.name,
            description: self.description,
            categories,
            kind: TemplateKind::User,
            created_at: self.created_at,
            meals: decode_meals(&self.meals)?,
        })
    }
}

#[derive(FromRow)]
struct FavoriteRecord {
    recipe_id: String,
}

//=========================================================================================
// `MealPlanStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl MealPlanStore for SqliteStore {
    async fn get_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<WeeklyPlan> {
        let record = sqlx::query_as::<_, PlanRecord>(
            "SELECT meals FROM meal_plans WHERE owner_key = ? AND week_key = ?",
        )
        .bind(owner.storage_key())
        .bind(week.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        match record {
            Some(record) => Ok(WeeklyPlan {
                owner: *owner,
                week: *week,
                meals: decode_meals(&record.meals)?,
            }),
            None => Ok(WeeklyPlan::empty(*owner, *week)),
        }
    }

    async fn set_plan(&self, plan: &WeeklyPlan) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO meal_plans (owner_key, week_key, meals, updated_at) VALUES (?, ?, ?, ?) \
             ON CONFLICT (owner_key, week_key) DO UPDATE SET meals = excluded.meals, updated_at = excluded.updated_at",
        )
        .bind(plan.owner.storage_key())
        .bind(plan.week.to_string())
        .bind(encode_meals(&plan.meals)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        debug!(owner = %plan.owner, week = %plan.week, "Plan document written");
        Ok(())
    }

    async fn delete_plan(&self, owner: &OwnerKey, week: &WeekKey) -> PortResult<()> {
        sqlx::query("DELETE FROM meal_plans WHERE owner_key = ? AND week_key = ?")
            .bind(owner.storage_key())
            .bind(week.to_string())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn list_weeks(&self, owner: &OwnerKey) -> PortResult<Vec<WeekKey>> {
        let records = sqlx::query_as::<_, WeekRecord>(
            "SELECT week_key FROM meal_plans WHERE owner_key = ? ORDER BY week_key ASC",
        )
        .bind(owner.storage_key())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let weeks = records
            .into_iter()
            .filter_map(|r| match r.week_key.parse::<WeekKey>() {
                Ok(week) => Some(week),
                Err(e) => {
                    warn!("Skipping stored plan with a bad week key: {}", e);
                    None
                }
            })
            .collect();
        Ok(weeks)
    }
}

//=========================================================================================
// `TemplateStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl TemplateStore for SqliteStore {
    async fn save_template(&self, owner: &OwnerKey, template: &Template) -> PortResult<()> {
        let categories = serde_json::to_string(&template.categories)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        sqlx::query(
            "INSERT INTO templates (id, owner_key, name, description, categories, meals, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&template.id)
        .bind(owner.storage_key())
        .bind(&template.name)
        .bind(&template.description)
        .bind(categories)
        .bind(encode_meals(&template.meals)?)
        .bind(template.created_at)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn list_templates(&self, owner: &OwnerKey) -> PortResult<Vec<Template>> {
        let records = sqlx::query_as::<_, TemplateRecord>(
            "SELECT id, name, description, categories, meals, created_at FROM templates \
             WHERE owner_key = ? ORDER BY created_at DESC",
        )
        .bind(owner.storage_key())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        records.into_iter().map(TemplateRecord::to_domain).collect()
    }

    async fn get_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<Template> {
        let record = sqlx::query_as::<_, TemplateRecord>(
            "SELECT id, name, description, categories, meals, created_at FROM templates \
             WHERE owner_key = ? AND id = ?",
        )
        .bind(owner.storage_key())
        .bind(template_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("Template {} not found", template_id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        record.to_domain()
    }

    async fn delete_template(&self, owner: &OwnerKey, template_id: &str) -> PortResult<()> {
        let result = sqlx::query("DELETE FROM templates WHERE owner_key = ? AND id = ?")
            .bind(owner.storage_key())
            .bind(template_id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Template {} not found", template_id)));
        }
        Ok(())
    }
}

//=========================================================================================
// `FavoritesStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl FavoritesStore for SqliteStore {
    async fn list_favorites(&self, owner: &OwnerKey) -> PortResult<Vec<RecipeId>> {
        let records = sqlx::query_as::<_, FavoriteRecord>(
            "SELECT recipe_id FROM favorites WHERE owner_key = ? ORDER BY rowid ASC",
        )
        .bind(owner.storage_key())
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(records.into_iter().map(|r| RecipeId::new(r.recipe_id)).collect())
    }

    async fn add_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO favorites (owner_key, recipe_id, added_at) VALUES (?, ?, ?) \
             ON CONFLICT (owner_key, recipe_id) DO NOTHING",
        )
        .bind(owner.storage_key())
        .bind(recipe_id.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn remove_favorite(&self, owner: &OwnerKey, recipe_id: &RecipeId) -> PortResult<()> {
        sqlx::query("DELETE FROM favorites WHERE owner_key = ? AND recipe_id = ?")
            .bind(owner.storage_key())
            .bind(recipe_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }
}
