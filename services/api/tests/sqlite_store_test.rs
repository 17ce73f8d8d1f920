//! Integration tests for the SQLite storage adapter.

mod common;

use chrono::{Duration, Utc};
use common::memory_store;
use meal_planner_core::domain::{Day, MealSlot, Slot, Template, TemplateKind, WeekMeals, WeeklyPlan};
use meal_planner_core::ports::{FavoritesStore, MealPlanStore, PortError, TemplateStore};
use meal_planner_core::{MealPlanEditor, OwnerKey, RecipeId, WeekKey};
use uuid::Uuid;

fn week(raw: &str) -> WeekKey {
    raw.parse().unwrap()
}

#[tokio::test]
async fn unwritten_weeks_read_as_empty_plans() -> anyhow::Result<()> {
    let store = memory_store().await?;

    let plan = store.get_plan(&OwnerKey::Local, &week("2023-W42")).await?;

    assert!(plan.meals.is_empty());
    assert!(store.list_weeks(&OwnerKey::Local).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn plans_round_trip_per_owner_and_week() -> anyhow::Result<()> {
    let store = memory_store().await?;
    let user = OwnerKey::User(Uuid::new_v4());
    let dinner = Slot::new(Day::Monday, MealSlot::Dinner);

    let mut plan = WeeklyPlan::empty(user, week("2023-W42"));
    plan.meals.add(dinner, "recipe-001".into());
    plan.meals.add(dinner, "api-716429".into());
    store.set_plan(&plan).await?;

    assert_eq!(store.get_plan(&user, &week("2023-W42")).await?, plan);
    assert!(store.get_plan(&OwnerKey::Local, &week("2023-W42")).await?.meals.is_empty());
    assert!(store.get_plan(&user, &week("2023-W43")).await?.meals.is_empty());
    Ok(())
}

#[tokio::test]
async fn writes_replace_the_whole_document() -> anyhow::Result<()> {
    let store = memory_store().await?;
    let lunch = Slot::new(Day::Friday, MealSlot::Lunch);

    let mut plan = WeeklyPlan::empty(OwnerKey::Local, week("2024-W01"));
    plan.meals.add(lunch, "recipe-002".into());
    store.set_plan(&plan).await?;
    plan.meals = WeekMeals::new();
    plan.meals.add(lunch, "recipe-005".into());
    store.set_plan(&plan).await?;

    let stored = store.get_plan(&OwnerKey::Local, &week("2024-W01")).await?;
    assert_eq!(stored.meals.recipes(lunch), &[RecipeId::from("recipe-005")]);
    assert_eq!(store.list_weeks(&OwnerKey::Local).await?, vec![week("2024-W01")]);
    Ok(())
}

#[tokio::test]
async fn deleted_plans_disappear_from_the_week_list() -> anyhow::Result<()> {
    let store = memory_store().await?;
    for raw in ["2024-W02", "2023-W52"] {
        let mut plan = WeeklyPlan::empty(OwnerKey::Local, week(raw));
        plan.meals.add(Slot::new(Day::Sunday, MealSlot::Breakfast), "recipe-004".into());
        store.set_plan(&plan).await?;
    }

    assert_eq!(
        store.list_weeks(&OwnerKey::Local).await?,
        vec![week("2023-W52"), week("2024-W02")]
    );
    store.delete_plan(&OwnerKey::Local, &week("2023-W52")).await?;
    assert_eq!(store.list_weeks(&OwnerKey::Local).await?, vec![week("2024-W02")]);
    Ok(())
}

#[tokio::test]
async fn adopting_local_plans_moves_them_to_the_user() -> anyhow::Result<()> {
    let store = memory_store().await?;
    let editor = MealPlanEditor::new(store.clone());
    let user_id = Uuid::new_v4();
    let breakfast = Slot::new(Day::Tuesday, MealSlot::Breakfast);

    editor.add_meal(&OwnerKey::Local, &week("2024-W10"), breakfast, "recipe-004".into()).await?;
    editor.add_meal(&OwnerKey::Local, &week("2024-W11"), breakfast, "recipe-001".into()).await?;
    editor.add_meal(&OwnerKey::User(user_id), &week("2024-W10"), breakfast, "recipe-005".into()).await?;

    let adopted = editor.adopt_local_plans(user_id).await?;

    assert_eq!(adopted, vec![week("2024-W10"), week("2024-W11")]);
    let merged = store.get_plan(&OwnerKey::User(user_id), &week("2024-W10")).await?;
    assert_eq!(
        merged.meals.recipes(breakfast),
        &[RecipeId::from("recipe-005"), RecipeId::from("recipe-004")]
    );
    assert!(store.list_weeks(&OwnerKey::Local).await?.is_empty());
    Ok(())
}

fn template(id: &str, name: &str, age_days: i64) -> Template {
    let mut meals = WeekMeals::new();
    meals.add(Slot::new(Day::Wednesday, MealSlot::Dinner), "recipe-003".into());
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: "Weeknight staples".to_string(),
        categories: vec!["quick".to_string()],
        kind: TemplateKind::User,
        created_at: Utc::now() - Duration::days(age_days),
        meals,
    }
}

#[tokio::test]
async fn templates_list_newest_first() -> anyhow::Result<()> {
    let store = memory_store().await?;
    store.save_template(&OwnerKey::Local, &template("older", "Older", 3)).await?;
    store.save_template(&OwnerKey::Local, &template("newer", "Newer", 1)).await?;

    let listed = store.list_templates(&OwnerKey::Local).await?;

    let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);
    assert_eq!(listed[0].categories, vec!["quick".to_string()]);
    assert_eq!(listed[0].meals.assignment_count(), 1);
    Ok(())
}

#[tokio::test]
async fn templates_are_scoped_to_their_owner() -> anyhow::Result<()> {
    let store = memory_store().await?;
    store.save_template(&OwnerKey::Local, &template("mine", "Mine", 0)).await?;
    let other = OwnerKey::User(Uuid::new_v4());

    assert!(matches!(store.get_template(&other, "mine").await, Err(PortError::NotFound(_))));
    assert!(matches!(store.delete_template(&other, "mine").await, Err(PortError::NotFound(_))));

    store.delete_template(&OwnerKey::Local, "mine").await?;
    assert!(store.list_templates(&OwnerKey::Local).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn favorites_keep_insertion_order_without_duplicates() -> anyhow::Result<()> {
    let store = memory_store().await?;
    let owner = OwnerKey::Local;

    for id in ["recipe-003", "recipe-001", "recipe-003"] {
        store.add_favorite(&owner, &id.into()).await?;
    }
    assert_eq!(
        store.list_favorites(&owner).await?,
        vec![RecipeId::from("recipe-003"), RecipeId::from("recipe-001")]
    );

    store.remove_favorite(&owner, &"recipe-003".into()).await?;
    assert_eq!(store.list_favorites(&owner).await?, vec![RecipeId::from("recipe-001")]);
    Ok(())
}
