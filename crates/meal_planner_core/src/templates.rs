//! crates/meal_planner_core/src/templates.rs
//!
//! Saves and restores whole weeks as reusable templates.

use crate::domain::{OwnerKey, Template, TemplateFilter, TemplateKind, WeekKey, WeekMeals, WeeklyPlan};
use crate::editor::MealPlanEditor;
use crate::error::{PlannerError, PlannerResult};
use crate::ports::{PortError, TemplateStore};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Built-in templates offered to every owner: (id, name, description, category).
const DEFAULT_TEMPLATES: [(&str, &str, &str, &str); 3] = [
    (
        "default_balanced",
        "Balanced Week",
        "A balanced meal plan with a variety of proteins, grains, and vegetables",
        "balanced",
    ),
    (
        "default_vegetarian",
        "Vegetarian Week",
        "A plant-based meal plan with plenty of protein and nutrients",
        "vegetarian",
    ),
    (
        "default_quick",
        "Quick & Easy Week",
        "Meals that can be prepared in 30 minutes or less",
        "quick",
    ),
];

fn defaults_created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

pub fn default_templates() -> Vec<Template> {
    DEFAULT_TEMPLATES
        .iter()
        .map(|(id, name, description, category)| Template {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            categories: vec![category.to_string()],
            kind: TemplateKind::Default,
            created_at: defaults_created_at(),
            meals: WeekMeals::new(),
        })
        .collect()
}

fn is_default_id(template_id: &str) -> bool {
    DEFAULT_TEMPLATES.iter().any(|(id, ..)| *id == template_id)
}

#[derive(Clone)]
pub struct TemplateManager {
    store: Arc<dyn TemplateStore>,
    editor: MealPlanEditor,
}

impl TemplateManager {
    pub fn new(store: Arc<dyn TemplateStore>, editor: MealPlanEditor) -> Self {
        Self { store, editor }
    }

    /// Snapshots the week's current meals under a new template id.
    pub async fn save_from_week(
        &self,
        owner: &OwnerKey,
        week: &WeekKey,
        name: &str,
        description: &str,
        categories: Vec<String>,
    ) -> PlannerResult<Template> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::InvalidTemplate(
                "template name must not be blank".to_string(),
            ));
        }

        let plan = self.editor.load(owner, week).await?;
        let template = Template {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: description.trim().to_string(),
            categories,
            kind: TemplateKind::User,
            created_at: Utc::now(),
            meals: plan.meals,
        };
        self.store.save_template(owner, &template).await?;

        info!(owner = %owner, template_id = %template.id, "Template saved");
        Ok(template)
    }

    /// The owner's templates, newest first, followed by the built-in ones.
    pub async fn list(&self, owner: &OwnerKey, filter: TemplateFilter) -> PlannerResult<Vec<Template>> {
        let mut templates = self.store.list_templates(owner).await?;
        templates.extend(default_templates());
        templates.retain(|t| filter.accepts(t.kind));
        Ok(templates)
    }

    pub async fn get(&self, owner: &OwnerKey, template_id: &str) -> PlannerResult<Template> {
        if let Some(builtin) = default_templates().into_iter().find(|t| t.id == template_id) {
            return Ok(builtin);
        }
        match self.store.get_template(owner, template_id).await {
            Ok(template) => Ok(template),
            Err(PortError::NotFound(_)) => Err(PlannerError::TemplateNotFound(template_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Replaces the week's plan with the template's meals.
    pub async fn apply(&self, owner: &OwnerKey, week: &WeekKey, template_id: &str) -> PlannerResult<WeeklyPlan> {
        let template = self.get(owner, template_id).await?;
        let plan = self.editor.replace_meals(owner, week, template.meals).await?;
        info!(owner = %owner, week = %week, template_id, "Template applied");
        Ok(plan)
    }

    pub async fn delete(&self, owner: &OwnerKey, template_id: &str) -> PlannerResult<()> {
        if is_default_id(template_id) {
            return Err(PlannerError::InvalidTemplate(format!(
                "built-in template '{}' cannot be deleted",
                template_id
            )));
        }
        match self.store.delete_template(owner, template_id).await {
            Ok(()) => {}
            Err(PortError::NotFound(_)) => {
                return Err(PlannerError::TemplateNotFound(template_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        }
        info!(owner = %owner, template_id, "Template deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, MealSlot, RecipeId, Slot};
    use crate::test_support::{MemoryPlanStore, MemoryTemplateStore};

    fn week() -> WeekKey {
        "2024-W05".parse().unwrap()
    }

    fn manager() -> (TemplateManager, MealPlanEditor) {
        let editor = MealPlanEditor::new(Arc::new(MemoryPlanStore::default()));
        let manager = TemplateManager::new(Arc::new(MemoryTemplateStore::default()), editor.clone());
        (manager, editor)
    }

    #[tokio::test]
    async fn saved_template_restores_into_another_week() {
        let (manager, editor) = manager();
        let owner = OwnerKey::Local;
        let dinner = Slot::new(Day::Saturday, MealSlot::Dinner);
        editor.add_meal(&owner, &week(), dinner, "recipe-003".into()).await.unwrap();

        let template = manager
            .save_from_week(&owner, &week(), "  Family week ", "", vec!["family".to_string()])
            .await
            .unwrap();
        let next_week: WeekKey = "2024-W06".parse().unwrap();
        let plan = manager.apply(&owner, &next_week, &template.id).await.unwrap();

        assert_eq!(template.name, "Family week");
        assert_eq!(template.kind, TemplateKind::User);
        assert_eq!(plan.meals.recipes(dinner), &[RecipeId::from("recipe-003")]);
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let (manager, _) = manager();

        let result = manager
            .save_from_week(&OwnerKey::Local, &week(), "   ", "", vec![])
            .await;

        assert!(matches!(result, Err(PlannerError::InvalidTemplate(_))));
    }

    #[tokio::test]
    async fn listing_filters_by_kind() {
        let (manager, _) = manager();
        let owner = OwnerKey::Local;
        manager.save_from_week(&owner, &week(), "Mine", "", vec![]).await.unwrap();

        let all = manager.list(&owner, TemplateFilter::All).await.unwrap();
        let user = manager.list(&owner, TemplateFilter::User).await.unwrap();
        let defaults = manager.list(&owner, TemplateFilter::Default).await.unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name, "Mine");
        assert_eq!(user.len(), 1);
        let ids: Vec<&str> = defaults.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["default_balanced", "default_vegetarian", "default_quick"]);
    }

    #[tokio::test]
    async fn applying_a_builtin_clears_the_week() {
        let (manager, editor) = manager();
        let owner = OwnerKey::Local;
        editor
            .add_meal(&owner, &week(), Slot::new(Day::Monday, MealSlot::Lunch), "x".into())
            .await
            .unwrap();

        let plan = manager.apply(&owner, &week(), "default_quick").await.unwrap();

        assert!(plan.meals.is_empty());
    }

    #[tokio::test]
    async fn unknown_templates_are_reported() {
        let (manager, _) = manager();

        let result = manager.apply(&OwnerKey::Local, &week(), "nope").await;

        assert!(matches!(result, Err(PlannerError::TemplateNotFound(_))));
    }

    #[tokio::test]
    async fn builtins_cannot_be_deleted() {
        let (manager, _) = manager();
        let owner = OwnerKey::Local;

        let result = manager.delete(&owner, "default_balanced").await;
        assert!(matches!(result, Err(PlannerError::InvalidTemplate(_))));

        let mine = manager.save_from_week(&owner, &week(), "Mine", "", vec![]).await.unwrap();
        manager.delete(&owner, &mine.id).await.unwrap();
        assert_eq!(manager.list(&owner, TemplateFilter::User).await.unwrap().len(), 0);
    }
}
