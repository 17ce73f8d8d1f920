//! crates/meal_planner_core/src/error.rs
//!
//! Errors raised by the core planning services.

use crate::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// A day or meal name outside the 21 canonical slots.
    #[error("Invalid meal slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid week key '{0}', expected YYYY-Www")]
    InvalidWeekKey(String),

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// The week's plan could not be read, so no shopping list could be built.
    #[error("Shopping list aggregation failed: {0}")]
    AggregationFailed(#[source] PortError),

    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

/// A convenience type alias for `Result<T, PlannerError>`.
pub type PlannerResult<T> = Result<T, PlannerError>;
