//! Expense records and the 50/30/20 rule classification.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// Fallback category for expenses recorded without one.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Classification of an expense under the 50/30/20 budgeting rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleCategory {
    Needs,
    Wants,
    Savings,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Needs => "Needs",
            Self::Wants => "Wants",
            Self::Savings => "Savings",
        }
    }
}

impl TryFrom<&str> for RuleCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Needs" => Ok(Self::Needs),
            "Wants" => Ok(Self::Wants),
            "Savings" => Ok(Self::Savings),
            other => Err(EngineError::Validation(format!(
                "invalid rule category: {other}"
            ))),
        }
    }
}

/// An expense owned by a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub rule_category: Option<RuleCategory>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new expense. Construction happens at the engine
/// boundary; callers pass raw route payload fields.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub category: Option<String>,
    pub rule_category: Option<RuleCategory>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub rule_category: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        let rule_category = model
            .rule_category
            .as_deref()
            .map(RuleCategory::try_from)
            .transpose()?;
        Ok(Self {
            id: model.id,
            user_id: model.user_id,
            description: model.description,
            amount: model.amount,
            category: model.category,
            rule_category,
            created_at: model.created_at,
        })
    }
}
