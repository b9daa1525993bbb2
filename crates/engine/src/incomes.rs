//! Income records.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An income owned by a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub amount: f64,
    pub source: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for a new income.
#[derive(Clone, Debug)]
pub struct NewIncome {
    pub description: String,
    pub amount: f64,
    pub source: Option<String>,
}

/// Full-record update for an existing income. `source` is replaced as given,
/// absence clears it.
#[derive(Clone, Debug)]
pub struct IncomeUpdate {
    pub description: String,
    pub amount: f64,
    pub source: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub description: String,
    pub amount: f64,
    pub source: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Income {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            description: model.description,
            amount: model.amount,
            source: model.source,
            created_at: model.created_at,
        }
    }
}
