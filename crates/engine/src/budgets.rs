//! Monthly per-category budgets.
//!
//! A budget is unique per `(user_id, category, month, year)`. The storage
//! layer carries a matching unique index, but the engine also enforces the
//! key with a transactional read-before-write upsert so concurrent writers
//! cannot both insert (last committed amount wins).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A monthly budget for one expense category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i32,
    pub user_id: i32,
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Upsert input keyed by `(category, month, year)` for the calling user.
#[derive(Clone, Debug)]
pub struct BudgetUpsert {
    pub category: String,
    pub amount: f64,
    pub month: u32,
    pub year: i32,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub category: String,
    pub amount: f64,
    pub month: i32,
    pub year: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Budget {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            category: model.category,
            amount: model.amount,
            month: model.month as u32,
            year: model.year,
        }
    }
}
