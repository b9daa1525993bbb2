//! Weekly focus notes.
//!
//! One row per `(user_id, week_start_date)` where `week_start_date` is always
//! the Monday of the week the note was set in.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum length of a focus note.
pub const FOCUS_TEXT_MAX: usize = 255;

/// The focus note of a user for one calendar week.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklyFocus {
    pub id: i32,
    pub user_id: i32,
    pub week_start_date: NaiveDate,
    pub focus_text: String,
    pub date_set: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weekly_focus")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub week_start_date: Date,
    pub focus_text: String,
    pub date_set: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WeeklyFocus {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            week_start_date: model.week_start_date,
            focus_text: model.focus_text,
            date_set: model.date_set,
        }
    }
}
