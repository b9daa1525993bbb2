//! Report engine: rolling weekly snapshot and weekly focus upsert.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    BiggestExpense, CategorySpend, ResultEngine, WeeklyFocus, WeeklySnapshot, expenses, incomes,
    money::{dec, round2},
    period::{rolling_week, today_utc, week_monday},
    weekly_focus::{self, FOCUS_TEXT_MAX},
};

use super::{Engine, EngineError, with_tx};

impl Engine {
    /// Financial snapshot of the last 7 calendar days (UTC, ending today).
    ///
    /// The income/expense window is rolling; `current_focus` is keyed by the
    /// current calendar week's Monday instead.
    pub async fn weekly_snapshot(&self, user_id: i32) -> ResultEngine<WeeklySnapshot> {
        let today = today_utc();
        let (start_date, end_date, window) = rolling_week(today);

        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::CreatedAt.gte(window.start))
            .filter(expenses::Column::CreatedAt.lt(window.end))
            .all(&self.database)
            .await?;
        let income_models = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .filter(incomes::Column::CreatedAt.gte(window.start))
            .filter(incomes::Column::CreatedAt.lt(window.end))
            .all(&self.database)
            .await?;

        let total_expenses = expense_models
            .iter()
            .fold(Decimal::ZERO, |acc, model| acc + dec(model.amount));
        let total_income = income_models
            .iter()
            .fold(Decimal::ZERO, |acc, model| acc + dec(model.amount));

        let mut by_category: HashMap<String, Decimal> = HashMap::new();
        for model in &expense_models {
            *by_category
                .entry(model.category.clone())
                .or_insert(Decimal::ZERO) += dec(model.amount);
        }
        let mut top: Vec<CategorySpend> = by_category
            .into_iter()
            .map(|(category, amount)| CategorySpend {
                category,
                amount: round2(amount),
            })
            .collect();
        top.sort_by(|a, b| {
            b.amount
                .partial_cmp(&a.amount)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.category.cmp(&b.category))
        });
        top.truncate(3);

        let biggest_expense = expense_models
            .iter()
            .max_by(|a, b| dec(a.amount).cmp(&dec(b.amount)))
            .map(|model| BiggestExpense {
                description: model.description.clone(),
                amount: round2(dec(model.amount)),
            });

        let current_focus = weekly_focus::Entity::find()
            .filter(weekly_focus::Column::UserId.eq(user_id))
            .filter(weekly_focus::Column::WeekStartDate.eq(week_monday(today)))
            .one(&self.database)
            .await?
            .map(|model| model.focus_text);

        Ok(WeeklySnapshot {
            start_date_range: start_date,
            end_date_range: end_date,
            total_income_last_period: round2(total_income),
            total_expenses_last_period: round2(total_expenses),
            net_flow_last_period: round2(total_income - total_expenses),
            biggest_expense,
            top_spending_categories: top,
            current_focus,
        })
    }

    /// Sets, replaces or clears the focus note of the current calendar week.
    ///
    /// The upsert key is this week's Monday. An empty `focus_text` clears any
    /// existing row and returns `None`; the whole read-modify-write runs in
    /// one transaction so concurrent writers cannot both insert.
    pub async fn set_weekly_focus(
        &self,
        user_id: i32,
        focus_text: &str,
    ) -> ResultEngine<Option<WeeklyFocus>> {
        let focus_text = focus_text.trim();
        if focus_text.chars().count() > FOCUS_TEXT_MAX {
            return Err(EngineError::Validation(format!(
                "focus text must not exceed {FOCUS_TEXT_MAX} characters"
            )));
        }

        let monday = week_monday(today_utc());

        with_tx!(self, |tx| {
            async {
                let existing = weekly_focus::Entity::find()
                    .filter(weekly_focus::Column::UserId.eq(user_id))
                    .filter(weekly_focus::Column::WeekStartDate.eq(monday))
                    .one(&tx)
                    .await?;

                let saved = match (existing, focus_text.is_empty()) {
                    (Some(model), true) => {
                        model.delete(&tx).await?;
                        None
                    }
                    (Some(model), false) => {
                        let mut active: weekly_focus::ActiveModel = model.into();
                        active.focus_text = ActiveValue::Set(focus_text.to_string());
                        active.date_set = ActiveValue::Set(Utc::now());
                        Some(WeeklyFocus::from(active.update(&tx).await?))
                    }
                    (None, false) => {
                        let active = weekly_focus::ActiveModel {
                            user_id: ActiveValue::Set(user_id),
                            week_start_date: ActiveValue::Set(monday),
                            focus_text: ActiveValue::Set(focus_text.to_string()),
                            date_set: ActiveValue::Set(Utc::now()),
                            ..Default::default()
                        };
                        Some(WeeklyFocus::from(active.insert(&tx).await?))
                    }
                    (None, true) => None,
                };

                Ok(saved)
            }
            .await
        })
    }
}
