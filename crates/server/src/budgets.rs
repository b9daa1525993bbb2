//! Budgets API endpoints: monthly budgets, consumption status, 50/30/20.

use api_types::budget::{
    BudgetStatusEntry, BudgetUpsert, BudgetView, RuleBucket, RuleStatus,
};
use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::{ServerError, server::ServerState};
use engine::users;

/// Month selector; both fields default to the current UTC date.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

impl MonthQuery {
    fn resolve(&self) -> (i32, u32) {
        let today = Utc::now().date_naive();
        (
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )
    }
}

fn view(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category: budget.category,
        amount: budget.amount,
        month: budget.month,
        year: budget.year,
    }
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let (year, month) = query.resolve();
    let budgets = state.engine.budgets_for_month(user.id, year, month).await?;
    Ok(Json(budgets.into_iter().map(view).collect()))
}

pub async fn upsert(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<BudgetUpsert>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let budget = state
        .engine
        .set_or_update_budget(
            user.id,
            engine::BudgetUpsert {
                category: payload.category,
                amount: payload.amount,
                month: payload.month,
                year: payload.year,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(budget))))
}

pub async fn status(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<BudgetStatusEntry>>, ServerError> {
    let (year, month) = query.resolve();
    let entries = state
        .engine
        .budget_status_for_month(user.id, year, month)
        .await?;

    Ok(Json(
        entries
            .into_iter()
            .map(|entry| BudgetStatusEntry {
                id: entry.id,
                category: entry.category,
                budgeted_amount: entry.budgeted_amount,
                spent_amount: entry.spent_amount,
                remaining_amount: entry.remaining_amount,
                percentage_spent: entry.percentage_spent,
            })
            .collect(),
    ))
}

fn map_bucket(bucket: engine::RuleBucket) -> RuleBucket {
    RuleBucket {
        budgeted_percent: bucket.budgeted_percent,
        spent_percent: bucket.spent_percent,
        spent_amount: bucket.spent_amount,
    }
}

pub async fn rules_status(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<RuleStatus>, ServerError> {
    let (year, month) = query.resolve();
    let total_income = state
        .engine
        .month_income_total(user.id, year, month)
        .await?;
    let status = state
        .engine
        .rule_status(user.id, year, month, total_income)
        .await?;

    Ok(Json(RuleStatus {
        needs: map_bucket(status.needs),
        wants: map_bucket(status.wants),
        savings_expenses: map_bucket(status.savings_expenses),
        unclassified_amount: status.unclassified_amount,
        total_income: status.total_income,
    }))
}
