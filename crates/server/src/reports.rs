//! Reports API endpoints: weekly snapshot and weekly focus.

use api_types::report::{
    BiggestExpense, CategorySpend, WeeklyFocusSet, WeeklyFocusSetResponse, WeeklyFocusView,
    WeeklySnapshot,
};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState};
use engine::users;

pub async fn weekly_snapshot(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<WeeklySnapshot>, ServerError> {
    let snapshot = state.engine.weekly_snapshot(user.id).await?;

    Ok(Json(WeeklySnapshot {
        start_date_range: snapshot.start_date_range,
        end_date_range: snapshot.end_date_range,
        total_income_last_period: snapshot.total_income_last_period,
        total_expenses_last_period: snapshot.total_expenses_last_period,
        net_flow_last_period: snapshot.net_flow_last_period,
        biggest_expense: snapshot.biggest_expense.map(|b| BiggestExpense {
            description: b.description,
            amount: b.amount,
        }),
        top_spending_categories: snapshot
            .top_spending_categories
            .into_iter()
            .map(|c| CategorySpend {
                category: c.category,
                amount: c.amount,
            })
            .collect(),
        current_focus: snapshot.current_focus,
    }))
}

pub async fn set_weekly_focus(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<WeeklyFocusSet>,
) -> Result<Json<WeeklyFocusSetResponse>, ServerError> {
    let saved = state
        .engine
        .set_weekly_focus(user.id, &payload.focus_text)
        .await?;

    Ok(Json(WeeklyFocusSetResponse {
        focus: saved.map(|focus| WeeklyFocusView {
            id: focus.id,
            user_id: focus.user_id,
            week_start_date: focus.week_start_date,
            focus_text: focus.focus_text,
            date_set: focus.date_set,
        }),
    }))
}
