//! Expenses API endpoints

use api_types::expense::{ExpenseNew, ExpenseView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{NewExpense, RuleCategory, users};

fn view(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        user_id: expense.user_id,
        description: expense.description,
        amount: expense.amount,
        category: expense.category,
        rule_category: expense.rule_category.map(|r| r.as_str().to_string()),
        created_at: expense.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseNew>,
) -> Result<(StatusCode, Json<ExpenseView>), ServerError> {
    let rule_category = payload
        .rule_category
        .as_deref()
        .map(RuleCategory::try_from)
        .transpose()?;

    let expense = state
        .engine
        .add_expense(
            user.id,
            NewExpense {
                description: payload.description,
                amount: payload.amount,
                category: payload.category,
                rule_category,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(expense))))
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<ExpenseView>>, ServerError> {
    let expenses = state.engine.list_expenses(user.id).await?;
    Ok(Json(expenses.into_iter().map(view).collect()))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_expense(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
