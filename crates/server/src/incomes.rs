//! Incomes API endpoints

use api_types::income::{IncomeNew, IncomeUpdate, IncomeView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};
use engine::{NewIncome, users};

fn view(income: engine::Income) -> IncomeView {
    IncomeView {
        id: income.id,
        user_id: income.user_id,
        description: income.description,
        amount: income.amount,
        source: income.source,
        created_at: income.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<(StatusCode, Json<IncomeView>), ServerError> {
    let income = state
        .engine
        .add_income(
            user.id,
            NewIncome {
                description: payload.description,
                amount: payload.amount,
                source: payload.source,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(income))))
}

pub async fn list(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<IncomeView>>, ServerError> {
    let incomes = state.engine.list_incomes(user.id).await?;
    Ok(Json(incomes.into_iter().map(view).collect()))
}

pub async fn update(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<IncomeUpdate>,
) -> Result<Json<IncomeView>, ServerError> {
    let income = state
        .engine
        .update_income(
            user.id,
            id,
            engine::IncomeUpdate {
                description: payload.description,
                amount: payload.amount,
                source: payload.source,
            },
        )
        .await?;

    Ok(Json(view(income)))
}

pub async fn remove(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_income(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
