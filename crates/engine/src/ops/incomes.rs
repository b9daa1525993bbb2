//! Income operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{
    Income, IncomeUpdate, NewIncome, ResultEngine, incomes,
    money::dec,
    period::month_window,
};

use super::{
    Engine, EngineError, normalize_optional_text, normalize_required_text, validate_amount,
    with_tx,
};

impl Engine {
    /// Records a new income for `user_id`, stamped with the current UTC time.
    pub async fn add_income(&self, user_id: i32, input: NewIncome) -> ResultEngine<Income> {
        let amount = validate_amount(input.amount)?;
        let description = normalize_required_text(&input.description, "description", 200)?;
        let source = normalize_optional_text(input.source.as_deref(), "source", 100)?;

        let model = incomes::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            description: ActiveValue::Set(description),
            amount: ActiveValue::Set(amount),
            source: ActiveValue::Set(source),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        Ok(model.insert(&self.database).await?.into())
    }

    /// Lists all incomes of `user_id`, newest first.
    pub async fn list_incomes(&self, user_id: i32) -> ResultEngine<Vec<Income>> {
        let models = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .order_by_desc(incomes::Column::CreatedAt)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Income::from).collect())
    }

    /// Replaces description/amount/source of one income.
    pub async fn update_income(
        &self,
        user_id: i32,
        income_id: i32,
        update: IncomeUpdate,
    ) -> ResultEngine<Income> {
        let amount = validate_amount(update.amount)?;
        let description = normalize_required_text(&update.description, "description", 200)?;
        let source = normalize_optional_text(update.source.as_deref(), "source", 100)?;

        with_tx!(self, |tx| {
            async {
                let model = incomes::Entity::find_by_id(income_id)
                    .filter(incomes::Column::UserId.eq(user_id))
                    .one(&tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("income".to_string()))?;

                let mut active: incomes::ActiveModel = model.into();
                active.description = ActiveValue::Set(description);
                active.amount = ActiveValue::Set(amount);
                active.source = ActiveValue::Set(source);

                let updated = active.update(&tx).await?;
                Ok(Income::from(updated))
            }
            .await
        })
    }

    /// Deletes one income. Absence and foreign ownership are reported the
    /// same way.
    pub async fn delete_income(&self, user_id: i32, income_id: i32) -> ResultEngine<()> {
        with_tx!(self, |tx| {
            async {
                let model = incomes::Entity::find_by_id(income_id)
                    .filter(incomes::Column::UserId.eq(user_id))
                    .one(&tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("income".to_string()))?;

                model.delete(&tx).await?;
                Ok(())
            }
            .await
        })
    }

    /// Total income of `user_id` for a calendar month, accumulated in
    /// `Decimal` and rounded to 2 decimals. Feeds the 50/30/20 report.
    pub async fn month_income_total(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> ResultEngine<f64> {
        let window = month_window(year, month)?;

        let models = incomes::Entity::find()
            .filter(incomes::Column::UserId.eq(user_id))
            .filter(incomes::Column::CreatedAt.gte(window.start))
            .filter(incomes::Column::CreatedAt.lt(window.end))
            .all(&self.database)
            .await?;

        let total = models
            .iter()
            .fold(Decimal::ZERO, |acc, model| acc + dec(model.amount));
        Ok(crate::money::round2(total))
    }
}
