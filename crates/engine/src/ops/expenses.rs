//! Expense operations.

use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};

use crate::{Expense, NewExpense, ResultEngine, expenses};

use super::{
    Engine, EngineError, normalize_optional_text, normalize_required_text, validate_amount,
    with_tx,
};

impl Engine {
    /// Records a new expense for `user_id`, stamped with the current UTC time.
    ///
    /// A missing category falls back to [`expenses::UNCATEGORIZED`].
    pub async fn add_expense(&self, user_id: i32, input: NewExpense) -> ResultEngine<Expense> {
        let amount = validate_amount(input.amount)?;
        let description = normalize_required_text(&input.description, "description", 200)?;
        let category = normalize_optional_text(input.category.as_deref(), "category", 50)?
            .unwrap_or_else(|| expenses::UNCATEGORIZED.to_string());

        let model = expenses::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            description: ActiveValue::Set(description),
            amount: ActiveValue::Set(amount),
            category: ActiveValue::Set(category),
            rule_category: ActiveValue::Set(input.rule_category.map(|r| r.as_str().to_string())),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        let inserted = model.insert(&self.database).await?;
        Expense::try_from(inserted)
    }

    /// Lists all expenses of `user_id`, newest first.
    pub async fn list_expenses(&self, user_id: i32) -> ResultEngine<Vec<Expense>> {
        let models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .order_by_desc(expenses::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Expense::try_from).collect()
    }

    /// Deletes one expense. Absence and foreign ownership are reported the
    /// same way.
    pub async fn delete_expense(&self, user_id: i32, expense_id: i32) -> ResultEngine<()> {
        with_tx!(self, |tx| {
            async {
                let model = expenses::Entity::find_by_id(expense_id)
                    .filter(expenses::Column::UserId.eq(user_id))
                    .one(&tx)
                    .await?
                    .ok_or_else(|| EngineError::KeyNotFound("expense".to_string()))?;

                model.delete(&tx).await?;
                Ok(())
            }
            .await
        })
    }
}
