//! Budget engine: monthly budgets, consumption status and the 50/30/20 rule.

use std::collections::HashMap;

use rust_decimal::Decimal;
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};

use crate::{
    Budget, BudgetStatusEntry, BudgetUpsert, ResultEngine, RuleBucket, RuleCategory, RuleStatus,
    budgets, expenses,
    money::{dec, percent_of, round2},
    period::month_window,
    reports::{NEEDS_TARGET_PERCENT, SAVINGS_TARGET_PERCENT, WANTS_TARGET_PERCENT},
};

use super::{Engine, normalize_required_text, validate_amount, with_tx};

impl Engine {
    /// Lists the budgets of `user_id` for one calendar month. An empty list
    /// is a valid result, not an error.
    pub async fn budgets_for_month(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> ResultEngine<Vec<Budget>> {
        // Validates the period; the budget rows are keyed by the raw
        // year/month pair rather than the datetime range.
        month_window(year, month)?;

        let models = budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user_id))
            .filter(budgets::Column::Year.eq(year))
            .filter(budgets::Column::Month.eq(month as i32))
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Budget::from).collect())
    }

    /// Idempotent upsert keyed by `(user_id, category, month, year)`.
    ///
    /// The select and the following insert/update run inside one transaction,
    /// so two concurrent upserts for the same key cannot both insert; the
    /// last committed amount wins.
    pub async fn set_or_update_budget(
        &self,
        user_id: i32,
        input: BudgetUpsert,
    ) -> ResultEngine<Budget> {
        let amount = validate_amount(input.amount)?;
        let category = normalize_required_text(&input.category, "category", 50)?;
        month_window(input.year, input.month)?;

        with_tx!(self, |tx| {
            async {
                let existing = budgets::Entity::find()
                    .filter(budgets::Column::UserId.eq(user_id))
                    .filter(budgets::Column::Category.eq(category.clone()))
                    .filter(budgets::Column::Month.eq(input.month as i32))
                    .filter(budgets::Column::Year.eq(input.year))
                    .one(&tx)
                    .await?;

                let saved = match existing {
                    Some(model) => {
                        let mut active: budgets::ActiveModel = model.into();
                        active.amount = ActiveValue::Set(amount);
                        active.update(&tx).await?
                    }
                    None => {
                        let active = budgets::ActiveModel {
                            user_id: ActiveValue::Set(user_id),
                            category: ActiveValue::Set(category.clone()),
                            amount: ActiveValue::Set(amount),
                            month: ActiveValue::Set(input.month as i32),
                            year: ActiveValue::Set(input.year),
                            ..Default::default()
                        };
                        active.insert(&tx).await?
                    }
                };

                Ok(Budget::from(saved))
            }
            .await
        })
    }

    /// Consumption status of every budget of the month.
    ///
    /// Expenses are matched by category within the calendar month of their
    /// `created_at` (not a rolling window). Output order follows the budget
    /// list.
    pub async fn budget_status_for_month(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
    ) -> ResultEngine<Vec<BudgetStatusEntry>> {
        let window = month_window(year, month)?;
        let budgets = self.budgets_for_month(user_id, year, month).await?;
        if budgets.is_empty() {
            return Ok(Vec::new());
        }

        let categories: Vec<String> = budgets.iter().map(|b| b.category.clone()).collect();
        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::CreatedAt.gte(window.start))
            .filter(expenses::Column::CreatedAt.lt(window.end))
            .filter(expenses::Column::Category.is_in(categories))
            .all(&self.database)
            .await?;

        let mut spent_by_category: HashMap<String, Decimal> = HashMap::new();
        for model in &expense_models {
            *spent_by_category
                .entry(model.category.clone())
                .or_insert(Decimal::ZERO) += dec(model.amount);
        }

        let status = budgets
            .into_iter()
            .map(|budget| {
                let budgeted = dec(budget.amount);
                let spent = spent_by_category
                    .get(&budget.category)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                BudgetStatusEntry {
                    id: budget.id,
                    category: budget.category,
                    budgeted_amount: round2(budgeted),
                    spent_amount: round2(spent),
                    remaining_amount: round2(budgeted - spent),
                    percentage_spent: percent_of(spent, budgeted),
                }
            })
            .collect();

        Ok(status)
    }

    /// 50/30/20 status for one calendar month against a given total income.
    ///
    /// `total_income <= 0` is a degenerate input, not an error: the all-zero
    /// default structure comes back regardless of expense data.
    pub async fn rule_status(
        &self,
        user_id: i32,
        year: i32,
        month: u32,
        total_income: f64,
    ) -> ResultEngine<RuleStatus> {
        let window = month_window(year, month)?;

        if total_income <= 0.0 {
            return Ok(RuleStatus::zero(total_income));
        }

        let expense_models = expenses::Entity::find()
            .filter(expenses::Column::UserId.eq(user_id))
            .filter(expenses::Column::CreatedAt.gte(window.start))
            .filter(expenses::Column::CreatedAt.lt(window.end))
            .all(&self.database)
            .await?;

        let mut needs = Decimal::ZERO;
        let mut wants = Decimal::ZERO;
        let mut savings = Decimal::ZERO;
        let mut unclassified = Decimal::ZERO;
        for model in &expense_models {
            let amount = dec(model.amount);
            match model.rule_category.as_deref().map(RuleCategory::try_from) {
                Some(Ok(RuleCategory::Needs)) => needs += amount,
                Some(Ok(RuleCategory::Wants)) => wants += amount,
                Some(Ok(RuleCategory::Savings)) => savings += amount,
                // Unknown stored tags count as unclassified rather than
                // failing the whole report.
                Some(Err(_)) | None => unclassified += amount,
            }
        }

        let income = dec(total_income);
        let bucket = |target: u32, spent: Decimal| RuleBucket {
            budgeted_percent: target,
            spent_percent: percent_of(spent, income),
            spent_amount: round2(spent),
        };

        Ok(RuleStatus {
            needs: bucket(NEEDS_TARGET_PERCENT, needs),
            wants: bucket(WANTS_TARGET_PERCENT, wants),
            savings_expenses: bucket(SAVINGS_TARGET_PERCENT, savings),
            unclassified_amount: round2(unclassified),
            total_income: round2(income),
        })
    }
}
