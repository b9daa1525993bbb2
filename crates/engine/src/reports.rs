//! Value objects produced by the budget and report engines.
//!
//! These are plain results carrying already-rounded numbers; no framework or
//! storage types appear here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed 50/30/20 target percentages. Targets are constants by design; only
/// the actual spent percentages are computed against them.
pub const NEEDS_TARGET_PERCENT: u32 = 50;
pub const WANTS_TARGET_PERCENT: u32 = 30;
pub const SAVINGS_TARGET_PERCENT: u32 = 20;

/// Consumption of one monthly budget.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatusEntry {
    pub id: i32,
    pub category: String,
    /// Rounded to 2 decimals.
    pub budgeted_amount: f64,
    /// Rounded to 2 decimals; 0.0 when no matching expenses exist.
    pub spent_amount: f64,
    /// `budgeted - spent`, may be negative.
    pub remaining_amount: f64,
    /// Rounded to 1 decimal; 0 when the budgeted amount is 0.
    pub percentage_spent: f64,
}

/// One bucket of the 50/30/20 report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleBucket {
    pub budgeted_percent: u32,
    pub spent_percent: f64,
    pub spent_amount: f64,
}

impl RuleBucket {
    pub(crate) fn zero(budgeted_percent: u32) -> Self {
        Self {
            budgeted_percent,
            spent_percent: 0.0,
            spent_amount: 0.0,
        }
    }
}

/// Monthly spending classified under the 50/30/20 rule.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleStatus {
    pub needs: RuleBucket,
    pub wants: RuleBucket,
    pub savings_expenses: RuleBucket,
    /// Spending with no rule category, counted separately.
    pub unclassified_amount: f64,
    pub total_income: f64,
}

impl RuleStatus {
    /// All-zero structure returned for degenerate income input. Not an error.
    pub(crate) fn zero(total_income: f64) -> Self {
        Self {
            needs: RuleBucket::zero(NEEDS_TARGET_PERCENT),
            wants: RuleBucket::zero(WANTS_TARGET_PERCENT),
            savings_expenses: RuleBucket::zero(SAVINGS_TARGET_PERCENT),
            unclassified_amount: 0.0,
            total_income,
        }
    }
}

/// Per-category total within the snapshot window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub amount: f64,
}

/// The single largest expense within the snapshot window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiggestExpense {
    pub description: String,
    pub amount: f64,
}

/// Rolling 7-day financial snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeeklySnapshot {
    pub start_date_range: NaiveDate,
    pub end_date_range: NaiveDate,
    pub total_income_last_period: f64,
    pub total_expenses_last_period: f64,
    pub net_flow_last_period: f64,
    pub biggest_expense: Option<BiggestExpense>,
    /// Descending by amount, at most 3 entries.
    pub top_spending_categories: Vec<CategorySpend>,
    /// Focus of the current calendar week, independent of the rolling window.
    pub current_focus: Option<String>,
}
