use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod expense {
    use super::*;

    /// Request body for recording an expense.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount: f64,
        pub category: Option<String>,
        /// One of "Needs", "Wants", "Savings".
        pub rule_category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: i32,
        pub user_id: i32,
        pub description: String,
        pub amount: f64,
        pub category: String,
        pub rule_category: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod income {
    use super::*;

    /// Request body for recording an income.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        pub description: String,
        pub amount: f64,
        pub source: Option<String>,
    }

    /// Request body for replacing an income. Omitting `source` clears it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeUpdate {
        pub description: String,
        pub amount: f64,
        pub source: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeView {
        pub id: i32,
        pub user_id: i32,
        pub description: String,
        pub amount: f64,
        pub source: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    /// Upsert body: one budget per (category, month, year) and user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpsert {
        pub category: String,
        pub amount: f64,
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: i32,
        pub category: String,
        pub amount: f64,
        pub month: u32,
        pub year: i32,
    }

    /// Consumption of one monthly budget.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetStatusEntry {
        pub id: i32,
        pub category: String,
        pub budgeted_amount: f64,
        pub spent_amount: f64,
        pub remaining_amount: f64,
        pub percentage_spent: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RuleBucket {
        pub budgeted_percent: u32,
        pub spent_percent: f64,
        pub spent_amount: f64,
    }

    /// 50/30/20 report for one calendar month.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RuleStatus {
        pub needs: RuleBucket,
        pub wants: RuleBucket,
        pub savings_expenses: RuleBucket,
        pub unclassified_amount: f64,
        pub total_income: f64,
    }
}

pub mod report {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySpend {
        pub category: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BiggestExpense {
        pub description: String,
        pub amount: f64,
    }

    /// Rolling 7-day snapshot.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklySnapshot {
        pub start_date_range: NaiveDate,
        pub end_date_range: NaiveDate,
        pub total_income_last_period: f64,
        pub total_expenses_last_period: f64,
        pub net_flow_last_period: f64,
        pub biggest_expense: Option<BiggestExpense>,
        pub top_spending_categories: Vec<CategorySpend>,
        pub current_focus: Option<String>,
    }

    /// Request body for setting or clearing the weekly focus. An empty
    /// string clears it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklyFocusSet {
        #[serde(rename = "focusText")]
        pub focus_text: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklyFocusView {
        pub id: i32,
        pub user_id: i32,
        pub week_start_date: NaiveDate,
        pub focus_text: String,
        pub date_set: DateTime<Utc>,
    }

    /// Response of the focus upsert; `focus` is null after a clear.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct WeeklyFocusSetResponse {
        pub focus: Option<WeeklyFocusView>,
    }
}
