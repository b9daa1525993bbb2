pub use budgets::{Budget, BudgetUpsert};
pub use error::EngineError;
pub use expenses::{Expense, NewExpense, RuleCategory};
pub use incomes::{Income, IncomeUpdate, NewIncome};
pub use ops::{Engine, EngineBuilder};
pub use reports::{
    BiggestExpense, BudgetStatusEntry, CategorySpend, RuleBucket, RuleStatus, WeeklySnapshot,
};
pub use weekly_focus::WeeklyFocus;

pub mod budgets;
mod error;
pub mod expenses;
pub mod incomes;
mod money;
mod ops;
mod period;
mod reports;
pub mod users;
pub mod weekly_focus;

type ResultEngine<T> = Result<T, EngineError>;
