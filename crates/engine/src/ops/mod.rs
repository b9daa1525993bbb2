use sea_orm::DatabaseConnection;
use unicode_normalization::UnicodeNormalization;

use crate::{EngineError, ResultEngine};

mod budgets;
mod expenses;
mod incomes;
mod reports;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

/// Validate that an amount is a positive, finite number of currency units.
fn validate_amount(amount: f64) -> ResultEngine<f64> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::Validation(
            "amount must be greater than 0".to_string(),
        ));
    }
    Ok(amount)
}

/// Trim, NFC-normalize and length-check a required text field.
fn normalize_required_text(value: &str, label: &str, max: usize) -> ResultEngine<String> {
    let trimmed: String = value.trim().nfc().collect();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    if trimmed.chars().count() > max {
        return Err(EngineError::Validation(format!(
            "{label} must not exceed {max} characters"
        )));
    }
    Ok(trimmed)
}

/// Trim and NFC-normalize an optional text field; empty collapses to `None`.
fn normalize_optional_text(
    value: Option<&str>,
    label: &str,
    max: usize,
) -> ResultEngine<Option<String>> {
    let Some(raw) = value else { return Ok(None) };
    let trimmed: String = raw.trim().nfc().collect();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(EngineError::Validation(format!(
            "{label} must not exceed {max} characters"
        )));
    }
    Ok(Some(trimmed))
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_must_be_positive_and_finite() {
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-3.5).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
        assert_eq!(validate_amount(12.5).unwrap(), 12.5);
    }

    #[test]
    fn required_text_is_trimmed_and_capped() {
        assert_eq!(
            normalize_required_text("  Food  ", "category", 50).unwrap(),
            "Food"
        );
        assert!(normalize_required_text("   ", "category", 50).is_err());
        assert!(normalize_required_text(&"x".repeat(51), "category", 50).is_err());
    }

    #[test]
    fn optional_text_collapses_empty_to_none() {
        assert_eq!(
            normalize_optional_text(Some("  "), "source", 100).unwrap(),
            None
        );
        assert_eq!(normalize_optional_text(None, "source", 100).unwrap(), None);
        assert_eq!(
            normalize_optional_text(Some(" bank "), "source", 100).unwrap(),
            Some("bank".to_string())
        );
    }
}
