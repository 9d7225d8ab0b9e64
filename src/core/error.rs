use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("a reminder or deadline named '{label}' on {date} already exists")]
    DuplicateReminder { label: String, date: NaiveDate },
}

/// Rejects negative and non-finite monetary values instead of coercing them.
pub(crate) fn ensure_amount(name: &str, value: f64) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
