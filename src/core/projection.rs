use super::error::{CoreError, ensure_amount};
use super::types::Investment;

/// Month-by-month compounded balance for an investment. A lump sum is added
/// in month 1 only; a monthly contribution is added every month. Interest
/// compounds monthly at `annual_rate_pct / 12`; each entry is the rounded
/// end-of-month balance. `months == 0` yields an empty series. A negative
/// rate is allowed and models depreciation.
pub fn project(investment: &Investment, months: u32) -> Result<Vec<f64>, CoreError> {
    ensure_amount("investment amount", investment.amount)?;
    if !investment.annual_rate_pct.is_finite() {
        return Err(CoreError::InvalidInput(format!(
            "annual interest rate must be a number, got {}",
            investment.annual_rate_pct
        )));
    }

    let monthly_rate = investment.annual_rate_pct / 100.0 / 12.0;
    let mut series = Vec::with_capacity(months as usize);
    let mut balance = 0.0_f64;
    for month in 1..=months {
        if investment.monthly_contribution || month == 1 {
            balance += investment.amount;
        }
        balance *= 1.0 + monthly_rate;
        series.push(balance.round());
    }
    Ok(series)
}
