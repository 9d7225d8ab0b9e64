use std::collections::HashSet;

use chrono::Datelike;

use super::error::{CoreError, ensure_amount};
use super::types::{TaxBracket, TaxEstimate, Transaction, TransactionKind};

/// 2024 SARS brackets for individuals under 65, as monthly thresholds.
pub const TAX_BRACKETS: [TaxBracket; 7] = [
    TaxBracket {
        monthly_ceiling: Some(237_100.0 / 12.0),
        rate: 0.18,
        monthly_floor: 0.0,
        monthly_base_tax: 0.0,
    },
    TaxBracket {
        monthly_ceiling: Some(370_500.0 / 12.0),
        rate: 0.26,
        monthly_floor: 237_100.0 / 12.0,
        monthly_base_tax: 42_678.0 / 12.0,
    },
    TaxBracket {
        monthly_ceiling: Some(512_800.0 / 12.0),
        rate: 0.31,
        monthly_floor: 370_500.0 / 12.0,
        monthly_base_tax: 77_362.0 / 12.0,
    },
    TaxBracket {
        monthly_ceiling: Some(673_000.0 / 12.0),
        rate: 0.36,
        monthly_floor: 512_800.0 / 12.0,
        monthly_base_tax: 121_475.0 / 12.0,
    },
    TaxBracket {
        monthly_ceiling: Some(857_900.0 / 12.0),
        rate: 0.39,
        monthly_floor: 673_000.0 / 12.0,
        monthly_base_tax: 179_147.0 / 12.0,
    },
    TaxBracket {
        monthly_ceiling: Some(1_817_000.0 / 12.0),
        rate: 0.41,
        monthly_floor: 857_900.0 / 12.0,
        monthly_base_tax: 251_258.0 / 12.0,
    },
    TaxBracket {
        monthly_ceiling: None,
        rate: 0.45,
        monthly_floor: 1_817_000.0 / 12.0,
        monthly_base_tax: 644_489.0 / 12.0,
    },
];

/// Annual primary rebate, subtracted after the bracket computation.
pub const PRIMARY_REBATE: f64 = 17_235.0;

pub fn annual_tax(income: f64) -> Result<f64, CoreError> {
    ensure_amount("income", income)?;

    let mut tax = 0.0;
    for bracket in &TAX_BRACKETS {
        let within = match bracket.monthly_ceiling {
            Some(ceiling) => income <= ceiling * 12.0,
            None => true,
        };
        if within {
            tax = bracket.monthly_base_tax * 12.0
                + (income - bracket.monthly_floor * 12.0) * bracket.rate;
            break;
        }
    }

    Ok((tax - PRIMARY_REBATE).max(0.0))
}

/// Treats `monthly_income * 12` as the annual figure. For irregular income
/// this is an approximation (the rebate is a fixed annual amount), kept
/// intentionally to match the product's published estimates.
pub fn monthly_tax(monthly_income: f64) -> Result<f64, CoreError> {
    Ok(annual_tax(monthly_income * 12.0)? / 12.0)
}

/// Average monthly income over the distinct calendar months that carry
/// income, fed through the monthly estimator. Rounded to whole currency
/// units for display. No income transactions yields an all-zero estimate.
pub fn estimate_from_transactions(transactions: &[Transaction]) -> Result<TaxEstimate, CoreError> {
    let income: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Income)
        .collect();

    if income.is_empty() {
        return Ok(TaxEstimate {
            monthly_income: 0.0,
            monthly_tax: 0.0,
            annual_tax: 0.0,
        });
    }

    let mut total = 0.0;
    let mut months: HashSet<(i32, u32)> = HashSet::new();
    for t in &income {
        ensure_amount("transaction amount", t.amount)?;
        total += t.amount;
        months.insert((t.date.year(), t.date.month()));
    }

    let monthly_income = total / months.len().max(1) as f64;
    let monthly = monthly_tax(monthly_income)?;

    Ok(TaxEstimate {
        monthly_income: monthly_income.round(),
        monthly_tax: monthly.round(),
        annual_tax: (monthly * 12.0).round(),
    })
}
