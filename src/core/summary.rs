use chrono::{Days, NaiveDate};

use super::types::{FinanceSummary, Transaction, TransactionKind};

/// Dashboard totals over a transaction snapshot. The 30-day window is
/// `(today - 30, today]`.
pub fn summarize(transactions: &[Transaction], today: NaiveDate) -> FinanceSummary {
    let window_start = today
        .checked_sub_days(Days::new(30))
        .unwrap_or(NaiveDate::MIN);

    let mut total_income = 0.0;
    let mut total_expense = 0.0;
    let mut last_30_days_expense = 0.0;
    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => {
                total_expense += transaction.amount;
                if transaction.date > window_start && transaction.date <= today {
                    last_30_days_expense += transaction.amount;
                }
            }
        }
    }

    FinanceSummary {
        total_income,
        total_expense,
        balance: total_income - total_expense,
        last_30_days_expense,
        transaction_count: transactions.len(),
    }
}
