use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub date: NaiveDate,
    /// Expense category or income source, depending on `kind`.
    pub label: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// One tier of the progressive income-tax table. Thresholds are stored as
/// monthly figures and scaled by 12 when compared against annual income.
/// `monthly_ceiling` of `None` marks the final, unbounded bracket.
#[derive(Debug, Clone, Copy)]
pub struct TaxBracket {
    pub monthly_ceiling: Option<f64>,
    pub rate: f64,
    pub monthly_floor: f64,
    pub monthly_base_tax: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimate {
    pub monthly_income: f64,
    pub monthly_tax: f64,
    pub annual_tax: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringGroup {
    pub key: String,
    pub last_amount: f64,
    pub last_date: NaiveDate,
    pub count: usize,
    pub monthly: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingBill {
    pub key: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub name: String,
    /// Principal, or the per-month contribution when `monthly_contribution`.
    pub amount: f64,
    #[serde(default)]
    pub monthly_contribution: bool,
    pub annual_rate_pct: f64,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deadline {
    pub label: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_defined: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    pub total_income: f64,
    pub total_expense: f64,
    pub balance: f64,
    pub last_30_days_expense: f64,
    pub transaction_count: usize,
}
