mod deadlines;
mod error;
mod projection;
mod recurring;
mod summary;
mod tax;
mod types;

pub use deadlines::{DEFAULT_DEADLINE_LIMIT, ReminderBook, sars_calendar, upcoming_deadlines};
pub use error::CoreError;
pub use projection::project;
pub use recurring::{
    BILL_WINDOW_DAYS, MAX_GAP_DAYS, MIN_GAP_DAYS, MIN_OCCURRENCES, detect_recurring,
    upcoming_bills,
};
pub use summary::summarize;
pub use tax::{PRIMARY_REBATE, TAX_BRACKETS, annual_tax, estimate_from_transactions, monthly_tax};
pub use types::{
    Deadline, FinanceSummary, Investment, RecurringGroup, TaxBracket, TaxEstimate, Transaction,
    TransactionKind, UpcomingBill,
};
