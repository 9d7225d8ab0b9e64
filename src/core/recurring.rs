use std::collections::BTreeMap;

use chrono::{Months, NaiveDate};

use super::types::{RecurringGroup, Transaction, TransactionKind, UpcomingBill};

pub const MIN_OCCURRENCES: usize = 3;
pub const MIN_GAP_DAYS: i64 = 25;
pub const MAX_GAP_DAYS: i64 = 35;
/// Lead time within which a projected charge counts as an upcoming bill.
pub const BILL_WINDOW_DAYS: i64 = 10;

/// Grouping key: category label, falling back to notes, then a catch-all
/// bucket. First non-empty field wins; comparison is case-insensitive.
fn group_key(transaction: &Transaction) -> String {
    [Some(transaction.label.as_str()), transaction.notes.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|field| !field.is_empty())
        .unwrap_or("other")
        .to_lowercase()
}

/// Gaps of exactly 0 days (same-day repeats) fail the check: duplicates on
/// one day are not a monthly cadence.
fn is_monthly_cadence(sorted: &[&Transaction]) -> bool {
    sorted.windows(2).all(|pair| {
        let gap = (pair[1].date - pair[0].date).num_days();
        (MIN_GAP_DAYS..=MAX_GAP_DAYS).contains(&gap)
    })
}

/// Flags expense groups that recur at a near-monthly cadence: at least
/// three members whose consecutive day-gaps all fall within [25, 35].
/// Output is ordered by key, independent of input order.
pub fn detect_recurring(transactions: &[Transaction]) -> Vec<RecurringGroup> {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for transaction in transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense)
    {
        groups
            .entry(group_key(transaction))
            .or_default()
            .push(transaction);
    }

    let mut recurring = Vec::new();
    for (key, mut members) in groups {
        if members.len() < MIN_OCCURRENCES {
            continue;
        }
        members.sort_by_key(|t| t.date);
        if !is_monthly_cadence(&members) {
            continue;
        }
        let last = members[members.len() - 1];
        recurring.push(RecurringGroup {
            key,
            last_amount: last.amount,
            last_date: last.date,
            count: members.len(),
            monthly: true,
        });
    }
    recurring
}

/// Projects each recurring group's next charge one month after its last
/// payment and keeps the ones due within the next `BILL_WINDOW_DAYS`,
/// soonest first.
pub fn upcoming_bills(groups: &[RecurringGroup], today: NaiveDate) -> Vec<UpcomingBill> {
    let mut bills: Vec<UpcomingBill> = groups
        .iter()
        .filter(|g| g.monthly)
        .filter_map(|group| {
            let due_date = group.last_date.checked_add_months(Months::new(1))?;
            let lead = (due_date - today).num_days();
            (lead > 0 && lead <= BILL_WINDOW_DAYS).then(|| UpcomingBill {
                key: group.key.clone(),
                amount: group.last_amount,
                due_date,
            })
        })
        .collect();
    bills.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.key.cmp(&b.key))
    });
    bills
}
