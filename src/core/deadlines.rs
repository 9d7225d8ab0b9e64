use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::error::CoreError;
use super::types::Deadline;

pub const DEFAULT_DEADLINE_LIMIT: usize = 5;

fn calendar_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// The static SARS calendar for the 2024/25 tax year.
pub fn sars_calendar() -> Vec<Deadline> {
    let entries = [
        ("Start of Tax Year", 2024, 3, 1, "New tax year begins."),
        (
            "Tax Season Opens",
            2024,
            7,
            1,
            "SARS opens for tax return submissions.",
        ),
        (
            "Provisional Tax 1st Period",
            2024,
            8,
            31,
            "First provisional tax payment due.",
        ),
        (
            "Tax Season Closes (Non-provisional)",
            2024,
            10,
            21,
            "Deadline for non-provisional taxpayers.",
        ),
        (
            "Tax Season Closes (Provisional)",
            2025,
            1,
            20,
            "Deadline for provisional taxpayers.",
        ),
        (
            "Provisional Tax 2nd Period",
            2025,
            2,
            28,
            "Second provisional tax payment due.",
        ),
    ];
    entries
        .into_iter()
        .map(|(label, year, month, day, description)| Deadline {
            label: label.to_string(),
            date: calendar_date(year, month, day),
            description: description.to_string(),
            user_defined: false,
        })
        .collect()
}

/// User-added reminders. The caller owns loading and saving; the book is an
/// in-memory value passed by reference into the merger.
#[derive(Debug, Default, Clone)]
pub struct ReminderBook {
    reminders: Vec<Deadline>,
}

impl ReminderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a book from persisted entries, forcing the user-defined tag
    /// and dropping key duplicates within the list itself.
    pub fn from_entries(entries: impl IntoIterator<Item = Deadline>) -> Self {
        let mut book = Self::new();
        for entry in entries {
            if !book.contains(&entry.label, entry.date) {
                book.reminders.push(Deadline {
                    user_defined: true,
                    ..entry
                });
            }
        }
        book
    }

    pub fn contains(&self, label: &str, date: NaiveDate) -> bool {
        self.reminders
            .iter()
            .any(|d| d.label == label && d.date == date)
    }

    /// Rejects a reminder whose (label, date) collides with any static
    /// deadline or already-stored reminder.
    pub fn add(
        &mut self,
        statics: &[Deadline],
        label: &str,
        date: NaiveDate,
        description: &str,
    ) -> Result<(), CoreError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(CoreError::InvalidInput(
                "reminder label must not be empty".to_string(),
            ));
        }
        let clashes_static = statics.iter().any(|d| d.label == label && d.date == date);
        if clashes_static || self.contains(label, date) {
            return Err(CoreError::DuplicateReminder {
                label: label.to_string(),
                date,
            });
        }
        self.reminders.push(Deadline {
            label: label.to_string(),
            date,
            description: description.to_string(),
            user_defined: true,
        });
        Ok(())
    }

    /// Removes the reminder with the given key, reporting whether one existed.
    pub fn remove(&mut self, label: &str, date: NaiveDate) -> bool {
        let before = self.reminders.len();
        self.reminders
            .retain(|d| !(d.label == label && d.date == date));
        self.reminders.len() != before
    }

    pub fn entries(&self) -> &[Deadline] {
        &self.reminders
    }
}

/// Merges the static calendar with user reminders, deduplicated by
/// (label, date). A user entry always supersedes a static one with the same
/// key; this is source priority, not input ordering. The result holds only
/// dates strictly after `now`, ascending, truncated to `limit`.
pub fn upcoming_deadlines(
    statics: &[Deadline],
    book: &ReminderBook,
    now: NaiveDate,
    limit: usize,
) -> Vec<Deadline> {
    let mut merged: BTreeMap<(NaiveDate, String), Deadline> = BTreeMap::new();
    for deadline in statics {
        merged
            .entry((deadline.date, deadline.label.clone()))
            .or_insert_with(|| Deadline {
                user_defined: false,
                ..deadline.clone()
            });
    }
    for reminder in book.entries() {
        merged.insert(
            (reminder.date, reminder.label.clone()),
            Deadline {
                user_defined: true,
                ..reminder.clone()
            },
        );
    }

    merged
        .into_values()
        .filter(|d| d.date > now)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("valid date")
    }

    #[test]
    fn calendar_is_deduplicated_and_covers_the_tax_year() {
        let statics = sars_calendar();
        assert_eq!(statics.len(), 6);
        let mut keys: Vec<_> = statics.iter().map(|d| (d.date, &d.label)).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 6);
        assert!(statics.iter().all(|d| !d.user_defined));
    }

    #[test]
    fn added_reminder_appears_exactly_once() {
        let statics = sars_calendar();
        let mut book = ReminderBook::new();
        book.add(&statics, "Filing", date("2025-06-01"), "Personal filing")
            .expect("no collision");

        let upcoming = upcoming_deadlines(
            &statics,
            &book,
            date("2025-05-01"),
            DEFAULT_DEADLINE_LIMIT,
        );
        let filings: Vec<_> = upcoming.iter().filter(|d| d.label == "Filing").collect();
        assert_eq!(filings.len(), 1);
        assert!(filings[0].user_defined);
    }

    #[test]
    fn duplicate_reminder_is_rejected() {
        let statics = sars_calendar();
        let mut book = ReminderBook::new();
        book.add(&statics, "Filing", date("2025-06-01"), "first")
            .expect("no collision");
        let err = book
            .add(&statics, "Filing", date("2025-06-01"), "second")
            .expect_err("must collide");
        assert!(matches!(err, CoreError::DuplicateReminder { .. }));
    }

    #[test]
    fn reminder_colliding_with_static_deadline_is_rejected() {
        let statics = sars_calendar();
        let mut book = ReminderBook::new();
        let err = book
            .add(&statics, "Tax Season Opens", date("2024-07-01"), "mine")
            .expect_err("must collide with the calendar");
        assert!(matches!(err, CoreError::DuplicateReminder { .. }));
    }

    #[test]
    fn empty_label_is_rejected() {
        let mut book = ReminderBook::new();
        assert!(matches!(
            book.add(&[], "   ", date("2025-06-01"), ""),
            Err(CoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn user_entry_supersedes_static_with_same_key() {
        let statics = sars_calendar();
        // Bypass add() to simulate a reminder persisted before the calendar
        // gained the same entry.
        let book = ReminderBook::from_entries([Deadline {
            label: "Tax Season Opens".to_string(),
            date: date("2024-07-01"),
            description: "My own note".to_string(),
            user_defined: false,
        }]);

        let upcoming = upcoming_deadlines(&statics, &book, date("2024-06-01"), 10);
        let matches: Vec<_> = upcoming
            .iter()
            .filter(|d| d.label == "Tax Season Opens")
            .collect();
        assert_eq!(matches.len(), 1);
        assert!(matches[0].user_defined);
        assert_eq!(matches[0].description, "My own note");
    }

    #[test]
    fn past_deadlines_are_filtered_and_result_is_limited() {
        let statics = sars_calendar();
        let book = ReminderBook::new();

        let upcoming = upcoming_deadlines(&statics, &book, date("2024-07-01"), 2);
        assert_eq!(upcoming.len(), 2);
        // 2024-07-01 itself is not strictly after now.
        assert_eq!(upcoming[0].date, date("2024-08-31"));
        assert_eq!(upcoming[1].date, date("2024-10-21"));
    }

    #[test]
    fn merged_result_is_sorted_ascending_by_date() {
        let statics = sars_calendar();
        let mut book = ReminderBook::new();
        book.add(&statics, "Mid-year check", date("2024-09-15"), "")
            .expect("no collision");

        let upcoming = upcoming_deadlines(&statics, &book, date("2024-01-01"), 10);
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(upcoming.len(), 7);
    }

    #[test]
    fn remove_drops_only_the_matching_reminder() {
        let mut book = ReminderBook::new();
        book.add(&[], "Filing", date("2025-06-01"), "")
            .expect("no collision");
        book.add(&[], "Review", date("2025-07-01"), "")
            .expect("no collision");

        assert!(book.remove("Filing", date("2025-06-01")));
        assert!(!book.remove("Filing", date("2025-06-01")));
        assert_eq!(book.entries().len(), 1);
        assert_eq!(book.entries()[0].label, "Review");
    }
}
