//! List filters behind each module's toolbar.
//!
//! Every filter keeps stored order and borrows from the input slice. Text
//! terms match case-insensitively as substrings; an empty term matches
//! everything. `None` in a field means "all".

use crate::model::book::{Book, BookStatus};
use crate::model::event::Event;
use crate::model::faith::{BibleReading, Prayer};
use crate::model::finance::{FinancialTransaction, TransactionType};
use crate::model::goal::{Goal, GoalType};
use crate::model::project::{ActivityStatus, Project};
use crate::model::task::{Priority, Task};
use chrono::{DateTime, Days, Months, NaiveDate, NaiveTime, Utc};

fn contains_term<'f>(term: &str, fields: impl IntoIterator<Item = &'f str>) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    fields
        .into_iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn matches<T: PartialEq>(wanted: Option<T>, actual: T) -> bool {
    wanted.map_or(true, |wanted| wanted == actual)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskStatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    status: TaskStatusFilter,
    priority: Option<Priority>,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| match status {
            TaskStatusFilter::All => true,
            TaskStatusFilter::Active => !task.completed,
            TaskStatusFilter::Completed => task.completed,
        })
        .filter(|task| matches(priority, task.priority))
        .collect()
}

pub fn filter_projects(projects: &[Project], status: Option<ActivityStatus>) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| matches(status, project.status))
        .collect()
}

pub fn filter_goals(
    goals: &[Goal],
    status: Option<ActivityStatus>,
    kind: Option<GoalType>,
) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|goal| matches(status, goal.status) && matches(kind, goal.kind))
        .collect()
}

/// Books in `status` whose title or author contains `term`.
pub fn filter_books<'a>(
    books: &'a [Book],
    status: Option<BookStatus>,
    term: &str,
) -> Vec<&'a Book> {
    books
        .iter()
        .filter(|book| matches(status, book.status))
        .filter(|book| contains_term(term, [book.title.as_str(), book.author.as_str()]))
        .collect()
}

/// Look-back window for the finance list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    All,
    Week,
    Month,
    Year,
}

impl DateRange {
    /// Earliest included instant: midnight of the same calendar day one
    /// week, month or year before `now`. `None` for [`DateRange::All`].
    pub fn since(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let today = now.date_naive();
        let start = match self {
            Self::All => return None,
            Self::Week => today.checked_sub_days(Days::new(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        }?;
        Some(start.and_time(NaiveTime::MIN).and_utc())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFilter<'a> {
    pub kind: Option<TransactionType>,
    pub category: Option<&'a str>,
    pub range: DateRange,
    /// Matched against description and category.
    pub term: &'a str,
}

pub fn filter_transactions<'a>(
    transactions: &'a [FinancialTransaction],
    filter: &TransactionFilter<'_>,
    now: DateTime<Utc>,
) -> Vec<&'a FinancialTransaction> {
    let since = filter.range.since(now);
    transactions
        .iter()
        .filter(|tx| matches(filter.kind, tx.kind))
        .filter(|tx| matches(filter.category, tx.category.as_str()))
        .filter(|tx| since.map_or(true, |since| tx.date >= since))
        .filter(|tx| {
            let fields = [tx.description.as_str(), tx.category.as_str()];
            contains_term(filter.term, fields)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PrayerStatusFilter {
    #[default]
    All,
    Answered,
    Pending,
}

/// Prayers by answered state and category; `term` also matches tags.
pub fn filter_prayers<'a>(
    prayers: &'a [Prayer],
    status: PrayerStatusFilter,
    category: Option<&str>,
    term: &str,
) -> Vec<&'a Prayer> {
    prayers
        .iter()
        .filter(|prayer| match status {
            PrayerStatusFilter::All => true,
            PrayerStatusFilter::Answered => prayer.answered,
            PrayerStatusFilter::Pending => !prayer.answered,
        })
        .filter(|prayer| matches(category, prayer.category.as_str()))
        .filter(|prayer| {
            let fields = [prayer.title.as_str(), prayer.content.as_str()];
            contains_term(
                term,
                fields
                    .into_iter()
                    .chain(prayer.tags.iter().map(String::as_str)),
            )
        })
        .collect()
}

/// Readings on `plan` whose book name or notes contain `term`.
pub fn filter_bible_readings<'a>(
    readings: &'a [BibleReading],
    plan: Option<&str>,
    term: &str,
) -> Vec<&'a BibleReading> {
    readings
        .iter()
        .filter(|reading| plan.map_or(true, |plan| reading.plan.as_deref() == Some(plan)))
        .filter(|reading| contains_term(term, [reading.book.as_str(), reading.notes.as_str()]))
        .collect()
}

/// Events touching `day`; multi-day events appear on every day they span.
pub fn events_on(events: &[Event], day: NaiveDate) -> Vec<&Event> {
    events.iter().filter(|event| event.occurs_on(day)).collect()
}

/// Events starting at or after `now`, soonest first, at most `limit`.
pub fn upcoming_events(events: &[Event], now: DateTime<Utc>, limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|event| event.start >= now).collect();
    upcoming.sort_by_key(|event| event.start);
    upcoming.truncate(limit);
    upcoming
}
