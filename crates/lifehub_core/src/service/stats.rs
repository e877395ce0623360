//! Derived figures for module headers and the dashboard.
//!
//! Everything here is a pure function over records; nothing is cached.

use crate::model::academic::{AcademicCourse, Assignment};
use crate::model::book::Book;
use crate::model::faith::Prayer;
use crate::model::finance::{FinancialTransaction, TransactionType};
use crate::model::goal::Goal;
use crate::model::journal::JournalEntry;
use crate::model::project::{ActivityStatus, Project};
use crate::model::task::Task;
use chrono::{DateTime, Datelike, Utc};

const MOOD_TREND_WINDOW: usize = 7;
const MOOD_TREND_THRESHOLD: f64 = 0.5;
const NEUTRAL_MOOD: f64 = 5.0;
const TOP_EXPENSE_CATEGORIES: usize = 5;

pub(crate) fn percent(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (done as f64 / total as f64 * 100.0).round() as u32
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// Tasks

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub completed: usize,
    pub active: usize,
}

pub fn task_counts(tasks: &[Task]) -> TaskCounts {
    let completed = tasks.iter().filter(|task| task.completed).count();
    TaskCounts {
        completed,
        active: tasks.len() - completed,
    }
}

// Projects and goals

/// Share of a project's tasks that are done, as a whole percent.
pub fn project_progress(project: &Project) -> u32 {
    let done = project.tasks.iter().filter(|task| task.completed).count();
    percent(done, project.tasks.len())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
    pub paused: usize,
}

impl StatusCounts {
    fn tally(statuses: impl Iterator<Item = ActivityStatus>) -> Self {
        statuses.fold(Self::default(), |mut counts, status| {
            match status {
                ActivityStatus::Active => counts.active += 1,
                ActivityStatus::Completed => counts.completed += 1,
                ActivityStatus::Paused => counts.paused += 1,
            }
            counts
        })
    }
}

pub fn project_status_counts(projects: &[Project]) -> StatusCounts {
    StatusCounts::tally(projects.iter().map(|project| project.status))
}

/// Mean of [`project_progress`] across projects, 0 when there are none.
pub fn average_project_progress(projects: &[Project]) -> u32 {
    average_percent(projects.iter().map(project_progress))
}

pub fn goal_status_counts(goals: &[Goal]) -> StatusCounts {
    StatusCounts::tally(goals.iter().map(|goal| goal.status))
}

pub fn average_goal_progress(goals: &[Goal]) -> u32 {
    average_percent(goals.iter().map(|goal| goal.progress))
}

pub(crate) fn average_percent(values: impl Iterator<Item = u32>) -> u32 {
    let (sum, count) = values.fold((0u64, 0u64), |(sum, count), value| {
        (sum + u64::from(value), count + 1)
    });
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u32
}

/// Returns `goal` with one milestone flipped and progress recomputed.
///
/// Completing a milestone stamps `completed_date`; reopening clears it.
/// Reaching 100% marks the goal completed. Unknown milestone ids only
/// trigger the recompute.
pub fn toggle_milestone(goal: &Goal, milestone_id: &str, now: DateTime<Utc>) -> Goal {
    let mut updated = goal.clone();
    for milestone in updated
        .milestones
        .iter_mut()
        .filter(|milestone| milestone.id == milestone_id)
    {
        milestone.completed = !milestone.completed;
        milestone.completed_date = milestone.completed.then_some(now);
    }

    let done = updated
        .milestones
        .iter()
        .filter(|milestone| milestone.completed)
        .count();
    updated.progress = percent(done, updated.milestones.len());
    if updated.progress == 100 {
        updated.status = ActivityStatus::Completed;
    }
    updated
}

// Books

pub fn book_progress(book: &Book) -> u32 {
    if book.total_pages == 0 {
        return 0;
    }
    (f64::from(book.current_page) / f64::from(book.total_pages) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingStats {
    pub books_finished: usize,
    pub total_pages: u64,
    /// Mean rating rounded to one decimal; unrated books count as 0.
    pub average_rating: f64,
}

/// Books whose `end_date` falls in `year`.
pub fn reading_stats(books: &[Book], year: i32) -> ReadingStats {
    let finished: Vec<&Book> = books
        .iter()
        .filter(|book| book.end_date.is_some_and(|end| end.year() == year))
        .collect();
    if finished.is_empty() {
        return ReadingStats::default();
    }

    let total_pages = finished
        .iter()
        .map(|book| u64::from(book.total_pages))
        .sum();
    let rating_sum: f64 = finished
        .iter()
        .map(|book| f64::from(book.rating.unwrap_or(0)))
        .sum();

    ReadingStats {
        books_finished: finished.len(),
        total_pages,
        average_rating: round_to(rating_sum / finished.len() as f64, 1),
    }
}

// Finance

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FinanceSummary {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

pub fn finance_summary(transactions: &[FinancialTransaction]) -> FinanceSummary {
    let total = |kind: TransactionType| -> f64 {
        transactions
            .iter()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    };
    let income = total(TransactionType::Income);
    let expenses = total(TransactionType::Expense);
    FinanceSummary {
        income,
        expenses,
        balance: income - expenses,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    /// Percent of all expenses.
    pub share: f64,
}

/// Largest expense categories, biggest first, at most five.
pub fn top_expense_categories(transactions: &[FinancialTransaction]) -> Vec<CategoryShare> {
    let mut totals: Vec<(String, f64)> = Vec::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.kind == TransactionType::Expense)
    {
        match totals.iter_mut().find(|(category, _)| *category == tx.category) {
            Some((_, amount)) => *amount += tx.amount,
            None => totals.push((tx.category.clone(), tx.amount)),
        }
    }

    let all_expenses: f64 = totals.iter().map(|(_, amount)| amount).sum();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1));
    totals
        .into_iter()
        .take(TOP_EXPENSE_CATEGORIES)
        .map(|(category, amount)| CategoryShare {
            share: if all_expenses > 0.0 {
                amount / all_expenses * 100.0
            } else {
                0.0
            },
            category,
            amount,
        })
        .collect()
}

// Academic

/// Credit-weighted mean of each graded course's weighted score ratio,
/// rounded to two decimals.
///
/// Courses without grades (or with zero total weight) are skipped; the
/// result is 0 when no credits remain.
pub fn gpa(courses: &[AcademicCourse]) -> f64 {
    let mut points = 0.0;
    let mut credits = 0.0;
    for course in courses {
        let total_weight: f64 = course.grades.iter().map(|grade| grade.weight).sum();
        if course.grades.is_empty() || total_weight == 0.0 {
            continue;
        }
        let weighted: f64 = course
            .grades
            .iter()
            .filter(|grade| grade.max_score > 0.0)
            .map(|grade| grade.score / grade.max_score * grade.weight)
            .sum();
        points += weighted / total_weight * course.credits;
        credits += course.credits;
    }

    if credits > 0.0 {
        round_to(points / credits, 2)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingAssignment<'a> {
    pub course: &'a AcademicCourse,
    pub assignment: &'a Assignment,
}

/// Unsubmitted assignments due at or after `now`, soonest first.
pub fn upcoming_assignments(
    courses: &[AcademicCourse],
    now: DateTime<Utc>,
) -> Vec<UpcomingAssignment<'_>> {
    let mut upcoming: Vec<UpcomingAssignment<'_>> = courses
        .iter()
        .flat_map(|course| {
            course
                .assignments
                .iter()
                .filter(|assignment| !assignment.submitted && assignment.due_date >= now)
                .map(move |assignment| UpcomingAssignment { course, assignment })
        })
        .collect();
    upcoming.sort_by_key(|item| item.assignment.due_date);
    upcoming
}

pub fn total_credits(courses: &[AcademicCourse]) -> f64 {
    courses.iter().map(|course| course.credits).sum()
}

// Journal

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
}

impl MoodTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodStats {
    pub average: f64,
    pub trend: MoodTrend,
}

/// Average mood and the trend of the latest seven entries against the
/// seven before them, in stored order.
pub fn mood_stats(entries: &[JournalEntry]) -> MoodStats {
    if entries.is_empty() {
        return MoodStats {
            average: NEUTRAL_MOOD,
            trend: MoodTrend::Stable,
        };
    }

    let moods: Vec<f64> = entries.iter().map(|entry| f64::from(entry.mood)).collect();
    let mean = |values: &[f64]| values.iter().sum::<f64>() / values.len() as f64;
    let average = mean(&moods);

    let recent_start = moods.len().saturating_sub(MOOD_TREND_WINDOW);
    let previous_start = recent_start.saturating_sub(MOOD_TREND_WINDOW);
    let recent = &moods[recent_start..];
    let previous = &moods[previous_start..recent_start];
    if previous.is_empty() {
        return MoodStats {
            average,
            trend: MoodTrend::Stable,
        };
    }

    let (recent_avg, previous_avg) = (mean(recent), mean(previous));
    let trend = if recent_avg > previous_avg + MOOD_TREND_THRESHOLD {
        MoodTrend::Improving
    } else if recent_avg < previous_avg - MOOD_TREND_THRESHOLD {
        MoodTrend::Declining
    } else {
        MoodTrend::Stable
    };
    MoodStats { average, trend }
}

// Prayers

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrayerStats {
    pub total: usize,
    pub answered: usize,
    pub pending: usize,
    /// Prayers dated in the calendar month of `now`.
    pub this_month: usize,
}

pub fn prayer_stats(prayers: &[Prayer], now: DateTime<Utc>) -> PrayerStats {
    let answered = prayers.iter().filter(|prayer| prayer.answered).count();
    let this_month = prayers
        .iter()
        .filter(|prayer| prayer.date.year() == now.year() && prayer.date.month() == now.month())
        .count();
    PrayerStats {
        total: prayers.len(),
        answered,
        pending: prayers.len() - answered,
        this_month,
    }
}

#[cfg(test)]
mod tests {
    use super::{percent, round_to};

    #[test]
    fn percent_rounds_half_up_and_guards_empty() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn round_to_keeps_requested_decimals() {
        assert_eq!(round_to(3.14159, 2), 3.14);
        assert_eq!(round_to(4.25, 1), 4.3);
    }
}
