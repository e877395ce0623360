//! Planning module views: what is coming up, the current week, and month
//! and year roll-ups across tasks, events and goals.

use crate::model::event::Event;
use crate::model::goal::Goal;
use crate::model::project::ActivityStatus;
use crate::model::task::Task;
use crate::service::filters::{events_on, upcoming_events};
use crate::service::stats::{average_percent, percent};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

pub const UPCOMING_LIMIT: usize = 5;
pub const ACTIVE_GOALS_LIMIT: usize = 3;

/// Open tasks that have a due date, earliest first. Overdue tasks are kept.
pub fn upcoming_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    let mut open: Vec<&Task> = tasks
        .iter()
        .filter(|task| !task.completed && task.due_date.is_some())
        .collect();
    open.sort_by_key(|task| task.due_date);
    open.truncate(limit);
    open
}

/// First `limit` active goals in stored order.
pub fn active_goals(goals: &[Goal], limit: usize) -> Vec<&Goal> {
    goals
        .iter()
        .filter(|goal| goal.status == ActivityStatus::Active)
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overview<'a> {
    pub tasks: Vec<&'a Task>,
    pub events: Vec<&'a Event>,
    pub goals: Vec<&'a Goal>,
}

pub fn overview<'a>(
    tasks: &'a [Task],
    events: &'a [Event],
    goals: &'a [Goal],
    now: DateTime<Utc>,
) -> Overview<'a> {
    Overview {
        tasks: upcoming_tasks(tasks, UPCOMING_LIMIT),
        events: upcoming_events(events, now, UPCOMING_LIMIT),
        goals: active_goals(goals, ACTIVE_GOALS_LIMIT),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan<'a> {
    pub date: NaiveDate,
    /// Tasks due that day, done or not.
    pub tasks: Vec<&'a Task>,
    pub events: Vec<&'a Event>,
}

/// Sunday-to-Saturday week containing `anchor`.
pub fn week_overview<'a>(
    tasks: &'a [Task],
    events: &'a [Event],
    anchor: NaiveDate,
) -> Vec<DayPlan<'a>> {
    let back = u64::from(anchor.weekday().num_days_from_sunday());
    let sunday = anchor - Days::new(back);
    sunday
        .iter_days()
        .take(7)
        .map(|date| DayPlan {
            date,
            tasks: tasks
                .iter()
                .filter(|task| task.due_date.is_some_and(|due| due.date_naive() == date))
                .collect(),
            events: events_on(events, date),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthlyStats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Whole percent of tasks due this month that are done.
    pub completion_rate: u32,
    pub total_events: usize,
}

/// Tasks due and events starting in `month` (1-based) of `year`.
pub fn monthly_stats(tasks: &[Task], events: &[Event], year: i32, month: u32) -> MonthlyStats {
    let in_month = |at: DateTime<Utc>| at.year() == year && at.month() == month;
    let due: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.due_date.is_some_and(in_month))
        .collect();
    let completed_tasks = due.iter().filter(|task| task.completed).count();

    MonthlyStats {
        total_tasks: due.len(),
        completed_tasks,
        completion_rate: percent(completed_tasks, due.len()),
        total_events: events.iter().filter(|event| in_month(event.start)).count(),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearlyProgress {
    pub total_goals: usize,
    pub completed_goals: usize,
    pub average_progress: u32,
    pub total_tasks: usize,
    pub completed_tasks: usize,
}

/// Goals targeted at `year` and tasks created in it.
pub fn yearly_progress(goals: &[Goal], tasks: &[Task], year: i32) -> YearlyProgress {
    let yearly_goals: Vec<&Goal> = goals
        .iter()
        .filter(|goal| goal.target_date.year() == year)
        .collect();
    let yearly_tasks: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.created_at.year() == year)
        .collect();

    YearlyProgress {
        total_goals: yearly_goals.len(),
        completed_goals: yearly_goals
            .iter()
            .filter(|goal| goal.status == ActivityStatus::Completed)
            .count(),
        average_progress: average_percent(yearly_goals.iter().map(|goal| goal.progress)),
        total_tasks: yearly_tasks.len(),
        completed_tasks: yearly_tasks.iter().filter(|task| task.completed).count(),
    }
}
