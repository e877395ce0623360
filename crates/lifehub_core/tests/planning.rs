use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use lifehub_core::model::event::Event;
use lifehub_core::model::goal::Goal;
use lifehub_core::model::project::ActivityStatus;
use lifehub_core::model::task::Task;
use lifehub_core::service::planning::{
    active_goals, monthly_stats, overview, upcoming_tasks, week_overview, yearly_progress,
};

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn due_task(id: &str, due: Option<DateTime<Utc>>, completed: bool) -> Task {
    let mut task = Task::with_id(id, id);
    task.due_date = due;
    task.completed = completed;
    task
}

#[test]
fn upcoming_tasks_are_open_dated_and_sorted() {
    let tasks = vec![
        due_task("late", Some(at(2024, 5, 20, 9)), false),
        due_task("undated", None, false),
        due_task("done", Some(at(2024, 5, 1, 9)), true),
        due_task("overdue", Some(at(2024, 4, 1, 9)), false),
        due_task("soon", Some(at(2024, 5, 7, 9)), false),
    ];

    let ids: Vec<&str> = upcoming_tasks(&tasks, 5)
        .iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, vec!["overdue", "soon", "late"]);
    assert_eq!(upcoming_tasks(&tasks, 1).len(), 1);
}

#[test]
fn overview_caps_each_list() {
    let now = at(2024, 5, 6, 8);
    let tasks: Vec<Task> = (1..=7)
        .map(|day| due_task(&format!("t{day}"), Some(at(2024, 5, day, 9)), false))
        .collect();
    let events: Vec<Event> = (10..=16)
        .map(|day| Event::new(format!("e{day}"), at(2024, 5, day, 9), at(2024, 5, day, 10)))
        .collect();
    let mut goals: Vec<Goal> = (0..5)
        .map(|n| Goal::new(format!("g{n}"), at(2024, 12, 31, 0)))
        .collect();
    goals[0].status = ActivityStatus::Paused;

    let view = overview(&tasks, &events, &goals, now);
    assert_eq!(view.tasks.len(), 5);
    assert_eq!(view.events.len(), 5);
    assert_eq!(view.events[0].title, "e10");
    let goal_titles: Vec<&str> = view.goals.iter().map(|goal| goal.title.as_str()).collect();
    assert_eq!(goal_titles, vec!["g1", "g2", "g3"]);
    assert_eq!(active_goals(&goals, 10).len(), 4);
}

#[test]
fn week_overview_runs_sunday_to_saturday() {
    // 2024-05-08 is a Wednesday.
    let anchor = NaiveDate::from_ymd_opt(2024, 5, 8).unwrap();
    let tasks = vec![
        due_task("monday", Some(at(2024, 5, 6, 17)), true),
        due_task("next-week", Some(at(2024, 5, 13, 9)), false),
    ];
    let events = vec![Event::new("friday", at(2024, 5, 10, 9), at(2024, 5, 10, 11))];

    let week = week_overview(&tasks, &events, anchor);
    assert_eq!(week.len(), 7);
    assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2024, 5, 5).unwrap());
    assert_eq!(week[6].date, NaiveDate::from_ymd_opt(2024, 5, 11).unwrap());
    assert_eq!(week[1].tasks[0].id, "monday");
    assert_eq!(week[5].events[0].title, "friday");
    assert_eq!(week.iter().map(|day| day.tasks.len()).sum::<usize>(), 1);
}

#[test]
fn monthly_stats_use_due_dates_and_event_starts() {
    let tasks = vec![
        due_task("a", Some(at(2024, 5, 2, 9)), true),
        due_task("b", Some(at(2024, 5, 20, 9)), false),
        due_task("c", Some(at(2024, 5, 30, 9)), true),
        due_task("june", Some(at(2024, 6, 1, 9)), true),
        due_task("undated", None, true),
    ];
    let events = vec![
        Event::new("may", at(2024, 5, 3, 9), at(2024, 5, 3, 10)),
        Event::new("last-may", at(2023, 5, 3, 9), at(2023, 5, 3, 10)),
    ];

    let stats = monthly_stats(&tasks, &events, 2024, 5);
    assert_eq!(stats.total_tasks, 3);
    assert_eq!(stats.completed_tasks, 2);
    assert_eq!(stats.completion_rate, 67);
    assert_eq!(stats.total_events, 1);

    let empty = monthly_stats(&[], &[], 2024, 5);
    assert_eq!(empty.completion_rate, 0);
}

#[test]
fn yearly_progress_uses_goal_targets_and_task_creation() {
    let mut thesis = Goal::new("thesis", at(2024, 9, 1, 0));
    thesis.progress = 100;
    thesis.status = ActivityStatus::Completed;
    let mut marathon = Goal::new("marathon", at(2024, 11, 1, 0));
    marathon.progress = 25;
    let later = Goal::new("later", at(2025, 3, 1, 0));

    let mut old = Task::with_id("old", "old");
    old.created_at = at(2023, 12, 31, 23);
    let mut fresh = Task::with_id("fresh", "fresh");
    fresh.created_at = at(2024, 1, 1, 0);
    fresh.completed = true;

    let progress = yearly_progress(&[thesis, marathon, later], &[old, fresh], 2024);
    assert_eq!(progress.total_goals, 2);
    assert_eq!(progress.completed_goals, 1);
    assert_eq!(progress.average_progress, 63);
    assert_eq!(progress.total_tasks, 1);
    assert_eq!(progress.completed_tasks, 1);
}
