use chrono::{Duration, TimeZone, Utc};
use lifehub_core::model::academic::{AcademicCourse, Assignment, Grade};
use lifehub_core::model::book::Book;
use lifehub_core::model::faith::Prayer;
use lifehub_core::model::finance::{FinancialTransaction, TransactionType};
use lifehub_core::model::goal::{Goal, Milestone};
use lifehub_core::model::journal::JournalEntry;
use lifehub_core::model::project::{ActivityStatus, Project};
use lifehub_core::model::task::{Priority, Task};
use lifehub_core::service::stats::{
    average_goal_progress, average_project_progress, book_progress, finance_summary, gpa,
    mood_stats, prayer_stats, project_progress, reading_stats, task_counts, toggle_milestone,
    top_expense_categories, upcoming_assignments, MoodTrend,
};

fn task(id: &str, completed: bool, priority: Priority) -> Task {
    let mut task = Task::with_id(id, id);
    task.completed = completed;
    task.priority = priority;
    task
}

#[test]
fn task_counts_split_active_and_completed() {
    let tasks = vec![
        task("a", false, Priority::High),
        task("b", true, Priority::High),
        task("c", false, Priority::Low),
    ];

    let counts = task_counts(&tasks);
    assert_eq!((counts.active, counts.completed), (2, 1));
}

#[test]
fn project_progress_rounds_and_handles_empty() {
    let mut project = Project::new("Launch");
    assert_eq!(project_progress(&project), 0);

    project.tasks = vec![
        task("a", true, Priority::Medium),
        task("b", false, Priority::Medium),
        task("c", false, Priority::Medium),
    ];
    assert_eq!(project_progress(&project), 33);

    let mut done = Project::new("Done");
    done.tasks = vec![task("d", true, Priority::Medium)];
    assert_eq!(average_project_progress(&[project, done]), 67);
    assert_eq!(average_project_progress(&[]), 0);
}

#[test]
fn toggling_last_milestone_completes_goal() {
    let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
    let mut goal = Goal::new("Run a marathon", now + Duration::days(90));
    let mut first = Milestone::new("10k");
    first.completed = true;
    let second = Milestone::new("half");
    let second_id = second.id.clone();
    goal.milestones = vec![first, second];

    let halfway = toggle_milestone(&goal, "unknown", now);
    assert_eq!(halfway.progress, 50);
    assert_eq!(halfway.status, ActivityStatus::Active);

    let finished = toggle_milestone(&goal, &second_id, now);
    assert_eq!(finished.progress, 100);
    assert_eq!(finished.status, ActivityStatus::Completed);
    assert_eq!(finished.milestones[1].completed_date, Some(now));
    assert_eq!(finished.id, goal.id);

    let reopened = toggle_milestone(&finished, &second_id, now);
    assert_eq!(reopened.progress, 50);
    assert_eq!(reopened.milestones[1].completed_date, None);
    // Reopening does not revert the goal status.
    assert_eq!(reopened.status, ActivityStatus::Completed);

    assert_eq!(average_goal_progress(&[halfway, finished]), 75);
}

#[test]
fn book_progress_and_yearly_reading_stats() {
    let mut reading = Book::new("Dune", "Herbert", 400);
    reading.current_page = 150;
    assert_eq!(book_progress(&reading), 38);
    assert_eq!(book_progress(&Book::new("Empty", "Nobody", 0)), 0);

    let finished_at = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap();
    let mut rated = Book::new("A", "x", 300);
    rated.end_date = Some(finished_at);
    rated.rating = Some(5);
    let mut unrated = Book::new("B", "y", 200);
    unrated.end_date = Some(finished_at);
    let mut last_year = Book::new("C", "z", 999);
    last_year.end_date = Some(finished_at - Duration::days(400));

    let stats = reading_stats(&[rated, unrated, last_year, reading], 2024);
    assert_eq!(stats.books_finished, 2);
    assert_eq!(stats.total_pages, 500);
    assert_eq!(stats.average_rating, 2.5);
}

#[test]
fn finance_totals_and_top_categories() {
    let tx = |kind, amount, category: &str| FinancialTransaction::new(kind, amount, category);
    let transactions = vec![
        tx(TransactionType::Income, 1000.0, "salary"),
        tx(TransactionType::Expense, 600.0, "rent"),
        tx(TransactionType::Expense, 100.0, "food"),
        tx(TransactionType::Expense, 50.0, "food"),
        tx(TransactionType::Expense, 25.0, "fun"),
    ];

    let summary = finance_summary(&transactions);
    assert_eq!(summary.income, 1000.0);
    assert_eq!(summary.expenses, 775.0);
    assert_eq!(summary.balance, 225.0);

    let top = top_expense_categories(&transactions);
    let names: Vec<&str> = top.iter().map(|share| share.category.as_str()).collect();
    assert_eq!(names, vec!["rent", "food", "fun"]);
    assert_eq!(top[1].amount, 150.0);
    assert!((top[0].share - 600.0 / 775.0 * 100.0).abs() < 1e-9);
}

#[test]
fn gpa_is_credit_weighted_and_skips_ungraded_courses() {
    let mut a = AcademicCourse::new("Algorithms", "CS201", 3.0);
    a.grades = vec![
        Grade::new("midterm", 90.0, 100.0, 1.0),
        Grade::new("final", 80.0, 100.0, 1.0),
    ];
    let mut b = AcademicCourse::new("Databases", "CS301", 4.0);
    b.grades = vec![Grade::new("project", 45.0, 50.0, 2.0)];
    let ungraded = AcademicCourse::new("Seminar", "CS999", 10.0);

    assert_eq!(gpa(&[a, b, ungraded]), 0.88);
    assert_eq!(gpa(&[]), 0.0);
}

#[test]
fn upcoming_assignments_are_unsubmitted_future_and_sorted() {
    let now = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();
    let mut course = AcademicCourse::new("Physics", "PHY101", 4.0);
    let later = Assignment::new("lab report", now + Duration::days(10));
    let sooner = Assignment::new("problem set", now + Duration::days(2));
    let mut submitted = Assignment::new("essay", now + Duration::days(1));
    submitted.submitted = true;
    let past = Assignment::new("quiz", now - Duration::days(1));
    course.assignments = vec![later, submitted, past, sooner];

    let courses = [course];
    let upcoming = upcoming_assignments(&courses, now);
    let titles: Vec<&str> = upcoming
        .iter()
        .map(|item| item.assignment.title.as_str())
        .collect();
    assert_eq!(titles, vec!["problem set", "lab report"]);
    assert_eq!(upcoming[0].course.code, "PHY101");
}

#[test]
fn mood_stats_average_and_trend() {
    let entries = |moods: &[u8]| -> Vec<JournalEntry> {
        moods.iter().map(|mood| JournalEntry::new(*mood, "")).collect()
    };

    let empty = mood_stats(&[]);
    assert_eq!(empty.average, 5.0);
    assert_eq!(empty.trend, MoodTrend::Stable);

    let short = mood_stats(&entries(&[2, 2, 2, 9, 9, 9, 9]));
    assert_eq!(short.trend, MoodTrend::Stable);

    let rising = mood_stats(&entries(&[3, 3, 3, 3, 3, 3, 3, 8, 8, 8, 8, 8, 8, 8]));
    assert_eq!(rising.average, 5.5);
    assert_eq!(rising.trend, MoodTrend::Improving);

    let falling = mood_stats(&entries(&[9, 4, 4, 4, 4, 4, 4, 4]));
    assert_eq!(falling.trend, MoodTrend::Declining);

    let flat = mood_stats(&entries(&[6, 6, 6, 6, 6, 6, 6, 6, 6]));
    assert_eq!(flat.trend, MoodTrend::Stable);
}

#[test]
fn prayer_stats_count_answered_and_this_month() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
    let mut june = Prayer::new("family", "");
    june.date = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    june.answered = true;
    let mut last_june = Prayer::new("exam", "");
    last_june.date = Utc.with_ymd_and_hms(2023, 6, 20, 8, 0, 0).unwrap();
    let mut may = Prayer::new("travel", "");
    may.date = Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap();

    let stats = prayer_stats(&[june, last_june, may], now);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.answered, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.this_month, 1);
}
