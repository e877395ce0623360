//! Command handlers. Each opens the store, hydrates it, dispatches and
//! flushes pending writes before returning.

use std::error::Error;
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use lifehub_core::model::note::Note;
use lifehub_core::model::task::Task;
use lifehub_core::service::backup::{backup_file_name, import_writes, read_backup, write_backup};
use lifehub_core::service::notes::parse_tag_list;
use lifehub_core::service::pomodoro::{PomodoroSettings, PomodoroTimer};
use lifehub_core::service::stats;
use lifehub_core::{
    open_db, Action, CoreConfig, EntityKind, Record, RemoteSink, RemoteWrite, SearchQuery,
    SqliteRecordRepository, Store, SyncWorker,
};
use log::{info, warn};

use crate::cli::{Command, NoteCommand, TaskCommand};

pub type CliResult<T> = Result<T, Box<dyn Error>>;

pub fn run(command: Command, config: &CoreConfig) -> CliResult<()> {
    if let Command::Ping = command {
        println!("lifehub_core ping={}", lifehub_core::ping());
        println!("lifehub_core version={}", lifehub_core::core_version());
        return Ok(());
    }

    let mut store = open_store(config)?;
    let outcome = match command {
        Command::Ping => Ok(()),
        Command::Task(task) => task_command(&mut store, task),
        Command::Note(note) => note_command(&mut store, note),
        Command::List { kind } => list(&store, &kind),
        Command::Search { term, limit } => search(&store, term, limit),
        Command::Stats => print_stats(&store),
        Command::Export { path } => export(&store, path.as_deref()),
        Command::Import { path, persist } => import(&mut store, &path, persist),
        Command::Pomodoro { minutes, task } => pomodoro(&mut store, minutes, task),
    };

    let worker = store.sink();
    worker.flush();
    if worker.stats().failed() > 0 {
        eprintln!(
            "warning: {} write(s) failed to persist; see logs in {}",
            worker.stats().failed(),
            config.log_dir().display()
        );
    }
    outcome
}

fn open_store(config: &CoreConfig) -> CliResult<Store<SyncWorker>> {
    let db_path = config.db_path();
    let worker = SyncWorker::open(&db_path)?;
    let conn = open_db(&db_path)?;
    let repo = SqliteRecordRepository::try_new(&conn)?;

    let mut store = Store::new(worker);
    store.hydrate(&repo)?;
    Ok(store)
}

/// Resolves a full id or a unique id prefix within one kind.
fn resolve_id(store: &Store<SyncWorker>, kind: EntityKind, needle: &str) -> CliResult<String> {
    let records = store.state().collections.records(kind);
    if let Some(record) = records.iter().find(|record| record.id() == needle) {
        return Ok(record.id().to_string());
    }
    let mut matches = records.iter().filter(|record| record.id().starts_with(needle));
    match (matches.next(), matches.next()) {
        (Some(record), None) => Ok(record.id().to_string()),
        (None, _) => Err(format!("no {kind} with id `{needle}`").into()),
        (Some(_), Some(_)) => {
            Err(format!("id prefix `{needle}` matches several {kind} records").into())
        }
    }
}

fn parse_day(value: &str) -> CliResult<chrono::DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date `{value}` (expected YYYY-MM-DD): {err}"))?;
    Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
}

fn task_command(store: &mut Store<SyncWorker>, command: TaskCommand) -> CliResult<()> {
    match command {
        TaskCommand::Add {
            title,
            priority,
            due,
            tags,
        } => {
            let mut task = Task::new(title);
            task.priority = priority.into();
            task.due_date = due.as_deref().map(parse_day).transpose()?;
            task.tags = tags.as_deref().map(parse_tag_list).unwrap_or_default();
            println!("added task {}", task.id);
            store.dispatch(Action::Add(Record::Task(task)));
        }
        TaskCommand::Done { id } => {
            let id = resolve_id(store, EntityKind::Task, &id)?;
            let toggled = store
                .state()
                .collections
                .tasks
                .iter()
                .find(|task| task.id == id)
                .map(|task| task.toggled(Utc::now()))
                .ok_or_else(|| format!("no task with id `{id}`"))?;
            println!(
                "{} {}",
                if toggled.completed { "completed" } else { "reopened" },
                toggled.title
            );
            store.dispatch(Action::Update(Record::Task(toggled)));
        }
        TaskCommand::Rm { id } => {
            let id = resolve_id(store, EntityKind::Task, &id)?;
            println!("removed task {id}");
            store.dispatch(Action::delete(EntityKind::Task, id));
        }
    }
    Ok(())
}

fn note_command(store: &mut Store<SyncWorker>, command: NoteCommand) -> CliResult<()> {
    let NoteCommand::Add {
        title,
        content,
        category,
        tags,
    } = command;
    let mut note = Note::new(title, content);
    note.category = category;
    note.tags = tags.as_deref().map(parse_tag_list).unwrap_or_default();
    println!("added note {}", note.id);
    store.dispatch(Action::Add(Record::Note(note)));
    Ok(())
}

fn list(store: &Store<SyncWorker>, kind: &str) -> CliResult<()> {
    let kind: EntityKind = kind.parse()?;
    let records = store.state().collections.records(kind);
    if records.is_empty() {
        println!("no {kind} records");
    }
    for record in &records {
        println!("{}  {}", record.id(), describe(record));
    }
    Ok(())
}

fn search(store: &Store<SyncWorker>, term: String, limit: Option<usize>) -> CliResult<()> {
    let query = SearchQuery {
        limit,
        ..SearchQuery::new(term)
    };
    let hits = lifehub_core::search::search(&store.state().collections, &query);
    if hits.is_empty() {
        println!("no results");
    }
    for hit in hits {
        println!("{:<8} {}  {}", hit.kind, hit.id, hit.label);
    }
    Ok(())
}

fn print_stats(store: &Store<SyncWorker>) -> CliResult<()> {
    let c = &store.state().collections;
    let now = Utc::now();

    let tasks = stats::task_counts(&c.tasks);
    println!(
        "tasks      {} active, {} completed",
        tasks.active, tasks.completed
    );

    let projects = stats::project_status_counts(&c.projects);
    println!(
        "projects   {} active, {} completed, avg progress {}%",
        projects.active,
        projects.completed,
        stats::average_project_progress(&c.projects)
    );

    let goals = stats::goal_status_counts(&c.goals);
    println!(
        "goals      {} active, {} completed, avg progress {}%",
        goals.active,
        goals.completed,
        stats::average_goal_progress(&c.goals)
    );

    let finance = stats::finance_summary(&c.financial_transactions);
    println!(
        "finance    income {:.2}, expenses {:.2}, balance {:.2}",
        finance.income, finance.expenses, finance.balance
    );
    for share in stats::top_expense_categories(&c.financial_transactions) {
        println!(
            "           {:<12} {:.2} ({:.1}% of expenses)",
            share.category, share.amount, share.share
        );
    }

    let reading = stats::reading_stats(&c.books, now.year());
    println!(
        "books      {} finished this year, {} pages, avg rating {:.1}",
        reading.books_finished, reading.total_pages, reading.average_rating
    );

    println!(
        "academic   GPA {:.2}, {} credits, {} upcoming assignment(s)",
        stats::gpa(&c.academic_courses),
        stats::total_credits(&c.academic_courses),
        stats::upcoming_assignments(&c.academic_courses, now).len()
    );

    let mood = stats::mood_stats(&c.journal_entries);
    println!(
        "journal    mood {:.1}, trend {}",
        mood.average,
        mood.trend.as_str()
    );

    println!("pomodoro   {} session(s) logged", c.pomodoro_sessions.len());
    Ok(())
}

fn export(store: &Store<SyncWorker>, path: Option<&Path>) -> CliResult<()> {
    let default_name = backup_file_name(Utc::now().date_naive());
    let path = path.unwrap_or_else(|| Path::new(&default_name));
    write_backup(store.state(), path)?;
    println!("exported backup to {}", path.display());
    Ok(())
}

fn import(store: &mut Store<SyncWorker>, path: &Path, persist: bool) -> CliResult<()> {
    let patch = read_backup(path)?;
    let replaced = patch.replaced_kinds();
    let before = store.state().collections.clone();
    store.dispatch(Action::LoadData(patch));

    let loaded = store.state().collections.total_len();
    if !persist {
        println!("loaded {loaded} record(s); pass --persist to keep them");
        return Ok(());
    }

    let writes = import_writes(&before, &replaced, &store.state().collections);
    let removed = writes
        .iter()
        .filter(|write| matches!(write, RemoteWrite::Delete { .. }))
        .count();
    for write in writes {
        store.sink().submit(write);
    }
    info!(
        "event=backup_import module=cli status=ok records={} removed={}",
        loaded, removed
    );
    println!("imported and saved {loaded} record(s), removed {removed}");
    Ok(())
}

fn pomodoro(store: &mut Store<SyncWorker>, minutes: u32, task: Option<String>) -> CliResult<()> {
    let task_id = task
        .map(|needle| resolve_id(store, EntityKind::Task, &needle))
        .transpose()?;
    let mut timer = PomodoroTimer::new(PomodoroSettings {
        work_minutes: minutes,
        ..PomodoroSettings::default()
    });
    timer.set_task(task_id);
    timer.start();

    let tick = Duration::from_secs(1);
    let mut stdout = std::io::stdout();
    loop {
        print!("\r{} {}  ", timer.phase().label(), timer.format_remaining());
        if let Err(err) = stdout.flush() {
            warn!("event=pomodoro_render module=cli status=error error={err}");
        }
        thread::sleep(tick);
        if let Some(session) = timer.tick(tick, Utc::now()) {
            println!(
                "\r{} finished ({} min)",
                session.kind.label(),
                session.duration
            );
            store.dispatch(Action::Add(Record::PomodoroSession(session)));
            return Ok(());
        }
    }
}

fn describe(record: &Record) -> String {
    match record {
        Record::Task(task) => format!(
            "[{}] {} ({:?})",
            if task.completed { "x" } else { " " },
            task.title,
            task.priority
        ),
        Record::Project(project) => {
            format!("{} {}%", project.name, stats::project_progress(project))
        }
        Record::Note(note) => note.title.clone(),
        Record::Event(event) => format!("{} {}", event.start.format("%Y-%m-%d %H:%M"), event.title),
        Record::Transaction(tx) => format!("{:+.2} {}", tx.signed_amount(), tx.category),
        Record::Book(book) => format!(
            "{} by {} {}%",
            book.title,
            book.author,
            stats::book_progress(book)
        ),
        Record::Goal(goal) => format!("{} {}%", goal.title, goal.progress),
        Record::JournalEntry(entry) => {
            format!("{} mood {}", entry.date.format("%Y-%m-%d"), entry.mood)
        }
        Record::Prayer(prayer) => format!(
            "{}{}",
            prayer.title,
            if prayer.answered { " (answered)" } else { "" }
        ),
        Record::BibleReading(reading) => format!("{} {}", reading.book, reading.chapter),
        Record::AcademicCourse(course) => format!("{} {}", course.code, course.name),
        Record::PomodoroSession(session) => format!(
            "{} {} min {}",
            session.start_time.format("%Y-%m-%d %H:%M"),
            session.duration,
            session.kind.label()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::run;
    use crate::cli::{Command, PriorityArg, TaskCommand};
    use lifehub_core::{
        open_db, CoreConfig, EntityKind, Record, RecordRepository, SqliteRecordRepository,
    };

    const IMPORTED_ONLY: &str = concat!(
        r#"{"tasks":[{"id":"imported","title":"imported","#,
        r#""createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}]}"#
    );

    fn add_task(config: &CoreConfig, title: &str) {
        let command = Command::Task(TaskCommand::Add {
            title: title.to_string(),
            priority: PriorityArg::Medium,
            due: None,
            tags: None,
        });
        run(command, config).unwrap();
    }

    fn stored_task_titles(config: &CoreConfig) -> Vec<String> {
        let conn = open_db(config.db_path()).unwrap();
        let repo = SqliteRecordRepository::try_new(&conn).unwrap();
        let mut titles: Vec<String> = repo
            .list(EntityKind::Task)
            .unwrap()
            .into_iter()
            .filter_map(|record| match record {
                Record::Task(task) => Some(task.title),
                _ => None,
            })
            .collect();
        titles.sort();
        titles
    }

    #[test]
    fn persisted_import_replaces_stored_tasks() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path());
        add_task(&config, "keep");
        add_task(&config, "gone");
        assert_eq!(stored_task_titles(&config), vec!["gone", "keep"]);

        let backup = dir.path().join("backup.json");
        std::fs::write(&backup, IMPORTED_ONLY).unwrap();
        run(
            Command::Import {
                path: backup,
                persist: true,
            },
            &config,
        )
        .unwrap();

        assert_eq!(stored_task_titles(&config), vec!["imported"]);
    }

    #[test]
    fn import_without_persist_leaves_storage_alone() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path());
        add_task(&config, "keep");

        let backup = dir.path().join("backup.json");
        std::fs::write(&backup, r#"{"tasks":[]}"#).unwrap();
        run(
            Command::Import {
                path: backup,
                persist: false,
            },
            &config,
        )
        .unwrap();

        assert_eq!(stored_task_titles(&config), vec!["keep"]);
    }
}
