//! Command-line schema for the `lifehub` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use lifehub_core::model::task::Priority;

#[derive(Parser, Debug)]
#[command(name = "lifehub", version, about = "Personal productivity hub")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print core linkage info and exit.
    Ping,
    /// Create, complete or remove tasks.
    #[command(subcommand)]
    Task(TaskCommand),
    /// Create notes.
    #[command(subcommand)]
    Note(NoteCommand),
    /// List records of one kind (tasks, notes, events, journal, ...).
    List { kind: String },
    /// Search task, project, note and event text.
    Search {
        term: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show per-module summaries.
    Stats,
    /// Write a JSON backup. Defaults to a dated file in the current directory.
    Export { path: Option<PathBuf> },
    /// Load a JSON backup.
    Import {
        path: PathBuf,
        /// Also write every imported record to local storage.
        #[arg(long)]
        persist: bool,
    },
    /// Run one pomodoro phase in the terminal.
    Pomodoro {
        /// Work phase length in minutes.
        #[arg(long, default_value_t = 25)]
        minutes: u32,
        /// Attach the session to a task id.
        #[arg(long)]
        task: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommand {
    Add {
        title: String,
        #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
        priority: PriorityArg,
        /// Due date as YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// Comma-separated tags.
        #[arg(long)]
        tags: Option<String>,
    },
    /// Toggle completion of a task by id or id prefix.
    Done { id: String },
    Rm { id: String },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityArg {
    Low,
    Medium,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(value: PriorityArg) -> Self {
        match value {
            PriorityArg::Low => Self::Low,
            PriorityArg::Medium => Self::Medium,
            PriorityArg::High => Self::High,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    Add {
        title: String,
        #[arg(long, default_value = "")]
        content: String,
        #[arg(long)]
        category: Option<String>,
        /// Comma-separated tags.
        #[arg(long)]
        tags: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, PriorityArg, TaskCommand};
    use clap::{CommandFactory, Parser};

    #[test]
    fn schema_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_task_add_with_options() {
        let cli = Cli::parse_from(["lifehub", "task", "add", "Pay rent", "--priority", "high"]);
        match cli.command {
            Command::Task(TaskCommand::Add {
                title, priority, ..
            }) => {
                assert_eq!(title, "Pay rent");
                assert_eq!(priority, PriorityArg::High);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_priority_is_rejected_by_the_parser() {
        let err = Cli::try_parse_from(["lifehub", "task", "add", "x", "--priority", "urgent"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn priority_defaults_to_medium() {
        let cli = Cli::parse_from(["lifehub", "task", "add", "x"]);
        assert!(matches!(
            cli.command,
            Command::Task(TaskCommand::Add {
                priority: PriorityArg::Medium,
                ..
            })
        ));
    }

    #[test]
    fn pomodoro_defaults_to_25_minutes() {
        let cli = Cli::parse_from(["lifehub", "pomodoro"]);
        assert!(matches!(
            cli.command,
            Command::Pomodoro {
                minutes: 25,
                task: None,
            }
        ));
    }
}
