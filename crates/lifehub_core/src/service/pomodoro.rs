//! Pomodoro countdown state machine.
//!
//! # Invariants
//! - `remaining` never exceeds the current phase length.
//! - A phase completes exactly once, when `remaining` reaches zero, and
//!   yields one completed [`PomodoroSession`].
//! - Work is followed by a long break on every `long_break_interval`-th
//!   completed work phase, otherwise by a short break; breaks go back to work.

use crate::model::entity::{new_record_id, RecordId};
use crate::model::pomodoro::{PomodoroSession, SessionType};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use log::info;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Work phases per long break. Values below 1 are treated as 1.
    pub long_break_interval: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_interval: 4,
            auto_start_breaks: false,
            auto_start_work: false,
        }
    }
}

impl PomodoroSettings {
    pub fn minutes_for(&self, phase: SessionType) -> u32 {
        match phase {
            SessionType::Work => self.work_minutes,
            SessionType::Break => self.short_break_minutes,
            SessionType::LongBreak => self.long_break_minutes,
        }
    }

    fn phase_length(&self, phase: SessionType) -> Duration {
        Duration::from_secs(u64::from(self.minutes_for(phase)) * 60)
    }
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    settings: PomodoroSettings,
    phase: SessionType,
    remaining: Duration,
    running: bool,
    completed_work: u32,
    task_id: Option<RecordId>,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::new(PomodoroSettings::default())
    }
}

impl PomodoroTimer {
    /// Stopped timer at the start of a work phase.
    pub fn new(settings: PomodoroSettings) -> Self {
        Self {
            remaining: settings.phase_length(SessionType::Work),
            settings,
            phase: SessionType::Work,
            running: false,
            completed_work: 0,
            task_id: None,
        }
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// Replaces settings. A stopped timer is reset to the new phase length.
    pub fn set_settings(&mut self, settings: PomodoroSettings) {
        self.settings = settings;
        if !self.running {
            self.remaining = self.phase_length();
        } else {
            self.remaining = self.remaining.min(self.phase_length());
        }
    }

    pub fn phase(&self) -> SessionType {
        self.phase
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work
    }

    /// Total minutes of completed work phases.
    pub fn focus_minutes(&self) -> u32 {
        self.completed_work * self.settings.work_minutes
    }

    /// Attaches completed work sessions to a task.
    pub fn set_task(&mut self, task_id: Option<RecordId>) {
        self.task_id = task_id;
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops and restores the full length of the current phase.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.phase_length();
    }

    /// Ends the current phase now, as if its countdown had run out.
    pub fn skip(&mut self, now: DateTime<Utc>) -> PomodoroSession {
        self.remaining = Duration::ZERO;
        self.complete(now)
    }

    /// Advances a running timer by `elapsed`.
    ///
    /// Returns the finished session when this tick reaches zero. Time past
    /// zero is not carried into the next phase.
    pub fn tick(&mut self, elapsed: Duration, now: DateTime<Utc>) -> Option<PomodoroSession> {
        if !self.running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            return Some(self.complete(now));
        }
        None
    }

    /// Percent of the current phase already elapsed, 0.0 to 100.0.
    pub fn progress(&self) -> f64 {
        let total = self.phase_length().as_secs_f64();
        if total == 0.0 {
            return 100.0;
        }
        (total - self.remaining.as_secs_f64()) / total * 100.0
    }

    /// Remaining time as `MM:SS`, rounding partial seconds up.
    pub fn format_remaining(&self) -> String {
        let mut secs = self.remaining.as_secs();
        if self.remaining.subsec_nanos() > 0 {
            secs += 1;
        }
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }

    fn phase_length(&self) -> Duration {
        self.settings.phase_length(self.phase)
    }

    fn complete(&mut self, now: DateTime<Utc>) -> PomodoroSession {
        let finished = self.phase;
        let minutes = self.settings.minutes_for(finished);
        let session = PomodoroSession {
            id: new_record_id(),
            duration: minutes,
            kind: finished,
            start_time: now - ChronoDuration::minutes(i64::from(minutes)),
            end_time: Some(now),
            completed: true,
            task_id: self.task_id.clone(),
        };

        let (next, auto_start) = match finished {
            SessionType::Work => {
                self.completed_work += 1;
                let interval = self.settings.long_break_interval.max(1);
                let next = if self.completed_work % interval == 0 {
                    SessionType::LongBreak
                } else {
                    SessionType::Break
                };
                (next, self.settings.auto_start_breaks)
            }
            SessionType::Break | SessionType::LongBreak => {
                (SessionType::Work, self.settings.auto_start_work)
            }
        };

        self.phase = next;
        self.remaining = self.phase_length();
        self.running = auto_start;

        info!(
            "event=pomodoro_complete module=pomodoro status=ok phase={} next={} completed_work={}",
            finished.label(),
            next.label(),
            self.completed_work
        );
        session
    }
}

#[cfg(test)]
mod tests {
    use super::{PomodoroSettings, PomodoroTimer};
    use crate::model::pomodoro::SessionType;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn fresh_timer_shows_full_work_phase() {
        let timer = PomodoroTimer::default();
        assert_eq!(timer.phase(), SessionType::Work);
        assert_eq!(timer.format_remaining(), "25:00");
        assert_eq!(timer.progress(), 0.0);
        assert!(!timer.is_running());
    }

    #[test]
    fn paused_timer_ignores_ticks() {
        let mut timer = PomodoroTimer::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        assert!(timer.tick(Duration::from_secs(60), now).is_none());
        assert_eq!(timer.remaining(), Duration::from_secs(25 * 60));
    }

    #[test]
    fn reset_restores_phase_length_and_stops() {
        let mut timer = PomodoroTimer::default();
        let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        timer.start();
        timer.tick(Duration::from_secs(90), now);
        assert_eq!(timer.format_remaining(), "23:30");

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.format_remaining(), "25:00");
    }

    #[test]
    fn zero_length_phase_reports_full_progress() {
        let mut timer = PomodoroTimer::new(PomodoroSettings {
            work_minutes: 0,
            ..PomodoroSettings::default()
        });
        timer.reset();
        assert_eq!(timer.progress(), 100.0);
    }
}
