use std::fmt;

use serde::Serialize;

pub type TaskId = u64;

/// Read view of a single task as handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub time_spent: u64,
}

impl Task {
    pub fn new<T: Into<String>>(id: TaskId, title: T) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            time_spent: 0,
        }
    }
}

/// Titles are validated after trimming but stored as entered.
pub fn is_blank_title(title: &str) -> bool {
    title.trim().is_empty()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    #[default]
    Stopped,
    Running,
}

impl TimerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerState::Stopped => "stopped",
            TimerState::Running => "running",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, TimerState::Running)
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message a timer controller emits on every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeUpdate {
    pub id: TaskId,
    pub elapsed: u64,
}
