use chrono::Utc;

use crate::model::TaskId;

/// Source of fresh task ids. Implementations must never repeat a value.
pub trait IdSource {
    fn next_id(&mut self) -> TaskId;
}

/// Ids taken from the wall clock in Unix milliseconds.
///
/// Two tasks created within the same millisecond get consecutive ids, so the
/// sequence is strictly increasing even when the clock is not.
#[derive(Debug, Clone, Default)]
pub struct ClockIds {
    last: TaskId,
}

impl ClockIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start issuing ids strictly above `last`.
    pub fn after(last: TaskId) -> Self {
        Self { last }
    }
}

impl IdSource for ClockIds {
    fn next_id(&mut self) -> TaskId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let id = now.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}

/// Deterministic ids counting up from a starting value.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: TaskId,
}

impl SequentialIds {
    pub fn starting_at(next: TaskId) -> Self {
        Self { next }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> TaskId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}
