//! The task board: the authoritative collection plus one timer per task.

use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use crate::collection::TaskCollection;
use crate::config::AppConfig;
use crate::ids::{ClockIds, IdSource};
use crate::model::{Task, TaskId, TimeUpdate, TimerState};
use crate::registry::TimerRegistry;
use crate::timer::TimerController;

#[derive(Debug)]
pub struct TaskBoard<I = ClockIds> {
    collection: TaskCollection,
    draft: String,
    ids: I,
    timers: TimerRegistry,
    updates: Receiver<TimeUpdate>,
}

impl TaskBoard<ClockIds> {
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            TaskCollection::from_seed(config.seed()),
            config.tick_interval(),
        )
    }

    pub fn new(collection: TaskCollection, tick_interval: Duration) -> Self {
        let ids = ClockIds::after(collection.max_id().unwrap_or_default());
        Self::with_ids(collection, tick_interval, ids)
    }
}

impl<I: IdSource> TaskBoard<I> {
    pub fn with_ids(collection: TaskCollection, tick_interval: Duration, ids: I) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut timers = TimerRegistry::new(tick_interval, tx);
        timers.sync(&collection);
        Self {
            collection,
            draft: String::new(),
            ids,
            timers,
            updates: rx,
        }
    }

    pub fn collection(&self) -> &TaskCollection {
        &self.collection
    }

    pub fn tasks(&self) -> &[Task] {
        self.collection.tasks()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft<T: Into<String>>(&mut self, draft: T) {
        self.draft = draft.into();
    }

    /// Add a task from the pending draft. On success the draft is cleared;
    /// a blank draft is left in place and nothing is added.
    pub fn submit_draft(&mut self) -> Option<TaskId> {
        let draft = std::mem::take(&mut self.draft);
        let id = self.add(&draft);
        if id.is_none() {
            self.draft = draft;
        }
        id
    }

    /// Add a task titled `title`. The pending draft is left untouched.
    pub fn add(&mut self, title: &str) -> Option<TaskId> {
        let (collection, id) = self.collection.add(title, &mut self.ids);
        let id = id?;
        tracing::debug!(task_id = id, title, "task added");
        self.replace(collection);
        Some(id)
    }

    pub fn toggle_completion(&mut self, id: TaskId) -> bool {
        let next = self.collection.toggle_completion(id);
        let changed = !next.ptr_eq(&self.collection);
        if changed {
            tracing::debug!(
                task_id = id,
                completed = ?next.get(id).map(|task| task.completed),
                "task completion toggled"
            );
        }
        self.replace(next);
        changed
    }

    pub fn update_time(&mut self, id: TaskId, time_spent: u64) -> bool {
        let next = self.collection.update_time(id, time_spent);
        let changed = !next.ptr_eq(&self.collection);
        self.replace(next);
        changed
    }

    pub fn timer(&self, id: TaskId) -> Option<&TimerController> {
        self.timers.get(id)
    }

    pub fn timer_state(&self, id: TaskId) -> TimerState {
        self.timers
            .get(id)
            .map(TimerController::state)
            .unwrap_or_default()
    }

    /// Start or stop the timer of task `id`; `None` for unknown ids.
    pub fn toggle_timer(&mut self, id: TaskId, now: Instant) -> Option<TimerState> {
        self.timers.toggle(id, now)
    }

    pub fn running_timers(&self) -> usize {
        self.timers.running_count()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Deliver due ticks and fold the reported times into the collection.
    /// Returns the number of time updates applied.
    pub fn advance(&mut self, now: Instant) -> usize {
        if self.timers.poll(now) == 0 {
            return 0;
        }

        let mut applied = 0;
        while let Ok(update) = self.updates.try_recv() {
            self.update_time(update.id, update.elapsed);
            applied += 1;
        }
        applied
    }

    fn replace(&mut self, collection: TaskCollection) {
        if collection.ptr_eq(&self.collection) {
            return;
        }
        self.collection = collection;
        self.timers.sync(&self.collection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;
    use pretty_assertions::assert_eq;

    const SECOND: Duration = Duration::from_millis(1000);

    fn board() -> TaskBoard<SequentialIds> {
        TaskBoard::with_ids(
            TaskCollection::seeded(),
            SECOND,
            SequentialIds::starting_at(100),
        )
    }

    #[test]
    fn adding_a_task_appends_and_clears_draft() {
        let mut board = board();
        board.set_draft("新しいタスク");

        let id = board.submit_draft();

        assert_eq!(id, Some(100));
        assert_eq!(board.tasks().len(), 3);
        assert_eq!(board.tasks()[2], Task::new(100, "新しいタスク"));
        assert_eq!(board.draft(), "");
        assert_eq!(board.timer_state(100), TimerState::Stopped);
    }

    #[test]
    fn blank_draft_is_kept_and_nothing_added() {
        let mut board = board();
        board.set_draft("   ");

        assert!(board.submit_draft().is_none());
        assert_eq!(board.tasks().len(), 2);
        assert_eq!(board.draft(), "   ");

        assert!(board.add("").is_none());
        assert_eq!(board.tasks().len(), 2);
    }

    #[test]
    fn direct_add_leaves_pending_draft_alone() {
        let mut board = board();
        board.set_draft("half typed");

        assert!(board.add("  ").is_none());
        assert_eq!(board.draft(), "half typed");

        assert_eq!(board.add("quick"), Some(100));
        assert_eq!(board.draft(), "half typed");
        assert_eq!(board.tasks()[2].title, "quick");
    }

    #[test]
    fn toggling_completion_twice_restores_task() {
        let mut board = board();
        let before = board.collection().clone();

        assert!(board.toggle_completion(1));
        assert!(board.tasks()[0].completed);
        assert!(!board.tasks()[1].completed);

        assert!(board.toggle_completion(1));
        assert_eq!(board.collection(), &before);
    }

    #[test]
    fn unknown_ids_change_nothing() {
        let mut board = board();
        let before = board.collection().clone();

        assert!(!board.toggle_completion(404));
        assert!(!board.update_time(404, 9));
        assert!(board.toggle_timer(404, Instant::now()).is_none());
        assert_eq!(board.collection(), &before);
    }

    #[test]
    fn running_timer_updates_time_spent() {
        let mut board = board();
        let start = Instant::now();

        assert_eq!(board.toggle_timer(1, start), Some(TimerState::Running));
        assert_eq!(board.advance(start + 5 * SECOND), 5);

        assert_eq!(board.tasks()[0].time_spent, 5);
        assert_eq!(board.tasks()[1].time_spent, 0);

        assert_eq!(board.toggle_timer(1, start + 5 * SECOND), Some(TimerState::Stopped));
        assert_eq!(board.advance(start + 10 * SECOND), 0);
        assert_eq!(board.tasks()[0].time_spent, 5);
    }

    #[test]
    fn completion_does_not_stop_timer() {
        let mut board = board();
        let start = Instant::now();

        board.toggle_timer(2, start);
        board.toggle_completion(2);
        board.advance(start + 3 * SECOND);

        let task = &board.tasks()[1];
        assert!(task.completed);
        assert_eq!(task.time_spent, 3);
        assert_eq!(board.timer_state(2), TimerState::Running);
    }

    #[test]
    fn old_collection_snapshot_is_not_mutated() {
        let mut board = board();
        let snapshot = board.collection().clone();
        let start = Instant::now();

        board.toggle_timer(1, start);
        board.advance(start + 2 * SECOND);
        board.add("later");

        assert_eq!(snapshot, TaskCollection::seeded());
        assert!(!snapshot.ptr_eq(board.collection()));
    }

    #[test]
    fn next_deadline_tracks_running_timers() {
        let mut board = board();
        let start = Instant::now();
        assert!(board.next_deadline().is_none());

        board.toggle_timer(1, start);
        assert_eq!(board.next_deadline(), Some(start + SECOND));
        assert_eq!(board.running_timers(), 1);
    }

    #[test]
    fn clock_ids_never_collide_with_seed() {
        let mut board = TaskBoard::new(TaskCollection::seeded(), SECOND);
        let first = board.add("a").unwrap();
        let second = board.add("b").unwrap();

        assert!(first > 2);
        assert!(second > first);
    }

    #[test]
    fn from_config_honours_seed_and_interval() {
        let config = AppConfig::from_data_dir(std::path::PathBuf::from("unused"))
            .with_seed(crate::config::Seed::Empty)
            .with_tick_interval(Duration::from_millis(250))
            .unwrap();
        let mut board = TaskBoard::from_config(&config);
        assert!(board.tasks().is_empty());

        let id = board.add("quick").unwrap();
        assert_eq!(board.timer(id).unwrap().period(), Duration::from_millis(250));
    }
}
