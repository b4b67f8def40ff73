use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use crate::collection::TaskCollection;
use crate::model::{Task, TaskId, TimeUpdate, TimerState};
use crate::timer::TimerController;

/// Outcome of reconciling the registry with a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: Vec<TaskId>,
    pub disposed: Vec<TaskId>,
}

/// Owns one [`TimerController`] per displayed task.
///
/// Controllers report ticks as [`TimeUpdate`] messages on the channel handed
/// to [`TimerRegistry::new`]; the registry never touches the collection.
#[derive(Debug)]
pub struct TimerRegistry {
    period: Duration,
    updates: Sender<TimeUpdate>,
    controllers: BTreeMap<TaskId, TimerController>,
}

impl TimerRegistry {
    pub fn new(period: Duration, updates: Sender<TimeUpdate>) -> Self {
        Self {
            period,
            updates,
            controllers: BTreeMap::new(),
        }
    }

    /// Create controllers for newly displayed tasks and dispose of controllers
    /// whose task is gone. Existing controllers keep their state.
    pub fn sync(&mut self, collection: &TaskCollection) -> SyncReport {
        let mut report = SyncReport::default();

        let stale: Vec<TaskId> = self
            .controllers
            .keys()
            .copied()
            .filter(|id| !collection.contains(*id))
            .collect();
        for id in stale {
            if self.dispose(id) {
                report.disposed.push(id);
            }
        }

        for task in collection {
            if !self.controllers.contains_key(&task.id) {
                let controller = self.spawn(task);
                self.controllers.insert(task.id, controller);
                report.created.push(task.id);
            }
        }

        report
    }

    fn spawn(&self, task: &Task) -> TimerController {
        let id = task.id;
        let updates = self.updates.clone();
        TimerController::new(task, self.period, move |elapsed| {
            // The board may already be gone during teardown.
            let _ = updates.send(TimeUpdate { id, elapsed });
        })
    }

    pub fn get(&self, id: TaskId) -> Option<&TimerController> {
        self.controllers.get(&id)
    }

    pub fn toggle(&mut self, id: TaskId, now: Instant) -> Option<TimerState> {
        self.controllers
            .get_mut(&id)
            .map(|controller| controller.toggle(now))
    }

    /// Remove and dispose of the controller for `id`.
    pub fn dispose(&mut self, id: TaskId) -> bool {
        match self.controllers.remove(&id) {
            Some(controller) => {
                controller.dispose();
                true
            }
            None => false,
        }
    }

    /// Deliver due ticks for every running controller; returns the total fired.
    pub fn poll(&mut self, now: Instant) -> u32 {
        self.controllers
            .values_mut()
            .map(|controller| controller.poll(now))
            .sum()
    }

    /// Earliest pending tick across all running controllers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.controllers
            .values()
            .filter_map(TimerController::next_deadline)
            .min()
    }

    pub fn running_count(&self) -> usize {
        self.controllers
            .values()
            .filter(|controller| controller.is_running())
            .count()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
