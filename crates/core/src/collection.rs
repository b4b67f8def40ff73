use std::collections::HashSet;
use std::sync::Arc;

use crate::config::Seed;
use crate::ids::IdSource;
use crate::model::{is_blank_title, Task, TaskId};

/// Tasks every board starts with unless configured to start empty.
pub const SEED_TASKS: [(TaskId, &str); 2] = [(1, "タスク1"), (2, "タスク2")];

/// Ordered, immutable task list.
///
/// Every mutation returns a new collection and leaves `self` untouched. A
/// mutation that changes nothing hands back a clone sharing the same storage,
/// so [`TaskCollection::ptr_eq`] doubles as a cheap change check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCollection {
    tasks: Arc<[Task]>,
}

impl Default for TaskCollection {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl TaskCollection {
    /// Build a collection, keeping the first task for any repeated id.
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id))
            .collect();
        Self {
            tasks: tasks.into(),
        }
    }

    pub fn seeded() -> Self {
        Self::new(
            SEED_TASKS
                .iter()
                .map(|(id, title)| Task::new(*id, *title))
                .collect(),
        )
    }

    pub fn from_seed(seed: Seed) -> Self {
        match seed {
            Seed::Default => Self::seeded(),
            Seed::Empty => Self::default(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }

    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.iter().map(|task| task.id).max()
    }

    /// True when both values share storage, i.e. nothing changed between them.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tasks, &other.tasks)
    }

    /// Append a task titled `title`. Blank titles leave the collection as is.
    pub fn add<I: IdSource>(&self, title: &str, ids: &mut I) -> (Self, Option<TaskId>) {
        if is_blank_title(title) {
            return (self.clone(), None);
        }

        let mut id = ids.next_id();
        while self.contains(id) {
            id = ids.next_id();
        }

        let mut tasks = self.tasks.to_vec();
        tasks.push(Task::new(id, title));
        (
            Self {
                tasks: tasks.into(),
            },
            Some(id),
        )
    }

    pub fn toggle_completion(&self, id: TaskId) -> Self {
        self.map_task(id, |task| task.completed = !task.completed)
    }

    pub fn update_time(&self, id: TaskId, time_spent: u64) -> Self {
        self.map_task(id, |task| task.time_spent = time_spent)
    }

    fn map_task<F: FnOnce(&mut Task)>(&self, id: TaskId, apply: F) -> Self {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            return self.clone();
        };

        let mut tasks = self.tasks.to_vec();
        apply(&mut tasks[index]);
        Self {
            tasks: tasks.into(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
