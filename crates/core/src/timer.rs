//! Per-task stopwatch driven by an external clock.
//!
//! A controller never sleeps or spawns anything. While running it holds the
//! deadline of its next tick, and the owner calls [`TimerController::poll`]
//! with the current instant to deliver every tick that has come due. Stopping
//! clears the deadline and dropping the controller discards it, so a tick can
//! never fire after either.

use std::fmt;
use std::time::{Duration, Instant};

use crate::model::{Task, TaskId, TimerState};

const MIN_PERIOD: Duration = Duration::from_millis(1);

type TimeCallback = Box<dyn FnMut(u64)>;

pub struct TimerController {
    task_id: TaskId,
    state: TimerState,
    elapsed: u64,
    period: Duration,
    next_tick: Option<Instant>,
    on_time_update: TimeCallback,
}

impl TimerController {
    /// Create a stopped controller seeded from the task's recorded time.
    ///
    /// `on_time_update` receives the new elapsed total after every tick.
    pub fn new<F>(task: &Task, period: Duration, on_time_update: F) -> Self
    where
        F: FnMut(u64) + 'static,
    {
        tracing::debug!(task_id = task.id, "timer controller created");
        Self {
            task_id: task.id,
            state: TimerState::Stopped,
            elapsed: task.time_spent,
            period: period.max(MIN_PERIOD),
            next_tick: None,
            on_time_update: Box::new(on_time_update),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the next tick is due, if the timer is running.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.next_tick
    }

    /// Flip between stopped and running; returns the new state.
    pub fn toggle(&mut self, now: Instant) -> TimerState {
        match self.state {
            TimerState::Stopped => self.start(now),
            TimerState::Running => self.stop(),
        };
        self.state
    }

    /// Start ticking one period after `now`. Returns false if already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TimerState::Running;
        self.next_tick = Some(now + self.period);
        tracing::debug!(task_id = self.task_id, elapsed = self.elapsed, "timer started");
        true
    }

    /// Stop ticking immediately. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.state = TimerState::Stopped;
        self.next_tick = None;
        tracing::debug!(task_id = self.task_id, elapsed = self.elapsed, "timer stopped");
        true
    }

    /// Deliver every tick due at or before `now`, oldest first.
    ///
    /// Ticks stay on the schedule fixed at start, one period apart, so a late
    /// poll catches up instead of drifting. Returns the number delivered.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let mut fired = 0;
        while let Some(deadline) = self.next_tick {
            if deadline > now {
                break;
            }
            self.elapsed += 1;
            self.next_tick = Some(deadline + self.period);
            (self.on_time_update)(self.elapsed);
            fired += 1;
        }
        if fired > 0 {
            tracing::trace!(
                task_id = self.task_id,
                fired,
                elapsed = self.elapsed,
                "timer ticks delivered"
            );
        }
        fired
    }

    /// Tear the controller down; any pending tick goes with it.
    pub fn dispose(self) {
        drop(self);
    }
}

impl Drop for TimerController {
    fn drop(&mut self) {
        let was_running = self.next_tick.take().is_some();
        tracing::debug!(task_id = self.task_id, was_running, "timer controller disposed");
    }
}

impl fmt::Debug for TimerController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerController")
            .field("task_id", &self.task_id)
            .field("state", &self.state)
            .field("elapsed", &self.elapsed)
            .field("period", &self.period)
            .field("next_tick", &self.next_tick)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const SECOND: Duration = Duration::from_millis(1000);

    fn recording_controller(task: &Task) -> (TimerController, Rc<RefCell<Vec<u64>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let controller = TimerController::new(task, SECOND, move |elapsed| {
            sink.borrow_mut().push(elapsed)
        });
        (controller, calls)
    }

    #[test]
    fn starts_stopped_with_seeded_elapsed() {
        let mut task = Task::new(1, "Test Task");
        task.time_spent = 42;
        let (controller, calls) = recording_controller(&task);

        assert_eq!(controller.state(), TimerState::Stopped);
        assert_eq!(controller.elapsed(), 42);
        assert!(controller.next_deadline().is_none());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn five_seconds_of_running_reports_five_ticks() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();

        assert_eq!(controller.toggle(start), TimerState::Running);
        assert_eq!(controller.poll(start + Duration::from_millis(5000)), 5);

        assert_eq!(*calls.borrow(), vec![1, 2, 3, 4, 5]);
        assert_eq!(controller.elapsed(), 5);
    }

    #[test]
    fn ticks_fire_one_period_apart() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();
        controller.start(start);

        assert_eq!(controller.poll(start + Duration::from_millis(999)), 0);
        assert_eq!(controller.poll(start + SECOND), 1);
        assert_eq!(controller.poll(start + Duration::from_millis(1500)), 0);
        assert_eq!(controller.poll(start + Duration::from_millis(2000)), 1);
        assert_eq!(controller.next_deadline(), Some(start + 3 * SECOND));
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    #[test]
    fn stopping_cancels_further_ticks() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();

        controller.toggle(start);
        controller.poll(start + 5 * SECOND);
        assert_eq!(controller.toggle(start + 5 * SECOND), TimerState::Stopped);
        assert_eq!(controller.poll(start + 10 * SECOND), 0);

        assert_eq!(calls.borrow().len(), 5);
        assert_eq!(calls.borrow().last(), Some(&5));
        assert!(controller.next_deadline().is_none());
    }

    #[test]
    fn restarting_continues_from_local_elapsed() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();

        controller.start(start);
        controller.poll(start + 2 * SECOND);
        controller.stop();

        let resume = start + 60 * SECOND;
        controller.start(resume);
        controller.poll(resume + SECOND);

        assert_eq!(*calls.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn repeated_start_keeps_a_single_tick_source() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();

        assert!(controller.start(start));
        assert!(!controller.start(start + Duration::from_millis(300)));
        controller.poll(start + 5 * SECOND);

        assert_eq!(calls.borrow().len(), 5);
    }

    #[test]
    fn double_toggle_before_first_tick_is_a_full_stop() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        let start = Instant::now();

        controller.toggle(start);
        controller.toggle(start + Duration::from_millis(10));
        controller.poll(start + 5 * SECOND);

        assert!(calls.borrow().is_empty());
        assert!(!controller.is_running());
    }

    #[test]
    fn seeded_elapsed_continues_counting() {
        let mut task = Task::new(1, "Test Task");
        task.time_spent = 10;
        let (mut controller, calls) = recording_controller(&task);
        let start = Instant::now();

        controller.start(start);
        controller.poll(start + SECOND);

        assert_eq!(*calls.borrow(), vec![11]);
    }

    #[test]
    fn dispose_drops_the_callback() {
        let (mut controller, calls) = recording_controller(&Task::new(1, "Test Task"));
        controller.start(Instant::now());

        controller.dispose();

        assert_eq!(Rc::strong_count(&calls), 1);
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn zero_period_is_clamped() {
        let controller = TimerController::new(&Task::new(1, "t"), Duration::ZERO, |_| {});
        assert_eq!(controller.period(), MIN_PERIOD);
    }
}
