//! Cancellable scheduled tasks
//!
//! All delayed work on the page (deferred chart construction, the resize
//! debounce, notification dismissal) goes through a `TimerHost`. The page is
//! single-threaded, so tasks are plain `FnOnce` closures and state is shared
//! with `Rc`/`Cell`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use uhi_site_shared::SiteResult;

/// Handle returned by `TimerHost::set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

/// Runs a task once after a delay
pub trait TimerHost {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) -> SiteResult<TimerId>;

    /// Cancel a pending task. Unknown or already-fired ids are ignored.
    fn clear_timeout(&self, id: TimerId);
}

/// A single cancel-and-reschedule slot.
///
/// Scheduling while a task is pending cancels the pending one first, so at
/// most one task from a slot is ever outstanding.
#[derive(Debug, Default)]
pub struct ScheduledTask {
    pending: Rc<Cell<Option<TimerId>>>,
}

impl ScheduledTask {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &self,
        timers: &dyn TimerHost,
        delay: Duration,
        task: Box<dyn FnOnce()>,
    ) -> SiteResult<TimerId> {
        self.cancel(timers);

        let slot = Rc::clone(&self.pending);
        let id = timers.set_timeout(
            delay,
            Box::new(move || {
                slot.set(None);
                task();
            }),
        )?;
        self.pending.set(Some(id));
        Ok(id)
    }

    /// Cancel the pending task, if any
    pub fn cancel(&self, timers: &dyn TimerHost) {
        if let Some(id) = self.pending.take() {
            timers.clear_timeout(id);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

/// Runs a task once a trigger has been quiet for `delay`
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    task: ScheduledTask,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            task: ScheduledTask::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Restart the quiet period; `task` replaces any pending one
    pub fn trigger<F>(&self, timers: &dyn TimerHost, task: F) -> SiteResult<()>
    where
        F: FnOnce() + 'static,
    {
        self.task.schedule(timers, self.delay, Box::new(task))?;
        Ok(())
    }

    pub fn cancel(&self, timers: &dyn TimerHost) {
        self.task.cancel(timers);
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualTimers;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_scheduled_task_fires_once() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(0));
        let task = ScheduledTask::new();

        let counter = Rc::clone(&fired);
        task.schedule(&timers, ms(100), Box::new(move || counter.set(counter.get() + 1)))
            .unwrap();
        assert!(task.is_pending());

        timers.advance(ms(99));
        assert_eq!(fired.get(), 0);
        timers.advance(ms(1));
        assert_eq!(fired.get(), 1);
        assert!(!task.is_pending());

        timers.advance(ms(1000));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let timers = ManualTimers::new();
        let log = Rc::new(std::cell::RefCell::new(Vec::new()));
        let task = ScheduledTask::new();

        for name in ["first", "second"] {
            let log = Rc::clone(&log);
            task.schedule(&timers, ms(50), Box::new(move || log.borrow_mut().push(name)))
                .unwrap();
        }

        timers.advance(ms(100));
        assert_eq!(*log.borrow(), vec!["second"]);
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn test_cancel() {
        let timers = ManualTimers::new();
        let fired = Rc::new(Cell::new(false));
        let task = ScheduledTask::new();

        let flag = Rc::clone(&fired);
        task.schedule(&timers, ms(10), Box::new(move || flag.set(true)))
            .unwrap();
        task.cancel(&timers);

        timers.advance(ms(20));
        assert!(!fired.get());
        assert!(!task.is_pending());
    }

    #[test]
    fn test_debounce_burst_runs_once_after_quiet_period() {
        let timers = ManualTimers::new();
        let debouncer = Debouncer::new(ms(250));
        let runs = Rc::new(Cell::new(0));

        // 10 triggers, 10ms apart
        for _ in 0..10 {
            let runs = Rc::clone(&runs);
            debouncer
                .trigger(&timers, move || runs.set(runs.get() + 1))
                .unwrap();
            timers.advance(ms(10));
        }
        // Last trigger was 10ms ago
        timers.advance(ms(239));
        assert_eq!(runs.get(), 0);
        assert!(debouncer.is_pending());

        timers.advance(ms(1));
        assert_eq!(runs.get(), 1);
        assert!(!debouncer.is_pending());
    }
}
