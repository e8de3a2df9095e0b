//! Microtask queue and debounced tasks.
//!
//! The [`Scheduler`] is an explicit FIFO of deferred closures. Nothing runs on
//! its own: the host drains the queue at the end of each turn with
//! [`Scheduler::run_until_idle`]. A [`Debounced`] task built on top of it
//! enqueues at most one run per turn no matter how often it is triggered.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
struct SchedulerInner {
    queue: RefCell<VecDeque<Task>>,
    completed: Cell<u64>,
}

/// A single-threaded microtask queue.
///
/// Clones are handles to the same queue.
#[derive(Clone, Default)]
pub struct Scheduler {
    inner: Rc<SchedulerInner>,
}

impl Scheduler {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `task` to the queue.
    pub fn queue_microtask(&self, task: impl FnOnce() + 'static) {
        self.inner.queue.borrow_mut().push_back(Box::new(task));
    }

    /// Number of queued tasks.
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    /// Whether the queue is empty.
    pub fn is_idle(&self) -> bool {
        self.pending() == 0
    }

    /// Total number of tasks this scheduler has run.
    pub fn completed(&self) -> u64 {
        self.inner.completed.get()
    }

    /// Runs queued tasks until the queue is empty.
    ///
    /// Tasks queued while draining run in the same call. Returns how many
    /// tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            // Pop under a short borrow so tasks can queue more work.
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(task) = next else {
                break;
            };
            task();
            ran += 1;
            self.inner.completed.set(self.inner.completed.get() + 1);
        }
        ran
    }

    /// Wraps `f` in a [`Debounced`] task bound to this scheduler.
    pub fn debounce(&self, f: impl Fn() + 'static) -> Debounced {
        Debounced {
            scheduler: self.clone(),
            state: Rc::new(DebounceState {
                pending: Cell::new(false),
                runs: Cell::new(0),
                callback: Box::new(f),
            }),
        }
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.pending())
            .field("completed", &self.completed())
            .finish()
    }
}

struct DebounceState {
    pending: Cell<bool>,
    runs: Cell<u64>,
    callback: Box<dyn Fn()>,
}

/// A task that runs at most once per drained batch of triggers.
///
/// The first [`trigger`](Self::trigger) queues one microtask; further triggers
/// before that microtask runs are absorbed. The callback therefore sees only
/// the state left by the last trigger of the burst.
#[derive(Clone)]
pub struct Debounced {
    scheduler: Scheduler,
    state: Rc<DebounceState>,
}

impl Debounced {
    /// Requests a run. Returns `true` if this call queued it, `false` if a run
    /// was already pending.
    pub fn trigger(&self) -> bool {
        if self.state.pending.replace(true) {
            tracing::trace!("debounced run already pending");
            return false;
        }
        let state = Rc::clone(&self.state);
        self.scheduler.queue_microtask(move || {
            state.pending.set(false);
            state.runs.set(state.runs.get() + 1);
            (state.callback)();
        });
        true
    }

    /// Whether a run is queued but has not happened yet.
    pub fn is_pending(&self) -> bool {
        self.state.pending.get()
    }

    /// How many times the callback has run.
    pub fn runs(&self) -> u64 {
        self.state.runs.get()
    }
}

impl fmt::Debug for Debounced {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("pending", &self.is_pending())
            .field("runs", &self.runs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_runs_until_drained() {
        let scheduler = Scheduler::new();
        let hit = Rc::new(Cell::new(false));
        let h = hit.clone();
        scheduler.queue_microtask(move || h.set(true));

        assert!(!hit.get());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.run_until_idle(), 1);
        assert!(hit.get());
        assert!(scheduler.is_idle());
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let l = log.clone();
            scheduler.queue_microtask(move || l.borrow_mut().push(i));
        }
        scheduler.run_until_idle();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn tasks_queued_while_draining_run_in_same_call() {
        let scheduler = Scheduler::new();
        let hit = Rc::new(Cell::new(false));
        let inner = scheduler.clone();
        let h = hit.clone();
        scheduler.queue_microtask(move || {
            let h = h.clone();
            inner.queue_microtask(move || h.set(true));
        });

        assert_eq!(scheduler.run_until_idle(), 2);
        assert!(hit.get());
        assert_eq!(scheduler.completed(), 2);
    }

    #[test]
    fn debounce_coalesces_a_burst() {
        let scheduler = Scheduler::new();
        let runs = Rc::new(Cell::new(0));
        let r = runs.clone();
        let task = scheduler.debounce(move || r.set(r.get() + 1));

        assert!(task.trigger());
        assert!(!task.trigger());
        assert!(!task.trigger());
        assert!(task.is_pending());

        scheduler.run_until_idle();
        assert_eq!(runs.get(), 1);
        assert_eq!(task.runs(), 1);
        assert!(!task.is_pending());
    }

    #[test]
    fn debounce_rearms_after_running() {
        let scheduler = Scheduler::new();
        let task = scheduler.debounce(|| {});

        task.trigger();
        scheduler.run_until_idle();
        assert!(task.trigger());
        scheduler.run_until_idle();
        assert_eq!(task.runs(), 2);
    }

    #[test]
    fn trigger_from_inside_callback_schedules_another_run() {
        let scheduler = Scheduler::new();
        let slot: Rc<RefCell<Option<Debounced>>> = Rc::new(RefCell::new(None));
        let s = slot.clone();
        let task = scheduler.debounce(move || {
            if let Some(task) = s.borrow().as_ref() {
                if task.runs() < 2 {
                    task.trigger();
                }
            }
        });
        *slot.borrow_mut() = Some(task.clone());

        task.trigger();
        scheduler.run_until_idle();
        assert_eq!(task.runs(), 2);

        // Break the self-reference so the test does not leak.
        slot.borrow_mut().take();
    }
}
