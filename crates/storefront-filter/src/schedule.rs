//! Pluggable timer capability for the cascade tracker.
//!
//! The tracker only needs "run this closure after a delay"; routing that
//! through a trait keeps the highlight state machine deterministic under
//! test (virtual clock) while production uses tokio timers.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

type Task = Box<dyn FnOnce() + Send>;

pub trait Scheduler {
    /// Runs `task` once, `delay` from now. Fire-and-forget: there is no
    /// handle; invalidation is the caller's concern.
    fn schedule(&self, delay: Duration, task: Task);
}

impl<S: Scheduler + ?Sized> Scheduler for std::sync::Arc<S> {
    fn schedule(&self, delay: Duration, task: Task) {
        (**self).schedule(delay, task);
    }
}

/// Scheduler backed by tokio timers. Must be used from within a tokio
/// runtime; each task runs on its own spawned future.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Deterministic scheduler driven by a virtual clock.
///
/// Tasks run inline from [`ManualScheduler::advance`], in due order with
/// insertion order breaking ties. Nothing runs until the clock is advanced,
/// so tests can observe state between steps.
#[derive(Default)]
pub struct ManualScheduler {
    inner: Mutex<ManualState>,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    seq: u64,
    tasks: Vec<Scheduled>,
}

struct Scheduled {
    due: Duration,
    seq: u64,
    task: Task,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks not yet due.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Advances the virtual clock by `delta`, running every task that falls
    /// due. The lock is released while each task runs, so tasks may schedule
    /// further tasks; those run too if they fall within the window.
    pub fn advance(&self, delta: Duration) {
        let target = self.lock().now + delta;
        loop {
            let next = {
                let mut state = self.lock();
                let due_index = state
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, scheduled)| scheduled.due <= target)
                    .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.seq))
                    .map(|(index, _)| index);
                match due_index {
                    Some(index) => {
                        let scheduled = state.tasks.remove(index);
                        state.now = state.now.max(scheduled.due);
                        Some(scheduled.task)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };
            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        let mut state = self.lock();
        let due = state.now + delay;
        let seq = state.seq;
        state.seq += 1;
        state.tasks.push(Scheduled { due, seq, task });
    }
}
