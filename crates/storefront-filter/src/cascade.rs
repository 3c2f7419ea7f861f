//! Cascading selection transitions.
//!
//! When the user jumps from one option to another in an ordered list, the
//! options in between light up in sequence, sweeping in the direction of
//! travel, then clear. The selection itself commits immediately — the
//! cascade is cosmetic feedback layered on top.
//!
//! A fixed animation budget is split evenly across the in-between options;
//! each highlight clears a fixed lag after the next one starts so neighbors
//! visibly overlap. A new selection made mid-cascade supersedes the old one:
//! the tracker bumps a generation counter and clears the set synchronously,
//! and callbacks scheduled by the superseded cascade are discarded without
//! executing. At quiescence the transitioning set is always empty.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::schedule::Scheduler;

/// Total animation budget in milliseconds, split over `between.len() + 1`
/// steps.
pub const CASCADE_BUDGET_MS: f64 = 200.0;

/// Lag in milliseconds before each highlight clears, layered on top of the
/// step schedule.
pub const CASCADE_CLEAR_LAG_MS: f64 = 150.0;

/// Tracks which options are mid-highlight and drives selection commits.
pub struct CascadeTracker<S> {
    scheduler: S,
    transitioning: Arc<Mutex<HashSet<String>>>,
    generation: Arc<AtomicU64>,
}

impl<S: Scheduler> CascadeTracker<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            transitioning: Arc::new(Mutex::new(HashSet::new())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Snapshot of the options currently mid-highlight.
    #[must_use]
    pub fn transitioning(&self) -> HashSet<String> {
        lock(&self.transitioning).clone()
    }

    #[must_use]
    pub fn is_transitioning(&self, option: &str) -> bool {
        lock(&self.transitioning).contains(option)
    }

    /// Applies a selection change, animating across the options between the
    /// current selection (resolved via `is_checked`) and `new_value`.
    ///
    /// Selecting the already-current value is a complete no-op — `on_select`
    /// does not run. If either endpoint is not in `options`, the cascade is
    /// skipped but the selection still commits. `on_select` always runs
    /// synchronously, before any highlight timer fires.
    #[allow(clippy::cast_precision_loss)] // option lists are tiny
    pub fn handle_selection<C, F>(
        &self,
        options: &[String],
        is_checked: C,
        new_value: &str,
        on_select: F,
    ) where
        C: Fn(&str) -> bool,
        F: FnOnce(&str),
    {
        let current_index = options.iter().position(|option| is_checked(option));
        let current_value = current_index.map(|index| options[index].as_str());
        if current_value == Some(new_value) {
            return;
        }

        let new_index = options.iter().position(|option| option.as_str() == new_value);

        // Supersede any in-flight cascade: stale callbacks are discarded and
        // its highlights dropped, so the set only ever reflects one schedule.
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        lock(&self.transitioning).clear();

        if let (Some(current_index), Some(new_index)) = (current_index, new_index) {
            let start = current_index.min(new_index);
            let end = current_index.max(new_index);
            let mut between: Vec<String> = options[start + 1..end].to_vec();
            if current_index > new_index {
                between.reverse();
            }

            let step_ms = CASCADE_BUDGET_MS / (between.len() as f64 + 1.0);

            for (index, option) in between.into_iter().enumerate() {
                let offset_ms = index as f64 * step_ms;

                let set = Arc::clone(&self.transitioning);
                let guard = Arc::clone(&self.generation);
                let entering = option.clone();
                self.scheduler.schedule(
                    millis(offset_ms),
                    Box::new(move || {
                        if guard.load(Ordering::SeqCst) == generation {
                            lock(&set).insert(entering);
                        }
                    }),
                );

                let set = Arc::clone(&self.transitioning);
                let guard = Arc::clone(&self.generation);
                self.scheduler.schedule(
                    millis(offset_ms + step_ms + CASCADE_CLEAR_LAG_MS),
                    Box::new(move || {
                        if guard.load(Ordering::SeqCst) == generation {
                            lock(&set).remove(&option);
                        }
                    }),
                );
            }
        }

        on_select(new_value);
    }
}

fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

fn millis(ms: f64) -> Duration {
    Duration::from_secs_f64(ms / 1000.0)
}
