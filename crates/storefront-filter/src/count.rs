//! Displayed product-count reconciliation.
//!
//! Two counting modes, keyed off the active filter set:
//!
//! - filtered: the total is the length of the currently loaded page of
//!   product nodes. Page-bounded by definition — not a true total across all
//!   pages — and resolved synchronously;
//! - unfiltered: the exact total comes from an exhaustive paged walk through
//!   the count collaborator, which is async and can resolve after the user
//!   has already moved on.
//!
//! The reconciler guards against that stale completion with a generation
//! ticket: every context change bumps the generation, and a completion whose
//! ticket is no longer current is discarded instead of overwriting the newer
//! context's total.

/// Context-change detection and memoization for the displayed total.
#[derive(Debug, Default)]
pub struct CountReconciler {
    context: Option<CountContext>,
    total: Option<u64>,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CountContext {
    handle: String,
    filters: Vec<String>,
    loaded_len: usize,
}

/// Ties an in-flight exact-count fetch to the context that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountTicket {
    generation: u64,
}

/// What the caller must do after reporting the current context.
#[derive(Debug, PartialEq, Eq)]
pub enum CountAction {
    /// Context unchanged; the memoized total stands.
    Unchanged,
    /// Filtered context: the approximate total was applied synchronously.
    Resolved(u64),
    /// Unfiltered context: fetch the exact total and report it back through
    /// [`CountReconciler::complete`] with this ticket.
    FetchExact(CountTicket),
}

impl CountReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently displayed total, if one has been resolved.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    /// Reports the current collection context. Recomputes only when the
    /// handle, the active filter set, or the loaded node count changed.
    pub fn observe(&mut self, handle: &str, filters: &[String], loaded_len: usize) -> CountAction {
        let context = CountContext {
            handle: handle.to_owned(),
            filters: filters.to_vec(),
            loaded_len,
        };
        if self.context.as_ref() == Some(&context) {
            return CountAction::Unchanged;
        }

        self.context = Some(context);
        self.generation += 1;

        if filters.is_empty() {
            CountAction::FetchExact(CountTicket {
                generation: self.generation,
            })
        } else {
            let total = u64::try_from(loaded_len).unwrap_or(u64::MAX);
            self.total = Some(total);
            CountAction::Resolved(total)
        }
    }

    /// Applies an exact-count result. Returns `false` (and leaves the total
    /// untouched) when the ticket's context has been superseded.
    pub fn complete(&mut self, ticket: CountTicket, total: u64) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.total = Some(total);
        true
    }
}
