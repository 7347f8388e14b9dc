//! # Selection Model
//!
//! Each chart owns one [`SelectionModel`] holding its current filter.
//! Replacing the filter bumps a revision number; views that depend on the
//! selection keep a [`RevisionWatch`] and rebuild whenever the revision
//! they last saw is out of date.

mod brush;
mod query;

pub use brush::{BrushFilter, BrushGesture, BrushRegion, ScreenPoint};
pub use query::ProjectFilter;

/// A predicate over records of type `T`.
pub trait Filter<T: ?Sized> {
    fn matches(&self, item: &T) -> bool;

    /// Whether the filter narrows anything down at all.
    fn is_active(&self) -> bool;
}

/// The current filter of one chart, plus a change counter.
#[derive(Debug, Clone, Default)]
pub struct SelectionModel<F> {
    filter: F,
    revision: u64,
}

impl<F: Clone + Default + PartialEq> SelectionModel<F> {
    pub fn current_filter(&self) -> &F {
        &self.filter
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the filter. Returns `false` (and leaves the revision alone)
    /// when the new filter equals the current one.
    pub fn apply(&mut self, filter: F) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.revision += 1;
        true
    }

    /// Apply `filter`, or clear back to the default if it is already the
    /// current filter.
    pub fn toggle(&mut self, filter: F) -> bool {
        if self.filter == filter {
            self.apply(F::default())
        } else {
            self.apply(filter)
        }
    }

    /// Edit a copy of the current filter and apply the result.
    pub fn update(&mut self, edit: impl FnOnce(&mut F)) -> bool {
        let mut next = self.filter.clone();
        edit(&mut next);
        self.apply(next)
    }

    /// The records the current filter keeps, as a new sequence.
    pub fn filter_items<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        F: Filter<T>,
    {
        items.iter().filter(|item| self.filter.matches(item)).collect()
    }
}

/// Tracks the last revision of a [`SelectionModel`] a dependent view saw.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevisionWatch {
    seen: Option<u64>,
}

impl RevisionWatch {
    /// Returns `true` the first time and whenever `revision` moved since the
    /// previous call.
    pub fn changed(&mut self, revision: u64) -> bool {
        if self.seen == Some(revision) {
            return false;
        }
        self.seen = Some(revision);
        true
    }

    /// Force the next [`RevisionWatch::changed`] to report a change.
    pub fn invalidate(&mut self) {
        self.seen = None;
    }
}
