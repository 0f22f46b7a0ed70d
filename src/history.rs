//! Bounded undo history.

use std::collections::VecDeque;

/// Default number of snapshots retained by an [`UndoLog`].
pub const DEFAULT_UNDO_CAPACITY: usize = 20;

/// Stack of state snapshots with a fixed capacity.
///
/// Pushing onto a full log evicts the oldest snapshot.
///
/// # Examples
/// ```
/// use rigidx::UndoLog;
///
/// let mut log = UndoLog::with_capacity(2);
/// log.push(1);
/// log.push(2);
/// log.push(3);
/// assert_eq!(log.pop(), Some(3));
/// assert_eq!(log.pop(), Some(2));
/// assert_eq!(log.pop(), None);
/// ```
#[derive(Clone, Debug)]
pub struct UndoLog<T> {
    /// Snapshots ordered from oldest to newest.
    entries: VecDeque<T>,
    /// Maximum number of retained snapshots.
    capacity: usize,
}

impl<T> Default for UndoLog<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_UNDO_CAPACITY)
    }
}

impl<T> UndoLog<T> {
    /// Create an empty log retaining at most `capacity` snapshots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a snapshot taken just before a mutation.
    pub fn push(&mut self, snapshot: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Remove and return the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    /// Drop every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of snapshots held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when there is nothing to undo.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snapshots held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
