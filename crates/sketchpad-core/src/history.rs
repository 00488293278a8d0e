//! Snapshot-based undo/redo history.

/// How a new state enters the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Drop any redo states and push a new undo step.
    Append,
    /// Replace the current snapshot in place (in-flight drag updates).
    Overwrite,
}

/// Linear history of full-state snapshots.
///
/// `index` always points at a valid snapshot, so the history is never empty.
#[derive(Debug, Clone)]
pub struct History<T: Clone> {
    snapshots: Vec<T>,
    index: usize,
    /// Maximum number of snapshots to keep; `None` is unbounded.
    limit: Option<usize>,
}

impl<T: Clone> History<T> {
    /// Start a history holding only `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            snapshots: vec![initial],
            index: 0,
            limit: None,
        }
    }

    /// Cap the number of snapshots kept. A limit of zero is treated as one.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit.map(|l| l.max(1));
        self.enforce_limit();
        self
    }

    /// Record a new state.
    pub fn commit(&mut self, state: T, mode: CommitMode) {
        match mode {
            CommitMode::Overwrite => {
                self.snapshots[self.index] = state;
            }
            CommitMode::Append => {
                self.snapshots.truncate(self.index + 1);
                self.snapshots.push(state);
                self.index = self.snapshots.len() - 1;
                self.enforce_limit();
            }
        }
    }

    fn enforce_limit(&mut self) {
        let Some(limit) = self.limit else {
            return;
        };
        if self.snapshots.len() > limit {
            let excess = self.snapshots.len() - limit;
            self.snapshots.drain(..excess);
            self.index = self.index.saturating_sub(excess);
        }
    }

    /// Step back one snapshot. Returns false at the oldest snapshot.
    pub fn undo(&mut self) -> bool {
        if self.index > 0 {
            self.index -= 1;
            true
        } else {
            false
        }
    }

    /// Step forward one snapshot. Returns false at the newest snapshot.
    pub fn redo(&mut self) -> bool {
        if self.index + 1 < self.snapshots.len() {
            self.index += 1;
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> &T {
        &self.snapshots[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept alongside `len` for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_appends_two_undos() {
        let mut history = History::new(0);
        history.commit(1, CommitMode::Append);
        history.commit(2, CommitMode::Append);
        history.commit(3, CommitMode::Append);
        assert_eq!(history.index(), 3);

        assert!(history.undo());
        assert!(history.undo());
        assert_eq!(history.index(), 1);
        assert_eq!(*history.current(), 1);
    }

    #[test]
    fn test_undo_redo_bounds_are_noops() {
        let mut history = History::new("a");
        assert!(!history.undo());
        assert!(!history.redo());
        history.commit("b", CommitMode::Append);
        assert!(!history.redo());
        assert!(history.undo());
        assert!(!history.can_undo());
        assert!(history.can_redo());
        assert!(history.redo());
        assert_eq!(*history.current(), "b");
    }

    #[test]
    fn test_overwrite_keeps_length() {
        let mut history = History::new(0);
        history.commit(1, CommitMode::Append);
        let len = history.len();
        for value in 2..10 {
            history.commit(value, CommitMode::Overwrite);
        }
        assert_eq!(history.len(), len);
        assert_eq!(history.index(), 1);
        assert_eq!(*history.current(), 9);
    }

    #[test]
    fn test_append_discards_redo_branch() {
        let mut history = History::new(0);
        history.commit(1, CommitMode::Append);
        history.commit(2, CommitMode::Append);
        history.undo();
        history.undo();
        history.commit(5, CommitMode::Append);

        assert_eq!(history.len(), 2);
        assert_eq!(history.index(), 1);
        assert!(!history.can_redo());
        assert_eq!(*history.current(), 5);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::new(0).with_limit(Some(3));
        for value in 1..=5 {
            history.commit(value, CommitMode::Append);
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(*history.current(), 5);

        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
        assert_eq!(*history.current(), 3);
    }
}
