//! Linear undo/redo history over canvas snapshots.

use thiserror::Error;

/// Errors raised while moving through history.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history entry could not be restored: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Bounded stack of serialized snapshots with a cursor.
///
/// The entry at `index` always describes the live canvas. Pushing after an
/// undo discards the redo branch.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
    limit: usize,
}

impl History {
    /// Start a history whose entry 0 is `initial`.
    pub fn new(initial: String, limit: usize) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            limit: limit.max(1),
        }
    }

    /// Record a new state after the current one.
    pub fn push(&mut self, snapshot: String) {
        self.entries.truncate(self.index + 1);
        self.entries.push(snapshot);
        self.index = self.entries.len() - 1;

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            self.index -= excess;
            log::debug!("History full, evicted {} oldest entries", excess);
        }
        log::debug!("History push: {}/{}", self.index + 1, self.entries.len());
    }

    /// Step back, handing the target entry to `apply`. The cursor only moves
    /// when `apply` succeeds. Returns `Ok(false)` at the oldest entry.
    pub fn undo<E>(&mut self, apply: impl FnOnce(&str) -> Result<(), E>) -> Result<bool, E> {
        if self.index == 0 {
            return Ok(false);
        }
        apply(&self.entries[self.index - 1])?;
        self.index -= 1;
        Ok(true)
    }

    /// Step forward; see [`History::undo`].
    pub fn redo<E>(&mut self, apply: impl FnOnce(&str) -> Result<(), E>) -> Result<bool, E> {
        if self.index + 1 >= self.entries.len() {
            return Ok(false);
        }
        apply(&self.entries[self.index + 1])?;
        self.index += 1;
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// The entry describing the live state.
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn noop(_: &str) -> Result<(), Infallible> {
        Ok(())
    }

    #[test]
    fn test_undo_redo_bounds_are_noops() {
        let mut history = History::new("0".into(), 10);
        assert_eq!(history.undo(noop), Ok(false));
        assert_eq!(history.redo(noop), Ok(false));

        history.push("1".into());
        assert_eq!(history.redo(noop), Ok(false));
        assert_eq!(history.undo(noop), Ok(true));
        assert_eq!(history.current(), "0");
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = History::new("0".into(), 10);
        history.push("1".into());
        history.push("2".into());
        history.undo(noop).unwrap();
        history.push("3".into());

        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        history.undo(noop).unwrap();
        assert_eq!(history.current(), "1");
    }

    #[test]
    fn test_limit_evicts_oldest() {
        let mut history = History::new("0".into(), 3);
        for i in 1..=5 {
            history.push(i.to_string());
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current(), "5");

        history.undo(noop).unwrap();
        history.undo(noop).unwrap();
        assert_eq!(history.current(), "3");
        assert!(!history.can_undo());
    }

    #[test]
    fn test_failed_apply_keeps_cursor() {
        let mut history = History::new("0".into(), 10);
        history.push("1".into());
        let result = history.undo(|_| Err("boom"));
        assert_eq!(result, Err("boom"));
        assert_eq!(history.index(), 1);
    }

    #[test]
    fn test_apply_sees_target_entry() {
        let mut history = History::new("empty".into(), 10);
        history.push("one".into());
        let mut seen = String::new();
        history
            .undo(|s| {
                seen = s.to_string();
                Ok::<(), Infallible>(())
            })
            .unwrap();
        assert_eq!(seen, "empty");
    }
}
