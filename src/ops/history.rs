use crate::model::Board;

/// Maximum number of undo snapshots kept
pub const HISTORY_LIMIT: usize = 30;

/// Bounded undo log of full `boards` snapshots.
///
/// Snapshots are taken immediately before a mutation. There is no redo: an
/// undone snapshot is gone once restored.
#[derive(Debug, Clone, Default)]
pub struct History {
    snapshots: Vec<Vec<Board>>,
}

impl History {
    pub fn new() -> Self {
        History {
            snapshots: Vec::new(),
        }
    }

    /// Deep-copy `boards` onto the stack, evicting the oldest entry past the limit
    pub fn record(&mut self, boards: &[Board]) {
        self.snapshots.push(boards.to_vec());
        if self.snapshots.len() > HISTORY_LIMIT {
            self.snapshots.drain(..self.snapshots.len() - HISTORY_LIMIT);
        }
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Vec<Board>> {
        self.snapshots.pop()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    /// Oldest snapshot still held (for tests and diagnostics)
    pub fn oldest(&self) -> Option<&[Board]> {
        self.snapshots.first().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boards_named(name: &str) -> Vec<Board> {
        vec![Board::new(1, name)]
    }

    #[test]
    fn record_and_pop_is_lifo() {
        let mut history = History::new();
        history.record(&boards_named("a"));
        history.record(&boards_named("b"));
        assert_eq!(history.pop().unwrap()[0].name, "b");
        assert_eq!(history.pop().unwrap()[0].name, "a");
        assert!(history.pop().is_none());
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = History::new();
        for i in 0..=HISTORY_LIMIT {
            history.record(&boards_named(&format!("s{}", i)));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        // s0 was evicted by the 31st record
        assert_eq!(history.oldest().unwrap()[0].name, "s1");
    }

    #[test]
    fn snapshots_are_deep_copies() {
        let mut history = History::new();
        let mut boards = boards_named("before");
        history.record(&boards);
        boards[0].name = "after".into();
        assert_eq!(history.pop().unwrap()[0].name, "before");
    }
}
