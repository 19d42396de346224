//! Snapshot history for the colour layer.
//!
//! Every entry is a full copy of the layer. The first entry is the state the
//! canvas was loaded or reset to, and is never popped.

use image::RgbaImage;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<RgbaImage>,
}

impl History {
    /// Start a history whose only entry is `initial`.
    pub fn new(initial: RgbaImage) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    /// Record a snapshot taken after an action completed.
    pub fn commit(&mut self, snapshot: RgbaImage) {
        self.entries.push(snapshot);
    }

    /// Drop the newest entry and return the one now on top.
    ///
    /// Returns `None` without changing anything when only the initial entry
    /// remains.
    pub fn undo(&mut self) -> Option<&RgbaImage> {
        if self.entries.len() <= 1 {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    /// Replace the whole history with a single entry. Not undoable.
    pub fn reset(&mut self, blank: RgbaImage) {
        self.entries.clear();
        self.entries.push(blank);
    }

    pub fn can_undo(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes held by all snapshots.
    pub fn memory_usage(&self) -> usize {
        self.entries.iter().map(|e| e.as_raw().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(v: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([v, v, v, 255]))
    }

    #[test]
    fn test_new_history_cannot_undo() {
        let mut history = History::new(solid(0));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_returns_previous_snapshot() {
        let mut history = History::new(solid(0));
        history.commit(solid(1));
        history.commit(solid(2));
        assert_eq!(history.len(), 3);

        assert_eq!(history.undo(), Some(&solid(1)));
        assert_eq!(history.undo(), Some(&solid(0)));
        assert_eq!(history.undo(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_reset_leaves_single_entry() {
        let mut history = History::new(solid(0));
        history.commit(solid(1));
        history.reset(solid(9));
        assert_eq!(history.len(), 1);
        assert!(!history.can_undo());

        history.commit(solid(3));
        assert_eq!(history.undo(), Some(&solid(9)));
    }

    #[test]
    fn test_memory_usage() {
        let mut history = History::new(solid(0));
        history.commit(solid(1));
        assert_eq!(history.memory_usage(), 2 * 2 * 2 * 4);
    }
}
