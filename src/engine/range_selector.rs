use crate::domain::ZoomRange;

#[cfg(debug_assertions)]
use crate::config::DF;

/// In-progress drag. Either end may still be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionDraft {
    pub left: Option<usize>,
    pub right: Option<usize>,
}

impl SelectionDraft {
    /// Both ends, ordered. `None` until the pointer has moved.
    pub fn span(&self) -> Option<(usize, usize)> {
        match (self.left, self.right) {
            (Some(l), Some(r)) => Some((l.min(r), l.max(r))),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging(SelectionDraft),
}

/// What `commit` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A real drag: the zoom range was replaced.
    Zoomed(ZoomRange),
    /// Press and release on the same sample (or no movement): zoom unchanged.
    Click,
    /// Nothing was being dragged.
    Ignored,
}

/// Drag-to-zoom state machine: Idle -> Dragging -> (commit) -> Idle.
/// Plain data plus transitions; knows nothing about pointers or pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeSelector {
    state: SelectionState,
    zoom: ZoomRange,
}

impl RangeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a drag. A press while already dragging restarts the draft.
    pub fn begin_drag(&mut self, index: usize) {
        self.state = SelectionState::Dragging(SelectionDraft {
            left: Some(index),
            right: None,
        });
    }

    /// No-op unless dragging.
    pub fn update_drag(&mut self, index: usize) {
        if let SelectionState::Dragging(draft) = &mut self.state {
            draft.right = Some(index);
        }
    }

    /// Ends the drag against a series of `len` samples.
    /// Ends are clamped to `[0, len - 1]` so a committed range is always valid for the series
    /// it was drawn on.
    pub fn commit(&mut self, len: usize) -> CommitOutcome {
        let SelectionState::Dragging(draft) = std::mem::take(&mut self.state) else {
            return CommitOutcome::Ignored;
        };

        let outcome = match (draft.left, draft.right) {
            (Some(left), Some(right)) if len > 0 => {
                let last = len - 1;
                let (left, right) = (left.min(last), right.min(last));
                if left == right {
                    CommitOutcome::Click
                } else {
                    self.zoom = ZoomRange::between(left, right);
                    CommitOutcome::Zoomed(self.zoom)
                }
            }
            _ => CommitOutcome::Click,
        };

        #[cfg(debug_assertions)]
        if DF.log_selection {
            log::info!("SELECTION: commit {:?} -> {:?}", draft, outcome);
        }

        outcome
    }

    /// Drop an in-progress drag without touching the zoom range.
    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Back to Idle with the unbounded range.
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
        self.zoom = ZoomRange::UNBOUNDED;
    }

    pub fn is_zoomed(&self) -> bool {
        !self.zoom.is_unbounded()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging(_))
    }

    pub fn zoom(&self) -> ZoomRange {
        self.zoom
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn draft(&self) -> Option<SelectionDraft> {
        match self.state {
            SelectionState::Dragging(draft) => Some(draft),
            SelectionState::Idle => None,
        }
    }

    /// Called whenever the active series changes length. A range or draft that references
    /// an index past the end is stale: reset. Returns true if a reset happened.
    pub fn revalidate(&mut self, len: usize) -> bool {
        let draft_stale = self
            .draft()
            .is_some_and(|d| [d.left, d.right].into_iter().flatten().any(|i| i >= len));

        if !self.zoom.fits(len) || draft_stale {
            #[cfg(debug_assertions)]
            if DF.log_selection {
                log::info!("SELECTION: stale range {:?} for len {}, resetting", self.zoom, len);
            }
            self.reset();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bound;

    #[test]
    fn same_index_release_is_a_click() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(5);
        sel.update_drag(5);
        assert_eq!(sel.commit(50), CommitOutcome::Click);
        assert!(!sel.is_zoomed());
        assert!(!sel.is_dragging());
    }

    #[test]
    fn release_without_movement_is_a_click() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(5);
        assert_eq!(sel.commit(50), CommitOutcome::Click);
        assert_eq!(sel.zoom(), ZoomRange::UNBOUNDED);
    }

    #[test]
    fn reversed_drag_is_normalized() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(10);
        sel.update_drag(3);
        let outcome = sel.commit(50);
        let expected = ZoomRange {
            start: Bound::At(3),
            end: Bound::At(10),
        };
        assert_eq!(outcome, CommitOutcome::Zoomed(expected));
        assert_eq!(sel.zoom(), expected);
        assert!(sel.is_zoomed());
        assert_eq!(sel.draft(), None);
    }

    #[test]
    fn click_keeps_previous_zoom() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(2);
        sel.update_drag(8);
        sel.commit(50);
        sel.begin_drag(4);
        sel.update_drag(4);
        assert_eq!(sel.commit(50), CommitOutcome::Click);
        assert_eq!(sel.zoom(), ZoomRange::between(2, 8));
    }

    #[test]
    fn update_without_begin_is_ignored() {
        let mut sel = RangeSelector::new();
        sel.update_drag(7);
        assert_eq!(sel.state(), SelectionState::Idle);
        assert_eq!(sel.commit(50), CommitOutcome::Ignored);
    }

    #[test]
    fn commit_clamps_to_series() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(3);
        sel.update_drag(70);
        assert_eq!(sel.commit(20), CommitOutcome::Zoomed(ZoomRange::between(3, 19)));

        sel.begin_drag(1);
        sel.update_drag(2);
        assert_eq!(sel.commit(0), CommitOutcome::Click);
    }

    #[test]
    fn reset_restores_unbounded_sentinels() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(1);
        sel.update_drag(9);
        sel.commit(50);
        sel.begin_drag(4);
        sel.reset();
        assert_eq!(sel.zoom(), ZoomRange::UNBOUNDED);
        assert_eq!(sel.zoom().resolve(50), Some((0, 49)));
        assert!(!sel.is_zoomed());
        assert!(!sel.is_dragging());
    }

    #[test]
    fn shrinking_series_resets_stale_range() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(30);
        sel.update_drag(45);
        sel.commit(50);
        assert!(!sel.revalidate(50));
        assert!(sel.revalidate(40));
        assert!(!sel.is_zoomed());
    }

    #[test]
    fn stale_draft_is_dropped() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(30);
        assert!(sel.revalidate(10));
        assert!(!sel.is_dragging());
    }

    #[test]
    fn draft_span_is_ordered() {
        let mut sel = RangeSelector::new();
        sel.begin_drag(9);
        assert_eq!(sel.draft().unwrap().span(), None);
        sel.update_drag(2);
        assert_eq!(sel.draft().unwrap().span(), Some((2, 9)));
    }
}
