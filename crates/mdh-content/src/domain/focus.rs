//! Focus Tracker
//!
//! Decides which element is authoritative for "currently focused" and when
//! the toggle button's visibility must change.
//!
//! Two triggers feed [`FocusTracker::evaluate`]:
//!
//! - the periodic poll, which re-derives the focused element from scratch
//!   and is correct on its own;
//! - capturing `focus` events, a latency hint that may never arrive across
//!   nested frames.
//!
//! Renderability of one element is assumed not to change, so re-evaluating
//! the same element is a no-op.

use super::dom::{DocumentId, FocusCandidate, ListenerKind};
use super::listeners::ListenerSet;

/// Last reported renderability. A toggle is due only on a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderabilityLatch {
    last: Option<bool>,
}

impl RenderabilityLatch {
    /// Starts at "not renderable", matching a freshly disabled button.
    pub fn new() -> Self {
        Self { last: Some(false) }
    }

    /// Record `renderable`; returns it if it differs from the last state.
    pub fn observe(&mut self, renderable: bool) -> Option<bool> {
        if self.last == Some(renderable) {
            return None;
        }
        self.last = Some(renderable);
        Some(renderable)
    }

    /// Forget the last state so the next observation always reports.
    pub fn forget(&mut self) {
        self.last = None;
    }

    pub fn state(&self) -> Option<bool> {
        self.last
    }
}

impl Default for RenderabilityLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastChecked {
    Nothing,
    Candidate(Option<FocusCandidate>),
}

/// Outcome of one evaluation; the caller performs the side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Evaluation {
    /// Whether renderability was probed.
    pub checked: bool,
    /// Document that needs a focus listener installed.
    pub attach_focus_listener: Option<DocumentId>,
    /// New button visibility to request.
    pub toggle: Option<bool>,
}

impl Evaluation {
    fn unchanged() -> Self {
        Self::default()
    }
}

/// Per-frame focus state.
#[derive(Debug, Clone)]
pub struct FocusTracker {
    last: LastChecked,
    latch: RenderabilityLatch,
    focus_listeners: ListenerSet,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self {
            last: LastChecked::Nothing,
            latch: RenderabilityLatch::new(),
            focus_listeners: ListenerSet::new(),
        }
    }

    /// Evaluate the current candidate.
    ///
    /// `probe` is consulted at most once, and never for the element that
    /// was checked last. No candidate counts as not renderable.
    pub fn evaluate<F>(&mut self, candidate: Option<FocusCandidate>, probe: F) -> Evaluation
    where
        F: FnOnce(&FocusCandidate) -> bool,
    {
        if self.last == LastChecked::Candidate(candidate) {
            return Evaluation::unchanged();
        }
        self.last = LastChecked::Candidate(candidate);

        let mut evaluation = Evaluation {
            checked: true,
            ..Evaluation::default()
        };
        let renderable = match candidate {
            Some(candidate) => {
                if self.focus_listeners.attach(candidate.document, ListenerKind::Focus) {
                    evaluation.attach_focus_listener = Some(candidate.document);
                }
                probe(&candidate)
            }
            None => false,
        };
        evaluation.toggle = self.latch.observe(renderable);
        evaluation
    }

    /// Record a focus listener installed outside `evaluate`. True if new.
    pub fn note_focus_listener(&mut self, document: DocumentId) -> bool {
        self.focus_listeners.attach(document, ListenerKind::Focus)
    }

    /// Forget cached state when this frame's tab becomes active.
    /// Installed listeners stay installed.
    pub fn reset(&mut self) {
        self.last = LastChecked::Nothing;
        self.latch.forget();
    }

    /// The element checked last, if any.
    pub fn last_checked(&self) -> Option<FocusCandidate> {
        match self.last {
            LastChecked::Candidate(candidate) => candidate,
            LastChecked::Nothing => None,
        }
    }

    pub fn renderable_state(&self) -> Option<bool> {
        self.latch.state()
    }
}

impl Default for FocusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dom::ElementId;
    use proptest::prelude::*;
    use std::cell::Cell;

    fn candidate(element: u64, document: u64) -> FocusCandidate {
        FocusCandidate::new(ElementId(element), DocumentId(document))
    }

    #[test]
    fn test_same_element_is_checked_once() {
        let mut tracker = FocusTracker::new();
        let probes = Cell::new(0);
        let elem = candidate(1, 1);

        let first = tracker.evaluate(Some(elem), |_| {
            probes.set(probes.get() + 1);
            true
        });
        let second = tracker.evaluate(Some(elem), |_| {
            probes.set(probes.get() + 1);
            true
        });

        assert_eq!(probes.get(), 1);
        assert_eq!(first.toggle, Some(true));
        assert_eq!(second, Evaluation::unchanged());
    }

    #[test]
    fn test_transitions_only() {
        let mut tracker = FocusTracker::new();
        let sequence = [false, false, true, true, false];
        let toggles: Vec<bool> = sequence
            .iter()
            .enumerate()
            .filter_map(|(i, &renderable)| {
                tracker
                    .evaluate(Some(candidate(i as u64, 1)), |_| renderable)
                    .toggle
            })
            .collect();
        assert_eq!(toggles, vec![true, false]);
    }

    #[test]
    fn test_focus_listener_attached_once_per_document() {
        let mut tracker = FocusTracker::new();
        let a = tracker.evaluate(Some(candidate(1, 1)), |_| false);
        let b = tracker.evaluate(Some(candidate(2, 1)), |_| false);
        let c = tracker.evaluate(Some(candidate(3, 2)), |_| false);

        assert_eq!(a.attach_focus_listener, Some(DocumentId(1)));
        assert_eq!(b.attach_focus_listener, None);
        assert_eq!(c.attach_focus_listener, Some(DocumentId(2)));
    }

    #[test]
    fn test_reset_reports_current_state() {
        let mut tracker = FocusTracker::new();
        let elem = candidate(1, 1);
        tracker.evaluate(Some(elem), |_| false);

        tracker.reset();
        assert_eq!(tracker.renderable_state(), None);

        // Same element, same state, but the new active tab must hear it
        let after = tracker.evaluate(Some(elem), |_| false);
        assert!(after.checked);
        assert_eq!(after.toggle, Some(false));
        // Listener from before the reset is still installed
        assert_eq!(after.attach_focus_listener, None);
    }

    #[test]
    fn test_no_candidate_is_not_renderable() {
        let mut tracker = FocusTracker::new();
        tracker.evaluate(Some(candidate(1, 1)), |_| true);
        let blurred = tracker.evaluate(None, |_| unreachable!());
        assert_eq!(blurred.toggle, Some(false));
        assert_eq!(tracker.last_checked(), None);
    }

    proptest! {
        /// The toggles emitted are exactly the state changes of the
        /// renderability sequence, starting from "not renderable".
        #[test]
        fn prop_toggles_follow_transitions(states in proptest::collection::vec(any::<bool>(), 0..40)) {
            let mut tracker = FocusTracker::new();
            let mut emitted = Vec::new();
            for (i, &renderable) in states.iter().enumerate() {
                if let Some(show) = tracker.evaluate(Some(candidate(i as u64, 0)), |_| renderable).toggle {
                    emitted.push(show);
                }
            }

            let mut expected = Vec::new();
            let mut last = false;
            for &renderable in &states {
                if renderable != last {
                    expected.push(renderable);
                    last = renderable;
                }
            }
            prop_assert_eq!(emitted, expected);
        }
    }
}
