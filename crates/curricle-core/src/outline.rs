//! Outline navigation state
//!
//! The outline sidebar highlights whichever module is most prominent in
//! the viewport. An input adapter feeds this tracker intersection
//! signals for each rendered module anchor; among anchors intersecting
//! at once, the most recent signal wins. Selecting an outline entry
//! produces a scroll request for the adapter to perform and forces the
//! target module expanded.

use crate::document::CourseDocument;
use crate::entity_id::EntityId;

/// A request to bring a module's anchor into view
///
/// The adapter owns how; a browser frontend would smooth-scroll to the
/// anchor element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub module_id: EntityId,
}

/// Tracks the module that currently owns the outline highlight
#[derive(Debug, Default)]
pub struct OutlineTracker {
    active: Option<EntityId>,
}

impl OutlineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently highlighted module, if any
    pub fn active_module(&self) -> Option<&EntityId> {
        self.active.as_ref()
    }

    /// Record one intersection signal
    ///
    /// A signal that reports intersecting takes the highlight (last
    /// writer wins); a signal that reports leaving does not clear it —
    /// the highlight moves only when another anchor intersects.
    pub fn observe(&mut self, module_id: &EntityId, is_intersecting: bool) {
        if is_intersecting {
            self.active = Some(module_id.clone());
        }
    }

    /// Handle an outline click
    ///
    /// Forces the module expanded and returns the scroll request for
    /// the adapter; selecting an unknown module is a no-op.
    pub fn select(
        &mut self,
        doc: &mut CourseDocument,
        module_id: &EntityId,
    ) -> Option<ScrollRequest> {
        doc.module(module_id)?;
        doc.set_expanded(module_id, true);
        Some(ScrollRequest {
            module_id: module_id.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Module;

    #[test]
    fn test_last_intersecting_signal_wins() {
        let mut tracker = OutlineTracker::new();
        let first = EntityId::from("1");
        let second = EntityId::from("2");

        tracker.observe(&first, true);
        tracker.observe(&second, true);
        assert_eq!(tracker.active_module(), Some(&second));
    }

    #[test]
    fn test_leaving_does_not_clear_highlight() {
        let mut tracker = OutlineTracker::new();
        let id = EntityId::from("1");

        tracker.observe(&id, true);
        tracker.observe(&id, false);
        assert_eq!(tracker.active_module(), Some(&id));
    }

    #[test]
    fn test_no_signals_no_highlight() {
        let tracker = OutlineTracker::new();
        assert!(tracker.active_module().is_none());
    }

    #[test]
    fn test_select_expands_and_requests_scroll() {
        let mut doc = CourseDocument::new();
        let id = doc.add_module(Module::new("Algebra"));
        doc.set_expanded(&id, false);

        let mut tracker = OutlineTracker::new();
        let request = tracker.select(&mut doc, &id).unwrap();
        assert_eq!(request.module_id, id);
        assert!(doc.is_expanded(&id));
    }

    #[test]
    fn test_select_unknown_module_is_noop() {
        let mut doc = CourseDocument::new();
        let mut tracker = OutlineTracker::new();
        assert!(tracker.select(&mut doc, &EntityId::from("ghost")).is_none());
    }
}
