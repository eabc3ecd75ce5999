//! Drag reconciliation
//!
//! Translates a drag gesture ("grab A, drop it on B", where A and B are
//! each a module or an item) into at most one document mutation.
//! Draggables carry composite identifiers (`module-<id>`, `item-<id>`);
//! the controller recovers kind and id, tracks the gesture through
//! start/drop/cancel, and reports what happened as a [`DragOutcome`] so
//! the caller can notify the user.
//!
//! Drags are best-effort UI affordances, not transactional commands:
//! any lookup miss aborts the gesture as a no-op instead of erroring.
//! Hover updates between start and drop are the input adapter's
//! concern; the document is never touched before the drop.

use std::fmt;

use crate::document::CourseDocument;
use crate::entity_id::EntityId;

/// What kind of entity a draggable identifier names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Module,
    Item,
}

/// A parsed draggable identifier: kind plus entity id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragRef {
    pub kind: DragKind,
    pub id: EntityId,
}

impl DragRef {
    /// Reference a module draggable
    pub fn module(id: impl Into<EntityId>) -> Self {
        Self {
            kind: DragKind::Module,
            id: id.into(),
        }
    }

    /// Reference an item draggable
    pub fn item(id: impl Into<EntityId>) -> Self {
        Self {
            kind: DragKind::Item,
            id: id.into(),
        }
    }

    /// Parse a composite identifier
    ///
    /// Returns `None` for unknown prefixes and empty ids.
    pub fn parse(raw: &str) -> Option<Self> {
        let (kind, rest) = if let Some(rest) = raw.strip_prefix("module-") {
            (DragKind::Module, rest)
        } else if let Some(rest) = raw.strip_prefix("item-") {
            (DragKind::Item, rest)
        } else {
            return None;
        };
        if rest.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            id: EntityId::from(rest),
        })
    }
}

impl fmt::Display for DragRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DragKind::Module => write!(f, "module-{}", self.id),
            DragKind::Item => write!(f, "item-{}", self.id),
        }
    }
}

/// How a drop reconciled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Gesture ended without touching the document
    None,
    /// The module sequence was reordered
    ModulesReordered { source: EntityId, dest: EntityId },
    /// An item was spliced before another item, possibly changing group
    ItemMoved {
        item: EntityId,
        group: Option<EntityId>,
    },
    /// An item was re-parented onto a module (appended to its group)
    ItemAssigned { item: EntityId, module: EntityId },
}

impl DragOutcome {
    /// Whether the drop mutated the document
    pub fn changed(&self) -> bool {
        !matches!(self, DragOutcome::None)
    }
}

/// The per-gesture state machine
///
/// One controller instance serves the whole session; a gesture runs
/// start -> drop/cancel and the state clears unconditionally at the
/// end.
#[derive(Debug, Default)]
pub struct DragController {
    active: Option<DragRef>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture from a raw draggable identifier
    ///
    /// Returns false (and stays idle) when the identifier does not
    /// parse. No mutation happens at start.
    pub fn start(&mut self, raw: &str) -> bool {
        self.active = DragRef::parse(raw);
        self.active.is_some()
    }

    /// The gesture currently in flight, if any
    pub fn active(&self) -> Option<&DragRef> {
        self.active.as_ref()
    }

    /// Abort the gesture without touching the document
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Finish the gesture over `over` (or nothing) and reconcile
    pub fn drop_on(&mut self, doc: &mut CourseDocument, over: Option<&str>) -> DragOutcome {
        let Some(active) = self.active.take() else {
            return DragOutcome::None;
        };
        let Some(over) = over.and_then(DragRef::parse) else {
            return DragOutcome::None;
        };

        match (active.kind, over.kind) {
            (DragKind::Module, DragKind::Module) => {
                if doc.reorder_modules(&active.id, &over.id) {
                    DragOutcome::ModulesReordered {
                        source: active.id,
                        dest: over.id,
                    }
                } else {
                    DragOutcome::None
                }
            }
            (DragKind::Item, DragKind::Item) => {
                if doc.move_item(&active.id, None, Some(&over.id)) {
                    let group = doc.item(&active.id).and_then(|i| i.module_id.clone());
                    DragOutcome::ItemMoved {
                        item: active.id,
                        group,
                    }
                } else {
                    DragOutcome::None
                }
            }
            (DragKind::Item, DragKind::Module) => {
                if doc.move_item(&active.id, Some(&over.id), None) {
                    DragOutcome::ItemAssigned {
                        item: active.id,
                        module: over.id,
                    }
                } else {
                    DragOutcome::None
                }
            }
            // Dropping a module on an item has no defined transition.
            (DragKind::Module, DragKind::Item) => DragOutcome::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, Module};

    fn fixture() -> (CourseDocument, Vec<EntityId>, Vec<EntityId>) {
        let mut doc = CourseDocument::new();
        let m1 = doc.add_module(Module::new("Algebra"));
        let m2 = doc.add_module(Module::new("Geometry"));
        let a = doc.add_item(Item::link(None, "a", "https://a.example"));
        let b = doc.add_item(Item::link(Some(m1.clone()), "b", "https://b.example"));
        let c = doc.add_item(Item::link(Some(m1.clone()), "c", "https://c.example"));
        (doc, vec![m1, m2], vec![a, b, c])
    }

    #[test]
    fn test_parse_round_trip() {
        let module = DragRef::parse("module-17").unwrap();
        assert_eq!(module, DragRef::module("17"));
        assert_eq!(module.to_string(), "module-17");

        let item = DragRef::parse("item-17").unwrap();
        assert_eq!(item, DragRef::item("17"));
        assert_eq!(item.to_string(), "item-17");
    }

    #[test]
    fn test_parse_rejects_unknown_shapes() {
        assert!(DragRef::parse("card-17").is_none());
        assert!(DragRef::parse("module-").is_none());
        assert!(DragRef::parse("17").is_none());
        assert!(DragRef::parse("").is_none());
    }

    #[test]
    fn test_start_with_bad_identifier_stays_idle() {
        let mut controller = DragController::new();
        assert!(!controller.start("bogus-1"));
        assert!(controller.active().is_none());
    }

    #[test]
    fn test_drop_without_target_aborts() {
        let (mut doc, modules, _) = fixture();
        let mut controller = DragController::new();

        assert!(controller.start(&format!("module-{}", modules[0])));
        let outcome = controller.drop_on(&mut doc, None);
        assert_eq!(outcome, DragOutcome::None);
        assert!(controller.active().is_none());
        assert_eq!(doc.modules()[0].id, modules[0]);
    }

    #[test]
    fn test_cancel_clears_without_mutation() {
        let (mut doc, modules, _) = fixture();
        let before = doc.clone();
        let mut controller = DragController::new();

        controller.start(&format!("module-{}", modules[0]));
        controller.cancel();
        assert!(controller.active().is_none());
        assert_eq!(doc.modules(), before.modules());
        assert_eq!(doc.items(), before.items());
    }

    #[test]
    fn test_module_on_module_reorders() {
        let (mut doc, modules, _) = fixture();
        let mut controller = DragController::new();

        controller.start(&format!("module-{}", modules[0]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("module-{}", modules[1])));

        assert_eq!(
            outcome,
            DragOutcome::ModulesReordered {
                source: modules[0].clone(),
                dest: modules[1].clone(),
            }
        );
        assert_eq!(doc.modules()[0].id, modules[1]);
        assert_eq!(doc.modules()[1].id, modules[0]);
    }

    #[test]
    fn test_module_on_itself_is_noop() {
        let (mut doc, modules, _) = fixture();
        let mut controller = DragController::new();

        controller.start(&format!("module-{}", modules[0]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("module-{}", modules[0])));
        assert_eq!(outcome, DragOutcome::None);
    }

    #[test]
    fn test_item_on_item_splices_before() {
        // Standalone `a` dropped on `b` in module holding [b, c].
        let (mut doc, modules, items) = fixture();
        let mut controller = DragController::new();

        controller.start(&format!("item-{}", items[0]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("item-{}", items[1])));

        assert_eq!(
            outcome,
            DragOutcome::ItemMoved {
                item: items[0].clone(),
                group: Some(modules[0].clone()),
            }
        );
        let group: Vec<_> = doc
            .group_items(Some(&modules[0]))
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert_eq!(group, vec![items[0].clone(), items[1].clone(), items[2].clone()]);
    }

    #[test]
    fn test_item_on_module_appends() {
        let (mut doc, modules, items) = fixture();
        let mut controller = DragController::new();

        controller.start(&format!("item-{}", items[0]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("module-{}", modules[1])));

        assert_eq!(
            outcome,
            DragOutcome::ItemAssigned {
                item: items[0].clone(),
                module: modules[1].clone(),
            }
        );
        let group: Vec<_> = doc
            .group_items(Some(&modules[1]))
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert_eq!(group, vec![items[0].clone()]);
    }

    #[test]
    fn test_item_on_own_module_is_noop() {
        let (mut doc, modules, items) = fixture();
        let mut controller = DragController::new();

        controller.start(&format!("item-{}", items[1]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("module-{}", modules[0])));
        assert_eq!(outcome, DragOutcome::None);
    }

    #[test]
    fn test_module_on_item_is_undefined() {
        let (mut doc, modules, items) = fixture();
        let before = doc.clone();
        let mut controller = DragController::new();

        controller.start(&format!("module-{}", modules[0]));
        let outcome = controller.drop_on(&mut doc, Some(&format!("item-{}", items[0])));
        assert_eq!(outcome, DragOutcome::None);
        assert_eq!(doc.modules(), before.modules());
        assert_eq!(doc.items(), before.items());
    }

    #[test]
    fn test_dangling_ids_abort() {
        let (mut doc, _, items) = fixture();
        let mut controller = DragController::new();

        controller.start("item-ghost");
        let outcome = controller.drop_on(&mut doc, Some(&format!("item-{}", items[0])));
        assert_eq!(outcome, DragOutcome::None);

        controller.start(&format!("item-{}", items[0]));
        let outcome = controller.drop_on(&mut doc, Some("item-ghost"));
        assert_eq!(outcome, DragOutcome::None);
        assert_eq!(doc.items().len(), 3);
    }

    #[test]
    fn test_drop_without_start_is_noop() {
        let (mut doc, _, items) = fixture();
        let mut controller = DragController::new();
        let outcome = controller.drop_on(&mut doc, Some(&format!("item-{}", items[0])));
        assert_eq!(outcome, DragOutcome::None);
    }
}
