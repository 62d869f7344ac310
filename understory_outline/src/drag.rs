// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop state machine for moving outline nodes.
//!
//! ## States
//!
//! - [`DragState::Idle`]: no drag in progress.
//! - [`DragState::Dragging`]: a source node was picked up; the pointer may or may not be
//!   over a drop target ([`Hover`]).
//!
//! ## Transitions
//!
//! | Call | From | To |
//! |------|------|----|
//! | [`begin_drag`](DragController::begin_drag) | `Idle` | `Dragging`, no hover |
//! | [`begin_drag`](DragController::begin_drag) | `Dragging` | unchanged (first drag wins) |
//! | [`update_hover`](DragController::update_hover) | `Dragging` | `Dragging`, hover replaced |
//! | [`update_hover_in`](DragController::update_hover_in) | `Dragging` | `Dragging`, hover replaced |
//! | [`commit`](DragController::commit) | any | `Idle` |
//! | [`cancel`](DragController::cancel) | any | `Idle` |
//!
//! A hover target and its drop position are stored together, so a target without a
//! position, or a hover without a drag, cannot be represented.
//!
//! ## Usage
//!
//! ```rust
//! use understory_outline::{
//!     Address, DragController, DropOutcome, DropPosition, HoverFeedback, Node, Tree,
//! };
//!
//! let tree = Tree::new(vec![
//!     Node::new("1", "Parent").with_children(vec![Node::new("1-1", "Child")]),
//!     Node::new("2", "Other"),
//! ]);
//! let mut drag = DragController::new();
//! drag.begin_drag_at(&tree, &Address::root(0));
//!
//! // Hovering the dragged node's own child is recorded but flagged for the UI.
//! let feedback = drag.update_hover(Address::from([0, 0]), DropPosition::Inside);
//! assert_eq!(feedback, Some(HoverFeedback::Rejected));
//!
//! // The latest hover wins.
//! drag.update_hover(Address::root(1), DropPosition::After);
//! let tree = drag.commit(&tree).into_tree(tree);
//! assert_eq!(tree.roots()[1].id(), "1");
//! ```

use alloc::sync::Arc;

use crate::{Address, DropPosition, Node, Rejected, Tree, check_drop};

/// The node being dragged and where it was when the drag started.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSource {
    /// Snapshot of the dragged node (with its subtree) at drag start.
    pub node: Node,
    /// Address of the node at drag start.
    pub address: Address,
    /// The snapshot the drag started on, when known. Hovers reported without a tree
    /// are resolved against it.
    pub(crate) origin: Option<Tree>,
}

/// The drop target currently under the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hover {
    /// Address of the hovered node.
    pub target: Address,
    /// Where the dragged node would land relative to `target`.
    pub position: DropPosition,
    /// Identifier of the node at `target` when the hover was recorded.
    pub(crate) target_id: Option<Arc<str>>,
}

impl Hover {
    /// Identifier of the hovered node, if it was known when the hover was recorded.
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }
}

/// Transient state of a drag gesture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A node is being dragged.
    Dragging {
        /// What is being dragged.
        source: DragSource,
        /// Current drop target, if the pointer is over one.
        hover: Option<Hover>,
    },
}

/// Whether the current hover would be accepted on drop.
///
/// Returned by [`DragController::update_hover`] so the presentation layer can show a
/// "not allowed" state. It only reflects the ancestry guard ([`check_drop`]); stale or
/// out-of-range addresses are detected on commit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverFeedback {
    /// Dropping here would move the node.
    Accepted,
    /// Dropping here would be rejected (self, or own subtree).
    Rejected,
}

/// Result of [`DragController::commit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop moved the node; replace the held tree with this snapshot before handling
    /// the next event.
    Moved(Tree),
    /// The drop was attempted and rejected; the held tree stays as it is.
    Rejected(Rejected),
    /// There was nothing to drop: no drag in progress, or no hover target.
    Ignored,
}

impl DropOutcome {
    /// The new snapshot if the drop moved a node, otherwise `prior`.
    pub fn into_tree(self, prior: Tree) -> Tree {
        match self {
            Self::Moved(tree) => tree,
            Self::Rejected(_) | Self::Ignored => prior,
        }
    }

    /// The new snapshot, if the drop moved a node.
    pub fn tree(&self) -> Option<&Tree> {
        match self {
            Self::Moved(tree) => Some(tree),
            Self::Rejected(_) | Self::Ignored => None,
        }
    }

    /// Returns `true` if the drop moved a node.
    pub fn is_moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Drives [`Tree::compute_move`] from discrete drag events.
///
/// One controller tracks one gesture at a time. It is a plain value: keep it next to the
/// tree state it edits and hand it to event handlers by reference, one controller per
/// outline.
///
/// The controller never holds the tree. [`commit`](Self::commit) borrows the caller's
/// current snapshot and returns the next one, which the caller must store before the
/// next event is dispatched.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The dragged node, if any.
    pub fn source(&self) -> Option<&DragSource> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// The current drop target, if any.
    pub fn hover(&self) -> Option<&Hover> {
        match &self.state {
            DragState::Dragging { hover, .. } => hover.as_ref(),
            DragState::Idle => None,
        }
    }

    /// Start dragging `node`, currently at `address`.
    ///
    /// Returns `false` and leaves the active drag untouched if one is already in
    /// progress.
    ///
    /// Without a snapshot the controller cannot tell which node a later
    /// [`update_hover`](Self::update_hover) points at; prefer
    /// [`begin_drag_at`](Self::begin_drag_at) or report hovers with
    /// [`update_hover_in`](Self::update_hover_in).
    pub fn begin_drag(&mut self, node: Node, address: Address) -> bool {
        self.start(node, address, None)
    }

    fn start(&mut self, node: Node, address: Address, origin: Option<Tree>) -> bool {
        if let DragState::Dragging { source, .. } = &self.state {
            log::debug!(
                "ignoring drag of `{}` at {address}: `{}` is already being dragged",
                node.id(),
                source.node.id()
            );
            return false;
        }
        log::trace!("begin drag of `{}` at {address}", node.id());
        self.state = DragState::Dragging {
            source: DragSource {
                node,
                address,
                origin,
            },
            hover: None,
        };
        true
    }

    /// Start dragging the node at `address` in `tree`.
    ///
    /// Returns `false` if a drag is already in progress or `address` does not resolve.
    pub fn begin_drag_at(&mut self, tree: &Tree, address: &Address) -> bool {
        match tree.locate(address) {
            Some(node) => self.start(node.clone(), address.clone(), Some(tree.clone())),
            None => {
                log::debug!("ignoring drag at {address}: no such node");
                false
            }
        }
    }

    /// Record the drop target under the pointer, replacing any previous one.
    ///
    /// The hover is recorded even when the drop would be rejected, so the presentation
    /// layer can show the rejected state; the returned feedback says which. Returns
    /// `None` (and records nothing) when no drag is in progress.
    ///
    /// `target` is resolved against the snapshot the drag started on, so that
    /// [`commit`](Self::commit) can tell whether it still names the same node. Use
    /// [`update_hover_in`](Self::update_hover_in) if the tree may have changed since.
    pub fn update_hover(
        &mut self,
        target: Address,
        position: DropPosition,
    ) -> Option<HoverFeedback> {
        self.set_hover(None, target, position)
    }

    /// Like [`update_hover`](Self::update_hover), with `target` resolved against
    /// `tree`, the caller's current snapshot.
    pub fn update_hover_in(
        &mut self,
        tree: &Tree,
        target: Address,
        position: DropPosition,
    ) -> Option<HoverFeedback> {
        self.set_hover(Some(tree), target, position)
    }

    fn set_hover(
        &mut self,
        tree: Option<&Tree>,
        target: Address,
        position: DropPosition,
    ) -> Option<HoverFeedback> {
        let DragState::Dragging { source, hover } = &mut self.state else {
            return None;
        };
        let target_id = tree
            .or(source.origin.as_ref())
            .and_then(|tree| tree.locate(&target))
            .map(|node| node.shared_id().clone());
        let feedback = match check_drop(&source.address, &target, position) {
            Ok(()) => HoverFeedback::Accepted,
            Err(_) => HoverFeedback::Rejected,
        };
        log::trace!("hover {position:?} {target}: {feedback:?}");
        *hover = Some(Hover {
            target,
            position,
            target_id,
        });
        Some(feedback)
    }

    /// Forget the drop target (the pointer left every row) but keep dragging.
    pub fn clear_hover(&mut self) {
        if let DragState::Dragging { hover, .. } = &mut self.state {
            *hover = None;
        }
    }

    /// Drop the dragged node at the current hover target.
    ///
    /// Always returns the controller to [`DragState::Idle`]. The drop is checked against
    /// `tree`, the caller's current snapshot: if the node at the source address is no
    /// longer the node that was picked up (the tree changed during the drag), the drop
    /// is rejected with [`Rejected::StaleSource`]. Likewise, if the hover target now
    /// resolves to a different node than the one hovered, the drop is rejected with
    /// [`Rejected::StaleTarget`].
    pub fn commit(&mut self, tree: &Tree) -> DropOutcome {
        let DragState::Dragging { source, hover } = core::mem::take(&mut self.state) else {
            log::debug!("ignoring drop: no drag in progress");
            return DropOutcome::Ignored;
        };
        let Some(hover) = hover else {
            log::debug!("ignoring drop of `{}`: no drop target", source.node.id());
            return DropOutcome::Ignored;
        };
        let result = match tree.locate(&source.address) {
            Some(current) if current.id() == source.node.id() => {
                match (&hover.target_id, tree.locate(&hover.target)) {
                    (Some(id), Some(hovered)) if hovered.id() != id.as_ref() => {
                        Err(Rejected::StaleTarget)
                    }
                    _ => tree.compute_move(&source.address, &hover.target, hover.position),
                }
            }
            _ => Err(Rejected::StaleSource),
        };
        match result {
            Ok(next) => {
                log::debug!(
                    "moved `{}` from {} {:?} {}",
                    source.node.id(),
                    source.address,
                    hover.position,
                    hover.target
                );
                DropOutcome::Moved(next)
            }
            Err(reason) => {
                log::debug!("rejected drop of `{}`: {reason}", source.node.id());
                DropOutcome::Rejected(reason)
            }
        }
    }

    /// Abort the drag. Valid in any state.
    pub fn cancel(&mut self) {
        if let DragState::Dragging { source, .. } = &self.state {
            log::trace!("cancel drag of `{}`", source.node.id());
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn ids(nodes: &[Node]) -> Vec<&str> {
        nodes.iter().map(Node::id).collect()
    }

    fn parent_with_two() -> Tree {
        Tree::new(vec![Node::new("1", "Parent").with_children(vec![
            Node::new("1-1", "First"),
            Node::new("1-2", "Second"),
        ])])
    }

    #[test]
    fn starts_idle() {
        let drag = DragController::new();
        assert_eq!(drag.state(), &DragState::Idle);
        assert!(!drag.is_dragging());
        assert!(drag.source().is_none());
        assert!(drag.hover().is_none());
    }

    #[test]
    fn begin_drag_clears_hover() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        assert!(drag.begin_drag_at(&tree, &Address::from([0, 0])));
        assert!(drag.is_dragging());
        assert_eq!(drag.source().unwrap().node.id(), "1-1");
        assert_eq!(drag.source().unwrap().address, Address::from([0, 0]));
        assert!(drag.hover().is_none());
    }

    #[test]
    fn first_drag_wins() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        assert!(drag.begin_drag_at(&tree, &Address::from([0, 0])));
        drag.update_hover(Address::from([0, 1]), DropPosition::After);

        assert!(!drag.begin_drag_at(&tree, &Address::from([0, 1])));
        assert!(!drag.begin_drag(Node::new("x", "X"), Address::root(0)));
        assert_eq!(drag.source().unwrap().node.id(), "1-1");
        assert_eq!(
            drag.hover(),
            Some(&Hover {
                target: Address::from([0, 1]),
                position: DropPosition::After,
                target_id: Some(Arc::from("1-2")),
            })
        );
    }

    #[test]
    fn begin_drag_at_missing_address() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        assert!(!drag.begin_drag_at(&tree, &Address::from([0, 7])));
        assert!(!drag.is_dragging());
    }

    #[test]
    fn hover_requires_drag() {
        let mut drag = DragController::new();
        assert_eq!(drag.update_hover(Address::root(0), DropPosition::Before), None);
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn latest_hover_wins_and_rejected_hover_is_recorded() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::root(0));

        assert_eq!(
            drag.update_hover(Address::from([0, 1]), DropPosition::Before),
            Some(HoverFeedback::Rejected)
        );
        assert_eq!(drag.hover().unwrap().target, Address::from([0, 1]));

        assert_eq!(
            drag.update_hover(Address::root(0), DropPosition::Inside),
            Some(HoverFeedback::Rejected)
        );
        assert_eq!(
            drag.update_hover(Address::root(0), DropPosition::After),
            Some(HoverFeedback::Accepted)
        );
        assert_eq!(drag.hover().unwrap().position, DropPosition::After);
    }

    #[test]
    fn commit_moves_and_returns_to_idle() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::from([0, 0]));
        drag.update_hover(Address::from([0, 1]), DropPosition::After);

        let outcome = drag.commit(&tree);
        assert!(outcome.is_moved());
        assert!(!drag.is_dragging());
        let next = outcome.into_tree(tree);
        assert_eq!(ids(next.roots()[0].children()), ["1-2", "1-1"]);
    }

    #[test]
    fn rejected_commit_leaves_tree_and_returns_to_idle() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::root(0));
        drag.update_hover(Address::from([0, 0]), DropPosition::Inside);

        let outcome = drag.commit(&tree);
        assert_eq!(outcome, DropOutcome::Rejected(Rejected::IntoOwnSubtree));
        assert_eq!(outcome.tree(), None);
        assert_eq!(outcome.into_tree(tree.clone()), tree);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn commit_without_hover_or_drag_is_ignored() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        assert_eq!(drag.commit(&tree), DropOutcome::Ignored);

        drag.begin_drag_at(&tree, &Address::root(0));
        assert_eq!(drag.commit(&tree), DropOutcome::Ignored);
        assert!(!drag.is_dragging());

        drag.begin_drag_at(&tree, &Address::root(0));
        drag.update_hover(Address::from([0, 0]), DropPosition::Before);
        drag.clear_hover();
        assert!(drag.is_dragging());
        assert_eq!(drag.commit(&tree), DropOutcome::Ignored);
    }

    #[test]
    fn stale_source_is_rejected() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::from([0, 0]));
        drag.update_hover(Address::from([0, 1]), DropPosition::After);

        // Another edit reorders the children while the drag is in flight.
        let changed = tree
            .compute_move(&[0, 1], &[0, 0], DropPosition::Before)
            .unwrap();
        assert_eq!(
            drag.commit(&changed),
            DropOutcome::Rejected(Rejected::StaleSource)
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn stale_target_is_rejected() {
        let tree = Tree::new(vec![
            Node::new("A", "A"),
            Node::new("B", "B"),
            Node::new("C", "C"),
        ]);
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::root(0));
        drag.update_hover(Address::root(2), DropPosition::After);
        assert_eq!(drag.hover().unwrap().target_id(), Some("C"));

        // An insertion shifts C to [3]; [2] now names B.
        let changed = tree
            .insert(Node::new("X", "X"), &[1], DropPosition::Before)
            .unwrap();
        assert_eq!(
            drag.commit(&changed),
            DropOutcome::Rejected(Rejected::StaleTarget)
        );
        assert!(!drag.is_dragging());
    }

    #[test]
    fn hover_in_current_tree_is_checked_against_that_tree() {
        let tree = Tree::new(vec![Node::new("A", "A"), Node::new("B", "B")]);
        let mut drag = DragController::new();
        drag.begin_drag(Node::new("A", "A"), Address::root(0));
        drag.update_hover(Address::root(1), DropPosition::After);
        assert_eq!(drag.hover().unwrap().target_id(), None);

        let changed = tree
            .insert(Node::new("X", "X"), &[1], DropPosition::Before)
            .unwrap();
        drag.update_hover_in(&changed, Address::root(2), DropPosition::After);
        assert_eq!(drag.hover().unwrap().target_id(), Some("B"));
        let moved = drag.commit(&changed).into_tree(changed);
        assert_eq!(ids(moved.roots()), ["X", "B", "A"]);

        drag.begin_drag_at(&tree, &Address::root(0));
        drag.update_hover_in(&tree, Address::root(1), DropPosition::After);
        let (shrunk, _) = tree.remove(&[1]).unwrap();
        let grown = shrunk
            .insert(Node::new("Y", "Y"), &[0], DropPosition::After)
            .unwrap();
        assert_eq!(
            drag.commit(&grown),
            DropOutcome::Rejected(Rejected::StaleTarget)
        );
    }

    #[test]
    fn vanished_target_is_rejected() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.begin_drag_at(&tree, &Address::from([0, 0]));
        drag.update_hover(Address::from([0, 1]), DropPosition::After);

        let (shrunk, _) = tree.remove(&[0, 1]).unwrap();
        assert_eq!(
            drag.commit(&shrunk),
            DropOutcome::Rejected(Rejected::TargetNotFound)
        );
    }

    #[test]
    fn cancel_from_any_state() {
        let tree = parent_with_two();
        let mut drag = DragController::new();
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);

        drag.begin_drag_at(&tree, &Address::root(0));
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);

        drag.begin_drag_at(&tree, &Address::from([0, 1]));
        drag.update_hover(Address::from([0, 0]), DropPosition::Before);
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
        assert_eq!(drag.commit(&tree), DropOutcome::Ignored);
    }
}
