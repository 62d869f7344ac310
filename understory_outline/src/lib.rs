// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Outline: an address-based outline tree with drag-and-drop moves.
//!
//! This crate is the engine behind a reorderable outline (file trees, layer panels,
//! document outlines). It does not render anything. A presentation layer draws rows,
//! feeds pointer events into a [`DragController`], and receives plain [`Tree`]
//! snapshots back.
//!
//! ## Snapshots and addresses
//!
//! - [`Tree`]: an immutable snapshot of the whole outline. Every edit returns a new
//!   snapshot; subtrees that the edit does not touch are shared with the previous one,
//!   so cloning a snapshot or keeping an old one around for a render pass is cheap.
//! - [`Node`]: one item with a stable identifier, a label, ordered children, and an
//!   `expanded` presentation hint.
//! - [`Address`]: sibling indices walked from the roots. `[0]` is the first root,
//!   `[0, 2]` is its third child. Addresses are positional, so they are only valid
//!   for the snapshot they were computed from.
//!
//! Nodes never point back at their parents. Ancestry is a property of addresses:
//! `a` is an ancestor of `b` iff `a` is a strict prefix of `b` (see [`is_ancestor`]).
//! That single check is what keeps a move from making a node its own descendant.
//!
//! ## Moves
//!
//! [`Tree::compute_move`] is the one composite edit used by every drop. It rejects drops
//! onto the source itself or into its subtree, removes the source, corrects the target
//! address for the index shift caused by the removal, and inserts the subtree
//! [`Before`](DropPosition::Before), [`After`](DropPosition::After), or
//! [`Inside`](DropPosition::Inside) (as first child of) the target.
//!
//! ```rust
//! use understory_outline::{Address, DropPosition, Node, Tree};
//!
//! let tree = Tree::new(vec![
//!     Node::new("1", "Parent").with_children(vec![
//!         Node::new("1-1", "First"),
//!         Node::new("1-2", "Second"),
//!     ]),
//! ]);
//!
//! // Move "1-1" after "1-2".
//! let moved = tree
//!     .compute_move(&Address::from([0, 0]), &Address::from([0, 1]), DropPosition::After)
//!     .unwrap();
//! let order: Vec<&str> = moved.roots()[0].children().iter().map(|n| n.id()).collect();
//! assert_eq!(order, ["1-2", "1-1"]);
//!
//! // A parent cannot be dropped into its own child.
//! assert!(
//!     tree.compute_move(&Address::from([0]), &Address::from([0, 0]), DropPosition::Inside)
//!         .is_err()
//! );
//! ```
//!
//! ## Drag controller
//!
//! [`DragController`] holds the transient state of one drag gesture: what is being
//! dragged and what the pointer currently hovers. It is a plain value owned by whatever
//! component orchestrates the interaction, so several independent outlines can live on
//! one screen. Every [`commit`](DragController::commit) or
//! [`cancel`](DragController::cancel) returns it to idle.
//!
//! ```rust
//! use understory_outline::{Address, DragController, DropOutcome, DropPosition, Node, Tree};
//!
//! let tree = Tree::new(vec![Node::new("A", "A"), Node::new("B", "B")]);
//! let mut drag = DragController::new();
//!
//! assert!(drag.begin_drag_at(&tree, &Address::from([1])));
//! drag.update_hover(Address::from([0]), DropPosition::Before);
//!
//! let tree = match drag.commit(&tree) {
//!     DropOutcome::Moved(next) => next,
//!     _ => tree,
//! };
//! let order: Vec<&str> = tree.roots().iter().map(|n| n.id()).collect();
//! assert_eq!(order, ["B", "A"]);
//! assert!(!drag.is_dragging());
//! ```
//!
//! Rejected and stale drops are not faults: [`DropOutcome::into_tree`] resolves any
//! outcome to either the new snapshot or the prior one.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: enables `no_std` float math for `kurbo`.
//! - `pointer` (default): enables [`DropZones`], which maps a pointer position over a
//!   rendered row to a [`DropPosition`].
//! - `serde`: serialization of [`Tree`], [`Node`], [`Address`], and [`DropPosition`] as
//!   plain nested records.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod address;
mod drag;
mod edit;
mod error;
mod node;
#[cfg(feature = "pointer")]
mod pointer;
mod tree;

pub use address::{Address, is_ancestor};
pub use drag::{DragController, DragSource, DragState, DropOutcome, Hover, HoverFeedback};
pub use edit::{DropPosition, check_drop};
pub use error::{InvalidTree, NotFound, Rejected};
pub use node::Node;
#[cfg(feature = "pointer")]
pub use pointer::DropZones;
pub use tree::{AddressIndex, Row, Tree, Walk};
