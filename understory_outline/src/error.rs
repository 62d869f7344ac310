// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types. None of them are fatal: each one means "the tree is unchanged".

use alloc::sync::Arc;

use crate::Address;

/// An address did not resolve against the snapshot it was used with.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no node at address {0}")]
pub struct NotFound(pub Address);

/// Why a move or drop left the tree unchanged.
///
/// A drag-and-drop surface usually treats every variant the same way (the drop is
/// visually canceled); the variants exist for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Rejected {
    /// A node was dropped inside itself.
    #[error("cannot drop a node inside itself")]
    OntoItself,
    /// The target lies within the source's own subtree.
    #[error("cannot drop a node into its own subtree")]
    IntoOwnSubtree,
    /// The source address does not resolve.
    #[error("source address does not resolve")]
    SourceNotFound,
    /// The target address does not resolve.
    #[error("target address does not resolve")]
    TargetNotFound,
    /// The tree changed since the drag started and the source address now points at a
    /// different node, or at nothing.
    #[error("dragged node is no longer at its starting address")]
    StaleSource,
    /// The tree changed since the hover was recorded and the target address now points
    /// at a different node.
    #[error("hovered node is no longer at the target address")]
    StaleTarget,
}

/// Structural problems reported by [`Tree::validate`](crate::Tree::validate).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTree {
    /// Two nodes share the identifier.
    #[error("duplicate node identifier `{0}`")]
    DuplicateId(Arc<str>),
}
