// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outline items.

use alloc::sync::Arc;
use alloc::vec::Vec;

/// One item of an outline, together with its subtree.
///
/// A node is immutable once it is part of a [`Tree`](crate::Tree). Its children live
/// behind an [`Arc`], so cloning a node is cheap and clones share the whole subtree.
/// Edits never modify a node; they build new nodes along the edited path and reuse
/// everything else.
///
/// Equality is structural: two nodes are equal when their identifiers, labels,
/// `expanded` flags, and children are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Unique within a tree and stable across edits.
    pub(crate) id: Arc<str>,
    #[cfg_attr(feature = "serde", serde(alias = "title"))]
    pub(crate) label: Arc<str>,
    #[cfg_attr(feature = "serde", serde(default = "expanded_default"))]
    pub(crate) expanded: bool,
    #[cfg_attr(feature = "serde", serde(default = "no_children"))]
    pub(crate) children: Arc<[Node]>,
}

#[cfg(feature = "serde")]
fn expanded_default() -> bool {
    true
}

#[cfg(feature = "serde")]
fn no_children() -> Arc<[Node]> {
    Arc::from(Vec::new())
}

impl Node {
    /// Create an expanded leaf node.
    pub fn new(id: impl Into<Arc<str>>, label: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            expanded: true,
            children: Arc::from(Vec::new()),
        }
    }

    /// Replace the children of this node.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = Arc::from(children);
        self
    }

    /// Set the `expanded` presentation hint.
    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// The node's identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The node's identifier as a shared string.
    pub fn shared_id(&self) -> &Arc<str> {
        &self.id
    }

    /// Display text; not required to be unique.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the presentation layer should show this node's children.
    ///
    /// The engine ignores this flag apart from preserving it across edits.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Ordered children; sibling order is significant.
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if `other` shares this node's children allocation.
    ///
    /// Useful to confirm that an edit reused a subtree instead of copying it.
    pub fn shares_children_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.children, &other.children)
    }

    /// Copy of this node with a different set of children.
    pub(crate) fn with_shared_children(&self, children: Arc<[Self]>) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            expanded: self.expanded,
            children,
        }
    }
}
