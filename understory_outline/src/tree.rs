// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree snapshots and read-only queries: lookup, traversal, and validation.

use alloc::sync::Arc;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::{Address, InvalidTree, Node};

/// An immutable snapshot of an outline: the ordered root-level nodes.
///
/// A `Tree` is a value. Edits ([`Tree::remove`], [`Tree::insert`],
/// [`Tree::compute_move`], [`Tree::set_expanded`]) borrow the snapshot and return a new
/// one; the input is never modified, so a render pass holding the old snapshot always
/// sees a consistent tree. Only the nodes on the path from a root to the edit point are
/// rebuilt, every other subtree is shared between the two snapshots.
///
/// Cloning a `Tree` is O(1).
///
/// ## Example
///
/// ```rust
/// use understory_outline::{Address, Node, Tree};
///
/// let tree = Tree::new(vec![
///     Node::new("docs", "Docs").with_children(vec![Node::new("intro", "Intro")]),
///     Node::new("src", "Sources"),
/// ]);
///
/// assert_eq!(tree.locate(&Address::from([0, 0])).map(Node::id), Some("intro"));
/// assert_eq!(tree.locate(&Address::from([0, 1])), None);
/// assert_eq!(tree.address_of("src"), Some(Address::root(1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tree {
    pub(crate) roots: Arc<[Node]>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Tree {
    /// Create a snapshot from its root-level nodes.
    ///
    /// Identifiers are expected to be unique; see [`Tree::validate`].
    pub fn new(roots: Vec<Node>) -> Self {
        Self {
            roots: Arc::from(roots),
        }
    }

    /// Root-level nodes in order.
    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Returns `true` if the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, at every depth.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Resolve `address` to a node.
    ///
    /// Returns `None` for the empty address and as soon as any index is out of range.
    /// Costs O(depth).
    pub fn locate(&self, address: &[usize]) -> Option<&Node> {
        let (&first, rest) = address.split_first()?;
        let mut node = self.roots.get(first)?;
        for &index in rest {
            node = node.children.get(index)?;
        }
        Some(node)
    }

    /// Address of the node with identifier `id` in this snapshot.
    ///
    /// Linear in the number of nodes. Build an [`AddressIndex`] when many lookups are
    /// made against the same snapshot.
    pub fn address_of(&self, id: &str) -> Option<Address> {
        self.walk()
            .find(|row| row.node.id() == id)
            .map(|row| row.address)
    }

    /// Pre-order traversal of every node with its address.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.roots, false)
    }

    /// Pre-order traversal that does not descend into collapsed nodes.
    ///
    /// These are the rows an outline view draws, top to bottom. Collapsed nodes
    /// themselves are yielded, their descendants are not.
    pub fn visible_rows(&self) -> Walk<'_> {
        Walk::new(&self.roots, true)
    }

    /// Check that every identifier is unique.
    ///
    /// Reports the first duplicate found in pre-order.
    pub fn validate(&self) -> Result<(), InvalidTree> {
        let mut seen = HashSet::new();
        for row in self.walk() {
            if !seen.insert(row.node.id()) {
                return Err(InvalidTree::DuplicateId(row.node.id.clone()));
            }
        }
        Ok(())
    }
}

impl FromIterator<Node> for Tree {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            roots: iter.into_iter().collect(),
        }
    }
}

/// A node yielded by [`Tree::walk`] or [`Tree::visible_rows`].
#[derive(Clone, Debug)]
pub struct Row<'a> {
    /// Address of `node` in the walked snapshot.
    pub address: Address,
    /// The node itself.
    pub node: &'a Node,
}

impl Row<'_> {
    /// Nesting depth of the row; roots have depth 0.
    ///
    /// A row built by hand with the empty address also reports depth 0.
    pub fn depth(&self) -> usize {
        self.address.depth().unwrap_or(0)
    }
}

/// Pre-order iterator over a [`Tree`]. See [`Tree::walk`].
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<Row<'a>>,
    skip_collapsed: bool,
}

impl<'a> Walk<'a> {
    fn new(roots: &'a [Node], skip_collapsed: bool) -> Self {
        let stack = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| Row {
                address: Address::root(i),
                node,
            })
            .collect();
        Self {
            stack,
            skip_collapsed,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.stack.pop()?;
        if !(self.skip_collapsed && !row.node.expanded) {
            // Children in reverse so they pop in order.
            for (i, child) in row.node.children.iter().enumerate().rev() {
                self.stack.push(Row {
                    address: row.address.child(i),
                    node: child,
                });
            }
        }
        Some(row)
    }
}

/// Identifier → address map for one snapshot.
///
/// Like every address, the entries go stale as soon as the tree is edited; rebuild the
/// index from the new snapshot.
#[derive(Clone, Debug, Default)]
pub struct AddressIndex {
    map: HashMap<Arc<str>, Address>,
}

impl AddressIndex {
    /// Index every node of `tree`.
    ///
    /// If identifiers repeat, the last one in pre-order wins.
    pub fn build(tree: &Tree) -> Self {
        let map = tree
            .walk()
            .map(|row| (row.node.id.clone(), row.address))
            .collect();
        Self { map }
    }

    /// Address of the node with identifier `id`.
    pub fn get(&self, id: &str) -> Option<&Address> {
        self.map.get(id)
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> Tree {
        Tree::new(vec![
            Node::new("a", "A").with_children(vec![
                Node::new("a1", "A1"),
                Node::new("a2", "A2")
                    .with_children(vec![Node::new("a2x", "A2x")])
                    .with_expanded(false),
            ]),
            Node::new("b", "B"),
        ])
    }

    #[test]
    fn locate_walks_indices() {
        let tree = sample();
        assert_eq!(tree.locate(&[0]).map(Node::id), Some("a"));
        assert_eq!(tree.locate(&[0, 1, 0]).map(Node::id), Some("a2x"));
        assert_eq!(tree.locate(&[1]).map(Node::id), Some("b"));
    }

    #[test]
    fn locate_out_of_range_at_any_level() {
        let tree = sample();
        assert!(tree.locate(&[]).is_none());
        assert!(tree.locate(&[2]).is_none());
        assert!(tree.locate(&[0, 2]).is_none());
        assert!(tree.locate(&[0, 0, 0]).is_none());
        assert!(tree.locate(&[1, 0]).is_none());
        assert!(tree.locate(&[usize::MAX, 0]).is_none());
    }

    #[test]
    fn walk_is_preorder() {
        let tree = sample();
        let ids: Vec<&str> = tree.walk().map(|row| row.node.id()).collect();
        assert_eq!(ids, ["a", "a1", "a2", "a2x", "b"]);
        let depths: Vec<usize> = tree.walk().map(|row| row.depth()).collect();
        assert_eq!(depths, [0, 1, 1, 2, 0]);
        assert_eq!(tree.node_count(), 5);
    }

    #[test]
    fn row_with_empty_address_has_depth_zero() {
        let node = Node::new("x", "X");
        let row = Row {
            address: Address::new(),
            node: &node,
        };
        assert_eq!(row.depth(), 0);
    }

    #[test]
    fn walk_addresses_resolve_to_their_nodes() {
        let tree = sample();
        for row in tree.walk() {
            assert_eq!(tree.locate(&row.address), Some(row.node));
        }
    }

    #[test]
    fn visible_rows_skip_collapsed_children() {
        let tree = sample();
        let ids: Vec<&str> = tree.visible_rows().map(|row| row.node.id()).collect();
        assert_eq!(ids, ["a", "a1", "a2", "b"]);
    }

    #[test]
    fn address_of_and_index_agree() {
        let tree = sample();
        let index = AddressIndex::build(&tree);
        assert_eq!(index.len(), 5);
        for row in tree.walk() {
            assert_eq!(index.get(row.node.id()), Some(&row.address));
            assert_eq!(tree.address_of(row.node.id()), Some(row.address));
        }
        assert_eq!(tree.address_of("missing"), None);
        assert_eq!(index.get("missing"), None);
    }

    #[test]
    fn validate_reports_duplicates() {
        assert_eq!(sample().validate(), Ok(()));
        let dup = Tree::new(vec![
            Node::new("x", "X").with_children(vec![Node::new("y", "Y")]),
            Node::new("y", "Other Y"),
        ]);
        assert_eq!(
            dup.validate(),
            Err(InvalidTree::DuplicateId(Arc::from("y")))
        );
    }

    #[test]
    fn empty_tree() {
        let tree = Tree::default();
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
        assert!(tree.locate(&[0]).is_none());
        assert!(AddressIndex::build(&tree).is_empty());
    }
}
