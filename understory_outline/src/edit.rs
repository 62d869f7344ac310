// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot edits: remove, insert, move, and the expanded flag.
//!
//! Every edit copies only the sibling sequences on the path from the roots to the edit
//! point. Nodes off that path are shared with the input snapshot.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Address, Node, NotFound, Rejected, Tree, is_ancestor};

/// Where a dropped node lands relative to its target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DropPosition {
    /// Immediately before the target, as its sibling.
    Before,
    /// Immediately after the target, as its sibling.
    After,
    /// As the first child of the target.
    Inside,
}

/// Reject drops that would make a node its own ancestor.
///
/// This is the guard [`Tree::compute_move`] applies before touching the tree, exposed so
/// a drag surface can color a hover target without computing the move. It does not
/// check that either address resolves.
///
/// Dropping a node before or after itself passes: it is a no-op move, not an error.
pub fn check_drop(
    source: &[usize],
    target: &[usize],
    position: DropPosition,
) -> Result<(), Rejected> {
    if source == target && position == DropPosition::Inside {
        return Err(Rejected::OntoItself);
    }
    if is_ancestor(source, target) {
        return Err(Rejected::IntoOwnSubtree);
    }
    Ok(())
}

/// Rebuild `siblings` with the sibling sequence at `parent` handed to `edit`.
///
/// `parent` is walked like an address, except that it names the sequence to edit: the
/// empty path edits `siblings` itself, `[i]` edits the children of `siblings[i]`.
/// Returns `None` (and discards the partial copy) if the path does not resolve or
/// `edit` returns `None`.
fn edit_siblings<R, F>(
    siblings: &Arc<[Node]>,
    parent: &[usize],
    edit: F,
) -> Option<(Arc<[Node]>, R)>
where
    F: FnOnce(&mut Vec<Node>) -> Option<R>,
{
    match parent.split_first() {
        None => {
            let mut seq = siblings.to_vec();
            let out = edit(&mut seq)?;
            Some((Arc::from(seq), out))
        }
        Some((&first, rest)) => {
            let node = siblings.get(first)?;
            let (children, out) = edit_siblings(&node.children, rest, edit)?;
            let mut seq = siblings.to_vec();
            seq[first] = node.with_shared_children(children);
            Some((Arc::from(seq), out))
        }
    }
}

/// Correct `target` for the index shift caused by removing the node at `source`.
///
/// Removing `source` shifts every later sibling of `source` down by one, and with them
/// every address that passes through one of those siblings. The target is affected iff
/// the source's parent is a prefix of it and the component at the source's depth is past
/// the source's index.
fn shift_after_removal(source: &[usize], target: &[usize]) -> Address {
    let mut adjusted = Address::from(target);
    if let Some((&removed, parent)) = source.split_last()
        && target.len() > parent.len()
        && target.starts_with(parent)
        && target[parent.len()] > removed
    {
        adjusted.0[parent.len()] -= 1;
    }
    adjusted
}

impl Tree {
    /// Remove the node at `address` together with its subtree.
    ///
    /// Returns the new snapshot and the removed node. Later siblings of the removed node
    /// shift down by one position; its own children are not touched.
    pub fn remove(&self, address: &[usize]) -> Result<(Self, Node), NotFound> {
        let not_found = || NotFound(Address::from(address));
        let (&index, parent) = address.split_last().ok_or_else(not_found)?;
        let (roots, removed) = edit_siblings(&self.roots, parent, |seq| {
            (index < seq.len()).then(|| seq.remove(index))
        })
        .ok_or_else(not_found)?;
        Ok((Self { roots }, removed))
    }

    /// Insert `node` relative to the node at `target`.
    ///
    /// - [`DropPosition::Before`] / [`DropPosition::After`]: into the target's sibling
    ///   sequence, immediately before or after it.
    /// - [`DropPosition::Inside`]: as the target's first child.
    ///
    /// In every case `target` must resolve. On failure `node` is dropped and the
    /// snapshot is left as it was.
    pub fn insert(
        &self,
        node: Node,
        target: &[usize],
        position: DropPosition,
    ) -> Result<Self, NotFound> {
        let not_found = || NotFound(Address::from(target));
        let (&index, parent) = target.split_last().ok_or_else(not_found)?;
        let edited = match position {
            DropPosition::Before | DropPosition::After => {
                let at = if position == DropPosition::After {
                    index + 1
                } else {
                    index
                };
                edit_siblings(&self.roots, parent, |seq| {
                    (index < seq.len()).then(|| seq.insert(at, node))
                })
            }
            DropPosition::Inside => {
                edit_siblings(&self.roots, target, |seq| {
                    seq.insert(0, node);
                    Some(())
                })
            }
        };
        let (roots, ()) = edited.ok_or_else(not_found)?;
        Ok(Self { roots })
    }

    /// Move the subtree at `source` to `position` relative to `target`.
    ///
    /// Both addresses refer to this snapshot. The move is computed as one transaction:
    ///
    /// 1. Drops that would make the node its own ancestor are rejected: `Inside` onto
    ///    itself, or any position within its own subtree (see [`check_drop`]).
    ///    Dropping a node before or after itself returns an equal tree.
    /// 2. The source subtree is removed.
    /// 3. The target address is corrected for the index shift of that removal.
    /// 4. The subtree is inserted at the corrected target.
    ///
    /// Any failure leaves the caller holding this snapshot; the returned tree replaces
    /// it on success.
    pub fn compute_move(
        &self,
        source: &[usize],
        target: &[usize],
        position: DropPosition,
    ) -> Result<Self, Rejected> {
        check_drop(source, target, position)?;
        if self.locate(source).is_none() {
            return Err(Rejected::SourceNotFound);
        }
        if self.locate(target).is_none() {
            return Err(Rejected::TargetNotFound);
        }
        if source == target {
            return Ok(self.clone());
        }
        let (rest, moved) = self.remove(source).map_err(|_| Rejected::SourceNotFound)?;
        let target = shift_after_removal(source, target);
        rest.insert(moved, &target, position)
            .map_err(|_| Rejected::TargetNotFound)
    }

    /// Set the `expanded` flag of the node at `address`.
    ///
    /// This is the only edit that targets the presentation hint; every other edit
    /// carries it through unchanged.
    pub fn set_expanded(&self, address: &[usize], expanded: bool) -> Result<Self, NotFound> {
        let not_found = || NotFound(Address::from(address));
        let (&index, parent) = address.split_last().ok_or_else(not_found)?;
        let (roots, ()) = edit_siblings(&self.roots, parent, |seq| {
            let node = seq.get_mut(index)?;
            node.expanded = expanded;
            Some(())
        })
        .ok_or_else(not_found)?;
        Ok(Self { roots })
    }
}
