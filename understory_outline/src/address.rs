// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional node addresses.

use alloc::vec::Vec;
use core::fmt;
use core::ops::Deref;

use smallvec::SmallVec;

/// Path of sibling indices from the roots of a [`Tree`](crate::Tree) to one node.
///
/// The first element selects a root, each following element selects a child of the
/// node selected so far. The empty address never resolves to a node.
///
/// Addresses are positional. Any edit can shift sibling indices, so an address is only
/// meaningful for the snapshot it was computed from; recompute it (for example with
/// [`Tree::address_of`](crate::Tree::address_of)) after every edit.
///
/// `Address` dereferences to `[usize]`, so slice methods such as `len`, `last`, and
/// `split_last` are available directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Address(pub(crate) SmallVec<[usize; 8]>);

impl Address {
    /// The empty address. It does not address any node.
    pub fn new() -> Self {
        Self(SmallVec::new())
    }

    /// Address of the root at `index`.
    pub fn root(index: usize) -> Self {
        let mut path = SmallVec::new();
        path.push(index);
        Self(path)
    }

    /// Address of this node's child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut path = self.0.clone();
        path.push(index);
        Self(path)
    }

    /// Address of the parent node, or `None` for roots and the empty address.
    pub fn parent(&self) -> Option<Self> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self::from(&self.0[..n - 1])),
        }
    }

    /// Zero-based nesting depth; roots have depth 0.
    ///
    /// Returns `None` for the empty address.
    pub fn depth(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    /// Returns `true` if this addresses a root item.
    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    /// Returns `true` if this address is a strict ancestor of `other`.
    ///
    /// Equivalent to [`is_ancestor(self, other)`](is_ancestor).
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        is_ancestor(self, other)
    }

    /// View the indices as a slice.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Returns `true` iff `ancestor` is a strict prefix of `descendant`.
///
/// A node is not its own ancestor, so equal addresses return `false`. The empty address
/// addresses no node and is not an ancestor of anything.
///
/// This is the only guard against circular structure: a subtree may never be dropped
/// at an address for which its own address is an ancestor.
pub fn is_ancestor(ancestor: &[usize], descendant: &[usize]) -> bool {
    !ancestor.is_empty()
        && ancestor.len() < descendant.len()
        && descendant.starts_with(ancestor)
}

impl Deref for Address {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl AsRef<[usize]> for Address {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl From<&[usize]> for Address {
    fn from(path: &[usize]) -> Self {
        Self(SmallVec::from_slice(path))
    }
}

impl<const N: usize> From<[usize; N]> for Address {
    fn from(path: [usize; N]) -> Self {
        Self(SmallVec::from_slice(&path))
    }
}

impl From<Vec<usize>> for Address {
    fn from(path: Vec<usize>) -> Self {
        Self(SmallVec::from_vec(path))
    }
}

impl FromIterator<usize> for Address {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Address {
    /// Dot-separated indices, for example `0.2.1`. The empty address prints as `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut it = self.0.iter();
        let Some(first) = it.next() else {
            return f.write_str("-");
        };
        write!(f, "{first}")?;
        for index in it {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}
