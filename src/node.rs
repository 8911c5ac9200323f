//! The indexing skeleton shared by the trees in this crate.
//!
//! Every tree here is an implicit binary tree stored in a flat buffer. Nodes are
//! addressed by a 1-based index: the root is `1`, and the children of node `i` are
//! `2i` and `2i + 1`. A node covers a closed interval `[lo, hi]` of the underlying
//! array, and an internal node splits it at `mid = lo + (hi - lo) / 2` into
//! `[lo, mid]` and `[mid + 1, hi]`.
//!
//! With this split the deepest index ever used is below `4 * len`, which is the size
//! of every node buffer.

use std::ops::{Bound, RangeBounds};

use crate::error::{Result, TreeError};

/// A position in the implicit tree: the node's index in the buffer, together with the
/// interval it covers. Nodes are cheap values, created while descending.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct Node {
    pub index: usize,
    pub lo: usize,
    pub hi: usize,
}

impl Node {
    /// The root of a tree with `len` leaves. `len` must be positive.
    pub fn root(len: usize) -> Node {
        debug_assert!(len > 0);
        Node {
            index: 1,
            lo: 0,
            hi: len - 1,
        }
    }

    pub fn mid(&self) -> usize {
        self.lo + (self.hi - self.lo) / 2
    }

    pub fn left(&self) -> Node {
        Node {
            index: 2 * self.index,
            lo: self.lo,
            hi: self.mid(),
        }
    }

    pub fn right(&self) -> Node {
        Node {
            index: 2 * self.index + 1,
            lo: self.mid() + 1,
            hi: self.hi,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.lo == self.hi
    }

    /// The number of leaves under this node.
    pub fn len(&self) -> usize {
        self.hi - self.lo + 1
    }

    /// Whether this node's interval doesn't meet `[left, right]`.
    pub fn is_disjoint(&self, left: usize, right: usize) -> bool {
        right < self.lo || self.hi < left
    }

    /// Whether this node's interval is contained in `[left, right]`.
    pub fn is_within(&self, left: usize, right: usize) -> bool {
        left <= self.lo && self.hi <= right
    }
}

/// The size of a node buffer for a tree with `len` leaves.
pub(crate) fn buffer_len(len: usize) -> usize {
    4 * len
}

/// Checks that `[left, right]` is a valid closed interval of a tree with `len` leaves.
pub(crate) fn check_interval(left: usize, right: usize, len: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(TreeError::OutOfRange { left, right, len });
    }
    Ok(())
}

/// Checks that `index` is a valid leaf of a tree with `len` leaves.
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    check_interval(index, index, len)
}

/// Translates any rust range into a closed interval `[left, right]` of a tree with
/// `len` leaves. Empty ranges are rejected: every tree query covers at least one
/// element. An empty range ending at `0` has no closed form and is reported as the
/// reversed interval `[max(start, 1), 0]`.
pub(crate) fn closed_interval<R: RangeBounds<usize>>(
    range: R,
    len: usize,
) -> Result<(usize, usize)> {
    let left = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let right = match range.end_bound() {
        Bound::Included(&end) => end,
        Bound::Excluded(&end) => match end.checked_sub(1) {
            Some(end) => end,
            // `..0` is empty: report it as a reversed interval
            None => {
                return Err(TreeError::OutOfRange {
                    left: left.max(1),
                    right: 0,
                    len,
                })
            }
        },
        Bound::Unbounded => len.saturating_sub(1),
    };
    check_interval(left, right, len)?;
    Ok((left, right))
}
