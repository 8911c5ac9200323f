//! The lazy interval tree: range additions and range sums over arbitrary-precision
//! integers.
//!
//! See [`LazySumTree`].

use std::fmt;
use std::ops::RangeBounds;

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::{Result, TreeError};
use crate::node::{self, Node};
use crate::ops::{Add, Identity, Operation};

/// An interval tree supporting adding a value to every element of an interval, and
/// summing an interval, both in `O(log N)` time.
///
/// Values are [`BigInt`]s, so sums are exact no matter how many additions pile up.
///
/// Besides the sum of its interval, every node carries a `pending` delta: an addition
/// recorded against the node's whole interval, that is neither in the node's own sum
/// nor in its children yet. Whenever a later query or update descends into the node,
/// the delta is settled: added into the node's sum and pushed one level down into the
/// children's pending deltas. A node's sum can be trusted once it has been settled,
/// which is why queries also take `&mut self`.
///
/// ```
/// use interval_trees::{BigInt, LazySumTree};
///
/// let mut tree = LazySumTree::new(vec![1, 2, 3, 4, 5]).unwrap();
/// assert_eq!(tree.range_query(0, 4), Ok(BigInt::from(15)));
/// tree.range_update(1, 3, 10).unwrap();
/// assert_eq!(tree.range_query(0, 4), Ok(BigInt::from(45)));
/// assert_eq!(tree.range_query(1, 1), Ok(BigInt::from(12)));
/// ```
#[derive(Clone)]
pub struct LazySumTree {
    len: usize,
    sums: Vec<BigInt>,
    pending: Vec<BigInt>,
}

impl LazySumTree {
    /// Builds a tree over `values`. All pending deltas start at zero.
    /// Fails on an empty sequence.
    /// O(N).
    pub fn new<V: Into<BigInt>>(values: Vec<V>) -> Result<Self> {
        if values.is_empty() {
            return Err(TreeError::EmptyConstruction);
        }
        let len = values.len();
        let mut tree = LazySumTree {
            len,
            sums: vec![BigInt::zero(); node::buffer_len(len)],
            pending: vec![BigInt::zero(); node::buffer_len(len)],
        };
        let mut values = values
            .into_iter()
            .map(|v| Some(v.into()))
            .collect::<Vec<_>>();
        tree.build(&mut values, Node::root(len));
        log::debug!(
            "built lazy sum tree with {} leaves in {} slots",
            len,
            tree.sums.len()
        );
        Ok(tree)
    }

    /// Builds a tree over a slice of values.
    pub fn from_slice<V: Into<BigInt> + Clone>(values: &[V]) -> Result<Self> {
        Self::new(values.to_vec())
    }

    fn build(&mut self, values: &mut [Option<BigInt>], node: Node) {
        if node.is_leaf() {
            if let Some(value) = values[node.lo].take() {
                self.sums[node.index] = value;
            }
            return;
        }
        self.build(values, node.left());
        self.build(values, node.right());
        self.sums[node.index] = Add.combine(
            &self.sums[node.left().index],
            &self.sums[node.right().index],
        );
    }

    /// The number of elements in the underlying array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A tree is never empty; see [`TreeError::EmptyConstruction`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Applies the node's pending delta to its own sum, and hands it down to its
    /// children's pending deltas. Afterwards the node's pending delta is zero.
    fn settle(&mut self, node: Node) {
        if self.pending[node.index].is_zero() {
            return;
        }
        let delta = std::mem::take(&mut self.pending[node.index]);
        self.sums[node.index] += &delta * node.len();
        if !node.is_leaf() {
            // children may already carry deltas of their own
            self.pending[node.left().index] += &delta;
            self.pending[node.right().index] += &delta;
        }
    }

    /// Records `delta` as applying to the whole of `node`, which must be settled.
    fn apply(&mut self, node: Node, delta: &BigInt) {
        debug_assert!(self.pending[node.index].is_zero());
        self.sums[node.index] += delta * node.len();
        if !node.is_leaf() {
            self.pending[node.left().index] += delta;
            self.pending[node.right().index] += delta;
        }
    }

    /// The sum of the closed interval `[left, right]`.
    ///
    /// This settles every node it visits, but never changes the logical contents of
    /// the array.
    ///
    /// Fails with [`TreeError::OutOfRange`] unless `left <= right < len`.
    /// O(log N).
    pub fn range_query(&mut self, left: usize, right: usize) -> Result<BigInt> {
        node::check_interval(left, right, self.len)?;
        log::trace!("range query [{}, {}]", left, right);
        Ok(self.query_node(left, right, Node::root(self.len)))
    }

    /// Like [`LazySumTree::range_query`], but takes any rust range. Empty ranges are
    /// [`TreeError::OutOfRange`].
    pub fn range_query_bounds<R: RangeBounds<usize>>(&mut self, range: R) -> Result<BigInt> {
        let (left, right) = node::closed_interval(range, self.len)?;
        self.range_query(left, right)
    }

    fn query_node(&mut self, left: usize, right: usize, node: Node) -> BigInt {
        self.settle(node);
        if node.is_disjoint(left, right) {
            return Add.identity();
        }
        if node.is_within(left, right) {
            return self.sums[node.index].clone();
        }
        let mut sum = self.query_node(left, right, node.left());
        Add.combine_mut(&mut sum, &self.query_node(left, right, node.right()));
        sum
    }

    /// Adds `delta` to every element of the closed interval `[left, right]`.
    /// Returns the new sum of the whole array.
    ///
    /// Fails with [`TreeError::OutOfRange`] unless `left <= right < len`, in which case
    /// the tree is unchanged.
    /// O(log N).
    pub fn range_update<V: Into<BigInt>>(
        &mut self,
        left: usize,
        right: usize,
        delta: V,
    ) -> Result<BigInt> {
        node::check_interval(left, right, self.len)?;
        let delta = delta.into();
        log::trace!("range update [{}, {}] += {}", left, right, delta);
        Ok(self.update_node(left, right, &delta, Node::root(self.len)))
    }

    /// Like [`LazySumTree::range_update`], but takes any rust range. Empty ranges are
    /// [`TreeError::OutOfRange`].
    pub fn range_update_bounds<R, V>(&mut self, range: R, delta: V) -> Result<BigInt>
    where
        R: RangeBounds<usize>,
        V: Into<BigInt>,
    {
        let (left, right) = node::closed_interval(range, self.len)?;
        self.range_update(left, right, delta)
    }

    /// Returns the node's sum after the update.
    fn update_node(&mut self, left: usize, right: usize, delta: &BigInt, node: Node) -> BigInt {
        self.settle(node);
        if node.is_disjoint(left, right) {
            return self.sums[node.index].clone();
        }
        if node.is_within(left, right) {
            self.apply(node, delta);
            return self.sums[node.index].clone();
        }
        let mut sum = self.update_node(left, right, delta, node.left());
        Add.combine_mut(&mut sum, &self.update_node(left, right, delta, node.right()));
        self.sums[node.index].clone_from(&sum);
        sum
    }

    /// The current value at `index`.
    /// O(log N).
    pub fn point_query(&mut self, index: usize) -> Result<BigInt> {
        self.range_query(index, index)
    }

    /// Adds `delta` to the value at `index`. Returns the new sum of the whole array.
    /// O(log N).
    pub fn add_at<V: Into<BigInt>>(&mut self, index: usize, delta: V) -> Result<BigInt> {
        self.range_update(index, index, delta)
    }

    /// The sum of the whole array.
    /// O(1).
    pub fn total(&mut self) -> BigInt {
        let root = Node::root(self.len);
        self.settle(root);
        self.sums[root.index].clone()
    }

    /// Whether any node still carries a delta that wasn't pushed down to its children.
    pub fn has_pending(&self) -> bool {
        self.pending.iter().any(|delta| !delta.is_zero())
    }

    /// Pushes every pending delta all the way down to the leaves.
    /// O(N).
    pub fn settle_all(&mut self) {
        self.settle_subtree(Node::root(self.len));
        debug_assert!(!self.has_pending());
    }

    fn settle_subtree(&mut self, node: Node) {
        self.settle(node);
        if !node.is_leaf() {
            self.settle_subtree(node.left());
            self.settle_subtree(node.right());
        }
    }

    /// The current values of the underlying array, in order. Settles the whole tree.
    /// O(N).
    pub fn to_vec(&mut self) -> Vec<BigInt> {
        self.settle_all();
        let mut res = Vec::with_capacity(self.len);
        self.collect_leaves(Node::root(self.len), &mut res);
        res
    }

    fn collect_leaves(&self, node: Node, res: &mut Vec<BigInt>) {
        if node.is_leaf() {
            res.push(self.sums[node.index].clone());
        } else {
            self.collect_leaves(node.left(), res);
            self.collect_leaves(node.right(), res);
        }
    }

    /// Checks that the sum of every internal node equals the sums of its children,
    /// each with its own pending delta added in.
    /// Used for testing.
    pub fn assert_correctness(&self) {
        self.assert_correctness_node(Node::root(self.len));
    }

    // Returns the node's sum with its pending delta added in.
    fn assert_correctness_node(&self, node: Node) -> BigInt {
        let settled = &self.sums[node.index] + &self.pending[node.index] * node.len();
        if node.is_leaf() {
            return settled;
        }
        let left = self.assert_correctness_node(node.left());
        let right = self.assert_correctness_node(node.right());
        assert_eq!(
            self.sums[node.index],
            left + right,
            "node {} over [{}, {}] disagrees with its children",
            node.index,
            node.lo,
            node.hi
        );
        settled
    }
}

impl<V: Into<BigInt>> TryFrom<Vec<V>> for LazySumTree {
    type Error = TreeError;

    fn try_from(values: Vec<V>) -> Result<Self> {
        Self::new(values)
    }
}

impl fmt::Debug for LazySumTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // formatting must not settle, so report the raw root and whether work is deferred
        f.debug_struct("LazySumTree")
            .field("len", &self.len)
            .field("total", &(&self.sums[1] + &self.pending[1] * self.len))
            .field("has_pending", &self.has_pending())
            .finish()
    }
}
