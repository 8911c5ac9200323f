//! The eager interval tree: point updates and range queries, generic over the
//! combining operator.
//!
//! See [`IntervalTree`]. The classic range-minimum-query tree is [`MinTree`].

use std::fmt;
use std::ops::RangeBounds;

use crate::error::{Result, TreeError};
use crate::node::{self, Node};
use crate::ops::{Max, Min, Operation};

/// An interval tree over a fixed-length array, supporting point updates and queries
/// over any closed interval, in `O(log N)` time each.
///
/// Every internal node holds `op.combine(left, right)` of its two children, and this
/// holds whenever no method of the tree is running. There is no deferred work.
///
/// The tree is stored in one buffer of `4 * len` slots. Slots that no node maps to are
/// left as `None`.
///
/// ```
/// use interval_trees::MinTree;
///
/// let mut tree = MinTree::new(vec![5, 2, 8, 1, 9]).unwrap();
/// assert_eq!(tree.query(1, 3), Ok(1));
/// tree.update(3, 10).unwrap();
/// assert_eq!(tree.query(1, 3), Ok(2));
/// ```
#[derive(Clone)]
pub struct IntervalTree<N, O> {
    len: usize,
    nodes: Vec<Option<N>>,
    op: O,
}

/// Range minimum queries with point updates.
pub type MinTree<N> = IntervalTree<N, Min>;

/// Range maximum queries with point updates.
pub type MaxTree<N> = IntervalTree<N, Max>;

impl<N: Ord + Clone> MinTree<N> {
    /// Builds a range minimum tree over `values`.
    /// O(N).
    pub fn new(values: Vec<N>) -> Result<Self> {
        IntervalTree::with_op(values, Min)
    }
}

impl<N: Ord + Clone> MaxTree<N> {
    /// Builds a range maximum tree over `values`.
    /// O(N).
    pub fn new(values: Vec<N>) -> Result<Self> {
        IntervalTree::with_op(values, Max)
    }
}

impl<N: Clone, O: Operation<N>> IntervalTree<N, O> {
    /// Builds a tree over `values`, combining with `op`.
    /// Fails on an empty sequence.
    /// O(N).
    pub fn with_op(values: Vec<N>, op: O) -> Result<Self> {
        if values.is_empty() {
            return Err(TreeError::EmptyConstruction);
        }
        let len = values.len();
        let mut nodes = Vec::new();
        nodes.resize_with(node::buffer_len(len), || None);
        let mut tree = IntervalTree { len, nodes, op };
        let mut values = values.into_iter().map(Some).collect::<Vec<_>>();
        tree.build(&mut values, Node::root(len));
        log::debug!(
            "built interval tree with {} leaves in {} slots",
            len,
            tree.nodes.len()
        );
        Ok(tree)
    }

    /// Builds a tree over a slice of values.
    pub fn from_slice(values: &[N], op: O) -> Result<Self> {
        Self::with_op(values.to_vec(), op)
    }

    fn build(&mut self, values: &mut [Option<N>], node: Node) {
        if node.is_leaf() {
            self.nodes[node.index] = values[node.lo].take();
            return;
        }
        self.build(values, node.left());
        self.build(values, node.right());
        self.pull(node);
    }

    /// Recomputes `node` from its two children.
    fn pull(&mut self, node: Node) {
        let combined = self
            .op
            .combine(self.stored(node.left()), self.stored(node.right()));
        self.nodes[node.index] = Some(combined);
    }

    fn stored(&self, node: Node) -> &N {
        match &self.nodes[node.index] {
            Some(value) => value,
            None => unreachable!("interval tree node {} is unbuilt", node.index),
        }
    }

    /// The number of elements in the underlying array.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A tree is never empty; see [`TreeError::EmptyConstruction`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The combined value of the closed interval `[left, right]`.
    ///
    /// Fails with [`TreeError::OutOfRange`] unless `left <= right < len`.
    /// O(log N).
    pub fn query(&self, left: usize, right: usize) -> Result<N> {
        node::check_interval(left, right, self.len)?;
        log::trace!("query [{}, {}]", left, right);
        match self.query_node(left, right, Node::root(self.len)) {
            Some(value) => Ok(value),
            // the root always meets a valid interval
            None => unreachable!("valid interval [{left}, {right}] met no node"),
        }
    }

    /// Like [`IntervalTree::query`], but takes any rust range. Empty ranges are
    /// [`TreeError::OutOfRange`].
    ///
    /// ```
    /// use interval_trees::MinTree;
    ///
    /// let tree = MinTree::new(vec![5, 2, 8, 1, 9]).unwrap();
    /// assert_eq!(tree.query_range(..3), Ok(2));
    /// assert_eq!(tree.query_range(2..), Ok(1));
    /// assert!(tree.query_range(2..2).is_err());
    /// ```
    pub fn query_range<R: RangeBounds<usize>>(&self, range: R) -> Result<N> {
        let (left, right) = node::closed_interval(range, self.len)?;
        self.query(left, right)
    }

    // Disjoint nodes contribute nothing, so no identity element is needed.
    fn query_node(&self, left: usize, right: usize, node: Node) -> Option<N> {
        if node.is_disjoint(left, right) {
            return None;
        }
        if node.is_within(left, right) {
            return Some(self.stored(node).clone());
        }
        let from_left = self.query_node(left, right, node.left());
        let from_right = self.query_node(left, right, node.right());
        match (from_left, from_right) {
            (Some(mut l), Some(r)) => {
                self.op.combine_mut(&mut l, &r);
                Some(l)
            }
            (l, r) => l.or(r),
        }
    }

    /// The value at `index`.
    /// O(log N).
    pub fn get(&self, index: usize) -> Result<N> {
        self.query(index, index)
    }

    /// The combined value of the whole array.
    /// O(1).
    pub fn root(&self) -> &N {
        self.stored(Node::root(self.len))
    }

    /// Sets the value at `index` to `value`, and recomputes every ancestor of its leaf.
    /// Returns the new combined value of the whole array.
    ///
    /// Fails with [`TreeError::OutOfRange`] unless `index < len`, in which case the tree
    /// is unchanged.
    /// O(log N).
    pub fn update(&mut self, index: usize, value: N) -> Result<N> {
        node::check_index(index, self.len)?;
        log::trace!("update [{}]", index);
        self.update_node(index, value, Node::root(self.len));
        Ok(self.root().clone())
    }

    fn update_node(&mut self, index: usize, value: N, node: Node) {
        if node.is_leaf() {
            debug_assert_eq!(node.lo, index);
            self.nodes[node.index] = Some(value);
            return;
        }
        if index <= node.mid() {
            self.update_node(index, value, node.left());
        } else {
            self.update_node(index, value, node.right());
        }
        self.pull(node);
    }

    /// The current values of the underlying array, in order.
    /// O(N).
    pub fn to_vec(&self) -> Vec<N> {
        let mut res = Vec::with_capacity(self.len);
        self.collect_leaves(Node::root(self.len), &mut res);
        res
    }

    fn collect_leaves(&self, node: Node, res: &mut Vec<N>) {
        if node.is_leaf() {
            res.push(self.stored(node).clone());
        } else {
            self.collect_leaves(node.left(), res);
            self.collect_leaves(node.right(), res);
        }
    }

    /// Checks that every internal node is the combination of its children.
    /// Used for testing.
    pub fn assert_correctness(&self)
    where
        N: PartialEq + fmt::Debug,
    {
        self.assert_correctness_node(Node::root(self.len));
    }

    fn assert_correctness_node(&self, node: Node)
    where
        N: PartialEq + fmt::Debug,
    {
        if node.is_leaf() {
            return;
        }
        self.assert_correctness_node(node.left());
        self.assert_correctness_node(node.right());
        let expected = self
            .op
            .combine(self.stored(node.left()), self.stored(node.right()));
        assert_eq!(
            self.stored(node),
            &expected,
            "node {} over [{}, {}] is stale",
            node.index,
            node.lo,
            node.hi
        );
    }
}

impl<N: Clone, O: Operation<N>> TryFrom<Vec<N>> for IntervalTree<N, O>
where
    O: Default,
{
    type Error = TreeError;

    fn try_from(values: Vec<N>) -> Result<Self> {
        Self::with_op(values, O::default())
    }
}

impl<N: Clone + fmt::Debug, O: Operation<N> + fmt::Debug> fmt::Debug for IntervalTree<N, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalTree")
            .field("op", &self.op)
            .field("values", &self.to_vec())
            .finish()
    }
}
