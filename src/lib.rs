//! Array-backed interval trees.
//!
//! This crate contains two trees over a fixed-length array, both stored as an implicit
//! binary tree in one flat buffer:
//!
//! * [`IntervalTree`] answers queries over any closed interval and supports point
//!   updates, for any associative operator in [`ops`]. With [`ops::Min`] it is the
//!   classic range minimum query tree, [`MinTree`].
//! * [`LazySumTree`] supports adding a value to every element of an interval and
//!   summing an interval. Additions are propagated lazily, and values are
//!   arbitrary-precision [`BigInt`]s.
//!
//! Every operation takes `O(log N)` time. Intervals are closed and 0-based:
//! `query(left, right)` covers `left..=right`. Invalid intervals are reported as
//! [`TreeError::OutOfRange`] before the tree is touched.

mod error;
mod lazy;
mod node;
pub mod ops;
mod tree;

pub use error::{Result, TreeError};
pub use lazy::LazySumTree;
pub use num_bigint::BigInt;
pub use tree::{IntervalTree, MaxTree, MinTree};
