//! Errors returned by the interval trees.

use std::fmt;

/// The error type of every fallible tree operation.
///
/// Validation always happens before the tree is touched, so an operation that returns
/// an error leaves the tree exactly as it was.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum TreeError {
    /// The closed interval `[left, right]` is not a valid interval of a tree with `len`
    /// leaves: either `left > right` or `right >= len`.
    /// Single index operations report the index as both `left` and `right`.
    /// Rust ranges are reported as their closed form. An empty range ending at `0` has
    /// none and is reported as `[max(start, 1), 0]`.
    OutOfRange {
        left: usize,
        right: usize,
        len: usize,
    },
    /// A tree can't be built from an empty sequence.
    EmptyConstruction,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::OutOfRange { left, right, len } if left > right => write!(
                f,
                "interval [{left}, {right}] is reversed (tree has {len} elements)"
            ),
            TreeError::OutOfRange { left, right, len } => write!(
                f,
                "interval [{left}, {right}] is out of bounds of a tree with {len} elements"
            ),
            TreeError::EmptyConstruction => {
                write!(f, "can't build an interval tree from an empty sequence")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Shorthand for results of tree operations.
pub type Result<T> = std::result::Result<T, TreeError>;
