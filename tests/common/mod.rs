#![allow(dead_code)]

use interval_trees::*;
use proptest::prelude::*;
use rand::{self, Rng};

/// Something to perform in one round of tests
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum RoundAction {
    /// Set one element. Only meaningful for min trees.
    Set { index: usize, value: i64 },
    /// Add to every element of `[left, right]`. Only meaningful for sum trees.
    Add {
        left: usize,
        right: usize,
        delta: i64,
    },
    Query { left: usize, right: usize },
}

/// The reference implementation: a plain array, scanned in `O(N)` per operation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Naive<N> {
    pub values: Vec<N>,
}

impl<N: Ord + Clone> Naive<N> {
    pub fn min(&self, left: usize, right: usize) -> N {
        self.values[left..=right].iter().min().unwrap().clone()
    }

    pub fn set(&mut self, index: usize, value: N) {
        self.values[index] = value;
    }
}

impl Naive<BigInt> {
    pub fn sum(&self, left: usize, right: usize) -> BigInt {
        self.values[left..=right].iter().sum()
    }

    pub fn add(&mut self, left: usize, right: usize, delta: &BigInt) {
        for value in &mut self.values[left..=right] {
            *value += delta;
        }
    }
}

pub fn is_valid(left: usize, right: usize, len: usize) -> bool {
    left <= right && right < len
}

/// A valid closed interval of an array of length `len`.
pub fn random_interval(rng: &mut impl Rng, len: usize) -> (usize, usize) {
    let (a, b) = (rng.gen_range(0..len), rng.gen_range(0..len));
    (a.min(b), a.max(b))
}

pub const MAX_VALUE: i64 = 1_000;

/// A random round for a min tree (`point_updates`) or a sum tree.
pub fn random_round_action(rng: &mut impl Rng, len: usize, point_updates: bool) -> RoundAction {
    use RoundAction::*;
    match rng.gen_range(0..2) {
        0 if point_updates => Set {
            index: rng.gen_range(0..len),
            value: rng.gen_range(-MAX_VALUE..=MAX_VALUE),
        },
        0 => {
            let (left, right) = random_interval(rng, len);
            Add {
                left,
                right,
                delta: rng.gen_range(-MAX_VALUE..=MAX_VALUE),
            }
        }
        1 => {
            let (left, right) = random_interval(rng, len);
            Query { left, right }
        }
        _ => {
            panic!()
        }
    }
}

/// Runs every round on both a [`MinTree`] and a [`Naive`] array, comparing results.
/// Rounds with invalid intervals must be rejected without changing the tree.
pub fn check_min_rounds(initial: &[i64], rounds: &[RoundAction]) -> std::result::Result<(), TestCaseError> {
    let mut tree = MinTree::new(initial.to_vec()).unwrap();
    let mut naive = Naive {
        values: initial.to_vec(),
    };
    let len = initial.len();

    for round in rounds {
        match *round {
            RoundAction::Set { index, value } if index < len => {
                naive.set(index, value);
                prop_assert_eq!(tree.update(index, value), Ok(naive.min(0, len - 1)));
                prop_assert_eq!(tree.get(index), Ok(value));
            }
            RoundAction::Set { index, value } => {
                prop_assert_eq!(
                    tree.update(index, value),
                    Err(TreeError::OutOfRange {
                        left: index,
                        right: index,
                        len
                    })
                );
            }
            RoundAction::Query { left, right } if is_valid(left, right, len) => {
                prop_assert_eq!(tree.query(left, right), Ok(naive.min(left, right)));
            }
            RoundAction::Query { left, right } => {
                prop_assert_eq!(
                    tree.query(left, right),
                    Err(TreeError::OutOfRange { left, right, len })
                );
            }
            RoundAction::Add { .. } => {}
        }
        prop_assert_eq!(tree.root(), &naive.min(0, len - 1));
    }

    prop_assert_eq!(tree.to_vec(), naive.values);
    tree.assert_correctness();
    Ok(())
}

/// Runs every round on both a [`LazySumTree`] and a [`Naive`] array, comparing results.
/// Rounds with invalid intervals must be rejected without changing the tree.
pub fn check_sum_rounds(initial: &[i64], rounds: &[RoundAction]) -> std::result::Result<(), TestCaseError> {
    let mut tree = LazySumTree::new(initial.to_vec()).unwrap();
    let mut naive = Naive {
        values: initial.iter().map(|&v| BigInt::from(v)).collect(),
    };
    let len = initial.len();

    for round in rounds {
        match *round {
            RoundAction::Add { left, right, delta } if is_valid(left, right, len) => {
                let delta = BigInt::from(delta);
                naive.add(left, right, &delta);
                prop_assert_eq!(
                    tree.range_update(left, right, delta),
                    Ok(naive.sum(0, len - 1))
                );
            }
            RoundAction::Add { left, right, delta } => {
                prop_assert_eq!(
                    tree.range_update(left, right, delta),
                    Err(TreeError::OutOfRange { left, right, len })
                );
            }
            RoundAction::Query { left, right } if is_valid(left, right, len) => {
                prop_assert_eq!(tree.range_query(left, right), Ok(naive.sum(left, right)));
            }
            RoundAction::Query { left, right } => {
                prop_assert_eq!(
                    tree.range_query(left, right),
                    Err(TreeError::OutOfRange { left, right, len })
                );
            }
            RoundAction::Set { .. } => {}
        }
        tree.assert_correctness();
    }

    prop_assert_eq!(tree.total(), naive.sum(0, len - 1));
    prop_assert_eq!(tree.to_vec(), naive.values);
    prop_assert!(!tree.has_pending());
    Ok(())
}

/// Random differential test of a min tree: `num_rounds` random rounds on an array of
/// length `len`.
pub fn check_min_consistency(len: usize, num_rounds: usize) {
    let mut rng = rand::thread_rng();
    let initial: Vec<i64> = (0..len)
        .map(|_| rng.gen_range(-MAX_VALUE..=MAX_VALUE))
        .collect();
    let rounds: Vec<_> = (0..num_rounds)
        .map(|_| random_round_action(&mut rng, len, true))
        .collect();
    check_min_rounds(&initial, &rounds).unwrap();
}

/// Random differential test of a sum tree: `num_rounds` random rounds on an array of
/// length `len`.
pub fn check_sum_consistency(len: usize, num_rounds: usize) {
    let mut rng = rand::thread_rng();
    let initial: Vec<i64> = (0..len)
        .map(|_| rng.gen_range(-MAX_VALUE..=MAX_VALUE))
        .collect();
    let rounds: Vec<_> = (0..num_rounds)
        .map(|_| random_round_action(&mut rng, len, false))
        .collect();
    check_sum_rounds(&initial, &rounds).unwrap();
}
