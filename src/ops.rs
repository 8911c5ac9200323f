//! The operators that the trees combine intervals with.
//!
//! An interval tree only needs to know how to combine the aggregates of two adjacent
//! intervals, see [`Operation`]. Range queries never need an identity element, since
//! intervals that don't meet the query simply don't contribute, but an [`Identity`] is
//! available for operators that have one.
//!
//! The operators in this module are [`Min`], [`Max`] and [`Add`].

use num_bigint::BigInt;
use num_traits::Zero;

/// Specifies which associative operator a tree combines intervals with.
pub trait Operation<N> {
    /// Combine the aggregates of two adjacent intervals, `a` on the left of `b`.
    ///
    /// Must be associative: `combine(combine(a, b), c) = combine(a, combine(b, c))`.
    fn combine(&self, a: &N, b: &N) -> N;

    /// Replace `a` with `combine(a, b)`. By default this simply calls `combine`;
    /// implementations may override it to reuse the memory of `a`.
    #[inline]
    fn combine_mut(&self, a: &mut N, b: &N) {
        let res = self.combine(&*a, b);
        *a = res;
    }
}

/// An operator with an identity element `id`: `combine(a, id) = combine(id, a) = a`
/// for every `a`.
///
/// The identity has to be a true identity of the whole domain `N`. A large value that
/// merely happens to be bigger than the inputs at hand is not an identity of [`Min`].
pub trait Identity<N> {
    fn identity(&self) -> N;
}

/// Each node holds the minimum of its interval.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Min;

/// Each node holds the maximum of its interval.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Max;

/// Each node holds the sum of its interval.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct Add;

impl<N: Ord + Clone> Operation<N> for Min {
    #[inline]
    fn combine(&self, a: &N, b: &N) -> N {
        // ties go to the left
        if b < a {
            b.clone()
        } else {
            a.clone()
        }
    }

    #[inline]
    fn combine_mut(&self, a: &mut N, b: &N) {
        if b < a {
            a.clone_from(b);
        }
    }
}

impl<N: Ord + Clone> Operation<N> for Max {
    #[inline]
    fn combine(&self, a: &N, b: &N) -> N {
        if b > a {
            b.clone()
        } else {
            a.clone()
        }
    }

    #[inline]
    fn combine_mut(&self, a: &mut N, b: &N) {
        if b > a {
            a.clone_from(b);
        }
    }
}

macro_rules! impl_primitive {
    ($($ty:ty),*) => {
        $(
            impl Identity<$ty> for Min {
                /// Returns the maximum of the type, which is the identity of `min`.
                #[inline]
                fn identity(&self) -> $ty {
                    <$ty>::MAX
                }
            }

            impl Identity<$ty> for Max {
                /// Returns the minimum of the type, which is the identity of `max`.
                #[inline]
                fn identity(&self) -> $ty {
                    <$ty>::MIN
                }
            }

            impl Operation<$ty> for Add {
                /// Returns the sum. Overflow panics in debug builds.
                #[inline]
                fn combine(&self, a: &$ty, b: &$ty) -> $ty {
                    *a + *b
                }
            }

            impl Identity<$ty> for Add {
                /// Returns zero.
                #[inline]
                fn identity(&self) -> $ty {
                    0
                }
            }
        )*
    };
}

impl_primitive!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Operation<BigInt> for Add {
    /// Returns the sum. This usually allocates memory.
    #[inline]
    fn combine(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a + b
    }

    /// Computes the sum while reusing memory in `a`.
    #[inline]
    fn combine_mut(&self, a: &mut BigInt, b: &BigInt) {
        *a += b;
    }
}

impl Identity<BigInt> for Add {
    /// Returns zero.
    #[inline]
    fn identity(&self) -> BigInt {
        BigInt::zero()
    }
}
