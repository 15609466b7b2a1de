//! Subtree sizes and the log-level balance test.
//!
//! The tree keeps, for every node, `level(left)` and `level(right)` within one
//! of each other, where `level(0) == 0` and `level(n) == floor(log2 n) + 1`.
//! [`log_smaller`] answers `level(a) < level(b)` without counting bits.

use super::handle::{Handle, RawIndex};

/// Number of nodes in a subtree, the root included.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
#[repr(transparent)]
pub(crate) struct Size(RawIndex);

impl Size {
    pub(crate) const MAX: usize = Handle::MAX;
    pub(crate) const ZERO: Self = Self(0);
    pub(crate) const ONE: Self = Self(1);

    #[inline]
    pub(crate) const fn from_usize(size: usize) -> Self {
        assert!(size <= Self::MAX, "`Size::from_usize()` - `size` > `Size::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = size as RawIndex;
        Self(raw)
    }

    #[inline]
    pub(crate) const fn to_usize(self) -> usize {
        self.0 as usize
    }

    /// Size of a node whose children have the given sizes.
    #[inline]
    pub(crate) const fn joining(left: Self, right: Self) -> Self {
        Self::from_usize(1 + left.to_usize() + right.to_usize())
    }

    #[inline]
    pub(crate) const fn incremented(self) -> Self {
        Self::from_usize(self.to_usize() + 1)
    }

    #[inline]
    pub(crate) const fn decremented(self) -> Self {
        assert!(self.0 > 0, "`Size::decremented()` - size is already zero!");
        Self(self.0 - 1)
    }

    /// `level(self) < level(other)`, see [`log_smaller`].
    #[inline]
    pub(crate) const fn level_below(self, other: Self) -> bool {
        log_smaller(self.to_usize(), other.to_usize())
    }

    /// Halves the size; shifting a value down by one drops its level by one.
    #[inline]
    pub(crate) const fn halved(self) -> Self {
        Self(self.0 >> 1)
    }
}

/// Bit length of `size`: 0 for 0, otherwise `floor(log2 size) + 1`.
#[cfg(test)]
pub(crate) const fn log_level(size: usize) -> u32 {
    usize::BITS - size.leading_zeros()
}

/// Returns `log_level(a) < log_level(b)` in constant time.
///
/// When `a < b` share their top bit, `a & b` keeps it and doubling it exceeds
/// `b`. Otherwise every bit of `a & b` sits below the top bit of `b` and the
/// double stays under `b`. `shared < b - shared` is `2 * shared < b` without the
/// shift overflowing at the top of the range.
#[inline]
pub(crate) const fn log_smaller(a: usize, b: usize) -> bool {
    if a >= b {
        return false;
    }
    let shared = a & b;
    shared < b - shared
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    assert_eq_size!(Size, Handle);

    #[test]
    fn log_levels_of_small_sizes() {
        let expected = [0, 1, 2, 2, 3, 3, 3, 3, 4];
        for (size, &level) in expected.iter().enumerate() {
            assert_eq!(log_level(size), level, "log_level({size})");
        }
        assert_eq!(log_level(usize::MAX), usize::BITS);
    }

    #[test]
    fn log_smaller_agrees_with_levels_exhaustively() {
        for a in 0..512 {
            for b in 0..512 {
                assert_eq!(log_smaller(a, b), log_level(a) < log_level(b), "log_smaller({a}, {b})");
            }
        }
    }

    #[test]
    fn log_smaller_at_the_top_of_the_range() {
        let top = 1usize << (usize::BITS - 1);
        assert!(!log_smaller(top, usize::MAX));
        assert!(!log_smaller(usize::MAX - 1, usize::MAX));
        assert!(log_smaller(top - 1, top));
        assert!(log_smaller(top - 1, usize::MAX));
        assert!(!log_smaller(usize::MAX, top));
    }

    #[test]
    #[should_panic(expected = "`Size::from_usize()` - `size` > `Size::MAX`!")]
    fn size_past_max_panics() {
        let _ = Size::from_usize(Size::MAX + 1);
    }

    #[test]
    #[should_panic(expected = "`Size::decremented()` - size is already zero!")]
    fn decrementing_zero_panics() {
        let _ = Size::ZERO.decremented();
    }

    #[test]
    fn joining_counts_the_root() {
        assert_eq!(Size::joining(Size::ZERO, Size::ZERO), Size::ONE);
        assert_eq!(Size::joining(Size::from_usize(3), Size::from_usize(4)).to_usize(), 8);
    }

    proptest! {
        #[test]
        fn log_smaller_agrees_with_levels(a in any::<usize>(), b in any::<usize>()) {
            prop_assert_eq!(log_smaller(a, b), log_level(a) < log_level(b));
        }

        #[test]
        fn log_smaller_agrees_near_powers_of_two(shift in 0u32..usize::BITS, da in 0usize..3, db in 0usize..3) {
            let base = 1usize << shift;
            let a = base.saturating_sub(da);
            let b = base.saturating_add(db).saturating_sub(1);
            prop_assert_eq!(log_smaller(a, b), log_level(a) < log_level(b));
            prop_assert_eq!(log_smaller(b, a), log_level(b) < log_level(a));
        }

        #[test]
        fn halving_drops_one_level(size in 1..=Size::MAX) {
            let size = Size::from_usize(size);
            prop_assert_eq!(log_level(size.halved().to_usize()) + 1, log_level(size.to_usize()));
        }
    }
}
