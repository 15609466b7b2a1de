use compare::natural;

use super::WBTreeSet;
use crate::raw::RawWBTree;

impl<K: Ord> WBTreeSet<K> {
    /// Creates an empty set with room for at least `capacity` keys before
    /// the node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set: WBTreeSet<i32> = WBTreeSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, natural())
    }
}

impl<K, C> WBTreeSet<K, C> {
    /// Creates an empty set ordered by `cmp`, with room for at least
    /// `capacity` keys.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        WBTreeSet {
            tree: RawWBTree::with_capacity(capacity, cmp),
        }
    }

    /// Returns how many keys the set can hold without reallocating its nodes.
    ///
    /// Removed keys free their slot for reuse, so the capacity never shrinks
    /// until the set is dropped.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }
}
