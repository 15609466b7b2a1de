use compare::Compare;

use super::WBTreeSet;

impl<K, C: Compare<K>> WBTreeSet<K, C> {
    /// Returns the number of keys in the set that are strictly less than `key`.
    ///
    /// `key` does not have to be present. When it is, the result is its
    /// zero-based rank.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([1, 3, 4, 5, 7, 8, 9]);
    /// assert_eq!(set.lower_count(&7), 4);
    /// assert_eq!(set.lower_count(&6), 4);
    /// assert_eq!(set.lower_count(&0), 0);
    /// assert_eq!(set.lower_count(&10), 7);
    /// ```
    #[must_use]
    pub fn lower_count(&self, key: &K) -> usize {
        self.tree.lower_count(key)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if
    /// the key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: &K) -> Option<usize> {
        self.tree.rank_search(key).ok()
    }
}

impl<K, C> WBTreeSet<K, C> {
    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&K> {
        self.tree.get_by_rank(rank)
    }
}
