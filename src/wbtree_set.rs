use core::fmt;
use core::iter::FusedIterator;

use compare::{Compare, Natural, natural};

use crate::raw::{Handle, RawWBTree};

mod capacity;
mod order_statistic;

/// An ordered set based on a weight-balanced binary search tree.
///
/// Every node caches the size of its subtree. Balance is kept by requiring the
/// bit lengths of the two child sizes to differ by at most one. That check is a
/// handful of bitwise operations, so each insert or remove does O(1) work per
/// ancestor and O(log n) work in total. The cached sizes also answer rank
/// queries such as [`lower_count`](WBTreeSet::lower_count) in O(log n).
///
/// Keys are ordered by a comparator `C` implementing [`Compare<K>`]. The
/// default, [`Natural<K>`], uses the key's [`Ord`] impl. Any
/// `Fn(&K, &K) -> Ordering` closure works as well. Equal keys are never stored
/// twice.
///
/// It is a logic error for a key to be modified in such a way that its
/// ordering relative to any other key, as determined by the comparator,
/// changes while it is in the set. The behavior resulting from such a logic
/// error is not specified, but will be encapsulated to the `WBTreeSet` that
/// observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use wbtree::WBTreeSet;
///
/// let mut set = WBTreeSet::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     set.insert(key);
/// }
///
/// assert_eq!(set.len(), 7);
/// assert_eq!(set.lower_count(&7), 4);
/// assert!(set.iter().copied().eq([1, 3, 4, 5, 7, 8, 9]));
///
/// assert!(set.remove(&5));
/// assert!(!set.remove(&5));
/// assert!(set.iter().copied().eq([1, 3, 4, 7, 8, 9]));
/// ```
///
/// With a custom comparator:
///
/// ```
/// use wbtree::WBTreeSet;
///
/// let mut by_len = WBTreeSet::with_comparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// assert!(by_len.insert("pear"));
/// assert!(by_len.insert("fig"));
/// assert!(!by_len.insert("plum")); // same length as "pear"
///
/// assert_eq!(by_len.first(), Some(&"fig"));
/// ```
pub struct WBTreeSet<K, C = Natural<K>> {
    tree: RawWBTree<K, C>,
}

/// An iterator over the keys of a `WBTreeSet`, in ascending order.
///
/// It walks parent links from node to node and keeps no stack. It holds a
/// shared borrow of the set, so the set cannot be modified while the iterator
/// is alive.
///
/// This `struct` is created by the [`iter`] method on [`WBTreeSet`].
///
/// # Examples
///
/// ```
/// use wbtree::WBTreeSet;
///
/// let set = WBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), Some(&3));
/// assert_eq!(iter.next(), None);
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: WBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a, C: 'a> {
    tree: &'a RawWBTree<K, C>,
    state: IterState,
    remaining: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum IterState {
    NotStarted,
    At(Handle),
    Finished,
}

/// An owning iterator over the keys of a `WBTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`WBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: WBTreeSet#method.into_iter
pub struct IntoIter<K> {
    inner: alloc::vec::IntoIter<K>,
}

impl<K: Ord> WBTreeSet<K> {
    /// Makes a new, empty `WBTreeSet` ordered by `K`'s [`Ord`] impl.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set: WBTreeSet<i32> = WBTreeSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(natural())
    }
}

impl<K, C> WBTreeSet<K, C> {
    /// Makes a new, empty `WBTreeSet` ordered by `cmp`.
    ///
    /// `cmp` must define a total order over every key that will be stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Reverse;
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::with_comparator(|a: &u8, b: &u8| Reverse(a).cmp(&Reverse(b)));
    /// set.extend([1, 3, 2]);
    /// assert!(set.iter().copied().eq([3, 2, 1]));
    /// ```
    pub const fn with_comparator(cmp: C) -> Self {
        WBTreeSet {
            tree: RawWBTree::new(cmp),
        }
    }

    /// Returns the comparator ordering this set.
    pub const fn comparator(&self) -> &C {
        self.tree.comparator()
    }

    /// Returns the number of keys in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::new();
    /// assert_eq!(set.len(), 0);
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::from([1, 2]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator that visits the keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([3, 1, 2]);
    /// let keys: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(keys, [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, C> {
        Iter {
            tree: &self.tree,
            state: IterState::NotStarted,
            remaining: self.tree.len(),
        }
    }

    /// Returns the smallest key in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.tree.first()
    }

    /// Returns the largest key in the set, if any.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.tree.last()
    }

    /// Removes and returns the smallest key in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::from([1, 2]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<K> {
        self.tree.pop_first()
    }

    /// Removes and returns the largest key in the set, if any.
    pub fn pop_last(&mut self) -> Option<K> {
        self.tree.pop_last()
    }
}

impl<K, C: Compare<K>> WBTreeSet<K, C> {
    /// Adds a key to the set.
    ///
    /// Returns whether the key was newly inserted. That is:
    ///
    /// - If the set did not previously contain an equal key, `true` is
    ///   returned and the length grows by one.
    /// - If the set already contained an equal key, `false` is returned, and
    ///   the stored key is left as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key)
    }

    /// Returns `true` if the set contains a key equal to `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Returns a reference to the stored key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&K> {
        self.tree.get(key)
    }

    /// Removes the key equal to `key` from the set. Returns whether such a key
    /// was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::from([2]);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key)
    }

    /// Removes and returns the stored key equal to `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let mut set = WBTreeSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        self.tree.take(key)
    }
}

impl<K: Clone, C: Clone> Clone for WBTreeSet<K, C> {
    fn clone(&self) -> Self {
        WBTreeSet {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for WBTreeSet<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> Default for WBTreeSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq, C> PartialEq for WBTreeSet<K, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, C> Eq for WBTreeSet<K, C> {}

impl<K: Ord> FromIterator<K> for WBTreeSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = WBTreeSet::new();
        set.extend(iter);
        set
    }
}

impl<K, C: Compare<K>> Extend<K> for WBTreeSet<K, C> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Copy, C: Compare<K>> Extend<&'a K> for WBTreeSet<K, C> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for WBTreeSet<K> {
    /// Converts a `[K; N]` into a `WBTreeSet<K>`, dropping duplicates.
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([4, 1, 4, 2]);
    /// assert_eq!(set.len(), 3);
    /// ```
    fn from(arr: [K; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K, C> IntoIterator for WBTreeSet<K, C> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Gets an iterator for moving out the set's keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use wbtree::WBTreeSet;
    ///
    /// let set = WBTreeSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<K> {
        IntoIter {
            inner: self.tree.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, K, C> IntoIterator for &'a WBTreeSet<K, C> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, C>;

    fn into_iter(self) -> Iter<'a, K, C> {
        self.iter()
    }
}

impl<'a, K, C> Iterator for Iter<'a, K, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.tree;
        self.state = match self.state {
            IterState::NotStarted => tree.root().map_or(IterState::Finished, |root| IterState::At(tree.leftmost(root))),
            IterState::At(handle) => tree.successor(handle).map_or(IterState::Finished, IterState::At),
            IterState::Finished => IterState::Finished,
        };

        match self.state {
            IterState::At(handle) => {
                self.remaining -= 1;
                Some(tree.node(handle).key())
            }
            IterState::NotStarted | IterState::Finished => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize {
        self.remaining
    }
}

impl<K, C> ExactSizeIterator for Iter<'_, K, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, C> FusedIterator for Iter<'_, K, C> {}

impl<K, C> Clone for Iter<'_, K, C> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            state: self.state,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Iter<'_, K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K: fmt::Debug> fmt::Debug for IntoIter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}
