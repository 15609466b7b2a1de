use alloc::vec::Vec;
use core::cmp::Ordering::{Equal, Greater, Less};

use compare::Compare;
use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};
use super::size::Size;

/// The core weight-balanced tree backing `WBTreeSet`.
#[derive(Clone)]
pub(crate) struct RawWBTree<K, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Three-way comparator defining the key order.
    cmp: C,
}

/// One step of a root-to-node descent.
struct PathElement {
    /// Handle to the node at this level.
    node: Handle,
    /// Which child we descended into.
    side: Side,
}

/// Ancestors of the node being inserted or removed, root first.
type Path = SmallVec<[PathElement; 48]>;

/// How the subtree below an ancestor changed.
#[derive(Clone, Copy)]
enum SizeChange {
    Grew,
    Shrank,
}

impl<K, C> RawWBTree<K, C> {
    /// Creates a new, empty tree.
    pub(crate) const fn new(cmp: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            cmp,
        }
    }

    /// Returns the number of keys in the tree (the root's cached size).
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root).to_usize()
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) const fn comparator(&self) -> &C {
        &self.cmp
    }

    pub(crate) fn clear(&mut self) {
        debug!("clearing weight-balanced tree of {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> Size {
        handle.map_or(Size::ZERO, |h| self.nodes.get(h).size())
    }

    /// Follows `side` links from `handle` to the end of the spine.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.nodes.get(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// Returns the leftmost (smallest) node of the subtree at `handle`.
    pub(crate) fn leftmost(&self, handle: Handle) -> Handle {
        self.extreme(handle, Side::Left)
    }

    pub(crate) fn first(&self) -> Option<&K> {
        self.root.map(|root| self.nodes.get(self.extreme(root, Side::Left)).key())
    }

    pub(crate) fn last(&self) -> Option<&K> {
        self.root.map(|root| self.nodes.get(self.extreme(root, Side::Right)).key())
    }

    /// Returns the in-order successor of `handle`.
    ///
    /// Uses only parent back-references: either the leftmost node of the right
    /// subtree, or the first ancestor reached from its left child.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(right) = node.right() {
            return Some(self.leftmost(right));
        }

        let mut child = handle;
        let mut parent = node.parent();
        while let Some(ancestor) = parent {
            let ancestor_node = self.nodes.get(ancestor);
            if ancestor_node.left() == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = ancestor_node.parent();
        }
        None
    }

    /// Returns the key at zero-based position `rank` in sorted order.
    pub(crate) fn get_by_rank(&self, mut rank: usize) -> Option<&K> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.size_of(node.left()).to_usize();
            match rank.cmp(&left_size) {
                Less => current = node.left()?,
                Equal => return Some(node.key()),
                Greater => {
                    rank -= left_size + 1;
                    current = node.right()?;
                }
            }
        }
    }

    /// Single rotation lifting the child of `handle` on side `lift` into its place.
    ///
    /// Only `handle` and the lifted child change size; the caller re-links the
    /// returned subtree root into whatever held `handle`.
    fn rotate(&mut self, handle: Handle, lift: Side) -> Handle {
        let node = self.nodes.get(handle);
        let pivot = node.child(lift).expect("`RawWBTree::rotate()` - no child to lift!");
        let parent = node.parent();
        let size = node.size();
        let inner = self.nodes.get(pivot).child(lift.flip());

        let node = self.nodes.get_mut(handle);
        node.set_child(lift, inner);
        node.set_parent(Some(pivot));
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(handle));
        }

        let pivot_node = self.nodes.get_mut(pivot);
        pivot_node.set_child(lift.flip(), Some(handle));
        pivot_node.set_parent(parent);
        pivot_node.set_size(size);

        let node = self.nodes.get(handle);
        let resized = Size::joining(self.size_of(node.left()), self.size_of(node.right()));
        self.nodes.get_mut(handle).set_size(resized);

        trace!("rotated {pivot:?} above {handle:?} ({lift:?} child lifted)");
        pivot
    }

    /// Rotates `handle` left: its right child becomes the subtree root.
    pub(crate) fn rotate_left(&mut self, handle: Handle) -> Handle {
        self.rotate(handle, Side::Right)
    }

    /// Rotates `handle` right: its left child becomes the subtree root.
    pub(crate) fn rotate_right(&mut self, handle: Handle) -> Handle {
        self.rotate(handle, Side::Left)
    }

    /// Restores the level balance at `handle` after one child gained or lost a
    /// node, and returns the root of the resulting subtree.
    ///
    /// Assumes both children are already balanced.
    fn balance(&mut self, handle: Handle) -> Handle {
        let node = self.nodes.get(handle);
        let left_size = self.size_of(node.left());
        let right_size = self.size_of(node.right());

        let (heavy, light_size, heavy_size) = if left_size < right_size {
            (Side::Right, left_size, right_size)
        } else {
            (Side::Left, right_size, left_size)
        };

        // level(light) < level(heavy) - 1
        if !light_size.level_below(heavy_size.halved()) {
            return handle;
        }

        let heavy_child = node.child(heavy).expect("`RawWBTree::balance()` - heavy side is empty!");
        let heavy_node = self.nodes.get(heavy_child);
        let outer = self.size_of(heavy_node.child(heavy));
        let inner = self.size_of(heavy_node.child(heavy.flip()));
        if outer.level_below(inner) {
            // The inner grandchild is too big to move across; lift it first.
            let lifted = match heavy {
                Side::Right => self.rotate_right(heavy_child),
                Side::Left => self.rotate_left(heavy_child),
            };
            self.nodes.get_mut(handle).set_child(heavy, Some(lifted));
        }
        match heavy {
            Side::Right => self.rotate_left(handle),
            Side::Left => self.rotate_right(handle),
        }
    }

    /// Re-links `subtree` under each ancestor on `path`, bottom-up, adjusting
    /// each cached size by one and rebalancing, then installs the new root.
    fn rebuild(&mut self, path: &mut Path, mut subtree: Option<Handle>, change: SizeChange) {
        while let Some(PathElement {
            node,
            side,
        }) = path.pop()
        {
            let ancestor = self.nodes.get_mut(node);
            ancestor.set_child(side, subtree);
            let size = match change {
                SizeChange::Grew => ancestor.size().incremented(),
                SizeChange::Shrank => ancestor.size().decremented(),
            };
            ancestor.set_size(size);
            if let Some(child) = subtree {
                self.nodes.get_mut(child).set_parent(Some(node));
            }
            subtree = Some(self.balance(node));
        }

        if let Some(root) = subtree {
            self.nodes.get_mut(root).set_parent(None);
        }
        self.root = subtree;
    }

    /// Unlinks the key held by `target`, whose ancestors are `path`.
    ///
    /// While `target` has a right child, its key is swapped with the minimum of
    /// that subtree and the removal moves down to it. The node finally freed has
    /// no right child, so its left child takes its place.
    fn remove_at(&mut self, mut path: Path, mut target: Handle) -> K {
        while let Some(right) = self.nodes.get(target).right() {
            path.push(PathElement {
                node: target,
                side: Side::Right,
            });
            let mut min = right;
            while let Some(left) = self.nodes.get(min).left() {
                path.push(PathElement {
                    node: min,
                    side: Side::Left,
                });
                min = left;
            }
            let (upper, lower) = self.nodes.get_pair_mut(target, min);
            core::mem::swap(upper.key_mut(), lower.key_mut());
            target = min;
        }

        let removed = self.nodes.take(target);
        self.rebuild(&mut path, removed.left(), SizeChange::Shrank);
        removed.into_key()
    }

    /// Removes and returns the key at the end of the `side` spine.
    fn pop_extreme(&mut self, side: Side) -> Option<K> {
        let mut path = Path::new();
        let mut current = self.root?;
        while let Some(next) = self.nodes.get(current).child(side) {
            path.push(PathElement {
                node: current,
                side,
            });
            current = next;
        }
        Some(self.remove_at(path, current))
    }

    pub(crate) fn pop_first(&mut self) -> Option<K> {
        self.pop_extreme(Side::Left)
    }

    pub(crate) fn pop_last(&mut self) -> Option<K> {
        self.pop_extreme(Side::Right)
    }

    /// Moves every key out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<K> {
        // Collect the order first: the successor walk needs visited ancestors.
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = self.root.map(|root| self.leftmost(root));
        while let Some(handle) = cursor {
            order.push(handle);
            cursor = self.successor(handle);
        }

        let keys = order.into_iter().map(|handle| self.nodes.take(handle).into_key()).collect();
        self.nodes.clear();
        self.root = None;
        keys
    }
}

impl<K, C: Compare<K>> RawWBTree<K, C> {
    /// Searches for a key and returns its node handle if found.
    pub(crate) fn search(&self, key: &K) -> Option<Handle> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            current = match self.cmp.compare(key, node.key()) {
                Less => node.left()?,
                Greater => node.right()?,
                Equal => return Some(current),
            };
        }
    }

    pub(crate) fn get(&self, key: &K) -> Option<&K> {
        self.search(key).map(|handle| self.nodes.get(handle).key())
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Counts the keys ordered before `key`.
    ///
    /// Returns `Ok(rank)` if `key` is present and `Err(count)` otherwise, in
    /// the manner of `slice::binary_search`.
    pub(crate) fn rank_search(&self, key: &K) -> Result<usize, usize> {
        let mut count = 0;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left()).to_usize();
            match self.cmp.compare(key, node.key()) {
                Less => current = node.left(),
                Greater => {
                    count += left_size + 1;
                    current = node.right();
                }
                Equal => return Ok(count + left_size),
            }
        }
        Err(count)
    }

    /// Number of stored keys strictly less than `key`.
    pub(crate) fn lower_count(&self, key: &K) -> usize {
        match self.rank_search(key) {
            Ok(count) | Err(count) => count,
        }
    }

    /// Inserts `key` unless an equal key is already stored.
    ///
    /// Returns whether the tree grew.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        let mut path = Path::new();
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match self.cmp.compare(&key, node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => return false,
            };
            path.push(PathElement {
                node: handle,
                side,
            });
            current = node.child(side);
        }

        let parent = path.last().map(|element| element.node);
        let leaf = self.nodes.alloc(Node::leaf(key, parent));
        self.rebuild(&mut path, Some(leaf), SizeChange::Grew);
        true
    }

    /// Removes the key equal to `key`, returning it.
    pub(crate) fn take(&mut self, key: &K) -> Option<K> {
        let mut path = Path::new();
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            let side = match self.cmp.compare(key, node.key()) {
                Less => Side::Left,
                Greater => Side::Right,
                Equal => break,
            };
            path.push(PathElement {
                node: current,
                side,
            });
            current = node.child(side)?;
        }
        Some(self.remove_at(path, current))
    }

    pub(crate) fn remove(&mut self, key: &K) -> bool {
        self.take(key).is_some()
    }
}
