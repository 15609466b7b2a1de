use super::handle::Handle;
use super::size::Size;

/// Which child link a step of a path went through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn flip(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A binary tree node.
///
/// `left` and `right` own their subtrees. `parent` is only a back-reference for
/// the successor walk; nothing is ever freed through it.
pub(crate) struct Node<K> {
    key: K,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    // Number of nodes in the subtree rooted here, this one included.
    size: Size,
}

impl<K: Clone> Clone for Node<K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            left: self.left,
            right: self.right,
            parent: self.parent,
            size: self.size,
        }
    }
}

impl<K> Node<K> {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: K, parent: Option<Handle>) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent,
            size: Size::ONE,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn key_mut(&mut self) -> &mut K {
        &mut self.key
    }

    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn size(&self) -> Size {
        self.size
    }

    pub(crate) fn set_size(&mut self, size: Size) {
        self.size = size;
    }
}
