use core::num::NonZero;

#[cfg(test)]
pub(crate) type RawIndex = u16;
#[cfg(not(test))]
pub(crate) type RawIndex = u32;

/// Stable address of a tree node inside the node arena.
///
/// Stored off-by-one in a `NonZero` so that `Option<Handle>` (used for every
/// child and parent link) costs no more than the handle itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawIndex>);

impl Handle {
    /// Largest slot index a handle can address.
    pub(crate) const MAX: usize = (RawIndex::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::new()` - `index` > `Handle::MAX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawIndex;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
