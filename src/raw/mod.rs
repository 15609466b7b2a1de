mod arena;
mod handle;
mod node;
mod raw_wbtree;
mod size;

pub(crate) use handle::Handle;
pub(crate) use raw_wbtree::RawWBTree;
