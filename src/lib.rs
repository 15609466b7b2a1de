//! Weight-balanced ordered sets for Rust.
//!
//! This crate provides [`WBTreeSet`], an ordered set backed by a weight-balanced
//! binary search tree. It offers the usual operations, each in O(log n):
//!
//! - [`insert`](WBTreeSet::insert), [`contains`](WBTreeSet::contains) and
//!   [`remove`](WBTreeSet::remove)
//! - [`lower_count`](WBTreeSet::lower_count), the number of keys strictly
//!   less than a given key
//! - [`get_by_rank`](WBTreeSet::get_by_rank) and [`rank_of`](WBTreeSet::rank_of)
//! - In-order iteration with [`iter`](WBTreeSet::iter)
//!
//! # Example
//!
//! ```
//! use wbtree::WBTreeSet;
//!
//! let mut set = WBTreeSet::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     assert!(set.insert(key));
//! }
//! assert!(!set.insert(4)); // duplicates are rejected
//!
//! assert_eq!(set.len(), 7);
//! assert_eq!(set.lower_count(&7), 4);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **Injected ordering** - Any [`compare::Compare`] implementation, closures included
//! - **Stack-free iteration** - The iterator follows parent links, using O(1) space
//!
//! # Implementation
//!
//! Nodes live in an arena and refer to each other by index. Each node owns its
//! children and keeps a non-owning parent index for the iterator. It also
//! caches the size of its subtree. Balance requires the bit lengths of the two
//! child sizes to differ by at most one. That comparison is done with a couple
//! of bitwise operations rather than by computing logarithms. Inserts and
//! removals restore balance with at most one single or double rotation per
//! ancestor on the way back up.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod raw;

pub mod wbtree_set;

pub use compare::{Compare, Natural};
pub use wbtree_set::WBTreeSet;
