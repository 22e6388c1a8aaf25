//! Write-buffered ordered set.
//!
//! This module provides an ordered-set container that trades read freshness
//! for cheap mutations:
//!
//! - [`BufferedOrderedSet`]: Sorted, duplicate-free set with a bounded
//!   pending-operation log
//! - [`Readiness`]: Whether the store currently reflects every requested
//!   mutation
//! - [`DEFAULT_LOG_CAPACITY`]: Log capacity used when none is specified
//!
//! # Deferred Mutation
//!
//! `insert` and `remove` append a pending operation to a fixed-capacity log
//! and return in O(1); the sorted store is untouched. The log folds into
//! the store in one batched pass (net effect per distinct value, with the
//! latest operation winning) when a read needs an up-to-date view, when the
//! log fills, or on an explicit `reconcile`. The store itself is a flat sorted
//! vector, so queries between batches are binary searches and iteration is
//! a cache-friendly slice walk.
//!
//! # Examples
//!
//! ```rust
//! use bufset::buffered::{BufferedOrderedSet, Readiness};
//!
//! let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
//! set.insert(5);
//! set.insert(1);
//! set.remove(5);
//! assert_eq!(set.readiness(), Readiness::Pending);
//!
//! // The read reconciles the three buffered operations first.
//! assert_eq!(set.as_slice(), [1]);
//! assert_eq!(set.readiness(), Readiness::Ready);
//! ```
//!
//! Capacity is a const parameter; a smaller log reconciles more often:
//!
//! ```rust
//! use bufset::buffered::BufferedOrderedSet;
//!
//! let mut set: BufferedOrderedSet<i32, 2> = BufferedOrderedSet::new();
//! set.insert(3);
//! set.insert(1);
//! // The log is full: the next mutation folds both inserts into the store.
//! set.insert(2);
//! assert_eq!(set.pending_operations(), 1);
//! ```

mod log;
mod reconcile;
mod set;
mod store;

pub use set::BufferedOrderedSet;
pub use set::BufferedOrderedSetIntoIterator;
pub use set::BufferedOrderedSetIterator;
pub use set::DEFAULT_LOG_CAPACITY;
pub use set::Readiness;
