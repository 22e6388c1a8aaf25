//! # bufset
//!
//! A write-buffered ordered set: mutations wait in a small bounded log and
//! fold into a flat sorted store in one batched pass.
//!
//! ## Overview
//!
//! `std::collections` answers every read against fully up-to-date storage,
//! paying the structural cost on every mutation. This crate flips that
//! trade for mutation-heavy, read-occasionally workloads:
//!
//! - **Deferred mutations**: `insert` and `remove` append to a
//!   fixed-capacity operation log and return in O(1)
//! - **Batched reconciliation**: the log collapses to its net effect
//!   (latest operation per value wins) and applies to the store in a
//!   single merge-and-compact sweep
//! - **Flat sorted storage**: reads are binary searches over a contiguous
//!   slice, iteration is a plain slice walk
//! - **Bounded staleness**: the log never exceeds its capacity, chosen at
//!   compile time per set
//!
//! ## Example
//!
//! ```rust
//! use bufset::prelude::*;
//!
//! let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
//! set.insert(5);
//! set.insert(1);
//! set.insert(3);
//! set.remove(5);
//! assert_eq!(set.readiness(), Readiness::Pending);
//!
//! // Reads reconcile the buffered operations before answering.
//! assert_eq!(set.as_slice(), [1, 3]);
//! assert_eq!(set.readiness(), Readiness::Ready);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types.
///
/// # Usage
///
/// ```rust
/// use bufset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffered::*;
}

pub mod buffered;
