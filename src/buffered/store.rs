//! Sorted backing store: the materialized, duplicate-free element sequence.
//!
//! [`SortedStore`] owns the elements that reconciliation has already
//! applied. Its single invariant is that the elements are strictly
//! ascending (sorted with no duplicates), which makes every membership and
//! bound query a binary search. The store has no insert or remove of its
//! own: apart from [`clear`](SortedStore::clear), it only changes when the
//! reconciler rebuilds it through [`detach`](SortedStore::detach) and
//! [`attach`](SortedStore::attach).

use std::borrow::Borrow;
use std::ops::Range;

/// Message for the strictly-ascending precondition shared by
/// `from_sorted_vec` and `attach`.
const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "sorted store requires strictly increasing elements (sorted + deduplicated)";

// =============================================================================
// Sorted Store
// =============================================================================

/// A strictly ascending, duplicate-free sequence of elements.
#[derive(Clone, Debug)]
pub(crate) struct SortedStore<T> {
    items: Vec<T>,
}

impl<T> SortedStore<T> {
    /// Creates an empty store.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of stored elements.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when no elements are stored.
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The elements as an ascending slice.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates the elements in ascending order.
    #[inline]
    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// The smallest element, if any.
    #[inline]
    pub(crate) fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// The largest element, if any.
    #[inline]
    pub(crate) fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Removes every element.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    /// Consumes the store, returning the ascending element vector.
    #[inline]
    pub(crate) fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Moves the backing vector out for an in-place rebuild, leaving the
    /// store empty. Pair with [`attach`](Self::attach), which revalidates
    /// the invariant.
    #[inline]
    pub(crate) fn detach(&mut self) -> Vec<T> {
        std::mem::take(&mut self.items)
    }
}

impl<T: Ord> SortedStore<T> {
    /// Builds a store from an already strictly ascending vector.
    pub(crate) fn from_sorted_vec(items: Vec<T>) -> Self {
        #[cfg(debug_assertions)]
        debug_assert!(
            is_strictly_ascending(&items),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self { items }
    }

    /// Re-attaches a rebuilt backing vector.
    pub(crate) fn attach(&mut self, items: Vec<T>) {
        #[cfg(debug_assertions)]
        debug_assert!(
            is_strictly_ascending(&items),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        self.items = items;
    }

    /// `true` when an element equal to `element` is stored.
    ///
    /// # Complexity
    ///
    /// O(log n) binary search.
    #[inline]
    pub(crate) fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items
            .binary_search_by(|item| item.borrow().cmp(element))
            .is_ok()
    }

    /// Position of the element equal to `element`, if stored.
    #[inline]
    pub(crate) fn position_of<Q>(&self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items
            .binary_search_by(|item| item.borrow().cmp(element))
            .ok()
    }

    /// Reference to the stored element equal to `element`, if any.
    #[inline]
    pub(crate) fn get<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position_of(element)
            .and_then(|position| self.items.get(position))
    }

    /// First position whose element is not less than `element`.
    #[inline]
    pub(crate) fn lower_bound<Q>(&self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.partition_point(|item| item.borrow() < element)
    }

    /// First position whose element is greater than `element`.
    #[inline]
    pub(crate) fn upper_bound<Q>(&self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.partition_point(|item| item.borrow() <= element)
    }

    /// The index range occupied by elements equal to `element`:
    /// `lower_bound..upper_bound`, at most one index wide since duplicates
    /// never exist.
    #[inline]
    pub(crate) fn equal_range<Q>(&self, element: &Q) -> Range<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_bound(element)..self.upper_bound(element)
    }
}

/// `true` when the slice is sorted with no equal neighbors.
#[cfg(debug_assertions)]
#[inline]
fn is_strictly_ascending<T: Ord>(items: &[T]) -> bool {
    items.windows(2).all(|window| window[0] < window[1])
}

// =============================================================================
// Tests
// =============================================================================
