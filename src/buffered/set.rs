//! The public facade: an ordered set whose mutations wait in a bounded log
//! until a batched reconciliation folds them into the sorted store.

use std::borrow::Borrow;
use std::ops::Range;

use static_assertions::assert_impl_all;

use super::log::{OperationLog, PendingOperation};
use super::reconcile::reconcile;
use super::store::SortedStore;

/// Default number of operations the log buffers before reconciliation.
pub const DEFAULT_LOG_CAPACITY: usize = 64;

// =============================================================================
// Readiness
// =============================================================================

/// Whether the element storage currently reflects every requested mutation.
///
/// Readiness is derived from the operation log on each call: it is
/// [`Pending`](Readiness::Pending) exactly while operations are buffered.
/// There is no stored flag that could fall out of sync with the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// The log is empty; the store answers queries as-is.
    Ready,
    /// Operations are buffered; the store is stale until the next
    /// reconciliation.
    Pending,
}

// =============================================================================
// Buffered Ordered Set
// =============================================================================

/// A sorted, duplicate-free set that defers mutations into a bounded log.
///
/// [`insert`](Self::insert) and [`remove`](Self::remove) never touch the
/// element storage directly: they append a pending operation to a
/// fixed-capacity log and return in O(1). The log folds into the sorted
/// store in one batched pass when a read needs an up-to-date view, when the
/// log fills, or on an explicit [`reconcile`](Self::reconcile). Batching
/// replaces per-mutation element shifting with a single merge-and-compact
/// sweep, while reads between batches stay plain binary searches over a
/// flat, cache-friendly slice.
///
/// Within one batch the *latest* operation on a value wins: an insert
/// followed by a remove of the same value leaves the set unchanged, in
/// either order, regardless of how many redundant mentions sit between
/// them.
///
/// Query methods take `&mut self` because they reconcile first. The
/// bookkeeping probes [`readiness`](Self::readiness),
/// [`pending_operations`](Self::pending_operations) and
/// [`log_capacity`](Self::log_capacity) take `&self` and never reconcile.
///
/// `LOG_CAPACITY` is fixed at construction through the const parameter and
/// must be at least 1. The default of [`DEFAULT_LOG_CAPACITY`] suits
/// mutation-heavy workloads; a smaller capacity tightens the staleness
/// window at the cost of more frequent reconciliation.
///
/// # Performance Characteristics
///
/// | Operation | Complexity |
/// |-----------|------------|
/// | `insert` / `remove` | O(1) amortized; O(B² + B log n + n) when the log is full |
/// | `contains` / `find` / `count` / bounds | O(log n) after pending reconciliation |
/// | `len` / `first` / `last` / `as_slice` | O(1) after pending reconciliation |
/// | `reconcile` (B buffered, n stored) | O(B² + B log n + n) |
///
/// # Examples
///
/// ```rust
/// use bufset::buffered::BufferedOrderedSet;
///
/// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
/// set.insert(5);
/// set.insert(1);
/// set.insert(3);
/// set.insert(1);
/// set.remove(5);
///
/// // Reads fold the five buffered operations into the store first.
/// assert_eq!(set.as_slice(), [1, 3]);
/// ```
pub struct BufferedOrderedSet<T, const LOG_CAPACITY: usize = { DEFAULT_LOG_CAPACITY }> {
    store: SortedStore<T>,
    log: OperationLog<T, LOG_CAPACITY>,
}

impl<T, const LOG_CAPACITY: usize> BufferedOrderedSet<T, LOG_CAPACITY> {
    /// Creates an empty set with no buffered operations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// assert_eq!(set.pending_operations(), 0);
    /// assert_eq!(set.log_capacity(), 64);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            store: SortedStore::new(),
            log: OperationLog::new(),
        }
    }

    /// The fixed operation-log capacity (`LOG_CAPACITY`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let set: BufferedOrderedSet<i32, 8> = BufferedOrderedSet::new();
    /// assert_eq!(set.log_capacity(), 8);
    /// ```
    #[inline]
    #[must_use]
    pub const fn log_capacity(&self) -> usize {
        self.log.capacity()
    }

    /// Number of buffered, not-yet-applied operations.
    ///
    /// Reports log bookkeeping only and never triggers reconciliation, so
    /// it is safe to poll in hot paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(1);
    /// set.insert(1);
    /// set.remove(1);
    /// assert_eq!(set.pending_operations(), 3);
    /// ```
    #[inline]
    #[must_use]
    pub const fn pending_operations(&self) -> usize {
        self.log.len()
    }

    /// Whether the store currently reflects every requested mutation.
    ///
    /// Never triggers reconciliation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::{BufferedOrderedSet, Readiness};
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// assert_eq!(set.readiness(), Readiness::Ready);
    ///
    /// set.insert(7);
    /// assert_eq!(set.readiness(), Readiness::Pending);
    ///
    /// set.reconcile();
    /// assert_eq!(set.readiness(), Readiness::Ready);
    /// ```
    #[inline]
    #[must_use]
    pub const fn readiness(&self) -> Readiness {
        if self.log.is_empty() {
            Readiness::Ready
        } else {
            Readiness::Pending
        }
    }
}

impl<T: Ord, const LOG_CAPACITY: usize> BufferedOrderedSet<T, LOG_CAPACITY> {
    /// Builds a set from an already strictly ascending vector, with an
    /// empty log.
    ///
    /// # Arguments
    ///
    /// * `items` - Elements sorted in ascending order with no duplicates
    ///
    /// # Panics
    ///
    /// Panics in debug builds when `items` is not strictly ascending.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.len(), 3);
    /// assert!(set.contains(&4));
    /// ```
    #[must_use]
    pub fn from_sorted_vec(items: Vec<T>) -> Self {
        Self {
            store: SortedStore::from_sorted_vec(items),
            log: OperationLog::new(),
        }
    }

    /// Requests insertion of `value`.
    ///
    /// The request is buffered, not applied: membership changes only once
    /// the log reconciles, which is why nothing is returned (whether the
    /// value is a new member cannot be known yet). Inserting a value the set
    /// already holds reconciles to a no-op.
    ///
    /// When the log is already full, the set reconciles first; the
    /// triggering operation then starts the next batch, so the log never
    /// drops or reorders a request.
    ///
    /// # Complexity
    ///
    /// O(1) amortized; O(B² + B log n + n) on the call that finds the log
    /// full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(2);
    /// assert_eq!(set.pending_operations(), 1);
    ///
    /// // The read reconciles; the insert becomes visible.
    /// assert!(set.contains(&2));
    /// assert_eq!(set.pending_operations(), 0);
    /// ```
    pub fn insert(&mut self, value: T) {
        self.reconcile_when_full();
        self.log.append(PendingOperation::insert(value));
    }

    /// Requests removal of `value`.
    ///
    /// Buffered exactly like [`insert`](Self::insert): the element remains
    /// visible to bookkeeping (and physically in the store) until the next
    /// reconciliation. Removing an absent value reconciles to a no-op.
    ///
    /// # Complexity
    ///
    /// O(1) amortized; O(B² + B log n + n) on the call that finds the log
    /// full.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(3);
    /// set.remove(3);
    ///
    /// assert!(!set.contains(&3));
    /// assert!(set.is_empty());
    /// ```
    pub fn remove(&mut self, value: T) {
        self.reconcile_when_full();
        self.log.append(PendingOperation::delete(value));
    }

    /// Applies every buffered operation to the store and empties the log.
    ///
    /// Within the batch the latest operation on each distinct value wins;
    /// operations that would not change membership are discarded. Calling
    /// this on an already reconciled set is a cheap no-op, so it is safe to
    /// invoke opportunistically (for instance before handing out many
    /// borrowed views).
    ///
    /// # Complexity
    ///
    /// O(B² + B log n + n) for B buffered operations and n stored elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::{BufferedOrderedSet, Readiness};
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(9);
    /// set.reconcile();
    ///
    /// assert_eq!(set.readiness(), Readiness::Ready);
    /// assert_eq!(set.pending_operations(), 0);
    /// ```
    pub fn reconcile(&mut self) {
        reconcile(&mut self.store, &mut self.log);
    }

    /// Reconciles only when the log has no room for another operation.
    fn reconcile_when_full(&mut self) {
        if self.log.is_full() {
            self.reconcile();
        }
    }

    /// Number of elements in the set, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(1);
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn len(&mut self) -> usize {
        self.reconcile();
        self.store.len()
    }

    /// `true` when the set has no elements, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// assert!(set.is_empty());
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&mut self) -> bool {
        self.reconcile();
        self.store.is_empty()
    }

    /// `true` when an element equal to `element` is a member, after
    /// reconciling.
    ///
    /// The probe type `Q` only needs to match the element's [`Borrow`]
    /// image, so a `BufferedOrderedSet<String>` answers `&str` probes
    /// without allocating.
    ///
    /// # Complexity
    ///
    /// O(log n) binary search, plus any pending reconciliation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<String> = BufferedOrderedSet::new();
    /// set.insert(String::from("apple"));
    ///
    /// assert!(set.contains("apple"));
    /// assert!(!set.contains("banana"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.contains(element)
    }

    /// Position of the element equal to `element` in ascending order, if it
    /// is a member, after reconciling.
    ///
    /// The returned index stays valid until the next operation is buffered,
    /// and indexes into [`as_slice`](Self::as_slice).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.find(&4), Some(1));
    /// assert_eq!(set.find(&5), None);
    /// ```
    #[must_use]
    pub fn find<Q>(&mut self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.position_of(element)
    }

    /// Reference to the stored element equal to `element`, if it is a
    /// member, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<String> = BufferedOrderedSet::new();
    /// set.insert(String::from("pear"));
    ///
    /// assert_eq!(set.get("pear").map(String::as_str), Some("pear"));
    /// assert_eq!(set.get("plum"), None);
    /// ```
    #[must_use]
    pub fn get<Q>(&mut self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.get(element)
    }

    /// Number of members equal to `element`: `1` or `0`, since duplicates
    /// never exist. Reconciles first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.count(&4), 1);
    /// assert_eq!(set.count(&5), 0);
    /// ```
    #[must_use]
    pub fn count<Q>(&mut self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        usize::from(self.store.contains(element))
    }

    /// First position whose element is not less than `element`, after
    /// reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.lower_bound(&4), 1);
    /// assert_eq!(set.lower_bound(&5), 2);
    /// assert_eq!(set.lower_bound(&7), 3);
    /// ```
    #[must_use]
    pub fn lower_bound<Q>(&mut self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.lower_bound(element)
    }

    /// First position whose element is greater than `element`, after
    /// reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.upper_bound(&4), 2);
    /// assert_eq!(set.upper_bound(&1), 0);
    /// ```
    #[must_use]
    pub fn upper_bound<Q>(&mut self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.upper_bound(element)
    }

    /// The index range occupied by elements equal to `element`:
    /// `lower_bound..upper_bound`, at most one index wide. Reconciles
    /// first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.equal_range(&4), 1..2);
    /// assert_eq!(set.equal_range(&5), 2..2);
    /// ```
    #[must_use]
    pub fn equal_range<Q>(&mut self, element: &Q) -> Range<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.reconcile();
        self.store.equal_range(element)
    }

    /// The smallest element, if any, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.first(), Some(&2));
    /// ```
    #[must_use]
    pub fn first(&mut self) -> Option<&T> {
        self.reconcile();
        self.store.first()
    }

    /// The largest element, if any, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![2, 4, 6]);
    /// assert_eq!(set.last(), Some(&6));
    /// ```
    #[must_use]
    pub fn last(&mut self) -> Option<&T> {
        self.reconcile();
        self.store.last()
    }

    /// The elements as an ascending slice, after reconciling.
    ///
    /// The slice borrows the set, so no operation can be buffered while it
    /// is alive; it can never observe a stale view.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(4);
    /// set.insert(2);
    /// assert_eq!(set.as_slice(), [2, 4]);
    /// ```
    #[must_use]
    pub fn as_slice(&mut self) -> &[T] {
        self.reconcile();
        self.store.as_slice()
    }

    /// Iterates the elements in ascending order, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// set.insert(2);
    ///
    /// let doubled: Vec<i32> = set.iter().map(|value| value * 2).collect();
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    pub fn iter(&mut self) -> BufferedOrderedSetIterator<'_, T> {
        self.reconcile();
        BufferedOrderedSetIterator {
            inner: self.store.iter(),
        }
    }

    /// Removes every element and discards every buffered operation,
    /// unconditionally and without reconciling first.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::{BufferedOrderedSet, Readiness};
    ///
    /// let mut set = BufferedOrderedSet::<i32>::from_sorted_vec(vec![1, 2]);
    /// set.insert(3);
    /// set.clear();
    ///
    /// assert_eq!(set.readiness(), Readiness::Ready);
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.store.clear();
        self.log.clear();
    }

    /// Consumes the set, returning its elements as an ascending vector
    /// after a final reconciliation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.into_sorted_vec(), vec![1, 3]);
    /// ```
    #[must_use]
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.reconcile();
        self.store.into_vec()
    }
}

impl<T: Clone + Ord, const LOG_CAPACITY: usize> BufferedOrderedSet<T, LOG_CAPACITY> {
    /// Copies the elements into a new ascending vector, after reconciling.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(2);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.to_sorted_vec(), vec![1, 2]);
    /// ```
    #[must_use]
    pub fn to_sorted_vec(&mut self) -> Vec<T> {
        self.reconcile();
        self.store.as_slice().to_vec()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl<T, const LOG_CAPACITY: usize> Default for BufferedOrderedSet<T, LOG_CAPACITY> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord, const LOG_CAPACITY: usize> Clone for BufferedOrderedSet<T, LOG_CAPACITY> {
    /// Clones into an independent, already-reconciled set.
    ///
    /// The source is left untouched (its buffered operations stay
    /// buffered); the clone observes the same logical contents with an
    /// empty log.
    fn clone(&self) -> Self {
        let mut store = self.store.clone();
        let mut log = self.log.clone();
        reconcile(&mut store, &mut log);
        Self { store, log }
    }
}

impl<T: std::fmt::Debug, const LOG_CAPACITY: usize> std::fmt::Debug
    for BufferedOrderedSet<T, LOG_CAPACITY>
{
    /// Renders the raw state without reconciling: the stored elements as
    /// they stand plus the number of buffered operations.
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BufferedOrderedSet")
            .field("elements", &self.store.as_slice())
            .field("pending_operations", &self.log.len())
            .finish()
    }
}

impl<T: Ord, const LOG_CAPACITY: usize> Extend<T> for BufferedOrderedSet<T, LOG_CAPACITY> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const LOG_CAPACITY: usize> FromIterator<T> for BufferedOrderedSet<T, LOG_CAPACITY> {
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = [3, 1, 3, 2].into_iter().collect();
    /// assert_eq!(set.as_slice(), [1, 2, 3]);
    /// ```
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to elements in a `BufferedOrderedSet`, in
/// ascending order.
pub struct BufferedOrderedSetIterator<'a, T> {
    inner: std::slice::Iter<'a, T>,
}

impl<'a, T> Iterator for BufferedOrderedSetIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for BufferedOrderedSetIterator<'_, T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator over the elements of a `BufferedOrderedSet`, in
/// ascending order.
pub struct BufferedOrderedSetIntoIterator<T> {
    inner: std::vec::IntoIter<T>,
}

impl<T> Iterator for BufferedOrderedSetIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for BufferedOrderedSetIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<'a, T: Ord, const LOG_CAPACITY: usize> IntoIterator
    for &'a mut BufferedOrderedSet<T, LOG_CAPACITY>
{
    type Item = &'a T;
    type IntoIter = BufferedOrderedSetIterator<'a, T>;

    /// Reconciles, then yields references in ascending order.
    ///
    /// Iteration borrows the set mutably because bringing the store up to
    /// date may apply buffered operations; a `&BufferedOrderedSet` has no
    /// iterator for that reason.
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let mut doubled = Vec::new();
    /// for value in &mut set {
    ///     doubled.push(value * 2);
    /// }
    /// assert_eq!(doubled, vec![2, 4]);
    /// ```
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord, const LOG_CAPACITY: usize> IntoIterator for BufferedOrderedSet<T, LOG_CAPACITY> {
    type Item = T;
    type IntoIter = BufferedOrderedSetIntoIterator<T>;

    /// Reconciles, then yields the elements in ascending order.
    ///
    /// ```rust
    /// use bufset::buffered::BufferedOrderedSet;
    ///
    /// let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    /// set.insert(2);
    /// set.insert(1);
    ///
    /// let values: Vec<i32> = set.into_iter().collect();
    /// assert_eq!(values, vec![1, 2]);
    /// ```
    fn into_iter(mut self) -> Self::IntoIter {
        self.reconcile();
        BufferedOrderedSetIntoIterator {
            inner: self.store.into_vec().into_iter(),
        }
    }
}

// The set is plain owned data. The `&mut self` query API already forces
// exclusive access for shared references, so auto traits are all it needs
// to move across threads or sit behind an external lock.
assert_impl_all!(BufferedOrderedSet<i32>: Send, Sync);
assert_impl_all!(BufferedOrderedSet<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
