//! Pending-operation log: the bounded holding area for deferred mutations.
//!
//! [`OperationLog`] is an arrival-ordered, fixed-capacity buffer of
//! [`PendingOperation`] entries. It stores whatever it is handed, repeated
//! values and contradictory kinds included, without interpreting any of it;
//! working out what the entries mean is the reconciler's job (see
//! [`reconcile`](super::reconcile)).

use std::cmp::Ordering;

use arrayvec::ArrayVec;

/// Message for the `append` precondition. The facade reconciles before
/// appending to a full log, so a violation is a caller bug.
const LOG_FULL_PANIC_MESSAGE: &str =
    "append requires spare log capacity (reconcile before appending to a full log)";

// =============================================================================
// Operation Kind
// =============================================================================

/// The mutation a pending operation requests.
///
/// The derived order places `Insert` before `Delete`: when a reconciliation
/// batch is sorted, every addition groups ahead of every removal, so the
/// store can grow once and then compact once. Within a kind,
/// [`PendingOperation`] orders by value. Neither order has any relation to
/// arrival time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum OperationKind {
    /// Make the value a member of the set.
    Insert,
    /// Remove the value from the set.
    Delete,
}

// =============================================================================
// Pending Operation
// =============================================================================

/// One requested mutation: a kind and the value it applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PendingOperation<T> {
    pub(crate) kind: OperationKind,
    pub(crate) value: T,
}

impl<T> PendingOperation<T> {
    /// Creates an insertion request.
    #[inline]
    pub(crate) const fn insert(value: T) -> Self {
        Self {
            kind: OperationKind::Insert,
            value,
        }
    }

    /// Creates a removal request.
    #[inline]
    pub(crate) const fn delete(value: T) -> Self {
        Self {
            kind: OperationKind::Delete,
            value,
        }
    }
}

impl<T: Ord> Ord for PendingOperation<T> {
    /// Groups all inserts ahead of all deletes, each run ascending by value.
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl<T: Ord> PartialOrd for PendingOperation<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// =============================================================================
// Operation Log
// =============================================================================

/// Arrival-ordered, capacity-bounded buffer of pending operations.
///
/// The buffer is stored inline (no heap allocation) and never reallocates.
/// Entries are not deduplicated at append time: the same value may appear
/// any number of times, with either kind, in any order.
#[derive(Clone, Debug)]
pub(crate) struct OperationLog<T, const CAPACITY: usize> {
    entries: ArrayVec<PendingOperation<T>, CAPACITY>,
}

impl<T, const CAPACITY: usize> OperationLog<T, CAPACITY> {
    /// Creates an empty log.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            entries: ArrayVec::new_const(),
        }
    }

    /// Number of buffered operations.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when no operations are buffered.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when the log holds `CAPACITY` operations.
    #[inline]
    pub(crate) const fn is_full(&self) -> bool {
        self.len() == CAPACITY
    }

    /// The fixed capacity (`CAPACITY`).
    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Appends an operation after everything already buffered.
    ///
    /// The caller keeps the log under capacity (the facade reconciles before
    /// appending when the log is full); the log itself never drops entries.
    pub(crate) fn append(&mut self, operation: PendingOperation<T>) {
        debug_assert!(!self.is_full(), "{}", LOG_FULL_PANIC_MESSAGE);
        self.entries.push(operation);
    }

    /// Discards every buffered operation.
    #[inline]
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Moves all entries out in arrival order, leaving the log empty.
    ///
    /// This is the reconciler's drain primitive: the log is emptied before
    /// the store is touched, so a reconciled entry can never be replayed.
    #[inline]
    pub(crate) fn take_entries(&mut self) -> ArrayVec<PendingOperation<T>, CAPACITY> {
        std::mem::take(&mut self.entries)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_log_is_empty() {
        let log: OperationLog<i32, 4> = OperationLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert_eq!(log.capacity(), 4);
        assert!(!log.is_full());
    }

    #[rstest]
    fn append_preserves_arrival_order() {
        let mut log: OperationLog<i32, 4> = OperationLog::new();
        log.append(PendingOperation::insert(3));
        log.append(PendingOperation::delete(1));
        log.append(PendingOperation::insert(2));

        assert_eq!(
            log.take_entries().as_slice(),
            [
                PendingOperation::insert(3),
                PendingOperation::delete(1),
                PendingOperation::insert(2),
            ]
        );
    }

    #[rstest]
    fn append_keeps_duplicate_and_contradictory_entries() {
        let mut log: OperationLog<i32, 4> = OperationLog::new();
        log.append(PendingOperation::insert(7));
        log.append(PendingOperation::delete(7));
        log.append(PendingOperation::insert(7));

        // The log holds all three mentions; collapsing them is not its job.
        assert_eq!(log.len(), 3);
    }

    #[rstest]
    fn log_is_full_at_capacity() {
        let mut log: OperationLog<i32, 2> = OperationLog::new();
        log.append(PendingOperation::insert(1));
        assert!(!log.is_full());
        log.append(PendingOperation::insert(2));
        assert!(log.is_full());
    }

    #[rstest]
    fn clear_discards_all_entries() {
        let mut log: OperationLog<i32, 4> = OperationLog::new();
        log.append(PendingOperation::insert(1));
        log.append(PendingOperation::delete(2));
        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[rstest]
    fn take_entries_drains_in_arrival_order_and_empties_the_log() {
        let mut log: OperationLog<i32, 4> = OperationLog::new();
        log.append(PendingOperation::delete(9));
        log.append(PendingOperation::insert(5));

        let entries = log.take_entries();

        assert_eq!(
            entries.as_slice(),
            [PendingOperation::delete(9), PendingOperation::insert(5)]
        );
        assert!(log.is_empty());
        assert!(!log.is_full());
    }

    #[rstest]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "spare log capacity")]
    fn append_past_capacity_panics_in_debug() {
        let mut log: OperationLog<i32, 1> = OperationLog::new();
        log.append(PendingOperation::insert(1));
        log.append(PendingOperation::insert(2));
    }

    // =========================================================================
    // Ordering used by reconciliation
    // =========================================================================

    #[rstest]
    fn insert_kind_orders_before_delete_kind() {
        assert!(OperationKind::Insert < OperationKind::Delete);
    }

    #[rstest]
    #[case::same_kind_orders_by_value(
        PendingOperation::insert(1),
        PendingOperation::insert(2)
    )]
    #[case::insert_groups_before_delete_of_smaller_value(
        PendingOperation::insert(9),
        PendingOperation::delete(1)
    )]
    #[case::deletes_order_by_value(
        PendingOperation::delete(1),
        PendingOperation::delete(2)
    )]
    fn pending_operation_ordering(
        #[case] smaller: PendingOperation<i32>,
        #[case] larger: PendingOperation<i32>,
    ) {
        assert!(smaller < larger);
        assert!(larger > smaller);
    }

    #[rstest]
    fn sorting_groups_inserts_ascending_then_deletes_ascending() {
        let mut operations = [
            PendingOperation::delete(4),
            PendingOperation::insert(8),
            PendingOperation::delete(2),
            PendingOperation::insert(3),
        ];
        operations.sort_unstable();

        assert_eq!(
            operations,
            [
                PendingOperation::insert(3),
                PendingOperation::insert(8),
                PendingOperation::delete(2),
                PendingOperation::delete(4),
            ]
        );
    }
}
