//! Reconciliation: drains the pending-operation log and applies the net
//! effect of every buffered mutation to the sorted store in one batched pass.
//!
//! The pipeline has two phases:
//!
//! 1. **Net-effect extraction** ([`extract_net_effects`]): the arrival-ordered
//!    log collapses to at most one operation per distinct value. The *last*
//!    mention of a value decides its eventual kind (recency wins), and the
//!    survivor is kept only if it would change the store: an insert of a
//!    value the store already holds, or a delete of a value it never held,
//!    drops out here.
//! 2. **Batched application** ([`apply_net_effects`]): the surviving
//!    operations are sorted so inserts group ahead of deletes, the insert run
//!    merges into the store in one pass, and the delete run compacts it in
//!    one more.
//!
//! For a log of B entries and a store of n elements the whole pass costs
//! O(B² + B log n) extraction plus O(n + B) application, which is the point
//! of buffering: n-sized work happens once per batch instead of once per
//! mutation.

use std::cmp::Ordering;

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use super::log::{OperationKind, OperationLog, PendingOperation};
use super::store::SortedStore;

/// Net effects held inline up to this many survivors; larger batches spill
/// to the heap. Batches full of redundant mentions collapse well below the
/// log capacity, so the inline case dominates.
const NET_EFFECTS_INLINE_CAPACITY: usize = 16;

/// Scratch buffer for the operations that survive net-effect extraction.
type NetEffects<T> = SmallVec<[PendingOperation<T>; NET_EFFECTS_INLINE_CAPACITY]>;

// =============================================================================
// Reconciliation
// =============================================================================

/// Applies every buffered operation to the store and leaves the log empty.
///
/// A no-op when the log is already empty, so reconciling twice in a row
/// never touches the store a second time.
pub(crate) fn reconcile<T, const CAPACITY: usize>(
    store: &mut SortedStore<T>,
    log: &mut OperationLog<T, CAPACITY>,
) where
    T: Ord,
{
    if log.is_empty() {
        return;
    }

    let entries = log.take_entries();
    let net_effects = extract_net_effects(entries, store);
    apply_net_effects(store, net_effects);
}

// =============================================================================
// Phase 1: Net-Effect Extraction
// =============================================================================

/// Collapses arrival-ordered entries to at most one operation per distinct
/// value, filtered down to the operations that would change the store.
///
/// Entries sit in `Option` slots; a taken slot marks the entry as consumed
/// by an earlier scan. Each unconsumed entry seeds a forward scan that
/// consumes every later mention of the same value, tracking the latest kind
/// seen. Output order follows first arrival, which is irrelevant once the
/// survivors are sorted for application.
fn extract_net_effects<T, const CAPACITY: usize>(
    entries: ArrayVec<PendingOperation<T>, CAPACITY>,
    store: &SortedStore<T>,
) -> NetEffects<T>
where
    T: Ord,
{
    let mut slots: ArrayVec<Option<PendingOperation<T>>, CAPACITY> =
        entries.into_iter().map(Some).collect();
    let mut net_effects = NetEffects::new();

    for index in 0..slots.len() {
        let Some(seed) = slots[index].take() else {
            continue;
        };

        // The last mention of this value anywhere later in the log decides
        // the eventual kind; every earlier mention is superseded.
        let mut eventual_kind = seed.kind;
        for slot in &mut slots[index + 1..] {
            match slot {
                Some(entry) if entry.value == seed.value => {
                    eventual_kind = entry.kind;
                    *slot = None;
                }
                _ => {}
            }
        }

        // Keep only operations that change membership relative to the store
        // as it stands before this batch is applied.
        let already_present = store.contains(&seed.value);
        match eventual_kind {
            OperationKind::Insert if !already_present => {
                net_effects.push(PendingOperation::insert(seed.value));
            }
            OperationKind::Delete if already_present => {
                net_effects.push(PendingOperation::delete(seed.value));
            }
            _ => {}
        }
    }

    net_effects
}

// =============================================================================
// Phase 2: Batched Application
// =============================================================================

/// Applies sorted net effects to the store: grow once with the insert run,
/// then compact the delete run away in a single sweep.
///
/// The net effects carry pairwise distinct values, insert values absent from
/// the store and delete values present in it, which is exactly what keeps
/// the rebuilt sequence strictly ascending.
fn apply_net_effects<T>(store: &mut SortedStore<T>, mut net_effects: NetEffects<T>)
where
    T: Ord,
{
    if net_effects.is_empty() {
        return;
    }

    // Inserts group ahead of deletes, each run ascending by value.
    net_effects.sort_unstable();
    let insert_count =
        net_effects.partition_point(|operation| operation.kind == OperationKind::Insert);

    let mut operations = net_effects.into_iter();
    let insert_run: Vec<T> = operations
        .by_ref()
        .take(insert_count)
        .map(|operation| operation.value)
        .collect();

    let merged = merge_ascending_runs(store.detach(), insert_run);

    // Ascending delete cursor against the ascending merged sequence: each
    // delete value matches exactly one element, and the cursor advances only
    // on a match, so one sweep removes the whole run.
    let mut deletes = operations.map(|operation| operation.value);
    let mut pending_delete = deletes.next();
    let mut compacted = merged;
    compacted.retain(|item| {
        if pending_delete.as_ref() == Some(item) {
            pending_delete = deletes.next();
            false
        } else {
            true
        }
    });

    store.attach(compacted);
}

/// Merges two strictly ascending runs into one strictly ascending vector.
///
/// Callers guarantee the runs are disjoint, which keeps the result free of
/// duplicates. Non-overlapping runs (bulk loads above or below the existing
/// elements) skip the element-by-element walk entirely.
fn merge_ascending_runs<T: Ord>(prefix: Vec<T>, run: Vec<T>) -> Vec<T> {
    if run.is_empty() {
        return prefix;
    }
    if prefix.is_empty() {
        return run;
    }

    // Both runs are non-empty past this point, so `first`/`last` compare as
    // `Some` against `Some`.
    if prefix.last() < run.first() {
        let mut merged = prefix;
        merged.extend(run);
        return merged;
    }
    if run.last() < prefix.first() {
        let mut merged = run;
        merged.extend(prefix);
        return merged;
    }

    let mut merged = Vec::with_capacity(prefix.len() + run.len());
    let mut left = prefix.into_iter().peekable();
    let mut right = run.into_iter().peekable();

    while let (Some(left_next), Some(right_next)) = (left.peek(), right.peek()) {
        // Equal never arises for disjoint runs; folding it into the left arm
        // keeps the merge stable regardless.
        match left_next.cmp(right_next) {
            Ordering::Less | Ordering::Equal => {
                if let Some(item) = left.next() {
                    merged.push(item);
                }
            }
            Ordering::Greater => {
                if let Some(item) = right.next() {
                    merged.push(item);
                }
            }
        }
    }

    merged.extend(left);
    merged.extend(right);
    merged
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn log_of<const CAPACITY: usize>(
        operations: &[PendingOperation<i32>],
    ) -> OperationLog<i32, CAPACITY> {
        let mut log = OperationLog::new();
        for operation in operations {
            log.append(operation.clone());
        }
        log
    }

    // =========================================================================
    // Net-Effect Extraction
    // =========================================================================

    fn extract<const CAPACITY: usize>(
        operations: &[PendingOperation<i32>],
        store_items: Vec<i32>,
    ) -> Vec<PendingOperation<i32>> {
        let mut log = log_of::<CAPACITY>(operations);
        let store = SortedStore::from_sorted_vec(store_items);
        extract_net_effects(log.take_entries(), &store).into_vec()
    }

    #[rstest]
    fn latest_mention_of_a_value_decides_its_kind() {
        let net = extract::<8>(
            &[
                PendingOperation::insert(5),
                PendingOperation::delete(5),
                PendingOperation::insert(5),
            ],
            vec![],
        );
        assert_eq!(net, [PendingOperation::insert(5)]);
    }

    #[rstest]
    fn insert_of_present_value_is_dropped() {
        let net = extract::<8>(&[PendingOperation::insert(4)], vec![2, 4, 6]);
        assert!(net.is_empty());
    }

    #[rstest]
    fn delete_of_absent_value_is_dropped() {
        let net = extract::<8>(&[PendingOperation::delete(5)], vec![2, 4, 6]);
        assert!(net.is_empty());
    }

    #[rstest]
    fn insert_then_delete_of_absent_value_cancels_out() {
        let net = extract::<8>(
            &[PendingOperation::insert(9), PendingOperation::delete(9)],
            vec![],
        );
        assert!(net.is_empty());
    }

    #[rstest]
    fn delete_then_insert_of_present_value_cancels_out() {
        let net = extract::<8>(
            &[PendingOperation::delete(4), PendingOperation::insert(4)],
            vec![2, 4, 6],
        );
        assert!(net.is_empty());
    }

    #[rstest]
    fn distinct_values_survive_independently() {
        let net = extract::<8>(
            &[
                PendingOperation::delete(4),
                PendingOperation::insert(8),
                PendingOperation::insert(2),
                PendingOperation::delete(2),
            ],
            vec![2, 4, 6],
        );
        assert_eq!(
            net,
            [
                PendingOperation::delete(4),
                PendingOperation::insert(8),
                PendingOperation::delete(2),
            ]
        );
    }

    #[rstest]
    fn full_log_of_one_value_collapses_to_its_last_entry() {
        let operations: Vec<_> = (0..8)
            .map(|round| {
                if round % 2 == 0 {
                    PendingOperation::insert(3)
                } else {
                    PendingOperation::delete(3)
                }
            })
            .collect();

        // Eight mentions, last one a delete of an absent value: nothing nets.
        let net = extract::<8>(&operations, vec![]);
        assert!(net.is_empty());
    }

    // =========================================================================
    // Run Merging
    // =========================================================================

    #[rstest]
    #[case::run_empty(vec![1, 2, 3], vec![], vec![1, 2, 3])]
    #[case::prefix_empty(vec![], vec![4, 5], vec![4, 5])]
    #[case::run_above_prefix(vec![1, 2], vec![3, 4], vec![1, 2, 3, 4])]
    #[case::run_below_prefix(vec![5, 6], vec![1, 2], vec![1, 2, 5, 6])]
    #[case::interleaved(vec![2, 4, 6], vec![1, 3, 7], vec![1, 2, 3, 4, 6, 7])]
    #[case::single_into_middle(vec![1, 9], vec![5], vec![1, 5, 9])]
    fn merge_ascending_runs_produces_one_ascending_run(
        #[case] prefix: Vec<i32>,
        #[case] run: Vec<i32>,
        #[case] expected: Vec<i32>,
    ) {
        assert_eq!(merge_ascending_runs(prefix, run), expected);
    }

    // =========================================================================
    // Full Reconciliation
    // =========================================================================

    #[rstest]
    fn mixed_batch_applies_net_inserts_and_deletes() {
        let mut store = SortedStore::from_sorted_vec(vec![2, 4, 6]);
        let mut log = log_of::<8>(&[
            PendingOperation::delete(4),
            PendingOperation::insert(8),
            PendingOperation::insert(2),
            PendingOperation::delete(2),
        ]);

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), [6, 8]);
        assert!(log.is_empty());
    }

    #[rstest]
    fn duplicate_inserts_store_one_copy() {
        let mut store = SortedStore::new();
        let mut log = log_of::<8>(&[
            PendingOperation::insert(5),
            PendingOperation::insert(1),
            PendingOperation::insert(3),
            PendingOperation::insert(1),
            PendingOperation::insert(5),
        ]);

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), [1, 3, 5]);
    }

    #[rstest]
    fn deletes_compact_the_store_in_one_sweep() {
        let mut store = SortedStore::from_sorted_vec(vec![1, 2, 3, 4, 5]);
        let mut log = log_of::<8>(&[
            PendingOperation::delete(1),
            PendingOperation::delete(5),
            PendingOperation::delete(3),
        ]);

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), [2, 4]);
    }

    #[rstest]
    fn inserts_below_and_above_existing_elements_take_the_fast_paths() {
        let mut store = SortedStore::from_sorted_vec(vec![10, 11]);
        let mut log = log_of::<8>(&[
            PendingOperation::insert(1),
            PendingOperation::insert(2),
        ]);
        reconcile(&mut store, &mut log);
        assert_eq!(store.as_slice(), [1, 2, 10, 11]);

        let mut log = log_of::<8>(&[
            PendingOperation::insert(20),
            PendingOperation::insert(21),
        ]);
        reconcile(&mut store, &mut log);
        assert_eq!(store.as_slice(), [1, 2, 10, 11, 20, 21]);
    }

    #[rstest]
    fn empty_log_leaves_the_store_untouched() {
        let mut store = SortedStore::from_sorted_vec(vec![1, 2, 3]);
        let mut log: OperationLog<i32, 8> = OperationLog::new();

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), [1, 2, 3]);
    }

    #[rstest]
    fn reconcile_is_idempotent() {
        let mut store = SortedStore::new();
        let mut log = log_of::<8>(&[
            PendingOperation::insert(3),
            PendingOperation::insert(1),
            PendingOperation::delete(3),
        ]);

        reconcile(&mut store, &mut log);
        let after_first = store.as_slice().to_vec();

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), after_first.as_slice());
    }

    #[rstest]
    fn batch_collapsing_to_nothing_never_rebuilds_the_store() {
        let mut store = SortedStore::from_sorted_vec(vec![2, 4, 6]);
        let mut log = log_of::<8>(&[
            PendingOperation::insert(4),
            PendingOperation::delete(9),
        ]);

        reconcile(&mut store, &mut log);

        assert_eq!(store.as_slice(), [2, 4, 6]);
        assert!(log.is_empty());
    }

    #[rstest]
    fn store_stays_strictly_ascending_after_adversarial_batches() {
        let mut store = SortedStore::new();
        let mut log: OperationLog<i32, 16> = OperationLog::new();

        let batches: [&[PendingOperation<i32>]; 3] = [
            &[
                PendingOperation::insert(7),
                PendingOperation::insert(7),
                PendingOperation::delete(7),
                PendingOperation::insert(7),
                PendingOperation::insert(0),
            ],
            &[
                PendingOperation::delete(0),
                PendingOperation::insert(0),
                PendingOperation::insert(3),
                PendingOperation::delete(99),
            ],
            &[
                PendingOperation::delete(7),
                PendingOperation::insert(7),
                PendingOperation::delete(3),
            ],
        ];

        for batch in batches {
            for operation in batch {
                log.append(operation.clone());
            }
            reconcile(&mut store, &mut log);
            assert!(
                store
                    .as_slice()
                    .windows(2)
                    .all(|window| window[0] < window[1])
            );
        }

        assert_eq!(store.as_slice(), [0, 7]);
    }
}
