//! IAI-Callgrind benchmark for BufferedOrderedSet reconciliation.
//!
//! Measures instruction counts for buffered mutation batches vs an
//! immediate-mode sorted Vec baseline. Data sizes: 100, 1000, 10000.

use bufset::buffered::BufferedOrderedSet;
use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use std::hint::black_box;

// Setup functions for different data sizes
fn setup_scrambled_values_100() -> Vec<i32> {
    (0..100).map(|value| (value * 7919) % 100).collect()
}

fn setup_scrambled_values_1000() -> Vec<i32> {
    (0..1000).map(|value| (value * 7919) % 1000).collect()
}

fn setup_scrambled_values_10000() -> Vec<i32> {
    (0..10000).map(|value| (value * 7919) % 10000).collect()
}

fn setup_loaded_set_10000() -> BufferedOrderedSet<i32> {
    let mut set: BufferedOrderedSet<i32> = (0..10000).collect();
    set.reconcile();
    // One full batch of pending churn around the middle of the store.
    for value in 0..32 {
        set.remove(5000 + value);
        set.insert(20000 + value);
    }
    set
}

// Buffered insertion benchmarks
#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_100())]
fn buffered_insert_100(values: Vec<i32>) -> usize {
    let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    for value in values {
        set.insert(black_box(value));
    }
    black_box(set.len())
}

#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_1000())]
fn buffered_insert_1000(values: Vec<i32>) -> usize {
    let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    for value in values {
        set.insert(black_box(value));
    }
    black_box(set.len())
}

#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_10000())]
fn buffered_insert_10000(values: Vec<i32>) -> usize {
    let mut set: BufferedOrderedSet<i32> = BufferedOrderedSet::new();
    for value in values {
        set.insert(black_box(value));
    }
    black_box(set.len())
}

// Immediate-mode sorted Vec benchmarks (baseline for comparison)
#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_100())]
fn immediate_sorted_vec_100(values: Vec<i32>) -> usize {
    let mut store: Vec<i32> = Vec::new();
    for value in values {
        if let Err(position) = store.binary_search(&value) {
            store.insert(position, black_box(value));
        }
    }
    black_box(store.len())
}

#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_1000())]
fn immediate_sorted_vec_1000(values: Vec<i32>) -> usize {
    let mut store: Vec<i32> = Vec::new();
    for value in values {
        if let Err(position) = store.binary_search(&value) {
            store.insert(position, black_box(value));
        }
    }
    black_box(store.len())
}

#[library_benchmark]
#[bench::with_setup(setup_scrambled_values_10000())]
fn immediate_sorted_vec_10000(values: Vec<i32>) -> usize {
    let mut store: Vec<i32> = Vec::new();
    for value in values {
        if let Err(position) = store.binary_search(&value) {
            store.insert(position, black_box(value));
        }
    }
    black_box(store.len())
}

// Single-batch reconciliation against a populated store
#[library_benchmark]
#[bench::with_setup(setup_loaded_set_10000())]
fn reconcile_full_batch_10000(mut set: BufferedOrderedSet<i32>) -> usize {
    set.reconcile();
    black_box(set.len())
}

library_benchmark_group!(
    name = buffered_ordered_set_group;
    benchmarks =
        buffered_insert_100, buffered_insert_1000, buffered_insert_10000,
        immediate_sorted_vec_100, immediate_sorted_vec_1000, immediate_sorted_vec_10000,
        reconcile_full_batch_10000
);

main!(library_benchmark_groups = buffered_ordered_set_group);
