//! Common test utilities for nominal partition integration tests.

#![allow(dead_code)]

use nominal_partition::core::WEIGHT_SUM_TOLERANCE;
use nominal_partition::*;
use rand::prelude::*;
use std::collections::{HashMap, HashSet};

/// Histogram from literal per-value class counts
pub fn histogram_from_rows(rows: &[Vec<f64>], missing_count: f64) -> NominalValueHistogram {
    NominalValueHistogram::from_rows(rows, missing_count).expect("valid histogram rows")
}

/// Random histogram built row by row.
///
/// Each value gets a preferred class so that the attribute carries some
/// signal; roughly one row in twenty has a missing value.
pub fn create_random_histogram(
    seed: u64,
    num_values: usize,
    num_classes: usize,
    num_rows: usize,
) -> NominalValueHistogram {
    let mut rng = StdRng::seed_from_u64(seed);
    let preferred: Vec<ClassIndex> = (0..num_values)
        .map(|_| rng.gen_range(0..num_classes))
        .collect();

    let mut histogram = NominalValueHistogram::zeros(num_values, num_classes);
    for _ in 0..num_rows {
        if rng.gen_bool(0.05) {
            histogram
                .add_row(None, rng.gen_range(0..num_classes), 1.0)
                .expect("unit weight");
            continue;
        }
        let value = rng.gen_range(0..num_values);
        let class = if rng.gen_bool(0.7) {
            preferred[value]
        } else {
            rng.gen_range(0..num_classes)
        };
        histogram.add_row(Some(value), class, 1.0).expect("unit weight");
    }
    histogram
}

/// Random histograms for a multi-attribute search
pub fn create_random_histograms(
    seed: u64,
    num_attributes: usize,
    num_classes: usize,
    num_rows: usize,
) -> Vec<NominalValueHistogram> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..num_attributes)
        .map(|_| {
            let num_values = rng.gen_range(2..=14);
            create_random_histogram(rng.gen(), num_values, num_classes, num_rows)
        })
        .collect()
}

/// Reference map assigning `num_items` items to `num_labels` labels round robin
pub fn create_reference(num_items: usize, num_labels: usize) -> HashMap<usize, usize> {
    (0..num_items).map(|item| (item, item % num_labels)).collect()
}

/// Clustering map from `(label, members)` pairs
pub fn create_clustering<C, I>(clusters: Vec<(C, Vec<I>)>) -> HashMap<C, HashSet<I>>
where
    C: Eq + std::hash::Hash,
    I: Eq + std::hash::Hash,
{
    clusters
        .into_iter()
        .map(|(label, members)| (label, members.into_iter().collect()))
        .collect()
}

/// Configuration used by most integration tests
pub fn create_test_config(measure: QualityMeasureType) -> SplitSearchConfig {
    ConfigBuilder::new()
        .min_partition_size(1.0)
        .max_values_for_exact_search(10)
        .quality_measure(measure)
        .num_threads(2)
        .build()
        .expect("valid test configuration")
}

/// Assert that the partition weights of a valid split add up to one
pub fn assert_weights_sum_to_one(split: &NominalSplit) {
    let weights = split.partition_weights();
    let sum: f64 = weights.iter().sum();
    assert!(
        (sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE,
        "partition weights {:?} sum to {}",
        weights,
        sum
    );
}
