//! Integration tests for the nominal binary split search.
//!
//! These exercise the public API end to end: histogram construction,
//! exact and heuristic search with both built-in measures, row routing and
//! the parallel multi-attribute finder.

use nominal_partition::split::{mask_to_partitioning, partitioning_to_mask};
use nominal_partition::*;
use approx::assert_abs_diff_eq;
use tempfile::TempDir;

mod common;
use common::*;

#[test]
fn test_library_initialization() {
    assert!(nominal_partition::init().is_ok());
    assert!(nominal_partition::is_initialized());
}

#[test]
fn test_mixed_bucket_scenario_gini() {
    let histogram = histogram_from_rows(&[vec![10.0, 0.0], vec![0.0, 10.0], vec![5.0, 5.0]], 0.0);
    let search = NominalBinarySplitSearch::new(1.0, 10).unwrap();
    let split = search.search(&histogram, &mut GiniIndex).unwrap();

    // isolating a pure bucket (0.25) beats isolating the mixed one (0.5)
    assert_abs_diff_eq!(split.quality(), 0.25, epsilon = 1e-12);
    assert_eq!(split.left_values(), &[0]);
    assert_eq!(split.right_values(), &[1, 2]);
    assert_weights_sum_to_one(&split);
    assert_abs_diff_eq!(split.partition_weights()[0], 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_exact_search_candidate_count() {
    for num_values in 2..=12 {
        let histogram = create_random_histogram(num_values as u64, num_values, 3, 500);
        let search = NominalBinarySplitSearch::new(0.0, 20).unwrap();
        let split = search
            .search(&histogram, &mut QualityMeasure::from_type(QualityMeasureType::Gini))
            .unwrap();
        assert_eq!(split.strategy(), SearchStrategy::Exact);
        assert_eq!(split.candidates_enumerated(), (1u64 << (num_values - 1)) - 1);
    }
}

#[test]
fn test_exact_dominates_heuristic_on_random_data() {
    for seed in 0..20 {
        let histogram = create_random_histogram(seed, 9, 3, 400);
        let exact = NominalBinarySplitSearch::new(2.0, 9).unwrap();
        let heuristic = NominalBinarySplitSearch::new(2.0, 8).unwrap();

        let mut measure = GiniIndex;
        let exact_split = exact.search(&histogram, &mut measure).unwrap();
        let heuristic_split = heuristic.search(&histogram, &mut measure).unwrap();
        assert_eq!(exact_split.strategy(), SearchStrategy::Exact);
        assert_eq!(heuristic_split.strategy(), SearchStrategy::Heuristic);

        if heuristic_split.is_valid() {
            assert!(exact_split.quality() <= heuristic_split.quality() + 1e-12);
        }
    }
}

#[test]
fn test_gain_ratio_search_with_missing_values() {
    let histogram = histogram_from_rows(
        &[vec![20.0, 0.0], vec![0.0, 20.0], vec![10.0, 10.0]],
        15.0,
    );
    let search = NominalBinarySplitSearch::new(2.0, 10).unwrap();
    let split = search.search(&histogram, &mut GainRatio::default()).unwrap();

    assert!(split.is_valid());
    assert!(split.quality() > 0.0);
    assert_eq!(split.missing_count(), 15.0);
    assert_weights_sum_to_one(&split);
    assert_eq!(split.partition_for_value(None), None);
    assert_eq!(split.partition_for_value(Some(f64::NAN)), None);
}

#[test]
fn test_heuristic_search_on_wide_attribute() {
    let histogram = create_random_histogram(7, 40, 2, 4000);
    let search = NominalBinarySplitSearch::new(5.0, 10).unwrap();
    let split = search.search(&histogram, &mut GiniIndex).unwrap();

    assert_eq!(split.strategy(), SearchStrategy::Heuristic);
    assert!(split.is_valid());
    assert!(!split.left_values().is_empty());
    assert!(!split.right_values().is_empty());
    assert_eq!(split.left_values().len() + split.right_values().len(), 40);
    // bounded by one pass over the candidates per round
    assert!(split.candidates_enumerated() <= 40 * 40);
    assert_weights_sum_to_one(&split);

    for row in 0..40 {
        let expected = if split.left_values().contains(&row) {
            Partition::Left
        } else {
            Partition::Right
        };
        assert_eq!(split.partition_for_index(row), Some(expected));
    }
}

#[test]
fn test_size_limit_is_reported() {
    let histogram = create_random_histogram(1, 64, 2, 1000);
    assert_eq!(histogram.num_values(), 64);
    let search = NominalBinarySplitSearch::new(1.0, 100).unwrap();
    let error = search.search(&histogram, &mut GiniIndex).unwrap_err();
    assert!(matches!(error, SplitError::SizeLimit { length: 64, max: 63 }));
    assert!(error.is_recoverable());
}

#[test]
fn test_mask_round_trip() {
    let histogram = create_random_histogram(11, 8, 2, 300);
    let split = NominalBinarySplitSearch::new(1.0, 10)
        .unwrap()
        .search(&histogram, &mut GiniIndex)
        .unwrap();
    let (left, right) = mask_to_partitioning(split.value_mask(), split.num_values());
    assert_eq!(left, split.left_values());
    assert_eq!(right, split.right_values());
    assert_eq!(partitioning_to_mask(&left).unwrap(), split.value_mask());
}

#[test]
fn test_finder_matches_single_attribute_search() {
    let histograms = create_random_histograms(3, 12, 3, 600);
    for measure_type in [QualityMeasureType::Gini, QualityMeasureType::GainRatio] {
        let config = create_test_config(measure_type);
        let finder = NominalSplitFinder::new(config.clone()).unwrap();
        let best = finder.find_best_split_builtin(&histograms).unwrap().unwrap();

        let search = NominalBinarySplitSearch::from_config(&config).unwrap();
        let measure = QualityMeasure::from_type(measure_type);
        for histogram in &histograms {
            let split = search.search(histogram, &mut measure.clone()).unwrap();
            if split.is_valid() {
                assert!(measure.is_better_or_equal(best.split.quality(), split.quality()));
            }
        }
        let direct = search
            .search(&histograms[best.attribute], &mut measure.clone())
            .unwrap();
        assert_eq!(direct, best.split);
    }
}

#[test]
fn test_config_file_drives_finder() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("search.toml");
    let config = ConfigBuilder::new()
        .min_partition_size(4.0)
        .max_values_for_exact_search(6)
        .quality_measure(QualityMeasureType::Gini)
        .num_threads(1)
        .build()
        .unwrap();
    config.save_to_file(&path).unwrap();

    let loaded = SplitSearchConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);

    let finder = NominalSplitFinder::new(loaded).unwrap();
    let histograms = vec![create_random_histogram(5, 8, 2, 500)];
    let best = finder.find_best_split_builtin(&histograms).unwrap().unwrap();
    assert_eq!(best.split.strategy(), SearchStrategy::Heuristic);
    assert!(best
        .split
        .partition_valid_counts()
        .iter()
        .all(|&count| count >= 4.0));
}

#[test]
fn test_split_serializes() {
    let histogram = histogram_from_rows(&[vec![3.0, 1.0], vec![1.0, 3.0]], 0.0);
    let split = NominalBinarySplitSearch::new(1.0, 10)
        .unwrap()
        .search(&histogram, &mut GiniIndex)
        .unwrap();
    let json = serde_json::to_string(&split).unwrap();
    let restored: NominalSplit = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, split);
}

#[test]
fn test_unsplittable_attributes_serialize() {
    let histograms = vec![
        histogram_from_rows(&[vec![7.0, 3.0]], 0.0),
        histogram_from_rows(&[vec![3.0, 1.0], vec![1.0, 3.0]], 0.0),
    ];
    let finder = NominalSplitFinder::new(create_test_config(QualityMeasureType::Gini)).unwrap();
    let splits = finder.find_splits(&histograms, &GiniIndex).unwrap();

    let json = serde_json::to_string(&splits).unwrap();
    let restored: Vec<NominalSplit> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 2);
    assert!(!restored[0].is_valid());
    assert!(restored[0].quality().is_nan());
    assert_eq!(restored[1], splits[1]);
}
