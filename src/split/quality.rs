//! Built-in split quality measures.
//!
//! The set is closed: [`QualityMeasure`] is an enum over the two measures
//! the learner offers, and each variant implements the
//! [`SplitQualityMeasure`] contract. Callers with their own statistic can
//! implement the trait directly.

use crate::core::math::{gini_impurity, shannon_entropy};
use crate::core::traits::SplitQualityMeasure;
use crate::core::types::{Count, QualityMeasureType};
use ndarray::ArrayView2;

/// Weighted Gini impurity of the partitions. Lower is better.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiniIndex;

impl SplitQualityMeasure for GiniIndex {
    fn initialize(&mut self, _class_frequencies: &[Count], _total_count: Count) {}

    fn measure_quality(
        &self,
        total_count: Count,
        partition_counts: &[Count],
        partition_class_counts: ArrayView2<'_, Count>,
        _missing_count: Count,
    ) -> f64 {
        if total_count <= 0.0 {
            return 0.0;
        }
        partition_counts
            .iter()
            .zip(partition_class_counts.rows())
            .filter(|&(&count, _)| count > 0.0)
            .map(|(&count, classes)| {
                count / total_count * gini_impurity(classes.iter().copied(), count)
            })
            .sum()
    }

    fn is_better(&self, a: f64, b: f64) -> bool {
        a < b
    }

    fn worst_value(&self) -> f64 {
        f64::INFINITY
    }

    fn name(&self) -> &'static str {
        "gini"
    }
}

/// Information gain divided by split information (C4.5 gain ratio). Higher is better.
///
/// The raw score used during the search is the information gain scaled by
/// the fraction of rows with a known value; the division by split
/// information (which counts the missing rows as an extra partition)
/// happens once in post-processing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GainRatio {
    entropy_before_split: f64,
}

impl GainRatio {
    /// Class entropy of the data before splitting, as set by `initialize`.
    pub fn entropy_before_split(&self) -> f64 {
        self.entropy_before_split
    }
}

impl SplitQualityMeasure for GainRatio {
    fn initialize(&mut self, class_frequencies: &[Count], total_count: Count) {
        self.entropy_before_split = shannon_entropy(class_frequencies.iter().copied(), total_count);
    }

    fn measure_quality(
        &self,
        total_count: Count,
        partition_counts: &[Count],
        partition_class_counts: ArrayView2<'_, Count>,
        missing_count: Count,
    ) -> f64 {
        if total_count <= 0.0 {
            return 0.0;
        }
        let entropy_after_split: f64 = partition_counts
            .iter()
            .zip(partition_class_counts.rows())
            .filter(|&(&count, _)| count > 0.0)
            .map(|(&count, classes)| {
                count / total_count * shannon_entropy(classes.iter().copied(), count)
            })
            .sum();

        let known_fraction = total_count / (total_count + missing_count);
        (self.entropy_before_split - entropy_after_split) * known_fraction
    }

    fn is_better(&self, a: f64, b: f64) -> bool {
        a > b
    }

    fn worst_value(&self) -> f64 {
        f64::NEG_INFINITY
    }

    fn post_process_measure(
        &self,
        quality: f64,
        total_count: Count,
        partition_counts: &[Count],
        missing_count: Count,
    ) -> f64 {
        let all_rows = total_count + missing_count;
        let split_info = shannon_entropy(
            partition_counts.iter().copied().chain(std::iter::once(missing_count)),
            all_rows,
        );
        if split_info <= 0.0 {
            return 0.0;
        }
        quality / split_info
    }

    fn name(&self) -> &'static str {
        "gain_ratio"
    }
}

/// One of the built-in quality measures.
#[derive(Debug, Clone, PartialEq)]
pub enum QualityMeasure {
    /// See [`GiniIndex`]
    Gini(GiniIndex),
    /// See [`GainRatio`]
    GainRatio(GainRatio),
}

impl QualityMeasure {
    /// Fresh, uninitialized measure of the given type.
    pub fn from_type(measure_type: QualityMeasureType) -> Self {
        match measure_type {
            QualityMeasureType::Gini => QualityMeasure::Gini(GiniIndex),
            QualityMeasureType::GainRatio => QualityMeasure::GainRatio(GainRatio::default()),
        }
    }

    /// The type tag of this measure.
    pub fn measure_type(&self) -> QualityMeasureType {
        match self {
            QualityMeasure::Gini(_) => QualityMeasureType::Gini,
            QualityMeasure::GainRatio(_) => QualityMeasureType::GainRatio,
        }
    }

    fn inner(&self) -> &dyn SplitQualityMeasure {
        match self {
            QualityMeasure::Gini(m) => m,
            QualityMeasure::GainRatio(m) => m,
        }
    }
}

impl From<QualityMeasureType> for QualityMeasure {
    fn from(measure_type: QualityMeasureType) -> Self {
        Self::from_type(measure_type)
    }
}

impl SplitQualityMeasure for QualityMeasure {
    fn initialize(&mut self, class_frequencies: &[Count], total_count: Count) {
        match self {
            QualityMeasure::Gini(m) => m.initialize(class_frequencies, total_count),
            QualityMeasure::GainRatio(m) => m.initialize(class_frequencies, total_count),
        }
    }

    fn measure_quality(
        &self,
        total_count: Count,
        partition_counts: &[Count],
        partition_class_counts: ArrayView2<'_, Count>,
        missing_count: Count,
    ) -> f64 {
        self.inner().measure_quality(
            total_count,
            partition_counts,
            partition_class_counts,
            missing_count,
        )
    }

    fn is_better(&self, a: f64, b: f64) -> bool {
        self.inner().is_better(a, b)
    }

    fn worst_value(&self) -> f64 {
        self.inner().worst_value()
    }

    fn post_process_measure(
        &self,
        quality: f64,
        total_count: Count,
        partition_counts: &[Count],
        missing_count: Count,
    ) -> f64 {
        self.inner()
            .post_process_measure(quality, total_count, partition_counts, missing_count)
    }

    fn name(&self) -> &'static str {
        self.inner().name()
    }
}
