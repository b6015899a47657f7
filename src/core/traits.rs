//! Core trait definitions.
//!
//! The split search is written against [`SplitQualityMeasure`] only; it
//! never compares two scores with a hard-coded operator, because some
//! measures are minimized (Gini) and others maximized (gain ratio).

use crate::core::error::Result;
use crate::core::types::Count;
use ndarray::ArrayView2;

use std::fmt::Debug;

/// Strategy scoring a candidate partitioning of the rows of one attribute.
///
/// The search calls [`initialize`](Self::initialize) once with the class
/// distribution of all valid rows, then [`measure_quality`](Self::measure_quality)
/// for every admissible candidate, and finally
/// [`post_process_measure`](Self::post_process_measure) once on the winner.
pub trait SplitQualityMeasure: Send + Sync + Debug {
    /// Precompute the global baseline (e.g. class entropy before the split).
    fn initialize(&mut self, class_frequencies: &[Count], total_count: Count);

    /// Score a partitioning.
    ///
    /// `partition_counts[p]` is the number of rows in partition `p` and
    /// `partition_class_counts.row(p)` its class histogram.
    fn measure_quality(
        &self,
        total_count: Count,
        partition_counts: &[Count],
        partition_class_counts: ArrayView2<'_, Count>,
        missing_count: Count,
    ) -> f64;

    /// True if `a` is strictly better than `b`.
    fn is_better(&self, a: f64, b: f64) -> bool;

    /// True if `a` is better than or as good as `b`.
    fn is_better_or_equal(&self, a: f64, b: f64) -> bool {
        !self.is_better(b, a)
    }

    /// The value no admissible split can be worse than.
    fn worst_value(&self) -> f64;

    /// Normalize the final score. Called once, outside the search loop.
    fn post_process_measure(
        &self,
        quality: f64,
        total_count: Count,
        partition_counts: &[Count],
        missing_count: Count,
    ) -> f64 {
        let _ = (total_count, partition_counts, missing_count);
        quality
    }

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

/// Trait for components that can be validated.
pub trait Validatable {
    /// Validate the component's current state.
    fn validate(&self) -> Result<()>;

    /// Get validation warnings (non-fatal issues).
    fn validation_warnings(&self) -> Vec<String> {
        Vec::new()
    }
}
