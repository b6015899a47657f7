//! Binary split search over the values of a nominal attribute.
//!
//! The values of the attribute are divided into a left and a right group.
//! Attributes with few values are searched exhaustively by walking the
//! subsets in Gray code order, so that each step moves exactly one value
//! between the running partition sums. Attributes with more values fall
//! back to greedy forward selection.

use crate::config::SplitSearchConfig;
use crate::core::constants::MAX_GRAY_CODE_BITS;
use crate::core::error::{Result, SplitError};
use crate::core::traits::SplitQualityMeasure;
use crate::core::types::{Count, GrayCode, Partition, ValueIndex};
use crate::split::gray_code::{mask_to_partitioning, value_in_mask, GrayCodeCounter};
use crate::split::histogram::NominalValueHistogram;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the best partition was searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Every subset enumerated in Gray code order
    Exact,
    /// Greedy forward selection of values into the left partition
    Heuristic,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Exact => write!(f, "exact"),
            SearchStrategy::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// Result of a nominal binary split search.
///
/// When no candidate satisfied the minimum partition size the split is
/// invalid: the quality is `NaN`, both value lists are empty and every row
/// is routed to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalSplit {
    #[serde(with = "nan_as_none")]
    quality: f64,
    value_mask: GrayCode,
    left_values: Vec<ValueIndex>,
    right_values: Vec<ValueIndex>,
    partition_valid_counts: [Count; Partition::COUNT],
    total_valid_count: Count,
    missing_count: Count,
    num_values: usize,
    strategy: SearchStrategy,
    candidates_enumerated: u64,
    candidates_evaluated: u64,
}

/// Writes a `NaN` quality as `null` and reads `null` back as `NaN`.
mod nan_as_none {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub(super) fn serialize<S>(quality: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let quality = if quality.is_nan() { None } else { Some(*quality) };
        quality.serialize(serializer)
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

impl NominalSplit {
    /// Best (post-processed) quality, or `NaN` when no valid split exists.
    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// True if a partition satisfying the size constraint was found.
    pub fn is_valid(&self) -> bool {
        !self.quality.is_nan()
    }

    /// Value indices routed to the left partition, ascending.
    pub fn left_values(&self) -> &[ValueIndex] {
        &self.left_values
    }

    /// Value indices routed to the right partition, ascending.
    pub fn right_values(&self) -> &[ValueIndex] {
        &self.right_values
    }

    /// Bit mask of the left values.
    pub fn value_mask(&self) -> GrayCode {
        self.value_mask
    }

    /// Valid row count of each partition, indexed by [`Partition::index`].
    pub fn partition_valid_counts(&self) -> [Count; Partition::COUNT] {
        self.partition_valid_counts
    }

    /// Fraction of the valid rows that falls into each partition.
    pub fn partition_weights(&self) -> [f64; Partition::COUNT] {
        if self.total_valid_count <= 0.0 {
            return [0.0; Partition::COUNT];
        }
        self.partition_valid_counts
            .map(|count| count / self.total_valid_count)
    }

    /// Partition of a nominal value index, `None` if out of range or the split is invalid.
    pub fn partition_for_index(&self, value: ValueIndex) -> Option<Partition> {
        if !self.is_valid() || value >= self.num_values {
            return None;
        }
        if value_in_mask(self.value_mask, value) {
            Some(Partition::Left)
        } else {
            Some(Partition::Right)
        }
    }

    /// Routes a row by its raw attribute cell.
    ///
    /// Missing cells (`None` or `NaN`) and cells that are not a known
    /// value index yield `None`.
    pub fn partition_for_value(&self, value: Option<f64>) -> Option<Partition> {
        let value = value.filter(|v| !v.is_nan())?;
        if value < 0.0 || value.fract() != 0.0 {
            return None;
        }
        self.partition_for_index(value as ValueIndex)
    }

    /// The strategy that produced this split.
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Number of candidate partitionings visited.
    pub fn candidates_enumerated(&self) -> u64 {
        self.candidates_enumerated
    }

    /// Number of candidates that met the size constraint and were scored.
    pub fn candidates_evaluated(&self) -> u64 {
        self.candidates_evaluated
    }

    /// Number of nominal values of the attribute.
    pub fn num_values(&self) -> usize {
        self.num_values
    }

    /// Rows with a missing value.
    pub fn missing_count(&self) -> Count {
        self.missing_count
    }

    /// Rows with a valid value.
    pub fn total_valid_count(&self) -> Count {
        self.total_valid_count
    }
}

/// Running class counts of the two partitions.
struct PartitionAccumulator {
    counts: [Count; Partition::COUNT],
    class_counts: Array2<Count>,
}

impl PartitionAccumulator {
    /// Every value starts on the right.
    fn all_right(histogram: &NominalValueHistogram) -> Self {
        let mut class_counts = Array2::zeros((Partition::COUNT, histogram.num_classes()));
        class_counts
            .row_mut(Partition::Right.index())
            .assign(&histogram.class_frequencies());
        let mut counts = [0.0; Partition::COUNT];
        counts[Partition::Right.index()] = histogram.valid_count();
        PartitionAccumulator {
            counts,
            class_counts,
        }
    }

    fn move_value(
        &mut self,
        histogram: &NominalValueHistogram,
        value: ValueIndex,
        to: Partition,
    ) {
        let from = to.other();
        let value_counts = histogram.value_counts(value);
        let value_total = value_counts.sum();

        self.class_counts
            .row_mut(from.index())
            .scaled_add(-1.0, &value_counts);
        self.class_counts
            .row_mut(to.index())
            .scaled_add(1.0, &value_counts);
        self.counts[from.index()] -= value_total;
        self.counts[to.index()] += value_total;
    }

    fn is_admissible(&self, min_partition_size: f64) -> bool {
        self.counts.iter().all(|&count| count >= min_partition_size)
    }

    fn quality<M: SplitQualityMeasure + ?Sized>(
        &self,
        measure: &M,
        total_count: Count,
        missing_count: Count,
    ) -> f64 {
        measure.measure_quality(
            total_count,
            &self.counts,
            self.class_counts.view(),
            missing_count,
        )
    }
}

/// Best candidate found so far.
struct SearchState {
    quality: f64,
    mask: GrayCode,
    counts: [Count; Partition::COUNT],
    enumerated: u64,
    evaluated: u64,
}

impl SearchState {
    fn new() -> Self {
        SearchState {
            quality: f64::NAN,
            mask: 0,
            counts: [0.0; Partition::COUNT],
            enumerated: 0,
            evaluated: 0,
        }
    }
}

/// Nominal binary split search with exact and heuristic modes.
#[derive(Debug, Clone, PartialEq)]
pub struct NominalBinarySplitSearch {
    min_partition_size: f64,
    max_values_for_exact_search: usize,
}

impl NominalBinarySplitSearch {
    /// Create a search. `min_partition_size` must be finite and non-negative.
    pub fn new(min_partition_size: f64, max_values_for_exact_search: usize) -> Result<Self> {
        if !min_partition_size.is_finite() || min_partition_size < 0.0 {
            return Err(SplitError::invalid_parameter(
                "min_partition_size",
                min_partition_size.to_string(),
                "must be a finite value >= 0",
            ));
        }
        Ok(NominalBinarySplitSearch {
            min_partition_size,
            max_values_for_exact_search,
        })
    }

    /// Create a search from the configuration's search parameters.
    pub fn from_config(config: &SplitSearchConfig) -> Result<Self> {
        Self::new(
            config.min_partition_size,
            config.max_values_for_exact_search,
        )
    }

    /// Minimum row count of each partition.
    pub fn min_partition_size(&self) -> f64 {
        self.min_partition_size
    }

    /// Largest value count searched exhaustively.
    pub fn max_values_for_exact_search(&self) -> usize {
        self.max_values_for_exact_search
    }

    /// Strategy used for an attribute with `num_values` values.
    pub fn strategy_for(&self, num_values: usize) -> SearchStrategy {
        if num_values <= self.max_values_for_exact_search {
            SearchStrategy::Exact
        } else {
            SearchStrategy::Heuristic
        }
    }

    /// Find the best binary partition of the histogram's values.
    ///
    /// The measure is initialized with the histogram's class distribution
    /// before the search starts. Scores are only ever compared through
    /// [`SplitQualityMeasure::is_better`], and the earliest candidate wins
    /// ties. More than 63 values is a size-limit error in both modes.
    pub fn search<M: SplitQualityMeasure + ?Sized>(
        &self,
        histogram: &NominalValueHistogram,
        measure: &mut M,
    ) -> Result<NominalSplit> {
        let num_values = histogram.num_values();
        crate::ensure!(
            num_values <= MAX_GRAY_CODE_BITS,
            SplitError::size_limit(num_values, MAX_GRAY_CODE_BITS)
        );

        let total_count = histogram.valid_count();
        let missing_count = histogram.missing_count();
        let class_frequencies = histogram.class_frequencies().to_vec();
        measure.initialize(&class_frequencies, total_count);

        let strategy = self.strategy_for(num_values);
        log::debug!(
            "Searching {} values with {} search ({} measure, min partition size {})",
            num_values,
            strategy,
            measure.name(),
            self.min_partition_size
        );

        let mut state = match strategy {
            SearchStrategy::Exact => {
                self.exact_search(histogram, measure, total_count, missing_count)?
            }
            SearchStrategy::Heuristic => {
                self.heuristic_search(histogram, measure, total_count, missing_count)?
            }
        };

        if state.quality.is_nan() {
            log::debug!(
                "No valid split among {} candidates for {} values",
                state.enumerated,
                num_values
            );
            return Ok(NominalSplit {
                quality: f64::NAN,
                value_mask: 0,
                left_values: Vec::new(),
                right_values: Vec::new(),
                partition_valid_counts: [0.0; Partition::COUNT],
                total_valid_count: total_count,
                missing_count,
                num_values,
                strategy,
                candidates_enumerated: state.enumerated,
                candidates_evaluated: state.evaluated,
            });
        }

        if state.quality != 0.0 {
            state.quality = measure.post_process_measure(
                state.quality,
                total_count,
                &state.counts,
                missing_count,
            );
        }

        let (left_values, right_values) = mask_to_partitioning(state.mask, num_values);
        log::debug!(
            "Best split {:?} | {:?} with quality {} ({} of {} candidates evaluated)",
            left_values,
            right_values,
            state.quality,
            state.evaluated,
            state.enumerated
        );

        Ok(NominalSplit {
            quality: state.quality,
            value_mask: state.mask,
            left_values,
            right_values,
            partition_valid_counts: state.counts,
            total_valid_count: total_count,
            missing_count,
            num_values,
            strategy,
            candidates_enumerated: state.enumerated,
            candidates_evaluated: state.evaluated,
        })
    }

    fn exact_search<M: SplitQualityMeasure + ?Sized>(
        &self,
        histogram: &NominalValueHistogram,
        measure: &M,
        total_count: Count,
        missing_count: Count,
    ) -> Result<SearchState> {
        let mut state = SearchState::new();
        if histogram.num_values() < 2 {
            return Ok(state);
        }

        let mut accumulator = PartitionAccumulator::all_right(histogram);
        let mut counter = GrayCodeCounter::new(histogram.num_values(), true)?;
        // code 0 leaves the left partition empty
        counter.advance();

        while counter.has_next() {
            let value = counter
                .last_changed_bit_index()
                .ok_or_else(|| SplitError::internal("gray code counter advanced without a bit change"))?;
            let to = if counter.last_changed_bit_now_set() {
                Partition::Left
            } else {
                Partition::Right
            };
            accumulator.move_value(histogram, value, to);
            state.enumerated += 1;

            if accumulator.is_admissible(self.min_partition_size) {
                let quality = accumulator.quality(measure, total_count, missing_count);
                state.evaluated += 1;
                if state.quality.is_nan() || measure.is_better(quality, state.quality) {
                    state.quality = quality;
                    state.mask = counter.current_code();
                    state.counts = accumulator.counts;
                }
            }
            counter.advance();
        }
        Ok(state)
    }

    /// Greedy forward selection. Each round moves the single value whose
    /// move strictly improves on the best quality so far; the search stops
    /// when no move improves, when one value is left on the right, or after
    /// `num_values` rounds.
    fn heuristic_search<M: SplitQualityMeasure + ?Sized>(
        &self,
        histogram: &NominalValueHistogram,
        measure: &M,
        total_count: Count,
        missing_count: Count,
    ) -> Result<SearchState> {
        let num_values = histogram.num_values();
        let mut state = SearchState::new();
        let mut accumulator = PartitionAccumulator::all_right(histogram);
        let mut candidates: Vec<ValueIndex> = (0..num_values).collect();
        let mut chosen: Vec<ValueIndex> = Vec::with_capacity(num_values);

        for _round in 0..num_values {
            if candidates.len() < 2 {
                break;
            }

            let mut round_best = state.quality;
            let mut round_winner = None;
            for (position, &value) in candidates.iter().enumerate() {
                accumulator.move_value(histogram, value, Partition::Left);
                state.enumerated += 1;
                if accumulator.is_admissible(self.min_partition_size) {
                    let quality = accumulator.quality(measure, total_count, missing_count);
                    state.evaluated += 1;
                    if round_best.is_nan() || measure.is_better(quality, round_best) {
                        round_best = quality;
                        round_winner = Some(position);
                    }
                }
                accumulator.move_value(histogram, value, Partition::Right);
            }

            let Some(position) = round_winner else {
                break;
            };
            let value = candidates.remove(position);
            if chosen.contains(&value) || candidates.contains(&value) {
                return Err(SplitError::internal(format!(
                    "value {} assigned to both the chosen and the candidate pool",
                    value
                )));
            }

            accumulator.move_value(histogram, value, Partition::Left);
            chosen.push(value);
            state.quality = round_best;
            state.mask |= 1u64 << value;
            state.counts = accumulator.counts;
        }
        Ok(state)
    }
}
