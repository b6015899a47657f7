//! Per-value class-count histogram of a nominal attribute.

use crate::core::error::{Result, SplitError};
use crate::core::types::{ClassIndex, Count, ValueIndex};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Class counts for every nominal value of one attribute.
///
/// Row `v` of the count matrix holds the (weighted) class counts of the
/// rows whose attribute value is `v`. Rows with a missing value are only
/// tallied in `missing_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominalValueHistogram {
    counts: Array2<Count>,
    missing_count: Count,
}

impl NominalValueHistogram {
    /// Creates a histogram from a `[value][class]` count matrix.
    pub fn new(counts: Array2<Count>, missing_count: Count) -> Result<Self> {
        if let Some(bad) = counts.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(SplitError::invalid_parameter(
                "counts",
                bad.to_string(),
                "class counts must be finite and non-negative",
            ));
        }
        Self::check_weight("missing_count", missing_count)?;
        Ok(NominalValueHistogram {
            counts,
            missing_count,
        })
    }

    /// Creates a histogram from one count vector per nominal value.
    pub fn from_rows(rows: &[Vec<Count>], missing_count: Count) -> Result<Self> {
        let num_classes = rows.first().map_or(0, Vec::len);
        if let Some((value, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != num_classes) {
            return Err(SplitError::dimension_mismatch(
                format!("{} class counts", num_classes),
                format!("{} for value {}", row.len(), value),
            ));
        }
        let flat: Vec<Count> = rows.iter().flatten().copied().collect();
        let counts = Array2::from_shape_vec((rows.len(), num_classes), flat)
            .map_err(|e| SplitError::internal(format!("histogram shape: {}", e)))?;
        Self::new(counts, missing_count)
    }

    /// An all-zero histogram of the given shape.
    pub fn zeros(num_values: usize, num_classes: usize) -> Self {
        NominalValueHistogram {
            counts: Array2::zeros((num_values, num_classes)),
            missing_count: 0.0,
        }
    }

    /// Tallies one row. `None` records a missing value.
    ///
    /// The value and class dimensions grow on demand.
    pub fn add_row(
        &mut self,
        value: Option<ValueIndex>,
        class: ClassIndex,
        weight: Count,
    ) -> Result<()> {
        Self::check_weight("weight", weight)?;
        let Some(value) = value else {
            self.missing_count += weight;
            return Ok(());
        };

        let (num_values, num_classes) = self.counts.dim();
        if value >= num_values || class >= num_classes {
            self.grow((value + 1).max(num_values), (class + 1).max(num_classes));
        }
        self.counts[[value, class]] += weight;
        Ok(())
    }

    fn grow(&mut self, new_num_values: usize, new_num_classes: usize) {
        let (num_values, num_classes) = self.counts.dim();
        let mut grown = Array2::zeros((new_num_values, new_num_classes));
        grown
            .slice_mut(s![..num_values, ..num_classes])
            .assign(&self.counts);
        self.counts = grown;
    }

    fn check_weight(name: &str, weight: Count) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(SplitError::invalid_parameter(
                name,
                weight.to_string(),
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }

    /// Number of distinct nominal values (K).
    pub fn num_values(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of class labels.
    pub fn num_classes(&self) -> usize {
        self.counts.ncols()
    }

    /// The full `[value][class]` count matrix.
    pub fn counts(&self) -> ArrayView2<'_, Count> {
        self.counts.view()
    }

    /// Class counts of one nominal value.
    pub fn value_counts(&self, value: ValueIndex) -> ArrayView1<'_, Count> {
        self.counts.row(value)
    }

    /// Row count of every nominal value.
    pub fn value_totals(&self) -> Array1<Count> {
        self.counts.sum_axis(Axis(1))
    }

    /// Class distribution over all valid (non-missing) rows.
    pub fn class_frequencies(&self) -> Array1<Count> {
        self.counts.sum_axis(Axis(0))
    }

    /// Number of rows with a valid value.
    pub fn valid_count(&self) -> Count {
        self.counts.sum()
    }

    /// Number of rows with a missing value.
    pub fn missing_count(&self) -> Count {
        self.missing_count
    }
}
