//! Core data types shared by the split search and the clustering scorer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Index of a nominal value of an attribute (`0..k`).
pub type ValueIndex = usize;

/// Index of a class label (`0..num_classes`).
pub type ClassIndex = usize;

/// Row count type. Counts are weighted, so they are floating point.
pub type Count = f64;

/// Bit mask over nominal values; bit `i` set means value `i` is in the left partition.
pub type GrayCode = u64;

/// One side of a binary nominal split.
///
/// By convention the search starts with every value on the right and
/// moves values to the left, so `Right` is the "everything else" side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Partition {
    /// Values whose bit is set in the partition mask
    Left,
    /// All remaining values
    Right,
}

impl Partition {
    /// Number of partitions of a binary split.
    pub const COUNT: usize = 2;

    /// Position of this partition in per-partition arrays.
    pub fn index(self) -> usize {
        match self {
            Partition::Left => 0,
            Partition::Right => 1,
        }
    }

    /// The opposite side.
    pub fn other(self) -> Partition {
        match self {
            Partition::Left => Partition::Right,
            Partition::Right => Partition::Left,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Left => write!(f, "left"),
            Partition::Right => write!(f, "right"),
        }
    }
}

/// Selects one of the built-in split quality measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityMeasureType {
    /// Weighted Gini impurity of the partitions (lower is better)
    Gini,
    /// Information gain normalized by split information (higher is better)
    GainRatio,
}

impl Default for QualityMeasureType {
    fn default() -> Self {
        QualityMeasureType::GainRatio
    }
}

impl fmt::Display for QualityMeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityMeasureType::Gini => write!(f, "gini"),
            QualityMeasureType::GainRatio => write!(f, "gain_ratio"),
        }
    }
}

impl FromStr for QualityMeasureType {
    type Err = crate::core::error::SplitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gini" => Ok(QualityMeasureType::Gini),
            "gain_ratio" | "gainratio" | "gain-ratio" => Ok(QualityMeasureType::GainRatio),
            other => Err(crate::core::error::SplitError::invalid_parameter(
                "quality_measure",
                other,
                "expected one of: gini, gain_ratio",
            )),
        }
    }
}
