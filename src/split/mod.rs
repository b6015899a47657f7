//! Nominal binary split search.
//!
//! - [`gray_code`]: Gray code subset enumeration and mask helpers
//! - [`histogram`]: Per-value class counts of one attribute
//! - [`quality`]: Built-in split quality measures
//! - [`nominal`]: Exact and heuristic search for one attribute
//! - [`finder`]: Best split across attributes

pub mod finder;
pub mod gray_code;
pub mod histogram;
pub mod nominal;
pub mod quality;

pub use finder::{AttributeSplit, NominalSplitFinder};
pub use gray_code::{mask_to_partitioning, partitioning_to_mask, value_in_mask, GrayCodeCounter};
pub use histogram::NominalValueHistogram;
pub use nominal::{NominalBinarySplitSearch, NominalSplit, SearchStrategy};
pub use quality::{GainRatio, GiniIndex, QualityMeasure};
