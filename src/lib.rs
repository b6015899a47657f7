//! # Nominal Partition
//!
//! Binary split search over the values of nominal (categorical) attributes
//! for decision-tree induction, plus entropy-based scoring of a clustering
//! against a reference clustering.
//!
//! ## Features
//!
//! - **Exact search**: attributes with few values are split optimally by
//!   enumerating value subsets in Gray code order, updating partition sums
//!   one value at a time.
//! - **Heuristic search**: attributes with many values use greedy forward
//!   selection bounded by the number of values.
//! - **Pluggable quality measures**: the search only compares scores through
//!   [`SplitQualityMeasure`]; Gini index and gain ratio are built in.
//! - **Parallel attribute search**: [`NominalSplitFinder`] scores many
//!   attributes on a Rayon thread pool.
//! - **Cluster scoring**: [`ClusterEntropyScorer`] computes per-cluster and
//!   aggregate entropy and a normalized quality in `[0, 1]`.
//!
//! ## Quick Start
//!
//! ```rust
//! use nominal_partition::{GiniIndex, NominalBinarySplitSearch, NominalValueHistogram};
//!
//! # fn main() -> nominal_partition::Result<()> {
//! // class counts per nominal value
//! let histogram = NominalValueHistogram::from_rows(
//!     &[vec![10.0, 0.0], vec![0.0, 10.0], vec![5.0, 5.0]],
//!     0.0,
//! )?;
//!
//! let search = NominalBinarySplitSearch::new(1.0, 10)?;
//! let split = search.search(&histogram, &mut GiniIndex)?;
//!
//! assert!(split.is_valid());
//! assert_eq!(split.left_values(), &[0]);
//! assert_eq!(split.right_values(), &[1, 2]);
//! # Ok(())
//! # }
//! ```
//!
//! ### Configuration
//!
//! ```rust,no_run
//! use nominal_partition::{ConfigBuilder, NominalSplitFinder, QualityMeasureType};
//!
//! # fn main() -> nominal_partition::Result<()> {
//! let config = ConfigBuilder::new()
//!     .min_partition_size(5.0)
//!     .max_values_for_exact_search(12)
//!     .quality_measure(QualityMeasureType::Gini)
//!     .build()?;
//!
//! let finder = NominalSplitFinder::new(config)?;
//! let best = finder.find_best_split_builtin(&[])?;
//! assert!(best.is_none());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Nominal binary split search
pub mod split;

// Clustering evaluation
pub mod metrics;

pub use crate::core::{
    error::{Result, SplitError},
    traits::{SplitQualityMeasure, Validatable},
    types::{ClassIndex, Count, GrayCode, Partition, QualityMeasureType, ValueIndex},
};

pub use config::{ConfigBuilder, SplitSearchConfig};

pub use split::{
    AttributeSplit, GainRatio, GiniIndex, GrayCodeCounter, NominalBinarySplitSearch,
    NominalSplit, NominalSplitFinder, NominalValueHistogram, QualityMeasure, SearchStrategy,
};

pub use metrics::{ClusterEntropyReport, ClusterEntropyRow, ClusterEntropyScorer};

// Version information
pub use crate::core::constants::NOMINAL_PARTITION_VERSION as VERSION;

/// Initialize the library.
///
/// Installs the `env_logger` backend (honouring `RUST_LOG`, default `info`)
/// unless the application already set a logger. Calling it is optional and
/// idempotent.
///
/// ```rust
/// fn main() -> nominal_partition::Result<()> {
///     nominal_partition::init()?;
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    core::is_core_initialized()
}
