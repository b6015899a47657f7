//! Clustering evaluation metrics.
//!
//! ```rust
//! use nominal_partition::metrics::ClusterEntropyScorer;
//! use std::collections::{HashMap, HashSet};
//!
//! # fn main() -> nominal_partition::Result<()> {
//! let reference = HashMap::from([("a", 1), ("b", 1), ("c", 2), ("d", 2)]);
//! let clustering: HashMap<&str, HashSet<&str>> = HashMap::from([
//!     ("X", HashSet::from(["a", "b"])),
//!     ("Y", HashSet::from(["c", "d"])),
//! ]);
//!
//! let scorer = ClusterEntropyScorer::new(&reference);
//! assert_eq!(scorer.aggregate_entropy(&clustering)?, 0.0);
//! assert_eq!(scorer.aggregate_quality(&clustering)?, 1.0);
//! # Ok(())
//! # }
//! ```

pub mod entropy;

pub use entropy::{
    aggregate_entropy, aggregate_quality, entropy_of_cluster, ClusterEntropyReport,
    ClusterEntropyRow, ClusterEntropyScorer,
};
