//! Limits and configuration defaults used throughout the crate.

use static_assertions::const_assert;

/// Maximum number of nominal values a Gray-code mask can encode.
///
/// One bit per value in a `u64`; the top bit is left free so that the
/// increment counter can reach `2^length` without overflowing.
pub const MAX_GRAY_CODE_BITS: usize = 63;

/// Default minimum number of rows each partition must hold.
pub const DEFAULT_MIN_PARTITION_SIZE: f64 = 2.0;

/// Default upper bound on distinct values for the exhaustive search.
/// Attributes with more values fall back to greedy forward selection.
pub const DEFAULT_MAX_VALUES_FOR_EXACT_SEARCH: usize = 10;

/// Exhaustive search thresholds above this value are accepted but logged,
/// since `2^(k-1)` evaluations quickly become prohibitive.
pub const EXACT_SEARCH_WARNING_THRESHOLD: usize = 24;

/// Default number of threads for the multi-attribute search.
/// 0 means use all available cores.
pub const DEFAULT_NUM_THREADS: usize = 0;

/// Tolerance used when checking that partition weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NOMINAL_PARTITION_";

/// Crate version string.
pub const NOMINAL_PARTITION_VERSION: &str = env!("CARGO_PKG_VERSION");

const_assert!(MAX_GRAY_CODE_BITS < u64::BITS as usize);
const_assert!(DEFAULT_MAX_VALUES_FOR_EXACT_SEARCH <= MAX_GRAY_CODE_BITS);
const_assert!(EXACT_SEARCH_WARNING_THRESHOLD <= MAX_GRAY_CODE_BITS);
