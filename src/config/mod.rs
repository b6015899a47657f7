//! Configuration management for the split search.
//!
//! Settings can come from defaults, a `.toml`/`.json` file, environment
//! variables, or the fluent [`ConfigBuilder`]. All paths end in the same
//! validation.

pub mod core;

pub use self::core::{ConfigBuilder, SplitSearchConfig};

/// Conventional configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "nominal_partition.toml";
