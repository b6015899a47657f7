//! Search configuration and its builder.
//!
//! A [`SplitSearchConfig`] carries the two tuning parameters of the
//! nominal binary split search plus the choice of built-in quality measure
//! and the thread budget of the multi-attribute finder. It can be built
//! fluently, read from `.toml`/`.json` files, or overridden from the
//! environment.

use crate::core::constants::*;
use crate::core::error::{Result, SplitError};
use crate::core::traits::Validatable;
use crate::core::types::QualityMeasureType;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Parameters controlling the nominal binary split search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSearchConfig {
    /// Minimum (weighted) row count each of the two partitions must reach
    pub min_partition_size: f64,
    /// Attributes with at most this many values are searched exhaustively
    pub max_values_for_exact_search: usize,
    /// Built-in quality measure used by the finder
    pub quality_measure: QualityMeasureType,
    /// Number of threads for the multi-attribute search (0 = all cores)
    pub num_threads: usize,
}

impl Default for SplitSearchConfig {
    fn default() -> Self {
        SplitSearchConfig {
            min_partition_size: DEFAULT_MIN_PARTITION_SIZE,
            max_values_for_exact_search: DEFAULT_MAX_VALUES_FOR_EXACT_SEARCH,
            quality_measure: QualityMeasureType::default(),
            num_threads: DEFAULT_NUM_THREADS,
        }
    }
}

impl SplitSearchConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.toml` or `.json` file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SplitError::config(format!("Failed to read config file: {}", e)))?;

        let config: SplitSearchConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(SplitError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a `.toml` or `.json` file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| SplitError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(SplitError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)
            .map_err(|e| SplitError::config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Load configuration from `NOMINAL_PARTITION_*` environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = SplitSearchConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Override fields from any `NOMINAL_PARTITION_*` environment variables that are set
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        const ENV_KEYS: [(&str, &str); 4] = [
            ("MIN_PARTITION_SIZE", "min_partition_size"),
            ("MAX_EXACT_VALUES", "max_values_for_exact_search"),
            ("QUALITY_MEASURE", "quality_measure"),
            ("NUM_THREADS", "num_threads"),
        ];

        for (suffix, key) in ENV_KEYS {
            let var = format!("{}{}", ENV_PREFIX, suffix);
            if let Ok(value) = std::env::var(&var) {
                self.set_parameter(key, &value)
                    .map_err(|_| SplitError::config(format!("Invalid {}: {}", var, value)))?;
            }
        }

        self.validate()
    }

    /// Build a configuration from string key-value pairs. Unknown keys are logged and ignored.
    pub fn from_parameter_map(map: &HashMap<String, String>) -> Result<Self> {
        let mut config = SplitSearchConfig::default();
        for (key, value) in map {
            config.set_parameter(key, value)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Convert the configuration to string key-value pairs
    pub fn as_parameter_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert(
            "min_partition_size".to_string(),
            self.min_partition_size.to_string(),
        );
        map.insert(
            "max_values_for_exact_search".to_string(),
            self.max_values_for_exact_search.to_string(),
        );
        map.insert(
            "quality_measure".to_string(),
            self.quality_measure.to_string(),
        );
        map.insert("num_threads".to_string(), self.num_threads.to_string());
        map
    }

    fn set_parameter(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "min_partition_size" => {
                self.min_partition_size = value.trim().parse().map_err(|_| {
                    SplitError::config(format!("Invalid min_partition_size: {}", value))
                })?;
            }
            "max_values_for_exact_search" => {
                self.max_values_for_exact_search = value.trim().parse().map_err(|_| {
                    SplitError::config(format!("Invalid max_values_for_exact_search: {}", value))
                })?;
            }
            "quality_measure" => {
                self.quality_measure = value.parse()?;
            }
            "num_threads" => {
                self.num_threads = value.trim().parse().map_err(|_| {
                    SplitError::config(format!("Invalid num_threads: {}", value))
                })?;
            }
            _ => {
                log::warn!("Unknown configuration parameter: {}", key);
            }
        }
        Ok(())
    }

    /// Get the effective number of threads (0 means use all available cores)
    pub fn effective_num_threads(&self) -> usize {
        if self.num_threads == 0 {
            num_cpus::get()
        } else {
            self.num_threads
        }
    }

    /// True if an attribute with `num_values` values is searched exhaustively
    pub fn uses_exact_search(&self, num_values: usize) -> bool {
        num_values <= self.max_values_for_exact_search
    }
}

impl Validatable for SplitSearchConfig {
    fn validate(&self) -> Result<()> {
        if !self.min_partition_size.is_finite() || self.min_partition_size < 0.0 {
            return Err(SplitError::invalid_parameter(
                "min_partition_size",
                self.min_partition_size.to_string(),
                "must be a finite value >= 0",
            ));
        }

        if self.max_values_for_exact_search == 0 {
            return Err(SplitError::invalid_parameter(
                "max_values_for_exact_search",
                "0",
                "must be at least 1",
            ));
        }

        if self.num_threads > num_cpus::get() * 2 {
            log::warn!(
                "num_threads ({}) is much larger than available cores ({})",
                self.num_threads,
                num_cpus::get()
            );
        }

        for warning in self.validation_warnings() {
            log::warn!("{}", warning);
        }

        Ok(())
    }

    fn validation_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.max_values_for_exact_search > EXACT_SEARCH_WARNING_THRESHOLD {
            warnings.push(format!(
                "max_values_for_exact_search ({}) allows up to 2^{} subset evaluations per attribute",
                self.max_values_for_exact_search,
                self.max_values_for_exact_search.min(MAX_GRAY_CODE_BITS) - 1
            ));
        }
        warnings
    }
}

/// Configuration builder for fluent configuration creation
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: SplitSearchConfig,
    validation_errors: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        ConfigBuilder {
            config: SplitSearchConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the minimum partition size
    pub fn min_partition_size(mut self, size: f64) -> Self {
        if !size.is_finite() || size < 0.0 {
            self.validation_errors
                .push("min_partition_size must be a finite value >= 0".to_string());
        }
        self.config.min_partition_size = size;
        self
    }

    /// Set the exhaustive search threshold
    pub fn max_values_for_exact_search(mut self, max_values: usize) -> Self {
        if max_values == 0 {
            self.validation_errors
                .push("max_values_for_exact_search must be at least 1".to_string());
        }
        self.config.max_values_for_exact_search = max_values;
        self
    }

    /// Set the quality measure
    pub fn quality_measure(mut self, measure: QualityMeasureType) -> Self {
        self.config.quality_measure = measure;
        self
    }

    /// Set the number of threads
    pub fn num_threads(mut self, threads: usize) -> Self {
        self.config.num_threads = threads;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SplitSearchConfig> {
        if !self.validation_errors.is_empty() {
            return Err(SplitError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = SplitSearchConfig::default();
        assert_eq!(config.min_partition_size, DEFAULT_MIN_PARTITION_SIZE);
        assert_eq!(
            config.max_values_for_exact_search,
            DEFAULT_MAX_VALUES_FOR_EXACT_SEARCH
        );
        assert_eq!(config.quality_measure, QualityMeasureType::GainRatio);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SplitSearchConfig::default();

        config.min_partition_size = -1.0;
        assert!(config.validate().is_err());

        config.min_partition_size = f64::NAN;
        assert!(config.validate().is_err());

        config.min_partition_size = 0.0;
        config.max_values_for_exact_search = 0;
        assert!(config.validate().is_err());

        config.max_values_for_exact_search = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_large_exact_threshold_warns() {
        let mut config = SplitSearchConfig::default();
        config.max_values_for_exact_search = 40;
        assert!(config.validate().is_ok());
        assert_eq!(config.validation_warnings().len(), 1);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .min_partition_size(5.0)
            .max_values_for_exact_search(12)
            .quality_measure(QualityMeasureType::Gini)
            .num_threads(2)
            .build()
            .unwrap();

        assert_eq!(config.min_partition_size, 5.0);
        assert_eq!(config.max_values_for_exact_search, 12);
        assert_eq!(config.quality_measure, QualityMeasureType::Gini);
        assert_eq!(config.effective_num_threads(), 2);
        assert!(config.uses_exact_search(12));
        assert!(!config.uses_exact_search(13));
    }

    #[test]
    fn test_config_builder_validation() {
        let result = ConfigBuilder::new()
            .min_partition_size(-2.0)
            .max_values_for_exact_search(0)
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_parameter_map_round_trip() {
        let config = ConfigBuilder::new()
            .min_partition_size(3.5)
            .quality_measure(QualityMeasureType::Gini)
            .build()
            .unwrap();

        let mut map = config.as_parameter_map();
        assert_eq!(map.get("quality_measure").unwrap(), "gini");

        map.insert("unknown_key".to_string(), "ignored".to_string());
        let parsed = SplitSearchConfig::from_parameter_map(&map).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_parameter_map_rejects_bad_values() {
        let mut map = HashMap::new();
        map.insert("max_values_for_exact_search".to_string(), "many".to_string());
        assert!(SplitSearchConfig::from_parameter_map(&map).is_err());
    }

    // Single test so that no other test observes the variables it sets.
    #[test]
    fn test_environment_overrides() {
        let max_exact = format!("{}MAX_EXACT_VALUES", ENV_PREFIX);
        let measure = format!("{}QUALITY_MEASURE", ENV_PREFIX);
        let min_size = format!("{}MIN_PARTITION_SIZE", ENV_PREFIX);

        std::env::set_var(&max_exact, "6");
        std::env::set_var(&measure, "gini");
        let config = SplitSearchConfig::load_from_environment().unwrap();
        assert_eq!(config.max_values_for_exact_search, 6);
        assert_eq!(config.quality_measure, QualityMeasureType::Gini);
        assert_eq!(config.min_partition_size, DEFAULT_MIN_PARTITION_SIZE);

        std::env::set_var(&min_size, "-1");
        let result = SplitSearchConfig::load_from_environment();
        assert!(matches!(result, Err(SplitError::InvalidParameter { .. })));

        std::env::set_var(&min_size, "small");
        let result = SplitSearchConfig::load_from_environment();
        assert!(matches!(result, Err(SplitError::Config { ref message }) if message.contains(&min_size)));

        std::env::remove_var(&min_size);
        let mut config = SplitSearchConfig {
            num_threads: 3,
            ..SplitSearchConfig::default()
        };
        config.apply_environment_overrides().unwrap();
        assert_eq!(config.num_threads, 3);
        assert_eq!(config.max_values_for_exact_search, 6);

        std::env::remove_var(&max_exact);
        std::env::remove_var(&measure);
    }

    #[test]
    fn test_effective_num_threads() {
        let config = SplitSearchConfig::default();
        assert_eq!(config.effective_num_threads(), num_cpus::get());
    }
}
