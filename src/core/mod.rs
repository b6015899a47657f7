//! Core infrastructure module.
//!
//! This module provides the foundational components shared by the split
//! search and the clustering scorer:
//!
//! - [`types`]: Fundamental data types and enumerations
//! - [`constants`]: Limits and configuration defaults
//! - [`error`]: Error type and `Result` alias
//! - [`math`]: Entropy and Gini impurity of count distributions
//! - [`traits`]: The split quality measure contract
//!
//! ```rust
//! use nominal_partition::core::{
//!     constants::MAX_GRAY_CODE_BITS,
//!     error::{Result, SplitError},
//!     types::Partition,
//! };
//!
//! fn check(k: usize) -> Result<Partition> {
//!     if k > MAX_GRAY_CODE_BITS {
//!         return Err(SplitError::size_limit(k, MAX_GRAY_CODE_BITS));
//!     }
//!     Ok(Partition::Left)
//! }
//! # assert!(check(64).is_err());
//! ```

pub mod constants;
pub mod error;
pub mod math;
pub mod traits;
pub mod types;

pub use constants::*;
pub use error::{Result, SplitError};
pub use traits::*;
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

static CORE_INIT: Once = Once::new();
static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize logging. Safe to call more than once.
pub fn initialize_core() -> Result<()> {
    CORE_INIT.call_once(|| {
        initialize_logging();
        CORE_INITIALIZED.store(true, Ordering::SeqCst);
        log::debug!(
            "nominal-partition {} initialized (gray code limit: {} values)",
            NOMINAL_PARTITION_VERSION,
            MAX_GRAY_CODE_BITS
        );
    });
    Ok(())
}

/// Check if [`initialize_core`] has run.
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::SeqCst)
}

fn initialize_logging() {
    // RUST_LOG wins if set; otherwise default to info.
    let env = env_logger::Env::default().default_filter_or("info");
    // Ignore the error if the embedding application already installed a logger.
    let _ = env_logger::Builder::from_env(env).try_init();
}
