//! Fuzz run configuration

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fuzz test configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzConfig {
    /// Number of test cases to run
    pub cases: u32,
    /// Maximum shrink iterations on failure
    pub max_shrink_iters: u32,
    /// Fail the run after this many rejected (filtered) cases
    pub max_global_rejects: u32,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
            max_global_rejects: 4096,
        }
    }
}

impl FuzzConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cases(mut self, n: u32) -> Self {
        self.cases = n;
        self
    }

    pub fn max_shrink_iters(mut self, n: u32) -> Self {
        self.max_shrink_iters = n;
        self
    }

    /// Generate proptest config from this
    pub fn to_proptest_config(&self) -> proptest::test_runner::Config {
        debug!("Fuzz config: {:?}", self);
        proptest::test_runner::Config {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            max_global_rejects: self.max_global_rejects,
            ..proptest::test_runner::Config::default()
        }
    }
}
