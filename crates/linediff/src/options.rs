//! Configuration options for the diff engine.
//!
//! This module provides the `DiffOptions` struct which controls the
//! equivalence rules used when comparing lines, whether character level
//! detail is computed, and how much wall-clock time a single diff may use.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::DiffError;

/// Default budget for a single diff computation.
pub const DEFAULT_MAX_COMPUTATION_TIME: Duration = Duration::from_millis(5000);

/// Configuration options for a diff computation.
///
/// Options are immutable once handed to a [`DiffEngine`](crate::DiffEngine);
/// use the builder-style setters to derive a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffOptions {
    /// Trim leading/trailing whitespace before comparing.
    /// Interior whitespace differences still count as changes.
    pub ignore_whitespace: bool,

    /// Compare lines case-insensitively.
    pub ignore_case: bool,

    /// Compute character level changes for modified lines.
    pub compute_char_changes: bool,

    /// Wall-clock budget for the whole computation. Must be non-zero.
    pub max_computation_time: Duration,

    /// Run the boundary heuristics over the raw edit scripts.
    pub post_process: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            ignore_whitespace: false,
            ignore_case: false,
            compute_char_changes: true,
            max_computation_time: DEFAULT_MAX_COMPUTATION_TIME,
            post_process: true,
        }
    }
}

impl DiffOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether leading/trailing whitespace is ignored.
    #[must_use]
    pub fn ignore_whitespace(mut self, ignore: bool) -> Self {
        self.ignore_whitespace = ignore;
        self
    }

    /// Set whether case is ignored.
    #[must_use]
    pub fn ignore_case(mut self, ignore: bool) -> Self {
        self.ignore_case = ignore;
        self
    }

    /// Set whether character level changes are computed.
    #[must_use]
    pub fn compute_char_changes(mut self, compute: bool) -> Self {
        self.compute_char_changes = compute;
        self
    }

    /// Set the time budget.
    #[must_use]
    pub fn max_computation_time(mut self, budget: Duration) -> Self {
        self.max_computation_time = budget;
        self
    }

    /// Set whether the post-processing heuristics run.
    #[must_use]
    pub fn post_process(mut self, enabled: bool) -> Self {
        self.post_process = enabled;
        self
    }

    /// Check that the options describe a meaningful computation.
    pub fn validate(&self) -> Result<(), DiffError> {
        if self.max_computation_time.is_zero() {
            return Err(DiffError::InvalidConfiguration(
                "max_computation_time must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
