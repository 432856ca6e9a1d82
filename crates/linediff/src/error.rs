use thiserror::Error;

/// Errors reported by the diff engine.
///
/// Diffing itself is total over arbitrary text; only nonsensical
/// configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// The options cannot describe a meaningful computation
    #[error("invalid diff configuration: {0}")]
    InvalidConfiguration(String),
}
