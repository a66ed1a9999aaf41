//! Error types for dwellport

use thiserror::Error;

/// Errors reported by the gaze-dwell controller and its configuration.
///
/// Raycast misses, untracked hands and absent visuals are not errors: they are
/// ordinary state transitions of the controller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DwellError {
    #[error("Missing dependency: {0}")]
    MissingDependency(&'static str),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("A teleport transition is in progress")]
    TransitionInProgress,
}

pub type Result<T> = std::result::Result<T, DwellError>;
