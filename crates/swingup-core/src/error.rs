//! Error types for the swing-up environment crates.

use std::fmt;

/// Result type for environment operations.
pub type Result<T> = std::result::Result<T, SwingUpError>;

/// Error types that can occur when building or driving an environment.
#[derive(Debug, Clone)]
pub enum SwingUpError {
    /// Invalid configuration (num_envs = 0, bad frequencies, etc.)
    InvalidConfig {
        param: String,
        message: String,
    },
    /// Buffer size mismatch on a write_* call
    BufferSizeMismatch {
        expected: usize,
        actual: usize,
    },
    /// Action batch width does not match the configured actuation mode
    ActionDimensionMismatch {
        expected: usize,
        actual: usize,
    },
    /// Environment index outside [0, num_envs)
    InvalidEnvIndex {
        index: usize,
        num_envs: usize,
    },
    /// Internal error (should not happen in correct usage)
    Internal(String),
}

impl fmt::Display for SwingUpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { param, message } => {
                write!(f, "Invalid configuration for '{}': {}", param, message)
            }
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "Buffer size mismatch: expected {}, got {}", expected, actual)
            }
            Self::ActionDimensionMismatch { expected, actual } => {
                write!(f, "Action dimension mismatch: expected {}, got {}", expected, actual)
            }
            Self::InvalidEnvIndex { index, num_envs } => {
                write!(f, "Environment index {} out of range (num_envs = {})", index, num_envs)
            }
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SwingUpError {}
