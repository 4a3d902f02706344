//! Swingup Core - Traits for vectorized swing-up RL environments.
//!
//! This crate provides the interface between batched task environments and
//! the RL training side:
//!
//! - [`Environment`] - Trait for implementing vectorized environments
//! - [`StepResult`] - Zero-copy step result for efficient data access
//! - [`ResetMask`] - Packed bitmask for selective environment reset
//! - [`LogData`] - Trait for environment metrics tracking

pub mod env;
pub mod error;

pub use env::{Environment, LogData, ResetMask, StepResult};
pub use error::{Result, SwingUpError};
