//! Double-Pendulum Swing-Up Environment
//!
//! A vectorized double-pendulum (acrobot / pendubot) swing-up task for
//! reinforcement learning, implementing the swingup-core Environment trait.
//!
//! # Features
//!
//! - **SoA batch state**: every state variable lives in its own contiguous
//!   array, one element per row, so thousands of task instances step
//!   together with batched arithmetic
//! - **Three actuation modes**: elbow-only (acrobot), shoulder-only
//!   (pendubot), or both joints actuated
//! - **Shaped swing-up reward**: weighted quadratic state cost, control
//!   cost, time penalty, angle shaping, and a sustained-success bonus
//! - **Non-auto-reset API**: terminal observations survive the step for
//!   value-based RL algorithms
//! - **Optional SIMD**: 8-wide stepping via `std::simd` behind the `simd`
//!   feature (nightly), with a scalar path as the default
//!
//! # Example
//!
//! ```rust,ignore
//! use double_pendulum_env::{DoublePendulumConfig, ActuationMode};
//! use swingup_core::Environment;
//!
//! let config = DoublePendulumConfig::new(4096)
//!     .with_actuation(ActuationMode::Acrobot)
//!     .with_torque_scale(10.0);
//!
//! let mut env = config.build().unwrap();
//! env.reset(42);
//!
//! // One normalized torque command per row in acrobot mode
//! let actions = vec![0.0f32; 4096];
//! env.step(&actions);
//!
//! let mut obs = vec![0.0f32; 4096 * 4];
//! let mut rewards = vec![0.0f32; 4096];
//! env.write_observations(&mut obs);
//! env.write_rewards(&mut rewards);
//! ```

#![cfg_attr(feature = "simd", feature(portable_simd))]

// Core modules
pub mod config;
pub mod constants;
pub mod state;

// Articulation dynamics
pub mod physics;

// Environment components
pub mod env;
pub mod observation;
pub mod reward;
pub mod rng;
pub mod termination;

#[cfg(feature = "simd")]
pub mod simd_helpers;

// Integration adapter
pub mod adapter;

// Test suite
#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use config::{for_task, ActuationMode, DoublePendulumConfig};
pub use constants::{
    DEFAULT_BONUS_REWARD, DEFAULT_GOAL_STATE, DEFAULT_MAX_VELOCITY, DEFAULT_STATE_WEIGHTS,
    DEFAULT_SUCCESS_THRESHOLD, DEFAULT_SUSTAIN_STEPS, DEFAULT_TORQUE_SCALE,
};
pub use env::{DoublePendulum, SwingUpLog};
pub use observation::{normalize_angle, OBS_SIZE};
pub use state::DoublePendulumState;

// Re-export adapter types
pub use adapter::{AgentStep, DoublePendulumEnvWrapper, DoublePendulumStepResult, AGENT_ID};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
