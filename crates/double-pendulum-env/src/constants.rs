//! Link constants and task defaults for the double-pendulum swing-up task.
//!
//! Link parameters follow the classic two-link benchmark: unit masses and
//! lengths, center of mass at mid-link, unit link inertia.

use std::f32::consts::PI;

// ============================================================================
// Physical Properties
// ============================================================================

/// Mass of the first (shoulder) link (kg)
pub const M1: f32 = 1.0;

/// Mass of the second (elbow) link (kg)
pub const M2: f32 = 1.0;

/// Length of the first link (m)
pub const L1: f32 = 1.0;

/// Length of the second link (m)
pub const L2: f32 = 1.0;

/// Center-of-mass distance of the first link (m)
pub const LC1: f32 = 0.5;

/// Center-of-mass distance of the second link (m)
pub const LC2: f32 = 0.5;

/// Moment of inertia of the first link (kg*m^2)
pub const I1: f32 = 1.0;

/// Moment of inertia of the second link (kg*m^2)
pub const I2: f32 = 1.0;

/// Gravitational acceleration (m/s^2)
pub const G: f32 = 9.8;

/// Shoulder angular velocity clamp for integration stability (rad/s)
pub const MAX_SHOULDER_SPEED: f32 = 4.0 * PI;

/// Elbow angular velocity clamp for integration stability (rad/s)
pub const MAX_ELBOW_SPEED: f32 = 9.0 * PI;

// ============================================================================
// Default Simulation Parameters
// ============================================================================

/// Default physics frequency (Hz)
pub const DEFAULT_PHYSICS_FREQ: u32 = 120;

/// Default control frequency (Hz)
pub const DEFAULT_CTRL_FREQ: u32 = 60;

/// Default episode length (seconds); 900 control steps at 60 Hz
pub const DEFAULT_EPISODE_LENGTH_S: f32 = 15.0;

/// Default joint position after reset, before random offsets (rad)
pub const DEFAULT_JOINT_POS: f32 = 0.0;

/// Default joint velocity after reset (rad/s)
pub const DEFAULT_JOINT_VEL: f32 = 0.0;

// ============================================================================
// Default Task Parameters
// ============================================================================

/// Normalized action to joint torque scale (N*m)
pub const DEFAULT_TORQUE_SCALE: f32 = 10.0;

/// Swing-up goal: shoulder inverted, elbow straight, at rest
pub const DEFAULT_GOAL_STATE: [f32; 4] = [-PI, 0.0, 0.0, 0.0];

/// Quadratic cost weights for [shoulder angle, elbow angle, shoulder vel, elbow vel]
pub const DEFAULT_STATE_WEIGHTS: [f32; 4] = [1.0, 2.0, 0.1, 0.1];

/// Control cost weight
pub const DEFAULT_ACTION_WEIGHT: f32 = 0.1;

/// Overall cost scale
pub const DEFAULT_REWARD_SCALE: f32 = 1.0;

/// Per-step time penalty
pub const DEFAULT_TIME_PENALTY: f32 = 0.01;

/// Bonus reward while within the success threshold
pub const DEFAULT_BONUS_REWARD: f32 = 20.0;

/// Joint velocity normalization bound for observations (rad/s)
pub const DEFAULT_MAX_VELOCITY: f32 = 5.0;

/// State-error norm below which a row counts as at the goal
pub const DEFAULT_SUCCESS_THRESHOLD: f32 = 0.1;

/// Consecutive in-threshold steps required for sustained stability
pub const DEFAULT_SUSTAIN_STEPS: u32 = 10;

/// Initial angle sampling range, multiplied by pi at reset time
pub const DEFAULT_INIT_ANGLE_RANGE: [f32; 2] = [-1.0, 1.0];

/// Scale of the tanh angle-distance shaping term
pub const ANGLE_SHAPING_SCALE: f32 = 0.01;
