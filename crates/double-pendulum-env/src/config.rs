//! Configuration types for the double-pendulum environment.
//!
//! All parameters are fixed at construction time; the builder methods
//! return the modified config by value so presets can be chained.

use swingup_core::{Result, SwingUpError};

use crate::constants::*;

// ============================================================================
// Actuation Mode
// ============================================================================

/// Which joint(s) receive the applied torque.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActuationMode {
    /// Only the elbow joint is actuated (acrobot)
    Acrobot,
    /// Only the shoulder joint is actuated (pendubot)
    Pendubot,
    /// Both joints are actuated
    DoublePendulum,
}

impl Default for ActuationMode {
    fn default() -> Self {
        Self::Acrobot
    }
}

impl ActuationMode {
    /// Width of the per-row action vector for this mode.
    #[inline]
    pub fn action_dim(&self) -> usize {
        match self {
            Self::Acrobot | Self::Pendubot => 1,
            Self::DoublePendulum => 2,
        }
    }

    /// Whether the shoulder joint receives torque.
    #[inline]
    pub fn shoulder_actuated(&self) -> bool {
        matches!(self, Self::Pendubot | Self::DoublePendulum)
    }

    /// Whether the elbow joint receives torque.
    #[inline]
    pub fn elbow_actuated(&self) -> bool {
        matches!(self, Self::Acrobot | Self::DoublePendulum)
    }
}

// ============================================================================
// Main Environment Configuration
// ============================================================================

/// Configuration for the double-pendulum swing-up environment.
///
/// # Example
///
/// ```ignore
/// use double_pendulum_env::{ActuationMode, DoublePendulumConfig};
///
/// let config = DoublePendulumConfig::new(4096)
///     .with_actuation(ActuationMode::Pendubot)
///     .with_success_threshold(0.05)
///     .with_sustain_steps(20);
/// let env = config.build()?;
/// ```
#[derive(Clone, Debug)]
pub struct DoublePendulumConfig {
    /// Number of parallel rows
    pub num_envs: usize,
    /// Physics integration frequency (Hz)
    pub physics_freq: u32,
    /// Control frequency (Hz); physics_freq must divide evenly
    pub ctrl_freq: u32,
    /// Episode length (seconds)
    pub episode_length_s: f32,
    /// Actuation mode (selects action width and torque routing)
    pub actuation: ActuationMode,
    /// Normalized action to torque scale (N*m)
    pub torque_scale: f32,
    /// Goal state [shoulder angle, elbow angle, shoulder vel, elbow vel];
    /// angle components are normalized into (-pi, pi] before use
    pub goal_state: [f32; 4],
    /// Quadratic cost weights per state dimension
    pub reward_state_weights: [f32; 4],
    /// Control cost weight
    pub reward_action_weight: f32,
    /// Overall cost scale
    pub reward_scale: f32,
    /// Per-step time penalty
    pub time_penalty: f32,
    /// Bonus added while the error norm is below the success threshold
    pub bonus_reward: f32,
    /// Euclidean state-error norm bound for success
    pub success_threshold: f32,
    /// Consecutive in-threshold steps required for sustained stability
    pub sustain_steps: u32,
    /// Velocity normalization bound for observations (rad/s)
    pub max_velocity: f32,
    /// Shoulder reset offset range, multiplied by pi at sampling time
    pub initial_shoulder_angle_range: [f32; 2],
    /// Elbow reset offset range, multiplied by pi at sampling time
    pub initial_elbow_angle_range: [f32; 2],
    /// Terminate early once stability has been sustained for
    /// `sustain_steps`. Off by default: episodes then run to the time
    /// limit and success only feeds the reward bonus.
    pub early_terminate_on_success: bool,
}

impl Default for DoublePendulumConfig {
    fn default() -> Self {
        Self {
            num_envs: 1,
            physics_freq: DEFAULT_PHYSICS_FREQ,
            ctrl_freq: DEFAULT_CTRL_FREQ,
            episode_length_s: DEFAULT_EPISODE_LENGTH_S,
            actuation: ActuationMode::default(),
            torque_scale: DEFAULT_TORQUE_SCALE,
            goal_state: DEFAULT_GOAL_STATE,
            reward_state_weights: DEFAULT_STATE_WEIGHTS,
            reward_action_weight: DEFAULT_ACTION_WEIGHT,
            reward_scale: DEFAULT_REWARD_SCALE,
            time_penalty: DEFAULT_TIME_PENALTY,
            bonus_reward: DEFAULT_BONUS_REWARD,
            success_threshold: DEFAULT_SUCCESS_THRESHOLD,
            sustain_steps: DEFAULT_SUSTAIN_STEPS,
            max_velocity: DEFAULT_MAX_VELOCITY,
            initial_shoulder_angle_range: DEFAULT_INIT_ANGLE_RANGE,
            initial_elbow_angle_range: DEFAULT_INIT_ANGLE_RANGE,
            early_terminate_on_success: false,
        }
    }
}

impl DoublePendulumConfig {
    /// Create a new configuration with the given number of rows.
    pub fn new(num_envs: usize) -> Self {
        Self {
            num_envs,
            ..Default::default()
        }
    }

    /// Set the actuation mode.
    pub fn with_actuation(mut self, actuation: ActuationMode) -> Self {
        self.actuation = actuation;
        self
    }

    /// Set physics integration frequency.
    pub fn with_physics_freq(mut self, freq: u32) -> Self {
        self.physics_freq = freq;
        self
    }

    /// Set control frequency.
    pub fn with_ctrl_freq(mut self, freq: u32) -> Self {
        self.ctrl_freq = freq;
        self
    }

    /// Set episode length in seconds.
    pub fn with_episode_length(mut self, seconds: f32) -> Self {
        self.episode_length_s = seconds;
        self
    }

    /// Set the torque scale.
    pub fn with_torque_scale(mut self, scale: f32) -> Self {
        self.torque_scale = scale;
        self
    }

    /// Set the goal state.
    pub fn with_goal_state(mut self, goal: [f32; 4]) -> Self {
        self.goal_state = goal;
        self
    }

    /// Set the quadratic state cost weights.
    pub fn with_state_weights(mut self, weights: [f32; 4]) -> Self {
        self.reward_state_weights = weights;
        self
    }

    /// Set the control cost weight.
    pub fn with_action_weight(mut self, weight: f32) -> Self {
        self.reward_action_weight = weight;
        self
    }

    /// Set the overall cost scale.
    pub fn with_reward_scale(mut self, scale: f32) -> Self {
        self.reward_scale = scale;
        self
    }

    /// Set the per-step time penalty.
    pub fn with_time_penalty(mut self, penalty: f32) -> Self {
        self.time_penalty = penalty;
        self
    }

    /// Set the success bonus.
    pub fn with_bonus_reward(mut self, bonus: f32) -> Self {
        self.bonus_reward = bonus;
        self
    }

    /// Set the success threshold.
    pub fn with_success_threshold(mut self, threshold: f32) -> Self {
        self.success_threshold = threshold;
        self
    }

    /// Set the sustain step count.
    pub fn with_sustain_steps(mut self, steps: u32) -> Self {
        self.sustain_steps = steps;
        self
    }

    /// Set the observation velocity normalization bound.
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = max_velocity;
        self
    }

    /// Set the shoulder reset offset range (units of pi).
    pub fn with_shoulder_angle_range(mut self, range: [f32; 2]) -> Self {
        self.initial_shoulder_angle_range = range;
        self
    }

    /// Set the elbow reset offset range (units of pi).
    pub fn with_elbow_angle_range(mut self, range: [f32; 2]) -> Self {
        self.initial_elbow_angle_range = range;
        self
    }

    /// Enable/disable early termination on sustained success.
    pub fn with_early_termination(mut self, enabled: bool) -> Self {
        self.early_terminate_on_success = enabled;
        self
    }

    /// Width of the per-row action vector.
    #[inline]
    pub fn action_dim(&self) -> usize {
        self.actuation.action_dim()
    }

    /// Physics timestep.
    #[inline]
    pub fn dt_physics(&self) -> f32 {
        1.0 / self.physics_freq as f32
    }

    /// Control timestep.
    #[inline]
    pub fn dt_ctrl(&self) -> f32 {
        1.0 / self.ctrl_freq as f32
    }

    /// Physics substeps per control step.
    #[inline]
    pub fn physics_substeps(&self) -> u32 {
        self.physics_freq / self.ctrl_freq
    }

    /// Maximum control steps per episode, derived from episode length.
    #[inline]
    pub fn max_episode_steps(&self) -> u32 {
        (self.episode_length_s * self.ctrl_freq as f32).round() as u32
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_envs == 0 {
            return Err(SwingUpError::InvalidConfig {
                param: "num_envs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if self.physics_freq == 0 || self.ctrl_freq == 0 {
            return Err(SwingUpError::InvalidConfig {
                param: "physics_freq/ctrl_freq".to_string(),
                message: "frequencies must be positive".to_string(),
            });
        }

        if self.physics_freq % self.ctrl_freq != 0 {
            return Err(SwingUpError::InvalidConfig {
                param: "physics_freq".to_string(),
                message: format!(
                    "physics_freq ({}) must be divisible by ctrl_freq ({})",
                    self.physics_freq, self.ctrl_freq
                ),
            });
        }

        if !(self.episode_length_s > 0.0) || self.max_episode_steps() == 0 {
            return Err(SwingUpError::InvalidConfig {
                param: "episode_length_s".to_string(),
                message: "episode must span at least one control step".to_string(),
            });
        }

        if !(self.success_threshold > 0.0) {
            return Err(SwingUpError::InvalidConfig {
                param: "success_threshold".to_string(),
                message: "must be positive".to_string(),
            });
        }

        if self.sustain_steps == 0 {
            return Err(SwingUpError::InvalidConfig {
                param: "sustain_steps".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(self.max_velocity > 0.0) {
            return Err(SwingUpError::InvalidConfig {
                param: "max_velocity".to_string(),
                message: "must be positive".to_string(),
            });
        }

        for (name, range) in [
            ("initial_shoulder_angle_range", &self.initial_shoulder_angle_range),
            ("initial_elbow_angle_range", &self.initial_elbow_angle_range),
        ] {
            if range[0] > range[1] {
                return Err(SwingUpError::InvalidConfig {
                    param: name.to_string(),
                    message: format!("range [{}, {}] is inverted", range[0], range[1]),
                });
            }
        }

        Ok(())
    }

    /// Build the environment.
    pub fn build(self) -> Result<crate::env::DoublePendulum> {
        crate::env::DoublePendulum::from_config(self)
    }
}

// ============================================================================
// Task Registry
// ============================================================================

/// Look up a preset configuration by task name.
///
/// Known tasks: `acrobot-swingup`, `pendubot-swingup`,
/// `double-pendulum-swingup`.
pub fn for_task(name: &str, num_envs: usize) -> Option<DoublePendulumConfig> {
    let actuation = match name {
        "acrobot-swingup" => ActuationMode::Acrobot,
        "pendubot-swingup" => ActuationMode::Pendubot,
        "double-pendulum-swingup" => ActuationMode::DoublePendulum,
        _ => return None,
    };
    Some(DoublePendulumConfig::new(num_envs).with_actuation(actuation))
}
