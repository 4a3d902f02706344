//! Main double-pendulum environment implementing the swingup-core
//! Environment trait.
//!
//! One step: route actions to actuator torque targets, integrate the
//! articulation for the configured substeps, refresh the observation
//! buffer, then evaluate reward / success / termination per row from that
//! buffer so every consumer of the step sees identical values.

use swingup_core::{Environment, LogData, ResetMask, StepResult};

use crate::config::{ActuationMode, DoublePendulumConfig};
use crate::observation::{self, normalize_angle, OBS_SIZE};
use crate::reward;
use crate::state::DoublePendulumState;
use crate::termination;

/// Episode metrics for the swing-up task.
#[derive(Clone, Debug, Default)]
pub struct SwingUpLog {
    /// Total reward accumulated across completed episodes.
    pub total_reward: f32,
    /// Number of completed episodes.
    pub episode_count: u32,
    /// Total steps across completed episodes.
    pub total_steps: u32,
    /// Completed episodes that ended with sustained stability at the goal.
    pub sustained_episodes: u32,
}

impl LogData for SwingUpLog {
    fn merge(&mut self, other: &Self) {
        self.total_reward += other.total_reward;
        self.episode_count += other.episode_count;
        self.total_steps += other.total_steps;
        self.sustained_episodes += other.sustained_episodes;
    }

    fn clear(&mut self) {
        self.total_reward = 0.0;
        self.episode_count = 0;
        self.total_steps = 0;
        self.sustained_episodes = 0;
    }

    fn episode_count(&self) -> f32 {
        self.episode_count as f32
    }
}

/// Vectorized double-pendulum swing-up environment.
pub struct DoublePendulum {
    /// Environment configuration
    config: DoublePendulumConfig,
    /// Goal state with angle components normalized into (-pi, pi]
    goal: [f32; 4],
    /// Batch state (SoA layout)
    state: DoublePendulumState,

    // Internal buffers for StepResult
    obs_buffer: Vec<f32>,
    reward_buffer: Vec<f32>,
    terminal_buffer: Vec<u8>,
    truncation_buffer: Vec<u8>,

    /// Step-scoped cache of the success predicate, written once per step
    success_buffer: Vec<bool>,

    /// Physics substeps per control step
    substeps: u32,

    /// Episode metrics
    log: SwingUpLog,
}

impl DoublePendulum {
    /// Create a new environment from a validated configuration.
    pub fn from_config(config: DoublePendulumConfig) -> swingup_core::Result<Self> {
        config.validate()?;

        let num_envs = config.num_envs;
        let substeps = config.physics_substeps();
        let goal = [
            normalize_angle(config.goal_state[0]),
            normalize_angle(config.goal_state[1]),
            config.goal_state[2],
            config.goal_state[3],
        ];

        Ok(Self {
            state: DoublePendulumState::new(num_envs, config.action_dim()),
            obs_buffer: vec![0.0; num_envs * OBS_SIZE],
            reward_buffer: vec![0.0; num_envs],
            terminal_buffer: vec![0; num_envs],
            truncation_buffer: vec![0; num_envs],
            success_buffer: vec![false; num_envs],
            substeps,
            goal,
            log: SwingUpLog::default(),
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DoublePendulumConfig {
        &self.config
    }

    /// Goal state with normalized angle components.
    pub fn goal(&self) -> [f32; 4] {
        self.goal
    }

    /// Get read access to the batch state.
    pub fn state(&self) -> &DoublePendulumState {
        &self.state
    }

    /// Get mutable access to the batch state.
    pub fn state_mut(&mut self) -> &mut DoublePendulumState {
        &mut self.state
    }

    /// Get reference to the episode log.
    pub fn get_log(&self) -> &SwingUpLog {
        &self.log
    }

    /// Clear the episode log.
    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Success flags cached by the last step.
    pub(crate) fn success_flags(&self) -> &[bool] {
        &self.success_buffer
    }

    /// Route the action batch to actuator torque targets.
    ///
    /// A width mismatch against the configured actuation mode is a fatal
    /// configuration error.
    fn apply_actions(&mut self, actions: &[f32]) {
        let dim = self.config.action_dim();
        assert_eq!(
            actions.len(),
            self.config.num_envs * dim,
            "action batch width {} does not match {} rows x {} actions ({:?})",
            actions.len(),
            self.config.num_envs,
            dim,
            self.config.actuation,
        );

        let scale = self.config.torque_scale;
        for idx in 0..self.config.num_envs {
            let base = idx * dim;
            self.state.last_action[base..base + dim].copy_from_slice(&actions[base..base + dim]);
            match self.config.actuation {
                ActuationMode::Acrobot => {
                    self.state.effort_shoulder[idx] = 0.0;
                    self.state.effort_elbow[idx] = actions[base] * scale;
                }
                ActuationMode::Pendubot => {
                    self.state.effort_shoulder[idx] = actions[base] * scale;
                    self.state.effort_elbow[idx] = 0.0;
                }
                ActuationMode::DoublePendulum => {
                    self.state.effort_shoulder[idx] = actions[base] * scale;
                    self.state.effort_elbow[idx] = actions[base + 1] * scale;
                }
            }
        }
    }

    /// Integrate the articulation for one control step.
    fn integrate(&mut self) {
        let dt = self.config.dt_physics();

        #[cfg(feature = "simd")]
        {
            crate::physics::simd::integrate_all_simd(&mut self.state, dt, self.substeps);
        }
        #[cfg(not(feature = "simd"))]
        {
            crate::physics::integrate_all(&mut self.state, dt, self.substeps);
        }
    }

    /// Rewrite the whole observation buffer from the current state.
    fn refresh_observations(&mut self) {
        #[cfg(feature = "simd")]
        {
            crate::observation::simd::write_observations_all_simd(
                &self.state,
                self.config.max_velocity,
                &mut self.obs_buffer,
            );
        }
        #[cfg(not(feature = "simd"))]
        {
            observation::write_observations_all(
                &self.state,
                self.config.max_velocity,
                &mut self.obs_buffer,
            );
        }
    }

    /// Evaluate one row from the freshly written observation buffer.
    fn evaluate_row(&mut self, idx: usize) {
        let base = idx * OBS_SIZE;
        let obs = [
            self.obs_buffer[base],
            self.obs_buffer[base + 1],
            self.obs_buffer[base + 2],
            self.obs_buffer[base + 3],
        ];
        let eval = reward::evaluate_row(&self.config, &self.goal, &obs, self.state.action(idx));
        self.commit_row(idx, eval.reward, eval.success);
    }

    /// Apply a row's step outcome: success cache, stable counter, reward
    /// accumulation, termination flags, and episode logging.
    fn commit_row(&mut self, idx: usize, reward_value: f32, success: bool) {
        self.success_buffer[idx] = success;
        if success {
            self.state.stable_count[idx] += 1;
        } else {
            self.state.stable_count[idx] = 0;
        }

        self.reward_buffer[idx] = reward_value;
        self.state.episode_reward[idx] += reward_value;

        let result = termination::check_termination(&self.state, &self.config, idx);
        self.terminal_buffer[idx] = result.terminal as u8;
        self.truncation_buffer[idx] = result.truncated as u8;

        if result.done() {
            self.log.total_reward += self.state.episode_reward[idx];
            self.log.episode_count += 1;
            self.log.total_steps += self.state.step_count[idx];
            if termination::check_sustained(&self.state, &self.config, idx) {
                self.log.sustained_episodes += 1;
            }
        }
    }

    /// Evaluate all rows.
    fn evaluate_all(&mut self) {
        #[cfg(feature = "simd")]
        {
            let chunks = self.config.num_envs / 8;
            for chunk in 0..chunks {
                let base_idx = chunk * 8;
                let (rewards, success_bits) = reward::simd::evaluate_chunk(
                    &self.config,
                    &self.goal,
                    &self.obs_buffer,
                    &self.state.last_action,
                    base_idx,
                );
                let rewards = rewards.to_array();
                for lane in 0..8 {
                    self.commit_row(base_idx + lane, rewards[lane], (success_bits >> lane) & 1 != 0);
                }
            }

            for idx in chunks * 8..self.config.num_envs {
                self.evaluate_row(idx);
            }
        }
        #[cfg(not(feature = "simd"))]
        {
            for idx in 0..self.config.num_envs {
                self.evaluate_row(idx);
            }
        }
    }

    /// Shared stepping pipeline for the auto-reset and no-reset paths.
    fn step_core(&mut self, actions: &[f32]) {
        self.apply_actions(actions);
        self.integrate();
        for idx in 0..self.config.num_envs {
            self.state.step_count[idx] += 1;
        }
        self.refresh_observations();
        self.evaluate_all();
    }

    /// Reset one row from its seed stream and clear its step-scoped cache.
    fn reset_single_env(&mut self, idx: usize) {
        self.state.reset_env(
            idx,
            self.config.initial_shoulder_angle_range,
            self.config.initial_elbow_angle_range,
        );
        self.success_buffer[idx] = false;
    }
}

impl Environment for DoublePendulum {
    fn num_envs(&self) -> usize {
        self.config.num_envs
    }

    fn observation_size(&self) -> usize {
        OBS_SIZE
    }

    fn action_size(&self) -> usize {
        self.config.action_dim()
    }

    fn reset(&mut self, seed: u64) {
        for idx in 0..self.config.num_envs {
            self.state.rng_seeds[idx] = seed.wrapping_add(idx as u64);
            self.reset_single_env(idx);
            self.reward_buffer[idx] = 0.0;
            self.terminal_buffer[idx] = 0;
            self.truncation_buffer[idx] = 0;
        }
        self.refresh_observations();
    }

    fn step(&mut self, actions: &[f32]) {
        self.step_core(actions);

        let mut any_reset = false;
        for idx in 0..self.config.num_envs {
            if self.terminal_buffer[idx] != 0 || self.truncation_buffer[idx] != 0 {
                self.reset_single_env(idx);
                any_reset = true;
            }
        }

        if any_reset {
            self.refresh_observations();
        }
    }

    fn write_observations(&self, buffer: &mut [f32]) {
        assert_eq!(buffer.len(), self.obs_buffer.len());
        buffer.copy_from_slice(&self.obs_buffer);
    }

    fn write_rewards(&self, buffer: &mut [f32]) {
        assert_eq!(buffer.len(), self.reward_buffer.len());
        buffer.copy_from_slice(&self.reward_buffer);
    }

    fn write_terminals(&self, buffer: &mut [u8]) {
        assert_eq!(buffer.len(), self.terminal_buffer.len());
        buffer.copy_from_slice(&self.terminal_buffer);
    }

    fn write_truncations(&self, buffer: &mut [u8]) {
        assert_eq!(buffer.len(), self.truncation_buffer.len());
        buffer.copy_from_slice(&self.truncation_buffer);
    }

    // ========================================================================
    // Non-auto-reset API for value-based RL
    // ========================================================================

    fn step_no_reset(&mut self, actions: &[f32]) {
        self.step_core(actions);
    }

    fn step_no_reset_with_result(&mut self, actions: &[f32]) -> StepResult<'_> {
        self.step_no_reset(actions);

        StepResult {
            observations: &self.obs_buffer,
            rewards: &self.reward_buffer,
            terminals: &self.terminal_buffer,
            truncations: &self.truncation_buffer,
            num_envs: self.config.num_envs,
            obs_size: OBS_SIZE,
        }
    }

    fn reset_envs(&mut self, mask: &ResetMask, seed: u64) {
        assert_eq!(
            mask.num_envs(),
            self.config.num_envs,
            "reset mask covers {} rows, environment has {}",
            mask.num_envs(),
            self.config.num_envs,
        );
        if !mask.any() {
            return;
        }

        for idx in mask.iter_set() {
            self.state.rng_seeds[idx] = seed.wrapping_add(idx as u64);
            self.reset_single_env(idx);
            self.reward_buffer[idx] = 0.0;
            self.terminal_buffer[idx] = 0;
            self.truncation_buffer[idx] = 0;

            let start = idx * OBS_SIZE;
            observation::write_observation(
                &self.state,
                self.config.max_velocity,
                idx,
                &mut self.obs_buffer[start..start + OBS_SIZE],
            );
        }
    }

    fn supports_no_reset(&self) -> bool {
        true
    }
}
