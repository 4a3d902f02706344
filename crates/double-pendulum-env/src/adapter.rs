//! Trainer-facing adapter for the double-pendulum environment.
//!
//! Wraps [`DoublePendulum`] with owned-data step results, index-based
//! selective reset, and the agent-keyed step view the training side
//! expects: all per-step tensors for this task belong to the single agent
//! `"pendulum"`.

use swingup_core::{Environment, ResetMask};

use crate::config::DoublePendulumConfig;
use crate::env::DoublePendulum;
use crate::observation::OBS_SIZE;

/// Agent identifier for every batch exposed by this task.
pub const AGENT_ID: &str = "pendulum";

/// Simple owned step result.
#[derive(Debug, Clone)]
pub struct DoublePendulumStepResult {
    /// Rewards for each row
    pub rewards: Vec<f32>,
    /// Done flags (terminal or truncated)
    pub dones: Vec<bool>,
    /// True terminal flags (not truncation)
    pub terminals: Vec<bool>,
}

/// Per-step batch tensors keyed to one agent.
#[derive(Debug, Clone)]
pub struct AgentStep {
    /// Agent the batches belong to
    pub agent_id: &'static str,
    /// Flat observation batch [n_envs * 4]
    pub observations: Vec<f32>,
    /// Reward batch [n_envs]
    pub rewards: Vec<f32>,
    /// Done batch [n_envs]
    pub dones: Vec<bool>,
    /// Time-out batch [n_envs]
    pub time_outs: Vec<bool>,
}

/// Wrapper for the double-pendulum environment with a simplified interface.
pub struct DoublePendulumEnvWrapper {
    env: DoublePendulum,
    /// Number of rows
    pub n_envs: usize,
    /// Observation size per row
    pub obs_size: usize,
    /// Action width per row
    pub action_dim: usize,
    /// Seed stream for index-based selective resets
    reset_seed: u64,
}

impl DoublePendulumEnvWrapper {
    /// Create a wrapper from configuration; all rows are reset on creation
    /// so observations are immediately available.
    pub fn from_config(config: DoublePendulumConfig) -> swingup_core::Result<Self> {
        let n_envs = config.num_envs;
        let action_dim = config.action_dim();
        let mut env = DoublePendulum::from_config(config)?;
        env.reset(0);

        Ok(Self {
            env,
            n_envs,
            obs_size: OBS_SIZE,
            action_dim,
            reset_seed: 0,
        })
    }

    /// Create with the default (acrobot) configuration.
    pub fn new(n_envs: usize) -> swingup_core::Result<Self> {
        Self::from_config(DoublePendulumConfig::new(n_envs))
    }

    /// Create from a registered task name.
    pub fn for_task(name: &str, n_envs: usize) -> Option<swingup_core::Result<Self>> {
        crate::config::for_task(name, n_envs).map(Self::from_config)
    }

    /// Agent identifiers exposed by this task.
    pub fn agents() -> &'static [&'static str] {
        &[AGENT_ID]
    }

    /// Get reference to the underlying environment.
    pub fn inner(&self) -> &DoublePendulum {
        &self.env
    }

    /// Get mutable reference to the underlying environment.
    pub fn inner_mut(&mut self) -> &mut DoublePendulum {
        &mut self.env
    }

    /// Write current observations to a buffer.
    pub fn write_observations(&self, buffer: &mut [f32]) {
        self.env.write_observations(buffer);
    }

    /// Step with a flat continuous action batch.
    ///
    /// Uses the non-auto-reset API so terminal flags and observations
    /// survive; call [`reset_envs`](Self::reset_envs) afterwards.
    pub fn step(&mut self, actions: &[f32]) -> DoublePendulumStepResult {
        let result = self.env.step_no_reset_with_result(actions);

        let terminals: Vec<bool> = result.terminals.iter().map(|&t| t != 0).collect();
        let truncations: Vec<bool> = result.truncations.iter().map(|&t| t != 0).collect();
        let dones: Vec<bool> = terminals
            .iter()
            .zip(truncations.iter())
            .map(|(&t, &tr)| t || tr)
            .collect();

        DoublePendulumStepResult {
            rewards: result.rewards.to_vec(),
            dones,
            terminals,
        }
    }

    /// Step and return the per-agent batch view: observation, reward, done,
    /// and time-out tensors keyed to [`AGENT_ID`].
    pub fn step_agent(&mut self, actions: &[f32]) -> AgentStep {
        let result = self.env.step_no_reset_with_result(actions);

        let time_outs: Vec<bool> = result.truncations.iter().map(|&t| t != 0).collect();
        let dones: Vec<bool> = result
            .terminals
            .iter()
            .zip(result.truncations.iter())
            .map(|(&t, &tr)| t != 0 || tr != 0)
            .collect();

        AgentStep {
            agent_id: AGENT_ID,
            observations: result.observations.to_vec(),
            rewards: result.rewards.to_vec(),
            dones,
            time_outs,
        }
    }

    /// Reset specific rows by index.
    ///
    /// Indices outside [0, n_envs) are a fatal precondition violation.
    pub fn reset_envs(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }

        let mut mask = ResetMask::new(self.n_envs);
        for &idx in indices {
            assert!(
                idx < self.n_envs,
                "reset index {} out of range (n_envs = {})",
                idx,
                self.n_envs,
            );
            mask.set(idx);
        }

        self.reset_seed = self.reset_seed.wrapping_add(0x9E37_79B9_7F4A_7C15);
        self.env.reset_envs(&mask, self.reset_seed);
    }

    /// Reset all rows.
    pub fn reset_all(&mut self, seed: u64) {
        self.env.reset(seed);
    }
}

/// Convenience constructor with the default configuration.
pub fn create_double_pendulum(n_envs: usize) -> swingup_core::Result<DoublePendulumEnvWrapper> {
    DoublePendulumEnvWrapper::new(n_envs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_creation() {
        let wrapper = DoublePendulumEnvWrapper::new(8).unwrap();
        assert_eq!(wrapper.n_envs, 8);
        assert_eq!(wrapper.obs_size, 4);
        assert_eq!(wrapper.action_dim, 1);
    }

    #[test]
    fn test_wrapper_step() {
        let mut wrapper = DoublePendulumEnvWrapper::new(4).unwrap();
        wrapper.reset_all(42);

        let result = wrapper.step(&[0.5, -0.5, 0.0, 1.0]);
        assert_eq!(result.rewards.len(), 4);
        assert_eq!(result.dones.len(), 4);
        assert_eq!(result.terminals.len(), 4);
    }

    #[test]
    fn test_agent_step_keyed_to_pendulum() {
        let mut wrapper = DoublePendulumEnvWrapper::new(2).unwrap();
        wrapper.reset_all(7);

        let step = wrapper.step_agent(&[0.0, 0.0]);
        assert_eq!(step.agent_id, AGENT_ID);
        assert_eq!(step.observations.len(), 2 * 4);
        assert_eq!(step.rewards.len(), 2);
        assert_eq!(step.dones.len(), 2);
        assert_eq!(step.time_outs.len(), 2);
        assert_eq!(DoublePendulumEnvWrapper::agents(), &["pendulum"]);
    }

    #[test]
    fn test_wrapper_for_task() {
        let wrapper = DoublePendulumEnvWrapper::for_task("pendubot-swingup", 4)
            .unwrap()
            .unwrap();
        assert_eq!(wrapper.action_dim, 1);

        assert!(DoublePendulumEnvWrapper::for_task("no-such-task", 4).is_none());
    }

    #[test]
    #[should_panic(expected = "reset index")]
    fn test_reset_envs_out_of_range_is_fatal() {
        let mut wrapper = DoublePendulumEnvWrapper::new(4).unwrap();
        wrapper.reset_envs(&[4]);
    }

    #[test]
    fn test_reset_envs_changes_only_selected() {
        let mut wrapper = DoublePendulumEnvWrapper::new(4).unwrap();
        wrapper.reset_all(42);
        wrapper.step(&[1.0; 4]);

        let untouched_pos = wrapper.inner().state().joint_pos(1);
        let untouched_steps = wrapper.inner().state().step_count[1];
        wrapper.reset_envs(&[0, 2]);

        assert_eq!(wrapper.inner().state().joint_pos(1), untouched_pos);
        assert_eq!(wrapper.inner().state().step_count[1], untouched_steps);
        assert_eq!(wrapper.inner().state().step_count[0], 0);
        assert_eq!(wrapper.inner().state().step_count[2], 0);
    }
}
