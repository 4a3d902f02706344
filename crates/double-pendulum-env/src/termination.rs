//! Episode termination and truncation checking.
//!
//! Every row truncates at the episode step limit. Terminal flags stay clear
//! unless `early_terminate_on_success` is set, in which case a row
//! terminates once its stable-step counter has reached `sustain_steps`.
//! Episodes otherwise run to the time limit even while the goal is held;
//! success then only feeds the reward bonus.

use crate::config::DoublePendulumConfig;
use crate::state::DoublePendulumState;

/// Result of the termination check for a single row.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminationResult {
    /// Episode ended by sustained success (only with early termination on)
    pub terminal: bool,
    /// Episode ended by the step limit
    pub truncated: bool,
}

impl TerminationResult {
    /// Episode is done (either terminal or truncated).
    #[inline]
    pub fn done(&self) -> bool {
        self.terminal || self.truncated
    }
}

/// Whether a row has held the goal for the required sustain duration.
#[inline]
pub fn check_sustained(
    state: &DoublePendulumState,
    config: &DoublePendulumConfig,
    idx: usize,
) -> bool {
    state.stable_count[idx] >= config.sustain_steps
}

/// Whether a row has hit the episode step limit.
#[inline]
pub fn check_truncated(
    state: &DoublePendulumState,
    config: &DoublePendulumConfig,
    idx: usize,
) -> bool {
    state.step_count[idx] >= config.max_episode_steps().saturating_sub(1)
}

/// Check both conditions for one row.
#[inline]
pub fn check_termination(
    state: &DoublePendulumState,
    config: &DoublePendulumConfig,
    idx: usize,
) -> TerminationResult {
    TerminationResult {
        terminal: config.early_terminate_on_success && check_sustained(state, config, idx),
        truncated: check_truncated(state, config, idx),
    }
}

/// Check termination for all rows.
pub fn check_termination_all(
    state: &DoublePendulumState,
    config: &DoublePendulumConfig,
    terminals: &mut [bool],
    truncateds: &mut [bool],
) {
    let max_steps = config.max_episode_steps().saturating_sub(1);
    for idx in 0..state.num_envs {
        terminals[idx] = config.early_terminate_on_success
            && state.stable_count[idx] >= config.sustain_steps;
        truncateds[idx] = state.step_count[idx] >= max_steps;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(num_envs: usize) -> DoublePendulumState {
        DoublePendulumState::new(num_envs, 1)
    }

    #[test]
    fn test_no_termination_at_start() {
        let state = state_with(4);
        let config = DoublePendulumConfig::new(4);
        for idx in 0..4 {
            let result = check_termination(&state, &config, idx);
            assert!(!result.terminal);
            assert!(!result.truncated);
            assert!(!result.done());
        }
    }

    #[test]
    fn test_truncation_at_step_limit() {
        let mut state = state_with(1);
        let config = DoublePendulumConfig::new(1);
        let limit = config.max_episode_steps();

        state.step_count[0] = limit - 2;
        assert!(!check_truncated(&state, &config, 0));

        state.step_count[0] = limit - 1;
        assert!(check_truncated(&state, &config, 0));
    }

    #[test]
    fn test_sustained_not_terminal_by_default() {
        // The as-built behavior: sustained success is computed but the done
        // signal stays timeout-only.
        let mut state = state_with(1);
        let config = DoublePendulumConfig::new(1);
        state.stable_count[0] = config.sustain_steps + 5;

        assert!(check_sustained(&state, &config, 0));
        let result = check_termination(&state, &config, 0);
        assert!(!result.terminal);
        assert!(!result.done());
    }

    #[test]
    fn test_sustained_terminal_with_early_termination() {
        let mut state = state_with(1);
        let config = DoublePendulumConfig::new(1).with_early_termination(true);

        state.stable_count[0] = config.sustain_steps - 1;
        assert!(!check_termination(&state, &config, 0).terminal);

        state.stable_count[0] = config.sustain_steps;
        let result = check_termination(&state, &config, 0);
        assert!(result.terminal);
        assert!(result.done());
    }

    #[test]
    fn test_check_termination_all_matches_single() {
        let mut state = state_with(4);
        let config = DoublePendulumConfig::new(4).with_early_termination(true);
        state.stable_count[1] = config.sustain_steps;
        state.step_count[3] = config.max_episode_steps();

        let mut terminals = vec![false; 4];
        let mut truncateds = vec![false; 4];
        check_termination_all(&state, &config, &mut terminals, &mut truncateds);

        for idx in 0..4 {
            let single = check_termination(&state, &config, idx);
            assert_eq!(terminals[idx], single.terminal);
            assert_eq!(truncateds[idx], single.truncated);
        }
        assert!(terminals[1]);
        assert!(truncateds[3]);
        assert!(!terminals[0] && !truncateds[0]);
    }
}
