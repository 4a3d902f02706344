//! Swing-up reward and the step-scoped success predicate.
//!
//! The per-step reward combines a weighted quadratic state cost against the
//! goal, a control cost, a constant time penalty, a tanh shaping term on the
//! angle errors, and a bonus while the state-error norm is inside the
//! success threshold.
//!
//! The success predicate is evaluated exactly once per step on the squared
//! error norm; the caller shares the cached result between the bonus, the
//! stable-step counter, and termination so the three can never diverge.

use crate::config::DoublePendulumConfig;
use crate::constants::ANGLE_SHAPING_SCALE;

/// Outcome of evaluating one row for one step.
#[derive(Clone, Copy, Debug)]
pub struct StepEval {
    /// Shaped reward for this step
    pub reward: f32,
    /// Whether the state-error norm is below the success threshold
    pub success: bool,
}

/// Per-dimension state error between an observation and the normalized goal.
#[inline(always)]
pub fn state_error(obs: &[f32; 4], goal: &[f32; 4]) -> [f32; 4] {
    [
        obs[0] - goal[0],
        obs[1] - goal[1],
        obs[2] - goal[2],
        obs[3] - goal[3],
    ]
}

/// Squared Euclidean norm of a state error.
#[inline(always)]
pub fn error_norm_sq(error: &[f32; 4]) -> f32 {
    error[0] * error[0] + error[1] * error[1] + error[2] * error[2] + error[3] * error[3]
}

/// Evaluate one row: shaped reward plus the single success evaluation.
///
/// `goal` must already have its angle components normalized; `action` is the
/// raw normalized control vector recorded at application time (1 or 2 wide).
#[inline]
pub fn evaluate_row(
    config: &DoublePendulumConfig,
    goal: &[f32; 4],
    obs: &[f32; 4],
    action: &[f32],
) -> StepEval {
    let error = state_error(obs, goal);

    let w = &config.reward_state_weights;
    let state_cost = w[0] * error[0] * error[0]
        + w[1] * error[1] * error[1]
        + w[2] * error[2] * error[2]
        + w[3] * error[3] * error[3];

    let action_cost: f32 =
        config.reward_action_weight * action.iter().map(|a| a * a).sum::<f32>();

    let mut reward =
        -(config.reward_scale * (state_cost + action_cost)) - config.time_penalty;

    // partial credit for angle proximity, nonzero gradient even far out
    reward += ANGLE_SHAPING_SCALE
        * ((1.0 - error[0].abs().tanh()) + (1.0 - error[1].abs().tanh()));

    let success =
        error_norm_sq(&error) < config.success_threshold * config.success_threshold;
    if success {
        reward += config.bonus_reward;
    }

    StepEval { reward, success }
}

// ============================================================================
// SIMD Implementation
// ============================================================================

#[cfg(feature = "simd")]
pub mod simd {
    use super::*;
    use crate::observation::OBS_SIZE;
    use crate::simd_helpers::{simd_abs, simd_tanh};
    use std::simd::{cmp::SimdPartialOrd, f32x8};

    /// Evaluate 8 rows at once.
    ///
    /// Observations are gathered from the AoS buffer written earlier in the
    /// step, so both paths see identical values per row. Returns the rewards
    /// and the success lanes as a packed bitmask.
    #[inline]
    pub fn evaluate_chunk(
        config: &DoublePendulumConfig,
        goal: &[f32; 4],
        obs_buffer: &[f32],
        actions: &[f32],
        base_idx: usize,
    ) -> (f32x8, u8) {
        let action_dim = config.action_dim();

        let mut obs_lanes = [[0.0f32; 8]; OBS_SIZE];
        let mut action_cost_lanes = [0.0f32; 8];
        for lane in 0..8 {
            let idx = base_idx + lane;
            let obs_base = idx * OBS_SIZE;
            for dim in 0..OBS_SIZE {
                obs_lanes[dim][lane] = obs_buffer[obs_base + dim];
            }
            let action_base = idx * action_dim;
            action_cost_lanes[lane] = actions[action_base..action_base + action_dim]
                .iter()
                .map(|a| a * a)
                .sum();
        }

        let e0 = f32x8::from_array(obs_lanes[0]) - f32x8::splat(goal[0]);
        let e1 = f32x8::from_array(obs_lanes[1]) - f32x8::splat(goal[1]);
        let e2 = f32x8::from_array(obs_lanes[2]) - f32x8::splat(goal[2]);
        let e3 = f32x8::from_array(obs_lanes[3]) - f32x8::splat(goal[3]);

        let w = &config.reward_state_weights;
        let state_cost = f32x8::splat(w[0]) * e0 * e0
            + f32x8::splat(w[1]) * e1 * e1
            + f32x8::splat(w[2]) * e2 * e2
            + f32x8::splat(w[3]) * e3 * e3;

        let action_cost =
            f32x8::splat(config.reward_action_weight) * f32x8::from_array(action_cost_lanes);

        let mut reward = -(f32x8::splat(config.reward_scale) * (state_cost + action_cost))
            - f32x8::splat(config.time_penalty);

        let one = f32x8::splat(1.0);
        let shaping = (one - simd_tanh(simd_abs(e0))) + (one - simd_tanh(simd_abs(e1)));
        reward += f32x8::splat(ANGLE_SHAPING_SCALE) * shaping;

        let norm_sq = e0 * e0 + e1 * e1 + e2 * e2 + e3 * e3;
        let threshold_sq =
            f32x8::splat(config.success_threshold * config.success_threshold);
        let success = norm_sq.simd_lt(threshold_sq);

        reward += success.select(f32x8::splat(config.bonus_reward), f32x8::splat(0.0));

        (reward, success.to_bitmask() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observation::normalize_angle;
    use std::f32::consts::PI;

    fn goal_from(config: &DoublePendulumConfig) -> [f32; 4] {
        [
            normalize_angle(config.goal_state[0]),
            normalize_angle(config.goal_state[1]),
            config.goal_state[2],
            config.goal_state[3],
        ]
    }

    #[test]
    fn test_reward_at_goal() {
        // Goal [-pi, 0, 0, 0], weights [1, 2, 0.1, 0.1], zero error:
        // state cost 0, bonus applied, shaping = 2 * (1 - tanh(0)) * 0.01.
        let config = DoublePendulumConfig::new(1);
        let goal = goal_from(&config);
        assert!((goal[0] - PI).abs() < 1e-6);

        let eval = evaluate_row(&config, &goal, &goal, &[0.0]);
        assert!(eval.success);
        let expected = -config.time_penalty + 0.02 + config.bonus_reward;
        assert!(
            (eval.reward - expected).abs() < 1e-5,
            "reward {} vs expected {}",
            eval.reward,
            expected
        );
    }

    #[test]
    fn test_action_cost_contribution() {
        let config = DoublePendulumConfig::new(1);
        let goal = goal_from(&config);
        let obs = [0.0, 0.0, 0.0, 0.0];

        let idle = evaluate_row(&config, &goal, &obs, &[0.0]);
        let pushing = evaluate_row(&config, &goal, &obs, &[2.0]);

        // action = [2.0], weight 0.1 => action cost 0.4 scaled into the reward
        let delta = idle.reward - pushing.reward;
        assert!((delta - 0.4 * config.reward_scale).abs() < 1e-5);
    }

    #[test]
    fn test_reward_deterministic() {
        let config = DoublePendulumConfig::new(1);
        let goal = goal_from(&config);
        let obs = [1.5, -0.75, 0.3, -0.2];

        let a = evaluate_row(&config, &goal, &obs, &[0.5]);
        let b = evaluate_row(&config, &goal, &obs, &[0.5]);
        assert_eq!(a.reward.to_bits(), b.reward.to_bits());
        assert_eq!(a.success, b.success);
    }

    #[test]
    fn test_success_threshold_strict() {
        let config = DoublePendulumConfig::new(1);
        let goal = goal_from(&config);

        // Error norm exactly at the threshold is not a success.
        let at_threshold = [goal[0] + config.success_threshold, goal[1], goal[2], goal[3]];
        let eval = evaluate_row(&config, &goal, &at_threshold, &[0.0]);
        assert!(!eval.success);

        let inside = [goal[0] + 0.5 * config.success_threshold, goal[1], goal[2], goal[3]];
        let eval = evaluate_row(&config, &goal, &inside, &[0.0]);
        assert!(eval.success);
    }

    #[test]
    fn test_shaping_prefers_closer_angles() {
        let config = DoublePendulumConfig::new(1).with_bonus_reward(0.0);
        let goal = goal_from(&config);

        // Same quadratic cost magnitude suppressed by zero weights so only
        // the shaping term differentiates the two observations.
        let config = config.with_state_weights([0.0; 4]);
        let near = [goal[0] - 0.5, goal[1], goal[2], goal[3]];
        let far = [goal[0] - 2.0, goal[1], goal[2], goal[3]];

        let near_eval = evaluate_row(&config, &goal, &near, &[0.0]);
        let far_eval = evaluate_row(&config, &goal, &far, &[0.0]);
        assert!(near_eval.reward > far_eval.reward);
    }

    #[test]
    fn test_quadratic_weights_applied_per_dimension() {
        let config = DoublePendulumConfig::new(1)
            .with_bonus_reward(0.0)
            .with_time_penalty(0.0)
            .with_goal_state([0.0, 0.0, 0.0, 0.0]);
        let goal = goal_from(&config);

        // Unit error on the elbow angle (weight 2) costs twice the unit
        // error on the shoulder angle (weight 1); shaping is equal for both.
        let shoulder_err = evaluate_row(&config, &goal, &[1.0, 0.0, 0.0, 0.0], &[0.0]);
        let elbow_err = evaluate_row(&config, &goal, &[0.0, 1.0, 0.0, 0.0], &[0.0]);
        let diff = shoulder_err.reward - elbow_err.reward;
        assert!((diff - 1.0).abs() < 1e-5);
    }

    #[cfg(feature = "simd")]
    #[test]
    fn test_simd_chunk_tracks_scalar() {
        let config = DoublePendulumConfig::new(8);
        let goal = goal_from(&config);

        let mut obs_buffer = vec![0.0f32; 8 * 4];
        let mut actions = vec![0.0f32; 8];
        for idx in 0..8 {
            let base = idx * 4;
            obs_buffer[base] = (idx as f32 - 4.0) * 0.7;
            obs_buffer[base + 1] = (idx as f32 - 4.0) * 0.3;
            obs_buffer[base + 2] = 0.1 * idx as f32;
            obs_buffer[base + 3] = -0.1 * idx as f32;
            actions[idx] = (idx as f32 - 4.0) * 0.25;
        }

        let (rewards, success_bits) =
            simd::evaluate_chunk(&config, &goal, &obs_buffer, &actions, 0);
        let rewards = rewards.to_array();

        for idx in 0..8 {
            let base = idx * 4;
            let obs = [
                obs_buffer[base],
                obs_buffer[base + 1],
                obs_buffer[base + 2],
                obs_buffer[base + 3],
            ];
            let scalar = evaluate_row(&config, &goal, &obs, &actions[idx..idx + 1]);
            assert!(
                (rewards[idx] - scalar.reward).abs() < 1e-2,
                "reward mismatch at {}: {} vs {}",
                idx,
                rewards[idx],
                scalar.reward
            );
            assert_eq!((success_bits >> idx) & 1 != 0, scalar.success);
        }
    }
}
