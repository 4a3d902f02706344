//! Batch-state lifecycle tests.

use crate::state::DoublePendulumState;

#[test]
fn test_reset_env_touches_only_selected_row() {
    let mut state = DoublePendulumState::new(4, 1);
    for idx in 0..4 {
        state.set_joint_state(idx, [idx as f32 * 0.1, -(idx as f32) * 0.1], [1.0, -1.0]);
        state.stable_count[idx] = 3;
        state.step_count[idx] = 7;
    }

    let before: Vec<([f32; 2], [f32; 2])> =
        (0..4).map(|idx| (state.joint_pos(idx), state.joint_vel(idx))).collect();

    state.reset_env(2, [-1.0, 1.0], [-1.0, 1.0]);

    for idx in [0usize, 1, 3] {
        assert_eq!(state.joint_pos(idx), before[idx].0);
        assert_eq!(state.joint_vel(idx), before[idx].1);
        assert_eq!(state.stable_count[idx], 3);
        assert_eq!(state.step_count[idx], 7);
    }
    assert_eq!(state.stable_count[2], 0);
    assert_eq!(state.step_count[2], 0);
    assert_eq!(state.joint_vel(2), [0.0, 0.0]);
}

#[test]
fn test_reset_env_clears_efforts_and_actions() {
    let mut state = DoublePendulumState::new(2, 2);
    state.effort_shoulder[0] = 3.0;
    state.effort_elbow[0] = -3.0;
    state.last_action[0] = 0.5;
    state.last_action[1] = -0.5;
    state.episode_reward[0] = -12.0;

    state.reset_env(0, [0.0, 0.0], [0.0, 0.0]);

    assert_eq!(state.effort_shoulder[0], 0.0);
    assert_eq!(state.effort_elbow[0], 0.0);
    assert_eq!(state.action(0), &[0.0, 0.0]);
    assert_eq!(state.episode_reward[0], 0.0);
}

#[test]
fn test_stable_counters_are_per_row() {
    let mut state = DoublePendulumState::new(3, 1);
    state.stable_count[0] = 5;
    state.stable_count[2] = 9;

    state.reset_env(0, [0.0, 0.0], [0.0, 0.0]);

    assert_eq!(state.stable_count[0], 0);
    assert_eq!(state.stable_count[1], 0);
    assert_eq!(state.stable_count[2], 9);
}

#[test]
fn test_seed_streams_diverge_across_rows() {
    let mut state = DoublePendulumState::new(2, 1);
    state.rng_seeds[0] = 42;
    state.rng_seeds[1] = 43;
    state.reset_env(0, [-1.0, 1.0], [-1.0, 1.0]);
    state.reset_env(1, [-1.0, 1.0], [-1.0, 1.0]);
    assert_ne!(state.joint_pos(0), state.joint_pos(1));
}
