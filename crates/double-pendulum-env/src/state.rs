//! Struct-of-Arrays (SoA) batch state for the double-pendulum task.
//!
//! Every state variable is stored in its own contiguous array with one
//! element per row, so the stepping code can process rows with batched
//! arithmetic instead of per-row structs.

use rand::SeedableRng;

use crate::constants::{DEFAULT_JOINT_POS, DEFAULT_JOINT_VEL};
use crate::rng::{random_uniform, Xoshiro256StarStar};

/// SoA state storage for all parallel double-pendulum rows.
pub struct DoublePendulumState {
    /// Shoulder joint angle (rad, unwrapped)
    pub shoulder_pos: Vec<f32>,
    /// Elbow joint angle (rad, unwrapped)
    pub elbow_pos: Vec<f32>,
    /// Shoulder joint velocity (rad/s)
    pub shoulder_vel: Vec<f32>,
    /// Elbow joint velocity (rad/s)
    pub elbow_vel: Vec<f32>,

    /// Shoulder actuator torque target (N*m)
    pub effort_shoulder: Vec<f32>,
    /// Elbow actuator torque target (N*m)
    pub effort_elbow: Vec<f32>,

    /// Last applied normalized action [num_envs * action_dim]
    pub last_action: Vec<f32>,

    /// Consecutive steps with the state error below the success threshold
    pub stable_count: Vec<u32>,
    /// Control steps taken in the current episode
    pub step_count: Vec<u32>,
    /// Reward accumulated in the current episode
    pub episode_reward: Vec<f32>,

    /// Per-row RNG seed stream for reset sampling
    pub rng_seeds: Vec<u64>,

    /// Number of parallel rows
    pub num_envs: usize,
    /// Action vector width per row
    pub action_dim: usize,
}

impl DoublePendulumState {
    /// Create state storage for the given batch size.
    pub fn new(num_envs: usize, action_dim: usize) -> Self {
        Self {
            shoulder_pos: vec![DEFAULT_JOINT_POS; num_envs],
            elbow_pos: vec![DEFAULT_JOINT_POS; num_envs],
            shoulder_vel: vec![DEFAULT_JOINT_VEL; num_envs],
            elbow_vel: vec![DEFAULT_JOINT_VEL; num_envs],

            effort_shoulder: vec![0.0; num_envs],
            effort_elbow: vec![0.0; num_envs],

            last_action: vec![0.0; num_envs * action_dim],

            stable_count: vec![0; num_envs],
            step_count: vec![0; num_envs],
            episode_reward: vec![0.0; num_envs],

            rng_seeds: (0..num_envs as u64).collect(),

            num_envs,
            action_dim,
        }
    }

    /// Reset a single row to a freshly sampled initial state.
    ///
    /// Joint angles are the default position plus a uniform offset from the
    /// configured range (in units of pi); velocities go back to the default
    /// with no randomization. Consumes and advances the row's seed stream.
    pub fn reset_env(
        &mut self,
        idx: usize,
        shoulder_range: [f32; 2],
        elbow_range: [f32; 2],
    ) {
        let mut rng = Xoshiro256StarStar::seed_from_u64(self.rng_seeds[idx]);
        self.rng_seeds[idx] = self.rng_seeds[idx].wrapping_add(1);

        let pi = std::f32::consts::PI;
        self.shoulder_pos[idx] =
            DEFAULT_JOINT_POS + random_uniform(&mut rng, shoulder_range[0] * pi, shoulder_range[1] * pi);
        self.elbow_pos[idx] =
            DEFAULT_JOINT_POS + random_uniform(&mut rng, elbow_range[0] * pi, elbow_range[1] * pi);

        self.shoulder_vel[idx] = DEFAULT_JOINT_VEL;
        self.elbow_vel[idx] = DEFAULT_JOINT_VEL;

        self.effort_shoulder[idx] = 0.0;
        self.effort_elbow[idx] = 0.0;

        let action_base = idx * self.action_dim;
        self.last_action[action_base..action_base + self.action_dim].fill(0.0);

        self.stable_count[idx] = 0;
        self.step_count[idx] = 0;
        self.episode_reward[idx] = 0.0;
    }

    /// Joint positions for one row.
    #[inline]
    pub fn joint_pos(&self, idx: usize) -> [f32; 2] {
        [self.shoulder_pos[idx], self.elbow_pos[idx]]
    }

    /// Joint velocities for one row.
    #[inline]
    pub fn joint_vel(&self, idx: usize) -> [f32; 2] {
        [self.shoulder_vel[idx], self.elbow_vel[idx]]
    }

    /// Overwrite one row's joint state.
    #[inline]
    pub fn set_joint_state(&mut self, idx: usize, pos: [f32; 2], vel: [f32; 2]) {
        self.shoulder_pos[idx] = pos[0];
        self.elbow_pos[idx] = pos[1];
        self.shoulder_vel[idx] = vel[0];
        self.elbow_vel[idx] = vel[1];
    }

    /// Last applied action for one row.
    #[inline]
    pub fn action(&self, idx: usize) -> &[f32] {
        let base = idx * self.action_dim;
        &self.last_action[base..base + self.action_dim]
    }
}
