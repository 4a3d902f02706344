//! Planar two-link articulation dynamics.
//!
//! Standard manipulator form `M(q) q'' + C(q, q') q' + G(q) = tau`, solved
//! with the closed-form 2x2 mass-matrix inverse. Angles are measured from
//! the downward vertical, so the hanging pose (0, 0) is the stable
//! equilibrium and the inverted pose sits at shoulder = +-pi.
//!
//! Integration is semi-implicit Euler at the physics frequency with
//! zero-order-hold torques across the substeps of one control step.

use crate::constants::*;
use crate::state::DoublePendulumState;

/// Joint angular accelerations for one row.
#[inline(always)]
pub fn joint_accelerations(
    shoulder_pos: f32,
    elbow_pos: f32,
    shoulder_vel: f32,
    elbow_vel: f32,
    tau_shoulder: f32,
    tau_elbow: f32,
) -> (f32, f32) {
    let s1 = shoulder_pos.sin();
    let s2 = elbow_pos.sin();
    let c2 = elbow_pos.cos();
    let s12 = (shoulder_pos + elbow_pos).sin();

    // mass matrix
    let d11 = M1 * LC1 * LC1 + M2 * (L1 * L1 + LC2 * LC2 + 2.0 * L1 * LC2 * c2) + I1 + I2;
    let d12 = M2 * (LC2 * LC2 + L1 * LC2 * c2) + I2;
    let d22 = M2 * LC2 * LC2 + I2;

    // Coriolis / centrifugal
    let h = M2 * L1 * LC2 * s2;
    let c1 = -h * (2.0 * shoulder_vel * elbow_vel + elbow_vel * elbow_vel);
    let c2v = h * shoulder_vel * shoulder_vel;

    // gravity
    let g1 = (M1 * LC1 + M2 * L1) * G * s1 + M2 * LC2 * G * s12;
    let g2 = M2 * LC2 * G * s12;

    let rhs1 = tau_shoulder - c1 - g1;
    let rhs2 = tau_elbow - c2v - g2;

    // closed-form 2x2 solve; det > 0 for any physical inertia values
    let det = d11 * d22 - d12 * d12;
    let acc1 = (d22 * rhs1 - d12 * rhs2) / det;
    let acc2 = (d11 * rhs2 - d12 * rhs1) / det;
    (acc1, acc2)
}

/// Advance one row by `substeps` semi-implicit Euler steps with the
/// currently stored torque targets held constant.
pub fn integrate_row(state: &mut DoublePendulumState, idx: usize, dt: f32, substeps: u32) {
    let tau1 = state.effort_shoulder[idx];
    let tau2 = state.effort_elbow[idx];

    let mut pos1 = state.shoulder_pos[idx];
    let mut pos2 = state.elbow_pos[idx];
    let mut vel1 = state.shoulder_vel[idx];
    let mut vel2 = state.elbow_vel[idx];

    for _ in 0..substeps {
        let (acc1, acc2) = joint_accelerations(pos1, pos2, vel1, vel2, tau1, tau2);
        vel1 = (vel1 + acc1 * dt).clamp(-MAX_SHOULDER_SPEED, MAX_SHOULDER_SPEED);
        vel2 = (vel2 + acc2 * dt).clamp(-MAX_ELBOW_SPEED, MAX_ELBOW_SPEED);
        pos1 += vel1 * dt;
        pos2 += vel2 * dt;
    }

    state.shoulder_pos[idx] = pos1;
    state.elbow_pos[idx] = pos2;
    state.shoulder_vel[idx] = vel1;
    state.elbow_vel[idx] = vel2;
}

/// Advance all rows (scalar path).
pub fn integrate_all(state: &mut DoublePendulumState, dt: f32, substeps: u32) {
    for idx in 0..state.num_envs {
        integrate_row(state, idx, dt, substeps);
    }
}

// ============================================================================
// SIMD Implementation
// ============================================================================

#[cfg(feature = "simd")]
pub mod simd {
    use super::*;
    use crate::simd_helpers::{simd_cos, simd_sin};
    use std::simd::{f32x8, num::SimdFloat};

    /// Advance 8 rows at once with the same semi-implicit Euler scheme.
    #[inline]
    pub fn integrate_chunk(state: &mut DoublePendulumState, base_idx: usize, dt: f32, substeps: u32) {
        let tau1 = f32x8::from_slice(&state.effort_shoulder[base_idx..]);
        let tau2 = f32x8::from_slice(&state.effort_elbow[base_idx..]);

        let mut pos1 = f32x8::from_slice(&state.shoulder_pos[base_idx..]);
        let mut pos2 = f32x8::from_slice(&state.elbow_pos[base_idx..]);
        let mut vel1 = f32x8::from_slice(&state.shoulder_vel[base_idx..]);
        let mut vel2 = f32x8::from_slice(&state.elbow_vel[base_idx..]);

        let dt_vec = f32x8::splat(dt);
        let two = f32x8::splat(2.0);
        let g_vec = f32x8::splat(G);

        let d22 = f32x8::splat(M2 * LC2 * LC2 + I2);
        let base_d11 = f32x8::splat(M1 * LC1 * LC1 + M2 * (L1 * L1 + LC2 * LC2) + I1 + I2);
        let base_d12 = f32x8::splat(M2 * LC2 * LC2 + I2);
        let coupling = f32x8::splat(M2 * L1 * LC2);
        let g1_coeff = f32x8::splat(M1 * LC1 + M2 * L1);
        let g2_coeff = f32x8::splat(M2 * LC2);

        for _ in 0..substeps {
            let s1 = simd_sin(pos1);
            let s2 = simd_sin(pos2);
            let c2 = simd_cos(pos2);
            let s12 = simd_sin(pos1 + pos2);

            let d11 = base_d11 + two * coupling * c2;
            let d12 = base_d12 + coupling * c2;

            let h = coupling * s2;
            let c1 = -h * (two * vel1 * vel2 + vel2 * vel2);
            let c2v = h * vel1 * vel1;

            let g1 = g1_coeff * g_vec * s1 + g2_coeff * g_vec * s12;
            let g2 = g2_coeff * g_vec * s12;

            let rhs1 = tau1 - c1 - g1;
            let rhs2 = tau2 - c2v - g2;

            let det = d11 * d22 - d12 * d12;
            let acc1 = (d22 * rhs1 - d12 * rhs2) / det;
            let acc2 = (d11 * rhs2 - d12 * rhs1) / det;

            vel1 = (vel1 + acc1 * dt_vec).simd_clamp(
                f32x8::splat(-MAX_SHOULDER_SPEED),
                f32x8::splat(MAX_SHOULDER_SPEED),
            );
            vel2 = (vel2 + acc2 * dt_vec).simd_clamp(
                f32x8::splat(-MAX_ELBOW_SPEED),
                f32x8::splat(MAX_ELBOW_SPEED),
            );
            pos1 += vel1 * dt_vec;
            pos2 += vel2 * dt_vec;
        }

        pos1.copy_to_slice(&mut state.shoulder_pos[base_idx..base_idx + 8]);
        pos2.copy_to_slice(&mut state.elbow_pos[base_idx..base_idx + 8]);
        vel1.copy_to_slice(&mut state.shoulder_vel[base_idx..base_idx + 8]);
        vel2.copy_to_slice(&mut state.elbow_vel[base_idx..base_idx + 8]);
    }

    /// Advance all rows, SIMD chunks with a scalar remainder.
    pub fn integrate_all_simd(state: &mut DoublePendulumState, dt: f32, substeps: u32) {
        let chunks = state.num_envs / 8;
        for chunk in 0..chunks {
            integrate_chunk(state, chunk * 8, dt, substeps);
        }

        let base = chunks * 8;
        for idx in base..state.num_envs {
            integrate_row(state, idx, dt, substeps);
        }
    }

}
