//! Random number generation for reset sampling.

pub use rand_xoshiro::Xoshiro256StarStar;

/// Generate a random float in the range [low, high).
#[inline]
pub fn random_uniform(rng: &mut Xoshiro256StarStar, low: f32, high: f32) -> f32 {
    use rand::Rng;
    rng.gen::<f32>() * (high - low) + low
}
