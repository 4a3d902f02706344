//! Environment traits for batched swing-up tasks.
//!
//! Every environment in this workspace is vectorized: one instance owns N
//! independent task rows stepped together with batched arithmetic. This
//! module provides:
//! - [`Environment`] trait for vectorized environment implementations
//! - [`StepResult`] for zero-copy access to a step's outputs
//! - [`ResetMask`] for selective per-row reset with O(k) iteration
//! - [`LogData`] for episode metrics tracking

use std::fmt::Debug;

// ============================================================================
// StepResult - Zero-copy step result access
// ============================================================================

/// Result of a single batched step.
///
/// Borrows the environment's internal buffers, so nothing is copied.
/// Returned by [`Environment::step_no_reset_with_result`].
#[derive(Debug)]
pub struct StepResult<'a> {
    /// Flat observation buffer, AoS layout: [row0 obs.., row1 obs.., ...]
    pub observations: &'a [f32],
    /// Reward for each row
    pub rewards: &'a [f32],
    /// Terminal flags (1 = terminated, 0 = not)
    pub terminals: &'a [u8],
    /// Truncation flags (1 = hit the time limit, 0 = not)
    pub truncations: &'a [u8],
    /// Number of parallel rows
    pub num_envs: usize,
    /// Observation size per row
    pub obs_size: usize,
}

impl<'a> StepResult<'a> {
    /// Observation slice for one row.
    #[inline]
    pub fn obs(&self, env_idx: usize) -> &[f32] {
        debug_assert!(env_idx < self.num_envs, "env_idx out of bounds");
        let start = env_idx * self.obs_size;
        &self.observations[start..start + self.obs_size]
    }

    /// Whether the row terminated this step.
    #[inline]
    pub fn is_terminal(&self, env_idx: usize) -> bool {
        self.terminals[env_idx] != 0
    }

    /// Whether the row was truncated this step.
    #[inline]
    pub fn is_truncated(&self, env_idx: usize) -> bool {
        self.truncations[env_idx] != 0
    }

    /// Whether the row's episode ended (terminal or truncated).
    #[inline]
    pub fn is_done(&self, env_idx: usize) -> bool {
        self.is_terminal(env_idx) || self.is_truncated(env_idx)
    }

    /// Build a [`ResetMask`] covering every done row of this step.
    pub fn to_reset_mask(&self) -> ResetMask {
        ResetMask::from_done_flags(self.terminals, self.truncations)
    }
}

// ============================================================================
// ResetMask - packed bitmask for selective reset
// ============================================================================

/// Bitmask selecting rows for reset (1 = reset, 0 = keep).
///
/// Packed into u64 chunks so 64 rows are tested per word. Selective reset
/// is the core episode-lifecycle contract: resetting some rows must leave
/// every other row untouched.
#[derive(Debug, Clone)]
pub struct ResetMask {
    /// Packed chunks, 64 rows per u64
    chunks: Vec<u64>,
    /// Total number of rows covered
    num_envs: usize,
}

impl ResetMask {
    /// Empty mask (no rows selected).
    pub fn new(num_envs: usize) -> Self {
        Self {
            chunks: vec![0u64; num_envs.div_ceil(64)],
            num_envs,
        }
    }

    /// Mask from terminal/truncation buffers: a row is selected when it is
    /// either terminal or truncated.
    pub fn from_done_flags(terminals: &[u8], truncations: &[u8]) -> Self {
        debug_assert_eq!(terminals.len(), truncations.len());
        let mut mask = Self::new(terminals.len());
        for (i, (&t, &tr)) in terminals.iter().zip(truncations.iter()).enumerate() {
            if t != 0 || tr != 0 {
                mask.chunks[i / 64] |= 1u64 << (i % 64);
            }
        }
        mask
    }

    /// Mask from a terminal buffer only.
    pub fn from_terminals(terminals: &[u8]) -> Self {
        let mut mask = Self::new(terminals.len());
        for (i, &t) in terminals.iter().enumerate() {
            if t != 0 {
                mask.chunks[i / 64] |= 1u64 << (i % 64);
            }
        }
        mask
    }

    /// Whether any row is selected.
    #[inline]
    pub fn any(&self) -> bool {
        self.chunks.iter().any(|&c| c != 0)
    }

    /// Number of selected rows.
    pub fn count(&self) -> usize {
        self.chunks.iter().map(|c| c.count_ones() as usize).sum()
    }

    /// Number of rows this mask covers.
    #[inline]
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Select a row.
    #[inline]
    pub fn set(&mut self, env_idx: usize) {
        debug_assert!(env_idx < self.num_envs);
        self.chunks[env_idx / 64] |= 1u64 << (env_idx % 64);
    }

    /// Deselect a row.
    #[inline]
    pub fn clear(&mut self, env_idx: usize) {
        debug_assert!(env_idx < self.num_envs);
        self.chunks[env_idx / 64] &= !(1u64 << (env_idx % 64));
    }

    /// Whether a row is selected.
    #[inline]
    pub fn is_set(&self, env_idx: usize) -> bool {
        debug_assert!(env_idx < self.num_envs);
        (self.chunks[env_idx / 64] >> (env_idx % 64)) & 1 != 0
    }

    /// Iterate the selected row indices in ascending order.
    ///
    /// O(k) in the number of set bits: each chunk is drained with
    /// `trailing_zeros` rather than scanned bit by bit.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        let num_envs = self.num_envs;
        self.chunks.iter().enumerate().flat_map(move |(chunk_idx, &chunk)| {
            let base = chunk_idx * 64;
            let mut remaining = chunk;
            std::iter::from_fn(move || {
                while remaining != 0 {
                    let bit = remaining.trailing_zeros() as usize;
                    remaining &= remaining - 1;
                    let idx = base + bit;
                    if idx < num_envs {
                        return Some(idx);
                    }
                }
                None
            })
        })
    }
}

// ============================================================================
// LogData trait
// ============================================================================

/// Episode metrics an environment accumulates for the training loop.
pub trait LogData: Clone + Debug + Default {
    /// Merge another log into this one (for aggregation).
    fn merge(&mut self, other: &Self);

    /// Clear the accumulated counters.
    fn clear(&mut self);

    /// Number of completed episodes recorded.
    fn episode_count(&self) -> f32;
}

// ============================================================================
// Environment trait
// ============================================================================

/// Trait for batched environments with SoA state layout.
///
/// The stepping loop guarantees exactly one step call completes before the
/// next begins; implementations own their buffers and take no locks. All
/// per-step work is whole-batch, so the trainer exchanges flat tensors
/// rather than per-row values.
///
/// # Example
///
/// ```rust,ignore
/// use swingup_core::Environment;
///
/// let mut env = make_env(4096)?;
/// env.reset(42);
/// loop {
///     let actions = policy(&obs);
///     let result = env.step_no_reset_with_result(&actions);
///     let mask = result.to_reset_mask();
///     if mask.any() {
///         env.reset_envs(&mask, next_seed());
///     }
/// }
/// ```
pub trait Environment {
    /// Number of parallel rows.
    fn num_envs(&self) -> usize;

    /// Observation size per row.
    fn observation_size(&self) -> usize;

    /// Action vector width per row (continuous control dimensions).
    fn action_size(&self) -> usize;

    /// Reset all rows with deterministic seeding.
    fn reset(&mut self, seed: u64);

    /// Step all rows (auto-resets rows whose episode ended).
    fn step(&mut self, actions: &[f32]);

    /// Write observations to a flat buffer.
    fn write_observations(&self, buffer: &mut [f32]);

    /// Write rewards to a buffer.
    fn write_rewards(&self, buffer: &mut [f32]);

    /// Write terminal flags to a buffer.
    fn write_terminals(&self, buffer: &mut [u8]);

    /// Write truncation flags to a buffer.
    fn write_truncations(&self, buffer: &mut [u8]);

    // ========================================================================
    // Non-auto-reset API for value-based RL (DQN, SAC, ...)
    // ========================================================================

    /// Step all rows WITHOUT auto-reset.
    ///
    /// Unlike [`step`](Environment::step), terminal observations and flags
    /// survive the call, allowing correct TD bootstrapping. The caller must
    /// invoke [`reset_envs`](Environment::reset_envs) before the next step.
    fn step_no_reset(&mut self, actions: &[f32]) {
        let _ = actions;
        unimplemented!(
            "step_no_reset not implemented for this environment. \
             Check supports_no_reset() before calling."
        )
    }

    /// Step without auto-reset, returning all outputs in one struct.
    fn step_no_reset_with_result(&mut self, actions: &[f32]) -> StepResult<'_> {
        let _ = actions;
        unimplemented!(
            "step_no_reset_with_result not implemented for this environment. \
             Check supports_no_reset() before calling."
        )
    }

    /// Reset exactly the rows selected by `mask`, leaving the rest untouched.
    ///
    /// `seed` is combined with each row index so equal seeds reproduce the
    /// same initial states.
    fn reset_envs(&mut self, mask: &ResetMask, seed: u64) {
        let _ = (mask, seed);
        unimplemented!(
            "reset_envs not implemented for this environment. \
             Check supports_no_reset() before calling."
        )
    }

    /// Whether the non-auto-reset API is available.
    fn supports_no_reset(&self) -> bool {
        false
    }
}
