//! Batched rollout / throughput report for the double-pendulum environment.
//!
//! Steps a large batch with a simple energy-pumping heuristic and reports
//! steps per second plus episode statistics from the environment log.
//!
//! Run with: cargo run --example swingup_rollout --release -p double-pendulum-env
//! Run with SIMD: cargo run --example swingup_rollout --release -p double-pendulum-env --features simd

use double_pendulum_env::ActuationMode;
use swingup_core::Environment;
use std::time::Instant;

struct RolloutConfig {
    num_envs: usize,
    total_steps: u64,
    warmup_steps: u64,
    task: &'static str,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            num_envs: 1024,
            total_steps: 100_000,
            warmup_steps: 5_000,
            task: "acrobot-swingup",
        }
    }
}

fn separator(c: char, n: usize) {
    println!("{}", c.to_string().repeat(n));
}

/// Bang-bang energy pumping: push with the shoulder's swing direction.
fn swing_policy(shoulder_vel: f32) -> f32 {
    if shoulder_vel >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn main() {
    let config = RolloutConfig::default();

    separator('=', 70);
    println!("DOUBLE-PENDULUM SWING-UP ROLLOUT");
    separator('=', 70);
    println!();

    #[cfg(feature = "simd")]
    println!("Mode: SIMD (f32x8)");
    #[cfg(not(feature = "simd"))]
    println!("Mode: Scalar");

    println!("Task: {}", config.task);
    println!("Environments: {}", config.num_envs);
    println!("Total steps: {}", config.total_steps);
    println!();

    let env_config = double_pendulum_env::for_task(config.task, config.num_envs)
        .expect("unknown task name");
    let action_dim = env_config.action_dim();
    assert_eq!(env_config.actuation, ActuationMode::Acrobot);

    let mut env = env_config.build().expect("failed to create environment");
    env.reset(42);

    let mut actions = vec![0.0f32; config.num_envs * action_dim];

    println!("Warming up ({} steps)...", config.warmup_steps);
    for _ in 0..config.warmup_steps {
        fill_actions(&env, &mut actions, action_dim);
        env.step(&actions);
    }
    env.clear_log();

    println!("Measuring ({} steps)...", config.total_steps);
    let start = Instant::now();
    for _ in 0..config.total_steps {
        fill_actions(&env, &mut actions, action_dim);
        env.step(&actions);
    }
    let elapsed = start.elapsed();

    let sps = config.total_steps as f64 / elapsed.as_secs_f64();
    let env_sps = sps * config.num_envs as f64;

    println!();
    separator('-', 70);
    println!("Wall time: {:.2} s", elapsed.as_secs_f64());
    println!("Control steps/sec: {:.0}", sps);
    println!("Env-steps/sec: {:.0}", env_sps);

    let log = env.get_log();
    if log.episode_count > 0 {
        println!();
        println!("Episodes completed: {}", log.episode_count);
        println!(
            "Mean episode return: {:.2}",
            log.total_reward / log.episode_count as f32
        );
        println!(
            "Mean episode length: {:.1}",
            log.total_steps as f32 / log.episode_count as f32
        );
        println!(
            "Sustained-success rate: {:.1}%",
            100.0 * log.sustained_episodes as f32 / log.episode_count as f32
        );
    }
    separator('=', 70);
}

fn fill_actions(
    env: &double_pendulum_env::DoublePendulum,
    actions: &mut [f32],
    action_dim: usize,
) {
    let state = env.state();
    for idx in 0..state.num_envs {
        actions[idx * action_dim] = swing_policy(state.shoulder_vel[idx]);
    }
}
