//! Grid search over reward state weights.
//!
//! Sweeps the four quadratic cost weights over a small value grid, runs one
//! short evaluation rollout per combination with the heuristic swing
//! policy, and emits a CSV summary of mean return and sustained-success
//! rate per cell.
//!
//! Run with: cargo run --example grid_search --release -p double-pendulum-env

use double_pendulum_env::DoublePendulumConfig;
use swingup_core::Environment;

const WEIGHT_VALUES: [f32; 3] = [0.1, 1.0, 2.0];
const NUM_ENVS: usize = 64;
const ROLLOUT_STEPS: u32 = 400;

struct GridResult {
    run_name: String,
    weights: [f32; 4],
    episodes: u32,
    mean_return: f32,
    sustained_rate: f32,
}

fn swing_policy(shoulder_vel: f32) -> f32 {
    if shoulder_vel >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

fn run_cell(index: usize, weights: [f32; 4]) -> GridResult {
    let run_name = format!(
        "grid_{:03}_{}-{}-{}-{}",
        index, weights[0], weights[1], weights[2], weights[3]
    );

    let config = DoublePendulumConfig::new(NUM_ENVS)
        .with_state_weights(weights)
        .with_episode_length(2.0);
    let mut env = config.build().expect("failed to create environment");
    env.reset(index as u64);

    let mut actions = vec![0.0f32; NUM_ENVS];
    for _ in 0..ROLLOUT_STEPS {
        for idx in 0..NUM_ENVS {
            actions[idx] = swing_policy(env.state().shoulder_vel[idx]);
        }
        env.step(&actions);
    }

    let log = env.get_log();
    let episodes = log.episode_count;
    let mean_return = if episodes > 0 {
        log.total_reward / episodes as f32
    } else {
        0.0
    };
    let sustained_rate = if episodes > 0 {
        log.sustained_episodes as f32 / episodes as f32
    } else {
        0.0
    };

    GridResult {
        run_name,
        weights,
        episodes,
        mean_return,
        sustained_rate,
    }
}

fn main() {
    let combos: Vec<[f32; 4]> = {
        let mut all = Vec::new();
        for &w1 in &WEIGHT_VALUES {
            for &w2 in &WEIGHT_VALUES {
                for &w3 in &WEIGHT_VALUES {
                    for &w4 in &WEIGHT_VALUES {
                        all.push([w1, w2, w3, w4]);
                    }
                }
            }
        }
        all
    };

    println!("Starting grid search over {} weight combinations", combos.len());
    println!("{} envs x {} steps per cell", NUM_ENVS, ROLLOUT_STEPS);
    println!();
    println!("run_name,w1,w2,w3,w4,episodes,mean_return,sustained_rate");

    let mut best: Option<GridResult> = None;
    for (index, weights) in combos.into_iter().enumerate() {
        let result = run_cell(index, weights);
        println!(
            "{},{},{},{},{},{},{:.3},{:.3}",
            result.run_name,
            result.weights[0],
            result.weights[1],
            result.weights[2],
            result.weights[3],
            result.episodes,
            result.mean_return,
            result.sustained_rate,
        );

        let better = match &best {
            Some(current) => result.mean_return > current.mean_return,
            None => true,
        };
        if better {
            best = Some(result);
        }
    }

    if let Some(best) = best {
        println!();
        println!(
            "Best cell: {} (mean return {:.3}, sustained rate {:.3})",
            best.run_name, best.mean_return, best.sustained_rate
        );
    }
}
