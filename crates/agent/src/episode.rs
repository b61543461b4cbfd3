//! Playing whole episodes against the real environment.

use anyhow::{Context, Result};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use twenty48_core::Environment;
use twenty48_game::{Direction, EpisodeInfo, Game2048};
use twenty48_mcts::{Mcts, MctsConfig, RolloutPolicy, UniformRandom};

/// Who picks the real moves.
#[derive(Clone, Debug)]
pub enum Agent {
    /// A fresh MCTS tree per move.
    Mcts(MctsConfig),
    /// Uniformly random moves (baseline).
    Random,
}

impl Agent {
    pub fn name(&self) -> &'static str {
        match self {
            Agent::Mcts(_) => "mcts",
            Agent::Random => "random",
        }
    }
}

/// A single real move.
#[derive(Serialize, Debug)]
pub struct StepRecord {
    pub action: Direction,
    pub reward: f64,
    pub score: u32,
    /// Root child values from the search, in action order (MCTS only).
    pub root_values: Vec<f64>,
}

/// A complete episode.
#[derive(Serialize, Debug)]
pub struct EpisodeRecord {
    pub agent: &'static str,
    pub seed: u64,
    pub score: u32,
    pub max_tile: u32,
    pub length: u32,
    pub success: bool,
    /// Terminal info reported by the game; empty fields if cut off by `max_steps`.
    pub info: EpisodeInfo,
    pub steps: Vec<StepRecord>,
}

/// Play one episode, stopping when the game ends or after `max_steps`.
pub fn play_episode(agent: &Agent, seed: u64, max_steps: usize, render: bool) -> Result<EpisodeRecord> {
    let mut game = Game2048::new(seed);
    // Separate stream from the tile spawner so search cannot perturb it
    let mut policy = UniformRandom::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));
    let mut search_seeds = ChaCha8Rng::seed_from_u64(seed.wrapping_add(2));
    let mut steps = Vec::new();

    if render {
        println!("{}", game);
    }

    while !game.is_done() && steps.len() < max_steps {
        let (action, root_values) = match agent {
            Agent::Mcts(config) => {
                let root = game.snapshot().context("Failed to snapshot game")?;
                let mut mcts = Mcts::new(root, config.clone(), &mut policy)
                    .context("Failed to build search")?
                    .with_seed(search_seeds.gen());
                let result = mcts
                    .search()
                    .with_context(|| format!("Search failed at step {}", steps.len()))?;
                let values = result.children.iter().map(|c| c.value).collect();
                (result.best(), values)
            }
            Agent::Random => {
                let index = policy.choose(game.num_actions());
                (game.resolve_action(index)?, Vec::new())
            }
        };

        let transition = game.step(action);
        debug!(
            "step {}: {} for {} (score {})",
            steps.len(),
            action,
            transition.reward,
            game.score()
        );
        if render {
            println!("{} -> +{}\n{}", action, transition.reward, game);
        }

        steps.push(StepRecord {
            action,
            reward: transition.reward,
            score: game.score(),
            root_values,
        });
    }

    let record = EpisodeRecord {
        agent: agent.name(),
        seed,
        score: game.score(),
        max_tile: game.board().max_tile(),
        length: game.episode_length(),
        success: game.info().success.unwrap_or(false),
        info: game.info().clone(),
        steps,
    };
    info!(
        "{} episode seed {}: score {}, max tile {}, {} steps",
        record.agent, record.seed, record.score, record.max_tile, record.length
    );
    Ok(record)
}

/// Aggregate statistics over episodes.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Summary {
    pub episodes: usize,
    pub mean_score: f64,
    pub best_score: u32,
    pub best_tile: u32,
    pub success_rate: f64,
    pub mean_length: f64,
}

impl Summary {
    pub fn from_records(records: &[EpisodeRecord]) -> Self {
        let n = records.len().max(1) as f64;
        Self {
            episodes: records.len(),
            mean_score: records.iter().map(|r| f64::from(r.score)).sum::<f64>() / n,
            best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
            best_tile: records.iter().map(|r| r.max_tile).max().unwrap_or(0),
            success_rate: records.iter().filter(|r| r.success).count() as f64 / n,
            mean_length: records.iter().map(|r| f64::from(r.length)).sum::<f64>() / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_episode_respects_max_steps() {
        let record = play_episode(&Agent::Random, 3, 10, false).unwrap();
        assert!(record.steps.len() <= 10);
        assert_eq!(record.agent, "random");
        assert!(record.steps.iter().all(|s| s.root_values.is_empty()));
    }

    #[test]
    fn test_mcts_episode_records_root_values() {
        let agent = Agent::Mcts(MctsConfig::with_iterations(10));
        let record = play_episode(&agent, 4, 5, false).unwrap();

        assert_eq!(record.steps.len(), 5);
        for step in &record.steps {
            assert_eq!(step.root_values.len(), 4);
        }
        assert_eq!(record.steps.last().unwrap().score, record.score);
    }

    #[test]
    fn test_episode_is_reproducible() {
        let agent = Agent::Mcts(MctsConfig::with_iterations(8));
        let a = play_episode(&agent, 9, 20, false).unwrap();
        let b = play_episode(&agent, 9, 20, false).unwrap();
        assert_eq!(a.score, b.score);
        let actions_a: Vec<Direction> = a.steps.iter().map(|s| s.action).collect();
        let actions_b: Vec<Direction> = b.steps.iter().map(|s| s.action).collect();
        assert_eq!(actions_a, actions_b);
    }

    #[test]
    fn test_finished_episode_carries_game_info() {
        let record = play_episode(&Agent::Random, 6, usize::MAX, false).unwrap();
        assert_eq!(record.info.total_score, Some(record.score));
        assert_eq!(record.info.episode_length, Some(record.length));
        assert_eq!(record.info.success, Some(record.success));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["info"]["total_score"], record.score);
    }

    #[test]
    fn test_truncated_episode_has_empty_info() {
        let record = play_episode(&Agent::Random, 6, 3, false).unwrap();
        assert_eq!(record.info, EpisodeInfo::default());
    }

    #[test]
    fn test_summary() {
        let records = vec![
            play_episode(&Agent::Random, 1, 30, false).unwrap(),
            play_episode(&Agent::Random, 2, 30, false).unwrap(),
        ];
        let summary = Summary::from_records(&records);
        assert_eq!(summary.episodes, 2);
        assert!(summary.best_score as f64 >= summary.mean_score);
        assert!(summary.success_rate >= 0.0 && summary.success_rate <= 1.0);
    }

    #[test]
    fn test_summary_empty() {
        let summary = Summary::from_records(&[]);
        assert_eq!(summary.episodes, 0);
        assert_eq!(summary.mean_score, 0.0);
    }
}
