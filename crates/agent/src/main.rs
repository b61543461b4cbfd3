//! Play and evaluate 2048 with Monte Carlo Tree Search.
//!
//! Every real move builds a fresh search tree from a snapshot of the game,
//! applies the chosen action to the real game and discards the tree.

mod episode;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use episode::{play_episode, Agent, EpisodeRecord, Summary};
use log::info;
use rayon::prelude::*;
use settings::SearchArgs;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// 2048 MCTS agent.
#[derive(Parser)]
#[command(name = "twenty48")]
#[command(about = "Play 2048 with Monte Carlo Tree Search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes with MCTS, optionally printing the board and saving records.
    Play {
        /// Number of episodes to play.
        #[arg(short, long, default_value = "1")]
        episodes: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Stop an episode after this many moves.
        #[arg(long, default_value = "100000")]
        max_steps: usize,

        /// Print the board after every move.
        #[arg(long)]
        render: bool,

        /// Write episode records as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Compare MCTS against uniformly random play.
    Evaluate {
        /// Number of episodes per agent.
        #[arg(short, long, default_value = "10")]
        episodes: usize,

        /// Random seed for reproducibility.
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Stop an episode after this many moves.
        #[arg(long, default_value = "100000")]
        max_steps: usize,

        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Seed of the i-th episode.
fn episode_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add(index as u64 * 1000)
}

fn write_records(path: &Path, records: &[EpisodeRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), records)
        .with_context(|| format!("Failed to write episode records to {:?}", path))?;
    Ok(())
}

fn print_summary(label: &str, summary: &Summary) {
    println!(
        "{:<8} episodes {:>4} | mean score {:>9.1} | best score {:>6} | best tile {:>5} | success {:>5.1}% | mean length {:>7.1}",
        label,
        summary.episodes,
        summary.mean_score,
        summary.best_score,
        summary.best_tile,
        summary.success_rate * 100.0,
        summary.mean_length
    );
}

fn run_play(
    episodes: usize,
    seed: u64,
    max_steps: usize,
    render: bool,
    output: Option<PathBuf>,
    search: &SearchArgs,
) -> Result<()> {
    let config = search.resolve()?;
    info!("playing {} episode(s) with {:?}", episodes, config);
    let agent = Agent::Mcts(config);

    let mut records = Vec::with_capacity(episodes);
    for i in 0..episodes {
        let start = Instant::now();
        let record = play_episode(&agent, episode_seed(seed, i), max_steps, render)?;
        println!(
            "Episode {}/{}: score {}, max tile {}, {} moves, success {} ({:.1}s)",
            i + 1,
            episodes,
            record.score,
            record.max_tile,
            record.length,
            record.success,
            start.elapsed().as_secs_f64()
        );
        records.push(record);
    }

    print_summary("mcts", &Summary::from_records(&records));

    if let Some(path) = output {
        write_records(&path, &records)?;
        println!("Saved {} episode(s) to {:?}", records.len(), path);
    }
    Ok(())
}

fn run_evaluation(episodes: usize, seed: u64, max_steps: usize, search: &SearchArgs) -> Result<()> {
    let config = search.resolve()?;
    println!(
        "Evaluating MCTS ({} iterations, c = {}, gamma = {}) against random play over {} episodes",
        config.iterations, config.c, config.gamma, episodes
    );
    println!("================================================");

    let start = Instant::now();
    let mut summaries = Vec::new();
    for agent in [Agent::Mcts(config), Agent::Random] {
        let records = (0..episodes)
            .into_par_iter()
            .map(|i| play_episode(&agent, episode_seed(seed, i), max_steps, false))
            .collect::<Result<Vec<_>>>()?;
        summaries.push((agent.name(), Summary::from_records(&records)));
    }

    for (label, summary) in &summaries {
        print_summary(label, summary);
    }
    println!("Finished in {:.1}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            episodes,
            seed,
            max_steps,
            render,
            output,
            search,
        } => run_play(episodes, seed, max_steps, render, output, &search),
        Commands::Evaluate {
            episodes,
            seed,
            max_steps,
            search,
        } => run_evaluation(episodes, seed, max_steps, &search),
    }
}
