//! Search settings: optional TOML file, overridden by command line flags.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use twenty48_mcts::MctsConfig;

/// Search parameters shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// TOML file with MCTS parameters; flags below take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// UCT exploration weight.
    #[arg(short, long)]
    pub c: Option<f64>,

    /// Discount factor applied to future rewards.
    #[arg(short, long)]
    pub gamma: Option<f64>,

    /// Search iterations per move.
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Maximum tree depth per iteration.
    #[arg(long)]
    pub simulation_depth: Option<usize>,

    /// Maximum rollout length.
    #[arg(long)]
    pub rollout_depth: Option<usize>,
}

impl SearchArgs {
    /// Build the effective config: defaults, then the file, then flags.
    pub fn resolve(&self) -> Result<MctsConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MctsConfig::default(),
        };

        if let Some(c) = self.c {
            config.c = c;
        }
        if let Some(gamma) = self.gamma {
            config.gamma = gamma;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(depth) = self.simulation_depth {
            config.simulation_depth = depth;
        }
        if let Some(depth) = self.rollout_depth {
            config.rollout_depth = depth;
        }

        config.validate().context("Invalid MCTS configuration")?;
        Ok(config)
    }
}

/// Parse an MCTS config from TOML; missing keys keep their defaults.
fn parse_config(text: &str) -> Result<MctsConfig> {
    toml::from_str(text).context("Failed to parse MCTS config")
}

fn load_config(path: &Path) -> Result<MctsConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    parse_config(&text).with_context(|| format!("Invalid config file {:?}", path))
}
