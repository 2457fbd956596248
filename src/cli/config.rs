//! Shared configuration flags for CLI commands

use clap::Args;

use crate::app::{
    AgentConfig,
    config::{DEFAULT_DISCOUNT_FACTOR, DEFAULT_EXPLORATION_CHANCE, DEFAULT_LEARNING_RATE},
};

/// Agent flags common to every command
#[derive(Args, Debug, Clone)]
pub struct AgentArgs {
    /// Learning rate α, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount factor γ, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_DISCOUNT_FACTOR)]
    pub discount: f64,

    /// Chance of a random move during training, in [0, 1]
    #[arg(long, default_value_t = DEFAULT_EXPLORATION_CHANCE)]
    pub exploration: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl AgentArgs {
    /// Unvalidated agent configuration; validation happens on agent creation
    pub fn to_config(&self) -> AgentConfig {
        let config = AgentConfig::new(self.learning_rate, self.discount, self.exploration);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}
