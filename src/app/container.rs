//! Wiring of agents, trainers and random sources.

use std::sync::Arc;

use super::config::AgentConfig;
use crate::{
    Result,
    adapters::StdRandom,
    q_learning::{QLearningAgent, TrainingSupervisor},
};

/// Application context that creates domain objects from configuration.
///
/// # Examples
///
/// ```
/// use qtictactoe::app::{AgentConfig, App};
///
/// let app = App::new();
/// let config = AgentConfig::default().with_seed(42);
/// let agent = app.create_agent(&config)?;
/// let supervisor = app.create_supervisor(agent);
/// assert!(!supervisor.is_training());
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct App {
    /// Default random seed (None = non-deterministic)
    default_seed: Option<u64>,
}

impl App {
    /// Create a new app with non-deterministic randomness
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Create a builder, mainly for tests that need reproducible runs
    pub fn for_testing() -> AppBuilder {
        AppBuilder::new()
    }

    /// Create a shareable agent with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if any rate is out of range.
    pub fn create_agent(&self, config: &AgentConfig) -> Result<Arc<QLearningAgent>> {
        Ok(Arc::new(QLearningAgent::from_config(config)?))
    }

    /// Create the supervisor that runs background training for `agent`
    pub fn create_supervisor(&self, agent: Arc<QLearningAgent>) -> TrainingSupervisor {
        TrainingSupervisor::new(agent)
    }

    /// Random source for `config`; the config seed overrides the app default
    pub fn random_source(&self, config: &AgentConfig) -> StdRandom {
        StdRandom::new(config.seed.or(self.default_seed))
    }
}

/// Builder for constructing an app with custom defaults.
#[derive(Debug, Default)]
pub struct AppBuilder {
    default_seed: Option<u64>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self { default_seed: None }
    }

    /// Set a default random seed for every random source the app creates.
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        self.default_seed = Some(seed);
        self
    }

    pub fn build(self) -> App {
        App {
            default_seed: self.default_seed,
        }
    }
}
