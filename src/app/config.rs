//! Configuration types for agent creation and training runs.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default learning rate α
pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
/// Default discount factor γ
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
/// Default exploration chance ε
pub const DEFAULT_EXPLORATION_CHANCE: f64 = 0.95;
/// Default number of self-play games per training run
pub const DEFAULT_TRAINING_GAMES: usize = 16_000;

/// Configuration for creating a Q-learning agent.
///
/// # Examples
///
/// ```
/// use qtictactoe::app::AgentConfig;
///
/// let params = AgentConfig::default()
///     .with_learning_rate(0.3)
///     .with_exploration_chance(0.2)
///     .with_seed(42)
///     .validate()?;
/// assert_eq!(params.learning_rate(), 0.3);
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Probability of a random move during training, in [0, 1]
    pub exploration_chance: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl AgentConfig {
    pub fn new(learning_rate: f64, discount_factor: f64, exploration_chance: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            exploration_chance,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration_chance(mut self, exploration_chance: f64) -> Self {
        self.exploration_chance = exploration_chance;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every rate against its interval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending rate.
    pub fn validate(&self) -> Result<LearningParams> {
        LearningParams::new(
            self.learning_rate,
            self.discount_factor,
            self.exploration_chance,
        )
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_LEARNING_RATE,
            DEFAULT_DISCOUNT_FACTOR,
            DEFAULT_EXPLORATION_CHANCE,
        )
    }
}

/// Validated, immutable rate parameters of an agent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearningParams {
    learning_rate: f64,
    discount_factor: f64,
    exploration_chance: f64,
}

impl LearningParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the learning rate is outside
    /// (0, 1] or the discount factor or exploration chance is outside [0, 1].
    /// NaN is rejected everywhere.
    pub fn new(learning_rate: f64, discount_factor: f64, exploration_chance: f64) -> Result<Self> {
        if !(learning_rate > 0.0 && learning_rate <= 1.0) {
            return Err(Error::InvalidConfiguration {
                message: format!("learning rate {learning_rate} must be in (0, 1]"),
            });
        }
        if !(0.0..=1.0).contains(&discount_factor) {
            return Err(Error::InvalidConfiguration {
                message: format!("discount factor {discount_factor} must be in [0, 1]"),
            });
        }
        if !(0.0..=1.0).contains(&exploration_chance) {
            return Err(Error::InvalidConfiguration {
                message: format!("exploration chance {exploration_chance} must be in [0, 1]"),
            });
        }
        Ok(Self {
            learning_rate,
            discount_factor,
            exploration_chance,
        })
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn exploration_chance(&self) -> f64 {
        self.exploration_chance
    }
}

impl Default for LearningParams {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_chance: DEFAULT_EXPLORATION_CHANCE,
        }
    }
}

/// Training run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play games
    pub games: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_TRAINING_GAMES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = AgentConfig::default().validate().unwrap();
        assert_eq!(params, LearningParams::default());
        assert_eq!(params.exploration_chance(), 0.95);
    }

    #[test]
    fn test_learning_rate_bounds() {
        assert!(LearningParams::new(1.0, 0.9, 0.1).is_ok());
        assert!(LearningParams::new(0.0, 0.9, 0.1).is_err());
        assert!(LearningParams::new(1.01, 0.9, 0.1).is_err());
        assert!(LearningParams::new(f64::NAN, 0.9, 0.1).is_err());
    }

    #[test]
    fn test_closed_interval_bounds() {
        assert!(LearningParams::new(0.5, 0.0, 0.0).is_ok());
        assert!(LearningParams::new(0.5, 1.0, 1.0).is_ok());
        assert!(LearningParams::new(0.5, -0.1, 0.5).is_err());
        assert!(LearningParams::new(0.5, 0.5, 1.5).is_err());
        assert!(LearningParams::new(0.5, f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_error_names_offending_rate() {
        let err = AgentConfig::default()
            .with_discount_factor(2.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("discount factor 2"));
    }
}
