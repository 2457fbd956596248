//! Tabular Q-learning by self-play
//!
//! The agent keeps one value per (board fingerprint, cell) pair in a
//! concurrent [`QTable`] and learns with a one-step temporal difference
//! update after every self-play move.
//!
//! ## Usage Example
//!
//! ```
//! use qtictactoe::{
//!     adapters::StdRandom,
//!     app::AgentConfig,
//!     q_learning::QLearningAgent,
//!     tictactoe::Game,
//! };
//!
//! let agent = QLearningAgent::from_config(&AgentConfig::default())?;
//! let mut rng = StdRandom::seeded(42);
//!
//! let report = agent.train_self_play(100, &mut rng).expect("no other run is active");
//! assert_eq!(report.games_played, 100);
//! assert_eq!(agent.current_game_index(), 100);
//!
//! let cell = agent.choose_move(&Game::new(), false, &mut rng);
//! assert!(matches!(cell, Some(0..=8)));
//! # Ok::<(), qtictactoe::Error>(())
//! ```

pub mod agent;
pub mod q_table;
pub mod trainer;

// Public re-exports
pub use agent::{QLearningAgent, TIE_REWARD, WIN_REWARD};
pub use q_table::QTable;
pub use trainer::{TrainingHandle, TrainingLaunch, TrainingReport, TrainingStatus, TrainingSupervisor};
