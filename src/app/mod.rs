//! Application layer: configuration and object wiring.
//!
//! ```
//! use qtictactoe::app::{AgentConfig, App};
//!
//! let app = App::for_testing().with_default_seed(42).build();
//! let config = AgentConfig::default().with_exploration_chance(0.5);
//! let agent = app.create_agent(&config)?;
//! let mut rng = app.random_source(&config);
//! assert!(agent.train_self_play(10, &mut rng).is_some());
//! # Ok::<(), qtictactoe::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::{AgentConfig, LearningParams, TrainingConfig};
pub use container::{App, AppBuilder};
