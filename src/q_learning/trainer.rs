//! Background self-play training with a single active run at a time

use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::agent::QLearningAgent;
use crate::{Error, Result, ports::RandomSource};

/// Outcome of a completed training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Self-play games played in this run
    pub games_played: usize,
    /// Learned (state, action) pairs once the run finished
    pub memory_size: usize,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Observable state of a training run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingStatus {
    Running,
    Finished,
}

/// Result of asking the supervisor to start a run
#[derive(Debug)]
pub enum TrainingLaunch {
    /// A new run was spawned
    Started(TrainingHandle),
    /// Another run is still active; nothing was started
    AlreadyRunning {
        current_game: usize,
        total_games: usize,
    },
}

/// Handle to a training run executing on its own thread
#[derive(Debug)]
pub struct TrainingHandle {
    thread: JoinHandle<TrainingReport>,
    total_games: usize,
}

impl TrainingHandle {
    pub fn status(&self) -> TrainingStatus {
        if self.thread.is_finished() {
            TrainingStatus::Finished
        } else {
            TrainingStatus::Running
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == TrainingStatus::Finished
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    /// Wait for the run to finish and collect its report.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TrainingPanicked`] if the training thread panicked.
    pub fn join(self) -> Result<TrainingReport> {
        self.thread.join().map_err(|_| Error::TrainingPanicked)
    }
}

/// Starts background training runs for one shared agent
///
/// The in-progress flag lives on the agent, so every supervisor (and every
/// direct [`QLearningAgent::train_self_play`] call) for that agent competes
/// for the same single run.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use qtictactoe::{
///     adapters::StdRandom,
///     app::LearningParams,
///     q_learning::{QLearningAgent, TrainingLaunch, TrainingSupervisor},
/// };
///
/// let agent = Arc::new(QLearningAgent::new(LearningParams::default()));
/// let supervisor = TrainingSupervisor::new(Arc::clone(&agent));
///
/// let TrainingLaunch::Started(handle) = supervisor.start(10, StdRandom::seeded(1))? else {
///     unreachable!("no other run is active");
/// };
/// let report = handle.join()?;
/// assert_eq!(report.games_played, 10);
/// assert!(agent.memory_size() > 0);
/// # Ok::<(), qtictactoe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TrainingSupervisor {
    agent: Arc<QLearningAgent>,
}

impl TrainingSupervisor {
    pub fn new(agent: Arc<QLearningAgent>) -> Self {
        Self { agent }
    }

    pub fn agent(&self) -> &Arc<QLearningAgent> {
        &self.agent
    }

    /// Whether a run is currently active
    pub fn is_training(&self) -> bool {
        self.agent.is_training()
    }

    /// Current game index and game count of the latest run
    pub fn progress(&self) -> (usize, usize) {
        (self.agent.current_game_index(), self.agent.total_games())
    }

    /// Start `games` self-play games on a background thread.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the thread could not be spawned; the
    /// in-progress flag is cleared again in that case.
    pub fn start<R>(&self, games: usize, rng: R) -> Result<TrainingLaunch>
    where
        R: RandomSource + 'static,
    {
        let Some(slot) = QLearningAgent::claim_training(Arc::clone(&self.agent), games) else {
            let (current_game, total_games) = self.progress();
            info!(current_game, total_games, "training already running");
            return Ok(TrainingLaunch::AlreadyRunning {
                current_game,
                total_games,
            });
        };

        let thread = thread::Builder::new()
            .name("self-play-training".to_string())
            .spawn(move || {
                let mut rng = rng;
                slot.agent().run_self_play(games, &mut rng)
            })
            .map_err(|source| Error::Io {
                operation: "spawn training thread".to_string(),
                source,
            })?;

        Ok(TrainingLaunch::Started(TrainingHandle {
            thread,
            total_games: games,
        }))
    }
}
