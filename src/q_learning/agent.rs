//! Q-learning agent
//!
//! Chooses moves from a shared [`QTable`] and learns from self-play with a
//! one-step temporal difference update.

use std::{
    ops::Deref,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Instant,
};

use tracing::{debug, info, instrument, warn};

use super::{q_table::QTable, trainer::TrainingReport};
use crate::{
    Result,
    app::{AgentConfig, LearningParams},
    ports::RandomSource,
    tictactoe::{Game, GameStatus},
    types::{Fingerprint, StateAction},
};

/// Reward for a move that wins the game, for either side
pub const WIN_REWARD: f64 = 10.0;
/// Reward for a move that fills the board without a winner
pub const TIE_REWARD: f64 = 5.0;

/// Tabular Q-learning agent (ε-greedy, self-play)
///
/// Every method takes `&self`: the table is a concurrent map and the progress
/// counters are atomic, so one agent can be trained on a background thread
/// while another thread asks it for moves. The agent owns its training slot:
/// at most one self-play run is active per agent, however it was started.
#[derive(Debug)]
pub struct QLearningAgent {
    table: Arc<QTable>,
    params: LearningParams,
    current_game: AtomicUsize,
    total_games: AtomicUsize,
    training: AtomicBool,
}

/// Exclusive hold on an agent's training slot, released on drop
pub(crate) struct TrainingSlot<A: Deref<Target = QLearningAgent>>(A);

impl<A: Deref<Target = QLearningAgent>> TrainingSlot<A> {
    pub(crate) fn agent(&self) -> &QLearningAgent {
        &self.0
    }
}

impl<A: Deref<Target = QLearningAgent>> Drop for TrainingSlot<A> {
    fn drop(&mut self) {
        self.0.training.store(false, Ordering::Release);
    }
}

impl QLearningAgent {
    /// Create an agent with an empty table
    pub fn new(params: LearningParams) -> Self {
        Self::with_table(params, Arc::new(QTable::new()))
    }

    /// Create an agent from unvalidated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if any rate is out of range.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Ok(Self::new(config.validate()?))
    }

    /// Create an agent around an existing table
    pub fn with_table(params: LearningParams, table: Arc<QTable>) -> Self {
        Self {
            table,
            params,
            current_game: AtomicUsize::new(0),
            total_games: AtomicUsize::new(0),
            training: AtomicBool::new(false),
        }
    }

    pub fn params(&self) -> LearningParams {
        self.params
    }

    pub fn table(&self) -> &Arc<QTable> {
        &self.table
    }

    /// Number of (state, action) pairs learned so far
    pub fn memory_size(&self) -> usize {
        self.table.len()
    }

    /// Index of the self-play game in progress (or last played) in the current run
    pub fn current_game_index(&self) -> usize {
        self.current_game.load(Ordering::Relaxed)
    }

    /// Game count of the active (or last) training run
    pub fn total_games(&self) -> usize {
        self.total_games.load(Ordering::Relaxed)
    }

    /// Whether a self-play run is active on this agent
    pub fn is_training(&self) -> bool {
        self.training.load(Ordering::Acquire)
    }

    /// Claim the training slot of `agent` for a run of `games` games.
    ///
    /// Returns `None` while another run holds the slot.
    pub(crate) fn claim_training<A>(agent: A, games: usize) -> Option<TrainingSlot<A>>
    where
        A: Deref<Target = QLearningAgent>,
    {
        agent
            .training
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        agent.total_games.store(games, Ordering::Relaxed);
        Some(TrainingSlot(agent))
    }

    /// Reward earned by the move that produced `status`
    pub fn reward(status: GameStatus) -> f64 {
        match status {
            GameStatus::FirstWins | GameStatus::SecondWins => WIN_REWARD,
            GameStatus::Tie => TIE_REWARD,
            GameStatus::InProgress => 0.0,
        }
    }

    /// Pick a cell (0-8) for the player to move, or `None` once the game is over.
    ///
    /// Unseen states, and a successful exploration draw when `explore` is set,
    /// give a uniformly random empty cell. Otherwise one of the actions sharing
    /// the highest learned value is picked uniformly.
    pub fn choose_move<R>(&self, game: &Game, explore: bool, rng: &mut R) -> Option<usize>
    where
        R: RandomSource + ?Sized,
    {
        if game.is_terminal() {
            return None;
        }

        let state = game.fingerprint();
        let known = self.table.actions(&state);

        // The exploration draw is only taken for states with learned actions
        if known.is_empty() || (explore && rng.uniform() < self.params.exploration_chance()) {
            let candidates = game.board().empty_cells();
            if candidates.is_empty() {
                return None;
            }
            return Some(candidates[rng.pick_index(candidates.len())]);
        }

        let best = known
            .iter()
            .map(|&(_, value)| value)
            .fold(f64::NEG_INFINITY, f64::max);
        // Exact equality: ties are values identical to the maximum
        let tied: Vec<usize> = known
            .iter()
            .filter(|&&(_, value)| value == best)
            .map(|&(action, _)| action)
            .collect();

        Some(tied[rng.pick_index(tied.len())])
    }

    /// Temporal difference update of one (state, action) value.
    ///
    /// Q(s,a) ← Q(s,a) + α[r − γ max_a' Q(s',a') − Q(s,a)]
    ///
    /// The successor maximum is taken over every learned action of
    /// `next_state`, defaulting to 0 when there are none. The future term is
    /// subtracted, not added. Returns the stored value.
    pub fn update_value(&self, key: &StateAction, reward: f64, next_state: &Fingerprint) -> f64 {
        // Read the successor before locking the updated entry
        let next_best = self.table.max_value(next_state).unwrap_or(0.0);
        let alpha = self.params.learning_rate();
        let gamma = self.params.discount_factor();

        self.table.update_key(key, |current| {
            let current = current.unwrap_or(0.0);
            current + alpha * (reward - gamma * next_best - current)
        })
    }

    /// Run `num_games` self-play games on the calling thread, learning after
    /// every move.
    ///
    /// Returns `None` without playing if another run is active on this agent.
    pub fn train_self_play<R>(&self, num_games: usize, rng: &mut R) -> Option<TrainingReport>
    where
        R: RandomSource + ?Sized,
    {
        let Some(slot) = Self::claim_training(self, num_games) else {
            info!(
                current_game = self.current_game_index(),
                total_games = self.total_games(),
                "training already running"
            );
            return None;
        };
        Some(slot.agent().run_self_play(num_games, rng))
    }

    /// Self-play loop; the caller holds the training slot.
    ///
    /// Resets the game counter, then increments it before each game.
    #[instrument(skip(self, rng))]
    pub(crate) fn run_self_play<R>(&self, num_games: usize, rng: &mut R) -> TrainingReport
    where
        R: RandomSource + ?Sized,
    {
        info!(games = num_games, "training agent by self-play");
        let started = Instant::now();
        self.current_game.store(0, Ordering::Relaxed);

        for _ in 0..num_games {
            let index = self.current_game.fetch_add(1, Ordering::Relaxed) + 1;
            let (status, moves) = self.play_training_game(rng);
            debug!(game = index, ?status, moves, "self-play game finished");
        }

        let report = TrainingReport {
            games_played: num_games,
            memory_size: self.memory_size(),
            elapsed: started.elapsed(),
        };
        info!(
            memory_size = report.memory_size,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "training finished"
        );
        report
    }

    /// Play one game against itself; returns the final status and move count
    fn play_training_game<R>(&self, rng: &mut R) -> (GameStatus, usize)
    where
        R: RandomSource + ?Sized,
    {
        let mut game = Game::new();
        let mut moves = 0;

        while let Some(action) = self.choose_move(&game, true, rng) {
            let Ok(key) = StateAction::new(game.fingerprint(), action) else {
                break;
            };
            if !game.submit_cell(action, game.current_player()) {
                warn!(state = %key.state(), action, "engine rejected a self-play move");
                break;
            }
            moves += 1;

            let reward = Self::reward(game.status());
            self.update_value(&key, reward, &game.fingerprint());
        }

        (game.status(), moves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::ScriptedRandom, tictactoe::Token};

    fn agent(alpha: f64, gamma: f64, epsilon: f64) -> QLearningAgent {
        QLearningAgent::new(LearningParams::new(alpha, gamma, epsilon).unwrap())
    }

    #[test]
    fn test_reward_values() {
        assert_eq!(QLearningAgent::reward(GameStatus::FirstWins), 10.0);
        assert_eq!(QLearningAgent::reward(GameStatus::SecondWins), 10.0);
        assert_eq!(QLearningAgent::reward(GameStatus::Tie), 5.0);
        assert_eq!(QLearningAgent::reward(GameStatus::InProgress), 0.0);
    }

    #[test]
    fn test_update_from_unseen_state() {
        let agent = agent(0.5, 0.9, 0.0);
        let key = StateAction::new(Fingerprint::empty(), 4).unwrap();
        let next = Fingerprint::parse("____X____").unwrap();

        // 0.0 + 0.5 * (10.0 - 0.9 * 0.0 - 0.0)
        assert_eq!(agent.update_value(&key, 10.0, &next), 5.0);
        assert_eq!(agent.table().get_key(&key), Some(5.0));
    }

    #[test]
    fn test_update_subtracts_discounted_successor() {
        let agent = agent(0.5, 0.9, 0.0);
        let key = StateAction::new(Fingerprint::empty(), 4).unwrap();
        let next = Fingerprint::parse("____X____").unwrap();
        agent.table().set(&next, 0, 2.0);
        agent.table().set(&next, 1, 4.0);
        agent.table().set(key.state(), 4, 1.0);

        // 1.0 + 0.5 * (0.0 - 0.9 * 4.0 - 1.0) = -1.3
        let updated = agent.update_value(&key, 0.0, &next);
        assert!((updated - -1.3).abs() < 1e-12);
    }

    #[test]
    fn test_choose_move_none_when_over() {
        let agent = agent(0.5, 0.9, 0.5);
        let mut game = Game::new();
        for (cell, token) in [
            (0, Token::First),
            (3, Token::Second),
            (1, Token::First),
            (4, Token::Second),
            (2, Token::First),
        ] {
            assert!(game.submit_cell(cell, token));
        }
        assert_eq!(game.status(), GameStatus::FirstWins);

        let mut rng = ScriptedRandom::new();
        assert_eq!(agent.choose_move(&game, true, &mut rng), None);
        assert_eq!(agent.choose_move(&game, false, &mut rng), None);
    }

    #[test]
    fn test_exploit_picks_highest_value() {
        let agent = agent(0.5, 0.9, 0.5);
        let state = Fingerprint::empty();
        agent.table().set(&state, 0, 1.0);
        agent.table().set(&state, 4, 3.0);
        agent.table().set(&state, 8, 2.0);

        let mut rng = ScriptedRandom::new();
        assert_eq!(agent.choose_move(&Game::new(), false, &mut rng), Some(4));
        assert_eq!(rng.uniform_calls(), 0);
    }

    #[test]
    fn test_exploration_draw_below_chance_explores() {
        let agent = agent(0.5, 0.9, 0.5);
        agent.table().set(&Fingerprint::empty(), 4, 3.0);

        // Draw 0.1 < 0.5 explores; pick 7 selects cell 7 of the nine empty cells
        let mut rng = ScriptedRandom::new().with_uniforms([0.1]).with_picks([7]);
        assert_eq!(agent.choose_move(&Game::new(), true, &mut rng), Some(7));

        // Draw 0.9 >= 0.5 exploits
        let mut rng = ScriptedRandom::new().with_uniforms([0.9]).with_picks([7]);
        assert_eq!(agent.choose_move(&Game::new(), true, &mut rng), Some(4));
    }

    #[test]
    fn test_self_play_single_game() {
        let agent = agent(0.5, 0.9, 0.95);
        let mut rng = crate::adapters::StdRandom::seeded(11);
        let report = agent.train_self_play(1, &mut rng).unwrap();

        assert_eq!(report.games_played, 1);
        assert!(!agent.is_training());
        assert_eq!(agent.total_games(), 1);
        assert_eq!(agent.current_game_index(), 1);
        assert!(agent.memory_size() >= 5);
        assert!(agent.table().contains_state(&Fingerprint::empty()));
        assert_eq!(report.memory_size, agent.memory_size());
    }

    #[test]
    fn test_self_play_refused_while_slot_is_held() {
        let agent = agent(0.5, 0.9, 0.95);
        let slot = QLearningAgent::claim_training(&agent, 50).unwrap();
        assert!(agent.is_training());
        assert!(QLearningAgent::claim_training(&agent, 5).is_none());

        let mut rng = crate::adapters::StdRandom::seeded(2);
        assert_eq!(agent.train_self_play(5, &mut rng), None);
        assert_eq!(agent.memory_size(), 0);
        assert_eq!(agent.total_games(), 50);

        drop(slot);
        assert!(!agent.is_training());
        let report = agent.train_self_play(5, &mut rng).unwrap();
        assert_eq!(report.games_played, 5);
    }
}
