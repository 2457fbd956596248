//! Common test utilities for the qtictactoe test suite.

use qtictactoe::{
    Game, QLearningAgent,
    adapters::StdRandom,
    app::LearningParams,
    ports::RandomSource,
};

/// Agent with an empty table and the given rates
pub fn agent(learning_rate: f64, discount_factor: f64, exploration_chance: f64) -> QLearningAgent {
    QLearningAgent::new(
        LearningParams::new(learning_rate, discount_factor, exploration_chance)
            .expect("test rates are valid"),
    )
}

/// Play row-major cells in order, each by the player to move.
///
/// Returns false as soon as one move is rejected.
pub fn play_cells(game: &mut Game, cells: &[usize]) -> bool {
    cells
        .iter()
        .all(|&cell| game.submit_cell(cell, game.current_player()))
}

/// Play uniformly random legal moves until the game ends, returning the cells played
pub fn play_random_game(game: &mut Game, rng: &mut StdRandom) -> Vec<usize> {
    let mut played = Vec::new();
    while !game.is_terminal() {
        let empty = game.board().empty_cells();
        let cell = empty[rng.pick_index(empty.len())];
        assert!(game.submit_cell(cell, game.current_player()));
        played.push(cell);
    }
    played
}
