//! Game state machine

use serde::{Deserialize, Serialize};

use super::{
    board::{Board, Token},
    lines::LineAnalyzer,
};
use crate::types::Fingerprint;

/// Status of a game, derived from the board after every accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    FirstWins,
    SecondWins,
    Tie,
}

impl GameStatus {
    /// Recompute the status from board contents.
    ///
    /// A win for the first player takes precedence over a win for the second,
    /// and a tie needs a full board with no winning line.
    pub fn evaluate(board: &Board) -> Self {
        match LineAnalyzer::winner(board) {
            Some(Token::First) => GameStatus::FirstWins,
            Some(_) => GameStatus::SecondWins,
            None if board.is_full() => GameStatus::Tie,
            None => GameStatus::InProgress,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning token, if any
    pub fn winner(self) -> Option<Token> {
        match self {
            GameStatus::FirstWins => Some(Token::First),
            GameStatus::SecondWins => Some(Token::Second),
            GameStatus::InProgress | GameStatus::Tie => None,
        }
    }

    /// Human-readable status line
    pub fn message(self) -> &'static str {
        match self {
            GameStatus::InProgress => "Still playing...",
            GameStatus::FirstWins => "X wins!",
            GameStatus::SecondWins => "O wins!",
            GameStatus::Tie => "It's a cat's game!",
        }
    }
}

/// A single game of Tic-Tac-Toe
///
/// The board only changes through [`Game::submit_move`], which keeps the
/// status and the player to move consistent with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    status: GameStatus,
    current_player: Token,
}

impl Game {
    /// Create a fresh game: empty board, in progress, first player to move
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            status: GameStatus::InProgress,
            current_player: Token::First,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Token expected to move next (never `Empty`)
    pub fn current_player(&self) -> Token {
        self.current_player
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.board.fingerprint()
    }

    /// Place `token` at (`row`, `col`).
    ///
    /// Returns `false` without touching the game when it is already over, a
    /// coordinate is outside 0-2, the cell is occupied, or it is not
    /// `token`'s turn.
    pub fn submit_move(&mut self, row: i32, col: i32, token: Token) -> bool {
        if self.status.is_terminal() || token != self.current_player {
            return false;
        }
        let Some((row, col)) = Board::checked_coords(row, col) else {
            return false;
        };
        if self.board.get(row, col) != Some(Token::Empty) {
            return false;
        }

        self.board.set(row, col, token);
        self.current_player = token.opponent();
        self.status = GameStatus::evaluate(&self.board);
        true
    }

    /// Place `token` at a row-major cell index (0-8)
    pub fn submit_cell(&mut self, index: usize, token: Token) -> bool {
        match Board::coords_of(index) {
            Some((row, col)) => self.submit_move(row as i32, col as i32, token),
            None => false,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let game = Game::new();
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.current_player(), Token::First);
        assert_eq!(game.fingerprint().as_str(), "_________");
    }

    #[test]
    fn test_move_flips_player() {
        let mut game = Game::new();
        assert!(game.submit_move(1, 1, Token::First));
        assert_eq!(game.current_player(), Token::Second);
        assert!(game.submit_cell(0, Token::Second));
        assert_eq!(game.current_player(), Token::First);
        assert_eq!(game.fingerprint().as_str(), "O___X____");
    }

    #[test]
    fn test_rejects_wrong_player_and_occupied() {
        let mut game = Game::new();
        assert!(!game.submit_move(0, 0, Token::Second));
        assert!(!game.submit_move(0, 0, Token::Empty));
        assert!(game.submit_move(0, 0, Token::First));
        let before = game.clone();
        assert!(!game.submit_move(0, 0, Token::Second));
        assert_eq!(game, before);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut game = Game::new();
        let before = game.clone();
        assert!(!game.submit_move(-1, 0, Token::First));
        assert!(!game.submit_move(0, 3, Token::First));
        assert!(!game.submit_move(i32::MAX, i32::MIN, Token::First));
        assert!(!game.submit_cell(9, Token::First));
        assert_eq!(game, before);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(GameStatus::Tie.message(), "It's a cat's game!");
        assert_eq!(GameStatus::FirstWins.winner(), Some(Token::First));
        assert_eq!(GameStatus::Tie.winner(), None);
    }
}
