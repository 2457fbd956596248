//! Tic-Tac-Toe game engine

pub mod board;
pub mod game;
pub mod lines;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, Token};
pub use game::{Game, GameStatus};
pub use lines::{LineAnalyzer, WINNING_LINES};
