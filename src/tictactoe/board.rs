//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Fingerprint;

/// Side length of the board
pub const BOARD_SIZE: usize = 3;

/// Number of cells on the board
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The mark placed in a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// The player that opens every game (`X`)
    First,
    /// The player that answers (`O`)
    Second,
    /// No mark (`_`)
    Empty,
}

impl Token {
    /// Single-character display symbol used in fingerprints
    pub fn symbol(self) -> char {
        match self {
            Token::First => 'X',
            Token::Second => 'O',
            Token::Empty => '_',
        }
    }

    pub fn from_symbol(c: char) -> Option<Token> {
        match c {
            'X' => Some(Token::First),
            'O' => Some(Token::Second),
            '_' => Some(Token::Empty),
            _ => None,
        }
    }

    /// Get the opposing player token
    ///
    /// `Empty` has no opponent and maps to itself.
    pub fn opponent(self) -> Token {
        match self {
            Token::First => Token::Second,
            Token::Second => Token::First,
            Token::Empty => Token::Empty,
        }
    }

    pub fn is_player(self) -> bool {
        self != Token::Empty
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A 3x3 grid of tokens stored row-major
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Token; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Create a board with every cell empty
    pub fn new() -> Self {
        Board {
            cells: [[Token::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Convert signed coordinates into array indices.
    ///
    /// Returns `None` for any coordinate outside 0-2, so callers never index
    /// out of bounds.
    pub fn checked_coords(row: i32, col: i32) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|&r| r < BOARD_SIZE)?;
        let col = usize::try_from(col).ok().filter(|&c| c < BOARD_SIZE)?;
        Some((row, col))
    }

    /// Row and column of a row-major cell index
    pub fn coords_of(index: usize) -> Option<(usize, usize)> {
        (index < CELL_COUNT).then(|| (index / BOARD_SIZE, index % BOARD_SIZE))
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Token> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Token at a row-major cell index
    pub fn at(&self, index: usize) -> Option<Token> {
        Self::coords_of(index).map(|(row, col)| self.cells[row][col])
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, token: Token) {
        self.cells[row][col] = token;
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    /// Row-major indices of every empty cell
    pub fn empty_cells(&self) -> Vec<usize> {
        self.iter()
            .enumerate()
            .filter(|&(_, token)| token == Token::Empty)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.iter().all(Token::is_player)
    }

    /// Canonical state identity: the nine cell symbols concatenated row by row
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_board(self)
    }

    /// Rebuild a board from its fingerprint
    pub fn from_fingerprint(fingerprint: &Fingerprint) -> Self {
        let mut board = Board::new();
        for (index, c) in fingerprint.as_str().chars().enumerate() {
            let (row, col) = (index / BOARD_SIZE, index % BOARD_SIZE);
            // Fingerprints are validated on construction
            board.cells[row][col] = Token::from_symbol(c).unwrap_or(Token::Empty);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(|t| t.symbol().to_string()).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Token::First.opponent(), Token::Second);
        assert_eq!(Token::Second.opponent(), Token::First);
        assert_eq!(Token::Empty.opponent(), Token::Empty);
    }

    #[test]
    fn test_symbols_round_trip() {
        for token in [Token::First, Token::Second, Token::Empty] {
            assert_eq!(Token::from_symbol(token.symbol()), Some(token));
        }
        assert_eq!(Token::from_symbol('.'), None);
    }

    #[test]
    fn test_checked_coords_rejects_out_of_range() {
        assert_eq!(Board::checked_coords(0, 2), Some((0, 2)));
        assert_eq!(Board::checked_coords(-1, 0), None);
        assert_eq!(Board::checked_coords(0, -1), None);
        assert_eq!(Board::checked_coords(3, 0), None);
        assert_eq!(Board::checked_coords(0, 3), None);
    }

    #[test]
    fn test_empty_cells() {
        let mut board = Board::new();
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());

        board.set(0, 0, Token::First);
        board.set(2, 1, Token::Second);
        assert_eq!(board.empty_cells(), vec![1, 2, 3, 4, 5, 6, 8]);
        assert_eq!(board.at(7), Some(Token::Second));
        assert_eq!(board.at(9), None);
    }

    #[test]
    fn test_display_grid() {
        let mut board = Board::new();
        board.set(1, 1, Token::First);
        assert_eq!(board.to_string(), "_ _ _\n_ X _\n_ _ _");
    }
}
