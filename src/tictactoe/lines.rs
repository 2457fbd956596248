//! Winning line analysis

use super::{Board, Token};

/// Winning line indices on the 3x3 board, evaluated in this order
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a token fills any complete line
    ///
    /// Always false for `Token::Empty`.
    pub fn has_won(board: &Board, token: Token) -> bool {
        token.is_player() && Self::winning_line(board, token).is_some()
    }

    /// First line (in [`WINNING_LINES`] order) fully held by the token
    pub fn winning_line(board: &Board, token: Token) -> Option<[usize; 3]> {
        WINNING_LINES
            .iter()
            .find(|line| line.iter().all(|&idx| board.at(idx) == Some(token)))
            .copied()
    }

    /// Winner of the board, checking the first player before the second
    pub fn winner(board: &Board) -> Option<Token> {
        [Token::First, Token::Second]
            .into_iter()
            .find(|&token| Self::has_won(board, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(marks: &[(usize, Token)]) -> Board {
        let mut board = Board::new();
        for &(idx, token) in marks {
            board.set(idx / 3, idx % 3, token);
        }
        board
    }

    #[test]
    fn test_has_won_horizontal() {
        let board = board_with(&[(0, Token::First), (1, Token::First), (2, Token::First)]);

        assert!(LineAnalyzer::has_won(&board, Token::First));
        assert!(!LineAnalyzer::has_won(&board, Token::Second));
        assert_eq!(LineAnalyzer::winning_line(&board, Token::First), Some([0, 1, 2]));
    }

    #[test]
    fn test_has_won_vertical() {
        let board = board_with(&[(1, Token::Second), (4, Token::Second), (7, Token::Second)]);

        assert!(LineAnalyzer::has_won(&board, Token::Second));
        assert!(!LineAnalyzer::has_won(&board, Token::First));
    }

    #[test]
    fn test_has_won_anti_diagonal() {
        let board = board_with(&[(2, Token::First), (4, Token::First), (6, Token::First)]);

        assert_eq!(LineAnalyzer::winner(&board), Some(Token::First));
        assert_eq!(LineAnalyzer::winning_line(&board, Token::First), Some([2, 4, 6]));
    }

    #[test]
    fn test_empty_lines_never_win() {
        let board = Board::new();
        assert!(!LineAnalyzer::has_won(&board, Token::Empty));
        assert_eq!(LineAnalyzer::winner(&board), None);
    }

    #[test]
    fn test_first_player_checked_before_second() {
        // Unreachable in play, but the evaluation order must be deterministic
        let board = board_with(&[
            (0, Token::First),
            (1, Token::First),
            (2, Token::First),
            (6, Token::Second),
            (7, Token::Second),
            (8, Token::Second),
        ]);
        assert_eq!(LineAnalyzer::winner(&board), Some(Token::First));
    }
}
