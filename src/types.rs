//! Newtype wrappers for state identity and learning-table keys.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::tictactoe::{Board, CELL_COUNT, Token};

/// Separator between the fingerprint and the cell index of a [`StateAction`]
pub const STATE_ACTION_SEPARATOR: char = '-';

/// Canonical textual identity of a board: nine row-major cell symbols.
///
/// Two boards with identical contents share a fingerprint regardless of
/// move history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn from_board(board: &Board) -> Self {
        Fingerprint(board.iter().map(Token::symbol).collect())
    }

    /// Parse and validate a fingerprint string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidFingerprint`] unless the input is exactly
    /// nine characters drawn from `X`, `O` and `_`.
    pub fn parse(value: &str) -> Result<Self, crate::Error> {
        let valid = value.chars().count() == CELL_COUNT
            && value.chars().all(|c| Token::from_symbol(c).is_some());
        if valid {
            Ok(Fingerprint(value.to_string()))
        } else {
            Err(crate::Error::InvalidFingerprint {
                fingerprint: value.to_string(),
            })
        }
    }

    /// Fingerprint of the empty board
    pub fn empty() -> Self {
        Self::from_board(&Board::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Row-major indices of the empty cells this fingerprint describes
    pub fn empty_cells(&self) -> Vec<usize> {
        self.0
            .chars()
            .enumerate()
            .filter(|&(_, c)| c == Token::Empty.symbol())
            .map(|(index, _)| index)
            .collect()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = crate::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl From<&Board> for Fingerprint {
    fn from(board: &Board) -> Self {
        Self::from_board(board)
    }
}

/// A (state, action) pair: the board before a move and the cell chosen.
///
/// Printed as `<fingerprint>-<cell>`, e.g. `X_O__X___-4`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateAction {
    state: Fingerprint,
    action: usize,
}

impl StateAction {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidPosition`] if `action` is not a cell index.
    pub fn new(state: Fingerprint, action: usize) -> Result<Self, crate::Error> {
        if action < CELL_COUNT {
            Ok(StateAction { state, action })
        } else {
            Err(crate::Error::InvalidPosition { position: action })
        }
    }

    pub fn state(&self) -> &Fingerprint {
        &self.state
    }

    pub fn action(&self) -> usize {
        self.action
    }
}

impl fmt::Display for StateAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.state, STATE_ACTION_SEPARATOR, self.action)
    }
}

impl FromStr for StateAction {
    type Err = crate::Error;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || crate::Error::InvalidStateActionKey {
            key: key.to_string(),
        };
        let (state, action) = key.split_once(STATE_ACTION_SEPARATOR).ok_or_else(invalid)?;
        let state = Fingerprint::parse(state).map_err(|_| invalid())?;
        let action = action.parse::<usize>().map_err(|_| invalid())?;
        StateAction::new(state, action).map_err(|_| invalid())
    }
}
