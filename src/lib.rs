//! Tic-Tac-Toe engine with a tabular Q-learning agent
//!
//! This crate provides:
//! - A 3x3 game state machine with move validation, win/tie detection and a
//!   canonical board fingerprint
//! - A Q-learning agent that learns by self-play into a concurrent table
//! - Background training with a single active run and pollable progress
//! - A command-line front end for training and interactive play

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod ports;
pub mod q_learning;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use q_learning::{QLearningAgent, QTable, TrainingLaunch, TrainingSupervisor};
pub use tictactoe::{Game, GameStatus, Token};
pub use types::{Fingerprint, StateAction};
