//! Command-line front end: background training and interactive play

pub mod commands;
pub mod config;
pub mod output;
