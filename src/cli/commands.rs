//! Subcommands of the `qtictactoe` binary

pub mod play;
pub mod train;
