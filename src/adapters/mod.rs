//! Adapters implementing domain ports.

pub mod scripted_random;
pub mod std_random;

pub use scripted_random::ScriptedRandom;
pub use std_random::StdRandom;
