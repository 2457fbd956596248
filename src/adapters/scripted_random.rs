//! Deterministic random source for tests and replays.

use std::collections::VecDeque;

use crate::ports::RandomSource;

/// Random source that replays scripted draws.
///
/// Uniform draws and index picks come from separate queues. Once a queue is
/// exhausted, uniform draws return `fallback_uniform` and picks return 0.
/// Picks are clamped into `[0, len)`.
///
/// # Examples
///
/// ```
/// use qtictactoe::{adapters::ScriptedRandom, ports::RandomSource};
///
/// let mut rng = ScriptedRandom::new().with_uniforms([0.25]).with_picks([2]);
/// assert_eq!(rng.uniform(), 0.25);
/// assert_eq!(rng.pick_index(3), 2);
/// assert_eq!(rng.pick_index(3), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    uniforms: VecDeque<f64>,
    picks: VecDeque<usize>,
    fallback_uniform: f64,
    uniform_calls: usize,
    pick_calls: usize,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self {
            uniforms: VecDeque::new(),
            picks: VecDeque::new(),
            fallback_uniform: 0.0,
            uniform_calls: 0,
            pick_calls: 0,
        }
    }

    pub fn with_uniforms(mut self, draws: impl IntoIterator<Item = f64>) -> Self {
        self.uniforms.extend(draws);
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Uniform value returned once the scripted draws run out
    pub fn with_fallback_uniform(mut self, value: f64) -> Self {
        self.fallback_uniform = value;
        self
    }

    pub fn uniform_calls(&self) -> usize {
        self.uniform_calls
    }

    pub fn pick_calls(&self) -> usize {
        self.pick_calls
    }
}

impl Default for ScriptedRandom {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform(&mut self) -> f64 {
        self.uniform_calls += 1;
        self.uniforms.pop_front().unwrap_or(self.fallback_uniform)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        self.pick_calls += 1;
        let pick = self.picks.pop_front().unwrap_or(0);
        pick.min(len.saturating_sub(1))
    }
}
