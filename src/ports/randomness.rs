//! Randomness port - the only source of chance used by the agent

/// Source of random draws for exploration and tie-breaking
///
/// Implementations must be `Send` so a training run can carry its own source
/// onto a background thread.
///
/// # Examples
///
/// ```
/// use qtictactoe::{adapters::StdRandom, ports::RandomSource};
///
/// let mut rng = StdRandom::seeded(7);
/// let draw = rng.uniform();
/// assert!((0.0..1.0).contains(&draw));
/// assert!(rng.pick_index(3) < 3);
/// ```
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// Uniform index in `[0, len)`; callers never pass `len == 0`
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn pick_index(&mut self, len: usize) -> usize {
        (**self).pick_index(len)
    }
}
