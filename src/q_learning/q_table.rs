//! Q-table implementation for temporal difference learning

use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;

use crate::{
    tictactoe::CELL_COUNT,
    types::{Fingerprint, StateAction},
};

/// Learned values for the actions of one state, indexed by cell
type ActionValues = [Option<f64>; CELL_COUNT];

/// Q-table mapping (state, action) pairs to Q-values
///
/// Two-level layout: the outer key is the board fingerprint, the inner slot is
/// the cell index. Each state's slots sit behind one map entry, so a
/// read-modify-write of a single (state, action) value is atomic while other
/// states stay available to concurrent readers.
///
/// Entries are only ever added or overwritten, never removed.
#[derive(Debug, Default)]
pub struct QTable {
    values: DashMap<String, ActionValues>,
    entries: AtomicUsize,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Q-value for a state-action pair, if it has been learned
    pub fn get(&self, state: &Fingerprint, action: usize) -> Option<f64> {
        self.values
            .get(state.as_str())
            .and_then(|slots| slots.get(action).copied().flatten())
    }

    pub fn get_key(&self, key: &StateAction) -> Option<f64> {
        self.get(key.state(), key.action())
    }

    /// Store a Q-value, overwriting any previous one.
    ///
    /// Returns false, leaving the table untouched, if `action` is not a cell.
    pub fn set(&self, state: &Fingerprint, action: usize, value: f64) -> bool {
        self.update(state, action, |_| value).is_some()
    }

    /// Atomically replace the value at (`state`, `action`).
    ///
    /// `f` receives the current value (`None` if unseen) and returns the new
    /// one. `f` must not access this table. Returns the stored value, or
    /// `None` without calling `f` if `action` is not a cell index.
    pub fn update<F>(&self, state: &Fingerprint, action: usize, f: F) -> Option<f64>
    where
        F: FnOnce(Option<f64>) -> f64,
    {
        (action < CELL_COUNT).then(|| self.update_slot(state, action, f))
    }

    /// [`QTable::update`] for an already validated key
    pub fn update_key<F>(&self, key: &StateAction, f: F) -> f64
    where
        F: FnOnce(Option<f64>) -> f64,
    {
        self.update_slot(key.state(), key.action(), f)
    }

    fn update_slot<F>(&self, state: &Fingerprint, action: usize, f: F) -> f64
    where
        F: FnOnce(Option<f64>) -> f64,
    {
        let mut slots = self
            .values
            .entry(state.as_str().to_string())
            .or_insert([None; CELL_COUNT]);
        let slot = &mut slots[action];
        let value = f(*slot);
        if slot.replace(value).is_none() {
            self.entries.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Snapshot of every learned (action, value) for a state, by ascending cell
    pub fn actions(&self, state: &Fingerprint) -> Vec<(usize, f64)> {
        self.values
            .get(state.as_str())
            .map(|slots| {
                slots
                    .iter()
                    .enumerate()
                    .filter_map(|(action, value)| value.map(|v| (action, v)))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Highest learned value for a state, `None` if the state is unseen
    pub fn max_value(&self, state: &Fingerprint) -> Option<f64> {
        self.values.get(state.as_str()).and_then(|slots| {
            slots
                .iter()
                .flatten()
                .copied()
                .fold(None, |best: Option<f64>, v| Some(best.map_or(v, |b| b.max(v))))
        })
    }

    pub fn contains_state(&self, state: &Fingerprint) -> bool {
        self.values.contains_key(state.as_str())
    }

    /// Total number of (state, action) values stored
    pub fn len(&self) -> usize {
        self.entries.load(Ordering::Relaxed)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct states with at least one learned action
    pub fn state_count(&self) -> usize {
        self.values.len()
    }
}
