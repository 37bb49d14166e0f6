//! Per-slot fetch lifecycle with a generation guard.
//!
//! Every `begin` tags the slot with a new generation. A response may only
//! settle the slot if it carries the slot's current generation; anything older
//! was superseded and is dropped.

use serde::{Deserialize, Serialize};

/// Tag identifying one `begin` on a slot. Strictly increasing per slot.
pub type Generation = u64;

/// What a consumer of a slot sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum FetchState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, FetchState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, FetchState::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            FetchState::Succeeded(v) => Some(v),
            _ => None,
        }
    }

    /// The failure message, if the slot failed.
    pub fn message(&self) -> Option<&str> {
        match self {
            FetchState::Failed(m) => Some(m),
            _ => None,
        }
    }
}

/// One independently tracked fetch lifecycle.
#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    generation: Generation,
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
        }
    }

    /// Move to `Pending` under a fresh generation and return it.
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        self.state = FetchState::Pending;
        self.generation
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation == self.generation
    }

    /// Settle the slot. Returns `false`, leaving the slot untouched, when
    /// `generation` has been superseded.
    pub fn resolve(&mut self, generation: Generation, outcome: Result<T, String>) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.state = match outcome {
            Ok(value) => FetchState::Succeeded(value),
            Err(message) => FetchState::Failed(message),
        };
        true
    }

    /// Back to `Idle`. Any response still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = FetchState::Idle;
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
