/// Time-indexed state and flux ledger.
///
/// Maps each simulated step to its state entry and derived fluxes. Entries
/// are immutable after first write: re-recording a key is an error unless
/// replay mode is enabled for re-simulation or debugging. The ledger only
/// grows; history is retained for the life of the model.
use std::collections::HashMap;

use log::warn;

use crate::arena::Slot;
use crate::errors::{ModelError, ModelResult};
use crate::fluxes::Fluxes;
use crate::TimeStep;

/// Logical state of one simulated step. The reservoir levels live in the
/// cascade arena; `slot` indexes that step's block.
#[derive(Debug, Clone, Copy)]
pub struct StateEntry {
    /// Soil moisture storage [mm].
    pub storage: f64,
    /// Arena slot holding this step's reservoir levels.
    pub slot: Slot,
}

#[derive(Debug, Clone, Default)]
pub struct StateLedger {
    states: HashMap<TimeStep, StateEntry>,
    fluxes: HashMap<TimeStep, Fluxes>,
    replay: bool,
}

impl StateLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow overwriting recorded steps (re-simulation / debugging).
    pub fn set_replay(&mut self, enabled: bool) {
        self.replay = enabled;
    }

    pub fn replay_enabled(&self) -> bool {
        self.replay
    }

    /// Insert the entry for `t`. Fails with `DuplicateEntry` if the step
    /// was already recorded and replay is off.
    pub fn record(&mut self, t: TimeStep, state: StateEntry, fluxes: Fluxes) -> ModelResult<()> {
        if self.states.contains_key(&t) {
            if !self.replay {
                return Err(ModelError::DuplicateEntry(t));
            }
            warn!("replaying time step {t}: overwriting recorded entry");
        }
        self.states.insert(t, state);
        self.fluxes.insert(t, fluxes);
        Ok(())
    }

    /// Stored state for `t`. No implicit default: a missing predecessor
    /// is reported so callers supply a genuine seed.
    pub fn lookup(&self, t: TimeStep) -> ModelResult<&StateEntry> {
        self.states.get(&t).ok_or(ModelError::NoPriorState(t))
    }

    /// Derived fluxes recorded for `t`, if the step was simulated.
    pub fn fluxes_at(&self, t: TimeStep) -> Option<&Fluxes> {
        self.fluxes.get(&t)
    }

    pub fn contains(&self, t: TimeStep) -> bool {
        self.states.contains_key(&t)
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
