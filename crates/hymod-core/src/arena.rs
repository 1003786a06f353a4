/// Backing storage for reservoir water levels.
///
/// One contiguous buffer holds every simulated step's levels (n quick + 1
/// slow per step). Ledger entries refer to their step's levels through a
/// `Slot` index rather than a pointer, so cloning the arena leaves every
/// recorded index valid and moving it is an ordinary Rust move. The arena
/// is append-only: slots are never evicted for the life of the model.
use std::collections::HashMap;

use crate::errors::{ModelError, ModelResult};
use crate::TimeStep;

/// Index of one step's level block inside the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot(usize);

#[derive(Debug, Clone, Default)]
pub struct CascadeArena {
    /// Levels per step: n quick + 1 slow.
    width: usize,
    /// Contiguous level storage, `width` values per slot.
    levels: Vec<f64>,
    slots: HashMap<TimeStep, Slot>,
}

impl CascadeArena {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            levels: Vec::new(),
            slots: HashMap::new(),
        }
    }

    /// Number of levels per slot.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of registered slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Return the slot registered at `t`, appending a zeroed one if the
    /// step has not been simulated before.
    pub fn ensure(&mut self, t: TimeStep) -> Slot {
        if let Some(&slot) = self.slots.get(&t) {
            return slot;
        }
        let slot = Slot(self.slots.len());
        self.levels.resize(self.levels.len() + self.width, 0.0);
        self.slots.insert(t, slot);
        slot
    }

    /// Slot registered at `t`, if any.
    pub fn slot_at(&self, t: TimeStep) -> Option<Slot> {
        self.slots.get(&t).copied()
    }

    /// Extend the known time horizon: register a slot at `t` and
    /// pre-allocate room for `n_steps` further steps so per-step growth
    /// does not reallocate mid-run.
    pub fn reserve(&mut self, t: TimeStep, n_steps: usize) -> ModelResult<()> {
        if n_steps == 0 {
            return Err(ModelError::InvalidHorizon(n_steps));
        }
        self.ensure(t);
        self.levels.reserve(n_steps * self.width);
        Ok(())
    }

    /// Levels stored in `slot`.
    pub fn levels(&self, slot: Slot) -> &[f64] {
        let start = slot.0 * self.width;
        &self.levels[start..start + self.width]
    }

    /// Mutable levels stored in `slot`.
    pub fn levels_mut(&mut self, slot: Slot) -> &mut [f64] {
        let start = slot.0 * self.width;
        &mut self.levels[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_appends_zeroed_slot() {
        let mut arena = CascadeArena::new(4);
        let slot = arena.ensure(10);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.levels(slot), &[0.0; 4]);
    }

    #[test]
    fn ensure_is_idempotent_per_key() {
        let mut arena = CascadeArena::new(4);
        let first = arena.ensure(10);
        arena.levels_mut(first).copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let again = arena.ensure(10);
        assert_eq!(first, again);
        assert_eq!(arena.levels(again), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn keys_need_not_be_contiguous() {
        let mut arena = CascadeArena::new(2);
        let a = arena.ensure(5);
        let b = arena.ensure(100);
        let c = arena.ensure(-3);
        arena.levels_mut(b).copy_from_slice(&[7.0, 8.0]);
        assert_eq!(arena.levels(a), &[0.0, 0.0]);
        assert_eq!(arena.levels(b), &[7.0, 8.0]);
        assert_eq!(arena.levels(c), &[0.0, 0.0]);
    }

    #[test]
    fn slots_survive_growth() {
        // Indices stay valid however much the buffer reallocates.
        let mut arena = CascadeArena::new(3);
        let early = arena.ensure(0);
        arena.levels_mut(early).copy_from_slice(&[1.0, 2.0, 3.0]);
        for t in 1..500 {
            arena.ensure(t);
        }
        assert_eq!(arena.levels(early), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn clone_is_independent() {
        let mut arena = CascadeArena::new(2);
        let slot = arena.ensure(0);
        arena.levels_mut(slot).copy_from_slice(&[1.0, 2.0]);

        let mut copy = arena.clone();
        let copy_slot = copy.slot_at(0).unwrap();
        copy.levels_mut(copy_slot).copy_from_slice(&[9.0, 9.0]);

        assert_eq!(arena.levels(slot), &[1.0, 2.0]);
        assert_eq!(copy.levels(copy_slot), &[9.0, 9.0]);
    }

    #[test]
    fn reserve_rejects_empty_horizon() {
        let mut arena = CascadeArena::new(2);
        assert!(matches!(
            arena.reserve(0, 0),
            Err(ModelError::InvalidHorizon(0))
        ));
    }

    #[test]
    fn reserve_registers_the_anchor_step() {
        let mut arena = CascadeArena::new(2);
        arena.reserve(42, 10).unwrap();
        assert!(arena.slot_at(42).is_some());
        assert_eq!(arena.len(), 1);
    }
}
