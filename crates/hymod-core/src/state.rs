/// hymod kernel state.
///
/// Mutable state that evolves during simulation: the soil moisture store
/// and the reservoir levels, quick cascade first, slow reservoir last.
use smallvec::SmallVec;

use crate::constants::LEVELS_INLINE_CAPACITY;
use crate::params::Parameters;
use crate::traits::ModelState;

/// Reservoir-level vector: `[quick_0, .., quick_{n-1}, slow]`.
pub type Levels = SmallVec<[f64; LEVELS_INLINE_CAPACITY]>;

#[derive(Debug, Clone)]
pub struct State {
    /// Soil moisture storage [mm], in `[0, max_storage]`.
    pub storage: f64,
    /// Water levels of the n quick reservoirs followed by the slow one.
    pub reservoir_levels: Levels,
}

impl State {
    /// Create initial state from parameters: empty soil store, dry
    /// reservoirs.
    pub fn initialize(params: &Parameters) -> Self {
        Self {
            storage: 0.0,
            reservoir_levels: smallvec::smallvec![0.0; params.n_levels()],
        }
    }

    /// Build a state from an explicit seed. Length of `levels` must be
    /// n + 1; values are taken as-is and validated by the first step.
    pub fn from_seed(storage: f64, levels: &[f64]) -> Self {
        Self {
            storage,
            reservoir_levels: SmallVec::from_slice(levels),
        }
    }

    /// Number of quick reservoirs.
    pub fn n_quick(&self) -> usize {
        self.reservoir_levels.len() - 1
    }

    /// Level of the slow reservoir.
    pub fn slow_level(&self) -> f64 {
        self.reservoir_levels[self.reservoir_levels.len() - 1]
    }
}

impl ModelState for State {
    fn to_vec(&self) -> Vec<f64> {
        let mut arr = Vec::with_capacity(1 + self.reservoir_levels.len());
        arr.push(self.storage);
        arr.extend_from_slice(&self.reservoir_levels);
        arr
    }

    /// Layout: `[storage, quick_0, .., quick_{n-1}, slow]`. The reservoir
    /// count is inferred from the slice length.
    fn from_slice(arr: &[f64]) -> Result<Self, String> {
        if arr.len() < 3 {
            return Err(format!(
                "state array too short: {} < minimum 3 (storage + 1 quick + slow)",
                arr.len()
            ));
        }
        Ok(Self {
            storage: arr[0],
            reservoir_levels: SmallVec::from_slice(&arr[1..]),
        })
    }

    fn array_len(&self) -> usize {
        1 + self.reservoir_levels.len()
    }
}
