/// Soil moisture accounting process functions.
///
/// Pure functions implementing the nonlinear storage-capacity scheme: a
/// Pareto (power-law) distribution of point storage capacities across the
/// catchment's sub-areas splits precipitation into storage fill and excess
/// runoff. All inputs are assumed pre-validated by `run::step`.
use crate::et::{self, EtParams};
use crate::params::Parameters;

/// Capacity equivalent of the current fill level [mm].
///
/// Inverse of the Pareto storage curve: the point capacity below which
/// every sub-area is saturated when the catchment-average store holds
/// `storage`.
pub fn equivalent_capacity(storage: f64, params: &Parameters) -> f64 {
    let smax = params.max_storage;
    let cmax = params.cmax();
    let remaining = (1.0 - storage / smax).max(0.0);
    cmax * (1.0 - remaining.powf(1.0 / (1.0 + params.a)))
}

/// Catchment-average storage implied by a point capacity [mm].
fn storage_at_capacity(capacity: f64, params: &Parameters) -> f64 {
    let cmax = params.cmax();
    let remaining = (1.0 - capacity / cmax).max(0.0);
    params.max_storage * (1.0 - remaining.powf(1.0 + params.a))
}

/// Split precipitation into excess runoff and storage fill.
///
/// Two excess components: overflow from already-saturated sub-areas, and
/// the remainder of infiltration that the capacity curve cannot absorb.
/// Returns (excess, new_storage); new storage is clamped to
/// `[0, max_storage]` as a floating-point guard only.
pub fn excess_runoff(storage: f64, precip: f64, params: &Parameters) -> (f64, f64) {
    let cmax = params.cmax();

    let c0 = equivalent_capacity(storage, params);
    let saturated_overflow = (precip - (cmax - c0)).max(0.0);

    let c1 = (c0 + precip).min(cmax);
    let filled = storage_at_capacity(c1, params);
    let infiltration_excess = ((precip - saturated_overflow) - (filled - storage)).max(0.0);

    let excess = saturated_overflow + infiltration_excess;
    let new_storage = filled.clamp(0.0, params.max_storage);

    (excess, new_storage)
}

/// Extract actual ET from the store. Returns (new_storage, actual_et).
pub fn apply_et(storage: f64, et_params: &EtParams) -> (f64, f64) {
    let actual = et::calc_et(storage, et_params);
    ((storage - actual).max(0.0), actual)
}
