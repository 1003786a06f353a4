/// hymod numerical constants and model contract.
///
/// Centralises all fixed values used throughout the model.

// -- Model contract constants --

/// Parameter names in order.
pub const PARAM_NAMES: &[&str] = &["max_storage", "a", "b", "ks", "kq", "n"];

/// Number of calibrated parameters.
pub const N_PARAMS: usize = 6;

/// Inline capacity for reservoir-level vectors: n quick + 1 slow stays on
/// the stack for any cascade within the `n` bounds.
pub const LEVELS_INLINE_CAPACITY: usize = 11;

// -- Parameter bounds --

/// Parameter bounds for calibration: (min, max).
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Maximum soil storage capacity [mm].
pub const MAX_STORAGE_BOUNDS: Bounds = Bounds {
    min: 1.0,
    max: 2000.0,
};

/// Shape exponent of the storage-capacity distribution [-].
pub const A_BOUNDS: Bounds = Bounds { min: 0.0, max: 2.0 };

/// Partition coefficient, slow-flow share of excess [-].
pub const B_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Slow-reservoir recession coefficient [1/step].
pub const KS_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Quick-reservoir recession coefficient [1/step].
pub const KQ_BOUNDS: Bounds = Bounds { min: 0.0, max: 1.0 };

/// Number of quick-flow reservoirs in series.
pub const N_RESERVOIR_BOUNDS: Bounds = Bounds {
    min: 1.0,
    max: 10.0,
};

/// All bounds in PARAM_NAMES order, for loop validation.
pub const ALL_BOUNDS: &[Bounds] = &[
    MAX_STORAGE_BOUNDS,
    A_BOUNDS,
    B_BOUNDS,
    KS_BOUNDS,
    KQ_BOUNDS,
    N_RESERVOIR_BOUNDS,
];

/// Parameter bounds as (min, max) tuples, in PARAM_NAMES order.
pub const PARAM_BOUNDS: &[(f64, f64)] = &[
    (1.0, 2000.0), // max_storage
    (0.0, 2.0),    // a
    (0.0, 1.0),    // b
    (0.0, 1.0),    // ks
    (0.0, 1.0),    // kq
    (1.0, 10.0),   // n
];

// -- Evapotranspiration formula constants --

/// Hamon coefficient [mm K / (kPa day)] scaled for daylight in hours.
pub const HAMON_COEFF: f64 = 29.8;

/// Celsius offset in the Hamon denominator.
pub const HAMON_KELVIN_OFFSET: f64 = 273.2;

/// Tetens saturation vapour pressure: es = A * exp(B*T / (T + C)) [kPa].
pub const SAT_VP_A: f64 = 0.6108;
pub const SAT_VP_B: f64 = 17.27;
pub const SAT_VP_C: f64 = 237.3;

/// Priestley-Taylor coefficient [-].
pub const PT_ALPHA: f64 = 1.26;

/// Psychrometric constant [kPa/degC].
pub const PSYCHROMETRIC: f64 = 0.066;

/// Latent heat of vaporisation [MJ/kg].
pub const LATENT_HEAT: f64 = 2.45;
