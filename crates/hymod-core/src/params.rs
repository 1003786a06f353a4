/// hymod calibrated parameters.
///
/// Six parameters that define model behavior. Immutable for the model's
/// lifetime; owned by the realization and never mutated after construction.
///
/// - `max_storage`: maximum soil storage capacity [mm]
/// - `a`: shape exponent of the Pareto storage-capacity distribution [-]
/// - `b`: partition coefficient, slow-flow share of excess [-]
/// - `ks`: slow-reservoir recession coefficient [1/step]
/// - `kq`: quick-reservoir recession coefficient [1/step]
/// - `n`: number of identical quick-flow reservoirs in series
use crate::constants::{ALL_BOUNDS, N_PARAMS, PARAM_BOUNDS, PARAM_NAMES};
use crate::traits::ModelParams;

#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    pub max_storage: f64,
    pub a: f64,
    pub b: f64,
    pub ks: f64,
    pub kq: f64,
    pub n: usize,
}

impl Parameters {
    /// Create new Parameters, returning an error if any value is out of
    /// bounds.
    pub fn new(
        max_storage: f64,
        a: f64,
        b: f64,
        ks: f64,
        kq: f64,
        n: usize,
    ) -> Result<Self, String> {
        let values = [max_storage, a, b, ks, kq, n as f64];
        for (i, &val) in values.iter().enumerate() {
            let bounds = &ALL_BOUNDS[i];
            if !(bounds.min..=bounds.max).contains(&val) {
                return Err(format!(
                    "{} = {} is out of bounds [{}, {}]",
                    PARAM_NAMES[i], val, bounds.min, bounds.max
                ));
            }
        }
        Ok(Self {
            max_storage,
            a,
            b,
            ks,
            kq,
            n,
        })
    }

    /// Largest point storage capacity of the Pareto distribution [mm].
    pub fn cmax(&self) -> f64 {
        self.max_storage * (1.0 + self.a)
    }

    /// Number of routed reservoir levels: n quick + 1 slow.
    pub fn n_levels(&self) -> usize {
        self.n + 1
    }
}

impl ModelParams for Parameters {
    const N_PARAMS: usize = N_PARAMS;
    const PARAM_NAMES: &'static [&'static str] = PARAM_NAMES;
    const PARAM_BOUNDS: &'static [(f64, f64)] = PARAM_BOUNDS;

    fn from_array(arr: &[f64]) -> Result<Self, String> {
        if arr.len() != N_PARAMS {
            return Err(format!(
                "expected {} parameters, got {}",
                N_PARAMS,
                arr.len()
            ));
        }
        let n = arr[5];
        if n.fract() != 0.0 {
            return Err(format!("n = {} must be a whole reservoir count", n));
        }
        Self::new(arr[0], arr[1], arr[2], arr[3], arr[4], n as usize)
    }

    fn to_array(&self) -> Vec<f64> {
        vec![
            self.max_storage,
            self.a,
            self.b,
            self.ks,
            self.kq,
            self.n as f64,
        ]
    }
}
