/// Core traits for the hymod crate.
///
/// `CatchmentArea` is the narrow external contract a driving framework
/// consumes: compute one step's response given input flux and stored
/// history. `HydrologicalModel` is the stateless kernel interface:
/// prepare context, initialize state, step, and run over a timeseries.
use crate::errors::ModelResult;
use crate::et::EtParams;
use crate::TimeStep;

/// Per-timestep catchment response contract.
///
/// Implementors own their state history; callers only supply the step's
/// forcing. No time-stepping control lives behind this trait.
pub trait CatchmentArea {
    /// Compute total discharge for step `t`, given the state recorded at
    /// `t - dt`.
    fn compute_response(
        &mut self,
        input_flux: f64,
        t: TimeStep,
        dt: TimeStep,
        et_params: &EtParams,
    ) -> ModelResult<f64>;
}

/// Parameter-vector contract shared with calibration tooling.
pub trait ModelParams: Sized {
    const N_PARAMS: usize;
    const PARAM_NAMES: &'static [&'static str];
    const PARAM_BOUNDS: &'static [(f64, f64)];

    fn from_array(arr: &[f64]) -> Result<Self, String>;
    fn to_array(&self) -> Vec<f64>;
}

/// Flat-array state contract, used by the bindings layer.
pub trait ModelState: Sized {
    fn to_vec(&self) -> Vec<f64>;
    fn from_slice(arr: &[f64]) -> Result<Self, String>;
    fn array_len(&self) -> usize;
}

/// Stateless kernel interface for lumped models.
pub trait HydrologicalModel {
    type Params;
    type State: Clone;
    type Forcing: Copy;
    type Fluxes;
    type FluxesTimeseries: FluxesTimeseriesOps<Self::Fluxes>;
    /// Precomputed context derived from params, constant for a given run.
    type Context;

    /// Precompute any run-constant data from parameters.
    fn prepare(params: &Self::Params) -> Self::Context;

    /// Create a default initial state from parameters.
    fn initialize_state(params: &Self::Params) -> Self::State;

    /// Execute one timestep: given state, params, forcing, and context,
    /// return the new state and fluxes.
    fn step(
        state: &Self::State,
        params: &Self::Params,
        forcing: &Self::Forcing,
        context: &Self::Context,
    ) -> ModelResult<(Self::State, Self::Fluxes)>;

    /// Run the model over a forcing timeseries.
    ///
    /// Default implementation: prepare context, initialize/use provided
    /// state, loop over forcing calling step. The first failing step
    /// aborts the run.
    fn run(
        params: &Self::Params,
        forcing: &[Self::Forcing],
        initial_state: Option<&Self::State>,
    ) -> ModelResult<Self::FluxesTimeseries> {
        let context = Self::prepare(params);
        let mut state = match initial_state {
            Some(s) => s.clone(),
            None => Self::initialize_state(params),
        };

        let n = forcing.len();
        let mut outputs = Self::FluxesTimeseries::with_capacity(n);

        for f in forcing {
            let (new_state, fluxes) = Self::step(&state, params, f, &context)?;
            outputs.push(&fluxes);
            state = new_state;
        }

        Ok(outputs)
    }
}

/// Operations required on the timeseries collection type.
pub trait FluxesTimeseriesOps<F> {
    fn with_capacity(n: usize) -> Self;
    fn push(&mut self, f: &F);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}
