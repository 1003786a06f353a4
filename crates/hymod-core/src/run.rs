/// hymod kernel orchestration.
///
/// - `step()`: execute a single timestep -> (State, Fluxes)
/// - `run()`: execute over precip/PET slices -> FluxesTimeseries
///
/// `step` is where preconditions are enforced: out-of-range storage,
/// negative precipitation, and NaN or negative reservoir levels are
/// reported as errors, never clamped.
use crate::errors::{ModelError, ModelResult};
use crate::et::EtParams;
use crate::fluxes::{Fluxes, FluxesTimeseries};
use crate::forcing::ForcingData;
use crate::params::Parameters;
use crate::processes;
use crate::routing;
use crate::state::State;
use crate::traits::HydrologicalModel;

fn validate(state: &State, params: &Parameters, input_flux: f64) -> ModelResult<()> {
    if !input_flux.is_finite() || input_flux < 0.0 {
        return Err(ModelError::Precondition(format!(
            "input flux {} must be finite and non-negative",
            input_flux
        )));
    }
    if !state.storage.is_finite()
        || state.storage < 0.0
        || state.storage > params.max_storage
    {
        return Err(ModelError::Precondition(format!(
            "soil storage {} outside [0, {}]",
            state.storage, params.max_storage
        )));
    }
    if state.reservoir_levels.len() != params.n_levels() {
        return Err(ModelError::Precondition(format!(
            "{} reservoir levels supplied, expected {}",
            state.reservoir_levels.len(),
            params.n_levels()
        )));
    }
    for (i, &level) in state.reservoir_levels.iter().enumerate() {
        if !level.is_finite() || level < 0.0 {
            return Err(ModelError::Precondition(format!(
                "reservoir level [{}] = {} must be finite and non-negative",
                i, level
            )));
        }
    }
    Ok(())
}

/// Execute one timestep of the model.
///
/// Soil accounting first (excess + ET), then routing of the excess
/// through the quick cascade and the slow reservoir.
pub fn step(
    state: &State,
    params: &Parameters,
    input_flux: f64,
    et_params: &EtParams,
) -> ModelResult<(State, Fluxes)> {
    validate(state, params, input_flux)?;

    // 1. Soil moisture accounting
    let (excess, filled) = processes::excess_runoff(state.storage, input_flux, params);
    let (new_storage, actual_et) = processes::apply_et(filled, et_params);

    // 2. Reservoir routing
    let mut levels = state.reservoir_levels.clone();
    let (quick_flow, slow_flow) =
        routing::route_excess(&mut levels, excess, params.b, params.kq, params.ks);

    let new_state = State {
        storage: new_storage,
        reservoir_levels: levels,
    };

    let fluxes = Fluxes {
        precip: input_flux,
        excess,
        actual_et,
        soil_storage: new_storage,
        quick_flow,
        slow_flow,
        streamflow: quick_flow + slow_flow,
    };

    Ok((new_state, fluxes))
}

/// Run the model over precip/PET slices.
///
/// PET values are wrapped as `EtParams::Potential`. If no initial state is
/// provided, uses `State::initialize(params)`.
pub fn run(
    params: &Parameters,
    precip: &[f64],
    pet: &[f64],
    initial_state: Option<&State>,
) -> ModelResult<FluxesTimeseries> {
    assert_eq!(
        precip.len(),
        pet.len(),
        "precip and pet must have the same length"
    );

    let mut state = match initial_state {
        Some(s) => s.clone(),
        None => State::initialize(params),
    };

    let mut outputs = FluxesTimeseries::with_capacity(precip.len());
    for (&p, &pe) in precip.iter().zip(pet) {
        let (new_state, fluxes) = step(&state, params, p, &EtParams::Potential { pet: pe })?;
        outputs.push(&fluxes);
        state = new_state;
    }

    Ok(outputs)
}

/// Run the model over a validated forcing series.
pub fn run_forcing(
    params: &Parameters,
    forcing: &ForcingData,
    initial_state: Option<&State>,
) -> ModelResult<FluxesTimeseries> {
    run(params, &forcing.precip, &forcing.pet, initial_state)
}

/// Forcing input for one step: precipitation and potential ET [mm].
#[derive(Debug, Clone, Copy)]
pub struct HymodForcing {
    pub precip: f64,
    pub pet: f64,
}

/// Marker type for the kernel trait implementation.
pub struct Hymod;

impl HydrologicalModel for Hymod {
    type Params = Parameters;
    type State = State;
    type Forcing = HymodForcing;
    type Fluxes = Fluxes;
    type FluxesTimeseries = FluxesTimeseries;
    type Context = ();

    fn prepare(_params: &Self::Params) -> Self::Context {}

    fn initialize_state(params: &Self::Params) -> Self::State {
        State::initialize(params)
    }

    fn step(
        state: &Self::State,
        params: &Self::Params,
        forcing: &Self::Forcing,
        _context: &Self::Context,
    ) -> ModelResult<(Self::State, Self::Fluxes)> {
        step(
            state,
            params,
            forcing.precip,
            &EtParams::Potential { pet: forcing.pet },
        )
    }
}
