/// Lumped catchment realization.
///
/// The public per-timestep entry point. Composes soil moisture accounting
/// and reservoir routing into a single discharge value, and keeps every
/// simulated step's state and fluxes in a time-indexed ledger backed by
/// the cascade arena. Cloning duplicates the arena and ledger; slot
/// indices stay valid in the clone, so the two instances are fully
/// independent. Moving is an ordinary Rust move.
use log::debug;

use crate::arena::CascadeArena;
use crate::errors::{ModelError, ModelResult};
use crate::et::{self, EtParams};
use crate::fluxes::Fluxes;
use crate::forcing::ForcingConfig;
use crate::ledger::{StateEntry, StateLedger};
use crate::output::OutputSink;
use crate::params::Parameters;
use crate::run;
use crate::state::State;
use crate::traits::CatchmentArea;
use crate::TimeStep;

#[derive(Clone)]
pub struct LumpedRealization {
    params: Parameters,
    forcing: ForcingConfig,
    output: Box<dyn OutputSink>,
    ledger: StateLedger,
    arena: CascadeArena,
    initial_time: TimeStep,
}

impl LumpedRealization {
    /// Construct a realization and seed its ledger at `initial_time`.
    ///
    /// `initial_levels` must hold n quick levels followed by the slow
    /// level. The seed state is validated the same way a step input is.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        forcing: ForcingConfig,
        output: Box<dyn OutputSink>,
        initial_storage: f64,
        max_storage: f64,
        a: f64,
        b: f64,
        ks: f64,
        kq: f64,
        n: usize,
        initial_levels: &[f64],
        initial_time: TimeStep,
    ) -> ModelResult<Self> {
        let params = Parameters::new(max_storage, a, b, ks, kq, n)
            .map_err(ModelError::Precondition)?;
        Self::from_parts(forcing, output, params, initial_storage, initial_levels, initial_time)
    }

    /// Construct from already-validated parameters.
    pub fn from_parts(
        forcing: ForcingConfig,
        output: Box<dyn OutputSink>,
        params: Parameters,
        initial_storage: f64,
        initial_levels: &[f64],
        initial_time: TimeStep,
    ) -> ModelResult<Self> {
        if initial_levels.len() != params.n_levels() {
            return Err(ModelError::Precondition(format!(
                "{} initial levels supplied, expected {}",
                initial_levels.len(),
                params.n_levels()
            )));
        }
        if !initial_storage.is_finite()
            || initial_storage < 0.0
            || initial_storage > params.max_storage
        {
            return Err(ModelError::Precondition(format!(
                "initial storage {} outside [0, {}]",
                initial_storage, params.max_storage
            )));
        }
        for (i, &level) in initial_levels.iter().enumerate() {
            if !level.is_finite() || level < 0.0 {
                return Err(ModelError::Precondition(format!(
                    "initial level [{}] = {} must be finite and non-negative",
                    i, level
                )));
            }
        }

        let mut arena = CascadeArena::new(params.n_levels());
        let slot = arena.ensure(initial_time);
        arena.levels_mut(slot).copy_from_slice(initial_levels);

        let mut ledger = StateLedger::new();
        ledger.record(
            initial_time,
            StateEntry {
                storage: initial_storage,
                slot,
            },
            Fluxes::default(),
        )?;

        Ok(Self {
            params,
            forcing,
            output,
            ledger,
            arena,
            initial_time,
        })
    }

    /// Compute the catchment response for step `t`.
    ///
    /// Looks up the state recorded at `t - dt`, advances the soil store
    /// and reservoirs, records the new entry at `t`, forwards the fluxes
    /// to the output sink, and returns total discharge.
    pub fn get_response(
        &mut self,
        input_flux: f64,
        t: TimeStep,
        dt: TimeStep,
        et_params: &EtParams,
    ) -> ModelResult<f64> {
        if dt <= 0 {
            return Err(ModelError::Precondition(format!(
                "time step length {dt} must be positive"
            )));
        }
        if self.ledger.contains(t) && !self.ledger.replay_enabled() {
            return Err(ModelError::DuplicateEntry(t));
        }

        let previous = self.ledger.lookup(t - dt)?;
        let state = State::from_seed(previous.storage, self.arena.levels(previous.slot));

        let (new_state, fluxes) = run::step(&state, &self.params, input_flux, et_params)?;

        let slot = self.arena.ensure(t);
        self.arena
            .levels_mut(slot)
            .copy_from_slice(&new_state.reservoir_levels);
        self.ledger.record(
            t,
            StateEntry {
                storage: new_state.storage,
                slot,
            },
            fluxes,
        )?;
        self.output.write_step(t, &fluxes);

        Ok(fluxes.streamflow)
    }

    /// Actual ET extraction for a given soil moisture, without stepping.
    pub fn calc_et(&self, soil_moisture: f64, et_params: &EtParams) -> f64 {
        et::calc_et(soil_moisture, et_params)
    }

    /// Horizon-extension hint: pre-allocate level storage for `n` further
    /// steps starting at `t`.
    pub fn add_time(&mut self, t: TimeStep, n: usize) -> ModelResult<()> {
        debug!("extending level storage horizon at {t} by {n} steps");
        self.arena.reserve(t, n)
    }

    /// Allow re-simulating already-recorded steps.
    pub fn set_replay(&mut self, enabled: bool) {
        self.ledger.set_replay(enabled);
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn forcing(&self) -> &ForcingConfig {
        &self.forcing
    }

    pub fn initial_time(&self) -> TimeStep {
        self.initial_time
    }

    /// Recorded soil storage and reservoir levels for `t`, if simulated.
    pub fn state_at(&self, t: TimeStep) -> Option<(f64, &[f64])> {
        let entry = self.ledger.lookup(t).ok()?;
        Some((entry.storage, self.arena.levels(entry.slot)))
    }

    /// Recorded fluxes for `t`, if simulated.
    pub fn fluxes_at(&self, t: TimeStep) -> Option<&Fluxes> {
        self.ledger.fluxes_at(t)
    }

    /// Number of recorded steps, the seed included.
    pub fn recorded_steps(&self) -> usize {
        self.ledger.len()
    }
}

impl CatchmentArea for LumpedRealization {
    fn compute_response(
        &mut self,
        input_flux: f64,
        t: TimeStep,
        dt: TimeStep,
        et_params: &EtParams,
    ) -> ModelResult<f64> {
        self.get_response(input_flux, t, dt, et_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forcing::Resolution;
    use crate::output::NullSink;
    use approx::assert_relative_eq;

    const NO_ET: EtParams = EtParams::Potential { pet: 0.0 };

    fn test_forcing() -> ForcingConfig {
        ForcingConfig::new("gauge.csv", Resolution::Daily, 0, 1000).unwrap()
    }

    fn test_realization() -> LumpedRealization {
        LumpedRealization::new(
            test_forcing(),
            Box::new(NullSink),
            50.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[0.0; 4],
            0,
        )
        .unwrap()
    }

    #[test]
    fn construction_seeds_the_ledger() {
        let model = test_realization();
        assert_eq!(model.recorded_steps(), 1);
        let (storage, levels) = model.state_at(0).unwrap();
        assert_eq!(storage, 50.0);
        assert_eq!(levels, &[0.0; 4]);
        assert_eq!(model.initial_time(), 0);
    }

    #[test]
    fn construction_rejects_bad_seed() {
        // Wrong level count
        assert!(LumpedRealization::new(
            test_forcing(),
            Box::new(NullSink),
            50.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[0.0; 3],
            0,
        )
        .is_err());
        // Storage above capacity
        assert!(LumpedRealization::new(
            test_forcing(),
            Box::new(NullSink),
            250.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[0.0; 4],
            0,
        )
        .is_err());
        // Negative level
        assert!(LumpedRealization::new(
            test_forcing(),
            Box::new(NullSink),
            50.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[0.0, -1.0, 0.0, 0.0],
            0,
        )
        .is_err());
    }

    #[test]
    fn reference_scenario_through_facade() {
        let mut model = test_realization();
        let q = model.get_response(20.0, 1, 1, &NO_ET).unwrap();
        assert_relative_eq!(q, 0.25859036282375431, epsilon = 1e-10);

        let (storage, levels) = model.state_at(1).unwrap();
        assert_relative_eq!(storage, 67.799230954691453, epsilon = 1e-10);
        assert_relative_eq!(levels[3], 0.59420764223330769, epsilon = 1e-10);

        let fluxes = model.fluxes_at(1).unwrap();
        assert_relative_eq!(fluxes.excess, 2.2007690453085473, epsilon = 1e-10);
        assert_relative_eq!(
            fluxes.streamflow,
            fluxes.quick_flow + fluxes.slow_flow,
            epsilon = 1e-12
        );
    }

    #[test]
    fn missing_predecessor_is_reported() {
        let mut model = test_realization();
        let err = model.get_response(5.0, 10, 1, &NO_ET).unwrap_err();
        assert!(matches!(err, ModelError::NoPriorState(9)));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        let mut model = test_realization();
        assert!(model.get_response(5.0, 1, 0, &NO_ET).is_err());
        assert!(model.get_response(5.0, 1, -1, &NO_ET).is_err());
    }

    #[test]
    fn duplicate_step_is_rejected() {
        let mut model = test_realization();
        model.get_response(20.0, 1, 1, &NO_ET).unwrap();
        let err = model.get_response(20.0, 1, 1, &NO_ET).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateEntry(1)));
    }

    #[test]
    fn replay_is_bit_identical() {
        let mut model = test_realization();
        let first = model.get_response(20.0, 1, 1, &NO_ET).unwrap();

        model.set_replay(true);
        let again = model.get_response(20.0, 1, 1, &NO_ET).unwrap();
        assert_eq!(first.to_bits(), again.to_bits());
        assert_eq!(model.recorded_steps(), 2);
    }

    #[test]
    fn sparse_time_keys_are_allowed() {
        // dt = 10: keys jump but lookback still finds the predecessor.
        let mut model = test_realization();
        model.get_response(20.0, 10, 10, &NO_ET).unwrap();
        model.get_response(0.0, 20, 10, &NO_ET).unwrap();
        assert!(model.state_at(20).is_some());
        assert!(model.state_at(15).is_none());
    }

    #[test]
    fn discharge_recedes_over_dry_steps() {
        let mut model = LumpedRealization::new(
            test_forcing(),
            Box::new(NullSink),
            100.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[5.0, 3.0, 2.0, 10.0],
            0,
        )
        .unwrap();

        let mut previous = f64::INFINITY;
        for t in 1..=10 {
            let q = model.get_response(0.0, t, 1, &NO_ET).unwrap();
            assert!(q < previous, "discharge must strictly decrease at t={t}");
            previous = q;
        }
        assert!(previous < 0.5);
    }

    #[test]
    fn sink_receives_each_successful_step() {
        use crate::output::MemorySink;

        let sink = MemorySink::new();
        let mut model = LumpedRealization::new(
            test_forcing(),
            Box::new(sink.clone()),
            50.0,
            200.0,
            0.5,
            0.3,
            0.1,
            0.5,
            3,
            &[0.0; 4],
            0,
        )
        .unwrap();

        model.get_response(20.0, 1, 1, &NO_ET).unwrap();
        model.get_response(0.0, 2, 1, &NO_ET).unwrap();
        // A failed step hands nothing to the sink.
        let _ = model.get_response(0.0, 2, 1, &NO_ET).unwrap_err();

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, 1);
        assert_eq!(records[1].0, 2);
        assert_eq!(model.recorded_steps(), 3);
    }

    #[test]
    fn clone_is_aliasing_safe() {
        let mut original = test_realization();
        original.get_response(20.0, 1, 1, &NO_ET).unwrap();

        let mut copy = original.clone();
        copy.get_response(15.0, 2, 1, &NO_ET).unwrap();
        copy.set_replay(true);
        copy.get_response(0.0, 1, 1, &NO_ET).unwrap();

        // The original's recorded levels are untouched by the copy.
        let (storage, levels) = original.state_at(1).unwrap();
        assert_relative_eq!(storage, 67.799230954691453, epsilon = 1e-10);
        assert_relative_eq!(levels[3], 0.59420764223330769, epsilon = 1e-10);
        assert!(original.state_at(2).is_none());

        // And stepping the original does not disturb the copy.
        original.get_response(0.0, 2, 1, &NO_ET).unwrap();
        let copy_fluxes = copy.fluxes_at(2).unwrap();
        assert_relative_eq!(copy_fluxes.precip, 15.0, epsilon = 1e-12);
    }

    #[test]
    fn add_time_validates_horizon() {
        let mut model = test_realization();
        assert!(model.add_time(1, 0).is_err());
        model.add_time(1, 100).unwrap();
        // The hint must not disturb simulation.
        let q = model.get_response(20.0, 1, 1, &NO_ET).unwrap();
        assert_relative_eq!(q, 0.25859036282375431, epsilon = 1e-10);
    }

    #[test]
    fn calc_et_is_storage_limited() {
        let model = test_realization();
        let et = EtParams::Potential { pet: 4.0 };
        assert_eq!(model.calc_et(10.0, &et), 4.0);
        assert_eq!(model.calc_et(2.5, &et), 2.5);
    }

    #[test]
    fn compute_response_matches_get_response() {
        let mut a = test_realization();
        let mut b = test_realization();
        let direct = a.get_response(20.0, 1, 1, &NO_ET).unwrap();
        let via_trait = CatchmentArea::compute_response(&mut b, 20.0, 1, 1, &NO_ET).unwrap();
        assert_eq!(direct.to_bits(), via_trait.to_bits());
    }
}
