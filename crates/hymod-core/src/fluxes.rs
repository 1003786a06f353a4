/// Per-timestep flux outputs.
///
/// One entry per simulated step; derived values, recomputed only when the
/// step is (re-)simulated. The `Fluxes` derive generates the companion
/// `FluxesTimeseries` collection used by `run()` and the bindings.
use hymod_macros::Fluxes;

use crate::traits::FluxesTimeseriesOps;

#[derive(Debug, Clone, Copy, Default, Fluxes)]
pub struct Fluxes {
    /// Precipitation input for the step [mm].
    pub precip: f64,
    /// Excess water handed to the router [mm].
    pub excess: f64,
    /// Actual evapotranspiration extracted from the soil store [mm].
    pub actual_et: f64,
    /// Soil moisture storage after the step [mm].
    pub soil_storage: f64,
    /// Discharge from the last quick reservoir [mm].
    pub quick_flow: f64,
    /// Discharge from the slow reservoir [mm].
    pub slow_flow: f64,
    /// Total catchment discharge: quick + slow [mm].
    pub streamflow: f64,
}

impl FluxesTimeseriesOps<Fluxes> for FluxesTimeseries {
    fn with_capacity(n: usize) -> Self {
        FluxesTimeseries::with_capacity(n)
    }

    fn push(&mut self, f: &Fluxes) {
        FluxesTimeseries::push(self, f);
    }

    fn len(&self) -> usize {
        FluxesTimeseries::len(self)
    }

    fn is_empty(&self) -> bool {
        FluxesTimeseries::is_empty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeseries_collects_fields() {
        let mut ts = FluxesTimeseries::with_capacity(2);
        assert!(FluxesTimeseriesOps::<Fluxes>::is_empty(&ts));

        ts.push(&Fluxes {
            precip: 10.0,
            excess: 2.0,
            streamflow: 0.5,
            ..Default::default()
        });
        ts.push(&Fluxes {
            precip: 0.0,
            excess: 0.0,
            streamflow: 0.3,
            ..Default::default()
        });

        assert_eq!(ts.len(), 2);
        assert_eq!(ts.precip, vec![10.0, 0.0]);
        assert_eq!(ts.streamflow, vec![0.5, 0.3]);
    }

    #[test]
    fn field_names_match_struct_order() {
        assert_eq!(
            Fluxes::field_names(),
            &[
                "precip",
                "excess",
                "actual_et",
                "soil_storage",
                "quick_flow",
                "slow_flow",
                "streamflow"
            ]
        );
    }
}
