/// Evapotranspiration capability.
///
/// The soil accounting is polymorphic over the ET formula: each variant
/// carries the fields its formula needs, and `calc_et` dispatches without
/// inspecting anything beyond the demand computation. Demands are depths
/// per step [mm].
use crate::constants::{
    HAMON_COEFF, HAMON_KELVIN_OFFSET, LATENT_HEAT, PSYCHROMETRIC, PT_ALPHA, SAT_VP_A, SAT_VP_B,
    SAT_VP_C,
};

#[derive(Debug, Clone, Copy)]
pub enum EtParams {
    /// Externally computed potential ET demand [mm].
    Potential { pet: f64 },
    /// Temperature-index demand (Hamon): air temperature [degC] and
    /// daylight duration [h].
    TemperatureIndex { temp: f64, daylight_hours: f64 },
    /// Energy-balance demand (Priestley-Taylor): net radiation
    /// [MJ/m2/step] and air temperature [degC].
    EnergyBalance { net_radiation: f64, temp: f64 },
}

/// Tetens saturation vapour pressure [kPa] at air temperature [degC].
fn saturation_vapour_pressure(temp: f64) -> f64 {
    SAT_VP_A * (SAT_VP_B * temp / (temp + SAT_VP_C)).exp()
}

/// Potential demand for the step, before any storage limitation.
pub fn potential_demand(et_params: &EtParams) -> f64 {
    match *et_params {
        EtParams::Potential { pet } => pet.max(0.0),
        EtParams::TemperatureIndex {
            temp,
            daylight_hours,
        } => {
            let es = saturation_vapour_pressure(temp);
            HAMON_COEFF * daylight_hours * es / (temp + HAMON_KELVIN_OFFSET)
        }
        EtParams::EnergyBalance {
            net_radiation,
            temp,
        } => {
            let es = saturation_vapour_pressure(temp);
            let slope = 4098.0 * es / ((temp + SAT_VP_C) * (temp + SAT_VP_C));
            PT_ALPHA * slope / (slope + PSYCHROMETRIC) * net_radiation / LATENT_HEAT
        }
    }
}

/// Actual ET extraction from the soil store: demand limited by available
/// storage, never driving the store below zero.
pub fn calc_et(soil_moisture: f64, et_params: &EtParams) -> f64 {
    potential_demand(et_params).min(soil_moisture.max(0.0))
}
