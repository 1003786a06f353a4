/// hymod — a lumped conceptual rainfall-runoff model in Rust.
///
/// Nonlinear soil moisture accounting over a Pareto distribution of point
/// storage capacities, coupled to a cascade of linear quick-flow reservoirs
/// and a single slow-flow reservoir. The per-timestep entry point is
/// `realization::LumpedRealization`, which keeps a time-indexed ledger of
/// states and fluxes for lookback and replay.
pub mod arena;
pub mod constants;
pub mod errors;
pub mod et;
pub mod fluxes;
pub mod forcing;
pub mod ledger;
pub mod metrics;
pub mod output;
pub mod params;
pub mod processes;
pub mod realization;
pub mod routing;
pub mod run;
pub mod state;
pub mod traits;

/// Discrete simulation instant. Used as a mapping key, not an array index:
/// steps need not be contiguous and lookback must not shift prior entries.
pub type TimeStep = i64;
