//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use microgrid_sim::production::{Hydro, HydroInputs, NoncombustionAsset, ResourceKey};
use microgrid_sim::sim::controller::{Controller, DispatchStrategy};
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::load::ElectricalLoad;
use microgrid_sim::sim::resources::Resources;

/// One year of hourly steps.
pub const HOURS_PER_YEAR: usize = 8760;

/// Uniform random series in `[0, max)`, reproducible from `seed`.
pub fn random_series(n_points: usize, max: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n_points).map(|_| rng.random_range(0.0..max)).collect()
}

/// Hydro inputs for a 100 kW Pelton unit on the given reservoir, starting empty.
pub fn hydro_inputs(reservoir_capacity_m3: f64) -> HydroInputs {
    let mut inputs = HydroInputs {
        reservoir_capacity_m3,
        init_reservoir_state: 0.0,
        capital_cost: 250_000.0,
        operation_maintenance_cost_kwh: 0.03,
        resource_key: ResourceKey(0),
        ..HydroInputs::default()
    };
    let production = &mut inputs.noncombustion_inputs.production_inputs;
    production.capacity_kw = 100.0;
    production.nominal_inflation_annual = 0.02;
    production.nominal_discount_annual = 0.04;
    inputs
}

/// Engine driving one hydro asset with an hourly load and inflow.
pub fn hydro_engine(inputs: &HydroInputs, load_kw: Vec<f64>, inflow_m3hr: Vec<f64>) -> Engine {
    let n_points = load_kw.len();
    let load = ElectricalLoad::hourly(load_kw).expect("valid load");
    let mut resources = Resources::new(n_points);
    resources
        .add_series(inputs.resource_key, inflow_m3hr)
        .expect("valid inflow");
    let hydro = Hydro::new(n_points, inputs).expect("valid hydro inputs");
    Engine::new(
        load,
        resources,
        vec![NoncombustionAsset::from(hydro)],
        Controller::new(DispatchStrategy::LoadFollowing),
    )
    .expect("engine builds")
}

/// Year-long engine with random load and inflow and a 1000 m3 reservoir.
pub fn random_year_engine(seed: u64) -> Engine {
    let load_kw = random_series(HOURS_PER_YEAR, 120.0, seed);
    let inflow_m3hr = random_series(HOURS_PER_YEAR, 90.0, seed.wrapping_add(1));
    hydro_engine(&hydro_inputs(1000.0), load_kw, inflow_m3hr)
}
