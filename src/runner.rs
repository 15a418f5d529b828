//! Scenario wiring: builds the load, resources, and fleet from a config and runs them.

use tracing::info;

use crate::config::{HydroConfig, ScenarioConfig};
use crate::error::{SimError, SimResult};
use crate::production::{
    Hydro, HydroInputs, NoncombustionAsset, NoncombustionInputs, ProductionInputs, ResourceKey,
};
use crate::sim::controller::Controller;
use crate::sim::engine::Engine;
use crate::sim::kpi::KpiReport;
use crate::sim::load::ElectricalLoad;
use crate::sim::profiles::SinusoidProfile;
use crate::sim::resources::Resources;
use crate::sim::types::StepResult;

/// Seed offset for inflow profiles so they are not correlated with the load.
const INFLOW_SEED_OFFSET: u64 = 1;

/// Everything a completed run produced.
#[derive(Debug)]
pub struct SimulationRun {
    /// The stepped engine, for per-asset series and the time axis.
    pub engine: Engine,
    pub results: Vec<StepResult>,
    pub kpis: KpiReport,
}

/// Builds a ready-to-run engine from a validated scenario.
///
/// Hydro asset `i` reads its inflow from resource key `i`.
///
/// # Errors
///
/// Returns [`SimError::InvalidConfiguration`] if the scenario fails
/// validation, and propagates load, resource, and asset construction errors.
pub fn build_engine(config: &ScenarioConfig, verbose: bool) -> SimResult<Engine> {
    let errors = config.validate();
    if !errors.is_empty() {
        let message = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(SimError::invalid("scenario", message));
    }

    let seed = config.simulation.seed;
    let load = build_load(config)?;
    let n_points = load.n_points();

    let mut resources = Resources::new(n_points);
    let mut assets: Vec<NoncombustionAsset> = Vec::with_capacity(config.hydro.len());
    for (i, hydro_config) in config.hydro.iter().enumerate() {
        let key = ResourceKey(i as u32);
        let inflow = &hydro_config.inflow;
        match &inflow.csv {
            Some(path) => resources.add_hydro_csv(key, path, load.time_vec_hrs())?,
            None => {
                let mut profile = SinusoidProfile::seasonal(
                    inflow.base_m3hr,
                    inflow.amp_m3hr,
                    inflow.phase_rad,
                    inflow.noise_std,
                    seed.wrapping_add(INFLOW_SEED_OFFSET + i as u64),
                );
                resources.add_series(key, profile.series(load.time_vec_hrs()))?;
            }
        }

        let inputs = hydro_inputs(config, hydro_config, key, verbose);
        assets.push(Hydro::new(n_points, &inputs)?.into());
    }

    Engine::new(
        load,
        resources,
        assets,
        Controller::new(config.simulation.strategy),
    )
}

fn build_load(config: &ScenarioConfig) -> SimResult<ElectricalLoad> {
    let lc = &config.load;
    if let Some(path) = &lc.csv {
        return ElectricalLoad::from_csv_path(path);
    }

    let s = &config.simulation;
    let time_vec_hrs: Vec<f64> = (0..s.n_points).map(|i| i as f64 * s.dt_hrs).collect();
    let mut profile =
        SinusoidProfile::daily(lc.base_kw, lc.amp_kw, lc.phase_rad, lc.noise_std, s.seed);
    let load_vec_kw = profile.series(&time_vec_hrs);
    ElectricalLoad::new(time_vec_hrs, load_vec_kw)
}

fn hydro_inputs(
    config: &ScenarioConfig,
    h: &HydroConfig,
    resource_key: ResourceKey,
    verbose: bool,
) -> HydroInputs {
    HydroInputs {
        noncombustion_inputs: NoncombustionInputs {
            production_inputs: ProductionInputs {
                verbose,
                is_sunk: h.is_sunk,
                capacity_kw: h.capacity_kw,
                nominal_inflation_annual: config.economics.nominal_inflation_annual,
                nominal_discount_annual: config.economics.nominal_discount_annual,
                replace_running_hrs: h.replace_running_hrs,
            },
        },
        resource_key,
        fluid_density_kgm3: h.fluid_density_kgm3,
        net_head_m: h.net_head_m,
        reservoir_capacity_m3: h.reservoir_capacity_m3,
        init_reservoir_state: h.init_reservoir_state,
        turbine_type: h.turbine_type,
        capital_cost: h.capital_cost,
        operation_maintenance_cost_kwh: h.operation_maintenance_cost_kwh,
    }
}

/// Builds and runs a scenario end to end, economics included.
///
/// # Errors
///
/// Propagates the first error from [`build_engine`] or [`Engine::run`].
pub fn run_scenario(config: &ScenarioConfig, verbose: bool) -> SimResult<SimulationRun> {
    let mut engine = build_engine(config, verbose)?;
    let results = engine.run()?;
    let kpis = KpiReport::from_run(&results, engine.assets());
    info!(
        load_served_pct = kpis.load_served_pct,
        net_present_cost = kpis.net_present_cost,
        "scenario complete"
    );
    Ok(SimulationRun {
        engine,
        results,
        kpis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::import::{LOAD_HEADER, TIME_HEADER};
    use crate::production::Controllable;
    use std::io::Write;

    fn short(mut config: ScenarioConfig, n_points: usize) -> ScenarioConfig {
        config.simulation.n_points = n_points;
        config
    }

    #[test]
    fn same_scenario_and_seed_is_deterministic() {
        let config = short(ScenarioConfig::cascade(), 168);
        let run_a = run_scenario(&config, false).expect("run succeeds");
        let run_b = run_scenario(&config, false).expect("run succeeds");
        assert_eq!(run_a.results, run_b.results);
        assert_eq!(run_a.kpis, run_b.kpis);
    }

    #[test]
    fn different_seeds_change_the_load() {
        let mut config = short(ScenarioConfig::baseline(), 48);
        let a = run_scenario(&config, false).expect("run succeeds");
        config.simulation.seed += 1;
        let b = run_scenario(&config, false).expect("run succeeds");
        assert_ne!(a.engine.load().load_vec_kw(), b.engine.load().load_vec_kw());
    }

    #[test]
    fn assets_read_their_own_resource_keys() {
        let engine = build_engine(&short(ScenarioConfig::cascade(), 24), false)
            .expect("engine builds");
        let keys: Vec<ResourceKey> = engine.assets().iter().map(|a| a.resource_key()).collect();
        assert_eq!(keys, vec![ResourceKey(0), ResourceKey(1)]);
        assert_eq!(engine.assets()[1].production().capacity_kw, 50.0);
    }

    #[test]
    fn invalid_scenario_is_rejected_before_building() {
        let mut config = ScenarioConfig::baseline();
        config.hydro[0].capacity_kw = -5.0;
        let err = build_engine(&config, false).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("hydro[0].capacity_kw"));
    }

    #[test]
    fn csv_load_sets_the_horizon() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "{TIME_HEADER},{LOAD_HEADER}").expect("write");
        for t in 0..12 {
            writeln!(file, "{t},{}", 20 + t).expect("write");
        }

        let mut config = ScenarioConfig::baseline();
        config.load.csv = Some(file.path().to_path_buf());
        let run = run_scenario(&config, false).expect("run succeeds");
        assert_eq!(run.results.len(), 12);
        assert_eq!(run.results[3].load_kw, 23.0);
    }

    #[test]
    fn run_computes_economics() {
        let run = run_scenario(&short(ScenarioConfig::baseline(), 72), false)
            .expect("run succeeds");
        // commissioning capital is booked at the first timestep
        assert!(run.kpis.net_present_cost >= 250_000.0);
        assert!(run.kpis.levellized_cost_of_energy_kwh > 0.0);
    }
}
