//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SimError;
use crate::production::TurbineType;
use crate::sim::controller::DispatchStrategy;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Horizon, seed, and dispatch strategy.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Electrical load, synthetic or from CSV.
    #[serde(default)]
    pub load: LoadConfig,
    /// Nominal rates shared by every asset.
    #[serde(default)]
    pub economics: EconomicsConfig,
    /// Hydro assets, in merit order.
    #[serde(default = "default_hydro_fleet")]
    pub hydro: Vec<HydroConfig>,
}

fn default_hydro_fleet() -> Vec<HydroConfig> {
    vec![HydroConfig::default()]
}

/// Simulation horizon and global parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of timesteps for synthetic series (must be > 0). Ignored when the load comes from CSV.
    pub n_points: usize,
    /// Timestep duration in hours for synthetic series (must be > 0).
    pub dt_hrs: f64,
    /// Master random seed.
    pub seed: u64,
    /// Dispatch strategy: `"load_following"` or `"full_output"`.
    pub strategy: DispatchStrategy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            n_points: 8760,
            dt_hrs: 1.0,
            seed: 42,
            strategy: DispatchStrategy::LoadFollowing,
        }
    }
}

/// Electrical load parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// CSV file with `Time (since start of data) [hrs]` and `Electrical Load [kW]` columns.
    /// Overrides the synthetic profile and the simulation horizon.
    pub csv: Option<PathBuf>,
    /// Mean load (kW).
    pub base_kw: f64,
    /// Daily sinusoidal amplitude (kW).
    pub amp_kw: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (kW).
    pub noise_std: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            csv: None,
            base_kw: 60.0,
            amp_kw: 25.0,
            phase_rad: 1.2,
            noise_std: 5.0,
        }
    }
}

/// Nominal economic rates.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicsConfig {
    /// Nominal annual inflation rate (must be > -1).
    pub nominal_inflation_annual: f64,
    /// Nominal annual discount rate.
    pub nominal_discount_annual: f64,
}

impl Default for EconomicsConfig {
    fn default() -> Self {
        Self {
            nominal_inflation_annual: 0.02,
            nominal_discount_annual: 0.04,
        }
    }
}

/// One hydro asset and its inflow.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HydroConfig {
    /// Rated capacity (kW).
    pub capacity_kw: f64,
    /// Capital cost already incurred.
    pub is_sunk: bool,
    /// Running hours between replacements.
    pub replace_running_hrs: f64,
    /// Capital cost at commissioning and each replacement.
    pub capital_cost: f64,
    /// O&M cost per kWh dispatched.
    pub operation_maintenance_cost_kwh: f64,
    /// Fluid density (kg/m3).
    pub fluid_density_kgm3: f64,
    /// Net head (m).
    pub net_head_m: f64,
    /// Reservoir volume (m3); 0 for run-of-river.
    pub reservoir_capacity_m3: f64,
    /// Initial fill as a fraction of the reservoir (0.0-1.0).
    pub init_reservoir_state: f64,
    /// Turbine type: `"pelton"` or `"francis"`.
    pub turbine_type: TurbineType,
    /// Inflow series feeding this asset.
    pub inflow: InflowConfig,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            capacity_kw: 100.0,
            is_sunk: false,
            replace_running_hrs: 90_000.0,
            capital_cost: 250_000.0,
            operation_maintenance_cost_kwh: 0.03,
            fluid_density_kgm3: 1000.0,
            net_head_m: 500.0,
            reservoir_capacity_m3: 1000.0,
            init_reservoir_state: 0.0,
            turbine_type: TurbineType::Pelton,
            inflow: InflowConfig::default(),
        }
    }
}

/// Hydro inflow parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InflowConfig {
    /// CSV file with `Time (since start of data) [hrs]` and `Hydro Inflow [m3/hr]` columns.
    pub csv: Option<PathBuf>,
    /// Mean inflow (m3/hr).
    pub base_m3hr: f64,
    /// Seasonal sinusoidal amplitude (m3/hr).
    pub amp_m3hr: f64,
    /// Phase offset (radians).
    pub phase_rad: f64,
    /// Gaussian noise standard deviation (m3/hr).
    pub noise_std: f64,
}

impl Default for InflowConfig {
    fn default() -> Self {
        Self {
            csv: None,
            base_m3hr: 60.0,
            amp_m3hr: 30.0,
            phase_rad: 0.0,
            noise_std: 5.0,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"hydro[0].capacity_kw"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl From<ConfigError> for SimError {
    fn from(e: ConfigError) -> Self {
        SimError::invalid(e.field, e.message)
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: one year, one 100 kW Pelton unit on a 1000 m3 reservoir.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            load: LoadConfig::default(),
            economics: EconomicsConfig::default(),
            hydro: default_hydro_fleet(),
        }
    }

    /// Returns the run-of-river preset: no storage, so output tracks the inflow.
    pub fn run_of_river() -> Self {
        Self {
            hydro: vec![HydroConfig {
                reservoir_capacity_m3: 0.0,
                inflow: InflowConfig {
                    base_m3hr: 70.0,
                    amp_m3hr: 40.0,
                    ..InflowConfig::default()
                },
                ..HydroConfig::default()
            }],
            ..Self::baseline()
        }
    }

    /// Returns the cascade preset: a half-full storage plant backed by a
    /// low-head Francis run-of-river unit, against a larger load.
    pub fn cascade() -> Self {
        Self {
            load: LoadConfig {
                base_kw: 110.0,
                amp_kw: 40.0,
                ..LoadConfig::default()
            },
            hydro: vec![
                HydroConfig {
                    reservoir_capacity_m3: 20_000.0,
                    init_reservoir_state: 0.5,
                    ..HydroConfig::default()
                },
                HydroConfig {
                    capacity_kw: 50.0,
                    capital_cost: 150_000.0,
                    net_head_m: 120.0,
                    reservoir_capacity_m3: 0.0,
                    turbine_type: TurbineType::Francis,
                    inflow: InflowConfig {
                        base_m3hr: 120.0,
                        amp_m3hr: 60.0,
                        phase_rad: 0.5,
                        ..InflowConfig::default()
                    },
                    ..HydroConfig::default()
                },
            ],
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "run_of_river", "cascade"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "run_of_river" => Ok(Self::run_of_river()),
            "cascade" => Ok(Self::cascade()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if s.n_points == 0 {
            errors.push(ConfigError::new("simulation.n_points", "must be > 0"));
        }
        if !(s.dt_hrs > 0.0) {
            errors.push(ConfigError::new("simulation.dt_hrs", "must be > 0"));
        }

        if self.load.noise_std < 0.0 {
            errors.push(ConfigError::new("load.noise_std", "must be >= 0"));
        }

        if !(self.economics.nominal_inflation_annual > -1.0) {
            errors.push(ConfigError::new(
                "economics.nominal_inflation_annual",
                "must be > -1",
            ));
        }

        if self.hydro.is_empty() {
            errors.push(ConfigError::new("hydro", "at least one asset is required"));
        }
        for (i, h) in self.hydro.iter().enumerate() {
            let mut check = |ok: bool, field: &str, message: &str| {
                if !ok {
                    errors.push(ConfigError::new(format!("hydro[{i}].{field}"), message));
                }
            };
            check(h.capacity_kw > 0.0, "capacity_kw", "must be > 0");
            check(h.replace_running_hrs > 0.0, "replace_running_hrs", "must be > 0");
            check(h.capital_cost >= 0.0, "capital_cost", "must be >= 0");
            check(
                h.operation_maintenance_cost_kwh >= 0.0,
                "operation_maintenance_cost_kwh",
                "must be >= 0",
            );
            check(h.fluid_density_kgm3 > 0.0, "fluid_density_kgm3", "must be > 0");
            check(h.net_head_m > 0.0, "net_head_m", "must be > 0");
            check(
                h.reservoir_capacity_m3 >= 0.0,
                "reservoir_capacity_m3",
                "must be >= 0",
            );
            check(
                (0.0..=1.0).contains(&h.init_reservoir_state),
                "init_reservoir_state",
                "must be in [0.0, 1.0]",
            );
            check(h.inflow.noise_std >= 0.0, "inflow.noise_std", "must be >= 0");
        }

        errors
    }
}
