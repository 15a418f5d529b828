use std::fmt;

use super::base::{Production, ProductionInputs};
use super::types::ResourceKey;
use crate::error::SimResult;

/// Kinds of controllable, non-combustion production asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoncombustionType {
    /// Hydroelectric generator, with or without a reservoir.
    Hydro,
}

impl NoncombustionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hydro => "HYDRO",
        }
    }
}

impl fmt::Display for NoncombustionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running state of a controllable asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Constructor inputs for the non-combustion layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoncombustionInputs {
    pub production_inputs: ProductionInputs,
}

/// Shared behavior of controllable non-combustion assets, layered on [`Production`].
///
/// Tracks the `Stopped`/`Running` state machine, the start and replacement
/// counters, and the running hours that trigger replacement. Transitions are
/// evaluated only from the production value passed to [`Noncombustion::commit`]:
/// positive production starts a stopped asset, zero production stops a
/// running one.
#[derive(Debug, Clone)]
pub struct Noncombustion {
    pub production: Production,
    pub kind: NoncombustionType,
    resource_key: ResourceKey,
    state: RunState,
    n_starts: u32,
    n_replacements: u32,
    running_hours: f64,
    is_running_vec: Box<[bool]>,
}

impl Noncombustion {
    /// Creates the non-combustion layer of an asset of the given kind.
    ///
    /// # Errors
    ///
    /// Propagates [`Production::new`] validation errors.
    pub fn new(
        n_points: usize,
        kind: NoncombustionType,
        resource_key: ResourceKey,
        inputs: &NoncombustionInputs,
    ) -> SimResult<Self> {
        let mut production = Production::new(n_points, &inputs.production_inputs)?;
        production.type_str = kind.as_str();

        Ok(Self {
            production,
            kind,
            resource_key,
            state: RunState::Stopped,
            n_starts: 0,
            n_replacements: 0,
            running_hours: 0.0,
            is_running_vec: vec![false; n_points].into_boxed_slice(),
        })
    }

    fn handle_start_stop(&mut self, timestep: usize, production_kw: f64) {
        match (self.state, production_kw > 0.0) {
            (RunState::Stopped, true) => {
                self.state = RunState::Running;
                self.n_starts += 1;
                self.production.lifecycle_event(format_args!(
                    "started at timestep {timestep} (start #{})",
                    self.n_starts
                ));
            }
            (RunState::Running, false) => {
                self.state = RunState::Stopped;
                self.production
                    .lifecycle_event(format_args!("stopped at timestep {timestep}"));
            }
            _ => {}
        }
    }

    /// Default production proposal for kinds that need no resource: nothing is possible.
    ///
    /// # Panics
    ///
    /// Panics if `timestep` is not the pending timestep.
    pub fn request_production_kw(&self, timestep: usize, _dt_hrs: f64, _request_kw: f64) -> f64 {
        self.production.assert_pending(timestep);
        0.0
    }

    /// Evaluates the start/stop transition, then records the timestep in the base layer.
    ///
    /// Returns the residual load for the next asset in merit order.
    ///
    /// # Panics
    ///
    /// Panics on the same precondition violations as [`Production::commit`].
    pub fn commit(&mut self, timestep: usize, dt_hrs: f64, production_kw: f64, load_kw: f64) -> f64 {
        self.production.assert_pending(timestep);
        self.handle_start_stop(timestep, production_kw);

        let residual_kw = self
            .production
            .commit(timestep, dt_hrs, production_kw, load_kw);

        if self.is_running() {
            self.is_running_vec[timestep] = true;
            self.running_hours += dt_hrs;
        }
        residual_kw
    }

    /// Whether accumulated running hours call for the next replacement.
    pub fn replacement_due(&self) -> bool {
        self.running_hours >= f64::from(self.n_replacements + 1) * self.production.replace_running_hrs
    }

    /// Replaces the asset: stops it, counts the replacement, and books its capital cost.
    pub fn handle_replacement(&mut self, timestep: usize) {
        self.state = RunState::Stopped;
        self.n_replacements += 1;
        let capital_cost = self.production.capital_cost;
        self.production.book_capital_cost(timestep, capital_cost);
        self.production.lifecycle_event(format_args!(
            "replaced at timestep {timestep} after {:.1} running hours (replacement #{})",
            self.running_hours, self.n_replacements
        ));
        self.production.handle_replacement(timestep);
    }

    pub fn compute_economics(&mut self, time_vec_hrs: &[f64]) {
        self.production.compute_economics(time_vec_hrs);
    }

    /// Key of the external resource series feeding this asset.
    pub fn resource_key(&self) -> ResourceKey {
        self.resource_key
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn n_starts(&self) -> u32 {
        self.n_starts
    }

    pub fn n_replacements(&self) -> u32 {
        self.n_replacements
    }

    pub fn running_hours(&self) -> f64 {
        self.running_hours
    }

    pub fn is_running_vec(&self) -> &[bool] {
        &self.is_running_vec
    }
}
