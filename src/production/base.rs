use tracing::{debug, info};

use super::economics::{Economics, real_discount_annual};
use crate::error::{SimError, SimResult};
use crate::sim::power_balance::energy_balance_error_kw;

/// Production may exceed capacity by this much (kW) from rounding alone.
const CAPACITY_TOLERANCE_KW: f64 = 1e-9;

/// Constructor inputs shared by every production asset.
///
/// Derived inputs embed this struct, so every level of the hierarchy
/// starts from the same defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionInputs {
    /// Raise lifecycle events (construction, starts, replacements) from `debug` to `info`.
    pub verbose: bool,
    /// Treat the capital cost as already incurred (nothing booked at commissioning).
    pub is_sunk: bool,
    /// Rated production capacity (kW).
    pub capacity_kw: f64,
    /// Nominal annual inflation rate used for economics.
    pub nominal_inflation_annual: f64,
    /// Nominal annual discount rate used for economics.
    pub nominal_discount_annual: f64,
    /// Running hours after which the asset must be replaced.
    pub replace_running_hrs: f64,
}

impl Default for ProductionInputs {
    fn default() -> Self {
        Self {
            verbose: false,
            is_sunk: false,
            capacity_kw: 100.0,
            nominal_inflation_annual: 0.02,
            nominal_discount_annual: 0.04,
            replace_running_hrs: 90_000.0,
        }
    }
}

/// Time-indexed production record and economics shared by all asset kinds.
///
/// Every series is allocated once at construction with `n_points` entries
/// and written exactly once per timestep, in increasing timestep order, by
/// [`Production::commit`]. For every committed index `i`:
///
/// `production[i] = dispatch[i] + storage[i] + curtailment[i]`, all terms >= 0.
#[derive(Debug, Clone)]
pub struct Production {
    /// Raise lifecycle events to `info`.
    pub verbose: bool,
    /// Capital cost treated as sunk.
    pub is_sunk: bool,
    /// Length of the modelling time series.
    pub n_points: usize,
    /// Rated production capacity (kW).
    pub capacity_kw: f64,
    /// Nominal annual inflation rate.
    pub nominal_inflation_annual: f64,
    /// Nominal annual discount rate.
    pub nominal_discount_annual: f64,
    /// Real annual discount rate derived from the nominal rates.
    pub real_discount_annual: f64,
    /// Running hours between replacements.
    pub replace_running_hrs: f64,
    /// Capital cost booked at commissioning and at each replacement.
    pub capital_cost: f64,
    /// Operation and maintenance cost per kWh dispatched.
    pub operation_maintenance_cost_kwh: f64,
    /// Human-readable asset type, set by the concrete asset.
    pub type_str: &'static str,

    total_dispatch_kwh: f64,

    production_vec_kw: Box<[f64]>,
    dispatch_vec_kw: Box<[f64]>,
    storage_vec_kw: Box<[f64]>,
    curtailment_vec_kw: Box<[f64]>,
    capital_cost_vec: Box<[f64]>,
    operation_maintenance_cost_vec: Box<[f64]>,

    economics: Economics,
    next_timestep: usize,
}

impl Production {
    /// Creates a production record with zero-filled series of length `n_points`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if `n_points` is zero, the
    /// capacity or replacement interval is not positive, or nominal
    /// inflation is at or below -100%.
    pub fn new(n_points: usize, inputs: &ProductionInputs) -> SimResult<Self> {
        check_inputs(n_points, inputs)?;

        let zeros = || vec![0.0; n_points].into_boxed_slice();
        let production = Self {
            verbose: inputs.verbose,
            is_sunk: inputs.is_sunk,
            n_points,
            capacity_kw: inputs.capacity_kw,
            nominal_inflation_annual: inputs.nominal_inflation_annual,
            nominal_discount_annual: inputs.nominal_discount_annual,
            real_discount_annual: real_discount_annual(
                inputs.nominal_inflation_annual,
                inputs.nominal_discount_annual,
            ),
            replace_running_hrs: inputs.replace_running_hrs,
            capital_cost: 0.0,
            operation_maintenance_cost_kwh: 0.0,
            type_str: "PRODUCTION",
            total_dispatch_kwh: 0.0,
            production_vec_kw: zeros(),
            dispatch_vec_kw: zeros(),
            storage_vec_kw: zeros(),
            curtailment_vec_kw: zeros(),
            capital_cost_vec: zeros(),
            operation_maintenance_cost_vec: zeros(),
            economics: Economics::default(),
            next_timestep: 0,
        };

        production.lifecycle_event(format_args!(
            "constructed: {} kW over {n_points} points",
            production.capacity_kw
        ));
        Ok(production)
    }

    /// Sets the asset's cost figures and books the commissioning capital cost.
    ///
    /// Called by concrete assets once their costs are resolved, before any
    /// timestep has been committed.
    pub(crate) fn set_costs(&mut self, capital_cost: f64, operation_maintenance_cost_kwh: f64) {
        assert_eq!(self.next_timestep, 0, "costs must be set before the first commit");
        self.capital_cost = capital_cost;
        self.operation_maintenance_cost_kwh = operation_maintenance_cost_kwh;
        self.capital_cost_vec[0] = if self.is_sunk { 0.0 } else { capital_cost };
    }

    /// Adds a capital cost impulse at `timestep`.
    pub(crate) fn book_capital_cost(&mut self, timestep: usize, amount: f64) {
        self.capital_cost_vec[timestep] += amount;
    }

    /// Asserts that `timestep` is the next one awaiting a commit.
    ///
    /// # Panics
    ///
    /// Panics if `timestep` is outside `[0, n_points)` or is not the next
    /// uncommitted timestep.
    pub fn assert_pending(&self, timestep: usize) {
        assert!(
            timestep < self.n_points,
            "{}: timestep {timestep} outside horizon of {} points",
            self.type_str,
            self.n_points
        );
        assert_eq!(
            timestep, self.next_timestep,
            "{}: timestep {timestep} out of order, expected {}",
            self.type_str, self.next_timestep
        );
    }

    /// Records production for the pending timestep and returns the residual load.
    ///
    /// Dispatch is `min(production, load)`; all non-dispatched production is
    /// curtailed at this level. O&M cost is booked against dispatched energy.
    ///
    /// # Panics
    ///
    /// Panics if `timestep` is not the next uncommitted timestep, if
    /// `production_kw` is negative, non-finite or above capacity, or if
    /// `dt_hrs` is not positive.
    pub fn commit(&mut self, timestep: usize, dt_hrs: f64, production_kw: f64, load_kw: f64) -> f64 {
        self.assert_pending(timestep);
        assert!(
            production_kw >= 0.0 && production_kw.is_finite(),
            "{}: production must be finite and >= 0, got {production_kw}",
            self.type_str
        );
        assert!(
            production_kw <= self.capacity_kw + CAPACITY_TOLERANCE_KW,
            "{}: production {production_kw} kW exceeds capacity {} kW",
            self.type_str,
            self.capacity_kw
        );
        assert!(dt_hrs > 0.0, "{}: dt_hrs must be > 0", self.type_str);

        let dispatch_kw = production_kw.min(load_kw.max(0.0));
        let curtailment_kw = production_kw - dispatch_kw;

        self.production_vec_kw[timestep] = production_kw;
        self.dispatch_vec_kw[timestep] = dispatch_kw;
        self.storage_vec_kw[timestep] = 0.0;
        self.curtailment_vec_kw[timestep] = curtailment_kw;

        let dispatch_kwh = dispatch_kw * dt_hrs;
        self.operation_maintenance_cost_vec[timestep] =
            self.operation_maintenance_cost_kwh * dispatch_kwh;
        self.total_dispatch_kwh += dispatch_kwh;

        debug_assert!(
            energy_balance_error_kw(production_kw, dispatch_kw, 0.0, curtailment_kw).abs() < 1e-9
        );

        self.next_timestep += 1;
        load_kw - dispatch_kw
    }

    /// Replacement hook. Nothing is reset at this level.
    pub fn handle_replacement(&mut self, timestep: usize) {
        assert!(timestep < self.n_points, "replacement outside horizon");
        debug!(asset = self.type_str, timestep, "production replacement hook");
    }

    /// Rolls the cost and dispatch series up into NPC and LCOE.
    ///
    /// Recomputes from scratch, so repeated calls give identical results.
    ///
    /// # Panics
    ///
    /// Panics if any timestep is still uncommitted or `time_vec_hrs` does not
    /// have `n_points` entries.
    pub fn compute_economics(&mut self, time_vec_hrs: &[f64]) {
        assert!(
            self.is_complete(),
            "{}: economics computed with {} of {} timesteps committed",
            self.type_str,
            self.next_timestep,
            self.n_points
        );
        assert_eq!(
            time_vec_hrs.len(),
            self.n_points,
            "time axis must match the production horizon"
        );
        self.economics = Economics::compute(
            self.real_discount_annual,
            time_vec_hrs,
            &self.capital_cost_vec,
            &self.operation_maintenance_cost_vec,
            &self.dispatch_vec_kw,
        );
    }

    /// Emits a lifecycle event at `info` when verbose, `debug` otherwise.
    pub(crate) fn lifecycle_event(&self, message: std::fmt::Arguments<'_>) {
        if self.verbose {
            info!(asset = self.type_str, "{message}");
        } else {
            debug!(asset = self.type_str, "{message}");
        }
    }

    /// The next timestep awaiting a commit (`n_points` once the run is complete).
    pub fn next_timestep(&self) -> usize {
        self.next_timestep
    }

    /// Whether every timestep has been committed.
    pub fn is_complete(&self) -> bool {
        self.next_timestep == self.n_points
    }

    pub fn production_vec_kw(&self) -> &[f64] {
        &self.production_vec_kw
    }

    pub fn dispatch_vec_kw(&self) -> &[f64] {
        &self.dispatch_vec_kw
    }

    pub fn storage_vec_kw(&self) -> &[f64] {
        &self.storage_vec_kw
    }

    pub fn curtailment_vec_kw(&self) -> &[f64] {
        &self.curtailment_vec_kw
    }

    pub fn capital_cost_vec(&self) -> &[f64] {
        &self.capital_cost_vec
    }

    pub fn operation_maintenance_cost_vec(&self) -> &[f64] {
        &self.operation_maintenance_cost_vec
    }

    /// Undiscounted energy dispatched so far (kWh).
    pub fn total_dispatch_kwh(&self) -> f64 {
        self.total_dispatch_kwh
    }

    /// Net present cost; zero until [`Production::compute_economics`] runs.
    pub fn net_present_cost(&self) -> f64 {
        self.economics.net_present_cost
    }

    /// Levellized cost of energy per kWh dispatched; zero until economics runs.
    pub fn levellized_cost_of_energy_kwh(&self) -> f64 {
        self.economics.levellized_cost_of_energy_kwh
    }

    pub fn economics(&self) -> &Economics {
        &self.economics
    }
}

fn check_inputs(n_points: usize, inputs: &ProductionInputs) -> SimResult<()> {
    if n_points == 0 {
        return Err(SimError::invalid("Production", "n_points must be > 0"));
    }
    if !(inputs.capacity_kw > 0.0) {
        return Err(SimError::invalid("Production", "capacity_kw must be > 0"));
    }
    if !(inputs.replace_running_hrs > 0.0) {
        return Err(SimError::invalid("Production", "replace_running_hrs must be > 0"));
    }
    if !(inputs.nominal_inflation_annual > -1.0) {
        return Err(SimError::invalid(
            "Production",
            "nominal_inflation_annual must be > -1",
        ));
    }
    Ok(())
}
