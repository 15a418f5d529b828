use serde::Deserialize;
use tracing::debug;

use super::base::ProductionInputs;
use super::noncombustion::{Noncombustion, NoncombustionInputs, NoncombustionType};
use super::types::{Controllable, DispatchContext, ResourceKey};
use crate::error::{SimError, SimResult};

/// Gravitational acceleration (m/s^2).
pub const GRAVITY_MS2: f64 = 9.81;

/// Committed turbine draw may exceed the available flow by this much (m3/hr)
/// from rounding alone.
const FLOW_CLAMP_TOLERANCE_M3HR: f64 = 1e-6;

/// Turbine families, each with its own part-load efficiency curve.
///
/// Both curves map the hydraulic power ratio
/// `r = rho * g * H * (Q / 3600) / (1000 * capacity_kw)` onto normalised
/// electrical output in `[0, 1]`, are strictly increasing between their
/// operating bounds, and are exactly invertible there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurbineType {
    /// Impulse turbine, linear efficiency over a wide operating range.
    #[default]
    Pelton,
    /// Reaction turbine, square-root-like efficiency over a narrower range.
    Francis,
}

impl TurbineType {
    /// Lower and upper hydraulic power ratio bounds of the operating range.
    pub fn ratio_bounds(self) -> (f64, f64) {
        match self {
            Self::Pelton => (0.023529, 1.166301),
            Self::Francis => (0.2164706, 1.1952933),
        }
    }

    /// Normalised electrical output for a hydraulic power ratio.
    ///
    /// Zero at or below the lower bound, one at or above the upper bound.
    pub fn normalized_power(self, ratio: f64) -> f64 {
        let (lower, upper) = self.ratio_bounds();
        if ratio <= lower {
            return 0.0;
        }
        if ratio >= upper {
            return 1.0;
        }
        let power = match self {
            Self::Pelton => 0.87448308 * ratio - 0.02108607,
            Self::Francis => 1.61681669 * ratio.powf(0.49508545) - 0.76355563,
        };
        power.clamp(0.0, 1.0)
    }

    /// Hydraulic power ratio needed for a normalised output, limited to the operating range.
    pub fn power_ratio(self, normalized_power: f64) -> f64 {
        let (lower, upper) = self.ratio_bounds();
        let ratio = match self {
            Self::Pelton => (normalized_power + 0.02108607) / 0.87448308,
            Self::Francis => ((normalized_power + 0.76355563) / 1.61681669).powf(1.0 / 0.49508545),
        };
        ratio.clamp(lower, upper)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pelton => "PELTON",
            Self::Francis => "FRANCIS",
        }
    }
}

/// Constructor inputs for a hydroelectric asset.
///
/// # Fields
/// * `noncombustion_inputs` - Inputs shared with every controllable asset
/// * `resource_key` - Key of the inflow series in the resource provider
/// * `fluid_density_kgm3` - Working fluid density (kg/m3)
/// * `net_head_m` - Net hydraulic head (m)
/// * `reservoir_capacity_m3` - Reservoir volume (m3), 0 for run-of-river
/// * `init_reservoir_state` - Initial fill as a fraction of capacity
/// * `turbine_type` - Turbine efficiency curve
/// * `capital_cost` - Cost of commissioning or replacing the asset
/// * `operation_maintenance_cost_kwh` - O&M cost per kWh dispatched
#[derive(Debug, Clone, PartialEq)]
pub struct HydroInputs {
    pub noncombustion_inputs: NoncombustionInputs,
    pub resource_key: ResourceKey,
    pub fluid_density_kgm3: f64,
    pub net_head_m: f64,
    pub reservoir_capacity_m3: f64,
    pub init_reservoir_state: f64,
    pub turbine_type: TurbineType,
    pub capital_cost: f64,
    pub operation_maintenance_cost_kwh: f64,
}

impl Default for HydroInputs {
    fn default() -> Self {
        Self {
            noncombustion_inputs: NoncombustionInputs::default(),
            resource_key: ResourceKey(0),
            fluid_density_kgm3: 1000.0,
            net_head_m: 500.0,
            reservoir_capacity_m3: 0.0,
            init_reservoir_state: 0.0,
            turbine_type: TurbineType::Pelton,
            capital_cost: 0.0,
            operation_maintenance_cost_kwh: 0.0,
        }
    }
}

impl HydroInputs {
    /// Shorthand for the embedded production inputs.
    pub fn production_inputs(&self) -> &ProductionInputs {
        &self.noncombustion_inputs.production_inputs
    }
}

/// A hydroelectric asset with an optional reservoir.
///
/// Production is limited by the turbine's flow range and by the water
/// available in a timestep: the inflow plus whatever the reservoir carried
/// over, expressed as a rate. After each commit the reservoir level follows
/// the mass balance
///
/// `stored[i] = stored[i-1] + (inflow[i] - flow[i] - spill[i]) * dt[i]`
///
/// with `0 <= stored[i] <= reservoir_capacity_m3` and
/// `0 <= flow[i] <= maximum_flow_m3hr`. Inflow that neither passes the
/// turbine nor fits in the reservoir is spilled and lost.
#[derive(Debug, Clone)]
pub struct Hydro {
    pub noncombustion: Noncombustion,
    pub turbine_type: TurbineType,
    pub fluid_density_kgm3: f64,
    pub net_head_m: f64,
    pub reservoir_capacity_m3: f64,
    pub init_reservoir_state: f64,
    /// Smallest flow at which the turbine produces (m3/hr).
    pub minimum_flow_m3hr: f64,
    /// Flow at which the turbine reaches rated capacity (m3/hr).
    pub maximum_flow_m3hr: f64,

    turbine_flow_vec_m3hr: Box<[f64]>,
    stored_volume_vec_m3: Box<[f64]>,
    spill_rate_vec_m3hr: Box<[f64]>,
}

impl Hydro {
    /// Creates a hydro asset over `n_points` timesteps.
    ///
    /// Books the commissioning capital cost at timestep 0 unless the asset is sunk.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] for non-positive density or
    /// head, a negative reservoir capacity or cost, or an initial reservoir
    /// state outside `[0, 1]`, and propagates base-layer validation errors.
    pub fn new(n_points: usize, inputs: &HydroInputs) -> SimResult<Self> {
        check_inputs(inputs)?;

        let mut noncombustion = Noncombustion::new(
            n_points,
            NoncombustionType::Hydro,
            inputs.resource_key,
            &inputs.noncombustion_inputs,
        )?;
        noncombustion
            .production
            .set_costs(inputs.capital_cost, inputs.operation_maintenance_cost_kwh);

        let mut hydro = Self {
            noncombustion,
            turbine_type: inputs.turbine_type,
            fluid_density_kgm3: inputs.fluid_density_kgm3,
            net_head_m: inputs.net_head_m,
            reservoir_capacity_m3: inputs.reservoir_capacity_m3,
            init_reservoir_state: inputs.init_reservoir_state,
            minimum_flow_m3hr: 0.0,
            maximum_flow_m3hr: 0.0,
            turbine_flow_vec_m3hr: vec![0.0; n_points].into_boxed_slice(),
            stored_volume_vec_m3: vec![0.0; n_points].into_boxed_slice(),
            spill_rate_vec_m3hr: vec![0.0; n_points].into_boxed_slice(),
        };

        let (lower, upper) = hydro.turbine_type.ratio_bounds();
        hydro.minimum_flow_m3hr = hydro.ratio_to_flow_m3hr(lower);
        hydro.maximum_flow_m3hr = hydro.ratio_to_flow_m3hr(upper);

        hydro.noncombustion.production.lifecycle_event(format_args!(
            "{} turbine, flow range [{:.3}, {:.3}] m3/hr, reservoir {} m3",
            hydro.turbine_type.as_str(),
            hydro.minimum_flow_m3hr,
            hydro.maximum_flow_m3hr,
            hydro.reservoir_capacity_m3
        ));
        Ok(hydro)
    }

    fn capacity_kw(&self) -> f64 {
        self.noncombustion.production.capacity_kw
    }

    fn flow_to_ratio(&self, flow_m3hr: f64) -> f64 {
        self.fluid_density_kgm3 * GRAVITY_MS2 * self.net_head_m * (flow_m3hr / 3600.0)
            / (1000.0 * self.capacity_kw())
    }

    fn ratio_to_flow_m3hr(&self, ratio: f64) -> f64 {
        ratio * 1000.0 * self.capacity_kw() * 3600.0
            / (self.fluid_density_kgm3 * GRAVITY_MS2 * self.net_head_m)
    }

    /// Electrical output (kW) for a turbine flow.
    pub fn flow_to_power_kw(&self, flow_m3hr: f64) -> f64 {
        if flow_m3hr >= self.maximum_flow_m3hr {
            return self.capacity_kw();
        }
        self.turbine_type
            .normalized_power(self.flow_to_ratio(flow_m3hr))
            * self.capacity_kw()
    }

    /// Turbine flow (m3/hr) needed to produce `production_kw`, within
    /// `[minimum_flow_m3hr, maximum_flow_m3hr]`; zero for no production.
    pub fn power_to_flow_m3hr(&self, production_kw: f64) -> f64 {
        if production_kw <= 0.0 {
            return 0.0;
        }
        let normalized = (production_kw / self.capacity_kw()).min(1.0);
        self.ratio_to_flow_m3hr(self.turbine_type.power_ratio(normalized))
    }

    /// Reservoir volume before `timestep`: the previous level, or the initial fill.
    fn previous_stored_m3(&self, timestep: usize) -> f64 {
        match timestep {
            0 => self.init_reservoir_state * self.reservoir_capacity_m3,
            t => self.stored_volume_vec_m3[t - 1],
        }
    }

    /// Largest flow the turbine can draw at `timestep`.
    ///
    /// `min(maximum_flow, inflow + stored_previous / dt_hrs)`
    pub fn available_flow_m3hr(&self, timestep: usize, dt_hrs: f64, inflow_m3hr: f64) -> f64 {
        let carried_over_m3hr = self.previous_stored_m3(timestep) / dt_hrs;
        (inflow_m3hr + carried_over_m3hr).min(self.maximum_flow_m3hr)
    }

    /// Proposes production for the pending timestep without mutating any state.
    ///
    /// Returns `min(request_kw, power at available flow)`, or zero when the
    /// request is not positive or the available flow is below the turbine's
    /// minimum flow.
    ///
    /// # Panics
    ///
    /// Panics if `timestep` is not the pending timestep.
    pub fn request_production_kw(
        &self,
        timestep: usize,
        dt_hrs: f64,
        request_kw: f64,
        inflow_m3hr: f64,
    ) -> f64 {
        self.noncombustion.production.assert_pending(timestep);
        if request_kw <= 0.0 {
            return 0.0;
        }

        let available_m3hr = self.available_flow_m3hr(timestep, dt_hrs, inflow_m3hr);
        if available_m3hr < self.minimum_flow_m3hr {
            return 0.0;
        }
        request_kw.min(self.flow_to_power_kw(available_m3hr))
    }

    /// Commits production for the pending timestep and advances the reservoir.
    ///
    /// The state machine and energy split are handled by the inner layers;
    /// this layer back-solves the turbine flow and records the new reservoir
    /// level and spill. Triggers a replacement once running hours call for one.
    ///
    /// Returns the residual load for the next asset in merit order.
    ///
    /// # Panics
    ///
    /// Panics if `timestep` is not the pending timestep, if `production_kw`
    /// is negative or above capacity, or if producing it needs more water
    /// than is available this timestep.
    pub fn commit(
        &mut self,
        timestep: usize,
        dt_hrs: f64,
        production_kw: f64,
        load_kw: f64,
        inflow_m3hr: f64,
    ) -> f64 {
        self.noncombustion.production.assert_pending(timestep);
        let available_m3hr = self.available_flow_m3hr(timestep, dt_hrs, inflow_m3hr);
        let required_m3hr = self
            .power_to_flow_m3hr(production_kw)
            .clamp(0.0, self.maximum_flow_m3hr);
        assert!(
            required_m3hr <= available_m3hr + FLOW_CLAMP_TOLERANCE_M3HR,
            "{}: timestep {timestep}: {production_kw} kW needs {required_m3hr} m3/hr \
             but only {available_m3hr} m3/hr is available",
            self.noncombustion.production.type_str
        );
        // absorb rounding so the reservoir never goes negative
        let flow_m3hr = required_m3hr.min(available_m3hr);

        let residual_kw = self
            .noncombustion
            .commit(timestep, dt_hrs, production_kw, load_kw);

        let unclamped_m3 =
            self.previous_stored_m3(timestep) + (inflow_m3hr - flow_m3hr) * dt_hrs;
        let stored_m3 = unclamped_m3.clamp(0.0, self.reservoir_capacity_m3);

        self.turbine_flow_vec_m3hr[timestep] = flow_m3hr;
        self.stored_volume_vec_m3[timestep] = stored_m3;
        self.spill_rate_vec_m3hr[timestep] = (unclamped_m3 - stored_m3).max(0.0) / dt_hrs;

        if self.noncombustion.replacement_due() {
            self.handle_replacement(timestep);
        }
        residual_kw
    }

    /// Replaces the turbine. The reservoir is civil works and keeps its water.
    pub fn handle_replacement(&mut self, timestep: usize) {
        debug!(timestep, "hydro replacement");
        self.noncombustion.handle_replacement(timestep);
    }

    pub fn compute_economics(&mut self, time_vec_hrs: &[f64]) {
        self.noncombustion.compute_economics(time_vec_hrs);
    }

    pub fn turbine_flow_vec_m3hr(&self) -> &[f64] {
        &self.turbine_flow_vec_m3hr
    }

    pub fn stored_volume_vec_m3(&self) -> &[f64] {
        &self.stored_volume_vec_m3
    }

    pub fn spill_rate_vec_m3hr(&self) -> &[f64] {
        &self.spill_rate_vec_m3hr
    }

    /// Current reservoir level: the last committed level, or the initial fill.
    pub fn stored_volume_m3(&self) -> f64 {
        self.previous_stored_m3(self.noncombustion.production.next_timestep())
    }
}

impl Controllable for Hydro {
    fn request_production_kw(&self, context: &DispatchContext, request_kw: f64) -> f64 {
        Hydro::request_production_kw(
            self,
            context.timestep,
            context.dt_hrs,
            request_kw,
            context.resource,
        )
    }

    fn commit(&mut self, context: &DispatchContext, production_kw: f64, load_kw: f64) -> f64 {
        Hydro::commit(
            self,
            context.timestep,
            context.dt_hrs,
            production_kw,
            load_kw,
            context.resource,
        )
    }

    fn handle_replacement(&mut self, timestep: usize) {
        Hydro::handle_replacement(self, timestep);
    }

    fn compute_economics(&mut self, time_vec_hrs: &[f64]) {
        Hydro::compute_economics(self, time_vec_hrs);
    }

    fn noncombustion(&self) -> &Noncombustion {
        &self.noncombustion
    }
}

fn check_inputs(inputs: &HydroInputs) -> SimResult<()> {
    let checks = [
        (inputs.fluid_density_kgm3 > 0.0, "fluid_density_kgm3 must be > 0"),
        (inputs.net_head_m > 0.0, "net_head_m must be > 0"),
        (inputs.reservoir_capacity_m3 >= 0.0, "reservoir_capacity_m3 must be >= 0"),
        (
            (0.0..=1.0).contains(&inputs.init_reservoir_state),
            "init_reservoir_state must be in [0, 1]",
        ),
        (inputs.capital_cost >= 0.0, "capital_cost must be >= 0"),
        (
            inputs.operation_maintenance_cost_kwh >= 0.0,
            "operation_maintenance_cost_kwh must be >= 0",
        ),
    ];
    match checks.into_iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err(SimError::invalid("Hydro", message)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn hydro(n_points: usize, reservoir_capacity_m3: f64) -> Hydro {
        let inputs = HydroInputs {
            reservoir_capacity_m3,
            ..HydroInputs::default()
        };
        Hydro::new(n_points, &inputs).expect("valid inputs")
    }

    #[test]
    fn flow_limits_follow_pelton_bounds() {
        let h = hydro(1, 0.0);
        let per_ratio = 1000.0 * 100.0 * 3600.0 / (1000.0 * GRAVITY_MS2 * 500.0);
        assert_abs_diff_eq!(h.maximum_flow_m3hr, 1.166301 * per_ratio, epsilon = 1e-9);
        assert_abs_diff_eq!(h.minimum_flow_m3hr, 0.023529 * per_ratio, epsilon = 1e-9);
        assert_abs_diff_eq!(h.flow_to_power_kw(h.maximum_flow_m3hr), 100.0, epsilon = 1e-9);
        assert_eq!(h.flow_to_power_kw(0.0), 0.0);
    }

    #[test]
    fn defaults_start_with_empty_series() {
        let h = hydro(24, 1000.0);
        assert_eq!(h.turbine_flow_vec_m3hr().len(), 24);
        assert!(h.stored_volume_vec_m3().iter().all(|&v| v == 0.0));
        assert_eq!(h.stored_volume_m3(), 0.0);
        assert_eq!(h.noncombustion.production.capital_cost_vec()[0], 0.0);
    }

    #[rstest]
    #[case::zero_density(HydroInputs { fluid_density_kgm3: 0.0, ..HydroInputs::default() })]
    #[case::negative_head(HydroInputs { net_head_m: -1.0, ..HydroInputs::default() })]
    #[case::negative_reservoir(HydroInputs { reservoir_capacity_m3: -1.0, ..HydroInputs::default() })]
    #[case::overfull(HydroInputs { init_reservoir_state: 1.5, ..HydroInputs::default() })]
    #[case::negative_capital(HydroInputs { capital_cost: -1.0, ..HydroInputs::default() })]
    fn invalid_inputs_are_rejected(#[case] inputs: HydroInputs) {
        let err = Hydro::new(10, &inputs).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration { .. }));
    }

    #[rstest]
    fn power_flow_round_trip(
        #[values(TurbineType::Pelton, TurbineType::Francis)] turbine_type: TurbineType,
        #[values(5.0, 25.0, 50.0, 90.0)] production_kw: f64,
    ) {
        let inputs = HydroInputs {
            turbine_type,
            ..HydroInputs::default()
        };
        let h = Hydro::new(1, &inputs).expect("valid inputs");
        let flow = h.power_to_flow_m3hr(production_kw);
        assert!(flow >= h.minimum_flow_m3hr && flow <= h.maximum_flow_m3hr);
        assert_abs_diff_eq!(h.flow_to_power_kw(flow), production_kw, epsilon = 1e-9);
    }

    #[rstest]
    fn normalized_power_is_monotonic(
        #[values(TurbineType::Pelton, TurbineType::Francis)] turbine_type: TurbineType,
    ) {
        let samples: Vec<f64> = (0..=130)
            .map(|i| turbine_type.normalized_power(f64::from(i) / 100.0))
            .collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(samples[0], 0.0);
        assert_eq!(samples[130], 1.0);
    }

    #[test]
    fn non_positive_request_proposes_nothing() {
        let h = hydro(1, 0.0);
        assert_eq!(h.request_production_kw(0, 1.0, 0.0, 50.0), 0.0);
        assert_eq!(h.request_production_kw(0, 1.0, -5.0, 50.0), 0.0);
    }

    #[test]
    fn run_of_river_request_is_capped_by_inflow() {
        let mut h = hydro(1, 0.0);
        let ceiling = h.flow_to_power_kw(40.0);
        let proposal = h.request_production_kw(0, 1.0, 100.0, 40.0);
        assert_abs_diff_eq!(proposal, ceiling, epsilon = 1e-12);
        assert!(proposal < 100.0);

        h.commit(0, 1.0, proposal, 100.0, 40.0);
        assert_abs_diff_eq!(h.turbine_flow_vec_m3hr()[0], 40.0, epsilon = 1e-9);
        assert_eq!(h.stored_volume_vec_m3()[0], 0.0);
        assert_abs_diff_eq!(h.spill_rate_vec_m3hr()[0], 0.0, epsilon = 1e-9);
    }

    #[test]
    fn inflow_below_minimum_flow_proposes_nothing() {
        let h = hydro(1, 0.0);
        let trickle = h.minimum_flow_m3hr * 0.5;
        assert_eq!(h.request_production_kw(0, 1.0, 50.0, trickle), 0.0);
    }

    #[test]
    fn request_does_not_mutate_state() {
        let h = hydro(2, 1000.0);
        let before = h.stored_volume_m3();
        for request in [10.0, 50.0, 120.0] {
            h.request_production_kw(0, 1.0, request, 30.0);
        }
        assert_eq!(h.stored_volume_m3(), before);
        assert_eq!(h.noncombustion.production.next_timestep(), 0);
    }

    #[test]
    fn reservoir_fills_then_spills() {
        let mut h = hydro(8, 1000.0);
        for t in 0..8 {
            h.commit(t, 1.0, 0.0, 0.0, 300.0);
        }
        assert_eq!(
            h.stored_volume_vec_m3(),
            &[300.0, 600.0, 900.0, 1000.0, 1000.0, 1000.0, 1000.0, 1000.0]
        );
        assert_abs_diff_eq!(h.spill_rate_vec_m3hr()[3], 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.spill_rate_vec_m3hr()[7], 300.0, epsilon = 1e-9);
    }

    #[test]
    fn stored_water_supports_production_beyond_inflow() {
        let inputs = HydroInputs {
            reservoir_capacity_m3: 1000.0,
            init_reservoir_state: 0.5,
            ..HydroInputs::default()
        };
        let mut h = Hydro::new(1, &inputs).expect("valid inputs");
        let proposal = h.request_production_kw(0, 1.0, 100.0, 0.0);
        assert_abs_diff_eq!(proposal, 100.0, epsilon = 1e-9);

        h.commit(0, 1.0, proposal, 100.0, 0.0);
        let flow = h.turbine_flow_vec_m3hr()[0];
        assert_abs_diff_eq!(h.stored_volume_vec_m3()[0], 500.0 - flow, epsilon = 1e-9);
    }

    #[test]
    #[should_panic(expected = "m3/hr is available")]
    fn commit_beyond_available_water_panics() {
        let mut h = hydro(1, 1000.0);
        // an empty reservoir and 10 m3/hr of inflow cannot carry full output
        h.commit(0, 1.0, 100.0, 100.0, 10.0);
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn commit_above_nameplate_panics() {
        let mut h = hydro(2, 0.0);
        let inflow = h.maximum_flow_m3hr;
        h.commit(0, 1.0, 250.0, 300.0, inflow);
    }

    #[test]
    fn empty_reservoir_draws_no_more_than_inflow() {
        let mut h = hydro(1, 1000.0);
        let proposal = h.request_production_kw(0, 1.0, 100.0, 10.0);
        assert!(proposal > 0.0 && proposal < 100.0);
        h.commit(0, 1.0, proposal, 100.0, 10.0);
        assert!(h.turbine_flow_vec_m3hr()[0] <= 10.0 + 1e-9);
        assert!(h.stored_volume_vec_m3()[0] >= 0.0);
    }

    #[test]
    fn sub_hourly_steps_scale_the_mass_balance() {
        let mut h = hydro(2, 1000.0);
        h.commit(0, 0.5, 0.0, 0.0, 40.0);
        assert_abs_diff_eq!(h.stored_volume_vec_m3()[0], 20.0, epsilon = 1e-12);
        // 20 m3 carried over is worth 40 m3/hr for half an hour
        assert_abs_diff_eq!(h.available_flow_m3hr(1, 0.5, 0.0), 40.0, epsilon = 1e-12);
        assert_abs_diff_eq!(h.available_flow_m3hr(1, 0.5, 10.0), 50.0, epsilon = 1e-12);
    }

    #[test]
    fn replacement_is_triggered_by_running_hours() {
        let inputs = HydroInputs {
            noncombustion_inputs: NoncombustionInputs {
                production_inputs: ProductionInputs {
                    replace_running_hrs: 3.0,
                    ..ProductionInputs::default()
                },
            },
            capital_cost: 250.0,
            ..HydroInputs::default()
        };
        let mut h = Hydro::new(6, &inputs).expect("valid inputs");
        for t in 0..6 {
            let proposal = h.request_production_kw(t, 1.0, 20.0, 80.0);
            h.commit(t, 1.0, proposal, 20.0, 80.0);
        }
        assert_eq!(h.noncombustion.n_replacements(), 2);
        assert_eq!(
            h.noncombustion.production.capital_cost_vec(),
            &[250.0, 0.0, 250.0, 0.0, 0.0, 250.0]
        );
    }

    #[test]
    #[should_panic(expected = "out of order")]
    fn request_for_committed_timestep_panics() {
        let mut h = hydro(2, 0.0);
        h.commit(0, 1.0, 0.0, 0.0, 0.0);
        h.request_production_kw(0, 1.0, 10.0, 10.0);
    }
}
