//! Discounted lifetime economics shared by every production asset.
//!
//! Costs are booked undiscounted, per timestep, while the simulation runs.
//! After the run they are rolled up here into a net present cost (NPC) and a
//! levellized cost of energy (LCOE) using the real discount rate and the
//! elapsed time (in years) at each timestep.

/// Hours in a (non-leap) modelling year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Computes the real annual discount rate from nominal inflation and nominal discount rates.
///
/// `(nominal_discount - nominal_inflation) / (1 + nominal_inflation)`
///
/// # Examples
///
/// ```
/// use microgrid_sim::production::economics::real_discount_annual;
///
/// let r = real_discount_annual(0.02, 0.04);
/// assert!((r - 0.0196078431372549).abs() < 1e-12);
/// ```
pub fn real_discount_annual(nominal_inflation_annual: f64, nominal_discount_annual: f64) -> f64 {
    (nominal_discount_annual - nominal_inflation_annual) / (1.0 + nominal_inflation_annual)
}

/// Present-value multiplier for a cash flow occurring `elapsed_hrs` after the start of the run.
pub fn discount_factor(real_discount_annual: f64, elapsed_hrs: f64) -> f64 {
    1.0 / (1.0 + real_discount_annual).powf(elapsed_hrs / HOURS_PER_YEAR)
}

/// Derives per-timestep interval durations from a time axis.
///
/// `dt[i] = t[i + 1] - t[i]`; the final interval repeats the previous one,
/// and a single-point axis is given a one-hour interval.
pub fn dt_vec_hrs(time_vec_hrs: &[f64]) -> Vec<f64> {
    let mut dt: Vec<f64> = time_vec_hrs.windows(2).map(|w| w[1] - w[0]).collect();
    if !time_vec_hrs.is_empty() {
        let last = dt.last().copied().unwrap_or(1.0);
        dt.push(last);
    }
    dt
}

/// Result of rolling an asset's cost and dispatch series up to present value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Economics {
    /// Sum of discounted capital and O&M costs.
    pub net_present_cost: f64,
    /// Sum of discounted dispatched energy (kWh).
    pub discounted_dispatch_kwh: f64,
    /// Net present cost per discounted kWh dispatched; 0 when nothing was dispatched.
    pub levellized_cost_of_energy_kwh: f64,
}

impl Economics {
    /// Computes NPC and LCOE from scratch over the full horizon.
    ///
    /// All slices must have the same length as `time_vec_hrs`.
    ///
    /// # Panics
    ///
    /// Panics if the slice lengths disagree.
    pub fn compute(
        real_discount_annual: f64,
        time_vec_hrs: &[f64],
        capital_cost_vec: &[f64],
        operation_maintenance_cost_vec: &[f64],
        dispatch_vec_kw: &[f64],
    ) -> Self {
        let n = time_vec_hrs.len();
        assert!(
            capital_cost_vec.len() == n
                && operation_maintenance_cost_vec.len() == n
                && dispatch_vec_kw.len() == n,
            "economics series must all span {n} timesteps"
        );

        let dt_vec = dt_vec_hrs(time_vec_hrs);
        let mut net_present_cost = 0.0;
        let mut discounted_dispatch_kwh = 0.0;

        for i in 0..n {
            let factor = discount_factor(real_discount_annual, time_vec_hrs[i]);
            net_present_cost += factor * (capital_cost_vec[i] + operation_maintenance_cost_vec[i]);
            discounted_dispatch_kwh += factor * dispatch_vec_kw[i] * dt_vec[i];
        }

        let levellized_cost_of_energy_kwh = if discounted_dispatch_kwh > 0.0 {
            net_present_cost / discounted_dispatch_kwh
        } else {
            0.0
        };

        Self {
            net_present_cost,
            discounted_dispatch_kwh,
            levellized_cost_of_energy_kwh,
        }
    }
}
