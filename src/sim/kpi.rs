//! Post-hoc KPI computation from simulation results.

use std::fmt;

use crate::production::{Controllable, NoncombustionAsset};

use super::types::StepResult;

/// Aggregate key performance indicators derived from a complete simulation run.
///
/// Energy totals are computed post-hoc from `&[StepResult]`; economics and
/// lifecycle counters are read from the assets after
/// [`super::engine::Engine::run`] has computed their economics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KpiReport {
    /// Total load over the horizon (kWh).
    pub total_load_kwh: f64,
    /// Total energy delivered to the load (kWh).
    pub total_dispatch_kwh: f64,
    /// Total energy produced and discarded (kWh).
    pub total_curtailment_kwh: f64,
    /// Total load left unserved (kWh).
    pub total_unmet_kwh: f64,
    /// Share of load energy served (%); 100 when there was no load.
    pub load_served_pct: f64,
    /// Largest unserved load in any step (kW).
    pub peak_unmet_kw: f64,
    /// Fleet net present cost.
    pub net_present_cost: f64,
    /// Fleet NPC over fleet discounted dispatch, per kWh.
    pub levellized_cost_of_energy_kwh: f64,
    /// Starts summed over the fleet.
    pub total_starts: u32,
    /// Replacements summed over the fleet.
    pub total_replacements: u32,
}

impl KpiReport {
    /// Computes all KPIs from the step records and the stepped fleet.
    ///
    /// # Arguments
    ///
    /// * `results` - Complete simulation step results
    /// * `assets` - The fleet, with economics already computed
    pub fn from_run(results: &[StepResult], assets: &[NoncombustionAsset]) -> Self {
        let mut report = Self::default();

        for r in results {
            report.total_load_kwh += r.load_kw * r.dt_hrs;
            report.total_dispatch_kwh += r.dispatch_kw * r.dt_hrs;
            report.total_curtailment_kwh += r.curtailment_kw * r.dt_hrs;
            report.total_unmet_kwh += r.unmet_load_kw * r.dt_hrs;
            report.peak_unmet_kw = report.peak_unmet_kw.max(r.unmet_load_kw);
        }
        report.load_served_pct = if report.total_load_kwh > 0.0 {
            100.0 * report.total_dispatch_kwh / report.total_load_kwh
        } else {
            100.0
        };

        let mut discounted_dispatch_kwh = 0.0;
        for asset in assets {
            let economics = asset.production().economics();
            report.net_present_cost += economics.net_present_cost;
            discounted_dispatch_kwh += economics.discounted_dispatch_kwh;
            report.total_starts += asset.noncombustion().n_starts();
            report.total_replacements += asset.noncombustion().n_replacements();
        }
        if discounted_dispatch_kwh > 0.0 {
            report.levellized_cost_of_energy_kwh =
                report.net_present_cost / discounted_dispatch_kwh;
        }

        report
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(f, "Total load:            {:.2} kWh", self.total_load_kwh)?;
        writeln!(f, "Total dispatch:        {:.2} kWh", self.total_dispatch_kwh)?;
        writeln!(f, "Total curtailment:     {:.2} kWh", self.total_curtailment_kwh)?;
        writeln!(
            f,
            "Unmet load:            {:.2} kWh (peak {:.2} kW)",
            self.total_unmet_kwh, self.peak_unmet_kw
        )?;
        writeln!(f, "Load served:           {:.1}%", self.load_served_pct)?;
        writeln!(f, "Net present cost:      {:.2}", self.net_present_cost)?;
        writeln!(
            f,
            "Levellized cost:       {:.4} per kWh",
            self.levellized_cost_of_energy_kwh
        )?;
        write!(
            f,
            "Starts / replacements: {} / {}",
            self.total_starts, self.total_replacements
        )
    }
}
