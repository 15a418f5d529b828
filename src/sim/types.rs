//! Core simulation types: per-step records.

use std::fmt;

/// Complete record of one simulation timestep, summed over the fleet.
///
/// For every step `production_kw = dispatch_kw + curtailment_kw` and
/// `load_kw = dispatch_kw + unmet_load_kw`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Timestep index.
    pub timestep: usize,
    /// Elapsed hours since the start of the horizon.
    pub time_hrs: f64,
    /// Duration of this timestep in hours.
    pub dt_hrs: f64,
    /// Load to be served (kW).
    pub load_kw: f64,
    /// Total production of all assets (kW).
    pub production_kw: f64,
    /// Production delivered to the load (kW).
    pub dispatch_kw: f64,
    /// Production discarded (kW).
    pub curtailment_kw: f64,
    /// Load left unserved after every asset has been dispatched (kW).
    pub unmet_load_kw: f64,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "t={:>5} ({:>8.1}h) | load={:>8.2} kW  prod={:>8.2} kW  \
             dispatch={:>8.2} kW  curtail={:>7.2} kW  unmet={:>7.2} kW",
            self.timestep,
            self.time_hrs,
            self.load_kw,
            self.production_kw,
            self.dispatch_kw,
            self.curtailment_kw,
            self.unmet_load_kw,
        )
    }
}
