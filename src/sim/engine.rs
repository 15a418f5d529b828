//! Simulation engine that drives the fleet through every timestep.

use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::production::{Controllable, DispatchContext, NoncombustionAsset};

use super::clock::Clock;
use super::controller::Controller;
use super::load::ElectricalLoad;
use super::resources::Resources;
use super::types::StepResult;

/// Simulation engine owning the load, resources, fleet, and controller.
///
/// Timesteps must be stepped strictly in order; the reservoir state at one
/// step depends on the previous one.
#[derive(Debug)]
pub struct Engine {
    load: ElectricalLoad,
    resources: Resources,
    assets: Vec<NoncombustionAsset>,
    controller: Controller,
    next_timestep: usize,
}

impl Engine {
    /// Creates a new simulation engine.
    ///
    /// # Arguments
    ///
    /// * `load` - Load to serve, which also fixes the time axis
    /// * `resources` - Resource series referenced by the assets
    /// * `assets` - Fleet, in merit order
    /// * `controller` - Dispatch controller
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfiguration`] if any asset or the
    /// resources span a different number of points than the load, or if an
    /// asset has already been stepped, and [`SimError::DataGap`] if an
    /// asset's resource key has no registered series.
    pub fn new(
        load: ElectricalLoad,
        resources: Resources,
        assets: Vec<NoncombustionAsset>,
        controller: Controller,
    ) -> SimResult<Self> {
        let n_points = load.n_points();
        if resources.n_points() != n_points {
            return Err(SimError::invalid(
                "Engine",
                format!(
                    "resources span {} points but the load spans {n_points}",
                    resources.n_points()
                ),
            ));
        }

        for (idx, asset) in assets.iter().enumerate() {
            let production = asset.production();
            if production.n_points != n_points {
                return Err(SimError::invalid(
                    asset_label(asset, idx),
                    format!(
                        "asset spans {} points but the load spans {n_points}",
                        production.n_points
                    ),
                ));
            }
            if production.next_timestep() != 0 {
                return Err(SimError::invalid(
                    asset_label(asset, idx),
                    "asset has already been stepped",
                ));
            }
            let key = asset.resource_key();
            if !resources.contains(key) {
                return Err(SimError::DataGap {
                    provider: format!("resource {key} for {}", asset_label(asset, idx)),
                    timestep: 0,
                });
            }
        }

        info!(
            n_points,
            n_assets = assets.len(),
            strategy = controller.strategy.as_str(),
            "engine ready"
        );
        Ok(Self {
            load,
            resources,
            assets,
            controller,
            next_timestep: 0,
        })
    }

    /// Executes one simulation timestep and returns the fleet totals.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::PreconditionViolation`] if `t` is not the next
    /// timestep, and [`SimError::DataGap`] if a provider has no value for `t`.
    /// A failed step leaves every asset untouched.
    pub fn step(&mut self, t: usize) -> SimResult<StepResult> {
        if t != self.next_timestep {
            return Err(SimError::PreconditionViolation {
                context: "Engine".to_string(),
                timestep: t,
                message: format!("expected timestep {}", self.next_timestep),
            });
        }

        let load_kw = self.load.load_kw(t)?;
        let time_hrs = self.load.time_hrs(t)?;
        let dt_hrs = self.load.dt_hrs(t)?;

        // Gather every resource value first so a gap aborts before any commit.
        let contexts = self
            .assets
            .iter()
            .enumerate()
            .map(|(idx, asset)| {
                let resource = self
                    .resources
                    .value(asset.resource_key(), t)
                    .map_err(|e| match e {
                        SimError::DataGap { provider, timestep } => SimError::DataGap {
                            provider: format!("{provider} for {}", asset_label(asset, idx)),
                            timestep,
                        },
                        other => other,
                    })?;
                Ok(DispatchContext::with_resource(t, dt_hrs, resource))
            })
            .collect::<SimResult<Vec<_>>>()?;

        let outcome = self.controller.dispatch(&mut self.assets, &contexts, load_kw);
        self.next_timestep += 1;

        let result = StepResult {
            timestep: t,
            time_hrs,
            dt_hrs,
            load_kw,
            production_kw: outcome.production_kw,
            dispatch_kw: outcome.dispatch_kw,
            curtailment_kw: outcome.curtailment_kw,
            unmet_load_kw: outcome.unmet_load_kw,
        };
        debug!("{result}");
        Ok(result)
    }

    /// Executes all remaining timesteps, then computes every asset's economics.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`Engine::step`]; the run is aborted.
    pub fn run(&mut self) -> SimResult<Vec<StepResult>> {
        let mut clock = Clock::new(self.load.time_vec_hrs()[self.next_timestep..].to_vec());
        let mut results = Vec::with_capacity(clock.remaining());
        let offset = self.next_timestep;
        while let Some(tick) = clock.tick() {
            results.push(self.step(offset + tick.timestep)?);
        }
        self.compute_economics()?;
        info!(n_steps = results.len(), "run complete");
        Ok(results)
    }

    /// Rolls each asset's costs up into NPC and LCOE over the load's time axis.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::PreconditionViolation`] if any timestep has not
    /// been stepped yet; no asset is touched.
    pub fn compute_economics(&mut self) -> SimResult<()> {
        if !self.is_complete() {
            return Err(SimError::PreconditionViolation {
                context: "Engine".to_string(),
                timestep: self.next_timestep,
                message: format!(
                    "economics need all {} timesteps stepped",
                    self.load.n_points()
                ),
            });
        }
        let time_vec_hrs = self.load.time_vec_hrs();
        for asset in &mut self.assets {
            asset.compute_economics(time_vec_hrs);
        }
        Ok(())
    }

    /// The next timestep awaiting a step (`n_points` once the run is complete).
    pub fn next_timestep(&self) -> usize {
        self.next_timestep
    }

    pub fn is_complete(&self) -> bool {
        self.next_timestep == self.load.n_points()
    }

    pub fn assets(&self) -> &[NoncombustionAsset] {
        &self.assets
    }

    pub fn load(&self) -> &ElectricalLoad {
        &self.load
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

/// `HYDRO idx0`-style label identifying an asset in errors and output.
pub fn asset_label(asset: &NoncombustionAsset, idx: usize) -> String {
    format!("{} idx{idx}", asset.asset_type())
}
