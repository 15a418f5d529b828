//! Merit-order dispatch controller.

use serde::Deserialize;

use crate::production::{Controllable, DispatchContext, NoncombustionAsset};

use super::power_balance::unmet_load_kw;

/// How much production the controller asks of each asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    /// Request only the load still unserved by earlier assets.
    #[default]
    LoadFollowing,
    /// Request nameplate capacity; anything beyond the load is curtailed.
    FullOutput,
}

impl DispatchStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadFollowing => "load_following",
            Self::FullOutput => "full_output",
        }
    }
}

/// Fleet totals for one dispatched timestep.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DispatchOutcome {
    pub production_kw: f64,
    pub dispatch_kw: f64,
    pub curtailment_kw: f64,
    pub unmet_load_kw: f64,
}

/// Dispatches a fleet in merit order, one asset at a time.
///
/// Each asset sees the residual load left by the assets before it, gets one
/// production proposal request and exactly one commit.
#[derive(Debug, Default, Clone, Copy)]
pub struct Controller {
    pub strategy: DispatchStrategy,
}

impl Controller {
    pub fn new(strategy: DispatchStrategy) -> Self {
        Self { strategy }
    }

    /// Production the strategy asks of `asset` given the residual load.
    pub fn request_kw(&self, asset: &NoncombustionAsset, residual_load_kw: f64) -> f64 {
        match self.strategy {
            DispatchStrategy::LoadFollowing => residual_load_kw.max(0.0),
            DispatchStrategy::FullOutput => asset.production().capacity_kw,
        }
    }

    /// Requests and commits one timestep for every asset, in slice order.
    ///
    /// `contexts[i]` carries the timestep and resource value for `assets[i]`.
    ///
    /// # Panics
    ///
    /// Panics if the slices differ in length, or on any asset precondition
    /// violation.
    pub fn dispatch(
        &self,
        assets: &mut [NoncombustionAsset],
        contexts: &[DispatchContext],
        load_kw: f64,
    ) -> DispatchOutcome {
        assert_eq!(assets.len(), contexts.len(), "one context per asset");

        let mut outcome = DispatchOutcome::default();
        let mut residual_kw = load_kw;
        for (asset, context) in assets.iter_mut().zip(contexts) {
            let request_kw = self.request_kw(asset, residual_kw);
            let production_kw = asset.request_production_kw(context, request_kw);
            let next_residual_kw = asset.commit(context, production_kw, residual_kw);

            let dispatch_kw = residual_kw - next_residual_kw;
            outcome.production_kw += production_kw;
            outcome.dispatch_kw += dispatch_kw;
            outcome.curtailment_kw += production_kw - dispatch_kw;
            residual_kw = next_residual_kw;
        }
        outcome.unmet_load_kw = unmet_load_kw(load_kw, outcome.dispatch_kw);
        outcome
    }
}
