//! Common types and the capability trait shared by every controllable asset.

use std::fmt;

use serde::Deserialize;

use super::base::Production;
use super::hydro::Hydro;
use super::noncombustion::{Noncombustion, NoncombustionType};

/// Opaque key correlating an asset with an external resource time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct ResourceKey(pub u32);

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-timestep information handed to an asset by the dispatch controller.
///
/// # Fields
/// * `timestep` - Index of the pending timestep
/// * `dt_hrs` - Duration of the timestep in hours
/// * `resource` - Resource availability for the asset's key (e.g. hydro inflow in m3/hr)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchContext {
    pub timestep: usize,
    pub dt_hrs: f64,
    pub resource: f64,
}

impl DispatchContext {
    /// Creates a context for an asset that draws on no resource.
    pub fn new(timestep: usize, dt_hrs: f64) -> Self {
        Self {
            timestep,
            dt_hrs,
            resource: 0.0,
        }
    }

    /// Creates a context carrying the resource value for this timestep.
    pub fn with_resource(timestep: usize, dt_hrs: f64, resource: f64) -> Self {
        Self {
            timestep,
            dt_hrs,
            resource,
        }
    }
}

/// Capability set every controllable asset exposes to the dispatch loop.
///
/// Within a timestep the controller calls [`Controllable::request_production_kw`]
/// (a pure proposal, possibly more than once) and then exactly one
/// [`Controllable::commit`].
pub trait Controllable {
    /// Proposes feasible production (kW) for the pending timestep without mutating state.
    fn request_production_kw(&self, context: &DispatchContext, request_kw: f64) -> f64;

    /// Records production for the pending timestep and returns the residual load (kW).
    fn commit(&mut self, context: &DispatchContext, production_kw: f64, load_kw: f64) -> f64;

    /// Replaces the asset at `timestep`, booking its capital cost.
    fn handle_replacement(&mut self, timestep: usize);

    /// Rolls per-timestep costs up into net present cost and LCOE.
    fn compute_economics(&mut self, time_vec_hrs: &[f64]);

    /// The asset's non-combustion layer.
    fn noncombustion(&self) -> &Noncombustion;

    /// The asset's production record.
    fn production(&self) -> &Production {
        &self.noncombustion().production
    }

    /// Human-readable type name, e.g. `HYDRO`.
    fn asset_type(&self) -> &'static str {
        self.production().type_str
    }
}

/// Closed set of controllable asset kinds driven by the engine.
#[derive(Debug, Clone)]
pub enum NoncombustionAsset {
    Hydro(Hydro),
}

impl NoncombustionAsset {
    pub fn kind(&self) -> NoncombustionType {
        self.noncombustion().kind
    }

    pub fn resource_key(&self) -> ResourceKey {
        self.noncombustion().resource_key()
    }

    /// Returns the hydro asset, if this is one.
    pub fn as_hydro(&self) -> Option<&Hydro> {
        match self {
            Self::Hydro(hydro) => Some(hydro),
        }
    }
}

impl From<Hydro> for NoncombustionAsset {
    fn from(hydro: Hydro) -> Self {
        Self::Hydro(hydro)
    }
}

impl Controllable for NoncombustionAsset {
    fn request_production_kw(&self, context: &DispatchContext, request_kw: f64) -> f64 {
        match self {
            Self::Hydro(hydro) => Controllable::request_production_kw(hydro, context, request_kw),
        }
    }

    fn commit(&mut self, context: &DispatchContext, production_kw: f64, load_kw: f64) -> f64 {
        match self {
            Self::Hydro(hydro) => Controllable::commit(hydro, context, production_kw, load_kw),
        }
    }

    fn handle_replacement(&mut self, timestep: usize) {
        match self {
            Self::Hydro(hydro) => hydro.handle_replacement(timestep),
        }
    }

    fn compute_economics(&mut self, time_vec_hrs: &[f64]) {
        match self {
            Self::Hydro(hydro) => hydro.compute_economics(time_vec_hrs),
        }
    }

    fn noncombustion(&self) -> &Noncombustion {
        match self {
            Self::Hydro(hydro) => &hydro.noncombustion,
        }
    }
}
