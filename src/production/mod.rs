//! Controllable production assets.
//!
//! Each asset is layered: the concrete physical model ([`Hydro`]) wraps the
//! controllable-asset state machine ([`Noncombustion`]), which wraps the
//! shared time series and economics ([`Production`]). Every layer does its
//! own work and then delegates inward.

pub mod base;
pub mod economics;
pub mod hydro;
pub mod noncombustion;
pub mod types;

pub use base::{Production, ProductionInputs};
pub use economics::Economics;
pub use hydro::{Hydro, HydroInputs, TurbineType};
pub use noncombustion::{Noncombustion, NoncombustionInputs, NoncombustionType, RunState};
pub use types::{Controllable, DispatchContext, NoncombustionAsset, ResourceKey};
