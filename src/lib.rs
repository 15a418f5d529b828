//! Microgrid production simulator: hydro generation against an electrical
//! load, with discounted lifetime economics.

pub mod cli;
pub mod config;
pub mod error;
pub mod io;
/// Production assets: the shared base, noncombustion layer, and hydro.
pub mod production;
pub mod runner;
/// Simulation engine, providers, dispatch, and KPI modules.
pub mod sim;
