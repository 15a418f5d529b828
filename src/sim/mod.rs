/// Simulation clock for timestep management.
pub mod clock;
pub mod controller;
pub mod engine;
pub mod kpi;
/// Electrical load provider.
pub mod load;
pub mod power_balance;
/// Seeded synthetic load and inflow profiles.
pub mod profiles;
pub mod resources;
pub mod types;
