//! Error taxonomy surfaced through engine construction and stepping.

mod common;

use microgrid_sim::error::SimError;
use microgrid_sim::production::{Hydro, HydroInputs, NoncombustionAsset, ResourceKey};
use microgrid_sim::sim::controller::Controller;
use microgrid_sim::sim::engine::Engine;
use microgrid_sim::sim::load::ElectricalLoad;
use microgrid_sim::sim::resources::Resources;

#[test]
fn zero_points_is_invalid_configuration() {
    let err = Hydro::new(0, &HydroInputs::default()).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[test]
fn negative_reservoir_is_invalid_configuration() {
    let err = Hydro::new(24, &common::hydro_inputs(-1.0)).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[test]
fn missing_resource_is_a_data_gap() {
    let load = ElectricalLoad::hourly(vec![10.0; 4]).expect("valid load");
    let resources = Resources::new(4);
    let hydro = Hydro::new(4, &common::hydro_inputs(0.0)).expect("valid inputs");
    let err = Engine::new(
        load,
        resources,
        vec![NoncombustionAsset::from(hydro)],
        Controller::default(),
    )
    .unwrap_err();
    assert!(matches!(err, SimError::DataGap { timestep: 0, .. }));
}

#[test]
fn negative_inflow_is_rejected_at_the_provider() {
    let mut resources = Resources::new(3);
    let err = resources
        .add_series(ResourceKey(0), vec![1.0, -0.5, 2.0])
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
}

#[test]
fn horizon_mismatch_is_invalid_configuration() {
    let load = ElectricalLoad::hourly(vec![10.0; 4]).expect("valid load");
    let mut resources = Resources::new(4);
    resources
        .add_series(ResourceKey(0), vec![50.0; 4])
        .expect("valid inflow");
    let hydro = Hydro::new(5, &common::hydro_inputs(0.0)).expect("valid inputs");
    let err = Engine::new(load, resources, vec![hydro.into()], Controller::default()).unwrap_err();
    assert!(matches!(err, SimError::InvalidConfiguration { .. }));
    assert!(err.to_string().contains("HYDRO idx0"));
}

#[test]
fn out_of_order_step_is_a_precondition_violation() {
    let mut engine = common::hydro_engine(&common::hydro_inputs(0.0), vec![10.0; 4], vec![50.0; 4]);
    engine.step(0).expect("first step");
    let err = engine.step(2).unwrap_err();
    assert!(matches!(err, SimError::PreconditionViolation { timestep: 2, .. }));
    // the failed call leaves the engine where it was
    assert_eq!(engine.next_timestep(), 1);
    engine.step(1).expect("in-order step");
}

#[test]
fn stepping_past_the_horizon_fails() {
    let mut engine = common::hydro_engine(&common::hydro_inputs(0.0), vec![10.0; 2], vec![50.0; 2]);
    engine.run().expect("run completes");
    assert!(engine.step(2).is_err());
}

#[test]
fn run_resumes_after_manual_steps() {
    let mut engine = common::hydro_engine(&common::hydro_inputs(100.0), vec![10.0; 6], vec![50.0; 6]);
    engine.step(0).expect("step 0");
    engine.step(1).expect("step 1");
    let rest = engine.run().expect("remaining steps");
    assert_eq!(rest.len(), 4);
    assert_eq!(rest[0].timestep, 2);
    assert!(engine.is_complete());
}
