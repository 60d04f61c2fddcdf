//! 固定场景测试
//!
//! 覆盖构造校验、输入校验和几组手算结果的典型调用序列。

#[path = "common/mod.rs"]
mod common;

use common::{FirstOrderPlant, assert_close};
use simple_pid::{PidConfig, PidController, PidError};

const INF: f64 = f64::INFINITY;
const NEG_INF: f64 = f64::NEG_INFINITY;

#[test]
fn proportional_only_output() {
    let mut pid = PidController::new(2.0, 0.0, 0.0, INF, NEG_INF, 1.0).unwrap();
    pid.set_target(10.0).unwrap();

    // 误差 = 6，输出 = 12
    assert_eq!(pid.update(4.0).unwrap(), 12.0);
}

#[test]
fn integral_saturates_at_i_max() {
    let mut pid = PidController::new(1.0, 1.0, 0.0, 5.0, -5.0, 1.0).unwrap();
    pid.set_target(100.0).unwrap();

    let mut output = 0.0;
    for _ in 0..10 {
        output = pid.update(0.0).unwrap();
    }

    assert_eq!(pid.i(), 5.0);
    assert_eq!(pid.sum_error(), 5.0);
    assert_eq!(output, 105.0);
}

#[test]
fn default_controller_at_rest() {
    let mut pid = PidController::default();
    pid.set_target(0.0).unwrap();
    assert_eq!(pid.update(0.0).unwrap(), 0.0);
}

#[test]
fn derivative_first_and_second_tick() {
    let mut pid = PidController::new(0.0, 0.0, 3.0, INF, NEG_INF, 2.0).unwrap();
    pid.set_target(5.0).unwrap();

    assert_eq!(pid.update(2.0).unwrap(), 7.5);
    assert_eq!(pid.last_error(), 3.0);
    assert_eq!(pid.update(2.0).unwrap(), 3.0);
}

#[test]
fn construction_rejects_bad_integral_limits() {
    for i_max in [-1.0, 0.0] {
        let err = PidController::new(1.0, 0.0, 0.0, i_max, NEG_INF, 1.0).unwrap_err();
        assert!(matches!(err, PidError::Configuration { param: "i_max", .. }), "{err}");
    }

    for i_min in [1.0, 0.0] {
        let err = PidController::new(1.0, 0.0, 0.0, INF, i_min, 1.0).unwrap_err();
        assert!(matches!(err, PidError::Configuration { param: "i_min", .. }), "{err}");
    }
}

#[test]
fn construction_rejects_nan_parameters() {
    let cases = [
        (f64::NAN, 0.0, 0.0, INF, NEG_INF, 1.0),
        (1.0, f64::NAN, 0.0, INF, NEG_INF, 1.0),
        (1.0, 0.0, f64::NAN, INF, NEG_INF, 1.0),
        (1.0, 0.0, 0.0, f64::NAN, NEG_INF, 1.0),
        (1.0, 0.0, 0.0, INF, f64::NAN, 1.0),
        (1.0, 0.0, 0.0, INF, NEG_INF, f64::NAN),
    ];

    for (k_p, k_i, k_d, i_max, i_min, dt) in cases {
        let err = PidController::new(k_p, k_i, k_d, i_max, i_min, dt).unwrap_err();
        assert!(err.is_configuration(), "{err}");
    }
}

#[test]
fn construction_keeps_negative_dt_verbatim() {
    let mut pid = PidController::new(1.0, 1.0, 1.0, 5.0, -5.0, -1.0).unwrap();
    assert_eq!(pid.dt(), -1.0);
    pid.set_target(2.0).unwrap();

    // p = 2, i = -2, d = (2 - 0) / -1
    assert_eq!(pid.update(0.0).unwrap(), -2.0);
}

#[test]
fn construction_rejects_non_numeric_gain_from_toml() {
    let err = PidConfig::from_toml_str("k_p = \"high\"").unwrap_err();
    assert!(err.is_configuration());

    let err = PidConfig::from_toml_str("k_i = [1.0, 2.0]").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn failed_inputs_do_not_mutate_state() {
    let mut pid = PidController::new(1.0, 0.5, 0.25, 10.0, -10.0, 0.1).unwrap();
    pid.set_target(4.0).unwrap();
    pid.update(1.0).unwrap();
    pid.update(2.0).unwrap();

    let snapshot = (pid.target(), pid.current_value(), pid.sum_error(), pid.last_error());

    assert!(pid.update(f64::NAN).unwrap_err().is_validation());
    assert!(pid.update(f64::INFINITY).unwrap_err().is_validation());
    assert!(pid.set_target(f64::NAN).unwrap_err().is_validation());
    assert!(pid.set_target(f64::NEG_INFINITY).unwrap_err().is_validation());

    assert_eq!(
        (pid.target(), pid.current_value(), pid.sum_error(), pid.last_error()),
        snapshot
    );
}

#[test]
fn only_latest_target_is_used() {
    let mut a = PidController::new(1.5, 0.2, 0.0, INF, NEG_INF, 0.5).unwrap();
    let mut b = a.clone();

    a.set_target(3.0).unwrap();
    a.set_target(-7.0).unwrap();
    a.set_target(2.0).unwrap();
    b.set_target(2.0).unwrap();

    assert_eq!(a.update(1.0).unwrap(), b.update(1.0).unwrap());
    assert_eq!(a, b);
}

#[test]
fn pi_controller_removes_steady_state_error() {
    let dt = 0.01;
    let mut pid = PidController::new(2.0, 4.0, 0.0, 50.0, -50.0, dt).unwrap();
    pid.set_target(1.0).unwrap();

    let mut plant = FirstOrderPlant::new(1.0, 0.5, dt);
    plant.disturbance = -0.5;

    for _ in 0..3000 {
        let output = pid.update(plant.value).unwrap();
        plant.step(output);
    }

    assert_close(plant.value, 1.0, 1e-3);
    // 稳态时积分项补偿扰动和对象增益
    assert_close(pid.i(), 1.5, 1e-2);
}

#[test]
fn reset_restarts_from_fresh_state() {
    let mut pid = PidController::new(1.0, 1.0, 1.0, 3.0, -3.0, 1.0).unwrap();
    let mut fresh = pid.clone();

    pid.set_target(5.0).unwrap();
    fresh.set_target(5.0).unwrap();
    for value in [0.0, 1.0, 2.0] {
        pid.update(value).unwrap();
    }

    pid.reset();
    assert_eq!(pid, fresh);
    assert_eq!(pid.update(1.0).unwrap(), fresh.update(1.0).unwrap());
}
