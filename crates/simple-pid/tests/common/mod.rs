//! 测试辅助工具

#![allow(dead_code)]

use simple_pid::Plant;
use std::convert::Infallible;

/// 浮点近似比较
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}

/// 一阶惯性对象：x' = (gain * u - x) / tau，欧拉离散
pub struct FirstOrderPlant {
    pub value: f64,
    pub gain: f64,
    pub tau: f64,
    pub dt: f64,
    /// 恒定扰动（例如散热损失）
    pub disturbance: f64,
}

impl FirstOrderPlant {
    pub fn new(gain: f64, tau: f64, dt: f64) -> Self {
        Self {
            value: 0.0,
            gain,
            tau,
            dt,
            disturbance: 0.0,
        }
    }

    pub fn step(&mut self, output: f64) {
        self.value += (self.gain * output - self.value + self.disturbance) * self.dt / self.tau;
    }
}

impl Plant for FirstOrderPlant {
    type Error = Infallible;

    fn measure(&mut self) -> Result<f64, Self::Error> {
        Ok(self.value)
    }

    fn actuate(&mut self, output: f64) -> Result<(), Self::Error> {
        self.step(output);
        Ok(())
    }
}
