//! Loop Runner - 控制循环包装器
//!
//! 控制器本身不关心时间；这里提供一个宿主侧的同步控制循环，
//! 负责定时、时间跳变检测，以及"测量 → 计算 → 执行"的顺序调用。
//!
//! # 核心功能
//!
//! - **定时**: `run_controller` 使用 `std::thread::sleep`，
//!   `run_controller_spin` 使用 `spin_sleep` 实现低抖动延时
//! - **时间跳变处理**: 实际间隔超过 `标称周期 × dt_clamp_multiplier` 时记录 `warn!` 并调用 `on_time_jump()`
//! - **错误传播**: 控制器和被控对象的错误立即返回，不做重试
//!
//! # 示例
//!
//! ```rust
//! use simple_pid::{LoopConfig, PidController, Plant, run_controller};
//!
//! struct Heater {
//!     temperature: f64,
//! }
//!
//! impl Plant for Heater {
//!     type Error = std::io::Error;
//!
//!     fn measure(&mut self) -> Result<f64, Self::Error> {
//!         Ok(self.temperature)
//!     }
//!
//!     fn actuate(&mut self, output: f64) -> Result<(), Self::Error> {
//!         self.temperature += 0.1 * output;
//!         Ok(())
//!     }
//! }
//!
//! let mut pid = PidController::new(2.0, 0.0, 0.0, f64::INFINITY, f64::NEG_INFINITY, 0.001)?;
//! pid.set_target(50.0)?;
//!
//! let mut heater = Heater { temperature: 20.0 };
//! let config = LoopConfig {
//!     max_iterations: Some(50),
//!     ..LoopConfig::for_controller(&pid)
//! };
//!
//! let report = run_controller(&mut heater, &mut pid, &config)?;
//! assert_eq!(report.iterations, 50);
//! assert!((heater.temperature - 50.0).abs() < 1e-3);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::controller::Controller;
use crate::pid::PidController;
use spin_sleep::SpinSleeper;
use std::time::{Duration, Instant};
use thiserror::Error;

/// 被控对象
///
/// 把传感器读数和执行器命令抽象成两个同步调用。
pub trait Plant {
    /// 被控对象错误类型
    type Error: std::error::Error + Send + 'static;

    /// 读取当前过程值
    fn measure(&mut self) -> Result<f64, Self::Error>;

    /// 施加控制输出
    fn actuate(&mut self, output: f64) -> Result<(), Self::Error>;
}

/// 控制循环配置
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// 控制频率（Hz）
    pub frequency_hz: f64,

    /// dt 钳位倍数
    ///
    /// 实际间隔超过标称周期的此倍数时，触发 `on_time_jump()`。
    pub dt_clamp_multiplier: f64,

    /// 最大迭代次数（None 表示无限循环）
    pub max_iterations: Option<usize>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        LoopConfig {
            frequency_hz: 100.0,
            dt_clamp_multiplier: 2.0,
            max_iterations: None,
        }
    }
}

impl LoopConfig {
    /// 按控制器的标称 `dt` 设置频率
    ///
    /// `dt <= 0` 时得到的频率非法，循环启动时返回 [`LoopError::InvalidConfig`]。
    pub fn for_controller(pid: &PidController) -> Self {
        LoopConfig {
            frequency_hz: 1.0 / pid.dt(),
            ..Default::default()
        }
    }

    /// 标称周期
    pub fn nominal_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.frequency_hz)
    }

    fn validate(&self) -> Result<(), String> {
        if !self.frequency_hz.is_finite() || self.frequency_hz <= 0.0 {
            return Err(format!("Invalid frequency_hz: {} (must be > 0)", self.frequency_hz));
        }
        if !self.dt_clamp_multiplier.is_finite() || self.dt_clamp_multiplier <= 0.0 {
            return Err(format!(
                "Invalid dt_clamp_multiplier: {} (must be > 0)",
                self.dt_clamp_multiplier
            ));
        }
        if self.frequency_hz > 10000.0 {
            tracing::warn!(
                "Very high control frequency: {} Hz. This may cause performance issues.",
                self.frequency_hz
            );
        }
        Ok(())
    }
}

/// 控制循环结束时的统计
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    /// 完成的迭代次数
    pub iterations: usize,
    /// 检测到的时间跳变次数
    pub time_jumps: usize,
    /// 最后一次发送给执行器的输出
    pub last_output: Option<f64>,
}

/// 控制循环错误
#[derive(Debug, Error)]
pub enum LoopError<C, P>
where
    C: std::error::Error + 'static,
    P: std::error::Error + 'static,
{
    /// 循环配置无效
    #[error("Invalid loop configuration: {0}")]
    InvalidConfig(String),

    /// 控制器返回错误
    #[error("Controller error: {0}")]
    Controller(#[source] C),

    /// 被控对象返回错误
    #[error("Plant error: {0}")]
    Plant(#[source] P),
}

/// 运行控制循环
///
/// 阻塞当前线程，直到发生错误或达到 `max_iterations`。
///
/// # 每次迭代
///
/// 1. 计算距上次迭代的实际间隔，超过 `标称周期 × dt_clamp_multiplier` 时调用 `on_time_jump()`
/// 2. `plant.measure()` → `controller.tick()` → `plant.actuate()`
/// 3. 休眠一个标称周期
pub fn run_controller<P, C>(
    plant: &mut P,
    controller: &mut C,
    config: &LoopConfig,
) -> Result<LoopReport, LoopError<C::Error, P::Error>>
where
    P: Plant,
    C: Controller,
{
    run_loop(plant, controller, config, std::thread::sleep)
}

/// 使用 spin_sleep 的高精度控制循环
///
/// 与 `run_controller()` 相同，但延时抖动更低。
///
/// ⚠️ **注意**: `spin_sleep` 会占用更多 CPU。
pub fn run_controller_spin<P, C>(
    plant: &mut P,
    controller: &mut C,
    config: &LoopConfig,
) -> Result<LoopReport, LoopError<C::Error, P::Error>>
where
    P: Plant,
    C: Controller,
{
    let sleeper = SpinSleeper::default();
    run_loop(plant, controller, config, |period| sleeper.sleep(period))
}

fn run_loop<P, C, S>(
    plant: &mut P,
    controller: &mut C,
    config: &LoopConfig,
    mut sleep: S,
) -> Result<LoopReport, LoopError<C::Error, P::Error>>
where
    P: Plant,
    C: Controller,
    S: FnMut(Duration),
{
    config.validate().map_err(LoopError::InvalidConfig)?;

    let nominal_period = config.nominal_period();
    let max_dt = nominal_period.mul_f64(config.dt_clamp_multiplier);

    tracing::debug!(
        frequency_hz = config.frequency_hz,
        ?max_dt,
        max_iterations = ?config.max_iterations,
        "Starting control loop"
    );

    let mut report = LoopReport {
        iterations: 0,
        time_jumps: 0,
        last_output: None,
    };
    let mut last_time = Instant::now();

    loop {
        if let Some(max_iter) = config.max_iterations
            && report.iterations >= max_iter
        {
            break;
        }

        let now = Instant::now();
        let real_dt = now - last_time;
        if real_dt > max_dt {
            tracing::warn!(?real_dt, ?max_dt, iteration = report.iterations, "Control loop time jump");
            controller.on_time_jump(real_dt).map_err(LoopError::Controller)?;
            report.time_jumps += 1;
        }

        let measurement = plant.measure().map_err(LoopError::Plant)?;
        let output = controller.tick(measurement).map_err(LoopError::Controller)?;
        plant.actuate(output).map_err(LoopError::Plant)?;

        report.last_output = Some(output);
        report.iterations += 1;
        last_time = now;

        sleep(nominal_period);
    }

    tracing::debug!(
        iterations = report.iterations,
        time_jumps = report.time_jumps,
        "Control loop finished"
    );
    Ok(report)
}
