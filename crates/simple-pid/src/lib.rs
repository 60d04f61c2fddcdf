//! # simple-pid - 单回路 PID 控制器
//!
//! 经典比例-积分-微分控制算法，带积分抗饱和钳位。把目标值和一串测量值
//! 转换成驱动执行器（电机、加热器、阀门等）的标量输出。
//!
//! # 模块
//!
//! - **`pid`**: 控制器本体 [`PidController`]
//! - **`config`**: 调参配置 [`PidConfig`]（TOML 读写）
//! - **`controller`**: 控制器通用接口 [`Controller`]
//! - **`loop_runner`**: 宿主侧控制循环 [`run_controller`] / [`run_controller_spin`]
//! - **`error`**: 错误类型 [`PidError`]
//!
//! # 快速开始
//!
//! ```rust
//! use simple_pid::prelude::*;
//!
//! let mut pid = PidConfig::default()
//!     .with_gains(1.0, 1.0, 0.0)
//!     .with_integral_limits(-5.0, 5.0)
//!     .build()?;
//! pid.set_target(100.0)?;
//!
//! let output = pid.update(0.0)?;
//! // p = 100，i 饱和在 5
//! assert_eq!(output, 105.0);
//! # Ok::<(), PidError>(())
//! ```
//!
//! # 日志
//!
//! 库内部使用 `tracing` 输出 `trace` / `debug` / `warn` 级别日志，不安装 subscriber。

pub mod config;
pub mod controller;
pub mod error;
pub mod loop_runner;
pub mod pid;

pub mod prelude;

pub use config::PidConfig;
pub use controller::Controller;
pub use error::PidError;
pub use loop_runner::{LoopConfig, LoopError, LoopReport, Plant, run_controller, run_controller_spin};
pub use pid::{PidController, PidTerms};
