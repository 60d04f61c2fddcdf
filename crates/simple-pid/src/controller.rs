//! Controller trait - 控制器通用接口
//!
//! # 设计理念
//!
//! - **Tick 模式**: 用户（或 [`run_controller`](crate::run_controller)）拥有控制循环，控制器只负责计算
//! - **固定步长**: 控制器内部使用标称 `dt`，不读取墙钟时间
//! - **错误处理**: 关联类型 `Error` 允许自定义错误
//!
//! # 时间跳变处理
//!
//! 当 tick 比预期晚到太多时（系统卡顿、线程调度延迟），循环会先调用
//! `on_time_jump()`。[`PidController`] 使用默认实现，不改动任何状态：
//!
//! - ❌ 不清零积分项，否则执行器会瞬间失去稳态补偿
//! - ❌ 不清空 `last_error`，经过循环和直接调用 `update` 的输出必须一致
//!
//! # 示例
//!
//! ```rust
//! use simple_pid::Controller;
//!
//! struct Bang {
//!     target: f64,
//! }
//!
//! impl Controller for Bang {
//!     type Error = std::convert::Infallible;
//!
//!     fn tick(&mut self, measurement: f64) -> Result<f64, Self::Error> {
//!         Ok(if measurement < self.target { 1.0 } else { 0.0 })
//!     }
//! }
//!
//! let mut bang = Bang { target: 1.0 };
//! assert_eq!(bang.tick(0.5).unwrap(), 1.0);
//! ```

use crate::error::PidError;
use crate::pid::PidController;
use std::time::Duration;

/// 控制器通用接口
///
/// # 线程安全
///
/// `Controller` 本身不要求 `Send` 或 `Sync`。
/// 如果需要在多线程中使用，请将其包装在 `Mutex` 中。
pub trait Controller {
    /// 控制器错误类型
    type Error: std::error::Error + Send + 'static;

    /// 计算一步控制输出
    ///
    /// # 参数
    ///
    /// - `measurement`: 当前测量值
    ///
    /// # 返回
    ///
    /// - `Ok(output)`: 执行器命令
    /// - `Err(e)`: 输入无效或控制器内部错误
    fn tick(&mut self, measurement: f64) -> Result<f64, Self::Error>;

    /// 处理时间跳变
    ///
    /// # 参数
    ///
    /// - `elapsed`: 实际经过的时间
    ///
    /// # 默认实现
    ///
    /// 什么也不做。
    fn on_time_jump(&mut self, elapsed: Duration) -> Result<(), Self::Error> {
        let _ = elapsed;
        Ok(())
    }

    /// 重置控制器运行状态
    ///
    /// # 默认实现
    ///
    /// 什么也不做。
    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Controller for PidController {
    type Error = PidError;

    fn tick(&mut self, measurement: f64) -> Result<f64, Self::Error> {
        self.update(measurement)
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        PidController::reset(self);
        Ok(())
    }
}
