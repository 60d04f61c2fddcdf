//! PID Controller - 比例-积分-微分控制器
//!
//! 单回路 PID 控制器，带积分抗饱和（anti-windup）钳位。
//!
//! # 算法
//!
//! 每个 tick 调用一次 [`PidController::update`]：
//!
//! ```text
//! error      = target - current_value
//! sum_error += error * dt                      (矩形/欧拉积分)
//! sum_error  = clamp(sum_error, i_min / k_i, i_max / k_i)
//!
//! p = k_p * (target - current_value)
//! i = clamp(k_i * sum_error, i_min, i_max)
//! d = k_d * (target - last_error) / dt
//!
//! output = p + i + d
//! ```
//!
//! # 注意
//!
//! - **微分项**: 使用 `target - last_error`，而不是常见的 `error - last_error`。
//!   这是兼容已有行为的有意保留，不要"修正"。
//! - **积分限幅**: `i_max` / `i_min` 限制的是积分项对输出的贡献，不是累积误差本身。
//!   累积误差先按 `i_max / k_i` 钳位，积分项再按 `[i_min, i_max]` 精确钳位一次。
//! - **线程安全**: 所有修改都通过 `&mut self`，多线程使用时需要外部加锁。
//!
//! # 示例
//!
//! ```rust
//! use simple_pid::PidController;
//!
//! let mut pid = PidController::new(2.0, 0.0, 0.0, f64::INFINITY, f64::NEG_INFINITY, 1.0)?;
//! pid.set_target(10.0)?;
//!
//! // 误差 = 6，输出 = 2 * 6
//! let output = pid.update(4.0)?;
//! assert_eq!(output, 12.0);
//! # Ok::<(), simple_pid::PidError>(())
//! ```

use crate::config::PidConfig;
use crate::error::{PidError, ensure_finite};

/// PID 控制器
///
/// 调参（增益、积分限幅、`dt`）在构造时固定；运行状态随 `set_target` / `update` 变化。
#[derive(Debug, Clone, PartialEq)]
pub struct PidController {
    /// 比例增益
    k_p: f64,
    /// 积分增益
    k_i: f64,
    /// 微分增益
    k_d: f64,
    /// 标称时间步长
    dt: f64,
    /// 积分项上限
    i_max: f64,
    /// 积分项下限
    i_min: f64,

    /// 目标值
    target: f64,
    /// 最近一次测量值
    current_value: f64,
    /// 累积误差
    sum_error: f64,
    /// 上一次 update 的误差
    last_error: f64,
}

/// 某一时刻的 P / I / D 三项
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidTerms {
    /// 比例项
    pub p: f64,
    /// 积分项
    pub i: f64,
    /// 微分项
    pub d: f64,
}

impl PidTerms {
    /// 三项之和
    pub fn output(&self) -> f64 {
        self.p + self.i + self.d
    }
}

impl Default for PidController {
    /// `k_p = 1`, `k_i = 0`, `k_d = 0`, 无积分限幅, `dt = 1`
    fn default() -> Self {
        Self::with_valid_config(PidConfig::default())
    }
}

impl PidController {
    /// 创建新的 PID 控制器
    ///
    /// # 参数
    ///
    /// - `k_p`, `k_i`, `k_d`: 增益，任意有限数
    /// - `i_max`: 积分项上限，正数或 `f64::INFINITY`
    /// - `i_min`: 积分项下限，负数或 `f64::NEG_INFINITY`
    /// - `dt`: 两次 `update` 之间的标称时间步长，任意有限数（原样保存）
    ///
    /// # 错误
    ///
    /// 任何参数非法时返回 [`PidError::Configuration`]，不会产生半初始化的对象。
    ///
    /// # 示例
    ///
    /// ```rust
    /// # use simple_pid::PidController;
    /// let pid = PidController::new(1.0, 1.0, 0.0, 5.0, -5.0, 1.0).unwrap();
    /// assert_eq!(pid.i_max(), 5.0);
    ///
    /// assert!(PidController::new(1.0, 1.0, 0.0, 0.0, -5.0, 1.0).is_err());
    /// ```
    pub fn new(
        k_p: f64,
        k_i: f64,
        k_d: f64,
        i_max: f64,
        i_min: f64,
        dt: f64,
    ) -> Result<Self, PidError> {
        Self::from_config(PidConfig {
            k_p,
            k_i,
            k_d,
            i_max,
            i_min,
            dt,
        })
    }

    /// 从配置创建控制器
    pub fn from_config(config: PidConfig) -> Result<Self, PidError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: PidConfig) -> Self {
        PidController {
            k_p: config.k_p,
            k_i: config.k_i,
            k_d: config.k_d,
            dt: config.dt,
            i_max: config.i_max,
            i_min: config.i_min,
            target: 0.0,
            current_value: 0.0,
            sum_error: 0.0,
            last_error: 0.0,
        }
    }

    /// 设置目标值
    ///
    /// 只覆盖 `target`，不影响累积误差和上一次误差。两次 `update` 之间可以调用任意次，
    /// 只有最后一次生效。
    ///
    /// # 错误
    ///
    /// `target` 不是有限数时返回 [`PidError::Validation`]，状态不变。
    pub fn set_target(&mut self, target: f64) -> Result<(), PidError> {
        self.target = ensure_finite("target", target)?;
        Ok(())
    }

    /// 计算一步控制输出
    ///
    /// 每个 tick 调用一次。
    ///
    /// # 错误
    ///
    /// `current_value` 不是有限数时返回 [`PidError::Validation`]，不产生输出，状态不变。
    ///
    /// # 示例
    ///
    /// ```rust
    /// # use simple_pid::PidController;
    /// let mut pid = PidController::new(1.0, 1.0, 0.0, 5.0, -5.0, 1.0).unwrap();
    /// pid.set_target(100.0).unwrap();
    /// for _ in 0..10 {
    ///     pid.update(0.0).unwrap();
    /// }
    /// // 积分项饱和在 i_max
    /// assert_eq!(pid.i(), 5.0);
    /// ```
    pub fn update(&mut self, current_value: f64) -> Result<f64, PidError> {
        // 1. 校验（失败时不修改任何状态）
        let current_value = ensure_finite("current_value", current_value)?;

        // 2. 计算误差
        self.current_value = current_value;
        let error = self.target - self.current_value;

        // 3. 积分（矩形近似）+ 抗饱和
        self.sum_error += error * self.dt;
        let (min_sum, max_sum) = self.sum_error_bounds();

        // 负 k_i 时上下界会反转，按固定顺序比较，不能用 f64::clamp
        if self.sum_error > max_sum {
            tracing::trace!(sum_error = self.sum_error, max_sum, "Integral clamped at upper bound");
            self.sum_error = max_sum;
        } else if self.sum_error < min_sum {
            tracing::trace!(sum_error = self.sum_error, min_sum, "Integral clamped at lower bound");
            self.sum_error = min_sum;
        }

        // 4. 输出
        let output = self.p() + self.i() + self.d();

        // 5. 更新上一次误差
        self.last_error = error;

        Ok(output)
    }

    /// 比例项
    ///
    /// 由当前 `target` 和 `current_value` 实时计算。
    pub fn p(&self) -> f64 {
        self.k_p * (self.target - self.current_value)
    }

    /// 积分项
    ///
    /// 总是落在 `[i_min, i_max]` 内；`k_i == 0` 时恒为 0。
    pub fn i(&self) -> f64 {
        if self.k_i == 0.0 {
            // 累积误差在无限幅时可能溢出为 inf，0 * inf 会得到 NaN
            return 0.0;
        }
        (self.k_i * self.sum_error).clamp(self.i_min, self.i_max)
    }

    /// 微分项
    ///
    /// `k_d * (target - last_error) / dt`。第一次 `update` 时 `last_error` 为 0。
    pub fn d(&self) -> f64 {
        self.k_d * (self.target - self.last_error) / self.dt
    }

    /// 当前 P / I / D 三项
    pub fn terms(&self) -> PidTerms {
        PidTerms {
            p: self.p(),
            i: self.i(),
            d: self.d(),
        }
    }

    /// 累积误差的钳位范围 `(min_sum, max_sum)`
    ///
    /// `k_i == 0` 时不钳位。
    fn sum_error_bounds(&self) -> (f64, f64) {
        if self.k_i != 0.0 {
            (self.i_min / self.k_i, self.i_max / self.k_i)
        } else {
            (f64::NEG_INFINITY, f64::INFINITY)
        }
    }

    /// 清空运行状态
    ///
    /// `current_value`、`sum_error`、`last_error` 归零；保留 `target` 和调参。
    pub fn reset(&mut self) {
        tracing::debug!(
            sum_error = self.sum_error,
            last_error = self.last_error,
            "Resetting PID controller state"
        );
        self.current_value = 0.0;
        self.sum_error = 0.0;
        self.last_error = 0.0;
    }

    /// 比例增益
    pub fn k_p(&self) -> f64 {
        self.k_p
    }

    /// 积分增益
    pub fn k_i(&self) -> f64 {
        self.k_i
    }

    /// 微分增益
    pub fn k_d(&self) -> f64 {
        self.k_d
    }

    /// 标称时间步长
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// 积分项上限
    pub fn i_max(&self) -> f64 {
        self.i_max
    }

    /// 积分项下限
    pub fn i_min(&self) -> f64 {
        self.i_min
    }

    /// 当前目标值
    pub fn target(&self) -> f64 {
        self.target
    }

    /// 最近一次测量值
    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    /// 累积误差
    ///
    /// 用于调试和监控。
    pub fn sum_error(&self) -> f64 {
        self.sum_error
    }

    /// 上一次 update 的误差
    pub fn last_error(&self) -> f64 {
        self.last_error
    }

    /// 构造时使用的调参
    pub fn config(&self) -> PidConfig {
        PidConfig {
            k_p: self.k_p,
            k_i: self.k_i,
            k_d: self.k_d,
            i_max: self.i_max,
            i_min: self.i_min,
            dt: self.dt,
        }
    }
}
