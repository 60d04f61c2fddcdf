//! PID 调参配置
//!
//! 控制器的全部调参（增益、积分限幅、时间步长）都可以作为数据描述，
//! 从 TOML 读取或写回 TOML。只保存调参，不保存控制循环的运行状态。
//!
//! # TOML 格式
//!
//! 所有字段都可省略，缺省值与 [`PidController::default()`] 一致：
//!
//! ```toml
//! k_p = 2.0
//! k_i = 0.5
//! k_d = 0.1
//! i_max = 5.0     # 或 inf
//! i_min = -5.0    # 或 -inf
//! dt = 0.01
//! ```
//!
//! # 示例
//!
//! ```rust
//! use simple_pid::PidConfig;
//!
//! let pid = PidConfig::default()
//!     .with_gains(2.0, 0.5, 0.1)
//!     .with_integral_limits(-5.0, 5.0)
//!     .with_dt(0.01)
//!     .build()
//!     .unwrap();
//! assert_eq!(pid.k_p(), 2.0);
//! ```

use crate::error::PidError;
use crate::pid::PidController;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// PID 调参配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PidConfig {
    /// 比例增益
    pub k_p: f64,
    /// 积分增益
    pub k_i: f64,
    /// 微分增益
    pub k_d: f64,
    /// 积分项输出上限（正数或 `+inf`）
    pub i_max: f64,
    /// 积分项输出下限（负数或 `-inf`）
    pub i_min: f64,
    /// 标称时间步长
    pub dt: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            k_p: 1.0,
            k_i: 0.0,
            k_d: 0.0,
            i_max: f64::INFINITY,
            i_min: f64::NEG_INFINITY,
            dt: 1.0,
        }
    }
}

impl PidConfig {
    /// 设置 PID 增益
    pub fn with_gains(mut self, k_p: f64, k_i: f64, k_d: f64) -> Self {
        self.k_p = k_p;
        self.k_i = k_i;
        self.k_d = k_d;
        self
    }

    /// 设置积分项输出范围 `[i_min, i_max]`
    pub fn with_integral_limits(mut self, i_min: f64, i_max: f64) -> Self {
        self.i_min = i_min;
        self.i_max = i_max;
        self
    }

    /// 设置标称时间步长
    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    /// 校验配置
    ///
    /// # 规则
    ///
    /// - `k_p`, `k_i`, `k_d`, `dt` 必须是有限数（`dt` 不限符号）
    /// - `i_max > 0` 或 `+inf`
    /// - `i_min < 0` 或 `-inf`
    pub fn validate(&self) -> Result<(), PidError> {
        for (param, value) in [
            ("k_p", self.k_p),
            ("k_i", self.k_i),
            ("k_d", self.k_d),
            ("dt", self.dt),
        ] {
            if !value.is_finite() {
                return Err(PidError::configuration(
                    param,
                    format!("must be a finite number, got {value}"),
                ));
            }
        }

        // NaN 在两个比较里都为 false，会落入错误分支
        if !(self.i_max > 0.0) {
            return Err(PidError::configuration(
                "i_max",
                format!("must be a positive number or +inf, got {}", self.i_max),
            ));
        }

        if !(self.i_min < 0.0) {
            return Err(PidError::configuration(
                "i_min",
                format!("must be a negative number or -inf, got {}", self.i_min),
            ));
        }

        Ok(())
    }

    /// 校验并构造控制器
    pub fn build(self) -> Result<PidController, PidError> {
        PidController::from_config(self)
    }

    /// 从 TOML 文本解析并校验
    ///
    /// 字段类型不是数字（如 `k_p = "fast"`）同样是配置错误。
    pub fn from_toml_str(content: &str) -> Result<Self, PidError> {
        let config: PidConfig = toml::from_str(content)
            .map_err(|e| PidError::configuration("toml", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为 TOML 文本
    pub fn to_toml_string(&self) -> Result<String, PidError> {
        toml::to_string(self).map_err(|e| PidError::configuration("toml", e.to_string()))
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PidError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PidError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?config, "Loaded PID config");
        Ok(config)
    }

    /// 保存配置到文件
    ///
    /// 只写入调参，先校验，非法配置不会落盘。
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PidError> {
        self.validate()?;
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        fs::write(path, content).map_err(|source| PidError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })
    }
}
