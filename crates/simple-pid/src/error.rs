//! 错误类型
//!
//! 只有两类核心错误：
//!
//! - **配置错误** (`Configuration`): 构造时参数非法，构造要么完全成功，要么失败
//! - **输入校验错误** (`Validation`): `set_target` / `update` 收到非有限数，状态保持不变
//!
//! 另外 `ConfigFile` 只出现在从磁盘加载/保存 [`PidConfig`](crate::PidConfig) 时。
//!
//! # 示例
//!
//! ```rust
//! use simple_pid::{PidController, PidError};
//!
//! let err = PidController::new(1.0, 0.0, 0.0, -1.0, f64::NEG_INFINITY, 1.0).unwrap_err();
//! assert!(err.is_configuration());
//!
//! let mut pid = PidController::default();
//! let err = pid.update(f64::NAN).unwrap_err();
//! assert!(matches!(err, PidError::Validation { input: "current_value", .. }));
//! ```

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// PID 控制器错误类型
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PidError {
    /// 构造参数或配置无效
    #[error("Configuration error for '{param}': {reason}")]
    Configuration {
        /// 参数名
        param: &'static str,
        /// 原因
        reason: String,
    },

    /// 运行时输入不是有限数
    #[error("Invalid input '{input}': {value} is not a finite number")]
    Validation {
        /// 输入名
        input: &'static str,
        /// 实际值
        value: f64,
    },

    /// 配置文件读写失败
    #[error("Config file {path:?}: {source}")]
    ConfigFile {
        /// 文件路径
        path: PathBuf,
        /// 底层 I/O 错误
        #[source]
        source: io::Error,
    },
}

impl PidError {
    pub(crate) fn configuration(param: &'static str, reason: impl Into<String>) -> Self {
        PidError::Configuration {
            param,
            reason: reason.into(),
        }
    }

    /// 是否为配置错误（包括配置文件错误）
    pub fn is_configuration(&self) -> bool {
        matches!(self, PidError::Configuration { .. } | PidError::ConfigFile { .. })
    }

    /// 是否为输入校验错误
    pub fn is_validation(&self) -> bool {
        matches!(self, PidError::Validation { .. })
    }
}

/// 校验运行时输入为有限数
pub(crate) fn ensure_finite(input: &'static str, value: f64) -> Result<f64, PidError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PidError::Validation { input, value })
    }
}
