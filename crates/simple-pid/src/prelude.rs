//! Prelude - 常用类型的便捷导入
//!
//! ```rust
//! use simple_pid::prelude::*;
//! ```

pub use crate::config::PidConfig;
pub use crate::controller::Controller;
pub use crate::error::PidError;
pub use crate::loop_runner::{LoopConfig, LoopError, LoopReport, Plant, run_controller, run_controller_spin};
pub use crate::pid::{PidController, PidTerms};
