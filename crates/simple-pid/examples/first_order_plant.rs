//! PID 控制示例 - 一阶惯性对象
//!
//! 用 PI 控制器把一个带散热损失的加热器稳定到目标温度。
//!
//! # 运行
//!
//! ```bash
//! RUST_LOG=simple_pid=debug cargo run -p simple-pid --example first_order_plant
//! ```
//!
//! 可选：传入一个 TOML 调参文件路径
//!
//! ```bash
//! cargo run -p simple-pid --example first_order_plant -- heater.toml
//! ```

use simple_pid::prelude::*;
use std::convert::Infallible;

/// 加热器：T' = (gain * u - (T - ambient)) / tau
struct Heater {
    temperature: f64,
    ambient: f64,
    gain: f64,
    tau: f64,
    dt: f64,
    ticks: usize,
}

impl Plant for Heater {
    type Error = Infallible;

    fn measure(&mut self) -> Result<f64, Self::Error> {
        Ok(self.temperature)
    }

    fn actuate(&mut self, output: f64) -> Result<(), Self::Error> {
        // 执行器只能加热
        let power = output.max(0.0);
        self.temperature +=
            (self.gain * power - (self.temperature - self.ambient)) * self.dt / self.tau;
        self.ticks += 1;
        if self.ticks.is_multiple_of(50) {
            println!(
                "   t = {:>5.2}s  T = {:>6.2} °C  u = {:>7.2}",
                self.ticks as f64 * self.dt,
                self.temperature,
                output
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("first_order_plant=info".parse()?),
        )
        .init();

    println!("🎯 simple-pid - First Order Plant Example");
    println!("=========================================\n");

    // 1. 调参：命令行给出文件就从文件读取
    let config = match std::env::args().nth(1) {
        Some(path) => PidConfig::load_from_file(path)?,
        None => PidConfig::default()
            .with_gains(8.0, 2.0, 0.0)
            .with_integral_limits(-50.0, 50.0)
            .with_dt(0.01),
    };

    println!("🔧 PID 配置:");
    println!("{}", config.to_toml_string()?);

    let mut pid = config.build()?;
    pid.set_target(60.0)?;

    // 2. 运行控制循环
    let mut heater = Heater {
        temperature: 20.0,
        ambient: 20.0,
        gain: 1.0,
        tau: 2.0,
        dt: pid.dt(),
        ticks: 0,
    };

    let loop_config = LoopConfig {
        max_iterations: Some(500),
        ..LoopConfig::for_controller(&pid)
    };

    let report = run_controller_spin(&mut heater, &mut pid, &loop_config)?;

    // 3. 结果
    let terms = pid.terms();
    println!();
    println!("✅ 完成 {} 次迭代（时间跳变 {} 次）", report.iterations, report.time_jumps);
    println!("   最终温度: {:.3} °C", heater.temperature);
    println!("   P = {:.3}, I = {:.3}, D = {:.3}", terms.p, terms.i, terms.d);

    Ok(())
}
