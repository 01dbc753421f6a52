// apps/we_cli/src/commands/validate.rs

//! 请求验证命令
//!
//! 检查请求文件与引擎配置，并预先生成网格确认点数上限下的实际间距。

use anyhow::{bail, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use we_config::{EngineConfig, Retention, SimulationRequest, TotalDuration};
use we_physics::GridBuilder;

/// 验证参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 请求文件路径
    #[arg(short, long)]
    pub request: PathBuf,

    /// 引擎配置文件路径
    #[arg(long)]
    pub engine_config: Option<PathBuf>,

    /// 严格模式（警告也视为错误）
    #[arg(long)]
    pub strict: bool,
}

/// 验证结果
#[derive(Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    fn is_ok_strict(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// 执行验证命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("=== WaveEnv 请求验证 ===");

    let mut result = ValidationResult::default();

    if let Some(path) = &args.engine_config {
        validate_engine_config(path, &mut result);
    }
    validate_request(&args.request, &mut result);

    print_validation_result(&result, args.strict)
}

fn validate_engine_config(path: &Path, result: &mut ValidationResult) {
    println!("\n检查引擎配置: {}", path.display());

    match EngineConfig::from_file(path) {
        Ok(config) => match config.validate() {
            Ok(()) => println!("  ✓ 引擎配置有效"),
            Err(e) => result.add_error(format!("引擎配置无效: {}", e)),
        },
        Err(e) => result.add_error(format!("无法读取引擎配置: {}", e)),
    }
}

fn validate_request(path: &Path, result: &mut ValidationResult) {
    println!("\n检查请求文件: {}", path.display());

    if !path.exists() {
        result.add_error(format!("请求文件不存在: {}", path.display()));
        return;
    }

    let request = match SimulationRequest::from_file(path) {
        Ok(r) => r,
        Err(e) => {
            result.add_error(format!("请求解析错误: {}", e));
            return;
        }
    };

    if let Err(e) = request.validate() {
        result.add_error(e.to_string());
        return;
    }
    println!("  ✓ 请求参数有效");

    // 预生成网格
    match GridBuilder::new(&request.region, &request.discretization).build() {
        Ok(grid) => {
            let (dx, dy) = grid.spacing();
            println!(
                "  ✓ 网格 {}x{} = {} 点 (dx={:.6}, dy={:.6})",
                grid.cols(),
                grid.rows(),
                grid.len(),
                dx,
                dy
            );
            let disc = &request.discretization;
            if dx > disc.dx * (1.0 + 1e-9) || dy > disc.dy * (1.0 + 1e-9) {
                result.add_warning(format!(
                    "网格间距已放大到 ({:.6}, {:.6}) 以满足 max_points={}",
                    dx, dy, disc.max_points
                ));
            }
        }
        Err(e) => result.add_error(format!("网格生成失败: {}", e)),
    }

    let dt = request.time.dt_backend;
    if let Retention::Seconds(r) = request.time.cache_retention_time {
        if r < dt {
            result.add_warning(format!("保留窗口 {} s 小于步长 {} s，缓存只保留最新帧", r, dt));
        }
    }
    if let TotalDuration::Seconds(t) = request.time.t_total {
        if t < dt {
            result.add_warning(format!("总时长 {} s 小于步长 {} s，任务在 t={} s 帧后即完成", t, dt, dt));
        }
    }
}

fn print_validation_result(result: &ValidationResult, strict: bool) -> Result<()> {
    println!("\n=== 验证结果 ===");

    if !result.errors.is_empty() {
        println!("\n错误 ({}):", result.errors.len());
        for err in &result.errors {
            error!("  ✗ {}", err);
            println!("  ✗ {}", err);
        }
    }

    if !result.warnings.is_empty() {
        println!("\n警告 ({}):", result.warnings.len());
        for warning in &result.warnings {
            warn!("  ⚠ {}", warning);
            println!("  ⚠ {}", warning);
        }
    }

    let success = if strict {
        result.is_ok_strict()
    } else {
        result.is_ok()
    };

    if success {
        println!("\n✓ 验证通过");
        Ok(())
    } else {
        println!("\n✗ 验证失败");
        bail!(
            "验证失败：发现 {} 个错误，{} 个警告",
            result.errors.len(),
            result.warnings.len()
        )
    }
}
