// apps/we_cli/src/commands/info.rs

//! 信息显示命令
//!
//! 不启动任务，只生成网格与波浪实现并输出摘要。

use super::RequestArgs;
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;
use we_config::{EngineConfig, Region, SimulationRequest};
use we_physics::{GridBuilder, SpectralRealizer, WindField};

/// 信息显示参数
#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// 相位随机种子
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// 列出全部波浪分量
    #[arg(long)]
    pub components: bool,

    /// 显示默认配置
    #[arg(long)]
    pub defaults: bool,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    info!("=== WaveEnv 信息 ===");

    if args.defaults {
        return print_defaults();
    }

    let request = args.request.build_request()?;
    let config = args.request.engine_config()?;
    request.validate().context("请求参数无效")?;

    let grid = GridBuilder::new(&request.region, &request.discretization)
        .build()
        .context("网格生成失败")?;
    let (dx, dy) = grid.spacing();
    println!("=== 网格 ===");
    println!("尺寸: {} x {} = {} 点", grid.cols(), grid.rows(), grid.len());
    println!("间距: dx={:.6}°, dy={:.6}°", dx, dy);
    println!("代表水深: {:.2} m", grid.depth());

    let wind = WindField::from_spec(&request.wind);
    let (u, v) = wind.components();
    println!("\n=== 风场 ===");
    println!("10 m 风速: {:.2} m/s, 风向 {:.1}°", wind.speed(), wind.direction_deg());
    println!("分量: u={:.3} m/s, v={:.3} m/s", u, v);
    if let Some((hs, tp)) = wind.fully_developed_sea() {
        println!("充分发展海况: Hs={:.2} m, Tp={:.2} s", hs, tp);
    }

    let realization = SpectralRealizer::new(config.spectrum)
        .realize(&request.wind, &request.spectrum, grid.depth(), args.seed)
        .context("波浪实现失败")?;
    let stats = realization.stats();
    println!("\n=== 波浪实现 ===");
    println!("模型: {}", stats.model);
    println!("分量数: {}", stats.component_count);
    println!("有效波高: 目标 {:.3} m, 离散 {:.3} m", stats.target_hs, stats.implied_hs);
    println!("谱峰: Tp={:.2} s, 峰频 {:.4} Hz", stats.target_tp, stats.peak_frequency);
    println!("最大振幅: {:.4} m", stats.max_amplitude);
    println!("主浪向: {:.1}°", stats.main_direction_deg);

    if args.components {
        println!("\n{:>10} {:>10} {:>10} {:>10} {:>10}", "f [Hz]", "dir [°]", "a [m]", "k [1/m]", "phase");
        for c in realization.components() {
            println!(
                "{:>10.4} {:>10.1} {:>10.5} {:>10.5} {:>10.4}",
                c.frequency, c.direction_deg, c.amplitude, c.wavenumber, c.phase
            );
        }
    }

    Ok(())
}

fn print_defaults() -> Result<()> {
    println!("=== 默认引擎配置 ===");
    println!("{}", serde_json::to_string_pretty(&EngineConfig::default())?);

    let example = SimulationRequest::new(Region::new(120.0, 30.0, 10.0, 120.5, 30.5, 20.0));
    println!("\n=== 请求示例 ===");
    println!("{}", serde_json::to_string_pretty(&example)?);

    Ok(())
}
