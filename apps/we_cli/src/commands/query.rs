// apps/we_cli/src/commands/query.rs

//! 点查询命令

use super::RequestArgs;
use anyhow::{Context, Result};
use clap::Args;
use std::thread;
use std::time::Duration;
use tracing::info;
use we_workflow::TimeSelector;

/// 点查询参数
#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// 查询经度
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// 查询纬度
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// 查询时刻 [s]，-1 表示最新帧
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub time: f64,

    /// 查询前运行的墙钟时长 [秒]
    #[arg(long, default_value_t = 1.0)]
    pub warmup: f64,

    /// 以 JSON 输出
    #[arg(long)]
    pub json: bool,
}

/// 执行点查询命令
pub fn execute(args: QueryArgs) -> Result<()> {
    info!("=== WaveEnv 点查询 ===");

    let request = args.request.build_request()?;
    let engine = args.request.engine()?;
    let id = engine.create_task(request).context("创建任务失败")?;

    let warmup = Duration::try_from_secs_f64(args.warmup.max(0.0))
        .with_context(|| format!("预热时长 {} s 无效", args.warmup))?;
    thread::sleep(warmup);

    let selector = TimeSelector::from(args.time);
    let result = engine.query_point(id, args.lon, args.lat, selector);
    engine.delete_task(id)?;
    let point = result.with_context(|| format!("查询 ({}, {}) 失败", args.lon, args.lat))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&point)?);
    } else {
        println!("位置: ({:.5}, {:.5})", point.lon, point.lat);
        println!("时刻: {:.3} s", point.time);
        println!("波面高度: {:.4} m", point.value);
        println!("任务状态: {}", point.status);
    }

    Ok(())
}
