// apps/we_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 创建任务后按固定墙钟间隔报告最新帧的统计，时长到达或任务终止时结束。

use super::{field_stats, RequestArgs};
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use we_workflow::{LoggingListener, TimeSelector};

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// 运行的墙钟时长 [秒]
    #[arg(long, default_value_t = 5.0)]
    pub duration: f64,

    /// 报告间隔 [秒]
    #[arg(long, default_value_t = 1.0)]
    pub report_interval: f64,

    /// 结束时把最新帧写入此 JSON 文件
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出逐帧事件
    #[arg(long)]
    pub verbose_events: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== WaveEnv 模拟启动 ===");

    let request = args.request.build_request()?;
    let engine = args.request.engine()?;
    let listener = LoggingListener::new("we_cli");
    let listener = if args.verbose_events { listener.verbose() } else { listener };
    engine.events().add_listener(Arc::new(listener));

    info!(
        "区域: [{}, {}] x [{}, {}], 水深 {}-{} m",
        request.region.lon_min,
        request.region.lon_max,
        request.region.lat_min,
        request.region.lat_max,
        request.region.depth_min,
        request.region.depth_max
    );
    info!(
        "频谱: {} Hs={} m Tp={} s, 风 {} m/s @ {}°",
        request.spectrum.model,
        request.spectrum.hs,
        request.spectrum.tp,
        request.wind.wind_speed,
        request.wind.wind_direction_deg
    );

    let id = engine.create_task(request).context("创建任务失败")?;
    let task_info = engine.task_info(id)?;
    info!(
        "任务 {}: {} 格点, {} 波浪分量",
        id, task_info.grid_points, task_info.components
    );

    let start = Instant::now();
    let total = Duration::from_secs_f64(args.duration.max(0.0));
    let interval = Duration::from_secs_f64(args.report_interval.max(0.01));

    loop {
        let remaining = total.saturating_sub(start.elapsed());
        thread::sleep(interval.min(remaining));

        let frame = engine.get_frames(id, TimeSelector::Latest)?;
        let (min, max, rms) = field_stats(frame.points.iter().map(|p| p.value));
        info!(
            "t={:.2} s [{}]: η_min={:.3} m, η_max={:.3} m, η_rms={:.3} m",
            frame.time, frame.status, min, max, rms
        );

        if frame.status.is_terminal() || start.elapsed() >= total {
            break;
        }
    }

    if let Some(path) = &args.output {
        let frame = engine.get_frames(id, TimeSelector::Latest)?;
        let json = serde_json::to_string_pretty(&frame)?;
        std::fs::write(path, json).with_context(|| format!("无法写入 {}", path.display()))?;
        info!("最新帧已写入 {}", path.display());
    }

    let summary = engine.task_info(id)?;
    if let Some(error) = &summary.error {
        warn!("任务失败: {}", error);
    }
    engine.delete_task(id)?;

    info!("=== 模拟结束 ===");
    info!("状态: {}", summary.status);
    info!("发布帧数: {} (缓存 {})", summary.frames_emitted, summary.frame_count);
    info!("超时步数: {}, 最长单步 {:.1} ms", summary.overrun_steps, summary.max_step_secs * 1e3);
    info!("墙钟时间: {:.2} s", start.elapsed().as_secs_f64());

    Ok(())
}
