// apps/we_cli/src/commands/mod.rs

//! 子命令实现与共用的请求参数

pub mod info;
pub mod query;
pub mod run;
pub mod validate;

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;
use tracing::info;
use we_config::{
    Discretization, EngineConfig, Region, Retention, SimulationRequest, SpectrumModel,
    SpectrumSpec, TimeSpec, TotalDuration, WindSpec,
};
use we_physics::WindField;
use we_workflow::WaveEngine;

/// 模拟请求参数：给出请求文件时忽略其余选项
#[derive(Args, Debug, Clone)]
pub struct RequestArgs {
    /// 请求文件 (JSON)
    #[arg(short, long)]
    pub request: Option<PathBuf>,

    /// 区域 lon_min,lat_min,depth_min,lon_max,lat_max,depth_max
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "120.0,30.0,10.0,120.5,30.5,20.0")]
    pub region: Vec<f64>,

    /// 风速 [m/s]
    #[arg(long, default_value_t = 10.0)]
    pub wind_speed: f64,

    /// 风向 [度]
    #[arg(long, default_value_t = 270.0)]
    pub wind_direction: f64,

    /// 谱模型 (PM, JONSWAP)
    #[arg(long, default_value = "PM")]
    pub model: String,

    /// 有效波高 [m]
    #[arg(long, default_value_t = 2.0)]
    pub hs: f64,

    /// 谱峰周期 [s]
    #[arg(long, default_value_t = 8.0)]
    pub tp: f64,

    /// JONSWAP 峰值增强因子
    #[arg(long, default_value_t = 3.3)]
    pub gamma: f64,

    /// 主浪向 [度]，缺省取风向
    #[arg(long)]
    pub wave_direction: Option<f64>,

    /// 方向扩展角 [度]
    #[arg(long, default_value_t = 30.0)]
    pub spread: f64,

    /// 按风速使用充分发展海况的 Hs 与 Tp
    #[arg(long)]
    pub fully_developed: bool,

    /// 经向间距 [度]
    #[arg(long, default_value_t = 0.05)]
    pub dx: f64,

    /// 纬向间距 [度]
    #[arg(long, default_value_t = 0.05)]
    pub dy: f64,

    /// 网格点数上限
    #[arg(long, default_value_t = 5000)]
    pub max_points: usize,

    /// 后台步长 [s]
    #[arg(long, default_value_t = 0.2)]
    pub dt: f64,

    /// 模拟总时长 [s]，-1 表示不限
    #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
    pub t_total: f64,

    /// 帧缓存保留窗口 [s]，缺省保留全部
    #[arg(long)]
    pub retention: Option<f64>,

    /// 引擎配置文件 (JSON)
    #[arg(long)]
    pub engine_config: Option<PathBuf>,
}

impl RequestArgs {
    /// 构建模拟请求
    pub fn build_request(&self) -> Result<SimulationRequest> {
        if let Some(path) = &self.request {
            info!("读取请求文件: {}", path.display());
            return SimulationRequest::from_file(path)
                .with_context(|| format!("无法读取请求文件 {}", path.display()));
        }

        let [lon_min, lat_min, depth_min, lon_max, lat_max, depth_max] = self.region[..] else {
            bail!("--region 需要 6 个数值，实际 {} 个", self.region.len());
        };
        let region = Region::new(lon_min, lat_min, depth_min, lon_max, lat_max, depth_max);
        let wind = WindSpec::new(self.wind_speed, self.wind_direction);

        let (hs, tp) = if self.fully_developed {
            let field = WindField::from_spec(&wind);
            let Some((hs, tp)) = field.fully_developed_sea() else {
                bail!("风速 {} m/s 无法确定充分发展海况", self.wind_speed);
            };
            info!("充分发展海况: Hs={:.2} m, Tp={:.2} s", hs, tp);
            (hs, tp)
        } else {
            (self.hs, self.tp)
        };

        let mut spectrum = SpectrumSpec {
            model: SpectrumModel::from(self.model.clone()),
            hs,
            tp,
            gamma: self.gamma,
            ..SpectrumSpec::default()
        }
        .with_spread(self.spread);
        if let Some(direction) = self.wave_direction {
            spectrum = spectrum.with_direction(direction);
        }

        let time = TimeSpec::new(
            self.dt,
            TotalDuration::from(Some(self.t_total)),
            Retention::from(self.retention),
        );

        Ok(SimulationRequest::new(region)
            .with_wind(wind)
            .with_spectrum(spectrum)
            .with_discretization(Discretization::new(self.dx, self.dy, self.max_points))
            .with_time(time))
    }

    /// 加载引擎配置
    pub fn engine_config(&self) -> Result<EngineConfig> {
        match &self.engine_config {
            Some(path) => EngineConfig::from_file(path)
                .with_context(|| format!("无法读取引擎配置 {}", path.display())),
            None => Ok(EngineConfig::default()),
        }
    }

    /// 创建引擎
    pub fn engine(&self) -> Result<WaveEngine> {
        WaveEngine::with_config(self.engine_config()?).context("创建引擎失败")
    }
}

/// 一组波面高度的统计 (min, max, rms)
pub fn field_stats(values: impl IntoIterator<Item = f64>) -> (f64, f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum_sq = 0.0;
    let mut n = 0usize;
    for v in values {
        min = min.min(v);
        max = max.max(v);
        sum_sq += v * v;
        n += 1;
    }
    if n == 0 {
        return (0.0, 0.0, 0.0);
    }
    (min, max, (sum_sq / n as f64).sqrt())
}
