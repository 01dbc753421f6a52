// crates/we_config/src/request.rs

//! 模拟请求结构
//!
//! 一次模拟请求由五部分组成：区域、风场、波浪谱、空间离散与时间参数。
//! 所有结构都可由 JSON 反序列化，缺省字段取默认值；`validate()` 在任务创建前
//! 一次性检查全部约束，失败时返回对应的模型错误类别。
//!
//! JSON 约定：
//!
//! - `T_total` 为 `null` 或 `-1` 表示无限时长
//! - `cache_retention_time` 为 `null` 表示保留全部帧
//! - 波浪谱模型写作 `"PM"` 或 `"JONSWAP"`

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use we_foundation::{ensure, WeError, WeResult};
use we_geo::GeoBounds;

// ============================================================================
// 区域
// ============================================================================

/// 模拟区域
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// 最小经度 [度]
    pub lon_min: f64,
    /// 最小纬度 [度]
    pub lat_min: f64,
    /// 最小水深 [m]
    pub depth_min: f64,
    /// 最大经度 [度]
    pub lon_max: f64,
    /// 最大纬度 [度]
    pub lat_max: f64,
    /// 最大水深 [m]
    pub depth_max: f64,
}

impl Region {
    /// 按 (lon_min, lat_min, depth_min, lon_max, lat_max, depth_max) 顺序创建
    pub const fn new(
        lon_min: f64,
        lat_min: f64,
        depth_min: f64,
        lon_max: f64,
        lat_max: f64,
        depth_max: f64,
    ) -> Self {
        Self {
            lon_min,
            lat_min,
            depth_min,
            lon_max,
            lat_max,
            depth_max,
        }
    }

    /// 校验区域
    pub fn validate(&self) -> WeResult<()> {
        self.bounds()?;
        ensure!(
            self.depth_min.is_finite() && self.depth_max.is_finite(),
            WeError::invalid_region("水深必须为有限值")
        );
        ensure!(
            self.depth_min >= 0.0,
            WeError::invalid_region(format!("depth_min({}) 不能为负", self.depth_min))
        );
        ensure!(
            self.depth_min < self.depth_max,
            WeError::invalid_region(format!(
                "depth_min({}) 必须小于 depth_max({})",
                self.depth_min, self.depth_max
            ))
        );
        Ok(())
    }

    /// 水平边界框
    pub fn bounds(&self) -> WeResult<GeoBounds> {
        GeoBounds::new(self.lon_min, self.lat_min, self.lon_max, self.lat_max)
    }

    /// 代表水深 [m]，取深度范围中值
    #[inline]
    pub fn representative_depth(&self) -> f64 {
        0.5 * (self.depth_min + self.depth_max)
    }
}

// ============================================================================
// 风场
// ============================================================================

fn default_wind_speed() -> f64 { 10.0 }
fn default_wind_direction() -> f64 { 270.0 }
fn default_reference_height() -> f64 { 10.0 }

/// 风场参数（在任务生命周期内不变）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSpec {
    /// 风速 [m/s]
    #[serde(default = "default_wind_speed")]
    pub wind_speed: f64,
    /// 风向 [度]，罗盘方位，0=北，90=东
    #[serde(default = "default_wind_direction")]
    pub wind_direction_deg: f64,
    /// 风速参考高度 [m]
    #[serde(default = "default_reference_height", alias = "reference_height")]
    pub reference_height_m: f64,
}

impl Default for WindSpec {
    fn default() -> Self {
        Self {
            wind_speed: default_wind_speed(),
            wind_direction_deg: default_wind_direction(),
            reference_height_m: default_reference_height(),
        }
    }
}

impl WindSpec {
    /// 创建风场参数（参考高度 10 m）
    pub fn new(wind_speed: f64, wind_direction_deg: f64) -> Self {
        Self {
            wind_speed,
            wind_direction_deg,
            reference_height_m: default_reference_height(),
        }
    }

    /// 校验风场参数
    ///
    /// 风场只通过波浪谱影响结果，失败时归入波浪谱参数错误。
    pub fn validate(&self) -> WeResult<()> {
        ensure!(
            self.wind_speed.is_finite() && self.wind_speed >= 0.0,
            WeError::invalid_spectrum(format!("wind_speed({}) 必须为非负有限值", self.wind_speed))
        );
        ensure!(
            (0.0..360.0).contains(&self.wind_direction_deg),
            WeError::invalid_spectrum(format!(
                "wind_direction_deg({}) 必须位于 [0, 360)",
                self.wind_direction_deg
            ))
        );
        ensure!(
            self.reference_height_m.is_finite() && self.reference_height_m > 0.0,
            WeError::invalid_spectrum(format!(
                "reference_height_m({}) 必须为正",
                self.reference_height_m
            ))
        );
        Ok(())
    }
}

// ============================================================================
// 波浪谱
// ============================================================================

/// 波浪谱模型
///
/// 反序列化时保留无法识别的名称，由 `SpectrumSpec::validate` 统一报错。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpectrumModel {
    /// Pierson-Moskowitz 谱
    #[default]
    PiersonMoskowitz,
    /// JONSWAP 谱
    Jonswap,
    /// 无法识别的模型名
    Unrecognized(String),
}

impl SpectrumModel {
    /// 标准名称
    pub fn name(&self) -> &str {
        match self {
            Self::PiersonMoskowitz => "PM",
            Self::Jonswap => "JONSWAP",
            Self::Unrecognized(name) => name,
        }
    }
}

impl From<String> for SpectrumModel {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "PM" | "PIERSON-MOSKOWITZ" => Self::PiersonMoskowitz,
            "JONSWAP" => Self::Jonswap,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<SpectrumModel> for String {
    fn from(model: SpectrumModel) -> Self {
        model.name().to_string()
    }
}

impl fmt::Display for SpectrumModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn default_hs() -> f64 { 2.0 }
fn default_tp() -> f64 { 8.0 }
fn default_spread() -> f64 { 30.0 }
fn default_gamma() -> f64 { 3.3 }

/// 波浪谱参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumSpec {
    /// 谱模型
    #[serde(default, alias = "spectrum_model_type")]
    pub model: SpectrumModel,
    /// 有效波高 [m]
    #[serde(default = "default_hs", rename = "Hs", alias = "hs")]
    pub hs: f64,
    /// 谱峰周期 [s]
    #[serde(default = "default_tp", rename = "Tp", alias = "tp")]
    pub tp: f64,
    /// 主浪向 [度]，缺省时取风向
    #[serde(default)]
    pub main_wave_direction_deg: Option<f64>,
    /// 方向扩展角 [度]
    #[serde(default = "default_spread")]
    pub directional_spread_deg: f64,
    /// JONSWAP 峰值增强因子（其他模型忽略）
    #[serde(default = "default_gamma")]
    pub gamma: f64,
}

impl Default for SpectrumSpec {
    fn default() -> Self {
        Self {
            model: SpectrumModel::default(),
            hs: default_hs(),
            tp: default_tp(),
            main_wave_direction_deg: None,
            directional_spread_deg: default_spread(),
            gamma: default_gamma(),
        }
    }
}

impl SpectrumSpec {
    /// PM 谱
    pub fn pierson_moskowitz(hs: f64, tp: f64) -> Self {
        Self {
            hs,
            tp,
            ..Self::default()
        }
    }

    /// JONSWAP 谱
    pub fn jonswap(hs: f64, tp: f64, gamma: f64) -> Self {
        Self {
            model: SpectrumModel::Jonswap,
            hs,
            tp,
            gamma,
            ..Self::default()
        }
    }

    /// 指定主浪向
    pub fn with_direction(mut self, direction_deg: f64) -> Self {
        self.main_wave_direction_deg = Some(direction_deg);
        self
    }

    /// 指定方向扩展角
    pub fn with_spread(mut self, spread_deg: f64) -> Self {
        self.directional_spread_deg = spread_deg;
        self
    }

    /// 实际使用的主浪向 [度]
    pub fn resolved_direction(&self, wind: &WindSpec) -> f64 {
        self.main_wave_direction_deg
            .unwrap_or(wind.wind_direction_deg)
    }

    /// 校验波浪谱参数
    pub fn validate(&self) -> WeResult<()> {
        if let SpectrumModel::Unrecognized(name) = &self.model {
            return Err(WeError::invalid_spectrum(format!("未知的波浪谱模型: {name}")));
        }
        ensure!(
            self.hs.is_finite() && self.hs > 0.0,
            WeError::invalid_spectrum(format!("Hs({}) 必须为正", self.hs))
        );
        ensure!(
            self.tp.is_finite() && self.tp > 0.0,
            WeError::invalid_spectrum(format!("Tp({}) 必须为正", self.tp))
        );
        if let Some(dir) = self.main_wave_direction_deg {
            ensure!(
                dir.is_finite(),
                WeError::invalid_spectrum("main_wave_direction_deg 必须为有限值")
            );
        }
        ensure!(
            (0.0..=360.0).contains(&self.directional_spread_deg),
            WeError::invalid_spectrum(format!(
                "directional_spread_deg({}) 必须位于 [0, 360]",
                self.directional_spread_deg
            ))
        );
        if self.model == SpectrumModel::Jonswap {
            ensure!(
                self.gamma.is_finite() && self.gamma >= 1.0,
                WeError::invalid_spectrum(format!("gamma({}) 必须不小于 1", self.gamma))
            );
        }
        Ok(())
    }
}

// ============================================================================
// 空间离散
// ============================================================================

fn default_dx() -> f64 { 0.05 }
fn default_max_points() -> usize { 5000 }

/// 空间离散参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discretization {
    /// 经向间距 [度]
    #[serde(default = "default_dx")]
    pub dx: f64,
    /// 纬向间距 [度]
    #[serde(default = "default_dx")]
    pub dy: f64,
    /// 网格点数上限
    #[serde(default = "default_max_points")]
    pub max_points: usize,
}

impl Default for Discretization {
    fn default() -> Self {
        Self {
            dx: default_dx(),
            dy: default_dx(),
            max_points: default_max_points(),
        }
    }
}

impl Discretization {
    /// 创建离散参数
    pub const fn new(dx: f64, dy: f64, max_points: usize) -> Self {
        Self { dx, dy, max_points }
    }

    /// 校验离散参数
    pub fn validate(&self) -> WeResult<()> {
        ensure!(
            self.dx.is_finite() && self.dx > 0.0,
            WeError::invalid_discretization(format!("dx({}) 必须为正", self.dx))
        );
        ensure!(
            self.dy.is_finite() && self.dy > 0.0,
            WeError::invalid_discretization(format!("dy({}) 必须为正", self.dy))
        );
        ensure!(
            self.max_points > 0,
            WeError::invalid_discretization("max_points 必须大于 0")
        );
        Ok(())
    }
}

// ============================================================================
// 时间参数
// ============================================================================

/// 模拟总时长
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum TotalDuration {
    /// 无限时长，持续运行直到被删除
    #[default]
    Unbounded,
    /// 有限时长 [s]
    Seconds(f64),
}

impl From<Option<f64>> for TotalDuration {
    fn from(value: Option<f64>) -> Self {
        match value {
            None => Self::Unbounded,
            Some(v) if v == -1.0 => Self::Unbounded,
            Some(v) => Self::Seconds(v),
        }
    }
}

impl From<TotalDuration> for Option<f64> {
    fn from(value: TotalDuration) -> Self {
        match value {
            TotalDuration::Unbounded => None,
            TotalDuration::Seconds(v) => Some(v),
        }
    }
}

impl TotalDuration {
    /// 有限时长的秒数
    pub fn seconds(&self) -> Option<f64> {
        (*self).into()
    }
}

/// 帧缓存保留窗口
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Retention {
    /// 保留全部帧
    #[default]
    KeepAll,
    /// 只保留最近若干秒 [s]
    Seconds(f64),
}

impl From<Option<f64>> for Retention {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::KeepAll, Self::Seconds)
    }
}

impl From<Retention> for Option<f64> {
    fn from(value: Retention) -> Self {
        match value {
            Retention::KeepAll => None,
            Retention::Seconds(v) => Some(v),
        }
    }
}

impl Retention {
    /// 保留窗口秒数
    pub fn seconds(&self) -> Option<f64> {
        (*self).into()
    }
}

fn default_dt() -> f64 { 0.2 }

/// 时间参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpec {
    /// 后台步长 [s]，同时是墙钟节拍
    #[serde(default = "default_dt")]
    pub dt_backend: f64,
    /// 总时长
    #[serde(default, rename = "T_total", alias = "t_total")]
    pub t_total: TotalDuration,
    /// 缓存保留窗口
    #[serde(default)]
    pub cache_retention_time: Retention,
}

impl Default for TimeSpec {
    fn default() -> Self {
        Self {
            dt_backend: default_dt(),
            t_total: TotalDuration::Unbounded,
            cache_retention_time: Retention::KeepAll,
        }
    }
}

impl TimeSpec {
    /// 创建时间参数
    pub const fn new(dt_backend: f64, t_total: TotalDuration, retention: Retention) -> Self {
        Self {
            dt_backend,
            t_total,
            cache_retention_time: retention,
        }
    }

    /// 墙钟节拍
    ///
    /// 步长无法表示为非零 `Duration` 时返回 `None`。
    pub fn step_interval(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.dt_backend)
            .ok()
            .filter(|d| !d.is_zero())
    }

    /// 校验时间参数
    ///
    /// 时间步长属于离散参数，失败时归入离散参数错误。
    pub fn validate(&self) -> WeResult<()> {
        ensure!(
            self.dt_backend.is_finite() && self.dt_backend > 0.0,
            WeError::invalid_discretization(format!("dt_backend({}) 必须为正", self.dt_backend))
        );
        ensure!(
            self.step_interval().is_some(),
            WeError::invalid_discretization(format!(
                "dt_backend({}) 无法表示为墙钟节拍",
                self.dt_backend
            ))
        );
        if let TotalDuration::Seconds(t) = self.t_total {
            ensure!(
                t.is_finite() && t > 0.0,
                WeError::invalid_discretization(format!("T_total({t}) 必须为正或 -1"))
            );
        }
        if let Retention::Seconds(r) = self.cache_retention_time {
            ensure!(
                r.is_finite() && r > 0.0,
                WeError::invalid_discretization(format!("cache_retention_time({r}) 必须为正"))
            );
        }
        Ok(())
    }
}

// ============================================================================
// 完整请求
// ============================================================================

/// 模拟请求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    /// 模拟区域
    pub region: Region,
    /// 风场
    #[serde(default)]
    pub wind: WindSpec,
    /// 波浪谱
    #[serde(default)]
    pub spectrum: SpectrumSpec,
    /// 空间离散
    #[serde(default)]
    pub discretization: Discretization,
    /// 时间参数
    #[serde(default)]
    pub time: TimeSpec,
}

impl SimulationRequest {
    /// 以默认参数创建
    pub fn new(region: Region) -> Self {
        Self {
            region,
            wind: WindSpec::default(),
            spectrum: SpectrumSpec::default(),
            discretization: Discretization::default(),
            time: TimeSpec::default(),
        }
    }

    /// 设置风场
    pub fn with_wind(mut self, wind: WindSpec) -> Self {
        self.wind = wind;
        self
    }

    /// 设置波浪谱
    pub fn with_spectrum(mut self, spectrum: SpectrumSpec) -> Self {
        self.spectrum = spectrum;
        self
    }

    /// 设置空间离散
    pub fn with_discretization(mut self, discretization: Discretization) -> Self {
        self.discretization = discretization;
        self
    }

    /// 设置时间参数
    pub fn with_time(mut self, time: TimeSpec) -> Self {
        self.time = time;
        self
    }

    /// 按区域、离散、波浪谱的顺序校验全部参数
    pub fn validate(&self) -> WeResult<()> {
        self.region.validate()?;
        self.discretization.validate()?;
        self.time.validate()?;
        self.wind.validate()?;
        self.spectrum.validate()?;
        Ok(())
    }

    /// 从 JSON 字符串解析
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// 从 JSON 文件加载
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 保存为 JSON 文件
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region() -> Region {
        Region::new(120.0, 30.0, 10.0, 120.5, 30.5, 20.0)
    }

    #[test]
    fn test_region_validation() {
        assert!(region().validate().is_ok());

        let bad_lon = Region::new(120.5, 30.0, 10.0, 120.0, 30.5, 20.0);
        assert!(matches!(bad_lon.validate(), Err(WeError::InvalidRegion { .. })));

        let bad_depth = Region::new(120.0, 30.0, 20.0, 120.5, 30.5, 20.0);
        assert!(matches!(bad_depth.validate(), Err(WeError::InvalidRegion { .. })));

        let negative_depth = Region::new(120.0, 30.0, -1.0, 120.5, 30.5, 20.0);
        assert!(matches!(negative_depth.validate(), Err(WeError::InvalidRegion { .. })));
    }

    #[test]
    fn test_representative_depth() {
        assert!((region().representative_depth() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn test_discretization_validation() {
        assert!(Discretization::new(0.01, 0.01, 40000).validate().is_ok());
        assert!(matches!(
            Discretization::new(0.0, 0.01, 10).validate(),
            Err(WeError::InvalidDiscretization { .. })
        ));
        assert!(matches!(
            Discretization::new(0.01, -0.01, 10).validate(),
            Err(WeError::InvalidDiscretization { .. })
        ));
        assert!(matches!(
            Discretization::new(0.01, 0.01, 0).validate(),
            Err(WeError::InvalidDiscretization { .. })
        ));
    }

    #[test]
    fn test_spectrum_validation() {
        assert!(SpectrumSpec::pierson_moskowitz(2.0, 8.0).validate().is_ok());
        assert!(SpectrumSpec::jonswap(2.0, 8.0, 3.3).validate().is_ok());
        assert!(matches!(
            SpectrumSpec::pierson_moskowitz(0.0, 8.0).validate(),
            Err(WeError::InvalidSpectrumParams { .. })
        ));
        assert!(matches!(
            SpectrumSpec::pierson_moskowitz(2.0, -8.0).validate(),
            Err(WeError::InvalidSpectrumParams { .. })
        ));

        let mut unknown = SpectrumSpec::default();
        unknown.model = SpectrumModel::from("TMA".to_string());
        assert!(matches!(unknown.validate(), Err(WeError::InvalidSpectrumParams { .. })));
    }

    #[test]
    fn test_resolved_direction_falls_back_to_wind() {
        let wind = WindSpec::new(10.0, 270.0);
        let spec = SpectrumSpec::pierson_moskowitz(2.0, 8.0);
        assert_eq!(spec.resolved_direction(&wind), 270.0);
        assert_eq!(spec.with_direction(45.0).resolved_direction(&wind), 45.0);
    }

    #[test]
    fn test_wind_validation() {
        assert!(WindSpec::new(10.0, 0.0).validate().is_ok());
        assert!(WindSpec::new(10.0, 360.0).validate().is_err());
        assert!(WindSpec::new(-1.0, 90.0).validate().is_err());
    }

    #[test]
    fn test_time_spec_json_conventions() {
        let t: TimeSpec =
            serde_json::from_str(r#"{"dt_backend": 0.2, "T_total": -1, "cache_retention_time": 60.0}"#)
                .unwrap();
        assert_eq!(t.t_total, TotalDuration::Unbounded);
        assert_eq!(t.cache_retention_time, Retention::Seconds(60.0));

        let t: TimeSpec = serde_json::from_str(r#"{"T_total": null}"#).unwrap();
        assert_eq!(t.t_total, TotalDuration::Unbounded);
        assert_eq!(t.cache_retention_time, Retention::KeepAll);
        assert!((t.dt_backend - 0.2).abs() < 1e-12);

        let t: TimeSpec = serde_json::from_str(r#"{"T_total": 30.0}"#).unwrap();
        assert_eq!(t.t_total.seconds(), Some(30.0));
    }

    #[test]
    fn test_time_spec_validation() {
        let ok = TimeSpec::new(0.2, TotalDuration::Seconds(10.0), Retention::Seconds(5.0));
        assert!(ok.validate().is_ok());
        assert!(TimeSpec::new(0.0, TotalDuration::Unbounded, Retention::KeepAll)
            .validate()
            .is_err());
        assert!(TimeSpec::new(0.2, TotalDuration::Seconds(-3.0), Retention::KeepAll)
            .validate()
            .is_err());
        assert!(TimeSpec::new(0.2, TotalDuration::Unbounded, Retention::Seconds(0.0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_time_spec_rejects_unrepresentable_dt() {
        for dt in [1e20, f64::MAX, 1e-12] {
            let spec = TimeSpec::new(dt, TotalDuration::Unbounded, Retention::KeepAll);
            assert!(spec.step_interval().is_none(), "dt={}", dt);
            assert!(matches!(
                spec.validate(),
                Err(WeError::InvalidDiscretization { .. })
            ));
        }
        let spec = TimeSpec::new(0.2, TotalDuration::Unbounded, Retention::KeepAll);
        assert_eq!(spec.step_interval(), Some(Duration::from_millis(200)));
    }

    #[test]
    fn test_spectrum_model_names() {
        let spec: SpectrumSpec =
            serde_json::from_str(r#"{"spectrum_model_type": "JONSWAP", "Hs": 1.5, "Tp": 6.0}"#)
                .unwrap();
        assert_eq!(spec.model, SpectrumModel::Jonswap);
        assert!((spec.hs - 1.5).abs() < 1e-12);
        assert!((spec.gamma - 3.3).abs() < 1e-12);

        let spec: SpectrumSpec = serde_json::from_str(r#"{"model": "wave"}"#).unwrap();
        assert_eq!(spec.model, SpectrumModel::Unrecognized("wave".into()));
    }

    #[test]
    fn test_request_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");

        let request = SimulationRequest::new(region())
            .with_spectrum(SpectrumSpec::jonswap(2.0, 8.0, 3.3))
            .with_time(TimeSpec::new(0.2, TotalDuration::Seconds(30.0), Retention::Seconds(10.0)));
        request.save_to_file(&path).unwrap();

        let loaded = SimulationRequest::from_file(&path).unwrap();
        assert_eq!(loaded, request);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_request_defaults_from_json() {
        let json = r#"{"region": {"lon_min": 120.0, "lat_min": 30.0, "depth_min": 10.0,
                                  "lon_max": 120.5, "lat_max": 30.5, "depth_max": 20.0}}"#;
        let request = SimulationRequest::from_json_str(json).unwrap();
        assert_eq!(request.wind, WindSpec::default());
        assert_eq!(request.discretization.max_points, 5000);
        assert!(request.validate().is_ok());
    }
}
