// crates/we_workflow/src/query.rs

//! 查询服务模块
//!
//! - 帧查询：`time = -1` 取最新帧，否则取时间最近的一帧，不做插值
//! - 点查询：空间双线性插值；指定时刻时在相邻两帧之间线性插值，
//!   超出缓存范围时截断到端点帧
//!
//! 所有查询只读取帧缓存的快照，与调度线程并发执行。

use crate::cache::{Bracket, Frame};
use crate::job::{TaskId, TaskStatus};
use crate::manager::{EngineError, WaveEngine};
use crate::storage::TaskStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use we_interp::{LatticeInterpolator, TemporalInterpolator};

/// 查询时刻
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TimeSelector {
    /// 最新帧
    Latest,
    /// 指定模拟时刻 [s]
    At(f64),
}

impl From<f64> for TimeSelector {
    /// `-1` 表示最新帧
    fn from(time: f64) -> Self {
        if time == -1.0 {
            Self::Latest
        } else {
            Self::At(time)
        }
    }
}

impl TimeSelector {
    fn check(self) -> Result<Self, EngineError> {
        match self {
            Self::At(t) if !t.is_finite() => {
                Err(EngineError::InvalidQuery(format!("time must be finite, got {t}")))
            }
            other => Ok(other),
        }
    }
}

/// 帧中的一个格点
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FramePoint {
    /// 经度
    pub lon: f64,
    /// 纬度
    pub lat: f64,
    /// 波面高度 [m]
    pub value: f64,
}

/// 帧查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameResponse {
    /// 任务ID
    pub task_id: TaskId,
    /// 帧时刻 [s]
    pub time: f64,
    /// 任务状态
    pub status: TaskStatus,
    /// 全部格点，顺序与网格一致
    pub points: Vec<FramePoint>,
}

/// 点查询结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointResponse {
    /// 结果对应的时刻 [s]
    pub time: f64,
    /// 经度
    pub lon: f64,
    /// 纬度
    pub lat: f64,
    /// 波面高度 [m]
    pub value: f64,
    /// 任务状态
    pub status: TaskStatus,
}

/// 时间范围内的一帧
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameValues {
    /// 帧时刻 [s]
    pub time: f64,
    /// 波面高度，顺序与网格一致
    pub values: Vec<f64>,
}

/// 帧范围查询结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRangeResponse {
    /// 任务ID
    pub task_id: TaskId,
    /// 任务状态
    pub status: TaskStatus,
    /// 网格列坐标（经度）
    pub lons: Vec<f64>,
    /// 网格行坐标（纬度）
    pub lats: Vec<f64>,
    /// 按时间递增的帧
    pub frames: Vec<FrameValues>,
}

impl<S: TaskStore> WaveEngine<S> {
    /// 整帧查询
    pub fn get_frames(
        &self,
        id: TaskId,
        time: impl Into<TimeSelector>,
    ) -> Result<FrameResponse, EngineError> {
        let task = self.get_task(id)?;
        let frame = match time.into().check()? {
            TimeSelector::Latest => task.cache().latest(),
            TimeSelector::At(t) => task.cache().nearest(t),
        }
        .ok_or(EngineError::NoFramesYet(id))?;

        let points = task
            .grid()
            .points()
            .iter()
            .zip(&frame.values)
            .map(|(p, &value)| FramePoint {
                lon: p.x,
                lat: p.y,
                value,
            })
            .collect();

        Ok(FrameResponse {
            task_id: id,
            time: frame.time,
            status: task.status(),
            points,
        })
    }

    /// 单点查询
    ///
    /// 检查顺序：任务存在 → 缓存非空 → 点在区域内。
    pub fn query_point(
        &self,
        id: TaskId,
        lon: f64,
        lat: f64,
        time: impl Into<TimeSelector>,
    ) -> Result<PointResponse, EngineError> {
        let task = self.get_task(id)?;
        let selector = time.into().check()?;
        if task.cache().is_empty() {
            return Err(EngineError::NoFramesYet(id));
        }
        if !lon.is_finite() || !lat.is_finite() {
            return Err(EngineError::InvalidQuery(format!(
                "coordinates must be finite, got ({lon}, {lat})"
            )));
        }

        let grid = task.grid();
        if !grid.bounds().contains(lon, lat) {
            return Err(EngineError::OutOfRegion { lon, lat });
        }
        let lattice = LatticeInterpolator::new(grid.lons(), grid.lats())?;
        let sample = |frame: &Arc<Frame>| lattice.interpolate(&frame.values, lon, lat);

        let (time, value) = match selector {
            TimeSelector::Latest => {
                let frame = task.cache().latest().ok_or(EngineError::NoFramesYet(id))?;
                (frame.time, sample(&frame)?)
            }
            TimeSelector::At(t) => match task.cache().bracket(t) {
                None => return Err(EngineError::NoFramesYet(id)),
                Some(Bracket::Single(frame)) => (frame.time, sample(&frame)?),
                Some(Bracket::Pair { lo, hi }) => {
                    let (v0, v1) = (sample(&lo)?, sample(&hi)?);
                    let value = TemporalInterpolator::new(lo.time, hi.time).interpolate(t, v0, v1);
                    (t, value)
                }
            },
        };

        Ok(PointResponse {
            time,
            lon,
            lat,
            value,
            status: task.status(),
        })
    }

    /// 帧范围查询，均匀抽稀到至多 `max_frames` 帧
    pub fn get_frame_range(
        &self,
        id: TaskId,
        time_min: Option<f64>,
        time_max: Option<f64>,
        max_frames: Option<usize>,
    ) -> Result<FrameRangeResponse, EngineError> {
        let task = self.get_task(id)?;
        if let (Some(lo), Some(hi)) = (time_min, time_max) {
            if lo > hi {
                return Err(EngineError::InvalidQuery(format!(
                    "time_min ({lo}) is greater than time_max ({hi})"
                )));
            }
        }

        let frames = task
            .cache()
            .range(time_min, time_max, max_frames)
            .into_iter()
            .map(|f| FrameValues {
                time: f.time,
                values: f.values.clone(),
            })
            .collect();

        Ok(FrameRangeResponse {
            task_id: id,
            status: task.status(),
            lons: task.grid().lons().to_vec(),
            lats: task.grid().lats().to_vec(),
            frames,
        })
    }
}
