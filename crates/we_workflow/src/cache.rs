// crates/we_workflow/src/cache.rs

//! 帧缓存模块
//!
//! 单个任务的帧序列，按时间严格递增、只追加。调度线程是唯一写者，
//! 查询线程并发读取。帧在加写锁之前已完整构造，追加与头部淘汰在同一次
//! 写锁内完成，读者只会看到追加前或追加后的完整状态。

use parking_lot::RwLock;
use std::collections::VecDeque;
use std::sync::Arc;
use we_config::Retention;
use we_foundation::float::TIME_EPSILON;
use we_foundation::{WeError, WeResult};

/// 一帧波面高度
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// 模拟时刻 [s]
    pub time: f64,
    /// 与网格点顺序一致的波面高度 [m]
    pub values: Vec<f64>,
}

impl Frame {
    /// 创建帧
    pub fn new(time: f64, values: Vec<f64>) -> Self {
        Self { time, values }
    }
}

/// 时间包围结果
#[derive(Debug, Clone)]
pub enum Bracket {
    /// 查询时刻在缓存范围之外（或只有一帧），截断到最近端点
    Single(Arc<Frame>),
    /// 相邻两帧，`lo.time <= t <= hi.time`
    Pair {
        /// 前一帧
        lo: Arc<Frame>,
        /// 后一帧
        hi: Arc<Frame>,
    },
}

/// 帧缓存
#[derive(Debug)]
pub struct FrameCache {
    frames: RwLock<VecDeque<Arc<Frame>>>,
    retention: Retention,
}

impl FrameCache {
    /// 创建空缓存
    pub fn new(retention: Retention) -> Self {
        Self {
            frames: RwLock::new(VecDeque::new()),
            retention,
        }
    }

    /// 保留窗口
    pub fn retention(&self) -> Retention {
        self.retention
    }

    /// 追加一帧并按保留窗口淘汰头部，返回淘汰帧数
    ///
    /// 时间必须严格大于当前最新帧。淘汰条件为
    /// `time < latest - retention`（含 1e-9 s 容差，避免累计舍入误淘汰边界帧）。
    pub fn append(&self, frame: Frame) -> WeResult<usize> {
        if !frame.time.is_finite() {
            return Err(WeError::invalid_input(format!("帧时刻({}) 非有限", frame.time)));
        }
        let frame = Arc::new(frame);
        let latest = frame.time;

        let mut frames = self.frames.write();
        if let Some(last) = frames.back() {
            if latest <= last.time {
                return Err(WeError::invalid_input(format!(
                    "帧时刻必须递增: {} <= {}",
                    latest, last.time
                )));
            }
        }
        frames.push_back(frame);

        let mut evicted = 0;
        if let Retention::Seconds(window) = self.retention {
            let cutoff = latest - window - TIME_EPSILON;
            while frames.front().is_some_and(|f| f.time < cutoff) {
                frames.pop_front();
                evicted += 1;
            }
        }
        Ok(evicted)
    }

    /// 帧数
    pub fn len(&self) -> usize {
        self.frames.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.frames.read().is_empty()
    }

    /// 最新帧
    pub fn latest(&self) -> Option<Arc<Frame>> {
        self.frames.read().back().cloned()
    }

    /// 最早的保留帧
    pub fn earliest(&self) -> Option<Arc<Frame>> {
        self.frames.read().front().cloned()
    }

    /// 保留帧的时间范围
    pub fn time_range(&self) -> Option<(f64, f64)> {
        let frames = self.frames.read();
        Some((frames.front()?.time, frames.back()?.time))
    }

    /// 时间最接近 t 的帧，等距时取较早者
    pub fn nearest(&self, t: f64) -> Option<Arc<Frame>> {
        let frames = self.frames.read();
        if frames.is_empty() {
            return None;
        }
        let idx = frames.partition_point(|f| f.time < t);
        if idx == 0 {
            return frames.front().cloned();
        }
        if idx == frames.len() {
            return frames.back().cloned();
        }
        let before = &frames[idx - 1];
        let after = &frames[idx];
        if t - before.time <= after.time - t {
            Some(before.clone())
        } else {
            Some(after.clone())
        }
    }

    /// 包围 t 的相邻两帧；超出范围时截断为单帧
    pub fn bracket(&self, t: f64) -> Option<Bracket> {
        let frames = self.frames.read();
        let first = frames.front()?;
        let last = frames.back()?;
        if t <= first.time {
            return Some(Bracket::Single(first.clone()));
        }
        if t >= last.time {
            return Some(Bracket::Single(last.clone()));
        }
        // first.time < t < last.time，故 1 <= idx < len
        let idx = frames.partition_point(|f| f.time <= t);
        Some(Bracket::Pair {
            lo: frames[idx - 1].clone(),
            hi: frames[idx].clone(),
        })
    }

    /// 时间位于 [t_min, t_max] 的帧，均匀抽稀到至多 `max_frames` 帧
    pub fn range(&self, t_min: Option<f64>, t_max: Option<f64>, max_frames: Option<usize>) -> Vec<Arc<Frame>> {
        let frames = self.frames.read();
        let selected: Vec<Arc<Frame>> = frames
            .iter()
            .filter(|f| t_min.map_or(true, |t| f.time >= t) && t_max.map_or(true, |t| f.time <= t))
            .cloned()
            .collect();
        drop(frames);

        match max_frames {
            Some(limit) if selected.len() > limit => downsample(selected, limit),
            _ => selected,
        }
    }
}

/// 等间隔抽取，保留首尾
fn downsample(frames: Vec<Arc<Frame>>, limit: usize) -> Vec<Arc<Frame>> {
    match limit {
        0 => Vec::new(),
        1 => frames.last().cloned().into_iter().collect(),
        _ => {
            let n = frames.len();
            (0..limit)
                .map(|i| {
                    let idx = (i as f64 * (n - 1) as f64 / (limit - 1) as f64).round() as usize;
                    frames[idx.min(n - 1)].clone()
                })
                .collect()
        }
    }
}
