// crates/we_workflow/src/job.rs

//! 任务定义模块
//!
//! 定义模拟任务的标识、状态与运行期数据。任务对象在创建后由存储与
//! 调度线程共享；网格与波浪实现不可变，状态字段由内部锁保护。

use crate::cache::FrameCache;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use we_config::SimulationRequest;
use we_foundation::{Counter, MaxGauge};
use we_physics::{Grid, Realization};

/// 任务ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// 创建新的任务ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 获取内部UUID
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// 由ID派生的相位随机种子
    pub fn seed(&self) -> u64 {
        let (hi, lo) = self.0.as_u64_pair();
        hi ^ lo.rotate_left(32)
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// 已创建，尚未启动
    Pending,
    /// 运行中
    Running,
    /// 已完成
    Completed,
    /// 失败
    Failed,
    /// 已取消
    Cancelled,
}

impl TaskStatus {
    /// 是否为终止状态
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// 小写名称，与序列化形式一致
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 任务的可变状态
#[derive(Debug, Clone)]
struct TaskState {
    status: TaskStatus,
    created_at: chrono::DateTime<chrono::Utc>,
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    finished_at: Option<chrono::DateTime<chrono::Utc>>,
    last_emitted_time: Option<f64>,
    error: Option<String>,
}

/// 模拟任务
#[derive(Debug)]
pub struct Task {
    id: TaskId,
    request: SimulationRequest,
    grid: Arc<Grid>,
    realization: Arc<Realization>,
    cache: FrameCache,
    state: RwLock<TaskState>,
    frames_emitted: Counter,
    overrun_steps: Counter,
    max_step_secs: MaxGauge,
}

impl Task {
    /// 创建待启动的任务
    pub fn new(id: TaskId, request: SimulationRequest, grid: Grid, realization: Realization) -> Self {
        let cache = FrameCache::new(request.time.cache_retention_time);
        Self {
            id,
            request,
            grid: Arc::new(grid),
            realization: Arc::new(realization),
            cache,
            state: RwLock::new(TaskState {
                status: TaskStatus::Pending,
                created_at: chrono::Utc::now(),
                started_at: None,
                finished_at: None,
                last_emitted_time: None,
                error: None,
            }),
            frames_emitted: Counter::new(),
            overrun_steps: Counter::new(),
            max_step_secs: MaxGauge::new(),
        }
    }

    /// 任务ID
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// 原始请求
    pub fn request(&self) -> &SimulationRequest {
        &self.request
    }

    /// 计算网格
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    /// 波浪实现
    pub fn realization(&self) -> &Arc<Realization> {
        &self.realization
    }

    /// 帧缓存
    pub fn cache(&self) -> &FrameCache {
        &self.cache
    }

    /// 当前状态
    pub fn status(&self) -> TaskStatus {
        self.state.read().status
    }

    /// 创建时间
    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.state.read().created_at
    }

    /// 最近一次发布的模拟时刻
    pub fn last_emitted_time(&self) -> Option<f64> {
        self.state.read().last_emitted_time
    }

    /// 失败原因
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// 有限时长任务的进度，范围 [0, 1]
    pub fn progress(&self) -> Option<f64> {
        let total = self.request.time.t_total.seconds()?;
        let t = self.last_emitted_time().unwrap_or(0.0);
        Some((t / total).clamp(0.0, 1.0))
    }

    /// 标记为运行中，只有待启动的任务可以启动
    pub fn mark_started(&self) -> bool {
        let mut state = self.state.write();
        if state.status != TaskStatus::Pending {
            return false;
        }
        state.status = TaskStatus::Running;
        state.started_at = Some(chrono::Utc::now());
        true
    }

    /// 标记为完成
    pub fn mark_completed(&self) {
        self.finish(TaskStatus::Completed, None);
    }

    /// 标记为失败
    pub fn mark_failed(&self, error: impl Into<String>) {
        self.finish(TaskStatus::Failed, Some(error.into()));
    }

    /// 标记为取消；已终止的任务保持原状态
    pub fn mark_cancelled(&self) -> bool {
        let mut state = self.state.write();
        if state.status.is_terminal() {
            return false;
        }
        state.status = TaskStatus::Cancelled;
        state.finished_at = Some(chrono::Utc::now());
        true
    }

    fn finish(&self, status: TaskStatus, error: Option<String>) {
        let mut state = self.state.write();
        state.status = status;
        state.finished_at = Some(chrono::Utc::now());
        state.error = error;
    }

    /// 记录一次发布
    pub(crate) fn record_emitted(&self, time: f64) {
        self.state.write().last_emitted_time = Some(time);
        self.frames_emitted.inc();
    }

    /// 记录单步耗时
    pub(crate) fn record_step(&self, elapsed_secs: f64, overrun: bool) {
        self.max_step_secs.observe(elapsed_secs);
        if overrun {
            self.overrun_steps.inc();
        }
    }

    /// 累计发布帧数（含已淘汰的帧）
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted.get()
    }

    /// 任务摘要
    pub fn info(&self) -> TaskInfo {
        let state = self.state.read().clone();
        TaskInfo {
            id: self.id,
            status: state.status,
            created_at: state.created_at,
            started_at: state.started_at,
            finished_at: state.finished_at,
            last_emitted_time: state.last_emitted_time,
            frame_count: self.cache.len(),
            frames_emitted: self.frames_emitted.get(),
            progress: self.progress(),
            error: state.error,
            grid_points: self.grid.len(),
            components: self.realization.len(),
            overrun_steps: self.overrun_steps.get(),
            max_step_secs: self.max_step_secs.get(),
        }
    }
}

/// 任务摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskInfo {
    /// 任务ID
    pub id: TaskId,
    /// 状态
    pub status: TaskStatus,
    /// 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// 启动时间
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 结束时间
    pub finished_at: Option<chrono::DateTime<chrono::Utc>>,
    /// 最近发布的模拟时刻 [s]
    pub last_emitted_time: Option<f64>,
    /// 缓存中保留的帧数
    pub frame_count: usize,
    /// 累计发布帧数
    pub frames_emitted: u64,
    /// 有限时长任务的进度
    pub progress: Option<f64>,
    /// 失败原因
    pub error: Option<String>,
    /// 网格点数
    pub grid_points: usize,
    /// 波浪分量数
    pub components: usize,
    /// 超出节拍的步数
    pub overrun_steps: u64,
    /// 最长单步耗时 [s]
    pub max_step_secs: f64,
}
