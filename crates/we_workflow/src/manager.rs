// crates/we_workflow/src/manager.rs

//! 引擎管理模块
//!
//! `WaveEngine` 是任务的唯一所有者：校验请求、构建网格与波浪实现、
//! 登记任务并启动后台线程，删除与关闭时负责取消并回收线程。

use crate::events::{EventDispatcher, TaskEvent};
use crate::job::{Task, TaskId, TaskInfo, TaskStatus};
use crate::runner::{TaskHandle, TaskRunner};
use crate::storage::{MemoryTaskStore, StoreError, TaskStore};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use we_config::{ConfigError, EngineConfig, SimulationRequest};
use we_foundation::WeError;
use we_physics::{FieldEvaluator, GridBuilder, SpectralRealizer};

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 区域无效
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// 离散参数无效
    #[error("Invalid discretization: {0}")]
    InvalidDiscretization(String),

    /// 波浪谱参数无效
    #[error("Invalid spectrum parameters: {0}")]
    InvalidSpectrumParams(String),

    /// 数值异常
    #[error("Numerical fault: {0}")]
    NumericalFault(String),

    /// 任务不存在
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// 任务尚无帧
    #[error("Task {0} has no frames yet")]
    NoFramesYet(TaskId),

    /// 查询点不在区域内
    #[error("Point ({lon}, {lat}) is outside the task region")]
    OutOfRegion {
        /// 经度
        lon: f64,
        /// 纬度
        lat: f64,
    },

    /// 查询参数无效
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// 状态不允许该操作
    #[error("Cannot {action} task {id} in status {status}")]
    InvalidState {
        /// 任务ID
        id: TaskId,
        /// 当前状态
        status: TaskStatus,
        /// 操作名
        action: &'static str,
    },

    /// 工作线程创建失败
    #[error("Failed to spawn worker thread: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// 存储错误
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// 其他错误
    #[error("{0}")]
    Internal(String),
}

impl From<WeError> for EngineError {
    fn from(err: WeError) -> Self {
        match err {
            WeError::InvalidRegion { message } => Self::InvalidRegion(message),
            WeError::InvalidDiscretization { message } => Self::InvalidDiscretization(message),
            WeError::InvalidSpectrumParams { message } => Self::InvalidSpectrumParams(message),
            WeError::NumericalFault { message } => Self::NumericalFault(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl EngineError {
    /// 创建阶段的输入错误，任务不会被创建
    pub fn is_creation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRegion(_) | Self::InvalidDiscretization(_) | Self::InvalidSpectrumParams(_)
        )
    }

    /// 单次查询的错误，不影响任务本身
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound(_) | Self::NoFramesYet(_) | Self::OutOfRegion { .. } | Self::InvalidQuery(_)
        )
    }
}

/// 创建选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateOptions {
    /// 创建后立即启动
    pub autostart: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self { autostart: true }
    }
}

impl CreateOptions {
    /// 只创建，不启动
    pub fn deferred() -> Self {
        Self { autostart: false }
    }
}

/// 波浪模拟引擎
pub struct WaveEngine<S: TaskStore = MemoryTaskStore> {
    store: S,
    config: EngineConfig,
    realizer: SpectralRealizer,
    evaluator: FieldEvaluator,
    events: Arc<EventDispatcher>,
    handles: Mutex<HashMap<TaskId, TaskHandle>>,
}

impl WaveEngine<MemoryTaskStore> {
    /// 使用默认配置与内存存储创建引擎
    pub fn new() -> Self {
        Self::build(MemoryTaskStore::new(), EngineConfig::default())
    }

    /// 使用给定配置创建引擎
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        Self::with_store(MemoryTaskStore::new(), config)
    }
}

impl Default for WaveEngine<MemoryTaskStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: TaskStore> WaveEngine<S> {
    /// 使用给定存储与配置创建引擎
    pub fn with_store(store: S, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::build(store, config))
    }

    fn build(store: S, config: EngineConfig) -> Self {
        Self {
            store,
            realizer: SpectralRealizer::new(config.spectrum.clone()),
            evaluator: FieldEvaluator::new(config.evaluation.parallel_threshold),
            config,
            events: Arc::new(EventDispatcher::new()),
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// 获取事件分发器
    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    /// 获取配置
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 创建并启动任务
    pub fn create_task(&self, request: SimulationRequest) -> Result<TaskId, EngineError> {
        self.create_task_with(request, CreateOptions::default())
    }

    /// 按选项创建任务
    ///
    /// 自动启动时第 0 帧在返回前已经写入缓存。
    pub fn create_task_with(
        &self,
        request: SimulationRequest,
        options: CreateOptions,
    ) -> Result<TaskId, EngineError> {
        request.validate()?;
        let grid = GridBuilder::new(&request.region, &request.discretization).build()?;

        let id = TaskId::new();
        let seed = id.seed() ^ self.config.evaluation.seed_salt;
        let realization = self
            .realizer
            .realize(&request.wind, &request.spectrum, grid.depth(), seed)?;

        let task = Arc::new(Task::new(id, request, grid, realization));
        let (grid_points, components) = (task.grid().len(), task.realization().len());
        self.store.insert(task)?;

        tracing::info!(
            "Created task {} ({} grid points, {} components)",
            id,
            grid_points,
            components
        );
        self.events.emit(TaskEvent::TaskCreated {
            task_id: id,
            grid_points,
            components,
        });

        if options.autostart {
            if let Err(e) = self.start_task(id) {
                self.store.remove(id);
                return Err(e);
            }
        }
        Ok(id)
    }

    /// 启动待启动的任务
    ///
    /// 在调用线程上同步计算并发布 t=0 帧，之后由后台线程按节拍推进。
    pub fn start_task(&self, id: TaskId) -> Result<(), EngineError> {
        let task = self.get_task(id)?;
        if !task.mark_started() {
            return Err(EngineError::InvalidState {
                id,
                status: task.status(),
                action: "start",
            });
        }
        tracing::info!(
            "Starting task {}: dt_backend={}s, T_total={:?}, retention={:?}",
            id,
            task.request().time.dt_backend,
            task.request().time.t_total.seconds(),
            task.request().time.cache_retention_time.seconds()
        );
        self.events.emit(TaskEvent::TaskStarted { task_id: id });

        let runner = TaskRunner::new(
            task.clone(),
            self.evaluator,
            self.events.clone(),
            self.config.scheduler.clone(),
        );
        if let Err(e) = runner.emit_step(0) {
            runner.fail(&e);
            return Ok(());
        }
        let anchor = Instant::now();

        let handle = runner.spawn(anchor).map_err(|e| {
            task.mark_failed(format!("worker spawn failed: {e}"));
            EngineError::WorkerSpawn(e)
        })?;

        let mut handles = self.handles.lock();
        handles.retain(|_, h| !h.is_finished());
        handles.insert(id, handle);
        Ok(())
    }

    /// 获取任务
    pub fn get_task(&self, id: TaskId) -> Result<Arc<Task>, EngineError> {
        self.store.get(id).ok_or(EngineError::TaskNotFound(id))
    }

    /// 任务摘要
    pub fn task_info(&self, id: TaskId) -> Result<TaskInfo, EngineError> {
        Ok(self.get_task(id)?.info())
    }

    /// 列出任务，按创建时间排序
    pub fn list_tasks(&self, status: Option<TaskStatus>) -> Vec<TaskInfo> {
        let mut tasks: Vec<TaskInfo> = self
            .store
            .list()
            .iter()
            .map(|t| t.info())
            .filter(|info| status.map_or(true, |s| info.status == s))
            .collect();
        tasks.sort_by_key(|info| info.created_at);
        tasks
    }

    /// 任务数量
    pub fn task_count(&self) -> usize {
        self.store.len()
    }

    /// 删除任务：取消后台线程并释放任务
    pub fn delete_task(&self, id: TaskId) -> Result<(), EngineError> {
        let task = self.store.remove(id).ok_or(EngineError::TaskNotFound(id))?;

        let handle = self.handles.lock().remove(&id);
        if let Some(handle) = handle {
            handle.cancel();
            handle.join_timeout(self.join_timeout());
        }
        if task.mark_cancelled() {
            self.events.emit(TaskEvent::TaskCancelled { task_id: id });
        }

        tracing::info!("Deleted task {} (status {})", id, task.status());
        self.events.emit(TaskEvent::TaskDeleted { task_id: id });
        Ok(())
    }

    /// 取消并回收全部后台线程，任务本身保留可查询
    pub fn shutdown(&self) {
        let handles: Vec<TaskHandle> = self.handles.lock().drain().map(|(_, h)| h).collect();
        if handles.is_empty() {
            return;
        }
        tracing::info!("Shutting down {} worker(s)", handles.len());

        for handle in &handles {
            handle.cancel();
        }
        let timeout = self.join_timeout();
        for handle in handles {
            let id = handle.task_id();
            handle.join_timeout(timeout);
            if let Some(task) = self.store.get(id) {
                if task.mark_cancelled() {
                    self.events.emit(TaskEvent::TaskCancelled { task_id: id });
                }
            }
        }
    }

    fn join_timeout(&self) -> Duration {
        Duration::from_millis(self.config.scheduler.join_timeout_ms)
    }
}

impl<S: TaskStore> Drop for WaveEngine<S> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<S: TaskStore> std::fmt::Debug for WaveEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WaveEngine")
            .field("tasks", &self.store.len())
            .field("workers", &self.handles.lock().len())
            .field("events", &self.events)
            .finish()
    }
}
