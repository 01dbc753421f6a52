// crates/we_workflow/src/events.rs

//! 事件系统模块
//!
//! 提供任务事件的定义和分发机制。监听器在发出事件的线程上同步调用，
//! 帧事件来自调度线程，应尽快返回。

use crate::job::TaskId;
use parking_lot::RwLock;
use std::sync::Arc;

/// 任务事件
#[derive(Debug, Clone, PartialEq)]
pub enum TaskEvent {
    /// 任务已创建
    TaskCreated {
        /// 任务ID
        task_id: TaskId,
        /// 网格点数
        grid_points: usize,
        /// 波浪分量数
        components: usize,
    },
    /// 任务已启动
    TaskStarted {
        /// 任务ID
        task_id: TaskId,
    },
    /// 新帧已发布
    FrameEmitted {
        /// 任务ID
        task_id: TaskId,
        /// 模拟时刻
        time: f64,
        /// 缓存中保留的帧数
        retained: usize,
    },
    /// 任务已完成
    TaskCompleted {
        /// 任务ID
        task_id: TaskId,
        /// 最后一帧时刻
        final_time: f64,
        /// 累计帧数
        frames_emitted: u64,
    },
    /// 任务失败
    TaskFailed {
        /// 任务ID
        task_id: TaskId,
        /// 错误信息
        error: String,
    },
    /// 任务已取消
    TaskCancelled {
        /// 任务ID
        task_id: TaskId,
    },
    /// 任务已删除
    TaskDeleted {
        /// 任务ID
        task_id: TaskId,
    },
}

impl TaskEvent {
    /// 获取事件对应的任务ID
    pub fn task_id(&self) -> TaskId {
        match self {
            Self::TaskCreated { task_id, .. } => *task_id,
            Self::TaskStarted { task_id } => *task_id,
            Self::FrameEmitted { task_id, .. } => *task_id,
            Self::TaskCompleted { task_id, .. } => *task_id,
            Self::TaskFailed { task_id, .. } => *task_id,
            Self::TaskCancelled { task_id } => *task_id,
            Self::TaskDeleted { task_id } => *task_id,
        }
    }

    /// 获取事件名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::TaskCreated { .. } => "TaskCreated",
            Self::TaskStarted { .. } => "TaskStarted",
            Self::FrameEmitted { .. } => "FrameEmitted",
            Self::TaskCompleted { .. } => "TaskCompleted",
            Self::TaskFailed { .. } => "TaskFailed",
            Self::TaskCancelled { .. } => "TaskCancelled",
            Self::TaskDeleted { .. } => "TaskDeleted",
        }
    }
}

/// 事件监听器trait
pub trait EventListener: Send + Sync {
    /// 处理事件
    fn on_event(&self, event: &TaskEvent);

    /// 获取监听器名称 (用于调试)
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// 函数式事件监听器
pub struct FnListener<F>
where
    F: Fn(&TaskEvent) + Send + Sync,
{
    name: String,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&TaskEvent) + Send + Sync,
{
    /// 创建函数式监听器
    pub fn new(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> EventListener for FnListener<F>
where
    F: Fn(&TaskEvent) + Send + Sync,
{
    fn on_event(&self, event: &TaskEvent) {
        (self.handler)(event);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// 日志事件监听器
///
/// 默认不输出逐帧事件，`verbose()` 后以 debug 级别输出。
pub struct LoggingListener {
    prefix: String,
    verbose: bool,
}

impl LoggingListener {
    /// 创建日志监听器
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            verbose: false,
        }
    }

    /// 设置详细模式
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl EventListener for LoggingListener {
    fn on_event(&self, event: &TaskEvent) {
        let msg = match event {
            TaskEvent::TaskCreated {
                task_id,
                grid_points,
                components,
            } => format!(
                "Task {} created ({} grid points, {} components)",
                task_id, grid_points, components
            ),
            TaskEvent::TaskStarted { task_id } => format!("Task {} started", task_id),
            TaskEvent::FrameEmitted {
                task_id,
                time,
                retained,
            } => {
                if self.verbose {
                    tracing::debug!(
                        "{}: Task {} frame t={:.3}s ({} retained)",
                        self.prefix,
                        task_id,
                        time,
                        retained
                    );
                }
                return;
            }
            TaskEvent::TaskCompleted {
                task_id,
                final_time,
                frames_emitted,
            } => format!(
                "Task {} completed at t={:.2}s ({} frames)",
                task_id, final_time, frames_emitted
            ),
            TaskEvent::TaskFailed { task_id, error } => {
                format!("Task {} failed: {}", task_id, error)
            }
            TaskEvent::TaskCancelled { task_id } => format!("Task {} cancelled", task_id),
            TaskEvent::TaskDeleted { task_id } => format!("Task {} deleted", task_id),
        };

        tracing::info!("{}: {}", self.prefix, msg);
    }

    fn name(&self) -> &str {
        "LoggingListener"
    }
}

/// 事件分发器
#[derive(Default)]
pub struct EventDispatcher {
    listeners: RwLock<Vec<Arc<dyn EventListener>>>,
}

impl EventDispatcher {
    /// 创建新的事件分发器
    pub fn new() -> Self {
        Self {
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// 添加监听器
    pub fn add_listener(&self, listener: Arc<dyn EventListener>) {
        let name = listener.name().to_string();
        self.listeners.write().push(listener);
        tracing::debug!("Added event listener: {}", name);
    }

    /// 添加函数式监听器
    pub fn add_fn_listener<F>(&self, name: impl Into<String>, handler: F)
    where
        F: Fn(&TaskEvent) + Send + Sync + 'static,
    {
        let listener = Arc::new(FnListener::new(name, handler));
        self.add_listener(listener);
    }

    /// 分发事件
    ///
    /// 回调在锁外执行，监听器内部可以再注册监听器。
    pub fn emit(&self, event: TaskEvent) {
        let listeners = self.listeners.read().clone();

        tracing::trace!("Emitting event: {}", event.name());

        for listener in listeners.iter() {
            listener.on_event(&event);
        }
    }

    /// 获取监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listener_count", &self.listener_count())
            .finish()
    }
}
