// crates/we_workflow/src/runner.rs

//! 任务运行器模块
//!
//! 每个任务一个后台线程，按墙钟节拍 `dt_backend` 逐帧计算并写入帧缓存。
//! 节拍等待是唯一的挂起点，取消令牌可以提前唤醒；取消只在步与步之间
//! 生效，不会打断正在计算的一帧。
//!
//! 第 n 帧的模拟时刻为 `n · dt_backend`。

use crate::cache::Frame;
use crate::events::{EventDispatcher, TaskEvent};
use crate::job::{Task, TaskId};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use we_config::SchedulerConfig;
use we_foundation::float::TIME_EPSILON;
use we_foundation::WeResult;
use we_physics::FieldEvaluator;

/// 可等待的一次性标志
#[derive(Debug, Default)]
struct Signal {
    flag: Mutex<bool>,
    cvar: Condvar,
}

impl Signal {
    fn set(&self) {
        *self.flag.lock() = true;
        self.cvar.notify_all();
    }

    fn is_set(&self) -> bool {
        *self.flag.lock()
    }

    /// 等待到 `deadline`，返回届时标志是否已置位
    fn wait_until(&self, deadline: Instant) -> bool {
        let mut flag = self.flag.lock();
        while !*flag {
            if self.cvar.wait_until(&mut flag, deadline).timed_out() {
                break;
            }
        }
        *flag
    }
}

/// 取消令牌
///
/// 克隆后共享同一标志。
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Signal>,
}

impl CancellationToken {
    /// 创建未取消的令牌
    pub fn new() -> Self {
        Self::default()
    }

    /// 请求取消并唤醒等待者
    pub fn cancel(&self) {
        self.inner.set();
    }

    /// 是否已取消
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_set()
    }

    /// 等待到 `deadline`，期间被取消则提前返回 `true`
    pub fn wait_until(&self, deadline: Instant) -> bool {
        self.inner.wait_until(deadline)
    }
}

/// 后台任务句柄
#[derive(Debug)]
pub struct TaskHandle {
    task_id: TaskId,
    token: CancellationToken,
    finished: Arc<Signal>,
    join: Option<JoinHandle<()>>,
}

impl TaskHandle {
    /// 任务ID
    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// 请求取消
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// 线程是否已退出
    pub fn is_finished(&self) -> bool {
        self.finished.is_set()
    }

    /// 在超时内等待线程退出，返回是否已退出
    ///
    /// 超时后线程被分离，它持有的任务引用会在下一次节拍检查取消时释放。
    pub fn join_timeout(mut self, timeout: Duration) -> bool {
        let Some(join) = self.join.take() else {
            return true;
        };
        let finished = Instant::now()
            .checked_add(timeout)
            .map_or(true, |deadline| self.finished.wait_until(deadline));
        if !finished {
            tracing::warn!("Worker for task {} did not exit within {:?}", self.task_id, timeout);
            return false;
        }
        if join.join().is_err() {
            tracing::error!("Worker for task {} panicked", self.task_id);
        }
        true
    }
}

/// 单个任务的逐帧推进器
pub struct TaskRunner {
    task: Arc<Task>,
    evaluator: FieldEvaluator,
    events: Arc<EventDispatcher>,
    config: SchedulerConfig,
    token: CancellationToken,
}

impl TaskRunner {
    /// 创建推进器
    pub fn new(
        task: Arc<Task>,
        evaluator: FieldEvaluator,
        events: Arc<EventDispatcher>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            task,
            evaluator,
            events,
            config,
            token: CancellationToken::new(),
        }
    }

    /// 计算并发布第 `step` 帧，返回其模拟时刻
    pub fn emit_step(&self, step: u64) -> WeResult<f64> {
        let time = step as f64 * self.task.request().time.dt_backend;
        let values = self
            .evaluator
            .evaluate(self.task.realization(), self.task.grid(), time)?;
        let evicted = self.task.cache().append(Frame::new(time, values))?;
        self.task.record_emitted(time);

        let retained = self.task.cache().len();
        tracing::debug!(
            "Task {} emitted t={:.3}s ({} retained, {} evicted)",
            self.task.id(),
            time,
            retained,
            evicted
        );
        self.events.emit(TaskEvent::FrameEmitted {
            task_id: self.task.id(),
            time,
            retained,
        });
        Ok(time)
    }

    /// 该时刻是否已达到有限总时长
    pub fn is_final(&self, time: f64) -> bool {
        self.task
            .request()
            .time
            .t_total
            .seconds()
            .is_some_and(|total| time >= total - TIME_EPSILON)
    }

    /// 标记完成并发出事件
    pub fn complete(&self, final_time: f64) {
        self.task.mark_completed();
        let frames_emitted = self.task.frames_emitted();
        tracing::info!(
            "Task {} completed at t={:.3}s ({} frames)",
            self.task.id(),
            final_time,
            frames_emitted
        );
        self.events.emit(TaskEvent::TaskCompleted {
            task_id: self.task.id(),
            final_time,
            frames_emitted,
        });
    }

    /// 标记失败并发出事件，已缓存的帧保持可查询
    pub fn fail(&self, error: impl std::fmt::Display) {
        let message = error.to_string();
        tracing::error!("Task {} failed: {}", self.task.id(), message);
        self.task.mark_failed(message.clone());
        self.events.emit(TaskEvent::TaskFailed {
            task_id: self.task.id(),
            error: message,
        });
    }

    /// 在后台线程中推进，`anchor` 为第 0 帧发布的时刻
    ///
    /// 工作线程内的 panic 被捕获并记为任务失败。
    pub fn spawn(self, anchor: Instant) -> std::io::Result<TaskHandle> {
        let task_id = self.task.id();
        let token = self.token.clone();
        let finished = Arc::new(Signal::default());
        let done = finished.clone();
        let name = format!("we-task-{}", &task_id.to_string()[..8]);
        let join = thread::Builder::new().name(name).spawn(move || {
            let task = self.task.clone();
            let events = self.events.clone();
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| self.run(anchor))) {
                let message = format!("worker panicked: {}", panic_message(payload.as_ref()));
                tracing::error!("Task {} failed: {}", task.id(), message);
                task.mark_failed(message.clone());
                events.emit(TaskEvent::TaskFailed {
                    task_id: task.id(),
                    error: message,
                });
            }
            done.set();
        })?;
        Ok(TaskHandle {
            task_id,
            token,
            finished,
            join: Some(join),
        })
    }

    fn run(self, anchor: Instant) {
        let dt = self.task.request().time.dt_backend;
        let Some(interval) = self.task.request().time.step_interval() else {
            self.fail(format!("dt_backend({dt}) cannot be used as a wall-clock interval"));
            return;
        };
        let max_lag = interval
            .checked_mul(self.config.max_catch_up_steps)
            .unwrap_or(Duration::MAX);
        let Some(mut deadline) = self.next_deadline(anchor, interval) else {
            return;
        };
        let mut step: u64 = 0;

        loop {
            if self.token.wait_until(deadline) {
                if self.task.mark_cancelled() {
                    tracing::info!("Task {} cancelled after {} steps", self.task.id(), step);
                    self.events.emit(TaskEvent::TaskCancelled {
                        task_id: self.task.id(),
                    });
                }
                return;
            }

            step += 1;
            let started = Instant::now();
            let time = match self.emit_step(step) {
                Ok(time) => time,
                Err(e) => {
                    self.fail(e);
                    return;
                }
            };
            if self.is_final(time) {
                self.complete(time);
                return;
            }

            let elapsed = started.elapsed();
            let overrun = elapsed > interval;
            self.task.record_step(elapsed.as_secs_f64(), overrun);
            if overrun {
                tracing::warn!(
                    "Task {} step t={:.3}s took {:.1} ms, longer than dt_backend {:.1} ms",
                    self.task.id(),
                    time,
                    elapsed.as_secs_f64() * 1e3,
                    dt * 1e3
                );
            }

            deadline = match self.next_deadline(deadline, interval) {
                Some(next) => next,
                None => return,
            };
            let now = Instant::now();
            if now.saturating_duration_since(deadline) > max_lag {
                // 落后过多时放弃补帧，从当前时刻重新计节拍
                deadline = now;
            }
        }
    }

    /// 下一个节拍时刻，超出时钟范围时任务失败
    fn next_deadline(&self, from: Instant, interval: Duration) -> Option<Instant> {
        let next = from.checked_add(interval);
        if next.is_none() {
            self.fail(format!(
                "wall-clock deadline overflowed (interval {:?})",
                interval
            ));
        }
        next
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}

impl std::fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskRunner")
            .field("task_id", &self.task.id())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
