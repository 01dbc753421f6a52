// crates/we_workflow/src/lib.rs

//! WaveEnv 任务层
//!
//! 管理波浪模拟任务的完整生命周期：创建、按节拍推进、缓存帧、查询与删除。
//!
//! # 模块结构
//!
//! - [`job`]: 任务标识、状态与运行期数据
//! - [`cache`]: 只追加的帧缓存与保留窗口
//! - [`events`]: 事件系统
//! - [`storage`]: 任务注册表
//! - [`runner`]: 每任务一个后台线程的调度器与取消令牌
//! - [`manager`]: 引擎入口 `WaveEngine` 与错误类型
//! - [`query`]: 帧查询、点查询与帧范围查询
//!
//! # 示例
//!
//! ```rust,no_run
//! use we_config::{Region, SimulationRequest, SpectrumSpec, WindSpec};
//! use we_workflow::{TimeSelector, WaveEngine};
//!
//! let engine = WaveEngine::new();
//! let request = SimulationRequest::new(Region::new(120.0, 30.0, 10.0, 120.5, 30.5, 20.0))
//!     .with_wind(WindSpec::new(10.0, 270.0))
//!     .with_spectrum(SpectrumSpec::pierson_moskowitz(2.0, 8.0));
//!
//! let id = engine.create_task(request)?;
//! let frame = engine.get_frames(id, TimeSelector::Latest)?;
//! let point = engine.query_point(id, 120.25, 30.25, -1.0)?;
//! println!("t={} η={}", point.time, point.value);
//! # let _ = frame;
//! # Ok::<(), we_workflow::EngineError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod events;
pub mod job;
pub mod manager;
pub mod query;
pub mod runner;
pub mod storage;

// 重导出核心类型
pub use cache::{Bracket, Frame, FrameCache};
pub use events::{EventDispatcher, EventListener, FnListener, LoggingListener, TaskEvent};
pub use job::{Task, TaskId, TaskInfo, TaskStatus};
pub use manager::{CreateOptions, EngineError, WaveEngine};
pub use query::{FramePoint, FrameRangeResponse, FrameResponse, FrameValues, PointResponse, TimeSelector};
pub use runner::{CancellationToken, TaskHandle, TaskRunner};
pub use storage::{MemoryTaskStore, StoreError, TaskStore};
