// tests/engine_lifecycle.rs

//! 引擎生命周期测试
//!
//! 覆盖任务创建、持续推进、有限时长完成、删除与关闭，以及约定场景下的
//! 错误返回。调度相关的等待都有上限，避免测试挂起。

use parking_lot::Mutex;
use std::f64::consts::PI;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use we_config::{
    Discretization, EngineConfig, Region, Retention, SimulationRequest, SpectrumSpec, TimeSpec,
    TotalDuration, WindSpec,
};
use we_physics::{GridBuilder, Realization, WaveComponent};
use we_workflow::{
    CreateOptions, EngineError, MemoryTaskStore, Task, TaskId, TaskStatus, TaskStore,
    TimeSelector, WaveEngine,
};

// ============================================================================
// 测试辅助函数
// ============================================================================

/// 约定场景的请求
fn scenario_request() -> SimulationRequest {
    SimulationRequest::new(Region::new(120.0, 30.0, 10.0, 120.5, 30.5, 20.0))
        .with_wind(WindSpec::new(10.0, 270.0))
        .with_spectrum(SpectrumSpec::pierson_moskowitz(2.0, 8.0))
        .with_discretization(Discretization::new(0.01, 0.01, 40000))
        .with_time(TimeSpec::new(0.2, TotalDuration::Unbounded, Retention::Seconds(60.0)))
}

/// 小网格、短步长的请求
fn small_request(time: TimeSpec) -> SimulationRequest {
    SimulationRequest::new(Region::new(120.0, 30.0, 10.0, 120.1, 30.1, 20.0))
        .with_wind(WindSpec::new(10.0, 270.0))
        .with_spectrum(SpectrumSpec::pierson_moskowitz(2.0, 8.0))
        .with_discretization(Discretization::new(0.02, 0.02, 100))
        .with_time(time)
}

/// 等待任务进入指定状态
fn wait_for_status(engine: &WaveEngine, id: TaskId, status: TaskStatus, timeout: Duration) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if engine.task_info(id).map(|i| i.status).ok() == Some(status) {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

fn is_multiple_of(t: f64, dt: f64) -> bool {
    let n = t / dt;
    (n - n.round()).abs() < 1e-9
}

// ============================================================================
// 场景测试
// ============================================================================

#[test]
fn test_scenario_running_stream() {
    let engine = WaveEngine::new();
    let id = engine.create_task(scenario_request()).unwrap();

    let info = engine.task_info(id).unwrap();
    assert_eq!(info.status, TaskStatus::Running);
    assert!(info.grid_points <= 40000);
    assert_eq!(info.grid_points, 51 * 51);

    thread::sleep(Duration::from_millis(1200));

    let frame = engine.get_frames(id, TimeSelector::Latest).unwrap();
    assert_eq!(frame.status, TaskStatus::Running);
    assert!(frame.time > 0.0, "latest time {}", frame.time);
    assert!(is_multiple_of(frame.time, 0.2), "latest time {}", frame.time);
    assert_eq!(frame.points.len(), 51 * 51);
    assert!(frame.points.iter().all(|p| p.value.is_finite()));

    engine.delete_task(id).unwrap();
}

#[test]
fn test_scenario_out_of_region() {
    let engine = WaveEngine::new();
    let id = engine.create_task(small_request(TimeSpec::default())).unwrap();

    let err = engine.query_point(id, 119.0, 30.05, -1.0).unwrap_err();
    assert!(matches!(err, EngineError::OutOfRegion { .. }));
    assert!(err.is_query_error());

    // 边界点包含在区域内
    assert!(engine.query_point(id, 120.1, 30.1, -1.0).is_ok());
}

#[test]
fn test_scenario_no_frames_yet() {
    let engine = WaveEngine::new();
    let id = engine
        .create_task_with(scenario_request(), CreateOptions::deferred())
        .unwrap();

    let err = engine.query_point(id, 120.5, 35.2, -1.0).unwrap_err();
    assert!(matches!(err, EngineError::NoFramesYet(_)));

    let err = engine.get_frames(id, -1.0).unwrap_err();
    assert!(matches!(err, EngineError::NoFramesYet(_)));
}

// ============================================================================
// 生命周期
// ============================================================================

#[test]
fn test_bounded_task_completes() {
    let engine = WaveEngine::new();
    let time = TimeSpec::new(0.02, TotalDuration::Seconds(0.2), Retention::KeepAll);
    let id = engine.create_task(small_request(time)).unwrap();

    assert!(wait_for_status(&engine, id, TaskStatus::Completed, Duration::from_secs(10)));
    let info = engine.task_info(id).unwrap();
    assert_eq!(info.frame_count, 11);
    assert_eq!(info.frames_emitted, 11);
    assert!((info.progress.unwrap() - 1.0).abs() < 1e-9);
    assert!(info.finished_at.is_some());

    let last = engine.get_frames(id, TimeSelector::Latest).unwrap();
    assert!((last.time - 0.2).abs() < 1e-9);
    assert_eq!(last.status, TaskStatus::Completed);

    // 完成后不再追加
    thread::sleep(Duration::from_millis(60));
    assert_eq!(engine.task_info(id).unwrap().frame_count, 11);
}

#[test]
fn test_retention_window_respected_while_running() {
    let engine = WaveEngine::new();
    let time = TimeSpec::new(0.01, TotalDuration::Unbounded, Retention::Seconds(0.1));
    let id = engine.create_task(small_request(time)).unwrap();

    for _ in 0..20 {
        thread::sleep(Duration::from_millis(15));
        let range = engine.get_frame_range(id, None, None, None).unwrap();
        let times: Vec<f64> = range.frames.iter().map(|f| f.time).collect();
        let latest = *times.last().unwrap();
        assert!(times.windows(2).all(|w| w[0] < w[1]));
        assert!(times.iter().all(|&t| t >= latest - 0.1 - 1e-9));
    }

    // 早期帧已被淘汰，帧查询截断到最早的保留帧
    engine.shutdown();
    let earliest = engine.get_frame_range(id, None, None, None).unwrap().frames[0].time;
    assert!(earliest > 0.0);
    let frame = engine.get_frames(id, 0.0).unwrap();
    assert_eq!(frame.time, earliest);
    assert_eq!(frame.status, TaskStatus::Cancelled);
}

#[test]
fn test_delete_releases_task() {
    let engine = WaveEngine::new();
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    engine
        .events()
        .add_fn_listener("collect", move |e| sink.lock().push(e.name()));

    let id = engine
        .create_task(small_request(TimeSpec::new(0.02, TotalDuration::Unbounded, Retention::KeepAll)))
        .unwrap();
    thread::sleep(Duration::from_millis(50));
    engine.delete_task(id).unwrap();

    assert!(matches!(engine.get_frames(id, -1.0), Err(EngineError::TaskNotFound(_))));
    assert!(matches!(
        engine.query_point(id, 120.05, 30.05, -1.0),
        Err(EngineError::TaskNotFound(_))
    ));
    assert!(matches!(engine.delete_task(id), Err(EngineError::TaskNotFound(_))));
    assert_eq!(engine.task_count(), 0);

    let names = events.lock().clone();
    assert_eq!(names[0], "TaskCreated");
    assert_eq!(names[1], "TaskStarted");
    assert_eq!(names[2], "FrameEmitted");
    assert!(names.contains(&"TaskCancelled"));
    assert_eq!(names.last(), Some(&"TaskDeleted"));

    // 删除后工作线程不再发出帧事件
    let count = events.lock().len();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(events.lock().len(), count);
}

#[test]
fn test_shutdown_cancels_running_tasks() {
    let engine = WaveEngine::new();
    let time = TimeSpec::new(0.02, TotalDuration::Unbounded, Retention::KeepAll);
    let a = engine.create_task(small_request(time)).unwrap();
    let b = engine.create_task(small_request(time)).unwrap();
    thread::sleep(Duration::from_millis(50));

    engine.shutdown();
    for id in [a, b] {
        let info = engine.task_info(id).unwrap();
        assert_eq!(info.status, TaskStatus::Cancelled);
        // 已缓存的帧保持可查询
        assert!(info.frame_count >= 1);
        assert!(engine.query_point(id, 120.05, 30.05, -1.0).is_ok());
    }
    assert_eq!(engine.list_tasks(Some(TaskStatus::Cancelled)).len(), 2);
}

#[test]
fn test_creation_errors_fail_fast() {
    let engine = WaveEngine::new();

    let bad_region = small_request(TimeSpec::default());
    let bad_region = SimulationRequest {
        region: Region::new(120.5, 30.0, 10.0, 120.0, 30.5, 20.0),
        ..bad_region
    };
    assert!(matches!(
        engine.create_task(bad_region),
        Err(EngineError::InvalidRegion(_))
    ));

    let bad_disc = small_request(TimeSpec::default()).with_discretization(Discretization::new(0.0, 0.01, 100));
    assert!(matches!(
        engine.create_task(bad_disc),
        Err(EngineError::InvalidDiscretization(_))
    ));

    let bad_spectrum = small_request(TimeSpec::default()).with_spectrum(SpectrumSpec::pierson_moskowitz(2.0, -8.0));
    let err = engine.create_task(bad_spectrum).unwrap_err();
    assert!(matches!(err, EngineError::InvalidSpectrumParams(_)));
    assert!(err.is_creation_error());

    let unknown_model = r#"{
        "region": {"lon_min": 120.0, "lat_min": 30.0, "depth_min": 10.0,
                   "lon_max": 120.1, "lat_max": 30.1, "depth_max": 20.0},
        "spectrum": {"model": "TMA", "Hs": 2.0, "Tp": 8.0}
    }"#;
    let request = SimulationRequest::from_json_str(unknown_model).unwrap();
    assert!(matches!(
        engine.create_task(request),
        Err(EngineError::InvalidSpectrumParams(_))
    ));

    assert_eq!(engine.task_count(), 0);
}

#[test]
fn test_huge_dt_rejected_at_creation() {
    let engine = WaveEngine::new();
    let time = TimeSpec::new(1e20, TotalDuration::Unbounded, Retention::KeepAll);
    let err = engine.create_task(small_request(time)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDiscretization(_)));
    assert_eq!(engine.task_count(), 0);
}

#[test]
fn test_numerical_fault_keeps_frames_queryable() {
    // 两个振幅 1e308 的分量：t=0 反相抵消，t=0.02 s 同相溢出
    let component = |frequency: f64, phase: f64| WaveComponent {
        frequency,
        direction_deg: 0.0,
        amplitude: 1e308,
        phase,
        wavenumber: 0.0,
    };
    let realization =
        Realization::from_components(vec![component(0.0, 0.0), component(25.0, PI)], 15.0, 0);

    let request = small_request(TimeSpec::new(0.02, TotalDuration::Unbounded, Retention::KeepAll));
    let grid = GridBuilder::new(&request.region, &request.discretization).build().unwrap();
    let id = TaskId::new();
    let store = MemoryTaskStore::new();
    store
        .insert(Arc::new(Task::new(id, request, grid, realization)))
        .unwrap();

    let engine = WaveEngine::with_store(store, EngineConfig::default()).unwrap();
    engine.start_task(id).unwrap();
    let deadline = Instant::now() + Duration::from_secs(10);
    while engine.task_info(id).unwrap().status != TaskStatus::Failed {
        assert!(Instant::now() < deadline, "task did not fail");
        thread::sleep(Duration::from_millis(5));
    }

    let info = engine.task_info(id).unwrap();
    assert!(info.error.is_some());
    assert_eq!(info.frame_count, 1);

    let point = engine.query_point(id, 120.05, 30.05, -1.0).unwrap();
    assert_eq!(point.status, TaskStatus::Failed);
    assert_eq!(point.time, 0.0);
    assert_eq!(point.value, 0.0);
    assert_eq!(engine.get_frames(id, 0.0).unwrap().status, TaskStatus::Failed);
}
