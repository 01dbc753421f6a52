// crates/we_workflow/src/storage.rs

//! 任务存储模块
//!
//! 引擎持有的任务注册表。只保存内存中的活动任务，不做持久化。

use crate::job::{Task, TaskId};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// 存储错误
#[derive(Debug, Error)]
pub enum StoreError {
    /// 任务已存在
    #[error("Task already exists: {0}")]
    Duplicate(TaskId),

    /// 存储已满
    #[error("Task store is full (capacity {0})")]
    Full(usize),
}

/// 任务存储trait
pub trait TaskStore: Send + Sync {
    /// 插入任务
    fn insert(&self, task: Arc<Task>) -> Result<(), StoreError>;

    /// 获取任务
    fn get(&self, id: TaskId) -> Option<Arc<Task>>;

    /// 移除任务，返回被移除的任务
    fn remove(&self, id: TaskId) -> Option<Arc<Task>>;

    /// 列出所有任务
    fn list(&self) -> Vec<Arc<Task>>;

    /// 任务数量
    fn len(&self) -> usize {
        self.list().len()
    }

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 检查任务是否存在
    fn contains(&self, id: TaskId) -> bool {
        self.get(id).is_some()
    }
}

/// 内存任务存储
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: RwLock<HashMap<TaskId, Arc<Task>>>,
    max_capacity: Option<usize>,
}

impl MemoryTaskStore {
    /// 创建新的内存存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建带容量限制的内存存储
    pub fn with_capacity(max_capacity: usize) -> Self {
        Self {
            tasks: RwLock::new(HashMap::with_capacity(max_capacity)),
            max_capacity: Some(max_capacity),
        }
    }
}

impl TaskStore for MemoryTaskStore {
    fn insert(&self, task: Arc<Task>) -> Result<(), StoreError> {
        let mut tasks = self.tasks.write();
        let id = task.id();
        if tasks.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        if let Some(max) = self.max_capacity {
            if tasks.len() >= max {
                return Err(StoreError::Full(max));
            }
        }
        tasks.insert(id, task);
        Ok(())
    }

    fn get(&self, id: TaskId) -> Option<Arc<Task>> {
        self.tasks.read().get(&id).cloned()
    }

    fn remove(&self, id: TaskId) -> Option<Arc<Task>> {
        self.tasks.write().remove(&id)
    }

    fn list(&self) -> Vec<Arc<Task>> {
        self.tasks.read().values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.tasks.read().len()
    }

    fn contains(&self, id: TaskId) -> bool {
        self.tasks.read().contains_key(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use we_config::{Discretization, Region, SimulationRequest, SpectrumSpec, WindSpec};
    use we_physics::{GridBuilder, SpectralRealizer};

    fn task() -> Arc<Task> {
        let request = SimulationRequest::new(Region::new(120.0, 30.0, 10.0, 120.1, 30.1, 20.0))
            .with_discretization(Discretization::new(0.05, 0.05, 100));
        let grid = GridBuilder::new(&request.region, &request.discretization)
            .build()
            .unwrap();
        let realization = SpectralRealizer::default()
            .realize(
                &WindSpec::new(8.0, 90.0),
                &SpectrumSpec::pierson_moskowitz(1.0, 6.0),
                15.0,
                3,
            )
            .unwrap();
        Arc::new(Task::new(TaskId::new(), request, grid, realization))
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTaskStore::new();
        assert!(store.is_empty());

        let t = task();
        let id = t.id();
        store.insert(t.clone()).unwrap();
        assert!(store.contains(id));
        assert_eq!(store.len(), 1);
        assert!(matches!(store.insert(t), Err(StoreError::Duplicate(_))));

        assert!(store.remove(id).is_some());
        assert!(store.remove(id).is_none());
        assert!(store.get(id).is_none());
    }

    #[test]
    fn test_capacity_limit() {
        let store = MemoryTaskStore::with_capacity(1);
        store.insert(task()).unwrap();
        assert!(matches!(store.insert(task()), Err(StoreError::Full(1))));
        assert_eq!(store.list().len(), 1);
    }
}
