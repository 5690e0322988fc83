//! 工作流线程的持久化

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{CheckpointBackend, CheckpointConfig};
use crate::error::{ResearchError, Result};
use crate::generator::workflow::state::{ResearchState, WorkflowPhase};

pub mod file;
pub mod memory;

pub use file::FileCheckpointStore;
pub use memory::MemoryCheckpointStore;

/// 一个工作流线程的持久化记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub thread_id: String,
    pub phase: WorkflowPhase,
    /// 已经完成的阶段迁移次数
    pub step: u64,
    pub state: ResearchState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(thread_id: impl Into<String>, state: ResearchState) -> Self {
        let now = Utc::now();
        Self {
            thread_id: thread_id.into(),
            phase: WorkflowPhase::Generating,
            step: 0,
            state,
            created_at: now,
            updated_at: now,
        }
    }

    /// 迁移到下一个阶段
    pub fn advance(&mut self, phase: WorkflowPhase) {
        tracing::info!(thread_id = %self.thread_id, from = %self.phase, to = %phase, "phase transition");
        self.phase = phase;
        self.step += 1;
        self.updated_at = Utc::now();
    }
}

/// 检查点存储，以线程id为键
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()>;

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>>;

    /// 删除检查点，返回是否存在
    async fn delete(&self, thread_id: &str) -> Result<bool>;

    async fn list(&self) -> Result<Vec<String>>;
}

/// 线程id只允许字母、数字、`-` 和 `_`
pub fn validate_thread_id(thread_id: &str) -> Result<()> {
    let valid = !thread_id.is_empty()
        && thread_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ResearchError::InvalidThreadId(thread_id.to_string()))
    }
}

/// 根据配置创建存储
pub fn from_config(config: &CheckpointConfig) -> Arc<dyn CheckpointStore> {
    match config.backend {
        CheckpointBackend::File => Arc::new(FileCheckpointStore::new(&config.dir)),
        CheckpointBackend::Memory => Arc::new(MemoryCheckpointStore::new()),
    }
}

#[cfg(test)]
mod tests;
