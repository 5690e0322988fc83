use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{Checkpoint, CheckpointStore, validate_thread_id};
use crate::error::{ResearchError, Result};

/// 内存中的检查点存储，进程退出即丢失
///
/// 与文件存储一样按JSON保存，保证两种存储的序列化行为一致。
#[derive(Debug, Default)]
pub struct MemoryCheckpointStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckpointStore for MemoryCheckpointStore {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        validate_thread_id(&checkpoint.thread_id)?;
        let serialized = serde_json::to_value(checkpoint)
            .map_err(|e| ResearchError::checkpoint_error(format!("Serialization failed: {}", e)))?;
        self.data
            .write()
            .await
            .insert(checkpoint.thread_id.clone(), serialized);
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        validate_thread_id(thread_id)?;
        let data = self.data.read().await;
        match data.get(thread_id) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ResearchError::checkpoint_error(format!("Deserialization failed: {}", e))),
            None => Ok(None),
        }
    }

    async fn delete(&self, thread_id: &str) -> Result<bool> {
        validate_thread_id(thread_id)?;
        Ok(self.data.write().await.remove(thread_id).is_some())
    }

    async fn list(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.data.read().await.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
