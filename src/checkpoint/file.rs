//! 基于JSON文件的检查点存储
//!
//! 每个线程一个文件：`{dir}/{thread_id}.json`，写入时先写临时文件再重命名。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{Checkpoint, CheckpointStore, validate_thread_id};
use crate::error::{ResearchError, Result};

#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn checkpoint_path(&self, thread_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", thread_id))
    }

    /// 每次写入独立的临时文件，并发保存同一线程时互不覆盖
    fn temp_path(&self, thread_id: &str) -> PathBuf {
        self.dir
            .join(format!("{}.json.{}.tmp", thread_id, uuid::Uuid::new_v4().simple()))
    }

    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to create directory: {}", e)))
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn save(&self, checkpoint: &Checkpoint) -> Result<()> {
        validate_thread_id(&checkpoint.thread_id)?;
        self.ensure_dir().await?;

        let json = serde_json::to_vec_pretty(checkpoint)
            .map_err(|e| ResearchError::checkpoint_error(format!("Serialization failed: {}", e)))?;

        let temp_path = self.temp_path(&checkpoint.thread_id);
        let final_path = self.checkpoint_path(&checkpoint.thread_id);

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to create temp file: {}", e)))?;
        file.write_all(&json)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to write data: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to sync file: {}", e)))?;

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to rename file: {}", e)))?;

        tracing::debug!(path = %final_path.display(), step = checkpoint.step, "checkpoint saved");
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        validate_thread_id(thread_id)?;
        let path = self.checkpoint_path(thread_id);
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to read file: {}", e)))?;
        let checkpoint = serde_json::from_slice(&data)
            .map_err(|e| ResearchError::checkpoint_error(format!("Deserialization failed: {}", e)))?;
        Ok(Some(checkpoint))
    }

    async fn delete(&self, thread_id: &str) -> Result<bool> {
        validate_thread_id(thread_id)?;
        let path = self.checkpoint_path(thread_id);
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to delete file: {}", e)))?;
        Ok(true)
    }

    async fn list(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to read directory: {}", e)))?;

        let mut thread_ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ResearchError::checkpoint_error(format!("Failed to read entry: {}", e)))?
        {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && let Some(thread_id) = name.strip_suffix(".json")
                && validate_thread_id(thread_id).is_ok()
            {
                thread_ids.push(thread_id.to_string());
            }
        }

        thread_ids.sort();
        Ok(thread_ids)
    }
}
