//! 报告落盘

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 把最终报告写入 `{output_dir}/{thread_id}.md`，返回文件路径
pub async fn save_report(output_dir: &Path, thread_id: &str, report: &str) -> Result<PathBuf> {
    crate::checkpoint::validate_thread_id(thread_id)?;

    if !output_dir.exists() {
        fs::create_dir_all(output_dir)
            .await
            .context(format!("Failed to create output directory: {:?}", output_dir))?;
    }

    let output_file_path = output_dir.join(format!("{}.md", thread_id));
    fs::write(&output_file_path, report)
        .await
        .context(format!("Failed to write report: {:?}", output_file_path))?;

    tracing::info!(path = %output_file_path.display(), "report saved");
    Ok(output_file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_report_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let output_dir = temp_dir.path().join("nested").join("reports");

        let path = save_report(&output_dir, "thread-1", "# Report\n").await.unwrap();

        assert_eq!(path, output_dir.join("thread-1.md"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report\n");
    }

    #[tokio::test]
    async fn test_save_report_rejects_bad_thread_id() {
        let temp_dir = TempDir::new().unwrap();
        assert!(save_report(temp_dir.path(), "../x", "r").await.is_err());
    }
}
