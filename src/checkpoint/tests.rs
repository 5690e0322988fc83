use super::*;
use crate::generator::workflow::state::{ResearchState, WorkflowPhase};
use tempfile::TempDir;

fn sample_checkpoint(thread_id: &str) -> Checkpoint {
    let mut state = ResearchState::new("agent memory", 2);
    state.sections.merge(["## Memo\nbody".to_string()]);
    Checkpoint::new(thread_id, state)
}

async fn exercise_store(store: &dyn CheckpointStore) {
    assert!(store.load("thread-a").await.unwrap().is_none());

    let mut checkpoint = sample_checkpoint("thread-a");
    store.save(&checkpoint).await.unwrap();
    checkpoint.advance(WorkflowPhase::AwaitingFeedback);
    store.save(&checkpoint).await.unwrap();
    store.save(&sample_checkpoint("thread-b")).await.unwrap();

    let loaded = store.load("thread-a").await.unwrap().unwrap();
    assert_eq!(loaded, checkpoint);
    assert_eq!(loaded.step, 1);

    assert_eq!(store.list().await.unwrap(), vec!["thread-a", "thread-b"]);
    assert!(store.delete("thread-b").await.unwrap());
    assert!(!store.delete("thread-b").await.unwrap());
    assert_eq!(store.list().await.unwrap(), vec!["thread-a"]);
}

#[test]
fn test_validate_thread_id() {
    assert!(validate_thread_id("3f2a-b_9").is_ok());
    assert!(validate_thread_id("").is_err());
    assert!(validate_thread_id("../etc/passwd").is_err());
    assert!(validate_thread_id("a b").is_err());
}

#[test]
fn test_advance_updates_phase_and_step() {
    let mut checkpoint = sample_checkpoint("t1");
    let created = checkpoint.created_at;
    checkpoint.advance(WorkflowPhase::FanningOut);
    assert_eq!(checkpoint.phase, WorkflowPhase::FanningOut);
    assert_eq!(checkpoint.step, 1);
    assert_eq!(checkpoint.created_at, created);
    assert!(checkpoint.updated_at >= created);
}

#[tokio::test]
async fn test_memory_store() {
    let store = MemoryCheckpointStore::new();
    exercise_store(&store).await;
}

#[tokio::test]
async fn test_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(temp_dir.path().join("threads"));
    exercise_store(&store).await;

    // 不留下临时文件
    let leftovers: Vec<_> = std::fs::read_dir(store.dir())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[tokio::test]
async fn test_file_store_survives_new_instance() {
    let temp_dir = TempDir::new().unwrap();
    FileCheckpointStore::new(temp_dir.path())
        .save(&sample_checkpoint("persisted"))
        .await
        .unwrap();

    let reopened = FileCheckpointStore::new(temp_dir.path());
    let loaded = reopened.load("persisted").await.unwrap().unwrap();
    assert_eq!(loaded.state.topic, "agent memory");
    assert_eq!(loaded.state.sections.len(), 1);
}

#[tokio::test]
async fn test_file_store_rejects_path_like_ids() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(temp_dir.path());
    let err = store.load("../outside").await.unwrap_err();
    assert!(matches!(err, ResearchError::InvalidThreadId(_)));
}

#[tokio::test]
async fn test_file_store_concurrent_saves_of_one_thread() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileCheckpointStore::new(temp_dir.path());
    let first = sample_checkpoint("shared");
    let mut second = sample_checkpoint("shared");
    second.advance(WorkflowPhase::AwaitingFeedback);

    let (a, b) = tokio::join!(store.save(&first), store.save(&second));
    a.unwrap();
    b.unwrap();

    let loaded = store.load("shared").await.unwrap().unwrap();
    assert!(loaded == first || loaded == second);
    assert_eq!(store.list().await.unwrap(), vec!["shared"]);
}
