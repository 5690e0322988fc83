use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// 并发执行一组任务，同时运行的任务数不超过 `max_parallels`
///
/// 结果按输入顺序返回；panic的任务会被记录并从结果中剔除，
/// 调用方可以通过比较返回数量与输入数量识别这种情况。
pub async fn do_parallel_with_limit<F, T>(futures: Vec<F>, max_parallels: usize) -> Vec<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(max_parallels.max(1)));
    let mut set = JoinSet::new();

    for (index, future) in futures.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        set.spawn(async move {
            // 信号量不会被关闭，获取失败时直接执行
            let _permit = semaphore.acquire_owned().await.ok();
            (index, future.await)
        });
    }

    let mut results = Vec::with_capacity(set.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(indexed) => results.push(indexed),
            Err(e) => tracing::error!(error = %e, "parallel task aborted"),
        }
    }

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, output)| output).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_results_keep_input_order() {
        let futures: Vec<_> = (0..5u64)
            .map(|i| async move {
                tokio::time::sleep(Duration::from_millis(50 - i * 10)).await;
                i
            })
            .collect();
        let results = do_parallel_with_limit(futures, 5).await;
        assert_eq!(results, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_limit_is_respected() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let futures: Vec<_> = (0..8)
            .map(|_| {
                let running = running.clone();
                let peak = peak.clone();
                async move {
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                }
            })
            .collect();
        do_parallel_with_limit(futures, 2).await;
        assert!(peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_panicked_task_is_dropped() {
        let futures: Vec<std::pin::Pin<Box<dyn Future<Output = u32> + Send>>> = vec![
            Box::pin(async { 1 }),
            Box::pin(async {
                if true {
                    panic!("boom");
                }
                2
            }),
            Box::pin(async { 3 }),
        ];
        let results = do_parallel_with_limit(futures, 2).await;
        assert_eq!(results, vec![1, 3]);
    }
}
