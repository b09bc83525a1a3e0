//! Async task lifecycle tracking

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Monotonic id source for spawned tasks
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Tasks spawned and not yet finished
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// The task runs inside the span that is current at the call site.
///
/// # Example
///
/// ```rust,ignore
/// spawn_tracked("collections.resolve", async move {
///     provider.fetch_collections(&address).await
/// });
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::debug!(task = %name, task_id = task_id, "Task spawned");

    let span = tracing::Span::current();
    tokio::spawn(
        async move {
            let result = future.await;
            let duration = start.elapsed();

            tracing::debug!(
                task = %name,
                task_id = task_id,
                duration_ms = duration.as_millis() as u64,
                "Task completed"
            );

            if duration.as_secs() > 30 {
                tracing::warn!(
                    task = %name,
                    task_id = task_id,
                    duration_ms = duration.as_millis() as u64,
                    "Task took very long"
                );
            }

            ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
            result
        }
        .instrument(span),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_tracked_returns_output() {
        let handle = spawn_tracked("test.task", async { 21 * 2 });
        assert_eq!(handle.await.unwrap(), 42);
    }
}
