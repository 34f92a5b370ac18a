use std::sync::Arc;

use async_trait::async_trait;
use domain_upload::{exception::UploadResult, model::vo::TaskQueue};
use futures::{stream::FuturesUnordered, StreamExt};
use tracing::Instrument;
use typed_builder::TypedBuilder;

/// Default number of concurrent workers.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Executes one task taken from a [`TaskQueue`].
///
/// A logical failure, such as a refused acknowledgment, must be returned as an
/// error so the pool treats it like any other failure.
#[async_trait]
pub trait TaskExecutor<T>: Send + Sync {
    async fn execute(&self, task: T) -> UploadResult<()>;
}

/// Number of tasks each worker executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolReport {
    pub executed: Vec<usize>,
}

impl PoolReport {
    pub fn total(&self) -> usize {
        self.executed.iter().sum()
    }

    /// Workers that found the queue already drained.
    pub fn idle_workers(&self) -> usize {
        self.executed.iter().filter(|n| **n == 0).count()
    }
}

/// # Worker pool
///
/// Drains a shared queue with a fixed number of workers, fail-fast.
///
/// The first failing task clears the queue and its error is returned. Workers
/// still executing a task at that moment are detached, neither awaited nor
/// aborted, so their calls can complete after the caller already reacted to
/// the failure.
#[derive(TypedBuilder)]
pub struct WorkerPool {
    #[builder(default = DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

impl WorkerPool {
    pub async fn run<T>(
        &self,
        queue: TaskQueue<T>,
        executor: Arc<dyn TaskExecutor<T>>,
    ) -> UploadResult<PoolReport>
    where
        T: Send + 'static,
    {
        let workers = self.concurrency.max(1);
        if queue.is_empty() {
            return Ok(PoolReport {
                executed: vec![0; workers],
            });
        }

        let mut handles = (0..workers)
            .map(|worker| {
                let queue = queue.clone();
                let executor = executor.clone();
                tokio::spawn(
                    async move { (worker, work(queue, executor).await) }
                        .instrument(tracing::debug_span!("upload_worker", worker)),
                )
            })
            .collect::<FuturesUnordered<_>>();

        let mut executed = vec![0; workers];
        while let Some(joined) = handles.next().await {
            match joined {
                Ok((worker, Ok(count))) => executed[worker] = count,
                Ok((worker, Err(e))) => {
                    queue.clear();
                    tracing::debug!(worker, "Worker failed, remaining tasks discarded.");
                    return Err(e);
                }
                Err(e) => {
                    queue.clear();
                    return Err(anyhow::Error::new(e).context("upload worker panicked").into());
                }
            }
        }
        Ok(PoolReport { executed })
    }
}

async fn work<T>(queue: TaskQueue<T>, executor: Arc<dyn TaskExecutor<T>>) -> UploadResult<usize> {
    let mut executed = 0;
    while let Some(task) = queue.pop() {
        if let Err(e) = executor.execute(task).await {
            queue.clear();
            return Err(e);
        }
        executed += 1;
    }
    tracing::trace!(executed, "Queue drained.");
    Ok(executed)
}
