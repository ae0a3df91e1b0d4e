//! Bounded fan-out of independent shard writes with a join barrier.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::WriterError;

/// Upper bound on shard writes in flight at once.
pub const MAX_IN_FLIGHT_WRITES: usize = 64;

/// A set of sibling tasks. Each task holds a permit while it runs, so no more
/// than [`MAX_IN_FLIGHT_WRITES`] touch the filesystem concurrently.
pub(crate) struct FanOut<T> {
    set: JoinSet<Result<T, WriterError>>,
    permits: Arc<Semaphore>,
}

impl<T: Send + 'static> FanOut<T> {
    pub(crate) fn new() -> Self {
        Self {
            set: JoinSet::new(),
            permits: Arc::new(Semaphore::new(MAX_IN_FLIGHT_WRITES)),
        }
    }

    pub(crate) fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Result<T, WriterError>> + Send + 'static,
    {
        let permits = Arc::clone(&self.permits);
        self.set.spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| WriterError::Task(e.to_string()))?;
            task.await
        });
    }

    /// Wait for every task. The first failure aborts all remaining siblings
    /// and is returned. Results come back in completion order.
    pub(crate) async fn join(mut self) -> Result<Vec<T>, WriterError> {
        let mut results = Vec::with_capacity(self.set.len());
        while let Some(joined) = self.set.join_next().await {
            let outcome = joined.map_err(|e| WriterError::Task(e.to_string()));
            match outcome.and_then(|result| result) {
                Ok(value) => results.push(value),
                Err(error) => {
                    self.set.abort_all();
                    tracing::debug!(%error, "aborting sibling tasks after failure");
                    return Err(error);
                }
            }
        }
        Ok(results)
    }
}
