//! Cancellable scheduled tasks owned by a store.
//!
//! Every delayed side effect a store creates (notification fan-out, auto-hide,
//! debounced saves) goes through an explicit handle collection so one
//! `cancel_all` call can guarantee nothing fires after a reset.

use std::future::Future;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// A collection of pending scheduled tasks with a single cancel-all operation.
#[derive(Debug, Default)]
pub struct TimerSet {
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl TimerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`, retaining the handle for cancellation.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        self.tasks.lock().push(handle);
    }

    /// Abort every pending task and clear the set.
    pub fn cancel_all(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }

    /// Wait for every scheduled task to finish or be aborted.
    pub async fn wait_idle(&self) {
        let tasks: Vec<JoinHandle<()>> = self.tasks.lock().drain(..).collect();
        // Aborted tasks surface as JoinError, which is fine here.
        let _ = futures::future::join_all(tasks).await;
    }

    /// Number of retained task handles.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}
