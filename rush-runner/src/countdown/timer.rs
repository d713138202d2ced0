//! The single periodic countdown task.

use std::future::Future;

use tokio::task::JoinHandle;

/// Owner of the one active countdown task.
///
/// Starting a new task always stops the previous one first, so two
/// countdowns can never tick concurrently.
#[derive(Debug, Default)]
pub struct CountdownTimer {
    handle: Option<JoinHandle<()>>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the current task (if any) and spawn `task` in its place.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn restart<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.stop();
        self.handle = Some(tokio::spawn(task));
    }

    /// Cancel the current task.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Returns true while a task is spawned and has not finished.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
