use std::thread;

/// Handle to one background task.
///
/// Background execution is fire-and-forget: the session loop never joins or
/// cancels a task, and dropping the handle simply detaches the underlying
/// thread. A task may still be writing output after the session has begun
/// shutting down; that is accepted behavior. `join` exists for callers (and
/// tests) that do want to wait.
pub struct TaskHandle {
    inner: thread::JoinHandle<()>,
}

impl TaskHandle {
    /// Block until the task finishes. A panicked task is swallowed; the
    /// shell has nothing useful to do with it.
    pub fn join(self) {
        let _ = self.inner.join();
    }
}

/// Spawn a background task running `f` to completion.
pub fn spawn<F>(f: F) -> TaskHandle
where
    F: FnOnce() + Send + 'static,
{
    TaskHandle {
        inner: thread::spawn(f),
    }
}

#[cfg(test)]
mod tests {
    use super::spawn;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn spawned_task_runs_to_completion() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        spawn(move || flag.store(true, Ordering::SeqCst)).join();
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn dropping_the_handle_detaches_the_task() {
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        let _ = spawn(move || flag.store(true, Ordering::SeqCst));
        // Bounded wait: the task keeps running without its handle.
        for _ in 0..100 {
            if done.load(Ordering::SeqCst) {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("detached task never ran");
    }
}
