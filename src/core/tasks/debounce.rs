use std::{
    future::Future,
    time::Duration,
};

use tokio::{
    runtime::Handle,
    task::JoinHandle,
};
use tracing::warn;

/// Trailing debounce: each `schedule` cancels the pending action, so only the
/// last one within the quiet interval runs.
///
/// Actions run on the runtime that was current when the debouncer was built,
/// or failing that, the one current at `schedule` time.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    runtime: Option<Handle>,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, runtime: Handle::try_current().ok(), pending: None }
    }

    /// Returns false, dropping the action, when no tokio runtime is reachable.
    pub fn schedule<F>(&mut self, action: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();

        let Some(runtime) = self.runtime.clone().or_else(|| Handle::try_current().ok()) else {
            warn!("No tokio runtime available, debounced action dropped");
            return false;
        };

        let delay = self.delay;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
        true
    }

    /// Returns true if an action was still waiting to run.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        Mutex,
    };

    use super::*;

    fn record(calls: &Arc<Mutex<Vec<u32>>>, value: u32) -> impl Future<Output = ()> + Send + 'static {
        let calls = calls.clone();
        async move { calls.lock().unwrap().push(value) }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_action_runs() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record(&calls, 1));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&calls, 2));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&calls, 3));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*calls.lock().unwrap(), vec![3]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_spaced_actions_all_run() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record(&calls, 1));
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.schedule(record(&calls, 2));
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(*calls.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_schedule_outside_runtime_is_dropped() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        assert!(!debouncer.schedule(record(&calls, 1)));
        assert!(!debouncer.is_pending());
        assert!(!debouncer.cancel());
    }

    #[test]
    fn test_runtime_captured_at_construction_is_used() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = runtime.block_on(async { Debouncer::new(Duration::from_millis(10)) });

        assert!(debouncer.schedule(record(&calls, 7)));
        runtime.block_on(async { tokio::time::sleep(Duration::from_millis(50)).await });
        assert_eq!(*calls.lock().unwrap(), vec![7]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        debouncer.schedule(record(&calls, 1));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(calls.lock().unwrap().is_empty());
    }
}
