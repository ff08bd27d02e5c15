// Cancellable delayed tasks on the tokio runtime.
// Dropping a ScheduledTask cancels it, so a callback can never outlive the
// view that scheduled it.

use log::debug;
use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct ScheduledTask {
    label: String,
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Runs `f` once after `delay`. Must be called from within a tokio runtime.
    pub fn after<F>(label: &str, delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::spawn(label, async move {
            tokio::time::sleep(delay).await;
            f();
        })
    }

    /// Runs `tick` every `period` until cancelled. The first tick fires
    /// immediately.
    pub fn every<F>(label: &str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self::spawn(label, async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                tick();
            }
        })
    }

    fn spawn<Fut>(label: &str, fut: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        debug!("[Scheduler] Scheduling '{}'", label);
        Self {
            label: label.to_string(),
            handle: tokio::spawn(fut),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            debug!("[Scheduler] Cancelling '{}'", self.label);
            self.handle.abort();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let task = ScheduledTask::after("ping", Duration::from_secs(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(1_999)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let task = ScheduledTask::after("ping", Duration::from_secs(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        task.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        drop(ScheduledTask::after("ping", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn every_ticks_until_cancelled() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let task = ScheduledTask::every("clock", Duration::from_secs(1), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        // Immediate tick plus ticks at 1s and 2s.
        assert_eq!(hits.load(Ordering::SeqCst), 3);

        task.cancel();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
