use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Run `future` but hold its result until at least `min` has elapsed.
///
/// Both start together, so the minimum delays the loading-to-done transition,
/// never the request itself. Used to keep the loader visible long enough to
/// avoid flicker on fast networks.
pub async fn with_minimum_duration<F, T>(future: F, min: Duration) -> T
where
    F: Future<Output = T>,
{
    let (value, _) = tokio::join!(future, sleep(min));
    value
}

/// Trailing-edge debounce: each `schedule` call cancels the previous pending
/// task, so only the last call in a burst actually runs after the quiet
/// period.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
