use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::future::BoxFuture;
use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};

pub type Action = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

#[derive(Default)]
struct Pending {
    generation: u64,
    task: Option<JoinHandle<()>>,
}

/// Trailing debounce: the action runs once, `window` after the last
/// `on_change` of a burst. Must be used inside a tokio runtime.
pub struct Debouncer {
    window: Duration,
    action: Action,
    pending: Arc<Mutex<Pending>>,
}

impl Debouncer {
    pub fn new(window: Duration, action: Action) -> Self {
        Debouncer {
            window,
            action,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    /// Cancels any scheduled run and schedules a new one a full window from now.
    pub fn on_change(&self) {
        let deadline = Instant::now() + self.window;
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        pending.generation += 1;
        if let Some(task) = pending.task.take() {
            task.abort();
        }

        let generation = pending.generation;
        let shared = Arc::clone(&self.pending);
        let action = Arc::clone(&self.action);
        pending.task = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            {
                let mut pending = shared.lock().unwrap_or_else(|e| e.into_inner());
                if pending.generation != generation {
                    return;
                }
                // Past this point the run can no longer be cancelled.
                pending.task = None;
            }
            debug!("Debounce window elapsed, running action");
            action().await;
        }));
    }

    /// Runs a scheduled action right away instead of waiting for the window.
    /// Returns false when nothing was scheduled.
    pub async fn flush(&self) -> bool {
        let task = {
            let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            pending.generation += 1;
            pending.task.take()
        };
        match task {
            Some(task) => {
                task.abort();
                (self.action)().await;
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .map(|pending| pending.task.is_some())
            .unwrap_or(false)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some(task) = pending.task.take() {
                task.abort();
            }
        }
    }
}
