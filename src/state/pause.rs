use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cooperative pause flag
///
/// Cloning yields a handle to the same flag. The crawl engine waits on it
/// before starting a fetch and checks it before each record. The scheduler
/// keeps the active keyword while it is set.
#[derive(Debug, Clone, Default)]
pub struct PauseSignal(Arc<AtomicBool>);

impl PauseSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pause(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    pub fn is_paused(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sleeps in `poll` steps until the flag is cleared
    pub async fn wait_while_paused(&self, poll: Duration) {
        while self.is_paused() {
            tokio::time::sleep(poll).await;
        }
    }
}
