use crate::state::PauseSignal;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Snapshot of the scheduler for control surfaces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulerStatus {
    pub paused: bool,
    pub active_keyword: Option<String>,
    pub queue_size: usize,
}

#[derive(Debug, Default)]
struct SchedulerInner {
    queue: VecDeque<String>,
    active: Option<String>,
    last_completed: Option<String>,
}

/// Keyword queue, active slot and pause flag shared by the scheduler loop
/// and its controllers
///
/// The queue and the active slot are guarded by one lock, so a switch can
/// never interleave with a dequeue. The pause flag lives outside the lock and
/// can be flipped while a cycle holds nothing.
#[derive(Debug, Clone, Default)]
pub struct SchedulerState {
    inner: Arc<Mutex<SchedulerInner>>,
    pause: PauseSignal,
}

impl SchedulerState {
    /// Creates an idle state: empty queue, no active keyword, not paused
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `keyword` to the queue
    ///
    /// Blank keywords are ignored; returns whether the keyword was queued.
    pub async fn add_keyword(&self, keyword: &str) -> bool {
        let Some(keyword) = clean_keyword(keyword) else {
            return false;
        };
        self.inner.lock().await.queue.push_back(keyword);
        true
    }

    /// Puts `keyword` at the head of the queue and clears the active slot
    ///
    /// The running cycle finishes its crawl call; the next dequeue returns
    /// `keyword`.
    pub async fn switch_keyword(&self, keyword: &str) -> bool {
        let Some(keyword) = clean_keyword(keyword) else {
            return false;
        };
        let mut inner = self.inner.lock().await;
        inner.queue.push_front(keyword);
        inner.active = None;
        true
    }

    pub fn pause(&self) {
        self.pause.pause();
    }

    pub fn resume(&self) {
        self.pause.resume();
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Handle to the pause flag, for the crawl engine
    pub fn pause_signal(&self) -> PauseSignal {
        self.pause.clone()
    }

    pub async fn status(&self) -> SchedulerStatus {
        let inner = self.inner.lock().await;
        SchedulerStatus {
            paused: self.pause.is_paused(),
            active_keyword: inner.active.clone(),
            queue_size: inner.queue.len(),
        }
    }

    /// Dequeues the next keyword and makes it active
    ///
    /// Returns None if a keyword is already active or the queue is empty.
    pub async fn activate_next(&self) -> Option<String> {
        let mut inner = self.inner.lock().await;
        if inner.active.is_some() {
            return None;
        }
        let keyword = inner.queue.pop_front()?;
        inner.active = Some(keyword.clone());
        Some(keyword)
    }

    /// Ends the cycle for `keyword`: clears the active slot and remembers it
    /// as the last completed keyword
    pub async fn finish_cycle(&self, keyword: &str) {
        let mut inner = self.inner.lock().await;
        inner.active = None;
        inner.last_completed = Some(keyword.to_string());
    }

    /// Re-queues the last completed keyword if nothing else is pending
    ///
    /// Only acts when no keyword is active, the queue is empty and the
    /// scheduler is not paused. Returns the re-queued keyword.
    pub async fn requeue_last_if_idle(&self) -> Option<String> {
        if self.pause.is_paused() {
            return None;
        }
        let mut inner = self.inner.lock().await;
        if inner.active.is_some() || !inner.queue.is_empty() {
            return None;
        }
        let keyword = inner.last_completed.clone()?;
        inner.queue.push_back(keyword.clone());
        Some(keyword)
    }
}

fn clean_keyword(keyword: &str) -> Option<String> {
    let trimmed = keyword.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
