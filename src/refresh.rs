// src/refresh.rs
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

use crate::app::AppEvent;

/// Where the refresh loop currently stands. A cycle always moves
/// Fetching -> Displaying; what follows depends on the auto-refresh toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Fetching,
    Displaying,
    Waiting,
    /// Auto-refresh is off and the single cycle has run; no further fetches
    /// happen unless the user asks for one.
    Terminated,
}

impl CyclePhase {
    pub fn after_display(auto_refresh: bool) -> CyclePhase {
        if auto_refresh {
            CyclePhase::Waiting
        } else {
            CyclePhase::Terminated
        }
    }
}

/// One-shot timer behind auto-refresh: arming spawns a task that fires an
/// [`AppEvent::RefreshDue`] after the interval, and a pending wait can be
/// cancelled at any time (toggling auto-refresh off, starting a manual
/// cycle).
#[derive(Debug, Default)]
pub struct Scheduler {
    handle: Option<JoinHandle<()>>,
    deadline: Option<Instant>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, tx: UnboundedSender<AppEvent>, interval: Duration) {
        self.cancel();
        debug!(seconds = interval.as_secs(), "arming refresh timer");
        self.deadline = Some(Instant::now() + interval);
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(interval).await;
            let _ = tx.send(AppEvent::RefreshDue);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.deadline = None;
    }

    #[allow(dead_code)]
    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn seconds_remaining(&self) -> Option<u64> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()).as_secs())
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn display_leads_to_waiting_only_with_auto_refresh() {
        assert_eq!(CyclePhase::after_display(true), CyclePhase::Waiting);
        assert_eq!(CyclePhase::after_display(false), CyclePhase::Terminated);
    }

    #[tokio::test(start_paused = true)]
    async fn armed_timer_fires_after_the_interval() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        scheduler.arm(tx, Duration::from_secs(300));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(rx.try_recv().is_err());

        // recv auto-advances paused time past the deadline
        let event = rx.recv().await;
        assert!(matches!(event, Some(AppEvent::RefreshDue)));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_a_pending_wait() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        scheduler.arm(tx, Duration::from_secs(300));
        scheduler.cancel();
        assert!(!scheduler.is_armed());

        tokio::time::advance(Duration::from_secs(600)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn rearming_replaces_the_previous_wait() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        scheduler.arm(tx.clone(), Duration::from_secs(300));
        scheduler.arm(tx, Duration::from_secs(300));

        let _ = rx.recv().await;
        tokio::time::advance(Duration::from_secs(600)).await;
        // the first timer was aborted, so only one event ever arrives
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_reports_time_until_the_deadline() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut scheduler = Scheduler::new();
        assert_eq!(scheduler.seconds_remaining(), None);

        scheduler.arm(tx, Duration::from_secs(300));
        tokio::time::advance(Duration::from_secs(100)).await;
        assert_eq!(scheduler.seconds_remaining(), Some(200));
    }
}
