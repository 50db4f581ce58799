use crate::error::CycleFailure;
use riskdesk_core::{ActiveTab, AppViewState, CompleteSnapshot, EpochMs};
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOrigin {
    Timer,
    Manual,
}

/// Issued when a cycle starts; redeemed at most once by [`ViewStateStore::apply`].
///
/// A ticket dropped without being applied (the cycle future was cancelled,
/// or the scheduler stopped first) is still removed from the outstanding
/// count, and `is_loading` follows.
pub struct CycleTicket {
    pub seq: u64,
    pub origin: CycleOrigin,
    inner: Arc<StoreInner>,
    redeemed: bool,
}

impl fmt::Debug for CycleTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CycleTicket")
            .field("seq", &self.seq)
            .field("origin", &self.origin)
            .field("redeemed", &self.redeemed)
            .finish()
    }
}

impl Drop for CycleTicket {
    fn drop(&mut self) {
        if self.redeemed {
            return;
        }
        let mut book = self.inner.book();
        book.outstanding = book.outstanding.saturating_sub(1);
        let outstanding = book.outstanding;
        let still_loading = outstanding > 0;
        self.inner.state.send_if_modified(|s| {
            if s.is_loading == still_loading {
                return false;
            }
            s.is_loading = still_loading;
            true
        });
        debug!(
            "cycle {} ({:?}) abandoned before apply; outstanding={outstanding}",
            self.seq, self.origin
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Committed { seq: u64, completed_at: EpochMs },
    Failed { seq: u64, reason: String },
    /// A newer cycle was already applied; this result was dropped.
    Discarded { seq: u64, applied_seq: u64 },
    /// The scheduler was stopped before the result arrived.
    Stopped,
}

/// Holds the committed five-domain view and the refresh flags.
///
/// Cycle results enter only through [`apply`](Self::apply), which is
/// serialized. Results are sequence-stamped at [`begin_cycle`](Self::begin_cycle)
/// and applied only when newer than the last applied one, so overlapping
/// timer and manual cycles resolve to the most recently started result.
#[derive(Clone)]
pub struct ViewStateStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    state: watch::Sender<AppViewState>,
    cycles: Mutex<CycleBook>,
}

#[derive(Default)]
struct CycleBook {
    issued: u64,
    outstanding: usize,
}

impl StoreInner {
    fn book(&self) -> std::sync::MutexGuard<'_, CycleBook> {
        self.cycles
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ViewStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewStateStore {
    pub fn new() -> Self {
        Self::with_state(AppViewState::default())
    }

    /// Starts from a given state, e.g. a previously known-good snapshot.
    pub fn with_state(state: AppViewState) -> Self {
        let issued = state.applied_seq;
        Self {
            inner: Arc::new(StoreInner {
                state: watch::Sender::new(state),
                cycles: Mutex::new(CycleBook {
                    issued,
                    outstanding: 0,
                }),
            }),
        }
    }

    pub fn snapshot(&self) -> AppViewState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppViewState> {
        self.inner.state.subscribe()
    }

    pub fn select_tab(&self, tab: ActiveTab) {
        self.inner.state.send_if_modified(|s| {
            if s.active_tab == tab {
                return false;
            }
            s.active_tab = tab;
            true
        });
    }

    pub fn begin_cycle(&self, origin: CycleOrigin) -> CycleTicket {
        let mut book = self.inner.book();
        book.issued += 1;
        book.outstanding += 1;
        let seq = book.issued;
        self.inner.state.send_modify(|s| s.is_loading = true);
        debug!("cycle {seq} ({origin:?}) started; outstanding={}", book.outstanding);
        CycleTicket {
            seq,
            origin,
            inner: Arc::clone(&self.inner),
            redeemed: false,
        }
    }

    pub fn apply(
        &self,
        mut ticket: CycleTicket,
        result: Result<CompleteSnapshot, CycleFailure>,
    ) -> ApplyOutcome {
        ticket.redeemed = true;
        let mut book = self.inner.book();
        book.outstanding = book.outstanding.saturating_sub(1);
        let still_loading = book.outstanding > 0;
        let seq = ticket.seq;

        let mut outcome = ApplyOutcome::Stopped;
        self.inner.state.send_modify(|s| {
            s.is_loading = still_loading;
            if seq <= s.applied_seq {
                outcome = ApplyOutcome::Discarded {
                    seq,
                    applied_seq: s.applied_seq,
                };
                return;
            }
            s.applied_seq = seq;
            outcome = match result {
                Ok(snapshot) => {
                    let completed_at = snapshot.completed_at;
                    s.commit(snapshot);
                    ApplyOutcome::Committed { seq, completed_at }
                }
                Err(failure) => {
                    s.last_error = Some(failure.reason.clone());
                    ApplyOutcome::Failed {
                        seq,
                        reason: failure.reason,
                    }
                }
            };
        });

        match &outcome {
            ApplyOutcome::Committed { seq, completed_at } => {
                info!("cycle {seq} ({:?}) committed at {completed_at}", ticket.origin)
            }
            ApplyOutcome::Failed { seq, reason } => {
                warn!("cycle {seq} ({:?}) failed: {reason}", ticket.origin)
            }
            ApplyOutcome::Discarded { seq, applied_seq } => {
                info!("cycle {seq} result discarded; cycle {applied_seq} already applied")
            }
            ApplyOutcome::Stopped => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::orchestrator::FetchOrchestrator;
    use std::sync::Arc;

    async fn snapshot_with(score: f64) -> CompleteSnapshot {
        let t = Arc::new(fixtures::healthy_transport(score));
        FetchOrchestrator::new(t).run_cycle().await.unwrap()
    }

    #[tokio::test]
    async fn success_commits_everything_together() {
        let store = ViewStateStore::new();
        let ticket = store.begin_cycle(CycleOrigin::Timer);
        assert!(store.snapshot().is_loading);

        let snap = snapshot_with(40.0).await;
        let completed_at = snap.completed_at;
        let outcome = store.apply(ticket, Ok(snap));
        assert_eq!(outcome, ApplyOutcome::Committed { seq: 1, completed_at });

        let s = store.snapshot();
        assert!(!s.is_loading);
        assert_eq!(s.last_error, None);
        assert_eq!(s.last_update, Some(completed_at));
        assert!(s.dashboard.is_some() && s.treasury.is_some() && s.portfolio.is_some());
        assert!(s.compliance.is_some() && s.market.is_some());
    }

    #[tokio::test]
    async fn failure_preserves_prior_snapshot() {
        let store = ViewStateStore::new();
        let t = store.begin_cycle(CycleOrigin::Timer);
        store.apply(t, Ok(snapshot_with(40.0).await));
        let before = store.snapshot();

        let t = store.begin_cycle(CycleOrigin::Manual);
        let outcome = store.apply(t, Err(CycleFailure::new("boom")));
        assert_eq!(
            outcome,
            ApplyOutcome::Failed {
                seq: 2,
                reason: "boom".into()
            }
        );

        let after = store.snapshot();
        assert_eq!(after.dashboard, before.dashboard);
        assert_eq!(after.treasury, before.treasury);
        assert_eq!(after.portfolio, before.portfolio);
        assert_eq!(after.compliance, before.compliance);
        assert_eq!(after.market, before.market);
        assert_eq!(after.last_update, before.last_update);
        assert_eq!(after.last_error.as_deref(), Some("boom"));
        assert!(!after.is_loading);
    }

    #[test]
    fn first_failure_leaves_fields_absent() {
        let store = ViewStateStore::new();
        let t = store.begin_cycle(CycleOrigin::Timer);
        store.apply(t, Err(CycleFailure::new("no backend")));
        let s = store.snapshot();
        assert!(s.dashboard.is_none());
        assert!(s.treasury.is_none());
        assert!(s.portfolio.is_none());
        assert!(s.compliance.is_none());
        assert!(s.market.is_none());
        assert_eq!(s.last_update, None);
        assert_eq!(
            s.phase(),
            riskdesk_core::ViewPhase::Unavailable {
                error: "no backend".into()
            }
        );
    }

    #[tokio::test]
    async fn older_result_is_discarded() {
        let store = ViewStateStore::new();
        let older = store.begin_cycle(CycleOrigin::Timer);
        let newer = store.begin_cycle(CycleOrigin::Manual);

        store.apply(newer, Ok(snapshot_with(90.0).await));
        assert!(store.snapshot().is_loading, "older cycle still outstanding");

        let outcome = store.apply(older, Ok(snapshot_with(10.0).await));
        assert_eq!(
            outcome,
            ApplyOutcome::Discarded {
                seq: 1,
                applied_seq: 2
            }
        );
        let s = store.snapshot();
        assert!(!s.is_loading);
        assert_eq!(s.dashboard.unwrap().payload.overall_risk_score, 90.0);
    }

    #[tokio::test]
    async fn older_failure_does_not_mask_newer_success() {
        let store = ViewStateStore::new();
        let older = store.begin_cycle(CycleOrigin::Timer);
        let newer = store.begin_cycle(CycleOrigin::Manual);
        store.apply(newer, Ok(snapshot_with(30.0).await));
        store.apply(older, Err(CycleFailure::new("late timeout")));
        assert_eq!(store.snapshot().last_error, None);
    }

    #[test]
    fn abandoned_ticket_releases_loading_flag() {
        let store = ViewStateStore::new();
        let first = store.begin_cycle(CycleOrigin::Timer);
        let second = store.begin_cycle(CycleOrigin::Manual);
        drop(second);
        assert!(store.snapshot().is_loading, "first cycle still outstanding");
        drop(first);
        let s = store.snapshot();
        assert!(!s.is_loading);
        assert_eq!(s.applied_seq, 0);
        assert_eq!(s.phase(), riskdesk_core::ViewPhase::InitialLoading);

        let t = store.begin_cycle(CycleOrigin::Manual);
        assert_eq!(t.seq, 3);
        store.apply(t, Err(CycleFailure::new("down")));
        assert!(!store.snapshot().is_loading);
    }

    #[test]
    fn select_tab_leaves_data_alone() {
        let store = ViewStateStore::new();
        let mut rx = store.subscribe();
        rx.borrow_and_update();
        store.select_tab(ActiveTab::Dashboard);
        assert!(!rx.has_changed().unwrap());
        store.select_tab(ActiveTab::Market);
        assert!(rx.has_changed().unwrap());
        let s = store.snapshot();
        assert_eq!(s.active_tab, ActiveTab::Market);
        assert!(s.is_loading);
        assert_eq!(s.applied_seq, 0);
    }
}
