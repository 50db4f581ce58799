use crate::orchestrator::FetchOrchestrator;
use crate::store::{ApplyOutcome, CycleOrigin, ViewStateStore};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, info, warn};

enum Lifecycle {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

/// Drives refresh cycles from a fixed-period timer and from manual triggers.
///
/// Both paths feed the same apply step on the [`ViewStateStore`]. A manual
/// trigger never shifts the timer's phase. Stopping is final: the timer is
/// cancelled, in-flight network calls are left to finish, and their results
/// are dropped.
pub struct RefreshScheduler {
    orchestrator: Arc<FetchOrchestrator>,
    store: ViewStateStore,
    period: Duration,
    lifecycle: Mutex<Lifecycle>,
}

impl RefreshScheduler {
    /// A zero period is raised to one millisecond.
    pub fn new(
        orchestrator: Arc<FetchOrchestrator>,
        store: ViewStateStore,
        period: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            orchestrator,
            store,
            period: period.max(Duration::from_millis(1)),
            lifecycle: Mutex::new(Lifecycle::Idle),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs one cycle right away, then one per period. Must be called within a tokio runtime.
    pub fn start(self: &Arc<Self>) {
        let mut lifecycle = self.lifecycle();
        match *lifecycle {
            Lifecycle::Running(_) => {
                warn!("refresh scheduler already running");
                return;
            }
            Lifecycle::Stopped => {
                warn!("refresh scheduler was stopped; not restarting");
                return;
            }
            Lifecycle::Idle => {}
        }

        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut tick = interval(this.period);
            loop {
                tick.tick().await;
                // Each tick gets its own task so a slow cycle never delays the next tick.
                let cycle = Arc::clone(&this);
                tokio::spawn(async move {
                    cycle.run_and_apply(CycleOrigin::Timer).await;
                });
            }
        });
        *lifecycle = Lifecycle::Running(handle);
        info!("refresh scheduler started; period={:?}", self.period);
    }

    /// Out-of-band refresh. Does not wait for or cancel a timer cycle in flight.
    pub async fn trigger_now(&self) -> ApplyOutcome {
        self.run_and_apply(CycleOrigin::Manual).await
    }

    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        if let Lifecycle::Running(handle) = &*lifecycle {
            handle.abort();
        }
        *lifecycle = Lifecycle::Stopped;
        info!("refresh scheduler stopped");
    }

    pub fn is_stopped(&self) -> bool {
        matches!(*self.lifecycle(), Lifecycle::Stopped)
    }

    async fn run_and_apply(&self, origin: CycleOrigin) -> ApplyOutcome {
        if self.is_stopped() {
            return ApplyOutcome::Stopped;
        }
        let ticket = self.store.begin_cycle(origin);
        let result = self.orchestrator.run_cycle().await;
        if self.is_stopped() {
            debug!("cycle {} settled after stop; dropping result", ticket.seq);
            return ApplyOutcome::Stopped;
        }
        self.store.apply(ticket, result)
    }

    fn lifecycle(&self) -> std::sync::MutexGuard<'_, Lifecycle> {
        self.lifecycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
