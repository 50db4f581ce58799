use crate::error::{TransportError, WorkflowTriggerError};
use crate::transport::Transport;
use riskdesk_core::{
    now_ms, EpochMs, RunMode, WorkflowTriggerRequest, WorkflowTriggerResponse, MAX_RISK_THRESHOLD,
};
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

const TRIGGER_PATH: &str = "/workflows/trigger";

/// Outcome of a triggered analysis run, held only long enough to report it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowExecution {
    pub execution_id: String,
    pub status: String,
    pub message: String,
    pub requested_at: EpochMs,
    /// Timestamp as reported by the backend.
    pub server_timestamp: String,
}

/// Fires one-shot analysis runs. Tracks its own in-flight flag, separate
/// from the view-state.
pub struct WorkflowTrigger {
    transport: Arc<dyn Transport>,
    in_flight: AtomicBool,
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl WorkflowTrigger {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Marks the trigger in flight immediately; the flag clears when the
    /// returned future settles or is dropped, whatever the outcome.
    ///
    /// Rejecting a second call while one is in flight is up to the caller.
    pub fn trigger(
        &self,
        run_mode: RunMode,
        risk_threshold: u32,
        send_notifications: bool,
    ) -> impl Future<Output = Result<WorkflowExecution, WorkflowTriggerError>> + Send + '_ {
        self.in_flight.store(true, Ordering::SeqCst);
        self.run(
            InFlightGuard(&self.in_flight),
            WorkflowTriggerRequest {
                run_mode,
                risk_threshold,
                send_notifications,
            },
        )
    }

    /// Like [`trigger`](Self::trigger), but claims the flag atomically and
    /// returns `None` when another request already holds it.
    pub fn try_trigger(
        &self,
        run_mode: RunMode,
        risk_threshold: u32,
        send_notifications: bool,
    ) -> Option<impl Future<Output = Result<WorkflowExecution, WorkflowTriggerError>> + Send + '_>
    {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        Some(self.run(
            InFlightGuard(&self.in_flight),
            WorkflowTriggerRequest {
                run_mode,
                risk_threshold,
                send_notifications,
            },
        ))
    }

    fn run<'a>(
        &'a self,
        guard: InFlightGuard<'a>,
        request: WorkflowTriggerRequest,
    ) -> impl Future<Output = Result<WorkflowExecution, WorkflowTriggerError>> + Send + 'a {
        async move {
            let _guard = guard;
            let res = self.send(&request).await;
            match &res {
                Ok(exec) => info!(
                    "workflow triggered: execution_id={} status={}",
                    exec.execution_id, exec.status
                ),
                Err(e) => warn!("workflow trigger failed: {e}"),
            }
            res
        }
    }

    async fn send(
        &self,
        request: &WorkflowTriggerRequest,
    ) -> Result<WorkflowExecution, WorkflowTriggerError> {
        if request.risk_threshold > MAX_RISK_THRESHOLD {
            return Err(WorkflowTriggerError::InvalidThreshold(request.risk_threshold));
        }

        let requested_at = now_ms();
        let body = serde_json::json!(request);
        let resp = self.transport.post_json(TRIGGER_PATH, &body).await?;
        let resp: WorkflowTriggerResponse =
            serde_json::from_value(resp).map_err(|e| TransportError::decode(TRIGGER_PATH, e))?;

        if resp.is_rejected() {
            return Err(WorkflowTriggerError::Rejected {
                message: resp.message,
            });
        }

        Ok(WorkflowExecution {
            execution_id: resp.execution_id,
            status: resp.status,
            message: resp.message,
            requested_at,
            server_timestamp: resp.timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::InMemoryTransport;
    use serde_json::json;
    use std::time::Duration;

    fn accepted() -> serde_json::Value {
        json!({
            "execution_id": "exec-42",
            "status": "TRIGGERED",
            "message": "Workflow finance-ai-orchestrator triggered successfully",
            "timestamp": "2025-12-10T09:30:00"
        })
    }

    #[tokio::test(start_paused = true)]
    async fn flag_cleared_after_success() {
        let t = Arc::new(InMemoryTransport::new());
        t.respond(TRIGGER_PATH, accepted());
        t.delay(TRIGGER_PATH, Duration::from_secs(2));
        let trig = WorkflowTrigger::new(t.clone());

        let fut = trig.trigger(RunMode::Full, 70, true);
        assert!(trig.in_flight());
        let exec = fut.await.unwrap();
        assert!(!trig.in_flight());
        assert_eq!(exec.execution_id, "exec-42");
        assert_eq!(exec.status, "TRIGGERED");

        let posted = t.posted();
        assert_eq!(
            posted[0].1,
            json!({"run_mode": "full", "risk_threshold": 70, "send_notifications": true})
        );
    }

    #[tokio::test]
    async fn flag_cleared_after_transport_failure() {
        let t = Arc::new(InMemoryTransport::new());
        t.fail(
            TRIGGER_PATH,
            TransportError::Status {
                path: TRIGGER_PATH.into(),
                status: 500,
            },
        );
        let trig = WorkflowTrigger::new(t);

        let fut = trig.trigger(RunMode::TreasuryOnly, 70, false);
        assert!(trig.in_flight());
        let err = fut.await.unwrap_err();
        assert!(!trig.in_flight());
        assert!(matches!(err, WorkflowTriggerError::Transport(_)));
    }

    #[tokio::test]
    async fn flag_cleared_after_rejection_and_bad_threshold() {
        let t = Arc::new(InMemoryTransport::new());
        t.respond(
            TRIGGER_PATH,
            json!({
                "execution_id": "",
                "status": "FAILED",
                "message": "Failed to trigger workflow: engine down",
                "timestamp": "2025-12-10T09:30:00"
            }),
        );
        let trig = WorkflowTrigger::new(t.clone());

        let err = trig.trigger(RunMode::Full, 70, true).await.unwrap_err();
        assert_eq!(
            err,
            WorkflowTriggerError::Rejected {
                message: "Failed to trigger workflow: engine down".into()
            }
        );
        assert!(!trig.in_flight());

        let err = trig.trigger(RunMode::Full, 101, true).await.unwrap_err();
        assert_eq!(err, WorkflowTriggerError::InvalidThreshold(101));
        assert!(!trig.in_flight());
        assert_eq!(t.posted().len(), 1, "invalid threshold never sent");
    }

    #[test]
    fn dropping_unpolled_future_clears_flag() {
        let trig = WorkflowTrigger::new(Arc::new(InMemoryTransport::new()));
        let fut = trig.trigger(RunMode::Full, 70, true);
        assert!(trig.in_flight());
        drop(fut);
        assert!(!trig.in_flight());
    }

    #[tokio::test]
    async fn try_trigger_claims_flag_once() {
        let t = Arc::new(InMemoryTransport::new());
        t.respond(TRIGGER_PATH, accepted());
        let trig = WorkflowTrigger::new(t.clone());

        let held = trig.try_trigger(RunMode::Full, 70, true).unwrap();
        assert!(trig.in_flight());
        assert!(trig.try_trigger(RunMode::Full, 70, true).is_none());
        assert!(trig.in_flight(), "refused claim leaves the holder's flag set");

        let exec = held.await.unwrap();
        assert_eq!(exec.execution_id, "exec-42");
        assert!(!trig.in_flight());
        assert!(trig.try_trigger(RunMode::Full, 70, true).is_some());
        assert_eq!(t.posted().len(), 1);
    }
}
