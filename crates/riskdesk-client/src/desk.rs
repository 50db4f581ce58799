use crate::client::check_health;
use crate::config::ClientConfig;
use crate::error::{TransportError, WorkflowTriggerError};
use crate::orchestrator::FetchOrchestrator;
use crate::scheduler::RefreshScheduler;
use crate::store::{ApplyOutcome, ViewStateStore};
use crate::transport::{HttpTransport, Transport};
use crate::workflow::{WorkflowExecution, WorkflowTrigger};
use riskdesk_core::{AppViewState, HealthCheck, RiskEncodingPolicy, WorkflowTriggerRequest};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Owns one client instance: store, scheduler, workflow trigger and the
/// encoding policy used to render the state.
pub struct RiskDesk {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    store: ViewStateStore,
    scheduler: Arc<RefreshScheduler>,
    workflow: WorkflowTrigger,
    policy: RiskEncodingPolicy,
}

impl RiskDesk {
    pub fn connect(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.api_url, config.request_timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let store = ViewStateStore::new();
        let orchestrator = Arc::new(FetchOrchestrator::new(transport.clone()));
        let scheduler = RefreshScheduler::new(orchestrator, store.clone(), config.refresh_interval);
        let workflow = WorkflowTrigger::new(transport.clone());
        Self {
            config,
            transport,
            store,
            scheduler,
            workflow,
            policy: RiskEncodingPolicy::STANDARD,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn policy(&self) -> &RiskEncodingPolicy {
        &self.policy
    }

    pub fn store(&self) -> &ViewStateStore {
        &self.store
    }

    pub fn state(&self) -> AppViewState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppViewState> {
        self.store.subscribe()
    }

    pub fn start(&self) {
        self.scheduler.start();
    }

    /// Manual "Refresh" action.
    pub async fn refresh(&self) -> ApplyOutcome {
        self.scheduler.trigger_now().await
    }

    pub fn shutdown(&self) {
        self.scheduler.stop();
    }

    pub fn analysis_running(&self) -> bool {
        self.workflow.in_flight()
    }

    /// Requests an analysis run. Returns `Ok(None)` without sending anything
    /// when a previous request has not settled yet.
    pub async fn run_analysis(
        &self,
        request: Option<WorkflowTriggerRequest>,
    ) -> Result<Option<WorkflowExecution>, WorkflowTriggerError> {
        let req = request.unwrap_or_else(|| self.config.analysis.clone());
        let Some(pending) = self.workflow.try_trigger(
            req.run_mode,
            req.risk_threshold,
            req.send_notifications,
        ) else {
            info!("analysis request ignored; previous request still in flight");
            return Ok(None);
        };
        pending.await.map(Some)
    }

    pub async fn health(&self) -> Result<HealthCheck, TransportError> {
        check_health(self.transport.as_ref()).await
    }
}
