use crate::client::DomainClient;
use crate::error::{CycleFailure, TransportError};
use crate::transport::Transport;
use riskdesk_core::{
    now_ms, CompleteSnapshot, ComplianceData, DashboardSummary, Domain, MarketData, PortfolioData,
    TreasuryData,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Fans out the five domain reads and joins them all-or-nothing.
pub struct FetchOrchestrator {
    base_url: String,
    dashboard: DomainClient<DashboardSummary>,
    treasury: DomainClient<TreasuryData>,
    portfolio: DomainClient<PortfolioData>,
    compliance: DomainClient<ComplianceData>,
    market: DomainClient<MarketData>,
}

impl FetchOrchestrator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: transport.base_url().to_string(),
            dashboard: DomainClient::new(Domain::Dashboard, transport.clone()),
            treasury: DomainClient::new(Domain::Treasury, transport.clone()),
            portfolio: DomainClient::new(Domain::Portfolio, transport.clone()),
            compliance: DomainClient::new(Domain::Compliance, transport.clone()),
            market: DomainClient::new(Domain::Market, transport),
        }
    }

    /// One refresh attempt. Either every domain is returned with a single
    /// completion time, or the first observed error fails the whole cycle
    /// and nothing fetched in it is surfaced.
    pub async fn run_cycle(&self) -> Result<CompleteSnapshot, CycleFailure> {
        let joined = tokio::try_join!(
            self.dashboard.fetch(),
            self.treasury.fetch(),
            self.portfolio.fetch(),
            self.compliance.fetch(),
            self.market.fetch(),
        );

        match joined {
            Ok((dashboard, treasury, portfolio, compliance, market)) => {
                let completed_at = now_ms();
                debug!("cycle fetched all domains at {completed_at}");
                Ok(CompleteSnapshot::new(
                    dashboard,
                    treasury,
                    portfolio,
                    compliance,
                    market,
                    completed_at,
                ))
            }
            Err(e) => {
                warn!("cycle failed: {e}");
                Err(self.failure_from(e))
            }
        }
    }

    fn failure_from(&self, e: TransportError) -> CycleFailure {
        match &e {
            TransportError::Network { message, .. } if message.trim().is_empty() => {
                CycleFailure::unreachable(&self.base_url)
            }
            _ => CycleFailure::from(e),
        }
    }
}
