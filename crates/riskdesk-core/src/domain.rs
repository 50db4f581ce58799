use crate::model::{ComplianceData, DashboardSummary, MarketData, PortfolioData, TreasuryData};
use crate::time::EpochMs;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five independently served risk datasets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Dashboard,
    Treasury,
    Portfolio,
    Compliance,
    Market,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Dashboard,
        Domain::Treasury,
        Domain::Portfolio,
        Domain::Compliance,
        Domain::Market,
    ];

    /// Path of the GET endpoint serving this domain.
    pub fn path(&self) -> &'static str {
        match self {
            Domain::Dashboard => "/data/dashboard",
            Domain::Treasury => "/data/treasury",
            Domain::Portfolio => "/data/portfolio",
            Domain::Compliance => "/data/compliance",
            Domain::Market => "/data/market",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Dashboard => "dashboard",
            Domain::Treasury => "treasury",
            Domain::Portfolio => "portfolio",
            Domain::Compliance => "compliance",
            Domain::Market => "market",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Committed payload for one domain. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSnapshot<T> {
    pub domain: Domain,
    pub payload: T,
}

impl<T> DomainSnapshot<T> {
    pub fn new(domain: Domain, payload: T) -> Self {
        Self { domain, payload }
    }
}

pub type DashboardSnapshot = DomainSnapshot<DashboardSummary>;
pub type TreasurySnapshot = DomainSnapshot<TreasuryData>;
pub type PortfolioSnapshot = DomainSnapshot<PortfolioData>;
pub type ComplianceSnapshot = DomainSnapshot<ComplianceData>;
pub type MarketSnapshot = DomainSnapshot<MarketData>;

/// Result of a successful refresh cycle: all five domains, one completion time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteSnapshot {
    pub dashboard: DashboardSnapshot,
    pub treasury: TreasurySnapshot,
    pub portfolio: PortfolioSnapshot,
    pub compliance: ComplianceSnapshot,
    pub market: MarketSnapshot,
    pub completed_at: EpochMs,
}

impl CompleteSnapshot {
    pub fn new(
        dashboard: DashboardSummary,
        treasury: TreasuryData,
        portfolio: PortfolioData,
        compliance: ComplianceData,
        market: MarketData,
        completed_at: EpochMs,
    ) -> Self {
        Self {
            dashboard: DomainSnapshot::new(Domain::Dashboard, dashboard),
            treasury: DomainSnapshot::new(Domain::Treasury, treasury),
            portfolio: DomainSnapshot::new(Domain::Portfolio, portfolio),
            compliance: DomainSnapshot::new(Domain::Compliance, compliance),
            market: DomainSnapshot::new(Domain::Market, market),
            completed_at,
        }
    }
}
