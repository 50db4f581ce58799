use crate::domain::{
    CompleteSnapshot, ComplianceSnapshot, DashboardSnapshot, Domain, MarketSnapshot,
    PortfolioSnapshot, TreasurySnapshot,
};
use crate::time::EpochMs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActiveTab {
    #[default]
    Dashboard,
    Treasury,
    Portfolio,
    Compliance,
    Market,
}

impl From<Domain> for ActiveTab {
    fn from(d: Domain) -> Self {
        match d {
            Domain::Dashboard => ActiveTab::Dashboard,
            Domain::Treasury => ActiveTab::Treasury,
            Domain::Portfolio => ActiveTab::Portfolio,
            Domain::Compliance => ActiveTab::Compliance,
            Domain::Market => ActiveTab::Market,
        }
    }
}

/// What a consumer should show for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// Nothing loaded yet and a cycle is outstanding.
    InitialLoading,
    /// Nothing loaded yet and the last applied cycle failed.
    Unavailable { error: String },
    /// Data present, a newer cycle is outstanding.
    Refreshing,
    /// Data present from an earlier cycle, the last applied cycle failed.
    Stale { error: String },
    Ready,
}

/// Process-wide view of the five domains plus refresh flags.
///
/// The five domain fields only ever change together, from one applied cycle,
/// along with `last_update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppViewState {
    pub dashboard: Option<DashboardSnapshot>,
    pub treasury: Option<TreasurySnapshot>,
    pub portfolio: Option<PortfolioSnapshot>,
    pub compliance: Option<ComplianceSnapshot>,
    pub market: Option<MarketSnapshot>,
    pub is_loading: bool,
    pub last_error: Option<String>,
    /// Completion time of the committed snapshot; `None` until the first commit.
    pub last_update: Option<EpochMs>,
    pub active_tab: ActiveTab,
    /// Sequence number of the last applied cycle (0 before any).
    pub applied_seq: u64,
}

impl Default for AppViewState {
    fn default() -> Self {
        Self {
            dashboard: None,
            treasury: None,
            portfolio: None,
            compliance: None,
            market: None,
            is_loading: true,
            last_error: None,
            last_update: None,
            active_tab: ActiveTab::Dashboard,
            applied_seq: 0,
        }
    }
}

impl AppViewState {
    pub fn has_data(&self) -> bool {
        self.dashboard.is_some()
    }

    /// Replaces all five domain fields and the update time in one step.
    pub fn commit(&mut self, snapshot: CompleteSnapshot) {
        let CompleteSnapshot {
            dashboard,
            treasury,
            portfolio,
            compliance,
            market,
            completed_at,
        } = snapshot;
        self.dashboard = Some(dashboard);
        self.treasury = Some(treasury);
        self.portfolio = Some(portfolio);
        self.compliance = Some(compliance);
        self.market = Some(market);
        self.last_update = Some(completed_at);
        self.last_error = None;
    }

    pub fn phase(&self) -> ViewPhase {
        match (self.has_data(), &self.last_error, self.is_loading) {
            (false, _, true) => ViewPhase::InitialLoading,
            (false, Some(e), false) => ViewPhase::Unavailable { error: e.clone() },
            (false, None, false) => ViewPhase::InitialLoading,
            (true, Some(e), _) => ViewPhase::Stale { error: e.clone() },
            (true, None, true) => ViewPhase::Refreshing,
            (true, None, false) => ViewPhase::Ready,
        }
    }
}
