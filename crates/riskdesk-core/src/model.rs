use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk status reported by the backend for an area or the whole book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusLevel {
    Ok,
    Warning,
    Critical,
    /// Any value the client does not recognise.
    #[serde(other)]
    Unknown,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Ok => "OK",
            StatusLevel::Warning => "WARNING",
            StatusLevel::Critical => "CRITICAL",
            StatusLevel::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub timestamp: String,
    pub overall_status: StatusLevel,
    pub overall_risk_score: f64,
    pub treasury_status: StatusLevel,
    pub treasury_risk_score: f64,
    pub portfolio_status: StatusLevel,
    pub portfolio_risk_score: f64,
    pub compliance_status: StatusLevel,
    pub compliance_risk_score: f64,
    pub critical_items: u32,
    pub active_alerts: u32,
    pub actions_pending: u32,
    #[serde(default)]
    pub last_execution_id: Option<String>,
    #[serde(default)]
    pub next_scheduled_run: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashPosition {
    pub account_name: String,
    pub currency: String,
    pub balance: f64,
    pub available_balance: f64,
    pub bank: String,
    pub region: String,
}

/// Compliance of a debt instrument against its lending terms.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CovenantStatus {
    Compliant,
    Warning,
    Breach,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtInstrument {
    pub debt_id: String,
    pub instrument_type: String,
    pub principal: f64,
    pub currency: String,
    pub interest_rate: f64,
    pub maturity_date: String,
    pub covenant_status: CovenantStatus,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FxExposure {
    #[serde(default)]
    pub net_position: f64,
    #[serde(default)]
    pub hedged_amount: f64,
    #[serde(default)]
    pub unhedged_exposure: f64,
    #[serde(default)]
    pub hedge_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreasuryData {
    pub date: String,
    pub cash_positions: Vec<CashPosition>,
    pub total_cash_usd: f64,
    pub debt_instruments: Vec<DebtInstrument>,
    pub total_debt: f64,
    pub net_position: f64,
    /// Keyed by currency code.
    #[serde(default)]
    pub fx_exposures: BTreeMap<String, FxExposure>,
    pub covenant_breaches: u32,
    pub covenant_warnings: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: String,
    pub name: String,
    pub asset_class: String,
    pub quantity: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub weight_pct: f64,
    pub unrealized_pnl: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioData {
    pub date: String,
    pub holdings: Vec<Holding>,
    pub total_aum: f64,
    pub var_95_1d: f64,
    pub var_99_1d: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub risk_score: f64,
    pub ytd_return: f64,
    pub benchmark_return: f64,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmlAlert {
    pub alert_id: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub risk_score: f64,
    pub priority: AlertPriority,
    pub status: String,
    pub entity_name: String,
    pub amount: f64,
    pub currency: String,
}

impl AmlAlert {
    pub fn is_sanctions_match(&self) -> bool {
        self.alert_type == "SANCTIONS_MATCH"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceData {
    pub date: String,
    pub aml_alerts: Vec<AmlAlert>,
    pub total_alerts: u32,
    pub high_priority_count: u32,
    pub sanctions_matches: u32,
    pub kyc_compliance_rate: f64,
    pub clients_pending_review: u32,
    pub critical_audit_events: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
    Mixed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub headline: String,
    pub source: String,
    pub sentiment: Sentiment,
    pub sentiment_score: f64,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketData {
    pub date: String,
    pub news_items: Vec<NewsItem>,
    /// Free-form label such as `CAUTIOUSLY_POSITIVE`.
    pub overall_sentiment: String,
    pub sp500_level: f64,
    pub sp500_change_pct: f64,
    pub vix: f64,
    pub fed_funds_rate: f64,
    pub treasury_10y: f64,
}

impl MarketData {
    /// Coarse sentiment derived from the free-form overall label.
    pub fn overall_tone(&self) -> Sentiment {
        if self.overall_sentiment.contains("POSITIVE") {
            Sentiment::Positive
        } else if self.overall_sentiment.contains("NEGATIVE") {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub api_version: String,
    pub kestra_status: String,
    pub ollama_status: String,
    pub database_status: String,
    pub timestamp: String,
}

impl HealthCheck {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Scope of an analysis run on the workflow engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    #[default]
    Full,
    TreasuryOnly,
    PortfolioOnly,
    ComplianceOnly,
}

/// Upper bound of the risk threshold accepted by the workflow endpoint.
pub const MAX_RISK_THRESHOLD: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTriggerRequest {
    pub run_mode: RunMode,
    pub risk_threshold: u32,
    pub send_notifications: bool,
}

impl Default for WorkflowTriggerRequest {
    fn default() -> Self {
        Self {
            run_mode: RunMode::Full,
            risk_threshold: 70,
            send_notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTriggerResponse {
    pub execution_id: String,
    pub status: String,
    pub message: String,
    pub timestamp: String,
}

impl WorkflowTriggerResponse {
    /// The backend reports engine-side failures with a 2xx and one of these statuses.
    pub fn is_rejected(&self) -> bool {
        matches!(self.status.as_str(), "FAILED" | "ERROR")
    }
}
