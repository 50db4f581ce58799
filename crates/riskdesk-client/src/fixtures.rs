//! Canned payloads shaped like the live API.

use crate::transport::InMemoryTransport;
use riskdesk_core::Domain;
use serde_json::{json, Value};

pub fn dashboard(overall_risk_score: f64) -> Value {
    json!({
        "timestamp": "2025-12-10T09:30:00",
        "overall_status": "WARNING",
        "overall_risk_score": overall_risk_score,
        "treasury_status": "OK",
        "treasury_risk_score": 42,
        "portfolio_status": "WARNING",
        "portfolio_risk_score": 65,
        "compliance_status": "CRITICAL",
        "compliance_risk_score": 85,
        "critical_items": 3,
        "active_alerts": 12,
        "actions_pending": 5
    })
}

pub fn treasury() -> Value {
    json!({
        "date": "2025-12-10",
        "cash_positions": [{
            "account_name": "Operating", "currency": "USD", "balance": 1500000.0,
            "available_balance": 1400000.0, "bank": "JPM", "region": "US"
        }],
        "total_cash_usd": 1500000.0,
        "debt_instruments": [{
            "debt_id": "D-1", "instrument_type": "Term Loan", "principal": 5000000.0,
            "currency": "USD", "interest_rate": 5.25, "maturity_date": "2028-06-30",
            "covenant_status": "BREACH"
        }],
        "total_debt": 5000000.0,
        "net_position": -3500000.0,
        "fx_exposures": {},
        "covenant_breaches": 1,
        "covenant_warnings": 0
    })
}

pub fn portfolio() -> Value {
    json!({
        "date": "2025-12-10",
        "holdings": [{
            "ticker": "AAPL", "name": "Apple", "asset_class": "Equity", "quantity": 100,
            "current_price": 190.5, "market_value": 19050.0, "weight_pct": 12.5,
            "unrealized_pnl": -320.0
        }],
        "total_aum": 152400.0,
        "var_95_1d": 2100.0,
        "var_99_1d": 3300.0,
        "sharpe_ratio": 1.2,
        "max_drawdown": -8.4,
        "risk_score": 65,
        "ytd_return": 7.1,
        "benchmark_return": 6.0,
        "alpha": 1.1
    })
}

pub fn compliance() -> Value {
    json!({
        "date": "2025-12-10",
        "aml_alerts": [{
            "alert_id": "A-1", "type": "SANCTIONS_MATCH", "risk_score": 92, "priority": "HIGH",
            "status": "PENDING_REVIEW", "entity_name": "Acme", "amount": 250000, "currency": "EUR"
        }],
        "total_alerts": 1,
        "high_priority_count": 1,
        "sanctions_matches": 1,
        "kyc_compliance_rate": 96.5,
        "clients_pending_review": 4,
        "critical_audit_events": 0
    })
}

pub fn market() -> Value {
    json!({
        "date": "2025-12-10",
        "news_items": [{
            "headline": "Rates on hold", "source": "Wire", "sentiment": "MIXED",
            "sentiment_score": -0.1, "impact": "MEDIUM"
        }],
        "overall_sentiment": "CAUTIOUSLY_POSITIVE",
        "sp500_level": 6050.2,
        "sp500_change_pct": 0.4,
        "vix": 14.2,
        "fed_funds_rate": 4.5,
        "treasury_10y": 4.2
    })
}

/// Transport answering all five domains successfully.
pub fn healthy_transport(overall_risk_score: f64) -> InMemoryTransport {
    let t = InMemoryTransport::new();
    serve_all(&t, overall_risk_score);
    t
}

pub fn serve_all(t: &InMemoryTransport, overall_risk_score: f64) {
    for d in Domain::ALL {
        let body = match d {
            Domain::Dashboard => dashboard(overall_risk_score),
            Domain::Treasury => treasury(),
            Domain::Portfolio => portfolio(),
            Domain::Compliance => compliance(),
            Domain::Market => market(),
        };
        t.respond(d.path(), body);
    }
}
