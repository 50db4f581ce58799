//! Plain-text rendering of the view-state for the terminal.

use crate::workflow::WorkflowExecution;
use riskdesk_core::{
    age_secs, format_currency, format_number, format_signed, AppViewState, DashboardSummary,
    EpochMs, RiskEncodingPolicy, StatusLevel, ViewPhase,
};
use std::fmt::Write;

const BAR_CELLS: usize = 20;

fn bar(policy: &RiskEncodingPolicy, score: f64) -> String {
    let filled = (policy.bar_width_pct(score) / 100.0 * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_CELLS - filled))
}

fn area_line(policy: &RiskEncodingPolicy, label: &str, status: StatusLevel, score: f64) -> String {
    let enc = policy.encode(score, status);
    format!(
        "{label:<11} {:<8} {:>3}/100 [{}] {} ({}, {})",
        status.as_str(),
        format_number(score, 0),
        bar(policy, score),
        status.as_str().to_lowercase(),
        enc.color_token,
        policy.status_color(status).as_str(),
    )
}

fn dashboard_lines(out: &mut String, policy: &RiskEncodingPolicy, d: &DashboardSummary) {
    let _ = writeln!(out, "{}", area_line(policy, "overall", d.overall_status, d.overall_risk_score));
    let _ = writeln!(out, "{}", area_line(policy, "treasury", d.treasury_status, d.treasury_risk_score));
    let _ = writeln!(out, "{}", area_line(policy, "portfolio", d.portfolio_status, d.portfolio_risk_score));
    let _ = writeln!(out, "{}", area_line(policy, "compliance", d.compliance_status, d.compliance_risk_score));
    let _ = writeln!(
        out,
        "critical items: {}  active alerts: {}  actions pending: {}  health: {}%",
        d.critical_items,
        d.active_alerts,
        d.actions_pending,
        format_number(policy.health_pct(d.overall_risk_score), 0),
    );
}

pub fn render_summary(state: &AppViewState, policy: &RiskEncodingPolicy, now: EpochMs) -> String {
    let mut out = String::new();
    match state.phase() {
        ViewPhase::InitialLoading => {
            out.push_str("loading risk data...\n");
            return out;
        }
        ViewPhase::Unavailable { error } => {
            let _ = writeln!(out, "Connection error: {error}");
            out.push_str("No data available yet. Check that the backend is running; the next refresh will retry.\n");
            return out;
        }
        ViewPhase::Stale { error } => {
            let _ = writeln!(out, "Connection error: {error} (showing last good data)");
        }
        ViewPhase::Refreshing | ViewPhase::Ready => {}
    }

    if let Some(d) = &state.dashboard {
        dashboard_lines(&mut out, policy, &d.payload);
    }
    if let Some(t) = &state.treasury {
        let t = &t.payload;
        let _ = writeln!(
            out,
            "treasury:   cash {}  debt {}  net {} ({})  covenants {} breach / {} warn",
            format_currency(t.total_cash_usd),
            format_currency(t.total_debt),
            format_currency(t.net_position),
            policy.signed_severity(t.net_position).color_token(),
            t.covenant_breaches,
            t.covenant_warnings,
        );
    }
    if let Some(p) = &state.portfolio {
        let p = &p.payload;
        let _ = writeln!(
            out,
            "portfolio:  aum {}  VaR95 {}  ytd {}%  alpha {}% ({})",
            format_currency(p.total_aum),
            format_currency(p.var_95_1d),
            format_signed(p.ytd_return, 2),
            format_signed(p.alpha, 2),
            policy.signed_severity(p.alpha).color_token(),
        );
    }
    if let Some(c) = &state.compliance {
        let c = &c.payload;
        let _ = writeln!(
            out,
            "compliance: {} alerts ({} high)  sanctions {}  kyc {}%",
            c.total_alerts,
            c.high_priority_count,
            c.sanctions_matches,
            format_number(c.kyc_compliance_rate, 2),
        );
    }
    if let Some(m) = &state.market {
        let m = &m.payload;
        let _ = writeln!(
            out,
            "market:     {} ({})  S&P {} ({}%)  VIX {}",
            m.overall_sentiment.replace('_', " "),
            policy.sentiment_severity(m.overall_tone()).color_token(),
            format_number(m.sp500_level, 2),
            format_signed(m.sp500_change_pct, 2),
            format_number(m.vix, 2),
        );
    }
    if let Some(at) = state.last_update {
        let _ = writeln!(out, "updated {}s ago", age_secs(at, now));
    }
    out
}

pub fn render_execution(exec: &WorkflowExecution) -> String {
    format!(
        "AI analysis started\nexecution id: {}\nstatus: {}\n{}\n",
        exec.execution_id, exec.status, exec.message
    )
}
