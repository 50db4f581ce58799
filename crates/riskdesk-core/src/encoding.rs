//! Mapping from raw scores and status enums to display tokens.
//!
//! Every score and status in the client goes through one [`RiskEncodingPolicy`]
//! so the overall, treasury, portfolio and compliance views agree on where
//! the warning and critical bands start. Encodings are computed at render
//! time from committed numbers and are never stored.

use crate::model::{AlertPriority, CovenantStatus, Sentiment, StatusLevel};
use serde::Serialize;

/// Display severity. Ordered so that sorting puts the worst last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Neutral,
    Ok,
    Warning,
    Critical,
}

impl Severity {
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn color_token(self) -> &'static str {
        match self {
            Severity::Critical => "critical-color",
            Severity::Warning => "warning-color",
            Severity::Ok => "ok-color",
            Severity::Neutral => "neutral-color",
        }
    }

    pub fn hue(self) -> Hue {
        match self {
            Severity::Critical => Hue::Red,
            Severity::Warning => Hue::Yellow,
            Severity::Ok => Hue::Green,
            Severity::Neutral => Hue::Gray,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hue {
    Red,
    Yellow,
    Green,
    Gray,
}

impl Hue {
    pub fn as_str(self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
            Hue::Gray => "gray",
        }
    }

    pub fn background_token(self) -> &'static str {
        match self {
            Hue::Red => "bg-red",
            Hue::Yellow => "bg-yellow",
            Hue::Green => "bg-green",
            Hue::Gray => "bg-gray",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskEncoding {
    pub color_token: &'static str,
    pub background_token: &'static str,
}

/// Score thresholds. `score >= critical_at` is critical, `score >= warning_at` is warning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskEncodingPolicy {
    pub critical_at: f64,
    pub warning_at: f64,
}

impl Default for RiskEncodingPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl RiskEncodingPolicy {
    pub const STANDARD: RiskEncodingPolicy = RiskEncodingPolicy {
        critical_at: 80.0,
        warning_at: 60.0,
    };

    pub fn score_severity(&self, score: f64) -> Severity {
        if score.is_nan() {
            Severity::Neutral
        } else if score >= self.critical_at {
            Severity::Critical
        } else if score >= self.warning_at {
            Severity::Warning
        } else {
            Severity::Ok
        }
    }

    pub fn score_color(&self, score: f64) -> &'static str {
        self.score_severity(score).color_token()
    }

    pub fn status_severity(&self, status: StatusLevel) -> Severity {
        match status {
            StatusLevel::Critical => Severity::Critical,
            StatusLevel::Warning => Severity::Warning,
            StatusLevel::Ok => Severity::Ok,
            StatusLevel::Unknown => Severity::Neutral,
        }
    }

    pub fn status_color(&self, status: StatusLevel) -> Hue {
        self.status_severity(status).hue()
    }

    pub fn status_background(&self, status: StatusLevel) -> &'static str {
        self.status_color(status).background_token()
    }

    /// Color from the score, background from the reported status.
    pub fn encode(&self, score: f64, status: StatusLevel) -> RiskEncoding {
        RiskEncoding {
            color_token: self.score_color(score),
            background_token: self.status_background(status),
        }
    }

    /// Width of a risk bar, as a percentage.
    pub fn bar_width_pct(&self, score: f64) -> f64 {
        if score.is_nan() {
            return 0.0;
        }
        score.clamp(0.0, 100.0)
    }

    /// Inverse of the risk score, shown as "portfolio health".
    pub fn health_pct(&self, score: f64) -> f64 {
        100.0 - self.bar_width_pct(score)
    }

    pub fn covenant_severity(&self, status: CovenantStatus) -> Severity {
        match status {
            CovenantStatus::Breach => Severity::Critical,
            CovenantStatus::Warning => Severity::Warning,
            CovenantStatus::Compliant => Severity::Ok,
            CovenantStatus::Unknown => Severity::Neutral,
        }
    }

    pub fn priority_severity(&self, priority: AlertPriority) -> Severity {
        match priority {
            AlertPriority::High => Severity::Critical,
            AlertPriority::Medium => Severity::Warning,
            AlertPriority::Low => Severity::Ok,
            AlertPriority::Unknown => Severity::Neutral,
        }
    }

    pub fn sentiment_severity(&self, sentiment: Sentiment) -> Severity {
        match sentiment {
            Sentiment::Negative => Severity::Critical,
            Sentiment::Mixed => Severity::Warning,
            Sentiment::Positive => Severity::Ok,
            Sentiment::Neutral | Sentiment::Unknown => Severity::Neutral,
        }
    }

    /// Gains, net positions, alpha: non-negative is fine, negative is bad.
    pub fn signed_severity(&self, value: f64) -> Severity {
        if value.is_nan() {
            Severity::Neutral
        } else if value >= 0.0 {
            Severity::Ok
        } else {
            Severity::Critical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: RiskEncodingPolicy = RiskEncodingPolicy::STANDARD;

    #[test]
    fn score_color_boundaries() {
        assert_eq!(P.score_color(59.0), "ok-color");
        assert_eq!(P.score_color(59.99), "ok-color");
        assert_eq!(P.score_color(60.0), "warning-color");
        assert_eq!(P.score_color(79.0), "warning-color");
        assert_eq!(P.score_color(79.99), "warning-color");
        assert_eq!(P.score_color(80.0), "critical-color");
        assert_eq!(P.score_color(100.0), "critical-color");
        assert_eq!(P.score_color(0.0), "ok-color");
        assert_eq!(P.score_color(-5.0), "ok-color");
    }

    #[test]
    fn nan_score_is_neutral() {
        assert_eq!(P.score_severity(f64::NAN), Severity::Neutral);
        assert_eq!(P.bar_width_pct(f64::NAN), 0.0);
    }

    #[test]
    fn status_color_table() {
        assert_eq!(P.status_color(StatusLevel::Critical), Hue::Red);
        assert_eq!(P.status_color(StatusLevel::Warning), Hue::Yellow);
        assert_eq!(P.status_color(StatusLevel::Ok), Hue::Green);
        assert_eq!(P.status_color(StatusLevel::Unknown), Hue::Gray);
        assert_eq!(P.status_background(StatusLevel::Critical), "bg-red");
    }

    #[test]
    fn encoding_is_pure() {
        let a = P.encode(72.0, StatusLevel::Warning);
        let b = P.encode(72.0, StatusLevel::Warning);
        assert_eq!(a, b);
        assert_eq!(a.color_token, "warning-color");
        assert_eq!(a.background_token, "bg-yellow");
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(P.bar_width_pct(-3.0), 0.0);
        assert_eq!(P.bar_width_pct(42.5), 42.5);
        assert_eq!(P.bar_width_pct(140.0), 100.0);
        assert_eq!(P.health_pct(72.0), 28.0);
    }

    #[test]
    fn secondary_encodings_share_vocabulary() {
        assert_eq!(P.covenant_severity(CovenantStatus::Breach), Severity::Critical);
        assert_eq!(P.covenant_severity(CovenantStatus::Compliant), Severity::Ok);
        assert_eq!(P.priority_severity(AlertPriority::Medium), Severity::Warning);
        assert_eq!(P.sentiment_severity(Sentiment::Neutral), Severity::Neutral);
        assert_eq!(P.sentiment_severity(Sentiment::Negative), Severity::Critical);
        assert_eq!(P.signed_severity(0.0), Severity::Ok);
        assert_eq!(P.signed_severity(-0.01), Severity::Critical);
    }

    #[test]
    fn severity_orders_worst_last() {
        let mut v = vec![Severity::Critical, Severity::Neutral, Severity::Warning, Severity::Ok];
        v.sort();
        assert_eq!(v, vec![Severity::Neutral, Severity::Ok, Severity::Warning, Severity::Critical]);
        assert!(Severity::Critical.rank() > Severity::Warning.rank());
    }
}
