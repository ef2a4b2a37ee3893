use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::models::role::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryLevel {
    High,
    Medium,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationFrequency {
    Immediate,
    Hourly,
    Daily,
}

/// Alerting thresholds. Bounds are enforced by [`TribePreferences::validate`];
/// out-of-range writes are rejected so callers can surface a validation
/// error instead of silently clamping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertThresholds {
    pub risk_score: u32,
    pub confidence_score: u32,
    pub source_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email: bool,
    pub in_app: bool,
    pub slack: bool,
    pub frequency: NotificationFrequency,
}

/// Per-user disclosure preferences. One instance per user, created with
/// defaults on first use and mutated only through whole-object replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TribePreferences {
    pub default_mode: Mode,
    pub max_insights: u32,
    pub show_technical_details: bool,
    pub enable_collaboration: bool,
    pub summary_level: SummaryLevel,
    pub thresholds: AlertThresholds,
    pub notifications: NotificationSettings,
}

impl Default for TribePreferences {
    fn default() -> Self {
        Self {
            default_mode: Mode::Analyst,
            max_insights: 5,
            show_technical_details: false,
            enable_collaboration: true,
            summary_level: SummaryLevel::Medium,
            thresholds: AlertThresholds {
                risk_score: 70,
                confidence_score: 60,
                source_count: 3,
            },
            notifications: NotificationSettings {
                email: false,
                in_app: true,
                slack: false,
                frequency: NotificationFrequency::Daily,
            },
        }
    }
}

impl TribePreferences {
    /// Check every bounded field. Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        if !(1..=10).contains(&self.max_insights) {
            bail!(
                "maxInsights must be between 1 and 10, got {}",
                self.max_insights
            );
        }
        if self.thresholds.risk_score > 100 {
            bail!(
                "thresholds.riskScore must be between 0 and 100, got {}",
                self.thresholds.risk_score
            );
        }
        if self.thresholds.confidence_score > 100 {
            bail!(
                "thresholds.confidenceScore must be between 0 and 100, got {}",
                self.thresholds.confidence_score
            );
        }
        if !(1..=50).contains(&self.thresholds.source_count) {
            bail!(
                "thresholds.sourceCount must be between 1 and 50, got {}",
                self.thresholds.source_count
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TribePreferences::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_risk_score() {
        let mut prefs = TribePreferences::default();
        prefs.thresholds.risk_score = 150;
        let err = prefs.validate().unwrap_err();
        assert!(err.to_string().contains("riskScore"));
    }

    #[test]
    fn rejects_zero_max_insights() {
        let mut prefs = TribePreferences::default();
        prefs.max_insights = 0;
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn rejects_source_count_over_fifty() {
        let mut prefs = TribePreferences::default();
        prefs.thresholds.source_count = 51;
        assert!(prefs.validate().is_err());
    }

    #[test]
    fn boundary_values_are_accepted() {
        let mut prefs = TribePreferences::default();
        prefs.max_insights = 10;
        prefs.thresholds.risk_score = 100;
        prefs.thresholds.confidence_score = 0;
        prefs.thresholds.source_count = 1;
        assert!(prefs.validate().is_ok());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(TribePreferences::default()).unwrap();
        assert!(json.get("defaultMode").is_some());
        assert!(json.get("maxInsights").is_some());
        assert!(json["thresholds"].get("riskScore").is_some());
        assert!(json["notifications"].get("inApp").is_some());
    }
}
