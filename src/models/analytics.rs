use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::role::Mode;

/// Session-scoped adaptation counters. Reset when the session ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptationMetrics {
    pub content_filtered: u64,
    pub complexity_reduced: u64,
    /// Rolling average over 1-5 satisfaction scores.
    pub user_satisfaction: f64,
    #[serde(skip)]
    satisfaction_samples: u64,
}

impl Default for AdaptationMetrics {
    fn default() -> Self {
        Self {
            content_filtered: 0,
            complexity_reduced: 0,
            user_satisfaction: 0.0,
            satisfaction_samples: 0,
        }
    }
}

impl AdaptationMetrics {
    pub fn record_filtered(&mut self) {
        self.content_filtered += 1;
    }

    pub fn record_complexity_reduction(&mut self, amount: u64) {
        self.complexity_reduced += amount;
    }

    /// Incremental rolling average: avg' = avg + (s - avg) / n.
    pub fn record_satisfaction(&mut self, score: f64) {
        self.satisfaction_samples += 1;
        self.user_satisfaction +=
            (score - self.user_satisfaction) / self.satisfaction_samples as f64;
    }

    pub fn reset(&mut self) {
        *self = AdaptationMetrics::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    SessionStart,
    SessionEnd,
    ModeSwitch,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SessionStart => "sessionStart",
            EventKind::SessionEnd => "sessionEnd",
            EventKind::ModeSwitch => "modeSwitch",
        }
    }
}

/// One entry in the persisted usage event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    pub id: String,
    pub kind: EventKind,
    /// Set for mode-switch events, absent otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    pub timestamp: DateTime<Utc>,
}

/// Derived usage analytics. Always recomputed from the event log, never
/// stored as its own authoritative record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAnalytics {
    pub total_sessions: u64,
    pub mode_switches: u64,
    pub most_used_mode: Option<Mode>,
    pub average_satisfaction: f64,
    pub session_duration_ms: u64,
}
