//! Durable preference and analytics persistence.
//!
//! Everything here is synchronous and goes through the narrow
//! [`KeyValueStore`] capability, so the same logic runs against the
//! sqlite backing, an in-memory map, or whatever the host injects.
//! Storage failures are recoverable errors: callers keep their in-memory
//! state as the source of truth for the session and downgrade the error
//! to a warning.

pub mod kv;
pub mod sqlite;

pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::SqliteStore;

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::analytics::{EventKind, UsageAnalytics, UsageEvent};
use crate::models::preferences::TribePreferences;
use crate::models::role::{Mode, Role, RoleDetectionRecord};

const KEY_PREFERENCES: &str = "tribe.preferences";
const KEY_ROLE_HISTORY: &str = "tribe.roleHistory";
const KEY_SATISFACTION: &str = "tribe.satisfaction";
const KEY_EVENTS: &str = "tribe.events";

const EXPORT_VERSION: u32 = 1;

/// Full-state portability bundle for export/import.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub preferences: Option<TribePreferences>,
    pub role_history: Vec<RoleDetectionRecord>,
    pub satisfaction_scores: Vec<f64>,
    pub events: Vec<UsageEvent>,
}

struct AnalyticsCache {
    event_count: usize,
    score_count: usize,
    analytics: UsageAnalytics,
}

/// Synchronous store for preferences, detection history, satisfaction
/// scores, and the usage event log.
pub struct PreferenceStore<S: KeyValueStore> {
    kv: S,
    analytics_cache: Mutex<Option<AnalyticsCache>>,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(kv: S) -> Self {
        Self {
            kv,
            analytics_cache: Mutex::new(None),
        }
    }

    fn load_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                // A corrupt record is recoverable: treat it as absent
                // rather than wedging every load after it.
                warn!("discarding unreadable record under '{key}': {err}");
                Ok(None)
            }
        }
    }

    fn store_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)
            .with_context(|| format!("failed to serialize record for '{key}'"))?;
        self.kv.set(key, &raw)
    }

    fn invalidate_analytics(&self) {
        *self
            .analytics_cache
            .lock()
            .expect("analytics cache lock poisoned") = None;
    }

    pub fn load_user_preferences(&self) -> Result<Option<TribePreferences>> {
        self.load_json(KEY_PREFERENCES)
    }

    /// Whole-object replacement. Invalid preferences are rejected before
    /// anything touches storage, so the stored value stays the prior
    /// valid one.
    pub fn save_user_preferences(&self, prefs: &TribePreferences) -> Result<()> {
        prefs.validate()?;
        self.store_json(KEY_PREFERENCES, prefs)
    }

    /// Append a detection-vs-confirmation pair to the history. The
    /// history is record-only: nothing reads it back into scoring.
    pub fn save_role_detection(
        &self,
        detected: Role,
        confirmed: Role,
        confidence: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let mut history = self.load_role_history()?;
        history.push(RoleDetectionRecord {
            detected_role: detected,
            confirmed_role: confirmed,
            confidence,
            timestamp,
        });
        self.store_json(KEY_ROLE_HISTORY, &history)
    }

    pub fn load_role_history(&self) -> Result<Vec<RoleDetectionRecord>> {
        Ok(self.load_json(KEY_ROLE_HISTORY)?.unwrap_or_default())
    }

    pub fn record_satisfaction(&self, score: f64) -> Result<()> {
        if !(1.0..=5.0).contains(&score) {
            bail!("satisfaction score must be between 1 and 5, got {score}");
        }
        let mut scores = self.load_satisfaction_scores()?;
        scores.push(score);
        self.store_json(KEY_SATISFACTION, &scores)?;
        self.invalidate_analytics();
        Ok(())
    }

    pub fn load_satisfaction_scores(&self) -> Result<Vec<f64>> {
        Ok(self.load_json(KEY_SATISFACTION)?.unwrap_or_default())
    }

    pub fn record_event(
        &self,
        kind: EventKind,
        mode: Option<Mode>,
        timestamp: DateTime<Utc>,
    ) -> Result<()> {
        let mut events = self.load_events()?;
        events.push(UsageEvent {
            id: Uuid::new_v4().to_string(),
            kind,
            mode,
            timestamp,
        });
        self.store_json(KEY_EVENTS, &events)?;
        self.invalidate_analytics();
        Ok(())
    }

    pub fn load_events(&self) -> Result<Vec<UsageEvent>> {
        Ok(self.load_json(KEY_EVENTS)?.unwrap_or_default())
    }

    /// Recompute usage analytics from the event log. Cached by log size
    /// so render loops can call this repeatedly without re-deriving.
    pub fn get_usage_analytics(&self) -> Result<UsageAnalytics> {
        let events = self.load_events()?;
        let scores = self.load_satisfaction_scores()?;

        let mut cache = self
            .analytics_cache
            .lock()
            .expect("analytics cache lock poisoned");
        if let Some(entry) = cache.as_ref() {
            if entry.event_count == events.len() && entry.score_count == scores.len() {
                return Ok(entry.analytics.clone());
            }
        }

        let analytics = compute_analytics(&events, &scores);
        *cache = Some(AnalyticsCache {
            event_count: events.len(),
            score_count: scores.len(),
            analytics: analytics.clone(),
        });
        Ok(analytics)
    }

    pub fn export_data(&self) -> Result<String> {
        let bundle = ExportBundle {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            preferences: self.load_user_preferences()?,
            role_history: self.load_role_history()?,
            satisfaction_scores: self.load_satisfaction_scores()?,
            events: self.load_events()?,
        };
        serde_json::to_string_pretty(&bundle).context("failed to serialize export bundle")
    }

    /// Validate the whole bundle before replacing any existing state. A
    /// malformed import leaves current preferences and history untouched.
    pub fn import_data(&self, data: &str) -> Result<()> {
        let bundle: ExportBundle =
            serde_json::from_str(data).context("import payload is not a valid export bundle")?;

        if bundle.version > EXPORT_VERSION {
            bail!(
                "import bundle version {} is newer than supported version {}",
                bundle.version,
                EXPORT_VERSION
            );
        }
        if let Some(prefs) = &bundle.preferences {
            prefs.validate()?;
        }
        for record in &bundle.role_history {
            if !(0.0..=1.0).contains(&record.confidence) {
                bail!(
                    "import bundle contains detection confidence {} outside [0, 1]",
                    record.confidence
                );
            }
        }
        for score in &bundle.satisfaction_scores {
            if !(1.0..=5.0).contains(score) {
                bail!("import bundle contains satisfaction score {score} outside [1, 5]");
            }
        }

        match &bundle.preferences {
            Some(prefs) => self.store_json(KEY_PREFERENCES, prefs)?,
            None => self.kv.remove(KEY_PREFERENCES)?,
        }
        self.store_json(KEY_ROLE_HISTORY, &bundle.role_history)?;
        self.store_json(KEY_SATISFACTION, &bundle.satisfaction_scores)?;
        self.store_json(KEY_EVENTS, &bundle.events)?;
        self.invalidate_analytics();
        Ok(())
    }

    pub fn clear_all_data(&self) -> Result<()> {
        self.kv.clear()?;
        self.invalidate_analytics();
        Ok(())
    }
}

fn compute_analytics(events: &[UsageEvent], scores: &[f64]) -> UsageAnalytics {
    let mut total_sessions = 0u64;
    let mut mode_switches = 0u64;
    let mut switch_counts: HashMap<Mode, u64> = HashMap::new();
    let mut session_duration_ms = 0u64;
    let mut open_session: Option<DateTime<Utc>> = None;

    for event in events {
        match event.kind {
            EventKind::SessionStart => {
                total_sessions += 1;
                open_session = Some(event.timestamp);
            }
            EventKind::SessionEnd => {
                if let Some(started) = open_session.take() {
                    session_duration_ms +=
                        (event.timestamp - started).num_milliseconds().max(0) as u64;
                }
            }
            EventKind::ModeSwitch => {
                mode_switches += 1;
                if let Some(mode) = event.mode {
                    *switch_counts.entry(mode).or_insert(0) += 1;
                }
            }
        }
    }

    // Stable tie-break: fixed mode order, first maximum wins.
    let mut most_used_mode = None;
    let mut best = 0u64;
    for mode in [Mode::Executive, Mode::Analyst, Mode::Team, Mode::Technical] {
        if let Some(count) = switch_counts.get(&mode) {
            if *count > best {
                best = *count;
                most_used_mode = Some(mode);
            }
        }
    }

    let average_satisfaction = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    UsageAnalytics {
        total_sessions,
        mode_switches,
        most_used_mode,
        average_satisfaction,
        session_duration_ms,
    }
}
