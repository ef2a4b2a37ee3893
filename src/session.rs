//! Session-scoped engine object.
//!
//! One `AdaptiveSession` exists per active user session: created on
//! session start, torn down with [`AdaptiveSession::end`]. It owns the
//! current mode, the adaptation metrics, and the in-memory preferences,
//! which stay authoritative for the session even when the durable store
//! is unavailable.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use log::warn;

use crate::content::{apply_content_filter, calculate_complexity, generate_summary, IntelCard};
use crate::detector::{detect, Clock, UserContext};
use crate::disclosure::{DisclosureOutcome, DisclosureView};
use crate::models::analytics::{AdaptationMetrics, EventKind, UsageAnalytics};
use crate::models::preferences::TribePreferences;
use crate::models::role::{Mode, Role, RoleDetectionResult};
use crate::modes::{is_feature_enabled, ModeConfig, ModeController};
use crate::store::{KeyValueStore, PreferenceStore};

pub struct AdaptiveSession<S: KeyValueStore> {
    store: PreferenceStore<S>,
    modes: ModeController,
    metrics: AdaptationMetrics,
    preferences: TribePreferences,
    clock: Box<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl<S: KeyValueStore> AdaptiveSession<S> {
    /// Start a session against the given storage backing. A failed
    /// preference load falls back to defaults; the session always comes
    /// up.
    pub fn start(kv: S, clock: Box<dyn Clock>) -> Self {
        let store = PreferenceStore::new(kv);
        let preferences = match store.load_user_preferences() {
            Ok(Some(prefs)) => prefs,
            Ok(None) => TribePreferences::default(),
            Err(err) => {
                warn!("failed to load preferences, using defaults: {err:#}");
                TribePreferences::default()
            }
        };

        let started_at = clock.now();
        if let Err(err) = store.record_event(EventKind::SessionStart, None, started_at) {
            warn!("failed to record session start: {err:#}");
        }

        let modes = ModeController::new(preferences.default_mode);
        Self {
            store,
            modes,
            metrics: AdaptationMetrics::default(),
            preferences,
            clock,
            started_at,
        }
    }

    pub fn current_mode(&self) -> Mode {
        self.modes.current()
    }

    pub fn mode_config(&self) -> ModeConfig {
        self.modes.config()
    }

    pub fn feature_enabled(&self, feature: &str) -> bool {
        is_feature_enabled(self.modes.current(), feature)
    }

    pub fn preferences(&self) -> &TribePreferences {
        &self.preferences
    }

    pub fn metrics(&self) -> &AdaptationMetrics {
        &self.metrics
    }

    pub fn store(&self) -> &PreferenceStore<S> {
        &self.store
    }

    pub fn detect_role(&self, context: &UserContext) -> RoleDetectionResult {
        detect(context, self.clock.as_ref())
    }

    /// Record the user's confirmation (or correction) of a detection.
    /// A history write failure is a warning; the in-session detection
    /// result stays valid either way.
    pub fn confirm_role(&self, detection: &RoleDetectionResult, confirmed: Role) {
        if let Err(err) = self.store.save_role_detection(
            detection.detected_role,
            confirmed,
            detection.confidence,
            self.clock.now(),
        ) {
            warn!("failed to record role confirmation: {err:#}");
        }
    }

    /// Switch the disclosure mode. Idempotent switches still record an
    /// event so analytics see every user decision.
    pub fn switch_mode(&mut self, mode: Mode) {
        self.modes.switch_mode(mode);
        if let Err(err) = self
            .store
            .record_event(EventKind::ModeSwitch, Some(mode), self.clock.now())
        {
            warn!("failed to record mode switch: {err:#}");
        }
    }

    pub fn suggest_mode(&self, role: Role) -> Mode {
        self.modes.suggest_mode(role)
    }

    pub fn summarize(&self, card: &IntelCard, max_length: usize) -> String {
        generate_summary(card, self.modes.current(), max_length)
    }

    /// Filter a card for the current mode, updating the adaptation
    /// metrics with how much complexity the projection removed.
    pub fn filter_content(&mut self, card: &IntelCard) -> IntelCard {
        let before = calculate_complexity(card);
        let filtered = apply_content_filter(card, self.modes.current());
        let after = calculate_complexity(&filtered);

        self.metrics.record_filtered();
        self.metrics
            .record_complexity_reduction(u64::from(before.saturating_sub(after)));
        filtered
    }

    pub fn complexity(&self, card: &IntelCard) -> u32 {
        calculate_complexity(card)
    }

    /// Budget a composite view's sections against the current mode.
    pub fn compute_disclosure(&self, view: &mut DisclosureView) -> DisclosureOutcome {
        view.compute(self.modes.current())
    }

    pub fn record_satisfaction(&mut self, score: f64) -> Result<()> {
        if !(1.0..=5.0).contains(&score) {
            bail!("satisfaction score must be between 1 and 5, got {score}");
        }
        self.metrics.record_satisfaction(score);
        if let Err(err) = self.store.record_satisfaction(score) {
            warn!("failed to persist satisfaction score: {err:#}");
        }
        Ok(())
    }

    /// Whole-object preference replacement. Validation failures reject
    /// the update; storage failures are warnings and the in-memory copy
    /// stays authoritative for the session.
    pub fn update_preferences(&mut self, prefs: TribePreferences) -> Result<()> {
        prefs.validate()?;
        self.preferences = prefs;
        if let Err(err) = self.store.save_user_preferences(&self.preferences) {
            warn!("failed to persist preferences: {err:#}");
        }
        Ok(())
    }

    pub fn usage_analytics(&self) -> Result<UsageAnalytics> {
        self.store.get_usage_analytics()
    }

    /// End the session: record the closing event and reset the
    /// session-scoped metrics.
    pub fn end(&mut self) {
        let ended_at = self.clock.now();
        if let Err(err) = self.store.record_event(EventKind::SessionEnd, None, ended_at) {
            warn!("failed to record session end: {err:#}");
        }
        let duration_ms = (ended_at - self.started_at).num_milliseconds().max(0);
        log::info!("session ended after {duration_ms}ms");
        self.metrics.reset();
    }
}
