//! Disclosure mode state and per-mode configuration.

use serde::{Deserialize, Serialize};

use crate::models::role::{suggested_mode_for_role, Mode, Role};

/// Static per-mode parameters consumed by the budgeter and the content
/// filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeConfig {
    /// Cognitive-load ceiling for the budgeter. Technical mode is
    /// effectively unbounded.
    pub cognitive_load_limit: f64,
    /// Cap on priority actions kept by the executive content filter.
    pub max_insights: usize,
    pub show_technical_details: bool,
    pub collaboration_enabled: bool,
}

pub fn mode_config(mode: Mode) -> ModeConfig {
    match mode {
        Mode::Executive => ModeConfig {
            cognitive_load_limit: 15.0,
            max_insights: 3,
            show_technical_details: false,
            collaboration_enabled: false,
        },
        Mode::Analyst => ModeConfig {
            cognitive_load_limit: 40.0,
            max_insights: 7,
            show_technical_details: true,
            collaboration_enabled: false,
        },
        Mode::Team => ModeConfig {
            cognitive_load_limit: 30.0,
            max_insights: 5,
            show_technical_details: false,
            collaboration_enabled: true,
        },
        Mode::Technical => ModeConfig {
            cognitive_load_limit: f64::INFINITY,
            max_insights: 10,
            show_technical_details: true,
            collaboration_enabled: false,
        },
    }
}

pub fn is_feature_enabled(mode: Mode, feature: &str) -> bool {
    match feature {
        "annotations" | "sharing" | "collaboration" => mode == Mode::Team,
        "technical_details" => matches!(mode, Mode::Analyst | Mode::Technical),
        "summaries" => true,
        _ => false,
    }
}

/// Holds the current disclosure mode for one session.
#[derive(Debug, Clone)]
pub struct ModeController {
    current: Mode,
}

impl ModeController {
    pub fn new(initial: Mode) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Total replacement. Switching to the already-current mode is a
    /// no-op for state but still reported, so consumers reset any
    /// mode-local UI state they hold.
    pub fn switch_mode(&mut self, mode: Mode) -> Mode {
        self.current = mode;
        self.current
    }

    /// Preview the mode a role would map to without switching.
    pub fn suggest_mode(&self, role: Role) -> Mode {
        suggested_mode_for_role(role)
    }

    pub fn config(&self) -> ModeConfig {
        mode_config(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executive_has_the_lowest_ceiling() {
        let exec = mode_config(Mode::Executive).cognitive_load_limit;
        for mode in [Mode::Analyst, Mode::Team, Mode::Technical] {
            assert!(exec < mode_config(mode).cognitive_load_limit);
        }
        assert!(mode_config(Mode::Technical)
            .cognitive_load_limit
            .is_infinite());
    }

    #[test]
    fn collaboration_features_are_team_only() {
        for feature in ["annotations", "sharing", "collaboration"] {
            assert!(is_feature_enabled(Mode::Team, feature));
            assert!(!is_feature_enabled(Mode::Executive, feature));
            assert!(!is_feature_enabled(Mode::Analyst, feature));
            assert!(!is_feature_enabled(Mode::Technical, feature));
        }
    }

    #[test]
    fn unknown_features_are_disabled() {
        assert!(!is_feature_enabled(Mode::Technical, "time_travel"));
    }

    #[test]
    fn switching_to_current_mode_is_idempotent() {
        let mut controller = ModeController::new(Mode::Analyst);
        assert_eq!(controller.switch_mode(Mode::Analyst), Mode::Analyst);
        assert_eq!(controller.current(), Mode::Analyst);
        controller.switch_mode(Mode::Executive);
        assert_eq!(controller.current(), Mode::Executive);
    }

    #[test]
    fn suggest_mode_matches_detection_map() {
        let controller = ModeController::new(Mode::Analyst);
        assert_eq!(controller.suggest_mode(Role::Executive), Mode::Executive);
        assert_eq!(controller.suggest_mode(Role::Team), Mode::Team);
        assert_eq!(controller.current(), Mode::Analyst);
    }
}
