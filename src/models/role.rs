use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience role inferred from session context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Executive,
    Analyst,
    Team,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Executive => "executive",
            Role::Analyst => "analyst",
            Role::Team => "team",
        }
    }
}

/// Disclosure mode. Mirrors [`Role`] but adds a fourth `Technical` level
/// used only by disclosure configuration, never produced by detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mode {
    Executive,
    Analyst,
    Team,
    Technical,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Executive => "executive",
            Mode::Analyst => "analyst",
            Mode::Team => "team",
            Mode::Technical => "technical",
        }
    }

    pub fn from_str(value: &str) -> Option<Mode> {
        match value {
            "executive" => Some(Mode::Executive),
            "analyst" => Some(Mode::Analyst),
            "team" => Some(Mode::Team),
            "technical" => Some(Mode::Technical),
            _ => None,
        }
    }
}

/// Fixed role -> mode map shared by the detector and the mode controller.
pub fn suggested_mode_for_role(role: Role) -> Mode {
    match role {
        Role::Executive => Mode::Executive,
        Role::Analyst => Mode::Analyst,
        Role::Team => Mode::Team,
    }
}

/// Output of a single detection run. Created fresh each time detection
/// runs; a new result supersedes the old one, nothing mutates in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetectionResult {
    pub detected_role: Role,
    pub confidence: f64,
    pub reasoning: Vec<String>,
    pub suggested_mode: Mode,
}

/// Append-only history entry pairing a detection with the user's
/// confirmation. Record-only: accuracy analysis reads it, scoring never
/// does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetectionRecord {
    pub detected_role: Role,
    pub confirmed_role: Role,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
}
