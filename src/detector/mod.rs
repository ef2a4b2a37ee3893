//! Role detection from session context signals.
//!
//! Deterministic, explainable additive scoring. Every signal that moves
//! the score appends a reasoning line, so any non-trivial detection can
//! be shown to the user. No side effects and no error path: absent
//! signals fall back to the analyst default with low confidence.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::role::{suggested_mode_for_role, Role, RoleDetectionResult};

/// Session context supplied by the hosting app's auth layer.
/// Immutable for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    pub company_name: String,
    pub industry: Option<String>,
}

/// Wall-clock capability so detection stays a pure function of its inputs.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

const BASE_CONFIDENCE: f64 = 0.5;
const SIGNAL_BONUS: f64 = 0.1;
const TITLE_MATCH_CONFIDENCE: f64 = 0.9;
const BUSINESS_HOURS: std::ops::Range<u32> = 8..18;

/// Fixed industry -> (role, baseline confidence) table.
const INDUSTRY_ROLES: &[(&str, Role, f64)] = &[
    ("SaaS & Cloud Services", Role::Analyst, 0.7),
    ("Financial Services", Role::Executive, 0.75),
    ("Healthcare & Life Sciences", Role::Analyst, 0.7),
    ("Retail & E-Commerce", Role::Team, 0.65),
    ("Manufacturing & Industrial", Role::Team, 0.65),
    ("Media & Entertainment", Role::Team, 0.6),
    ("Cybersecurity", Role::Analyst, 0.8),
    ("Consulting & Professional Services", Role::Executive, 0.75),
];

/// Executive-title tokens matched case-insensitively anywhere in the
/// company name field.
const EXECUTIVE_TITLE_TOKENS: &[&str] = &[
    "ceo",
    "cfo",
    "coo",
    "cto",
    "vp",
    "vice president",
    "director",
    "chief",
    "head of",
    "president",
    "founder",
    "owner",
];

pub fn industry_table() -> &'static [(&'static str, Role, f64)] {
    INDUSTRY_ROLES
}

/// Infer the viewing role from context signals.
///
/// Additive scoring: start at the analyst default with 0.5 confidence,
/// add weak bonuses for each present signal, then let the industry table
/// and the executive-title scan raise the floor. The business-hours
/// bonus is corroborating only and never changes the role.
pub fn detect(context: &UserContext, clock: &dyn Clock) -> RoleDetectionResult {
    let mut role = Role::Analyst;
    let mut confidence = BASE_CONFIDENCE;
    let mut reasoning = Vec::new();

    if let Some(industry) = context.industry.as_deref().filter(|s| !s.trim().is_empty()) {
        reasoning.push(format!("Industry context available: {industry}"));
        confidence += SIGNAL_BONUS;
    }

    if !context.company_name.trim().is_empty() {
        reasoning.push("Company context available".to_string());
        confidence += SIGNAL_BONUS;
    }

    if let Some(industry) = context.industry.as_deref() {
        if let Some((name, mapped_role, baseline)) = INDUSTRY_ROLES
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(industry.trim()))
        {
            role = *mapped_role;
            confidence = confidence.max(*baseline);
            reasoning.push(format!(
                "Industry '{name}' typically maps to {} usage",
                mapped_role.as_str()
            ));
        }
    }

    let company_lower = context.company_name.to_lowercase();
    if EXECUTIVE_TITLE_TOKENS
        .iter()
        .any(|token| company_lower.contains(token))
    {
        role = Role::Executive;
        confidence = confidence.max(TITLE_MATCH_CONFIDENCE);
        reasoning.push("Executive role indicators detected in company context".to_string());
    }

    if role == Role::Executive && BUSINESS_HOURS.contains(&clock.now().hour()) {
        confidence += SIGNAL_BONUS;
        reasoning.push("Business-hours access supports executive usage".to_string());
    }

    confidence = confidence.clamp(0.0, 1.0);

    RoleDetectionResult {
        detected_role: role,
        confidence,
        reasoning,
        suggested_mode: suggested_mode_for_role(role),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::at_hour;
    use super::*;
    use crate::models::role::Mode;

    fn context(company: &str, industry: Option<&str>) -> UserContext {
        UserContext {
            company_name: company.to_string(),
            industry: industry.map(str::to_string),
        }
    }

    #[test]
    fn no_signals_yields_analyst_default() {
        let result = detect(&context("", None), &at_hour(3));
        assert_eq!(result.detected_role, Role::Analyst);
        assert!((result.confidence - 0.5).abs() < 1e-9);
        assert_eq!(result.suggested_mode, Mode::Analyst);
        assert!(result.reasoning.is_empty());
    }

    #[test]
    fn every_table_industry_maps_to_its_role() {
        for (industry, role, baseline) in industry_table() {
            let result = detect(&context("", Some(industry)), &at_hour(3));
            assert_eq!(result.detected_role, *role, "industry {industry}");
            assert!(
                result.confidence >= *baseline,
                "industry {industry}: confidence {} below baseline {baseline}",
                result.confidence
            );
        }
    }

    #[test]
    fn industry_match_is_case_insensitive() {
        let result = detect(&context("", Some("cybersecurity")), &at_hour(3));
        assert_eq!(result.detected_role, Role::Analyst);
        assert!(result.confidence >= 0.8);
    }

    #[test]
    fn executive_title_forces_executive_role() {
        for company in [
            "Acme, Office of the CEO",
            "Northwind VP Staff",
            "Initech Director of Ops",
            "Chief of Staff, Globex",
            "Head of Product at Hooli",
        ] {
            let result = detect(&context(company, None), &at_hour(3));
            assert_eq!(result.detected_role, Role::Executive, "company {company}");
            assert!(result.confidence >= 0.9, "company {company}");
        }
    }

    #[test]
    fn title_override_beats_industry_mapping() {
        let result = detect(
            &context("Acme VP of Product", Some("SaaS & Cloud Services")),
            &at_hour(3),
        );
        assert_eq!(result.detected_role, Role::Executive);
        assert!(result.confidence >= 0.9);
        assert!(result
            .reasoning
            .iter()
            .any(|line| line.contains("SaaS & Cloud Services")));
        assert!(result
            .reasoning
            .iter()
            .any(|line| line.contains("Executive role indicators detected")));
    }

    #[test]
    fn business_hours_bonus_applies_only_to_executives() {
        let in_hours = detect(&context("Acme CEO Office", None), &at_hour(10));
        let off_hours = detect(&context("Acme CEO Office", None), &at_hour(23));
        assert!(in_hours.confidence > off_hours.confidence);
        assert!(in_hours
            .reasoning
            .iter()
            .any(|line| line.contains("Business-hours")));

        // Analyst detection is unaffected by the clock.
        let analyst_day = detect(&context("Acme", Some("Cybersecurity")), &at_hour(10));
        let analyst_night = detect(&context("Acme", Some("Cybersecurity")), &at_hour(23));
        assert_eq!(analyst_day.confidence, analyst_night.confidence);
    }

    #[test]
    fn confidence_never_exceeds_one() {
        let result = detect(
            &context("Chief Executive Office, Acme", Some("Financial Services")),
            &at_hour(10),
        );
        assert!(result.confidence <= 1.0);
        assert_eq!(result.detected_role, Role::Executive);
    }

    #[test]
    fn reasoning_is_never_empty_above_half_confidence() {
        let cases = [
            context("Acme", None),
            context("", Some("Retail & E-Commerce")),
            context("Globex VP Sales", Some("Manufacturing & Industrial")),
        ];
        for ctx in cases {
            let result = detect(&ctx, &at_hour(12));
            if result.confidence > 0.5 {
                assert!(
                    !result.reasoning.is_empty(),
                    "confidence {} with no reasoning",
                    result.confidence
                );
            }
        }
    }
}
