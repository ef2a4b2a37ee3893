use serde_json::Value;

use crate::content::card::IntelCard;
use crate::models::role::Mode;
use crate::modes::mode_config;

/// Field-key fragments considered technical detail. Executive filtering
/// drops any passthrough field whose key contains one of these.
const TECHNICAL_FIELD_FRAGMENTS: &[&str] = &[
    "api_",
    "raw_",
    "internal",
    "debug",
    "trace",
    "call_count",
    "latency",
];

pub fn is_technical_field(key: &str) -> bool {
    let key = key.to_lowercase();
    key == "api_usage"
        || TECHNICAL_FIELD_FRAGMENTS
            .iter()
            .any(|fragment| key.contains(fragment))
}

/// Structural projection of a card for a disclosure mode.
///
/// Analyst and technical modes are the identity transform: full depth is
/// the contract there. Team mode only marks the card for collaborative
/// affordances. Executive mode projects down to the decision-relevant
/// fields and replaces raw source lists with an evidence summary.
/// Idempotent for every mode.
pub fn apply_content_filter(card: &IntelCard, mode: Mode) -> IntelCard {
    match mode {
        Mode::Analyst | Mode::Technical => card.clone(),
        Mode::Team => {
            let mut out = card.clone();
            out.collaboration = Some(true);
            out
        }
        Mode::Executive => executive_projection(card),
    }
}

fn executive_projection(card: &IntelCard) -> IntelCard {
    let max_actions = mode_config(Mode::Executive).max_insights;

    let mut out = IntelCard {
        title: card.title.clone(),
        executive_summary: card
            .executive_summary
            .clone()
            .or_else(|| card.summary.clone()),
        risk_level: card.risk_level.clone(),
        primary_impact: card
            .primary_impact
            .clone()
            .or_else(|| card.impact_areas.first().cloned()),
        priority_actions: card.priority_actions.iter().take(max_actions).cloned().collect(),
        evidence_summary: card
            .evidence_summary
            .clone()
            .or_else(|| synthesize_evidence(&card.sources)),
        ..IntelCard::default()
    };

    out.extra = card
        .extra
        .iter()
        .filter(|(key, _)| !is_technical_field(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    out
}

/// One-line synthesis standing in for the raw source list.
fn synthesize_evidence(sources: &[Value]) -> Option<String> {
    if sources.is_empty() {
        return None;
    }
    let count = sources.len();
    match source_name(&sources[0]) {
        Some(name) => Some(format!("{count} sources analyzed, led by {name}")),
        None => Some(format!("{count} sources analyzed")),
    }
}

fn source_name(source: &Value) -> Option<String> {
    match source {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("title")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_card() -> IntelCard {
        IntelCard::from_value(json!({
            "title": "Rival raises Series C",
            "summary": "Long-form analyst narrative with full sourcing.",
            "risk_level": "high",
            "impact_areas": ["pricing", "enterprise sales", "hiring"],
            "priority_actions": ["brief sales", "refresh battlecards", "monitor hiring", "update pricing model"],
            "insights": ["a", "b"],
            "sources": [{"title": "TechCrunch"}, {"title": "S-1 filing"}, "analyst note"],
            "api_usage": {"calls": 14},
            "raw_call_log": [1, 2, 3],
            "region": "EMEA"
        }))
    }

    #[test]
    fn analyst_filter_is_identity() {
        let card = sample_card();
        assert_eq!(apply_content_filter(&card, Mode::Analyst), card);
        assert_eq!(apply_content_filter(&card, Mode::Technical), card);
    }

    #[test]
    fn team_filter_only_marks_collaboration() {
        let card = sample_card();
        let filtered = apply_content_filter(&card, Mode::Team);
        assert_eq!(filtered.collaboration, Some(true));
        let mut unmarked = filtered.clone();
        unmarked.collaboration = card.collaboration;
        assert_eq!(unmarked, card);
    }

    #[test]
    fn executive_filter_projects_to_decision_fields() {
        let filtered = apply_content_filter(&sample_card(), Mode::Executive);
        assert_eq!(filtered.title.as_deref(), Some("Rival raises Series C"));
        // Falls back to `summary` when no executive_summary exists.
        assert!(filtered.executive_summary.is_some());
        assert!(filtered.summary.is_none());
        assert_eq!(filtered.priority_actions.len(), 3);
        assert_eq!(filtered.primary_impact.as_deref(), Some("pricing"));
        assert!(filtered.impact_areas.is_empty());
        assert_eq!(
            filtered.evidence_summary.as_deref(),
            Some("3 sources analyzed, led by TechCrunch")
        );
        assert!(filtered.sources.is_empty());
        assert!(filtered.api_usage.is_none());
        assert!(filtered.extra.get("raw_call_log").is_none());
        assert_eq!(filtered.extra["region"], json!("EMEA"));
    }

    #[test]
    fn filtering_is_idempotent_for_every_mode() {
        let card = sample_card();
        for mode in [Mode::Executive, Mode::Analyst, Mode::Team, Mode::Technical] {
            let once = apply_content_filter(&card, mode);
            let twice = apply_content_filter(&once, mode);
            assert_eq!(once, twice, "mode {}", mode.as_str());
        }
    }

    #[test]
    fn empty_card_filters_to_empty_card() {
        let filtered = apply_content_filter(&IntelCard::default(), Mode::Executive);
        assert_eq!(filtered.to_value(), json!({}));
    }

    #[test]
    fn technical_field_detection() {
        assert!(is_technical_field("api_usage"));
        assert!(is_technical_field("raw_call_log"));
        assert!(is_technical_field("internal_ref"));
        assert!(is_technical_field("query_latency_ms"));
        assert!(!is_technical_field("region"));
        assert!(!is_technical_field("summary"));
    }
}
