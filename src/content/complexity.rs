use serde_json::Value;

use crate::content::card::IntelCard;

/// Per-list cap so one enormous source list cannot dominate the score.
const LIST_ELEMENT_CAP: usize = 10;

/// Deterministic weighted count of how much a card asks of the reader:
/// +1 per scalar field, +1 per list element (capped per list), +2 per
/// nested structured field. Diagnostic only: the budgeter and the
/// complexity-reduced metric consume it, filtering decisions never do.
pub fn calculate_complexity(card: &IntelCard) -> u32 {
    let mut score = 0u32;

    let scalars = [
        card.title.is_some(),
        card.summary.is_some(),
        card.executive_summary.is_some(),
        card.risk_level.is_some(),
        card.primary_impact.is_some(),
        card.evidence_summary.is_some(),
        card.collaboration.is_some(),
    ];
    score += scalars.iter().filter(|present| **present).count() as u32;

    for list in [&card.insights, &card.priority_actions, &card.sources] {
        score += list.len().min(LIST_ELEMENT_CAP) as u32;
    }

    if !card.impact_areas.is_empty() {
        score += 2;
    }
    if card.api_usage.is_some() {
        score += 2;
    }

    for value in card.extra.values() {
        match value {
            Value::Object(_) | Value::Array(_) => score += 2,
            _ => score += 1,
        }
    }

    score
}
