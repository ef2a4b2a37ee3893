use crate::content::card::IntelCard;
use crate::models::role::Mode;

/// Jargon tokens stripped from synthesized executive summaries.
const JARGON_TOKENS: &[&str] = &[
    "api",
    "apis",
    "endpoint",
    "endpoints",
    "json",
    "payload",
    "backend",
    "pipeline",
    "schema",
    "webhook",
    "latency",
    "throughput",
    "sdk",
];

/// Produce a single bounded-length summary string for a card.
///
/// Executive mode prefers an explicit `executive_summary`, else
/// synthesizes one from title, risk level, and impact areas with jargon
/// stripped. The other modes prefer the full `summary` verbatim. Missing
/// fields degrade to an empty string, never an error, so one malformed
/// card cannot break the surrounding view.
pub fn generate_summary(card: &IntelCard, mode: Mode, max_length: usize) -> String {
    let raw = match mode {
        Mode::Executive => card
            .executive_summary
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| synthesize_executive_summary(card)),
        Mode::Analyst | Mode::Technical | Mode::Team => card
            .summary
            .clone()
            .or_else(|| card.executive_summary.clone())
            .unwrap_or_default(),
    };

    truncate_on_word_boundary(raw.trim(), max_length)
}

fn synthesize_executive_summary(card: &IntelCard) -> String {
    let mut parts = Vec::new();
    if let Some(title) = card.title.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(strip_jargon(title));
    }
    if let Some(risk) = card.risk_level.as_deref().filter(|s| !s.trim().is_empty()) {
        parts.push(format!("Risk level: {risk}"));
    }
    if !card.impact_areas.is_empty() {
        parts.push(format!(
            "Impact: {}",
            strip_jargon(&card.impact_areas.join(", "))
        ));
    }
    parts.join(". ")
}

fn strip_jargon(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            let bare: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            !JARGON_TOKENS.contains(&bare.as_str())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

const ELLIPSIS: &str = "...";

/// Cut on a word boundary and append an ellipsis marker. The result never
/// exceeds `max_length` characters, ellipsis included.
fn truncate_on_word_boundary(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    if max_length <= ELLIPSIS.len() {
        return text.chars().take(max_length).collect();
    }

    let budget = max_length - ELLIPSIS.len();
    let mut kept = String::new();
    for word in text.split_whitespace() {
        let needed = if kept.is_empty() {
            word.chars().count()
        } else {
            word.chars().count() + 1
        };
        if kept.chars().count() + needed > budget {
            break;
        }
        if !kept.is_empty() {
            kept.push(' ');
        }
        kept.push_str(word);
    }

    if kept.is_empty() {
        // Single word longer than the whole budget: hard cut.
        kept = text.chars().take(budget).collect();
    }

    kept.push_str(ELLIPSIS);
    kept
}
