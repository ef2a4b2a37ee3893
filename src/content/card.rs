use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One piece of generated intelligence as the dashboard renders it.
///
/// Known card fields are typed; anything else lands in `extra` and passes
/// through filtering untouched. This keeps the filter pattern-matching on
/// recognized fields while staying tolerant of schema drift upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntelCard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub impact_areas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_impact: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_actions: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub insights: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_usage: Option<Value>,
    /// Marker set by the team filter so downstream UI can attach
    /// collaborative affordances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collaboration: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IntelCard {
    /// Parse an arbitrary content object. Non-object values and objects
    /// whose known fields have unexpected shapes are treated as fully
    /// unknown content rather than an error.
    pub fn from_value(value: Value) -> IntelCard {
        match serde_json::from_value::<IntelCard>(value.clone()) {
            Ok(card) => card,
            Err(_) => {
                let mut card = IntelCard::default();
                if let Value::Object(map) = value {
                    card.extra = map;
                }
                card
            }
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
