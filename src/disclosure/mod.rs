//! Progressive disclosure budgeting for composite views.
//!
//! A view declares an ordered list of named sections; the budgeter
//! decides which are visible for the current mode and enforces the
//! executive cognitive-load ceiling by auto-collapsing.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::role::Mode;
use crate::modes::mode_config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Priority {
    Critical,
    Important,
    Supplementary,
}

impl Priority {
    /// Extra load an expanded section of this priority carries.
    fn weight_bonus(&self) -> f64 {
        match self {
            Priority::Critical => 2.0,
            Priority::Important => 1.0,
            Priority::Supplementary => 0.0,
        }
    }
}

fn default_cognitive_weight() -> f64 {
    5.0
}

/// One collapsible section of a view. Declared per view, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureLevel {
    pub id: String,
    pub title: String,
    #[serde(default = "default_cognitive_weight")]
    pub cognitive_weight: f64,
    pub priority: Priority,
    pub default_expanded: bool,
    pub content: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureOutcome {
    pub visible_ids: Vec<String>,
    pub expanded_ids: Vec<String>,
    pub cognitive_load: f64,
}

/// Per-view disclosure state: the declared levels plus each level's
/// expansion flag. Toggles are independent per level; the only automatic
/// transition is expanded -> collapsed when the executive budget rule
/// fires in [`DisclosureView::compute`].
#[derive(Debug, Clone)]
pub struct DisclosureView {
    levels: Vec<DisclosureLevel>,
    expanded: Vec<bool>,
}

impl DisclosureView {
    pub fn new(levels: Vec<DisclosureLevel>) -> Self {
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].iter().any(|other| other.id == level.id) {
                warn!("duplicate disclosure level id '{}' in view", level.id);
            }
        }
        let expanded = levels.iter().map(|level| level.default_expanded).collect();
        Self { levels, expanded }
    }

    pub fn levels(&self) -> &[DisclosureLevel] {
        &self.levels
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.index_of(id)
            .map(|i| self.expanded[i])
            .unwrap_or(false)
    }

    /// User-driven toggle. Affects only the named level.
    pub fn toggle(&mut self, id: &str) {
        if let Some(i) = self.index_of(id) {
            self.expanded[i] = !self.expanded[i];
        }
    }

    pub fn set_expanded(&mut self, id: &str, expanded: bool) {
        if let Some(i) = self.index_of(id) {
            self.expanded[i] = expanded;
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.id == id)
    }

    fn visible_count(&self, mode: Mode) -> usize {
        let count = match mode {
            Mode::Executive => 1,
            Mode::Analyst | Mode::Team => 2,
            Mode::Technical => self.levels.len(),
        };
        count.min(self.levels.len())
    }

    fn load_over(&self, visible: usize) -> f64 {
        self.levels[..visible]
            .iter()
            .zip(&self.expanded)
            .map(|(level, expanded)| {
                if *expanded {
                    level.cognitive_weight + level.priority.weight_bonus()
                } else {
                    1.0
                }
            })
            .sum()
    }

    /// Determine visibility, compute load, and enforce the executive
    /// budget. Over-budget executive views auto-collapse to at most the
    /// first critical level; other modes surface the load unchanged and
    /// leave correction to the user.
    pub fn compute(&mut self, mode: Mode) -> DisclosureOutcome {
        let visible = self.visible_count(mode);
        let limit = mode_config(mode).cognitive_load_limit;
        let mut load = self.load_over(visible);

        if mode == Mode::Executive && load > limit {
            let keep = self.levels[..visible]
                .iter()
                .position(|level| level.priority == Priority::Critical);
            for (i, flag) in self.expanded.iter_mut().enumerate().take(visible) {
                *flag = keep == Some(i) && *flag;
            }
            load = self.load_over(visible);
        }

        DisclosureOutcome {
            visible_ids: self.levels[..visible]
                .iter()
                .map(|level| level.id.clone())
                .collect(),
            expanded_ids: self.levels[..visible]
                .iter()
                .zip(&self.expanded)
                .filter(|(_, expanded)| **expanded)
                .map(|(level, _)| level.id.clone())
                .collect(),
            cognitive_load: load,
        }
    }
}
