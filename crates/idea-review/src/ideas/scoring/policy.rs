use std::fmt;

use serde::{Deserialize, Serialize};

use super::super::domain::IdeaField;
use super::ScoreBreakdown;

const HIGH_THRESHOLD: u8 = 70;
const MODERATE_THRESHOLD: u8 = 40;

const SCOPE_SUGGESTION: &str =
    "Consider narrowing scope and validating assumptions with small experiments.";

/// Ordered readiness tier derived from the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    Low,
    Moderate,
    High,
}

impl Classification {
    pub const ALL: [Classification; 3] = [
        Classification::Low,
        Classification::Moderate,
        Classification::High,
    ];

    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            Classification::High
        } else if score >= MODERATE_THRESHOLD {
            Classification::Moderate
        } else {
            Classification::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Classification::Low => "Low",
            Classification::Moderate => "Moderate",
            Classification::High => "High",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn field_suggestion(field: IdeaField) -> &'static str {
    match field {
        IdeaField::Problem => "Strengthen the problem statement with specifics and evidence.",
        IdeaField::Solution => "Describe a clearer, testable solution and differentiation.",
        IdeaField::Market => "Quantify target market size and personas.",
        IdeaField::RevenueModel => "Explain pricing and revenue channels in more detail.",
        IdeaField::Team => "Highlight team roles, experience, and execution plan.",
    }
}

/// One hint per weak section in field order, then the scope note for `Low` ideas.
pub(crate) fn suggestions(
    breakdown: &ScoreBreakdown,
    classification: Classification,
) -> Vec<String> {
    let mut suggestions: Vec<String> = breakdown
        .iter()
        .filter(|(_, score)| score.is_weak())
        .map(|(field, _)| field_suggestion(field).to_string())
        .collect();

    if classification == Classification::Low {
        suggestions.push(SCOPE_SUGGESTION.to_string());
    }

    suggestions
}
