mod policy;
mod rules;

pub use policy::Classification;
pub use rules::score_field;
pub(crate) use rules::text_length;

use super::domain::{IdeaField, ScoringInput};
use serde::{Deserialize, Serialize};

/// Length-based quality proxy for a single section, one of `0, 2, 5, 8, 10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldScore(u8);

impl FieldScore {
    pub const EMPTY: FieldScore = FieldScore(0);
    pub const SPARSE: FieldScore = FieldScore(2);
    pub const OUTLINE: FieldScore = FieldScore(5);
    pub const DETAILED: FieldScore = FieldScore(8);
    pub const THOROUGH: FieldScore = FieldScore(10);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Sections below the outline tier trigger an improvement hint.
    pub fn is_weak(self) -> bool {
        self < FieldScore::OUTLINE
    }
}

/// Raw per-section scores, serialized in field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub problem: FieldScore,
    pub solution: FieldScore,
    pub market: FieldScore,
    pub revenue_model: FieldScore,
    pub team: FieldScore,
}

impl ScoreBreakdown {
    pub fn get(&self, field: IdeaField) -> FieldScore {
        match field {
            IdeaField::Problem => self.problem,
            IdeaField::Solution => self.solution,
            IdeaField::Market => self.market,
            IdeaField::RevenueModel => self.revenue_model,
            IdeaField::Team => self.team,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (IdeaField, FieldScore)> + '_ {
        IdeaField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

/// Scoring output stored alongside every idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub score: u8,
    pub classification: Classification,
    pub suggestions: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Relative weight of a section as a fraction of the total.
pub fn field_weight(field: IdeaField) -> f64 {
    f64::from(rules::weight_percent(field)) / 100.0
}

/// Score, classify and explain an idea. Total over every input, never panics.
pub fn compute_score_and_class(input: &ScoringInput) -> ScoringResult {
    let breakdown = rules::score_breakdown(input);
    let score = rules::weighted_score(&breakdown);
    let classification = Classification::from_score(score);
    let suggestions = policy::suggestions(&breakdown, classification);

    ScoringResult {
        score,
        classification,
        suggestions,
        breakdown,
    }
}
