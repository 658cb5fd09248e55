use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for stored ideas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdeaId(pub String);

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entrepreneur that submitted an idea.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

/// Expert attaching reviews to ideas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExpertId(pub String);

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The five free-text sections every idea is described by, in scoring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdeaField {
    Problem,
    Solution,
    Market,
    RevenueModel,
    Team,
}

impl IdeaField {
    pub const ALL: [IdeaField; 5] = [
        IdeaField::Problem,
        IdeaField::Solution,
        IdeaField::Market,
        IdeaField::RevenueModel,
        IdeaField::Team,
    ];

    /// Wire name used in JSON bodies and breakdown maps.
    pub fn key(self) -> &'static str {
        match self {
            IdeaField::Problem => "problem",
            IdeaField::Solution => "solution",
            IdeaField::Market => "market",
            IdeaField::RevenueModel => "revenueModel",
            IdeaField::Team => "team",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IdeaField::Problem => "Problem",
            IdeaField::Solution => "Solution",
            IdeaField::Market => "Market",
            IdeaField::RevenueModel => "Revenue model",
            IdeaField::Team => "Team",
        }
    }
}

impl fmt::Display for IdeaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw scoring input. Every field may be absent; absent and non-string JSON values
/// are both read as `None` and score as empty text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringInput {
    #[serde(default, deserialize_with = "lenient_text")]
    pub problem: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub solution: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub market: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub revenue_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub team: Option<String>,
}

impl ScoringInput {
    pub fn field(&self, field: IdeaField) -> Option<&str> {
        let value = match field {
            IdeaField::Problem => &self.problem,
            IdeaField::Solution => &self.solution,
            IdeaField::Market => &self.market,
            IdeaField::RevenueModel => &self.revenue_model,
            IdeaField::Team => &self.team,
        };
        value.as_deref()
    }

    pub fn set(&mut self, field: IdeaField, text: impl Into<String>) {
        let slot = match field {
            IdeaField::Problem => &mut self.problem,
            IdeaField::Solution => &mut self.solution,
            IdeaField::Market => &mut self.market,
            IdeaField::RevenueModel => &mut self.revenue_model,
            IdeaField::Team => &mut self.team,
        };
        *slot = Some(text.into());
    }

    pub fn with(mut self, field: IdeaField, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Validated idea text; every section is present once intake accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaContent {
    pub problem: String,
    pub solution: String,
    pub market: String,
    pub revenue_model: String,
    pub team: String,
}

impl IdeaContent {
    pub fn field(&self, field: IdeaField) -> &str {
        match field {
            IdeaField::Problem => &self.problem,
            IdeaField::Solution => &self.solution,
            IdeaField::Market => &self.market,
            IdeaField::RevenueModel => &self.revenue_model,
            IdeaField::Team => &self.team,
        }
    }

    pub(crate) fn field_mut(&mut self, field: IdeaField) -> &mut String {
        match field {
            IdeaField::Problem => &mut self.problem,
            IdeaField::Solution => &mut self.solution,
            IdeaField::Market => &mut self.market,
            IdeaField::RevenueModel => &mut self.revenue_model,
            IdeaField::Team => &mut self.team,
        }
    }

    pub fn scoring_input(&self) -> ScoringInput {
        IdeaField::ALL
            .into_iter()
            .fold(ScoringInput::default(), |input, field| {
                input.with(field, self.field(field))
            })
    }
}

/// Inbound payload for a new idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSubmission {
    pub owner: OwnerId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub fields: ScoringInput,
}

/// Partial edit; absent sections keep their stored text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(flatten)]
    pub fields: ScoringInput,
}

/// Review payload posted by an expert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertReviewSubmission {
    pub expert: ExpertId,
    pub rating: u8,
    pub review: String,
    #[serde(default)]
    pub feedback: String,
}

/// Stored expert review; at most one per expert and idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertReview {
    pub expert: ExpertId,
    pub rating: u8,
    pub review: String,
    pub feedback: String,
    pub submitted_at: DateTime<Utc>,
}
