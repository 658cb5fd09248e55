use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::domain::ExpertId;
use super::repository::RepositoryError;

/// Self-described background an expert registers with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertDetails {
    pub specialization: String,
    #[serde(rename = "experience")]
    pub experience_years: u32,
    pub bio: String,
    #[serde(deserialize_with = "one_or_many")]
    pub expertise: Vec<String>,
    pub profession: String,
    pub linkedin: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub previous_companies: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Accepts `"AI"` as shorthand for `["AI"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}

/// Create-or-replace payload for an expert profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfileSubmission {
    pub expert: ExpertId,
    #[serde(flatten)]
    pub details: ExpertDetails,
}

/// Registered expert. New profiles start active but unverified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpertProfile {
    pub id: ExpertId,
    #[serde(flatten)]
    pub details: ExpertDetails,
    pub total_reviews: u32,
    pub is_active: bool,
    pub is_verified: bool,
    pub verification_notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExpertProfile {
    pub fn new(id: ExpertId, details: ExpertDetails, now: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            total_reviews: 0,
            is_active: true,
            is_verified: false,
            verification_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Only active, verified experts may review ideas.
    pub fn ensure_can_review(&self) -> Result<(), ExpertAccessError> {
        if !self.is_active {
            return Err(ExpertAccessError::Inactive(self.id.clone()));
        }
        if !self.is_verified {
            return Err(ExpertAccessError::PendingVerification(self.id.clone()));
        }
        Ok(())
    }
}

/// Reasons an expert is refused review access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpertAccessError {
    #[error("expert {0} has no profile")]
    NotRegistered(ExpertId),
    #[error("expert {0} is inactive")]
    Inactive(ExpertId),
    #[error("expert {0} is pending verification")]
    PendingVerification(ExpertId),
}

/// Storage for expert profiles, keyed by expert id.
pub trait ExpertRepository: Send + Sync {
    /// Insert or replace the profile.
    fn save(&self, profile: ExpertProfile) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ExpertId) -> Result<Option<ExpertProfile>, RepositoryError>;
    fn all(&self) -> Result<Vec<ExpertProfile>, RepositoryError>;
}
