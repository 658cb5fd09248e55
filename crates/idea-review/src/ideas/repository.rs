use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{ExpertId, ExpertReview, IdeaContent, IdeaId, OwnerId};
use super::experts::ExpertProfile;
use super::scoring::{Classification, ScoringResult};

const FALLBACK_TITLE_CHARS: usize = 50;
const MONTHLY_WINDOW: Months = Months::new(6);

/// Stored idea: submitted text, the score computed from it, and review state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRecord {
    pub id: IdeaId,
    pub owner: OwnerId,
    pub title: Option<String>,
    #[serde(flatten)]
    pub content: IdeaContent,
    #[serde(flatten)]
    pub evaluation: ScoringResult,
    pub feedback: String,
    pub expert_reviews: Vec<ExpertReview>,
    pub average_expert_rating: f32,
    pub total_expert_reviews: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl IdeaRecord {
    /// Title, else the opening of the problem statement, else a placeholder.
    pub fn display_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        let problem = self.content.problem.trim();
        if problem.is_empty() {
            "Idea".to_string()
        } else {
            problem.chars().take(FALLBACK_TITLE_CHARS).collect()
        }
    }

    pub fn reviewed_by(&self, expert: &ExpertId) -> bool {
        self.expert_reviews
            .iter()
            .any(|review| &review.expert == expert)
    }

    /// Insert or replace the expert's review, then refresh the rating aggregates.
    pub(crate) fn record_review(&mut self, review: ExpertReview) {
        match self
            .expert_reviews
            .iter_mut()
            .find(|existing| existing.expert == review.expert)
        {
            Some(existing) => {
                existing.rating = review.rating;
                existing.review = review.review;
                if !review.feedback.trim().is_empty() {
                    existing.feedback = review.feedback;
                }
                existing.submitted_at = review.submitted_at;
            }
            None => self.expert_reviews.push(review),
        }

        self.refresh_rating();
    }

    fn refresh_rating(&mut self) {
        let total = self.expert_reviews.len() as u32;
        self.total_expert_reviews = total;
        self.average_expert_rating = if total == 0 {
            0.0
        } else {
            let sum: u32 = self
                .expert_reviews
                .iter()
                .map(|review| u32::from(review.rating))
                .sum();
            sum as f32 / total as f32
        };
    }

    pub fn summary_view(&self) -> IdeaSummaryView {
        IdeaSummaryView {
            id: self.id.clone(),
            title: self.display_title(),
            score: self.evaluation.score,
            classification: self.evaluation.classification,
            average_expert_rating: self.average_expert_rating,
            total_expert_reviews: self.total_expert_reviews,
            created_at: self.created_at,
        }
    }
}

/// Selection applied by list, export and review lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaFilter {
    pub owner: Option<OwnerId>,
    pub classification: Option<Classification>,
    pub reviewed_by: Option<ExpertId>,
}

impl IdeaFilter {
    pub fn matches(&self, record: &IdeaRecord) -> bool {
        if let Some(owner) = &self.owner {
            if &record.owner != owner {
                return false;
            }
        }
        if let Some(classification) = self.classification {
            if record.evaluation.classification != classification {
                return false;
            }
        }
        if let Some(expert) = &self.reviewed_by {
            if !record.reviewed_by(expert) {
                return false;
            }
        }
        true
    }
}

/// Storage abstraction so the service can run against any document store.
pub trait IdeaRepository: Send + Sync {
    fn insert(&self, record: IdeaRecord) -> Result<IdeaRecord, RepositoryError>;
    fn update(&self, record: IdeaRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &IdeaId) -> Result<Option<IdeaRecord>, RepositoryError>;
    fn delete(&self, id: &IdeaId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<IdeaRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact listing row for dashboards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaSummaryView {
    pub id: IdeaId,
    pub title: String,
    pub score: u8,
    pub classification: Classification,
    pub average_expert_rating: f32,
    pub total_expert_reviews: u32,
    pub created_at: DateTime<Utc>,
}

/// Aggregate counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaStats {
    pub total_ideas: usize,
    pub total_experts: usize,
    pub active_experts: usize,
    pub ideas_by_classification: Vec<ClassificationCount>,
    pub ideas_by_month: Vec<MonthlyCount>,
    pub average_score: f64,
    pub total_expert_reviews: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationCount {
    pub classification: Classification,
    pub count: usize,
}

/// Ideas created in one calendar month (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl IdeaStats {
    /// `ideas_by_month` covers ideas created in the six months up to `now`, oldest month first.
    pub fn from_records(
        records: &[IdeaRecord],
        experts: &[ExpertProfile],
        now: DateTime<Utc>,
    ) -> Self {
        let total_ideas = records.len();
        let ideas_by_classification = Classification::ALL
            .into_iter()
            .map(|classification| ClassificationCount {
                classification,
                count: records
                    .iter()
                    .filter(|record| record.evaluation.classification == classification)
                    .count(),
            })
            .collect();
        let average_score = if total_ideas == 0 {
            0.0
        } else {
            let sum: u32 = records
                .iter()
                .map(|record| u32::from(record.evaluation.score))
                .sum();
            f64::from(sum) / total_ideas as f64
        };

        Self {
            total_ideas,
            total_experts: experts.len(),
            active_experts: experts.iter().filter(|expert| expert.is_active).count(),
            ideas_by_classification,
            ideas_by_month: monthly_counts(records, now),
            average_score,
            total_expert_reviews: records
                .iter()
                .map(|record| record.total_expert_reviews)
                .sum(),
        }
    }

    pub fn count_for(&self, classification: Classification) -> usize {
        self.ideas_by_classification
            .iter()
            .find(|entry| entry.classification == classification)
            .map(|entry| entry.count)
            .unwrap_or(0)
    }
}

fn monthly_counts(records: &[IdeaRecord], now: DateTime<Utc>) -> Vec<MonthlyCount> {
    let since = now
        .checked_sub_months(MONTHLY_WINDOW)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for record in records.iter().filter(|record| record.created_at >= since) {
        let key = (record.created_at.year(), record.created_at.month());
        *months.entry(key).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| MonthlyCount { year, month, count })
        .collect()
}

/// Latest submissions and expert registrations for the admin feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub recent_ideas: Vec<IdeaSummaryView>,
    pub recent_experts: Vec<ExpertProfile>,
    pub generated_at: DateTime<Utc>,
}
