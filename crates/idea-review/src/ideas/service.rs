use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::domain::{
    ExpertId, ExpertReview, ExpertReviewSubmission, IdeaField, IdeaId, IdeaSubmission, IdeaUpdate,
};
use super::experts::{ExpertAccessError, ExpertProfile, ExpertProfileSubmission, ExpertRepository};
use super::export::{ideas_to_csv, ExportError};
use super::intake::{normalize_title, IntakeGuard, IntakeViolation};
use super::repository::{
    IdeaFilter, IdeaRecord, IdeaRepository, IdeaStats, RecentActivity, RepositoryError,
};
use super::scoring::compute_score_and_class;

const RECENT_IDEAS: usize = 10;
const RECENT_EXPERTS: usize = 5;

/// Service composing the intake guard, scoring engine, idea store and expert registry.
pub struct IdeaReviewService<R, E> {
    guard: IntakeGuard,
    repository: Arc<R>,
    experts: Arc<E>,
    sequence: AtomicU64,
}

impl<R, E> IdeaReviewService<R, E>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    pub fn new(repository: Arc<R>, experts: Arc<E>) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            experts,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_idea_id(&self) -> IdeaId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        IdeaId(format!("idea-{id:06}"))
    }

    fn load(&self, id: &IdeaId) -> Result<IdeaRecord, IdeaServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    fn load_expert(&self, id: &ExpertId) -> Result<ExpertProfile, IdeaServiceError> {
        let profile = self.experts.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(profile)
    }

    /// Validate, score and store a new idea.
    pub fn submit(&self, submission: IdeaSubmission) -> Result<IdeaRecord, IdeaServiceError> {
        let accepted = self.guard.accept_submission(submission)?;
        let evaluation = compute_score_and_class(&accepted.content.scoring_input());
        let now = Utc::now();

        let record = IdeaRecord {
            id: self.next_idea_id(),
            owner: accepted.owner,
            title: accepted.title,
            content: accepted.content,
            evaluation,
            feedback: String::new(),
            expert_reviews: Vec::new(),
            average_expert_rating: 0.0,
            total_expert_reviews: 0,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(record)?;
        info!(
            idea = %stored.id,
            score = stored.evaluation.score,
            classification = %stored.evaluation.classification,
            "idea submitted"
        );
        Ok(stored)
    }

    /// Apply an edit and re-score from the merged text so the stored breakdown never goes stale.
    pub fn update(
        &self,
        id: &IdeaId,
        update: IdeaUpdate,
    ) -> Result<IdeaRecord, IdeaServiceError> {
        self.guard.check_update(&update)?;
        let mut record = self.load(id)?;

        if update.title.is_some() {
            record.title = normalize_title(update.title);
        }
        for field in IdeaField::ALL {
            if let Some(text) = update.fields.field(field) {
                *record.content.field_mut(field) = text.to_string();
            }
        }

        let previous = record.evaluation.score;
        record.evaluation = compute_score_and_class(&record.content.scoring_input());
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        info!(
            idea = %record.id,
            previous_score = previous,
            score = record.evaluation.score,
            "idea updated and re-scored"
        );
        Ok(record)
    }

    pub fn get(&self, id: &IdeaId) -> Result<IdeaRecord, IdeaServiceError> {
        self.load(id)
    }

    /// Matching ideas, newest first.
    pub fn list(&self, filter: &IdeaFilter) -> Result<Vec<IdeaRecord>, IdeaServiceError> {
        let mut records: Vec<IdeaRecord> = self
            .repository
            .all()?
            .into_iter()
            .filter(|record| filter.matches(record))
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        debug!(count = records.len(), "listed ideas");
        Ok(records)
    }

    pub fn delete(&self, id: &IdeaId) -> Result<(), IdeaServiceError> {
        self.repository.delete(id)?;
        info!(idea = %id, "idea deleted");
        Ok(())
    }

    /// Delete every listed idea that exists, returning how many were removed.
    pub fn bulk_delete(&self, ids: &[IdeaId]) -> Result<usize, IdeaServiceError> {
        if ids.is_empty() {
            return Err(IdeaServiceError::EmptySelection);
        }

        let mut deleted = 0;
        for id in ids {
            match self.repository.delete(id) {
                Ok(()) => deleted += 1,
                Err(RepositoryError::NotFound) => {
                    debug!(idea = %id, "bulk delete skipped missing idea");
                }
                Err(err) => return Err(err.into()),
            }
        }
        info!(requested = ids.len(), deleted, "bulk delete finished");
        Ok(deleted)
    }

    /// Record an expert review; a repeat review by the same expert replaces the earlier one.
    ///
    /// The reviewer must hold an active, verified profile. Their review total is recounted
    /// across all ideas afterwards.
    pub fn submit_review(
        &self,
        id: &IdeaId,
        submission: ExpertReviewSubmission,
    ) -> Result<IdeaRecord, IdeaServiceError> {
        self.guard.check_review(&submission)?;
        let mut expert = self
            .experts
            .fetch(&submission.expert)?
            .ok_or_else(|| ExpertAccessError::NotRegistered(submission.expert.clone()))?;
        if let Err(refusal) = expert.ensure_can_review() {
            warn!(expert = %expert.id, reason = %refusal, "review refused");
            return Err(refusal.into());
        }
        let mut record = self.load(id)?;

        record.record_review(ExpertReview {
            expert: submission.expert,
            rating: submission.rating,
            review: submission.review.trim().to_string(),
            feedback: submission.feedback.trim().to_string(),
            submitted_at: Utc::now(),
        });

        self.repository.update(record.clone())?;

        expert.total_reviews = self
            .repository
            .all()?
            .iter()
            .filter(|idea| idea.reviewed_by(&expert.id))
            .count() as u32;
        self.experts.save(expert)?;

        info!(
            idea = %record.id,
            reviews = record.total_expert_reviews,
            average_rating = record.average_expert_rating,
            "expert review recorded"
        );
        Ok(record)
    }

    pub fn reviews_by(&self, expert: &ExpertId) -> Result<Vec<IdeaRecord>, IdeaServiceError> {
        self.list(&IdeaFilter {
            reviewed_by: Some(expert.clone()),
            ..IdeaFilter::default()
        })
    }

    /// Attach an admin note. Blank feedback leaves the previous note in place.
    pub fn add_feedback(
        &self,
        id: &IdeaId,
        feedback: &str,
    ) -> Result<IdeaRecord, IdeaServiceError> {
        let mut record = self.load(id)?;
        let feedback = feedback.trim();
        if !feedback.is_empty() {
            record.feedback = feedback.to_string();
            record.updated_at = Utc::now();
            self.repository.update(record.clone())?;
        }
        Ok(record)
    }

    pub fn stats(&self) -> Result<IdeaStats, IdeaServiceError> {
        let records = self.repository.all()?;
        let experts = self.experts.all()?;
        Ok(IdeaStats::from_records(&records, &experts, Utc::now()))
    }

    /// The ten newest ideas and five newest expert profiles.
    pub fn recent_activity(&self) -> Result<RecentActivity, IdeaServiceError> {
        let recent_ideas = self
            .list(&IdeaFilter::default())?
            .iter()
            .take(RECENT_IDEAS)
            .map(IdeaRecord::summary_view)
            .collect();

        let mut experts = self.experts.all()?;
        experts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        experts.truncate(RECENT_EXPERTS);

        Ok(RecentActivity {
            recent_ideas,
            recent_experts: experts,
            generated_at: Utc::now(),
        })
    }

    /// Create a profile, or replace the details of an existing one. Verification, activity
    /// and review totals survive a resubmission.
    pub fn register_expert(
        &self,
        submission: ExpertProfileSubmission,
    ) -> Result<ExpertProfile, IdeaServiceError> {
        self.guard.check_expert_profile(&submission)?;
        let now = Utc::now();

        let profile = match self.experts.fetch(&submission.expert)? {
            Some(mut existing) => {
                existing.details = submission.details;
                existing.updated_at = now;
                existing
            }
            None => ExpertProfile::new(submission.expert, submission.details, now),
        };

        self.experts.save(profile.clone())?;
        info!(
            expert = %profile.id,
            verified = profile.is_verified,
            "expert profile saved"
        );
        Ok(profile)
    }

    pub fn expert(&self, id: &ExpertId) -> Result<ExpertProfile, IdeaServiceError> {
        self.load_expert(id)
    }

    /// Verified experts, newest first.
    pub fn verified_experts(&self) -> Result<Vec<ExpertProfile>, IdeaServiceError> {
        self.experts_where(|expert| expert.is_verified)
    }

    /// Profiles awaiting verification, newest first.
    pub fn pending_experts(&self) -> Result<Vec<ExpertProfile>, IdeaServiceError> {
        self.experts_where(|expert| !expert.is_verified)
    }

    fn experts_where(
        &self,
        keep: impl Fn(&ExpertProfile) -> bool,
    ) -> Result<Vec<ExpertProfile>, IdeaServiceError> {
        let mut experts: Vec<ExpertProfile> = self
            .experts
            .all()?
            .into_iter()
            .filter(|expert| keep(expert))
            .collect();
        experts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(experts)
    }

    /// Admin decision on a profile. The notes are replaced, blank included.
    pub fn verify_expert(
        &self,
        id: &ExpertId,
        verified: bool,
        notes: &str,
    ) -> Result<ExpertProfile, IdeaServiceError> {
        let mut profile = self.load_expert(id)?;
        profile.is_verified = verified;
        profile.verification_notes = notes.trim().to_string();
        profile.updated_at = Utc::now();

        self.experts.save(profile.clone())?;
        info!(expert = %profile.id, verified, "expert verification updated");
        Ok(profile)
    }

    pub fn set_expert_active(
        &self,
        id: &ExpertId,
        active: bool,
    ) -> Result<ExpertProfile, IdeaServiceError> {
        let mut profile = self.load_expert(id)?;
        profile.is_active = active;
        profile.updated_at = Utc::now();

        self.experts.save(profile.clone())?;
        info!(expert = %profile.id, active, "expert status updated");
        Ok(profile)
    }

    pub fn export_csv(&self, filter: &IdeaFilter) -> Result<String, IdeaServiceError> {
        let records = self.list(filter)?;
        let csv = ideas_to_csv(&records)?;
        Ok(csv)
    }
}

/// Error raised by the idea review service.
#[derive(Debug, thiserror::Error)]
pub enum IdeaServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    ExpertAccess(#[from] ExpertAccessError),
    #[error("no ideas selected")]
    EmptySelection,
}
