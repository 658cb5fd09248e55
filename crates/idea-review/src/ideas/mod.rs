//! Startup-idea intake, scoring and expert review.
//!
//! Submissions pass the intake guard, are scored by the deterministic length heuristic in
//! [`scoring`], and are stored through an [`IdeaRepository`] supplied by the caller. Every edit
//! to the five text sections re-runs the scorer before the record is persisted. Reviews are
//! accepted only from experts whose [`ExpertProfile`] is active and verified.

pub mod domain;
pub mod experts;
pub mod export;
pub mod intake;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ExpertId, ExpertReview, ExpertReviewSubmission, IdeaContent, IdeaField, IdeaId,
    IdeaSubmission, IdeaUpdate, OwnerId, ScoringInput,
};
pub use experts::{
    ExpertAccessError, ExpertDetails, ExpertProfile, ExpertProfileSubmission, ExpertRepository,
};
pub use export::{ideas_to_csv, write_ideas_csv, ExportError};
pub use intake::{AcceptedIdea, IntakeGuard, IntakeViolation};
pub use repository::{
    ClassificationCount, IdeaFilter, IdeaRecord, IdeaRepository, IdeaStats, IdeaSummaryView,
    MonthlyCount, RecentActivity, RepositoryError,
};
pub use router::idea_router;
pub use scoring::{
    compute_score_and_class, field_weight, score_field, Classification, FieldScore,
    ScoreBreakdown, ScoringResult,
};
pub use service::{IdeaReviewService, IdeaServiceError};
