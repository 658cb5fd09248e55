use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::ideas::domain::{
    ExpertId, ExpertReviewSubmission, IdeaField, IdeaId, IdeaSubmission, OwnerId, ScoringInput,
};
use crate::ideas::experts::{
    ExpertDetails, ExpertProfile, ExpertProfileSubmission, ExpertRepository,
};
use crate::ideas::repository::{IdeaRecord, IdeaRepository, RepositoryError};
use crate::ideas::{idea_router, IdeaReviewService};

pub(super) type TestService = IdeaReviewService<MemoryRepository, MemoryExpertRepository>;

/// Experts registered and verified by [`build_service`].
pub(super) const VERIFIED_EXPERTS: [&str; 3] = ["expert-1", "expert-2", "expert-3"];

/// Text of exactly `len` characters.
pub(super) fn text_of_len(len: usize) -> String {
    "x".repeat(len)
}

pub(super) fn thorough_text() -> String {
    "We interviewed forty independent clinic owners who lose an average of six hours a week \
     reconciling insurance claims by hand. Claim rejections run above twelve percent and each \
     one delays cash flow by a month. Existing practice-management suites are built for large \
     hospital groups and price small clinics out entirely, leaving spreadsheets as the default."
        .to_string()
}

pub(super) fn strong_input() -> ScoringInput {
    IdeaField::ALL
        .into_iter()
        .fold(ScoringInput::default(), |input, field| {
            input.with(field, thorough_text())
        })
}

pub(super) fn submission(owner: &str) -> IdeaSubmission {
    IdeaSubmission {
        owner: OwnerId(owner.to_string()),
        title: Some("ClaimPilot".to_string()),
        fields: ScoringInput::default()
            .with(
                IdeaField::Problem,
                "Small clinics lose hours every week reconciling rejected insurance claims.",
            )
            .with(IdeaField::Solution, "An assistant that pre-checks claims.")
            .with(IdeaField::Market, "Independent clinics in the US.")
            .with(IdeaField::RevenueModel, "Monthly subscription.")
            .with(IdeaField::Team, "Two founders."),
    }
}

pub(super) fn strong_submission(owner: &str) -> IdeaSubmission {
    IdeaSubmission {
        owner: OwnerId(owner.to_string()),
        title: None,
        fields: strong_input(),
    }
}

pub(super) fn review(expert: &str, rating: u8) -> ExpertReviewSubmission {
    ExpertReviewSubmission {
        expert: ExpertId(expert.to_string()),
        rating,
        review: "Clear pain point, distribution plan needs work.".to_string(),
        feedback: String::new(),
    }
}

pub(super) fn expert_profile(expert: &str) -> ExpertProfileSubmission {
    ExpertProfileSubmission {
        expert: ExpertId(expert.to_string()),
        details: ExpertDetails {
            specialization: "Healthcare".to_string(),
            experience_years: 12,
            bio: "Former clinic operator, now advising health-tech founders.".to_string(),
            expertise: vec!["Revenue cycle".to_string(), "Go-to-market".to_string()],
            profession: "Operating Partner".to_string(),
            linkedin: format!("https://linkedin.com/in/{expert}"),
            company: String::new(),
            github: String::new(),
            website: String::new(),
            location: "Denver, CO".to_string(),
            education: String::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            previous_companies: Vec::new(),
            achievements: Vec::new(),
        },
    }
}

/// Service over empty stores, with every [`VERIFIED_EXPERTS`] entry registered and verified.
pub(super) fn build_service() -> (TestService, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = IdeaReviewService::new(
        repository.clone(),
        Arc::new(MemoryExpertRepository::default()),
    );
    for expert in VERIFIED_EXPERTS {
        service
            .register_expert(expert_profile(expert))
            .expect("expert registers");
        service
            .verify_expert(&ExpertId(expert.to_string()), true, "")
            .expect("expert verifies");
    }
    (service, repository)
}

pub(super) fn service_over<R: IdeaRepository + 'static>(
    repository: R,
) -> IdeaReviewService<R, MemoryExpertRepository> {
    IdeaReviewService::new(
        Arc::new(repository),
        Arc::new(MemoryExpertRepository::default()),
    )
}

#[derive(Default, Clone)]
pub(super) struct MemoryExpertRepository {
    pub(super) profiles: Arc<Mutex<HashMap<ExpertId, ExpertProfile>>>,
}

impl ExpertRepository for MemoryExpertRepository {
    fn save(&self, profile: ExpertProfile) -> Result<(), RepositoryError> {
        let mut guard = self.profiles.lock().expect("expert mutex poisoned");
        guard.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, id: &ExpertId) -> Result<Option<ExpertProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("expert mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<ExpertProfile>, RepositoryError> {
        let guard = self.profiles.lock().expect("expert mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<IdeaId, IdeaRecord>>>,
}

impl IdeaRepository for MemoryRepository {
    fn insert(&self, record: IdeaRecord) -> Result<IdeaRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: IdeaRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &IdeaId) -> Result<Option<IdeaRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &IdeaId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<IdeaRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct ConflictRepository;

impl IdeaRepository for ConflictRepository {
    fn insert(&self, _record: IdeaRecord) -> Result<IdeaRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: IdeaRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &IdeaId) -> Result<Option<IdeaRecord>, RepositoryError> {
        Ok(None)
    }

    fn delete(&self, _id: &IdeaId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<IdeaRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl IdeaRepository for UnavailableRepository {
    fn insert(&self, _record: IdeaRecord) -> Result<IdeaRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: IdeaRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &IdeaId) -> Result<Option<IdeaRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: &IdeaId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn all(&self) -> Result<Vec<IdeaRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: TestService) -> axum::Router {
    idea_router(Arc::new(service))
}
