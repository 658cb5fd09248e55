use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ExpertId, ExpertReviewSubmission, IdeaId, IdeaSubmission, IdeaUpdate, OwnerId, ScoringInput,
};
use super::experts::{ExpertProfileSubmission, ExpertRepository};
use super::repository::{IdeaFilter, IdeaRepository, IdeaSummaryView, RepositoryError};
use super::scoring::{compute_score_and_class, Classification, ScoringResult};
use super::service::{IdeaReviewService, IdeaServiceError};

/// Router builder exposing idea intake, expert registry, review and admin endpoints.
pub fn idea_router<R, E>(service: Arc<IdeaReviewService<R, E>>) -> Router
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    Router::new()
        .route("/api/v1/scoring", post(score_handler))
        .route(
            "/api/v1/ideas",
            post(submit_handler::<R, E>).get(list_handler::<R, E>),
        )
        .route(
            "/api/v1/ideas/:idea_id",
            get(get_handler::<R, E>)
                .put(update_handler::<R, E>)
                .delete(delete_handler::<R, E>),
        )
        .route(
            "/api/v1/ideas/:idea_id/reviews",
            post(review_handler::<R, E>),
        )
        .route(
            "/api/v1/experts",
            post(register_expert_handler::<R, E>).get(verified_experts_handler::<R, E>),
        )
        .route("/api/v1/experts/:expert_id", get(expert_handler::<R, E>))
        .route(
            "/api/v1/experts/:expert_id/reviews",
            get(expert_reviews_handler::<R, E>),
        )
        .route(
            "/api/v1/admin/ideas/:idea_id/feedback",
            post(feedback_handler::<R, E>),
        )
        .route(
            "/api/v1/admin/ideas/bulk-delete",
            post(bulk_delete_handler::<R, E>),
        )
        .route("/api/v1/admin/ideas/export", get(export_handler::<R, E>))
        .route("/api/v1/admin/stats", get(stats_handler::<R, E>))
        .route("/api/v1/admin/activity", get(activity_handler::<R, E>))
        .route(
            "/api/v1/admin/experts/pending",
            get(pending_experts_handler::<R, E>),
        )
        .route(
            "/api/v1/admin/experts/:expert_id/verify",
            put(verify_expert_handler::<R, E>),
        )
        .route(
            "/api/v1/admin/experts/:expert_id/status",
            put(expert_status_handler::<R, E>),
        )
        .with_state(service)
}

impl IntoResponse for IdeaServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            IdeaServiceError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
            IdeaServiceError::EmptySelection => StatusCode::BAD_REQUEST,
            IdeaServiceError::ExpertAccess(_) => StatusCode::FORBIDDEN,
            IdeaServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            IdeaServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            IdeaServiceError::Repository(RepositoryError::Unavailable(_))
            | IdeaServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = json!({ "error": self.to_string() });
        (status, Json(payload)).into_response()
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) owner: Option<String>,
    #[serde(default)]
    pub(crate) classification: Option<Classification>,
    #[serde(default)]
    pub(crate) summary: bool,
}

impl ListQuery {
    fn filter(&self) -> IdeaFilter {
        IdeaFilter {
            owner: self.owner.clone().map(OwnerId),
            classification: self.classification,
            reviewed_by: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FeedbackRequest {
    #[serde(default)]
    pub(crate) feedback: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VerifyExpertRequest {
    pub(crate) is_verified: bool,
    #[serde(default)]
    pub(crate) verification_notes: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ExpertStatusRequest {
    pub(crate) is_active: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BulkDeleteRequest {
    #[serde(default)]
    pub(crate) idea_ids: Vec<IdeaId>,
}

/// Stateless scoring, used by forms to preview a score before submitting.
pub(crate) async fn score_handler(Json(input): Json<ScoringInput>) -> Json<ScoringResult> {
    Json(compute_score_and_class(&input))
}

pub(crate) async fn submit_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Json(submission): Json<IdeaSubmission>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let record = service.submit(submission)?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

pub(crate) async fn list_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let records = service.list(&query.filter())?;
    if query.summary {
        let views: Vec<IdeaSummaryView> =
            records.iter().map(|record| record.summary_view()).collect();
        Ok(Json(views).into_response())
    } else {
        Ok(Json(records).into_response())
    }
}

pub(crate) async fn get_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(idea_id): Path<String>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let record = service.get(&IdeaId(idea_id))?;
    Ok(Json(record).into_response())
}

pub(crate) async fn update_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(idea_id): Path<String>,
    Json(update): Json<IdeaUpdate>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let record = service.update(&IdeaId(idea_id), update)?;
    Ok(Json(record).into_response())
}

pub(crate) async fn delete_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(idea_id): Path<String>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let id = IdeaId(idea_id);
    service.delete(&id)?;
    let payload = json!({ "id": id.0, "message": "idea deleted" });
    Ok(Json(payload).into_response())
}

pub(crate) async fn review_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(idea_id): Path<String>,
    Json(review): Json<ExpertReviewSubmission>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let record = service.submit_review(&IdeaId(idea_id), review)?;
    Ok(Json(record).into_response())
}

pub(crate) async fn expert_reviews_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(expert_id): Path<String>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let records = service.reviews_by(&ExpertId(expert_id))?;
    Ok(Json(records).into_response())
}

pub(crate) async fn feedback_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(idea_id): Path<String>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let record = service.add_feedback(&IdeaId(idea_id), &request.feedback)?;
    Ok(Json(record).into_response())
}

pub(crate) async fn bulk_delete_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Json(request): Json<BulkDeleteRequest>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let deleted = service.bulk_delete(&request.idea_ids)?;
    let payload = json!({
        "deletedCount": deleted,
        "message": format!("{deleted} ideas deleted"),
    });
    Ok(Json(payload).into_response())
}

pub(crate) async fn stats_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let stats = service.stats()?;
    Ok(Json(stats).into_response())
}

pub(crate) async fn export_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Query(query): Query<ListQuery>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let csv = service.export_csv(&query.filter())?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"ideas.csv\""),
        ],
        csv,
    )
        .into_response())
}

pub(crate) async fn activity_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let activity = service.recent_activity()?;
    Ok(Json(activity).into_response())
}

pub(crate) async fn register_expert_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Json(submission): Json<ExpertProfileSubmission>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let profile = service.register_expert(submission)?;
    Ok(Json(profile).into_response())
}

pub(crate) async fn verified_experts_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let experts = service.verified_experts()?;
    Ok(Json(experts).into_response())
}

pub(crate) async fn expert_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(expert_id): Path<String>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let profile = service.expert(&ExpertId(expert_id))?;
    Ok(Json(profile).into_response())
}

pub(crate) async fn pending_experts_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let experts = service.pending_experts()?;
    Ok(Json(experts).into_response())
}

pub(crate) async fn verify_expert_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(expert_id): Path<String>,
    Json(request): Json<VerifyExpertRequest>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let profile = service.verify_expert(
        &ExpertId(expert_id),
        request.is_verified,
        &request.verification_notes,
    )?;
    Ok(Json(profile).into_response())
}

pub(crate) async fn expert_status_handler<R, E>(
    State(service): State<Arc<IdeaReviewService<R, E>>>,
    Path(expert_id): Path<String>,
    Json(request): Json<ExpertStatusRequest>,
) -> Result<Response, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    let profile = service.set_expert_active(&ExpertId(expert_id), request.is_active)?;
    Ok(Json(profile).into_response())
}
