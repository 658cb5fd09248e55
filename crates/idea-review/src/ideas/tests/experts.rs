use super::common::*;
use crate::ideas::domain::ExpertId;
use crate::ideas::experts::{ExpertAccessError, ExpertProfileSubmission};
use crate::ideas::intake::{IntakeGuard, IntakeViolation};
use crate::ideas::repository::{IdeaStats, MonthlyCount, RepositoryError};
use crate::ideas::IdeaServiceError;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

fn expert_id(id: &str) -> ExpertId {
    ExpertId(id.to_string())
}

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[test]
fn unregistered_expert_cannot_review() {
    let (service, repository) = build_service();
    let record = service.submit(submission("founder-1")).expect("submitted");

    match service.submit_review(&record.id, review("stranger", 4)) {
        Err(IdeaServiceError::ExpertAccess(ExpertAccessError::NotRegistered(id))) => {
            assert_eq!(id, expert_id("stranger"))
        }
        other => panic!("expected unregistered expert, got {other:?}"),
    }
    let stored = repository.records.lock().expect("lock")[&record.id].clone();
    assert!(stored.expert_reviews.is_empty());
}

#[test]
fn new_profiles_wait_for_verification() {
    let (service, _) = build_service();
    let record = service.submit(submission("founder-1")).expect("submitted");

    let profile = service
        .register_expert(expert_profile("expert-new"))
        .expect("registered");
    assert!(profile.is_active);
    assert!(!profile.is_verified);

    match service.submit_review(&record.id, review("expert-new", 4)) {
        Err(IdeaServiceError::ExpertAccess(ExpertAccessError::PendingVerification(_))) => {}
        other => panic!("expected pending verification, got {other:?}"),
    }
    let pending = service.pending_experts().expect("pending");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, expert_id("expert-new"));

    let verified = service
        .verify_expert(&expert_id("expert-new"), true, "  LinkedIn checked. ")
        .expect("verified");
    assert_eq!(verified.verification_notes, "LinkedIn checked.");
    service
        .submit_review(&record.id, review("expert-new", 4))
        .expect("verified expert reviews");
    assert!(service.pending_experts().expect("pending").is_empty());
    assert_eq!(service.verified_experts().expect("verified").len(), 4);
}

#[test]
fn inactive_expert_is_refused_even_when_verified() {
    let (service, _) = build_service();
    let record = service.submit(submission("founder-1")).expect("submitted");

    service
        .set_expert_active(&expert_id("expert-1"), false)
        .expect("deactivated");
    match service.submit_review(&record.id, review("expert-1", 4)) {
        Err(IdeaServiceError::ExpertAccess(ExpertAccessError::Inactive(_))) => {}
        other => panic!("expected inactive expert, got {other:?}"),
    }

    service
        .set_expert_active(&expert_id("expert-1"), true)
        .expect("reactivated");
    service
        .submit_review(&record.id, review("expert-1", 4))
        .expect("active expert reviews");
}

#[test]
fn expert_total_counts_reviewed_ideas() {
    let (service, _) = build_service();
    let first = service.submit(submission("founder-1")).expect("submitted");
    let second = service.submit(submission("founder-2")).expect("submitted");

    service
        .submit_review(&first.id, review("expert-1", 3))
        .expect("review");
    service
        .submit_review(&first.id, review("expert-1", 4))
        .expect("revised review");
    service
        .submit_review(&second.id, review("expert-1", 5))
        .expect("review");

    let profile = service.expert(&expert_id("expert-1")).expect("profile");
    assert_eq!(profile.total_reviews, 2);
}

#[test]
fn resubmitted_profile_keeps_verification_state() {
    let (service, _) = build_service();
    let mut resubmission = expert_profile("expert-1");
    resubmission.details.bio = "Now a full-time angel investor.".to_string();

    let profile = service.register_expert(resubmission).expect("updated");

    assert!(profile.is_verified);
    assert_eq!(profile.details.bio, "Now a full-time angel investor.");
    assert!(profile.updated_at >= profile.created_at);
}

#[test]
fn unknown_expert_is_not_found_for_admin_actions() {
    let (service, _) = build_service();

    match service.verify_expert(&expert_id("ghost"), true, "") {
        Err(IdeaServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
    match service.set_expert_active(&expert_id("ghost"), false) {
        Err(IdeaServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn profile_requires_core_sections() {
    let guard = IntakeGuard;

    let mut missing_link = expert_profile("expert-9");
    missing_link.details.linkedin = "  ".to_string();
    assert_eq!(
        guard.check_expert_profile(&missing_link),
        Err(IntakeViolation::MissingProfileField("linkedin"))
    );

    let mut no_expertise = expert_profile("expert-9");
    no_expertise.details.expertise = vec![String::new()];
    assert_eq!(
        guard.check_expert_profile(&no_expertise),
        Err(IntakeViolation::MissingProfileField("expertise"))
    );

    let anonymous = expert_profile(" ");
    assert_eq!(
        guard.check_expert_profile(&anonymous),
        Err(IntakeViolation::MissingExpert)
    );
}

#[test]
fn expertise_accepts_a_single_area() {
    let payload = json!({
        "expert": "expert-9",
        "specialization": "Fintech",
        "experience": 8,
        "bio": "Built payments infrastructure at two startups.",
        "expertise": "Payments",
        "profession": "CTO",
        "linkedin": "https://linkedin.com/in/expert-9",
    });

    let profile: ExpertProfileSubmission = serde_json::from_value(payload).expect("parses");

    assert_eq!(profile.details.expertise, vec!["Payments".to_string()]);
    assert_eq!(profile.details.experience_years, 8);
    assert!(profile.details.certifications.is_empty());
}

#[test]
fn monthly_counts_cover_the_last_six_months() {
    let (service, _) = build_service();
    let template = service.submit(submission("founder-1")).expect("submitted");

    let records: Vec<_> = [at(2026, 3, 1), at(2026, 1, 10), at(2026, 1, 20), at(2025, 8, 30)]
        .into_iter()
        .map(|created_at| {
            let mut record = template.clone();
            record.created_at = created_at;
            record
        })
        .collect();

    let stats = IdeaStats::from_records(&records, &[], at(2026, 3, 15));

    assert_eq!(stats.total_ideas, 4);
    assert_eq!(
        stats.ideas_by_month,
        vec![
            MonthlyCount {
                year: 2026,
                month: 1,
                count: 2
            },
            MonthlyCount {
                year: 2026,
                month: 3,
                count: 1
            },
        ]
    );
}

#[test]
fn stats_count_registered_and_active_experts() {
    let (service, _) = build_service();
    service.submit(submission("founder-1")).expect("submitted");
    service
        .set_expert_active(&expert_id("expert-3"), false)
        .expect("deactivated");

    let stats = service.stats().expect("stats");

    assert_eq!(stats.total_experts, 3);
    assert_eq!(stats.active_experts, 2);
    assert_eq!(stats.ideas_by_month.len(), 1);
    assert_eq!(stats.ideas_by_month[0].count, 1);
}

#[test]
fn recent_activity_caps_the_feed() {
    let (service, _) = build_service();
    let mut newest = None;
    for n in 0..12 {
        newest = Some(
            service
                .submit(submission(&format!("founder-{n}")))
                .expect("submitted"),
        );
    }

    let activity = service.recent_activity().expect("activity");

    assert_eq!(activity.recent_ideas.len(), 10);
    assert_eq!(
        Some(&activity.recent_ideas[0].id),
        newest.as_ref().map(|record| &record.id)
    );
    assert_eq!(activity.recent_experts.len(), 3);
}
