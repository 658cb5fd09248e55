use super::domain::{
    ExpertReviewSubmission, IdeaContent, IdeaField, IdeaSubmission, IdeaUpdate, OwnerId,
    ScoringInput,
};
use super::experts::ExpertProfileSubmission;
use super::scoring::text_length;

const MIN_RATING: u8 = 1;
const MAX_RATING: u8 = 5;

/// Validation errors raised before anything reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("idea owner is required")]
    MissingOwner,
    #[error("{0} is required")]
    MissingField(IdeaField),
    #[error("{0} cannot be blank")]
    BlankField(IdeaField),
    #[error("reviewing expert is required")]
    MissingExpert,
    #[error("rating {rating} outside 1-5")]
    RatingOutOfRange { rating: u8 },
    #[error("review text is required")]
    EmptyReview,
    #[error("expert {0} is required")]
    MissingProfileField(&'static str),
}

/// Accepted submission ready to be scored and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedIdea {
    pub owner: OwnerId,
    pub title: Option<String>,
    pub content: IdeaContent,
}

/// Guard turning raw payloads into validated domain values.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    /// All five sections must carry text; the engine itself would accept blanks.
    pub fn accept_submission(
        &self,
        submission: IdeaSubmission,
    ) -> Result<AcceptedIdea, IntakeViolation> {
        if submission.owner.0.trim().is_empty() {
            return Err(IntakeViolation::MissingOwner);
        }

        let fields = submission.fields;
        let mut content = IdeaContent {
            problem: String::new(),
            solution: String::new(),
            market: String::new(),
            revenue_model: String::new(),
            team: String::new(),
        };
        for field in IdeaField::ALL {
            match fields.field(field) {
                Some(text) if text_length(text) > 0 => {
                    *content.field_mut(field) = text.to_string();
                }
                _ => return Err(IntakeViolation::MissingField(field)),
            }
        }

        Ok(AcceptedIdea {
            owner: submission.owner,
            title: normalize_title(submission.title),
            content,
        })
    }

    /// Present sections must not be blank; absent ones are left alone.
    pub fn check_update(&self, update: &IdeaUpdate) -> Result<(), IntakeViolation> {
        blank_field(&update.fields).map_or(Ok(()), |field| Err(IntakeViolation::BlankField(field)))
    }

    pub fn check_review(&self, review: &ExpertReviewSubmission) -> Result<(), IntakeViolation> {
        if review.expert.0.trim().is_empty() {
            return Err(IntakeViolation::MissingExpert);
        }
        if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
            return Err(IntakeViolation::RatingOutOfRange {
                rating: review.rating,
            });
        }
        if review.review.trim().is_empty() {
            return Err(IntakeViolation::EmptyReview);
        }
        Ok(())
    }

    /// Id plus the profile sections an admin needs to verify someone.
    pub fn check_expert_profile(
        &self,
        profile: &ExpertProfileSubmission,
    ) -> Result<(), IntakeViolation> {
        if profile.expert.0.trim().is_empty() {
            return Err(IntakeViolation::MissingExpert);
        }

        let details = &profile.details;
        let required = [
            ("specialization", details.specialization.as_str()),
            ("bio", details.bio.as_str()),
            ("profession", details.profession.as_str()),
            ("linkedin", details.linkedin.as_str()),
        ];
        if let Some((name, _)) = required
            .into_iter()
            .find(|(_, text)| text.trim().is_empty())
        {
            return Err(IntakeViolation::MissingProfileField(name));
        }
        if details.expertise.iter().all(|area| area.trim().is_empty()) {
            return Err(IntakeViolation::MissingProfileField("expertise"));
        }
        Ok(())
    }
}

fn blank_field(fields: &ScoringInput) -> Option<IdeaField> {
    IdeaField::ALL.into_iter().find(|field| {
        fields
            .field(*field)
            .map(|text| text_length(text) == 0)
            .unwrap_or(false)
    })
}

pub(crate) fn normalize_title(title: Option<String>) -> Option<String> {
    title
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
