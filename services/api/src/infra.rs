use idea_review::ideas::{
    ExpertDetails, ExpertId, ExpertProfile, ExpertProfileSubmission, ExpertRepository,
    ExpertReviewSubmission, IdeaField, IdeaId, IdeaRecord, IdeaRepository, IdeaReviewService,
    IdeaServiceError, IdeaSubmission, OwnerId, RepositoryError, ScoringInput,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryIdeaRepository {
    records: Arc<Mutex<HashMap<IdeaId, IdeaRecord>>>,
}

impl InMemoryIdeaRepository {
    fn records(&self) -> Result<MutexGuard<'_, HashMap<IdeaId, IdeaRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("idea store lock poisoned".to_string()))
    }
}

impl IdeaRepository for InMemoryIdeaRepository {
    fn insert(&self, record: IdeaRecord) -> Result<IdeaRecord, RepositoryError> {
        let mut guard = self.records()?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: IdeaRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &IdeaId) -> Result<Option<IdeaRecord>, RepositoryError> {
        Ok(self.records()?.get(id).cloned())
    }

    fn delete(&self, id: &IdeaId) -> Result<(), RepositoryError> {
        self.records()?
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<IdeaRecord>, RepositoryError> {
        Ok(self.records()?.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryExpertRepository {
    profiles: Arc<Mutex<HashMap<ExpertId, ExpertProfile>>>,
}

impl InMemoryExpertRepository {
    fn profiles(
        &self,
    ) -> Result<MutexGuard<'_, HashMap<ExpertId, ExpertProfile>>, RepositoryError> {
        self.profiles
            .lock()
            .map_err(|_| RepositoryError::Unavailable("expert store lock poisoned".to_string()))
    }
}

impl ExpertRepository for InMemoryExpertRepository {
    fn save(&self, profile: ExpertProfile) -> Result<(), RepositoryError> {
        self.profiles()?.insert(profile.id.clone(), profile);
        Ok(())
    }

    fn fetch(&self, id: &ExpertId) -> Result<Option<ExpertProfile>, RepositoryError> {
        Ok(self.profiles()?.get(id).cloned())
    }

    fn all(&self) -> Result<Vec<ExpertProfile>, RepositoryError> {
        Ok(self.profiles()?.values().cloned().collect())
    }
}

struct DemoExpert {
    id: &'static str,
    specialization: &'static str,
    experience_years: u32,
    bio: &'static str,
    expertise: [&'static str; 3],
    profession: &'static str,
    company: &'static str,
    linkedin: &'static str,
    location: &'static str,
}

const DEMO_EXPERTS: [DemoExpert; 2] = [
    DemoExpert {
        id: "alex@expert.com",
        specialization: "Technology",
        experience_years: 10,
        bio: "Senior software engineer with 10+ years in AI and machine learning",
        expertise: ["AI", "Machine Learning", "Software Development"],
        profession: "Senior Software Engineer",
        company: "Tech Corp",
        linkedin: "https://linkedin.com/in/alexsmith",
        location: "San Francisco, CA",
    },
    DemoExpert {
        id: "maria@expert.com",
        specialization: "Business",
        experience_years: 8,
        bio: "Business strategist with expertise in fintech and startups",
        expertise: ["Business Strategy", "Fintech", "Marketing"],
        profession: "Business Consultant",
        company: "Strategy Plus",
        linkedin: "https://linkedin.com/in/mariagarcia",
        location: "New York, NY",
    },
];

struct DemoIdea {
    owner: &'static str,
    title: &'static str,
    fields: [&'static str; 5],
    review: (&'static str, u8, &'static str, &'static str),
}

const DEMO_IDEAS: [DemoIdea; 2] = [
    DemoIdea {
        owner: "john@startup.com",
        title: "AI-Powered Pet Care App",
        fields: [
            "Pet owners struggle to track vaccination schedules, diet plans, and health records",
            "Mobile app with AI recommendations for pet care, automated reminders, and vet integration",
            "Pet care market worth $261 billion globally, targeting tech-savvy pet owners",
            "Freemium model with premium features, vet partnerships, and pet product recommendations",
            "Solo founder with mobile development background, seeking co-founder",
        ],
        review: (
            "alex@expert.com",
            4,
            "Strong technical concept with good market potential. AI integration is well thought out.",
            "Focus on user acquisition and vet partnerships for growth.",
        ),
    },
    DemoIdea {
        owner: "sarah@startup.com",
        title: "Sustainable Food Delivery",
        fields: [
            "Food delivery creates excessive packaging waste and carbon emissions",
            "Eco-friendly delivery service using reusable containers and electric vehicles",
            "Food delivery market growing 20% annually, increasing environmental awareness",
            "Commission from restaurants, container deposit system, premium eco-delivery fees",
            "Two co-founders: operations expert and environmental scientist",
        ],
        review: (
            "maria@expert.com",
            3,
            "Good environmental focus but challenging unit economics. Need stronger business model.",
            "Consider B2B partnerships with restaurants to reduce costs.",
        ),
    },
];

/// Register and verify the sample experts, then submit and review the sample ideas through the
/// service so their scores are computed.
pub(crate) fn seed_demo_ideas<R, E>(
    service: &IdeaReviewService<R, E>,
) -> Result<usize, IdeaServiceError>
where
    R: IdeaRepository + 'static,
    E: ExpertRepository + 'static,
{
    for expert in &DEMO_EXPERTS {
        let profile = service.register_expert(ExpertProfileSubmission {
            expert: ExpertId(expert.id.to_string()),
            details: ExpertDetails {
                specialization: expert.specialization.to_string(),
                experience_years: expert.experience_years,
                bio: expert.bio.to_string(),
                expertise: expert.expertise.iter().map(|area| area.to_string()).collect(),
                profession: expert.profession.to_string(),
                linkedin: expert.linkedin.to_string(),
                company: expert.company.to_string(),
                github: String::new(),
                website: String::new(),
                location: expert.location.to_string(),
                education: String::new(),
                certifications: Vec::new(),
                languages: Vec::new(),
                previous_companies: Vec::new(),
                achievements: Vec::new(),
            },
        })?;
        service.verify_expert(&profile.id, true, "")?;
    }

    for demo in &DEMO_IDEAS {
        let fields = IdeaField::ALL
            .into_iter()
            .zip(demo.fields)
            .fold(ScoringInput::default(), |input, (field, text)| {
                input.with(field, text)
            });
        let record = service.submit(IdeaSubmission {
            owner: OwnerId(demo.owner.to_string()),
            title: Some(demo.title.to_string()),
            fields,
        })?;

        let (expert, rating, review, feedback) = demo.review;
        service.submit_review(
            &record.id,
            ExpertReviewSubmission {
                expert: ExpertId(expert.to_string()),
                rating,
                review: review.to_string(),
                feedback: feedback.to_string(),
            },
        )?;
    }

    info!(
        ideas = DEMO_IDEAS.len(),
        experts = DEMO_EXPERTS.len(),
        "seeded demo data"
    );
    Ok(DEMO_IDEAS.len())
}
