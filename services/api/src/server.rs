use crate::cli::ServeArgs;
use crate::infra::{
    seed_demo_ideas, AppState, InMemoryExpertRepository, InMemoryIdeaRepository,
};
use crate::routes::with_idea_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use idea_review::config::AppConfig;
use idea_review::error::AppError;
use idea_review::ideas::IdeaReviewService;
use idea_review::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let idea_service = Arc::new(IdeaReviewService::new(
        Arc::new(InMemoryIdeaRepository::default()),
        Arc::new(InMemoryExpertRepository::default()),
    ));
    if config.intake.seed_demo_ideas {
        seed_demo_ideas(&idea_service)?;
    }

    let app = with_idea_routes(idea_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "idea review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
