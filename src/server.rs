use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum_prometheus::PrometheusMetricLayer;
use career_mentor::config::AppConfig;
use career_mentor::error::AppError;
use career_mentor::mentor::JobCatalog;
use career_mentor::telemetry;
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
    if let Some(weeks) = args.weeks.take() {
        config.planning.roadmap_weeks = weeks;
    }
    if let Some(path) = args.job_catalog.take() {
        config.planning.job_catalog = Some(path);
    }

    telemetry::init(&config.telemetry)?;

    let catalog = JobCatalog::load(config.planning.job_catalog.as_deref())?;
    info!(
        postings = catalog.len(),
        source = ?config.planning.job_catalog,
        "job catalog loaded"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        catalog: Arc::new(catalog),
        roadmap_weeks: config.planning.roadmap_weeks,
    };

    let app = router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "career mentor service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
