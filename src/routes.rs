use crate::infra::{deserialize_optional_date, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use career_mentor::error::AppError;
use career_mentor::mentor::{
    evaluate, match_jobs, normalize_tags, Advisory, JobCatalog, JobMatch, MentorPlan, MentorPlanner,
    ProfileMetrics, ProfileSubmission,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::Ordering;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct PlanRequest {
    pub(crate) profile: ProfileSubmission,
    #[serde(default)]
    pub(crate) metrics: Option<ProfileMetrics>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) start: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct FeedbackResponse {
    pub(crate) warnings: usize,
    pub(crate) advisories: Vec<Advisory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsRequest {
    #[serde(default)]
    pub(crate) skills: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JobsResponse {
    pub(crate) catalog_size: usize,
    pub(crate) jobs: Vec<JobMatch>,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/mentor/plan", post(plan_endpoint))
        .route("/api/v1/mentor/feedback", post(feedback_endpoint))
        .route("/api/v1/mentor/jobs", get(catalog_endpoint).post(jobs_endpoint))
        .with_state(state)
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn plan_endpoint(
    State(state): State<AppState>,
    payload: Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<MentorPlan>, AppError> {
    let Json(payload) = payload?;
    let PlanRequest {
        profile,
        metrics,
        start,
    } = payload;

    let profile = profile.into_profile()?;
    let planner = MentorPlanner::new(&state.catalog, state.roadmap_weeks);
    Ok(Json(planner.plan(&profile, metrics.as_ref(), start)))
}

pub(crate) async fn feedback_endpoint(
    Json(metrics): Json<ProfileMetrics>,
) -> Json<FeedbackResponse> {
    let advisories = evaluate(&metrics);
    let warnings = advisories.iter().filter(|a| a.is_warning()).count();
    info!(warnings, "profile feedback evaluated");
    Json(FeedbackResponse {
        warnings,
        advisories,
    })
}

pub(crate) async fn jobs_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<JobsRequest>,
) -> Json<JobsResponse> {
    let skills = normalize_tags(&payload.skills);
    let jobs = match_jobs(&skills, &state.catalog);
    info!(matches = jobs.len(), "job matching evaluated");
    Json(JobsResponse {
        catalog_size: state.catalog.len(),
        jobs,
    })
}

pub(crate) async fn catalog_endpoint(State(state): State<AppState>) -> Json<JobCatalog> {
    Json(JobCatalog::clone(&state.catalog))
}
