//! # API REST
//!
//! REST API for the PFMS feedback insights engine.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, boundary validation errors)
//!
//! All analysis is delegated to `pfms-core`.

#![warn(rust_2018_idioms)]

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use pfms_core::{
    categorization_summary, parse_date, validate_records, FeedbackCategory, FeedbackRecord,
    FeedbackService, FeedbackTypeSummary, RawFeedbackRecord, SentimentBreakdown,
    UserFeedbackCluster, WeeklyTypeCount,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Application state shared across REST API handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub feedback_service: FeedbackService,
}

impl AppState {
    pub fn new(feedback_service: FeedbackService) -> Self {
        Self { feedback_service }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategorizeRes {
    pub category: FeedbackCategory,
    pub summary: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SummaryTextRes {
    pub summary: String,
}

/// A batch of feedback, optionally restricted to one department.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackBatchReq {
    pub feedbacks: Vec<RawFeedbackRecord>,
    #[serde(default)]
    pub department_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClustersRes {
    pub clusters: Vec<UserFeedbackCluster>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryRes {
    pub types: FeedbackTypeSummary,
    pub sentiment: SentimentBreakdown,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WeeklyReq {
    pub feedbacks: Vec<RawFeedbackRecord>,
    /// `YYYY-MM-DD`, inclusive
    pub start: String,
    /// `YYYY-MM-DD`, inclusive
    pub end: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeeklyRes {
    pub weeks: Vec<WeeklyTypeCount>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        categorize,
        categorization_summary_text,
        clusters,
        summary,
        weekly,
    ),
    components(schemas(
        HealthRes,
        CategorizeRes,
        SummaryTextRes,
        FeedbackBatchReq,
        ClustersRes,
        SummaryRes,
        WeeklyReq,
        WeeklyRes,
        RawFeedbackRecord,
        FeedbackRecord,
        FeedbackCategory,
        UserFeedbackCluster,
        FeedbackTypeSummary,
        SentimentBreakdown,
        WeeklyTypeCount,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with OpenAPI/Swagger UI mounted at `/swagger-ui`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/feedback/categorize", post(categorize))
        .route(
            "/feedback/categorization-summary",
            post(categorization_summary_text),
        )
        .route("/feedback/clusters", post(clusters))
        .route("/feedback/summary", post(summary))
        .route("/feedback/weekly", post(weekly))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn validate(
    raw: Vec<RawFeedbackRecord>,
) -> Result<Vec<FeedbackRecord>, (StatusCode, &'static str)> {
    validate_records(raw).map_err(|e| {
        tracing::warn!("Rejected feedback batch: {}", e);
        (StatusCode::BAD_REQUEST, "Invalid feedback record")
    })
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "PFMS feedback insights is alive".into(),
    })
}

#[utoipa::path(
    post,
    path = "/feedback/categorize",
    request_body = RawFeedbackRecord,
    responses(
        (status = 200, description = "Categorization of one feedback", body = CategorizeRes),
        (status = 400, description = "Invalid feedback record")
    )
)]
/// Categorize a single feedback record
///
/// # Errors
/// Returns `400 Bad Request` if the record fails boundary validation.
#[axum::debug_handler]
async fn categorize(
    State(state): State<AppState>,
    Json(req): Json<RawFeedbackRecord>,
) -> Result<Json<CategorizeRes>, (StatusCode, &'static str)> {
    let record = FeedbackRecord::try_from(req).map_err(|e| {
        tracing::warn!("Rejected feedback record: {}", e);
        (StatusCode::BAD_REQUEST, "Invalid feedback record")
    })?;

    let category = state.feedback_service.categorize(&record);
    let summary = categorization_summary(&category);
    Ok(Json(CategorizeRes { category, summary }))
}

#[utoipa::path(
    post,
    path = "/feedback/categorization-summary",
    request_body = FeedbackCategory,
    responses(
        (status = 200, description = "Human-readable summary", body = SummaryTextRes)
    )
)]
/// Render a categorization as a one-line summary
#[axum::debug_handler]
async fn categorization_summary_text(
    State(_state): State<AppState>,
    Json(req): Json<FeedbackCategory>,
) -> Json<SummaryTextRes> {
    Json(SummaryTextRes {
        summary: categorization_summary(&req),
    })
}

#[utoipa::path(
    post,
    path = "/feedback/clusters",
    request_body = FeedbackBatchReq,
    responses(
        (status = 200, description = "Per-patient feedback clusters, newest first", body = ClustersRes),
        (status = 400, description = "Invalid feedback record")
    )
)]
/// Cluster feedback by patient
///
/// # Errors
/// Returns `400 Bad Request` if any record fails boundary validation.
#[axum::debug_handler]
async fn clusters(
    State(state): State<AppState>,
    Json(req): Json<FeedbackBatchReq>,
) -> Result<Json<ClustersRes>, (StatusCode, &'static str)> {
    let records = validate(req.feedbacks)?;
    let clusters = state.feedback_service.clusters(&records, req.department_id);
    tracing::debug!("Returning {} clusters", clusters.len());
    Ok(Json(ClustersRes { clusters }))
}

#[utoipa::path(
    post,
    path = "/feedback/summary",
    request_body = FeedbackBatchReq,
    responses(
        (status = 200, description = "Feedback type counts and sentiment breakdown", body = SummaryRes),
        (status = 400, description = "Invalid feedback record")
    )
)]
/// Summarize feedback by declared type and by categorized sentiment
///
/// # Errors
/// Returns `400 Bad Request` if any record fails boundary validation.
#[axum::debug_handler]
async fn summary(
    State(state): State<AppState>,
    Json(req): Json<FeedbackBatchReq>,
) -> Result<Json<SummaryRes>, (StatusCode, &'static str)> {
    let records = validate(req.feedbacks)?;
    let service = &state.feedback_service;
    Ok(Json(SummaryRes {
        types: service.type_summary(&records, req.department_id),
        sentiment: service.sentiment_breakdown(&records, req.department_id),
    }))
}

#[utoipa::path(
    post,
    path = "/feedback/weekly",
    request_body = WeeklyReq,
    responses(
        (status = 200, description = "Weekly feedback type counts", body = WeeklyRes),
        (status = 400, description = "Invalid feedback record or date range")
    )
)]
/// Count feedback types per week over an inclusive date range
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - any record fails boundary validation,
/// - either date is not `YYYY-MM-DD`,
/// - the range is inverted or too long.
#[axum::debug_handler]
async fn weekly(
    State(state): State<AppState>,
    Json(req): Json<WeeklyReq>,
) -> Result<Json<WeeklyRes>, (StatusCode, &'static str)> {
    let (start, end) = match (parse_date(&req.start), parse_date(&req.end)) {
        (Ok(start), Ok(end)) => (start, end),
        _ => return Err((StatusCode::BAD_REQUEST, "Invalid date")),
    };
    let records = validate(req.feedbacks)?;

    match state.feedback_service.weekly_trend(&records, start, end) {
        Ok(weeks) => Ok(Json(WeeklyRes { weeks })),
        Err(e) => {
            tracing::warn!("Rejected weekly trend request: {}", e);
            Err((StatusCode::BAD_REQUEST, "Invalid date range"))
        }
    }
}
