use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::Utc;
use credit_wizard::workflows::assessment::draft::checks::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
use credit_wizard::workflows::assessment::draft::ApplicationDraft;
use credit_wizard::workflows::assessment::report::samples::{
    approved_report, conditional_report, declined_report,
};
use credit_wizard::workflows::assessment::report::AssessmentReport;
use credit_wizard::workflows::assessment::router::INITIAL_PROGRESS_MESSAGE;
use credit_wizard::workflows::assessment::submission::stream::{
    STAGE_FINANCIAL_DATA, STAGE_INIT,
};
use credit_wizard::workflows::assessment::submission::{
    AssessmentRequest, AssessmentResponse, ProgressUpdate,
};
use credit_wizard::workflows::assessment::{validate_application, ValidationOutcome};
use serde_json::json;
use std::time::Instant;
use tracing::info;

/// Scores below this are declined outright by the stub.
const DECLINE_BELOW_SCORE: u16 = 620;
/// Verified applicants at or above this score are approved without conditions.
const APPROVE_FROM_SCORE: u16 = 700;
const DECLINE_AT_DELINQUENCIES: u32 = 3;
/// Advertised by `/api/v1/config`.
const MAX_DTI_RATIO: f64 = 0.43;
const SERVICE_NAME: &str = "Credit Wizard Stub Assessment Service";

pub(crate) fn stub_router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/assess", post(assess_endpoint))
        .route("/api/v1/assess/stream", post(assess_stream_endpoint))
        .route("/api/v1/validate", post(validate_endpoint))
        .route("/api/v1/config", get(config_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
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

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// 400 answer in the service's error envelope.
#[derive(Debug)]
pub(crate) struct InvalidApplication {
    issues: Vec<String>,
}

impl IntoResponse for InvalidApplication {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "detail": {
                "error": "Invalid application",
                "issues": self.issues,
            }
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub(crate) async fn assess_endpoint(
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, InvalidApplication> {
    let started = Instant::now();
    let application = &request.application;

    let outcome = validate_application(application);
    if !outcome.valid {
        info!(
            application_id = application.application_id.as_str(),
            issues = outcome.issues.len(),
            "stub rejected invalid application"
        );
        return Err(InvalidApplication {
            issues: outcome.issues,
        });
    }

    let mut report = canned_report(application);
    let elapsed = started.elapsed().as_secs_f64();
    report.processing_time_seconds = Some(elapsed);
    if !request.include_detailed_report {
        report.detailed_analysis.clear();
    }

    info!(
        application_id = application.application_id.as_str(),
        decision = report.credit_decision.decision.as_str(),
        "stub assessment served"
    );

    Ok(Json(AssessmentResponse {
        success: true,
        report: Some(report),
        error: None,
        processing_time_seconds: Some(elapsed),
        trace_url: None,
    }))
}

/// Same checks as `/assess`, answered as `text/event-stream` progress frames.
///
/// The final `complete` frame carries the headline figures only.
pub(crate) async fn assess_stream_endpoint(
    Json(request): Json<AssessmentRequest>,
) -> Result<Response, InvalidApplication> {
    let application = &request.application;
    let outcome = validate_application(application);
    if !outcome.valid {
        return Err(InvalidApplication {
            issues: outcome.issues,
        });
    }

    let report = canned_report(application);
    let trace_id = format!("stub-{}", Utc::now().timestamp_millis());
    let updates = [
        ProgressUpdate::new(INITIAL_PROGRESS_MESSAGE, 0, STAGE_INIT)
            .with_data(json!({ "trace_id": trace_id })),
        ProgressUpdate::new("Collecting financial data...", 10, STAGE_FINANCIAL_DATA),
        ProgressUpdate::completed(&report),
    ];

    info!(
        application_id = application.application_id.as_str(),
        decision = report.credit_decision.decision.as_str(),
        frames = updates.len(),
        "stub assessment streamed"
    );

    let body: Result<String, _> = updates.iter().map(ProgressUpdate::to_event).collect();
    let response = match body {
        Ok(body) => ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": { "error": err.to_string() } })),
        )
            .into_response(),
    };
    Ok(response)
}

pub(crate) async fn config_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "app_name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "max_dti_ratio": MAX_DTI_RATIO,
        "credit_score_range": {
            "min": MIN_CREDIT_SCORE,
            "max": MAX_CREDIT_SCORE,
        },
    }))
}

pub(crate) async fn validate_endpoint(
    Json(application): Json<ApplicationDraft>,
) -> Json<ValidationOutcome> {
    Json(validate_application(&application))
}

/// Pick a fixture by the applicant's credit profile and stamp it with the application's details.
pub(crate) fn canned_report(application: &ApplicationDraft) -> AssessmentReport {
    let history = &application.credit_history;
    let mut report = if history.credit_score < DECLINE_BELOW_SCORE
        || history.delinquencies_30_days >= DECLINE_AT_DELINQUENCIES
    {
        declined_report()
    } else if history.credit_score >= APPROVE_FROM_SCORE && application.employment.income_verified
    {
        approved_report()
    } else {
        conditional_report()
    };

    let application_id = application.application_id.as_str();
    report.report_id = format!("RPT-{application_id}");
    report.application_id = application_id.to_string();
    report.applicant_name = application.applicant.full_name();
    report.report_date = Some(Utc::now().naive_utc());
    report.detailed_analysis = format!(
        "Canned {} assessment produced by the local stub service.",
        report.credit_decision.decision.as_str()
    );

    match &application.collateral {
        Some(collateral) if report.collateral_evaluation.collateral_present => {
            report.collateral_evaluation.estimated_value = Some(collateral.estimated_value);
        }
        Some(_) => {}
        None => report.collateral_evaluation = Default::default(),
    }
    report
}
