//! Wizard flows against an in-process assessment service reached over real HTTP.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use credit_wizard::config::AssessmentServiceConfig;
use credit_wizard::workflows::assessment::report::samples::{approved_report, declined_report};
use credit_wizard::workflows::assessment::submission::http::SUBMITTING_STATUS;
use credit_wizard::workflows::assessment::submission::{
    AssessmentRequest, ProgressUpdate, TransportError,
};
use credit_wizard::workflows::assessment::{
    load_preset, AssessmentSession, AssessmentTransport, HttpAssessmentClient, PresetKind,
    Screen, SubmissionController, ViewAction,
};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server runs");
    });
    format!("http://{addr}")
}

fn client(origin: &str) -> HttpAssessmentClient {
    HttpAssessmentClient::new(AssessmentServiceConfig::new(origin)).expect("client builds")
}

fn session(origin: &str, preset: PresetKind) -> AssessmentSession<HttpAssessmentClient> {
    let controller = SubmissionController::new(Arc::new(client(origin)));
    let mut session = AssessmentSession::new(controller);
    session.dispatch(ViewAction::LoadPreset(preset));
    session
}

async fn assess_with_report(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["include_detailed_report"] != json!(true) || body["fast_mode"] != json!(false) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": { "error": "detailed report required" } })),
        );
    }
    let report = if body["application"]["credit_history"]["credit_score"] == json!(745) {
        approved_report()
    } else {
        declined_report()
    };
    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "report": report,
            "error": null,
            "processing_time_seconds": 2.5,
            "trace_url": null,
        })),
    )
}

#[tokio::test]
async fn approved_application_reaches_results() {
    let origin = serve(Router::new().route("/api/v1/assess", post(assess_with_report))).await;
    let mut session = session(&origin, PresetKind::Favorable);
    let mut messages = Vec::new();

    session
        .submit_observed(|state| {
            if let Some(overlay) = &state.submitting {
                messages.push(overlay.message.clone());
            }
        })
        .await;

    assert_eq!(session.state().screen, Screen::Results);
    assert!(messages.iter().any(|message| message == SUBMITTING_STATUS));
    let model = session.display_model().expect("report shown");
    assert_eq!(model.decision.label, "APPROVED");
    assert_eq!(model.decision.confidence, "92%");
}

#[tokio::test]
async fn declined_application_shows_no_collateral() {
    let origin = serve(Router::new().route("/api/v1/assess", post(assess_with_report))).await;
    let mut session = session(&origin, PresetKind::Risky);

    session.submit().await;

    let model = session.display_model().expect("report shown");
    assert_eq!(model.decision.label, "DECLINED");
    assert_eq!(model.financial_summary.collateral_value, "none");
    assert!(!model.decline_reasons.is_empty());
}

#[tokio::test]
async fn error_detail_from_the_service_is_shown_verbatim() {
    let router = Router::new().route(
        "/api/v1/assess",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": { "error": "Income documentation missing" } })),
            )
        }),
    );
    let origin = serve(router).await;
    let mut session = session(&origin, PresetKind::Favorable);
    let draft = session.state().store.draft().clone();

    session.submit().await;

    let state = session.state();
    assert_eq!(state.screen, Screen::Form);
    assert_eq!(
        state.banner.as_deref(),
        Some("Income documentation missing")
    );
    assert_eq!(state.store.draft(), &draft);
}

#[tokio::test]
async fn error_without_detail_uses_generic_message() {
    let router = Router::new().route(
        "/api/v1/assess",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
    );
    let origin = serve(router).await;
    let mut session = session(&origin, PresetKind::Favorable);

    session.submit().await;

    assert_eq!(session.state().banner.as_deref(), Some("Assessment failed"));
}

#[tokio::test]
async fn success_without_report_uses_generic_message() {
    let router = Router::new().route(
        "/api/v1/assess",
        post(|| async { Json(json!({ "success": true, "report": null })) }),
    );
    let origin = serve(router).await;
    let mut session = session(&origin, PresetKind::Favorable);

    session.submit().await;

    assert_eq!(session.state().banner.as_deref(), Some("Assessment failed"));
    assert_eq!(session.state().screen, Screen::Form);
}

async fn closed_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("bound address");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn unreachable_service_shows_network_banner() {
    let origin = closed_origin().await;
    let mut session = session(&origin, PresetKind::Favorable);

    session.submit().await;

    assert_eq!(
        session.state().banner.as_deref(),
        Some("Network error. Please check your connection.")
    );
    assert!(!session.controller().is_busy());
}

/// Answers every request with headers and the first byte of a body that never finishes.
async fn stalling_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral port");
    let addr = listener.local_addr().expect("bound address");
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 8192];
                let _ = socket.read(&mut request).await;
                let _ = socket
                    .write_all(
                        b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 1000\r\n\r\n{",
                    )
                    .await;
                tokio::time::sleep(Duration::from_secs(30)).await;
            });
        }
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn timeout_while_reading_the_body_shows_network_banner() {
    let origin = stalling_origin().await;
    let mut config = AssessmentServiceConfig::new(origin.as_str());
    config.timeout = Duration::from_millis(500);
    let client = HttpAssessmentClient::new(config).expect("client builds");
    let mut session = AssessmentSession::new(SubmissionController::new(Arc::new(client)));
    session.dispatch(ViewAction::LoadPreset(PresetKind::Favorable));
    let draft = session.state().store.draft().clone();

    session.submit().await;

    let state = session.state();
    assert_eq!(state.screen, Screen::Form);
    assert_eq!(
        state.banner.as_deref(),
        Some("Network error. Please check your connection.")
    );
    assert_eq!(state.store.draft(), &draft);
    assert!(!session.controller().is_busy());
}

#[tokio::test]
async fn health_reports_live_status_and_degrades_when_down() {
    let router = Router::new().route(
        "/health",
        get(|| async { Json(json!({ "status": "healthy", "version": "1.0.0" })) }),
    );
    let origin = serve(router).await;

    let live = client(&origin).health().await;
    assert!(live.is_healthy());
    assert_eq!(live.version.as_deref(), Some("1.0.0"));

    let down = client(&closed_origin().await).health().await;
    assert_eq!(down.status, "unhealthy");
    assert!(!down.is_healthy());
}

#[tokio::test]
async fn validate_posts_the_bare_draft() {
    let router = Router::new().route(
        "/api/v1/validate",
        post(|Json(draft): Json<Value>| async move {
            let score = draft["credit_history"]["credit_score"].as_u64().unwrap_or(0);
            Json(json!({
                "valid": score >= 300,
                "issues": [],
                "warnings": [format!("score {score}")],
            }))
        }),
    );
    let origin = serve(router).await;

    let outcome = client(&origin)
        .validate(&load_preset(PresetKind::Risky))
        .await
        .expect("validation answered");

    assert!(outcome.valid);
    assert_eq!(outcome.warnings, vec!["score 580".to_string()]);
}

fn event_stream(updates: &[ProgressUpdate]) -> ([(header::HeaderName, &'static str); 1], String) {
    let body = updates
        .iter()
        .map(|update| update.to_event().expect("update encodes"))
        .collect::<String>();
    ([(header::CONTENT_TYPE, "text/event-stream")], body)
}

#[tokio::test]
async fn streamed_assessment_relays_stages_and_returns_the_summary() {
    let router = Router::new().route(
        "/api/v1/assess/stream",
        post(|| async {
            event_stream(&[
                ProgressUpdate::new("Initializing credit assessment...", 0, "init")
                    .with_data(json!({ "trace_id": "trace-7" })),
                ProgressUpdate::new("Collecting financial data...", 10, "financial_data"),
                ProgressUpdate::completed(&approved_report()),
            ])
        }),
    );
    let origin = serve(router).await;
    let request = AssessmentRequest::detailed(load_preset(PresetKind::Favorable));
    let mut stages = Vec::new();

    let summary = client(&origin)
        .assess_stream(&request, |update| {
            stages.push((update.stage.clone(), update.progress))
        })
        .await
        .expect("stream completes");

    assert_eq!(
        stages,
        vec![
            ("init".to_string(), 0),
            ("financial_data".to_string(), 10),
            ("complete".to_string(), 100),
        ]
    );
    assert_eq!(summary.decision, "approved");
    assert_eq!(summary.report_id, approved_report().report_id);
}

#[tokio::test]
async fn streamed_error_frame_becomes_a_rejection() {
    let router = Router::new().route(
        "/api/v1/assess/stream",
        post(|| async {
            event_stream(&[
                ProgressUpdate::new("Initializing credit assessment...", 0, "init"),
                ProgressUpdate::failed("scoring backend unavailable"),
            ])
        }),
    );
    let origin = serve(router).await;
    let request = AssessmentRequest::detailed(load_preset(PresetKind::Favorable));

    let outcome = client(&origin).assess_stream(&request, |_| {}).await;

    assert_eq!(
        outcome,
        Err(TransportError::Rejected {
            status: 200,
            detail: Some("scoring backend unavailable".to_string()),
        })
    );
}

#[tokio::test]
async fn streamed_assessment_without_terminal_frame_is_malformed() {
    let router = Router::new().route(
        "/api/v1/assess/stream",
        post(|| async {
            event_stream(&[ProgressUpdate::new(
                "Collecting financial data...",
                10,
                "financial_data",
            )])
        }),
    );
    let origin = serve(router).await;
    let request = AssessmentRequest::detailed(load_preset(PresetKind::Favorable));

    let outcome = client(&origin).assess_stream(&request, |_| {}).await;

    assert!(matches!(outcome, Err(TransportError::Malformed(_))));
}

#[tokio::test]
async fn streamed_assessment_surfaces_validation_detail() {
    let router = Router::new().route(
        "/api/v1/assess/stream",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": { "error": "Invalid application", "issues": [] } })),
            )
        }),
    );
    let origin = serve(router).await;
    let request = AssessmentRequest::detailed(load_preset(PresetKind::Favorable));

    let outcome = client(&origin).assess_stream(&request, |_| {}).await;

    assert_eq!(
        outcome,
        Err(TransportError::Rejected {
            status: 400,
            detail: Some("Invalid application".to_string()),
        })
    );
}
