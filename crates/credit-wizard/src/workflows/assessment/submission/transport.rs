use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::events::ProgressSender;
use crate::workflows::assessment::draft::ApplicationDraft;
use crate::workflows::assessment::report::AssessmentReport;
use crate::workflows::assessment::validation::ValidationOutcome;

/// Body of `POST {base}/assess`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub application: ApplicationDraft,
    #[serde(default)]
    pub fast_mode: bool,
    #[serde(default = "default_true")]
    pub include_detailed_report: bool,
}

fn default_true() -> bool {
    true
}

impl AssessmentRequest {
    /// Full assessment with the detailed report, as the wizard always requests.
    pub fn detailed(application: ApplicationDraft) -> Self {
        Self {
            application,
            fast_mode: false,
            include_detailed_report: true,
        }
    }
}

/// Success body of `POST {base}/assess`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentResponse {
    pub success: bool,
    pub report: Option<AssessmentReport>,
    pub error: Option<String>,
    pub processing_time_seconds: Option<f64>,
    pub trace_url: Option<String>,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HealthStatus {
    pub fn unhealthy() -> Self {
        Self {
            status: "unhealthy".to_string(),
            version: None,
            timestamp: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "healthy" | "ok")
    }
}

/// Pull the user-facing `detail.error` string out of an error envelope.
pub fn envelope_error(body: &Value) -> Option<String> {
    body.get("detail")?
        .get("error")?
        .as_str()
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Boundary to the remote assessment service so the controller can be exercised in isolation.
pub trait AssessmentTransport: Send + Sync {
    fn assess(
        &self,
        request: AssessmentRequest,
        progress: ProgressSender,
    ) -> impl Future<Output = Result<AssessmentReport, TransportError>> + Send;

    fn validate(
        &self,
        application: &ApplicationDraft,
    ) -> impl Future<Output = Result<ValidationOutcome, TransportError>> + Send;

    /// Never fails; an unreachable service reports as unhealthy.
    fn health(&self) -> impl Future<Output = HealthStatus> + Send;
}

/// Transport-level failure before classification.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TransportError {
    #[error("assessment service unreachable: {0}")]
    Unreachable(String),
    #[error("assessment service answered with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    #[error("assessment service returned an unusable body: {0}")]
    Malformed(String),
    #[error("http client could not be configured: {0}")]
    Setup(String),
}
