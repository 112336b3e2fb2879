use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::events::ProgressSender;
use super::stream::{EventStreamDecoder, ProgressUpdate, StreamSummary};
use super::transport::{
    envelope_error, AssessmentRequest, AssessmentResponse, AssessmentTransport, HealthStatus,
    TransportError,
};
use crate::config::AssessmentServiceConfig;
use crate::workflows::assessment::draft::ApplicationDraft;
use crate::workflows::assessment::report::AssessmentReport;
use crate::workflows::assessment::validation::ValidationOutcome;

pub const SUBMITTING_STATUS: &str = "Submitting application for assessment...";
pub const RECEIVED_STATUS: &str = "Assessment received, preparing report...";

/// `reqwest` client for the assessment service.
#[derive(Debug, Clone)]
pub struct HttpAssessmentClient {
    client: Client,
    config: AssessmentServiceConfig,
}

impl HttpAssessmentClient {
    pub fn new(config: AssessmentServiceConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::Setup(err.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AssessmentServiceConfig {
        &self.config
    }

    /// Run `/assess/stream`, handing every progress frame to `on_update` as it arrives.
    ///
    /// Resolves with the summary from the `complete` frame; fetch the full report with `/assess`.
    pub async fn assess_stream<F>(
        &self,
        request: &AssessmentRequest,
        mut on_update: F,
    ) -> Result<StreamSummary, TransportError>
    where
        F: FnMut(&ProgressUpdate),
    {
        let mut response = self.post_json("assess/stream", request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.map_err(unreachable)?;
            return Err(rejected(status, &body));
        }

        let mut decoder = EventStreamDecoder::default();
        while let Some(chunk) = response.chunk().await.map_err(unreachable)? {
            for payload in decoder.push(&chunk) {
                if let Some(summary) = relay_update(status, &payload, &mut on_update)? {
                    return Ok(summary);
                }
            }
        }
        if let Some(payload) = decoder.finish() {
            if let Some(summary) = relay_update(status, &payload, &mut on_update)? {
                return Ok(summary);
            }
        }

        Err(TransportError::Malformed(
            "event stream ended before the assessment completed".to_string(),
        ))
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, TransportError> {
        let url = self
            .config
            .endpoint(path)
            .map_err(|err| TransportError::Setup(err.to_string()))?;
        debug!(%url, "posting to assessment service");
        self.client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(unreachable)
    }
}

fn unreachable(err: reqwest::Error) -> TransportError {
    TransportError::Unreachable(err.to_string())
}

/// Decode a 2xx body, or turn an error status into `Rejected` carrying `detail.error`.
///
/// A body that cannot be read to the end (timeout, reset) counts as an unreachable service.
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.bytes().await.map_err(unreachable)?;

    if !status.is_success() {
        return Err(rejected(status, &body));
    }

    serde_json::from_slice(&body).map_err(|err| TransportError::Malformed(err.to_string()))
}

fn rejected(status: StatusCode, body: &[u8]) -> TransportError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|body| envelope_error(&body));
    TransportError::Rejected {
        status: status.as_u16(),
        detail,
    }
}

/// Decode one stream payload, report it, and settle on a terminal frame.
fn relay_update<F>(
    status: StatusCode,
    payload: &str,
    on_update: &mut F,
) -> Result<Option<StreamSummary>, TransportError>
where
    F: FnMut(&ProgressUpdate),
{
    let update: ProgressUpdate = serde_json::from_str(payload)
        .map_err(|err| TransportError::Malformed(format!("bad progress frame: {err}")))?;
    on_update(&update);

    if update.is_error() {
        return Err(TransportError::Rejected {
            status: status.as_u16(),
            detail: Some(update.error_message()),
        });
    }
    Ok(update.is_complete().then(|| update.summary()))
}

impl AssessmentTransport for HttpAssessmentClient {
    async fn assess(
        &self,
        request: AssessmentRequest,
        progress: ProgressSender,
    ) -> Result<AssessmentReport, TransportError> {
        progress.notify(SUBMITTING_STATUS);
        let response = self.post_json("assess", &request).await?;
        let status = response.status().as_u16();
        let body: AssessmentResponse = read_json(response).await?;
        progress.notify(RECEIVED_STATUS);

        match body.report {
            Some(report) => Ok(report),
            None if body.error.is_some() => Err(TransportError::Rejected {
                status,
                detail: body.error,
            }),
            None => Err(TransportError::Malformed(
                "response carried no report".to_string(),
            )),
        }
    }

    async fn validate(
        &self,
        application: &ApplicationDraft,
    ) -> Result<ValidationOutcome, TransportError> {
        let response = self.post_json("validate", application).await?;
        read_json(response).await
    }

    async fn health(&self) -> HealthStatus {
        let url = match self.config.health_url() {
            Ok(url) => url,
            Err(err) => {
                warn!(error = %err, "health check has no usable URL");
                return HealthStatus::unhealthy();
            }
        };
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, error = %err, "health check unreachable");
                return HealthStatus::unhealthy();
            }
        };

        match read_json::<HealthStatus>(response).await {
            Ok(status) => status,
            Err(err) => {
                warn!(%url, error = %err, "health check degraded");
                HealthStatus::unhealthy()
            }
        }
    }
}
