use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::workflows::assessment::report::AssessmentReport;

pub const STAGE_INIT: &str = "init";
pub const STAGE_FINANCIAL_DATA: &str = "financial_data";
pub const STAGE_COMPLETE: &str = "complete";
pub const STAGE_ERROR: &str = "error";

/// One `data:` frame of `POST /assess/stream`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub status: String,
    /// Percentage in `0..=100`.
    pub progress: u8,
    pub stage: String,
    #[serde(default)]
    pub data: Option<Value>,
}

impl ProgressUpdate {
    pub fn new(status: impl Into<String>, progress: u8, stage: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            progress: progress.min(100),
            stage: stage.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Terminal frame of a finished assessment. Carries the headline figures only.
    pub fn completed(report: &AssessmentReport) -> Self {
        Self::new("Assessment complete!", 100, STAGE_COMPLETE).with_data(json!({
            "decision": report.credit_decision.decision.as_str(),
            "confidence": report.credit_decision.confidence_score,
            "risk_level": report.risk_assessment.overall_risk_level.as_str(),
            "report_id": report.report_id,
        }))
    }

    pub fn failed(message: &str) -> Self {
        Self::new(format!("Assessment failed: {message}"), 0, STAGE_ERROR)
            .with_data(json!({ "error": message }))
    }

    pub fn is_complete(&self) -> bool {
        self.stage == STAGE_COMPLETE
    }

    pub fn is_error(&self) -> bool {
        self.stage == STAGE_ERROR
    }

    /// `data.error` of an error frame, falling back to its status line.
    pub fn error_message(&self) -> String {
        self.data
            .as_ref()
            .and_then(|data| data.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.status.clone())
    }

    pub fn summary(&self) -> StreamSummary {
        self.data
            .clone()
            .and_then(|data| serde_json::from_value(data).ok())
            .unwrap_or_default()
    }

    /// Render as a `text/event-stream` frame.
    pub fn to_event(&self) -> Result<String, serde_json::Error> {
        Ok(format!("data: {}\n\n", serde_json::to_string(self)?))
    }
}

/// Headline outcome carried by the `complete` frame. The full report is only served by `/assess`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamSummary {
    pub decision: String,
    pub confidence: Option<f64>,
    pub risk_level: Option<String>,
    pub report_id: String,
}

/// Incremental decoder for the `data:` payloads of a `text/event-stream` body.
#[derive(Debug, Default)]
pub struct EventStreamDecoder {
    buffer: Vec<u8>,
}

impl EventStreamDecoder {
    /// Feed a chunk and collect the payload of every event it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some((end, separator)) = frame_boundary(&self.buffer) {
            let frame: Vec<u8> = self.buffer.drain(..end + separator).collect();
            if let Some(payload) = frame_payload(&frame[..end]) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Payload of a trailing event that was not followed by a blank line.
    pub fn finish(&mut self) -> Option<String> {
        let frame = std::mem::take(&mut self.buffer);
        frame_payload(&frame)
    }
}

fn frame_boundary(buffer: &[u8]) -> Option<(usize, usize)> {
    let lf = find(buffer, b"\n\n").map(|index| (index, 2));
    let crlf = find(buffer, b"\r\n\r\n").map(|index| (index, 4));
    match (lf, crlf) {
        (Some(lf), Some(crlf)) => Some(if lf.0 <= crlf.0 { lf } else { crlf }),
        (lf, crlf) => lf.or(crlf),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn frame_payload(frame: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(frame);
    let lines: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}
