use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::workflows::assessment::draft::{load_preset, ApplicationDraft, PresetKind};
use crate::workflows::assessment::report::samples::{approved_report, declined_report};
use crate::workflows::assessment::report::AssessmentReport;
use crate::workflows::assessment::router::{AssessmentSession, ViewAction};
use crate::workflows::assessment::submission::{
    AssessmentRequest, AssessmentTransport, HealthStatus, ProgressSender, SubmissionController,
    SubmissionEvent, SubmissionHandle, TransportError,
};
use crate::workflows::assessment::validation::{validate_application, ValidationOutcome};

/// Transport that replays a fixed outcome, optionally holding it until released.
pub(super) struct ScriptedTransport {
    outcome: Result<AssessmentReport, TransportError>,
    progress: Vec<String>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AssessmentRequest>>,
}

impl ScriptedTransport {
    pub(super) fn new(outcome: Result<AssessmentReport, TransportError>) -> Self {
        Self {
            outcome,
            progress: Vec::new(),
            gate: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn approving() -> Self {
        Self::new(Ok(approved_report()))
    }

    pub(super) fn declining() -> Self {
        Self::new(Ok(declined_report()))
    }

    pub(super) fn rejecting(detail: Option<&str>) -> Self {
        Self::new(Err(TransportError::Rejected {
            status: 400,
            detail: detail.map(str::to_string),
        }))
    }

    pub(super) fn unreachable() -> Self {
        Self::new(Err(TransportError::Unreachable(
            "connection refused".to_string(),
        )))
    }

    pub(super) fn with_progress(mut self, statuses: &[&str]) -> Self {
        self.progress = statuses.iter().map(|status| status.to_string()).collect();
        self
    }

    pub(super) fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn requests(&self) -> Vec<AssessmentRequest> {
        self.requests.lock().expect("requests mutex poisoned").clone()
    }
}

impl AssessmentTransport for ScriptedTransport {
    async fn assess(
        &self,
        request: AssessmentRequest,
        progress: ProgressSender,
    ) -> Result<AssessmentReport, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests mutex poisoned")
            .push(request);

        for status in &self.progress {
            progress.notify(status.clone());
        }
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.outcome.clone()
    }

    async fn validate(
        &self,
        application: &ApplicationDraft,
    ) -> Result<ValidationOutcome, TransportError> {
        match &self.outcome {
            Err(err) => Err(err.clone()),
            Ok(_) => Ok(validate_application(application)),
        }
    }

    async fn health(&self) -> HealthStatus {
        match &self.outcome {
            Err(TransportError::Unreachable(_)) => HealthStatus::unhealthy(),
            _ => HealthStatus {
                status: "healthy".to_string(),
                version: Some("1.0.0".to_string()),
                timestamp: None,
            },
        }
    }
}

pub(super) fn controller(
    transport: ScriptedTransport,
) -> (Arc<ScriptedTransport>, SubmissionController<ScriptedTransport>) {
    let transport = Arc::new(transport);
    let controller = SubmissionController::new(Arc::clone(&transport));
    (transport, controller)
}

/// Session with `kind` already loaded into the form.
pub(super) fn session_with_preset(
    transport: ScriptedTransport,
    kind: PresetKind,
) -> (Arc<ScriptedTransport>, AssessmentSession<ScriptedTransport>) {
    let (transport, controller) = controller(transport);
    let mut session = AssessmentSession::new(controller);
    session.dispatch(ViewAction::LoadPreset(kind));
    (transport, session)
}

pub(super) fn favorable_draft() -> ApplicationDraft {
    load_preset(PresetKind::Favorable)
}

/// Collect events up to and including the terminal one.
pub(super) async fn drain(handle: &mut SubmissionHandle) -> Vec<SubmissionEvent> {
    let mut events = Vec::new();
    while let Some(event) = handle.next_event().await {
        let terminal = event.is_terminal();
        events.push(event);
        if terminal {
            break;
        }
    }
    events
}
