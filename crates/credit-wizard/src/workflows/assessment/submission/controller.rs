use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{info, warn};

use super::events::{
    FailureKind, ProgressSender, SubmissionEvent, SubmissionFailure, SubmissionHandle,
    SubmissionTicket,
};
use super::transport::{AssessmentRequest, AssessmentTransport, TransportError};
use crate::workflows::assessment::draft::ApplicationDraft;
use crate::workflows::assessment::validation::ValidationOutcome;

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";
pub const ASSESSMENT_FAILED_MESSAGE: &str = "Assessment failed";
pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";
pub const VALIDATION_NETWORK_MESSAGE: &str = "Network error";

/// Why `submit` refused to start an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("submissions must be started from within a tokio runtime")]
    NoRuntime,
}

/// Runs one assessment at a time against the transport and streams its outcome.
pub struct SubmissionController<T> {
    transport: Arc<T>,
    busy: Arc<AtomicBool>,
}

impl<T> Clone for SubmissionController<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            busy: Arc::clone(&self.busy),
        }
    }
}

impl<T> SubmissionController<T>
where
    T: AssessmentTransport + 'static,
{
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Start assessing a snapshot of `draft`. Must be called inside a tokio runtime.
    pub fn submit(
        &self,
        ticket: SubmissionTicket,
        draft: &ApplicationDraft,
    ) -> Result<SubmissionHandle, SubmissionRejected> {
        let runtime = Handle::try_current().map_err(|_| SubmissionRejected::NoRuntime)?;
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(ticket = ticket.0, "submission refused while another is pending");
            return Err(SubmissionRejected::InFlight);
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let (tx, rx) = mpsc::unbounded_channel();
        let transport = Arc::clone(&self.transport);
        let request = AssessmentRequest::detailed(draft.clone());
        let application_id = draft.application_id.clone();

        info!(ticket = ticket.0, application_id = %application_id, "submitting application");

        runtime.spawn(async move {
            let progress = ProgressSender::new(ticket, tx.clone());
            let outcome = transport.assess(request, progress).await;
            drop(guard);

            let event = match outcome {
                Ok(report) => {
                    info!(
                        ticket = ticket.0,
                        application_id = %application_id,
                        decision = report.credit_decision.decision.as_str(),
                        "assessment completed"
                    );
                    SubmissionEvent::Completed {
                        ticket,
                        report: Box::new(report),
                    }
                }
                Err(err) => {
                    warn!(
                        ticket = ticket.0,
                        application_id = %application_id,
                        error = %err,
                        "assessment failed"
                    );
                    SubmissionEvent::Failed {
                        ticket,
                        failure: classify(&err),
                    }
                }
            };
            let _ = tx.send(event);
        });

        Ok(SubmissionHandle::new(ticket, rx))
    }

    /// Ask the service to check the draft, reducing failures to a display string.
    pub async fn validate_remote(
        &self,
        draft: &ApplicationDraft,
    ) -> Result<ValidationOutcome, SubmissionFailure> {
        self.transport.validate(draft).await.map_err(|err| match err {
            TransportError::Unreachable(_) => SubmissionFailure {
                kind: FailureKind::Network,
                message: VALIDATION_NETWORK_MESSAGE.to_string(),
            },
            TransportError::Rejected {
                detail: Some(detail),
                ..
            } => SubmissionFailure {
                kind: FailureKind::Api,
                message: detail,
            },
            TransportError::Rejected { detail: None, .. }
            | TransportError::Malformed(_)
            | TransportError::Setup(_) => SubmissionFailure {
                kind: FailureKind::Api,
                message: VALIDATION_FAILED_MESSAGE.to_string(),
            },
        })
    }
}

/// Reduce a transport error to the banner text shown to the user.
pub fn classify(err: &TransportError) -> SubmissionFailure {
    match err {
        TransportError::Unreachable(_) => SubmissionFailure {
            kind: FailureKind::Network,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        },
        TransportError::Rejected {
            detail: Some(detail),
            ..
        } => SubmissionFailure {
            kind: FailureKind::Api,
            message: detail.clone(),
        },
        TransportError::Rejected { detail: None, .. }
        | TransportError::Malformed(_)
        | TransportError::Setup(_) => SubmissionFailure {
            kind: FailureKind::Api,
            message: ASSESSMENT_FAILED_MESSAGE.to_string(),
        },
    }
}

/// Clears the busy flag when the exchange finishes, even if the task unwinds.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
