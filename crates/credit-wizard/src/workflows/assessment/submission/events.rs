use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::workflows::assessment::report::AssessmentReport;

/// Correlates events with the submission that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionTicket(pub u64);

/// Which side of the exchange failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// No response reached us.
    Network,
    /// The service answered with an error or an unusable body.
    Api,
}

/// A failed submission reduced to what the banner needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// One submission produces zero or more `Progress` events followed by exactly one
/// `Completed` or `Failed`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionEvent {
    Progress {
        ticket: SubmissionTicket,
        status: String,
    },
    Completed {
        ticket: SubmissionTicket,
        report: Box<AssessmentReport>,
    },
    Failed {
        ticket: SubmissionTicket,
        failure: SubmissionFailure,
    },
}

impl SubmissionEvent {
    pub fn ticket(&self) -> SubmissionTicket {
        match self {
            SubmissionEvent::Progress { ticket, .. }
            | SubmissionEvent::Completed { ticket, .. }
            | SubmissionEvent::Failed { ticket, .. } => *ticket,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SubmissionEvent::Progress { .. })
    }
}

/// Handed to the transport so it can report status while the exchange is pending.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    ticket: SubmissionTicket,
    events: mpsc::UnboundedSender<SubmissionEvent>,
}

impl ProgressSender {
    pub(crate) fn new(
        ticket: SubmissionTicket,
        events: mpsc::UnboundedSender<SubmissionEvent>,
    ) -> Self {
        Self { ticket, events }
    }

    /// A sender whose notifications go nowhere.
    pub fn detached() -> Self {
        let (events, _) = mpsc::unbounded_channel();
        Self {
            ticket: SubmissionTicket(0),
            events,
        }
    }

    /// Forward a status line. Silently dropped once the consumer has gone away.
    pub fn notify(&self, status: impl Into<String>) {
        let _ = self.events.send(SubmissionEvent::Progress {
            ticket: self.ticket,
            status: status.into(),
        });
    }
}

/// Receiving end of one submission's event stream.
#[derive(Debug)]
pub struct SubmissionHandle {
    ticket: SubmissionTicket,
    events: mpsc::UnboundedReceiver<SubmissionEvent>,
}

impl SubmissionHandle {
    pub(crate) fn new(
        ticket: SubmissionTicket,
        events: mpsc::UnboundedReceiver<SubmissionEvent>,
    ) -> Self {
        Self { ticket, events }
    }

    pub fn ticket(&self) -> SubmissionTicket {
        self.ticket
    }

    /// Next event in arrival order; `None` once the stream has ended.
    pub async fn next_event(&mut self) -> Option<SubmissionEvent> {
        self.events.recv().await
    }
}
