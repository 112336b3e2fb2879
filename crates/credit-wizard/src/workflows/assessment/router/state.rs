use serde::{Deserialize, Serialize};

use crate::workflows::assessment::draft::ApplicationDraftStore;
use crate::workflows::assessment::report::{project, AssessmentReport, DisplayModel};
use crate::workflows::assessment::submission::SubmissionTicket;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Form,
    Results,
}

/// Shown over the form while a submission is pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittingOverlay {
    pub ticket: SubmissionTicket,
    pub message: String,
}

/// Everything the wizard displays, as one serializable record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewState {
    pub screen: Screen,
    pub store: ApplicationDraftStore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitting: Option<SubmittingOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AssessmentReport>,
    #[serde(default)]
    pub next_ticket: u64,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form visible and not frozen behind the overlay.
    pub fn is_editable(&self) -> bool {
        self.screen == Screen::Form && self.submitting.is_none()
    }

    pub fn pending_ticket(&self) -> Option<SubmissionTicket> {
        self.submitting.as_ref().map(|overlay| overlay.ticket)
    }

    pub fn display_model(&self) -> Option<DisplayModel> {
        self.report.as_ref().map(project)
    }

    pub(crate) fn allocate_ticket(&mut self) -> SubmissionTicket {
        self.next_ticket += 1;
        SubmissionTicket(self.next_ticket)
    }
}
