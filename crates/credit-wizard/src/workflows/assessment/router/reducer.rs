use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::state::{Screen, SubmittingOverlay, ViewState};
use crate::workflows::assessment::draft::{
    check_required_fields, load_preset, ApplicationDraft, CollateralInfo, DraftError,
    DraftSection, ExistingDebt, FieldMissingError, PresetKind,
};
use crate::workflows::assessment::report::AssessmentReport;
use crate::workflows::assessment::submission::{
    SubmissionEvent, SubmissionRejected, SubmissionTicket, ASSESSMENT_FAILED_MESSAGE,
};

pub const INITIAL_PROGRESS_MESSAGE: &str = "Initializing credit assessment...";
pub const FALLBACK_PROGRESS_MESSAGE: &str = "Processing...";

/// Inputs to the wizard: user intents and submission events.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    UpdateField {
        section: DraftSection,
        key: String,
        value: Value,
    },
    NextStep,
    PrevStep,
    GoToStep(usize),
    LoadPreset(PresetKind),
    AddDebt(ExistingDebt),
    RemoveDebt(usize),
    SetCollateral(Option<CollateralInfo>),
    Submit,
    SubmissionProgress {
        ticket: SubmissionTicket,
        status: String,
    },
    SubmissionSucceeded {
        ticket: SubmissionTicket,
        report: Box<AssessmentReport>,
    },
    SubmissionFailed {
        ticket: SubmissionTicket,
        message: String,
    },
    SubmissionRefused {
        ticket: SubmissionTicket,
        reason: SubmissionRejected,
    },
    NewAssessment,
}

impl From<SubmissionEvent> for ViewAction {
    fn from(event: SubmissionEvent) -> Self {
        match event {
            SubmissionEvent::Progress { ticket, status } => {
                ViewAction::SubmissionProgress { ticket, status }
            }
            SubmissionEvent::Completed { ticket, report } => {
                ViewAction::SubmissionSucceeded { ticket, report }
            }
            SubmissionEvent::Failed { ticket, failure } => ViewAction::SubmissionFailed {
                ticket,
                message: failure.message,
            },
        }
    }
}

/// Work the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEffect {
    StartSubmission {
        ticket: SubmissionTicket,
        draft: ApplicationDraft,
    },
    MissingFields(FieldMissingError),
    /// The edit was refused and the draft left as it was.
    RejectedEdit(Arc<DraftError>),
}

/// Apply one action to the view state and report the follow-up work.
pub fn reduce(state: &mut ViewState, action: ViewAction) -> Vec<ViewEffect> {
    match action {
        ViewAction::UpdateField {
            section,
            key,
            value,
        } => {
            if !state.is_editable() {
                return Vec::new();
            }
            match state.store.update_field(section, &key, value) {
                Ok(()) => Vec::new(),
                Err(err) => vec![ViewEffect::RejectedEdit(Arc::new(err))],
            }
        }
        ViewAction::NextStep => {
            if state.is_editable() {
                state.store.advance_step();
            }
            Vec::new()
        }
        ViewAction::PrevStep => {
            if state.is_editable() {
                state.store.retreat_step();
            }
            Vec::new()
        }
        ViewAction::GoToStep(index) => {
            if state.is_editable() {
                state.store.jump_to(index);
            }
            Vec::new()
        }
        ViewAction::LoadPreset(kind) => {
            if state.is_editable() {
                state.store.replace(load_preset(kind));
            }
            Vec::new()
        }
        ViewAction::AddDebt(debt) => {
            if state.is_editable() {
                state.store.add_debt(debt);
            }
            Vec::new()
        }
        ViewAction::RemoveDebt(index) => {
            if !state.is_editable() {
                return Vec::new();
            }
            match state.store.remove_debt(index) {
                Ok(_) => Vec::new(),
                Err(err) => vec![ViewEffect::RejectedEdit(Arc::new(err))],
            }
        }
        ViewAction::SetCollateral(collateral) => {
            if state.is_editable() {
                state.store.set_collateral(collateral);
            }
            Vec::new()
        }
        ViewAction::Submit => submit(state),
        ViewAction::SubmissionProgress { ticket, status } => {
            if let Some(overlay) = pending_overlay(state, ticket) {
                overlay.message = if status.trim().is_empty() {
                    FALLBACK_PROGRESS_MESSAGE.to_string()
                } else {
                    status
                };
            }
            Vec::new()
        }
        ViewAction::SubmissionSucceeded { ticket, report } => {
            if pending_overlay(state, ticket).is_some() {
                state.submitting = None;
                state.report = Some(*report);
                state.screen = Screen::Results;
            }
            Vec::new()
        }
        ViewAction::SubmissionFailed { ticket, message } => {
            if pending_overlay(state, ticket).is_some() {
                state.submitting = None;
                state.banner = Some(message);
            }
            Vec::new()
        }
        ViewAction::SubmissionRefused { ticket, reason } => {
            if pending_overlay(state, ticket).is_some() {
                debug!(ticket = ticket.0, %reason, "submission refused by controller");
                state.submitting = None;
                state.banner = Some(ASSESSMENT_FAILED_MESSAGE.to_string());
            }
            Vec::new()
        }
        ViewAction::NewAssessment => {
            if state.screen == Screen::Results {
                state.store.reset();
                state.report = None;
                state.banner = None;
                state.submitting = None;
                state.screen = Screen::Form;
            }
            Vec::new()
        }
    }
}

fn submit(state: &mut ViewState) -> Vec<ViewEffect> {
    if !state.is_editable() {
        return Vec::new();
    }

    if let Err(missing) = check_required_fields(state.store.draft()) {
        if let Some(step) = missing.first_step() {
            state.store.jump_to(step.index());
        }
        return vec![ViewEffect::MissingFields(missing)];
    }

    state.banner = None;
    let ticket = state.allocate_ticket();
    state.submitting = Some(SubmittingOverlay {
        ticket,
        message: INITIAL_PROGRESS_MESSAGE.to_string(),
    });

    vec![ViewEffect::StartSubmission {
        ticket,
        draft: state.store.draft().clone(),
    }]
}

fn pending_overlay(
    state: &mut ViewState,
    ticket: SubmissionTicket,
) -> Option<&mut SubmittingOverlay> {
    state
        .submitting
        .as_mut()
        .filter(|overlay| overlay.ticket == ticket)
}
