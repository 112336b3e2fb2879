//! Loan application wizard: draft editing, submission to the assessment service, and the
//! decision dashboard.
//!
//! Data moves one way per cycle. The draft store hands a snapshot to the submission
//! controller, the controller streams events back, the router folds them into its state, and
//! the projector turns the resulting report into display strings.

pub mod draft;
pub mod report;
pub mod router;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use draft::{
    check_required_fields, load_preset, ApplicationDraft, ApplicationDraftStore, ApplicationId,
    DraftError, DraftSection, FieldMissingError, PresetKind, WizardPosition, WizardStep,
};
pub use report::{project, AssessmentReport, DisplayModel};
pub use router::{reduce, AssessmentSession, Screen, ViewAction, ViewEffect, ViewState};
pub use submission::{
    AssessmentTransport, HealthStatus, HttpAssessmentClient, SubmissionController,
    SubmissionEvent, SubmissionRejected, SubmissionTicket, TransportError,
};
pub use validation::{validate_application, ValidationOutcome};
