use tracing::warn;

use super::reducer::{reduce, ViewAction, ViewEffect};
use super::state::ViewState;
use crate::workflows::assessment::draft::ApplicationDraft;
use crate::workflows::assessment::report::DisplayModel;
use crate::workflows::assessment::submission::{
    AssessmentTransport, SubmissionController, SubmissionTicket, ASSESSMENT_FAILED_MESSAGE,
};

/// Couples the view reducer to a submission controller.
pub struct AssessmentSession<T> {
    state: ViewState,
    controller: SubmissionController<T>,
}

impl<T> AssessmentSession<T>
where
    T: AssessmentTransport + 'static,
{
    pub fn new(controller: SubmissionController<T>) -> Self {
        Self::with_state(controller, ViewState::new())
    }

    pub fn with_state(controller: SubmissionController<T>, state: ViewState) -> Self {
        Self { state, controller }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn controller(&self) -> &SubmissionController<T> {
        &self.controller
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    pub fn display_model(&self) -> Option<DisplayModel> {
        self.state.display_model()
    }

    /// Apply an action without performing its effects. Use [`Self::submit`] to run a submission.
    pub fn dispatch(&mut self, action: ViewAction) -> Vec<ViewEffect> {
        reduce(&mut self.state, action)
    }

    pub async fn submit(&mut self) -> Vec<ViewEffect> {
        self.submit_observed(|_| {}).await
    }

    /// Submit the current draft and pump events until the submission settles.
    ///
    /// `observe` sees the state after every applied event. Effects other than the
    /// submission itself are handed back.
    pub async fn submit_observed<F>(&mut self, mut observe: F) -> Vec<ViewEffect>
    where
        F: FnMut(&ViewState),
    {
        let mut remaining = Vec::new();
        for effect in reduce(&mut self.state, ViewAction::Submit) {
            match effect {
                ViewEffect::StartSubmission { ticket, draft } => {
                    observe(&self.state);
                    self.drive(ticket, &draft, &mut observe).await;
                }
                other => remaining.push(other),
            }
        }
        remaining
    }

    async fn drive<F>(
        &mut self,
        ticket: SubmissionTicket,
        draft: &ApplicationDraft,
        observe: &mut F,
    ) where
        F: FnMut(&ViewState),
    {
        let mut handle = match self.controller.submit(ticket, draft) {
            Ok(handle) => handle,
            Err(reason) => {
                reduce(&mut self.state, ViewAction::SubmissionRefused { ticket, reason });
                observe(&self.state);
                return;
            }
        };

        loop {
            let Some(event) = handle.next_event().await else {
                warn!(ticket = ticket.0, "submission ended without an outcome");
                reduce(
                    &mut self.state,
                    ViewAction::SubmissionFailed {
                        ticket,
                        message: ASSESSMENT_FAILED_MESSAGE.to_string(),
                    },
                );
                observe(&self.state);
                return;
            };

            let terminal = event.is_terminal();
            reduce(&mut self.state, event.into());
            observe(&self.state);
            if terminal {
                return;
            }
        }
    }
}
