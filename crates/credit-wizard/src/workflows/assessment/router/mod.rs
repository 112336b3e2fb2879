//! Which screen the wizard shows, driven by a pure reducer over [`ViewState`].

pub mod reducer;
pub mod session;
pub mod state;

pub use reducer::{
    reduce, ViewAction, ViewEffect, FALLBACK_PROGRESS_MESSAGE, INITIAL_PROGRESS_MESSAGE,
};
pub use session::AssessmentSession;
pub use state::{Screen, SubmittingOverlay, ViewState};
