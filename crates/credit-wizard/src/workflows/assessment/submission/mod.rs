//! Sending a draft to the assessment service and streaming back progress and the outcome.

pub mod controller;
pub mod events;
pub mod http;
pub mod stream;
pub mod transport;

pub use controller::{
    classify, SubmissionController, SubmissionRejected, ASSESSMENT_FAILED_MESSAGE,
    NETWORK_ERROR_MESSAGE,
};
pub use events::{
    FailureKind, ProgressSender, SubmissionEvent, SubmissionFailure, SubmissionHandle,
    SubmissionTicket,
};
pub use http::HttpAssessmentClient;
pub use stream::{EventStreamDecoder, ProgressUpdate, StreamSummary};
pub use transport::{
    AssessmentRequest, AssessmentResponse, AssessmentTransport, HealthStatus, TransportError,
};
