//! The application record edited in the wizard, its page position, and the canned presets.

pub mod checks;
pub mod domain;
pub mod presets;
pub mod store;

pub use checks::{check_required_fields, FieldMissingError, MissingField};
pub use domain::{
    ApplicantInfo, ApplicationDraft, ApplicationId, CollateralInfo, CollateralType, CreditHistory,
    DraftSection, EmploymentInfo, EmploymentType, ExistingDebt, LoanPurpose, LoanRequest,
    PaymentHistory,
};
pub use presets::{load_preset, PresetKind};
pub use store::{ApplicationDraftStore, DraftError, WizardPosition, WizardStep};
