use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::domain::{
    ApplicantInfo, ApplicationDraft, ApplicationId, CollateralInfo, CreditHistory, DraftSection,
    EmploymentInfo, ExistingDebt, LoanRequest,
};

static DRAFT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Mint an identifier that is unique within the process and unlikely to repeat across runs.
pub(crate) fn next_application_id() -> ApplicationId {
    let sequence = DRAFT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!(
        "APP-{}-{sequence:04}",
        Utc::now().timestamp_millis()
    ))
}

impl ApplicationDraft {
    /// Empty draft with the wizard defaults and a fresh identifier.
    pub fn initialize() -> Self {
        Self {
            application_id: next_application_id(),
            applicant: ApplicantInfo::default(),
            employment: EmploymentInfo::default(),
            existing_debts: Vec::new(),
            collateral: None,
            loan_request: LoanRequest::default(),
            credit_history: CreditHistory::default(),
        }
    }

    /// Copy of this draft with exactly one `section.key` replaced.
    ///
    /// The key must already exist in the section and the value must deserialize into the
    /// field's type; otherwise the draft is left as it was and an error is returned.
    pub fn with_field(
        &self,
        section: DraftSection,
        key: &str,
        value: Value,
    ) -> Result<Self, DraftError> {
        let mut document = serde_json::to_value(self).map_err(DraftError::Encode)?;

        let fields = match document.get_mut(section.key()) {
            Some(Value::Object(fields)) => fields,
            _ => return Err(DraftError::SectionAbsent(section)),
        };

        match fields.get_mut(key) {
            Some(slot) => *slot = value,
            None => {
                return Err(DraftError::UnknownField {
                    section,
                    key: key.to_string(),
                })
            }
        }

        serde_json::from_value(document).map_err(|source| DraftError::InvalidValue {
            section,
            key: key.to_string(),
            source,
        })
    }
}

/// The five wizard pages, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Applicant,
    Employment,
    Debts,
    Collateral,
    LoanRequest,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Applicant,
        WizardStep::Employment,
        WizardStep::Debts,
        WizardStep::Collateral,
        WizardStep::LoanRequest,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            WizardStep::Applicant => "Applicant",
            WizardStep::Employment => "Employment",
            WizardStep::Debts => "Existing Debts",
            WizardStep::Collateral => "Collateral",
            WizardStep::LoanRequest => "Loan Request",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Index into [`WizardStep::ALL`]; never outside `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct WizardPosition(u8);

impl WizardPosition {
    const LAST: u8 = (WizardStep::ALL.len() - 1) as u8;

    pub fn clamped(index: usize) -> Self {
        Self(index.min(Self::LAST as usize) as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn step(self) -> WizardStep {
        WizardStep::ALL[self.index()]
    }

    pub const fn is_first(self) -> bool {
        self.0 == 0
    }

    pub const fn is_last(self) -> bool {
        self.0 == Self::LAST
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::LAST))
    }

    pub fn previous(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl From<u8> for WizardPosition {
    fn from(value: u8) -> Self {
        Self::clamped(value as usize)
    }
}

impl From<WizardPosition> for u8 {
    fn from(value: WizardPosition) -> Self {
        value.0
    }
}

/// Owns the draft being edited and the wizard page it is shown on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraftStore {
    draft: ApplicationDraft,
    position: WizardPosition,
}

impl Default for ApplicationDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationDraftStore {
    pub fn new() -> Self {
        Self::from_draft(ApplicationDraft::initialize())
    }

    pub fn from_draft(draft: ApplicationDraft) -> Self {
        Self {
            draft,
            position: WizardPosition::default(),
        }
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    pub fn position(&self) -> WizardPosition {
        self.position
    }

    pub fn update_field(
        &mut self,
        section: DraftSection,
        key: &str,
        value: Value,
    ) -> Result<(), DraftError> {
        self.draft = self.draft.with_field(section, key, value)?;
        Ok(())
    }

    pub fn advance_step(&mut self) {
        self.position = self.position.next();
    }

    pub fn retreat_step(&mut self) {
        self.position = self.position.previous();
    }

    pub fn jump_to(&mut self, index: usize) {
        self.position = WizardPosition::clamped(index);
    }

    /// Swap in a whole new draft; the wizard page is kept.
    pub fn replace(&mut self, draft: ApplicationDraft) {
        self.draft = draft;
    }

    /// Back to an empty draft on the first page.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn add_debt(&mut self, debt: ExistingDebt) {
        self.draft.existing_debts.push(debt);
    }

    pub fn remove_debt(&mut self, index: usize) -> Result<ExistingDebt, DraftError> {
        if index >= self.draft.existing_debts.len() {
            return Err(DraftError::DebtOutOfRange {
                index,
                len: self.draft.existing_debts.len(),
            });
        }
        Ok(self.draft.existing_debts.remove(index))
    }

    pub fn set_collateral(&mut self, collateral: Option<CollateralInfo>) {
        self.draft.collateral = collateral;
    }
}

/// Rejected draft edits. The draft is unchanged whenever one of these is returned.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("section '{}' has no record to edit", .0.key())]
    SectionAbsent(DraftSection),
    #[error("'{}' has no field named '{key}'", .section.key())]
    UnknownField { section: DraftSection, key: String },
    #[error("invalid value for {}.{key}: {source}", .section.key())]
    InvalidValue {
        section: DraftSection,
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("no debt at position {index} (draft lists {len})")]
    DebtOutOfRange { index: usize, len: usize },
    #[error("draft could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Serde sources compare by message; everything else structurally.
impl PartialEq for DraftError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::SectionAbsent(left), Self::SectionAbsent(right)) => left == right,
            (
                Self::UnknownField { section, key },
                Self::UnknownField {
                    section: other_section,
                    key: other_key,
                },
            ) => section == other_section && key == other_key,
            (
                Self::InvalidValue {
                    section,
                    key,
                    source,
                },
                Self::InvalidValue {
                    section: other_section,
                    key: other_key,
                    source: other_source,
                },
            ) => {
                section == other_section
                    && key == other_key
                    && source.to_string() == other_source.to_string()
            }
            (
                Self::DebtOutOfRange { index, len },
                Self::DebtOutOfRange {
                    index: other_index,
                    len: other_len,
                },
            ) => index == other_index && len == other_len,
            (Self::Encode(left), Self::Encode(right)) => left.to_string() == right.to_string(),
            _ => false,
        }
    }
}
