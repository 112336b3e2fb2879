use chrono::NaiveDate;
use serde::Serialize;

use super::domain::ApplicationDraft;
use super::store::WizardStep;

pub const MIN_CREDIT_SCORE: u16 = 300;
pub const MAX_CREDIT_SCORE: u16 = 850;
pub const MIN_REQUESTED_AMOUNT: f64 = 1_000.0;
pub const MIN_TERM_MONTHS: u32 = 12;
pub const MAX_TERM_MONTHS: u32 = 480;

/// A required field that is empty or outside its accepted range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    pub step: WizardStep,
    pub field: &'static str,
    pub problem: String,
}

impl MissingField {
    fn new(step: WizardStep, field: &'static str, problem: impl Into<String>) -> Self {
        Self {
            step,
            field,
            problem: problem.into(),
        }
    }
}

/// Raised when the draft is not ready to leave the wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{} required field(s) need attention", .missing.len())]
pub struct FieldMissingError {
    pub missing: Vec<MissingField>,
}

impl FieldMissingError {
    /// Earliest wizard page holding a problem.
    pub fn first_step(&self) -> Option<WizardStep> {
        self.missing.first().map(|field| field.step)
    }
}

/// Local pre-submission check mirroring the wizard's required inputs.
///
/// Problems are listed in wizard order.
pub fn check_required_fields(draft: &ApplicationDraft) -> Result<(), FieldMissingError> {
    let mut missing = Vec::new();

    let applicant = &draft.applicant;
    if applicant.first_name.trim().is_empty() {
        missing.push(MissingField::new(WizardStep::Applicant, "first_name", "required"));
    }
    if applicant.last_name.trim().is_empty() {
        missing.push(MissingField::new(WizardStep::Applicant, "last_name", "required"));
    }
    if applicant.date_of_birth.trim().is_empty() {
        missing.push(MissingField::new(WizardStep::Applicant, "date_of_birth", "required"));
    } else if NaiveDate::parse_from_str(applicant.date_of_birth.trim(), "%Y-%m-%d").is_err() {
        missing.push(MissingField::new(
            WizardStep::Applicant,
            "date_of_birth",
            "expected YYYY-MM-DD",
        ));
    }

    let score = draft.credit_history.credit_score;
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
        missing.push(MissingField::new(
            WizardStep::Applicant,
            "credit_score",
            format!("must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"),
        ));
    }
    if draft.credit_history.oldest_account_years < 0.0 {
        missing.push(MissingField::new(
            WizardStep::Applicant,
            "oldest_account_years",
            "must not be negative",
        ));
    }

    let employment = &draft.employment;
    if employment.monthly_gross_income <= 0.0 {
        missing.push(MissingField::new(
            WizardStep::Employment,
            "monthly_gross_income",
            "must be greater than zero",
        ));
    }
    if employment.monthly_net_income <= 0.0 {
        missing.push(MissingField::new(
            WizardStep::Employment,
            "monthly_net_income",
            "must be greater than zero",
        ));
    }
    for (field, value) in [
        ("years_employed", employment.years_employed),
        ("years_in_profession", employment.years_in_profession),
        ("additional_income", employment.additional_income),
    ] {
        if value < 0.0 {
            missing.push(MissingField::new(
                WizardStep::Employment,
                field,
                "must not be negative",
            ));
        }
    }

    for debt in &draft.existing_debts {
        let amounts = [
            debt.original_amount,
            debt.current_balance,
            debt.monthly_payment,
            debt.interest_rate,
        ];
        if amounts.iter().any(|amount| *amount < 0.0) {
            missing.push(MissingField::new(
                WizardStep::Debts,
                "existing_debts",
                format!("amounts for '{}' must not be negative", debt.creditor_name),
            ));
        }
    }

    if let Some(collateral) = &draft.collateral {
        if collateral.estimated_value <= 0.0 {
            missing.push(MissingField::new(
                WizardStep::Collateral,
                "estimated_value",
                "must be greater than zero",
            ));
        }
        if collateral.encumbrances < 0.0 {
            missing.push(MissingField::new(
                WizardStep::Collateral,
                "encumbrances",
                "must not be negative",
            ));
        }
    }

    let loan = &draft.loan_request;
    if loan.requested_amount < MIN_REQUESTED_AMOUNT {
        missing.push(MissingField::new(
            WizardStep::LoanRequest,
            "requested_amount",
            format!("must be at least {MIN_REQUESTED_AMOUNT:.0}"),
        ));
    }
    if !(MIN_TERM_MONTHS..=MAX_TERM_MONTHS).contains(&loan.requested_term_months) {
        missing.push(MissingField::new(
            WizardStep::LoanRequest,
            "requested_term_months",
            format!("must be between {MIN_TERM_MONTHS} and {MAX_TERM_MONTHS}"),
        ));
    }
    if !(1..=28).contains(&loan.preferred_payment_day) {
        missing.push(MissingField::new(
            WizardStep::LoanRequest,
            "preferred_payment_day",
            "must be between 1 and 28",
        ));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(FieldMissingError { missing })
    }
}
