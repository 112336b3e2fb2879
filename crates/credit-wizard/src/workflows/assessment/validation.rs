use serde::{Deserialize, Serialize};

use super::draft::checks::{MAX_CREDIT_SCORE, MIN_CREDIT_SCORE};
use super::draft::ApplicationDraft;

/// Existing debt service above this share of gross monthly income earns a warning.
pub const HIGH_EXISTING_DTI: f64 = 0.6;

/// Body of `POST /validate`: blocking issues plus advisory warnings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
}

/// Service-side consistency rules for an application.
pub fn validate_application(draft: &ApplicationDraft) -> ValidationOutcome {
    let mut issues = Vec::new();
    let mut warnings = Vec::new();

    let loan = &draft.loan_request;
    if loan.requested_amount <= 0.0 {
        issues.push("Requested amount must be positive".to_string());
    }
    if loan.requested_term_months == 0 {
        issues.push("Requested term must be positive".to_string());
    }

    let employment = &draft.employment;
    if employment.monthly_net_income > employment.monthly_gross_income {
        issues.push("Net income cannot exceed gross income".to_string());
    }

    let score = draft.credit_history.credit_score;
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&score) {
        issues.push(format!(
            "Credit score must be between {MIN_CREDIT_SCORE} and {MAX_CREDIT_SCORE}"
        ));
    }

    if employment.monthly_gross_income > 0.0 {
        let existing_payments: f64 = draft
            .existing_debts
            .iter()
            .map(|debt| debt.monthly_payment)
            .sum();
        let dti = existing_payments / employment.monthly_gross_income;
        if dti > HIGH_EXISTING_DTI {
            warnings.push(format!("High existing DTI ratio: {:.1}%", dti * 100.0));
        }
    }

    if draft.credit_history.bankruptcies > 0 {
        warnings.push("Applicant has bankruptcy history".to_string());
    }
    if draft.credit_history.delinquencies_90_days > 0 {
        warnings.push("Applicant has 90+ day delinquencies".to_string());
    }

    ValidationOutcome {
        valid: issues.is_empty(),
        issues,
        warnings,
    }
}
