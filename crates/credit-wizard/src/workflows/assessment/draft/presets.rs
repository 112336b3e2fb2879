use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicantInfo, ApplicationDraft, CollateralInfo, CollateralType, CreditHistory,
    EmploymentInfo, EmploymentType, ExistingDebt, LoanPurpose, LoanRequest, PaymentHistory,
};
use super::store::next_application_id;

/// Canned applicant profiles for demonstrations and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    /// Established borrower: strong score, verified salary, property pledged.
    Favorable,
    /// Thin file: unverified contractor income, unsecured debt, recent delinquencies.
    Risky,
}

impl PresetKind {
    pub const fn label(self) -> &'static str {
        match self {
            PresetKind::Favorable => "favorable",
            PresetKind::Risky => "risky",
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PresetKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "favorable" | "good" => Ok(Self::Favorable),
            "risky" => Ok(Self::Risky),
            other => Err(format!("unknown preset '{other}' (expected favorable or risky)")),
        }
    }
}

/// Build a complete draft for `kind`. Nothing is carried over from any earlier draft.
pub fn load_preset(kind: PresetKind) -> ApplicationDraft {
    match kind {
        PresetKind::Favorable => favorable_profile(),
        PresetKind::Risky => risky_profile(),
    }
}

fn favorable_profile() -> ApplicationDraft {
    ApplicationDraft {
        application_id: next_application_id(),
        applicant: ApplicantInfo {
            first_name: "Marie".to_string(),
            last_name: "Martin".to_string(),
            date_of_birth: "1985-03-20".to_string(),
            nationality: "FR".to_string(),
            email: "marie.martin@email.com".to_string(),
            phone: "+33612345678".to_string(),
        },
        employment: EmploymentInfo {
            employment_type: EmploymentType::Employed,
            employer_name: "BNP Paribas".to_string(),
            job_title: "Senior Financial Analyst".to_string(),
            industry: "Banking & Finance".to_string(),
            years_employed: 6.5,
            years_in_profession: 12.0,
            monthly_gross_income: 7500.0,
            monthly_net_income: 5625.0,
            additional_income: 500.0,
            income_verified: true,
        },
        existing_debts: vec![ExistingDebt {
            debt_type: "auto_loan".to_string(),
            creditor_name: "Crédit Auto France".to_string(),
            original_amount: 25_000.0,
            current_balance: 12_000.0,
            monthly_payment: 420.0,
            interest_rate: 4.5,
            remaining_months: 30,
            is_secured: true,
            payment_history: PaymentHistory::Excellent,
        }],
        collateral: Some(CollateralInfo {
            collateral_type: CollateralType::RealEstate,
            description: "Appartement 3 pièces, 75m², Paris 15ème".to_string(),
            estimated_value: 450_000.0,
            valuation_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default(),
            valuation_source: "Expert immobilier agréé".to_string(),
            encumbrances: 0.0,
            insurance_coverage: Some(450_000.0),
        }),
        loan_request: LoanRequest {
            loan_purpose: LoanPurpose::Mortgage,
            requested_amount: 320_000.0,
            requested_term_months: 240,
            preferred_payment_day: 5,
            purpose_description: "Acquisition résidence principale".to_string(),
        },
        credit_history: CreditHistory {
            credit_score: 745,
            credit_score_source: "Banque de France".to_string(),
            accounts_open: 4,
            accounts_closed: 2,
            oldest_account_years: 15.0,
            recent_inquiries: 1,
            ..CreditHistory::default()
        },
    }
}

fn risky_profile() -> ApplicationDraft {
    ApplicationDraft {
        application_id: next_application_id(),
        applicant: ApplicantInfo {
            first_name: "Pierre".to_string(),
            last_name: "Dubois".to_string(),
            date_of_birth: "1992-08-10".to_string(),
            nationality: "FR".to_string(),
            email: "pierre.dubois@email.com".to_string(),
            phone: "+33698765432".to_string(),
        },
        employment: EmploymentInfo {
            employment_type: EmploymentType::Contractor,
            employer_name: "Various Clients".to_string(),
            job_title: "Freelance Developer".to_string(),
            industry: "Technology".to_string(),
            years_employed: 1.5,
            years_in_profession: 3.0,
            monthly_gross_income: 4500.0,
            monthly_net_income: 3200.0,
            additional_income: 0.0,
            income_verified: false,
        },
        existing_debts: vec![ExistingDebt {
            debt_type: "personal_loan".to_string(),
            creditor_name: "Cofidis".to_string(),
            original_amount: 15_000.0,
            current_balance: 11_000.0,
            monthly_payment: 350.0,
            interest_rate: 8.5,
            remaining_months: 36,
            is_secured: false,
            payment_history: PaymentHistory::Fair,
        }],
        collateral: None,
        loan_request: LoanRequest {
            loan_purpose: LoanPurpose::DebtConsolidation,
            requested_amount: 25_000.0,
            requested_term_months: 60,
            preferred_payment_day: 15,
            purpose_description: "Consolidation des crédits existants".to_string(),
        },
        credit_history: CreditHistory {
            credit_score: 580,
            credit_score_source: "Banque de France".to_string(),
            accounts_open: 5,
            accounts_closed: 1,
            oldest_account_years: 4.0,
            recent_inquiries: 6,
            delinquencies_30_days: 3,
            delinquencies_60_days: 1,
            ..CreditHistory::default()
        },
    }
}
