use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for an in-progress application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The loan application record edited by the wizard and posted for assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    pub application_id: ApplicationId,
    pub applicant: ApplicantInfo,
    pub employment: EmploymentInfo,
    #[serde(default)]
    pub existing_debts: Vec<ExistingDebt>,
    #[serde(default)]
    pub collateral: Option<CollateralInfo>,
    pub loan_request: LoanRequest,
    pub credit_history: CreditHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInfo {
    pub first_name: String,
    pub last_name: String,
    /// Kept as entered (`YYYY-MM-DD`); an empty string means not yet provided.
    pub date_of_birth: String,
    pub nationality: String,
    pub email: String,
    pub phone: String,
}

impl ApplicantInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

impl Default for ApplicantInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            nationality: "FR".to_string(),
            email: String::new(),
            phone: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    #[default]
    Employed,
    SelfEmployed,
    Contractor,
    Retired,
    Unemployed,
    Student,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmploymentInfo {
    pub employment_type: EmploymentType,
    pub employer_name: String,
    pub job_title: String,
    pub industry: String,
    pub years_employed: f64,
    pub years_in_profession: f64,
    pub monthly_gross_income: f64,
    pub monthly_net_income: f64,
    pub additional_income: f64,
    pub income_verified: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentHistory {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

/// One outstanding obligation; list order follows entry order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingDebt {
    pub debt_type: String,
    pub creditor_name: String,
    pub original_amount: f64,
    pub current_balance: f64,
    pub monthly_payment: f64,
    pub interest_rate: f64,
    pub remaining_months: u32,
    pub is_secured: bool,
    #[serde(default)]
    pub payment_history: PaymentHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollateralType {
    RealEstate,
    Vehicle,
    Savings,
    InvestmentPortfolio,
    BusinessAssets,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollateralInfo {
    pub collateral_type: CollateralType,
    pub description: String,
    pub estimated_value: f64,
    pub valuation_date: NaiveDate,
    pub valuation_source: String,
    #[serde(default)]
    pub encumbrances: f64,
    #[serde(default)]
    pub insurance_coverage: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    #[default]
    Mortgage,
    Auto,
    Personal,
    Business,
    Education,
    DebtConsolidation,
    HomeImprovement,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub loan_purpose: LoanPurpose,
    pub requested_amount: f64,
    pub requested_term_months: u32,
    pub preferred_payment_day: u8,
    pub purpose_description: String,
}

impl Default for LoanRequest {
    fn default() -> Self {
        Self {
            loan_purpose: LoanPurpose::Mortgage,
            requested_amount: 0.0,
            requested_term_months: 240,
            preferred_payment_day: 1,
            purpose_description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditHistory {
    pub credit_score: u16,
    pub credit_score_source: String,
    pub accounts_open: u32,
    pub accounts_closed: u32,
    pub oldest_account_years: f64,
    pub recent_inquiries: u32,
    pub delinquencies_30_days: u32,
    pub delinquencies_60_days: u32,
    pub delinquencies_90_days: u32,
    pub bankruptcies: u32,
    pub foreclosures: u32,
    pub collections: u32,
}

impl Default for CreditHistory {
    fn default() -> Self {
        Self {
            credit_score: 700,
            credit_score_source: "bureau".to_string(),
            accounts_open: 0,
            accounts_closed: 0,
            oldest_account_years: 0.0,
            recent_inquiries: 0,
            delinquencies_30_days: 0,
            delinquencies_60_days: 0,
            delinquencies_90_days: 0,
            bankruptcies: 0,
            foreclosures: 0,
            collections: 0,
        }
    }
}

/// Sections of the draft addressable by key through `update_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftSection {
    Applicant,
    Employment,
    Collateral,
    LoanRequest,
    CreditHistory,
}

impl DraftSection {
    pub const fn key(self) -> &'static str {
        match self {
            DraftSection::Applicant => "applicant",
            DraftSection::Employment => "employment",
            DraftSection::Collateral => "collateral",
            DraftSection::LoanRequest => "loan_request",
            DraftSection::CreditHistory => "credit_history",
        }
    }
}

impl std::str::FromStr for DraftSection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "applicant" => Ok(Self::Applicant),
            "employment" => Ok(Self::Employment),
            "collateral" => Ok(Self::Collateral),
            "loan_request" => Ok(Self::LoanRequest),
            "credit_history" => Ok(Self::CreditHistory),
            other => Err(format!("unknown draft section '{other}'")),
        }
    }
}
