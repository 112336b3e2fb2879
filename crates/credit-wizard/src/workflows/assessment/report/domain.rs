use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// Structured report returned by the assessment service. Read-only on this side.
///
/// Every section tolerates being absent or `null` so a partially populated report still
/// deserializes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentReport {
    pub report_id: String,
    pub application_id: String,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub report_date: Option<NaiveDateTime>,
    pub applicant_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub financial_summary: FinancialSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub income_analysis: IncomeAnalysis,
    #[serde(deserialize_with = "null_as_default")]
    pub debt_analysis: DebtAnalysis,
    #[serde(deserialize_with = "null_as_default")]
    pub collateral_evaluation: CollateralEvaluation,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_assessment: RiskAssessment,
    #[serde(deserialize_with = "null_as_default")]
    pub credit_decision: CreditDecision,
    #[serde(deserialize_with = "null_as_default")]
    pub executive_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub detailed_analysis: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
    pub processing_time_seconds: Option<f64>,
    pub trace_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub model_version: String,
}

/// Outcome of the credit decision. Values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DecisionOutcome {
    Approved,
    ApprovedWithConditions,
    ManualReview,
    Declined,
    Other(String),
}

impl DecisionOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            DecisionOutcome::Approved => "approved",
            DecisionOutcome::ApprovedWithConditions => "approved_with_conditions",
            DecisionOutcome::ManualReview => "manual_review",
            DecisionOutcome::Declined => "declined",
            DecisionOutcome::Other(raw) => raw,
        }
    }
}

impl Default for DecisionOutcome {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for DecisionOutcome {
    fn from(value: String) -> Self {
        match value.as_str() {
            "approved" => Self::Approved,
            "approved_with_conditions" => Self::ApprovedWithConditions,
            "manual_review" => Self::ManualReview,
            "declined" => Self::Declined,
            _ => Self::Other(value),
        }
    }
}

impl From<DecisionOutcome> for String {
    fn from(value: DecisionOutcome) -> Self {
        match value {
            DecisionOutcome::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Overall risk band. Values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    Other(String),
}

impl RiskLevel {
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::VeryLow => "very_low",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very_high",
            RiskLevel::Other(raw) => raw,
        }
    }
}

impl Default for RiskLevel {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for RiskLevel {
    fn from(value: String) -> Self {
        match value.as_str() {
            "very_low" => Self::VeryLow,
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "very_high" => Self::VeryHigh,
            _ => Self::Other(value),
        }
    }
}

impl From<RiskLevel> for String {
    fn from(value: RiskLevel) -> Self {
        match value {
            RiskLevel::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditDecision {
    pub decision: DecisionOutcome,
    #[serde(deserialize_with = "lenient_timestamp")]
    pub decision_date: Option<NaiveDateTime>,
    pub confidence_score: f64,
    pub approved_terms: Option<LoanTerms>,
    #[serde(deserialize_with = "null_as_default")]
    pub conditions: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub decline_reasons: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub manual_review_reasons: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub next_steps: Vec<String>,
    pub validity_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    pub approved_amount: Option<f64>,
    pub interest_rate: Option<f64>,
    pub term_months: Option<u32>,
    pub monthly_payment: Option<f64>,
    pub total_interest: Option<f64>,
    pub total_repayment: Option<f64>,
    pub annual_percentage_rate: Option<f64>,
    pub fees: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub overall_risk_level: RiskLevel,
    pub risk_score: Option<f64>,
    /// Already expressed in percent (0–100).
    pub probability_of_default: Option<f64>,
    pub loss_given_default: Option<f64>,
    pub expected_loss: Option<f64>,
    pub score_breakdown: Option<RiskScoreBreakdown>,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_factors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub mitigating_factors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub regulatory_flags: Vec<String>,
    pub basel_risk_weight: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskScoreBreakdown {
    pub credit_history_score: f64,
    pub income_stability_score: f64,
    pub debt_burden_score: f64,
    pub collateral_score: f64,
    pub employment_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialSummary {
    pub total_monthly_income: Option<f64>,
    pub income_stability_score: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub income_sources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub employment_stability: String,
    #[serde(deserialize_with = "null_as_default")]
    pub income_trend: String,
    #[serde(deserialize_with = "null_as_default")]
    pub verification_status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub red_flags: Vec<String>,
    pub data_quality_score: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeAnalysis {
    pub gross_annual_income: Option<f64>,
    pub net_annual_income: Option<f64>,
    pub income_to_expense_ratio: Option<f64>,
    pub disposable_income_monthly: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub income_sustainability: String,
    pub income_diversification: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub stress_test_result: String,
    pub max_affordable_payment: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysis_notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtAnalysis {
    pub total_existing_debt: Option<f64>,
    pub total_monthly_debt_payments: Option<f64>,
    /// Fraction, not percent.
    pub debt_to_income_ratio: Option<f64>,
    /// Fraction including the requested loan's payment.
    pub projected_dti_ratio: Option<f64>,
    pub debt_service_coverage_ratio: Option<f64>,
    pub utilization_rate: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub debt_structure_assessment: String,
    #[serde(deserialize_with = "null_as_default")]
    pub payment_shock_risk: String,
    pub debt_consolidation_benefit: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub debt_red_flags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollateralEvaluation {
    pub collateral_present: bool,
    pub collateral_type: Option<String>,
    pub estimated_value: Option<f64>,
    pub loan_to_value_ratio: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub collateral_quality: String,
    pub liquidation_value: Option<f64>,
    pub collateral_coverage_ratio: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub valuation_confidence: String,
    #[serde(deserialize_with = "null_as_default")]
    pub collateral_risks: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts RFC 3339 (`...Z`, offsets) and naive ISO timestamps; anything else becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| parse_timestamp(value.trim())))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.naive_utc());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
