use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTier {
    Success,
    Warning,
    Danger,
    Neutral,
}

impl ColorTier {
    pub const fn label(self) -> &'static str {
        match self {
            ColorTier::Success => "success",
            ColorTier::Warning => "warning",
            ColorTier::Danger => "danger",
            ColorTier::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IconKind {
    CheckCircle,
    AlertTriangle,
    XCircle,
    Clock,
}

/// The five weighted categories of the risk score, in dashboard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    CreditHistory,
    IncomeStability,
    DebtBurden,
    Collateral,
    Employment,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::CreditHistory,
        ScoreCategory::IncomeStability,
        ScoreCategory::DebtBurden,
        ScoreCategory::Collateral,
        ScoreCategory::Employment,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ScoreCategory::CreditHistory => "Credit History",
            ScoreCategory::IncomeStability => "Income Stability",
            ScoreCategory::DebtBurden => "Debt Burden",
            ScoreCategory::Collateral => "Collateral",
            ScoreCategory::Employment => "Employment",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            ScoreCategory::CreditHistory => "#3b82f6",
            ScoreCategory::IncomeStability => "#22c55e",
            ScoreCategory::DebtBurden => "#f59e0b",
            ScoreCategory::Collateral => "#8b5cf6",
            ScoreCategory::Employment => "#06b6d4",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBar {
    pub category: ScoreCategory,
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionView {
    pub outcome: String,
    pub label: String,
    pub tier: ColorTier,
    pub icon: IconKind,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskView {
    pub level: String,
    pub tier: ColorTier,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMetricsView {
    pub projected_dti: String,
    pub probability_of_default: String,
    pub max_affordable_payment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApprovedTermsView {
    pub amount: String,
    pub interest_rate: String,
    pub monthly_payment: String,
    pub term: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialSummaryView {
    pub gross_annual_income: String,
    pub net_annual_income: String,
    pub total_existing_debt: String,
    pub monthly_debt_payments: String,
    pub collateral_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingView {
    pub processing_time: String,
    pub trace_id: String,
    pub model_version: String,
}

/// Everything the decision dashboard shows, already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub report_id: String,
    pub applicant_name: String,
    pub decision: DecisionView,
    pub risk: RiskView,
    pub metrics: KeyMetricsView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_terms: Option<ApprovedTermsView>,
    pub score_breakdown: Vec<ScoreBar>,
    pub financial_summary: FinancialSummaryView,
    pub risk_factors: Vec<String>,
    pub mitigating_factors: Vec<String>,
    pub conditions: Vec<String>,
    pub decline_reasons: Vec<String>,
    pub recommendations: Vec<String>,
    pub processing: ProcessingView,
}
