//! Assessment report model and its projection into the decision dashboard.

pub mod domain;
pub mod format;
pub mod projector;
pub mod samples;
pub mod views;

pub use domain::{
    AssessmentReport, CollateralEvaluation, CreditDecision, DebtAnalysis, DecisionOutcome,
    FinancialSummary, IncomeAnalysis, LoanTerms, RiskAssessment, RiskLevel, RiskScoreBreakdown,
};
pub use projector::{decision_label, decision_style, project, risk_tier, score_bars};
pub use views::{
    ApprovedTermsView, ColorTier, DecisionView, DisplayModel, FinancialSummaryView, IconKind,
    KeyMetricsView, ProcessingView, RiskView, ScoreBar, ScoreCategory,
};
