use super::domain::{
    AssessmentReport, CollateralEvaluation, DecisionOutcome, LoanTerms, RiskLevel,
    RiskScoreBreakdown,
};
use super::format::{self, NOT_AVAILABLE};
use super::views::{
    ApprovedTermsView, ColorTier, DecisionView, DisplayModel, FinancialSummaryView, IconKind,
    KeyMetricsView, ProcessingView, RiskView, ScoreBar, ScoreCategory,
};

pub const NO_COLLATERAL: &str = "none";

/// Project a raw report into the dashboard view model. Never fails.
pub fn project(report: &AssessmentReport) -> DisplayModel {
    let decision = &report.credit_decision;
    let risk = &report.risk_assessment;
    let income = &report.income_analysis;
    let debt = &report.debt_analysis;

    let (tier, icon) = decision_style(&decision.decision);

    DisplayModel {
        report_id: report.report_id.clone(),
        applicant_name: report.applicant_name.clone(),
        decision: DecisionView {
            outcome: decision.decision.as_str().to_string(),
            label: decision_label(&decision.decision),
            tier,
            icon,
            confidence: format!("{}%", format::plain(decision.confidence_score)),
        },
        risk: RiskView {
            level: risk.overall_risk_level.as_str().to_string(),
            tier: risk_tier(&risk.overall_risk_level),
            score: risk
                .risk_score
                .map(|score| format!("{}/100", format::plain(score)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        },
        metrics: KeyMetricsView {
            projected_dti: format::ratio_as_percent(debt.projected_dti_ratio),
            probability_of_default: format::percent(risk.probability_of_default),
            max_affordable_payment: format::currency(income.max_affordable_payment),
        },
        approved_terms: decision.approved_terms.as_ref().map(approved_terms_view),
        score_breakdown: score_bars(risk.score_breakdown.as_ref()),
        financial_summary: FinancialSummaryView {
            gross_annual_income: format::currency(income.gross_annual_income),
            net_annual_income: format::currency(income.net_annual_income),
            total_existing_debt: format::currency(debt.total_existing_debt),
            monthly_debt_payments: format::currency(debt.total_monthly_debt_payments),
            collateral_value: collateral_value(&report.collateral_evaluation),
        },
        risk_factors: risk.risk_factors.clone(),
        mitigating_factors: risk.mitigating_factors.clone(),
        conditions: decision.conditions.clone(),
        decline_reasons: decision.decline_reasons.clone(),
        recommendations: report.recommendations.clone(),
        processing: ProcessingView {
            processing_time: report
                .processing_time_seconds
                .map(|secs| format!("{secs:.2}s"))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            trace_id: report
                .trace_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            model_version: if report.model_version.trim().is_empty() {
                NOT_AVAILABLE.to_string()
            } else {
                report.model_version.clone()
            },
        },
    }
}

pub fn decision_style(outcome: &DecisionOutcome) -> (ColorTier, IconKind) {
    match outcome {
        DecisionOutcome::Approved => (ColorTier::Success, IconKind::CheckCircle),
        DecisionOutcome::ApprovedWithConditions => (ColorTier::Warning, IconKind::AlertTriangle),
        DecisionOutcome::Declined => (ColorTier::Danger, IconKind::XCircle),
        DecisionOutcome::ManualReview | DecisionOutcome::Other(_) => {
            (ColorTier::Neutral, IconKind::Clock)
        }
    }
}

pub fn risk_tier(level: &RiskLevel) -> ColorTier {
    match level {
        RiskLevel::VeryLow | RiskLevel::Low => ColorTier::Success,
        RiskLevel::Medium => ColorTier::Warning,
        RiskLevel::High | RiskLevel::VeryHigh => ColorTier::Danger,
        RiskLevel::Other(_) => ColorTier::Neutral,
    }
}

/// `approved_with_conditions` → `APPROVED WITH CONDITIONS`.
pub fn decision_label(outcome: &DecisionOutcome) -> String {
    let raw = outcome.as_str().trim();
    if raw.is_empty() {
        return "UNKNOWN".to_string();
    }
    raw.replace('_', " ").to_uppercase()
}

pub fn score_bars(breakdown: Option<&RiskScoreBreakdown>) -> Vec<ScoreBar> {
    let Some(breakdown) = breakdown else {
        return Vec::new();
    };

    ScoreCategory::ALL
        .into_iter()
        .map(|category| {
            let value = match category {
                ScoreCategory::CreditHistory => breakdown.credit_history_score,
                ScoreCategory::IncomeStability => breakdown.income_stability_score,
                ScoreCategory::DebtBurden => breakdown.debt_burden_score,
                ScoreCategory::Collateral => breakdown.collateral_score,
                ScoreCategory::Employment => breakdown.employment_score,
            };
            ScoreBar {
                category,
                label: category.label(),
                value,
                color: category.color(),
            }
        })
        .collect()
}

fn approved_terms_view(terms: &LoanTerms) -> ApprovedTermsView {
    ApprovedTermsView {
        amount: format::currency(terms.approved_amount),
        interest_rate: format::percent(terms.interest_rate),
        monthly_payment: format::currency(terms.monthly_payment),
        term: terms
            .term_months
            .map(|months| format!("{months} months"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

fn collateral_value(collateral: &CollateralEvaluation) -> String {
    if collateral.collateral_present {
        format::currency(collateral.estimated_value)
    } else {
        NO_COLLATERAL.to_string()
    }
}
