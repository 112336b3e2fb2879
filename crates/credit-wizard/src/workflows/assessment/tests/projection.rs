use crate::workflows::assessment::report::samples::{
    approved_report, conditional_report, declined_report,
};
use crate::workflows::assessment::report::{
    decision_label, project, AssessmentReport, ColorTier, DecisionOutcome, IconKind, RiskLevel,
    ScoreCategory,
};

#[test]
fn approved_report_projects_success_styles() {
    let model = project(&approved_report());

    assert_eq!(model.decision.tier, ColorTier::Success);
    assert_eq!(model.decision.icon, IconKind::CheckCircle);
    assert_eq!(model.decision.label, "APPROVED");
    assert_eq!(model.decision.confidence, "92%");
    assert_eq!(model.risk.tier, ColorTier::Success);
    assert_eq!(model.risk.score, "24/100");

    let terms = model.approved_terms.expect("approved terms shown");
    assert_eq!(terms.amount, "€320,000");
    assert_eq!(terms.interest_rate, "3.5%");
    assert_eq!(terms.monthly_payment, "€1,836.42");
    assert_eq!(terms.term, "240 months");

    assert_eq!(model.metrics.projected_dti, "31.9%");
    assert_eq!(model.metrics.probability_of_default, "1.2%");
    assert_eq!(model.financial_summary.collateral_value, "€450,000");
    assert_eq!(model.processing.processing_time, "12.84s");
    assert_eq!(model.processing.trace_id, "trace-approved-0001");
}

#[test]
fn declined_report_projects_danger_and_reasons() {
    let model = project(&declined_report());

    assert_eq!(model.decision.tier, ColorTier::Danger);
    assert_eq!(model.decision.icon, IconKind::XCircle);
    assert_eq!(model.decision.label, "DECLINED");
    assert_eq!(model.risk.tier, ColorTier::Danger);
    assert!(model.approved_terms.is_none());
    assert_eq!(model.decline_reasons.len(), 3);
    assert_eq!(model.decline_reasons[0], "Credit score below the 620 minimum");
    assert!(model.mitigating_factors.is_empty());
    assert_eq!(model.financial_summary.collateral_value, "none");
    assert_eq!(model.processing.trace_id, "n/a");
}

#[test]
fn conditional_report_uses_warning_tier() {
    let model = project(&conditional_report());

    assert_eq!(model.decision.tier, ColorTier::Warning);
    assert_eq!(model.decision.icon, IconKind::AlertTriangle);
    assert_eq!(model.decision.label, "APPROVED WITH CONDITIONS");
    assert_eq!(model.risk.tier, ColorTier::Warning);
    assert_eq!(model.conditions.len(), 2);
}

#[test]
fn empty_report_falls_back_everywhere() {
    let model = project(&AssessmentReport::default());

    assert_eq!(model.decision.tier, ColorTier::Neutral);
    assert_eq!(model.decision.icon, IconKind::Clock);
    assert_eq!(model.decision.label, "UNKNOWN");
    assert_eq!(model.risk.tier, ColorTier::Neutral);
    assert_eq!(model.risk.score, "n/a");
    assert!(model.approved_terms.is_none());
    assert!(model.score_breakdown.is_empty());
    assert!(model.risk_factors.is_empty());
    assert!(model.mitigating_factors.is_empty());
    assert!(model.conditions.is_empty());
    assert!(model.decline_reasons.is_empty());
    assert!(model.recommendations.is_empty());
    assert_eq!(model.financial_summary.collateral_value, "none");
    assert_eq!(model.financial_summary.gross_annual_income, "n/a");
    assert_eq!(model.metrics.projected_dti, "n/a");
    assert_eq!(model.processing.processing_time, "n/a");
    assert_eq!(model.processing.trace_id, "n/a");
}

#[test]
fn score_breakdown_keeps_fixed_order_and_colors() {
    let model = project(&approved_report());

    let categories: Vec<_> = model
        .score_breakdown
        .iter()
        .map(|bar| bar.category)
        .collect();
    assert_eq!(categories, ScoreCategory::ALL.to_vec());

    let colors: Vec<_> = model.score_breakdown.iter().map(|bar| bar.color).collect();
    assert_eq!(
        colors,
        vec!["#3b82f6", "#22c55e", "#f59e0b", "#8b5cf6", "#06b6d4"]
    );
    assert_eq!(model.score_breakdown[0].label, "Credit History");
    assert_eq!(model.score_breakdown[0].value, 88.0);
}

#[test]
fn unknown_outcomes_stay_verbatim_and_neutral() {
    let mut report = approved_report();
    report.credit_decision.decision = DecisionOutcome::from("referred_to_branch".to_string());
    report.risk_assessment.overall_risk_level = RiskLevel::from("elevated".to_string());

    let model = project(&report);

    assert_eq!(model.decision.outcome, "referred_to_branch");
    assert_eq!(model.decision.label, "REFERRED TO BRANCH");
    assert_eq!(model.decision.tier, ColorTier::Neutral);
    assert_eq!(model.risk.level, "elevated");
    assert_eq!(model.risk.tier, ColorTier::Neutral);
}

#[test]
fn manual_review_is_neutral() {
    assert_eq!(
        decision_label(&DecisionOutcome::ManualReview),
        "MANUAL REVIEW"
    );
    let mut report = declined_report();
    report.credit_decision.decision = DecisionOutcome::ManualReview;
    assert_eq!(project(&report).decision.icon, IconKind::Clock);
}

#[test]
fn display_model_serializes_for_json_output() {
    let value = serde_json::to_value(project(&declined_report())).expect("model encodes");

    assert_eq!(value["decision"]["label"], "DECLINED");
    assert_eq!(value["decision"]["tier"], "danger");
    assert_eq!(value["financial_summary"]["collateral_value"], "none");
}
