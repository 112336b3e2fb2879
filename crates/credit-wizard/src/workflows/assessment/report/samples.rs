//! Canned assessment reports used by the bundled stub service and by tests.

use super::domain::{
    AssessmentReport, CollateralEvaluation, CreditDecision, DebtAnalysis, DecisionOutcome,
    FinancialSummary, IncomeAnalysis, LoanTerms, RiskAssessment, RiskLevel, RiskScoreBreakdown,
};

/// Strong profile: low risk, approved with terms.
pub fn approved_report() -> AssessmentReport {
    AssessmentReport {
        report_id: "RPT-APPROVED-0001".to_string(),
        application_id: "APP-SAMPLE".to_string(),
        report_date: None,
        applicant_name: "Marie Martin".to_string(),
        financial_summary: FinancialSummary {
            total_monthly_income: Some(8000.0),
            income_stability_score: Some(88.0),
            income_sources: vec!["Salary".to_string(), "Rental income".to_string()],
            employment_stability: "stable".to_string(),
            income_trend: "increasing".to_string(),
            verification_status: "verified".to_string(),
            red_flags: Vec::new(),
            data_quality_score: Some(9),
        },
        income_analysis: IncomeAnalysis {
            gross_annual_income: Some(96_000.0),
            net_annual_income: Some(73_500.0),
            income_to_expense_ratio: Some(2.4),
            disposable_income_monthly: Some(3_350.0),
            income_sustainability: "high".to_string(),
            income_diversification: Some(35.0),
            stress_test_result: "passes a 20% income shock".to_string(),
            max_affordable_payment: Some(2_450.0),
            analysis_notes: Vec::new(),
        },
        debt_analysis: DebtAnalysis {
            total_existing_debt: Some(12_000.0),
            total_monthly_debt_payments: Some(420.0),
            debt_to_income_ratio: Some(0.056),
            projected_dti_ratio: Some(0.3187),
            debt_service_coverage_ratio: Some(2.1),
            utilization_rate: Some(18.0),
            debt_structure_assessment: "low, fully secured".to_string(),
            payment_shock_risk: "low".to_string(),
            debt_consolidation_benefit: None,
            debt_red_flags: Vec::new(),
        },
        collateral_evaluation: CollateralEvaluation {
            collateral_present: true,
            collateral_type: Some("real_estate".to_string()),
            estimated_value: Some(450_000.0),
            loan_to_value_ratio: Some(71.1),
            collateral_quality: "excellent".to_string(),
            liquidation_value: Some(382_500.0),
            collateral_coverage_ratio: Some(1.41),
            valuation_confidence: "high".to_string(),
            collateral_risks: Vec::new(),
            recommendations: Vec::new(),
        },
        risk_assessment: RiskAssessment {
            overall_risk_level: RiskLevel::Low,
            risk_score: Some(24.0),
            probability_of_default: Some(1.2),
            loss_given_default: Some(25.0),
            expected_loss: Some(960.0),
            score_breakdown: Some(RiskScoreBreakdown {
                credit_history_score: 88.0,
                income_stability_score: 85.0,
                debt_burden_score: 78.0,
                collateral_score: 92.0,
                employment_score: 80.0,
            }),
            risk_factors: vec!["Long repayment horizon (240 months)".to_string()],
            mitigating_factors: vec![
                "Credit score 745 with no delinquencies".to_string(),
                "Verified salaried income".to_string(),
                "Loan-to-value under 75%".to_string(),
            ],
            regulatory_flags: Vec::new(),
            basel_risk_weight: Some(35.0),
        },
        credit_decision: CreditDecision {
            decision: DecisionOutcome::Approved,
            decision_date: None,
            confidence_score: 92.0,
            approved_terms: Some(LoanTerms {
                approved_amount: Some(320_000.0),
                interest_rate: Some(3.45),
                term_months: Some(240),
                monthly_payment: Some(1_836.42),
                total_interest: Some(120_740.8),
                total_repayment: Some(440_740.8),
                annual_percentage_rate: Some(3.61),
                fees: Some(1_500.0),
            }),
            conditions: Vec::new(),
            decline_reasons: Vec::new(),
            manual_review_reasons: Vec::new(),
            next_steps: vec!["Sign the loan offer within 30 days".to_string()],
            validity_days: Some(30),
        },
        executive_summary: "Low-risk mortgage application supported by verified income and \
                            real-estate collateral."
            .to_string(),
        detailed_analysis: String::new(),
        recommendations: vec!["Set up automatic payments on the 5th".to_string()],
        processing_time_seconds: Some(12.84),
        trace_id: Some("trace-approved-0001".to_string()),
        model_version: "1.0.0".to_string(),
    }
}

/// Thin-file profile: high risk, declined with reasons, no collateral.
pub fn declined_report() -> AssessmentReport {
    AssessmentReport {
        report_id: "RPT-DECLINED-0001".to_string(),
        application_id: "APP-SAMPLE".to_string(),
        report_date: None,
        applicant_name: "Pierre Dubois".to_string(),
        financial_summary: FinancialSummary {
            total_monthly_income: Some(4500.0),
            income_stability_score: Some(42.0),
            income_sources: vec!["Freelance contracts".to_string()],
            employment_stability: "volatile".to_string(),
            income_trend: "stable".to_string(),
            verification_status: "unverified".to_string(),
            red_flags: vec!["Income not documented".to_string()],
            data_quality_score: Some(5),
        },
        income_analysis: IncomeAnalysis {
            gross_annual_income: Some(54_000.0),
            net_annual_income: Some(38_400.0),
            income_to_expense_ratio: Some(1.1),
            disposable_income_monthly: Some(420.0),
            income_sustainability: "low".to_string(),
            income_diversification: Some(10.0),
            stress_test_result: "fails a 10% income shock".to_string(),
            max_affordable_payment: Some(650.0),
            analysis_notes: Vec::new(),
        },
        debt_analysis: DebtAnalysis {
            total_existing_debt: Some(11_000.0),
            total_monthly_debt_payments: Some(350.0),
            debt_to_income_ratio: Some(0.078),
            projected_dti_ratio: Some(0.4462),
            debt_service_coverage_ratio: Some(0.9),
            utilization_rate: Some(73.0),
            debt_structure_assessment: "unsecured, high rate".to_string(),
            payment_shock_risk: "high".to_string(),
            debt_consolidation_benefit: Some("marginal".to_string()),
            debt_red_flags: vec!["Recent missed payments".to_string()],
        },
        collateral_evaluation: CollateralEvaluation::default(),
        risk_assessment: RiskAssessment {
            overall_risk_level: RiskLevel::High,
            risk_score: Some(71.0),
            probability_of_default: Some(14.75),
            loss_given_default: Some(65.0),
            expected_loss: Some(2_396.0),
            score_breakdown: Some(RiskScoreBreakdown {
                credit_history_score: 38.0,
                income_stability_score: 42.0,
                debt_burden_score: 45.0,
                collateral_score: 0.0,
                employment_score: 40.0,
            }),
            risk_factors: vec![
                "Credit score 580".to_string(),
                "Three 30-day delinquencies in the last year".to_string(),
                "Six recent credit inquiries".to_string(),
            ],
            mitigating_factors: Vec::new(),
            regulatory_flags: Vec::new(),
            basel_risk_weight: Some(100.0),
        },
        credit_decision: CreditDecision {
            decision: DecisionOutcome::Declined,
            decision_date: None,
            confidence_score: 84.0,
            approved_terms: None,
            conditions: Vec::new(),
            decline_reasons: vec![
                "Credit score below the 620 minimum".to_string(),
                "Recent delinquencies on existing obligations".to_string(),
                "Income could not be verified".to_string(),
            ],
            manual_review_reasons: Vec::new(),
            next_steps: vec!["Reapply after 12 months of on-time payments".to_string()],
            validity_days: None,
        },
        executive_summary: "High-risk consolidation request without collateral.".to_string(),
        detailed_analysis: String::new(),
        recommendations: vec![
            "Provide income documentation for the last 24 months".to_string(),
            "Reduce outstanding unsecured balances".to_string(),
        ],
        processing_time_seconds: Some(9.3),
        trace_id: None,
        model_version: "1.0.0".to_string(),
    }
}

/// Middle ground: medium risk, approved subject to conditions.
pub fn conditional_report() -> AssessmentReport {
    let mut report = approved_report();
    report.report_id = "RPT-CONDITIONAL-0001".to_string();
    report.risk_assessment.overall_risk_level = RiskLevel::Medium;
    report.risk_assessment.risk_score = Some(48.0);
    report.risk_assessment.probability_of_default = Some(4.6);
    report.credit_decision.decision = DecisionOutcome::ApprovedWithConditions;
    report.credit_decision.confidence_score = 76.0;
    report.credit_decision.conditions = vec![
        "Provide the last three payslips".to_string(),
        "Add a co-borrower or guarantor".to_string(),
    ];
    report
}
