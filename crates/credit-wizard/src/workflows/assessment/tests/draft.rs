use super::common::*;
use crate::workflows::assessment::draft::{
    check_required_fields, load_preset, ApplicationDraft, ApplicationDraftStore, ApplicationId,
    CollateralInfo, CollateralType, DraftError, DraftSection, ExistingDebt, PaymentHistory,
    PresetKind, WizardPosition, WizardStep,
};
use chrono::NaiveDate;
use serde_json::json;
use std::collections::HashSet;

fn car_loan() -> ExistingDebt {
    ExistingDebt {
        debt_type: "auto_loan".to_string(),
        creditor_name: "Diac".to_string(),
        original_amount: 18_000.0,
        current_balance: 9_500.0,
        monthly_payment: 310.0,
        interest_rate: 5.2,
        remaining_months: 28,
        is_secured: true,
        payment_history: PaymentHistory::Good,
    }
}

#[test]
fn initialize_applies_wizard_defaults() {
    let draft = ApplicationDraft::initialize();

    assert!(draft.application_id.as_str().starts_with("APP-"));
    assert_eq!(draft.applicant.nationality, "FR");
    assert_eq!(draft.loan_request.requested_term_months, 240);
    assert_eq!(draft.loan_request.preferred_payment_day, 1);
    assert_eq!(draft.credit_history.credit_score, 700);
    assert_eq!(draft.credit_history.credit_score_source, "bureau");
    assert!(draft.existing_debts.is_empty());
    assert!(draft.collateral.is_none());
}

#[test]
fn application_id_displays_as_its_raw_value() {
    let draft = ApplicationDraft::initialize();

    assert_eq!(draft.application_id.to_string(), draft.application_id.as_str());
    assert_eq!(
        format!("{}", ApplicationId("APP-1700000000000-7".to_string())),
        "APP-1700000000000-7"
    );
}

#[test]
fn update_field_changes_only_the_addressed_key() {
    let mut store = ApplicationDraftStore::from_draft(favorable_draft());
    let before = store.draft().clone();

    store
        .update_field(DraftSection::Employment, "monthly_gross_income", json!(8200.0))
        .expect("gross income accepts a number");

    let mut expected = before;
    expected.employment.monthly_gross_income = 8200.0;
    assert_eq!(store.draft(), &expected);
}

#[test]
fn update_field_reaches_every_section() {
    let mut store = ApplicationDraftStore::from_draft(favorable_draft());

    store
        .update_field(DraftSection::Applicant, "first_name", json!("Camille"))
        .expect("applicant edit");
    store
        .update_field(DraftSection::LoanRequest, "requested_term_months", json!(180))
        .expect("loan request edit");
    store
        .update_field(DraftSection::CreditHistory, "recent_inquiries", json!(2))
        .expect("credit history edit");
    store
        .update_field(DraftSection::Collateral, "encumbrances", json!(15_000.0))
        .expect("collateral edit");

    let draft = store.draft();
    assert_eq!(draft.applicant.first_name, "Camille");
    assert_eq!(draft.applicant.last_name, "Martin");
    assert_eq!(draft.loan_request.requested_term_months, 180);
    assert_eq!(draft.credit_history.recent_inquiries, 2);
    let collateral = draft.collateral.as_ref().expect("collateral kept");
    assert_eq!(collateral.encumbrances, 15_000.0);
    assert_eq!(collateral.estimated_value, 450_000.0);
}

#[test]
fn update_field_rejects_bad_edits_without_touching_the_draft() {
    let mut store = ApplicationDraftStore::from_draft(load_preset(PresetKind::Risky));
    let before = store.draft().clone();

    assert!(matches!(
        store.update_field(DraftSection::Applicant, "middle_name", json!("Jean")),
        Err(DraftError::UnknownField { .. })
    ));
    assert!(matches!(
        store.update_field(DraftSection::CreditHistory, "credit_score", json!("high")),
        Err(DraftError::InvalidValue { .. })
    ));
    assert!(matches!(
        store.update_field(DraftSection::Collateral, "estimated_value", json!(10_000.0)),
        Err(DraftError::SectionAbsent(DraftSection::Collateral))
    ));
    assert_eq!(store.draft(), &before);
}

#[test]
fn step_moves_are_clamped() {
    let mut store = ApplicationDraftStore::new();
    assert_eq!(store.position(), WizardPosition::default());

    store.retreat_step();
    assert_eq!(store.position().index(), 0);

    for _ in 0..10 {
        store.advance_step();
    }
    assert_eq!(store.position().index(), 4);
    assert!(store.position().is_last());
    assert_eq!(store.position().step(), WizardStep::LoanRequest);

    store.retreat_step();
    assert_eq!(store.position().step(), WizardStep::Collateral);

    store.jump_to(99);
    assert_eq!(store.position().index(), 4);
    store.jump_to(1);
    assert_eq!(store.position().step(), WizardStep::Employment);
}

#[test]
fn wizard_position_deserializes_clamped() {
    let position: WizardPosition = serde_json::from_value(json!(9)).expect("decodes");
    assert_eq!(position.index(), 4);
}

#[test]
fn presets_are_complete_with_distinct_ids() {
    let drafts = [
        load_preset(PresetKind::Favorable),
        load_preset(PresetKind::Favorable),
        load_preset(PresetKind::Risky),
        load_preset(PresetKind::Risky),
    ];

    let ids: HashSet<_> = drafts
        .iter()
        .map(|draft| draft.application_id.clone())
        .collect();
    assert_eq!(ids.len(), drafts.len());

    for draft in &drafts {
        check_required_fields(draft).expect("preset passes the local pre-check");
    }
}

#[test]
fn preset_profiles_match_their_risk_story() {
    let favorable = load_preset(PresetKind::Favorable);
    assert_eq!(favorable.applicant.full_name(), "Marie Martin");
    assert_eq!(favorable.credit_history.credit_score, 745);
    assert!(favorable.employment.income_verified);
    let collateral = favorable.collateral.expect("favorable pledges collateral");
    assert_eq!(collateral.collateral_type, CollateralType::RealEstate);

    let risky = load_preset(PresetKind::Risky);
    assert_eq!(risky.credit_history.credit_score, 580);
    assert_eq!(risky.credit_history.delinquencies_30_days, 3);
    assert_eq!(risky.credit_history.delinquencies_60_days, 1);
    assert!(!risky.employment.income_verified);
    assert!(risky.collateral.is_none());
}

#[test]
fn preset_kind_accepts_aliases() {
    assert_eq!("good".parse::<PresetKind>(), Ok(PresetKind::Favorable));
    assert_eq!(" Risky ".parse::<PresetKind>(), Ok(PresetKind::Risky));
    assert!("average".parse::<PresetKind>().is_err());
}

#[test]
fn reset_mints_a_new_identifier() {
    let mut store = ApplicationDraftStore::from_draft(favorable_draft());
    store.advance_step();
    let old_id = store.draft().application_id.clone();

    store.reset();

    assert_ne!(store.draft().application_id, old_id);
    assert_eq!(store.position().index(), 0);
    assert!(store.draft().applicant.first_name.is_empty());
}

#[test]
fn debt_and_collateral_lists_are_editable() {
    let mut store = ApplicationDraftStore::new();
    store.add_debt(car_loan());
    assert_eq!(store.draft().existing_debts.len(), 1);

    assert!(matches!(
        store.remove_debt(3),
        Err(DraftError::DebtOutOfRange { index: 3, len: 1 })
    ));
    let removed = store.remove_debt(0).expect("debt present");
    assert_eq!(removed.creditor_name, "Diac");
    assert!(store.draft().existing_debts.is_empty());

    store.set_collateral(Some(CollateralInfo {
        collateral_type: CollateralType::Savings,
        description: "Livret A".to_string(),
        estimated_value: 22_000.0,
        valuation_date: NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"),
        valuation_source: "Bank statement".to_string(),
        encumbrances: 0.0,
        insurance_coverage: None,
    }));
    store
        .update_field(DraftSection::Collateral, "description", json!("Livret A + LDDS"))
        .expect("collateral now addressable");
    assert_eq!(
        store.draft().collateral.as_ref().map(|c| c.description.as_str()),
        Some("Livret A + LDDS")
    );

    store.set_collateral(None);
    assert!(store.draft().collateral.is_none());
}

#[test]
fn empty_draft_reports_missing_fields_in_wizard_order() {
    let err = check_required_fields(&ApplicationDraft::initialize())
        .expect_err("blank draft is incomplete");

    assert_eq!(err.first_step(), Some(WizardStep::Applicant));
    let fields: Vec<_> = err.missing.iter().map(|missing| missing.field).collect();
    assert!(fields.contains(&"first_name"));
    assert!(fields.contains(&"monthly_gross_income"));
    let first_employment = fields
        .iter()
        .position(|field| *field == "monthly_gross_income")
        .expect("employment problem listed");
    let last_applicant = fields
        .iter()
        .rposition(|field| *field == "date_of_birth")
        .expect("applicant problem listed");
    assert!(last_applicant < first_employment);
}
