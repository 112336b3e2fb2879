use clap::Args;
use credit_wizard::config::AppConfig;
use credit_wizard::error::AppError;
use credit_wizard::telemetry;
use credit_wizard::workflows::assessment::report::{ColorTier, DisplayModel};
use credit_wizard::workflows::assessment::submission::AssessmentRequest;
use credit_wizard::workflows::assessment::{
    load_preset, AssessmentSession, AssessmentTransport, HttpAssessmentClient, PresetKind,
    SubmissionController, ViewAction, ViewEffect,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Preset application to submit (favorable or risky)
    #[arg(long, default_value = "favorable")]
    pub(crate) preset: PresetKind,
    /// Print the dashboard model as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Preset application to check (favorable or risky)
    #[arg(long, default_value = "favorable")]
    pub(crate) preset: PresetKind,
}

#[derive(Args, Debug)]
pub(crate) struct StreamArgs {
    /// Preset application to stream (favorable or risky)
    #[arg(long, default_value = "favorable")]
    pub(crate) preset: PresetKind,
}

fn connect() -> Result<HttpAssessmentClient, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(HttpAssessmentClient::new(config.assessment)?)
}

pub(crate) async fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { preset, json } = args;
    let client = connect()?;

    let mut session = AssessmentSession::new(SubmissionController::new(Arc::new(client)));
    session.dispatch(ViewAction::LoadPreset(preset));
    let applicant = session.state().store.draft().applicant.full_name();
    eprintln!("Submitting {preset} application for {applicant}");

    let effects = session
        .submit_observed(|state| {
            if let Some(overlay) = &state.submitting {
                eprintln!("  .. {}", overlay.message);
            }
        })
        .await;

    for effect in effects {
        if let ViewEffect::MissingFields(missing) = effect {
            return Err(missing.into());
        }
    }

    let Some(model) = session.display_model() else {
        let banner = session
            .state()
            .banner
            .clone()
            .unwrap_or_else(|| "no report received".to_string());
        return Err(AppError::Assessment(banner));
    };

    if json {
        let rendered = serde_json::to_string_pretty(&model).map_err(std::io::Error::other)?;
        println!("{rendered}");
    } else {
        render_dashboard(&model);
    }
    Ok(())
}

pub(crate) async fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let client = connect()?;
    let controller = SubmissionController::new(Arc::new(client));
    let draft = load_preset(args.preset);

    let outcome = controller
        .validate_remote(&draft)
        .await
        .map_err(|failure| AppError::Assessment(failure.message))?;

    println!(
        "Application {} ({} preset): {}",
        draft.application_id.as_str(),
        args.preset,
        if outcome.valid { "valid" } else { "invalid" }
    );
    for issue in &outcome.issues {
        println!("  - issue: {issue}");
    }
    for warning in &outcome.warnings {
        println!("  - warning: {warning}");
    }
    Ok(())
}

pub(crate) async fn run_stream(args: StreamArgs) -> Result<(), AppError> {
    let client = connect()?;
    let draft = load_preset(args.preset);
    eprintln!(
        "Streaming {} application for {}",
        args.preset,
        draft.applicant.full_name()
    );

    let summary = client
        .assess_stream(&AssessmentRequest::detailed(draft), |update| {
            println!("[{:>3}%] {:<15} {}", update.progress, update.stage, update.status);
        })
        .await?;

    println!("\nDecision {} (report {})", summary.decision, summary.report_id);
    if let Some(confidence) = summary.confidence {
        println!("  confidence {confidence:.0}%");
    }
    if let Some(risk_level) = &summary.risk_level {
        println!("  risk level {risk_level}");
    }
    Ok(())
}

pub(crate) async fn run_health() -> Result<(), AppError> {
    let client = connect()?;
    let health = client.health().await;

    println!("Assessment service: {}", health.status);
    if let Some(version) = &health.version {
        println!("  version {version}");
    }
    if let Some(timestamp) = &health.timestamp {
        println!("  as of {timestamp}");
    }
    Ok(())
}

fn tier_marker(tier: ColorTier) -> &'static str {
    match tier {
        ColorTier::Success => "[+]",
        ColorTier::Warning => "[!]",
        ColorTier::Danger => "[x]",
        ColorTier::Neutral => "[?]",
    }
}

fn render_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{title}");
    for item in items {
        println!("  - {item}");
    }
}

fn render_dashboard(model: &DisplayModel) {
    println!("Credit assessment for {}", model.applicant_name);
    println!("Report {}", model.report_id);

    println!(
        "\n{} {} (confidence {})",
        tier_marker(model.decision.tier),
        model.decision.label,
        model.decision.confidence
    );
    println!(
        "{} Risk level {} | score {}",
        tier_marker(model.risk.tier),
        model.risk.level,
        model.risk.score
    );

    println!("\nKey metrics");
    println!("  - Projected DTI: {}", model.metrics.projected_dti);
    println!(
        "  - Probability of default: {}",
        model.metrics.probability_of_default
    );
    println!(
        "  - Max affordable payment: {}",
        model.metrics.max_affordable_payment
    );

    if let Some(terms) = &model.approved_terms {
        println!("\nApproved terms");
        println!("  - Amount: {}", terms.amount);
        println!("  - Interest rate: {}", terms.interest_rate);
        println!("  - Monthly payment: {}", terms.monthly_payment);
        println!("  - Term: {}", terms.term);
    }

    if !model.score_breakdown.is_empty() {
        println!("\nScore breakdown");
        for bar in &model.score_breakdown {
            let filled = (bar.value.clamp(0.0, 100.0) / 5.0).round() as usize;
            println!(
                "  {:<17} {:<20} {:>5.1}",
                bar.label,
                "#".repeat(filled),
                bar.value
            );
        }
    }

    let summary = &model.financial_summary;
    println!("\nFinancial summary");
    println!("  - Gross annual income: {}", summary.gross_annual_income);
    println!("  - Net annual income: {}", summary.net_annual_income);
    println!("  - Existing debt: {}", summary.total_existing_debt);
    println!("  - Monthly debt payments: {}", summary.monthly_debt_payments);
    println!("  - Collateral value: {}", summary.collateral_value);

    render_list("Conditions", &model.conditions);
    render_list("Decline reasons", &model.decline_reasons);
    render_list("Risk factors", &model.risk_factors);
    render_list("Mitigating factors", &model.mitigating_factors);
    render_list("Recommendations", &model.recommendations);

    println!(
        "\nProcessed in {} | trace {} | model {}",
        model.processing.processing_time, model.processing.trace_id, model.processing.model_version
    );
}
