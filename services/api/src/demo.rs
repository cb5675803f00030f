use crate::infra::{
    parse_debt, parse_stability, InMemoryAlertPublisher, InMemoryAssessmentRepository,
};
use chrono::{Duration, Utc};
use clap::Args;
use spare_score::error::AppError;
use spare_score::scoring::{
    validate_snapshot, DebtRecord, HouseholdId, HouseholdSnapshot, LoanType, ScoreInsights,
    ScoreOutcome, ScoreResponse, ScoreService, ScoreServiceError, StabilityLevel,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Monthly income
    #[arg(long)]
    pub(crate) income: f64,
    /// Monthly expenses
    #[arg(long)]
    pub(crate) expenses: f64,
    /// Liquid savings set aside for emergencies
    #[arg(long, default_value_t = 0.0)]
    pub(crate) emergency_fund: f64,
    /// Debt as loan_type:payment[:paid] (repeatable), e.g. --debt credit_card:200
    #[arg(long = "debt", value_parser = parse_debt)]
    pub(crate) debts: Vec<DebtRecord>,
    /// Self-reported income stability (high, medium, low, chaotic)
    #[arg(long, value_parser = parse_stability)]
    pub(crate) stability: Option<StabilityLevel>,
    /// Print the full outcome as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print each stored assessment as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        income,
        expenses,
        emergency_fund,
        debts,
        stability,
        json,
    } = args;

    let snapshot = HouseholdSnapshot {
        monthly_income: income,
        monthly_expenses: expenses,
        emergency_fund_balance: emergency_fund,
        debts,
        stability,
    };
    validate_snapshot(&snapshot).map_err(ScoreServiceError::InvalidInputs)?;

    let inputs = snapshot.to_inputs();
    let service = ScoreService::new(
        Arc::new(InMemoryAssessmentRepository::default()),
        Arc::new(InMemoryAlertPublisher::default()),
    );
    let (outcome, insights) = service.evaluate(&inputs)?;

    if json {
        let response = ScoreResponse { outcome, insights };
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "Effective monthly debt payment: {:.2}",
        snapshot.effective_monthly_debt_payment()
    );
    render_outcome(&outcome, &insights);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(InMemoryAlertPublisher::default());
    let service = ScoreService::new(repository, alerts.clone());

    let household = HouseholdId("demo-household".to_string());
    let start = Utc::now() - Duration::days(60);

    println!("Spare Score demo for {}", household.as_str());
    for (month, (label, snapshot)) in demo_months().into_iter().enumerate() {
        let assessed_at = start + Duration::days(30 * month as i64);
        let assessment = service.assess_at(household.clone(), &snapshot, assessed_at)?;

        println!("\n{} ({})", label, assessed_at.format("%Y-%m-%d"));
        if args.json {
            println!("{}", serde_json::to_string_pretty(&assessment)?);
        } else {
            render_outcome(&assessment.outcome, &assessment.insights);
        }
    }

    let history = service.history(&household, service.default_history_limit())?;
    let trend: Vec<String> = history
        .iter()
        .rev()
        .map(|assessment| assessment.score().to_string())
        .collect();
    println!("\nScore trend: {}", trend.join(" -> "));

    let events = alerts.events();
    if events.is_empty() {
        println!("Alerts: none dispatched");
    } else {
        println!("Alerts:");
        for alert in events {
            let details: Vec<String> = alert
                .details
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            println!("  - template={} {}", alert.template, details.join(" "));
        }
    }

    Ok(())
}

fn render_outcome(outcome: &ScoreOutcome, insights: &ScoreInsights) {
    println!(
        "Spare Score: {} ({})",
        outcome.result.score,
        outcome.result.classification.label()
    );
    println!("  {}", outcome.result.message);
    println!("  Pillars:");
    for component in &outcome.components {
        println!(
            "    - {}: {:+.0}/{:.0} ({})",
            component.pillar.label(),
            component.penalty,
            component.max_penalty,
            component.notes
        );
    }

    if !insights.observations.is_empty() {
        println!("  Observations:");
        for observation in &insights.observations {
            println!("    - {observation}");
        }
    }
    if !insights.recommended_actions.is_empty() {
        println!("  Recommended actions:");
        for action in &insights.recommended_actions {
            println!("    - {action}");
        }
    }
    for alert in &insights.alerts {
        println!("  [{}] {}", alert.severity.label(), alert.message);
    }
}

fn demo_months() -> Vec<(&'static str, HouseholdSnapshot)> {
    vec![
        (
            "Month 1: steady",
            HouseholdSnapshot {
                monthly_income: 6200.0,
                monthly_expenses: 4300.0,
                emergency_fund_balance: 26000.0,
                debts: vec![
                    DebtRecord::new(LoanType::Mortgage, 1400.0),
                    DebtRecord::new(LoanType::StudentLoan, 250.0),
                ],
                stability: Some(StabilityLevel::High),
            },
        ),
        (
            "Month 2: new car",
            HouseholdSnapshot {
                monthly_income: 6200.0,
                monthly_expenses: 5400.0,
                emergency_fund_balance: 18000.0,
                debts: vec![
                    DebtRecord::new(LoanType::Mortgage, 1400.0),
                    DebtRecord::new(LoanType::StudentLoan, 250.0),
                    DebtRecord::new(LoanType::CarLoan, 520.0),
                ],
                stability: Some(StabilityLevel::Medium),
            },
        ),
        (
            "Month 3: income gap",
            HouseholdSnapshot {
                monthly_income: 3100.0,
                monthly_expenses: 5200.0,
                emergency_fund_balance: 4000.0,
                debts: vec![
                    DebtRecord::new(LoanType::Mortgage, 1400.0),
                    DebtRecord::new(LoanType::StudentLoan, 250.0).paid_off(),
                    DebtRecord::new(LoanType::CarLoan, 520.0),
                    DebtRecord::new(LoanType::CreditCard, 380.0),
                ],
                stability: Some(StabilityLevel::Low),
            },
        ),
    ]
}
