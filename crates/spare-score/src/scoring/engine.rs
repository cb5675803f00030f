use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classification::{classification_from_score, message_from_classification};
use super::domain::{Pillar, ScoreInputs, ScoreResult, TOTAL_PENALTY_BUDGET};
use super::pillars::{
    penalty_cash_flow, penalty_debt_from_mdlr, penalty_emergency_fund, penalty_savings,
    penalty_stability,
};

/// Score every household starts from before pillar penalties are applied.
pub const BASE_SCORE: f64 = TOTAL_PENALTY_BUDGET;

/// Discrete pillar deduction, kept so a score can be audited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarContribution {
    pub pillar: Pillar,
    pub penalty: f64,
    pub max_penalty: f64,
    pub notes: String,
}

/// Composite score plus the per-pillar trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub raw_score: f64,
    pub components: Vec<PillarContribution>,
}

impl ScoreOutcome {
    pub fn component(&self, pillar: Pillar) -> Option<&PillarContribution> {
        self.components.iter().find(|c| c.pillar == pillar)
    }

    pub fn total_penalty(&self) -> f64 {
        self.components.iter().map(|c| c.penalty).sum()
    }
}

/// Stateless aggregator over the five pillars.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, inputs: &ScoreInputs) -> ScoreOutcome {
        let components = score_pillars(inputs);
        let outcome = aggregate(components);

        debug!(
            score = outcome.result.score,
            classification = outcome.result.classification.label(),
            raw_score = outcome.raw_score,
            "computed spare score"
        );

        outcome
    }
}

/// Convenience wrapper around [`ScoreEngine::score`].
pub fn calculate_score(inputs: &ScoreInputs) -> ScoreOutcome {
    ScoreEngine::new().score(inputs)
}

fn score_pillars(inputs: &ScoreInputs) -> Vec<PillarContribution> {
    let mut components = Vec::with_capacity(Pillar::ordered().len());

    let cash_flow = penalty_cash_flow(
        inputs.monthly_income,
        inputs.monthly_expenses,
        inputs.net_amount,
    );
    let cash_flow_notes = if inputs.monthly_income > 0.0 {
        format!(
            "net {:.2} is {:.1}% of income {:.2}",
            inputs.net_amount,
            inputs.net_amount / inputs.monthly_income * 100.0,
            inputs.monthly_income
        )
    } else if inputs.monthly_expenses > 0.0 {
        format!("expenses {:.2} with no income", inputs.monthly_expenses)
    } else {
        "no income or expenses recorded".to_string()
    };
    components.push(contribution(Pillar::CashFlow, cash_flow, cash_flow_notes));

    components.push(contribution(
        Pillar::EmergencyFund,
        penalty_emergency_fund(inputs.emergency_fund_months),
        format!(
            "emergency fund covers {:.1} month(s) of expenses",
            inputs.emergency_fund_months
        ),
    ));

    components.push(contribution(
        Pillar::Debt,
        penalty_debt_from_mdlr(inputs.mdlr_percent),
        format!(
            "effective debt payments are {:.1}% of income",
            inputs.mdlr_percent
        ),
    ));

    components.push(contribution(
        Pillar::Savings,
        penalty_savings(inputs.savings_rate_percent),
        format!("savings rate {:.1}%", inputs.savings_rate_percent),
    ));

    let stability_notes = match inputs.stability {
        Some(level) => format!("stability reported as {level:?}; not scored"),
        None => "stability not scored".to_string(),
    };
    components.push(contribution(
        Pillar::Stability,
        penalty_stability(inputs.stability),
        stability_notes,
    ));

    components
}

fn contribution(pillar: Pillar, penalty: f64, notes: String) -> PillarContribution {
    PillarContribution {
        pillar,
        penalty,
        max_penalty: pillar.max_penalty(),
        notes,
    }
}

/// Sums pillar penalties onto the base score and clamps into `[0, 100]`.
///
/// Five pillars applied once each cannot leave the range; the clamp covers
/// compositions that skip or repeat a pillar.
pub(crate) fn aggregate(components: Vec<PillarContribution>) -> ScoreOutcome {
    let raw_score = BASE_SCORE + components.iter().map(|c| c.penalty).sum::<f64>();
    let clamped = raw_score.clamp(0.0, BASE_SCORE).round();
    let classification = classification_from_score(clamped);

    ScoreOutcome {
        result: ScoreResult {
            score: clamped as u8,
            classification,
            message: message_from_classification(classification).to_string(),
        },
        raw_score,
        components,
    }
}
