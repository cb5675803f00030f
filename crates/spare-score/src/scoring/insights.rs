use serde::{Deserialize, Serialize};

use super::domain::{Classification, Pillar, ScoreInputs};
use super::engine::ScoreOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

impl AlertSeverity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

/// Dashboard-facing interpretation of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInsights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_pillar: Option<Pillar>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_pillar_label: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommended_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<Alert>,
}

impl ScoreInsights {
    pub fn highest_severity(&self) -> Option<AlertSeverity> {
        self.alerts.iter().map(|alert| alert.severity).max()
    }
}

pub fn generate_insights(inputs: &ScoreInputs, outcome: &ScoreOutcome) -> ScoreInsights {
    // `min_by` keeps the first of equal minima, so cash flow outranks the others at equal cost.
    let focus = outcome
        .components
        .iter()
        .filter(|c| c.penalty < 0.0)
        .min_by(|a, b| a.penalty.total_cmp(&b.penalty));
    let focus_pillar = focus.map(|c| c.pillar);

    let mut observations = Vec::new();
    let mut recommended_actions = Vec::new();

    for component in outcome.components.iter().filter(|c| c.penalty < 0.0) {
        observations.push(format!(
            "{}: {} ({:.0} of {:.0} points lost)",
            component.pillar.label(),
            component.notes,
            component.penalty.abs(),
            component.max_penalty
        ));
    }

    if observations.is_empty() {
        observations.push("No weaknesses detected across the scored pillars".to_string());
    }

    if let Some(pillar) = focus_pillar {
        recommended_actions.push(format!("Focus first on {}", pillar.label()));
    }

    for component in outcome.components.iter().filter(|c| c.penalty < 0.0) {
        if let Some(action) = action_for(component.pillar, inputs) {
            recommended_actions.push(action);
        }
    }

    let alerts = collect_alerts(inputs, outcome.result.classification);

    ScoreInsights {
        focus_pillar,
        focus_pillar_label: focus_pillar.map(|p| p.label().to_string()),
        observations,
        recommended_actions,
        alerts,
    }
}

fn action_for(pillar: Pillar, inputs: &ScoreInputs) -> Option<String> {
    match pillar {
        Pillar::CashFlow => {
            if inputs.monthly_income > 0.0 {
                let target = inputs.monthly_income * 0.10;
                let gap = (target - inputs.net_amount).max(0.0);
                Some(format!(
                    "Trim about {gap:.2} from monthly spending to keep 10% of income"
                ))
            } else if inputs.monthly_expenses > 0.0 {
                Some("Record an income source or pause non-essential spending".to_string())
            } else {
                Some("Link accounts or add transactions so cash flow can be assessed".to_string())
            }
        }
        Pillar::EmergencyFund => {
            let shortfall = (6.0 - inputs.emergency_fund_months).max(0.0);
            Some(format!(
                "Build the emergency fund by {shortfall:.1} more month(s) of expenses"
            ))
        }
        Pillar::Debt => Some(
            "Pay down credit cards and other high-risk debt before secured loans".to_string(),
        ),
        Pillar::Savings => Some(format!(
            "Raise the savings rate from {:.1}% toward 20%",
            inputs.savings_rate_percent
        )),
        Pillar::Stability => None,
    }
}

fn collect_alerts(inputs: &ScoreInputs, classification: Classification) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if inputs.monthly_income == 0.0 && inputs.monthly_expenses > 0.0 {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            message: "Spending recorded with no income this month".to_string(),
        });
    } else if inputs.monthly_income > 0.0
        && inputs.net_amount / inputs.monthly_income * 100.0 < -10.0
    {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            message: format!(
                "Expenses exceed income by {:.2} this month",
                inputs.net_amount.abs()
            ),
        });
    }

    if inputs.emergency_fund_months < 1.0 {
        alerts.push(Alert {
            severity: AlertSeverity::Warning,
            message: "Emergency fund covers less than one month of expenses".to_string(),
        });
    }

    if inputs.mdlr_percent > 45.0 {
        alerts.push(Alert {
            severity: AlertSeverity::Warning,
            message: format!("Debt payments take {:.1}% of income", inputs.mdlr_percent),
        });
    }

    if classification == Classification::Critical {
        alerts.push(Alert {
            severity: AlertSeverity::Critical,
            message: "Spare Score is in the Critical band".to_string(),
        });
    } else if classification == Classification::Fragile {
        alerts.push(Alert {
            severity: AlertSeverity::Info,
            message: "Spare Score is in the Fragile band".to_string(),
        });
    }

    alerts
}
