use metrics_exporter_prometheus::PrometheusHandle;
use spare_score::scoring::{
    AlertError, AlertPublisher, AssessmentRepository, DebtRecord, HouseholdId, LoanType,
    RepositoryError, ScoreAlert, ScoreAssessment, StabilityLevel,
};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

type HistoryByHousehold = HashMap<HouseholdId, Vec<ScoreAssessment>>;

/// Process-local assessment history in recording order per household.
/// Nothing is evicted; history lives as long as the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentRepository {
    records: Arc<Mutex<HistoryByHousehold>>,
}

impl InMemoryAssessmentRepository {
    fn lock(&self) -> Result<MutexGuard<'_, HistoryByHousehold>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn record(
        &self,
        assessment: ScoreAssessment,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        let mut guard = self.lock()?;
        let history = guard.entry(assessment.household_id.clone()).or_default();
        let previous = history.last().cloned();
        history.push(assessment);
        Ok(previous)
    }

    fn latest(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .get(household_id)
            .and_then(|history| history.last())
            .cloned())
    }

    fn history(
        &self,
        household_id: &HouseholdId,
        limit: usize,
    ) -> Result<Vec<ScoreAssessment>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .get(household_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

/// Alert sink that logs and keeps every alert for inspection.
#[derive(Default, Clone)]
pub(crate) struct InMemoryAlertPublisher {
    events: Arc<Mutex<Vec<ScoreAlert>>>,
}

impl AlertPublisher for InMemoryAlertPublisher {
    fn publish(&self, alert: ScoreAlert) -> Result<(), AlertError> {
        info!(
            template = %alert.template,
            household_id = alert.household_id.as_str(),
            "dispatching score alert"
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| AlertError::Transport("alert mutex poisoned".to_string()))?;
        guard.push(alert);
        Ok(())
    }
}

impl InMemoryAlertPublisher {
    pub(crate) fn events(&self) -> Vec<ScoreAlert> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Parses `loan_type:payment[:paid]`, e.g. `credit_card:200` or `mortgage:1450:paid`.
pub(crate) fn parse_debt(raw: &str) -> Result<DebtRecord, String> {
    let mut parts = raw.trim().split(':');
    let (Some(kind), Some(payment)) = (parts.next(), parts.next()) else {
        return Err(format!("expected loan_type:payment, got '{raw}'"));
    };

    let loan_type: LoanType = serde_json::from_value(serde_json::Value::String(
        kind.trim().to_ascii_lowercase(),
    ))
    .map_err(|err| format!("unknown loan type '{kind}' ({err})"))?;
    let monthly_payment = payment
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse payment '{payment}' ({err})"))?;
    let is_paid_off = match parts.next().map(str::trim) {
        None => false,
        Some("paid") | Some("paid_off") => true,
        Some(other) => return Err(format!("unexpected debt flag '{other}'")),
    };

    Ok(DebtRecord {
        loan_type,
        monthly_payment: Some(monthly_payment),
        is_paid_off,
    })
}

pub(crate) fn parse_stability(raw: &str) -> Result<StabilityLevel, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "high" => Ok(StabilityLevel::High),
        "medium" => Ok(StabilityLevel::Medium),
        "low" => Ok(StabilityLevel::Low),
        "chaotic" => Ok(StabilityLevel::Chaotic),
        other => Err(format!(
            "stability must be one of high, medium, low, chaotic (got '{other}')"
        )),
    }
}
