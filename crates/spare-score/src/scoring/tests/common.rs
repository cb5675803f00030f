use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{DebtRecord, LoanType, ScoreInputs};
use crate::scoring::repository::{
    AlertError, AlertPublisher, AssessmentRepository, HouseholdId, RepositoryError, ScoreAlert,
    ScoreAssessment,
};
use crate::scoring::service::ScoreService;
use crate::scoring::snapshot::HouseholdSnapshot;

/// Income 5000, expenses 4000, 3 months saved, 20% MDLR, 8% savings rate.
pub(super) fn strong_inputs() -> ScoreInputs {
    ScoreInputs {
        monthly_income: 5000.0,
        monthly_expenses: 4000.0,
        net_amount: 1000.0,
        emergency_fund_months: 3.0,
        mdlr_percent: 20.0,
        savings_rate_percent: 8.0,
        stability: None,
    }
}

pub(super) fn best_inputs() -> ScoreInputs {
    ScoreInputs {
        monthly_income: 8000.0,
        monthly_expenses: 4000.0,
        net_amount: 4000.0,
        emergency_fund_months: 9.0,
        mdlr_percent: 0.0,
        savings_rate_percent: 50.0,
        stability: None,
    }
}

pub(super) fn worst_inputs() -> ScoreInputs {
    ScoreInputs {
        monthly_income: 0.0,
        monthly_expenses: 2500.0,
        net_amount: -2500.0,
        emergency_fund_months: 0.0,
        mdlr_percent: 80.0,
        savings_rate_percent: -40.0,
        stability: None,
    }
}

pub(super) fn healthy_snapshot() -> HouseholdSnapshot {
    HouseholdSnapshot {
        monthly_income: 9000.0,
        monthly_expenses: 5000.0,
        emergency_fund_balance: 36000.0,
        debts: vec![DebtRecord::new(LoanType::Mortgage, 1000.0)],
        stability: None,
    }
}

pub(super) fn strained_snapshot() -> HouseholdSnapshot {
    HouseholdSnapshot {
        monthly_income: 4000.0,
        monthly_expenses: 4600.0,
        emergency_fund_balance: 1500.0,
        debts: vec![
            DebtRecord::new(LoanType::CreditCard, 900.0),
            DebtRecord::new(LoanType::PersonalLoan, 600.0),
        ],
        stability: None,
    }
}

#[derive(Default)]
pub(super) struct InMemoryAssessmentRepository {
    records: Mutex<HashMap<HouseholdId, Vec<ScoreAssessment>>>,
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn record(
        &self,
        assessment: ScoreAssessment,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let history = guard.entry(assessment.household_id.clone()).or_default();
        let previous = history.last().cloned();
        history.push(assessment);
        Ok(previous)
    }

    fn latest(
        &self,
        household_id: &HouseholdId,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
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
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(household_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn record(
        &self,
        _assessment: ScoreAssessment,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn latest(
        &self,
        _household_id: &HouseholdId,
    ) -> Result<Option<ScoreAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }

    fn history(
        &self,
        _household_id: &HouseholdId,
        _limit: usize,
    ) -> Result<Vec<ScoreAssessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("maintenance window".to_string()))
    }
}

#[derive(Default)]
pub(super) struct RecordingAlertPublisher {
    events: Mutex<Vec<ScoreAlert>>,
}

impl RecordingAlertPublisher {
    pub(super) fn events(&self) -> Vec<ScoreAlert> {
        self.events.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for RecordingAlertPublisher {
    fn publish(&self, alert: ScoreAlert) -> Result<(), AlertError> {
        self.events.lock().expect("alert mutex poisoned").push(alert);
        Ok(())
    }
}

/// Fails the first `failures` deliveries, then records like the happy path.
pub(super) struct FlakyAlertPublisher {
    failures_left: Mutex<usize>,
    delivered: Mutex<Vec<ScoreAlert>>,
}

impl FlakyAlertPublisher {
    pub(super) fn failing(failures: usize) -> Self {
        Self {
            failures_left: Mutex::new(failures),
            delivered: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn delivered(&self) -> Vec<ScoreAlert> {
        self.delivered.lock().expect("alert mutex poisoned").clone()
    }
}

impl AlertPublisher for FlakyAlertPublisher {
    fn publish(&self, alert: ScoreAlert) -> Result<(), AlertError> {
        let mut failures_left = self.failures_left.lock().expect("alert mutex poisoned");
        if *failures_left > 0 {
            *failures_left -= 1;
            return Err(AlertError::Transport("smtp relay refused".to_string()));
        }
        self.delivered.lock().expect("alert mutex poisoned").push(alert);
        Ok(())
    }
}

/// Income 5000, expenses 4800, 2 months saved, 18.2% MDLR: scores 65.
pub(super) fn fair_snapshot() -> HouseholdSnapshot {
    HouseholdSnapshot {
        monthly_income: 5000.0,
        monthly_expenses: 4800.0,
        emergency_fund_balance: 9600.0,
        debts: vec![DebtRecord::new(LoanType::CreditCard, 700.0)],
        stability: None,
    }
}

/// Income equals expenses, 1 month saved, 18.2% MDLR: scores 52.
pub(super) fn fragile_snapshot() -> HouseholdSnapshot {
    HouseholdSnapshot {
        monthly_income: 5000.0,
        monthly_expenses: 5000.0,
        emergency_fund_balance: 5000.0,
        debts: vec![DebtRecord::new(LoanType::CreditCard, 700.0)],
        stability: None,
    }
}

pub(super) type TestService = ScoreService<InMemoryAssessmentRepository, RecordingAlertPublisher>;

pub(super) fn service() -> (Arc<TestService>, Arc<RecordingAlertPublisher>) {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let alerts = Arc::new(RecordingAlertPublisher::default());
    let service = Arc::new(ScoreService::new(repository, alerts.clone()));
    (service, alerts)
}

pub(super) fn household(id: &str) -> HouseholdId {
    HouseholdId(id.to_string())
}

pub(super) async fn read_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
