use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::HistoryConfig;

use super::domain::ScoreInputs;
use super::engine::{ScoreEngine, ScoreOutcome};
use super::insights::{generate_insights, ScoreInsights};
use super::repository::{
    AlertPublisher, AssessmentRepository, HouseholdId, RepositoryError, ScoreAlert,
    ScoreAssessment,
};
use super::snapshot::HouseholdSnapshot;
use super::validation::{validate_inputs, validate_snapshot};

/// Template name used when a household drops into an at-risk band.
pub const SCORE_DOWNGRADED_TEMPLATE: &str = "score_downgraded";

/// Service composing validation, the score engine, insights, storage, and alerts.
pub struct ScoreService<R, A> {
    repository: Arc<R>,
    alerts: Arc<A>,
    engine: ScoreEngine,
    default_history_limit: usize,
    pending_alerts: Mutex<Vec<ScoreAlert>>,
}

impl<R, A> ScoreService<R, A>
where
    R: AssessmentRepository + 'static,
    A: AlertPublisher + 'static,
{
    pub fn new(repository: Arc<R>, alerts: Arc<A>) -> Self {
        Self {
            repository,
            alerts,
            engine: ScoreEngine::new(),
            default_history_limit: HistoryConfig::DEFAULT_LIMIT,
            pending_alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.default_history_limit = limit.max(1);
        self
    }

    pub fn default_history_limit(&self) -> usize {
        self.default_history_limit
    }

    /// Score pre-computed metrics without persisting anything.
    pub fn evaluate(
        &self,
        inputs: &ScoreInputs,
    ) -> Result<(ScoreOutcome, ScoreInsights), ScoreServiceError> {
        validate_inputs(inputs).map_err(ScoreServiceError::InvalidInputs)?;
        let outcome = self.engine.score(inputs);
        let insights = generate_insights(inputs, &outcome);
        Ok((outcome, insights))
    }

    /// Score a household snapshot, store the assessment, and alert on downgrades.
    pub fn assess(
        &self,
        household_id: HouseholdId,
        snapshot: &HouseholdSnapshot,
    ) -> Result<ScoreAssessment, ScoreServiceError> {
        self.assess_at(household_id, snapshot, Utc::now())
    }

    /// Scores and stores the snapshot. Alert delivery failures never fail the
    /// call: the alert is queued and retried on the next assessment or via
    /// [`ScoreService::flush_pending_alerts`].
    pub fn assess_at(
        &self,
        household_id: HouseholdId,
        snapshot: &HouseholdSnapshot,
        assessed_at: DateTime<Utc>,
    ) -> Result<ScoreAssessment, ScoreServiceError> {
        validate_snapshot(snapshot).map_err(ScoreServiceError::InvalidInputs)?;
        let inputs = snapshot.to_inputs();
        let (outcome, insights) = self.evaluate(&inputs)?;

        self.flush_pending_alerts();

        let assessment = ScoreAssessment {
            household_id,
            assessed_at,
            inputs,
            outcome,
            insights,
        };
        let previous = self.repository.record(assessment.clone())?;

        info!(
            household_id = assessment.household_id.as_str(),
            score = assessment.score(),
            classification = assessment.classification().label(),
            "recorded spare score assessment"
        );

        if let Some(alert) = downgrade_alert(previous.as_ref(), &assessment) {
            self.dispatch(alert);
        }

        Ok(assessment)
    }

    /// Retries queued alerts; returns how many were delivered.
    pub fn flush_pending_alerts(&self) -> usize {
        let queued = std::mem::take(&mut *self.lock_pending());
        if queued.is_empty() {
            return 0;
        }

        let mut delivered = 0;
        let mut still_pending = Vec::new();
        for alert in queued {
            match self.alerts.publish(alert.clone()) {
                Ok(()) => delivered += 1,
                Err(err) => {
                    warn!(
                        household_id = alert.household_id.as_str(),
                        error = %err,
                        "score alert retry failed"
                    );
                    still_pending.push(alert);
                }
            }
        }
        self.lock_pending().extend(still_pending);
        delivered
    }

    pub fn pending_alerts(&self) -> Vec<ScoreAlert> {
        self.lock_pending().clone()
    }

    fn dispatch(&self, alert: ScoreAlert) {
        if let Err(err) = self.alerts.publish(alert.clone()) {
            warn!(
                household_id = alert.household_id.as_str(),
                template = %alert.template,
                error = %err,
                "score alert delivery failed, queued for retry"
            );
            self.lock_pending().push(alert);
        }
    }

    fn lock_pending(&self) -> MutexGuard<'_, Vec<ScoreAlert>> {
        self.pending_alerts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn latest(
        &self,
        household_id: &HouseholdId,
    ) -> Result<ScoreAssessment, ScoreServiceError> {
        let assessment = self
            .repository
            .latest(household_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(assessment)
    }

    pub fn history(
        &self,
        household_id: &HouseholdId,
        limit: usize,
    ) -> Result<Vec<ScoreAssessment>, ScoreServiceError> {
        Ok(self.repository.history(household_id, limit)?)
    }
}

/// Error raised by the score service.
#[derive(Debug, thiserror::Error)]
pub enum ScoreServiceError {
    #[error("invalid score inputs: {}", .0.join("; "))]
    InvalidInputs(Vec<String>),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Alert for a drop into an at-risk band. A first assessment has nothing to drop from.
fn downgrade_alert(
    previous: Option<&ScoreAssessment>,
    current: &ScoreAssessment,
) -> Option<ScoreAlert> {
    let prior = previous?;
    let classification = current.classification();
    if !classification.is_at_risk() || classification >= prior.classification() {
        return None;
    }

    warn!(
        household_id = current.household_id.as_str(),
        from = prior.classification().label(),
        to = classification.label(),
        "spare score dropped into an at-risk band"
    );

    let mut details = BTreeMap::new();
    details.insert(
        "previous_classification".to_string(),
        prior.classification().label().to_string(),
    );
    details.insert("classification".to_string(), classification.label().to_string());
    details.insert("previous_score".to_string(), prior.score().to_string());
    details.insert("score".to_string(), current.score().to_string());

    Some(ScoreAlert {
        template: SCORE_DOWNGRADED_TEMPLATE.to_string(),
        household_id: current.household_id.clone(),
        details,
    })
}
