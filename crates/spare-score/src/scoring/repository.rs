use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Classification, ScoreInputs};
use super::engine::ScoreOutcome;
use super::insights::ScoreInsights;

/// Identifier wrapper for households.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HouseholdId(pub String);

impl HouseholdId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One scored point in a household's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreAssessment {
    pub household_id: HouseholdId,
    pub assessed_at: DateTime<Utc>,
    pub inputs: ScoreInputs,
    pub outcome: ScoreOutcome,
    pub insights: ScoreInsights,
}

impl ScoreAssessment {
    pub fn score(&self) -> u8 {
        self.outcome.result.score
    }

    pub fn classification(&self) -> Classification {
        self.outcome.result.classification
    }
}

/// Storage abstraction so the service can be exercised without a database.
///
/// History is kept in recording order. `assessed_at` is carried as data and
/// never used to re-sort, so a backdated assessment still becomes the latest.
pub trait AssessmentRepository: Send + Sync {
    /// Appends the assessment and returns the household's previous latest.
    /// Both happen under one lock: concurrent writers each see a distinct predecessor.
    fn record(&self, assessment: ScoreAssessment)
        -> Result<Option<ScoreAssessment>, RepositoryError>;
    fn latest(&self, household_id: &HouseholdId)
        -> Result<Option<ScoreAssessment>, RepositoryError>;
    /// Most recently recorded first, at most `limit` entries.
    fn history(
        &self,
        household_id: &HouseholdId,
        limit: usize,
    ) -> Result<Vec<ScoreAssessment>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound notification hook (push, e-mail, in-app banner).
pub trait AlertPublisher: Send + Sync {
    fn publish(&self, alert: ScoreAlert) -> Result<(), AlertError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAlert {
    pub template: String,
    pub household_id: HouseholdId,
    pub details: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error("alert transport unavailable: {0}")]
    Transport(String),
}
