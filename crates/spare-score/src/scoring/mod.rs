//! Spare Score: household financial health scoring.
//!
//! Five pillar penalties (cash flow, emergency fund, debt, savings, stability)
//! are deducted from a base of 100. Their maxima sum to exactly 100, so a
//! household at its worst on every pillar scores 0. The score is mapped to a
//! [`Classification`] band and a user-facing message.
//!
//! All scoring functions are pure and total over finite inputs. Validation of
//! caller-supplied metrics happens at the service boundary, not in the pillars.

pub mod classification;
pub mod debt;
pub mod domain;
pub mod engine;
pub mod insights;
pub mod pillars;
pub mod repository;
pub mod router;
pub mod service;
pub mod snapshot;
pub mod validation;

#[cfg(test)]
mod tests;

pub use classification::{classification_from_score, message_from_classification};
pub use debt::effective_monthly_debt_payment;
pub use domain::{
    Classification, DebtRecord, LoanType, Pillar, ScoreInputs, ScoreResult, StabilityLevel,
    TOTAL_PENALTY_BUDGET,
};
pub use engine::{calculate_score, PillarContribution, ScoreEngine, ScoreOutcome, BASE_SCORE};
pub use insights::{generate_insights, Alert, AlertSeverity, ScoreInsights};
pub use pillars::{
    penalty_cash_flow, penalty_debt_from_mdlr, penalty_emergency_fund, penalty_savings,
    penalty_stability,
};
pub use repository::{
    AlertError, AlertPublisher, AssessmentRepository, HouseholdId, RepositoryError, ScoreAlert,
    ScoreAssessment,
};
pub use router::{score_router, ScoreResponse};
pub use service::{ScoreService, ScoreServiceError, SCORE_DOWNGRADED_TEMPLATE};
pub use snapshot::HouseholdSnapshot;
pub use validation::{validate_inputs, validate_snapshot};
