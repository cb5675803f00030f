use serde::{Deserialize, Serialize};

/// Debt categories recognized by the normalizer. Unknown wire values fall back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    Mortgage,
    StudentLoan,
    CarLoan,
    PersonalLoan,
    CreditCard,
    BusinessLoan,
    #[serde(other)]
    Other,
}

impl LoanType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Mortgage,
            Self::StudentLoan,
            Self::CarLoan,
            Self::PersonalLoan,
            Self::CreditCard,
            Self::BusinessLoan,
            Self::Other,
        ]
    }

    /// Weight applied to a monthly payment when computing the effective debt burden.
    pub const fn risk_multiplier(self) -> f64 {
        match self {
            Self::Mortgage => 0.6,
            Self::StudentLoan => 0.8,
            Self::CarLoan => 1.0,
            Self::PersonalLoan => 1.1,
            Self::CreditCard => 1.3,
            Self::BusinessLoan | Self::Other => 1.6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mortgage => "Mortgage",
            Self::StudentLoan => "Student Loan",
            Self::CarLoan => "Car Loan",
            Self::PersonalLoan => "Personal Loan",
            Self::CreditCard => "Credit Card",
            Self::BusinessLoan => "Business Loan",
            Self::Other => "Other",
        }
    }
}

/// A single debt as tracked by the household ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtRecord {
    pub loan_type: LoanType,
    #[serde(default)]
    pub monthly_payment: Option<f64>,
    #[serde(default)]
    pub is_paid_off: bool,
}

impl DebtRecord {
    pub fn new(loan_type: LoanType, monthly_payment: f64) -> Self {
        Self {
            loan_type,
            monthly_payment: Some(monthly_payment),
            is_paid_off: false,
        }
    }

    pub fn paid_off(mut self) -> Self {
        self.is_paid_off = true;
        self
    }
}

/// Self-reported income stability. Accepted for forward compatibility only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StabilityLevel {
    High,
    Medium,
    Low,
    Chaotic,
}

/// Monthly metrics the score is computed from.
///
/// `net_amount` is signed (income minus expenses) and `savings_rate_percent`
/// may be negative. `mdlr_percent` is the effective monthly debt payment as a
/// percentage of income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInputs {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub net_amount: f64,
    pub emergency_fund_months: f64,
    pub mdlr_percent: f64,
    pub savings_rate_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
}

/// Named band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Classification {
    Critical,
    Fragile,
    Fair,
    Strong,
    Excellent,
}

impl Classification {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Strong => "Strong",
            Self::Fair => "Fair",
            Self::Fragile => "Fragile",
            Self::Critical => "Critical",
        }
    }

    pub fn message(self) -> &'static str {
        super::classification::message_from_classification(self)
    }

    pub const fn is_at_risk(self) -> bool {
        matches!(self, Self::Fragile | Self::Critical)
    }
}

/// One of the five scored financial-health dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    CashFlow,
    EmergencyFund,
    Debt,
    Savings,
    Stability,
}

/// Sum of every pillar's maximum penalty; equal to the base score.
pub const TOTAL_PENALTY_BUDGET: f64 = 100.0;

impl Pillar {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::CashFlow,
            Self::EmergencyFund,
            Self::Debt,
            Self::Savings,
            Self::Stability,
        ]
    }

    /// Magnitude of the worst penalty this pillar can deduct.
    pub const fn max_penalty(self) -> f64 {
        match self {
            Self::CashFlow => 30.0,
            Self::EmergencyFund => 20.0,
            Self::Debt => 20.0,
            Self::Savings => 15.0,
            Self::Stability => 15.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CashFlow => "Cash Flow Health",
            Self::EmergencyFund => "Emergency Fund",
            Self::Debt => "Debt Health",
            Self::Savings => "Savings Behavior",
            Self::Stability => "Stability",
        }
    }
}

/// Result of a single score calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: u8,
    pub classification: Classification,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_loan_types_deserialize_as_other() {
        let debt: DebtRecord =
            serde_json::from_str(r#"{"loan_type":"payday_loan","monthly_payment":100.0}"#)
                .expect("debt parses");
        assert_eq!(debt.loan_type, LoanType::Other);
        assert!(!debt.is_paid_off);
    }

    #[test]
    fn missing_payment_deserializes_as_none() {
        let debt: DebtRecord =
            serde_json::from_str(r#"{"loan_type":"credit_card","is_paid_off":false}"#)
                .expect("debt parses");
        assert_eq!(debt.loan_type, LoanType::CreditCard);
        assert_eq!(debt.monthly_payment, None);
    }

    #[test]
    fn pillar_budget_matches_base_score() {
        let total: f64 = Pillar::ordered().iter().map(|p| p.max_penalty()).sum();
        assert_eq!(total, TOTAL_PENALTY_BUDGET);
    }

    #[test]
    fn classification_serializes_by_name() {
        let json = serde_json::to_string(&Classification::Strong).expect("serializes");
        assert_eq!(json, "\"Strong\"");
    }

    #[test]
    fn business_and_unknown_debt_share_the_top_multiplier() {
        assert_eq!(
            LoanType::BusinessLoan.risk_multiplier(),
            LoanType::Other.risk_multiplier()
        );
        let max = LoanType::ordered()
            .iter()
            .map(|t| t.risk_multiplier())
            .fold(f64::MIN, f64::max);
        assert_eq!(max, 1.6);
    }
}
