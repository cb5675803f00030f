use serde::{Deserialize, Serialize};

use super::debt::effective_monthly_debt_payment;
use super::domain::{DebtRecord, ScoreInputs, StabilityLevel};

/// Coverage assumed when a household has savings but no recorded expenses.
pub const FULL_COVERAGE_MONTHS: f64 = 6.0;

/// MDLR assigned when debt payments exist but there is no income to divide by.
pub const NO_INCOME_MDLR_PERCENT: f64 = 100.0;

/// Monthly ledger totals for a household, before they are reduced to score inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSnapshot {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    #[serde(default)]
    pub emergency_fund_balance: f64,
    #[serde(default)]
    pub debts: Vec<DebtRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stability: Option<StabilityLevel>,
}

impl HouseholdSnapshot {
    pub fn effective_monthly_debt_payment(&self) -> f64 {
        effective_monthly_debt_payment(&self.debts)
    }

    /// Derives the six scalar metrics the pillars consume.
    pub fn to_inputs(&self) -> ScoreInputs {
        let income = self.monthly_income;
        let expenses = self.monthly_expenses;
        let net_amount = income - expenses;
        let effective_debt = self.effective_monthly_debt_payment();

        let emergency_fund_months = if expenses > 0.0 {
            self.emergency_fund_balance / expenses
        } else if self.emergency_fund_balance > 0.0 {
            FULL_COVERAGE_MONTHS
        } else {
            0.0
        };

        let (mdlr_percent, savings_rate_percent) = if income > 0.0 {
            (effective_debt / income * 100.0, net_amount / income * 100.0)
        } else if effective_debt > 0.0 {
            (NO_INCOME_MDLR_PERCENT, 0.0)
        } else {
            (0.0, 0.0)
        };

        ScoreInputs {
            monthly_income: income,
            monthly_expenses: expenses,
            net_amount,
            emergency_fund_months,
            mdlr_percent,
            savings_rate_percent,
            stability: self.stability,
        }
    }
}
