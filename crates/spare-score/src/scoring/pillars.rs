//! Pillar penalty functions.
//!
//! Each function is a total step function over its metric and returns a
//! penalty in `[-max_penalty, 0]`. Inputs are assumed finite; a NaN falls
//! through every comparison and lands in whichever band the final `else`
//! covers.

use super::domain::StabilityLevel;

/// Cash flow health, `[-30, 0]`.
pub fn penalty_cash_flow(monthly_income: f64, monthly_expenses: f64, net_amount: f64) -> f64 {
    if monthly_income > 0.0 {
        let ratio_pct = net_amount / monthly_income * 100.0;
        if ratio_pct > 10.0 {
            0.0
        } else if ratio_pct > 0.0 {
            -5.0
        } else if ratio_pct == 0.0 {
            -10.0
        } else if ratio_pct >= -10.0 {
            -20.0
        } else {
            -30.0
        }
    } else if monthly_income == 0.0 && monthly_expenses > 0.0 {
        -30.0
    } else {
        -10.0
    }
}

/// Emergency fund coverage in months of expenses, `[-20, 0]`.
pub fn penalty_emergency_fund(emergency_fund_months: f64) -> f64 {
    if emergency_fund_months >= 6.0 {
        0.0
    } else if emergency_fund_months >= 4.0 {
        -5.0
    } else if emergency_fund_months >= 2.0 {
        -10.0
    } else if emergency_fund_months >= 1.0 {
        -15.0
    } else {
        -20.0
    }
}

/// Debt health from the monthly debt-to-liquidity ratio, `[-20, 0]`.
///
/// The second band's upper bound is exclusive (`< 15`) while the later bands
/// are inclusive (`<= 30`, `<= 45`), so exactly 15% already costs 8 points.
pub fn penalty_debt_from_mdlr(mdlr_percent: f64) -> f64 {
    if mdlr_percent <= 0.0 {
        0.0
    } else if mdlr_percent < 15.0 {
        -2.0
    } else if mdlr_percent <= 30.0 {
        -8.0
    } else if mdlr_percent <= 45.0 {
        -14.0
    } else {
        -20.0
    }
}

/// Savings behavior from the savings rate, `[-15, 0]`.
pub fn penalty_savings(savings_rate_percent: f64) -> f64 {
    if savings_rate_percent >= 20.0 {
        0.0
    } else if savings_rate_percent >= 10.0 {
        -5.0
    } else if savings_rate_percent >= 5.0 {
        -8.0
    } else if savings_rate_percent >= 1.0 {
        -12.0
    } else {
        -15.0
    }
}

/// Stability, `[-15, 0]`. Not scored yet: always `0.0` whatever the level.
pub fn penalty_stability(_level: Option<StabilityLevel>) -> f64 {
    0.0
}
