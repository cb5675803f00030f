use super::domain::ScoreInputs;
use super::snapshot::HouseholdSnapshot;

/// Check the preconditions the pillar functions assume.
/// Returns all violations at once (not just the first).
pub fn validate_inputs(inputs: &ScoreInputs) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    require_non_negative(&mut errors, "monthly_income", inputs.monthly_income);
    require_non_negative(&mut errors, "monthly_expenses", inputs.monthly_expenses);
    require_finite(&mut errors, "net_amount", inputs.net_amount);
    require_non_negative(
        &mut errors,
        "emergency_fund_months",
        inputs.emergency_fund_months,
    );
    require_non_negative(&mut errors, "mdlr_percent", inputs.mdlr_percent);
    require_finite(
        &mut errors,
        "savings_rate_percent",
        inputs.savings_rate_percent,
    );

    finish(errors)
}

/// Same as [`validate_inputs`] but for the raw ledger totals.
pub fn validate_snapshot(snapshot: &HouseholdSnapshot) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    require_non_negative(&mut errors, "monthly_income", snapshot.monthly_income);
    require_non_negative(&mut errors, "monthly_expenses", snapshot.monthly_expenses);
    require_non_negative(
        &mut errors,
        "emergency_fund_balance",
        snapshot.emergency_fund_balance,
    );

    // Negative payments are fine (magnitudes are used); non-finite ones are not.
    for (i, debt) in snapshot.debts.iter().enumerate() {
        if let Some(payment) = debt.monthly_payment {
            require_finite(&mut errors, &format!("debts[{i}].monthly_payment"), payment);
        }
    }

    // Finite totals can still overflow once divided or weighted.
    if errors.is_empty() {
        let derived = snapshot.to_inputs();
        for (field, source, value) in [
            (
                "emergency_fund_months",
                "emergency_fund_balance / monthly_expenses",
                derived.emergency_fund_months,
            ),
            ("mdlr_percent", "debts / monthly_income", derived.mdlr_percent),
            (
                "savings_rate_percent",
                "monthly_income - monthly_expenses",
                derived.savings_rate_percent,
            ),
        ] {
            require_finite(&mut errors, &format!("{field} (derived from {source})"), value);
        }
    }

    finish(errors)
}

fn require_finite(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{field}: must be a finite number"));
    }
}

fn require_non_negative(errors: &mut Vec<String>, field: &str, value: f64) {
    if !value.is_finite() {
        errors.push(format!("{field}: must be a finite number"));
    } else if value < 0.0 {
        errors.push(format!("{field}: must be non-negative (got {value})"));
    }
}

fn finish(errors: Vec<String>) -> Result<(), Vec<String>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
