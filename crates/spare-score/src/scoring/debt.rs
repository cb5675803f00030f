use super::domain::DebtRecord;

/// Debts that still require a monthly payment.
pub fn outstanding_debts(debts: &[DebtRecord]) -> impl Iterator<Item = &DebtRecord> {
    debts.iter().filter(|debt| !debt.is_paid_off)
}

/// Risk-weighted monthly debt service across every debt that is not paid off.
///
/// Payments are taken as magnitudes and a missing payment counts as zero, so an
/// empty or fully paid-off list yields `0.0`.
pub fn effective_monthly_debt_payment(debts: &[DebtRecord]) -> f64 {
    outstanding_debts(debts)
        .map(|debt| {
            let payment = debt.monthly_payment.unwrap_or(0.0).abs();
            payment * debt.loan_type.risk_multiplier()
        })
        .sum()
}
