use super::common::*;
use crate::scoring::domain::{DebtRecord, LoanType};
use crate::scoring::validation::{validate_inputs, validate_snapshot};

#[test]
fn accepts_well_formed_inputs() {
    assert!(validate_inputs(&strong_inputs()).is_ok());
    assert!(validate_inputs(&worst_inputs()).is_ok());
    assert!(validate_snapshot(&healthy_snapshot()).is_ok());
}

#[test]
fn negative_savings_rate_and_net_are_allowed() {
    let mut inputs = strong_inputs();
    inputs.net_amount = -300.0;
    inputs.savings_rate_percent = -6.0;
    assert!(validate_inputs(&inputs).is_ok());
}

#[test]
fn collects_all_errors() {
    let mut inputs = strong_inputs();
    inputs.monthly_income = -1.0;
    inputs.emergency_fund_months = f64::NAN;
    inputs.savings_rate_percent = f64::INFINITY;

    let errors = validate_inputs(&inputs).expect_err("invalid inputs");

    assert_eq!(errors.len(), 3);
    assert!(errors[0].starts_with("monthly_income"));
    assert!(errors[1].contains("emergency_fund_months: must be a finite number"));
    assert!(errors[2].starts_with("savings_rate_percent"));
}

#[test]
fn snapshot_debts_must_be_finite_but_may_be_negative() {
    let mut snapshot = healthy_snapshot();
    snapshot.debts.push(DebtRecord::new(LoanType::CarLoan, -320.0));
    assert!(validate_snapshot(&snapshot).is_ok());

    snapshot.debts.push(DebtRecord::new(LoanType::CreditCard, f64::NAN));
    let errors = validate_snapshot(&snapshot).expect_err("nan payment");
    assert_eq!(errors, vec!["debts[2].monthly_payment: must be a finite number"]);
}

#[test]
fn overflowing_derived_ratios_name_their_source_fields() {
    let mut snapshot = healthy_snapshot();
    snapshot.debts = vec![DebtRecord::new(LoanType::CreditCard, 1e308)];

    let errors = validate_snapshot(&snapshot).expect_err("mdlr overflows");

    assert_eq!(
        errors,
        vec!["mdlr_percent (derived from debts / monthly_income): must be a finite number"]
    );
}

#[test]
fn tiny_expenses_against_a_huge_fund_are_rejected() {
    let mut snapshot = healthy_snapshot();
    snapshot.monthly_expenses = 1e-300;
    snapshot.emergency_fund_balance = 1e300;

    let errors = validate_snapshot(&snapshot).expect_err("coverage overflows");

    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("emergency_fund_months (derived from emergency_fund_balance"));
}
