//! Packaged rulebooks for the advisory verticals GharConnect ships today.

use super::gates::GateCheck;
use super::predicates::{
    credit_score_at_least, credit_score_within, emi_share_of_income_at_most, loan_amount_within,
    monthly_income_at_least, tenure_months_within,
};
use super::rules::TierRule;
use super::{EligibilityEngine, RulebookError};

/// Name accepted by `by_name` and the `APP_RULEBOOK` setting.
pub const CREDIT_ADVISORY: &str = "credit-advisory";

/// Resolve a rulebook by its configured name, failing fast at startup for
/// names no packaged rulebook answers to.
pub fn by_name(name: &str) -> Result<EligibilityEngine, RulebookError> {
    match name.trim().to_ascii_lowercase().as_str() {
        CREDIT_ADVISORY | "credit_advisory" => credit_advisory(),
        other => Err(RulebookError::UnknownRulebook(other.to_string())),
    }
}

/// The personal-loan advisory decision table.
///
/// Gates carry the absolute floors the advisory pages quote verbatim. The
/// two offer tiers overlap by construction: an applicant in the 700-749
/// score band with bank-level income qualifies for both, and the NBFC offer
/// wins on rank.
pub fn credit_advisory() -> Result<EligibilityEngine, RulebookError> {
    let gates = vec![
        GateCheck::new(
            "income-floor",
            "Monthly income below ₹20,000",
            |applicant| {
                applicant
                    .monthly_income
                    .filter(|income| income.is_finite())
                    .is_some_and(|income| income >= 20_000.0)
            },
        ),
        GateCheck::new("credit-score-floor", "Credit score below 600", |applicant| {
            applicant.credit_score.is_some_and(|score| score >= 600)
        }),
        GateCheck::new(
            "emi-load",
            "Existing EMIs exceed 60% of monthly income",
            |applicant| {
                let income = match applicant.monthly_income.filter(|v| v.is_finite()) {
                    Some(income) if income > 0.0 => income,
                    _ => return false,
                };
                // An undeclared EMI figure counts as zero at the gate, the
                // same coercion the intake form applies.
                let emi = applicant
                    .current_emi
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .unwrap_or(0.0);
                emi <= income * 0.6
            },
        ),
    ];

    let tiers = vec![
        TierRule::new(
            "incred",
            1,
            vec![
                monthly_income_at_least(25_000.0),
                credit_score_within(650, 750),
                emi_share_of_income_at_most(0.5),
                loan_amount_within(25_000.0, 1_500_000.0),
                tenure_months_within(12, 48),
            ],
        ),
        TierRule::new(
            "banks",
            2,
            vec![
                monthly_income_at_least(50_000.0)
                    .with_failure_reason("Monthly income below ₹50,000 for banks"),
                credit_score_at_least(700),
                emi_share_of_income_at_most(0.5),
                loan_amount_within(50_000.0, 5_000_000.0),
                tenure_months_within(12, 84),
            ],
        ),
    ];

    EligibilityEngine::new(gates, tiers)
}
