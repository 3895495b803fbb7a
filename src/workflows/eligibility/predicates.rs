use std::fmt;

use super::domain::{format_inr, Applicant, EmploymentType};

type PredicateFn = Box<dyn Fn(&Applicant) -> bool + Send + Sync>;

/// A single named condition over an applicant, paired with the reason shown
/// when it does not hold.
///
/// Predicates are total: any well-formed applicant yields `true` or `false`,
/// and a missing or non-finite field fails the check rather than erroring.
pub struct Predicate {
    id: String,
    failure_reason: String,
    test: PredicateFn,
}

impl Predicate {
    pub fn new(
        id: impl Into<String>,
        failure_reason: impl Into<String>,
        test: impl Fn(&Applicant) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            failure_reason: failure_reason.into(),
            test: Box::new(test),
        }
    }

    /// Replace the default failure reason with tier-specific wording.
    pub fn with_failure_reason(mut self, failure_reason: impl Into<String>) -> Self {
        self.failure_reason = failure_reason.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn failure_reason(&self) -> &str {
        &self.failure_reason
    }

    pub fn holds_for(&self, applicant: &Applicant) -> bool {
        (self.test)(applicant)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("id", &self.id)
            .field("failure_reason", &self.failure_reason)
            .finish()
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

pub fn monthly_income_at_least(floor: f64) -> Predicate {
    Predicate::new(
        format!("monthly-income-at-least-{}", floor as i64),
        format!("Monthly income below ₹{}", format_inr(floor)),
        move |applicant| finite(applicant.monthly_income).is_some_and(|income| income >= floor),
    )
}

pub fn credit_score_at_least(minimum: u16) -> Predicate {
    Predicate::new(
        format!("credit-score-at-least-{minimum}"),
        format!("Credit score below {minimum}"),
        move |applicant| applicant.credit_score.is_some_and(|score| score >= minimum),
    )
}

/// Score band check with an inclusive floor and exclusive ceiling.
pub fn credit_score_within(minimum: u16, below: u16) -> Predicate {
    Predicate::new(
        format!("credit-score-within-{minimum}-{below}"),
        format!("Credit score outside the {minimum} to {} band", below.saturating_sub(1)),
        move |applicant| {
            applicant
                .credit_score
                .is_some_and(|score| score >= minimum && score < below)
        },
    )
}

/// Existing EMI obligations capped at a share of monthly income.
pub fn emi_share_of_income_at_most(share: f64) -> Predicate {
    let percent = (share * 100.0).round() as i64;
    Predicate::new(
        format!("emi-share-at-most-{percent}"),
        format!("Existing EMIs exceed {percent}% of monthly income"),
        move |applicant| {
            let income = match finite(applicant.monthly_income) {
                Some(income) if income > 0.0 => income,
                _ => return false,
            };
            match finite(applicant.current_emi) {
                Some(emi) if emi >= 0.0 => emi <= income * share,
                _ => false,
            }
        },
    )
}

pub fn loan_amount_within(minimum: f64, maximum: f64) -> Predicate {
    Predicate::new(
        format!("loan-amount-within-{}-{}", minimum as i64, maximum as i64),
        format!(
            "Loan amount not between ₹{} and ₹{}",
            format_inr(minimum),
            format_inr(maximum)
        ),
        move |applicant| {
            finite(applicant.loan_amount)
                .is_some_and(|amount| amount >= minimum && amount <= maximum)
        },
    )
}

pub fn tenure_months_within(minimum: u32, maximum: u32) -> Predicate {
    Predicate::new(
        format!("tenure-within-{minimum}-{maximum}"),
        format!("Tenure not between {minimum} and {maximum} months"),
        move |applicant| {
            applicant
                .loan_tenure_months
                .is_some_and(|months| months >= minimum && months <= maximum)
        },
    )
}

pub fn employment_one_of(accepted: &[EmploymentType]) -> Predicate {
    let accepted: Vec<EmploymentType> = accepted.to_vec();
    let labels: Vec<&'static str> = accepted.iter().map(|kind| kind.label()).collect();
    Predicate::new(
        format!("employment-one-of-{}", labels.join("-")),
        format!("Employment type must be one of: {}", labels.join(", ")),
        move |applicant| {
            applicant
                .employment_type
                .is_some_and(|kind| accepted.contains(&kind))
        },
    )
}
