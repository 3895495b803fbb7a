use axum::response::Response;
use serde_json::Value;

use crate::workflows::eligibility::domain::{Applicant, EmploymentType};
use crate::workflows::eligibility::gates::GateCheck;
use crate::workflows::eligibility::predicates::{credit_score_at_least, monthly_income_at_least};
use crate::workflows::eligibility::rulebook;
use crate::workflows::eligibility::rules::TierRule;
use crate::workflows::eligibility::EligibilityEngine;

pub(super) fn credit_engine() -> EligibilityEngine {
    rulebook::credit_advisory().expect("packaged rulebook is valid")
}

pub(super) fn applicant(monthly_income: f64, credit_score: u16) -> Applicant {
    Applicant {
        monthly_income: Some(monthly_income),
        credit_score: Some(credit_score),
        current_emi: Some(5_000.0),
        loan_amount: Some(100_000.0),
        loan_tenure_months: Some(24),
        employment_type: Some(EmploymentType::Salaried),
    }
}

pub(super) fn scenario_b_applicant() -> Applicant {
    Applicant {
        monthly_income: Some(30_000.0),
        credit_score: Some(700),
        current_emi: Some(5_000.0),
        loan_amount: Some(100_000.0),
        loan_tenure_months: Some(24),
        employment_type: Some(EmploymentType::Salaried),
    }
}

pub(super) fn scenario_c_applicant() -> Applicant {
    Applicant {
        monthly_income: Some(60_000.0),
        credit_score: Some(720),
        current_emi: Some(10_000.0),
        loan_amount: Some(200_000.0),
        loan_tenure_months: Some(36),
        employment_type: None,
    }
}

/// Minimal gate pair used when a test needs observable gate ordering.
pub(super) fn ordered_gates() -> Vec<GateCheck> {
    vec![
        GateCheck::new("income-floor", "first gate reason", |applicant| {
            applicant
                .monthly_income
                .is_some_and(|income| income >= 10_000.0)
        }),
        GateCheck::new("score-floor", "second gate reason", |applicant| {
            applicant.credit_score.is_some_and(|score| score >= 500)
        }),
    ]
}

pub(super) fn single_tier() -> Vec<TierRule> {
    vec![TierRule::new(
        "starter",
        1,
        vec![
            monthly_income_at_least(15_000.0),
            credit_score_at_least(550),
        ],
    )]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
