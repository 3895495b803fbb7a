//! Integration specifications for the eligibility screening workflow.
//!
//! Scenarios exercise the public engine facade and HTTP router end to end:
//! rulebook validation, gate disqualification, multi-tier qualification, and
//! the JSON surface the advisory frontend consumes.

mod common {
    use gharconnect_eligibility::workflows::eligibility::{
        rulebook, Applicant, EligibilityEngine, EmploymentType,
    };

    pub(super) fn engine() -> EligibilityEngine {
        rulebook::credit_advisory().expect("packaged rulebook is valid")
    }

    pub(super) fn qualified_applicant() -> Applicant {
        Applicant {
            monthly_income: Some(60_000.0),
            credit_score: Some(720),
            current_emi: Some(10_000.0),
            loan_amount: Some(200_000.0),
            loan_tenure_months: Some(36),
            employment_type: Some(EmploymentType::Salaried),
        }
    }

    pub(super) fn gated_applicant() -> Applicant {
        Applicant {
            monthly_income: Some(15_000.0),
            credit_score: Some(750),
            ..Applicant::default()
        }
    }
}

mod evaluation {
    use super::common::*;
    use gharconnect_eligibility::workflows::eligibility::TierId;

    #[test]
    fn gate_failures_dominate_tier_rules() {
        let engine = engine();
        let outcome = engine.evaluate(&gated_applicant());

        assert!(outcome.disqualified);
        assert_eq!(
            outcome.disqualify_reason.as_deref(),
            Some("Monthly income below ₹20,000")
        );
        assert!(outcome.qualified_tiers.is_empty());
        assert!(outcome.unmet_reasons.is_empty());
    }

    #[test]
    fn strong_applicants_receive_both_offers_with_incred_ranked_best() {
        let engine = engine();
        let outcome = engine.evaluate(&qualified_applicant());

        assert!(!outcome.disqualified);
        assert!(outcome.qualified_tiers.contains(&TierId::from("incred")));
        assert!(outcome.qualified_tiers.contains(&TierId::from("banks")));
        assert_eq!(outcome.best_tier, Some(TierId::from("incred")));
    }

    #[test]
    fn repeated_evaluations_agree() {
        let engine = engine();
        let applicant = qualified_applicant();

        assert_eq!(engine.evaluate(&applicant), engine.evaluate(&applicant));
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::common::*;
    use gharconnect_eligibility::workflows::eligibility::eligibility_router;

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn evaluate_endpoint_round_trips_an_applicant() {
        let router = eligibility_router(Arc::new(engine()));
        let payload =
            serde_json::to_vec(&qualified_applicant()).expect("serialize applicant");

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/eligibility/evaluate")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let outcome = body.get("outcome").expect("outcome present");
        assert_eq!(outcome.get("best_tier"), Some(&json!("incred")));
        assert_eq!(outcome.get("disqualified"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn tiers_endpoint_exposes_the_configured_rulebook() {
        let router = eligibility_router(Arc::new(engine()));

        let response = router
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/v1/eligibility/tiers")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        let tiers = body.as_array().expect("tier array");
        assert_eq!(tiers.len(), 2);
    }
}
