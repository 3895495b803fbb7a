use super::common::*;
use crate::workflows::eligibility::domain::TierId;
use crate::workflows::eligibility::gates::GateCheck;
use crate::workflows::eligibility::predicates::monthly_income_at_least;
use crate::workflows::eligibility::rulebook;
use crate::workflows::eligibility::rules::TierRule;
use crate::workflows::eligibility::{EligibilityEngine, RulebookError};

#[test]
fn tier_without_predicates_is_rejected_at_construction() {
    let tiers = vec![TierRule::new("hollow", 1, Vec::new())];
    match EligibilityEngine::new(Vec::new(), tiers) {
        Err(RulebookError::EmptyTier(tier_id)) => {
            assert_eq!(tier_id, TierId::from("hollow"));
        }
        other => panic!("expected empty tier rejection, got {other:?}"),
    }
}

#[test]
fn duplicate_tier_ids_are_rejected() {
    let tiers = vec![
        TierRule::new("incred", 1, vec![monthly_income_at_least(25_000.0)]),
        TierRule::new("incred", 2, vec![monthly_income_at_least(50_000.0)]),
    ];
    match EligibilityEngine::new(Vec::new(), tiers) {
        Err(RulebookError::DuplicateTier(tier_id)) => {
            assert_eq!(tier_id, TierId::from("incred"));
        }
        other => panic!("expected duplicate tier rejection, got {other:?}"),
    }
}

#[test]
fn duplicate_ranks_are_rejected() {
    let tiers = vec![
        TierRule::new("incred", 1, vec![monthly_income_at_least(25_000.0)]),
        TierRule::new("banks", 1, vec![monthly_income_at_least(50_000.0)]),
    ];
    match EligibilityEngine::new(Vec::new(), tiers) {
        Err(RulebookError::DuplicateRank {
            rank,
            first,
            second,
        }) => {
            assert_eq!(rank, 1);
            assert_eq!(first, TierId::from("incred"));
            assert_eq!(second, TierId::from("banks"));
        }
        other => panic!("expected duplicate rank rejection, got {other:?}"),
    }
}

#[test]
fn duplicate_gate_ids_are_rejected() {
    let gates = vec![
        GateCheck::new("income-floor", "too low", |_| true),
        GateCheck::new("income-floor", "still too low", |_| true),
    ];
    match EligibilityEngine::new(gates, single_tier()) {
        Err(RulebookError::DuplicateGate(id)) => assert_eq!(id, "income-floor"),
        other => panic!("expected duplicate gate rejection, got {other:?}"),
    }
}

#[test]
fn configuration_errors_render_actionable_messages() {
    let tiers = vec![TierRule::new("hollow", 1, Vec::new())];
    let err = EligibilityEngine::new(Vec::new(), tiers).expect_err("invalid rulebook");
    assert_eq!(err.to_string(), "tier 'hollow' declares no predicates");
}

#[test]
fn unknown_rulebook_names_fail_fast() {
    match rulebook::by_name("rentals") {
        Err(RulebookError::UnknownRulebook(name)) => assert_eq!(name, "rentals"),
        other => panic!("expected unknown rulebook rejection, got {other:?}"),
    }
}

#[test]
fn packaged_rulebook_validates_and_ranks_incred_first() {
    let engine = rulebook::by_name("credit-advisory").expect("packaged rulebook is valid");
    let overview = engine.tier_overview();

    assert_eq!(overview.len(), 2);
    assert_eq!(overview[0].tier_id, TierId::from("incred"));
    assert_eq!(overview[0].rank, 1);
    assert_eq!(overview[1].tier_id, TierId::from("banks"));
    assert_eq!(overview[1].rank, 2);
    assert!(!overview[0].predicate_ids.is_empty());
}
