use super::domain::{Applicant, TierId};
use super::predicates::Predicate;

/// Offer tier definition: a named outcome with the predicates an applicant
/// must satisfy and the rank used to pick the best offer among several.
///
/// Lower rank means a more preferred offer. Tiers are independent of each
/// other; an applicant may legitimately qualify for more than one.
#[derive(Debug)]
pub struct TierRule {
    tier_id: TierId,
    rank: u32,
    predicates: Vec<Predicate>,
}

impl TierRule {
    pub fn new(tier_id: impl Into<TierId>, rank: u32, predicates: Vec<Predicate>) -> Self {
        Self {
            tier_id: tier_id.into(),
            rank,
            predicates,
        }
    }

    pub fn tier_id(&self) -> &TierId {
        &self.tier_id
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

/// Result of testing one tier against one applicant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TierAssessment {
    pub(crate) qualifies: bool,
    pub(crate) unmet_reasons: Vec<String>,
}

/// Test every predicate of a tier, collecting the reason for each failure.
///
/// Unlike gates, tier assessment never short-circuits: callers get the
/// complete list of shortfalls for "how to qualify" guidance.
pub(crate) fn assess_tier(applicant: &Applicant, rule: &TierRule) -> TierAssessment {
    let unmet_reasons: Vec<String> = rule
        .predicates
        .iter()
        .filter(|predicate| !predicate.holds_for(applicant))
        .map(|predicate| predicate.failure_reason().to_string())
        .collect();

    TierAssessment {
        qualifies: unmet_reasons.is_empty(),
        unmet_reasons,
    }
}
