//! Loan eligibility screening for the credit advisory vertical.
//!
//! A rulebook is declared as data: gate checks that disqualify an applicant
//! outright, followed by independent offer tiers whose predicates must all
//! hold. The engine validates the rulebook once at construction and then
//! evaluates applicants as a pure function with no error path.

pub mod domain;
pub mod gates;
pub mod intake;
pub mod predicates;
pub mod router;
pub mod rulebook;
pub mod rules;

#[cfg(test)]
mod tests;

pub use domain::{Applicant, EmploymentType, TierId};
pub use gates::GateCheck;
pub use predicates::Predicate;
pub use router::eligibility_router;
pub use rules::TierRule;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use gates::first_failed_gate;
use rules::assess_tier;

/// Structural rulebook problems caught once at engine construction.
///
/// These are integrator mistakes and are fatal; per-applicant evaluation
/// never raises them.
#[derive(Debug, thiserror::Error)]
pub enum RulebookError {
    #[error("tier '{0}' declares no predicates")]
    EmptyTier(TierId),
    #[error("tier id '{0}' declared more than once")]
    DuplicateTier(TierId),
    #[error("tiers '{first}' and '{second}' both declare rank {rank}")]
    DuplicateRank {
        rank: u32,
        first: TierId,
        second: TierId,
    },
    #[error("gate check '{0}' declared more than once")]
    DuplicateGate(String),
    #[error("unknown rulebook '{0}'")]
    UnknownRulebook(String),
}

/// Stateless evaluator applying a validated rulebook to applicants.
#[derive(Debug)]
pub struct EligibilityEngine {
    gates: Vec<GateCheck>,
    tiers: Vec<TierRule>,
}

impl EligibilityEngine {
    /// Validate and seal a rulebook. An empty tier list is a valid
    /// "no offers configured" rulebook, not an error.
    pub fn new(gates: Vec<GateCheck>, tiers: Vec<TierRule>) -> Result<Self, RulebookError> {
        let mut gate_ids = BTreeSet::new();
        for gate in &gates {
            if !gate_ids.insert(gate.id().to_string()) {
                return Err(RulebookError::DuplicateGate(gate.id().to_string()));
            }
        }

        let mut tier_ids = BTreeSet::new();
        let mut ranks: BTreeMap<u32, TierId> = BTreeMap::new();
        for tier in &tiers {
            if tier.predicates().is_empty() {
                return Err(RulebookError::EmptyTier(tier.tier_id().clone()));
            }
            if !tier_ids.insert(tier.tier_id().clone()) {
                return Err(RulebookError::DuplicateTier(tier.tier_id().clone()));
            }
            if let Some(first) = ranks.insert(tier.rank(), tier.tier_id().clone()) {
                return Err(RulebookError::DuplicateRank {
                    rank: tier.rank(),
                    first,
                    second: tier.tier_id().clone(),
                });
            }
        }

        Ok(Self { gates, tiers })
    }

    /// Evaluate one applicant against the rulebook.
    ///
    /// Gates dominate: the first failing gate returns a disqualified outcome
    /// and tier rules are not consulted. Otherwise every tier is assessed
    /// independently and the best qualifying tier is the one with the lowest
    /// rank. Non-qualification is an outcome, never an error.
    pub fn evaluate(&self, applicant: &Applicant) -> EvaluationOutcome {
        if let Some(gate) = first_failed_gate(applicant, &self.gates) {
            return EvaluationOutcome::disqualified(gate.failure_reason());
        }

        let mut qualified_tiers = BTreeSet::new();
        let mut unmet_reasons = BTreeMap::new();
        let mut best: Option<(u32, TierId)> = None;

        for tier in &self.tiers {
            let assessment = assess_tier(applicant, tier);
            if assessment.qualifies {
                qualified_tiers.insert(tier.tier_id().clone());
                let preferred = best
                    .as_ref()
                    .map_or(true, |(rank, _)| tier.rank() < *rank);
                if preferred {
                    best = Some((tier.rank(), tier.tier_id().clone()));
                }
            } else {
                unmet_reasons.insert(tier.tier_id().clone(), assessment.unmet_reasons);
            }
        }

        EvaluationOutcome {
            disqualified: false,
            disqualify_reason: None,
            qualified_tiers,
            best_tier: best.map(|(_, tier_id)| tier_id),
            unmet_reasons,
        }
    }

    /// Snapshot of the configured tiers for API and CLI listings.
    pub fn tier_overview(&self) -> Vec<TierSummary> {
        self.tiers
            .iter()
            .map(|tier| TierSummary {
                tier_id: tier.tier_id().clone(),
                rank: tier.rank(),
                predicate_ids: tier
                    .predicates()
                    .iter()
                    .map(|predicate| predicate.id().to_string())
                    .collect(),
            })
            .collect()
    }
}

/// Structured result of one evaluation, constructed fresh per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationOutcome {
    pub disqualified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disqualify_reason: Option<String>,
    pub qualified_tiers: BTreeSet<TierId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_tier: Option<TierId>,
    pub unmet_reasons: BTreeMap<TierId, Vec<String>>,
}

impl EvaluationOutcome {
    pub(crate) fn disqualified(reason: &str) -> Self {
        Self {
            disqualified: true,
            disqualify_reason: Some(reason.to_string()),
            qualified_tiers: BTreeSet::new(),
            best_tier: None,
            unmet_reasons: BTreeMap::new(),
        }
    }

    /// One-line rendering for status views and CLI output.
    pub fn summary(&self) -> String {
        if self.disqualified {
            let reason = self
                .disqualify_reason
                .as_deref()
                .unwrap_or("not eligible");
            return format!("disqualified: {reason}");
        }

        match &self.best_tier {
            Some(tier) => format!(
                "best offer: {tier} ({} tier(s) qualified)",
                self.qualified_tiers.len()
            ),
            None => "no offers available".to_string(),
        }
    }
}

/// Descriptive view of one configured tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier_id: TierId,
    pub rank: u32,
    pub predicate_ids: Vec<String>,
}
