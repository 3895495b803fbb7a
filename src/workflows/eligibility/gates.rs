use std::fmt;

use super::domain::Applicant;

type GateFn = Box<dyn Fn(&Applicant) -> bool + Send + Sync>;

/// Absolute disqualifier evaluated before any tier rule.
///
/// Gates run in declaration order and the first failure ends the evaluation
/// with that gate's reason alone; later gates are never consulted.
pub struct GateCheck {
    id: String,
    failure_reason: String,
    test: GateFn,
}

impl GateCheck {
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

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn failure_reason(&self) -> &str {
        &self.failure_reason
    }

    pub fn passes(&self, applicant: &Applicant) -> bool {
        (self.test)(applicant)
    }
}

impl fmt::Debug for GateCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateCheck")
            .field("id", &self.id)
            .field("failure_reason", &self.failure_reason)
            .finish()
    }
}

/// Scan gates in declaration order, returning the first that fails.
pub(crate) fn first_failed_gate<'a>(
    applicant: &Applicant,
    gates: &'a [GateCheck],
) -> Option<&'a GateCheck> {
    gates.iter().find(|gate| !gate.passes(applicant))
}
